//! ScanImage acquisition header parsing
//!
//! ScanImage 2016b+ writes its acquisition state as text lines of the
//! form `SI.hRoiManager.linePeriod = 6.3156e-05` into the Software tag
//! (older builds use the ImageDescription tag and a `scanimage.` prefix).
//! Values are MATLAB literals: scalars, `true`/`false`, quoted strings,
//! and bracketed arrays with space or semicolon separators.

use std::collections::HashMap;

use lazy_static::lazy_static;
use regex::Regex;

use crate::scanfile::errors::{ScanError, ScanResult};
use crate::utils::string_utils;

lazy_static! {
    /// One `SI.<path> = <value>` header line, optional `scanimage.` prefix
    static ref HEADER_LINE_RE: Regex =
        Regex::new(r"(?m)^\s*(?:scanimage\.)?SI\.([A-Za-z0-9_.]+)\s*=\s*(.+?)\s*$").unwrap();
}

/// Parsed ScanImage header: key/value map with typed accessors
///
/// Keys are stored without the leading `SI.` prefix, values as the raw
/// MATLAB literal text.
#[derive(Debug, Clone)]
pub struct HeaderMap {
    values: HashMap<String, String>,
}

impl HeaderMap {
    /// Parses every recognizable header line out of a metadata text block
    pub fn parse(text: &str) -> Self {
        let mut values = HashMap::new();

        for capture in HEADER_LINE_RE.captures_iter(text) {
            let key = capture[1].to_string();
            let value = capture[2].to_string();
            values.insert(key, value);
        }

        HeaderMap { values }
    }

    /// Returns true when no header lines were recognized
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of parsed header entries
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Raw value text for a key, if present
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(|v| v.as_str())
    }

    /// String value with MATLAB quotes stripped
    pub fn get_str(&self, key: &str) -> Option<String> {
        self.get(key)
            .map(|v| string_utils::strip_matlab_quotes(v).to_string())
    }

    /// Required floating-point value
    pub fn get_f64(&self, key: &str) -> ScanResult<f64> {
        let raw = self
            .get(key)
            .ok_or_else(|| ScanError::MissingParameter(key.to_string()))?;
        parse_f64(key, raw)
    }

    /// Optional floating-point value
    pub fn get_f64_opt(&self, key: &str) -> ScanResult<Option<f64>> {
        match self.get(key) {
            Some(raw) => parse_f64(key, raw).map(Some),
            None => Ok(None),
        }
    }

    /// Boolean value, defaulting when the key is absent
    ///
    /// MATLAB writes logicals as `true`/`false` or `1`/`0`.
    pub fn get_bool_or(&self, key: &str, default: bool) -> ScanResult<bool> {
        let raw = match self.get(key) {
            Some(raw) => raw,
            None => return Ok(default),
        };

        match raw.trim() {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            other => Err(ScanError::InvalidParameter {
                key: key.to_string(),
                value: other.to_string(),
            }),
        }
    }

    /// Numeric array value (`[0 5 10]`, `[1;2]`, or a bare scalar)
    ///
    /// Returns an empty vector for `[]` and for an absent key.
    pub fn get_f64_array(&self, key: &str) -> ScanResult<Vec<f64>> {
        let raw = match self.get(key) {
            Some(raw) => raw.trim(),
            None => return Ok(Vec::new()),
        };

        let inner = raw
            .strip_prefix('[')
            .and_then(|r| r.strip_suffix(']'))
            .unwrap_or(raw);

        let mut values = Vec::new();
        for token in inner.split(|c: char| c.is_whitespace() || c == ';' || c == ',') {
            if token.is_empty() {
                continue;
            }
            values.push(parse_f64(key, token)?);
        }

        Ok(values)
    }
}

/// Parses one MATLAB numeric literal, mapping failures to the header key
fn parse_f64(key: &str, raw: &str) -> ScanResult<f64> {
    let trimmed = raw.trim();
    // MATLAB spells infinities with a capital I
    match trimmed {
        "Inf" => return Ok(f64::INFINITY),
        "-Inf" => return Ok(f64::NEG_INFINITY),
        "NaN" => return Ok(f64::NAN),
        _ => {}
    }

    trimmed.parse::<f64>().map_err(|_| ScanError::InvalidParameter {
        key: key.to_string(),
        value: raw.to_string(),
    })
}
