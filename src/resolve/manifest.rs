//! TOML manifest resolver
//!
//! The CLI's stand-in for an external file registry: a TOML file
//! mapping scan keys to their file lists, all relative to one root
//! data directory.
//!
//! ```toml
//! root = "/data/scans"
//!
//! [scans]
//! session1_scan1 = ["session1/scan1_00001.tif", "session1/scan1_00002.tif"]
//! ```

use log::debug;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::resolve::FileSetResolver;
use crate::scanfile::errors::{ScanError, ScanResult};
use crate::utils::path_utils;

#[derive(Debug, Deserialize)]
struct ManifestDoc {
    /// Root data directory all scan paths are relative to
    root: String,
    /// Scan key to relative file list
    #[serde(default)]
    scans: HashMap<String, Vec<String>>,
}

/// Resolver backed by a TOML manifest file
pub struct ManifestResolver {
    root: PathBuf,
    scans: HashMap<String, Vec<String>>,
}

impl ManifestResolver {
    /// Loads a manifest from the given path
    ///
    /// # Arguments
    /// * `path` - Path to the TOML manifest file
    ///
    /// # Returns
    /// The resolver, or an error when the file is missing or malformed
    pub fn load(path: &Path) -> ScanResult<ManifestResolver> {
        let text = fs::read_to_string(path)?;
        let doc: ManifestDoc = toml::from_str(&text).map_err(|e| {
            ScanError::GenericError(format!("Invalid manifest {}: {}", path.display(), e))
        })?;

        debug!("Loaded manifest {} with {} scans", path.display(), doc.scans.len());

        Ok(ManifestResolver {
            root: PathBuf::from(doc.root),
            scans: doc.scans,
        })
    }

    /// All scan keys in the manifest, sorted for deterministic batches
    pub fn scan_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.scans.keys().map(|k| k.as_str()).collect();
        keys.sort_unstable();
        keys
    }
}

impl FileSetResolver for ManifestResolver {
    fn root_data_dir(&self) -> ScanResult<PathBuf> {
        Ok(self.root.clone())
    }

    fn scan_files(&self, scan_key: &str) -> ScanResult<Vec<PathBuf>> {
        let files = self.scans.get(scan_key).ok_or_else(|| {
            ScanError::GenericError(format!("Unknown scan key: {}", scan_key))
        })?;

        if files.is_empty() {
            return Err(ScanError::EmptyFileSet);
        }

        // Manifest entries use posix separators regardless of platform
        Ok(files.iter().map(|f| path_utils::join_posix_path(&self.root, f)).collect())
    }
}
