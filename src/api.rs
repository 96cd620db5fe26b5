//! Main interface to the ScanKit library

use log::{error, info};
use std::path::Path;

use crate::geometry::FieldGeometryExtractor;
use crate::record::{MetadataAssembler, ScanAcquisition, ScanRecord};
use crate::resolve::FileSetResolver;
use crate::scanfile::errors::ScanResult;
use crate::scanfile::{ParsedScan, ScanFileReader};

/// The scan metadata extraction engine
///
/// Wires the resolver, the scan-file decoder, the geometry extractor
/// and the assembler into one pipeline. Each extraction is a single
/// synchronous pass over one scan's file set; the engine itself holds
/// no mutable state between scans, so one instance can serve a whole
/// batch and one scan's failure never corrupts another's extraction.
pub struct ScanKit<R: FileSetResolver> {
    resolver: R,
}

impl<R: FileSetResolver> ScanKit<R> {
    /// Creates an engine over the given file-set resolver
    pub fn new(resolver: R) -> Self {
        ScanKit { resolver }
    }

    /// Extracts the full metadata record of one scan
    ///
    /// Resolves the scan's files, reads the header, extracts per-field
    /// geometry, and assembles the record with root-relative file
    /// references.
    ///
    /// # Arguments
    /// * `scan_key` - Identifier of the scan to extract
    ///
    /// # Returns
    /// The assembled record, or the first error encountered; failures
    /// are logged with the scan key for diagnosis
    pub fn extract(&self, scan_key: &str) -> ScanResult<ScanRecord> {
        info!("Reading header of scan '{}'...", scan_key);

        self.extract_inner(scan_key).map_err(|e| {
            error!("Extraction failed for scan '{}': {}", scan_key, e);
            e
        })
    }

    fn extract_inner(&self, scan_key: &str) -> ScanResult<ScanRecord> {
        let file_paths = self.resolver.scan_files(scan_key)?;
        let raw = ParsedScan::open(&file_paths)?;

        let scan = ScanAcquisition::read(&raw)?;
        let fields = FieldGeometryExtractor::extract(&scan, &raw)?;

        let root = self.resolver.root_data_dir()?;
        MetadataAssembler::assemble(scan, fields, &file_paths, &root)
    }

    /// Analyzes one scan file and returns a structure summary
    ///
    /// # Arguments
    /// * `input_path` - Path to the scan file to analyze
    ///
    /// # Returns
    /// String containing analysis information or an error
    pub fn analyze(&self, input_path: &Path) -> ScanResult<String> {
        let mut reader = ScanFileReader::new();
        let scan_file = reader.load(input_path)?;

        let mut result = format!("Scan File Analysis Results:\n");
        result.push_str(&format!("  Format: {}\n",
                                 if scan_file.is_big_tiff { "BigTIFF" } else { "TIFF" }));
        result.push_str(&format!("  Number of pages: {}\n", scan_file.page_count()));

        if let Some((width, height)) = scan_file.dimensions() {
            result.push_str(&format!("  Page dimensions: {}x{}\n", width, height));
        }

        Ok(result)
    }
}
