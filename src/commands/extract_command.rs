//! Scan metadata extraction command
//!
//! Implements the command for extracting the full metadata record of
//! one scan and printing or exporting it.

use clap::ArgMatches;
use log::info;
use std::fs;
use std::path::PathBuf;

use crate::api::ScanKit;
use crate::commands::command_traits::Command;
use crate::record::ScanRecord;
use crate::resolve::{DirectResolver, ManifestResolver};
use crate::scanfile::errors::{ScanError, ScanResult};
use crate::utils::logger::Logger;

/// Command for extracting one scan's metadata record
pub struct ExtractCommand<'a> {
    /// Positional inputs: a scan key (manifest mode) or file paths
    inputs: Vec<String>,
    /// Path to the TOML manifest, when resolving by scan key
    manifest: Option<PathBuf>,
    /// Root data directory for direct file inputs
    root: Option<PathBuf>,
    /// Whether to emit the record as JSON
    json: bool,
    /// Output file for the JSON record
    output: Option<PathBuf>,
    /// Logger for recording operations
    logger: &'a Logger,
}

impl<'a> ExtractCommand<'a> {
    /// Create a new extract command
    ///
    /// # Arguments
    /// * `args` - CLI argument matches from clap
    /// * `logger` - Logger for recording operations
    ///
    /// # Returns
    /// A new ExtractCommand instance or an error
    pub fn new(args: &ArgMatches, logger: &'a Logger) -> ScanResult<Self> {
        let inputs: Vec<String> = args
            .get_many::<String>("input")
            .map(|values| values.cloned().collect())
            .unwrap_or_default();

        if inputs.is_empty() {
            return Err(ScanError::GenericError(
                "Missing input: pass a scan key with --manifest, or scan file paths with --root".to_string()));
        }

        Ok(ExtractCommand {
            inputs,
            manifest: args.get_one::<String>("manifest").map(PathBuf::from),
            root: args.get_one::<String>("root").map(PathBuf::from),
            json: args.get_flag("json"),
            output: args.get_one::<String>("output").map(PathBuf::from),
            logger,
        })
    }

    /// Runs the extraction through the appropriate resolver
    fn extract_record(&self) -> ScanResult<ScanRecord> {
        if let Some(manifest_path) = &self.manifest {
            let resolver = ManifestResolver::load(manifest_path)?;
            let scan_key = &self.inputs[0];
            return ScanKit::new(resolver).extract(scan_key);
        }

        let root = self.root.clone().ok_or_else(|| {
            ScanError::GenericError("Direct extraction requires --root".to_string())
        })?;
        let files: Vec<PathBuf> = self.inputs.iter().map(PathBuf::from).collect();
        let resolver = DirectResolver::new(root, files);
        let scan_key = self.inputs[0].clone();

        ScanKit::new(resolver).extract(&scan_key)
    }

    /// Display the assembled record
    fn display_record(&self, record: &ScanRecord) {
        let scan = record.scan();

        info!("Scan record:");
        if let Some(version) = &scan.version {
            info!("  ScanImage version: {}", version);
        }
        info!("  Fields: {}", scan.num_fields);
        info!("  Channels: {}", scan.num_channels);
        info!("  Scanning depths: {}", scan.num_scanning_depths);
        info!("  Frames: {}", scan.num_frames);
        info!("  ROIs: {}", scan.num_rois);
        info!("  Motor zero: ({}, {}, {}) um", scan.x, scan.y, scan.z);
        info!("  Frame rate: {} Hz", scan.fps);
        info!("  Bidirectional: {}", scan.bidirectional);
        info!("  Line period: {} us", scan.usecs_per_line);
        info!("  Fill fraction: {}", scan.fill_fraction);

        for field in record.fields() {
            info!("  {}", field);
        }

        for file in record.files() {
            info!("  File: {}", file.file_path);
        }
    }

    /// Write the record as JSON to the output file or stdout
    fn write_json(&self, record: &ScanRecord) -> ScanResult<()> {
        let json = serde_json::to_string_pretty(record).map_err(|e| {
            ScanError::GenericError(format!("Failed to serialize record: {}", e))
        })?;

        match &self.output {
            Some(path) => {
                fs::write(path, json)?;
                info!("Wrote scan record to {}", path.display());
            }
            None => println!("{}", json),
        }

        Ok(())
    }
}

impl<'a> Command for ExtractCommand<'a> {
    fn execute(&self) -> ScanResult<()> {
        let record = self.extract_record()?;

        if self.json {
            self.write_json(&record)?;
        } else {
            self.display_record(&record);
        }

        self.logger.log(&format!("Extracted scan '{}': {} fields, {} files",
                                 self.inputs[0], record.fields().len(), record.files().len()))?;
        Ok(())
    }
}
