//! Batch scan registration command
//!
//! Implements the command for extracting every scan listed in a
//! manifest. One scan's failure is logged and isolated; the batch
//! always runs to completion.

use clap::ArgMatches;
use log::{error, info};
use std::fs;
use std::path::PathBuf;

use crate::api::ScanKit;
use crate::commands::command_traits::Command;
use crate::resolve::ManifestResolver;
use crate::scanfile::errors::{ScanError, ScanResult};
use crate::utils::logger::Logger;
use crate::utils::progress::ProgressTracker;

/// Command for extracting all scans of a manifest
pub struct BatchCommand<'a> {
    /// Path to the TOML manifest
    manifest: PathBuf,
    /// Directory to write per-scan JSON records into, when requested
    json_dir: Option<PathBuf>,
    /// Logger for recording operations
    logger: &'a Logger,
}

impl<'a> BatchCommand<'a> {
    /// Create a new batch command
    ///
    /// # Arguments
    /// * `args` - CLI argument matches from clap
    /// * `logger` - Logger for recording operations
    ///
    /// # Returns
    /// A new BatchCommand instance or an error
    pub fn new(args: &ArgMatches, logger: &'a Logger) -> ScanResult<Self> {
        let manifest = args
            .get_one::<String>("manifest")
            .map(PathBuf::from)
            .ok_or_else(|| ScanError::GenericError("Batch mode requires --manifest".to_string()))?;

        let json_dir = if args.get_flag("json") {
            Some(args.get_one::<String>("output")
                .map(PathBuf::from)
                .ok_or_else(|| ScanError::GenericError(
                    "Batch JSON export requires --output <DIR>".to_string()))?)
        } else {
            None
        };

        Ok(BatchCommand {
            manifest,
            json_dir,
            logger,
        })
    }

    /// Writes one scan's record into the JSON output directory
    fn write_json(&self, scan_key: &str, record: &crate::record::ScanRecord) -> ScanResult<()> {
        let dir = match &self.json_dir {
            Some(dir) => dir,
            None => return Ok(()),
        };

        fs::create_dir_all(dir)?;
        let json = serde_json::to_string_pretty(record).map_err(|e| {
            ScanError::GenericError(format!("Failed to serialize record: {}", e))
        })?;

        fs::write(dir.join(format!("{}.json", scan_key)), json)?;
        Ok(())
    }
}

impl<'a> Command for BatchCommand<'a> {
    fn execute(&self) -> ScanResult<()> {
        let resolver = ManifestResolver::load(&self.manifest)?;
        let scan_keys: Vec<String> = resolver.scan_keys().iter().map(|k| k.to_string()).collect();

        if scan_keys.is_empty() {
            info!("Manifest lists no scans, nothing to do");
            return Ok(());
        }

        let kit = ScanKit::new(resolver);
        let progress = ProgressTracker::new(scan_keys.len() as u64, "Registering scans");

        let mut succeeded = 0usize;
        let mut failed = 0usize;

        for scan_key in &scan_keys {
            progress.set_message(scan_key);

            // A bad file set must not abort the rest of the batch
            match kit.extract(scan_key) {
                Ok(record) => {
                    if let Err(e) = self.write_json(scan_key, &record) {
                        error!("Failed to export record for scan '{}': {}", scan_key, e);
                        failed += 1;
                    } else {
                        succeeded += 1;
                    }
                }
                Err(e) => {
                    error!("Skipping scan '{}': {}", scan_key, e);
                    failed += 1;
                }
            }

            progress.increment(1);
        }

        progress.finish();
        info!("Processed {} scans: {} succeeded, {} failed",
              scan_keys.len(), succeeded, failed);
        self.logger.log(&format!("Batch complete: {}/{} scans registered",
                                 succeeded, scan_keys.len()))?;

        Ok(())
    }
}
