//! Scan file structure inspection command
//!
//! Implements the command for displaying the container structure and
//! acquisition metadata of ScanImage files.

use clap::ArgMatches;
use log::info;
use std::path::PathBuf;

use crate::commands::command_traits::Command;
use crate::geometry::AcquisitionMode;
use crate::scanfile::errors::{ScanError, ScanResult};
use crate::scanfile::{ParsedScan, ScanFileReader};
use crate::utils::logger::Logger;

/// Command for inspecting scan file structure
pub struct InfoCommand<'a> {
    /// Paths to the input files
    input_files: Vec<PathBuf>,
    /// Whether to enable verbose output
    verbose: bool,
    /// Logger for recording operations
    logger: &'a Logger,
}

impl<'a> InfoCommand<'a> {
    /// Create a new info command
    ///
    /// # Arguments
    /// * `args` - CLI argument matches from clap
    /// * `logger` - Logger for recording operations
    ///
    /// # Returns
    /// A new InfoCommand instance or an error
    pub fn new(args: &ArgMatches, logger: &'a Logger) -> ScanResult<Self> {
        let input_files: Vec<PathBuf> = args
            .get_many::<String>("input")
            .map(|values| values.map(PathBuf::from).collect())
            .unwrap_or_default();

        if input_files.is_empty() {
            return Err(ScanError::GenericError("Missing input file".to_string()));
        }

        Ok(InfoCommand {
            input_files,
            verbose: args.get_flag("verbose"),
            logger,
        })
    }

    /// Display the container structure of every input file
    fn display_structure(&self) -> ScanResult<()> {
        let mut reader = ScanFileReader::new();

        for path in &self.input_files {
            let scan_file = reader.load(path)?;

            info!("Scan file: {}", path.display());
            info!("  Format: {}", if scan_file.is_big_tiff { "BigTIFF" } else { "TIFF" });
            info!("  Number of pages: {}", scan_file.page_count());

            if let Some((width, height)) = scan_file.dimensions() {
                info!("  Page dimensions: {}x{}", width, height);
            } else {
                info!("  Page dimensions: Not available");
            }

            if self.verbose {
                if let Some(ifd) = scan_file.main_ifd() {
                    info!("  First page tags:");
                    for entry in &ifd.entries {
                        info!("    {}", entry.description());
                    }
                }
            }
        }

        Ok(())
    }

    /// Display the acquisition metadata of the file set as a whole
    fn display_acquisition(&self) {
        match ParsedScan::open(&self.input_files) {
            Ok(scan) => {
                info!("ScanImage acquisition:");
                if let Some(version) = scan.version() {
                    info!("  Version: {}", version);
                }
                if let Ok(mode) = AcquisitionMode::of(&scan) {
                    info!("  Mode: {}", mode.name());
                }
                if let Ok(channels) = scan.num_channels() {
                    info!("  Channels: {}", channels);
                }
                if let Ok(depths) = scan.num_scanning_depths() {
                    info!("  Scanning depths: {}", depths);
                }
                if let Ok(frames) = scan.num_frames() {
                    info!("  Frames: {}", frames);
                }
                if let Ok(fps) = scan.fps() {
                    info!("  Frame rate: {} Hz", fps);
                }
            }
            Err(e) => {
                info!("ScanImage acquisition metadata not available: {}", e);
            }
        }
    }
}

impl<'a> Command for InfoCommand<'a> {
    fn execute(&self) -> ScanResult<()> {
        self.display_structure()?;
        self.display_acquisition();

        self.logger.log(&format!("Inspected {} scan file(s)", self.input_files.len()))?;
        Ok(())
    }
}
