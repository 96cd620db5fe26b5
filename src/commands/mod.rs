//! CLI command implementations
//!
//! This module contains implementations of various commands
//! supported by the CLI application using the Command pattern.

pub mod command_traits;
pub mod info_command;
pub mod extract_command;
pub mod batch_command;

pub use command_traits::{Command, CommandFactory};
pub use info_command::InfoCommand;
pub use extract_command::ExtractCommand;
pub use batch_command::BatchCommand;

use clap::ArgMatches;
use crate::scanfile::errors::ScanResult;
use crate::utils::logger::Logger;

/// Factory for creating command instances based on CLI arguments
///
/// This factory examines the command-line arguments and creates
/// the appropriate command instance for execution.
pub struct ScankitCommandFactory;

impl ScankitCommandFactory {
    /// Create a new factory instance
    pub fn new() -> Self {
        ScankitCommandFactory
    }
}

impl<'a> CommandFactory<'a> for ScankitCommandFactory {
    fn create_command(&self, args: &ArgMatches, logger: &'a Logger) -> ScanResult<Box<dyn Command + 'a>> {
        // Determine which command to run based on args
        if args.get_flag("batch") {
            Ok(Box::new(BatchCommand::new(args, logger)?))
        } else if args.get_flag("info") {
            Ok(Box::new(InfoCommand::new(args, logger)?))
        } else {
            // Default to extraction
            Ok(Box::new(ExtractCommand::new(args, logger)?))
        }
    }
}
