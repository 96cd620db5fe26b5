use clap::{Arg, Command as ClapCommand, ArgAction};
use std::process;
use log::error;

// Import from your library
use scankit::utils::logger::Logger;
use scankit::commands::{CommandFactory, ScankitCommandFactory};

fn main() {
    let matches = ClapCommand::new("ScanKit")
        .version("0.1")
        .about("Extract ScanImage scan metadata and field geometry")
        .arg(
            Arg::new("input")
                .help("Scan key (with --manifest) or ScanImage TIFF file paths")
                .num_args(0..)
                .index(1),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose output")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("manifest")
                .short('m')
                .long("manifest")
                .help("TOML manifest mapping scan keys to file sets")
                .value_name("FILE")
                .required(false),
        )
        .arg(
            Arg::new("root")
                .long("root")
                .help("Root data directory for directly given file paths")
                .value_name("DIR")
                .required(false),
        )
        .arg(
            Arg::new("info")
                .short('i')
                .long("info")
                .help("Inspect scan file structure instead of extracting")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("batch")
                .short('b')
                .long("batch")
                .help("Extract every scan listed in the manifest")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Emit extracted records as JSON")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .help("Output file (or directory in batch mode) for JSON records")
                .value_name("PATH")
                .required(false),
        )
        .get_matches();

    let log_file = "scankit.log";
    let logger = match Logger::new(log_file) {
        Ok(l) => l,
        Err(e) => {
            eprintln!("Error initializing logger: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = Logger::init_global_logger("scankit-global.log") {
        eprintln!("Error setting up global logger: {}", e);
        process::exit(1);
    }

    let factory = ScankitCommandFactory::new();

    let command_result = factory.create_command(&matches, &logger);
    match command_result {
        Ok(command) => {
            if let Err(e) = command.execute() {
                error!("Command execution error: {}", e);
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        },
        Err(e) => {
            error!("Failed to create command: {}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
}
