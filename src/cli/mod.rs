// CLI module for opusinfo
//
// Thin command-line layer over the library. Only compiled into the binary.

pub mod commands;
pub mod config;
pub mod output;

use anyhow::Result;

pub use config::{Commands, Config};
pub use output::OutputFormatter;

/// Dispatch the parsed command line
pub fn run(config: &Config) -> Result<()> {
    let formatter = OutputFormatter::new(config.format, config.quiet);
    let options = config.read_options();

    match &config.command {
        Commands::Read { files, output } => {
            commands::command_read(files, output.as_deref(), &options, &formatter)
        }
        Commands::Scan { directory, pattern } => {
            commands::command_scan(directory, pattern, &options, &formatter)
        }
        Commands::Info { files, detailed } => {
            commands::command_info(files, *detailed, &options, &formatter)
        }
    }
}
