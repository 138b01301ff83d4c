// CLI binary entry point for opusinfo

mod cli;

use clap::Parser;
use std::process;

use cli::Config;

fn main() {
    lovely_env_logger::init_default();

    let config = Config::parse();
    if let Err(e) = cli::run(&config) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}
