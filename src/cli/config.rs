// CLI configuration
use clap::{Parser, Subcommand, ValueEnum};

use opusinfo::ReadOptions;

/// Opusinfo - Ogg Opus header inspection tool
#[derive(Parser, Debug)]
#[command(name = "opusinfo")]
#[command(about = "Read stream parameters and tags from Ogg Opus files", long_about = None)]
#[command(version)]
pub struct Config {
    /// Output format
    #[arg(short, long, value_enum, default_value = "pretty", global = true)]
    pub format: OutputFormat,

    /// Quiet mode (suppress progress messages)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verify the CRC-32 of every page read
    #[arg(long, global = true)]
    pub verify_crc: bool,

    /// Subcommand
    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON
    #[default]
    Pretty,
    /// Compact JSON, one document per line
    Json,
    /// Key-value pairs
    KeyValue,
    /// Table format
    Table,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Read metadata from Opus file(s)
    Read {
        /// Opus file path(s)
        #[arg(value_name = "FILE", required = true)]
        files: Vec<String>,

        /// Output to file instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Scan a directory tree and print one catalog record per file
    Scan {
        /// Directory to scan
        #[arg(value_name = "DIR")]
        directory: String,

        /// File name pattern
        #[arg(short, long, default_value = "*.opus")]
        pattern: String,
    },

    /// Show file information
    Info {
        /// Opus file path(s)
        #[arg(value_name = "FILE", required = true)]
        files: Vec<String>,

        /// Include vendor and comment count
        #[arg(short, long)]
        detailed: bool,
    },
}

impl Config {
    pub fn read_options(&self) -> ReadOptions {
        ReadOptions {
            verify_checksum: self.verify_crc,
            ..ReadOptions::default()
        }
    }
}
