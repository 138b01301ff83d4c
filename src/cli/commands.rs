// CLI command implementations
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use glob::{glob, Pattern};
use log::debug;
use serde_json::json;

use opusinfo::{OpusMetadata, ReadOptions, Recording};

use crate::cli::output::OutputFormatter;

/// Read metadata from files
pub fn command_read(
    files: &[String],
    output: Option<&str>,
    options: &ReadOptions,
    formatter: &OutputFormatter,
) -> Result<()> {
    let mut writer: Box<dyn Write> = match output {
        Some(path) => {
            let file = File::create(path).with_context(|| format!("cannot create {}", path))?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(io::stdout()),
    };

    let mut failed = 0;
    for file_path in files {
        match OpusMetadata::read_path(file_path, options) {
            Ok(metadata) => {
                let mut value = serde_json::to_value(&metadata)?;
                value["path"] = json!(file_path);
                formatter.output_value(&value, &mut *writer)?;
            }
            Err(e) => {
                formatter.print_error(&format!("{}: {}", file_path, e));
                failed += 1;
            }
        }
    }
    writer.flush()?;

    if failed > 0 {
        bail!("{} of {} file(s) could not be read", failed, files.len());
    }
    Ok(())
}

/// Scan a directory tree for Opus files and print a catalog record for each
pub fn command_scan(
    directory: &str,
    pattern: &str,
    options: &ReadOptions,
    formatter: &OutputFormatter,
) -> Result<()> {
    let files = find_files(directory, pattern, formatter)?;

    if files.is_empty() {
        formatter.print_info("No files found matching pattern");
        return Ok(());
    }
    formatter.print_info(&format!("Scanning {} files...", files.len()));

    let stdout = io::stdout();
    let mut writer = stdout.lock();
    let mut success_count = 0;
    let mut error_count = 0;

    for path in &files {
        let display = path.display().to_string();
        match OpusMetadata::read_path(path, options) {
            Ok(metadata) => {
                let recording = Recording::from_metadata(display.clone(), &metadata);
                formatter.output_value(&serde_json::to_value(&recording)?, &mut writer)?;
                formatter.print_success(&display);
                success_count += 1;
            }
            Err(e) => {
                // One bad file does not stop the scan.
                formatter.print_error(&format!("{}: {}", display, e));
                error_count += 1;
            }
        }
    }

    formatter.print_info(&format!(
        "Completed: {} successful, {} errors",
        success_count, error_count
    ));
    Ok(())
}

/// Recursively collect files under `directory` whose name matches `pattern`
///
/// The directory is matched literally; only `pattern` may hold wildcards.
pub fn find_files(
    directory: &str,
    pattern: &str,
    formatter: &OutputFormatter,
) -> Result<Vec<PathBuf>> {
    let glob_pattern = format!(
        "{}/**/{}",
        Pattern::escape(directory.trim_end_matches('/')),
        pattern
    );
    debug!("scanning {}", glob_pattern);

    let mut files = Vec::new();
    for entry in glob(&glob_pattern).with_context(|| format!("invalid pattern {}", pattern))? {
        match entry {
            Ok(path) if path.is_file() => files.push(path),
            Ok(_) => {}
            Err(e) => formatter.print_error(&format!("Error reading path: {}", e)),
        }
    }
    Ok(files)
}

/// Show file information
pub fn command_info(
    files: &[String],
    detailed: bool,
    options: &ReadOptions,
    formatter: &OutputFormatter,
) -> Result<()> {
    let stdout = io::stdout();
    let mut writer = stdout.lock();

    for file_path in files {
        let path = Path::new(file_path);
        let file_meta = match fs::metadata(path) {
            Ok(m) => m,
            Err(e) => {
                formatter.print_error(&format!("{}: {}", file_path, e));
                continue;
            }
        };
        let modified = file_meta
            .modified()
            .ok()
            .map(|t| DateTime::<Utc>::from(t).format("%Y-%m-%d %H:%M:%S UTC").to_string());

        let mut info = json!({
            "path": file_path,
            "size": file_meta.len(),
            "modified": modified,
        });

        match OpusMetadata::read_path(path, options) {
            Ok(metadata) => {
                info["format"] = json!("Ogg Opus");
                info["channels"] = json!(metadata.channels);
                info["sample_rate"] = json!(metadata.sample_rate);
                info["pre_skip"] = json!(metadata.pre_skip);
                info["output_gain_db"] = json!(metadata.output_gain_db);
                info["mapping_family"] = json!(metadata.mapping_family);
                if detailed {
                    info["vendor"] = json!(metadata.vendor);
                    info["comment_count"] = json!(metadata.comments.len());
                }
            }
            Err(e) => {
                info["format"] = json!("Unknown");
                info["error"] = json!(e.to_string());
            }
        }

        formatter.output_value(&info, &mut writer)?;
    }

    Ok(())
}
