// Output formatting for CLI

use std::io::Write;

use anyhow::Result;
use serde_json::Value;

use crate::cli::config::OutputFormat;

/// Format and output data
pub struct OutputFormatter {
    format: OutputFormat,
    quiet: bool,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat, quiet: bool) -> Self {
        Self { format, quiet }
    }

    /// Output one JSON document in the configured format
    pub fn output_value(&self, value: &Value, writer: &mut dyn Write) -> Result<()> {
        match self.format {
            OutputFormat::Pretty => {
                writeln!(writer, "{}", serde_json::to_string_pretty(value)?)?;
            }
            OutputFormat::Json => {
                writeln!(writer, "{}", serde_json::to_string(value)?)?;
            }
            OutputFormat::KeyValue => {
                for (key, value) in flatten(value) {
                    writeln!(writer, "{}: {}", key, value)?;
                }
                writeln!(writer)?;
            }
            OutputFormat::Table => {
                let rows = flatten(value);
                let width = rows.iter().map(|(k, _)| k.len()).max().unwrap_or(0) + 2;

                writeln!(writer, "{}", "=".repeat(width + 30))?;
                for (key, value) in rows {
                    writeln!(writer, "{:<width$}{}", format!("{}:", key), value, width = width)?;
                }
                writeln!(writer, "{}", "=".repeat(width + 30))?;
            }
        }
        Ok(())
    }

    /// Print success message
    pub fn print_success(&self, message: &str) {
        if !self.quiet {
            eprintln!("✓ {}", message);
        }
    }

    /// Print error message
    pub fn print_error(&self, message: &str) {
        eprintln!("✗ {}", message);
    }

    /// Print info message
    pub fn print_info(&self, message: &str) {
        if !self.quiet {
            eprintln!("  {}", message);
        }
    }
}

/// Flatten nested objects into dotted keys, in document order.
fn flatten(value: &Value) -> Vec<(String, String)> {
    let mut rows = Vec::new();
    flatten_into(None, value, &mut rows);
    rows
}

fn flatten_into(prefix: Option<&str>, value: &Value, rows: &mut Vec<(String, String)>) {
    match value {
        Value::Object(obj) => {
            for (key, value) in obj {
                let key = match prefix {
                    Some(prefix) => format!("{}.{}", prefix, key),
                    None => key.clone(),
                };
                flatten_into(Some(key.as_str()), value, rows);
            }
        }
        other => rows.push((prefix.unwrap_or("value").to_string(), format_value(other))),
    }
}

/// Format a JSON scalar for display
fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "(null)".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(arr) => format!("[{} items]", arr.len()),
        Value::Object(obj) => format!("{{{} items}}", obj.len()),
    }
}
