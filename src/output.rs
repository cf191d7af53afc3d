//! Output formatting and persistence for charts and line summaries.
//!
//! Supports pretty-printing, JSON serialization, and CSV append.

use anyhow::Result;
use serde::Serialize;
use tracing::{debug, info};

use csv::WriterBuilder;
use std::fs::{self, OpenOptions};

/// Logs a value using Rust's debug pretty-print format.
pub fn print_pretty<T: std::fmt::Debug>(value: &T) {
    debug!("{:#?}", value);
}

/// Logs a value as pretty-printed JSON.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Writes a value as pretty-printed JSON to `path`, replacing any existing file.
pub fn write_json<T: Serialize>(path: &str, value: &T) -> Result<()> {
    let body = serde_json::to_vec_pretty(value)?;
    fs::write(path, body)?;
    debug!(path, "JSON written");
    Ok(())
}

/// Appends records as rows to a CSV file.
///
/// Writes headers first when the file is missing or empty.
pub fn append_records<T: Serialize>(path: &str, records: &[T]) -> Result<()> {
    let has_content = fs::metadata(path).map(|m| m.len() > 0).unwrap_or(false);
    debug!(path, has_content, rows = records.len(), "Appending CSV records");

    let file = OpenOptions::new().append(true).create(true).open(path)?;

    let mut writer = WriterBuilder::new()
        .has_headers(!has_content) // IMPORTANT when appending
        .from_writer(file);

    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;

    Ok(())
}
