//! Fetching and parsing a line's CSV into an ordered record sequence.

use std::path::PathBuf;
use tracing::{debug, info};

use crate::config::LineFileConfig;
use crate::error::LoadError;
use crate::fetch::{HttpClient, fetch_bytes};
use crate::record::{FieldValue, Record};

/// Where line CSVs are read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    /// Base URL; `<base>/<stem>.csv` is fetched over HTTP.
    Remote(String),
    /// Directory holding `<stem>.csv` files.
    Local(PathBuf),
}

impl DataSource {
    pub fn parse(source: &str) -> Self {
        if source.starts_with("http://") || source.starts_with("https://") {
            DataSource::Remote(source.trim_end_matches('/').to_string())
        } else {
            DataSource::Local(PathBuf::from(source))
        }
    }

    /// Location of the CSV for `file_stem`.
    pub fn resource(&self, file_stem: &str) -> String {
        match self {
            DataSource::Remote(base) => format!("{base}/{file_stem}.csv"),
            DataSource::Local(dir) => dir.join(format!("{file_stem}.csv")).display().to_string(),
        }
    }
}

/// Resolves `line` to its data file and loads it.
pub async fn load_line<C: HttpClient>(
    client: &C,
    source: &DataSource,
    files: &LineFileConfig,
    line: &str,
) -> Result<Vec<Record>, LoadError> {
    let stem = files
        .file_stem(line)
        .ok_or_else(|| LoadError::UnknownLine(line.to_string()))?;
    load_line_data(client, source, &stem).await
}

/// Retrieves and parses `<source>/<file_stem>.csv`.
///
/// # Errors
///
/// [`LoadError::Unavailable`] when the resource cannot be read (transport failure,
/// non-success HTTP status, missing file); [`LoadError::Malformed`] when it has no header
/// or the reader fails mid-stream.
#[tracing::instrument(skip(client, source), fields(resource = tracing::field::Empty))]
pub async fn load_line_data<C: HttpClient>(
    client: &C,
    source: &DataSource,
    file_stem: &str,
) -> Result<Vec<Record>, LoadError> {
    let resource = source.resource(file_stem);
    tracing::Span::current().record("resource", resource.as_str());

    let bytes = match source {
        DataSource::Remote(_) => fetch_bytes(client, &resource).await.map_err(|e| {
            LoadError::Unavailable {
                resource: resource.clone(),
                message: format!("{e:#}"),
            }
        })?,
        DataSource::Local(_) => {
            tokio::fs::read(&resource)
                .await
                .map_err(|e| LoadError::Unavailable {
                    resource: resource.clone(),
                    message: e.to_string(),
                })?
        }
    };

    debug!(bytes = bytes.len(), "Line data received, parsing");
    let records = parse_records(&bytes)?;
    info!(rows = records.len(), "Line data loaded");
    Ok(records)
}

/// Parses header-prefixed CSV into records, one per data row, in source order.
///
/// Fields are typed by [`FieldValue::infer`]. Rows shorter or longer than the header are
/// kept (missing fields are absent, extra fields dropped) and invalid UTF-8 is replaced,
/// so no individual row is rejected.
pub fn parse_records(bytes: &[u8]) -> Result<Vec<Record>, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(bytes);

    let headers: Vec<String> = reader
        .byte_headers()
        .map_err(|e| LoadError::Malformed(e.to_string()))?
        .iter()
        .map(|h| {
            String::from_utf8_lossy(h)
                .trim_start_matches('\u{feff}')
                .to_string()
        })
        .collect();

    if headers.iter().all(|h| h.trim().is_empty()) {
        return Err(LoadError::Malformed("missing header row".to_string()));
    }

    let mut records = Vec::new();

    // Only reader I/O can fail here: the reader is flexible and fields are decoded lossily.
    for row in reader.byte_records() {
        let row = row.map_err(|e| LoadError::Malformed(e.to_string()))?;
        let fields = headers.iter().cloned().zip(
            row.iter()
                .map(|raw| FieldValue::infer(&String::from_utf8_lossy(raw))),
        );
        records.push(Record::from_fields(fields));
    }

    Ok(records)
}
