//! Error types surfaced by line loading.

/// Failure to produce a line's record sequence.
///
/// Distinct from an empty dataset: a line that loads with zero rows is `Ok(vec![])`.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum LoadError {
    #[error("no data file is configured for line {0:?}")]
    UnknownLine(String),
    #[error("could not retrieve {resource}: {message}")]
    Unavailable { resource: String, message: String },
    #[error("malformed CSV: {0}")]
    Malformed(String),
}
