//! Runtime configuration: where line data lives and which file each line uses.

use anyhow::{Context, Result};
use std::collections::HashMap;

use crate::lines::find_line;

/// Data directory used when `METRO_DATA_SOURCE` is unset.
pub const DEFAULT_DATA_SOURCE: &str = "data";

/// Settings read from the environment (after `.env` has been loaded).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Local directory or `http(s)://` base URL holding one CSV per line.
    pub data_source: String,
    /// Optional JSON file of line-name → file-stem overrides.
    pub line_files_path: Option<String>,
}

impl Settings {
    pub fn from_env() -> Self {
        Self {
            data_source: std::env::var("METRO_DATA_SOURCE")
                .unwrap_or_else(|_| DEFAULT_DATA_SOURCE.to_string()),
            line_files_path: std::env::var("LINE_FILES_PATH").ok(),
        }
    }
}

/// Maps line names to data-file stems, overriding the built-in directory.
///
/// Stored as a plain JSON object on disk:
/// ```json
/// {
///   "METRO 1": "final_M1_2024",
///   "TRAM 3a": "final_T3a"
/// }
/// ```
#[derive(Debug, Default)]
pub struct LineFileConfig {
    entries: HashMap<String, String>,
}

impl LineFileConfig {
    /// Loads the config from a JSON file at `path`.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read line file config '{path}'"))?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let entries: HashMap<String, String> =
            serde_json::from_str(content).context("line file config is not a JSON object")?;
        Ok(Self { entries })
    }

    /// Loads the overrides named by `settings`, or an empty config when none are set.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        match &settings.line_files_path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// File stem for `line`: the override if one is configured, else the built-in entry.
    pub fn file_stem(&self, line: &str) -> Option<String> {
        self.entries
            .get(line)
            .cloned()
            .or_else(|| find_line(line).map(|l| l.file_stem.to_string()))
    }

    /// Iterates over all `(line, file_stem)` overrides.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
