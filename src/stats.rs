//! Line-wide statistics over a record sequence.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::catalog::{Category, Characteristic};
use crate::record::Record;

/// One row of a line summary: the average of one characteristic over one line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CharacteristicSummary {
    pub timestamp: DateTime<Utc>,
    pub line: String,
    pub characteristic: String,
    pub name: String,
    pub category: Category,
    pub unit: Option<&'static str>,
    /// Number of points with a usable value.
    pub values: usize,
    pub average: f64,
}

/// Computes the arithmetic mean of a slice of values. Returns 0.0 for empty input.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Numeric, non-NaN, non-sentinel values at `key`, in record order.
pub fn qualifying_values(records: &[Record], key: &str) -> Vec<f64> {
    records.iter().filter_map(|r| r.measurement(key)).collect()
}

/// Average of `key` across all records, ignoring missing values.
///
/// Returns 0.0 when nothing qualifies, including when no record carries `key`.
pub fn calculate_average(records: &[Record], key: &str) -> f64 {
    mean(&qualifying_values(records, key))
}

/// Summarizes every catalogued characteristic of a line, in catalog order.
pub fn summarize_line(
    line: &str,
    records: &[Record],
    catalog: &[Characteristic],
) -> Vec<CharacteristicSummary> {
    let timestamp = Utc::now();
    catalog
        .iter()
        .map(|c| {
            let values = qualifying_values(records, &c.key);
            CharacteristicSummary {
                timestamp,
                line: line.to_string(),
                characteristic: c.key.clone(),
                name: c.name.clone(),
                category: c.category,
                unit: c.unit,
                values: values.len(),
                average: mean(&values),
            }
        })
        .collect()
}

/// Percentile rank of `value` within `all_values`: the position of the first sorted value
/// that is `>= value`, as a percentage of the sample size.
///
/// A value above every sample ranks at 100; an empty sample ranks everything at 0.
pub fn normalize_to_percentile(value: f64, all_values: &[f64]) -> f64 {
    if all_values.is_empty() {
        return 0.0;
    }
    let mut sorted = all_values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let index = sorted
        .iter()
        .position(|v| *v >= value)
        .unwrap_or(sorted.len());
    (index as f64 / sorted.len() as f64) * 100.0
}
