//! The shape of one observation along a line.

use serde::Serialize;
use std::collections::HashMap;

/// Reserved value meaning "not available" for any numeric characteristic.
pub const MISSING_SENTINEL: f64 = -9999.0;

/// A single auto-typed CSV field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Text(String),
    Null,
}

impl FieldValue {
    /// Types a raw CSV field: numeric-looking text becomes a number, empty becomes null.
    pub fn infer(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return FieldValue::Null;
        }
        if looks_numeric(trimmed) {
            if let Ok(n) = trimmed.parse::<f64>() {
                if n.is_finite() {
                    return FieldValue::Number(n);
                }
            }
        }
        FieldValue::Text(raw.to_string())
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Text form of the field; numbers are rendered back to text.
    pub fn to_text(&self) -> Option<String> {
        match self {
            FieldValue::Number(n) => Some(n.to_string()),
            FieldValue::Text(s) => Some(s.clone()),
            FieldValue::Null => None,
        }
    }

    fn as_integer(&self) -> Option<i64> {
        match self {
            FieldValue::Number(n) if n.fract() == 0.0 => Some(*n as i64),
            _ => None,
        }
    }
}

// Rejects spellings f64::from_str accepts but a CSV author wouldn't mean as numbers
// ("inf", "NaN", "infinity").
fn looks_numeric(s: &str) -> bool {
    s.chars().any(|c| c.is_ascii_digit())
        && s
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E'))
}

/// One point along a line: either a named station or an unnamed intermediate point.
///
/// Fixed columns are optional so a row with an unparseable fixed field is still kept.
/// Every other column lands in `characteristics`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    pub id: Option<i64>,
    pub line: Option<String>,
    pub branch: Option<i64>,
    pub station_name: Option<String>,
    pub longitude: Option<f64>,
    pub latitude: Option<f64>,
    pub rank_station: Option<i64>,
    pub rank_intermediate: Option<i64>,
    pub cumul_distance: Option<f64>,
    pub distance_origin: Option<f64>,
    pub index: Option<i64>,
    pub network: Option<String>,
    pub mode: Option<String>,
    pub characteristics: HashMap<String, FieldValue>,
}

impl Record {
    /// Builds a record from `(column, value)` pairs in header order.
    pub fn from_fields<I>(fields: I) -> Self
    where
        I: IntoIterator<Item = (String, FieldValue)>,
    {
        let mut r = Record::default();
        for (name, value) in fields {
            match name.as_str() {
                "ID_int" => r.id = value.as_integer(),
                "line" => r.line = value.to_text(),
                "branch" => r.branch = value.as_integer(),
                "name_station" => r.station_name = value.to_text(),
                "longitude_int" => r.longitude = value.as_number(),
                "latitude_int" => r.latitude = value.as_number(),
                "rank_station" => r.rank_station = value.as_integer(),
                "rank_intermediate" => r.rank_intermediate = value.as_integer(),
                "cumul_distance" => r.cumul_distance = value.as_number(),
                "distance_origin" => r.distance_origin = value.as_number(),
                "index" => r.index = value.as_integer(),
                "network" => r.network = value.to_text(),
                "mode" => r.mode = value.to_text(),
                _ => {
                    r.characteristics.insert(name, value);
                }
            }
        }
        r
    }

    /// A record is a station when its name is present and non-blank after trimming.
    pub fn is_station(&self) -> bool {
        self.station_name
            .as_deref()
            .is_some_and(|name| !name.trim().is_empty())
    }

    /// Distance along the line used for plotting.
    pub fn distance(&self) -> Option<f64> {
        self.distance_origin.or(self.cumul_distance)
    }

    pub fn value(&self, key: &str) -> Option<&FieldValue> {
        self.characteristics.get(key)
    }

    /// Numeric value at `key`, or `None` when absent, textual, NaN or the missing sentinel.
    pub fn measurement(&self, key: &str) -> Option<f64> {
        self.value(key)
            .and_then(FieldValue::as_number)
            .filter(|v| !v.is_nan() && *v != MISSING_SENTINEL)
    }

    pub fn with_station(mut self, name: &str) -> Self {
        self.station_name = Some(name.to_string());
        self
    }

    pub fn with_distance(mut self, distance: f64) -> Self {
        self.distance_origin = Some(distance);
        self
    }

    pub fn with_value(mut self, key: &str, value: FieldValue) -> Self {
        self.characteristics.insert(key.to_string(), value);
        self
    }
}
