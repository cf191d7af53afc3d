//! Line/characteristic selection with last-selection-wins loading.
//!
//! Selecting a line hands out a [`LoadTicket`]; a finished load is only applied when its
//! ticket still matches the latest selection, so a slow response for a line the user has
//! already moved away from never overwrites fresher data.

use crate::catalog::{Characteristic, build_catalog};
use crate::chart::{ChartData, build_chart};
use crate::error::LoadError;
use crate::record::Record;
use crate::stats::calculate_average;

/// Identifies one requested load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    pub line: String,
    generation: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoadedLine {
    pub line: String,
    pub records: Vec<Record>,
    pub catalog: Vec<Characteristic>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum LineState {
    #[default]
    Idle,
    Loading { line: String },
    Failed { line: String, error: LoadError },
    Loaded(LoadedLine),
}

#[derive(Debug, Default)]
pub struct Explorer {
    generation: u64,
    state: LineState,
    characteristic: Option<String>,
    stations_only: bool,
}

impl Explorer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &LineState {
        &self.state
    }

    /// Starts a load for `line`, superseding any load still in flight.
    pub fn select_line(&mut self, line: &str) -> LoadTicket {
        self.generation += 1;
        self.state = LineState::Loading {
            line: line.to_string(),
        };
        LoadTicket {
            line: line.to_string(),
            generation: self.generation,
        }
    }

    /// Applies a finished load. Returns `false`, leaving state untouched, when `ticket`
    /// has been superseded by a later [`Explorer::select_line`].
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<Vec<Record>, LoadError>,
    ) -> bool {
        if ticket.generation != self.generation {
            return false;
        }

        self.state = match result {
            Ok(records) => {
                let catalog = records.first().map(build_catalog).unwrap_or_default();
                if self.characteristic.is_none() {
                    self.characteristic = catalog.first().map(|c| c.key.clone());
                }
                LineState::Loaded(LoadedLine {
                    line: ticket.line,
                    records,
                    catalog,
                })
            }
            Err(error) => LineState::Failed {
                line: ticket.line,
                error,
            },
        };
        true
    }

    pub fn select_characteristic(&mut self, key: &str) {
        self.characteristic = Some(key.to_string());
    }

    pub fn characteristic(&self) -> Option<&str> {
        self.characteristic.as_deref()
    }

    pub fn set_stations_only(&mut self, stations_only: bool) {
        self.stations_only = stations_only;
    }

    pub fn loaded(&self) -> Option<&LoadedLine> {
        match &self.state {
            LineState::Loaded(loaded) => Some(loaded),
            _ => None,
        }
    }

    /// Average of the selected characteristic over the loaded line.
    pub fn average(&self) -> Option<f64> {
        let loaded = self.loaded()?;
        let key = self.characteristic.as_deref()?;
        Some(calculate_average(&loaded.records, key))
    }

    /// Chart for the current selection; `None` while nothing is loaded, the line is
    /// empty, or no characteristic is selected.
    pub fn chart(&self) -> Option<ChartData> {
        let loaded = self.loaded()?;
        if loaded.records.is_empty() {
            return None;
        }
        let key = self.characteristic.as_deref()?;
        Some(build_chart(
            &loaded.line,
            &loaded.records,
            &loaded.catalog,
            key,
            self.stations_only,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::FieldValue;

    fn records(elevation: f64) -> Vec<Record> {
        vec![
            Record::default()
                .with_station("Nation")
                .with_distance(0.0)
                .with_value("elevation", FieldValue::Number(elevation))
                .with_value("poi_cafe", FieldValue::Number(3.0)),
            Record::default()
                .with_distance(0.4)
                .with_value("elevation", FieldValue::Number(elevation + 2.0))
                .with_value("poi_cafe", FieldValue::Number(5.0)),
        ]
    }

    #[test]
    fn test_load_selects_first_characteristic() {
        let mut explorer = Explorer::new();
        let ticket = explorer.select_line("METRO 2");
        assert!(matches!(explorer.state(), LineState::Loading { .. }));

        assert!(explorer.finish_load(ticket, Ok(records(30.0))));
        assert_eq!(explorer.characteristic(), Some("poi_cafe"));
        assert_eq!(explorer.average(), Some(4.0));

        let chart = explorer.chart().unwrap();
        assert_eq!(chart.line, "METRO 2");
        assert_eq!(chart.raw.len(), 2);
    }

    #[test]
    fn test_stale_load_is_ignored() {
        let mut explorer = Explorer::new();
        let slow = explorer.select_line("METRO 1");
        let fast = explorer.select_line("METRO 6");

        assert!(explorer.finish_load(fast, Ok(records(50.0))));
        assert!(!explorer.finish_load(slow, Ok(records(10.0))));

        let loaded = explorer.loaded().unwrap();
        assert_eq!(loaded.line, "METRO 6");
        explorer.select_characteristic("elevation");
        assert_eq!(explorer.average(), Some(51.0));
    }

    #[test]
    fn test_stale_failure_is_ignored() {
        let mut explorer = Explorer::new();
        let old = explorer.select_line("RER C");
        let current = explorer.select_line("RER D");

        assert!(!explorer.finish_load(old, Err(LoadError::Malformed("bad".into()))));
        assert!(matches!(explorer.state(), LineState::Loading { line } if line == "RER D"));
        assert!(explorer.finish_load(current, Ok(vec![])));
    }

    #[test]
    fn test_failed_and_empty_are_distinct() {
        let mut explorer = Explorer::new();
        let ticket = explorer.select_line("RER E");
        let error = LoadError::Unavailable {
            resource: "data/final_RE.csv".into(),
            message: "not found".into(),
        };
        explorer.finish_load(ticket, Err(error));
        assert!(matches!(explorer.state(), LineState::Failed { .. }));
        assert!(explorer.chart().is_none());

        let ticket = explorer.select_line("RER E");
        explorer.finish_load(ticket, Ok(vec![]));
        let loaded = explorer.loaded().unwrap();
        assert!(loaded.records.is_empty());
        assert!(loaded.catalog.is_empty());
        assert!(explorer.chart().is_none());
    }

    #[test]
    fn test_selected_characteristic_survives_line_switch() {
        let mut explorer = Explorer::new();
        explorer.select_characteristic("elevation");
        explorer.set_stations_only(true);

        let ticket = explorer.select_line("METRO 11");
        explorer.finish_load(ticket, Ok(records(20.0)));

        assert_eq!(explorer.characteristic(), Some("elevation"));
        let chart = explorer.chart().unwrap();
        assert!(chart.stations_only);
        assert_eq!(chart.raw.len(), 1);
        assert_eq!(chart.average, 21.0);
    }
}
