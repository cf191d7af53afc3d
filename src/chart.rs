//! Everything a renderer needs to draw one characteristic along one line.

use serde::Serialize;

use crate::catalog::{self, Characteristic, display_name};
use crate::filter::{active_points, stations_only};
use crate::lines::line_color;
use crate::record::Record;
use crate::series::{SeriesPoint, series_points, smooth};
use crate::stats::calculate_average;

/// A dashed vertical marker at a station's position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationMarker {
    pub distance: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub line: String,
    pub color: &'static str,
    pub characteristic: String,
    pub name: String,
    pub unit: Option<&'static str>,
    pub title: String,
    pub y_axis_title: String,
    pub stations_only: bool,
    /// Mean over every point of the line, regardless of `stations_only`.
    pub average: f64,
    pub raw: Vec<SeriesPoint>,
    pub smoothed: Vec<SeriesPoint>,
    /// All stations of the line, regardless of `stations_only`.
    pub stations: Vec<StationMarker>,
}

pub fn station_markers(records: &[Record]) -> Vec<StationMarker> {
    stations_only(records)
        .into_iter()
        .filter_map(|r| {
            Some(StationMarker {
                distance: r.distance()?,
                label: r.station_name.clone()?,
            })
        })
        .collect()
}

/// Assembles the chart for `key` on `line`.
///
/// A key missing from `catalog` is displayed under [`display_name`]; a key missing
/// from the data yields a zero average and empty series.
pub fn build_chart(
    line: &str,
    records: &[Record],
    catalog: &[Characteristic],
    key: &str,
    stations_only: bool,
) -> ChartData {
    let described = catalog::find(catalog, key);
    let name = described.map_or_else(|| display_name(key), |c| c.name.clone());
    let unit = described.and_then(|c| c.unit);

    let raw = series_points(active_points(records, stations_only), key);
    let smoothed = smooth(&raw);

    let y_axis_title = match unit {
        Some(unit) => format!("{name} ({unit})"),
        None => name.clone(),
    };

    ChartData {
        line: line.to_string(),
        color: line_color(line),
        characteristic: key.to_string(),
        title: format!("{} along {}", name, line.replace("METRO ", "line ")),
        y_axis_title,
        name,
        unit,
        stations_only,
        average: calculate_average(records, key),
        raw,
        smoothed,
        stations: station_markers(records),
    }
}
