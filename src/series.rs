//! Distance/value series and their smoothing.

use serde::Serialize;

use crate::record::Record;

/// Width of the centered moving average used for the trend line.
pub const SMOOTHING_WINDOW: usize = 5;

/// One plotted point: distance along the line, a value, and the station name if any.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub distance: f64,
    pub value: f64,
    pub station: Option<String>,
}

impl SeriesPoint {
    pub fn is_station(&self) -> bool {
        self.station.as_deref().is_some_and(|s| !s.trim().is_empty())
    }
}

/// Extracts the raw series for `key`, dropping points with a missing value or no
/// usable distance. Order follows the input.
pub fn series_points<'a, I>(records: I, key: &str) -> Vec<SeriesPoint>
where
    I: IntoIterator<Item = &'a Record>,
{
    records
        .into_iter()
        .filter_map(|r| {
            let value = r.measurement(key)?;
            let distance = r.distance()?;
            Some(SeriesPoint {
                distance,
                value,
                station: r.station_name.clone().filter(|_| r.is_station()),
            })
        })
        .collect()
}

/// Centered moving average over `window` points.
///
/// Windows are clipped at both ends of the series rather than padded, so the first and
/// last points average fewer values.
pub fn moving_average(points: &[SeriesPoint], window: usize) -> Vec<SeriesPoint> {
    let half = window / 2;
    let n = points.len();

    points
        .iter()
        .enumerate()
        .map(|(i, point)| {
            let start = i.saturating_sub(half);
            let end = (i + half + 1).min(n);
            let slice = &points[start..end];
            let avg = slice.iter().map(|p| p.value).sum::<f64>() / slice.len() as f64;

            SeriesPoint {
                distance: point.distance,
                value: avg,
                station: point.station.clone(),
            }
        })
        .collect()
}

/// Trend line with the standard window.
pub fn smooth(points: &[SeriesPoint]) -> Vec<SeriesPoint> {
    moving_average(points, SMOOTHING_WINDOW)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{FieldValue, MISSING_SENTINEL};

    fn points(values: &[f64]) -> Vec<SeriesPoint> {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| SeriesPoint {
                distance: i as f64 * 0.5,
                value: *v,
                station: None,
            })
            .collect()
    }

    #[test]
    fn test_smoothing_window_boundaries() {
        let input = points(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);
        let out = smooth(&input);

        assert_eq!(out.len(), 7);
        assert_eq!(out[0].value, 2.0);
        assert_eq!(out[1].value, 2.5);
        assert_eq!(out[3].value, 4.0);
        assert_eq!(out[5].value, 5.5);
        assert_eq!(out[6].value, 6.0);
    }

    #[test]
    fn test_smoothing_keeps_distance_and_name() {
        let mut input = points(&[1.0, 3.0]);
        input[1].station = Some("Louvre - Rivoli".into());
        let out = smooth(&input);

        assert_eq!(out[0].distance, 0.0);
        assert_eq!(out[1].distance, 0.5);
        assert_eq!(out[1].station.as_deref(), Some("Louvre - Rivoli"));
        assert_eq!(out[0].value, 2.0);
        assert_eq!(out[1].value, 2.0);
    }

    #[test]
    fn test_smoothing_short_and_empty_series() {
        assert!(smooth(&[]).is_empty());

        let single = smooth(&points(&[9.0]));
        assert_eq!(single[0].value, 9.0);
    }

    #[test]
    fn test_smoothing_is_deterministic() {
        let input = points(&[3.0, 8.0, 1.0, 6.0, 2.0, 9.0]);
        let first = smooth(&input);
        let second = smooth(&input);

        assert_eq!(first, second);
        assert_eq!(input, points(&[3.0, 8.0, 1.0, 6.0, 2.0, 9.0]));
    }

    #[test]
    fn test_window_of_one_is_identity() {
        let input = points(&[4.0, 1.0, 7.0]);
        assert_eq!(moving_average(&input, 1), input);
    }

    #[test]
    fn test_series_points_filters_missing_values() {
        let data = vec![
            Record::default()
                .with_distance(0.0)
                .with_station("Gare de Lyon")
                .with_value("noise", FieldValue::Number(60.0)),
            Record::default()
                .with_distance(0.2)
                .with_value("noise", FieldValue::Number(MISSING_SENTINEL)),
            Record::default()
                .with_distance(0.4)
                .with_station(" ")
                .with_value("noise", FieldValue::Number(58.0)),
            Record::default().with_value("noise", FieldValue::Number(61.0)),
            Record::default()
                .with_distance(0.8)
                .with_value("noise", FieldValue::Text("?".into())),
        ];

        let series = series_points(&data, "noise");
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].station.as_deref(), Some("Gare de Lyon"));
        assert!(series[0].is_station());
        assert_eq!(series[1].distance, 0.4);
        assert_eq!(series[1].station, None);
    }

    #[test]
    fn test_series_for_absent_key_is_empty() {
        let data = vec![Record::default().with_distance(0.0)];
        assert!(series_points(&data, "elevation").is_empty());
    }
}
