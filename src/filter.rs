//! Station vs intermediate-point selection.

use crate::record::Record;

/// Keeps only the records that are named stations, in their original order.
pub fn stations_only<'a, I>(records: I) -> Vec<&'a Record>
where
    I: IntoIterator<Item = &'a Record>,
{
    records.into_iter().filter(|r| r.is_station()).collect()
}

/// The active subset for a chart: every point, or only the stations.
pub fn active_points(records: &[Record], stations: bool) -> Vec<&Record> {
    if stations {
        stations_only(records)
    } else {
        records.iter().collect()
    }
}
