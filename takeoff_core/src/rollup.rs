//! # Rollups
//!
//! Sums over stored derived fields. Stored values are strings that came from
//! a calculator or from an external snapshot, so anything that does not
//! parse counts as zero instead of failing the report.

use crate::calculations::parse_amount;
use crate::components::Component;
use crate::schedule::ScheduleRow;

/// Sum raw stored amounts, treating unparseable or empty values as zero
pub fn sum_stored<'a>(values: impl IntoIterator<Item = &'a str>) -> f64 {
    values
        .into_iter()
        .map(|v| parse_amount(v).unwrap_or(0.0))
        .sum()
}

/// Total volume (cubic feet) across records
pub fn total_volume<R: Component>(records: &[R]) -> f64 {
    sum_stored(records.iter().map(Component::volume))
}

/// Total cost across records; records without a cost contribute nothing
pub fn total_cost<R: Component>(records: &[R]) -> f64 {
    sum_stored(records.iter().map(Component::total_cost))
}

/// Total cost across schedule rows that carry a cost
pub fn schedule_total_cost(rows: &[ScheduleRow]) -> f64 {
    rows.iter().filter_map(|row| row.total_cost).sum()
}
