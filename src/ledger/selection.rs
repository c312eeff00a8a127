//! Choice of the calendar year a ledger is built for

use chrono::{Datelike, NaiveDate};

/// Year to build the ledger for.
///
/// Defaults to the evaluation date's year, never goes below the base year
/// and never past the last representable calendar year.
pub fn clamp_selected_year(requested: Option<i32>, today: NaiveDate, base_year: i32) -> i32 {
    requested
        .unwrap_or_else(|| today.year())
        .min(NaiveDate::MAX.year())
        .max(base_year)
}

/// Years offered for selection: the base year through four years past the
/// selected year
pub fn available_years(selected: i32, base_year: i32) -> Vec<i32> {
    (base_year..selected.saturating_add(5)).collect()
}
