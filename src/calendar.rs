//! Calendar normalization: program-start clamping and month-index arithmetic
//!
//! Durations in the engine are counted in calendar-month boundaries crossed,
//! not elapsed days. A purchase on the 31st and a target on the 1st of the
//! following month are one month apart.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, TimeZone};

use crate::error::{Result, ValuationError};

/// Calendar year in which the program officially started
pub const PROGRAM_START_YEAR: i32 = 2026;

/// First day of the program (2026-01-01)
pub fn program_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(PROGRAM_START_YEAR, 1, 1).unwrap_or(NaiveDate::MIN)
}

/// Anything that can be truncated to a calendar date.
///
/// Date-times are truncated in their own timezone.
pub trait CalendarDate {
    fn calendar_date(&self) -> NaiveDate;
}

impl CalendarDate for NaiveDate {
    fn calendar_date(&self) -> NaiveDate {
        *self
    }
}

impl CalendarDate for NaiveDateTime {
    fn calendar_date(&self) -> NaiveDate {
        self.date()
    }
}

impl<Tz: TimeZone> CalendarDate for DateTime<Tz> {
    fn calendar_date(&self) -> NaiveDate {
        self.date_naive()
    }
}

/// Clamp a date to the program start: `max(d, 2026-01-01)`
pub fn effective_date<D: CalendarDate>(date: &D) -> NaiveDate {
    clamp_to(date, program_start())
}

/// Clamp a date so it is never earlier than `floor`
pub fn clamp_to<D: CalendarDate>(date: &D, floor: NaiveDate) -> NaiveDate {
    date.calendar_date().max(floor)
}

/// Monotonic month index: `year * 12 + month`
pub fn month_index<D: CalendarDate>(date: &D) -> i64 {
    let d = date.calendar_date();
    i64::from(d.year()) * 12 + i64::from(d.month())
}

/// Month index of an explicit (year, month) pair
pub fn month_index_of(year: i32, month: u32) -> Result<i64> {
    if !(1..=12).contains(&month) {
        return Err(ValuationError::InvalidMonth(month));
    }
    Ok(i64::from(year) * 12 + i64::from(month))
}

/// Whole calendar months from `from` to `to` (negative when `to` is earlier)
pub fn months_between<A: CalendarDate, B: CalendarDate>(from: &A, to: &B) -> i64 {
    month_index(to) - month_index(from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveTime, Utc};

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_effective_date_clamps_to_program_start() {
        assert_eq!(effective_date(&ymd(2025, 12, 31)), ymd(2026, 1, 1));
        assert_eq!(effective_date(&ymd(1999, 6, 15)), ymd(2026, 1, 1));
        assert_eq!(effective_date(&ymd(2026, 1, 1)), ymd(2026, 1, 1));
        assert_eq!(effective_date(&ymd(2027, 3, 9)), ymd(2027, 3, 9));
    }

    #[test]
    fn test_effective_date_truncates_datetimes() {
        let naive = ymd(2026, 5, 20).and_time(NaiveTime::from_hms_opt(23, 59, 0).unwrap());
        assert_eq!(effective_date(&naive), ymd(2026, 5, 20));

        let utc = Utc.with_ymd_and_hms(2025, 12, 31, 18, 0, 0).unwrap();
        assert_eq!(effective_date(&utc), ymd(2026, 1, 1));
    }

    #[test]
    fn test_month_index_counts_boundaries_not_days() {
        assert_eq!(months_between(&ymd(2026, 1, 31), &ymd(2026, 2, 1)), 1);
        assert_eq!(months_between(&ymd(2026, 2, 1), &ymd(2026, 2, 28)), 0);
        assert_eq!(months_between(&ymd(2026, 11, 15), &ymd(2027, 1, 15)), 2);
        assert_eq!(months_between(&ymd(2027, 1, 15), &ymd(2026, 11, 15)), -2);
    }

    #[test]
    fn test_month_index_of_rejects_bad_months() {
        assert_eq!(month_index_of(2026, 1), Ok(2026 * 12 + 1));
        assert_eq!(month_index_of(2026, 0), Err(ValuationError::InvalidMonth(0)));
        assert_eq!(month_index_of(2026, 13), Err(ValuationError::InvalidMonth(13)));
    }
}
