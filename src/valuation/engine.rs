//! Point valuation of a single unit transaction

use chrono::{Datelike, NaiveDate};

use crate::assumptions::{EntryPriceTable, GrowthSchedule, ListPriceSchedule, TenureGrowth};
use crate::calendar::{clamp_to, month_index, month_index_of, months_between, CalendarDate};
use crate::error::{Result, ValuationError};
use crate::valuation::finite_amount;

/// Values unit transactions against a growth schedule.
///
/// Two growth paths exist for what is conceptually the same quantity and
/// they do not agree: [`value_at`](Self::value_at) compounds the true
/// monthly equivalent of each tier rate, while
/// [`current_value`](Self::current_value) compounds `annual / 12`. Both are
/// kept as separate operations.
#[derive(Debug, Clone)]
pub struct ValuationEngine {
    schedule: GrowthSchedule,
    prices: EntryPriceTable,
    list_prices: ListPriceSchedule,
    geometric: TenureGrowth,
    simple: TenureGrowth,
}

impl Default for ValuationEngine {
    fn default() -> Self {
        Self::new(GrowthSchedule::default())
    }
}

impl ValuationEngine {
    pub fn new(schedule: GrowthSchedule) -> Self {
        Self {
            prices: EntryPriceTable::new(schedule.clone()),
            list_prices: ListPriceSchedule::new(schedule.clone()),
            geometric: TenureGrowth::geometric(schedule.clone()),
            simple: TenureGrowth::simple(schedule.clone()),
            schedule,
        }
    }

    pub fn schedule(&self) -> &GrowthSchedule {
        &self.schedule
    }

    pub fn entry_prices(&self) -> &EntryPriceTable {
        &self.prices
    }

    /// Clamp a date to the program start of this engine's schedule
    pub fn effective_date<D: CalendarDate>(&self, date: &D) -> NaiveDate {
        clamp_to(date, self.schedule.program_start)
    }

    /// Price of one unit acquired in `year`
    pub fn entry_price(&self, year: i32) -> Result<f64> {
        self.prices.checked_price(year)
    }

    /// Amount paid for `units` acquired on `purchased`
    pub fn buy_value<D: CalendarDate>(&self, units: i64, purchased: &D) -> Result<f64> {
        let units = checked_units(units)?;
        self.entry_value(units, purchased.calendar_date().year())
    }

    fn entry_value(&self, units: u64, year: i32) -> Result<f64> {
        finite_amount(self.prices.entry_value(units, year))
    }

    /// Value of `units` bought on `purchased`, as of (`target_year`, `target_month`).
    ///
    /// Returns `Ok(None)` when the target month precedes the (clamped)
    /// purchase month. In the purchase month itself the entry value is
    /// returned with no growth.
    pub fn value_at<D: CalendarDate>(
        &self,
        units: i64,
        purchased: &D,
        target_year: i32,
        target_month: u32,
    ) -> Result<Option<f64>> {
        let units = checked_units(units)?;
        let purchased = self.effective_date(purchased);
        let elapsed = month_index_of(target_year, target_month)? - month_index(&purchased);

        if elapsed < 0 {
            return Ok(None);
        }

        let entry = self.entry_value(units, purchased.year())?;
        if elapsed == 0 {
            return Ok(Some(entry));
        }

        let elapsed = u32::try_from(elapsed).map_err(|_| ValuationError::InvalidYear(target_year))?;
        self.geometric.grow(entry, elapsed).map(Some)
    }

    /// Value of `units` bought on `purchased`, as of `evaluation_date`.
    ///
    /// Uses the simple `annual / 12` monthly slice. The purchase date is not
    /// clamped to the program start. A purchase dated after the evaluation
    /// date is worth its entry value.
    pub fn current_value<D: CalendarDate>(
        &self,
        units: i64,
        purchased: &D,
        evaluation_date: NaiveDate,
    ) -> Result<f64> {
        let units = checked_units(units)?;
        let purchased = purchased.calendar_date();
        let entry = self.entry_value(units, purchased.year())?;

        if purchased > evaluation_date {
            return Ok(entry);
        }

        let elapsed = months_between(&purchased, &evaluation_date);
        if elapsed <= 0 {
            return Ok(entry);
        }

        let elapsed = u32::try_from(elapsed)
            .map_err(|_| ValuationError::InvalidYear(evaluation_date.year()))?;
        self.simple.grow(entry, elapsed)
    }

    /// Value shown in the admin listing: units times the uncapped list
    /// price of the evaluation year
    pub fn list_value(&self, units: i64, evaluation_date: NaiveDate) -> Result<f64> {
        let units = checked_units(units)?;
        finite_amount(self.list_prices.value(units, evaluation_date.year()))
    }

    /// Uncapped list price of one unit in the evaluation year
    pub fn list_unit_price(&self, evaluation_date: NaiveDate) -> f64 {
        self.list_prices.unit_price(evaluation_date.year())
    }
}

/// Negative unit counts never produce a valuation
pub(crate) fn checked_units(units: i64) -> Result<u64> {
    u64::try_from(units).map_err(|_| {
        log::warn!("refusing to value negative unit count {}", units);
        ValuationError::NegativeUnits(units)
    })
}

/// [`ValuationEngine::value_at`] under the default schedule
pub fn value_at<D: CalendarDate>(
    units: i64,
    purchased: &D,
    target_year: i32,
    target_month: u32,
) -> Result<Option<f64>> {
    ValuationEngine::default().value_at(units, purchased, target_year, target_month)
}

/// [`ValuationEngine::current_value`] under the default schedule
pub fn current_value<D: CalendarDate>(
    units: i64,
    purchased: &D,
    evaluation_date: NaiveDate,
) -> Result<f64> {
    ValuationEngine::default().current_value(units, purchased, evaluation_date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveTime;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_join_month_has_no_growth() {
        let engine = ValuationEngine::default();
        assert_eq!(engine.value_at(10, &ymd(2026, 6, 1), 2026, 6).unwrap(), Some(1000.0));

        let price_2028 = engine.entry_price(2028).unwrap();
        let v = engine.value_at(3, &ymd(2028, 11, 30), 2028, 11).unwrap();
        assert_eq!(v, Some(3.0 * price_2028));
    }

    #[test]
    fn test_one_month_of_growth() {
        let v = value_at(10, &ymd(2026, 6, 1), 2026, 7).unwrap().unwrap();
        assert_relative_eq!(v, 1000.0 * 1.08f64.powf(1.0 / 12.0), epsilon = 1e-9);
        assert_eq!((v * 100.0).round() / 100.0, 1006.43);
    }

    #[test]
    fn test_target_before_purchase_is_undefined() {
        assert_eq!(value_at(10, &ymd(2026, 6, 1), 2026, 5).unwrap(), None);
        assert_eq!(value_at(10, &ymd(2027, 1, 1), 2026, 12).unwrap(), None);
    }

    #[test]
    fn test_purchase_before_program_start_is_clamped() {
        // A December 2025 purchase behaves like 2026-01-01
        let v = value_at(1, &ymd(2025, 12, 15), 2026, 1).unwrap();
        assert_eq!(v, Some(100.0));
        assert_eq!(value_at(1, &ymd(2025, 3, 1), 2025, 12).unwrap(), None);
    }

    #[test]
    fn test_value_at_is_monotonic() {
        let engine = ValuationEngine::default();
        let purchased = ymd(2027, 4, 18);
        let mut previous = 0.0;
        for index in 0..120 {
            let year = 2027 + (3 + index) / 12;
            let month = ((3 + index) % 12 + 1) as u32;
            let v = engine.value_at(5, &purchased, year, month).unwrap().unwrap();
            assert!(v >= previous);
            previous = v;
        }
        assert!(previous >= 5.0 * engine.entry_price(2027).unwrap());
    }

    #[test]
    fn test_full_tenure_year_compounds_annual_rate() {
        let v = value_at(1, &ymd(2026, 1, 1), 2027, 1).unwrap().unwrap();
        assert_relative_eq!(v, 108.0, epsilon = 1e-9);
    }

    #[test]
    fn test_accepts_datetimes() {
        let at = ymd(2026, 6, 1).and_time(NaiveTime::from_hms_opt(9, 30, 0).unwrap());
        assert_eq!(value_at(10, &at, 2026, 6).unwrap(), Some(1000.0));
    }

    #[test]
    fn test_invalid_inputs_are_errors() {
        assert_eq!(
            value_at(-1, &ymd(2026, 6, 1), 2026, 7),
            Err(ValuationError::NegativeUnits(-1))
        );
        assert_eq!(
            value_at(1, &ymd(2026, 6, 1), 2026, 13),
            Err(ValuationError::InvalidMonth(13))
        );
        assert_eq!(
            current_value(-5, &ymd(2026, 6, 1), ymd(2026, 9, 1)),
            Err(ValuationError::NegativeUnits(-5))
        );
    }

    #[test]
    fn test_current_value_future_purchase_has_no_growth() {
        let engine = ValuationEngine::default();
        let v = engine.current_value(4, &ymd(2028, 3, 1), ymd(2026, 10, 16)).unwrap();
        assert_eq!(v, 4.0 * engine.entry_price(2028).unwrap());
    }

    #[test]
    fn test_current_value_same_month_has_no_growth() {
        let v = current_value(10, &ymd(2026, 10, 1), ymd(2026, 10, 16)).unwrap();
        assert_eq!(v, 1000.0);
    }

    #[test]
    fn test_current_value_uses_simple_monthly_slice() {
        let v = current_value(10, &ymd(2026, 1, 10), ymd(2026, 4, 2)).unwrap();
        assert_relative_eq!(v, 1000.0 * (1.0 + 0.08 / 12.0f64).powi(3), epsilon = 1e-9);
    }

    #[test]
    fn test_two_growth_paths_diverge() {
        let purchased = ymd(2026, 1, 1);
        let geometric = value_at(10, &purchased, 2027, 1).unwrap().unwrap();
        let simple = current_value(10, &purchased, ymd(2027, 1, 1)).unwrap();
        assert_relative_eq!(geometric, 1080.0, epsilon = 1e-9);
        assert_relative_eq!(simple, 1000.0 * (1.0 + 0.08 / 12.0f64).powi(12), epsilon = 1e-9);
        assert!(simple > geometric);
    }

    #[test]
    fn test_current_value_does_not_clamp_purchase_date() {
        // Dec 2025 to Jan 2026 is one month of growth on the base price
        let v = current_value(1, &ymd(2025, 12, 20), ymd(2026, 1, 5)).unwrap();
        assert_relative_eq!(v, 100.0 * (1.0 + 0.08 / 12.0), epsilon = 1e-9);
    }

    #[test]
    fn test_buy_and_list_values() {
        let engine = ValuationEngine::default();
        assert_relative_eq!(engine.buy_value(10, &ymd(2027, 5, 5)).unwrap(), 1080.0, epsilon = 1e-9);
        assert_eq!(engine.list_value(2, ymd(2027, 5, 5)).unwrap(), 216.0);
        assert_eq!(engine.list_unit_price(ymd(2026, 5, 5)), 100.0);
    }

    #[test]
    fn test_current_value_is_monotonic() {
        let engine = ValuationEngine::default();
        let purchased = ymd(2026, 9, 12);
        let mut previous = 0.0;
        let mut today = ymd(2026, 1, 1);
        while today <= ymd(2036, 12, 31) {
            let v = engine.current_value(7, &purchased, today).unwrap();
            assert!(v >= previous, "value fell on {}", today);
            previous = v;
            today = today + chrono::Duration::days(11);
        }
        assert!(previous > 7.0 * engine.entry_price(2026).unwrap());
    }

    #[test]
    fn test_far_future_target_is_an_error() {
        let purchased = ymd(2026, 1, 1);
        assert!(matches!(
            value_at(1, &purchased, 20_000_000, 1),
            Err(ValuationError::NonFiniteAmount(_))
        ));
        assert!(matches!(
            current_value(1, &purchased, NaiveDate::MAX),
            Err(ValuationError::NonFiniteAmount(_))
        ));
        assert!(matches!(
            ValuationEngine::default().buy_value(1, &ymd(262_000, 1, 1)),
            Err(ValuationError::NonFiniteAmount(_))
        ));
        assert!(matches!(
            ValuationEngine::default().list_value(1, ymd(5000, 1, 1)),
            Err(ValuationError::NonFiniteAmount(_))
        ));
        // Large but representable horizons still value
        assert!(value_at(1, &purchased, 2200, 1).unwrap().unwrap().is_finite());
    }
}
