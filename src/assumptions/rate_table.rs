//! Illustrative tables that share no state with the per-member engine

use serde::Serialize;

use super::GrowthSchedule;
use crate::valuation::round2;

/// One program year of the illustrative compounding table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RateTableRow {
    /// Program year (1-indexed)
    pub program_year: u32,
    pub calendar_year: i32,
    pub rate_pct: f64,
    pub start_amount: f64,
    pub interest: f64,
    pub end_amount: f64,
}

impl RateTableRow {
    /// Display label, e.g. "Year 3 (2028)"
    pub fn label(&self) -> String {
        format!("Year {} ({})", self.program_year, self.calendar_year)
    }
}

/// Member-independent table compounding a fixed amount over the program years
#[derive(Debug, Clone, Default)]
pub struct StaticRateTable {
    schedule: GrowthSchedule,
}

impl StaticRateTable {
    pub fn new(schedule: GrowthSchedule) -> Self {
        Self { schedule }
    }

    /// Rows for the configured base amount
    pub fn rows(&self) -> Vec<RateTableRow> {
        self.rows_for(self.schedule.illustration_base_amount)
    }

    /// Rows starting from an arbitrary amount
    pub fn rows_for(&self, base_amount: f64) -> Vec<RateTableRow> {
        let mut current = base_amount;
        (1..=self.schedule.illustration_years)
            .map(|program_year| {
                let calendar_year = self.schedule.base_year + program_year as i32 - 1;
                let rate_pct = self.schedule.illustration_rate_pct(calendar_year);
                let interest = current * rate_pct / 100.0;
                let row = RateTableRow {
                    program_year,
                    calendar_year,
                    rate_pct,
                    start_amount: current,
                    interest,
                    end_amount: current + interest,
                };
                current = row.end_amount;
                row
            })
            .collect()
    }
}

/// Uncapped calendar price list shown beside each transaction in the admin
/// listing.
///
/// Each year after the base year adds one more percent than the last with no
/// ceiling, so it drifts above the capped entry price from the eighth year on.
#[derive(Debug, Clone, Default)]
pub struct ListPriceSchedule {
    schedule: GrowthSchedule,
}

impl ListPriceSchedule {
    pub fn new(schedule: GrowthSchedule) -> Self {
        Self { schedule }
    }

    /// Listed price of one unit in `year`, rounded to cents
    pub fn unit_price(&self, year: i32) -> f64 {
        let mut value = self.schedule.base_unit_price;
        let years_after = year.saturating_sub(self.schedule.base_year).max(0);
        for i in 1..=years_after {
            if !value.is_finite() {
                break;
            }
            let rate = self.schedule.start_rate_pct + self.schedule.step_pct * f64::from(i - 1);
            value *= 1.0 + rate / 100.0;
        }
        round2(value)
    }

    /// Listed value of `units` in `year`, rounded to cents
    pub fn value(&self, units: u64, year: i32) -> f64 {
        round2(units as f64 * self.unit_price(year))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_static_table_rates() {
        let rows = StaticRateTable::default().rows();
        assert_eq!(rows.len(), 10);

        let rates: Vec<f64> = rows.iter().map(|r| r.rate_pct).collect();
        assert_eq!(rates, vec![8.0, 8.0, 9.0, 10.0, 11.0, 12.0, 13.0, 14.0, 14.0, 14.0]);
        assert_eq!(rows[0].calendar_year, 2026);
        assert_eq!(rows[9].calendar_year, 2035);
        assert_eq!(rows[2].label(), "Year 3 (2028)");
    }

    #[test]
    fn test_static_table_compounds() {
        let rows = StaticRateTable::default().rows_for(1000.0);
        assert_relative_eq!(rows[0].start_amount, 1000.0);
        assert_relative_eq!(rows[0].interest, 80.0, epsilon = 1e-9);
        assert_relative_eq!(rows[0].end_amount, 1080.0, epsilon = 1e-9);
        assert_relative_eq!(rows[1].end_amount, 1166.4, epsilon = 1e-9);
        assert_relative_eq!(rows[2].end_amount, 1166.4 * 1.09, epsilon = 1e-9);

        for pair in rows.windows(2) {
            assert_relative_eq!(pair[1].start_amount, pair[0].end_amount);
        }
    }

    #[test]
    fn test_list_price_is_uncapped() {
        let list = ListPriceSchedule::default();
        assert_eq!(list.unit_price(2025), 100.0);
        assert_eq!(list.unit_price(2026), 100.0);
        assert_eq!(list.unit_price(2027), 108.0);
        assert_eq!(list.unit_price(2028), 117.72);

        // 2034 -> 15% on top of the 2033 price, where the entry price stays at 14%
        let ratio = list.unit_price(2034) / list.unit_price(2033);
        assert!(ratio > 1.149 && ratio < 1.151, "ratio {}", ratio);
    }

    #[test]
    fn test_list_value() {
        let list = ListPriceSchedule::default();
        assert_eq!(list.value(3, 2028), 353.16);
        assert_eq!(list.value(0, 2030), 0.0);
    }
}
