//! Entry price per unit by calendar year of acquisition

use super::GrowthSchedule;
use crate::error::Result;
use crate::valuation::{finite_amount, round2};

/// Program-wide price of one unit, rising every calendar year
/// independently of any member's tenure
#[derive(Debug, Clone, Default)]
pub struct EntryPriceTable {
    schedule: GrowthSchedule,
}

impl EntryPriceTable {
    pub fn new(schedule: GrowthSchedule) -> Self {
        Self { schedule }
    }

    /// Price of one unit acquired in `year`.
    ///
    /// Years up to the base year pay the base price. Later years compound
    /// the calendar rate of every year from the base year up to, but not
    /// including, `year`. Once the calendar rate stops changing, the
    /// remaining years are compounded in a single power, so far-future
    /// years overflow to infinity instead of looping.
    pub fn price(&self, year: i32) -> f64 {
        let schedule = &self.schedule;
        let mut price = schedule.base_unit_price;
        let mut y = schedule.base_year;

        while y < year && price.is_finite() {
            let growth = 1.0 + schedule.calendar_rate_pct(y) / 100.0;
            if schedule.calendar_rate_pct(y + 1) == schedule.calendar_rate_pct(y) {
                let years = (i64::from(year) - i64::from(y)) as f64;
                return price * growth.powf(years);
            }
            price *= growth;
            y += 1;
        }
        price
    }

    /// [`price`](Self::price), rejecting prices that overflowed
    pub fn checked_price(&self, year: i32) -> Result<f64> {
        finite_amount(self.price(year))
    }

    /// Per-unit rate quoted on the purchase form, rounded to cents
    pub fn purchase_quote(&self, year: i32) -> f64 {
        round2(self.price(year))
    }

    /// Value paid for `units` acquired in `year`
    pub fn entry_value(&self, units: u64, year: i32) -> f64 {
        units as f64 * self.price(year)
    }
}

/// Entry price under the program's default schedule
pub fn entry_price(year: i32) -> f64 {
    EntryPriceTable::default().price(year)
}
