//! Tenure-tiered monthly growth of a member's own units

use super::GrowthSchedule;
use crate::error::Result;
use crate::valuation::finite_amount;

/// Membership year (1-indexed) that elapsed month `m` falls into.
///
/// Months 1-12 are year 1, months 13-24 year 2, and so on. Month 0 (the
/// acquisition month) is reported as year 1.
pub fn membership_year(elapsed_month: u32) -> u32 {
    elapsed_month.saturating_sub(1) / 12 + 1
}

/// Method for converting an annual tier rate to a monthly rate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthlyConversion {
    /// Monthly equivalent: r_monthly = (1 + r_annual)^(1/12) - 1
    Geometric,
    /// Simple slice: r_monthly = r_annual / 12
    SimpleDivision,
}

/// Compounds a starting value month by month, switching tier rate as the
/// membership year advances
#[derive(Debug, Clone)]
pub struct TenureGrowth {
    schedule: GrowthSchedule,
    conversion: MonthlyConversion,
}

impl TenureGrowth {
    pub fn new(schedule: GrowthSchedule, conversion: MonthlyConversion) -> Self {
        Self { schedule, conversion }
    }

    /// Growth used for point-in-time valuations
    pub fn geometric(schedule: GrowthSchedule) -> Self {
        Self::new(schedule, MonthlyConversion::Geometric)
    }

    /// Growth used for "as of today" valuations
    pub fn simple(schedule: GrowthSchedule) -> Self {
        Self::new(schedule, MonthlyConversion::SimpleDivision)
    }

    pub fn conversion(&self) -> MonthlyConversion {
        self.conversion
    }

    /// Annual rate (percent) for a membership year
    pub fn annual_rate_pct(&self, membership_year: u32) -> f64 {
        self.schedule.tier_rate_pct(membership_year)
    }

    /// Monthly rate (decimal) applied during a given membership year
    pub fn monthly_rate(&self, membership_year: u32) -> f64 {
        let annual = self.annual_rate_pct(membership_year) / 100.0;
        match self.conversion {
            MonthlyConversion::Geometric => (1.0 + annual).powf(1.0 / 12.0) - 1.0,
            MonthlyConversion::SimpleDivision => annual / 12.0,
        }
    }

    /// Cumulative growth factor after `elapsed_months` whole months.
    ///
    /// Compounds one tier at a time. Once the rate stops changing (capped, or
    /// a zero step) the remaining months are compounded in a single power.
    /// Overflow yields infinity, which [`grow`](Self::grow) rejects.
    pub fn growth_factor(&self, elapsed_months: u32) -> f64 {
        let mut factor = 1.0_f64;
        let mut remaining = elapsed_months;
        let mut tier = 1u32;

        while remaining > 0 && factor.is_finite() {
            let monthly = 1.0 + self.monthly_rate(tier);
            if self.annual_rate_pct(tier.saturating_add(1)) == self.annual_rate_pct(tier) {
                return factor * monthly.powf(f64::from(remaining));
            }
            let months = remaining.min(12);
            factor *= monthly.powi(months as i32);
            remaining -= months;
            tier += 1;
        }
        factor
    }

    /// Grow `start_value` for `elapsed_months` whole months
    pub fn grow(&self, start_value: f64, elapsed_months: u32) -> Result<f64> {
        finite_amount(start_value * self.growth_factor(elapsed_months))
    }
}
