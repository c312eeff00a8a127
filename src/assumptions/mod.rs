//! Program growth assumptions: entry prices, tenure tiers and illustrative tables

mod entry_price;
mod tenure;
mod rate_table;

pub use entry_price::{entry_price, EntryPriceTable};
pub use tenure::{membership_year, MonthlyConversion, TenureGrowth};
pub use rate_table::{ListPriceSchedule, RateTableRow, StaticRateTable};

use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::{program_start, PROGRAM_START_YEAR};
use crate::error::ConfigError;

/// Every constant the valuation engine depends on.
///
/// Missing fields in a schedule file fall back to the program defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrowthSchedule {
    /// Dates earlier than this are treated as this date
    pub program_start: NaiveDate,

    /// Calendar year whose entry price is the base unit price
    pub base_year: i32,

    /// Price of one unit acquired in or before the base year
    pub base_unit_price: f64,

    /// Annual rate (percent) of the first tier
    pub start_rate_pct: f64,

    /// Increase of the annual rate (percent) per tier
    pub step_pct: f64,

    /// Highest annual rate (percent) any tier reaches
    pub cap_rate_pct: f64,

    /// Starting amount of the illustrative rate table
    pub illustration_base_amount: f64,

    /// Number of program years in the illustrative rate table
    pub illustration_years: u32,

    /// Number of annual steps in a projection series
    pub projection_steps: u32,
}

impl Default for GrowthSchedule {
    fn default() -> Self {
        Self {
            program_start: program_start(),
            base_year: PROGRAM_START_YEAR,
            base_unit_price: 100.0,
            start_rate_pct: 8.0,
            step_pct: 1.0,
            cap_rate_pct: 14.0,
            illustration_base_amount: 1000.0,
            illustration_years: 10,
            projection_steps: 10,
        }
    }
}

impl GrowthSchedule {
    /// Load a schedule override from a JSON file
    pub fn from_json_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path.as_ref())?;
        let schedule = Self::from_json_str(&text)?;
        log::debug!("loaded growth schedule from {}", path.as_ref().display());
        Ok(schedule)
    }

    /// Parse and validate a schedule from JSON text
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let schedule: GrowthSchedule = serde_json::from_str(text)?;
        schedule.validate()?;
        Ok(schedule)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.base_unit_price > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "base unit price must be positive, got {}",
                self.base_unit_price
            )));
        }
        if self.start_rate_pct < 0.0 || self.step_pct < 0.0 {
            return Err(ConfigError::Invalid(
                "rates and rate steps must not be negative".to_string(),
            ));
        }
        if self.cap_rate_pct < self.start_rate_pct {
            return Err(ConfigError::Invalid(format!(
                "rate cap {}% is below the starting rate {}%",
                self.cap_rate_pct, self.start_rate_pct
            )));
        }
        if self.illustration_years == 0 || self.projection_steps == 0 {
            return Err(ConfigError::Invalid(
                "illustration and projection horizons must be at least one year".to_string(),
            ));
        }
        Ok(())
    }

    /// Annual rate (percent) for a membership year: `min(cap, start + step*(tier-1))`
    pub fn tier_rate_pct(&self, membership_year: u32) -> f64 {
        let offset = f64::from(membership_year.saturating_sub(1));
        (self.start_rate_pct + self.step_pct * offset).min(self.cap_rate_pct)
    }

    /// Program-wide rate (percent) applied when moving from `year` to `year + 1`
    pub fn calendar_rate_pct(&self, year: i32) -> f64 {
        let offset = f64::from(year.saturating_sub(self.base_year).max(0));
        (self.start_rate_pct + self.step_pct * offset).min(self.cap_rate_pct)
    }

    /// Rate (percent) the illustrative table uses for a calendar year.
    ///
    /// The first two program years share the starting rate; the increase
    /// begins in the third.
    pub fn illustration_rate_pct(&self, year: i32) -> f64 {
        if year <= self.base_year + 1 {
            return self.start_rate_pct;
        }
        let offset = f64::from(year - self.base_year - 1);
        (self.start_rate_pct + self.step_pct * offset).min(self.cap_rate_pct)
    }
}
