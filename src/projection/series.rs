//! Annual value trajectory of a single transaction for charting

use chrono::Datelike;
use serde::Serialize;

use crate::assumptions::GrowthSchedule;
use crate::calendar::CalendarDate;
use crate::error::Result;
use crate::valuation::{round_money, RoundingMode, ValuationEngine};

/// One point of a projection series
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProjectionPoint {
    pub year: i32,
    pub value: f64,
}

/// Entry value followed by one point per projected year
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectionSeries {
    pub points: Vec<ProjectionPoint>,
}

impl ProjectionSeries {
    /// Project `entry_value` forward from `purchase_year`.
    ///
    /// Step `i` (1-indexed) applies the tier-`i` annual rate once, so this is
    /// an annual-only preview and does not match the monthly engine.
    pub fn from_entry_value(schedule: &GrowthSchedule, purchase_year: i32, entry_value: f64) -> Self {
        let mut running = entry_value;
        let mut points = Vec::with_capacity(schedule.projection_steps as usize + 1);
        points.push(ProjectionPoint { year: purchase_year, value: running });

        for step in 1..=schedule.projection_steps {
            running *= 1.0 + schedule.tier_rate_pct(step) / 100.0;
            points.push(ProjectionPoint {
                year: purchase_year + step as i32,
                value: running,
            });
        }

        Self { points }
    }

    /// Projection for `units` bought on `purchased`
    pub fn for_purchase<D: CalendarDate>(
        engine: &ValuationEngine,
        units: i64,
        purchased: &D,
    ) -> Result<Self> {
        let entry_value = engine.buy_value(units, purchased)?;
        let year = purchased.calendar_date().year();
        Ok(Self::from_entry_value(engine.schedule(), year, entry_value))
    }

    /// Year labels for the chart axis
    pub fn labels(&self) -> Vec<String> {
        self.points.iter().map(|p| p.year.to_string()).collect()
    }

    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }

    /// Copy with every value rounded by `mode`
    pub fn rounded(&self, mode: RoundingMode) -> Result<Self> {
        let points = self
            .points
            .iter()
            .map(|p| {
                Ok(ProjectionPoint {
                    year: p.year,
                    value: round_money(p.value, mode)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { points })
    }
}
