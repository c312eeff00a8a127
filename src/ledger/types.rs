//! Output structures of the monthly ledger

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::Result;
use crate::valuation::{format_money, round_money, RoundingMode};

/// What a ledger cell holds
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CellContent {
    /// The member had not joined yet
    NotApplicable,
    /// Member existed but no transaction had been acquired by this month
    NoData,
    /// Aggregate of every transaction acquired by this month
    Populated { units: u64, value: f64 },
}

/// One calendar month of a member's ledger row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LedgerCell {
    /// Calendar month (1-12)
    pub month: u32,
    pub content: CellContent,
    /// Month in which the member's tenure began
    pub is_join: bool,
    /// Same calendar month as the join month, in a later year
    pub is_anniversary: bool,
}

impl LedgerCell {
    pub(crate) fn not_applicable(month: u32) -> Self {
        Self {
            month,
            content: CellContent::NotApplicable,
            is_join: false,
            is_anniversary: false,
        }
    }

    pub fn units(&self) -> Option<u64> {
        match self.content {
            CellContent::Populated { units, .. } => Some(units),
            _ => None,
        }
    }

    pub fn value(&self) -> Option<f64> {
        match self.content {
            CellContent::Populated { value, .. } => Some(value),
            _ => None,
        }
    }

    /// Unit count as rendered in the table ("-" when empty)
    pub fn units_display(&self) -> String {
        self.units().map_or_else(|| "-".to_string(), |u| u.to_string())
    }

    /// Value as rendered in the table ("-" when empty)
    pub fn value_display(&self, mode: RoundingMode) -> Result<String> {
        match self.value() {
            Some(v) => Ok(format_money(round_money(v, mode)?)),
            None => Ok("-".to_string()),
        }
    }
}

/// A member's twelve monthly cells for one calendar year
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemberLedgerRow {
    pub member_id: u64,
    pub member_code: String,
    pub full_name: String,

    /// Join date after program-start clamping
    pub effective_join: NaiveDate,

    /// Units across all transactions, regardless of year
    pub lifetime_units: i64,

    /// January through December
    pub months: Vec<LedgerCell>,

    /// Units held in December of the selected year
    pub year_end_units: u64,

    /// Value in December of the selected year; `None` when no units are held
    pub year_end_value: Option<f64>,
}

/// Ledger rows of many members for one calendar year
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearLedger {
    pub year: i32,

    /// Entry price of a unit acquired in the selected year
    pub base_price_this_year: f64,

    pub rows: Vec<MemberLedgerRow>,
}

impl YearLedger {
    /// Sum of every member's year-end value
    pub fn total_year_end_value(&self) -> f64 {
        self.rows.iter().filter_map(|r| r.year_end_value).sum()
    }

    /// Sum of every member's year-end units
    pub fn total_year_end_units(&self) -> u64 {
        self.rows.iter().map(|r| r.year_end_units).sum()
    }
}
