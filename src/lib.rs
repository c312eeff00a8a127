//! PV System - valuation engine for club participation-value units
//!
//! This library provides:
//! - Calendar normalization to the program start and month-index arithmetic
//! - Entry prices by acquisition year and tenure-tiered monthly growth
//! - Point valuations at a target month or as of an evaluation date
//! - Monthly member ledgers over a calendar year, with join and anniversary markers
//! - Annual projection series and illustrative rate tables
//! - Member statements, certificates and CSV record loading

pub mod error;
pub mod calendar;
pub mod assumptions;
pub mod valuation;
pub mod ledger;
pub mod projection;
pub mod members;
pub mod statement;
pub mod access;

// Re-export commonly used types
pub use error::{AccessError, ConfigError, RecordError, ValuationError};
pub use calendar::{effective_date, month_index, CalendarDate};
pub use assumptions::{entry_price, EntryPriceTable, GrowthSchedule, StaticRateTable, TenureGrowth};
pub use valuation::{current_value, round_money, value_at, RoundingMode, ValuationEngine};
pub use ledger::{LedgerAggregator, LedgerCell, MemberLedgerRow, YearLedger};
pub use projection::ProjectionSeries;
pub use members::{Member, MemberHistory, UnitTransaction};
