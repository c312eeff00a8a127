//! Monthly PV ledgers for members over a calendar year

mod aggregator;
mod selection;
mod types;

pub use aggregator::LedgerAggregator;
pub use selection::{available_years, clamp_selected_year};
pub use types::{CellContent, LedgerCell, MemberLedgerRow, YearLedger};
