//! Point valuation of unit transactions and money rounding

mod engine;
mod rounding;

pub use engine::{current_value, value_at, ValuationEngine};
pub use rounding::{format_money, round_money, RoundingMode};

pub(crate) use engine::checked_units;
pub(crate) use rounding::{finite_amount, round2};
