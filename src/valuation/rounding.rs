//! Money rounding applied at presentation boundaries

use std::fmt;
use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::{Result, ValuationError};

/// How a monetary amount is rounded to cents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RoundingMode {
    /// Leave the engine's floating-point value untouched
    #[default]
    Unrounded,
    /// Exact decimal expansion of the float, ties away from zero
    HalfUp,
    /// Plain floating-point rounding of `value * 100`
    Float,
}

impl FromStr for RoundingMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "unrounded" | "none" => Ok(RoundingMode::Unrounded),
            "half-up" => Ok(RoundingMode::HalfUp),
            "float" => Ok(RoundingMode::Float),
            other => Err(format!("unknown rounding mode '{}'", other)),
        }
    }
}

impl fmt::Display for RoundingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RoundingMode::Unrounded => "unrounded",
            RoundingMode::HalfUp => "half-up",
            RoundingMode::Float => "float",
        };
        f.write_str(name)
    }
}

/// Round a monetary amount to cents with the caller's chosen mode
pub fn round_money(value: f64, mode: RoundingMode) -> Result<f64> {
    let value = finite_amount(value)?;
    match mode {
        RoundingMode::Unrounded => Ok(value),
        RoundingMode::Float => Ok(round2(value)),
        RoundingMode::HalfUp => Decimal::from_f64_retain(value)
            .map(|d| d.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
            .and_then(|d| d.to_f64())
            .ok_or(ValuationError::NonFiniteAmount(value)),
    }
}

/// Overflowed or undefined amounts are errors, never results
pub(crate) fn finite_amount(value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ValuationError::NonFiniteAmount(value))
    }
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Render an amount as `1,234,567.89`
pub fn format_money(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && fixed.bytes().any(|b| b.is_ascii_digit() && b != b'0') {
        "-"
    } else {
        ""
    };
    format!("{}{}.{}", sign, grouped, cents)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_half_up_rounds_ties_away_from_zero() {
        assert_eq!(round_money(1000.125, RoundingMode::HalfUp).unwrap(), 1000.13);
        assert_eq!(round_money(-0.125, RoundingMode::HalfUp).unwrap(), -0.13);
        assert_eq!(round_money(1006.434, RoundingMode::HalfUp).unwrap(), 1006.43);
    }

    #[test]
    fn test_float_rounding() {
        assert_eq!(round_money(1006.4340, RoundingMode::Float).unwrap(), 1006.43);
        assert_eq!(round_money(117.72000000000001, RoundingMode::Float).unwrap(), 117.72);
    }

    #[test]
    fn test_unrounded_is_identity() {
        let v = 1006.4340776;
        assert_eq!(round_money(v, RoundingMode::Unrounded).unwrap(), v);
    }

    #[test]
    fn test_non_finite_amounts_rejected() {
        for mode in [RoundingMode::Unrounded, RoundingMode::HalfUp, RoundingMode::Float] {
            assert!(matches!(
                round_money(f64::NAN, mode),
                Err(ValuationError::NonFiniteAmount(_))
            ));
            assert!(round_money(f64::INFINITY, mode).is_err());
        }
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("half-up".parse::<RoundingMode>(), Ok(RoundingMode::HalfUp));
        assert_eq!("float".parse::<RoundingMode>(), Ok(RoundingMode::Float));
        assert_eq!("none".parse::<RoundingMode>(), Ok(RoundingMode::Unrounded));
        assert!("banker".parse::<RoundingMode>().is_err());
        assert_eq!(RoundingMode::HalfUp.to_string(), "half-up");
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(0.0), "0.00");
        assert_eq!(format_money(999.5), "999.50");
        assert_eq!(format_money(1000.0), "1,000.00");
        assert_eq!(format_money(1234567.891), "1,234,567.89");
        assert_eq!(format_money(-4321.0), "-4,321.00");
        assert_eq!(format_money(-0.001), "0.00");
    }
}
