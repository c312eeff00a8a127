//! Error types for valuation, record loading, configuration and access checks

use thiserror::Error;

/// Errors raised by the valuation engine itself.
///
/// A target date that precedes the acquisition is not an error; point
/// valuations report it as `Ok(None)`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValuationError {
    #[error("negative unit count {0} cannot be valued")]
    NegativeUnits(i64),

    #[error("invalid calendar month {0} (expected 1-12)")]
    InvalidMonth(u32),

    #[error("calendar year {0} is out of range")]
    InvalidYear(i32),

    #[error("amount {0} is not a finite number")]
    NonFiniteAmount(f64),
}

pub type Result<T> = std::result::Result<T, ValuationError>;

/// Errors raised while reading member and transaction records
#[derive(Error, Debug)]
pub enum RecordError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("unparseable date '{0}'")]
    InvalidDate(String),

    #[error("transaction {transaction_id} references unknown member {member_id}")]
    UnknownMember { transaction_id: u64, member_id: u64 },
}

/// Errors raised while loading or validating a growth schedule
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read schedule file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse schedule file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid schedule: {0}")]
    Invalid(String),
}

/// Outcome of a failed login or lookup
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AccessError {
    #[error("no member with code '{0}'")]
    NotFound(String),

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("unexpected failure: {0}")]
    Unexpected(String),
}
