//! Load members and unit transactions from CSV exports

use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use csv::Reader;

use super::{member_code_for, Dividend, Member, UnitTransaction};
use crate::error::RecordError;

/// Raw CSV row of a members export
#[derive(Debug, serde::Deserialize)]
struct MemberRow {
    id: u64,
    #[serde(default)]
    member_code: String,
    full_name: String,
    join_date: String,
}

impl MemberRow {
    fn to_member(self) -> Result<Member, RecordError> {
        let member_code = if self.member_code.trim().is_empty() {
            member_code_for(self.id)
        } else {
            self.member_code.trim().to_string()
        };

        Ok(Member {
            id: self.id,
            member_code,
            full_name: self.full_name,
            joined_at: parse_timestamp(&self.join_date)?,
        })
    }
}

/// Raw CSV row of a transactions export
#[derive(Debug, serde::Deserialize)]
struct TransactionRow {
    id: u64,
    member_id: u64,
    pv_units: i64,
    purchase_date: String,
}

impl TransactionRow {
    fn to_transaction(self) -> Result<UnitTransaction, RecordError> {
        Ok(UnitTransaction {
            id: self.id,
            member_id: self.member_id,
            units: self.pv_units,
            purchased_at: parse_timestamp(&self.purchase_date)?,
        })
    }
}

/// Parse `YYYY-MM-DD`, `YYYY-MM-DD HH:MM:SS` or `YYYY-MM-DDTHH:MM:SS`.
/// Date-only values are taken at midnight.
pub fn parse_timestamp(text: &str) -> Result<NaiveDateTime, RecordError> {
    let text = text.trim();
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(ts) = NaiveDateTime::parse_from_str(text, format) {
            return Ok(ts);
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(|| RecordError::InvalidDate(text.to_string()))
}

/// Load all members from a CSV file
pub fn load_members<P: AsRef<Path>>(path: P) -> Result<Vec<Member>, RecordError> {
    let reader = Reader::from_path(path)?;
    read_members(reader)
}

/// Load members from any reader (e.g., string buffer)
pub fn load_members_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<Member>, RecordError> {
    read_members(Reader::from_reader(reader))
}

fn read_members<R: std::io::Read>(mut reader: Reader<R>) -> Result<Vec<Member>, RecordError> {
    let mut members = Vec::new();
    for result in reader.deserialize() {
        let row: MemberRow = result?;
        members.push(row.to_member()?);
    }
    log::debug!("loaded {} members", members.len());
    Ok(members)
}

/// Load all unit transactions from a CSV file
pub fn load_transactions<P: AsRef<Path>>(path: P) -> Result<Vec<UnitTransaction>, RecordError> {
    let reader = Reader::from_path(path)?;
    read_transactions(reader)
}

/// Load unit transactions from any reader
pub fn load_transactions_from_reader<R: std::io::Read>(
    reader: R,
) -> Result<Vec<UnitTransaction>, RecordError> {
    read_transactions(Reader::from_reader(reader))
}

fn read_transactions<R: std::io::Read>(
    mut reader: Reader<R>,
) -> Result<Vec<UnitTransaction>, RecordError> {
    let mut transactions = Vec::new();
    for result in reader.deserialize() {
        let row: TransactionRow = result?;
        transactions.push(row.to_transaction()?);
    }
    log::debug!("loaded {} unit transactions", transactions.len());
    Ok(transactions)
}

/// Load dividend payouts from a CSV file (`id,member_id,amount[,note]`)
pub fn load_dividends<P: AsRef<Path>>(path: P) -> Result<Vec<Dividend>, RecordError> {
    let reader = Reader::from_path(path)?;
    read_dividends(reader)
}

/// Load dividend payouts from any reader
pub fn load_dividends_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<Dividend>, RecordError> {
    read_dividends(Reader::from_reader(reader))
}

fn read_dividends<R: std::io::Read>(mut reader: Reader<R>) -> Result<Vec<Dividend>, RecordError> {
    let dividends = reader.deserialize().collect::<Result<Vec<Dividend>, _>>()?;
    log::debug!("loaded {} dividends", dividends.len());
    Ok(dividends)
}
