//! Member, transaction and dividend records supplied by the persistence layer

use std::collections::HashMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::RecordError;

/// Member code for the n-th member record, e.g. `M0007`
pub fn member_code_for(sequence: u64) -> String {
    format!("M{:04}", sequence)
}

/// A club member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    /// Storage identifier
    pub id: u64,

    /// Public member code (M0001, M0002, ...)
    pub member_code: String,

    pub full_name: String,

    /// Start of tenure before program-start clamping
    pub joined_at: NaiveDateTime,
}

impl Member {
    /// Create a member whose code is derived from its identifier
    pub fn new(id: u64, full_name: impl Into<String>, joined_at: NaiveDateTime) -> Self {
        Self {
            id,
            member_code: member_code_for(id),
            full_name: full_name.into(),
            joined_at,
        }
    }
}

/// A purchase of PV units. Never mutated by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitTransaction {
    pub id: u64,
    pub member_id: u64,

    /// Unit count; negative counts are rejected at valuation time
    pub units: i64,

    pub purchased_at: NaiveDateTime,
}

/// A dividend paid to a member. Pure data; only ever summed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dividend {
    pub id: u64,
    pub member_id: u64,
    pub amount: f64,
    #[serde(default)]
    pub note: String,
}

/// Sum of dividends paid to one member
pub fn total_dividends(dividends: &[Dividend], member_id: u64) -> f64 {
    dividends
        .iter()
        .filter(|d| d.member_id == member_id)
        .map(|d| d.amount)
        .sum()
}

/// A member together with all of its unit transactions
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemberHistory {
    pub member: Member,
    pub transactions: Vec<UnitTransaction>,
}

impl MemberHistory {
    pub fn new(member: Member, transactions: Vec<UnitTransaction>) -> Self {
        Self { member, transactions }
    }

    /// Units across every transaction, regardless of year
    pub fn lifetime_units(&self) -> i64 {
        self.transactions.iter().map(|t| t.units).sum()
    }
}

/// Attach transactions to their members, ordered by join date.
///
/// Fails on a transaction whose member is not in `members`.
pub fn group_histories(
    members: Vec<Member>,
    transactions: Vec<UnitTransaction>,
) -> Result<Vec<MemberHistory>, RecordError> {
    let mut by_member: HashMap<u64, Vec<UnitTransaction>> =
        members.iter().map(|m| (m.id, Vec::new())).collect();

    for tx in transactions {
        match by_member.get_mut(&tx.member_id) {
            Some(list) => list.push(tx),
            None => {
                return Err(RecordError::UnknownMember {
                    transaction_id: tx.id,
                    member_id: tx.member_id,
                })
            }
        }
    }

    let mut histories: Vec<MemberHistory> = members
        .into_iter()
        .map(|member| {
            let transactions = by_member.remove(&member.id).unwrap_or_default();
            MemberHistory::new(member, transactions)
        })
        .collect();
    histories.sort_by_key(|h| (h.member.joined_at, h.member.id));
    Ok(histories)
}
