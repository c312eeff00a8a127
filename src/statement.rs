//! Member-facing statement of holdings and purchase certificates

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::error::Result;
use crate::members::{total_dividends, Dividend, Member, MemberHistory, UnitTransaction};
use crate::projection::ProjectionSeries;
use crate::valuation::{format_money, round_money, RoundingMode, ValuationEngine};

/// One transaction on a member statement
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatementLine {
    pub transaction_id: u64,
    pub purchased_at: NaiveDateTime,
    pub units: i64,

    /// Amount paid at the purchase-year entry price
    pub buy_value: f64,

    /// Value as of the evaluation date, rounded half-up to cents
    pub current_value: f64,

    /// Annual projection, rounded to cents
    pub projection: ProjectionSeries,
}

/// Everything a member sees on their dashboard
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemberStatement {
    pub member_id: u64,
    pub member_code: String,
    pub full_name: String,
    pub evaluation_date: NaiveDate,

    /// Newest purchase first
    pub lines: Vec<StatementLine>,

    /// Sum of the unrounded current values, rounded half-up
    pub overall_total_value: f64,

    pub dividends_paid: f64,
}

/// Build the dashboard statement of one member as of `evaluation_date`
pub fn member_statement(
    engine: &ValuationEngine,
    history: &MemberHistory,
    dividends: &[Dividend],
    evaluation_date: NaiveDate,
) -> Result<MemberStatement> {
    let mut transactions: Vec<&UnitTransaction> = history.transactions.iter().collect();
    transactions.sort_by(|a, b| b.purchased_at.cmp(&a.purchased_at));

    let mut lines = Vec::with_capacity(transactions.len());
    let mut overall = 0.0;

    for tx in transactions {
        let current = engine.current_value(tx.units, &tx.purchased_at, evaluation_date)?;
        overall += current;

        lines.push(StatementLine {
            transaction_id: tx.id,
            purchased_at: tx.purchased_at,
            units: tx.units,
            buy_value: engine.buy_value(tx.units, &tx.purchased_at)?,
            current_value: round_money(current, RoundingMode::HalfUp)?,
            projection: ProjectionSeries::for_purchase(engine, tx.units, &tx.purchased_at)?
                .rounded(RoundingMode::Float)?,
        });
    }

    let member = &history.member;
    Ok(MemberStatement {
        member_id: member.id,
        member_code: member.member_code.clone(),
        full_name: member.full_name.clone(),
        evaluation_date,
        lines,
        overall_total_value: round_money(overall, RoundingMode::HalfUp)?,
        dividends_paid: total_dividends(dividends, member.id),
    })
}

/// Purchase certificate for a single transaction
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Certificate {
    pub member_code: String,
    pub full_name: String,
    pub transaction_id: u64,
    pub units: i64,
    pub purchase_year: i32,
    pub base_price_at_purchase: f64,
    pub buy_value: f64,

    /// Buy value as printed, e.g. "1,080.00"
    pub buy_value_display: String,

    pub issued_on: NaiveDate,
}

pub fn certificate(
    engine: &ValuationEngine,
    member: &Member,
    transaction: &UnitTransaction,
    issued_on: NaiveDate,
) -> Result<Certificate> {
    let purchase_year = transaction.purchased_at.year();
    let buy_value = engine.buy_value(transaction.units, &transaction.purchased_at)?;

    Ok(Certificate {
        member_code: member.member_code.clone(),
        full_name: member.full_name.clone(),
        transaction_id: transaction.id,
        units: transaction.units,
        purchase_year,
        base_price_at_purchase: engine.entry_price(purchase_year)?,
        buy_value,
        buy_value_display: format_money(buy_value),
        issued_on,
    })
}
