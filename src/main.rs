//! PV System CLI
//!
//! Command-line front end for valuations, ledgers, projections and statements

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::json;

use pv_system::assumptions::{GrowthSchedule, StaticRateTable};
use pv_system::ledger::{available_years, clamp_selected_year, LedgerAggregator};
use pv_system::access::{MemberLogin, PASSWORD_LENGTH};
use pv_system::members::{
    group_histories, load_dividends, load_members, load_transactions, parse_timestamp,
};
use pv_system::projection::ProjectionSeries;
use pv_system::statement::member_statement;
use pv_system::valuation::{round_money, RoundingMode, ValuationEngine};

#[derive(Debug, Parser)]
#[command(name = "pv", version, about = "Participation-value valuation engine")]
struct Cli {
    /// JSON file overriding the default growth schedule
    #[arg(long, global = true)]
    schedule: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Entry price of one unit acquired in a year
    EntryPrice {
        #[arg(long)]
        year: i32,
    },

    /// Value of a purchase at a target (year, month)
    Value {
        #[arg(long, allow_hyphen_values = true)]
        units: i64,
        /// Purchase date (YYYY-MM-DD or date-time)
        #[arg(long)]
        purchased: String,
        #[arg(long)]
        year: i32,
        #[arg(long)]
        month: u32,
        #[arg(long, default_value = "float")]
        rounding: RoundingMode,
    },

    /// Value of a purchase as of an evaluation date
    Current {
        #[arg(long, allow_hyphen_values = true)]
        units: i64,
        #[arg(long)]
        purchased: String,
        /// Evaluation date (defaults to today)
        #[arg(long)]
        today: Option<String>,
        #[arg(long, default_value = "half-up")]
        rounding: RoundingMode,
    },

    /// Monthly ledger of every member for a calendar year
    Ledger {
        #[arg(long)]
        members: PathBuf,
        #[arg(long)]
        transactions: PathBuf,
        #[arg(long)]
        year: Option<i32>,
        #[arg(long)]
        today: Option<String>,
    },

    /// Ten-year annual projection of a purchase
    Projection {
        #[arg(long, allow_hyphen_values = true)]
        units: i64,
        #[arg(long)]
        purchased: String,
    },

    /// Illustrative compounding table
    RateTable {
        #[arg(long)]
        base: Option<f64>,
    },

    /// Dashboard statement of one member
    Statement {
        /// Member code, e.g. M0001
        #[arg(long)]
        member: String,
        #[arg(long)]
        members: PathBuf,
        #[arg(long)]
        transactions: PathBuf,
        /// Dividend payouts CSV
        #[arg(long)]
        dividends: Option<PathBuf>,
        #[arg(long)]
        today: Option<String>,
    },

    /// Issue logins with generated passwords for members
    Logins {
        #[arg(long)]
        members: PathBuf,
        #[arg(long, default_value_t = PASSWORD_LENGTH)]
        length: usize,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let schedule = match &cli.schedule {
        Some(path) => GrowthSchedule::from_json_path(path)
            .with_context(|| format!("loading schedule {}", path.display()))?,
        None => GrowthSchedule::default(),
    };
    let engine = ValuationEngine::new(schedule);

    match cli.command {
        Command::EntryPrice { year } => {
            let price = engine.entry_price(year)?;
            print_json(&json!({
                "year": year,
                "entry_price": price,
                "purchase_quote": engine.entry_prices().purchase_quote(year),
            }))
        }

        Command::Value { units, purchased, year, month, rounding } => {
            let purchased = parse_timestamp(&purchased)?;
            let value = engine
                .value_at(units, &purchased, year, month)?
                .map(|v| round_money(v, rounding))
                .transpose()?;
            print_json(&json!({
                "units": units,
                "purchased": purchased.date(),
                "year": year,
                "month": month,
                "rounding": rounding.to_string(),
                "value": value,
            }))
        }

        Command::Current { units, purchased, today, rounding } => {
            let purchased = parse_timestamp(&purchased)?;
            let today = evaluation_date(today.as_deref())?;
            let value = engine.current_value(units, &purchased, today)?;
            print_json(&json!({
                "units": units,
                "purchased": purchased.date(),
                "evaluation_date": today,
                "buy_value": engine.buy_value(units, &purchased)?,
                "current_value": round_money(value, rounding)?,
            }))
        }

        Command::Ledger { members, transactions, year, today } => {
            let today = evaluation_date(today.as_deref())?;
            let year = clamp_selected_year(year, today, engine.schedule().base_year);
            let members = load_members(&members)
                .with_context(|| format!("loading members from {}", members.display()))?;
            let transactions = load_transactions(&transactions)
                .with_context(|| format!("loading transactions from {}", transactions.display()))?;
            let histories = group_histories(members, transactions)?;

            let base_year = engine.schedule().base_year;
            let ledger = LedgerAggregator::new(engine).year_ledger(&histories, year)?;
            print_json(&json!({
                "available_years": available_years(year, base_year),
                "ledger": ledger,
            }))
        }

        Command::Projection { units, purchased } => {
            let purchased = parse_timestamp(&purchased)?;
            let series = ProjectionSeries::for_purchase(&engine, units, &purchased)?
                .rounded(RoundingMode::Float)?;
            print_json(&json!({
                "labels": series.labels(),
                "values": series.values(),
            }))
        }

        Command::RateTable { base } => {
            let table = StaticRateTable::new(engine.schedule().clone());
            let rows = match base {
                Some(amount) => table.rows_for(amount),
                None => table.rows(),
            };
            for row in &rows {
                println!(
                    "{:<16} {:>4}% {:>12.0} {:>10.0} {:>12.0}",
                    row.label(),
                    row.rate_pct,
                    row.start_amount,
                    row.interest,
                    row.end_amount
                );
            }
            Ok(())
        }

        Command::Statement { member, members, transactions, dividends, today } => {
            let today = evaluation_date(today.as_deref())?;
            let histories = group_histories(load_members(&members)?, load_transactions(&transactions)?)?;
            let history = histories
                .iter()
                .find(|h| h.member.member_code == member)
                .ok_or_else(|| anyhow!("no member with code {}", member))?;
            let dividends = match dividends {
                Some(path) => load_dividends(&path)
                    .with_context(|| format!("loading dividends from {}", path.display()))?,
                None => Vec::new(),
            };
            let statement = member_statement(&engine, history, &dividends, today)?;
            print_json(&statement)
        }

        Command::Logins { members, length } => {
            let members = load_members(&members)
                .with_context(|| format!("loading members from {}", members.display()))?;
            let logins: Vec<MemberLogin> = members
                .iter()
                .map(|member| MemberLogin::issue(member, None, length))
                .collect();
            print_json(&logins)
        }
    }
}

/// Explicit evaluation date, or the local calendar date
fn evaluation_date(text: Option<&str>) -> Result<NaiveDate> {
    match text {
        Some(text) => Ok(parse_timestamp(text)?.date()),
        None => {
            let today = Local::now().date_naive();
            log::debug!("evaluating as of {}", today);
            Ok(today)
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
