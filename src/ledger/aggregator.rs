//! Month-by-month aggregation of member holdings over a calendar year

use chrono::{Datelike, NaiveDate};
use rayon::prelude::*;

use super::types::{CellContent, LedgerCell, MemberLedgerRow, YearLedger};
use crate::calendar::{month_index, month_index_of};
use crate::error::Result;
use crate::members::MemberHistory;
use crate::valuation::{checked_units, ValuationEngine};

/// A transaction ready for valuation: validated units and a purchase date
/// clamped to both the program start and the member's join date
#[derive(Debug, Clone, Copy)]
struct ClampedHolding {
    units: i64,
    held_units: u64,
    purchased: NaiveDate,
    purchase_index: i64,
}

/// Builds monthly ledgers for one member or for every member of a year
#[derive(Debug, Clone, Default)]
pub struct LedgerAggregator {
    engine: ValuationEngine,
}

impl LedgerAggregator {
    pub fn new(engine: ValuationEngine) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &ValuationEngine {
        &self.engine
    }

    /// Ledger rows of every member for `year`, in input order
    pub fn year_ledger(&self, histories: &[MemberHistory], year: i32) -> Result<YearLedger> {
        let rows = histories
            .par_iter()
            .map(|history| self.member_row(history, year))
            .collect::<Result<Vec<_>>>()?;

        log::info!("built {} ledger rows for {}", rows.len(), year);

        Ok(YearLedger {
            year,
            base_price_this_year: self.engine.entry_price(year)?,
            rows,
        })
    }

    /// Twelve monthly cells of one member for `year`
    pub fn member_row(&self, history: &MemberHistory, year: i32) -> Result<MemberLedgerRow> {
        let member = &history.member;
        let join = self.engine.effective_date(&member.joined_at);
        let join_index = month_index(&join);
        let holdings = self.clamp_holdings(history, join)?;

        let mut months = Vec::with_capacity(12);
        let mut year_end_units = 0;
        let mut year_end_value = 0.0;

        for month in 1..=12u32 {
            let cell_index = month_index_of(year, month)?;
            if cell_index < join_index {
                months.push(LedgerCell::not_applicable(month));
                continue;
            }

            let mut units = 0u64;
            let mut value = 0.0;
            let mut contributed = false;

            for holding in holdings.iter().filter(|h| h.purchase_index <= cell_index) {
                if let Some(v) = self.engine.value_at(holding.units, &holding.purchased, year, month)? {
                    units += holding.held_units;
                    value += v;
                    contributed = true;
                }
            }

            let content = if contributed {
                CellContent::Populated { units, value }
            } else {
                CellContent::NoData
            };

            months.push(LedgerCell {
                month,
                content,
                is_join: cell_index == join_index,
                is_anniversary: year > join.year() && month == join.month(),
            });

            if month == 12 {
                year_end_units = units;
                year_end_value = value;
            }
        }

        Ok(MemberLedgerRow {
            member_id: member.id,
            member_code: member.member_code.clone(),
            full_name: member.full_name.clone(),
            effective_join: join,
            lifetime_units: history.lifetime_units(),
            months,
            year_end_units,
            year_end_value: (year_end_units != 0).then_some(year_end_value),
        })
    }

    /// Back-dated transactions take the join date so they do not earn
    /// tenure from before the member existed
    fn clamp_holdings(&self, history: &MemberHistory, join: NaiveDate) -> Result<Vec<ClampedHolding>> {
        history
            .transactions
            .iter()
            .map(|tx| {
                let held_units = checked_units(tx.units)?;
                let mut purchased = self.engine.effective_date(&tx.purchased_at);
                if purchased < join {
                    log::debug!(
                        "transaction {} of {} dated {} moved to join date {}",
                        tx.id,
                        history.member.member_code,
                        purchased,
                        join
                    );
                    purchased = join;
                }
                Ok(ClampedHolding {
                    units: tx.units,
                    held_units,
                    purchased,
                    purchase_index: month_index(&purchased),
                })
            })
            .collect()
    }
}
