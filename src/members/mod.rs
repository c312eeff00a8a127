//! Member and transaction records and CSV loading

mod data;
pub mod loader;

pub use data::{
    group_histories, member_code_for, total_dividends, Dividend, Member, MemberHistory,
    UnitTransaction,
};
pub use loader::{
    load_dividends, load_dividends_from_reader, load_members, load_members_from_reader, load_transactions, load_transactions_from_reader,
    parse_timestamp,
};
