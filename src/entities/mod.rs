//! Venue entity definitions
//!
//! Each entity declares its wire layout, validators and derived fields and
//! gets construction, unserialization, serialization and validation from
//! [`crate::model::Model`].

mod flag;
mod funding_loan;
mod funding_ticker;
mod ledger_entry;
mod public_trade;
mod trading_ticker;

pub use flag::WireFlag;
pub use funding_loan::{FundingLoan, LoanSide};
pub use funding_ticker::FundingTicker;
pub use ledger_entry::{wallet_from_description, LedgerEntry};
pub use public_trade::PublicTrade;
pub use trading_ticker::{split_pair, TradingTicker};
