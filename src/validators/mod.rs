//! Field validator catalogue
//!
//! Plain functions matching [`crate::model::ValidatorFn`]. Entity types pick
//! from these when building their validator sets and add their own
//! cross-field rules where needed.

mod numeric;
mod text;

pub use numeric::{amount, boolean_flag, date, non_zero_amount, number, period, price, rate};
pub use text::{currency, funding_symbol, string, symbol};
