//! Human-readable display formatting for prices, percentages and market caps.

pub mod num;

pub use num::{currency, market_cap, percent};
