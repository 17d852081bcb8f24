//! Coin domain — market listing entries, search/sort projection, paging state.

#[cfg(feature = "http")]
pub mod client;
mod convert;
pub mod state;
pub mod wire;

use crate::shared::{fmt, parse_lenient, parse_lenient_opt, CoinId};
use serde::{Deserialize, Serialize};

pub use state::{project, should_load_more, CoinListSnapshot, CoinListState, LoadState, SortOption};

/// A coin as listed by the market endpoint.
///
/// Numeric fields stay in their string form; the derived accessors parse
/// them leniently so malformed values read as `0.0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coin {
    pub uuid: CoinId,
    pub symbol: String,
    pub name: String,
    pub icon_url: String,
    pub price: String,
    pub market_cap: Option<String>,
    pub change: Option<String>,
    pub rank: u32,
    pub sparkline: Option<Vec<String>>,
}

impl Coin {
    pub fn id(&self) -> &CoinId {
        &self.uuid
    }

    pub fn current_price(&self) -> f64 {
        parse_lenient(&self.price)
    }

    /// Percentage change over the listing window.
    pub fn performance(&self) -> f64 {
        parse_lenient_opt(self.change.as_deref())
    }

    /// `None` when the market cap is present but unparseable. Missing is `0`.
    pub fn market_cap_value(&self) -> Option<f64> {
        match self.market_cap.as_deref() {
            None => Some(0.0),
            Some(raw) => raw.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        }
    }

    pub fn is_gaining(&self) -> bool {
        self.performance() >= 0.0
    }

    /// Icon URL with the `.svg` extension swapped for `.png`.
    pub fn png_icon_url(&self) -> String {
        self.icon_url.replace(".svg", ".png")
    }

    /// Parsed sparkline samples; unparseable samples read as `0.0`.
    pub fn sparkline_values(&self) -> Vec<f64> {
        self.sparkline
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(|s| parse_lenient(s))
            .collect()
    }

    pub fn display_price(&self) -> String {
        fmt::currency(self.current_price())
    }

    pub fn display_change(&self) -> String {
        fmt::percent(self.performance())
    }

    pub fn display_market_cap(&self) -> String {
        fmt::market_cap(self.market_cap.as_deref())
    }

    /// Case-insensitive substring match against name or symbol.
    ///
    /// `needle` must already be lowercased.
    pub(crate) fn matches_lowercase(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle) || self.symbol.to_lowercase().contains(needle)
    }
}
