//! Price history domain — chart samples for one coin over a time period.

#[cfg(feature = "http")]
pub mod client;
mod convert;
pub mod state;
pub mod wire;

use crate::shared::parse_lenient;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use state::{DetailSnapshot, PriceHistoryState};

/// A single price sample. `timestamp` (epoch seconds) is its identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryPoint {
    pub price: String,
    pub timestamp: i64,
}

impl HistoryPoint {
    pub fn id(&self) -> i64 {
        self.timestamp
    }

    pub fn price_value(&self) -> f64 {
        parse_lenient(&self.price)
    }

    pub fn date(&self) -> Option<DateTime<Utc>> {
        DateTime::<Utc>::from_timestamp(self.timestamp, 0)
    }
}

/// A fetched history series together with the period's overall change.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistorySeries {
    /// Percentage change over the whole period, when the backend reports one.
    pub change: Option<f64>,
    /// Samples in ascending timestamp order.
    pub points: Vec<HistoryPoint>,
}

/// Sort samples ascending by timestamp. The API does not guarantee an order.
pub fn sort_by_timestamp(points: &mut [HistoryPoint]) {
    points.sort_by_key(|p| p.timestamp);
}
