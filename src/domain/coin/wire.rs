//! Wire types for the coin list endpoint (`GET /coins`).

use crate::domain::Envelope;
use crate::shared::serde_util::lenient_string;
use serde::{Deserialize, Serialize};

/// A single coin as sent by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoinResponse {
    pub uuid: String,
    pub symbol: String,
    pub name: String,
    #[serde(default)]
    pub icon_url: String,
    #[serde(default, deserialize_with = "lenient_string::deserialize")]
    pub price: Option<String>,
    #[serde(default, deserialize_with = "lenient_string::deserialize")]
    pub market_cap: Option<String>,
    #[serde(default, deserialize_with = "lenient_string::deserialize")]
    pub change: Option<String>,
    pub rank: u32,
    /// Samples may be `null` for hours without trades.
    #[serde(default)]
    pub sparkline: Option<Vec<Option<String>>>,
}

/// `data` payload of the coin list response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoinsData {
    pub coins: Vec<CoinResponse>,
}

/// Full coin list response: `{status, data: {coins}}`.
pub type CoinsResponse = Envelope<CoinsData>;
