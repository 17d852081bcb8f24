//! Wire types for the coin history endpoint (`GET /coin/{uuid}/history`).

use crate::domain::Envelope;
use crate::shared::serde_util::lenient_string;
use serde::{Deserialize, Serialize};

/// A single history sample from the backend. `price` is `null` for gaps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryPointResponse {
    #[serde(default, deserialize_with = "lenient_string::deserialize")]
    pub price: Option<String>,
    pub timestamp: i64,
}

/// `data` payload of the history response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryData {
    #[serde(default, deserialize_with = "lenient_string::deserialize")]
    pub change: Option<String>,
    pub history: Vec<HistoryPointResponse>,
}

/// Full history response: `{status, data: {change, history}}`.
pub type HistoryResponse = Envelope<HistoryData>;
