//! History sub-client — price history queries.

use crate::client::CoinTrackerClient;
use crate::domain::history::{HistoryPoint, HistorySeries};
use crate::error::SdkError;
use crate::shared::{CoinId, TimePeriod};

/// Sub-client for price history operations.
pub struct History<'a> {
    pub(crate) client: &'a CoinTrackerClient,
}

impl<'a> History<'a> {
    /// Samples in the order the backend sent them.
    pub async fn get(
        &self,
        id: &CoinId,
        period: TimePeriod,
    ) -> Result<Vec<HistoryPoint>, SdkError> {
        let resp = self.client.http.get_coin_history(id, period).await?;
        Ok(resp
            .data
            .history
            .into_iter()
            .map(HistoryPoint::from)
            .collect())
    }

    /// Samples sorted by timestamp, plus the period's overall change.
    pub async fn series(&self, id: &CoinId, period: TimePeriod) -> Result<HistorySeries, SdkError> {
        let resp = self.client.http.get_coin_history(id, period).await?;
        Ok(HistorySeries::from(resp.data))
    }
}
