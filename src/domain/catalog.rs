//! `CoinCatalog` — the data seam the controllers fetch through.

use crate::domain::coin::Coin;
use crate::domain::history::HistoryPoint;
use crate::error::SdkError;
use crate::shared::{CoinId, TimePeriod};
use async_trait::async_trait;
use std::sync::Arc;

/// Paged coin listing and per-coin price history.
///
/// Implemented by [`crate::client::CoinTrackerClient`]. Tests substitute
/// in-memory fakes.
#[async_trait]
pub trait CoinCatalog: Send + Sync {
    /// Fetch one page (1-based). An empty result means there are no more pages.
    async fn list_coins(&self, page: u32, limit: u32) -> Result<Vec<Coin>, SdkError>;

    /// Fetch price history samples, in whatever order the backend sends them.
    async fn fetch_history(
        &self,
        id: &CoinId,
        period: TimePeriod,
    ) -> Result<Vec<HistoryPoint>, SdkError>;
}

#[async_trait]
impl<T: CoinCatalog + ?Sized> CoinCatalog for Arc<T> {
    async fn list_coins(&self, page: u32, limit: u32) -> Result<Vec<Coin>, SdkError> {
        (**self).list_coins(page, limit).await
    }

    async fn fetch_history(
        &self,
        id: &CoinId,
        period: TimePeriod,
    ) -> Result<Vec<HistoryPoint>, SdkError> {
        (**self).fetch_history(id, period).await
    }
}
