//! Coins sub-client — paged market listing and the favorites query.

use crate::client::CoinTrackerClient;
use crate::domain::coin::Coin;
use crate::error::SdkError;
use crate::favorites::FavoritesStore;
use crate::network::FAVORITES_FETCH_LIMIT;

/// Sub-client for coin listing operations.
pub struct Coins<'a> {
    pub(crate) client: &'a CoinTrackerClient,
}

impl<'a> Coins<'a> {
    /// One page of coins in server rank order. Empty means past the last page.
    pub async fn list(&self, page: u32, limit: u32) -> Result<Vec<Coin>, SdkError> {
        let resp = self.client.http.get_coins(page, limit).await?;
        let coins: Vec<Coin> = resp.data.coins.into_iter().map(Coin::from).collect();
        tracing::debug!(page, limit, count = coins.len(), "Fetched coin page");
        Ok(coins)
    }

    /// One page using the client's configured page size.
    pub async fn page(&self, page: u32) -> Result<Vec<Coin>, SdkError> {
        self.list(page, self.client.page_size).await
    }

    /// The favorites screen's data: the top coins filtered down to favorites.
    ///
    /// Favorites outside the first `FAVORITES_FETCH_LIMIT` ranks are not
    /// returned. No request is made when there are no favorites.
    pub async fn favorites(&self, store: &FavoritesStore) -> Result<Vec<Coin>, SdkError> {
        let ids = store.snapshot();
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let coins = self.list(1, FAVORITES_FETCH_LIMIT).await?;
        Ok(coins
            .into_iter()
            .filter(|coin| ids.contains(coin.uuid.as_str()))
            .collect())
    }
}
