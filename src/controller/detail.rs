//! `CoinDetailController` — price history for one coin and the selected period.

use super::watch_stream;
use crate::domain::catalog::CoinCatalog;
use crate::domain::coin::Coin;
use crate::domain::history::{DetailSnapshot, PriceHistoryState};
use crate::shared::TimePeriod;

use async_lock::Mutex;
use futures_util::Stream;
use std::sync::Arc;
use tokio::sync::watch;

/// Loads history for a fixed coin. Changing the period reloads; nothing is cached.
pub struct CoinDetailController<C> {
    catalog: Arc<C>,
    coin: Arc<Coin>,
    state: Arc<Mutex<PriceHistoryState>>,
    published: Arc<watch::Sender<DetailSnapshot>>,
}

impl<C> Clone for CoinDetailController<C> {
    fn clone(&self) -> Self {
        Self {
            catalog: Arc::clone(&self.catalog),
            coin: Arc::clone(&self.coin),
            state: Arc::clone(&self.state),
            published: Arc::clone(&self.published),
        }
    }
}

impl<C: CoinCatalog + 'static> CoinDetailController<C> {
    /// Starts on the default period (`24h`) with no history loaded.
    ///
    /// Nothing is fetched until [`load_history`](Self::load_history) or
    /// [`spawn_load_history`](Self::spawn_load_history) is called.
    pub fn new(catalog: C, coin: Coin) -> Self {
        let state = PriceHistoryState::new(TimePeriod::default());
        let (tx, _rx) = watch::channel(state.snapshot());
        Self {
            catalog: Arc::new(catalog),
            coin: Arc::new(coin),
            state: Arc::new(Mutex::new(state)),
            published: Arc::new(tx),
        }
    }

    pub fn coin(&self) -> &Coin {
        &self.coin
    }

    /// Fetch history for the selected period.
    ///
    /// Failures are logged and clear the loading flag; the previous history
    /// stays. A result for a period that is no longer selected is dropped.
    /// The fetch completes even if the returned future is dropped. Must be
    /// called from within a tokio runtime.
    pub async fn load_history(&self) {
        let (ticket, period) = {
            let mut state = self.state.lock().await;
            let started = state.begin_load();
            self.published.send_replace(state.snapshot());
            started
        };

        tracing::debug!(coin = %self.coin.uuid, %period, ticket, "Loading price history");
        let this = self.clone();
        let task = tokio::spawn(async move { this.fetch_and_apply(ticket, period).await });
        if let Err(e) = task.await {
            tracing::warn!(coin = %self.coin.uuid, %period, error = %e, "History task did not finish");
            let mut state = self.state.lock().await;
            if state.fail_load(ticket) {
                self.published.send_replace(state.snapshot());
            }
        }
    }

    async fn fetch_and_apply(&self, ticket: u64, period: TimePeriod) {
        let id = &self.coin.uuid;
        let result = self.catalog.fetch_history(id, period).await;

        let mut state = self.state.lock().await;
        let applied = match result {
            Ok(points) => {
                let count = points.len();
                let applied = state.complete_load(ticket, points);
                tracing::debug!(coin = %id, %period, count, applied, "Price history loaded");
                applied
            }
            Err(e) => {
                tracing::warn!(coin = %id, %period, error = %e, "Price history fetch failed");
                state.fail_load(ticket)
            }
        };
        if applied {
            self.published.send_replace(state.snapshot());
        }
    }

    /// Switch period and reload.
    pub async fn select_period(&self, period: TimePeriod) {
        self.state.lock().await.select_period(period);
        self.load_history().await;
    }

    pub fn period(&self) -> TimePeriod {
        self.published.borrow().period
    }

    pub fn subscribe(&self) -> watch::Receiver<DetailSnapshot> {
        self.published.subscribe()
    }

    pub fn snapshot(&self) -> DetailSnapshot {
        self.published.borrow().clone()
    }

    pub fn updates(&self) -> impl Stream<Item = DetailSnapshot> + Send + 'static {
        watch_stream(&self.published)
    }

    /// [`load_history`](Self::load_history) on a spawned tokio task.
    pub fn spawn_load_history(&self) -> tokio::task::JoinHandle<()> {
        let this = self.clone();
        tokio::spawn(async move { this.load_history().await })
    }

    /// [`select_period`](Self::select_period) on a spawned tokio task.
    pub fn spawn_select_period(&self, period: TimePeriod) -> tokio::task::JoinHandle<()> {
        let this = self.clone();
        tokio::spawn(async move { this.select_period(period).await })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::fakes::{server_error, FakeCatalog};
    use crate::domain::coin::fixtures::coin;
    use crate::domain::history::HistoryPoint;

    fn point(price: &str, ts: i64) -> HistoryPoint {
        HistoryPoint {
            price: price.to_string(),
            timestamp: ts,
        }
    }

    fn timestamps(snap: &DetailSnapshot) -> Vec<i64> {
        snap.history.iter().map(|p| p.timestamp).collect()
    }

    fn btc() -> Coin {
        coin("btc", "Bitcoin", "BTC", "50000", "5.0", 1)
    }

    #[tokio::test]
    async fn test_load_sorts_by_timestamp() {
        let catalog = FakeCatalog::default();
        catalog.set_history(
            TimePeriod::Day1,
            Ok(vec![point("3", 300), point("1", 100), point("2", 200)]),
        );
        let controller = CoinDetailController::new(catalog, btc());
        assert_eq!(controller.period(), TimePeriod::Day1);
        assert!(!controller.snapshot().has_data());

        controller.load_history().await;
        let snap = controller.snapshot();
        assert_eq!(timestamps(&snap), [100, 200, 300]);
        assert!(!snap.is_loading);
        assert!(snap.has_data());
        assert_eq!(controller.coin().symbol, "BTC");
    }

    #[tokio::test]
    async fn test_failure_is_swallowed_and_keeps_history() {
        let catalog = Arc::new(FakeCatalog::default());
        catalog.set_history(TimePeriod::Day1, Ok(vec![point("1", 10)]));
        catalog.set_history(TimePeriod::Day7, Err(server_error(502)));
        let controller = CoinDetailController::new(Arc::clone(&catalog), btc());

        controller.load_history().await;
        controller.select_period(TimePeriod::Day7).await;

        let snap = controller.snapshot();
        assert_eq!(snap.period, TimePeriod::Day7);
        assert!(!snap.is_loading);
        assert_eq!(timestamps(&snap), [10]);
        assert_eq!(catalog.history_calls(), 2);
    }

    #[tokio::test]
    async fn test_select_period_refetches_every_time() {
        let catalog = Arc::new(FakeCatalog::default());
        let controller = CoinDetailController::new(Arc::clone(&catalog), btc());

        controller.select_period(TimePeriod::Day30).await;
        controller.select_period(TimePeriod::Day1).await;
        controller.select_period(TimePeriod::Day30).await;
        assert_eq!(catalog.history_calls(), 3);
        assert!(!controller.snapshot().has_data());
    }

    #[tokio::test]
    async fn test_slow_result_for_old_period_is_dropped() {
        let catalog = Arc::new(FakeCatalog::gated());
        catalog.set_history(TimePeriod::Day1, Ok(vec![point("1", 1)]));
        catalog.set_history(TimePeriod::Day7, Ok(vec![point("7", 7)]));
        let controller = CoinDetailController::new(Arc::clone(&catalog), btc());

        let first = controller.spawn_select_period(TimePeriod::Day1);
        while catalog.history_calls() < 1 {
            tokio::task::yield_now().await;
        }
        let second = controller.spawn_select_period(TimePeriod::Day7);
        while catalog.history_calls() < 2 {
            tokio::task::yield_now().await;
        }

        catalog.release(2);
        first.await.unwrap();
        second.await.unwrap();

        let snap = controller.snapshot();
        assert_eq!(snap.period, TimePeriod::Day7);
        assert_eq!(timestamps(&snap), [7]);
        assert!(!snap.is_loading);
    }

    #[tokio::test]
    async fn test_dropped_load_still_clears_loading() {
        let catalog = Arc::new(FakeCatalog::gated());
        catalog.set_history(TimePeriod::Day1, Ok(vec![point("2", 20), point("1", 10)]));
        let controller = CoinDetailController::new(Arc::clone(&catalog), btc());

        let timed_out = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            controller.load_history(),
        )
        .await;
        assert!(timed_out.is_err());
        assert!(controller.snapshot().is_loading);

        let mut rx = controller.subscribe();
        catalog.release(1);
        rx.changed().await.unwrap();
        let snap = rx.borrow_and_update().clone();
        assert!(!snap.is_loading);
        assert_eq!(timestamps(&snap), [10, 20]);
    }

    #[tokio::test]
    async fn test_spawn_load_history_fetches_initial_series() {
        let catalog = Arc::new(FakeCatalog::default());
        catalog.set_history(TimePeriod::Day1, Ok(vec![point("1", 1)]));
        let controller = CoinDetailController::new(Arc::clone(&catalog), btc());
        assert_eq!(catalog.history_calls(), 0);

        controller.spawn_load_history().await.unwrap();
        assert_eq!(catalog.history_calls(), 1);
        assert!(controller.snapshot().has_data());
    }

    #[tokio::test]
    async fn test_loading_flag_is_published() {
        let catalog = Arc::new(FakeCatalog::gated());
        let controller = CoinDetailController::new(Arc::clone(&catalog), btc());
        let mut rx = controller.subscribe();

        let task = controller.spawn_select_period(TimePeriod::Day7);
        rx.changed().await.unwrap();
        assert!(rx.borrow_and_update().is_loading);

        catalog.release(1);
        task.await.unwrap();
        let snap = rx.borrow_and_update().clone();
        assert!(!snap.is_loading);
        assert_eq!(snap.period, TimePeriod::Day7);
    }
}
