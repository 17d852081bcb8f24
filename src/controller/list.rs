//! `CoinListController` — paged market list with search and sort.

use super::watch_stream;
use crate::domain::catalog::CoinCatalog;
use crate::domain::coin::{CoinListSnapshot, CoinListState, SortOption};
use crate::network::DEFAULT_PAGE_SIZE;

use async_lock::Mutex;
use futures_util::Stream;
use std::sync::Arc;
use tokio::sync::watch;

/// Drives a [`CoinListState`] against a catalog and publishes its snapshot.
pub struct CoinListController<C> {
    catalog: Arc<C>,
    page_size: u32,
    state: Arc<Mutex<CoinListState>>,
    published: Arc<watch::Sender<CoinListSnapshot>>,
}

impl<C> Clone for CoinListController<C> {
    fn clone(&self) -> Self {
        Self {
            catalog: Arc::clone(&self.catalog),
            page_size: self.page_size,
            state: Arc::clone(&self.state),
            published: Arc::clone(&self.published),
        }
    }
}

impl<C: CoinCatalog + 'static> CoinListController<C> {
    pub fn new(catalog: C) -> Self {
        let (tx, _rx) = watch::channel(CoinListSnapshot::default());
        Self {
            catalog: Arc::new(catalog),
            page_size: DEFAULT_PAGE_SIZE,
            state: Arc::new(Mutex::new(CoinListState::new())),
            published: Arc::new(tx),
        }
    }

    /// Coins requested per page. Zero is ignored.
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        if page_size > 0 {
            self.page_size = page_size;
        }
        self
    }

    // ── Paging ───────────────────────────────────────────────────────────

    /// Fetch the next page, or page 1 after clearing everything when `reset`.
    ///
    /// Returns false without touching the network while another fetch is in
    /// flight, while a search is active, or after the last page unless
    /// `reset` is set.
    ///
    /// Once issued, the fetch completes and updates state even if the
    /// returned future is dropped. Must be called from within a tokio runtime.
    pub async fn request_next_page(&self, reset: bool) -> bool {
        let page = {
            let mut state = self.state.lock().await;
            let Some(page) = state.begin_fetch(reset) else {
                tracing::debug!(
                    reset,
                    fetching = state.is_fetching(),
                    can_load_more = state.can_load_more(),
                    searching = !state.query().is_empty(),
                    "Skipped page request"
                );
                return false;
            };
            if reset {
                self.publish(&state);
            }
            page
        };

        tracing::debug!(page, limit = self.page_size, reset, "Fetching coin page");
        // The fetch runs on its own task so dropping this future cannot
        // leave `is_fetching` set.
        let this = self.clone();
        let task = tokio::spawn(async move { this.fetch_and_merge(page).await });
        if let Err(e) = task.await {
            tracing::warn!(page, error = %e, "Coin page task did not finish");
            let mut state = self.state.lock().await;
            state.fail_fetch(e.to_string());
            self.publish(&state);
        }
        true
    }

    async fn fetch_and_merge(&self, page: u32) {
        let result = self.catalog.list_coins(page, self.page_size).await;

        let mut state = self.state.lock().await;
        match result {
            Ok(coins) => {
                let received = coins.len();
                state.complete_fetch(coins);
                tracing::debug!(
                    page,
                    received,
                    total = state.master().len(),
                    can_load_more = state.can_load_more(),
                    "Merged coin page"
                );
            }
            Err(e) => {
                tracing::warn!(page, error = %e, "Coin page fetch failed");
                state.fail_fetch(e.to_string());
            }
        }
        self.publish(&state);
    }

    /// Start over from page 1.
    pub async fn retry(&self) -> bool {
        self.request_next_page(true).await
    }

    // ── Projection ───────────────────────────────────────────────────────

    /// Filter the list by name or symbol. Empty clears. Never fetches.
    pub async fn search(&self, query: &str) {
        let mut state = self.state.lock().await;
        state.set_query(query);
        self.publish(&state);
    }

    pub async fn apply_sort(&self, sort: SortOption) {
        let mut state = self.state.lock().await;
        state.set_sort(sort);
        self.publish(&state);
    }

    // ── Observation ──────────────────────────────────────────────────────

    pub fn subscribe(&self) -> watch::Receiver<CoinListSnapshot> {
        self.published.subscribe()
    }

    pub fn snapshot(&self) -> CoinListSnapshot {
        self.published.borrow().clone()
    }

    /// Snapshots published after this call.
    pub fn updates(&self) -> impl Stream<Item = CoinListSnapshot> + Send + 'static {
        watch_stream(&self.published)
    }

    pub async fn current_page(&self) -> u32 {
        self.state.lock().await.page()
    }

    pub async fn can_load_more(&self) -> bool {
        self.state.lock().await.can_load_more()
    }

    pub async fn is_fetching(&self) -> bool {
        self.state.lock().await.is_fetching()
    }

    pub async fn search_query(&self) -> String {
        self.state.lock().await.query().to_string()
    }

    pub async fn sort_option(&self) -> SortOption {
        self.state.lock().await.sort()
    }

    fn publish(&self, state: &CoinListState) {
        self.published.send_replace(state.snapshot());
    }

    /// [`request_next_page`](Self::request_next_page) on a spawned task.
    pub fn spawn_next_page(&self, reset: bool) -> tokio::task::JoinHandle<bool> {
        let this = self.clone();
        tokio::spawn(async move { this.request_next_page(reset).await })
    }
}

impl<C> std::fmt::Debug for CoinListController<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let snapshot = self.published.borrow();
        f.debug_struct("CoinListController")
            .field("page_size", &self.page_size)
            .field("visible", &snapshot.coins.len())
            .field("load_state", &snapshot.load_state)
            .finish()
    }
}
