//! Coin list state container — paging cursor, master list, search/sort projection.
//!
//! Pure and synchronous. The controller owns one instance behind a lock and
//! drives it around the async fetch; tests drive it directly.

use super::Coin;
use crate::shared::CoinId;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashSet;

/// Ordering applied to the visible list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortOption {
    /// Server rank order.
    #[default]
    None,
    PriceDesc,
    PerformanceDesc,
}

/// Load state shown alongside the list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Error(String),
}

impl LoadState {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadState::Error(msg) => Some(msg),
            _ => None,
        }
    }
}

/// What presentation gets to see: the projected list plus its load state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoinListSnapshot {
    pub coins: Vec<Coin>,
    pub load_state: LoadState,
}

/// Project the master list through the search filter and sort option.
///
/// Pure: the output depends only on the three inputs. Sorting is stable,
/// so equal keys keep their server rank order.
pub fn project(master: &[Coin], query: &str, sort: SortOption) -> Vec<Coin> {
    let needle = query.to_lowercase();
    let mut result: Vec<Coin> = if needle.is_empty() {
        master.to_vec()
    } else {
        master
            .iter()
            .filter(|coin| coin.matches_lowercase(&needle))
            .cloned()
            .collect()
    };

    match sort {
        SortOption::None => {}
        SortOption::PriceDesc => {
            result.sort_by(|a, b| descending(a.current_price(), b.current_price()))
        }
        SortOption::PerformanceDesc => {
            result.sort_by(|a, b| descending(a.performance(), b.performance()))
        }
    }

    result
}

// Lenient parsing never yields NaN, so the fallback only equates -0.0 and 0.0.
fn descending(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

/// Whether displaying row `index` should trigger loading the next page.
///
/// True for the last two rows of the visible list while no search is active.
pub fn should_load_more(index: usize, visible_len: usize, search_active: bool) -> bool {
    !search_active && visible_len > 0 && index + 2 >= visible_len
}

/// Paging and projection state for the coin list.
#[derive(Debug, Clone)]
pub struct CoinListState {
    master: Vec<Coin>,
    seen: HashSet<CoinId>,
    page: u32,
    can_load_more: bool,
    is_fetching: bool,
    query: String,
    sort: SortOption,
    visible: Vec<Coin>,
    load_state: LoadState,
}

impl Default for CoinListState {
    fn default() -> Self {
        Self {
            master: Vec::new(),
            seen: HashSet::new(),
            page: 1,
            can_load_more: true,
            is_fetching: false,
            query: String::new(),
            sort: SortOption::None,
            visible: Vec::new(),
            load_state: LoadState::Idle,
        }
    }
}

impl CoinListState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a fetch if the guards allow one. Returns the page to request.
    ///
    /// Refused while a fetch is in flight or a search is active. Once the
    /// end of the list has been reached only a reset gets through.
    pub fn begin_fetch(&mut self, reset: bool) -> Option<u32> {
        if self.is_fetching || !self.query.is_empty() {
            return None;
        }
        if !self.can_load_more && !reset {
            return None;
        }

        if reset {
            self.master.clear();
            self.seen.clear();
            self.page = 1;
            self.can_load_more = true;
            self.load_state = LoadState::Loading;
            self.recompute();
        }

        self.is_fetching = true;
        Some(self.page)
    }

    /// Merge a fetched page. An empty page marks the end of the list.
    pub fn complete_fetch(&mut self, coins: Vec<Coin>) {
        if coins.is_empty() {
            self.can_load_more = false;
        } else {
            for coin in coins {
                if self.seen.insert(coin.uuid.clone()) {
                    self.master.push(coin);
                }
            }
            self.page += 1;
        }

        self.recompute();
        self.load_state = LoadState::Idle;
        self.is_fetching = false;
    }

    /// Record a failed fetch. Pages merged so far are kept.
    pub fn fail_fetch(&mut self, message: impl Into<String>) {
        self.load_state = LoadState::Error(message.into());
        self.is_fetching = false;
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.recompute();
    }

    pub fn set_sort(&mut self, sort: SortOption) {
        self.sort = sort;
        self.recompute();
    }

    fn recompute(&mut self) {
        self.visible = project(&self.master, &self.query, self.sort);
    }

    pub fn visible(&self) -> &[Coin] {
        &self.visible
    }

    pub fn master(&self) -> &[Coin] {
        &self.master
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn can_load_more(&self) -> bool {
        self.can_load_more
    }

    pub fn is_fetching(&self) -> bool {
        self.is_fetching
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn sort(&self) -> SortOption {
        self.sort
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    pub fn snapshot(&self) -> CoinListSnapshot {
        CoinListSnapshot {
            coins: self.visible.clone(),
            load_state: self.load_state.clone(),
        }
    }
}
