//! # CryptoTracker SDK
//!
//! Market data for the CryptoTracker app: the CoinRanking REST API, a paged
//! coin list with search and sort, per-coin price history and a persisted
//! favorites set. Presentation is left to the embedding app, which observes
//! the controllers through `watch` channels or streams.
//!
//! ## Architecture
//!
//! The SDK is organized in layers:
//!
//! 1. **Core** — Coin and history models, formatting, lenient number parsing
//! 2. **Auth** — API key resolution (environment, bundled, secrets file)
//! 3. **HTTP API** — `CoinRankingHttp`, one attempt per request, typed errors
//! 4. **High-Level Client** — `CoinTrackerClient` with nested sub-clients
//! 5. **Favorites** — observable, persisted set of starred coin ids
//! 6. **Controllers** — list and detail state machines over `CoinCatalog`
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use cryptotracker_sdk::prelude::*;
//!
//! let client = CoinTrackerClient::builder().api_key("...").build()?;
//! let list = CoinListController::new(client.clone());
//! list.request_next_page(true).await;
//!
//! let mut rx = list.subscribe();
//! for coin in &rx.borrow_and_update().coins {
//!     println!("{} {}", coin.symbol, coin.display_price());
//! }
//! ```

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Shared newtypes, formatting and parsing helpers.
pub mod shared;

/// Domain modules (vertical slices): types, wire types, conversions, state.
pub mod domain;

/// Unified SDK error types.
pub mod error;

/// API URL and request constants.
pub mod network;

// ── Layer 2: Auth ────────────────────────────────────────────────────────────

/// API key handling.
pub mod auth;

// ── Layer 3: HTTP API ────────────────────────────────────────────────────────

/// Remote data gateway.
#[cfg(feature = "http")]
pub mod http;

// ── Layer 4: High-Level Client ───────────────────────────────────────────────

/// `CoinTrackerClient` — the primary entry point.
#[cfg(feature = "http")]
pub mod client;

// ── Layer 5: Favorites ───────────────────────────────────────────────────────

/// Persisted favorite coin ids.
pub mod favorites;

// ── Layer 6: Controllers ─────────────────────────────────────────────────────

/// Coin list and detail controllers.
pub mod controller;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    // Shared newtypes
    pub use crate::shared::{CoinId, TimePeriod};

    // Domain types
    pub use crate::domain::catalog::CoinCatalog;
    pub use crate::domain::coin::{
        project, should_load_more, Coin, CoinListSnapshot, CoinListState, LoadState, SortOption,
    };
    pub use crate::domain::history::{
        DetailSnapshot, HistoryPoint, HistorySeries, PriceHistoryState,
    };

    // Errors
    pub use crate::error::{HttpError, SdkError, StorageError};

    // Network
    pub use crate::network::DEFAULT_API_URL;

    // Auth
    pub use crate::auth::{ApiKey, ApiKeySource};

    // HTTP client + sub-clients
    #[cfg(feature = "http")]
    pub use crate::client::{CoinTrackerClient, CoinTrackerClientBuilder, CoinsClient, HistoryClient};
    #[cfg(feature = "http")]
    pub use crate::http::CoinRankingHttp;

    // Favorites
    pub use crate::favorites::{FavoritesStore, JsonFileStore, KeyValueStore, MemoryStore};

    // Controllers
    pub use crate::controller::{CoinDetailController, CoinListController};
}
