//! High-level client — `CoinTrackerClient` with nested sub-client accessors.
//!
//! Each domain has its own sub-client in `domain/<name>/client.rs`.
//! This module keeps the builder, configuration, and accessor methods.

use crate::auth::{self, ApiKey};
use crate::domain::catalog::CoinCatalog;
use crate::domain::coin::client::Coins;
use crate::domain::coin::Coin;
use crate::domain::history::client::History;
use crate::domain::history::HistoryPoint;
use crate::error::SdkError;
use crate::http::CoinRankingHttp;
use crate::network::{DEFAULT_API_URL, DEFAULT_PAGE_SIZE};
use crate::shared::{CoinId, TimePeriod};

use async_trait::async_trait;
use std::path::PathBuf;
use std::time::Duration;

// Re-export sub-client types for convenience.
pub use crate::domain::coin::client::Coins as CoinsClient;
pub use crate::domain::history::client::History as HistoryClient;

/// The primary entry point for talking to the CoinRanking API.
///
/// Provides nested sub-client accessors for each domain:
/// `client.coins()`, `client.history()`. Cheap to clone; clones share the
/// connection pool and API key.
#[derive(Clone)]
pub struct CoinTrackerClient {
    pub(crate) http: CoinRankingHttp,
    pub(crate) page_size: u32,
}

impl CoinTrackerClient {
    pub fn builder() -> CoinTrackerClientBuilder {
        CoinTrackerClientBuilder::default()
    }

    // ── Sub-client accessors ─────────────────────────────────────────────

    pub fn coins(&self) -> Coins<'_> {
        Coins { client: self }
    }

    pub fn history(&self) -> History<'_> {
        History { client: self }
    }

    /// The gateway, for issuing hand-built requests.
    pub fn http(&self) -> &CoinRankingHttp {
        &self.http
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Replace the API key at runtime. `None` or empty stops sending the header.
    pub async fn set_api_key(&self, key: Option<&str>) {
        self.http.set_api_key(key.map(ApiKey::new)).await;
    }
}

#[async_trait]
impl CoinCatalog for CoinTrackerClient {
    async fn list_coins(&self, page: u32, limit: u32) -> Result<Vec<Coin>, SdkError> {
        self.coins().list(page, limit).await
    }

    async fn fetch_history(
        &self,
        id: &CoinId,
        period: TimePeriod,
    ) -> Result<Vec<HistoryPoint>, SdkError> {
        self.history().get(id, period).await
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

pub struct CoinTrackerClientBuilder {
    base_url: String,
    api_key: Option<String>,
    secrets_file: Option<PathBuf>,
    use_environment: bool,
    timeout: Option<Duration>,
    page_size: u32,
}

impl Default for CoinTrackerClientBuilder {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            api_key: None,
            secrets_file: None,
            use_environment: true,
            timeout: None,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl CoinTrackerClientBuilder {
    pub fn base_url(mut self, url: &str) -> Self {
        self.base_url = url.to_string();
        self
    }

    /// The key bundled with the app. Checked after `COINRANKING_API_KEY`.
    pub fn api_key(mut self, key: &str) -> Self {
        self.api_key = Some(key.to_string());
        self
    }

    /// Dotenv-format secrets file, checked last.
    pub fn secrets_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.secrets_file = Some(path.into());
        self
    }

    /// Skip the `COINRANKING_API_KEY` environment lookup.
    pub fn ignore_environment(mut self) -> Self {
        self.use_environment = false;
        self
    }

    /// Per-request timeout. Unset means the HTTP library's default.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn build(self) -> Result<CoinTrackerClient, SdkError> {
        if self.page_size == 0 {
            return Err(SdkError::Validation("page_size must be positive".to_string()));
        }

        let env_value = if self.use_environment {
            std::env::var(auth::API_KEY_ENV).ok()
        } else {
            None
        };
        let resolved = auth::resolve_from(
            env_value.as_deref(),
            self.api_key.as_deref(),
            self.secrets_file.as_deref(),
        );
        match &resolved {
            Some((_, source)) => tracing::debug!(?source, "API key configured"),
            None => tracing::debug!("No API key configured; requests are anonymous"),
        }
        let http = CoinRankingHttp::new(&self.base_url, self.timeout)?
            .with_api_key(resolved.map(|(key, _)| key));

        Ok(CoinTrackerClient {
            http,
            page_size: self.page_size,
        })
    }
}
