//! Low-level HTTP client — `CoinRankingHttp`.
//!
//! One method per API endpoint. Returns wire types (conversion to domain types
//! happens at the Layer 4 boundary). Every request is a single attempt: no
//! retries, no caching.

use crate::auth::ApiKey;
use crate::domain::coin::wire::CoinsResponse;
use crate::domain::history::wire::HistoryResponse;
use crate::error::{HttpError, SdkError};
use crate::network::ACCESS_TOKEN_HEADER;
use crate::shared::{CoinId, TimePeriod};

use async_lock::RwLock;
use reqwest::{Client, Method, Request, Url};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;

/// Low-level HTTP client for the CoinRanking REST API.
#[derive(Clone)]
pub struct CoinRankingHttp {
    base_url: String,
    client: Client,
    /// Sent as `x-access-token`. NEVER exposed publicly.
    api_key: Arc<RwLock<Option<ApiKey>>>,
}

impl CoinRankingHttp {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, SdkError> {
        let mut builder = Client::builder().pool_max_idle_per_host(10);
        if let Some(t) = timeout {
            builder = builder.timeout(t);
        }
        let client = builder
            .build()
            .map_err(|e| SdkError::Other(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            api_key: Arc::new(RwLock::new(None)),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Construction-time API key. Empty keys are treated as no key.
    pub fn with_api_key(mut self, key: Option<ApiKey>) -> Self {
        self.api_key = Arc::new(RwLock::new(key.filter(|k| !k.is_empty())));
        self
    }

    /// Set or clear the API key. Empty keys are treated as no key.
    pub async fn set_api_key(&self, key: Option<ApiKey>) {
        *self.api_key.write().await = key.filter(|k| !k.is_empty());
    }

    pub async fn has_api_key(&self) -> bool {
        self.api_key.read().await.is_some()
    }

    // ── Coins ────────────────────────────────────────────────────────────

    /// `GET /coins?limit={limit}&offset={(page-1)*limit}`.
    pub async fn get_coins(&self, page: u32, limit: u32) -> Result<CoinsResponse, HttpError> {
        if page == 0 {
            return Err(HttpError::InvalidUrl("page must be at least 1".to_string()));
        }
        if limit == 0 {
            return Err(HttpError::InvalidUrl("limit must be positive".to_string()));
        }
        let offset = u64::from(page - 1) * u64::from(limit);
        let url = format!(
            "{}/coins?limit={}&offset={}",
            self.base_url, limit, offset
        );
        self.get(&url).await
    }

    // ── History ──────────────────────────────────────────────────────────

    /// `GET /coin/{uuid}/history?timePeriod={period}`.
    pub async fn get_coin_history(
        &self,
        id: &CoinId,
        period: TimePeriod,
    ) -> Result<HistoryResponse, HttpError> {
        if id.as_str().trim().is_empty() {
            return Err(HttpError::InvalidUrl("coin id is empty".to_string()));
        }
        let url = format!(
            "{}/coin/{}/history?timePeriod={}",
            self.base_url,
            urlencoding::encode(id.as_str()),
            period.as_str()
        );
        self.get(&url).await
    }

    // ── Gateway ──────────────────────────────────────────────────────────

    /// Build a GET request for `url`, attaching the access token when set.
    pub async fn build_get(&self, url: &str) -> Result<Request, HttpError> {
        let parsed = Url::parse(url).map_err(|e| HttpError::InvalidUrl(format!("{url}: {e}")))?;
        let mut req = self.client.request(Method::GET, parsed);
        if let Some(key) = self.api_key.read().await.as_ref() {
            req = req.header(ACCESS_TOKEN_HEADER, key.expose());
        }
        req.build()
            .map_err(|e| HttpError::InvalidUrl(format!("{url}: {e}")))
    }

    /// Execute a fully-formed request and decode the body as `T`.
    ///
    /// - no HTTP response → [`HttpError::InvalidResponse`]
    /// - status outside 2xx → [`HttpError::ServerError`]
    /// - body does not match `T` → [`HttpError::DecodingError`]
    pub async fn perform<T: DeserializeOwned>(&self, request: Request) -> Result<T, HttpError> {
        let method = request.method().clone();
        let url = request.url().to_string();

        let resp = self.client.execute(request).await.map_err(|e| {
            tracing::warn!(%method, %url, error = %e, "Request failed without a response");
            HttpError::InvalidResponse(e.to_string())
        })?;

        let status = resp.status();
        tracing::debug!(%method, %url, status = status.as_u16(), "Response received");

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            tracing::warn!(%url, status = status.as_u16(), "Server error");
            return Err(HttpError::ServerError {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = resp
            .bytes()
            .await
            .map_err(|e| HttpError::InvalidResponse(e.to_string()))?;

        serde_json::from_slice::<T>(&bytes).map_err(|e| {
            tracing::warn!(%url, error = %e, "Failed to decode response body");
            HttpError::DecodingError(e.to_string())
        })
    }

    async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T, HttpError> {
        let request = self.build_get(url).await?;
        self.perform(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, header_exists, method, path, query_param};
    use wiremock::{Mock, MockServer, Request as MockRequest, ResponseTemplate};

    fn coins_body() -> serde_json::Value {
        serde_json::json!({
            "status": "success",
            "data": {
                "coins": [{
                    "uuid": "Qwsogvtv82FCd",
                    "symbol": "BTC",
                    "name": "Bitcoin",
                    "iconUrl": "https://cdn.coinranking.com/btc.svg",
                    "price": "50000",
                    "change": "5.0",
                    "rank": 1
                }]
            }
        })
    }

    #[tokio::test]
    async fn test_get_coins_computes_offset() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/coins"))
            .and(query_param("limit", "20"))
            .and(query_param("offset", "40"))
            .respond_with(ResponseTemplate::new(200).set_body_json(coins_body()))
            .expect(1)
            .mount(&server)
            .await;

        let http = CoinRankingHttp::new(&server.uri(), None).unwrap();
        let resp = http.get_coins(3, 20).await.unwrap();
        assert_eq!(resp.data.coins.len(), 1);
        assert_eq!(resp.data.coins[0].symbol, "BTC");
    }

    #[tokio::test]
    async fn test_access_token_sent_only_when_configured() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/coins"))
            .and(header("x-access-token", "secret-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(coins_body()))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/coins"))
            .respond_with(ResponseTemplate::new(200).set_body_json(coins_body()))
            .mount(&server)
            .await;

        let http = CoinRankingHttp::new(&server.uri(), None).unwrap();
        http.get_coins(1, 20).await.unwrap();
        let received: Vec<MockRequest> = server.received_requests().await.unwrap();
        assert!(!received[0].headers.contains_key("x-access-token"));

        http.set_api_key(Some(ApiKey::new("secret-key"))).await;
        http.get_coins(1, 20).await.unwrap();
    }

    #[tokio::test]
    async fn test_empty_api_key_is_ignored() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(header_exists("x-access-token"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(coins_body()))
            .mount(&server)
            .await;

        let http = CoinRankingHttp::new(&server.uri(), None).unwrap();
        http.set_api_key(Some(ApiKey::new(""))).await;
        assert!(!http.has_api_key().await);
        assert!(http.get_coins(1, 20).await.is_ok());
    }

    #[tokio::test]
    async fn test_non_2xx_maps_to_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(429).set_body_string("slow down"))
            .expect(1)
            .mount(&server)
            .await;

        let http = CoinRankingHttp::new(&server.uri(), None).unwrap();
        let err = http.get_coins(1, 20).await.unwrap_err();
        match err {
            HttpError::ServerError { status, body } => {
                assert_eq!(status, 429);
                assert_eq!(body, "slow down");
            }
            other => panic!("expected ServerError, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_bad_body_maps_to_decoding_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"status": "success"})),
            )
            .mount(&server)
            .await;

        let http = CoinRankingHttp::new(&server.uri(), None).unwrap();
        let err = http.get_coins(1, 20).await.unwrap_err();
        assert!(matches!(err, HttpError::DecodingError(_)));
    }

    #[tokio::test]
    async fn test_unreachable_host_maps_to_invalid_response() {
        // Nothing listens on the discard port.
        let http = CoinRankingHttp::new("http://127.0.0.1:9", Some(Duration::from_secs(2))).unwrap();
        let err = http.get_coins(1, 20).await.unwrap_err();
        assert!(matches!(err, HttpError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_invalid_inputs_map_to_invalid_url() {
        let http = CoinRankingHttp::new("http://localhost", None).unwrap();
        assert!(matches!(
            http.get_coins(0, 20).await,
            Err(HttpError::InvalidUrl(_))
        ));
        assert!(matches!(
            http.get_coins(1, 0).await,
            Err(HttpError::InvalidUrl(_))
        ));
        assert!(matches!(
            http.get_coin_history(&CoinId::from(""), TimePeriod::Day1).await,
            Err(HttpError::InvalidUrl(_))
        ));

        let broken = CoinRankingHttp::new("not a url", None).unwrap();
        assert!(matches!(
            broken.get_coins(1, 20).await,
            Err(HttpError::InvalidUrl(_))
        ));
    }

    #[tokio::test]
    async fn test_get_coin_history_path_and_period() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/coin/Qwsogvtv82FCd/history"))
            .and(query_param("timePeriod", "7d"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "success",
                "data": {"change": "1.5", "history": [{"price": "1", "timestamp": 10}]}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let http = CoinRankingHttp::new(&server.uri(), None).unwrap();
        let resp = http
            .get_coin_history(&CoinId::from("Qwsogvtv82FCd"), TimePeriod::Day7)
            .await
            .unwrap();
        assert_eq!(resp.data.history.len(), 1);
        assert_eq!(resp.data.change.as_deref(), Some("1.5"));
    }
}
