//! Integration tests against the live CoinRanking API.
//!
//! All tests are `#[ignore]` because they require network access. Set
//! `COINRANKING_API_KEY` to avoid the anonymous rate limit.
//!
//! Run with:
//! ```bash
//! cargo test --test api_integration -- --ignored
//! ```

use std::time::Duration;

use cryptotracker_sdk::prelude::*;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Bitcoin on CoinRanking.
const BTC_UUID: &str = "Qwsogvtv82FCd";

fn live_client() -> CoinTrackerClient {
    let _ = dotenvy::dotenv();
    CoinTrackerClient::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .expect("client should build")
}

#[tokio::test]
#[ignore]
async fn first_page_is_rank_ordered() {
    let client = live_client();
    let coins = client.coins().page(1).await.expect("first page");

    assert_eq!(coins.len(), 20);
    let ranks: Vec<u32> = coins.iter().map(|c| c.rank).collect();
    let mut sorted = ranks.clone();
    sorted.sort();
    assert_eq!(ranks, sorted, "page should be rank ordered");
}

#[tokio::test]
#[ignore]
async fn bitcoin_history_for_picker_periods() {
    let client = live_client();
    let id = CoinId::from(BTC_UUID);

    for period in TimePeriod::PICKER {
        let series = client
            .history()
            .series(&id, period)
            .await
            .unwrap_or_else(|e| panic!("history for {period}: {e}"));
        assert!(!series.points.is_empty(), "no samples for {period}");
        assert!(series
            .points
            .windows(2)
            .all(|w| w[0].timestamp <= w[1].timestamp));
    }
}

#[tokio::test]
#[ignore]
async fn list_controller_loads_two_pages() {
    let list = CoinListController::new(live_client());
    assert!(list.request_next_page(true).await);
    assert!(list.request_next_page(false).await);

    let snap = list.snapshot();
    assert_eq!(snap.load_state, LoadState::Idle, "load state: {:?}", snap.load_state);
    assert_eq!(snap.coins.len(), 40);
    assert_eq!(list.current_page().await, 3);
}
