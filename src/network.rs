//! Network constants for the CoinRanking REST API.

/// Default REST API base URL.
pub const DEFAULT_API_URL: &str = "https://api.coinranking.com/v2";

/// Header carrying the API key. Omitted when no key is configured.
pub const ACCESS_TOKEN_HEADER: &str = "x-access-token";

/// Page size used by the coin list when none is given.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Page size of the single request backing the favorites screen.
pub const FAVORITES_FETCH_LIMIT: u32 = 100;
