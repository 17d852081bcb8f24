//! Conversions from wire types to domain types for coins.

use super::wire::CoinResponse;
use super::Coin;
use crate::shared::CoinId;

impl From<CoinResponse> for Coin {
    fn from(c: CoinResponse) -> Self {
        Self {
            uuid: CoinId::from(c.uuid),
            symbol: c.symbol,
            name: c.name,
            icon_url: c.icon_url,
            price: c.price.unwrap_or_default(),
            market_cap: c.market_cap,
            change: c.change,
            rank: c.rank,
            sparkline: c
                .sparkline
                .map(|samples| samples.into_iter().map(Option::unwrap_or_default).collect()),
        }
    }
}
