//! Custom serde helpers for backend wire formats.

/// Deserializes a string-encoded number that may also arrive as a JSON number
/// or `null` into `Option<String>`.
///
/// CoinRanking sends prices as strings, but `null` shows up for delisted
/// coins and some history samples. Numbers are kept in their textual form so
/// the lenient parse in [`crate::shared::parse_lenient`] stays the only place
/// that interprets them. Use with `#[serde(default, deserialize_with = ...)]`.
pub mod lenient_string {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Str(String),
        Num(serde_json::Number),
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<Raw>::deserialize(deserializer)? {
            Some(Raw::Str(s)) => Some(s),
            Some(Raw::Num(n)) => Some(n.to_string()),
            None => None,
        })
    }
}
