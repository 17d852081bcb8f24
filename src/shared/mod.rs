//! Shared newtypes and utilities used across all domain modules.
//!
//! These types are serialization-transparent: they serialize/deserialize identically
//! to the raw format the backend sends, so they can be used directly in wire types
//! without conversion overhead.

pub mod fmt;
pub mod serde_util;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

// ─── CoinId ──────────────────────────────────────────────────────────────────

/// Newtype for CoinRanking coin identifiers (e.g. `"Qwsogvtv82FCd"`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CoinId(String);

impl CoinId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for CoinId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CoinId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for CoinId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<str> for CoinId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for CoinId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for CoinId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(CoinId(s))
    }
}

// ─── TimePeriod ──────────────────────────────────────────────────────────────

/// Time window of a price history query (`timePeriod` query parameter).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimePeriod {
    #[serde(rename = "1h")]
    Hour1,
    #[serde(rename = "3h")]
    Hour3,
    #[serde(rename = "12h")]
    Hour12,
    #[default]
    #[serde(rename = "24h")]
    Day1,
    #[serde(rename = "7d")]
    Day7,
    #[serde(rename = "30d")]
    Day30,
    #[serde(rename = "3m")]
    Month3,
    #[serde(rename = "1y")]
    Year1,
    #[serde(rename = "3y")]
    Year3,
    #[serde(rename = "5y")]
    Year5,
}

impl TimePeriod {
    /// Periods offered by the detail screen's picker.
    pub const PICKER: [TimePeriod; 3] = [TimePeriod::Day1, TimePeriod::Day7, TimePeriod::Day30];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hour1 => "1h",
            Self::Hour3 => "3h",
            Self::Hour12 => "12h",
            Self::Day1 => "24h",
            Self::Day7 => "7d",
            Self::Day30 => "30d",
            Self::Month3 => "3m",
            Self::Year1 => "1y",
            Self::Year3 => "3y",
            Self::Year5 => "5y",
        }
    }

    /// Short uppercase label, e.g. `"24H"`.
    pub fn label(&self) -> String {
        self.as_str().to_uppercase()
    }
}

impl std::fmt::Display for TimePeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TimePeriod {
    type Err = crate::error::SdkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1h" => Ok(Self::Hour1),
            "3h" => Ok(Self::Hour3),
            "12h" => Ok(Self::Hour12),
            "24h" => Ok(Self::Day1),
            "7d" => Ok(Self::Day7),
            "30d" => Ok(Self::Day30),
            "3m" => Ok(Self::Month3),
            "1y" => Ok(Self::Year1),
            "3y" => Ok(Self::Year3),
            "5y" => Ok(Self::Year5),
            other => Err(crate::error::SdkError::Validation(format!(
                "Unknown time period: {other}"
            ))),
        }
    }
}

// ─── Utilities ───────────────────────────────────────────────────────────────

/// Parse a numeric string the way the backend's string-encoded numbers need it.
///
/// Anything that is not a finite number (empty, garbage, `"NaN"`, `"inf"`)
/// becomes `0.0`. The UI relies on this fallback.
pub fn parse_lenient(raw: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => 0.0,
    }
}

/// [`parse_lenient`] for optional fields; `None` is `0.0`.
pub fn parse_lenient_opt(raw: Option<&str>) -> f64 {
    raw.map(parse_lenient).unwrap_or(0.0)
}
