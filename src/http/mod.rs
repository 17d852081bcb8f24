//! HTTP client layer — `CoinRankingHttp`, the single-attempt request gateway.

pub mod client;

pub use client::CoinRankingHttp;
