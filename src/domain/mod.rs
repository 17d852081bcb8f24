//! Domain modules organized as vertical slices.
//!
//! Each sub-module contains:
//! - `mod.rs` — Rich domain types with derived, display-ready values
//! - `wire.rs` — Raw serde structs matching backend responses
//! - `convert.rs` — `From` conversions from wire to domain types
//! - `state.rs` — Pure state containers with update methods
//! - `client.rs` — Sub-client with HTTP methods

pub mod catalog;
pub mod coin;
pub mod history;

use serde::{Deserialize, Serialize};

/// Response envelope shared by every CoinRanking endpoint: `{status, data}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub status: String,
    pub data: T,
}
