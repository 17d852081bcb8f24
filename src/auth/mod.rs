//! Authentication — CoinRanking API key and where it comes from.
//!
//! ## Resolution order
//!
//! 1. `COINRANKING_API_KEY` environment variable
//! 2. The key the embedding app bundles, passed to the builder
//! 3. A local secrets file in dotenv format (`COINRANKING_API_KEY=...`)
//!
//! The first non-empty value wins. With no key, requests go out without the
//! `x-access-token` header and the backend applies its anonymous rate limit.
//!
//! The key is never logged: `Debug` redacts it and there is no `Display`.

use std::path::Path;

/// Name of the environment variable and of the secrets-file entry.
pub const API_KEY_ENV: &str = "COINRANKING_API_KEY";

/// A CoinRanking API key.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into().trim().to_string())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ApiKey(****)")
    }
}

/// Where a resolved key came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiKeySource {
    Environment,
    Bundled,
    SecretsFile,
}

/// Resolve the API key from the process environment, the bundled value and
/// the secrets file, in that order.
pub fn resolve_api_key(
    bundled: Option<&str>,
    secrets_file: Option<&Path>,
) -> Option<(ApiKey, ApiKeySource)> {
    let env_value = std::env::var(API_KEY_ENV).ok();
    resolve_from(env_value.as_deref(), bundled, secrets_file)
}

/// [`resolve_api_key`] with the environment value passed in.
pub fn resolve_from(
    env_value: Option<&str>,
    bundled: Option<&str>,
    secrets_file: Option<&Path>,
) -> Option<(ApiKey, ApiKeySource)> {
    let candidate = |raw: Option<&str>| raw.map(ApiKey::new).filter(|k| !k.is_empty());

    if let Some(key) = candidate(env_value) {
        return Some((key, ApiKeySource::Environment));
    }
    if let Some(key) = candidate(bundled) {
        return Some((key, ApiKeySource::Bundled));
    }
    let from_file = secrets_file.and_then(read_secrets_file);
    candidate(from_file.as_deref()).map(|key| (key, ApiKeySource::SecretsFile))
}

fn read_secrets_file(path: &Path) -> Option<String> {
    let iter = match dotenvy::from_path_iter(path) {
        Ok(iter) => iter,
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "No readable secrets file");
            return None;
        }
    };

    for item in iter {
        match item {
            Ok((name, value)) if name == API_KEY_ENV => return Some(value),
            Ok(_) => {}
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Malformed secrets file");
                return None;
            }
        }
    }
    None
}
