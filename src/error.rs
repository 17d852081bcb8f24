//! Unified SDK error types.

use thiserror::Error;

/// Top-level SDK error.
#[derive(Error, Debug)]
pub enum SdkError {
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

/// Gateway errors. Every failed request maps to exactly one of these.
#[derive(Error, Debug)]
pub enum HttpError {
    /// The endpoint URL could not be formed from the given inputs.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// No well-formed HTTP response came back (connect, TLS, body read).
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Server returned {status}")]
    ServerError { status: u16, body: String },

    #[error("Decoding error: {0}")]
    DecodingError(String),
}

impl HttpError {
    pub fn status(&self) -> Option<u16> {
        match self {
            HttpError::ServerError { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Local key-value storage errors.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corrupt storage entry: {0}")]
    Corrupt(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_error_message_includes_status() {
        let err = HttpError::ServerError {
            status: 503,
            body: "unavailable".to_string(),
        };
        assert_eq!(err.to_string(), "Server returned 503");
        assert_eq!(err.status(), Some(503));
    }

    #[test]
    fn test_sdk_error_wraps_http_error() {
        let err: SdkError = HttpError::DecodingError("missing field `data`".to_string()).into();
        assert!(matches!(err, SdkError::Http(HttpError::DecodingError(_))));
        assert_eq!(
            err.to_string(),
            "HTTP error: Decoding error: missing field `data`"
        );
    }
}
