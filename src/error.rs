// src/error.rs
use std::time::Duration;
use thiserror::Error;

/// Failures of a backend request. None of these reach the user beyond a toast:
/// the loader substitutes synthetic data and carries on.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(String),

    #[error("request timed out after {}s", .0.as_secs_f32())]
    Timeout(Duration),

    #[error("HTTP error! status: {0}")]
    Status(u16),

    #[error("malformed response: {0}")]
    Malformed(String),
}

impl FetchError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, FetchError::Timeout(_))
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Malformed(err.to_string())
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Network(err.to_string())
    }
}

#[derive(Error, Debug)]
#[error("clipboard write rejected: {0}")]
pub struct ClipboardError(pub String);

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode store: {0}")]
    Encode(#[from] ron::Error),

    #[error("failed to parse store: {0}")]
    Parse(#[from] ron::error::SpannedError),
}
