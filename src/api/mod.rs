// src/api/mod.rs
use async_trait::async_trait;

use crate::error::FetchError;
use crate::model::{AnalysisSnapshot, UpdateResponse};

pub mod http;

pub use http::HttpAnalysisClient;

/// The backend the dashboard reads from. Each call is bounded by its own
/// deadline; an expired deadline surfaces as [`FetchError::Timeout`].
#[async_trait]
pub trait AnalysisSource: Send + Sync {
    async fn fetch_analysis(&self) -> Result<AnalysisSnapshot, FetchError>;
    async fn request_update(&self) -> Result<UpdateResponse, FetchError>;
}
