//! Sentiment Analysis API - REST API Layer
//!
//! This crate exposes the sentiment analysis service over HTTP (Axum).
//! Requests flow through a single orchestrator: Redis lookaside cache
//! first, then the classifier, then PostgreSQL append-only history.
//! The cache is an accelerator only - the service stays fully
//! functional with Redis down.

pub mod cache;
pub mod config;
pub mod db;
pub mod error;
pub mod openapi;
pub mod routes;
pub mod services;
pub mod state;
pub mod telemetry;
pub mod traits;
pub mod validation;

// Re-export commonly used types
pub use cache::{CacheClient, CacheConfig, CacheStats};
pub use config::ApiConfig;
pub use db::{DbClient, DbConfig};
pub use error::{ApiError, ApiResult, ErrorCode};
pub use openapi::ApiDoc;
pub use routes::create_api_router;
pub use services::AnalysisService;
pub use state::AppState;
pub use traits::{HistoryStore, ResultCache};
