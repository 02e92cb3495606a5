//! OpenAPI Specification for the Sentiment Analysis API
//!
//! Generates the OpenAPI document from route annotations and schema
//! derives via utoipa, served at `GET /openapi.json`.

use utoipa::OpenApi;

use sentiment_core::{AnalysisResult, SentimentLabel};

use crate::cache::CacheStats;
use crate::error::{ErrorBody, ErrorCode};
use crate::routes::{analyze, cache_admin, health, history};
use crate::routes::{
    analyze::AnalyzeRequest,
    cache_admin::MessageResponse,
    health::{HealthBody, ServiceInfo},
    history::{HistoryItem, HistoryResponse},
};

/// OpenAPI document for the sentiment service.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Sentiment Analysis API",
        version = "1.0.0",
        description = "Text sentiment classification with Redis caching and PostgreSQL history",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:8000", description = "Local Development")
    ),
    tags(
        (name = "Health", description = "Service info and liveness"),
        (name = "Analysis", description = "Sentiment classification"),
        (name = "History", description = "Persisted analysis history"),
        (name = "Cache", description = "Cache statistics and administration")
    ),
    paths(
        health::root,
        health::health,
        analyze::analyze,
        history::get_history,
        cache_admin::cache_stats,
        cache_admin::cache_clear,
    ),
    components(schemas(
        AnalyzeRequest,
        AnalysisResult,
        SentimentLabel,
        HistoryItem,
        HistoryResponse,
        CacheStats,
        MessageResponse,
        ServiceInfo,
        HealthBody,
        ErrorBody,
        ErrorCode,
    ))
)]
pub struct ApiDoc;
