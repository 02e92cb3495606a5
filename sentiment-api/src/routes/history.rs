//! History Endpoint
//!
//! `GET /history?limit=<int>` - recent analyses from the persistence
//! gateway, newest first. `total` always reflects the full row count.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use chrono::{DateTime, Utc};
use sentiment_core::{HistoryRecord, SentimentLabel};

use crate::error::{ApiError, ApiResult, ErrorBody};
use crate::state::AppState;
use crate::validation::ValidateRange;

/// Rows returned when no `limit` is given.
pub const DEFAULT_HISTORY_LIMIT: i64 = 10;

// ============================================================================
// TYPES
// ============================================================================

/// Query parameters for `GET /history`.
///
/// `limit` is extracted as a raw string so a non-numeric value yields a 422
/// with field-level detail rather than the extractor's generic 400.
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<String>,
}

impl HistoryQuery {
    fn limit(&self) -> ApiResult<i64> {
        match &self.limit {
            None => Ok(DEFAULT_HISTORY_LIMIT),
            Some(raw) => raw
                .parse::<i64>()
                .map_err(|_| ApiError::invalid_input(format!("Invalid limit value: {}", raw))),
        }
    }
}

/// One history entry on the wire. `created_at` serializes as RFC 3339.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct HistoryItem {
    pub id: i64,
    pub text: String,
    pub sentiment: SentimentLabel,
    pub confidence: f64,
    pub processing_time_ms: i64,
    pub created_at: DateTime<Utc>,
}

impl From<HistoryRecord> for HistoryItem {
    fn from(record: HistoryRecord) -> Self {
        Self {
            id: record.id,
            text: record.text,
            sentiment: record.sentiment,
            confidence: record.confidence,
            processing_time_ms: record.processing_time_ms,
            created_at: record.created_at,
        }
    }
}

/// Body of `GET /history`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct HistoryResponse {
    /// Full row count, regardless of `limit`.
    pub total: i64,
    pub analyses: Vec<HistoryItem>,
}

// ============================================================================
// HANDLERS
// ============================================================================

/// GET /history - Recent analyses, newest first
#[utoipa::path(
    get,
    path = "/history",
    tag = "History",
    params(
        ("limit" = Option<i64>, Query, description = "Maximum number of results (default 10)"),
    ),
    responses(
        (status = 200, description = "Analysis history", body = HistoryResponse),
        (status = 422, description = "Invalid limit", body = ErrorBody),
        (status = 500, description = "Persistence failure", body = ErrorBody),
    ),
)]
pub async fn get_history(
    State(state): State<AppState>,
    Query(params): Query<HistoryQuery>,
) -> ApiResult<Json<HistoryResponse>> {
    let limit = params.limit()?;
    limit.validate_positive("limit")?;

    let (total, records) = state.history.list_recent(limit).await?;

    Ok(Json(HistoryResponse {
        total,
        analyses: records.into_iter().map(HistoryItem::from).collect(),
    }))
}
