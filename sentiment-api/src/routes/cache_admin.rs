//! Cache Admin Endpoints
//!
//! Operational visibility into the lookaside cache. Both endpoints
//! answer 200 whether or not Redis is reachable; degraded state is
//! reported in the body, never as an error status.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::cache::CacheStats;
use crate::state::AppState;

// ============================================================================
// TYPES
// ============================================================================

/// Simple message envelope for admin actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

// ============================================================================
// HANDLERS
// ============================================================================

/// GET /cache/stats - Cache health and hit-rate counters
#[utoipa::path(
    get,
    path = "/cache/stats",
    tag = "Cache",
    responses(
        (status = 200, description = "Cache statistics", body = CacheStats),
    ),
)]
pub async fn cache_stats(State(state): State<AppState>) -> Json<CacheStats> {
    Json(state.cache.stats().await)
}

/// DELETE /cache/clear - Drop every cached analysis
#[utoipa::path(
    delete,
    path = "/cache/clear",
    tag = "Cache",
    responses(
        (status = 200, description = "Clear outcome", body = MessageResponse),
    ),
)]
pub async fn cache_clear(State(state): State<AppState>) -> Json<MessageResponse> {
    let message = if state.cache.clear().await {
        "Cache cleared successfully"
    } else {
        "Failed to clear cache"
    };

    Json(MessageResponse {
        message: message.to_string(),
    })
}
