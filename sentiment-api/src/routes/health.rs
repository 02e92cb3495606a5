//! Health Check Endpoints
//!
//! - `GET /` - Service identity banner (used by the SPA to probe the API)
//! - `GET /health` - Kubernetes-style liveness check
//!
//! Both respond 200 unconditionally: they assert the process is serving,
//! not that the stores are reachable. Store health is visible through
//! `/cache/stats` and request outcomes.

use axum::{response::IntoResponse, Json};
use serde::{Deserialize, Serialize};

/// Service name reported by the banner endpoint.
pub const SERVICE_NAME: &str = "sentiment-api";

// ============================================================================
// TYPES
// ============================================================================

/// Identity banner returned by `GET /`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ServiceInfo {
    pub status: String,
    pub service: String,
    pub version: String,
}

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct HealthBody {
    pub status: String,
}

// ============================================================================
// HANDLERS
// ============================================================================

/// GET / - Service identity banner
#[utoipa::path(
    get,
    path = "/",
    tag = "Health",
    responses(
        (status = 200, description = "Service is healthy", body = ServiceInfo),
    ),
)]
pub async fn root() -> impl IntoResponse {
    Json(ServiceInfo {
        status: "healthy".to_string(),
        service: SERVICE_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// GET /health - Liveness check
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Process is alive", body = HealthBody),
    ),
)]
pub async fn health() -> impl IntoResponse {
    Json(HealthBody {
        status: "ok".to_string(),
    })
}
