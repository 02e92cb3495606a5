//! HTTP Route Definitions
//!
//! Assembles the Axum router: the public analysis surface plus the
//! cache admin endpoints, with CORS and request tracing layered on
//! top. All handlers share [`AppState`].

pub mod analyze;
pub mod cache_admin;
pub mod health;
pub mod history;

use std::time::Duration;

use axum::{
    http::{header, HeaderValue, Method},
    routing::{delete, get, post},
    Json, Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::config::ApiConfig;
use crate::state::AppState;

// ============================================================================
// ROUTER
// ============================================================================

/// Create the complete API router.
///
/// Routes:
/// - `GET /` and `GET /health` (service info, liveness)
/// - `POST /analyze` (classify text, cache + persist)
/// - `GET /history` (recent analyses)
/// - `GET /cache/stats`, `DELETE /cache/clear` (cache admin)
/// - `GET /openapi.json` (machine-readable API description)
pub fn create_api_router(state: AppState, api_config: &ApiConfig) -> Router {
    let cors = build_cors_layer(api_config);

    Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::health))
        .route("/analyze", post(analyze::analyze))
        .route("/history", get(history::get_history))
        .route("/cache/stats", get(cache_admin::cache_stats))
        .route("/cache/clear", delete(cache_admin::cache_clear))
        .route(
            "/openapi.json",
            get(|| async { Json(crate::openapi::ApiDoc::openapi()) }),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

// ============================================================================
// CORS LAYER
// ============================================================================

/// Build the CORS layer from ApiConfig.
///
/// In development mode (empty origins), allows all origins.
/// In production mode, only allows configured origins.
fn build_cors_layer(config: &ApiConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .max_age(Duration::from_secs(config.cors_max_age_secs));

    if config.cors_origins.is_empty() {
        // Development mode: allow all origins
        tracing::info!("CORS: Development mode - allowing all origins");
        cors.allow_origin(Any).allow_headers(Any)
    } else {
        // Production mode: only allow configured origins
        tracing::info!(
            "CORS: Production mode - allowing origins: {:?}",
            config.cors_origins
        );
        let origins: Vec<HeaderValue> = config
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();

        cors.allow_origin(origins)
            .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
    }
}
