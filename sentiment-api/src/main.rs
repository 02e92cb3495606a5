//! Sentiment API Server Entry Point
//!
//! Bootstraps tracing and configuration, applies the database schema,
//! and starts the Axum HTTP server.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use sentiment_api::telemetry::init_tracing;
use sentiment_api::{
    create_api_router, ApiConfig, ApiError, ApiResult, AppState, CacheClient, CacheConfig,
    DbClient, DbConfig,
};
use sentiment_core::LexiconModel;

#[tokio::main]
async fn main() -> ApiResult<()> {
    init_tracing();

    let db_config = DbConfig::from_env();
    let db = DbClient::from_config(&db_config)?;
    db.init_schema().await?;

    // Lazy Redis connections: startup must not depend on cache reachability.
    let cache_config = CacheConfig::from_env();
    let cache = CacheClient::from_config(&cache_config)?;

    let model = Arc::new(LexiconModel::new());
    let state = AppState::new(Arc::new(cache), Arc::new(db), model);

    let api_config = ApiConfig::from_env();
    let app: Router = create_api_router(state, &api_config);

    let addr = resolve_bind_addr()?;
    tracing::info!(%addr, "Starting sentiment API server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| ApiError::internal_error(format!("Failed to bind {}: {}", addr, e)))?;

    let server = axum::serve(listener, app);
    tokio::select! {
        result = server => {
            result.map_err(|e| ApiError::internal_error(format!("Server error: {}", e)))?;
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}

fn resolve_bind_addr() -> ApiResult<SocketAddr> {
    let host = std::env::var("SENTIMENT_API_BIND").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port_str = std::env::var("PORT")
        .ok()
        .or_else(|| std::env::var("SENTIMENT_API_PORT").ok())
        .unwrap_or_else(|| "8000".to_string());
    let port = port_str
        .parse::<u16>()
        .map_err(|_| ApiError::invalid_input(format!("Invalid port value: {}", port_str)))?;

    let addr = format!("{}:{}", host, port);
    addr.parse::<SocketAddr>()
        .map_err(|e| ApiError::invalid_input(format!("Invalid bind address {}: {}", addr, e)))
}
