//! Tracing initialization
//!
//! Structured logging via tracing-subscriber with environment-driven
//! filtering. Set `SENTIMENT_LOG_JSON=true` for machine-readable output in
//! containerized deployments.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the global tracing subscriber.
///
/// Call once at startup before any tracing occurs. The filter honors
/// `RUST_LOG` and defaults to debug for this crate, info elsewhere.
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("sentiment_api=debug,tower_http=debug,info"));

    let json_output = std::env::var("SENTIMENT_LOG_JSON")
        .map(|s| s == "true" || s == "1")
        .unwrap_or(false);

    if json_output {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}
