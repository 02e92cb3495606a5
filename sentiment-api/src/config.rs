//! API Configuration Module
//!
//! CORS and bind settings loaded from environment variables with
//! development defaults. Store-specific configuration lives next to its
//! gateway (`DbConfig` in `db.rs`, `CacheConfig` in `cache.rs`).

/// API configuration for CORS and serving.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Allowed CORS origins (comma-separated in env var).
    /// Empty means allow all origins (dev mode, browser SPA on localhost).
    pub cors_origins: Vec<String>,

    /// Max age for CORS preflight cache in seconds.
    pub cors_max_age_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            cors_origins: Vec::new(), // Empty = allow all
            cors_max_age_secs: 86400, // 24 hours
        }
    }
}

impl ApiConfig {
    /// Create ApiConfig from environment variables.
    ///
    /// Environment variables:
    /// - `SENTIMENT_CORS_ORIGINS`: Comma-separated allowed origins (empty = allow all)
    /// - `SENTIMENT_CORS_MAX_AGE_SECS`: Preflight cache duration (default: 86400)
    pub fn from_env() -> Self {
        let cors_origins = std::env::var("SENTIMENT_CORS_ORIGINS")
            .ok()
            .map(|s| {
                s.split(',')
                    .map(|o| o.trim().to_string())
                    .filter(|o| !o.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        let cors_max_age_secs = std::env::var("SENTIMENT_CORS_MAX_AGE_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(86400);

        Self {
            cors_origins,
            cors_max_age_secs,
        }
    }

    /// Check if running with a restricted origin list (production mode).
    pub fn is_production(&self) -> bool {
        !self.cors_origins.is_empty()
    }
}
