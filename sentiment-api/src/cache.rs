//! Redis Cache Gateway
//!
//! Lookaside cache for analysis results. Every operation is fail-soft: a
//! Redis failure degrades to a miss or a failed write and is logged, never
//! surfaced to the caller. The gateway itself is stateless; a connection is
//! obtained per call and all state lives in the external store.

use std::time::Duration;

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;
use serde::{Deserialize, Serialize};

use sentiment_core::{derive_key, CachedAnalysis, CACHE_KEY_NAMESPACE};

use crate::error::{ApiError, ApiResult};
use crate::traits::ResultCache;

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Fixed lifetime of every cache entry.
pub const CACHE_TTL_SECS: u64 = 3600;

/// Cache store configuration.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Redis connection string
    pub url: String,
    /// Per-command response timeout
    pub response_timeout: Duration,
    /// Timeout for establishing a connection
    pub connection_timeout: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            // Local-development fallback; docker-compose sets REDIS_URL.
            url: "redis://localhost:6379".to_string(),
            response_timeout: Duration::from_secs(2),
            connection_timeout: Duration::from_secs(2),
        }
    }
}

impl CacheConfig {
    /// Create a cache configuration from environment variables.
    ///
    /// Environment variables:
    /// - `REDIS_URL`: Redis connection string
    /// - `SENTIMENT_CACHE_TIMEOUT_MS`: Per-command timeout (default: 2000)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let timeout = std::env::var("SENTIMENT_CACHE_TIMEOUT_MS")
            .ok()
            .and_then(|s| s.parse().ok())
            .map(Duration::from_millis);
        Self {
            url: std::env::var("REDIS_URL").unwrap_or(defaults.url),
            response_timeout: timeout.unwrap_or(defaults.response_timeout),
            connection_timeout: timeout.unwrap_or(defaults.connection_timeout),
        }
    }
}

// ============================================================================
// CACHE STATS
// ============================================================================

/// Aggregated cache counters for the stats surface.
///
/// `status` is `"connected"` with the counter fields populated, or
/// `"error"` with only `error` set; the HTTP layer returns 200 either way so
/// only this body exposes cache health.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CacheStats {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_keys: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sentiment_keys: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory_used_mb: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hits: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub misses: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hit_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CacheStats {
    /// Stats for a reachable store.
    pub fn connected(
        total_keys: i64,
        sentiment_keys: i64,
        used_memory_bytes: u64,
        hits: i64,
        misses: i64,
    ) -> Self {
        Self {
            status: "connected".to_string(),
            total_keys: Some(total_keys),
            sentiment_keys: Some(sentiment_keys),
            memory_used_mb: Some(round2(used_memory_bytes as f64 / 1024.0 / 1024.0)),
            hits: Some(hits),
            misses: Some(misses),
            hit_rate: Some(Self::hit_rate(hits, misses)),
            error: None,
        }
    }

    /// Stats for an unreachable store.
    pub fn unavailable(error: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            total_keys: None,
            sentiment_keys: None,
            memory_used_mb: None,
            hits: None,
            misses: None,
            hit_rate: None,
            error: Some(error.into()),
        }
    }

    /// Hit rate percentage, rounded to 2 decimals.
    ///
    /// The denominator floor avoids division by zero before any traffic.
    pub fn hit_rate(hits: i64, misses: i64) -> f64 {
        round2(hits as f64 / (hits + misses).max(1) as f64 * 100.0)
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// ============================================================================
// CACHE CLIENT
// ============================================================================

/// Cache gateway over Redis.
#[derive(Clone)]
pub struct CacheClient {
    client: redis::Client,
    response_timeout: Duration,
    connection_timeout: Duration,
}

impl CacheClient {
    /// Create a cache client from configuration.
    ///
    /// Only validates the URL; no connection is made until the first
    /// operation, so the service starts even when Redis is down.
    pub fn from_config(config: &CacheConfig) -> ApiResult<Self> {
        let client = redis::Client::open(config.url.as_str())
            .map_err(|e| ApiError::invalid_input(format!("Invalid Redis URL: {}", e)))?;

        Ok(Self {
            client,
            response_timeout: config.response_timeout,
            connection_timeout: config.connection_timeout,
        })
    }

    async fn connection(&self) -> redis::RedisResult<MultiplexedConnection> {
        self.client
            .get_multiplexed_async_connection_with_timeouts(
                self.response_timeout,
                self.connection_timeout,
            )
            .await
    }

    async fn read_key(&self, key: &str) -> redis::RedisResult<Option<String>> {
        let mut con = self.connection().await?;
        con.get(key).await
    }

    async fn write_key(&self, key: &str, payload: &str) -> redis::RedisResult<()> {
        let mut con = self.connection().await?;
        con.set_ex(key, payload, CACHE_TTL_SECS).await
    }

    /// Enumerate every key under the service namespace.
    ///
    /// Uses SCAN rather than KEYS so a shared store is never blocked.
    async fn namespaced_keys(con: &mut MultiplexedConnection) -> redis::RedisResult<Vec<String>> {
        let pattern = format!("{}*", CACHE_KEY_NAMESPACE);
        let mut keys = Vec::new();
        let mut iter: redis::AsyncIter<'_, String> = con.scan_match(pattern).await?;
        while let Some(key) = iter.next_item().await {
            keys.push(key);
        }
        Ok(keys)
    }

    async fn collect_stats(&self) -> redis::RedisResult<CacheStats> {
        let mut con = self.connection().await?;

        let total_keys: i64 = redis::cmd("DBSIZE").query_async(&mut con).await?;
        let memory: redis::InfoDict = redis::cmd("INFO")
            .arg("memory")
            .query_async(&mut con)
            .await?;
        let stats: redis::InfoDict = redis::cmd("INFO")
            .arg("stats")
            .query_async(&mut con)
            .await?;

        let sentiment_keys = Self::namespaced_keys(&mut con).await?.len() as i64;

        let used_memory: u64 = memory.get("used_memory").unwrap_or(0);
        let hits: i64 = stats.get("keyspace_hits").unwrap_or(0);
        let misses: i64 = stats.get("keyspace_misses").unwrap_or(0);

        Ok(CacheStats::connected(
            total_keys,
            sentiment_keys,
            used_memory,
            hits,
            misses,
        ))
    }

    async fn delete_namespace(&self) -> redis::RedisResult<usize> {
        let mut con = self.connection().await?;
        let keys = Self::namespaced_keys(&mut con).await?;
        if keys.is_empty() {
            return Ok(0);
        }
        let _: () = con.del(&keys).await?;
        Ok(keys.len())
    }
}

#[async_trait]
impl ResultCache for CacheClient {
    async fn lookup(&self, text: &str) -> Option<CachedAnalysis> {
        let key = derive_key(text);

        let payload = match self.read_key(&key).await {
            Ok(payload) => payload?,
            Err(e) => {
                tracing::warn!(error = %e, "Cache lookup failed; treating as miss");
                return None;
            }
        };

        match serde_json::from_str::<CachedAnalysis>(&payload) {
            Ok(entry) if entry.is_current() => Some(entry),
            Ok(entry) => {
                tracing::warn!(
                    schema_version = entry.schema_version,
                    "Cached payload has stale schema; treating as miss"
                );
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, "Malformed cached payload; treating as miss");
                None
            }
        }
    }

    async fn store(&self, text: &str, entry: &CachedAnalysis) -> bool {
        let key = derive_key(text);

        let payload = match serde_json::to_string(entry) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to serialize cache payload");
                return false;
            }
        };

        match self.write_key(&key, &payload).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "Cache write failed");
                false
            }
        }
    }

    async fn stats(&self) -> CacheStats {
        match self.collect_stats().await {
            Ok(stats) => stats,
            Err(e) => {
                tracing::warn!(error = %e, "Cache stats unavailable");
                CacheStats::unavailable(e.to_string())
            }
        }
    }

    async fn clear(&self) -> bool {
        match self.delete_namespace().await {
            Ok(deleted) => {
                tracing::info!(deleted, "Cleared sentiment cache entries");
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "Cache clear failed");
                false
            }
        }
    }
}
