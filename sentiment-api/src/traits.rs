//! Gateway traits
//!
//! The orchestrator talks to the cache and the database through these traits
//! so tests can substitute in-memory fakes without patching global state.
//!
//! The fail-soft/hard-fail split is part of the contract, not an accident of
//! which function catches errors: [`ResultCache`] methods cannot fail from
//! the caller's point of view (they return `Option`/`bool` and absorb store
//! errors internally), while [`HistoryStore`] methods return `ApiResult` and
//! propagate failures, because silently losing the audit trail is
//! unacceptable even though losing the cache is tolerable.

use async_trait::async_trait;
use sentiment_core::{CachedAnalysis, HistoryRecord, SentimentLabel};

use crate::cache::CacheStats;
use crate::error::ApiResult;

/// Lookaside cache over the key-value store. Fail-soft by contract.
#[async_trait]
pub trait ResultCache: Send + Sync {
    /// Look up a previously cached analysis for this exact text.
    ///
    /// Returns `None` on a miss, on any store-communication failure, and on
    /// any payload that fails to deserialize or carries a stale schema
    /// version. Absence is never an error.
    async fn lookup(&self, text: &str) -> Option<CachedAnalysis>;

    /// Store an analysis under the derived key with the fixed TTL.
    ///
    /// Returns `false` (and logs) on failure; never raises.
    async fn store(&self, text: &str, entry: &CachedAnalysis) -> bool;

    /// Aggregate store-level counters. On store failure the returned stats
    /// carry `status: "error"` instead of raising.
    async fn stats(&self) -> CacheStats;

    /// Delete every key under the service's namespace prefix.
    ///
    /// Deleting zero keys is a successful no-op.
    async fn clear(&self) -> bool;
}

/// Append-only persistence of analysis results. Hard-fail by contract.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Insert one result row, durably committed before returning.
    ///
    /// `id` and `created_at` are assigned server-side.
    async fn append(
        &self,
        text: &str,
        sentiment: SentimentLabel,
        confidence: f64,
        processing_time_ms: i64,
    ) -> ApiResult<HistoryRecord>;

    /// Return the full row count plus the `limit` most recent rows, ordered
    /// by `created_at` descending with ties broken by `id` descending.
    async fn list_recent(&self, limit: i64) -> ApiResult<(i64, Vec<HistoryRecord>)>;

    /// Connectivity probe for the readiness surface.
    async fn health_check(&self) -> ApiResult<()>;
}
