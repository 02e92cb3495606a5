//! Sentiment Core - Domain Types
//!
//! Pure data structures plus the small pure helpers the service is built on:
//! cache key derivation and the built-in lexicon model. No I/O lives here;
//! the API crate supplies the gateways.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

pub mod error;
pub mod keys;
pub mod model;

pub use error::{ModelError, ParseLabelError};
pub use keys::{derive_key, CACHE_KEY_NAMESPACE};
pub use model::{LexiconModel, Prediction, SentimentModel};

// ============================================================================
// IDENTITY TYPES
// ============================================================================

/// Timestamp type using UTC timezone.
pub type Timestamp = DateTime<Utc>;

/// Minimum accepted input length in Unicode code points.
pub const TEXT_MIN_CHARS: usize = 1;

/// Maximum accepted input length in Unicode code points.
pub const TEXT_MAX_CHARS: usize = 512;

// ============================================================================
// SENTIMENT LABEL
// ============================================================================

/// Classification label produced by the model.
///
/// Serialized upper-case on the wire (`"POSITIVE"` / `"NEGATIVE"`) to match
/// the service's JSON contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "UPPERCASE")]
pub enum SentimentLabel {
    Positive,
    Negative,
}

impl SentimentLabel {
    /// Wire/storage representation of the label.
    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "POSITIVE",
            SentimentLabel::Negative => "NEGATIVE",
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SentimentLabel {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "POSITIVE" => Ok(SentimentLabel::Positive),
            "NEGATIVE" => Ok(SentimentLabel::Negative),
            other => Err(ParseLabelError(other.to_string())),
        }
    }
}

// ============================================================================
// ANALYSIS RESULT
// ============================================================================

/// One completed analysis as returned to the client.
///
/// Immutable once constructed. `cached` is set by the orchestrator and is
/// never part of the cached payload's identity (see [`CachedAnalysis`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AnalysisResult {
    /// The analyzed input text.
    pub text: String,
    /// Classification label.
    pub sentiment: SentimentLabel,
    /// Model confidence in `[0, 1]`, rounded to 4 decimal places.
    pub confidence: f64,
    /// Elapsed time of the request that produced this response.
    pub processing_time_ms: i64,
    /// Whether the result was served from the lookaside cache.
    pub cached: bool,
}

// ============================================================================
// HISTORY RECORD
// ============================================================================

/// One persisted analysis row.
///
/// Append-only: records are created exactly once per cache-miss analysis and
/// never updated or deleted by this service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct HistoryRecord {
    /// Database-assigned surrogate key.
    pub id: i64,
    pub text: String,
    pub sentiment: SentimentLabel,
    pub confidence: f64,
    pub processing_time_ms: i64,
    /// Assigned server-side at insert time.
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// CACHE PAYLOAD
// ============================================================================

/// Current schema version of cache payloads.
///
/// Bump this whenever the payload shape changes; readers treat any other
/// version as a cache miss, so old entries age out via TTL instead of
/// breaking deserialization downstream.
pub const CACHE_SCHEMA_VERSION: u32 = 1;

/// JSON payload stored in the key-value cache.
///
/// Deliberately a separate type from [`AnalysisResult`]: the cached schema is
/// explicit and versioned rather than implicitly identical to the wire
/// response. `cached` and per-request timing are orchestrator concerns and do
/// not appear here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedAnalysis {
    pub schema_version: u32,
    pub text: String,
    pub sentiment: SentimentLabel,
    pub confidence: f64,
    /// Elapsed time of the original (cache-miss) computation.
    pub processing_time_ms: i64,
}

impl CachedAnalysis {
    /// Build a cache payload from a freshly computed result.
    pub fn from_result(result: &AnalysisResult) -> Self {
        Self {
            schema_version: CACHE_SCHEMA_VERSION,
            text: result.text.clone(),
            sentiment: result.sentiment,
            confidence: result.confidence,
            processing_time_ms: result.processing_time_ms,
        }
    }

    /// Whether this payload was written by the current schema.
    pub fn is_current(&self) -> bool {
        self.schema_version == CACHE_SCHEMA_VERSION
    }
}

// ============================================================================
// CONFIDENCE ROUNDING
// ============================================================================

/// Round a raw model confidence to 4 decimal digits.
///
/// Applied before storage and caching so cached and freshly computed results
/// are bit-comparable after parsing.
pub fn round_confidence(raw: f64) -> f64 {
    (raw * 10_000.0).round() / 10_000.0
}
