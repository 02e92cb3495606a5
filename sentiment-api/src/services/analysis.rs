//! Analysis Orchestrator
//!
//! The cache-then-compute-then-persist flow behind POST /analyze:
//! derive key, check the cache, on a miss run the model, persist the row,
//! populate the cache, respond. Cache failures degrade silently; model and
//! persistence failures fail the request.

use std::sync::Arc;
use std::time::Instant;

use sentiment_core::{
    round_confidence, AnalysisResult, CachedAnalysis, SentimentModel,
};

use crate::error::ApiResult;
use crate::traits::{HistoryStore, ResultCache};

/// Characters of input text echoed into log lines.
const LOG_PREVIEW_CHARS: usize = 50;

/// Per-request orchestration over the two gateways and the model.
///
/// Holds no state beyond the injected handles; every request is independent,
/// so concurrent requests for the same text may duplicate work. That is
/// accepted: the cache is a best-effort lookaside, not a deduplication
/// barrier.
pub struct AnalysisService {
    cache: Arc<dyn ResultCache>,
    history: Arc<dyn HistoryStore>,
    model: Arc<dyn SentimentModel>,
}

impl AnalysisService {
    pub fn new(
        cache: Arc<dyn ResultCache>,
        history: Arc<dyn HistoryStore>,
        model: Arc<dyn SentimentModel>,
    ) -> Self {
        Self {
            cache,
            history,
            model,
        }
    }

    /// Analyze one already-validated text.
    ///
    /// On a cache hit, `processing_time_ms` reports the elapsed time of THIS
    /// request (the cheap lookup path), not the original computation's
    /// latency; the response shows true per-request cost.
    pub async fn analyze(&self, text: &str) -> ApiResult<AnalysisResult> {
        let started = Instant::now();

        if let Some(entry) = self.cache.lookup(text).await {
            tracing::debug!(text = %preview(text), "Cache HIT");
            return Ok(AnalysisResult {
                text: entry.text,
                sentiment: entry.sentiment,
                confidence: entry.confidence,
                processing_time_ms: elapsed_ms(started),
                cached: true,
            });
        }

        tracing::debug!(text = %preview(text), "Cache MISS");

        let prediction = self.model.classify(text).map_err(|e| {
            tracing::error!(error = %e, "Model invocation failed");
            crate::error::ApiError::from(e)
        })?;

        let confidence = round_confidence(prediction.confidence);
        let processing_time_ms = elapsed_ms(started);

        // Persistence is hard-fail: an unpersisted result must not reach the
        // cache or the client.
        let record = self
            .history
            .append(text, prediction.label, confidence, processing_time_ms)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to persist analysis result");
                e
            })?;

        let result = AnalysisResult {
            text: record.text,
            sentiment: record.sentiment,
            confidence: record.confidence,
            processing_time_ms: record.processing_time_ms,
            cached: false,
        };

        if !self.cache.store(text, &CachedAnalysis::from_result(&result)).await {
            tracing::warn!(text = %preview(text), "Cache population failed; response unaffected");
        }

        Ok(result)
    }
}

fn elapsed_ms(started: Instant) -> i64 {
    started.elapsed().as_millis() as i64
}

fn preview(text: &str) -> String {
    text.chars().take(LOG_PREVIEW_CHARS).collect()
}

// =============================================================================
// TESTS
// =============================================================================
