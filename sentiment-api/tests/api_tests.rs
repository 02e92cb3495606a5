//! HTTP-level tests for the full router.
//!
//! Drives the real handlers and orchestrator over in-memory gateway fakes,
//! so every assertion covers the same code path a live request takes minus
//! the network, Redis, and Postgres.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use chrono::{Duration, TimeZone, Utc};
use serde_json::{json, Value};
use tower::ServiceExt;

use sentiment_api::cache::CacheStats;
use sentiment_api::error::ApiResult;
use sentiment_api::traits::{HistoryStore, ResultCache};
use sentiment_api::{create_api_router, ApiConfig, AppState};
use sentiment_core::{derive_key, CachedAnalysis, HistoryRecord, LexiconModel, SentimentLabel};

// ============================================================================
// GATEWAY FAKES
// ============================================================================

/// In-memory cache fake. Keyed exactly like the Redis gateway.
#[derive(Default)]
struct MemoryCache {
    entries: Mutex<HashMap<String, CachedAnalysis>>,
    hits: AtomicI64,
    misses: AtomicI64,
}

#[async_trait]
impl ResultCache for MemoryCache {
    async fn lookup(&self, text: &str) -> Option<CachedAnalysis> {
        let found = self.entries.lock().unwrap().get(&derive_key(text)).cloned();
        match &found {
            Some(_) => self.hits.fetch_add(1, Ordering::SeqCst),
            None => self.misses.fetch_add(1, Ordering::SeqCst),
        };
        found
    }

    async fn store(&self, text: &str, entry: &CachedAnalysis) -> bool {
        self.entries
            .lock()
            .unwrap()
            .insert(derive_key(text), entry.clone());
        true
    }

    async fn stats(&self) -> CacheStats {
        let keys = self.entries.lock().unwrap().len() as i64;
        CacheStats::connected(
            keys,
            keys,
            0,
            self.hits.load(Ordering::SeqCst),
            self.misses.load(Ordering::SeqCst),
        )
    }

    async fn clear(&self) -> bool {
        self.entries.lock().unwrap().clear();
        true
    }
}

/// Cache fake that behaves like Redis being down.
struct UnreachableCache;

#[async_trait]
impl ResultCache for UnreachableCache {
    async fn lookup(&self, _text: &str) -> Option<CachedAnalysis> {
        None
    }

    async fn store(&self, _text: &str, _entry: &CachedAnalysis) -> bool {
        false
    }

    async fn stats(&self) -> CacheStats {
        CacheStats::unavailable("connection refused")
    }

    async fn clear(&self) -> bool {
        false
    }
}

/// In-memory history fake with server-side id and timestamp assignment.
#[derive(Default)]
struct MemoryHistory {
    rows: Mutex<Vec<HistoryRecord>>,
}

#[async_trait]
impl HistoryStore for MemoryHistory {
    async fn append(
        &self,
        text: &str,
        sentiment: SentimentLabel,
        confidence: f64,
        processing_time_ms: i64,
    ) -> ApiResult<HistoryRecord> {
        let mut rows = self.rows.lock().unwrap();
        let id = rows.len() as i64 + 1;
        let base = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let record = HistoryRecord {
            id,
            text: text.to_string(),
            sentiment,
            confidence,
            processing_time_ms,
            created_at: base + Duration::seconds(id),
        };
        rows.push(record.clone());
        Ok(record)
    }

    async fn list_recent(&self, limit: i64) -> ApiResult<(i64, Vec<HistoryRecord>)> {
        let rows = self.rows.lock().unwrap();
        let mut recent: Vec<HistoryRecord> = rows.clone();
        recent.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        recent.truncate(limit as usize);
        Ok((rows.len() as i64, recent))
    }

    async fn health_check(&self) -> ApiResult<()> {
        Ok(())
    }
}

// ============================================================================
// HELPERS
// ============================================================================

fn build_app(cache: Arc<dyn ResultCache>, history: Arc<dyn HistoryStore>) -> Router {
    let state = AppState::new(cache, history, Arc::new(LexiconModel::new()));
    create_api_router(state, &ApiConfig::from_env())
}

fn default_app() -> Router {
    build_app(
        Arc::new(MemoryCache::default()),
        Arc::new(MemoryHistory::default()),
    )
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_analyze(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/analyze")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn analyze(app: &Router, text: &str) -> (StatusCode, Value) {
    send(app, post_analyze(json!({ "text": text }))).await
}

// ============================================================================
// ANALYZE
// ============================================================================

#[tokio::test]
async fn test_analyze_positive_first_call_is_uncached() {
    let app = default_app();

    let (status, body) =
        analyze(&app, "I absolutely love this product! It's amazing and wonderful!").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["sentiment"], "POSITIVE");
    assert!(body["confidence"].as_f64().unwrap() > 0.9);
    assert_eq!(body["cached"], false);
    assert!(body["processing_time_ms"].as_i64().unwrap() >= 0);
}

#[tokio::test]
async fn test_analyze_negative_text() {
    let app = default_app();

    let (status, body) = analyze(&app, "This is terrible, I hate it. Awful experience.").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["sentiment"], "NEGATIVE");
    assert!(body["confidence"].as_f64().unwrap() > 0.9);
}

#[tokio::test]
async fn test_analyze_repeat_is_served_from_cache() {
    let app = default_app();
    let text = "What a great and wonderful day!";

    let (_, first) = analyze(&app, text).await;
    let (status, second) = analyze(&app, text).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["cached"], false);
    assert_eq!(second["cached"], true);
    assert_eq!(second["sentiment"], first["sentiment"]);
    assert_eq!(second["confidence"], first["confidence"]);
    assert_eq!(second["text"], first["text"]);
}

#[tokio::test]
async fn test_analyze_rejects_empty_text() {
    let app = default_app();

    let (status, body) = analyze(&app, "").await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["detail"].as_str().unwrap().contains("text"));
}

#[tokio::test]
async fn test_analyze_rejects_oversized_text() {
    let app = default_app();
    let text = "a".repeat(513);

    let (status, _) = analyze(&app, &text).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_analyze_accepts_maximum_length_text() {
    let app = default_app();
    let text = format!("good {}", "a".repeat(507));
    assert_eq!(text.chars().count(), 512);

    let (status, _) = analyze(&app, &text).await;

    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_analyze_rejects_missing_text_field() {
    let app = default_app();

    let (status, _) = send(&app, post_analyze(json!({}))).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_analyze_rejects_non_string_text() {
    let app = default_app();

    let (status, _) = send(&app, post_analyze(json!({ "text": 42 }))).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_analyze_succeeds_with_cache_down() {
    let app = build_app(Arc::new(UnreachableCache), Arc::new(MemoryHistory::default()));
    let text = "I love it";

    let (first_status, first) = analyze(&app, text).await;
    let (second_status, second) = analyze(&app, text).await;

    assert_eq!(first_status, StatusCode::OK);
    assert_eq!(second_status, StatusCode::OK);
    // No cache means every call is a fresh classification.
    assert_eq!(first["cached"], false);
    assert_eq!(second["cached"], false);
    assert_eq!(second["sentiment"], first["sentiment"]);
}

// ============================================================================
// HISTORY
// ============================================================================

#[tokio::test]
async fn test_history_returns_most_recent_first() {
    let app = default_app();
    analyze(&app, "first text is good").await;
    analyze(&app, "second text is bad").await;
    analyze(&app, "third text is wonderful").await;

    let (status, body) = send(&app, get("/history?limit=1")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 3);
    let analyses = body["analyses"].as_array().unwrap();
    assert_eq!(analyses.len(), 1);
    assert_eq!(analyses[0]["text"], "third text is wonderful");
}

#[tokio::test]
async fn test_history_defaults_to_ten_rows() {
    let app = default_app();
    for i in 0..12 {
        analyze(&app, &format!("entry {} is fine", i)).await;
    }

    let (status, body) = send(&app, get("/history")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 12);
    assert_eq!(body["analyses"].as_array().unwrap().len(), 10);
}

#[tokio::test]
async fn test_history_empty_store() {
    let app = default_app();

    let (status, body) = send(&app, get("/history")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 0);
    assert_eq!(body["analyses"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_history_rejects_non_positive_limit() {
    let app = default_app();

    let (zero, _) = send(&app, get("/history?limit=0")).await;
    let (negative, _) = send(&app, get("/history?limit=-5")).await;

    assert_eq!(zero, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(negative, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_history_rejects_non_numeric_limit() {
    let app = default_app();

    let (status, body) = send(&app, get("/history?limit=abc")).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["detail"].as_str().unwrap().contains("limit"));
}

#[tokio::test]
async fn test_history_equal_timestamps_order_by_id_descending() {
    let history = Arc::new(MemoryHistory::default());
    let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
    {
        let mut rows = history.rows.lock().unwrap();
        for id in 1..=3 {
            rows.push(HistoryRecord {
                id,
                text: format!("row {}", id),
                sentiment: SentimentLabel::Positive,
                confidence: 0.5,
                processing_time_ms: 1,
                created_at: at,
            });
        }
    }
    let app = build_app(Arc::new(MemoryCache::default()), history);

    let (status, body) = send(&app, get("/history?limit=2")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 3);
    let analyses = body["analyses"].as_array().unwrap();
    assert_eq!(analyses[0]["id"], 3);
    assert_eq!(analyses[1]["id"], 2);
}

#[tokio::test]
async fn test_history_entries_carry_full_record() {
    let app = default_app();
    analyze(&app, "this is excellent").await;

    let (_, body) = send(&app, get("/history")).await;

    let entry = &body["analyses"][0];
    assert_eq!(entry["id"], 1);
    assert_eq!(entry["text"], "this is excellent");
    assert_eq!(entry["sentiment"], "POSITIVE");
    assert!(entry["confidence"].as_f64().is_some());
    assert!(entry["processing_time_ms"].as_i64().is_some());
    assert!(entry["created_at"].as_str().unwrap().contains("2024-05-01"));
}

// ============================================================================
// CACHE ADMIN
// ============================================================================

#[tokio::test]
async fn test_cache_stats_reports_counters() {
    let app = default_app();
    let text = "brilliant stuff";
    analyze(&app, text).await; // miss
    analyze(&app, text).await; // hit

    let (status, body) = send(&app, get("/cache/stats")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "connected");
    assert_eq!(body["hits"], 1);
    assert_eq!(body["misses"], 1);
    assert_eq!(body["hit_rate"], 50.0);
    assert_eq!(body["sentiment_keys"], 1);
}

#[tokio::test]
async fn test_cache_stats_degrades_to_error_status() {
    let app = build_app(Arc::new(UnreachableCache), Arc::new(MemoryHistory::default()));

    let (status, body) = send(&app, get("/cache/stats")).await;

    // Degraded cache is reported in the body, not as an error status.
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "error");
    assert!(body.get("hits").is_none());
}

#[tokio::test]
async fn test_cache_clear_then_repeat_is_uncached() {
    let app = default_app();
    let text = "superb quality";
    analyze(&app, text).await;

    let request = Request::builder()
        .method("DELETE")
        .uri("/cache/clear")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Cache cleared successfully");

    let (_, stats) = send(&app, get("/cache/stats")).await;
    assert_eq!(stats["sentiment_keys"], 0);

    let (_, repeat) = analyze(&app, text).await;
    assert_eq!(repeat["cached"], false);
}

#[tokio::test]
async fn test_cache_clear_on_empty_cache_succeeds() {
    let app = default_app();

    let request = Request::builder()
        .method("DELETE")
        .uri("/cache/clear")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&app, request).await;

    // Deleting zero keys is a successful no-op.
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Cache cleared successfully");
}

#[tokio::test]
async fn test_cache_clear_reports_failure_in_body() {
    let app = build_app(Arc::new(UnreachableCache), Arc::new(MemoryHistory::default()));

    let request = Request::builder()
        .method("DELETE")
        .uri("/cache/clear")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Failed to clear cache");
}

// ============================================================================
// HEALTH AND DOCS
// ============================================================================

#[tokio::test]
async fn test_root_reports_service_info() {
    let app = default_app();

    let (status, body) = send(&app, get("/")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "sentiment-api");
    assert_eq!(body["version"], "1.0.0");
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = default_app();

    let (status, body) = send(&app, get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let app = default_app();

    let (status, body) = send(&app, get("/openapi.json")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["info"]["title"], "Sentiment Analysis API");
    assert!(body["paths"].get("/analyze").is_some());
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let app = default_app();

    let (status, _) = send(&app, get("/nope")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}
