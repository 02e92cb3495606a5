//! Analyze Endpoint
//!
//! `POST /analyze` - validate the request body, then hand off to the
//! orchestrator. Validation failures never reach the orchestrator; internal
//! failures surface as a generic 500 with a `detail` message.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use sentiment_core::AnalysisResult;

use crate::error::{ApiResult, ErrorBody};
use crate::state::AppState;
use crate::validation::ValidateTextBounds;

// ============================================================================
// TYPES
// ============================================================================

/// Request body for `POST /analyze`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct AnalyzeRequest {
    /// Text to classify, 1-512 code points.
    #[schema(example = "I love this product!")]
    pub text: String,
}

// ============================================================================
// HANDLERS
// ============================================================================

/// POST /analyze - Classify one text with caching and persistence
#[utoipa::path(
    post,
    path = "/analyze",
    tag = "Analysis",
    request_body = AnalyzeRequest,
    responses(
        (status = 200, description = "Analysis result", body = AnalysisResult),
        (status = 422, description = "Invalid request body", body = ErrorBody),
        (status = 500, description = "Model or persistence failure", body = ErrorBody),
    ),
)]
pub async fn analyze(
    State(state): State<AppState>,
    Json(req): Json<AnalyzeRequest>,
) -> ApiResult<Json<AnalysisResult>> {
    req.text.validate_text_bounds("text")?;

    let result = state.analysis.analyze(&req.text).await?;
    Ok(Json(result))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_deserialization() {
        let req: AnalyzeRequest = serde_json::from_str("{\"text\":\"Great!\"}").unwrap();
        assert_eq!(req.text, "Great!");
    }

    #[test]
    fn test_request_rejects_missing_text() {
        assert!(serde_json::from_str::<AnalyzeRequest>("{}").is_err());
    }

    #[test]
    fn test_request_rejects_non_string_text() {
        assert!(serde_json::from_str::<AnalyzeRequest>("{\"text\":12345}").is_err());
    }
}
