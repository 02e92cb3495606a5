//! Shared application state for Axum routers.

use std::sync::Arc;

use sentiment_core::SentimentModel;

use crate::services::AnalysisService;
use crate::traits::{HistoryStore, ResultCache};

/// Application-wide state shared across all routes.
///
/// Gateways are injected at construction time (no module-level client
/// handles), so tests can build a state over in-memory fakes.
#[derive(Clone)]
pub struct AppState {
    /// The analyze orchestrator.
    pub analysis: Arc<AnalysisService>,
    /// Cache gateway, used directly by the cache admin routes.
    pub cache: Arc<dyn ResultCache>,
    /// Persistence gateway, used directly by the history route.
    pub history: Arc<dyn HistoryStore>,
}

impl AppState {
    pub fn new(
        cache: Arc<dyn ResultCache>,
        history: Arc<dyn HistoryStore>,
        model: Arc<dyn SentimentModel>,
    ) -> Self {
        let analysis = Arc::new(AnalysisService::new(
            cache.clone(),
            history.clone(),
            model,
        ));

        Self {
            analysis,
            cache,
            history,
        }
    }
}
