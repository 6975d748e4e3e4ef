use std::sync::Arc;

use crate::config::Config;
use crate::reference::ReferenceData;
use crate::scoring::{FitScorer, RuleBasedFitScorer};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Loaded once at startup, read-only afterwards.
    pub reference: Arc<ReferenceData>,
    /// Pluggable fit scorer. Default: RuleBasedFitScorer over `reference`.
    pub fit_scorer: Arc<dyn FitScorer>,
}

impl AppState {
    pub fn new(config: Config, reference: ReferenceData) -> Self {
        let reference = Arc::new(reference);
        Self {
            config,
            fit_scorer: Arc::new(RuleBasedFitScorer::new(reference.clone())),
            reference,
        }
    }
}
