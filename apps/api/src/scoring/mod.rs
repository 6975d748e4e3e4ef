pub mod aggregator;
pub mod content;
pub mod format;
pub mod handlers;
pub mod pipeline;
pub mod sections;
pub mod weights;

pub use aggregator::{aggregate, ActionItem, ComponentScores, Tier};
pub use pipeline::{score, FitScorer, RuleBasedFitScorer, ScoreBreakdown, ScoreInput};
pub use weights::{detect_job_role, resolve_weights, ComponentWeights, JobRole};

/// Rounds a 0–100 score to one decimal place.
pub fn round_score(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Clamps to [0, 100], mapping NaN to 0.
pub fn clamp_score(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 100.0)
    }
}
