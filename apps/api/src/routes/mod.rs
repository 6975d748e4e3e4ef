pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::calibration::handlers as calibration;
use crate::candidate::handlers as candidate;
use crate::scoring::handlers as scoring;
use crate::state::AppState;
use crate::structure::handlers as structure;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/fit/score", post(scoring::handle_score))
        .route("/api/v1/fit/calibrate", post(calibration::handle_calibrate))
        .route("/api/v1/fit/structure", post(structure::handle_structure))
        .route(
            "/api/v1/fit/candidate-type",
            post(candidate::handle_detect_candidate_type),
        )
        .with_state(state)
}
