//! Axum route handlers for the candidate API.

use axum::Json;

use crate::candidate::{detect_candidate_type, CandidateSignals, CandidateTypeResult};
use crate::errors::{AppError, InputError};

/// POST /api/v1/fit/candidate-type
///
/// Runs the detector over caller-supplied signals.
pub async fn handle_detect_candidate_type(
    Json(signals): Json<CandidateSignals>,
) -> Result<Json<CandidateTypeResult>, AppError> {
    if !signals.experience_years.is_finite() {
        return Err(InputError::NonFinite {
            field: "experience_years",
            value: signals.experience_years,
        }
        .into());
    }

    Ok(Json(detect_candidate_type(&signals)))
}
