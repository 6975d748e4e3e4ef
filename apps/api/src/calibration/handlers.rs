//! Axum route handlers for the calibration API.

use axum::Json;
use serde::Deserialize;

use crate::calibration::{calibrate, CalibrationResult, ExperienceLevel};
use crate::candidate::CandidateType;
use crate::errors::{AppError, InputError};

#[derive(Debug, Deserialize)]
pub struct CalibrateRequest {
    pub overall: f64,
    /// Takes precedence over `candidate_type` when both are given.
    #[serde(default)]
    pub experience_level: Option<ExperienceLevel>,
    #[serde(default)]
    pub candidate_type: Option<CandidateType>,
    #[serde(default)]
    pub missing_keywords_count: usize,
    #[serde(default)]
    pub quantification_density: f64,
    #[serde(default)]
    pub total_bullets: usize,
}

/// POST /api/v1/fit/calibrate
pub async fn handle_calibrate(
    Json(request): Json<CalibrateRequest>,
) -> Result<Json<CalibrationResult>, AppError> {
    if !request.overall.is_finite() {
        return Err(InputError::NonFinite {
            field: "overall",
            value: request.overall,
        }
        .into());
    }
    if !request.quantification_density.is_finite() {
        return Err(InputError::NonFinite {
            field: "quantification_density",
            value: request.quantification_density,
        }
        .into());
    }

    let level = request
        .experience_level
        .or_else(|| request.candidate_type.map(ExperienceLevel::from))
        .unwrap_or(ExperienceLevel::Experienced);

    Ok(Json(calibrate(
        request.overall,
        level,
        request.missing_keywords_count,
        request.quantification_density,
        request.total_bullets,
    )))
}
