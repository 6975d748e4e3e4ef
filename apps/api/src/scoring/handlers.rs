//! Axum route handlers for the scoring API.

use axum::{extract::State, Json};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::candidate::JobType;
use crate::errors::AppError;
use crate::models::job::{JobKeyword, JobRequirement};
use crate::models::qualifications::CandidateQualifications;
use crate::models::resume::ResumeSections;
use crate::scoring::pipeline::{CandidateTypeInput, ScoreBreakdown, ScoreInput};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    #[serde(default)]
    pub job_requirements: Vec<JobRequirement>,
    #[serde(default)]
    pub candidate_qualifications: Option<CandidateQualifications>,
    #[serde(default)]
    pub keywords: Vec<JobKeyword>,
    #[serde(default)]
    pub resume_sections: ResumeSections,
    #[serde(default)]
    pub resume_text: String,
    pub job_description_text: String,
    #[serde(default)]
    pub job_type: Option<JobType>,
    #[serde(default)]
    pub candidate: CandidateTypeInput,
    /// Defaults to today (UTC).
    #[serde(default)]
    pub as_of: Option<NaiveDate>,
}

impl ScoreRequest {
    fn into_input(self, today: NaiveDate) -> ScoreInput {
        ScoreInput {
            job_requirements: self.job_requirements,
            candidate_qualifications: self.candidate_qualifications,
            keywords: self.keywords,
            resume_sections: self.resume_sections,
            resume_text: self.resume_text,
            job_description_text: self.job_description_text,
            job_type: self.job_type,
            candidate: self.candidate,
            as_of: self.as_of.unwrap_or(today),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ScoreResponse {
    pub analysis_id: Uuid,
    #[serde(flatten)]
    pub breakdown: ScoreBreakdown,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/fit/score
///
/// Runs the full scoring pipeline. Validation failures return 400.
pub async fn handle_score(
    State(state): State<AppState>,
    Json(request): Json<ScoreRequest>,
) -> Result<Json<ScoreResponse>, AppError> {
    let input = request.into_input(Utc::now().date_naive());
    let breakdown = state.fit_scorer.score(&input)?;

    Ok(Json(ScoreResponse {
        analysis_id: Uuid::new_v4(),
        breakdown,
    }))
}
