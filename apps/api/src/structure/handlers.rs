//! Axum route handlers for the structure API.

use axum::Json;
use serde::{Deserialize, Serialize};

use crate::candidate::CandidateType;
use crate::errors::AppError;
use crate::models::resume::{ResumeSections, SectionKind};
use crate::structure::{
    generate_structural_suggestions, validate_section_order, SectionOrderValidation,
    StructuralSuggestion,
};

#[derive(Debug, Deserialize)]
pub struct StructureRequest {
    pub candidate_type: CandidateType,
    #[serde(default)]
    pub sections: ResumeSections,
    /// Section headings in the order they appear on the résumé.
    #[serde(default)]
    pub section_order: Vec<SectionKind>,
}

#[derive(Debug, Serialize)]
pub struct StructureResponse {
    pub order: SectionOrderValidation,
    pub suggestions: Vec<StructuralSuggestion>,
}

/// POST /api/v1/fit/structure
pub async fn handle_structure(
    Json(request): Json<StructureRequest>,
) -> Result<Json<StructureResponse>, AppError> {
    let order = validate_section_order(request.candidate_type, &request.section_order);
    let suggestions = generate_structural_suggestions(
        request.candidate_type,
        &request.sections,
        &request.section_order,
    );

    Ok(Json(StructureResponse { order, suggestions }))
}
