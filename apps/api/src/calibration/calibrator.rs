//! Suggestion Calibrator: turns an overall score into a suggestion plan.
//!
//! Pure lookup: score band → mode, counts → boosts, experience level → focus tags.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calibration::mode::{get_suggestion_mode, SuggestionMode, SuggestionRange};
use crate::candidate::CandidateType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceLevel {
    Student,
    CareerChanger,
    Experienced,
}

impl From<CandidateType> for ExperienceLevel {
    fn from(candidate_type: CandidateType) -> Self {
        match candidate_type {
            CandidateType::Coop => ExperienceLevel::Student,
            CandidateType::CareerChanger => ExperienceLevel::CareerChanger,
            CandidateType::Fulltime => ExperienceLevel::Experienced,
        }
    }
}

impl ExperienceLevel {
    /// Exactly four tags per level.
    pub fn focus_areas(&self) -> [&'static str; 4] {
        match self {
            ExperienceLevel::Student => [
                "academic_projects",
                "relevant_coursework",
                "technical_skills",
                "extracurricular_leadership",
            ],
            ExperienceLevel::CareerChanger => [
                "transferable_skills",
                "summary_positioning",
                "relevant_projects",
                "certifications",
            ],
            ExperienceLevel::Experienced => [
                "quantified_impact",
                "leadership",
                "keyword_alignment",
                "career_progression",
            ],
        }
    }

    fn experience_boost(&self) -> i8 {
        match self {
            ExperienceLevel::Student => 0,
            ExperienceLevel::CareerChanger => 2,
            ExperienceLevel::Experienced => 1,
        }
    }
}

/// Each boost lies in [-1, 2].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityBoosts {
    pub keyword: i8,
    pub quantification: i8,
    pub experience: i8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalibrationResult {
    pub mode: SuggestionMode,
    pub target_suggestion_count: u8,
    pub suggestion_range: SuggestionRange,
    pub priority_boosts: PriorityBoosts,
    pub focus_areas: Vec<String>,
    pub reasoning: String,
}

pub fn keyword_boost(missing_keywords: usize) -> i8 {
    match missing_keywords {
        0..=1 => 0,
        2..=4 => 1,
        _ => 2,
    }
}

/// `density` is a percentage; it is clamped to [0, 100] before banding.
pub fn quantification_boost(density: f64) -> i8 {
    let density = if density.is_nan() { 0.0 } else { density.clamp(0.0, 100.0) };
    match density {
        d if d < 30.0 => 2,
        d if d < 50.0 => 1,
        d if d <= 80.0 => 0,
        _ => -1,
    }
}

pub fn calibrate(
    overall: f64,
    experience_level: ExperienceLevel,
    missing_keywords_count: usize,
    quantification_density: f64,
    total_bullets: usize,
) -> CalibrationResult {
    let mode = get_suggestion_mode(overall);

    // No bullets, no density signal.
    let quantification = if total_bullets == 0 {
        0
    } else {
        quantification_boost(quantification_density)
    };
    let priority_boosts = PriorityBoosts {
        keyword: keyword_boost(missing_keywords_count),
        quantification,
        experience: experience_level.experience_boost(),
    };

    let reasoning = reasoning(
        overall,
        mode,
        experience_level,
        missing_keywords_count,
        quantification_density,
        total_bullets,
    );

    debug!(
        ?mode,
        ?experience_level,
        keyword_boost = priority_boosts.keyword,
        quantification_boost = priority_boosts.quantification,
        "Calibration resolved"
    );

    CalibrationResult {
        mode,
        target_suggestion_count: mode.target_count(),
        suggestion_range: mode.suggestion_range(),
        priority_boosts,
        focus_areas: experience_level
            .focus_areas()
            .iter()
            .map(|t| t.to_string())
            .collect(),
        reasoning,
    }
}

fn reasoning(
    overall: f64,
    mode: SuggestionMode,
    level: ExperienceLevel,
    missing_keywords: usize,
    density: f64,
    total_bullets: usize,
) -> String {
    let range = mode.suggestion_range();
    let level = match level {
        ExperienceLevel::Student => "student",
        ExperienceLevel::CareerChanger => "career changer",
        ExperienceLevel::Experienced => "experienced candidate",
    };
    let bullets = if total_bullets == 0 {
        "no achievement bullets to assess".to_string()
    } else {
        format!("{density:.0}% of {total_bullets} bullets quantified")
    };
    format!(
        "Score {overall:.1} puts this {level} in {} mode ({}-{} suggestions); {missing_keywords} missing keyword(s), {bullets}.",
        mode.label(),
        range.min,
        range.max,
    )
}
