//! Candidate Type Detector: resolves the candidate archetype from an ordered rule table.
//!
//! Rules are evaluated top to bottom and the first guard that holds wins.
//! Later rules are never consulted, and the winning rule is recorded on the
//! result so downstream consumers can tell exactly why a type was chosen.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::qualifications::{sanitize_years, CandidateQualifications};
use crate::models::resume::ResumeSections;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateType {
    Coop,
    Fulltime,
    CareerChanger,
}

impl CandidateType {
    pub fn label(&self) -> &'static str {
        match self {
            CandidateType::Coop => "co-op",
            CandidateType::Fulltime => "full-time",
            CandidateType::CareerChanger => "career changer",
        }
    }
}

/// Job type the user picked explicitly in the product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobType {
    #[serde(alias = "internship", alias = "co-op")]
    Coop,
    #[serde(alias = "full-time")]
    Fulltime,
}

/// Career goal captured during onboarding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CareerGoal {
    SwitchingCareers,
    GrowingInRole,
    EnteringWorkforce,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectionSource {
    UserSelection,
    Onboarding,
    ResumeAnalysis,
    Default,
}

/// Identifies the rule that produced a result. Exactly one rule authors each result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectionRule {
    ExplicitCoop,
    ExplicitCareerChange,
    FulltimeWithActiveEducation,
    ExplicitFulltime,
    InferredStudent,
    InferredExperienced,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateTypeResult {
    pub candidate_type: CandidateType,
    pub confidence: f64,
    pub detected_from: DetectionSource,
    pub rule: DetectionRule,
}

/// Everything the detector looks at.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CandidateSignals {
    pub job_type: Option<JobType>,
    pub career_goal: Option<CareerGoal>,
    pub role_count: usize,
    pub has_active_education: bool,
    pub experience_years: f64,
}

impl CandidateSignals {
    /// Builds signals from the résumé, keeping the explicit product inputs as given.
    pub fn from_resume(
        job_type: Option<JobType>,
        career_goal: Option<CareerGoal>,
        sections: &ResumeSections,
        qualifications: &CandidateQualifications,
        as_of: NaiveDate,
    ) -> Self {
        Self {
            job_type,
            career_goal,
            role_count: sections.experience.len(),
            has_active_education: sections.has_active_education(as_of),
            experience_years: qualifications.sanitized_years(),
        }
    }
}

struct Rule {
    id: DetectionRule,
    applies: fn(&CandidateSignals) -> bool,
    candidate_type: CandidateType,
    confidence: f64,
    source: DetectionSource,
}

static RULES: [Rule; 7] = [
    Rule {
        id: DetectionRule::ExplicitCoop,
        applies: explicit_coop,
        candidate_type: CandidateType::Coop,
        confidence: 1.0,
        source: DetectionSource::UserSelection,
    },
    Rule {
        id: DetectionRule::ExplicitCareerChange,
        applies: explicit_career_change,
        candidate_type: CandidateType::CareerChanger,
        confidence: 0.95,
        source: DetectionSource::Onboarding,
    },
    Rule {
        id: DetectionRule::FulltimeWithActiveEducation,
        applies: fulltime_with_active_education,
        candidate_type: CandidateType::CareerChanger,
        confidence: 0.70,
        source: DetectionSource::ResumeAnalysis,
    },
    Rule {
        id: DetectionRule::ExplicitFulltime,
        applies: explicit_fulltime,
        candidate_type: CandidateType::Fulltime,
        confidence: 0.90,
        source: DetectionSource::UserSelection,
    },
    Rule {
        id: DetectionRule::InferredStudent,
        applies: inferred_student,
        candidate_type: CandidateType::Coop,
        confidence: 0.80,
        source: DetectionSource::ResumeAnalysis,
    },
    Rule {
        id: DetectionRule::InferredExperienced,
        applies: inferred_experienced,
        candidate_type: CandidateType::Fulltime,
        confidence: 0.85,
        source: DetectionSource::ResumeAnalysis,
    },
    Rule {
        id: DetectionRule::Fallback,
        applies: always,
        candidate_type: CandidateType::Fulltime,
        confidence: 0.50,
        source: DetectionSource::Default,
    },
];

fn explicit_coop(s: &CandidateSignals) -> bool {
    s.job_type == Some(JobType::Coop)
}

fn explicit_career_change(s: &CandidateSignals) -> bool {
    s.job_type == Some(JobType::Fulltime) && s.career_goal == Some(CareerGoal::SwitchingCareers)
}

fn fulltime_with_active_education(s: &CandidateSignals) -> bool {
    s.job_type == Some(JobType::Fulltime) && s.has_active_education && s.role_count < 3
}

fn explicit_fulltime(s: &CandidateSignals) -> bool {
    s.job_type == Some(JobType::Fulltime)
}

fn inferred_student(s: &CandidateSignals) -> bool {
    s.job_type.is_none() && s.role_count < 2 && s.has_active_education
}

fn inferred_experienced(s: &CandidateSignals) -> bool {
    s.job_type.is_none() && s.role_count >= 3 && sanitize_years(s.experience_years) >= 3.0
}

fn always(_: &CandidateSignals) -> bool {
    true
}

/// Resolves exactly one archetype. Never fails: the last rule always applies.
pub fn detect_candidate_type(signals: &CandidateSignals) -> CandidateTypeResult {
    let rule = RULES
        .iter()
        .find(|rule| (rule.applies)(signals))
        .unwrap_or(&RULES[RULES.len() - 1]);

    tracing::debug!(
        rule = ?rule.id,
        candidate_type = ?rule.candidate_type,
        confidence = rule.confidence,
        "Candidate type resolved"
    );

    CandidateTypeResult {
        candidate_type: rule.candidate_type,
        confidence: rule.confidence,
        detected_from: rule.source,
        rule: rule.id,
    }
}
