//! Scoring pipeline: one synchronous run from raw inputs to a `ScoreBreakdown`.
//!
//! Order: validate → detector → keyword matcher / qualification scorer →
//! content, sections, format → weight resolver → aggregator.
//! Every stage after `validate` is total.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::candidate::{
    detect_candidate_type, CandidateSignals, CandidateTypeResult, CareerGoal, JobType,
};
use crate::errors::InputError;
use crate::matching::{match_keywords, KeywordMatchReport};
use crate::models::job::{JobKeyword, JobRequirement, RequirementKind};
use crate::models::qualifications::CandidateQualifications;
use crate::models::resume::ResumeSections;
use crate::qualification::{calculate_qualification_fit, QualificationFit};
use crate::reference::ReferenceData;
use crate::scoring::aggregator::{
    aggregate, build_action_items, ActionEvidence, ActionItem, ComponentScores, Tier,
};
use crate::scoring::content::{assess_content, ContentQuality};
use crate::scoring::format::{check_format, FormatCheck};
use crate::scoring::sections::{compute_section_coverage, SectionCoverage};
use crate::scoring::weights::{detect_job_role, resolve_weights, ComponentWeights, JobRole};

// ────────────────────────────────────────────────────────────────────────────
// Input / output
// ────────────────────────────────────────────────────────────────────────────

/// Optional overrides for the detector signals otherwise derived from the résumé.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CandidateTypeInput {
    pub career_goal: Option<CareerGoal>,
    pub role_count: Option<usize>,
    pub has_active_education: Option<bool>,
    pub experience_years: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreInput {
    #[serde(default)]
    pub job_requirements: Vec<JobRequirement>,
    /// Derived from `resume_sections` when absent.
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
    /// Reference date for open-ended date ranges.
    pub as_of: NaiveDate,
}

impl ScoreInput {
    /// Rejects inputs the pipeline cannot interpret. Negative years are not
    /// rejected here; the consuming stage clamps them.
    pub fn validate(&self) -> Result<(), InputError> {
        if self.job_description_text.trim().is_empty() {
            return Err(InputError::EmptyJobDescription);
        }
        if let Some(idx) = self.keywords.iter().position(|k| k.keyword.trim().is_empty()) {
            return Err(InputError::EmptyKeyword(idx));
        }
        for (idx, req) in self.job_requirements.iter().enumerate() {
            match &req.kind {
                RequirementKind::Certification { name } if name.trim().is_empty() => {
                    return Err(InputError::EmptyCertification(idx));
                }
                RequirementKind::ExperienceYears { years } if !years.is_finite() => {
                    return Err(InputError::NonFinite {
                        field: "job_requirements.years",
                        value: *years,
                    });
                }
                _ => {}
            }
        }
        if let Some(q) = &self.candidate_qualifications {
            if !q.experience_years.is_finite() {
                return Err(InputError::NonFinite {
                    field: "candidate_qualifications.experience_years",
                    value: q.experience_years,
                });
            }
        }
        if let Some(years) = self.candidate.experience_years {
            if !years.is_finite() {
                return Err(InputError::NonFinite {
                    field: "candidate.experience_years",
                    value: years,
                });
            }
        }
        Ok(())
    }

    fn candidate_signals(&self, qualifications: &CandidateQualifications) -> CandidateSignals {
        let derived = CandidateSignals::from_resume(
            self.job_type,
            self.candidate.career_goal,
            &self.resume_sections,
            qualifications,
            self.as_of,
        );
        CandidateSignals {
            role_count: self.candidate.role_count.unwrap_or(derived.role_count),
            has_active_education: self
                .candidate
                .has_active_education
                .unwrap_or(derived.has_active_education),
            experience_years: self
                .candidate
                .experience_years
                .unwrap_or(derived.experience_years),
            ..derived
        }
    }
}

/// Terminal output of one scoring run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub candidate: CandidateTypeResult,
    pub job_role: JobRole,
    pub weights: ComponentWeights,
    pub components: ComponentScores,
    pub overall: f64,
    pub tier: Tier,
    pub keywords: KeywordMatchReport,
    pub qualification: QualificationFit,
    pub content: ContentQuality,
    pub sections: SectionCoverage,
    pub format: FormatCheck,
    pub action_items: Vec<ActionItem>,
}

// ────────────────────────────────────────────────────────────────────────────
// Entry point
// ────────────────────────────────────────────────────────────────────────────

pub fn score(input: &ScoreInput, reference: &ReferenceData) -> Result<ScoreBreakdown, InputError> {
    input.validate()?;

    let qualifications = input
        .candidate_qualifications
        .clone()
        .unwrap_or_else(|| CandidateQualifications::from_resume(&input.resume_sections, input.as_of));

    let candidate = detect_candidate_type(&input.candidate_signals(&qualifications));
    let candidate_type = candidate.candidate_type;

    let keywords = match_keywords(
        &input.keywords,
        &input.resume_sections,
        &input.resume_text,
        reference,
    );
    let qualification = calculate_qualification_fit(&input.job_requirements, &qualifications, reference);
    let content = assess_content(&input.resume_sections);
    let sections = compute_section_coverage(&input.resume_sections, candidate_type);
    let format = check_format(&input.resume_text);
    debug!(
        keywords = keywords.score,
        qualification_fit = qualification.score,
        content_quality = content.score,
        sections = sections.score,
        format = format.score,
        "Component scores computed"
    );

    let job_role = detect_job_role(&input.job_description_text, &input.job_requirements);
    let weights = resolve_weights(candidate_type, &job_role);
    debug!(?candidate_type, ?job_role, ?weights, "Weights resolved");

    let components = ComponentScores {
        keywords: keywords.score,
        qualification_fit: qualification.score,
        content_quality: content.score,
        sections: sections.score,
        format: format.score,
    };
    let (overall, tier) = aggregate(&weights, &components);

    let action_items = build_action_items(
        &weights,
        &components,
        &ActionEvidence {
            missing_high_importance: &keywords.missing_high_importance,
            missing_keywords: &keywords.missing_keywords,
            qualification_gaps: &qualification.gaps,
            quantification_density: content.quantification_density,
            total_bullets: content.total_bullets,
            missing_sections: &sections.missing_sections,
            format_issues: &format.issues,
        },
    );

    info!(
        candidate_type = candidate_type.label(),
        overall,
        ?tier,
        action_items = action_items.len(),
        "Fit score computed"
    );

    Ok(ScoreBreakdown {
        candidate,
        job_role,
        weights,
        components,
        overall,
        tier,
        keywords,
        qualification,
        content,
        sections,
        format,
        action_items,
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Trait seam
// ────────────────────────────────────────────────────────────────────────────

/// Carried in `AppState` as `Arc<dyn FitScorer>` so handlers never name a backend.
pub trait FitScorer: Send + Sync {
    fn score(&self, input: &ScoreInput) -> Result<ScoreBreakdown, InputError>;
}

/// Deterministic rule-based scorer over a shared, read-only reference table set.
pub struct RuleBasedFitScorer {
    reference: Arc<ReferenceData>,
}

impl RuleBasedFitScorer {
    pub fn new(reference: Arc<ReferenceData>) -> Self {
        Self { reference }
    }
}

impl FitScorer for RuleBasedFitScorer {
    fn score(&self, input: &ScoreInput) -> Result<ScoreBreakdown, InputError> {
        score(input, &self.reference)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidate::CandidateType;
    use crate::models::job::{Importance, RequirementStrength};
    use crate::models::qualifications::{DegreeLevel, HeldDegree};
    use crate::candidate::DetectionRule;
    use crate::models::resume::{EducationEntry, ExperienceEntry, ProjectEntry, SectionKind};
    use crate::reference::BUILTIN;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn base_input() -> ScoreInput {
        ScoreInput {
            job_requirements: vec![],
            candidate_qualifications: None,
            keywords: vec![],
            resume_sections: ResumeSections::default(),
            resume_text: String::new(),
            job_description_text: "Software Engineering Intern working on backend systems in Python."
                .to_string(),
            job_type: None,
            candidate: CandidateTypeInput::default(),
            as_of: date(2026, 1, 15),
        }
    }

    fn project(name: &str, bullet: &str) -> ProjectEntry {
        ProjectEntry {
            name: name.to_string(),
            technologies: vec!["Python".to_string()],
            bullets: vec![bullet.to_string()],
        }
    }

    #[test]
    fn test_coop_with_projects_and_no_experience_scores_above_zero() {
        let mut input = base_input();
        input.job_type = Some(JobType::Coop);
        input.keywords = vec![
            JobKeyword::new("Python", Importance::High, RequirementStrength::Required),
            JobKeyword::new("Docker", Importance::Medium, RequirementStrength::Preferred),
        ];
        input.resume_sections = ResumeSections {
            education: vec![EducationEntry {
                institution: "University of Toronto".to_string(),
                degree: "Bachelor of Science".to_string(),
                field: Some("Computer Science".to_string()),
                start: Some(date(2023, 9, 1)),
                end: Some(date(2027, 6, 1)),
            }],
            projects: vec![
                project("Scheduler", "Built a course scheduler used by 300 students"),
                project("Crawler", "Developed a web crawler indexing 50k pages"),
                project("Chat", "Designed a chat server handling 1k concurrent users"),
            ],
            skills: vec!["Python".into(), "Git".into(), "SQL".into()],
            ..Default::default()
        };
        input.resume_text = "student@example.com\nEducation\nProjects\nSkills\nPython Git SQL".to_string();

        let breakdown = score(&input, &BUILTIN).unwrap();
        assert_eq!(breakdown.candidate.candidate_type, CandidateType::Coop);
        assert!(breakdown.overall > 0.0);
        assert!(breakdown.sections.score >= 0.0);
        assert!(breakdown.sections.missing_sections.contains(&SectionKind::Experience));
        assert!((breakdown.weights.sum() - 1.0).abs() < 1e-6);
        assert_eq!(breakdown.content.total_bullets, 3);
        assert_eq!(breakdown.content.quantification_density, 100.0);
    }

    #[test]
    fn test_full_qualification_fit_end_to_end() {
        let mut input = base_input();
        input.job_requirements = vec![
            JobRequirement::required(RequirementKind::Degree {
                level: DegreeLevel::Bachelor,
                fields: vec!["Computer Science".to_string()],
            }),
            JobRequirement::required(RequirementKind::ExperienceYears { years: 5.0 }),
            JobRequirement::required(RequirementKind::Certification {
                name: "AWS Solutions Architect".to_string(),
            }),
        ];
        input.candidate_qualifications = Some(CandidateQualifications {
            degree: Some(HeldDegree {
                level: DegreeLevel::Bachelor,
                field: Some("Computer Science".to_string()),
            }),
            experience_years: 5.0,
            certifications: vec!["AWS Certified Solutions Architect".to_string()],
        });

        let breakdown = score(&input, &BUILTIN).unwrap();
        assert_eq!(breakdown.qualification.score, 100.0);
        assert_eq!(breakdown.components.qualification_fit, 100.0);
    }

    #[test]
    fn test_repeated_runs_are_identical() {
        let mut input = base_input();
        input.keywords = vec![JobKeyword::new("Rust", Importance::High, RequirementStrength::Required)];
        input.resume_text = "Rust developer".to_string();
        let first = score(&input, &BUILTIN).unwrap();
        let second = score(&input, &BUILTIN).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_job_description_is_rejected() {
        let mut input = base_input();
        input.job_description_text = "   ".to_string();
        assert_eq!(score(&input, &BUILTIN).unwrap_err(), InputError::EmptyJobDescription);
    }

    #[test]
    fn test_blank_keyword_is_rejected_with_position() {
        let mut input = base_input();
        input.keywords = vec![
            JobKeyword::new("Rust", Importance::High, RequirementStrength::Required),
            JobKeyword::new(" ", Importance::Low, RequirementStrength::Preferred),
        ];
        assert_eq!(input.validate(), Err(InputError::EmptyKeyword(1)));
    }

    #[test]
    fn test_non_finite_years_are_rejected() {
        let mut input = base_input();
        input.job_requirements = vec![JobRequirement::required(RequirementKind::ExperienceYears {
            years: f64::NAN,
        })];
        assert!(matches!(
            input.validate(),
            Err(InputError::NonFinite { field: "job_requirements.years", .. })
        ));
    }

    #[test]
    fn test_candidate_overrides_take_precedence_over_resume_signals() {
        let mut input = base_input();
        input.candidate = CandidateTypeInput {
            role_count: Some(4),
            experience_years: Some(6.0),
            ..Default::default()
        };
        let breakdown = score(&input, &BUILTIN).unwrap();
        assert_eq!(breakdown.candidate.candidate_type, CandidateType::Fulltime);
        assert_eq!(breakdown.candidate.confidence, 0.85);
    }

    #[test]
    fn test_undated_degree_keeps_experienced_fulltime_candidate_fulltime() {
        let mut input = base_input();
        input.job_type = Some(JobType::Fulltime);
        let role = |start: NaiveDate, end: NaiveDate| ExperienceEntry {
            title: "Data Analyst".to_string(),
            organization: "Acme".to_string(),
            start,
            end: Some(end),
            bullets: vec!["Built weekly revenue reports for 12 regions".to_string()],
        };
        input.resume_sections = ResumeSections {
            education: vec![EducationEntry {
                institution: "State University".to_string(),
                degree: "BSc".to_string(),
                field: None,
                start: None,
                end: None,
            }],
            experience: vec![
                role(date(2016, 1, 1), date(2021, 1, 1)),
                role(date(2021, 2, 1), date(2026, 1, 1)),
            ],
            ..Default::default()
        };

        let breakdown = score(&input, &BUILTIN).unwrap();
        assert_eq!(breakdown.candidate.candidate_type, CandidateType::Fulltime);
        assert_eq!(breakdown.candidate.rule, DetectionRule::ExplicitFulltime);
        assert_eq!(breakdown.candidate.confidence, 0.90);
    }

    #[test]
    fn test_rule_based_scorer_matches_free_function() {
        let scorer = RuleBasedFitScorer::new(Arc::new(ReferenceData::builtin()));
        let input = base_input();
        assert_eq!(scorer.score(&input).unwrap(), score(&input, &BUILTIN).unwrap());
    }
}
