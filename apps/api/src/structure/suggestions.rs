//! Structural Suggestion Generator.
//!
//! Every rule is evaluated independently against the same context; any
//! number may fire. Output is sorted by priority, keeping rule-table order
//! within a priority.

use serde::{Deserialize, Serialize};

use crate::candidate::CandidateType;
use crate::models::resume::{ResumeSections, SectionKind};
use crate::structure::order::{validate_section_order, SectionOrderValidation};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionCategory {
    SectionPresence,
    SectionOrder,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionPriority {
    Critical,
    Warning,
    Suggestion,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StructureRule {
    CareerChangerMissingSummary,
    CareerChangerExperienceBeforeSkills,
    CoopExperienceBeforeEducation,
    CoopMissingProjects,
    CoopMissingEducation,
    FulltimeMissingExperience,
    FulltimeEducationBeforeExperience,
    MissingSkills,
    CanonicalOrder,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuralSuggestion {
    pub category: SuggestionCategory,
    pub priority: SuggestionPriority,
    pub sections: Vec<SectionKind>,
    pub message: String,
    pub rule: StructureRule,
}

struct RuleContext<'a> {
    candidate_type: CandidateType,
    sections: &'a ResumeSections,
    order: &'a [SectionKind],
    validation: &'a SectionOrderValidation,
}

impl RuleContext<'_> {
    fn has(&self, kind: SectionKind) -> bool {
        self.sections.is_present(kind) || self.order.contains(&kind)
    }

    fn position(&self, kind: SectionKind) -> Option<usize> {
        self.order.iter().position(|k| *k == kind)
    }

    /// True when both sections appear and `first` comes before `second`.
    fn before(&self, first: SectionKind, second: SectionKind) -> bool {
        matches!(
            (self.position(first), self.position(second)),
            (Some(a), Some(b)) if a < b
        )
    }
}

type RuleFn = fn(&RuleContext<'_>) -> Option<StructuralSuggestion>;

const RULES: &[RuleFn] = &[
    career_changer_missing_summary,
    career_changer_experience_before_skills,
    coop_experience_before_education,
    coop_missing_projects,
    coop_missing_education,
    fulltime_missing_experience,
    fulltime_education_before_experience,
    missing_skills,
    canonical_order,
];

fn suggestion(
    rule: StructureRule,
    category: SuggestionCategory,
    priority: SuggestionPriority,
    sections: Vec<SectionKind>,
    message: &str,
) -> Option<StructuralSuggestion> {
    Some(StructuralSuggestion {
        category,
        priority,
        sections,
        message: message.to_string(),
        rule,
    })
}

fn career_changer_missing_summary(ctx: &RuleContext<'_>) -> Option<StructuralSuggestion> {
    if ctx.candidate_type != CandidateType::CareerChanger || ctx.has(SectionKind::Summary) {
        return None;
    }
    suggestion(
        StructureRule::CareerChangerMissingSummary,
        SuggestionCategory::SectionPresence,
        SuggestionPriority::Critical,
        vec![SectionKind::Summary],
        "Add a summary that frames your move into this field; without it recruiters read your past titles first",
    )
}

fn career_changer_experience_before_skills(ctx: &RuleContext<'_>) -> Option<StructuralSuggestion> {
    if ctx.candidate_type != CandidateType::CareerChanger
        || !ctx.before(SectionKind::Experience, SectionKind::Skills)
    {
        return None;
    }
    suggestion(
        StructureRule::CareerChangerExperienceBeforeSkills,
        SuggestionCategory::SectionOrder,
        SuggestionPriority::Warning,
        vec![SectionKind::Skills, SectionKind::Experience],
        "Move Skills above Experience so transferable skills are seen before unrelated job titles",
    )
}

fn coop_experience_before_education(ctx: &RuleContext<'_>) -> Option<StructuralSuggestion> {
    if ctx.candidate_type != CandidateType::Coop
        || !ctx.before(SectionKind::Experience, SectionKind::Education)
    {
        return None;
    }
    suggestion(
        StructureRule::CoopExperienceBeforeEducation,
        SuggestionCategory::SectionOrder,
        SuggestionPriority::Warning,
        vec![SectionKind::Education, SectionKind::Experience],
        "Place Education before Experience; co-op recruiters screen on program and year first",
    )
}

fn coop_missing_projects(ctx: &RuleContext<'_>) -> Option<StructuralSuggestion> {
    if ctx.candidate_type != CandidateType::Coop || ctx.has(SectionKind::Projects) {
        return None;
    }
    let (priority, message) = if ctx.has(SectionKind::Experience) {
        (
            SuggestionPriority::Warning,
            "Add a Projects section to show hands-on work beyond your listed roles",
        )
    } else {
        (
            SuggestionPriority::Critical,
            "Add a Projects section; with no work experience listed, projects are your main evidence of skill",
        )
    };
    suggestion(
        StructureRule::CoopMissingProjects,
        SuggestionCategory::SectionPresence,
        priority,
        vec![SectionKind::Projects],
        message,
    )
}

fn coop_missing_education(ctx: &RuleContext<'_>) -> Option<StructuralSuggestion> {
    if ctx.candidate_type != CandidateType::Coop || ctx.has(SectionKind::Education) {
        return None;
    }
    suggestion(
        StructureRule::CoopMissingEducation,
        SuggestionCategory::SectionPresence,
        SuggestionPriority::Critical,
        vec![SectionKind::Education],
        "Add an Education section with your program, institution and expected graduation date",
    )
}

fn fulltime_missing_experience(ctx: &RuleContext<'_>) -> Option<StructuralSuggestion> {
    if ctx.candidate_type != CandidateType::Fulltime || ctx.has(SectionKind::Experience) {
        return None;
    }
    suggestion(
        StructureRule::FulltimeMissingExperience,
        SuggestionCategory::SectionPresence,
        SuggestionPriority::Critical,
        vec![SectionKind::Experience],
        "Add an Experience section; full-time roles are screened primarily on work history",
    )
}

fn fulltime_education_before_experience(ctx: &RuleContext<'_>) -> Option<StructuralSuggestion> {
    if ctx.candidate_type != CandidateType::Fulltime
        || !ctx.before(SectionKind::Education, SectionKind::Experience)
    {
        return None;
    }
    suggestion(
        StructureRule::FulltimeEducationBeforeExperience,
        SuggestionCategory::SectionOrder,
        SuggestionPriority::Suggestion,
        vec![SectionKind::Experience, SectionKind::Education],
        "Consider moving Experience above Education now that you have professional roles to lead with",
    )
}

fn missing_skills(ctx: &RuleContext<'_>) -> Option<StructuralSuggestion> {
    if ctx.has(SectionKind::Skills) {
        return None;
    }
    suggestion(
        StructureRule::MissingSkills,
        SuggestionCategory::SectionPresence,
        SuggestionPriority::Warning,
        vec![SectionKind::Skills],
        "Add a Skills section; applicant tracking systems look there first for keyword matches",
    )
}

fn canonical_order(ctx: &RuleContext<'_>) -> Option<StructuralSuggestion> {
    if ctx.validation.is_correct_order {
        return None;
    }
    let expected: Vec<&str> = ctx.validation.expected_order.iter().map(|k| k.label()).collect();
    let message = format!(
        "Recommended section order for a {} résumé: {}",
        ctx.candidate_type.label(),
        expected.join(" → ")
    );
    suggestion(
        StructureRule::CanonicalOrder,
        SuggestionCategory::SectionOrder,
        SuggestionPriority::Suggestion,
        ctx.validation.expected_order.clone(),
        &message,
    )
}

/// Presence and ordering suggestions for one résumé.
pub fn generate_structural_suggestions(
    candidate_type: CandidateType,
    sections: &ResumeSections,
    section_order: &[SectionKind],
) -> Vec<StructuralSuggestion> {
    let validation = validate_section_order(candidate_type, section_order);
    let ctx = RuleContext {
        candidate_type,
        sections,
        order: section_order,
        validation: &validation,
    };

    let mut out: Vec<StructuralSuggestion> = RULES.iter().filter_map(|rule| rule(&ctx)).collect();
    out.sort_by_key(|s| s.priority);

    tracing::debug!(
        candidate_type = candidate_type.label(),
        count = out.len(),
        "Structural suggestions generated"
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::{EducationEntry, ProjectEntry};
    use SectionKind::*;

    fn rules(out: &[StructuralSuggestion]) -> Vec<StructureRule> {
        out.iter().map(|s| s.rule).collect()
    }

    fn education() -> EducationEntry {
        EducationEntry {
            institution: "McGill University".to_string(),
            degree: "BEng".to_string(),
            field: Some("Software Engineering".to_string()),
            start: None,
            end: None,
        }
    }

    #[test]
    fn test_career_changer_without_summary_is_critical() {
        let sections = ResumeSections {
            skills: vec!["SQL".to_string()],
            ..Default::default()
        };
        let out = generate_structural_suggestions(CandidateType::CareerChanger, &sections, &[Skills]);
        assert_eq!(out[0].rule, StructureRule::CareerChangerMissingSummary);
        assert_eq!(out[0].priority, SuggestionPriority::Critical);
        assert_eq!(out[0].category, SuggestionCategory::SectionPresence);
    }

    #[test]
    fn test_coop_experience_before_education_fires_order_rules() {
        let sections = ResumeSections {
            education: vec![education()],
            skills: vec!["Rust".to_string()],
            projects: vec![ProjectEntry {
                name: "Compiler".to_string(),
                technologies: vec![],
                bullets: vec![],
            }],
            ..Default::default()
        };
        let out = generate_structural_suggestions(
            CandidateType::Coop,
            &sections,
            &[Experience, Education, Skills, Projects],
        );
        let fired = rules(&out);
        assert!(fired.contains(&StructureRule::CoopExperienceBeforeEducation));
        assert!(fired.contains(&StructureRule::CanonicalOrder));
        assert!(out
            .iter()
            .all(|s| s.category == SuggestionCategory::SectionOrder));
    }

    #[test]
    fn test_coop_missing_projects_is_critical_without_experience() {
        let sections = ResumeSections {
            education: vec![education()],
            skills: vec!["Rust".to_string()],
            ..Default::default()
        };
        let out = generate_structural_suggestions(CandidateType::Coop, &sections, &[Education, Skills]);
        assert_eq!(rules(&out), vec![StructureRule::CoopMissingProjects]);
        assert_eq!(out[0].priority, SuggestionPriority::Critical);
    }

    #[test]
    fn test_rules_fire_in_combination_sorted_by_priority() {
        let out = generate_structural_suggestions(
            CandidateType::Fulltime,
            &ResumeSections::default(),
            &[],
        );
        assert_eq!(
            rules(&out),
            vec![StructureRule::FulltimeMissingExperience, StructureRule::MissingSkills]
        );
    }

    #[test]
    fn test_fulltime_education_first_is_only_a_suggestion() {
        let out = generate_structural_suggestions(
            CandidateType::Fulltime,
            &ResumeSections::default(),
            &[Education, Experience, Skills],
        );
        let fired = rules(&out);
        assert!(fired.contains(&StructureRule::FulltimeEducationBeforeExperience));
        assert!(out
            .iter()
            .filter(|s| s.category == SuggestionCategory::SectionOrder)
            .all(|s| s.priority == SuggestionPriority::Suggestion));
    }

    #[test]
    fn test_well_structured_resume_has_no_suggestions() {
        let out = generate_structural_suggestions(
            CandidateType::Fulltime,
            &ResumeSections::default(),
            &[Summary, Experience, Skills, Education],
        );
        assert!(out.is_empty());
    }
}
