//! Qualification Fit Scorer: degree, experience and certification fit against JD requirements.
//!
//! Weighted 40/40/20. A requirement kind the job description never mentions
//! scores 100: absence of a requirement is not a penalty. When both required
//! and preferred requirements of a kind exist, only the required ones count.

use serde::{Deserialize, Serialize};

use crate::models::job::{JobRequirement, RequirementKind, RequirementStrength};
use crate::models::qualifications::{sanitize_years, CandidateQualifications, DegreeLevel};
use crate::qualification::degree::{certification_matches, field_matches, FieldMatch};
use crate::reference::ReferenceData;
use crate::scoring::round_score;

pub const DEGREE_WEIGHT: f64 = 0.4;
pub const EXPERIENCE_WEIGHT: f64 = 0.4;
pub const CERTIFICATION_WEIGHT: f64 = 0.2;

const DEGREE_FULL: f64 = 100.0;
const DEGREE_FIELD_MISMATCH: f64 = 70.0;
const DEGREE_UNMET: f64 = 20.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualificationFit {
    pub score: f64,
    pub degree_score: f64,
    pub experience_score: f64,
    pub certification_score: f64,
    pub missing_certifications: Vec<String>,
    /// Human-readable gaps, fed to suggestion generation.
    pub gaps: Vec<String>,
}

/// Pure function of its inputs; repeated calls return identical results.
pub fn calculate_qualification_fit(
    requirements: &[JobRequirement],
    qualifications: &CandidateQualifications,
    reference: &ReferenceData,
) -> QualificationFit {
    let mut gaps = Vec::new();

    let degree_score = degree_sub_score(requirements, qualifications, reference, &mut gaps);
    let experience_score = experience_sub_score(requirements, qualifications, &mut gaps);
    let (certification_score, missing_certifications) =
        certification_sub_score(requirements, qualifications);
    for cert in &missing_certifications {
        gaps.push(format!("Missing certification: {cert}"));
    }

    let score = round_score(
        DEGREE_WEIGHT * degree_score
            + EXPERIENCE_WEIGHT * experience_score
            + CERTIFICATION_WEIGHT * certification_score,
    );

    QualificationFit {
        score,
        degree_score,
        experience_score,
        certification_score,
        missing_certifications,
        gaps,
    }
}

/// Required requirements of a kind if any exist, otherwise the preferred ones.
fn effective<'a, T>(
    requirements: &'a [JobRequirement],
    select: impl Fn(&'a RequirementKind) -> Option<T>,
) -> Vec<T> {
    let of_strength = |strength: RequirementStrength| -> Vec<T> {
        requirements
            .iter()
            .filter(|r| r.strength == strength)
            .filter_map(|r| select(&r.kind))
            .collect()
    };
    let required = of_strength(RequirementStrength::Required);
    if required.is_empty() {
        of_strength(RequirementStrength::Preferred)
    } else {
        required
    }
}

fn degree_sub_score(
    requirements: &[JobRequirement],
    qualifications: &CandidateQualifications,
    reference: &ReferenceData,
    gaps: &mut Vec<String>,
) -> f64 {
    let wanted: Vec<(DegreeLevel, &[String])> = effective(requirements, |kind| match kind {
        RequirementKind::Degree { level, fields } => Some((*level, fields.as_slice())),
        _ => None,
    });
    if wanted.is_empty() {
        return DEGREE_FULL;
    }

    let Some(held) = qualifications.degree.as_ref() else {
        let (level, fields) = wanted[0];
        gaps.push(format!(
            "No degree listed; the role asks for a {}{}",
            level.label(),
            describe_fields(fields)
        ));
        return DEGREE_UNMET;
    };

    // JDs list degree options as alternatives, so the best-satisfied one counts.
    // Ties keep the first listed option.
    let (best, gap) = wanted
        .iter()
        .map(|(level, fields)| {
            if held.level < *level {
                return (
                    DEGREE_UNMET,
                    Some(format!(
                        "{} required; highest listed degree is a {}",
                        level.label(),
                        held.level.label()
                    )),
                );
            }
            match field_matches(held.field.as_deref(), fields, reference) {
                FieldMatch::Exact | FieldMatch::RelatedFamily | FieldMatch::AnyField => {
                    (DEGREE_FULL, None)
                }
                FieldMatch::Unrelated => (
                    DEGREE_FIELD_MISMATCH,
                    Some(format!(
                        "Degree field {} is outside the requested{}",
                        held.field.as_deref().unwrap_or("(unspecified)"),
                        describe_fields(fields)
                    )),
                ),
            }
        })
        .fold(None, |acc: Option<(f64, Option<String>)>, current| match acc {
            Some(prev) if prev.0 >= current.0 => Some(prev),
            _ => Some(current),
        })
        .unwrap_or((DEGREE_UNMET, None));

    if let Some(gap) = gap {
        gaps.push(gap);
    }
    best
}

fn experience_sub_score(
    requirements: &[JobRequirement],
    qualifications: &CandidateQualifications,
    gaps: &mut Vec<String>,
) -> f64 {
    let required = effective(requirements, |kind| match kind {
        RequirementKind::ExperienceYears { years } => Some(sanitize_years(*years)),
        _ => None,
    })
    .into_iter()
    .fold(0.0_f64, f64::max);

    if required <= 0.0 {
        return 100.0;
    }

    let held = qualifications.sanitized_years();
    let score = experience_curve(held / required);
    if held < required {
        gaps.push(format!(
            "{} below the {}+ year requirement",
            format_years(required - held),
            format_number(required)
        ));
    }
    score
}

/// Smooth penalty for a years ratio: 100 at or above the requirement,
/// 75 at 80%, 15 at 20%, 0 with no experience. Quadratic, so near-misses
/// lose little and there is no cliff at the threshold.
pub fn experience_curve(ratio: f64) -> f64 {
    if !ratio.is_finite() || ratio <= 0.0 {
        return 0.0;
    }
    if ratio >= 1.0 {
        return 100.0;
    }
    round_score(31.25 * ratio * ratio + 68.75 * ratio)
}

fn certification_sub_score(
    requirements: &[JobRequirement],
    qualifications: &CandidateQualifications,
) -> (f64, Vec<String>) {
    let wanted: Vec<&str> = effective(requirements, |kind| match kind {
        RequirementKind::Certification { name } => Some(name.as_str()),
        _ => None,
    })
    .into_iter()
    .filter(|name| !name.trim().is_empty())
    .collect();

    if wanted.is_empty() {
        return (100.0, Vec::new());
    }

    let missing: Vec<String> = wanted
        .iter()
        .filter(|name| {
            !qualifications
                .certifications
                .iter()
                .any(|held| certification_matches(name, held))
        })
        .map(|name| name.to_string())
        .collect();

    let held = wanted.len() - missing.len();
    let score = round_score(held as f64 / wanted.len() as f64 * 100.0);
    (score, missing)
}

fn describe_fields(fields: &[String]) -> String {
    if fields.is_empty() {
        String::new()
    } else {
        format!(" field ({})", fields.join(" / "))
    }
}

fn format_number(value: f64) -> String {
    let rounded = round_score(value);
    if rounded.fract() == 0.0 {
        format!("{}", rounded as i64)
    } else {
        format!("{rounded:.1}")
    }
}

fn format_years(years: f64) -> String {
    let number = format_number(years);
    if number == "1" {
        format!("{number} year")
    } else {
        format!("{number} years")
    }
}
