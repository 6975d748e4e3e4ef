//! Section Order Validator.

use serde::{Deserialize, Serialize};

use crate::candidate::CandidateType;
use crate::models::resume::SectionKind;

const COOP_ORDER: [SectionKind; 7] = [
    SectionKind::Summary,
    SectionKind::Education,
    SectionKind::Skills,
    SectionKind::Projects,
    SectionKind::Experience,
    SectionKind::Certifications,
    SectionKind::Awards,
];

const FULLTIME_ORDER: [SectionKind; 7] = [
    SectionKind::Summary,
    SectionKind::Experience,
    SectionKind::Skills,
    SectionKind::Projects,
    SectionKind::Education,
    SectionKind::Certifications,
    SectionKind::Awards,
];

const CAREER_CHANGER_ORDER: [SectionKind; 7] = [
    SectionKind::Summary,
    SectionKind::Skills,
    SectionKind::Education,
    SectionKind::Projects,
    SectionKind::Experience,
    SectionKind::Certifications,
    SectionKind::Awards,
];

pub fn canonical_order(candidate_type: CandidateType) -> &'static [SectionKind] {
    match candidate_type {
        CandidateType::Coop => &COOP_ORDER,
        CandidateType::Fulltime => &FULLTIME_ORDER,
        CandidateType::CareerChanger => &CAREER_CHANGER_ORDER,
    }
}

fn rank(candidate_type: CandidateType, kind: SectionKind) -> usize {
    canonical_order(candidate_type)
        .iter()
        .position(|k| *k == kind)
        .unwrap_or(usize::MAX)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderViolation {
    /// Appears too late in the résumé.
    pub section: SectionKind,
    /// Should come after `section` but appears before it.
    pub appears_before: SectionKind,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionOrderValidation {
    pub is_correct_order: bool,
    /// The résumé's own sections, rearranged into canonical order.
    pub expected_order: Vec<SectionKind>,
    pub actual_order: Vec<SectionKind>,
    pub violations: Vec<OrderViolation>,
}

/// Compares the résumé's section sequence with the archetype's canonical order.
///
/// Repeated headings count at their first position. Every inverted pair is
/// reported, in résumé order.
pub fn validate_section_order(
    candidate_type: CandidateType,
    section_order: &[SectionKind],
) -> SectionOrderValidation {
    let mut actual_order: Vec<SectionKind> = Vec::with_capacity(section_order.len());
    for kind in section_order {
        if !actual_order.contains(kind) {
            actual_order.push(*kind);
        }
    }

    let mut expected_order = actual_order.clone();
    expected_order.sort_by_key(|k| rank(candidate_type, *k));

    let mut violations = Vec::new();
    for (i, earlier) in actual_order.iter().enumerate() {
        for later in &actual_order[i + 1..] {
            if rank(candidate_type, *later) < rank(candidate_type, *earlier) {
                violations.push(OrderViolation {
                    section: *later,
                    appears_before: *earlier,
                    message: format!(
                        "{} should appear before {} on a {} résumé",
                        later.label(),
                        earlier.label(),
                        candidate_type.label()
                    ),
                });
            }
        }
    }

    SectionOrderValidation {
        is_correct_order: violations.is_empty(),
        expected_order,
        actual_order,
        violations,
    }
}
