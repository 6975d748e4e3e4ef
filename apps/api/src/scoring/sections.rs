use serde::{Deserialize, Serialize};

use crate::candidate::CandidateType;
use crate::models::resume::{ResumeSections, SectionKind};
use crate::scoring::round_score;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SectionStatus {
    Complete,
    Thin,
    Missing,
}

impl SectionStatus {
    fn health(&self) -> f64 {
        match self {
            SectionStatus::Complete => 1.0,
            SectionStatus::Thin => 0.6,
            SectionStatus::Missing => 0.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SectionHealth {
    pub section: SectionKind,
    pub weight: f64,
    pub status: SectionStatus,
    pub entry_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SectionCoverage {
    pub score: f64,
    pub sections: Vec<SectionHealth>,
    pub missing_sections: Vec<SectionKind>,
}

// Each table sums to 1.0. Awards never carry weight.
const COOP_SECTION_WEIGHTS: &[(SectionKind, f64)] = &[
    (SectionKind::Education, 0.30),
    (SectionKind::Skills, 0.25),
    (SectionKind::Projects, 0.25),
    (SectionKind::Experience, 0.10),
    (SectionKind::Summary, 0.05),
    (SectionKind::Certifications, 0.05),
];

const FULLTIME_SECTION_WEIGHTS: &[(SectionKind, f64)] = &[
    (SectionKind::Experience, 0.40),
    (SectionKind::Skills, 0.20),
    (SectionKind::Education, 0.15),
    (SectionKind::Summary, 0.10),
    (SectionKind::Projects, 0.10),
    (SectionKind::Certifications, 0.05),
];

const CAREER_CHANGER_SECTION_WEIGHTS: &[(SectionKind, f64)] = &[
    (SectionKind::Summary, 0.20),
    (SectionKind::Skills, 0.25),
    (SectionKind::Experience, 0.20),
    (SectionKind::Education, 0.15),
    (SectionKind::Projects, 0.15),
    (SectionKind::Certifications, 0.05),
];

pub fn section_weights(candidate_type: CandidateType) -> &'static [(SectionKind, f64)] {
    match candidate_type {
        CandidateType::Coop => COOP_SECTION_WEIGHTS,
        CandidateType::Fulltime => FULLTIME_SECTION_WEIGHTS,
        CandidateType::CareerChanger => CAREER_CHANGER_SECTION_WEIGHTS,
    }
}

fn entry_count(sections: &ResumeSections, kind: SectionKind) -> usize {
    match kind {
        SectionKind::Summary => usize::from(sections.is_present(SectionKind::Summary)),
        SectionKind::Education => sections.education.len(),
        SectionKind::Skills => sections.skills.iter().filter(|s| !s.trim().is_empty()).count(),
        SectionKind::Projects => sections.projects.len(),
        SectionKind::Experience => sections.experience.len(),
        SectionKind::Certifications => sections
            .certifications
            .iter()
            .filter(|c| !c.trim().is_empty())
            .count(),
        SectionKind::Awards => sections.awards.iter().filter(|a| !a.trim().is_empty()).count(),
    }
}

fn status_of(sections: &ResumeSections, kind: SectionKind) -> SectionStatus {
    if !sections.is_present(kind) {
        return SectionStatus::Missing;
    }
    let well_formed = match kind {
        SectionKind::Experience => {
            sections.experience.len() >= 2
                || sections.experience.iter().any(|e| !e.bullets.is_empty())
        }
        SectionKind::Projects => {
            sections.projects.len() >= 2 || sections.projects.iter().any(|p| !p.bullets.is_empty())
        }
        SectionKind::Skills => entry_count(sections, kind) >= 3,
        _ => true,
    };
    if well_formed {
        SectionStatus::Complete
    } else {
        SectionStatus::Thin
    }
}

/// Weighted presence and health of the sections expected for the archetype.
pub fn compute_section_coverage(
    sections: &ResumeSections,
    candidate_type: CandidateType,
) -> SectionCoverage {
    let mut healths = Vec::new();
    let mut missing_sections = Vec::new();
    let mut weighted = 0.0;

    for &(kind, weight) in section_weights(candidate_type) {
        let status = status_of(sections, kind);
        if status == SectionStatus::Missing {
            missing_sections.push(kind);
        }
        weighted += weight * status.health();
        healths.push(SectionHealth {
            section: kind,
            weight,
            status,
            entry_count: entry_count(sections, kind),
        });
    }

    let total_weight: f64 = section_weights(candidate_type).iter().map(|(_, w)| w).sum();
    let score = if total_weight > 0.0 {
        (weighted / total_weight * 100.0).clamp(0.0, 100.0)
    } else {
        0.0
    };

    SectionCoverage {
        score: round_score(score),
        sections: healths,
        missing_sections,
    }
}
