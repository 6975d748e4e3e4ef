//! Component Weight Resolver.
//!
//! Two lookup tables compose here: archetype → base profile, and detected job
//! role → additive deltas. `resolve_weights` sums them, clamps at zero and
//! renormalises. No archetype × role table exists anywhere.

use serde::{Deserialize, Serialize};

use crate::candidate::CandidateType;
use crate::models::job::{JobRequirement, RequirementKind};
use crate::models::qualifications::sanitize_years;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComponentWeights {
    pub keywords: f64,
    pub qualification_fit: f64,
    pub content_quality: f64,
    pub sections: f64,
    pub format: f64,
}

/// Signed adjustment applied on top of a base profile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightDelta {
    pub keywords: f64,
    pub qualification_fit: f64,
    pub content_quality: f64,
    pub sections: f64,
    pub format: f64,
}

impl WeightDelta {
    pub const ZERO: WeightDelta = WeightDelta {
        keywords: 0.0,
        qualification_fit: 0.0,
        content_quality: 0.0,
        sections: 0.0,
        format: 0.0,
    };
}

pub const COOP_WEIGHTS: ComponentWeights = ComponentWeights {
    keywords: 0.30,
    qualification_fit: 0.15,
    content_quality: 0.20,
    sections: 0.25,
    format: 0.10,
};

pub const FULLTIME_WEIGHTS: ComponentWeights = ComponentWeights {
    keywords: 0.33,
    qualification_fit: 0.25,
    content_quality: 0.20,
    sections: 0.12,
    format: 0.10,
};

/// Career changers lean on qualification fit and section coverage more than raw keyword density.
pub const CAREER_CHANGER_WEIGHTS: ComponentWeights = ComponentWeights {
    keywords: 0.25,
    qualification_fit: 0.30,
    content_quality: 0.15,
    sections: 0.20,
    format: 0.10,
};

impl ComponentWeights {
    pub fn sum(&self) -> f64 {
        self.keywords + self.qualification_fit + self.content_quality + self.sections + self.format
    }

    fn apply(self, delta: &WeightDelta) -> Self {
        Self {
            keywords: (self.keywords + delta.keywords).max(0.0),
            qualification_fit: (self.qualification_fit + delta.qualification_fit).max(0.0),
            content_quality: (self.content_quality + delta.content_quality).max(0.0),
            sections: (self.sections + delta.sections).max(0.0),
            format: (self.format + delta.format).max(0.0),
        }
    }

    /// Scales all weights so they sum to 1.0. A zero profile is returned unchanged.
    pub fn normalized(self) -> Self {
        let total = self.sum();
        if total <= 0.0 || !total.is_finite() {
            return self;
        }
        Self {
            keywords: self.keywords / total,
            qualification_fit: self.qualification_fit / total,
            content_quality: self.content_quality / total,
            sections: self.sections / total,
            format: self.format / total,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleFamily {
    Technical,
    NonTechnical,
    General,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Seniority {
    Entry,
    Mid,
    Senior,
}

/// Coarse role classification of the target job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRole {
    pub family: RoleFamily,
    pub seniority: Seniority,
}

impl Default for JobRole {
    fn default() -> Self {
        Self {
            family: RoleFamily::General,
            seniority: Seniority::Mid,
        }
    }
}

pub fn base_profile(candidate_type: CandidateType) -> ComponentWeights {
    match candidate_type {
        CandidateType::Coop => COOP_WEIGHTS,
        CandidateType::Fulltime => FULLTIME_WEIGHTS,
        CandidateType::CareerChanger => CAREER_CHANGER_WEIGHTS,
    }
}

fn family_delta(family: RoleFamily) -> WeightDelta {
    match family {
        RoleFamily::Technical => WeightDelta {
            keywords: 0.05,
            sections: -0.05,
            ..WeightDelta::ZERO
        },
        RoleFamily::NonTechnical => WeightDelta {
            keywords: -0.03,
            content_quality: 0.03,
            ..WeightDelta::ZERO
        },
        RoleFamily::General => WeightDelta::ZERO,
    }
}

fn seniority_delta(seniority: Seniority) -> WeightDelta {
    match seniority {
        Seniority::Entry => WeightDelta {
            qualification_fit: -0.03,
            sections: 0.03,
            ..WeightDelta::ZERO
        },
        Seniority::Mid => WeightDelta::ZERO,
        Seniority::Senior => WeightDelta {
            qualification_fit: 0.03,
            content_quality: 0.02,
            sections: -0.05,
            ..WeightDelta::ZERO
        },
    }
}

/// Base profile + role deltas, renormalised to sum to 1.0.
pub fn resolve_weights(candidate_type: CandidateType, role: &JobRole) -> ComponentWeights {
    let base = base_profile(candidate_type);
    let resolved = base
        .apply(&family_delta(role.family))
        .apply(&seniority_delta(role.seniority));

    // A fully clamped-away profile falls back to the base.
    if resolved.sum() <= 0.0 {
        return base.normalized();
    }
    resolved.normalized()
}

const TECHNICAL_TERMS: &[&str] = &[
    "software", "engineer", "engineering", "developer", "programming", "api", "backend",
    "frontend", "full-stack", "cloud", "devops", "infrastructure", "database", "sql", "python",
    "java", "javascript", "rust", "kubernetes", "machine", "data", "algorithms", "systems",
];

const NON_TECHNICAL_TERMS: &[&str] = &[
    "sales", "marketing", "account", "customer", "recruiting", "recruiter", "finance",
    "communications", "brand", "partnerships", "hr", "retail", "hospitality", "merchandising",
    "fundraising", "content",
];

const ENTRY_TERMS: &[&str] = &[
    "intern", "internship", "co-op", "coop", "junior", "entry-level", "graduate", "new-grad",
    "apprentice",
];

const SENIOR_TERMS: &[&str] = &["senior", "sr", "lead", "principal", "staff", "head", "director"];

/// Coarse role detection from job-description text plus experience requirements.
///
/// Entry-level wording wins over senior wording (internship postings routinely
/// mention "senior engineers"), unless five or more years are required.
pub fn detect_job_role(job_description: &str, requirements: &[JobRequirement]) -> JobRole {
    let text = job_description.to_lowercase();
    let tokens: Vec<&str> = text
        .split(|c: char| !(c.is_alphanumeric() || c == '-'))
        .filter(|t| !t.is_empty())
        .collect();
    let count = |terms: &[&str]| tokens.iter().filter(|t| terms.contains(*t)).count();

    let technical = count(TECHNICAL_TERMS);
    let non_technical = count(NON_TECHNICAL_TERMS);
    let family = if technical >= 2 && technical >= non_technical {
        RoleFamily::Technical
    } else if non_technical >= 2 {
        RoleFamily::NonTechnical
    } else {
        RoleFamily::General
    };

    let max_years = requirements
        .iter()
        .filter_map(|r| match r.kind {
            RequirementKind::ExperienceYears { years } => Some(sanitize_years(years)),
            _ => None,
        })
        .fold(0.0_f64, f64::max);

    let seniority = if max_years >= 5.0 {
        Seniority::Senior
    } else if count(ENTRY_TERMS) > 0 || text.contains("entry level") || text.contains("new grad") {
        Seniority::Entry
    } else if count(SENIOR_TERMS) > 0 {
        Seniority::Senior
    } else {
        Seniority::Mid
    };

    JobRole { family, seniority }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_TYPES: [CandidateType; 3] = [
        CandidateType::Coop,
        CandidateType::Fulltime,
        CandidateType::CareerChanger,
    ];
    const ALL_FAMILIES: [RoleFamily; 3] = [RoleFamily::Technical, RoleFamily::NonTechnical, RoleFamily::General];
    const ALL_SENIORITIES: [Seniority; 3] = [Seniority::Entry, Seniority::Mid, Seniority::Senior];

    #[test]
    fn test_base_profiles_sum_to_one() {
        for t in ALL_TYPES {
            assert!((base_profile(t).sum() - 1.0).abs() < 1e-6, "{t:?}");
        }
    }

    #[test]
    fn test_every_resolved_profile_sums_to_one_and_is_non_negative() {
        for t in ALL_TYPES {
            for family in ALL_FAMILIES {
                for seniority in ALL_SENIORITIES {
                    let w = resolve_weights(t, &JobRole { family, seniority });
                    assert!((w.sum() - 1.0).abs() < 1e-6, "{t:?} {family:?} {seniority:?}");
                    for v in [w.keywords, w.qualification_fit, w.content_quality, w.sections, w.format] {
                        assert!(v >= 0.0);
                    }
                }
            }
        }
    }

    #[test]
    fn test_career_changer_shifts_weight_from_keywords() {
        let role = JobRole::default();
        let cc = resolve_weights(CandidateType::CareerChanger, &role);
        let ft = resolve_weights(CandidateType::Fulltime, &role);
        assert!(cc.keywords < ft.keywords);
        assert!(cc.qualification_fit > ft.qualification_fit);
        assert!(cc.sections > ft.sections);
    }

    #[test]
    fn test_technical_role_moves_weight_from_sections_to_keywords() {
        let general = resolve_weights(CandidateType::Fulltime, &JobRole::default());
        let technical = resolve_weights(
            CandidateType::Fulltime,
            &JobRole {
                family: RoleFamily::Technical,
                seniority: Seniority::Mid,
            },
        );
        assert!(technical.keywords > general.keywords);
        assert!(technical.sections < general.sections);
    }

    #[test]
    fn test_general_mid_role_keeps_base_profile() {
        let w = resolve_weights(CandidateType::Coop, &JobRole::default());
        assert!((w.keywords - COOP_WEIGHTS.keywords).abs() < 1e-9);
        assert!((w.sections - COOP_WEIGHTS.sections).abs() < 1e-9);
    }

    #[test]
    fn test_detects_technical_senior_role() {
        let jd = "Senior Backend Engineer. Build APIs in Rust and Python on cloud infrastructure.";
        let role = detect_job_role(jd, &[]);
        assert_eq!(role.family, RoleFamily::Technical);
        assert_eq!(role.seniority, Seniority::Senior);
    }

    #[test]
    fn test_internship_mentioning_senior_engineers_is_entry() {
        let jd = "Software Engineering Intern. Pair with senior engineers on backend systems.";
        let role = detect_job_role(jd, &[]);
        assert_eq!(role.seniority, Seniority::Entry);
    }

    #[test]
    fn test_five_years_required_implies_senior() {
        let reqs = [JobRequirement::required(RequirementKind::ExperienceYears { years: 5.0 })];
        let role = detect_job_role("Account Executive. Own the sales pipeline for customer accounts.", &reqs);
        assert_eq!(role.family, RoleFamily::NonTechnical);
        assert_eq!(role.seniority, Seniority::Senior);
    }

    #[test]
    fn test_sparse_text_is_general_mid() {
        assert_eq!(detect_job_role("Join our team!", &[]), JobRole::default());
    }
}
