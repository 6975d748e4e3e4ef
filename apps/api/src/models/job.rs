use serde::{Deserialize, Serialize};

use crate::models::qualifications::DegreeLevel;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequirementStrength {
    Required,
    Preferred,
}

/// What a single requirement asks for. The threshold lives in the variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RequirementKind {
    Degree {
        level: DegreeLevel,
        /// Accepted fields of study. Empty means any field.
        #[serde(default)]
        fields: Vec<String>,
    },
    ExperienceYears {
        years: f64,
    },
    Certification {
        name: String,
    },
}

/// One required or preferred qualification extracted from a job description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRequirement {
    #[serde(flatten)]
    pub kind: RequirementKind,
    pub strength: RequirementStrength,
}

impl JobRequirement {
    pub fn required(kind: RequirementKind) -> Self {
        Self {
            kind,
            strength: RequirementStrength::Required,
        }
    }

    pub fn preferred(kind: RequirementKind) -> Self {
        Self {
            kind,
            strength: RequirementStrength::Preferred,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Importance {
    High,
    Medium,
    Low,
}

impl Importance {
    /// Weight used for coverage and keyword scoring.
    pub fn weight(&self) -> f64 {
        match self {
            Importance::High => 3.0,
            Importance::Medium => 2.0,
            Importance::Low => 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeywordCategory {
    HardSkill,
    SoftSkill,
    Tool,
    Domain,
    Certification,
    #[default]
    Other,
}

/// A keyword extracted from the job description by the upstream extractor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobKeyword {
    pub keyword: String,
    #[serde(default)]
    pub category: KeywordCategory,
    pub importance: Importance,
    #[serde(default = "default_strength")]
    pub requirement: RequirementStrength,
}

fn default_strength() -> RequirementStrength {
    RequirementStrength::Preferred
}

impl JobKeyword {
    pub fn new(keyword: &str, importance: Importance, requirement: RequirementStrength) -> Self {
        Self {
            keyword: keyword.to_string(),
            category: KeywordCategory::Other,
            importance,
            requirement,
        }
    }
}
