//! Score Aggregator: weighted overall score, tier, and prioritized action items.

use serde::{Deserialize, Serialize};

use crate::models::resume::SectionKind;
use crate::scoring::weights::ComponentWeights;
use crate::scoring::{clamp_score, round_score};

/// Components at or above this score produce no action item.
const ACTION_THRESHOLD: f64 = 85.0;
const MAX_ACTION_ITEMS: usize = 5;
const MAX_NAMED_KEYWORDS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComponentScores {
    pub keywords: f64,
    pub qualification_fit: f64,
    pub content_quality: f64,
    pub sections: f64,
    pub format: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Component {
    Keywords,
    QualificationFit,
    ContentQuality,
    Sections,
    Format,
}

impl Component {
    /// Fixed order, also used to break ties between equal shortfalls.
    pub const ALL: [Component; 5] = [
        Component::Keywords,
        Component::QualificationFit,
        Component::ContentQuality,
        Component::Sections,
        Component::Format,
    ];
}

impl ComponentScores {
    pub fn get(&self, component: Component) -> f64 {
        match component {
            Component::Keywords => self.keywords,
            Component::QualificationFit => self.qualification_fit,
            Component::ContentQuality => self.content_quality,
            Component::Sections => self.sections,
            Component::Format => self.format,
        }
    }

    fn clamped(&self) -> Self {
        Self {
            keywords: clamp_score(self.keywords),
            qualification_fit: clamp_score(self.qualification_fit),
            content_quality: clamp_score(self.content_quality),
            sections: clamp_score(self.sections),
            format: clamp_score(self.format),
        }
    }
}

impl ComponentWeights {
    pub fn get(&self, component: Component) -> f64 {
        match component {
            Component::Keywords => self.keywords,
            Component::QualificationFit => self.qualification_fit,
            Component::ContentQuality => self.content_quality,
            Component::Sections => self.sections,
            Component::Format => self.format,
        }
    }
}

/// Cut points: excellent ≥ 85, strong ≥ 70, moderate ≥ 55, weak below.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Excellent,
    Strong,
    Moderate,
    Weak,
}

impl Tier {
    pub fn from_score(score: f64) -> Self {
        match score {
            s if s >= 85.0 => Tier::Excellent,
            s if s >= 70.0 => Tier::Strong,
            s if s >= 55.0 => Tier::Moderate,
            _ => Tier::Weak,
        }
    }
}

/// Weighted sum of clamped component scores, rounded to one decimal.
pub fn aggregate(weights: &ComponentWeights, scores: &ComponentScores) -> (f64, Tier) {
    let scores = scores.clamped();
    let overall = Component::ALL
        .iter()
        .map(|c| weights.get(*c) * scores.get(*c))
        .sum::<f64>();
    let overall = round_score(clamp_score(overall));
    (overall, Tier::from_score(overall))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionPriority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionItem {
    pub component: Component,
    pub priority: ActionPriority,
    pub message: String,
}

/// Detail from the component reports used to make action items specific.
#[derive(Debug, Clone, Default)]
pub struct ActionEvidence<'a> {
    pub missing_high_importance: &'a [String],
    pub missing_keywords: &'a [String],
    pub qualification_gaps: &'a [String],
    pub quantification_density: f64,
    pub total_bullets: usize,
    pub missing_sections: &'a [SectionKind],
    pub format_issues: &'a [String],
}

/// Up to five items, weakest weighted components first.
pub fn build_action_items(
    weights: &ComponentWeights,
    scores: &ComponentScores,
    evidence: &ActionEvidence<'_>,
) -> Vec<ActionItem> {
    let scores = scores.clamped();
    let mut ranked: Vec<(Component, f64)> = Component::ALL
        .iter()
        .filter(|c| scores.get(**c) < ACTION_THRESHOLD)
        .map(|c| (*c, weights.get(*c) * (100.0 - scores.get(*c))))
        .collect();
    // Stable sort keeps the fixed component order among equal shortfalls.
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

    ranked
        .into_iter()
        .take(MAX_ACTION_ITEMS)
        .map(|(component, shortfall)| ActionItem {
            component,
            priority: priority_for(shortfall),
            message: message_for(component, scores.get(component), evidence),
        })
        .collect()
}

fn priority_for(weighted_shortfall: f64) -> ActionPriority {
    match weighted_shortfall {
        s if s >= 10.0 => ActionPriority::High,
        s if s >= 5.0 => ActionPriority::Medium,
        _ => ActionPriority::Low,
    }
}

fn message_for(component: Component, score: f64, evidence: &ActionEvidence<'_>) -> String {
    match component {
        Component::Keywords => {
            let named = if evidence.missing_high_importance.is_empty() {
                evidence.missing_keywords
            } else {
                evidence.missing_high_importance
            };
            if named.is_empty() {
                "Mirror the job description's wording more closely in your bullets and skills".to_string()
            } else {
                let list: Vec<&str> = named
                    .iter()
                    .take(MAX_NAMED_KEYWORDS)
                    .map(String::as_str)
                    .collect();
                format!(
                    "Add missing keywords where you have real experience with them: {}",
                    list.join(", ")
                )
            }
        }
        Component::QualificationFit => match evidence.qualification_gaps.first() {
            Some(gap) if evidence.qualification_gaps.len() > 1 => format!(
                "Address qualification gaps: {gap} (and {} more)",
                evidence.qualification_gaps.len() - 1
            ),
            Some(gap) => format!("Address qualification gap: {gap}"),
            None => "Make degree, years of experience and certifications easy to find".to_string(),
        },
        Component::ContentQuality => {
            if evidence.total_bullets == 0 {
                "Add achievement bullets to your experience and projects".to_string()
            } else {
                format!(
                    "Quantify more achievements: only {:.0}% of bullets include a metric",
                    evidence.quantification_density
                )
            }
        }
        Component::Sections => {
            if evidence.missing_sections.is_empty() {
                format!("Flesh out thin sections (section coverage {score:.0}/100)")
            } else {
                let names: Vec<&str> = evidence
                    .missing_sections
                    .iter()
                    .map(|s| s.label())
                    .collect();
                format!("Add missing sections: {}", names.join(", "))
            }
        }
        Component::Format => match evidence.format_issues.first() {
            Some(issue) => format!("Fix formatting: {issue}"),
            None => "Simplify formatting so applicant tracking systems parse it cleanly".to_string(),
        },
    }
}
