//! Content quality: how well the résumé's achievement bullets are written.
//!
//! Three bullet-level signals feed the score:
//! - quantified: carries a number, percentage, currency amount, `~N` estimate or `Nx` multiplier
//! - action verb: opens with a strong verb
//! - vague: leans on filler verbs or unquantified scale words

use serde::{Deserialize, Serialize};

use crate::models::resume::ResumeSections;
use crate::scoring::{clamp_score, round_score};

const QUANTIFIED_WEIGHT: f64 = 0.5;
const ACTION_VERB_WEIGHT: f64 = 0.3;
const PRECISION_WEIGHT: f64 = 0.2;
const MAX_EXAMPLES: usize = 3;

const STRONG_VERBS: &[&str] = &[
    "architected", "built", "created", "delivered", "designed", "developed", "drove", "engineered",
    "established", "implemented", "launched", "led", "managed", "owned", "reduced", "increased",
    "shipped", "spearheaded", "streamlined", "automated", "optimized", "migrated", "negotiated",
    "analyzed", "investigated", "published", "mentored", "trained", "coordinated", "organized",
    "founded", "grew", "generated", "resolved", "deployed", "refactored", "scaled", "won",
];

const VAGUE_VERBS: &[&str] = &[
    "helped",
    "worked on",
    "assisted",
    "participated",
    "involved",
    "responsible for",
    "tasked with",
];

const VAGUE_SCALE_WORDS: &[&str] = &[
    "significant",
    "major",
    "huge",
    "massive",
    "substantial",
    "considerable",
    "numerous",
    "various",
    "several",
    "many",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentQuality {
    pub score: f64,
    pub total_bullets: usize,
    pub quantified_bullets: usize,
    /// Share of bullets carrying a metric, 0–100.
    pub quantification_density: f64,
    pub action_verb_ratio: f64,
    pub vague_ratio: f64,
    /// A few unquantified bullets, verbatim, for suggestion text.
    pub unquantified_examples: Vec<String>,
}

/// A bullet counts as quantified when it carries any concrete figure.
pub fn is_quantified(text: &str) -> bool {
    let has_digit = text.chars().any(|c| c.is_ascii_digit());
    let has_percent = text.contains('%');
    let has_currency = text.contains('$') || text.contains('€') || text.contains('£');

    has_digit || has_percent || has_currency
}

pub fn starts_with_action_verb(text: &str) -> bool {
    let first = text
        .trim_start_matches(|c: char| !c.is_alphabetic())
        .split(|c: char| !c.is_alphabetic())
        .next()
        .unwrap_or_default()
        .to_lowercase();
    !first.is_empty() && STRONG_VERBS.contains(&first.as_str())
}

/// Vague wording only counts against a bullet that has no figure to back it up.
pub fn is_vague(text: &str) -> bool {
    if is_quantified(text) {
        return false;
    }
    let lower = format!(" {} ", text.to_lowercase());
    VAGUE_VERBS
        .iter()
        .chain(VAGUE_SCALE_WORDS)
        .any(|w| lower.contains(&format!(" {w} ")))
}

pub fn assess_content(sections: &ResumeSections) -> ContentQuality {
    assess_bullets(&sections.bullets())
}

pub fn assess_bullets(bullets: &[&str]) -> ContentQuality {
    let total = bullets.len();
    if total == 0 {
        return ContentQuality {
            score: 0.0,
            total_bullets: 0,
            quantified_bullets: 0,
            quantification_density: 0.0,
            action_verb_ratio: 0.0,
            vague_ratio: 0.0,
            unquantified_examples: vec![],
        };
    }

    let quantified = bullets.iter().filter(|b| is_quantified(b)).count();
    let action = bullets.iter().filter(|b| starts_with_action_verb(b)).count();
    let vague = bullets.iter().filter(|b| is_vague(b)).count();

    let n = total as f64;
    let quantified_ratio = quantified as f64 / n;
    let action_ratio = action as f64 / n;
    let vague_ratio = vague as f64 / n;

    let raw = 100.0
        * (QUANTIFIED_WEIGHT * quantified_ratio
            + ACTION_VERB_WEIGHT * action_ratio
            + PRECISION_WEIGHT * (1.0 - vague_ratio));

    ContentQuality {
        score: round_score(clamp_score(raw)),
        total_bullets: total,
        quantified_bullets: quantified,
        quantification_density: round_score(quantified_ratio * 100.0),
        action_verb_ratio: action_ratio,
        vague_ratio,
        unquantified_examples: bullets
            .iter()
            .filter(|b| !is_quantified(b))
            .take(MAX_EXAMPLES)
            .map(|b| b.trim().to_string())
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantified_with_percentage() {
        assert!(is_quantified("Reduced latency by 40% through caching"));
    }

    #[test]
    fn test_quantified_with_currency() {
        assert!(is_quantified("Saved €200k in cloud spend"));
        assert!(is_quantified("Closed $1.2M in new business"));
    }

    #[test]
    fn test_quantified_with_estimate() {
        assert!(is_quantified("Cut deploy time by ~2 hours"));
    }

    #[test]
    fn test_unquantified_bullet() {
        assert!(!is_quantified("Architected the authentication system"));
    }

    #[test]
    fn test_low_metrics_marker_is_not_a_metric() {
        assert!(!is_quantified("Maintained internal dashboards [LOW_METRICS]"));
        let q = assess_bullets(&["Maintained internal dashboards [LOW_METRICS]"]);
        assert_eq!(q.quantified_bullets, 0);
        assert_eq!(q.quantification_density, 0.0);
    }

    #[test]
    fn test_multiplier_counts_through_its_digit() {
        assert!(is_quantified("Made builds 3x faster"));
    }

    #[test]
    fn test_action_verb_detection_ignores_bullet_glyphs() {
        assert!(starts_with_action_verb("• Led a team of 4 engineers"));
        assert!(starts_with_action_verb("Shipped the billing service"));
        assert!(!starts_with_action_verb("Was part of the platform team"));
    }

    #[test]
    fn test_vague_requires_missing_metric() {
        assert!(is_vague("Helped the team deliver projects"));
        assert!(is_vague("Achieved significant performance improvements"));
        assert!(!is_vague("Helped cut churn by 12%"));
        assert!(!is_vague("Designed the ingestion pipeline"));
    }

    #[test]
    fn test_no_bullets_scores_zero() {
        let q = assess_bullets(&[]);
        assert_eq!(q.score, 0.0);
        assert_eq!(q.total_bullets, 0);
        assert_eq!(q.quantification_density, 0.0);
    }

    #[test]
    fn test_all_strong_quantified_bullets_score_100() {
        let q = assess_bullets(&["Reduced latency by 40%", "Built 3 services handling 10k rps"]);
        assert_eq!(q.score, 100.0);
        assert_eq!(q.quantification_density, 100.0);
        assert!(q.unquantified_examples.is_empty());
    }

    #[test]
    fn test_mixed_bullets() {
        let q = assess_bullets(&[
            "Reduced latency by 40%",
            "Helped with various projects",
            "Built the admin dashboard",
            "Worked on backend infrastructure",
        ]);
        // quantified 1/4, action 2/4, vague 2/4
        assert_eq!(q.quantified_bullets, 1);
        assert_eq!(q.quantification_density, 25.0);
        assert_eq!(q.score, 37.5);
        assert_eq!(q.unquantified_examples.len(), 3);
    }
}
