use serde::{Deserialize, Serialize};

/// Improvement mode, chosen from the overall score band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionMode {
    /// [0, 30): the résumé needs rebuilding for this role.
    Transformation,
    /// [30, 50)
    Improvement,
    /// [50, 70)
    Optimization,
    /// [70, 100]: confirm what works, polish the rest.
    Validation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionRange {
    pub min: u8,
    pub max: u8,
}

impl SuggestionMode {
    pub fn suggestion_range(&self) -> SuggestionRange {
        let (min, max) = match self {
            SuggestionMode::Transformation => (8, 12),
            SuggestionMode::Improvement => (5, 8),
            SuggestionMode::Optimization => (3, 5),
            SuggestionMode::Validation => (1, 2),
        };
        SuggestionRange { min, max }
    }

    /// Integer midpoint of the range, rounded down.
    pub fn target_count(&self) -> u8 {
        let range = self.suggestion_range();
        (range.min + range.max) / 2
    }

    pub fn label(&self) -> &'static str {
        match self {
            SuggestionMode::Transformation => "Transformation",
            SuggestionMode::Improvement => "Improvement",
            SuggestionMode::Optimization => "Optimization",
            SuggestionMode::Validation => "Validation",
        }
    }
}

/// Bands are closed on the lower bound. Scores outside [0, 100] are clamped
/// first; NaN is treated as 0.
pub fn get_suggestion_mode(overall: f64) -> SuggestionMode {
    let score = if overall.is_nan() { 0.0 } else { overall.clamp(0.0, 100.0) };
    match score {
        s if s < 30.0 => SuggestionMode::Transformation,
        s if s < 50.0 => SuggestionMode::Improvement,
        s if s < 70.0 => SuggestionMode::Optimization,
        _ => SuggestionMode::Validation,
    }
}
