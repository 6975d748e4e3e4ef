use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::models::resume::ResumeSections;

/// Degree levels in ascending order, so `Ord` compares attainment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DegreeLevel {
    HighSchool,
    Associate,
    Bachelor,
    Master,
    Doctorate,
}

static DEGREE_PATTERNS: Lazy<Vec<(DegreeLevel, Regex)>> = Lazy::new(|| {
    [
        (DegreeLevel::Doctorate, r"ph\.?\s?d|doctor(?:ate)?|d\.?phil|ed\.?d"),
        (
            DegreeLevel::Master,
            r"master'?s?|m\.?sc|m\.s\.|ms|m\.?eng|m\.a\.|mba|m\.b\.a\.?|mfa|mph",
        ),
        (
            DegreeLevel::Bachelor,
            r"bachelor'?s?|b\.?sc|b\.s\.|bs|b\.a\.|ba|b\.?eng|basc|b\.?tech|bba|bfa|undergraduate",
        ),
        (DegreeLevel::Associate, r"associate'?s?|a\.a\.|a\.s\."),
        (DegreeLevel::HighSchool, r"high\s+school|ged|secondary\s+school"),
    ]
    .into_iter()
    .filter_map(|(level, body)| {
        // Letters may not touch either side, so "ms" never matches inside "systems".
        Regex::new(&format!(r"(?i)(?:^|[^a-z])(?:{body})(?:[^a-z]|$)"))
            .ok()
            .map(|re| (level, re))
    })
    .collect()
});

impl DegreeLevel {
    /// Best-effort parse of free-form degree text. Highest level mentioned wins.
    pub fn parse(text: &str) -> Option<Self> {
        DEGREE_PATTERNS
            .iter()
            .find(|(_, re)| re.is_match(text))
            .map(|(level, _)| *level)
    }

    pub fn label(&self) -> &'static str {
        match self {
            DegreeLevel::HighSchool => "high school diploma",
            DegreeLevel::Associate => "Associate's",
            DegreeLevel::Bachelor => "Bachelor's",
            DegreeLevel::Master => "Master's",
            DegreeLevel::Doctorate => "Doctorate",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeldDegree {
    pub level: DegreeLevel,
    #[serde(default)]
    pub field: Option<String>,
}

/// Snapshot of what the candidate holds, taken once per analysis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CandidateQualifications {
    pub degree: Option<HeldDegree>,
    pub experience_years: f64,
    pub certifications: Vec<String>,
}

impl CandidateQualifications {
    /// Derives qualifications from parsed sections.
    ///
    /// Experience years merge overlapping date ranges so concurrent roles are
    /// counted once; open-ended ranges run to `as_of`.
    pub fn from_resume(sections: &ResumeSections, as_of: NaiveDate) -> Self {
        let degree = sections
            .education
            .iter()
            .filter_map(|e| {
                DegreeLevel::parse(&e.degree).map(|level| HeldDegree {
                    level,
                    field: e.field.clone(),
                })
            })
            .max_by_key(|d| d.level);

        let ranges: Vec<(NaiveDate, NaiveDate)> = sections
            .experience
            .iter()
            .map(|e| (e.start, e.end.unwrap_or(as_of).min(as_of)))
            .filter(|(start, end)| end > start)
            .collect();

        Self {
            degree,
            experience_years: total_years(ranges),
            certifications: sections
                .certifications
                .iter()
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty())
                .collect(),
        }
    }

    /// Experience years with negative or non-finite input clamped to zero.
    pub fn sanitized_years(&self) -> f64 {
        sanitize_years(self.experience_years)
    }
}

pub fn sanitize_years(years: f64) -> f64 {
    if years.is_finite() {
        years.max(0.0)
    } else {
        0.0
    }
}

fn total_years(mut ranges: Vec<(NaiveDate, NaiveDate)>) -> f64 {
    ranges.sort();
    let mut days = 0i64;
    let mut current: Option<(NaiveDate, NaiveDate)> = None;

    for (start, end) in ranges {
        current = match current {
            Some((cs, ce)) if start <= ce => Some((cs, ce.max(end))),
            Some((cs, ce)) => {
                days += (ce - cs).num_days();
                Some((start, end))
            }
            None => Some((start, end)),
        };
    }
    if let Some((cs, ce)) = current {
        days += (ce - cs).num_days();
    }

    ((days as f64 / 365.25) * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::{EducationEntry, ExperienceEntry};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn role(start: NaiveDate, end: Option<NaiveDate>) -> ExperienceEntry {
        ExperienceEntry {
            title: "Engineer".to_string(),
            organization: "Acme".to_string(),
            start,
            end,
            bullets: vec![],
        }
    }

    #[test]
    fn test_degree_parse_recognizes_common_forms() {
        assert_eq!(DegreeLevel::parse("B.Sc. Computer Science"), Some(DegreeLevel::Bachelor));
        assert_eq!(DegreeLevel::parse("Bachelor of Arts"), Some(DegreeLevel::Bachelor));
        assert_eq!(DegreeLevel::parse("MBA"), Some(DegreeLevel::Master));
        assert_eq!(DegreeLevel::parse("PhD, Physics"), Some(DegreeLevel::Doctorate));
        assert_eq!(DegreeLevel::parse("Certificate of attendance"), None);
    }

    #[test]
    fn test_degree_levels_are_ordered() {
        assert!(DegreeLevel::Master > DegreeLevel::Bachelor);
        assert!(DegreeLevel::Associate < DegreeLevel::Bachelor);
    }

    #[test]
    fn test_overlapping_roles_are_not_double_counted() {
        let sections = ResumeSections {
            experience: vec![
                role(date(2018, 1, 1), Some(date(2020, 1, 1))),
                role(date(2019, 1, 1), Some(date(2021, 1, 1))),
            ],
            ..Default::default()
        };
        let quals = CandidateQualifications::from_resume(&sections, date(2026, 1, 1));
        assert!((quals.experience_years - 3.0).abs() < 0.05, "got {}", quals.experience_years);
    }

    #[test]
    fn test_current_role_runs_to_as_of() {
        let sections = ResumeSections {
            experience: vec![role(date(2021, 1, 1), None)],
            ..Default::default()
        };
        let quals = CandidateQualifications::from_resume(&sections, date(2026, 1, 1));
        assert!((quals.experience_years - 5.0).abs() < 0.05);
    }

    #[test]
    fn test_highest_degree_is_kept() {
        let sections = ResumeSections {
            education: vec![
                EducationEntry {
                    institution: "State".to_string(),
                    degree: "B.S.".to_string(),
                    field: Some("Biology".to_string()),
                    start: None,
                    end: None,
                },
                EducationEntry {
                    institution: "Tech".to_string(),
                    degree: "Master of Science".to_string(),
                    field: Some("Data Science".to_string()),
                    start: None,
                    end: None,
                },
            ],
            ..Default::default()
        };
        let quals = CandidateQualifications::from_resume(&sections, date(2026, 1, 1));
        let degree = quals.degree.unwrap();
        assert_eq!(degree.level, DegreeLevel::Master);
        assert_eq!(degree.field.as_deref(), Some("Data Science"));
    }

    #[test]
    fn test_sanitize_years_clamps_bad_input() {
        assert_eq!(sanitize_years(-3.0), 0.0);
        assert_eq!(sanitize_years(f64::NAN), 0.0);
        assert_eq!(sanitize_years(4.5), 4.5);
    }
}
