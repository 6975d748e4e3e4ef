//! Parse-ability check over raw résumé text.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::models::resume::SectionKind;
use crate::scoring::clamp_score;

const MISSING_EMAIL_PENALTY: f64 = 15.0;
const MISSING_PHONE_PENALTY: f64 = 5.0;
const TOO_SHORT_PENALTY: f64 = 15.0;
const TOO_LONG_PENALTY: f64 = 10.0;
const TABLE_PENALTY: f64 = 10.0;
const HEADINGS_PENALTY: f64 = 10.0;
const GLYPH_PENALTY: f64 = 5.0;

const MIN_WORDS: usize = 150;
const MAX_WORDS: usize = 1200;
const MIN_HEADINGS: usize = 2;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}").unwrap());

static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:\+?\d{1,3}[\s.\-]?)?\(?\d{3}\)?[\s.\-]?\d{3}[\s.\-]?\d{4}").unwrap());

// Two or more pipes on one line, or tab-separated columns.
static TABLE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^[^\n]*\|[^\n]*\|[^\n]*$|\t\S[^\n]*\t").unwrap());

static GLYPH_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\u{2605}\u{2606}\u{2713}\u{2714}\u{2794}\u{27A4}\u{25BA}\u{1F300}-\u{1FAFF}]").unwrap());

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormatCheck {
    pub score: f64,
    pub word_count: usize,
    pub issues: Vec<String>,
}

pub fn check_format(resume_text: &str) -> FormatCheck {
    let mut score = 100.0;
    let mut issues = Vec::new();

    if !EMAIL_RE.is_match(resume_text) {
        score -= MISSING_EMAIL_PENALTY;
        issues.push("No email address found in the contact details".to_string());
    }
    if !PHONE_RE.is_match(resume_text) {
        score -= MISSING_PHONE_PENALTY;
        issues.push("No phone number found in the contact details".to_string());
    }

    let word_count = resume_text.split_whitespace().count();
    if word_count < MIN_WORDS {
        score -= TOO_SHORT_PENALTY;
        issues.push(format!(
            "Résumé is very short ({word_count} words); aim for at least {MIN_WORDS}"
        ));
    } else if word_count > MAX_WORDS {
        score -= TOO_LONG_PENALTY;
        issues.push(format!(
            "Résumé is long ({word_count} words); trim to under {MAX_WORDS}"
        ));
    }

    if TABLE_RE.is_match(resume_text) {
        score -= TABLE_PENALTY;
        issues.push("Table or multi-column layout detected; ATS parsers often scramble these".to_string());
    }

    let headings = count_standard_headings(resume_text);
    if headings < MIN_HEADINGS {
        score -= HEADINGS_PENALTY;
        issues.push(format!(
            "Only {headings} standard section heading(s) found; use plain headings like \"Experience\" and \"Education\""
        ));
    }

    if GLYPH_RE.is_match(resume_text) {
        score -= GLYPH_PENALTY;
        issues.push("Decorative symbols or emoji detected; replace them with plain text".to_string());
    }

    FormatCheck {
        score: clamp_score(score),
        word_count,
        issues,
    }
}

/// Distinct sections whose heading appears alone on a line.
fn count_standard_headings(text: &str) -> usize {
    let mut seen: Vec<SectionKind> = Vec::new();
    for line in text.lines() {
        if let Some(kind) = SectionKind::from_heading(line) {
            if !seen.contains(&kind) {
                seen.push(kind);
            }
        }
    }
    seen.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn well_formed_resume() -> String {
        let filler = "Delivered measurable results across backend services and data tooling. ".repeat(20);
        format!(
            "Jane Doe\njane.doe@example.com | 555-123-4567\n\nExperience\n{filler}\n\nEducation\nBSc Computer Science\n\nSkills\nRust, SQL\n"
        )
    }

    #[test]
    fn test_clean_resume_scores_100() {
        let check = check_format(&well_formed_resume());
        assert_eq!(check.score, 100.0, "{:?}", check.issues);
        assert!(check.issues.is_empty());
    }

    #[test]
    fn test_missing_contact_details() {
        let text = well_formed_resume()
            .replace("jane.doe@example.com", "")
            .replace("555-123-4567", "");
        let check = check_format(&text);
        assert_eq!(check.score, 80.0);
        assert_eq!(check.issues.len(), 2);
    }

    #[test]
    fn test_short_text_without_headings() {
        let check = check_format("jane@example.com 555 123 4567 Rust developer");
        assert_eq!(check.score, 75.0);
    }

    #[test]
    fn test_table_layout_detected() {
        let text = format!("{}\nRust | Go | SQL\n", well_formed_resume());
        let check = check_format(&text);
        assert_eq!(check.score, 90.0);
    }

    #[test]
    fn test_decorative_glyphs_detected() {
        let text = format!("{}\n★ Team player\n", well_formed_resume());
        assert_eq!(check_format(&text).score, 95.0);
    }

    #[test]
    fn test_score_never_negative() {
        let text = "★|★|★ ".repeat(5);
        let check = check_format(&text);
        assert!(check.score >= 0.0);
    }
}
