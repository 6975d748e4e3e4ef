//! Keyword Matcher: classifies each job-description keyword as found or missing.
//!
//! Three tiers, first hit wins:
//! 1. exact: the keyword or one of its aliases, case-insensitive, on word boundaries
//! 2. fuzzy: a related term, or a résumé token within edit-distance tolerance
//! 3. semantic: most of a multi-word keyword's stems co-occur in one section
//!
//! One record is produced per input keyword, in input order.

use std::collections::{HashMap, HashSet};

use regex::Regex;
use serde::{Deserialize, Serialize};
use strsim::{jaro_winkler, normalized_levenshtein};

use crate::models::job::{Importance, JobKeyword, KeywordCategory, RequirementStrength};
use crate::models::resume::{ResumeSections, SectionKind};
use crate::reference::ReferenceData;
use crate::scoring::round_score;

const FUZZY_LEVENSHTEIN_MIN: f64 = 0.85;
const FUZZY_JARO_WINKLER_MIN: f64 = 0.95;
/// Single-word keywords shorter than this only match exactly ("java" must not hit "lava").
const FUZZY_MIN_LEN: usize = 5;
const SEMANTIC_MIN_OVERLAP: f64 = 0.75;
const REQUIRED_MULTIPLIER: f64 = 1.5;

const STOPWORDS: &[&str] = &[
    "a", "an", "and", "or", "the", "of", "in", "on", "at", "by", "for", "to", "with", "using",
    "experience", "knowledge", "skills", "skill", "ability", "strong", "proven",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchType {
    Exact,
    Fuzzy,
    Semantic,
    None,
}

impl MatchType {
    /// Share of a keyword's weight credited to the keyword component score.
    pub fn credit(&self) -> f64 {
        match self {
            MatchType::Exact => 1.0,
            MatchType::Fuzzy => 0.85,
            MatchType::Semantic => 0.6,
            MatchType::None => 0.0,
        }
    }
}

/// Outcome for a single job-description keyword.
///
/// Built only through `found`/`missing`, so a missing record always carries `MatchType::None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordRecord {
    pub keyword: String,
    pub category: KeywordCategory,
    pub importance: Importance,
    pub requirement: RequirementStrength,
    pub found: bool,
    pub match_type: MatchType,
    /// The résumé term that satisfied the keyword, when it differs in form.
    pub matched_term: Option<String>,
    pub placements: Vec<SectionKind>,
}

impl KeywordRecord {
    fn missing(kw: &JobKeyword) -> Self {
        Self {
            keyword: kw.keyword.clone(),
            category: kw.category,
            importance: kw.importance,
            requirement: kw.requirement,
            found: false,
            match_type: MatchType::None,
            matched_term: None,
            placements: Vec::new(),
        }
    }

    fn found(
        kw: &JobKeyword,
        match_type: MatchType,
        matched_term: Option<String>,
        placements: Vec<SectionKind>,
    ) -> Self {
        debug_assert!(match_type != MatchType::None);
        Self {
            keyword: kw.keyword.clone(),
            category: kw.category,
            importance: kw.importance,
            requirement: kw.requirement,
            found: true,
            match_type,
            matched_term,
            placements,
        }
    }

    fn scoring_weight(&self) -> f64 {
        let multiplier = match self.requirement {
            RequirementStrength::Required => REQUIRED_MULTIPLIER,
            RequirementStrength::Preferred => 1.0,
        };
        self.importance.weight() * multiplier
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordMatchReport {
    pub records: Vec<KeywordRecord>,
    /// Importance-weighted share of keywords found, 0–100.
    pub coverage_percent: f64,
    /// Keyword component score, 0–100, crediting weaker match types less.
    pub score: f64,
    pub missing_keywords: Vec<String>,
    pub missing_high_importance: Vec<String>,
}

/// Matches every keyword against the résumé. Empty keyword lists score 100:
/// a job description that names no keywords cannot be missed.
pub fn match_keywords(
    keywords: &[JobKeyword],
    sections: &ResumeSections,
    resume_text: &str,
    reference: &ReferenceData,
) -> KeywordMatchReport {
    let section_texts: Vec<(SectionKind, String)> = SectionKind::ALL
        .into_iter()
        .filter(|k| sections.is_present(*k))
        .map(|k| (k, sections.section_text(k)))
        .collect();

    let mut corpus = resume_text.to_string();
    for (_, text) in &section_texts {
        corpus.push('\n');
        corpus.push_str(text);
    }
    let tokens = tokenize(&corpus);
    let mut patterns = TermPatterns::default();

    let records: Vec<KeywordRecord> = keywords
        .iter()
        .map(|kw| classify(kw, &corpus, &tokens, &section_texts, reference, &mut patterns))
        .collect();

    let missing_keywords = records
        .iter()
        .filter(|r| !r.found)
        .map(|r| r.keyword.clone())
        .collect();
    let missing_high_importance = records
        .iter()
        .filter(|r| !r.found && r.importance == Importance::High)
        .map(|r| r.keyword.clone())
        .collect();

    KeywordMatchReport {
        coverage_percent: coverage_percent(&records),
        score: keyword_score(&records),
        missing_keywords,
        missing_high_importance,
        records,
    }
}

/// Importance-weighted found share, clamped to [0, 100].
pub fn coverage_percent(records: &[KeywordRecord]) -> f64 {
    let total: f64 = records.iter().map(|r| r.importance.weight()).sum();
    if total <= 0.0 {
        return 100.0;
    }
    let matched: f64 = records
        .iter()
        .filter(|r| r.found)
        .map(|r| r.importance.weight())
        .sum();
    round_score((matched / total * 100.0).clamp(0.0, 100.0))
}

fn keyword_score(records: &[KeywordRecord]) -> f64 {
    let total: f64 = records.iter().map(KeywordRecord::scoring_weight).sum();
    if total <= 0.0 {
        return 100.0;
    }
    let earned: f64 = records
        .iter()
        .map(|r| r.scoring_weight() * r.match_type.credit())
        .sum();
    round_score((earned / total * 100.0).clamp(0.0, 100.0))
}

fn classify(
    kw: &JobKeyword,
    corpus: &str,
    tokens: &[String],
    section_texts: &[(SectionKind, String)],
    reference: &ReferenceData,
    patterns: &mut TermPatterns,
) -> KeywordRecord {
    let term = kw.keyword.trim().to_lowercase();
    if term.is_empty() {
        return KeywordRecord::missing(kw);
    }

    // Tier 1: the keyword itself, then its aliases.
    let exact_terms = std::iter::once(term.as_str()).chain(reference.aliases_for(&term));
    for candidate in exact_terms {
        if let Some(placements) = find_term(candidate, corpus, section_texts, patterns) {
            let matched = (candidate != term).then(|| candidate.to_string());
            return KeywordRecord::found(kw, MatchType::Exact, matched, placements);
        }
    }

    // Tier 2: related terms, then edit distance.
    for candidate in reference.related_for(&term) {
        if let Some(placements) = find_term(candidate, corpus, section_texts, patterns) {
            return KeywordRecord::found(kw, MatchType::Fuzzy, Some(candidate.to_string()), placements);
        }
    }
    if let Some(hit) = fuzzy_token_match(&term, tokens) {
        let placements = section_texts
            .iter()
            .filter(|(_, text)| tokenize(text).contains(&hit))
            .map(|(kind, _)| *kind)
            .collect();
        return KeywordRecord::found(kw, MatchType::Fuzzy, Some(hit), placements);
    }

    // Tier 3: contextual co-occurrence.
    if let Some(placements) = semantic_match(&term, corpus, section_texts) {
        return KeywordRecord::found(kw, MatchType::Semantic, None, placements);
    }

    KeywordRecord::missing(kw)
}

/// Returns the sections containing `term` when it occurs anywhere in `corpus`.
fn find_term(
    term: &str,
    corpus: &str,
    section_texts: &[(SectionKind, String)],
    patterns: &mut TermPatterns,
) -> Option<Vec<SectionKind>> {
    let re = patterns.get(term)?;
    if !re.is_match(corpus) {
        return None;
    }
    Some(
        section_texts
            .iter()
            .filter(|(_, text)| re.is_match(text))
            .map(|(kind, _)| *kind)
            .collect(),
    )
}

/// Compiled term patterns for one matching run. Aliases and related terms are
/// shared across keywords, so each term is compiled at most once per run.
#[derive(Default)]
struct TermPatterns {
    compiled: HashMap<String, Option<Regex>>,
}

impl TermPatterns {
    fn get(&mut self, term: &str) -> Option<&Regex> {
        if !self.compiled.contains_key(term) {
            self.compiled.insert(term.to_string(), term_pattern(term));
        }
        self.compiled.get(term)?.as_ref()
    }
}

/// Case-insensitive, word-bounded pattern. Internal spaces and hyphens are interchangeable.
fn term_pattern(term: &str) -> Option<Regex> {
    let words: Vec<String> = term
        .split(|c: char| c.is_whitespace() || c == '-')
        .filter(|w| !w.is_empty())
        .map(regex::escape)
        .collect();
    if words.is_empty() {
        return None;
    }
    let body = words.join(r"[\s\-/]+");
    Regex::new(&format!(r"(?i)(?:^|[^\w+#]){body}(?:$|[^\w+#])")).ok()
}

fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '+' || c == '#' || c == '.'))
        .map(|t| t.trim_matches('.').to_lowercase())
        .filter(|t| !t.is_empty())
        .collect()
}

fn fuzzy_token_match(term: &str, tokens: &[String]) -> Option<String> {
    let words: Vec<&str> = term
        .split(|c: char| c.is_whitespace() || c == '-')
        .filter(|w| !w.is_empty())
        .collect();

    match words.len() {
        0 => None,
        1 => {
            let word = words[0];
            if word.chars().count() < FUZZY_MIN_LEN {
                return None;
            }
            tokens
                .iter()
                .filter(|t| t.chars().count() >= FUZZY_MIN_LEN - 1 && t.as_str() != word)
                .find(|t| {
                    normalized_levenshtein(word, t) >= FUZZY_LEVENSHTEIN_MIN
                        || jaro_winkler(word, t) >= FUZZY_JARO_WINKLER_MIN
                })
                .cloned()
        }
        n => {
            let joined = words.join(" ");
            tokens
                .windows(n)
                .map(|w| w.join(" "))
                .find(|candidate| normalized_levenshtein(&joined, candidate) >= FUZZY_LEVENSHTEIN_MIN)
        }
    }
}

/// Multi-word keywords only. Placements are the sections where the stems co-occur;
/// an empty list means they co-occur only in the free-form résumé text.
fn semantic_match(
    term: &str,
    corpus: &str,
    section_texts: &[(SectionKind, String)],
) -> Option<Vec<SectionKind>> {
    let stems = significant_stems(term);
    if stems.len() < 2 {
        return None;
    }

    let overlap = |text: &str| -> f64 {
        let present: HashSet<String> = tokenize(text).iter().map(|t| stem(t)).collect();
        let hits = stems.iter().filter(|s| present.contains(*s)).count();
        hits as f64 / stems.len() as f64
    };

    let placements: Vec<SectionKind> = section_texts
        .iter()
        .filter(|(_, text)| overlap(text) >= SEMANTIC_MIN_OVERLAP)
        .map(|(kind, _)| *kind)
        .collect();

    if !placements.is_empty() {
        return Some(placements);
    }
    // Free text has no section structure, so look at it one paragraph at a time.
    corpus
        .split("\n\n")
        .any(|para| overlap(para) >= SEMANTIC_MIN_OVERLAP)
        .then(Vec::new)
}

fn significant_stems(term: &str) -> Vec<String> {
    let mut seen = Vec::new();
    for token in tokenize(&term.replace('-', " ")) {
        if STOPWORDS.contains(&token.as_str()) {
            continue;
        }
        let s = stem(&token);
        if !seen.contains(&s) {
            seen.push(s);
        }
    }
    seen
}

/// Crude suffix stripping, enough to line up "teams"/"team" and "managed"/"managing".
fn stem(word: &str) -> String {
    let mut w = word.to_lowercase();
    if w.len() > 3 && w.ends_with('s') && !w.ends_with("ss") {
        w.pop();
    }
    for suffix in ["ing", "ed", "e"] {
        if w.len() > suffix.len() + 3 && w.ends_with(suffix) {
            w.truncate(w.len() - suffix.len());
            break;
        }
    }
    w
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::{ExperienceEntry, ProjectEntry};
    use crate::reference::BUILTIN;
    use chrono::NaiveDate;

    fn kw(keyword: &str, importance: Importance) -> JobKeyword {
        JobKeyword::new(keyword, importance, RequirementStrength::Required)
    }

    fn sections() -> ResumeSections {
        ResumeSections {
            summary: Some("Backend engineer focused on distributed systems.".to_string()),
            skills: vec![
                "Rust".to_string(),
                "PostgreSQL".to_string(),
                "k8s".to_string(),
                "C++".to_string(),
            ],
            experience: vec![ExperienceEntry {
                title: "Software Engineer".to_string(),
                organization: "Acme".to_string(),
                start: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
                end: None,
                bullets: vec![
                    "Led cross functional teams of designers and engineers".to_string(),
                    "Built Kafka pipelines processing 2M events/day".to_string(),
                ],
            }],
            projects: vec![ProjectEntry {
                name: "Tracer".to_string(),
                technologies: vec!["Terraform".to_string()],
                bullets: vec!["Wrote infrastucture modules".to_string()],
            }],
            ..Default::default()
        }
    }

    fn run(keywords: &[JobKeyword]) -> KeywordMatchReport {
        match_keywords(keywords, &sections(), "", &BUILTIN)
    }

    #[test]
    fn test_term_patterns_compile_each_term_once() {
        let mut patterns = TermPatterns::default();
        assert!(patterns.get("kubernetes").is_some());
        assert!(patterns.get("kubernetes").is_some());
        assert!(patterns.get("  ").is_none());
        assert_eq!(patterns.compiled.len(), 2);
    }

    #[test]
    fn test_repeated_keywords_share_one_pattern_and_match_alike() {
        let report = run(&[kw("Kubernetes", Importance::High), kw("kubernetes", Importance::Low)]);
        assert!(report.records.iter().all(|r| r.found && r.match_type == MatchType::Exact));
    }

    #[test]
    fn test_exact_match_is_case_insensitive_and_placed() {
        let report = run(&[kw("rust", Importance::High)]);
        let rec = &report.records[0];
        assert!(rec.found);
        assert_eq!(rec.match_type, MatchType::Exact);
        assert_eq!(rec.placements, vec![SectionKind::Skills]);
        assert!(rec.matched_term.is_none());
    }

    #[test]
    fn test_alias_counts_as_exact() {
        let report = run(&[kw("Kubernetes", Importance::High)]);
        let rec = &report.records[0];
        assert_eq!(rec.match_type, MatchType::Exact);
        assert_eq!(rec.matched_term.as_deref(), Some("k8s"));
    }

    #[test]
    fn test_word_boundaries_prevent_substring_hits() {
        // "go" appears inside "Google" and "algorithms" only.
        let s = ResumeSections {
            skills: vec!["Google Analytics".to_string(), "algorithms".to_string()],
            ..Default::default()
        };
        let report = match_keywords(&[kw("Go", Importance::Medium)], &s, "", &BUILTIN);
        assert!(!report.records[0].found);
        assert_eq!(report.records[0].match_type, MatchType::None);
    }

    #[test]
    fn test_symbol_keywords_match_on_boundaries() {
        let report = run(&[kw("C++", Importance::Medium), kw("C#", Importance::Low)]);
        assert_eq!(report.records[0].match_type, MatchType::Exact);
        assert!(!report.records[1].found);
    }

    #[test]
    fn test_related_term_is_fuzzy() {
        let report = run(&[kw("MySQL", Importance::Medium)]);
        let rec = &report.records[0];
        assert_eq!(rec.match_type, MatchType::Fuzzy);
        assert_eq!(rec.matched_term.as_deref(), Some("postgresql"));
    }

    #[test]
    fn test_misspelling_is_fuzzy() {
        let report = run(&[kw("infrastructure", Importance::Low)]);
        let rec = &report.records[0];
        assert_eq!(rec.match_type, MatchType::Fuzzy);
        assert_eq!(rec.matched_term.as_deref(), Some("infrastucture"));
        assert_eq!(rec.placements, vec![SectionKind::Projects]);
    }

    #[test]
    fn test_short_keywords_never_fuzzy_match() {
        let s = ResumeSections {
            skills: vec!["Lava lamps".to_string()],
            ..Default::default()
        };
        let report = match_keywords(&[kw("Java", Importance::High)], &s, "", &BUILTIN);
        assert!(!report.records[0].found);
    }

    #[test]
    fn test_scattered_stems_are_semantic() {
        let report = run(&[kw("cross-functional team leadership", Importance::Medium)]);
        let rec = &report.records[0];
        // "leadership" does not stem to "led", but 3 of 4 stems share the experience section.
        assert_eq!(rec.match_type, MatchType::Semantic, "{rec:?}");
        assert_eq!(rec.placements, vec![SectionKind::Experience]);
    }

    #[test]
    fn test_missing_records_carry_no_match_type() {
        let report = run(&[kw("Haskell", Importance::High), kw("Erlang", Importance::Low)]);
        for rec in &report.records {
            assert!(!rec.found);
            assert_eq!(rec.match_type, MatchType::None);
            assert!(rec.placements.is_empty());
        }
        assert_eq!(report.missing_high_importance, vec!["Haskell".to_string()]);
        assert_eq!(report.missing_keywords.len(), 2);
    }

    #[test]
    fn test_one_record_per_keyword_in_order() {
        let keywords = vec![
            kw("Rust", Importance::High),
            kw("Rust", Importance::High),
            kw("Haskell", Importance::Low),
            kw("Kafka", Importance::Medium),
        ];
        let report = run(&keywords);
        assert_eq!(report.records.len(), keywords.len());
        let names: Vec<&str> = report.records.iter().map(|r| r.keyword.as_str()).collect();
        assert_eq!(names, vec!["Rust", "Rust", "Haskell", "Kafka"]);
    }

    #[test]
    fn test_coverage_is_importance_weighted() {
        // high (3) found, low (1) missing → 75%
        let report = run(&[kw("Rust", Importance::High), kw("Haskell", Importance::Low)]);
        assert_eq!(report.coverage_percent, 75.0);
    }

    #[test]
    fn test_coverage_never_drops_when_a_high_keyword_is_matched() {
        let mut keywords = vec![
            kw("Rust", Importance::Medium),
            kw("Haskell", Importance::High),
            kw("Erlang", Importance::Low),
        ];
        let before = run(&keywords).coverage_percent;
        keywords.push(kw("Kafka", Importance::High));
        let after = run(&keywords).coverage_percent;
        assert!(after >= before, "{after} < {before}");
    }

    #[test]
    fn test_empty_keyword_list_scores_full() {
        let report = run(&[]);
        assert_eq!(report.coverage_percent, 100.0);
        assert_eq!(report.score, 100.0);
    }

    #[test]
    fn test_weaker_match_types_earn_less_score() {
        let exact = run(&[kw("Rust", Importance::High)]).score;
        let fuzzy = run(&[kw("MySQL", Importance::High)]).score;
        assert_eq!(exact, 100.0);
        assert_eq!(fuzzy, 85.0);
    }

    #[test]
    fn test_free_text_is_searched_when_sections_are_empty() {
        let report = match_keywords(
            &[kw("Terraform", Importance::High)],
            &ResumeSections::default(),
            "Skills: Terraform, Ansible",
            &BUILTIN,
        );
        assert!(report.records[0].found);
        assert!(report.records[0].placements.is_empty());
    }

    #[test]
    fn test_stem_aligns_inflections() {
        assert_eq!(stem("teams"), stem("team"));
        assert_eq!(stem("managed"), stem("managing"));
        assert_eq!(stem("services"), stem("service"));
        assert_eq!(stem("class"), "class");
    }
}
