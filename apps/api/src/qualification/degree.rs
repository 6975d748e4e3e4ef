//! Field-of-study and certification matching helpers.
//!
//! Which disciplines count as "related" is decided by the degree-field family
//! table in `ReferenceData`, never here.

use crate::reference::ReferenceData;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldMatch {
    /// The requirement accepts any field.
    AnyField,
    Exact,
    RelatedFamily,
    Unrelated,
}

/// Compares a held field of study with the accepted fields of a requirement.
pub fn field_matches(held: Option<&str>, accepted: &[String], reference: &ReferenceData) -> FieldMatch {
    let accepted: Vec<String> = accepted
        .iter()
        .map(|f| normalize(f))
        .filter(|f| !f.is_empty())
        .collect();
    if accepted.is_empty() {
        return FieldMatch::AnyField;
    }

    let Some(held) = held.map(normalize).filter(|h| !h.is_empty()) else {
        return FieldMatch::Unrelated;
    };

    // Only the held field may be the longer phrase: "Science" alone says nothing
    // about "Computer Science".
    if accepted.iter().any(|a| contains_phrase(&held, a)) {
        return FieldMatch::Exact;
    }

    let held_family = reference.field_family(&held);
    let related = held_family.is_some()
        && accepted
            .iter()
            .any(|a| reference.field_family(a) == held_family);
    if related {
        FieldMatch::RelatedFamily
    } else {
        FieldMatch::Unrelated
    }
}

const CERT_FILLER: &[&str] = &["certified", "certification", "certificate", "cert", "the", "of", "in"];

/// Loose certification equality: filler words are ignored, the held name must
/// carry every word of the requirement, and an acronym matches its spelled-out
/// form ("CKA").
pub fn certification_matches(required: &str, held: &str) -> bool {
    let req_all = tokens(required);
    let held_all = tokens(held);
    if req_all.is_empty() || held_all.is_empty() {
        return false;
    }

    let strip = |t: &[String]| -> Vec<String> {
        t.iter()
            .filter(|w| !CERT_FILLER.contains(&w.as_str()))
            .cloned()
            .collect()
    };
    let req = strip(&req_all);
    let held_core = strip(&held_all);

    if !req.is_empty() && !held_core.is_empty() && req.iter().all(|w| held_core.contains(w)) {
        return true;
    }

    let acronym = |t: &[String]| -> String { t.iter().filter_map(|w| w.chars().next()).collect() };
    (req_all.len() == 1 && req_all[0] == acronym(&held_all))
        || (held_all.len() == 1 && held_all[0] == acronym(&req_all))
}

/// Whole-word containment on normalized text, so "art" never matches "cartography".
fn contains_phrase(haystack: &str, needle: &str) -> bool {
    format!(" {haystack} ").contains(&format!(" {needle} "))
}

fn normalize(text: &str) -> String {
    tokens(text).join(" ")
}

fn tokens(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect()
}
