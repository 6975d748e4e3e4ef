//! Read-only reference tables: keyword aliases, related terms and degree-field families.
//!
//! Loaded once at startup (built-in or from `REFERENCE_DATA_PATH`) and shared
//! behind an `Arc`. Nothing writes to these tables after load.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Built-in tables, for callers that do not load their own.
pub static BUILTIN: Lazy<ReferenceData> = Lazy::new(ReferenceData::builtin);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceData {
    /// Groups of interchangeable spellings. A hit on any member is an exact match.
    pub keyword_aliases: Vec<Vec<String>>,
    /// Groups of related but distinct terms. A hit on a sibling is a fuzzy match.
    pub related_terms: Vec<Vec<String>>,
    /// Family name → fields of study treated as equivalent for degree matching.
    pub degree_field_families: BTreeMap<String, Vec<String>>,
}

impl ReferenceData {
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read reference data at {}", path.display()))?;
        let data: ReferenceData = serde_json::from_str(&raw)
            .with_context(|| format!("Invalid reference data JSON in {}", path.display()))?;
        Ok(data.normalized())
    }

    pub fn builtin() -> Self {
        let keyword_aliases = groups(&[
            &["javascript", "js", "ecmascript"],
            &["typescript", "ts"],
            &["kubernetes", "k8s"],
            &["postgresql", "postgres"],
            &["amazon web services", "aws"],
            &["google cloud platform", "gcp", "google cloud"],
            &["microsoft azure", "azure"],
            &["machine learning", "ml"],
            &["artificial intelligence", "ai"],
            &["continuous integration", "ci/cd", "ci"],
            &["user experience", "ux"],
            &["user interface", "ui"],
            &["node.js", "nodejs", "node"],
            &["react", "react.js", "reactjs"],
            &["c#", "csharp"],
            &["golang", "go"],
            &["search engine optimization", "seo"],
            &["customer relationship management", "crm"],
            &["project management professional", "pmp"],
            &["structured query language", "sql"],
        ]);

        let related_terms = groups(&[
            &["postgresql", "mysql", "sql server", "sqlite", "sql"],
            &["docker", "containers", "containerization", "podman"],
            &["kubernetes", "openshift", "helm", "eks", "gke"],
            &["aws", "azure", "gcp", "cloud"],
            &["react", "vue", "angular", "svelte"],
            &["tensorflow", "pytorch", "keras", "scikit-learn"],
            &["agile", "scrum", "kanban"],
            &["jenkins", "github actions", "gitlab ci", "circleci"],
            &["excel", "google sheets", "spreadsheets"],
            &["tableau", "power bi", "looker"],
            &["leadership", "mentoring", "team lead"],
            &["communication", "presentation", "public speaking"],
            &["salesforce", "hubspot", "crm"],
        ]);

        let mut degree_field_families = BTreeMap::new();
        let mut family = |name: &str, fields: &[&str]| {
            degree_field_families.insert(
                name.to_string(),
                fields.iter().map(|f| f.to_string()).collect(),
            );
        };
        family(
            "computing",
            &[
                "computer science",
                "software engineering",
                "computer engineering",
                "information technology",
                "information systems",
                "data science",
                "mathematics",
                "statistics",
                "computational",
            ],
        );
        family(
            "engineering",
            &[
                "electrical engineering",
                "mechanical engineering",
                "civil engineering",
                "chemical engineering",
                "industrial engineering",
                "aerospace engineering",
                "engineering physics",
            ],
        );
        family(
            "business",
            &[
                "business administration",
                "business",
                "finance",
                "accounting",
                "economics",
                "marketing",
                "management",
                "commerce",
            ],
        );
        family(
            "life_sciences",
            &["biology", "biochemistry", "chemistry", "neuroscience", "biomedical"],
        );
        family(
            "design",
            &[
                "graphic design",
                "industrial design",
                "human computer interaction",
                "interaction design",
                "visual communication",
            ],
        );
        family(
            "communications",
            &["communications", "journalism", "english", "public relations"],
        );

        Self {
            keyword_aliases,
            related_terms,
            degree_field_families,
        }
        .normalized()
    }

    /// Lowercases and trims every entry so lookups can compare directly.
    fn normalized(mut self) -> Self {
        let clean = |groups: &mut Vec<Vec<String>>| {
            for group in groups.iter_mut() {
                for term in group.iter_mut() {
                    *term = term.trim().to_lowercase();
                }
                group.retain(|t| !t.is_empty());
            }
            groups.retain(|g| !g.is_empty());
        };
        clean(&mut self.keyword_aliases);
        clean(&mut self.related_terms);
        for fields in self.degree_field_families.values_mut() {
            for field in fields.iter_mut() {
                *field = field.trim().to_lowercase();
            }
            fields.retain(|f| !f.is_empty());
        }
        self
    }

    /// Other spellings of `keyword`, excluding itself.
    pub fn aliases_for(&self, keyword: &str) -> Vec<&str> {
        siblings(&self.keyword_aliases, keyword)
    }

    /// Related terms of `keyword`, excluding itself and its aliases.
    pub fn related_for(&self, keyword: &str) -> Vec<&str> {
        let aliases = self.aliases_for(keyword);
        siblings(&self.related_terms, keyword)
            .into_iter()
            .filter(|t| !aliases.contains(t))
            .collect()
    }

    /// Families a free-form field of study belongs to. The longest matching
    /// member decides, so "computer engineering" is not read as "engineering".
    pub fn field_family(&self, field: &str) -> Option<&str> {
        let field = field.trim().to_lowercase();
        if field.is_empty() {
            return None;
        }
        self.degree_field_families
            .iter()
            .flat_map(|(family, members)| members.iter().map(move |m| (family, m)))
            .filter(|(_, member)| field.contains(member.as_str()))
            .max_by_key(|(_, member)| member.len())
            .map(|(family, _)| family.as_str())
    }
}

impl Default for ReferenceData {
    fn default() -> Self {
        Self::builtin()
    }
}

fn groups(raw: &[&[&str]]) -> Vec<Vec<String>> {
    raw.iter()
        .map(|g| g.iter().map(|s| s.to_string()).collect())
        .collect()
}

fn siblings<'a>(groups: &'a [Vec<String>], term: &str) -> Vec<&'a str> {
    let term = term.trim().to_lowercase();
    let mut out: Vec<&str> = Vec::new();
    for group in groups.iter().filter(|g| g.iter().any(|t| *t == term)) {
        for t in group {
            if *t != term && !out.contains(&t.as_str()) {
                out.push(t.as_str());
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aliases_are_symmetric() {
        let data = ReferenceData::builtin();
        assert!(data.aliases_for("k8s").contains(&"kubernetes"));
        assert!(data.aliases_for("Kubernetes").contains(&"k8s"));
        assert!(data.aliases_for("cobol").is_empty());
    }

    #[test]
    fn test_related_terms_exclude_aliases() {
        let data = ReferenceData::builtin();
        let related = data.related_for("postgresql");
        assert!(related.contains(&"mysql"));
        assert!(!related.contains(&"postgres"));
    }

    #[test]
    fn test_field_family_prefers_longest_member() {
        let data = ReferenceData::builtin();
        assert_eq!(data.field_family("Computer Engineering"), Some("computing"));
        assert_eq!(data.field_family("Mechanical Engineering"), Some("engineering"));
        assert_eq!(data.field_family("Applied Mathematics"), Some("computing"));
        assert_eq!(data.field_family("Philosophy"), None);
    }

    #[test]
    fn test_custom_tables_round_trip_through_json() {
        let json = r#"{
            "keyword_aliases": [["Rust", "rust-lang"]],
            "related_terms": [],
            "degree_field_families": {"stem": ["Physics", "Computer Science"]}
        }"#;
        let data: ReferenceData = serde_json::from_str(json).unwrap();
        let data = data.normalized();
        assert_eq!(data.aliases_for("rust"), vec!["rust-lang"]);
        assert_eq!(data.field_family("physics"), Some("stem"));
    }
}
