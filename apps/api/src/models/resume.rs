use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Résumé sections the engine knows how to reason about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Summary,
    Education,
    Skills,
    Projects,
    Experience,
    Certifications,
    Awards,
}

impl SectionKind {
    pub const ALL: [SectionKind; 7] = [
        SectionKind::Summary,
        SectionKind::Education,
        SectionKind::Skills,
        SectionKind::Projects,
        SectionKind::Experience,
        SectionKind::Certifications,
        SectionKind::Awards,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SectionKind::Summary => "Summary",
            SectionKind::Education => "Education",
            SectionKind::Skills => "Skills",
            SectionKind::Projects => "Projects",
            SectionKind::Experience => "Experience",
            SectionKind::Certifications => "Certifications",
            SectionKind::Awards => "Awards",
        }
    }

    /// Maps a free-form heading ("Work History", "Technical Skills") to a section.
    pub fn from_heading(heading: &str) -> Option<Self> {
        let h = heading.trim().to_lowercase();
        let h = h.trim_end_matches(':');
        match h {
            "summary" | "profile" | "professional summary" | "objective" | "about me" => {
                Some(SectionKind::Summary)
            }
            "education" | "academic background" | "education and training" => {
                Some(SectionKind::Education)
            }
            "skills" | "technical skills" | "core competencies" | "key skills" => {
                Some(SectionKind::Skills)
            }
            "projects" | "personal projects" | "academic projects" | "selected projects" => {
                Some(SectionKind::Projects)
            }
            "experience" | "work experience" | "professional experience" | "work history"
            | "employment" | "employment history" => Some(SectionKind::Experience),
            "certifications" | "certificates" | "licenses and certifications" => {
                Some(SectionKind::Certifications)
            }
            "awards" | "honors" | "honors and awards" | "achievements" => Some(SectionKind::Awards),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub title: String,
    #[serde(default)]
    pub organization: String,
    pub start: NaiveDate,
    /// `None` for a current position.
    #[serde(default)]
    pub end: Option<NaiveDate>,
    #[serde(default)]
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EducationEntry {
    pub institution: String,
    /// Free-form degree text, e.g. "B.Sc." or "Master of Business Administration".
    #[serde(default)]
    pub degree: String,
    #[serde(default)]
    pub field: Option<String>,
    #[serde(default)]
    pub start: Option<NaiveDate>,
    /// Graduation date, past or expected.
    #[serde(default)]
    pub end: Option<NaiveDate>,
}

impl EducationEntry {
    /// Ongoing when graduation lies after `as_of`, or when the program has a
    /// start date but no end. An undated entry is never ongoing.
    pub fn is_active(&self, as_of: NaiveDate) -> bool {
        match (self.start, self.end) {
            (_, Some(end)) => end > as_of,
            (Some(start), None) => start <= as_of,
            (None, None) => false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectEntry {
    pub name: String,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub bullets: Vec<String>,
}

/// Parsed résumé content, as supplied by the upstream extractor.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ResumeSections {
    pub summary: Option<String>,
    pub education: Vec<EducationEntry>,
    pub experience: Vec<ExperienceEntry>,
    pub projects: Vec<ProjectEntry>,
    pub skills: Vec<String>,
    pub certifications: Vec<String>,
    pub awards: Vec<String>,
}

impl ResumeSections {
    pub fn is_present(&self, kind: SectionKind) -> bool {
        match kind {
            SectionKind::Summary => self
                .summary
                .as_deref()
                .map(|s| !s.trim().is_empty())
                .unwrap_or(false),
            SectionKind::Education => !self.education.is_empty(),
            SectionKind::Skills => self.skills.iter().any(|s| !s.trim().is_empty()),
            SectionKind::Projects => !self.projects.is_empty(),
            SectionKind::Experience => !self.experience.is_empty(),
            SectionKind::Certifications => self.certifications.iter().any(|c| !c.trim().is_empty()),
            SectionKind::Awards => self.awards.iter().any(|a| !a.trim().is_empty()),
        }
    }

    pub fn present_sections(&self) -> Vec<SectionKind> {
        SectionKind::ALL
            .into_iter()
            .filter(|k| self.is_present(*k))
            .collect()
    }

    /// Flattened text of one section, used for keyword placement.
    pub fn section_text(&self, kind: SectionKind) -> String {
        match kind {
            SectionKind::Summary => self.summary.clone().unwrap_or_default(),
            SectionKind::Education => self
                .education
                .iter()
                .map(|e| {
                    format!(
                        "{} {} {}",
                        e.degree,
                        e.field.as_deref().unwrap_or_default(),
                        e.institution
                    )
                })
                .collect::<Vec<_>>()
                .join("\n"),
            SectionKind::Skills => self.skills.join(", "),
            SectionKind::Projects => self
                .projects
                .iter()
                .map(|p| {
                    format!(
                        "{} {}\n{}",
                        p.name,
                        p.technologies.join(", "),
                        p.bullets.join("\n")
                    )
                })
                .collect::<Vec<_>>()
                .join("\n"),
            SectionKind::Experience => self
                .experience
                .iter()
                .map(|e| format!("{} {}\n{}", e.title, e.organization, e.bullets.join("\n")))
                .collect::<Vec<_>>()
                .join("\n"),
            SectionKind::Certifications => self.certifications.join("\n"),
            SectionKind::Awards => self.awards.join("\n"),
        }
    }

    /// All achievement bullets from experience and projects.
    pub fn bullets(&self) -> Vec<&str> {
        self.experience
            .iter()
            .flat_map(|e| e.bullets.iter())
            .chain(self.projects.iter().flat_map(|p| p.bullets.iter()))
            .map(String::as_str)
            .filter(|b| !b.trim().is_empty())
            .collect()
    }

    pub fn has_active_education(&self, as_of: NaiveDate) -> bool {
        self.education.iter().any(|e| e.is_active(as_of))
    }
}
