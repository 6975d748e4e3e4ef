//! Plain input data handed to the engine by the surrounding application.

pub mod job;
pub mod qualifications;
pub mod resume;

pub use job::{Importance, JobKeyword, JobRequirement, KeywordCategory, RequirementKind, RequirementStrength};
pub use qualifications::{CandidateQualifications, DegreeLevel, HeldDegree};
pub use resume::{EducationEntry, ExperienceEntry, ProjectEntry, ResumeSections, SectionKind};
