pub mod detector;
pub mod handlers;

pub use detector::{
    detect_candidate_type, CandidateSignals, CandidateType, CandidateTypeResult, CareerGoal,
    DetectionRule, DetectionSource, JobType,
};
