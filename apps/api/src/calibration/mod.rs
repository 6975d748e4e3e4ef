pub mod calibrator;
pub mod handlers;
pub mod mode;

pub use calibrator::{calibrate, CalibrationResult, ExperienceLevel, PriorityBoosts};
pub use mode::{get_suggestion_mode, SuggestionMode, SuggestionRange};
