pub mod degree;
pub mod fit;

pub use fit::{calculate_qualification_fit, QualificationFit};
