pub mod handlers;
pub mod order;
pub mod suggestions;

pub use order::{canonical_order, validate_section_order, OrderViolation, SectionOrderValidation};
pub use suggestions::{
    generate_structural_suggestions, StructuralSuggestion, StructureRule, SuggestionCategory,
    SuggestionPriority,
};
