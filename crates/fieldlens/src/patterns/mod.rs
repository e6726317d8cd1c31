//! Semantic pattern catalog: categories, signals, and the registry.

mod registry;
mod types;
pub mod validators;

pub use registry::PatternRegistry;
pub use types::{
    CompositePattern, FormatHint, ItemFieldRule, NamePattern, PatternKind, SemanticCategory,
    SemanticPattern, TypeConstraint, ValuePredicate, ValueValidator,
};
pub use validators::{ValidatorError, ValidatorResult};
