//! Core type definitions for semantic patterns.

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::field::FieldType;

use super::validators::ValidatorError;

/// Semantic category assigned to a field.
///
/// This is a closed set: adding a category means updating every match
/// over it, which the compiler enforces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SemanticCategory {
    /// Monetary amount (e.g., price, cost, fee).
    Price,
    /// ISO 4217 currency code.
    Currency,
    /// Count or stock quantity.
    Quantity,
    /// Percentage or rate value.
    Percentage,
    /// Bounded rating (stars, score).
    Rating,
    /// Email address.
    Email,
    /// Telephone number.
    Phone,
    /// Generic hyperlink.
    Url,
    /// Postal address or street line.
    Address,
    /// Country name or code.
    Country,
    /// Account handle or login name.
    Username,
    /// Image reference.
    Image,
    /// Profile picture reference.
    Avatar,
    /// Video reference.
    Video,
    /// Short display title.
    Title,
    /// Longer free-text description.
    Description,
    /// Workflow or lifecycle status.
    Status,
    /// List of tags/keywords.
    Tags,
    /// Date or timestamp.
    Date,
    /// Opaque identifier (UUID or numeric id).
    Uuid,
    /// Array of review-shaped objects.
    Reviews,
    /// Array of product-shaped objects.
    Products,
}

impl SemanticCategory {
    /// Get a human-readable label for the category.
    pub fn label(&self) -> &'static str {
        match self {
            SemanticCategory::Price => "Price",
            SemanticCategory::Currency => "Currency",
            SemanticCategory::Quantity => "Quantity",
            SemanticCategory::Percentage => "Percentage",
            SemanticCategory::Rating => "Rating",
            SemanticCategory::Email => "Email",
            SemanticCategory::Phone => "Phone",
            SemanticCategory::Url => "URL",
            SemanticCategory::Address => "Address",
            SemanticCategory::Country => "Country",
            SemanticCategory::Username => "Username",
            SemanticCategory::Image => "Image",
            SemanticCategory::Avatar => "Avatar",
            SemanticCategory::Video => "Video",
            SemanticCategory::Title => "Title",
            SemanticCategory::Description => "Description",
            SemanticCategory::Status => "Status",
            SemanticCategory::Tags => "Tags",
            SemanticCategory::Date => "Date",
            SemanticCategory::Uuid => "Identifier",
            SemanticCategory::Reviews => "Reviews",
            SemanticCategory::Products => "Products",
        }
    }
}

/// Fallible predicate over a sample value.
///
/// An `Err` is treated by the scorer as "did not match" so a bad
/// validator can never abort classification.
pub type ValuePredicate = fn(&Value) -> Result<bool, ValidatorError>;

/// One alternative name regex for a category.
///
/// Only the single highest-weight matching pattern counts toward a
/// field's score; weights are never summed across alternatives.
#[derive(Debug, Clone)]
pub struct NamePattern {
    /// Compiled regex matched against the field name.
    pub regex: Regex,
    /// Weight in [0, 1].
    pub weight: f64,
}

/// Constraint on the field's inferred primitive type.
#[derive(Debug, Clone)]
pub struct TypeConstraint {
    /// Types that satisfy the constraint.
    pub allowed_types: Vec<FieldType>,
    /// Weight in [0, 1].
    pub weight: f64,
}

/// Named predicate over sample values.
#[derive(Debug, Clone)]
pub struct ValueValidator {
    /// Validator name, surfaced in the signal breakdown.
    pub name: &'static str,
    /// The predicate itself.
    pub predicate: ValuePredicate,
    /// Weight in [0, 1].
    pub weight: f64,
}

/// Expected external schema format string (e.g., `email`, `date-time`).
#[derive(Debug, Clone)]
pub struct FormatHint {
    /// Format name compared for exact equality.
    pub format_name: &'static str,
    /// Weight in [0, 1].
    pub weight: f64,
}

/// A full semantic pattern: every signal that can argue for one category.
#[derive(Debug, Clone)]
pub struct SemanticPattern {
    /// Category this pattern argues for.
    pub category: SemanticCategory,
    /// Alternative name regexes.
    pub name_patterns: Vec<NamePattern>,
    /// Optional type constraint.
    pub type_constraint: Option<TypeConstraint>,
    /// Value validators.
    pub value_validators: Vec<ValueValidator>,
    /// Format hints.
    pub format_hints: Vec<FormatHint>,
    /// Confidence at or above which the match is High.
    pub high_threshold: f64,
    /// Confidence at or above which the match is Medium.
    pub medium_threshold: f64,
}

impl SemanticPattern {
    /// Create an empty pattern for a category with default thresholds.
    pub fn new(category: SemanticCategory) -> Self {
        Self {
            category,
            name_patterns: Vec::new(),
            type_constraint: None,
            value_validators: Vec::new(),
            format_hints: Vec::new(),
            high_threshold: 0.75,
            medium_threshold: 0.50,
        }
    }

    /// Add an alternative name regex.
    ///
    /// Panics on an invalid regex; patterns are built from static
    /// literals in the registry.
    pub fn with_name(mut self, regex: &str, weight: f64) -> Self {
        self.name_patterns.push(NamePattern {
            regex: Regex::new(regex).unwrap(),
            weight,
        });
        self
    }

    /// Set the type constraint.
    pub fn with_types(mut self, allowed_types: Vec<FieldType>, weight: f64) -> Self {
        self.type_constraint = Some(TypeConstraint {
            allowed_types,
            weight,
        });
        self
    }

    /// Add a value validator.
    pub fn with_validator(
        mut self,
        name: &'static str,
        predicate: ValuePredicate,
        weight: f64,
    ) -> Self {
        self.value_validators.push(ValueValidator {
            name,
            predicate,
            weight,
        });
        self
    }

    /// Add a format hint.
    pub fn with_format(mut self, format_name: &'static str, weight: f64) -> Self {
        self.format_hints.push(FormatHint {
            format_name,
            weight,
        });
        self
    }

    /// Override the confidence thresholds.
    pub fn with_thresholds(mut self, high: f64, medium: f64) -> Self {
        self.high_threshold = high;
        self.medium_threshold = medium;
        self
    }

    /// Maximum weight across all name regexes, matched or not.
    pub fn max_name_weight(&self) -> f64 {
        self.name_patterns
            .iter()
            .map(|p| p.weight)
            .fold(0.0, f64::max)
    }

    /// Weight of the best matching name regex, if any matches.
    pub fn best_name_match(&self, field_name: &str) -> Option<f64> {
        self.name_patterns
            .iter()
            .filter(|p| p.regex.is_match(field_name))
            .map(|p| p.weight)
            .reduce(f64::max)
    }
}

/// Required sub-field of an array item for a composite match.
#[derive(Debug, Clone)]
pub struct ItemFieldRule {
    /// Regex matched against item sub-field names.
    pub name_regex: Regex,
    /// Required sub-field type.
    pub field_type: FieldType,
}

impl ItemFieldRule {
    /// Create a rule from a static regex literal.
    pub fn new(name_regex: &str, field_type: FieldType) -> Self {
        Self {
            name_regex: Regex::new(name_regex).unwrap(),
            field_type,
        }
    }

    /// Check whether an item sub-field satisfies this rule.
    ///
    /// Numeric rule types accept either numeric field type.
    pub fn matches(&self, name: &str, field_type: FieldType) -> bool {
        let type_ok = field_type == self.field_type
            || (self.field_type.is_numeric() && field_type.is_numeric());
        type_ok && self.name_regex.is_match(name)
    }
}

/// Pattern matched against the structure of an array's item objects.
#[derive(Debug, Clone)]
pub struct CompositePattern {
    /// Name/threshold signals shared with simple patterns.
    pub base: SemanticPattern,
    /// Sub-fields every matching item shape must provide.
    pub required_item_fields: Vec<ItemFieldRule>,
    /// Below this many sampled items, the score is halved.
    pub min_items: usize,
    /// Fixed weight contributed when the field is array-typed.
    pub array_type_weight: f64,
    /// All-or-nothing weight for the structural match.
    pub structure_weight: f64,
}

impl CompositePattern {
    /// Create a composite pattern around a base pattern.
    pub fn new(base: SemanticPattern) -> Self {
        Self {
            base,
            required_item_fields: Vec::new(),
            min_items: 1,
            array_type_weight: 0.5,
            structure_weight: 1.0,
        }
    }

    /// Require an item sub-field.
    pub fn with_item_field(mut self, name_regex: &str, field_type: FieldType) -> Self {
        self.required_item_fields
            .push(ItemFieldRule::new(name_regex, field_type));
        self
    }

    /// Set the minimum sampled item count.
    pub fn with_min_items(mut self, min_items: usize) -> Self {
        self.min_items = min_items;
        self
    }
}

/// A registered pattern: either flat-field or array-structural.
///
/// Modeled as a tagged union so the detector can match exhaustively
/// between the two evaluation paths.
#[derive(Debug, Clone)]
pub enum PatternKind {
    /// Pattern over a single field's own name/type/values.
    Simple(SemanticPattern),
    /// Pattern over an array's item structure.
    Composite(CompositePattern),
}

impl PatternKind {
    /// Category the pattern argues for.
    pub fn category(&self) -> SemanticCategory {
        match self {
            PatternKind::Simple(p) => p.category,
            PatternKind::Composite(c) => c.base.category,
        }
    }
}
