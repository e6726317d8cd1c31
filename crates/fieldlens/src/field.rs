//! Field descriptors: the raw input to every classification pass.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::patterns::SemanticCategory;

/// Primitive type inferred for a field by the upstream schema parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    /// Text/string values.
    String,
    /// Floating-point numbers.
    Number,
    /// Whole numbers (no decimal point).
    Integer,
    /// Boolean values (true/false).
    Boolean,
    /// Array of values.
    Array,
    /// Nested object.
    Object,
    /// Explicit null.
    Null,
    /// Unable to determine type.
    Unknown,
}

impl FieldType {
    /// Returns true if this type is numeric.
    pub fn is_numeric(&self) -> bool {
        matches!(self, FieldType::Number | FieldType::Integer)
    }

    /// Returns true if this type can hold nested structure.
    pub fn is_structural(&self) -> bool {
        matches!(self, FieldType::Array | FieldType::Object)
    }
}

impl Default for FieldType {
    fn default() -> Self {
        FieldType::Unknown
    }
}

/// Inferred sub-field of an array item, used for composite detection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemField {
    /// Sub-field name inside the item object.
    pub name: String,
    /// Inferred type of the sub-field.
    pub field_type: FieldType,
}

impl ItemField {
    /// Create a new item field.
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
        }
    }
}

/// Description of a single field in an API response shape.
///
/// Produced by the external schema/URL parser; immutable once created
/// for a given analysis pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Full path to the field (e.g., `data.items.price`).
    pub path: String,
    /// Leaf name of the field.
    pub name: String,
    /// Inferred primitive type.
    pub field_type: FieldType,
    /// Up to N sample values observed for this field.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sample_values: Vec<Value>,
    /// Semantic category, when already detected by an earlier pass.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semantic_category: Option<SemanticCategory>,
    /// Format string from an external schema (e.g., `email`, `date-time`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format_hint: Option<String>,
    /// Inferred sub-fields of array items (array-typed fields only).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub item_fields: Vec<ItemField>,
    /// Zero-based position among the sibling fields.
    pub position: usize,
    /// Total number of fields in the containing shape.
    pub total_fields: usize,
}

impl FieldDescriptor {
    /// Create a descriptor with basic information.
    pub fn new(
        path: impl Into<String>,
        name: impl Into<String>,
        field_type: FieldType,
        position: usize,
        total_fields: usize,
    ) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            field_type,
            sample_values: Vec::new(),
            semantic_category: None,
            format_hint: None,
            item_fields: Vec::new(),
            position,
            total_fields,
        }
    }

    /// Set sample values.
    pub fn with_samples(mut self, samples: Vec<Value>) -> Self {
        self.sample_values = samples;
        self
    }

    /// Set the external format hint.
    pub fn with_format_hint(mut self, hint: impl Into<String>) -> Self {
        self.format_hint = Some(hint.into());
        self
    }

    /// Set the item structure for an array-typed field.
    pub fn with_item_fields(mut self, item_fields: Vec<ItemField>) -> Self {
        self.item_fields = item_fields;
        self
    }

    /// Set a pre-detected semantic category.
    pub fn with_category(mut self, category: SemanticCategory) -> Self {
        self.semantic_category = Some(category);
        self
    }

    /// Returns true if a sample value carries no usable data.
    ///
    /// Null, empty strings, and empty arrays all count as missing.
    pub fn is_empty_value(value: &Value) -> bool {
        match value {
            Value::Null => true,
            Value::String(s) => s.trim().is_empty(),
            Value::Array(a) => a.is_empty(),
            _ => false,
        }
    }

    /// Iterate over sample values that carry usable data.
    pub fn present_values(&self) -> impl Iterator<Item = &Value> {
        self.sample_values
            .iter()
            .filter(|v| !Self::is_empty_value(v))
    }

    /// Fraction of sample values that carry usable data.
    ///
    /// Returns 0.0 when no samples were collected.
    pub fn presence_ratio(&self) -> f64 {
        if self.sample_values.is_empty() {
            return 0.0;
        }
        let present = self.present_values().count();
        present as f64 / self.sample_values.len() as f64
    }
}
