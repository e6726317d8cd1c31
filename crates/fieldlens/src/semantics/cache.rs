//! Memoization cache for detection results.
//!
//! Owned by the caller and passed into the detector, so its lifecycle
//! ("one analysis session") is explicit. Intentionally unbounded: field
//! counts per API response are small, and keys are fully derived from
//! call inputs.

use std::collections::HashMap;
use std::sync::Arc;

use crate::field::{FieldDescriptor, FieldType};

use super::scorer::ConfidenceResult;

/// Key covering the full detection input tuple.
///
/// Sample values enter via canonical JSON serialization so distinct
/// sample sets are distinct keys even when name and type match.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DetectionKey {
    path: String,
    name: String,
    field_type: FieldType,
    samples: String,
    format_hint: Option<String>,
}

impl DetectionKey {
    /// Build the key for a field descriptor.
    pub fn for_field(field: &FieldDescriptor) -> Self {
        Self {
            path: field.path.clone(),
            name: field.name.clone(),
            field_type: field.field_type,
            samples: serde_json::to_string(&field.sample_values).unwrap_or_default(),
            format_hint: field.format_hint.clone(),
        }
    }
}

/// Session-scoped memoization cache.
///
/// Cache hits return a clone of the stored `Arc`, so identical calls
/// observe the same allocation (`Arc::ptr_eq`), which upstream uses for
/// cheap re-render checks.
#[derive(Debug, Default)]
pub struct DetectionCache {
    entries: HashMap<DetectionKey, Arc<[ConfidenceResult]>>,
}

impl DetectionCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a cached result set.
    pub fn get(&self, key: &DetectionKey) -> Option<Arc<[ConfidenceResult]>> {
        self.entries.get(key).map(Arc::clone)
    }

    /// Store a result set.
    pub fn insert(&mut self, key: DetectionKey, results: Arc<[ConfidenceResult]>) {
        self.entries.insert(key, results);
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every cached entry.
    ///
    /// Used on reset or when pattern rules change.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_distinct_samples_are_distinct_keys() {
        let base = FieldDescriptor::new("price", "price", FieldType::Number, 0, 1);
        let a = DetectionKey::for_field(&base.clone().with_samples(vec![json!(1.0)]));
        let b = DetectionKey::for_field(&base.clone().with_samples(vec![json!(2.0)]));
        let c = DetectionKey::for_field(&base.with_samples(vec![json!(1.0)]));
        assert_ne!(a, b);
        assert_eq!(a, c);
    }

    #[test]
    fn test_clear_empties_cache() {
        let field = FieldDescriptor::new("a", "a", FieldType::String, 0, 1);
        let mut cache = DetectionCache::new();
        cache.insert(DetectionKey::for_field(&field), Arc::from(Vec::new()));
        assert_eq!(cache.len(), 1);

        cache.clear();
        assert!(cache.is_empty());
    }
}
