//! Property-based tests for the classification pipeline.
//!
//! These tests use proptest to generate random inputs and verify that
//! the pipeline maintains its invariants under all conditions:
//!
//! 1. **No panics**: classification never crashes on any input
//! 2. **Determinism**: same input always produces same output
//! 3. **Bounds**: confidences and scores stay inside [0, 1]
//! 4. **Invariants**: result ordering, cache identity, group partitioning

use proptest::prelude::*;
use serde_json::json;

use fieldlens::{
    DetectionCache, FieldClassifier, FieldDescriptor, FieldType, GroupingAnalyzer,
    ImportanceScorer, SemanticDetector,
};

// =============================================================================
// Test Strategies
// =============================================================================

/// Generate arbitrary field-name-like strings.
fn field_name() -> impl Strategy<Value = String> {
    prop_oneof![
        // snake_case names
        "[a-z]{1,12}(_[a-z]{1,12}){0,3}",
        // dotted paths
        "[a-z]{1,8}(\\.[a-z]{1,8}){0,2}",
        // names that brush the metadata patterns
        "(id|_internal|[a-z]{2,8}_id|created_at|updated_at|deleted_date)",
        // arbitrary ASCII
        "[a-zA-Z0-9_.\\- ]{0,24}",
    ]
}

/// Generate a primitive field type.
fn field_type() -> impl Strategy<Value = FieldType> {
    prop_oneof![
        Just(FieldType::String),
        Just(FieldType::Number),
        Just(FieldType::Integer),
        Just(FieldType::Boolean),
        Just(FieldType::Array),
        Just(FieldType::Object),
        Just(FieldType::Null),
        Just(FieldType::Unknown),
    ]
}

/// Generate a sample JSON value.
fn sample_value() -> impl Strategy<Value = serde_json::Value> {
    prop_oneof![
        Just(serde_json::Value::Null),
        any::<bool>().prop_map(|b| json!(b)),
        (-1.0e6..1.0e6f64).prop_map(|n| json!(n)),
        "[ -~]{0,40}".prop_map(|s| json!(s)),
        prop::collection::vec("[a-z]{0,10}", 0..4).prop_map(|v| json!(v)),
    ]
}

/// Generate a full field descriptor.
fn field_descriptor() -> impl Strategy<Value = FieldDescriptor> {
    (
        field_name(),
        field_type(),
        prop::collection::vec(sample_value(), 0..5),
        0usize..20,
    )
        .prop_map(|(name, field_type, samples, position)| {
            FieldDescriptor::new(name.clone(), name, field_type, position, 20)
                .with_samples(samples)
        })
}

// =============================================================================
// Detector Properties
// =============================================================================

proptest! {
    /// Detection never panics, returns at most 3 results, sorted
    /// descending, all strictly positive and bounded.
    #[test]
    fn detect_is_bounded_and_sorted(field in field_descriptor()) {
        let detector = SemanticDetector::new();
        let mut cache = DetectionCache::new();

        let results = detector.detect(&mut cache, &field);
        prop_assert!(results.len() <= 3);
        for r in results.iter() {
            prop_assert!(r.confidence > 0.0);
            prop_assert!(r.confidence <= 1.0);
        }
        for pair in results.windows(2) {
            prop_assert!(pair[0].confidence >= pair[1].confidence);
        }
    }

    /// Repeating a detection returns the identical allocation; clearing
    /// the cache yields a fresh allocation with equal content.
    #[test]
    fn detect_memoization_is_stable(field in field_descriptor()) {
        let detector = SemanticDetector::new();
        let mut cache = DetectionCache::new();

        let first = detector.detect(&mut cache, &field);
        let second = detector.detect(&mut cache, &field);
        prop_assert!(std::sync::Arc::ptr_eq(&first, &second));

        cache.clear();
        let third = detector.detect(&mut cache, &field);
        prop_assert!(!std::sync::Arc::ptr_eq(&first, &third));
        prop_assert_eq!(&*first, &*third);
    }

    /// The best-match gate only ever passes High results.
    #[test]
    fn best_match_is_high_or_absent(field in field_descriptor()) {
        let detector = SemanticDetector::new();
        let mut cache = DetectionCache::new();

        let results = detector.detect(&mut cache, &field);
        match SemanticDetector::best_match(&results) {
            Some(best) => prop_assert_eq!(best.level, fieldlens::ConfidenceLevel::High),
            None => {}
        }
    }
}

// =============================================================================
// Importance Properties
// =============================================================================

proptest! {
    /// Importance scores never leave [0, 1] and never panic.
    #[test]
    fn importance_score_is_bounded(field in field_descriptor()) {
        let scorer = ImportanceScorer::new();
        let result = scorer.score(&field);
        prop_assert!((0.0..=1.0).contains(&result.score));
    }

    /// Metadata-shaped names always land in the lowest tier.
    #[test]
    fn metadata_names_force_tertiary(
        stem in "[a-z]{2,8}",
        field_type in field_type(),
    ) {
        let scorer = ImportanceScorer::new();
        for name in [format!("{stem}_id"), "id".to_string(), format!("_{stem}")] {
            let field = FieldDescriptor::new(name.clone(), name, field_type, 0, 5)
                .with_samples(vec![json!("x")]);
            let result = scorer.score(&field);
            prop_assert_eq!(result.tier, fieldlens::ImportanceTier::Tertiary);
        }
    }
}

// =============================================================================
// Grouping Properties
// =============================================================================

proptest! {
    /// Every field lands in exactly one place: one group or ungrouped.
    #[test]
    fn grouping_partitions_fields(
        names in prop::collection::hash_set("[a-z]{1,10}(_[a-z]{1,10}){0,2}", 0..24),
    ) {
        let total = names.len();
        let fields: Vec<FieldDescriptor> = names
            .into_iter()
            .enumerate()
            .map(|(i, name)| FieldDescriptor::new(name.clone(), name, FieldType::String, i, total))
            .collect();

        let result = GroupingAnalyzer::new().analyze(&fields);
        let placed: usize = result.grouped_count() + result.ungrouped.len();
        prop_assert_eq!(placed, fields.len());

        let mut seen = std::collections::HashSet::new();
        for group in &result.groups {
            for f in group.fields() {
                prop_assert!(seen.insert(f.path.clone()));
            }
        }
        for f in &result.ungrouped {
            prop_assert!(seen.insert(f.path.clone()));
        }
    }

    /// Grouping never strands exactly one or two fields.
    #[test]
    fn grouping_never_orphans(
        names in prop::collection::hash_set("[a-z]{1,10}(_[a-z]{1,10}){0,2}", 0..24),
    ) {
        let total = names.len();
        let fields: Vec<FieldDescriptor> = names
            .into_iter()
            .enumerate()
            .map(|(i, name)| FieldDescriptor::new(name.clone(), name, FieldType::String, i, total))
            .collect();

        let result = GroupingAnalyzer::new().analyze(&fields);
        if !result.groups.is_empty() {
            prop_assert!(result.ungrouped.is_empty() || result.ungrouped.len() >= 3);
        }
    }

    /// Below the activation minimum, grouping is always skipped.
    #[test]
    fn small_field_sets_never_group(
        names in prop::collection::hash_set("[a-z]{1,10}(_[a-z]{1,10}){0,2}", 0..8),
    ) {
        let total = names.len();
        prop_assume!(total < 8);
        let fields: Vec<FieldDescriptor> = names
            .into_iter()
            .enumerate()
            .map(|(i, name)| FieldDescriptor::new(name.clone(), name, FieldType::String, i, total))
            .collect();

        let result = GroupingAnalyzer::new().analyze(&fields);
        prop_assert!(result.groups.is_empty());
        prop_assert_eq!(result.ungrouped.len(), fields.len());
    }
}

// =============================================================================
// Pipeline Properties
// =============================================================================

proptest! {
    /// Full classification is deterministic for any input batch.
    #[test]
    fn classification_is_deterministic(
        fields in prop::collection::vec(field_descriptor(), 0..12),
    ) {
        let classifier = FieldClassifier::new();
        let mut cache = DetectionCache::new();

        let a = classifier.classify(&fields, &mut cache);
        let b = classifier.classify(&fields, &mut cache);

        let a_json = serde_json::to_string(&a).unwrap();
        let b_json = serde_json::to_string(&b).unwrap();
        prop_assert_eq!(a_json, b_json);
    }
}
