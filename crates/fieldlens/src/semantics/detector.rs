//! Semantic detection: the scorer applied across the whole registry.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::field::{FieldDescriptor, FieldType};
use crate::patterns::{CompositePattern, PatternRegistry};

use super::cache::{DetectionCache, DetectionKey};
use super::scorer::{ConfidenceLevel, ConfidenceResult, ConfidenceScorer, SignalMatch};

/// Configuration for the semantic detector.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Maximum number of alternatives retained per field.
    pub max_candidates: usize,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self { max_candidates: 3 }
    }
}

/// Runs every registered pattern against a field and ranks the results.
pub struct SemanticDetector {
    registry: PatternRegistry,
    config: DetectorConfig,
}

impl SemanticDetector {
    /// Create a detector over the standard registry.
    pub fn new() -> Self {
        Self {
            registry: PatternRegistry::standard(),
            config: DetectorConfig::default(),
        }
    }

    /// Create a detector with a custom registry and configuration.
    pub fn with_registry(registry: PatternRegistry, config: DetectorConfig) -> Self {
        Self { registry, config }
    }

    /// Detect semantic categories for a field.
    ///
    /// Returns at most `max_candidates` strictly-positive results sorted
    /// by descending confidence; ties keep registry order (stable sort).
    /// Identical inputs return the same cached allocation.
    pub fn detect(
        &self,
        cache: &mut DetectionCache,
        field: &FieldDescriptor,
    ) -> Arc<[ConfidenceResult]> {
        let key = DetectionKey::for_field(field);
        if let Some(hit) = cache.get(&key) {
            return hit;
        }

        let mut results: Vec<ConfidenceResult> = self
            .registry
            .simple()
            .map(|pattern| {
                ConfidenceScorer::score(
                    &field.name,
                    field.field_type,
                    &field.sample_values,
                    field.format_hint.as_deref(),
                    pattern,
                )
            })
            .filter(|r| r.confidence > 0.0)
            .collect();

        results.sort_by(|a, b| {
            b.confidence
                .partial_cmp(&a.confidence)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        results.truncate(self.config.max_candidates);

        debug!(
            field = %field.path,
            candidates = results.len(),
            "semantic detection complete"
        );

        let shared: Arc<[ConfidenceResult]> = Arc::from(results);
        cache.insert(key, Arc::clone(&shared));
        shared
    }

    /// The "smart default" gate: top result only when it is exactly High.
    ///
    /// Weaker guesses are withheld so they never silently drive UI
    /// decisions.
    pub fn best_match(results: &[ConfidenceResult]) -> Option<&ConfidenceResult> {
        results
            .first()
            .filter(|r| r.level == ConfidenceLevel::High)
    }

    /// Evaluate composite patterns against an array field's item shape.
    ///
    /// Returns the highest-confidence composite match, and only when its
    /// confidence is strictly positive.
    pub fn detect_composite(&self, field: &FieldDescriptor) -> Option<ConfidenceResult> {
        if !matches!(field.field_type, FieldType::Array) {
            return None;
        }

        let item_count = sampled_item_count(&field.sample_values);

        self.registry
            .composite()
            .map(|pattern| score_composite(field, item_count, pattern))
            .filter(|r| r.confidence > 0.0)
            .max_by(|a, b| {
                a.confidence
                    .partial_cmp(&b.confidence)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
    }
}

impl Default for SemanticDetector {
    fn default() -> Self {
        Self::new()
    }
}

/// Number of sampled items behind an array field.
///
/// Upstream parsers either sample whole arrays or individual items;
/// both shapes are accepted.
fn sampled_item_count(samples: &[Value]) -> usize {
    samples
        .iter()
        .map(|v| match v {
            Value::Array(items) => items.len(),
            Value::Null => 0,
            _ => 1,
        })
        .sum()
}

/// Score one composite pattern against a field's item structure.
fn score_composite(
    field: &FieldDescriptor,
    item_count: usize,
    pattern: &CompositePattern,
) -> ConfidenceResult {
    let mut achieved = 0.0;
    let mut max_possible = 0.0;
    let mut signals = Vec::new();

    // Name signal, same rules as simple scoring.
    if !pattern.base.name_patterns.is_empty() {
        let weight = pattern.base.max_name_weight();
        let best = pattern.base.best_name_match(&field.name);
        let contribution = best.unwrap_or(0.0);
        max_possible += weight;
        achieved += contribution;
        signals.push(SignalMatch {
            name: "name_pattern".to_string(),
            matched: best.is_some(),
            weight,
            contribution,
        });
    }

    // Fixed weight for being array-typed (always true here).
    max_possible += pattern.array_type_weight;
    achieved += pattern.array_type_weight;
    signals.push(SignalMatch {
        name: "array_type".to_string(),
        matched: true,
        weight: pattern.array_type_weight,
        contribution: pattern.array_type_weight,
    });

    // Structural signal: all-or-nothing over the required item fields.
    let structure_matched = !pattern.required_item_fields.is_empty()
        && pattern.required_item_fields.iter().all(|rule| {
            field
                .item_fields
                .iter()
                .any(|item| rule.matches(&item.name, item.field_type))
        });
    let contribution = if structure_matched {
        pattern.structure_weight
    } else {
        0.0
    };
    max_possible += pattern.structure_weight;
    achieved += contribution;
    signals.push(SignalMatch {
        name: "item_structure".to_string(),
        matched: structure_matched,
        weight: pattern.structure_weight,
        contribution,
    });

    // Thin sampling reduces confidence without rejecting outright.
    if item_count < pattern.min_items {
        achieved *= 0.5;
    }

    let confidence = if max_possible > 0.0 {
        (achieved / max_possible).clamp(0.0, 1.0)
    } else {
        0.0
    };

    let level = if confidence >= pattern.base.high_threshold {
        ConfidenceLevel::High
    } else if confidence >= pattern.base.medium_threshold {
        ConfidenceLevel::Medium
    } else if confidence > 0.0 {
        ConfidenceLevel::Low
    } else {
        ConfidenceLevel::None
    };

    ConfidenceResult {
        category: pattern.base.category,
        confidence,
        level,
        signals,
    }
}
