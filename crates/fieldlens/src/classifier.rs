//! Main classifier struct and public API.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ClassifierConfig;
use crate::error::Result;
use crate::field::{FieldDescriptor, FieldType};
use crate::grouping::{GroupingAnalyzer, GroupingResult};
use crate::importance::{ImportanceScore, ImportanceScorer, ImportanceTier};
use crate::patterns::{PatternRegistry, SemanticCategory};
use crate::semantics::{
    ConfidenceLevel, ConfidenceResult, DetectionCache, SemanticDetector,
};

/// Classification output for a single field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldClassification {
    /// Full path of the field.
    pub path: String,
    /// Leaf name of the field.
    pub name: String,
    /// Inferred primitive type.
    pub field_type: FieldType,
    /// Ranked category alternatives (at most the configured maximum).
    pub candidates: Vec<ConfidenceResult>,
    /// Top candidate, present only when its level is High.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_match: Option<ConfidenceResult>,
    /// Composite (array-structural) match, when one applies.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub composite: Option<ConfidenceResult>,
    /// Category driving downstream decisions, when confidently known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<SemanticCategory>,
    /// Visual-importance score.
    pub importance: ImportanceScore,
}

/// Counts of fields by confidence level.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LevelCounts {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    pub none: usize,
}

/// Counts of fields by importance tier.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TierCounts {
    pub primary: usize,
    pub secondary: usize,
    pub tertiary: usize,
}

/// Summary of a classification pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationSummary {
    /// Total number of fields classified.
    pub total_fields: usize,
    /// Fields with a confidently assigned category.
    pub categorized_fields: usize,
    /// Fields by top-candidate confidence level.
    pub fields_by_level: LevelCounts,
    /// Fields by importance tier.
    pub fields_by_tier: TierCounts,
    /// Number of sections formed.
    pub group_count: usize,
    /// Fields claimed by a section.
    pub grouped_fields: usize,
    /// Mean top-candidate confidence across fields with any candidate.
    pub mean_confidence: f64,
    /// Human-readable recommendation.
    pub recommendation: String,
}

/// Result of classifying a field list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationReport {
    /// Per-field classification, in input order.
    pub fields: Vec<FieldClassification>,
    /// Section layout.
    pub grouping: GroupingResult,
    /// Summary statistics.
    pub summary: ClassificationSummary,
}

/// The main classification engine.
///
/// Pure over its inputs: the only mutable state is the caller-owned
/// detection cache.
pub struct FieldClassifier {
    detector: SemanticDetector,
    importance: ImportanceScorer,
    grouping: GroupingAnalyzer,
}

impl FieldClassifier {
    /// Create a classifier with default configuration.
    pub fn new() -> Self {
        Self {
            detector: SemanticDetector::new(),
            importance: ImportanceScorer::new(),
            grouping: GroupingAnalyzer::new(),
        }
    }

    /// Create a classifier with custom, validated configuration.
    pub fn with_config(config: ClassifierConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            detector: SemanticDetector::with_registry(
                PatternRegistry::standard(),
                config.detector.clone(),
            ),
            importance: ImportanceScorer::with_config(config.importance.clone())?,
            grouping: GroupingAnalyzer::with_config(config.grouping.clone())?,
        })
    }

    /// Classify a field list.
    ///
    /// Runs semantic detection, importance scoring, and grouping, in
    /// that order; detected categories feed the later passes.
    pub fn classify(
        &self,
        fields: &[FieldDescriptor],
        cache: &mut DetectionCache,
    ) -> ClassificationReport {
        debug!(fields = fields.len(), "starting classification pass");

        let mut enriched: Vec<FieldDescriptor> = fields.to_vec();
        let mut classifications = Vec::with_capacity(fields.len());

        for field in &mut enriched {
            let candidates = self.detector.detect(cache, field);
            let best_match = SemanticDetector::best_match(&candidates).cloned();
            let composite = self.detector.detect_composite(field);

            // The High-gate applies to both paths: a weak composite
            // guess must not drive grouping or richness either.
            let category = best_match.as_ref().map(|r| r.category).or_else(|| {
                composite
                    .as_ref()
                    .filter(|c| c.level == ConfidenceLevel::High)
                    .map(|c| c.category)
            });
            field.semantic_category = category;

            let importance = self.importance.score(field);

            classifications.push(FieldClassification {
                path: field.path.clone(),
                name: field.name.clone(),
                field_type: field.field_type,
                candidates: candidates.to_vec(),
                best_match,
                composite,
                category,
                importance,
            });
        }

        let grouping = self.grouping.analyze(&enriched);
        let summary = self.compute_summary(&classifications, &grouping);

        debug!(
            categorized = summary.categorized_fields,
            groups = summary.group_count,
            "classification pass complete"
        );

        ClassificationReport {
            fields: classifications,
            grouping,
            summary,
        }
    }

    /// Compute summary statistics from per-field results.
    fn compute_summary(
        &self,
        fields: &[FieldClassification],
        grouping: &GroupingResult,
    ) -> ClassificationSummary {
        let mut fields_by_level = LevelCounts::default();
        let mut fields_by_tier = TierCounts::default();
        let mut confidence_sum = 0.0;
        let mut confidence_count = 0usize;

        for field in fields {
            let level = field
                .candidates
                .first()
                .map(|c| c.level)
                .unwrap_or(ConfidenceLevel::None);
            match level {
                ConfidenceLevel::High => fields_by_level.high += 1,
                ConfidenceLevel::Medium => fields_by_level.medium += 1,
                ConfidenceLevel::Low => fields_by_level.low += 1,
                ConfidenceLevel::None => fields_by_level.none += 1,
            }

            match field.importance.tier {
                ImportanceTier::Primary => fields_by_tier.primary += 1,
                ImportanceTier::Secondary => fields_by_tier.secondary += 1,
                ImportanceTier::Tertiary => fields_by_tier.tertiary += 1,
            }

            if let Some(top) = field.candidates.first() {
                confidence_sum += top.confidence;
                confidence_count += 1;
            }
        }

        let categorized_fields = fields.iter().filter(|f| f.category.is_some()).count();
        let mean_confidence = if confidence_count > 0 {
            confidence_sum / confidence_count as f64
        } else {
            0.0
        };

        let recommendation =
            self.generate_recommendation(fields.len(), categorized_fields, grouping);

        ClassificationSummary {
            total_fields: fields.len(),
            categorized_fields,
            fields_by_level,
            fields_by_tier,
            group_count: grouping.groups.len(),
            grouped_fields: grouping.grouped_count(),
            mean_confidence,
            recommendation,
        }
    }

    /// Generate a recommendation based on classification coverage.
    fn generate_recommendation(
        &self,
        total: usize,
        categorized: usize,
        grouping: &GroupingResult,
    ) -> String {
        if total == 0 {
            return "No fields to classify.".to_string();
        }

        let coverage = categorized as f64 / total as f64;
        if coverage >= 0.8 {
            format!(
                "Strong classification coverage ({}/{} fields categorized).",
                categorized, total
            )
        } else if coverage >= 0.5 {
            format!(
                "Moderate coverage: {}/{} fields categorized. Generic widgets will render the rest.",
                categorized, total
            )
        } else if !grouping.groups.is_empty() {
            format!(
                "Low category coverage ({}/{}), but {} section(s) were identified from field names.",
                categorized,
                total,
                grouping.groups.len()
            )
        } else {
            format!(
                "Low classification coverage ({}/{}). Consider supplying sample values or schema hints.",
                categorized, total
            )
        }
    }
}

impl Default for FieldClassifier {
    fn default() -> Self {
        Self::new()
    }
}
