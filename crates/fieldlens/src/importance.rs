//! Visual-importance scoring, independent of semantic category.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{FieldLensError, Result};
use crate::field::FieldDescriptor;
use crate::patterns::SemanticCategory;
use crate::semantics::SignalMatch;

/// Visual-prominence tier for a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportanceTier {
    /// Hero content: headline-level prominence.
    Primary,
    /// Supporting content.
    Secondary,
    /// De-emphasized or collapsed by default.
    Tertiary,
}

/// Outcome of importance scoring for one field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportanceScore {
    /// Assigned tier, after any metadata override.
    pub tier: ImportanceTier,
    /// Raw weighted score in [0, 1], preserved for diagnostics even
    /// when the tier was overridden.
    pub score: f64,
    /// Per-signal breakdown.
    pub signals: Vec<SignalMatch>,
}

/// Configuration for the importance scorer.
///
/// The four signal weights must sum to exactly 1.0; this is checked
/// once at config load, not per call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportanceConfig {
    /// Weight of the primary-indicator name match.
    pub name_pattern_weight: f64,
    /// Weight of the category richness lookup.
    pub visual_richness_weight: f64,
    /// Weight of the sample data-presence fraction.
    pub data_presence_weight: f64,
    /// Weight of the structural position signal.
    pub position_weight: f64,
    /// Score at or above which the tier is Primary.
    pub primary_threshold: f64,
    /// Score at or above which the tier is Secondary.
    pub secondary_threshold: f64,
    /// Position score at the last field of a shape.
    pub position_floor: f64,
    /// Regex marking headline-like field names.
    pub primary_indicator: String,
    /// Regexes forcing administrative fields to Tertiary.
    pub metadata_patterns: Vec<String>,
}

impl Default for ImportanceConfig {
    fn default() -> Self {
        Self {
            name_pattern_weight: 0.40,
            visual_richness_weight: 0.25,
            data_presence_weight: 0.20,
            position_weight: 0.15,
            primary_threshold: 0.80,
            secondary_threshold: 0.50,
            position_floor: 0.25,
            primary_indicator:
                r"(?i)(^|[_.])(name|title|headline|summary|label|subject|caption)([_.]|$)"
                    .to_string(),
            metadata_patterns: vec![
                r"^id$".to_string(),
                r"^_".to_string(),
                r"(?i)^\w+_id$".to_string(),
                r"(?i)^(created|updated|deleted)_(at|date)$".to_string(),
            ],
        }
    }
}

impl ImportanceConfig {
    /// Check config invariants; intended to fail fast at load time.
    pub fn validate(&self) -> Result<()> {
        let weights = [
            ("name_pattern_weight", self.name_pattern_weight),
            ("visual_richness_weight", self.visual_richness_weight),
            ("data_presence_weight", self.data_presence_weight),
            ("position_weight", self.position_weight),
        ];
        for (name, w) in weights {
            if !(0.0..=1.0).contains(&w) {
                return Err(FieldLensError::Config(format!(
                    "{} must be in [0, 1], got {}",
                    name, w
                )));
            }
        }

        let sum: f64 = weights.iter().map(|(_, w)| w).sum();
        if (sum - 1.0).abs() > 1e-9 {
            return Err(FieldLensError::Config(format!(
                "importance weights must sum to 1.0, got {}",
                sum
            )));
        }

        for (name, t) in [
            ("primary_threshold", self.primary_threshold),
            ("secondary_threshold", self.secondary_threshold),
            ("position_floor", self.position_floor),
        ] {
            if !(0.0..=1.0).contains(&t) {
                return Err(FieldLensError::Config(format!(
                    "{} must be in [0, 1], got {}",
                    name, t
                )));
            }
        }
        if self.primary_threshold < self.secondary_threshold {
            return Err(FieldLensError::Config(
                "primary_threshold must be >= secondary_threshold".to_string(),
            ));
        }

        Ok(())
    }
}

/// Ranks a field's visual prominence from four weighted signals.
pub struct ImportanceScorer {
    config: ImportanceConfig,
    primary_indicator: Regex,
    metadata_patterns: Vec<Regex>,
}

impl ImportanceScorer {
    /// Create a scorer with the default configuration.
    pub fn new() -> Self {
        Self::with_config(ImportanceConfig::default()).unwrap()
    }

    /// Create a scorer with a custom, validated configuration.
    pub fn with_config(config: ImportanceConfig) -> Result<Self> {
        config.validate()?;
        let primary_indicator = Regex::new(&config.primary_indicator)?;
        let metadata_patterns = config
            .metadata_patterns
            .iter()
            .map(|p| Regex::new(p))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(Self {
            config,
            primary_indicator,
            metadata_patterns,
        })
    }

    /// Score a field's visual importance.
    pub fn score(&self, field: &FieldDescriptor) -> ImportanceScore {
        let cfg = &self.config;
        let mut signals = Vec::with_capacity(5);

        // Name-pattern signal: binary.
        let name_matched = self.primary_indicator.is_match(&field.name);
        let name_contribution = if name_matched {
            cfg.name_pattern_weight
        } else {
            0.0
        };
        signals.push(SignalMatch {
            name: "name_pattern".to_string(),
            matched: name_matched,
            weight: cfg.name_pattern_weight,
            contribution: name_contribution,
        });

        // Visual-richness signal: category lookup.
        let richness = visual_richness(field.semantic_category);
        let richness_contribution = richness * cfg.visual_richness_weight;
        signals.push(SignalMatch {
            name: "visual_richness".to_string(),
            matched: field.semantic_category.is_some(),
            weight: cfg.visual_richness_weight,
            contribution: richness_contribution,
        });

        // Data-presence signal: fraction of usable samples.
        let presence = field.presence_ratio();
        let presence_contribution = presence * cfg.data_presence_weight;
        signals.push(SignalMatch {
            name: "data_presence".to_string(),
            matched: presence > 0.0,
            weight: cfg.data_presence_weight,
            contribution: presence_contribution,
        });

        // Position signal: monotonic decay toward a floor.
        let position = position_score(field.position, field.total_fields, cfg.position_floor);
        let position_contribution = position * cfg.position_weight;
        signals.push(SignalMatch {
            name: "position".to_string(),
            matched: true,
            weight: cfg.position_weight,
            contribution: position_contribution,
        });

        let score = (name_contribution
            + richness_contribution
            + presence_contribution
            + position_contribution)
            .clamp(0.0, 1.0);

        // The override runs after score computation so the raw score
        // survives for diagnostics, but before the tier is returned.
        let overridden = self.is_metadata_field(&field.name);
        let tier = if overridden {
            ImportanceTier::Tertiary
        } else if score >= cfg.primary_threshold {
            ImportanceTier::Primary
        } else if score >= cfg.secondary_threshold {
            ImportanceTier::Secondary
        } else {
            ImportanceTier::Tertiary
        };

        signals.push(SignalMatch {
            name: "metadata_override".to_string(),
            matched: overridden,
            weight: 0.0,
            contribution: 0.0,
        });

        ImportanceScore {
            tier,
            score,
            signals,
        }
    }

    /// Whether a field name marks administrative/identifier metadata.
    fn is_metadata_field(&self, name: &str) -> bool {
        self.metadata_patterns.iter().any(|p| p.is_match(name))
    }
}

impl Default for ImportanceScorer {
    fn default() -> Self {
        Self::new()
    }
}

/// Richness constant for a semantic category.
///
/// Exhaustive over the category set so new categories cannot be added
/// without deciding their richness.
fn visual_richness(category: Option<SemanticCategory>) -> f64 {
    let Some(category) = category else {
        return 0.4;
    };
    match category {
        SemanticCategory::Image | SemanticCategory::Avatar | SemanticCategory::Video => 1.0,
        SemanticCategory::Reviews | SemanticCategory::Products => 0.8,
        SemanticCategory::Price | SemanticCategory::Rating => 0.7,
        SemanticCategory::Title | SemanticCategory::Description | SemanticCategory::Tags => 0.6,
        SemanticCategory::Status
        | SemanticCategory::Email
        | SemanticCategory::Phone
        | SemanticCategory::Url
        | SemanticCategory::Address
        | SemanticCategory::Username
        | SemanticCategory::Percentage => 0.5,
        SemanticCategory::Country | SemanticCategory::Quantity => 0.4,
        SemanticCategory::Date | SemanticCategory::Currency => 0.3,
        SemanticCategory::Uuid => 0.2,
    }
}

/// Linear decay from 1.0 at position 0 to the floor at the last
/// position. Single-field shapes always score 1.0. The curve shape is
/// tunable; monotonicity and the bounds are what matter.
fn position_score(position: usize, total_fields: usize, floor: f64) -> f64 {
    if total_fields <= 1 {
        return 1.0;
    }
    let fraction = position.min(total_fields - 1) as f64 / (total_fields - 1) as f64;
    (1.0 - (1.0 - floor) * fraction).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldType;
    use serde_json::json;

    fn scorer() -> ImportanceScorer {
        ImportanceScorer::new()
    }

    #[test]
    fn test_default_weights_sum_to_one() {
        ImportanceConfig::default().validate().unwrap();
    }

    #[test]
    fn test_unbalanced_weights_rejected() {
        let config = ImportanceConfig {
            name_pattern_weight: 0.5,
            ..ImportanceConfig::default()
        };
        assert!(config.validate().is_err());

        let negative = ImportanceConfig {
            name_pattern_weight: -0.1,
            visual_richness_weight: 0.65,
            ..ImportanceConfig::default()
        };
        assert!(negative.validate().is_err());
    }

    #[test]
    fn test_product_title_scenario() {
        let field = FieldDescriptor::new("product_title", "product_title", FieldType::String, 0, 10)
            .with_samples(vec![json!("Widget"), json!("Gadget"), json!("Gizmo")])
            .with_category(SemanticCategory::Title);

        let result = scorer().score(&field);
        // 0.40 + 0.6*0.25 + 1.0*0.20 + 1.0*0.15
        assert!((result.score - 0.90).abs() < 1e-9);
        assert_eq!(result.tier, ImportanceTier::Primary);
    }

    #[test]
    fn test_metadata_override_forces_tertiary() {
        for name in [
            "id",
            "_internal",
            "user_id",
            "created_at",
            "updated_at",
            "deleted_at",
            "deleted_date",
        ] {
            // Give the field every other reason to rank Primary.
            let field = FieldDescriptor::new(name, name, FieldType::String, 0, 10)
                .with_samples(vec![json!("x"), json!("y")])
                .with_category(SemanticCategory::Image);
            let result = scorer().score(&field);
            assert_eq!(result.tier, ImportanceTier::Tertiary, "field {name}");
        }
    }

    #[test]
    fn test_override_preserves_raw_score() {
        let field = FieldDescriptor::new("name_id", "name_id", FieldType::String, 0, 10)
            .with_samples(vec![json!("x")])
            .with_category(SemanticCategory::Image);
        let result = scorer().score(&field);
        assert_eq!(result.tier, ImportanceTier::Tertiary);
        assert!(result.score > 0.5);
        assert!(
            result
                .signals
                .iter()
                .any(|s| s.name == "metadata_override" && s.matched)
        );
    }

    #[test]
    fn test_position_decay_bounds() {
        assert_eq!(position_score(0, 1, 0.25), 1.0);
        assert_eq!(position_score(0, 10, 0.25), 1.0);
        assert!((position_score(9, 10, 0.25) - 0.25).abs() < 1e-9);

        // Monotonically decreasing.
        let scores: Vec<f64> = (0..10).map(|p| position_score(p, 10, 0.25)).collect();
        for pair in scores.windows(2) {
            assert!(pair[0] >= pair[1]);
        }
    }

    #[test]
    fn test_plain_field_lands_tertiary() {
        let field = FieldDescriptor::new("misc", "misc", FieldType::String, 9, 10);
        let result = scorer().score(&field);
        assert_eq!(result.tier, ImportanceTier::Tertiary);
    }
}
