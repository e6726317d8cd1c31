//! Weighted confidence scoring of one field against one pattern.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::field::FieldType;
use crate::patterns::{SemanticCategory, SemanticPattern};

/// Discretized confidence band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceLevel {
    High,
    Medium,
    Low,
    None,
}

/// One independently-weighted piece of evidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalMatch {
    /// Signal name (e.g., `name_pattern`, `email_format`).
    pub name: String,
    /// Whether the signal fired.
    pub matched: bool,
    /// Maximum weight the signal could contribute.
    pub weight: f64,
    /// Weight it actually contributed.
    pub contribution: f64,
}

impl SignalMatch {
    fn new(name: impl Into<String>, matched: bool, weight: f64, contribution: f64) -> Self {
        Self {
            name: name.into(),
            matched,
            weight,
            contribution,
        }
    }
}

/// Outcome of scoring a field against one pattern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceResult {
    /// Category the pattern argues for.
    pub category: SemanticCategory,
    /// Normalized confidence in [0, 1].
    pub confidence: f64,
    /// Confidence band derived from the pattern's thresholds.
    pub level: ConfidenceLevel,
    /// Per-signal breakdown of the score.
    pub signals: Vec<SignalMatch>,
}

/// Computes a weighted confidence score for one field and one pattern.
///
/// Never fails: validator errors count as non-matches and are swallowed
/// at the point of invocation.
pub struct ConfidenceScorer;

impl ConfidenceScorer {
    /// Score a field against a pattern.
    ///
    /// `achieved / max_possible` over all of the pattern's signals.
    /// Signals the input cannot satisfy (e.g., a format hint when none
    /// was supplied) still raise `max_possible`, lowering achievable
    /// confidence rather than being excluded.
    pub fn score(
        field_name: &str,
        field_type: FieldType,
        sample_values: &[Value],
        format_hint: Option<&str>,
        pattern: &SemanticPattern,
    ) -> ConfidenceResult {
        let mut achieved = 0.0;
        let mut max_possible = 0.0;
        let mut signals = Vec::new();

        // Name signal: best matching regex, never summed.
        if !pattern.name_patterns.is_empty() {
            let weight = pattern.max_name_weight();
            let best = pattern.best_name_match(field_name);
            let contribution = best.unwrap_or(0.0);
            max_possible += weight;
            achieved += contribution;
            signals.push(SignalMatch::new(
                "name_pattern",
                best.is_some(),
                weight,
                contribution,
            ));
        }

        // Type signal: binary.
        if let Some(constraint) = &pattern.type_constraint {
            let matched = constraint.allowed_types.contains(&field_type);
            let contribution = if matched { constraint.weight } else { 0.0 };
            max_possible += constraint.weight;
            achieved += contribution;
            signals.push(SignalMatch::new(
                "type_constraint",
                matched,
                constraint.weight,
                contribution,
            ));
        }

        // Value signals: any non-null sample satisfying the predicate.
        for validator in &pattern.value_validators {
            let matched = sample_values
                .iter()
                .filter(|v| !v.is_null())
                .any(|v| (validator.predicate)(v).unwrap_or(false));
            let contribution = if matched { validator.weight } else { 0.0 };
            max_possible += validator.weight;
            achieved += contribution;
            signals.push(SignalMatch::new(
                validator.name,
                matched,
                validator.weight,
                contribution,
            ));
        }

        // Format-hint signals: exact string equality.
        for hint in &pattern.format_hints {
            let matched = format_hint == Some(hint.format_name);
            let contribution = if matched { hint.weight } else { 0.0 };
            max_possible += hint.weight;
            achieved += contribution;
            signals.push(SignalMatch::new(
                format!("format:{}", hint.format_name),
                matched,
                hint.weight,
                contribution,
            ));
        }

        let confidence = if max_possible > 0.0 {
            (achieved / max_possible).clamp(0.0, 1.0)
        } else {
            0.0
        };

        ConfidenceResult {
            category: pattern.category,
            confidence,
            level: Self::band(confidence, pattern),
            signals,
        }
    }

    /// Discretize a confidence score using the pattern's thresholds.
    fn band(confidence: f64, pattern: &SemanticPattern) -> ConfidenceLevel {
        if confidence >= pattern.high_threshold {
            ConfidenceLevel::High
        } else if confidence >= pattern.medium_threshold {
            ConfidenceLevel::Medium
        } else if confidence > 0.0 {
            ConfidenceLevel::Low
        } else {
            ConfidenceLevel::None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patterns::validators::{self, ValidatorError};
    use serde_json::json;

    fn email_pattern() -> SemanticPattern {
        SemanticPattern::new(SemanticCategory::Email)
            .with_name(r"(?i)^email$", 1.0)
            .with_types(vec![FieldType::String], 0.5)
            .with_validator("email_format", validators::is_email, 0.9)
            .with_format("email", 0.6)
    }

    #[test]
    fn test_full_match_without_hint() {
        let result = ConfidenceScorer::score(
            "email",
            FieldType::String,
            &[json!("user@example.com")],
            None,
            &email_pattern(),
        );

        // 1.0 + 0.5 + 0.9 achieved of 3.0 possible.
        assert!((result.confidence - 0.8).abs() < 1e-9);
        assert_eq!(result.level, ConfidenceLevel::High);
        assert_eq!(result.signals.len(), 4);
        assert!(!result.signals[3].matched);
    }

    #[test]
    fn test_format_hint_completes_score() {
        let result = ConfidenceScorer::score(
            "email",
            FieldType::String,
            &[json!("user@example.com")],
            Some("email"),
            &email_pattern(),
        );
        assert!((result.confidence - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_null_samples_are_ignored() {
        let result = ConfidenceScorer::score(
            "email",
            FieldType::String,
            &[serde_json::Value::Null, json!("user@example.com")],
            None,
            &email_pattern(),
        );
        assert!(result.signals.iter().any(|s| s.name == "email_format" && s.matched));
    }

    #[test]
    fn test_failing_validator_counts_as_no_match() {
        fn broken(_: &serde_json::Value) -> Result<bool, ValidatorError> {
            Err(ValidatorError("boom".to_string()))
        }

        let pattern = SemanticPattern::new(SemanticCategory::Email)
            .with_name(r"^email$", 1.0)
            .with_validator("broken", broken, 0.9);

        let result = ConfidenceScorer::score(
            "email",
            FieldType::String,
            &[json!("user@example.com")],
            None,
            &pattern,
        );

        let broken_signal = result.signals.iter().find(|s| s.name == "broken").unwrap();
        assert!(!broken_signal.matched);
        assert_eq!(broken_signal.contribution, 0.0);
        // Name signal still contributed; classification was not aborted.
        assert!((result.confidence - 1.0 / 1.9).abs() < 1e-9);
    }

    #[test]
    fn test_empty_pattern_scores_zero() {
        let pattern = SemanticPattern::new(SemanticCategory::Status);
        let result = ConfidenceScorer::score("status", FieldType::String, &[], None, &pattern);
        assert_eq!(result.confidence, 0.0);
        assert_eq!(result.level, ConfidenceLevel::None);
    }

    #[test]
    fn test_price_scenario() {
        let registry = crate::patterns::PatternRegistry::standard();
        let price = registry
            .simple()
            .find(|p| p.category == SemanticCategory::Price)
            .unwrap();

        let result =
            ConfidenceScorer::score("price", FieldType::Number, &[json!(29.99)], None, price);
        assert!(result.confidence >= 0.75);
        assert_eq!(result.level, ConfidenceLevel::High);
    }
}
