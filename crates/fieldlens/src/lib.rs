//! Fieldlens: semantic field classification for API response shapes.
//!
//! Fieldlens inspects JSON/OpenAPI field descriptors (name, inferred
//! type, sample values, optional schema hints) and produces semantic
//! categories, visual-importance tiers, and a grouping of related
//! fields into logical sections.
//!
//! # Core Principles
//!
//! - **Deterministic**: identical inputs always classify identically
//! - **Pure**: no I/O; the only mutable state is a caller-owned cache
//! - **Explainable**: every score carries its per-signal breakdown
//!
//! # Example
//!
//! ```
//! use fieldlens::{DetectionCache, FieldClassifier, FieldDescriptor, FieldType};
//! use serde_json::json;
//!
//! let fields = vec![
//!     FieldDescriptor::new("price", "price", FieldType::Number, 0, 2)
//!         .with_samples(vec![json!(29.99)]),
//!     FieldDescriptor::new("email", "email", FieldType::String, 1, 2)
//!         .with_samples(vec![json!("user@example.com")]),
//! ];
//!
//! let classifier = FieldClassifier::new();
//! let mut cache = DetectionCache::new();
//! let report = classifier.classify(&fields, &mut cache);
//!
//! assert_eq!(report.summary.total_fields, 2);
//! assert_eq!(report.summary.categorized_fields, 2);
//! ```

pub mod classifier;
pub mod config;
pub mod error;
pub mod field;
pub mod grouping;
pub mod importance;
pub mod patterns;
pub mod semantics;

pub use classifier::{
    ClassificationReport, ClassificationSummary, FieldClassification, FieldClassifier,
    LevelCounts, TierCounts,
};
pub use config::ClassifierConfig;
pub use error::{FieldLensError, Result};
pub use field::{FieldDescriptor, FieldType, ItemField};
pub use grouping::{
    ClusterRule, FieldGroup, GroupingAnalyzer, GroupingConfig, GroupingResult,
};
pub use importance::{ImportanceConfig, ImportanceScore, ImportanceScorer, ImportanceTier};
pub use patterns::{PatternRegistry, SemanticCategory, SemanticPattern};
pub use semantics::{
    ConfidenceLevel, ConfidenceResult, ConfidenceScorer, DetectionCache, DetectorConfig,
    SemanticDetector, SignalMatch,
};
