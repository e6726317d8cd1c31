//! Grouping of related fields into logical sections.

use std::collections::HashSet;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{FieldLensError, Result};
use crate::field::FieldDescriptor;
use crate::patterns::SemanticCategory;

/// A rule collecting fields of related categories into one section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusterRule {
    /// Section label (e.g., `Contact`).
    pub label: String,
    /// Categories the rule collects.
    pub categories: Vec<SemanticCategory>,
    /// Minimum member count for the cluster to form.
    pub min_fields: usize,
}

impl ClusterRule {
    /// Create a cluster rule.
    pub fn new(
        label: impl Into<String>,
        categories: Vec<SemanticCategory>,
        min_fields: usize,
    ) -> Self {
        Self {
            label: label.into(),
            categories,
            min_fields,
        }
    }
}

/// Configuration for the grouping analyzer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupingConfig {
    /// Below this many total fields, grouping is skipped entirely.
    pub min_total_fields: usize,
    /// Minimum members for a prefix bucket to become a group.
    pub min_prefix_group_size: usize,
    /// Final prefix words dropped when formatting labels.
    pub stop_suffixes: Vec<String>,
    /// Semantic cluster rules, applied in order.
    pub clusters: Vec<ClusterRule>,
}

impl Default for GroupingConfig {
    fn default() -> Self {
        Self {
            min_total_fields: 8,
            min_prefix_group_size: 3,
            stop_suffixes: [
                "info", "details", "data", "config", "settings", "options", "params",
                "parameters",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            clusters: vec![
                ClusterRule::new(
                    "Contact",
                    vec![
                        SemanticCategory::Email,
                        SemanticCategory::Phone,
                        SemanticCategory::Address,
                    ],
                    2,
                ),
                ClusterRule::new(
                    "Media",
                    vec![
                        SemanticCategory::Image,
                        SemanticCategory::Avatar,
                        SemanticCategory::Video,
                    ],
                    2,
                ),
                ClusterRule::new(
                    "Pricing",
                    vec![SemanticCategory::Price, SemanticCategory::Currency],
                    2,
                ),
            ],
        }
    }
}

impl GroupingConfig {
    /// Check config invariants; intended to fail fast at load time.
    pub fn validate(&self) -> Result<()> {
        if self.min_total_fields == 0 {
            return Err(FieldLensError::Config(
                "min_total_fields must be at least 1".to_string(),
            ));
        }
        if self.min_prefix_group_size == 0 {
            return Err(FieldLensError::Config(
                "min_prefix_group_size must be at least 1".to_string(),
            ));
        }
        for rule in &self.clusters {
            if rule.min_fields == 0 {
                return Err(FieldLensError::Config(format!(
                    "cluster '{}' min_fields must be at least 1",
                    rule.label
                )));
            }
            if rule.categories.is_empty() {
                return Err(FieldLensError::Config(format!(
                    "cluster '{}' has no categories",
                    rule.label
                )));
            }
        }
        Ok(())
    }
}

/// One logical section of related fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldGroup {
    /// Fields sharing a name prefix (e.g., `billing_*`).
    Prefix {
        prefix: String,
        label: String,
        fields: Vec<FieldDescriptor>,
    },
    /// Fields whose categories belong to one cluster rule.
    Cluster {
        label: String,
        categories: Vec<SemanticCategory>,
        fields: Vec<FieldDescriptor>,
    },
}

impl FieldGroup {
    /// Human label for the section.
    pub fn label(&self) -> &str {
        match self {
            FieldGroup::Prefix { label, .. } => label,
            FieldGroup::Cluster { label, .. } => label,
        }
    }

    /// Member fields.
    pub fn fields(&self) -> &[FieldDescriptor] {
        match self {
            FieldGroup::Prefix { fields, .. } => fields,
            FieldGroup::Cluster { fields, .. } => fields,
        }
    }

    /// Member count.
    pub fn len(&self) -> usize {
        self.fields().len()
    }

    /// Whether the group is empty.
    pub fn is_empty(&self) -> bool {
        self.fields().is_empty()
    }
}

/// Outcome of the grouping pass.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GroupingResult {
    /// Formed sections.
    pub groups: Vec<FieldGroup>,
    /// Fields claimed by no section.
    pub ungrouped: Vec<FieldDescriptor>,
}

impl GroupingResult {
    /// Total fields across all groups.
    pub fn grouped_count(&self) -> usize {
        self.groups.iter().map(FieldGroup::len).sum()
    }
}

/// Post-processes a flat field list into logical sections.
pub struct GroupingAnalyzer {
    config: GroupingConfig,
}

impl GroupingAnalyzer {
    /// Create an analyzer with the default configuration.
    pub fn new() -> Self {
        Self {
            config: GroupingConfig::default(),
        }
    }

    /// Create an analyzer with a custom, validated configuration.
    pub fn with_config(config: GroupingConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Group a field list into prefix groups and semantic clusters.
    ///
    /// Prefix grouping always runs first and removes its fields before
    /// clustering, so a field path appears in at most one group.
    pub fn analyze(&self, fields: &[FieldDescriptor]) -> GroupingResult {
        if fields.len() < self.config.min_total_fields {
            return GroupingResult {
                groups: Vec::new(),
                ungrouped: fields.to_vec(),
            };
        }

        let mut claimed: HashSet<&str> = HashSet::new();
        let mut groups = Vec::new();

        // Pass 1: prefix groups, in first-appearance order.
        let mut buckets: IndexMap<String, Vec<&FieldDescriptor>> = IndexMap::new();
        for field in fields {
            if let Some(prefix) = name_prefix(&field.name) {
                buckets.entry(prefix).or_default().push(field);
            }
        }
        for (prefix, members) in buckets {
            if members.len() < self.config.min_prefix_group_size {
                continue;
            }
            for field in &members {
                claimed.insert(field.path.as_str());
            }
            groups.push(FieldGroup::Prefix {
                label: self.format_label(&prefix),
                prefix,
                fields: members.into_iter().cloned().collect(),
            });
        }

        // Pass 2: semantic clusters over unclaimed fields only.
        for rule in &self.config.clusters {
            let members: Vec<&FieldDescriptor> = fields
                .iter()
                .filter(|f| !claimed.contains(f.path.as_str()))
                .filter(|f| {
                    f.semantic_category
                        .is_some_and(|c| rule.categories.contains(&c))
                })
                .collect();
            if members.len() < rule.min_fields {
                continue;
            }
            for field in &members {
                claimed.insert(field.path.as_str());
            }
            groups.push(FieldGroup::Cluster {
                label: rule.label.clone(),
                categories: rule.categories.clone(),
                fields: members.into_iter().cloned().collect(),
            });
        }

        let ungrouped: Vec<FieldDescriptor> = fields
            .iter()
            .filter(|f| !claimed.contains(f.path.as_str()))
            .cloned()
            .collect();

        // Orphan prevention: one or two stray fields next to tidy
        // sections reads as broken layout, so prefer no grouping at all.
        if !groups.is_empty() && (1..=2).contains(&ungrouped.len()) {
            debug!(
                stranded = ungrouped.len(),
                "discarding grouping to avoid orphaned fields"
            );
            return GroupingResult {
                groups: Vec::new(),
                ungrouped: fields.to_vec(),
            };
        }

        GroupingResult { groups, ungrouped }
    }

    /// Format a raw prefix into a section label.
    fn format_label(&self, prefix: &str) -> String {
        let trimmed = prefix.trim_end_matches(['_', '.']);
        let mut words: Vec<&str> = trimmed
            .split(['_', '.'])
            .filter(|w| !w.is_empty())
            .collect();

        if words.len() > 1 {
            if let Some(last) = words.last() {
                if self
                    .config
                    .stop_suffixes
                    .iter()
                    .any(|s| s.eq_ignore_ascii_case(last))
                {
                    words.pop();
                }
            }
        }

        words
            .iter()
            .map(|w| title_case(w))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Default for GroupingAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

/// Everything up to and including the last `_` or `.` separator.
fn name_prefix(name: &str) -> Option<String> {
    name.rfind(['_', '.']).map(|idx| name[..=idx].to_string())
}

/// Uppercase the first letter, lowercase the rest.
fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}
