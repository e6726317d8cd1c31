//! Aggregated classifier configuration, loadable without recompilation.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{FieldLensError, Result};
use crate::grouping::GroupingConfig;
use crate::importance::ImportanceConfig;
use crate::semantics::DetectorConfig;

/// Full configuration surface for a classification pass.
///
/// All of it is data, not code; defaults match the built-in constants
/// and any part can be overridden from a JSON document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Semantic detector settings.
    pub detector: DetectorConfig,
    /// Importance scorer settings.
    pub importance: ImportanceConfig,
    /// Grouping analyzer settings.
    pub grouping: GroupingConfig,
}

impl ClassifierConfig {
    /// Parse a configuration from a JSON string.
    ///
    /// The result is validated before being returned.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| FieldLensError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&contents)
    }

    /// Check every config invariant; intended to fail fast at load.
    pub fn validate(&self) -> Result<()> {
        if self.detector.max_candidates == 0 {
            return Err(FieldLensError::Config(
                "detector.max_candidates must be at least 1".to_string(),
            ));
        }
        self.importance.validate()?;
        self.grouping.validate()?;
        Ok(())
    }
}
