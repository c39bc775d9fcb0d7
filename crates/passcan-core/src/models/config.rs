//! Configuration structures for the extraction pipeline.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{PasscanError, Result};

/// Main configuration for the passcan pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PasscanConfig {
    /// Field extraction configuration.
    pub extraction: ExtractionConfig,

    /// Page pipeline configuration.
    pub pipeline: PipelineConfig,
}

/// Field extraction configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Year used by the MRZ birth-date century heuristic.
    /// `None` uses the current local year.
    pub reference_year: Option<i32>,

    /// Round the confidence score to four decimal places.
    pub round_confidence: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            reference_year: None,
            round_confidence: true,
        }
    }
}

/// Page pipeline configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Decode pages on a thread pool. Output order is unaffected.
    pub parallel: bool,
}

impl PasscanConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| PasscanError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
