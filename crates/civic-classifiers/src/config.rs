//! Configuration for the keyword classifier

use civic_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// Tunables for [`KeywordClassifier`](crate::KeywordClassifier)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierSettings {
    /// Titles shorter than this (in characters) get a canned suggestion
    #[serde(default = "default_min_title_length")]
    pub min_title_length: usize,

    /// Lower bound of the placeholder confidence score
    #[serde(default = "default_confidence_min")]
    pub confidence_min: f32,

    /// Upper bound of the placeholder confidence score
    #[serde(default = "default_confidence_max")]
    pub confidence_max: f32,

    #[serde(default = "default_similar_issues_min")]
    pub similar_issues_min: u32,

    #[serde(default = "default_similar_issues_max")]
    pub similar_issues_max: u32,

    /// Seed for reproducible scores; unset means thread-local randomness
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for ClassifierSettings {
    fn default() -> Self {
        Self {
            min_title_length: default_min_title_length(),
            confidence_min: default_confidence_min(),
            confidence_max: default_confidence_max(),
            similar_issues_min: default_similar_issues_min(),
            similar_issues_max: default_similar_issues_max(),
            seed: None,
        }
    }
}

impl ClassifierSettings {
    /// Load from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let settings: Self = serde_yaml::from_str(yaml)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load from file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Reject bounds that would let scores leave their documented ranges
    pub fn validate(&self) -> Result<()> {
        let in_unit = |v: f32| (0.0..=1.0).contains(&v);
        if !in_unit(self.confidence_min) || !in_unit(self.confidence_max) {
            return Err(Error::config("confidence bounds must lie within [0, 1]"));
        }
        if self.confidence_min > self.confidence_max {
            return Err(Error::config(format!(
                "confidence_min {} exceeds confidence_max {}",
                self.confidence_min, self.confidence_max
            )));
        }
        if self.similar_issues_min > self.similar_issues_max {
            return Err(Error::config(format!(
                "similar_issues_min {} exceeds similar_issues_max {}",
                self.similar_issues_min, self.similar_issues_max
            )));
        }
        Ok(())
    }
}

fn default_min_title_length() -> usize {
    10
}

fn default_confidence_min() -> f32 {
    0.7
}

fn default_confidence_max() -> f32 {
    1.0
}

fn default_similar_issues_min() -> u32 {
    1
}

fn default_similar_issues_max() -> u32 {
    15
}
