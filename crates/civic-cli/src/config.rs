//! CLI configuration

use civic_classifiers::ClassifierSettings;
use civic_core::Result;
use civic_ranking::RankerSettings;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level configuration file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CivicConfig {
    #[serde(default)]
    pub classifier: ClassifierSettings,

    #[serde(default)]
    pub ranking: RankerSettings,
}

impl CivicConfig {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Load `path` if it exists, otherwise fall back to defaults
    pub fn load(path: &str, seed: Option<u64>) -> anyhow::Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            Self::default()
        };

        if seed.is_some() {
            config.classifier.seed = seed;
        }

        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.classifier.validate()?;
        self.ranking.validate()
    }
}
