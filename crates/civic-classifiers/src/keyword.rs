//! Keyword-matching issue classifier
//!
//! Simulates an AI triage step with the rule tables in [`crate::rules`].

use crate::classifier::{ClassificationResult, Classifier};
use crate::config::ClassifierSettings;
use crate::random::{RandomSource, SeededRandom, ThreadRandom};
use crate::rules::{canned_title, RuleSet};
use civic_core::{ClassificationInput, Result};
use std::sync::Arc;
use tracing::debug;

/// Rule-based classifier for civic issue reports.
///
/// Classification never fails: text that matches no rule falls back to the
/// `other` category with `medium` priority. Confidence and similar-issue
/// count are drawn from the injected [`RandomSource`] and are therefore
/// non-deterministic unless a seeded or fixed source is supplied.
pub struct KeywordClassifier {
    name: String,
    rules: RuleSet,
    settings: ClassifierSettings,
    random: Arc<dyn RandomSource>,
}

impl KeywordClassifier {
    /// Create a classifier with default settings and thread-local randomness
    pub fn new() -> Result<Self> {
        Self::with_settings(ClassifierSettings::default())
    }

    /// Create a classifier from settings; a configured seed selects [`SeededRandom`]
    pub fn with_settings(settings: ClassifierSettings) -> Result<Self> {
        settings.validate()?;

        let random: Arc<dyn RandomSource> = match settings.seed {
            Some(seed) => Arc::new(SeededRandom::new(seed)),
            None => Arc::new(ThreadRandom),
        };

        Ok(Self {
            name: "keyword".to_string(),
            rules: RuleSet::standard()?,
            settings,
            random,
        })
    }

    /// Replace the random source
    pub fn with_random(mut self, random: Arc<dyn RandomSource>) -> Self {
        self.random = random;
        self
    }

    pub fn settings(&self) -> &ClassifierSettings {
        &self.settings
    }

    /// Classify a report from its title and description
    pub fn classify_issue(&self, title: &str, description: &str) -> ClassificationResult {
        let text = format!("{title} {description}").to_lowercase();
        let outcome = self.rules.evaluate(&text);

        let suggested_title = if title.chars().count() < self.settings.min_title_length {
            canned_title(outcome.category).to_string()
        } else {
            title.to_string()
        };

        let confidence = (self.random.uniform(
            f64::from(self.settings.confidence_min),
            f64::from(self.settings.confidence_max),
        ) as f32)
            .clamp(self.settings.confidence_min, self.settings.confidence_max);

        let similar_issue_count = self.random.uniform_int(
            self.settings.similar_issues_min,
            self.settings.similar_issues_max,
        );

        debug!(
            category = %outcome.category,
            priority = %outcome.priority,
            estimate = %outcome.estimate,
            "classified issue"
        );
        metrics::counter!(
            "civic_classifications_total",
            "category" => outcome.category.as_str(),
            "priority" => outcome.priority.as_str()
        )
        .increment(1);

        ClassificationResult {
            category: outcome.category,
            priority: outcome.priority,
            confidence,
            suggested_title,
            tags: outcome.tags,
            estimated_resolution_time: outcome.estimate,
            similar_issue_count,
        }
    }
}

#[async_trait::async_trait]
impl Classifier for KeywordClassifier {
    async fn classify(&self, input: &ClassificationInput) -> Result<ClassificationResult> {
        Ok(self.classify_issue(&input.title, &input.description))
    }

    fn name(&self) -> &str {
        &self.name
    }
}
