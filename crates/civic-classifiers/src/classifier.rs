//! Classifier trait and common types

use async_trait::async_trait;
use civic_core::{ClassificationInput, IssueCategory, PriorityLevel, ResolutionEstimate, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Trait for issue classifiers
#[async_trait]
pub trait Classifier: Send + Sync {
    /// Classify the given report text
    async fn classify(&self, input: &ClassificationInput) -> Result<ClassificationResult>;

    /// Get the classifier name
    fn name(&self) -> &str;
}

/// Triage suggestion for a single report.
///
/// Recomputed on every call; callers decide whether to accept it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationResult {
    pub category: IssueCategory,

    pub priority: PriorityLevel,

    /// Confidence score (0.0-1.0)
    pub confidence: f32,

    /// Title to offer when the user's own is too short
    pub suggested_title: String,

    pub tags: BTreeSet<String>,

    pub estimated_resolution_time: ResolutionEstimate,

    /// Number of similar issues already reported nearby
    pub similar_issue_count: u32,
}

impl ClassificationResult {
    /// Check if confidence is strictly above the threshold
    pub fn exceeds_threshold(&self, threshold: f32) -> bool {
        self.confidence > threshold
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }
}
