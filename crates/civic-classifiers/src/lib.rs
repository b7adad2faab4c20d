//! Civic Classifiers
//!
//! Rule-based triage for civic issue reports.
//!
//! The keyword classifier stands in for an AI model: it scans the report's
//! title and description for fixed keyword sets and proposes a category,
//! priority, tags and a resolution estimate. Its confidence and similar-issue
//! figures are placeholders drawn from an injectable [`RandomSource`].
//!
//! The content analyzer adds a second, independent read of the same text
//! (sentiment, urgency, keywords) for callers that store it with a report.

pub mod analysis;
pub mod classifier;
pub mod config;
pub mod keyword;
pub mod random;
pub mod rules;

pub use analysis::{ContentAnalysis, ContentAnalyzer, Sentiment};
pub use classifier::{ClassificationResult, Classifier};
pub use config::ClassifierSettings;
pub use keyword::KeywordClassifier;
pub use random::{FixedRandom, RandomSource, SeededRandom, ThreadRandom};
pub use rules::{CategoryRule, Escalation, RuleSet};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::analysis::{ContentAnalysis, ContentAnalyzer};
    pub use crate::classifier::{ClassificationResult, Classifier};
    pub use crate::config::ClassifierSettings;
    pub use crate::keyword::KeywordClassifier;
    pub use crate::random::{RandomSource, SeededRandom};
}
