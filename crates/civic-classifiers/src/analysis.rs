//! Lexicon-based content analysis for report text
//!
//! Complements the keyword classifier with sentiment, an urgency score and
//! a short keyword list.

use crate::random::{RandomSource, ThreadRandom};
use aho_corasick::AhoCorasick;
use civic_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

const NEGATIVE_WORDS: &[&str] = &["terrible", "awful", "worst", "angry", "frustrated"];
const POSITIVE_WORDS: &[&str] = &["please", "thank", "appreciate"];

/// Urgency tiers, checked top to bottom
const URGENCY_TIERS: &[(&[&str], u8)] = &[
    (&["emergency", "dangerous"], 10),
    (&["urgent", "immediate"], 8),
    (&["important", "serious"], 7),
    (&["minor", "small"], 3),
];
const DEFAULT_URGENCY: u8 = 5;

const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
    "is", "are", "was", "were", "be", "been", "have", "has", "had", "do", "does", "did", "will",
    "would", "could", "should", "may", "might", "can", "this", "that", "these", "those",
];
const MAX_KEYWORDS: usize = 5;

/// Descriptions this long or longer count as full quality
const QUALITY_FULL_LENGTH: f32 = 50.0;

const TIPS: &[&str] = &[
    "Check for similar issues in this area",
    "Consider reporting to multiple departments",
    "Add photos for faster resolution",
    "Include specific landmark references",
    "Mention safety concerns if applicable",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

/// Result of analyzing a report's text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentAnalysis {
    pub sentiment: Sentiment,

    /// 1 (can wait) to 10 (emergency)
    pub urgency: u8,

    pub keywords: Vec<String>,

    /// Placeholder score in [0.6, 1.0]
    pub location_confidence: f32,

    /// Description length relative to a 50 character baseline, capped at 1.0
    pub description_quality: f32,
}

pub struct ContentAnalyzer {
    negative: AhoCorasick,
    positive: AhoCorasick,
    urgency: Vec<(AhoCorasick, u8)>,
    random: Arc<dyn RandomSource>,
}

impl ContentAnalyzer {
    pub fn new() -> Result<Self> {
        let build = |words: &[&str]| {
            AhoCorasick::builder()
                .ascii_case_insensitive(true)
                .build(words)
                .map_err(|e| Error::classifier(format!("Failed to build analysis matcher: {e}")))
        };

        let urgency = URGENCY_TIERS
            .iter()
            .map(|(words, score)| Ok((build(words)?, *score)))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            negative: build(NEGATIVE_WORDS)?,
            positive: build(POSITIVE_WORDS)?,
            urgency,
            random: Arc::new(ThreadRandom),
        })
    }

    /// Replace the random source used for location confidence
    pub fn with_random(mut self, random: Arc<dyn RandomSource>) -> Self {
        self.random = random;
        self
    }

    pub fn analyze(&self, title: &str, description: &str) -> ContentAnalysis {
        let text = format!("{title} {description}").to_lowercase();

        let sentiment = if self.negative.is_match(&text) {
            Sentiment::Negative
        } else if self.positive.is_match(&text) {
            Sentiment::Positive
        } else {
            Sentiment::Neutral
        };

        let urgency = self
            .urgency
            .iter()
            .find(|(matcher, _)| matcher.is_match(&text))
            .map(|(_, score)| *score)
            .unwrap_or(DEFAULT_URGENCY);

        let description_quality =
            (description.chars().count() as f32 / QUALITY_FULL_LENGTH).min(1.0);

        ContentAnalysis {
            sentiment,
            urgency,
            keywords: extract_keywords(&text),
            location_confidence: self.random.uniform(0.6, 1.0) as f32,
            description_quality,
        }
    }

    /// Generic reporting tips shown next to the submission form
    pub fn smart_suggestions(&self) -> Vec<String> {
        TIPS.iter().map(|t| t.to_string()).collect()
    }
}

/// First few non-stop-words longer than three characters, in text order
pub fn extract_keywords(text: &str) -> Vec<String> {
    text.split_whitespace()
        .filter(|word| word.chars().count() > 3 && !STOP_WORDS.contains(word))
        .take(MAX_KEYWORDS)
        .map(str::to_string)
        .collect()
}
