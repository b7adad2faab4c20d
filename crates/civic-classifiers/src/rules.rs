//! Keyword rule tables and their evaluation.
//!
//! Category rules form a decision list: they are tried in table order and
//! the first rule with a keyword hit decides the category. Reordering the
//! table changes the outcome for text that mentions several categories.

use aho_corasick::AhoCorasick;
use civic_core::{Error, IssueCategory, PriorityLevel, ResolutionEstimate, Result};
use std::collections::BTreeSet;

/// Category-specific priority bump
#[derive(Debug)]
pub struct Escalation {
    pub keywords: &'static [&'static str],
    pub priority: PriorityLevel,
    pub estimate: ResolutionEstimate,
}

/// One entry of the category decision list
#[derive(Debug)]
pub struct CategoryRule {
    pub category: IssueCategory,
    pub keywords: &'static [&'static str],
    pub tags: &'static [&'static str],
    pub escalation: Option<Escalation>,
}

pub static CATEGORY_RULES: &[CategoryRule] = &[
    CategoryRule {
        category: IssueCategory::Roads,
        keywords: &["pothole", "road", "street", "traffic", "pavement", "asphalt"],
        tags: &["infrastructure", "transportation"],
        escalation: Some(Escalation {
            keywords: &["dangerous", "accident"],
            priority: PriorityLevel::High,
            estimate: ResolutionEstimate::OneToTwoDays,
        }),
    },
    CategoryRule {
        category: IssueCategory::Water,
        keywords: &["water", "leak", "pipe", "flood", "drainage", "sewer"],
        tags: &["utilities", "infrastructure"],
        escalation: Some(Escalation {
            keywords: &["flood", "burst", "emergency"],
            priority: PriorityLevel::Critical,
            estimate: ResolutionEstimate::FourToEightHours,
        }),
    },
    CategoryRule {
        category: IssueCategory::Electricity,
        keywords: &["light", "electric", "power", "lamp", "wire", "outage"],
        tags: &["utilities", "safety"],
        escalation: Some(Escalation {
            keywords: &["dark", "safety", "night"],
            priority: PriorityLevel::High,
            estimate: ResolutionEstimate::OneToTwoDays,
        }),
    },
    CategoryRule {
        category: IssueCategory::Waste,
        keywords: &["garbage", "trash", "waste", "bin", "dump", "litter"],
        tags: &["sanitation", "environment"],
        escalation: Some(Escalation {
            keywords: &["overflow", "smell", "pest"],
            priority: PriorityLevel::Medium,
            estimate: ResolutionEstimate::TwoToThreeDays,
        }),
    },
    CategoryRule {
        category: IssueCategory::Public,
        keywords: &["park", "bench", "playground", "building", "facility", "public"],
        tags: &["facilities", "community"],
        escalation: None,
    },
];

/// Any of these forces critical priority
pub static CRITICAL_KEYWORDS: &[&str] = &["emergency", "urgent", "dangerous", "critical", "immediate"];

/// Any of these raises priority one level, but never past high
pub static RAISE_KEYWORDS: &[&str] = &["important", "serious", "safety"];

/// Title offered when the reporter's own title is too short
pub fn canned_title(category: IssueCategory) -> &'static str {
    match category {
        IssueCategory::Roads => "Road maintenance issue",
        IssueCategory::Water => "Water supply problem",
        IssueCategory::Electricity => "Electrical infrastructure issue",
        IssueCategory::Waste => "Waste management concern",
        IssueCategory::Public => "Public facility issue",
        IssueCategory::Other => "Civic infrastructure issue",
    }
}

/// Substring matcher over a fixed keyword list
#[derive(Debug)]
struct KeywordMatcher {
    automaton: AhoCorasick,
}

impl KeywordMatcher {
    fn build(keywords: &[&str]) -> Result<Self> {
        let automaton = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .build(keywords)
            .map_err(|e| Error::classifier(format!("Failed to build keyword matcher: {e}")))?;
        Ok(Self { automaton })
    }

    fn matches(&self, text: &str) -> bool {
        self.automaton.is_match(text)
    }
}

#[derive(Debug)]
struct CompiledRule {
    rule: &'static CategoryRule,
    matcher: KeywordMatcher,
    escalation: Option<KeywordMatcher>,
}

/// Category, priority and tags decided by the rule tables
#[derive(Debug, Clone, PartialEq)]
pub struct RuleOutcome {
    pub category: IssueCategory,
    pub priority: PriorityLevel,
    pub estimate: ResolutionEstimate,
    pub tags: BTreeSet<String>,
}

/// Compiled form of the rule tables
#[derive(Debug)]
pub struct RuleSet {
    rules: Vec<CompiledRule>,
    critical: KeywordMatcher,
    raise: KeywordMatcher,
}

impl RuleSet {
    /// Compile the built-in tables
    pub fn standard() -> Result<Self> {
        let rules = CATEGORY_RULES
            .iter()
            .map(|rule| {
                Ok(CompiledRule {
                    rule,
                    matcher: KeywordMatcher::build(rule.keywords)?,
                    escalation: rule
                        .escalation
                        .as_ref()
                        .map(|esc| KeywordMatcher::build(esc.keywords))
                        .transpose()?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            rules,
            critical: KeywordMatcher::build(CRITICAL_KEYWORDS)?,
            raise: KeywordMatcher::build(RAISE_KEYWORDS)?,
        })
    }

    /// Category order the rules are tried in
    pub fn evaluation_order(&self) -> Vec<IssueCategory> {
        self.rules.iter().map(|c| c.rule.category).collect()
    }

    /// Run the decision list and both escalation passes over lower-cased text
    pub fn evaluate(&self, text: &str) -> RuleOutcome {
        let mut outcome = RuleOutcome {
            category: IssueCategory::Other,
            priority: PriorityLevel::Medium,
            estimate: ResolutionEstimate::ThreeToFiveDays,
            tags: BTreeSet::new(),
        };

        if let Some(compiled) = self.rules.iter().find(|c| c.matcher.matches(text)) {
            let rule = compiled.rule;
            outcome.category = rule.category;
            outcome.tags.extend(rule.tags.iter().map(|t| t.to_string()));

            if let (Some(esc), Some(matcher)) = (&rule.escalation, &compiled.escalation) {
                if matcher.matches(text) {
                    outcome.priority = esc.priority;
                    outcome.estimate = esc.estimate;
                }
            }
        }

        // Global pass runs last and has the final say.
        if self.critical.matches(text) {
            outcome.priority = PriorityLevel::Critical;
            outcome.estimate = ResolutionEstimate::TwoToSixHours;
        } else if self.raise.matches(text) && outcome.priority < PriorityLevel::High {
            outcome.priority = outcome.priority.raise_one();
        }

        outcome
    }
}
