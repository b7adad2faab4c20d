//! Civic Core
//!
//! Types and error handling shared across the civic triage crates.
//!
//! This crate provides:
//! - The closed issue vocabularies (categories, priority levels, resolution estimates, statuses)
//! - Geographic points and the caller-owned issue records the ranker reads
//! - The workspace error type and result alias

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::{
    ClassificationInput, GeoPoint, IssueCategory, PriorityLevel, RankableIssue, ReportStatus,
    ResolutionEstimate,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::types::{
        ClassificationInput, GeoPoint, IssueCategory, PriorityLevel, RankableIssue,
        ReportStatus, ResolutionEstimate,
    };
}
