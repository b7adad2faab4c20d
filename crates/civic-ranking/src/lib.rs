//! Civic Ranking
//!
//! Orders reported issues for map and list views: by great-circle distance
//! from the user, by priority, or by report date. Ranking only reads the
//! caller's issues and never mutates them.

pub mod filter;
pub mod geo;
pub mod ranker;

pub use filter::{IssueFilter, StatusCounts};
pub use geo::{haversine_km, EARTH_RADIUS_KM};
pub use ranker::{rank, sort_issues, RankedIssue, Ranker, RankerSettings, SortKey};
