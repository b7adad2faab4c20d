//! Sorted views over caller-owned issues

use crate::filter::IssueFilter;
use crate::geo::haversine_km;
use civic_core::{Error, GeoPoint, RankableIssue, Result};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Display order for an issue list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Nearest first
    #[default]
    Distance,
    /// Critical first
    Priority,
    /// Most recently reported first
    Date,
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Distance => "distance",
            Self::Priority => "priority",
            Self::Date => "date",
        })
    }
}

impl FromStr for SortKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "distance" => Ok(Self::Distance),
            "priority" => Ok(Self::Priority),
            "date" => Ok(Self::Date),
            other => Err(Error::invalid_value("sort key", other)),
        }
    }
}

/// An issue paired with its distance from the reference point
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RankedIssue<'a> {
    pub issue: &'a RankableIssue,
    pub distance_km: f64,
}

fn compare(a: &RankedIssue<'_>, b: &RankedIssue<'_>, key: SortKey) -> Ordering {
    match key {
        SortKey::Distance => a.distance_km.total_cmp(&b.distance_km),
        SortKey::Priority => b.issue.priority.cmp(&a.issue.priority),
        SortKey::Date => b.issue.reported_at.cmp(&a.issue.reported_at),
    }
}

/// Pair every issue with its distance from `reference` and sort by `key`.
///
/// The sort is stable: issues with equal keys keep their input order.
pub fn rank(reference: GeoPoint, issues: &[RankableIssue], key: SortKey) -> Vec<RankedIssue<'_>> {
    let mut ranked: Vec<_> = issues
        .iter()
        .map(|issue| RankedIssue {
            issue,
            distance_km: haversine_km(reference, issue.location),
        })
        .collect();
    ranked.sort_by(|a, b| compare(a, b, key));
    ranked
}

/// In-place stable sort of an owned issue list
pub fn sort_issues(reference: GeoPoint, issues: &mut [RankableIssue], key: SortKey) {
    match key {
        SortKey::Distance => issues.sort_by(|a, b| {
            haversine_km(reference, a.location).total_cmp(&haversine_km(reference, b.location))
        }),
        SortKey::Priority => issues.sort_by(|a, b| b.priority.cmp(&a.priority)),
        SortKey::Date => issues.sort_by(|a, b| b.reported_at.cmp(&a.reported_at)),
    }
}

/// Ranker settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankerSettings {
    #[serde(default)]
    pub default_sort: SortKey,

    /// Radius of the "nearby issues" view in kilometers
    #[serde(default = "default_nearby_radius_km")]
    pub nearby_radius_km: f64,
}

impl Default for RankerSettings {
    fn default() -> Self {
        Self {
            default_sort: SortKey::default(),
            nearby_radius_km: default_nearby_radius_km(),
        }
    }
}

impl RankerSettings {
    pub fn validate(&self) -> Result<()> {
        if !self.nearby_radius_km.is_finite() || self.nearby_radius_km <= 0.0 {
            return Err(Error::config(format!(
                "nearby_radius_km must be a positive number, got {}",
                self.nearby_radius_km
            )));
        }
        Ok(())
    }
}

fn default_nearby_radius_km() -> f64 {
    5.0
}

/// Configured entry point for map and list views
#[derive(Debug, Clone, Default)]
pub struct Ranker {
    settings: RankerSettings,
}

impl Ranker {
    pub fn new(settings: RankerSettings) -> Result<Self> {
        settings.validate()?;
        Ok(Self { settings })
    }

    pub fn settings(&self) -> &RankerSettings {
        &self.settings
    }

    /// Rank with the configured default sort key
    pub fn rank<'a>(&self, reference: GeoPoint, issues: &'a [RankableIssue]) -> Vec<RankedIssue<'a>> {
        rank(reference, issues, self.settings.default_sort)
    }

    /// Rank, keeping only issues that pass `filter`
    pub fn rank_filtered<'a>(
        &self,
        reference: GeoPoint,
        issues: &'a [RankableIssue],
        key: SortKey,
        filter: &IssueFilter,
    ) -> Vec<RankedIssue<'a>> {
        let mut ranked = rank(reference, issues, key);
        let before = ranked.len();
        filter.retain(&mut ranked);
        debug!(
            sort = %key,
            kept = ranked.len(),
            dropped = before - ranked.len(),
            "ranked issues"
        );
        ranked
    }

    /// Issues within the nearby radius, nearest first
    pub fn nearby<'a>(&self, reference: GeoPoint, issues: &'a [RankableIssue]) -> Vec<RankedIssue<'a>> {
        let filter = IssueFilter {
            max_distance_km: Some(self.settings.nearby_radius_km),
            ..Default::default()
        };
        self.rank_filtered(reference, issues, SortKey::Distance, &filter)
    }
}
