//! Issue list filters

use crate::ranker::RankedIssue;
use chrono::{DateTime, Utc};
use civic_core::{PriorityLevel, RankableIssue, ReportStatus};
use serde::{Deserialize, Serialize};

/// Criteria an issue must meet to stay in a view. Unset criteria match everything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IssueFilter {
    #[serde(default)]
    pub max_distance_km: Option<f64>,

    #[serde(default)]
    pub min_priority: Option<PriorityLevel>,

    /// Inclusive lower bound on the report time
    #[serde(default)]
    pub reported_after: Option<DateTime<Utc>>,

    /// Inclusive upper bound on the report time
    #[serde(default)]
    pub reported_before: Option<DateTime<Utc>>,

    /// Only issues in this state; `None` shows all of them
    #[serde(default)]
    pub status: Option<ReportStatus>,
}

impl IssueFilter {
    pub fn matches(&self, ranked: &RankedIssue<'_>) -> bool {
        let issue = ranked.issue;

        self.max_distance_km.map_or(true, |max| ranked.distance_km <= max)
            && self.min_priority.map_or(true, |min| issue.priority >= min)
            && self.reported_after.map_or(true, |after| issue.reported_at >= after)
            && self.reported_before.map_or(true, |before| issue.reported_at <= before)
            && self.status.map_or(true, |status| issue.status == status)
    }

    /// Drop non-matching issues, preserving order
    pub fn retain(&self, ranked: &mut Vec<RankedIssue<'_>>) {
        ranked.retain(|r| self.matches(r));
    }
}

/// Issue counts per status, shown next to the status filter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub all: usize,
    pub pending: usize,
    pub progress: usize,
    pub resolved: usize,
}

impl StatusCounts {
    pub fn tally(issues: &[RankableIssue]) -> Self {
        issues.iter().fold(Self::default(), |mut counts, issue| {
            counts.all += 1;
            match issue.status {
                ReportStatus::Pending => counts.pending += 1,
                ReportStatus::Progress => counts.progress += 1,
                ReportStatus::Resolved => counts.resolved += 1,
            }
            counts
        })
    }

    pub fn get(&self, status: Option<ReportStatus>) -> usize {
        match status {
            None => self.all,
            Some(ReportStatus::Pending) => self.pending,
            Some(ReportStatus::Progress) => self.progress,
            Some(ReportStatus::Resolved) => self.resolved,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ranker::{rank, SortKey};
    use chrono::TimeZone;
    use civic_core::GeoPoint;

    fn issues() -> Vec<RankableIssue> {
        let at = |day| Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0).unwrap();
        vec![
            RankableIssue::new("1", GeoPoint::new(37.78825, -122.4324), PriorityLevel::High, at(15)),
            RankableIssue::new("2", GeoPoint::new(37.78925, -122.4334), PriorityLevel::Critical, at(14)),
            RankableIssue::new("3", GeoPoint::new(37.78725, -122.4314), PriorityLevel::Medium, at(13)),
            RankableIssue::new("4", GeoPoint::new(37.78625, -122.4304), PriorityLevel::Low, at(12)),
            RankableIssue::new("5", GeoPoint::new(40.0, -100.0), PriorityLevel::Medium, at(11)),
        ]
    }

    fn ids<'a>(ranked: &[RankedIssue<'a>]) -> Vec<&'a str> {
        ranked.iter().map(|r| r.issue.id.as_str()).collect()
    }

    #[test]
    fn test_default_keeps_everything() {
        let issues = issues();
        let mut ranked = rank(GeoPoint::new(37.7749, -122.4194), &issues, SortKey::Date);
        IssueFilter::default().retain(&mut ranked);
        assert_eq!(ranked.len(), 5);
    }

    #[test]
    fn test_combined_criteria() {
        let issues = issues();
        let mut ranked = rank(GeoPoint::new(37.7749, -122.4194), &issues, SortKey::Date);

        let filter = IssueFilter {
            max_distance_km: Some(5.0),
            min_priority: Some(PriorityLevel::Medium),
            reported_after: Some(Utc.with_ymd_and_hms(2024, 1, 13, 0, 0, 0).unwrap()),
            ..Default::default()
        };
        filter.retain(&mut ranked);
        assert_eq!(ids(&ranked), vec!["1", "2", "3"]);
    }

    #[test]
    fn test_date_window_is_inclusive() {
        let issues = issues();
        let mut ranked = rank(GeoPoint::new(37.7749, -122.4194), &issues, SortKey::Date);

        let day = Utc.with_ymd_and_hms(2024, 1, 14, 0, 0, 0).unwrap();
        let filter = IssueFilter {
            reported_after: Some(day),
            reported_before: Some(day),
            ..Default::default()
        };
        filter.retain(&mut ranked);
        assert_eq!(ids(&ranked), vec!["2"]);
    }

    fn with_statuses() -> Vec<RankableIssue> {
        let statuses = [
            ReportStatus::Pending,
            ReportStatus::Progress,
            ReportStatus::Pending,
            ReportStatus::Resolved,
            ReportStatus::Pending,
        ];
        issues()
            .into_iter()
            .zip(statuses)
            .map(|(issue, status)| issue.with_status(status))
            .collect()
    }

    #[test]
    fn test_status_filter() {
        let issues = with_statuses();
        let origin = GeoPoint::new(37.7749, -122.4194);

        let filter = IssueFilter {
            status: Some(ReportStatus::Pending),
            ..Default::default()
        };
        let mut ranked = rank(origin, &issues, SortKey::Date);
        filter.retain(&mut ranked);
        assert_eq!(ids(&ranked), vec!["1", "3", "5"]);

        let filter = IssueFilter {
            status: Some(ReportStatus::Resolved),
            max_distance_km: Some(5.0),
            ..Default::default()
        };
        let mut ranked = rank(origin, &issues, SortKey::Date);
        filter.retain(&mut ranked);
        assert_eq!(ids(&ranked), vec!["4"]);
    }

    #[test]
    fn test_status_counts() {
        let counts = StatusCounts::tally(&with_statuses());
        assert_eq!(
            counts,
            StatusCounts {
                all: 5,
                pending: 3,
                progress: 1,
                resolved: 1,
            }
        );
        assert_eq!(counts.get(None), 5);
        assert_eq!(counts.get(Some(ReportStatus::Progress)), 1);
        assert_eq!(StatusCounts::tally(&[]), StatusCounts::default());
    }

    #[test]
    fn test_deserialize_partial() {
        let filter: IssueFilter =
            serde_json::from_str(r#"{"min_priority": "high", "status": "in-progress"}"#).unwrap();
        assert_eq!(filter.min_priority, Some(PriorityLevel::High));
        assert_eq!(filter.status, Some(ReportStatus::Progress));
        assert!(filter.max_distance_km.is_none());
    }
}
