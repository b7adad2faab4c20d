//! Core types for civic triage

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::Error;

/// Category an issue report is filed under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueCategory {
    Roads,
    Water,
    Electricity,
    Waste,
    Public,
    Other,
}

impl IssueCategory {
    /// Every category, in rule evaluation order
    pub const ALL: [IssueCategory; 6] = [
        Self::Roads,
        Self::Water,
        Self::Electricity,
        Self::Waste,
        Self::Public,
        Self::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Roads => "roads",
            Self::Water => "water",
            Self::Electricity => "electricity",
            Self::Waste => "waste",
            Self::Public => "public",
            Self::Other => "other",
        }
    }

    /// Position in [`IssueCategory::ALL`]
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for IssueCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IssueCategory {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| Error::invalid_value("category", s))
    }
}

/// Priority of an issue, ordered `Low < Medium < High < Critical`
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum PriorityLevel {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl PriorityLevel {
    pub const ALL: [PriorityLevel; 4] = [Self::Low, Self::Medium, Self::High, Self::Critical];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }

    /// Numeric rank, 1 for low through 4 for critical
    pub fn rank(&self) -> u8 {
        *self as u8 + 1
    }

    /// The next level up, saturating at critical
    pub fn raise_one(self) -> Self {
        match self {
            Self::Low => Self::Medium,
            Self::Medium => Self::High,
            Self::High | Self::Critical => Self::Critical,
        }
    }
}

impl fmt::Display for PriorityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PriorityLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| Error::invalid_value("priority", s))
    }
}

/// Estimated time until an issue is resolved, shown to the reporter as a label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ResolutionEstimate {
    #[serde(rename = "2-6 hours")]
    TwoToSixHours,
    #[serde(rename = "4-8 hours")]
    FourToEightHours,
    #[serde(rename = "1-2 days")]
    OneToTwoDays,
    #[serde(rename = "2-3 days")]
    TwoToThreeDays,
    #[default]
    #[serde(rename = "3-5 days")]
    ThreeToFiveDays,
}

impl ResolutionEstimate {
    pub fn label(&self) -> &'static str {
        match self {
            Self::TwoToSixHours => "2-6 hours",
            Self::FourToEightHours => "4-8 hours",
            Self::OneToTwoDays => "1-2 days",
            Self::TwoToThreeDays => "2-3 days",
            Self::ThreeToFiveDays => "3-5 days",
        }
    }
}

impl fmt::Display for ResolutionEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Lifecycle of a submitted report, driven by the city
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    #[default]
    Pending,
    /// Map views label this "in-progress"
    #[serde(alias = "in-progress")]
    Progress,
    Resolved,
}

impl ReportStatus {
    pub const ALL: [ReportStatus; 3] = [Self::Pending, Self::Progress, Self::Resolved];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Progress => "progress",
            Self::Resolved => "resolved",
        }
    }
}

impl fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "progress" | "in-progress" => Ok(Self::Progress),
            "resolved" => Ok(Self::Resolved),
            other => Err(Error::invalid_value("report status", other)),
        }
    }
}

/// Free text submitted for classification
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationInput {
    pub title: String,
    pub description: String,
}

impl ClassificationInput {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }
}

/// A point on the Earth's surface in decimal degrees.
///
/// Latitude is expected in `[-90, 90]` and longitude in `[-180, 180]`;
/// validating that is the caller's job.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Whether both coordinates are within their valid ranges
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// Issue as seen by the ranker. Owned by the caller and never mutated by ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankableIssue {
    pub id: String,
    pub location: GeoPoint,
    pub priority: PriorityLevel,
    pub reported_at: DateTime<Utc>,
    #[serde(default)]
    pub status: ReportStatus,
}

impl RankableIssue {
    pub fn new(
        id: impl Into<String>,
        location: GeoPoint,
        priority: PriorityLevel,
        reported_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            location,
            priority,
            reported_at,
            status: ReportStatus::Pending,
        }
    }

    pub fn with_status(mut self, status: ReportStatus) -> Self {
        self.status = status;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_total_order() {
        assert!(PriorityLevel::Low < PriorityLevel::Medium);
        assert!(PriorityLevel::Medium < PriorityLevel::High);
        assert!(PriorityLevel::High < PriorityLevel::Critical);
        assert_eq!(PriorityLevel::Critical.rank(), 4);
        assert_eq!(PriorityLevel::Low.rank(), 1);
    }

    #[test]
    fn test_priority_raise_saturates() {
        assert_eq!(PriorityLevel::Low.raise_one(), PriorityLevel::Medium);
        assert_eq!(PriorityLevel::High.raise_one(), PriorityLevel::Critical);
        assert_eq!(PriorityLevel::Critical.raise_one(), PriorityLevel::Critical);
    }

    #[test]
    fn test_category_parse() {
        assert_eq!("roads".parse::<IssueCategory>().unwrap(), IssueCategory::Roads);
        assert_eq!("public".parse::<IssueCategory>().unwrap(), IssueCategory::Public);
        assert!("sanitation".parse::<IssueCategory>().is_err());
        assert!("Roads".parse::<IssueCategory>().is_err());
    }

    #[test]
    fn test_category_index_matches_all() {
        for (i, category) in IssueCategory::ALL.iter().enumerate() {
            assert_eq!(category.index(), i);
        }
    }

    #[test]
    fn test_serde_labels() {
        assert_eq!(
            serde_json::to_string(&PriorityLevel::Critical).unwrap(),
            "\"critical\""
        );
        assert_eq!(
            serde_json::to_string(&ResolutionEstimate::FourToEightHours).unwrap(),
            "\"4-8 hours\""
        );
        let estimate: ResolutionEstimate = serde_json::from_str("\"1-2 days\"").unwrap();
        assert_eq!(estimate, ResolutionEstimate::OneToTwoDays);
        assert_eq!(estimate.to_string(), "1-2 days");
    }

    #[test]
    fn test_status_parse() {
        assert_eq!("progress".parse::<ReportStatus>().unwrap(), ReportStatus::Progress);
        assert_eq!("in-progress".parse::<ReportStatus>().unwrap(), ReportStatus::Progress);
        assert!("done".parse::<ReportStatus>().is_err());
        assert_eq!(ReportStatus::default(), ReportStatus::Pending);

        let status: ReportStatus = serde_json::from_str("\"in-progress\"").unwrap();
        assert_eq!(status, ReportStatus::Progress);
        assert_eq!(serde_json::to_string(&status).unwrap(), "\"progress\"");
    }

    #[test]
    fn test_geo_point_validity() {
        assert!(GeoPoint::new(37.7749, -122.4194).is_valid());
        assert!(!GeoPoint::new(91.0, 0.0).is_valid());
        assert!(!GeoPoint::new(0.0, -180.5).is_valid());
    }
}
