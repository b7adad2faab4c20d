//! Report records

use chrono::{DateTime, Utc};
use civic_classifiers::ClassificationResult;
use civic_core::{Error, GeoPoint, IssueCategory, PriorityLevel, ResolutionEstimate, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

pub use civic_core::ReportStatus;

/// Urgency stored when the caller has no analysis of its own
const DEFAULT_URGENCY: u8 = 5;

/// Suggestions are only filled in unasked above this confidence
pub const AUTO_FILL_CONFIDENCE: f32 = 0.8;

/// Coarser category scheme used by the city dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DashboardCategory {
    Infrastructure,
    Environment,
}

impl From<IssueCategory> for DashboardCategory {
    fn from(category: IssueCategory) -> Self {
        match category {
            IssueCategory::Waste => Self::Environment,
            IssueCategory::Roads
            | IssueCategory::Water
            | IssueCategory::Electricity
            | IssueCategory::Public
            | IssueCategory::Other => Self::Infrastructure,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reporter {
    pub name: String,
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportLocation {
    #[serde(flatten)]
    pub point: GeoPoint,
    pub address: String,
}

/// Classifier output kept with a report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisSummary {
    pub confidence: f32,
    pub tags: BTreeSet<String>,
    pub estimated_resolution_time: ResolutionEstimate,
    /// 1-10, see `ContentAnalysis::urgency`
    pub urgency: u8,
}

impl AnalysisSummary {
    pub fn from_classification(result: &ClassificationResult, urgency: Option<u8>) -> Self {
        Self {
            confidence: result.confidence,
            tags: result.tags.clone(),
            estimated_resolution_time: result.estimated_resolution_time,
            urgency: urgency.unwrap_or(DEFAULT_URGENCY),
        }
    }
}

/// Draft field a reporter can take over from a suggestion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionField {
    Category,
    Priority,
    Title,
}

/// User-entered report, before submission.
///
/// Category and priority start unset and must be chosen, by the reporter or
/// by a confident suggestion, before the draft can be submitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportDraft {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub category: Option<IssueCategory>,
    #[serde(default)]
    pub priority: Option<PriorityLevel>,
    pub location: ReportLocation,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub analysis: Option<AnalysisSummary>,
}

impl ReportDraft {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        location: ReportLocation,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            category: None,
            priority: None,
            location,
            images: Vec::new(),
            analysis: None,
        }
    }

    pub fn with_category(mut self, category: IssueCategory) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_priority(mut self, priority: PriorityLevel) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_images(mut self, images: Vec<String>) -> Self {
        self.images = images;
        self
    }

    /// Attach the analysis and fill unset category and priority when the
    /// classifier is confident enough. Fields the reporter chose are kept.
    pub fn auto_fill(&mut self, result: &ClassificationResult, urgency: Option<u8>) {
        self.analysis = Some(AnalysisSummary::from_classification(result, urgency));

        if !result.exceeds_threshold(AUTO_FILL_CONFIDENCE) {
            return;
        }
        self.category.get_or_insert(result.category);
        self.priority.get_or_insert(result.priority);
    }

    /// Take over one suggested field, whatever its confidence
    pub fn apply_suggestion(&mut self, field: SuggestionField, result: &ClassificationResult) {
        match field {
            SuggestionField::Category => self.category = Some(result.category),
            SuggestionField::Priority => self.priority = Some(result.priority),
            SuggestionField::Title => self.title = result.suggested_title.clone(),
        }
    }
}

/// A report as stored locally and sent to the dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedReport {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: IssueCategory,
    pub priority: PriorityLevel,
    pub status: ReportStatus,
    /// Street address
    pub location: String,
    pub coordinates: GeoPoint,
    pub images: Vec<String>,
    pub user: Reporter,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_analysis: Option<AnalysisSummary>,
}

impl SubmittedReport {
    /// Build a pending report. Fails when the title is blank or the
    /// category or priority is still unset.
    pub fn from_draft(
        draft: ReportDraft,
        reporter: Reporter,
        id: String,
        created_at: DateTime<Utc>,
    ) -> Result<Self> {
        if draft.title.trim().is_empty() {
            return Err(Error::submission("please enter an issue title"));
        }
        let category = draft
            .category
            .ok_or_else(|| Error::submission("please select a category"))?;
        let priority = draft
            .priority
            .ok_or_else(|| Error::submission("please select a priority level"))?;

        Ok(Self {
            id,
            title: draft.title,
            description: draft.description,
            category,
            priority,
            status: ReportStatus::Pending,
            location: draft.location.address,
            coordinates: draft.location.point,
            images: draft.images,
            user: reporter,
            created_at,
            ai_analysis: draft.analysis,
        })
    }

    pub fn dashboard_category(&self) -> DashboardCategory {
        self.category.into()
    }

    /// JSON payload in the dashboard's format: remapped category,
    /// `{lat, lng}` coordinates and a `timestamp` alongside `createdAt`
    pub fn to_dashboard_json(&self) -> Result<serde_json::Value> {
        let mut value = serde_json::to_value(self)?;
        if let Some(object) = value.as_object_mut() {
            object.insert(
                "category".to_string(),
                serde_json::to_value(self.dashboard_category())?,
            );
            object.insert(
                "coordinates".to_string(),
                serde_json::json!({
                    "lat": self.coordinates.latitude,
                    "lng": self.coordinates.longitude,
                }),
            );
            object.insert(
                "timestamp".to_string(),
                serde_json::to_value(self.created_at)?,
            );
        }
        Ok(value)
    }
}

/// `report_<unix millis>_<9 random hex chars>`
pub fn generate_report_id(now: DateTime<Utc>) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("report_{}_{}", now.timestamp_millis(), &suffix[..9])
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn location() -> ReportLocation {
        ReportLocation {
            point: GeoPoint::new(23.3441, 85.3096),
            address: "Main Road, Ranchi".to_string(),
        }
    }

    fn reporter() -> Reporter {
        Reporter {
            name: "Asha Rao".to_string(),
            email: "asha@example.com".to_string(),
            phone: "+91 9876500000".to_string(),
        }
    }

    fn classification(confidence: f32) -> ClassificationResult {
        ClassificationResult {
            category: IssueCategory::Waste,
            priority: PriorityLevel::High,
            confidence,
            suggested_title: "Waste management concern".to_string(),
            tags: ["sanitation", "environment"].into_iter().map(String::from).collect(),
            estimated_resolution_time: ResolutionEstimate::TwoToThreeDays,
            similar_issue_count: 4,
        }
    }

    #[test]
    fn test_dashboard_mapping() {
        assert_eq!(
            DashboardCategory::from(IssueCategory::Waste),
            DashboardCategory::Environment
        );
        for category in [
            IssueCategory::Roads,
            IssueCategory::Water,
            IssueCategory::Electricity,
            IssueCategory::Public,
            IssueCategory::Other,
        ] {
            assert_eq!(DashboardCategory::from(category), DashboardCategory::Infrastructure);
        }
    }

    #[test]
    fn test_auto_fill_when_confident() {
        let mut draft = ReportDraft::new("Bin", "overflowing bin", location());
        draft.auto_fill(&classification(0.9), None);

        assert_eq!(draft.category, Some(IssueCategory::Waste));
        assert_eq!(draft.priority, Some(PriorityLevel::High));
        // Titles are never taken over unasked
        assert_eq!(draft.title, "Bin");
        let analysis = draft.analysis.unwrap();
        assert_eq!(analysis.urgency, 5);
        assert!(analysis.tags.contains("sanitation"));
    }

    #[test]
    fn test_auto_fill_skipped_at_low_confidence() {
        let mut draft = ReportDraft::new("Bin", "overflowing bin", location());
        draft.auto_fill(&classification(0.7), Some(6));
        assert_eq!(draft.category, None);
        assert_eq!(draft.priority, None);
        assert_eq!(draft.analysis.unwrap().urgency, 6);

        // The threshold itself is not enough
        let mut draft = ReportDraft::new("Bin", "overflowing bin", location());
        draft.auto_fill(&classification(AUTO_FILL_CONFIDENCE), None);
        assert_eq!(draft.category, None);
    }

    #[test]
    fn test_auto_fill_keeps_reporter_choices() {
        let mut draft = ReportDraft::new("Bench", "", location())
            .with_category(IssueCategory::Other)
            .with_priority(PriorityLevel::Low);
        draft.auto_fill(&classification(0.95), None);

        assert_eq!(draft.category, Some(IssueCategory::Other));
        assert_eq!(draft.priority, Some(PriorityLevel::Low));
    }

    #[test]
    fn test_apply_single_suggestion() {
        let result = classification(0.7);
        let mut draft = ReportDraft::new("Bin", "", location()).with_priority(PriorityLevel::Low);

        draft.apply_suggestion(SuggestionField::Title, &result);
        assert_eq!(draft.title, "Waste management concern");
        assert_eq!(draft.category, None);
        assert_eq!(draft.priority, Some(PriorityLevel::Low));

        draft.apply_suggestion(SuggestionField::Category, &result);
        draft.apply_suggestion(SuggestionField::Priority, &result);
        assert_eq!(draft.category, Some(IssueCategory::Waste));
        assert_eq!(draft.priority, Some(PriorityLevel::High));
    }

    #[test]
    fn test_incomplete_draft_rejected() {
        let now = Utc::now();
        let untitled = ReportDraft::new("   ", "", location())
            .with_category(IssueCategory::Roads)
            .with_priority(PriorityLevel::Low);
        let err = SubmittedReport::from_draft(untitled, reporter(), "r".into(), now).unwrap_err();
        assert!(matches!(err, Error::Submission(_)));

        let no_category = ReportDraft::new("Pothole", "", location()).with_priority(PriorityLevel::Low);
        let err = SubmittedReport::from_draft(no_category, reporter(), "r".into(), now).unwrap_err();
        assert!(err.to_string().contains("category"));

        let no_priority = ReportDraft::new("Pothole", "", location()).with_category(IssueCategory::Roads);
        let err = SubmittedReport::from_draft(no_priority, reporter(), "r".into(), now).unwrap_err();
        assert!(err.to_string().contains("priority"));
    }

    #[test]
    fn test_submitted_report_json() {
        let mut draft = ReportDraft::new("Overflowing bin", "smells", location())
            .with_images(vec!["file:///photo1.jpg".to_string()]);
        draft.auto_fill(&classification(0.9), Some(7));

        let created = Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap();
        let report =
            SubmittedReport::from_draft(draft, reporter(), "report_1".to_string(), created).unwrap();

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["category"], "waste");
        assert_eq!(json["status"], "pending");
        assert_eq!(json["location"], "Main Road, Ranchi");
        assert_eq!(json["coordinates"]["latitude"], 23.3441);
        assert_eq!(json["aiAnalysis"]["urgency"], 7);
        assert_eq!(json["aiAnalysis"]["estimatedResolutionTime"], "2-3 days");
        assert!(json.get("createdAt").is_some());
        assert!(json.get("timestamp").is_none());
    }

    #[test]
    fn test_dashboard_payload_shape() {
        let draft = ReportDraft::new("Overflowing bin", "smells", location())
            .with_category(IssueCategory::Waste)
            .with_priority(PriorityLevel::Medium);
        let created = Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap();
        let report =
            SubmittedReport::from_draft(draft, reporter(), "report_1".to_string(), created).unwrap();

        let dashboard = report.to_dashboard_json().unwrap();
        assert_eq!(dashboard["category"], "environment");
        assert_eq!(dashboard["id"], "report_1");
        assert_eq!(dashboard["coordinates"]["lat"], 23.3441);
        assert_eq!(dashboard["coordinates"]["lng"], 85.3096);
        assert!(dashboard["coordinates"].get("latitude").is_none());
        assert_eq!(dashboard["timestamp"], dashboard["createdAt"]);
        assert!(dashboard.get("aiAnalysis").is_none());
    }

    #[test]
    fn test_report_id_format() {
        let now = Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap();
        let id = generate_report_id(now);
        let parts: Vec<_> = id.split('_').collect();

        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "report");
        assert_eq!(parts[1], now.timestamp_millis().to_string());
        assert_eq!(parts[2].len(), 9);
        assert_ne!(generate_report_id(now), id);
    }
}
