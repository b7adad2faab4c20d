//! End-to-end submission tests with injected sinks

use async_trait::async_trait;
use civic_classifiers::{FixedRandom, KeywordClassifier};
use civic_core::{Error, GeoPoint, IssueCategory, PriorityLevel, Result};
use civic_reports::{
    MemoryDashboardSink, MemoryReportStore, ReportDraft, ReportLocation, ReportService,
    ReportSink, ReportStatus, ReportStore, Reporter, SubmittedReport, SuggestionField,
};
use civic_telemetry::MetricsCollector;
use std::sync::Arc;

struct FailingSink;

#[async_trait]
impl ReportSink for FailingSink {
    async fn store(&self, _report: &SubmittedReport) -> Result<()> {
        Err(Error::storage("connection refused"))
    }

    fn name(&self) -> &str {
        "failing"
    }
}

/// Store whose writes fail but which still answers reads
struct ReadOnlyStore;

#[async_trait]
impl ReportSink for ReadOnlyStore {
    async fn store(&self, _report: &SubmittedReport) -> Result<()> {
        Err(Error::storage("quota exceeded"))
    }

    fn name(&self) -> &str {
        "read-only"
    }
}

#[async_trait]
impl ReportStore for ReadOnlyStore {
    async fn list(&self) -> Result<Vec<SubmittedReport>> {
        Ok(Vec::new())
    }

    async fn update_status(&self, _id: &str, _status: ReportStatus) -> Result<bool> {
        Ok(false)
    }
}

fn reporter() -> Reporter {
    Reporter {
        name: "Priya".to_string(),
        email: "priya@example.com".to_string(),
        phone: "555-0100".to_string(),
    }
}

fn draft(title: &str, description: &str) -> ReportDraft {
    ReportDraft::new(
        title,
        description,
        ReportLocation {
            point: GeoPoint::new(37.7749, -122.4194),
            address: "Mission St, San Francisco".to_string(),
        },
    )
}

fn complete_draft(title: &str) -> ReportDraft {
    draft(title, "")
        .with_category(IssueCategory::Roads)
        .with_priority(PriorityLevel::Medium)
}

#[tokio::test]
async fn test_classify_auto_fill_and_submit() {
    let local = Arc::new(MemoryReportStore::new());
    let dashboard = Arc::new(MemoryDashboardSink::new());
    let service = ReportService::new(local.clone()).with_remote(dashboard.clone());

    let classifier = KeywordClassifier::new()
        .unwrap()
        .with_random(Arc::new(FixedRandom::new(0.5)));

    let mut report = draft("Bins", "garbage overflowing at the corner");
    let suggestion = service.suggest(&classifier, &report).await.unwrap();
    assert_eq!(suggestion.category, IssueCategory::Waste);
    assert!(suggestion.confidence > 0.8);
    report.auto_fill(&suggestion, None);
    report.apply_suggestion(SuggestionField::Title, &suggestion);

    let id = service.submit(report, reporter()).await.unwrap();
    assert!(id.starts_with("report_"));

    let stored = service.user_reports().await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].id, id);
    assert_eq!(stored[0].status, ReportStatus::Pending);
    assert_eq!(stored[0].title, "Waste management concern");
    assert_eq!(stored[0].category, IssueCategory::Waste);
    assert_eq!(stored[0].priority, suggestion.priority);

    let payloads = dashboard.payloads();
    assert_eq!(payloads.len(), 1);
    assert_eq!(payloads[0]["category"], "environment");

    let snapshot = service.metrics().snapshot();
    assert_eq!(snapshot.classifications, 1);
    assert_eq!(snapshot.submissions, 1);
    assert_eq!(snapshot.count_for(IssueCategory::Waste), 1);
}

#[tokio::test]
async fn test_remote_failure_fails_submission() {
    let local = Arc::new(MemoryReportStore::new());
    let service = ReportService::new(local.clone()).with_remote(Arc::new(FailingSink));

    let err = service
        .submit(complete_draft("Streetlight out on 5th"), reporter())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Submission(_)));
    assert_eq!(err.to_string(), "submission error: failed to submit report");

    // The local copy was written before the remote attempt
    assert_eq!(local.len(), 1);

    let snapshot = service.metrics().snapshot();
    assert_eq!(snapshot.submissions, 0);
    assert_eq!(snapshot.submission_failures, 1);
}

#[tokio::test]
async fn test_local_failure_is_tolerated() {
    let dashboard = Arc::new(MemoryDashboardSink::new());
    let service = ReportService::new(Arc::new(ReadOnlyStore)).with_remote(dashboard.clone());

    let id = service
        .submit(complete_draft("Pipe leaking under bridge"), reporter())
        .await
        .unwrap();

    assert!(id.starts_with("report_"));
    assert_eq!(dashboard.payloads().len(), 1);
    assert!(service.user_reports().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_update_status() {
    let local = Arc::new(MemoryReportStore::new());
    let service = ReportService::new(local.clone());

    let report = complete_draft("Broken bench in the park").with_priority(PriorityLevel::Low);
    let id = service.submit(report, reporter()).await.unwrap();

    assert!(service.update_status(&id, ReportStatus::Progress).await.unwrap());
    assert!(!service.update_status("report_0_000000000", ReportStatus::Resolved).await.unwrap());

    let stored = service.user_reports().await.unwrap();
    assert_eq!(stored[0].status, ReportStatus::Progress);
    assert_eq!(service.metrics().snapshot().status_updates, 1);
}

#[tokio::test]
async fn test_low_confidence_draft_needs_choices() {
    let local = Arc::new(MemoryReportStore::new());
    let dashboard = Arc::new(MemoryDashboardSink::new());
    let service = ReportService::new(local.clone()).with_remote(dashboard.clone());

    // 0.7 + 0.1 * 0.3 stays below the auto-fill threshold
    let classifier = KeywordClassifier::new()
        .unwrap()
        .with_random(Arc::new(FixedRandom::new(0.1)));

    let mut report = draft("Pothole", "deep pothole on the road");
    let suggestion = service.suggest(&classifier, &report).await.unwrap();
    report.auto_fill(&suggestion, None);
    assert_eq!(report.category, None);

    let err = service.submit(report.clone(), reporter()).await.unwrap_err();
    assert!(matches!(err, Error::Submission(_)));
    assert!(local.is_empty());
    assert!(dashboard.payloads().is_empty());

    report.apply_suggestion(SuggestionField::Category, &suggestion);
    let report = report.with_priority(PriorityLevel::High);
    service.submit(report, reporter()).await.unwrap();

    let stored = service.user_reports().await.unwrap();
    assert_eq!(stored[0].category, IssueCategory::Roads);
    assert_eq!(stored[0].priority, PriorityLevel::High);
    assert!(stored[0].ai_analysis.is_some());
}

#[tokio::test]
async fn test_shared_metrics_collector() {
    let metrics = MetricsCollector::new();
    let service =
        ReportService::new(Arc::new(MemoryReportStore::new())).with_metrics(metrics.clone());

    service.submit(complete_draft("Cracked pavement"), reporter()).await.unwrap();

    assert_eq!(metrics.snapshot().submissions, 1);
    assert_eq!(metrics.snapshot().count_for(IssueCategory::Roads), 1);
}
