//! Report submission service

use crate::report::{generate_report_id, ReportDraft, ReportStatus, Reporter, SubmittedReport};
use crate::sink::{ReportSink, ReportStore};
use chrono::Utc;
use civic_classifiers::{ClassificationResult, Classifier};
use civic_core::{ClassificationInput, Error, Result};
use civic_telemetry::MetricsCollector;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Submits reports to a local store and, optionally, a remote sink.
///
/// A local store failure is logged and tolerated. A remote sink failure
/// fails the submission.
pub struct ReportService {
    local: Arc<dyn ReportStore>,
    remote: Option<Arc<dyn ReportSink>>,
    metrics: MetricsCollector,
}

impl ReportService {
    pub fn new(local: Arc<dyn ReportStore>) -> Self {
        Self {
            local,
            remote: None,
            metrics: MetricsCollector::new(),
        }
    }

    pub fn with_remote(mut self, remote: Arc<dyn ReportSink>) -> Self {
        self.remote = Some(remote);
        self
    }

    pub fn with_metrics(mut self, metrics: MetricsCollector) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn metrics(&self) -> &MetricsCollector {
        &self.metrics
    }

    /// Classify a draft and record the outcome
    pub async fn suggest(
        &self,
        classifier: &dyn Classifier,
        draft: &ReportDraft,
    ) -> Result<ClassificationResult> {
        let input = ClassificationInput::new(draft.title.clone(), draft.description.clone());
        let result = classifier.classify(&input).await?;
        self.metrics.record_classification(result.category, result.priority);

        debug!(
            classifier = classifier.name(),
            category = %result.category,
            priority = %result.priority,
            "suggestion ready"
        );

        Ok(result)
    }

    /// Submit a draft. Returns the new report id.
    ///
    /// Incomplete drafts are rejected before anything is stored.
    pub async fn submit(&self, draft: ReportDraft, reporter: Reporter) -> Result<String> {
        let now = Utc::now();
        let report = SubmittedReport::from_draft(draft, reporter, generate_report_id(now), now)
            .map_err(|e| {
                debug!(error = %e, "draft rejected");
                e
            })?;

        if let Err(e) = self.local.store(&report).await {
            warn!(
                report_id = %report.id,
                store = self.local.name(),
                error = %e,
                "failed to save report locally"
            );
        }

        if let Some(remote) = &self.remote {
            if let Err(e) = remote.store(&report).await {
                error!(
                    report_id = %report.id,
                    sink = remote.name(),
                    error = %e,
                    "failed to deliver report"
                );
                self.metrics.record_submission_failure();
                return Err(Error::submission("failed to submit report"));
            }
        }

        self.metrics.record_submission(report.category);
        info!(
            report_id = %report.id,
            category = %report.category,
            priority = %report.priority,
            "report submitted"
        );

        Ok(report.id)
    }

    /// Reports held by the local store, oldest first
    pub async fn user_reports(&self) -> Result<Vec<SubmittedReport>> {
        self.local.list().await
    }

    pub async fn update_status(&self, id: &str, status: ReportStatus) -> Result<bool> {
        let updated = self.local.update_status(id, status).await?;
        if updated {
            self.metrics.record_status_update();
            info!(report_id = id, %status, "report status updated");
        } else {
            debug!(report_id = id, "status update for unknown report");
        }
        Ok(updated)
    }
}
