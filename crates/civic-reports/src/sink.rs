//! Report sinks and stores

use crate::report::{ReportStatus, SubmittedReport};
use async_trait::async_trait;
use civic_core::Result;
use parking_lot::RwLock;

/// Destination a submitted report is written to
#[async_trait]
pub trait ReportSink: Send + Sync {
    async fn store(&self, report: &SubmittedReport) -> Result<()>;

    /// Sink name, used in logs
    fn name(&self) -> &str;
}

/// A sink that can also list and update what it holds
#[async_trait]
pub trait ReportStore: ReportSink {
    /// All stored reports, oldest first
    async fn list(&self) -> Result<Vec<SubmittedReport>>;

    /// Set the status of one report. Returns `false` when the id is unknown.
    async fn update_status(&self, id: &str, status: ReportStatus) -> Result<bool>;
}

/// In-memory report store
#[derive(Default)]
pub struct MemoryReportStore {
    reports: RwLock<Vec<SubmittedReport>>,
}

impl MemoryReportStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.reports.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.read().is_empty()
    }
}

#[async_trait]
impl ReportSink for MemoryReportStore {
    async fn store(&self, report: &SubmittedReport) -> Result<()> {
        self.reports.write().push(report.clone());
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}

#[async_trait]
impl ReportStore for MemoryReportStore {
    async fn list(&self) -> Result<Vec<SubmittedReport>> {
        Ok(self.reports.read().clone())
    }

    async fn update_status(&self, id: &str, status: ReportStatus) -> Result<bool> {
        let mut reports = self.reports.write();
        match reports.iter_mut().find(|r| r.id == id) {
            Some(report) => {
                report.status = status;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

/// Collects dashboard payloads in memory
#[derive(Default)]
pub struct MemoryDashboardSink {
    payloads: RwLock<Vec<serde_json::Value>>,
}

impl MemoryDashboardSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn payloads(&self) -> Vec<serde_json::Value> {
        self.payloads.read().clone()
    }
}

#[async_trait]
impl ReportSink for MemoryDashboardSink {
    async fn store(&self, report: &SubmittedReport) -> Result<()> {
        let payload = report.to_dashboard_json()?;
        self.payloads.write().push(payload);
        Ok(())
    }

    fn name(&self) -> &str {
        "dashboard"
    }
}
