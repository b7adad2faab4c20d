//! Metrics collection and reporting

use civic_core::{IssueCategory, PriorityLevel};
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Metrics collector for triage and submission
#[derive(Clone)]
pub struct MetricsCollector {
    inner: Arc<MetricsInner>,
}

struct MetricsInner {
    classifications: AtomicU64,
    by_category: [AtomicU64; IssueCategory::ALL.len()],
    critical: AtomicU64,
    submissions: AtomicU64,
    submission_failures: AtomicU64,
    status_updates: AtomicU64,
}

impl MetricsCollector {
    /// Create a new metrics collector
    pub fn new() -> Self {
        Self {
            inner: Arc::new(MetricsInner {
                classifications: AtomicU64::new(0),
                by_category: Default::default(),
                critical: AtomicU64::new(0),
                submissions: AtomicU64::new(0),
                submission_failures: AtomicU64::new(0),
                status_updates: AtomicU64::new(0),
            }),
        }
    }

    /// Record a classification result
    pub fn record_classification(&self, category: IssueCategory, priority: PriorityLevel) {
        self.inner.classifications.fetch_add(1, Ordering::Relaxed);
        self.inner.by_category[category.index()].fetch_add(1, Ordering::Relaxed);
        if priority == PriorityLevel::Critical {
            self.inner.critical.fetch_add(1, Ordering::Relaxed);
            metrics::counter!("civic_critical_issues_total", "category" => category.as_str())
                .increment(1);
        }
    }

    /// Record a submitted report
    pub fn record_submission(&self, category: IssueCategory) {
        self.inner.submissions.fetch_add(1, Ordering::Relaxed);
        metrics::counter!("civic_reports_submitted_total", "category" => category.as_str())
            .increment(1);
    }

    /// Record a failed submission
    pub fn record_submission_failure(&self) {
        self.inner.submission_failures.fetch_add(1, Ordering::Relaxed);
        metrics::counter!("civic_report_failures_total").increment(1);
    }

    /// Record a report status change
    pub fn record_status_update(&self) {
        self.inner.status_updates.fetch_add(1, Ordering::Relaxed);
        metrics::counter!("civic_status_updates_total").increment(1);
    }

    /// Get current metrics snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        let by_category = IssueCategory::ALL
            .iter()
            .map(|c| (*c, self.inner.by_category[c.index()].load(Ordering::Relaxed)))
            .collect();

        MetricsSnapshot {
            classifications: self.inner.classifications.load(Ordering::Relaxed),
            by_category,
            critical: self.inner.critical.load(Ordering::Relaxed),
            submissions: self.inner.submissions.load(Ordering::Relaxed),
            submission_failures: self.inner.submission_failures.load(Ordering::Relaxed),
            status_updates: self.inner.status_updates.load(Ordering::Relaxed),
        }
    }
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot of current metrics
#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    pub classifications: u64,
    pub by_category: Vec<(IssueCategory, u64)>,
    pub critical: u64,
    pub submissions: u64,
    pub submission_failures: u64,
    pub status_updates: u64,
}

impl MetricsSnapshot {
    /// Share of classifications that came out critical
    pub fn critical_rate(&self) -> f64 {
        if self.classifications == 0 {
            0.0
        } else {
            self.critical as f64 / self.classifications as f64
        }
    }

    /// Share of submission attempts that failed
    pub fn failure_rate(&self) -> f64 {
        let attempts = self.submissions + self.submission_failures;
        if attempts == 0 {
            0.0
        } else {
            self.submission_failures as f64 / attempts as f64
        }
    }

    pub fn count_for(&self, category: IssueCategory) -> u64 {
        self.by_category
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, n)| *n)
            .unwrap_or(0)
    }
}
