//! Civic Reports
//!
//! Report records and the collaborators that persist them.
//!
//! Storage is injected: a [`ReportStore`] keeps the reporter's own copy and
//! an optional [`ReportSink`] forwards each report to the city dashboard.
//! [`MemoryReportStore`] and [`MemoryDashboardSink`] are in-process
//! implementations for tests and demos.

pub mod report;
pub mod service;
pub mod sink;

pub use report::{
    generate_report_id, AnalysisSummary, DashboardCategory, ReportDraft, ReportLocation,
    ReportStatus, Reporter, SubmittedReport, SuggestionField, AUTO_FILL_CONFIDENCE,
};
pub use service::ReportService;
pub use sink::{MemoryDashboardSink, MemoryReportStore, ReportSink, ReportStore};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::report::{ReportDraft, ReportStatus, Reporter, SubmittedReport};
    pub use crate::service::ReportService;
    pub use crate::sink::{ReportSink, ReportStore};
}
