//! Civic Telemetry
//!
//! Counters for classification and report submission.
//!
//! Every event is kept in an in-process [`MetricsCollector`] snapshot and
//! also forwarded to the `metrics` facade, so a host application can
//! install whichever recorder it likes.

pub mod metrics;

pub use crate::metrics::{MetricsCollector, MetricsSnapshot};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::metrics::{MetricsCollector, MetricsSnapshot};
}
