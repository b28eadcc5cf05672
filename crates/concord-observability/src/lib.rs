//! # concord-observability
//!
//! Structured tracing with span definitions and event types, lock-free
//! pipeline counters, and detector degradation tracking.

pub mod degradation;
pub mod metrics;
pub mod tracing_setup;

pub use degradation::{DegradationTracker, RecoveryStatus, TrackedDegradation};
pub use metrics::{MetricsSnapshot, PipelineMetrics};
