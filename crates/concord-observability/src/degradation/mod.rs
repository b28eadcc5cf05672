//! Degradation tracking for detectors that fell back to a zero signal.

pub mod tracker;

pub use tracker::{DegradationTracker, RecoveryStatus, TrackedDegradation};
