//! Error handling for Concord.
//! One error enum per subsystem, `thiserror` only.
//!
//! Detector errors never leave the pipeline: the detector adapter turns
//! them into zero signals. Only configuration errors are surfaced, and only
//! at construction time.

pub mod concord_error;
pub mod config_error;
pub mod detection_error;
pub mod error_code;

pub use concord_error::{ConcordError, ConcordResult};
pub use config_error::ConfigError;
pub use detection_error::DetectionError;
pub use error_code::ConcordErrorCode;
