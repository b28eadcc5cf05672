//! Detector errors.

use super::error_code::{self, ConcordErrorCode};

/// Errors raised inside a single signal detector.
///
/// All three variants are recoverable: the pipeline substitutes a zero
/// signal (or a silent decision, for `InsufficientContext`).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DetectionError {
    #[error("detector {detector} timed out after {timeout_ms}ms")]
    Timeout { detector: String, timeout_ms: u64 },

    #[error("detector {detector} failed: {reason}")]
    Failure { detector: String, reason: String },

    #[error("insufficient context: {available} messages, {required} required")]
    InsufficientContext { required: usize, available: usize },
}

impl DetectionError {
    /// Short label used as signal evidence when the error is absorbed.
    pub fn evidence(&self) -> String {
        match self {
            Self::Timeout { .. } => crate::constants::TIMEOUT_EVIDENCE.to_string(),
            Self::Failure { reason, .. } => format!("error: {reason}"),
            Self::InsufficientContext { .. } => "insufficient data".to_string(),
        }
    }
}

impl ConcordErrorCode for DetectionError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Timeout { .. } => error_code::DETECTOR_TIMEOUT,
            Self::Failure { .. } => error_code::DETECTOR_FAILURE,
            Self::InsufficientContext { .. } => error_code::INSUFFICIENT_CONTEXT,
        }
    }
}
