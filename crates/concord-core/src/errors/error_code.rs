//! Stable string codes for logging and for callers that map errors to replies.

pub const DETECTOR_TIMEOUT: &str = "DETECTOR_TIMEOUT";
pub const DETECTOR_FAILURE: &str = "DETECTOR_FAILURE";
pub const INSUFFICIENT_CONTEXT: &str = "INSUFFICIENT_CONTEXT";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";

/// Maps an error to a stable, machine-readable code.
pub trait ConcordErrorCode {
    fn error_code(&self) -> &'static str;
}
