use super::error_code::ConcordErrorCode;
use super::{ConfigError, DetectionError};

/// Aggregate error for the whole workspace.
/// Subsystem errors convert in via `From`.
#[derive(Debug, thiserror::Error)]
pub enum ConcordError {
    #[error("detection error: {0}")]
    Detection(#[from] DetectionError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl ConcordErrorCode for ConcordError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Detection(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
        }
    }
}

pub type ConcordResult<T> = Result<T, ConcordError>;
