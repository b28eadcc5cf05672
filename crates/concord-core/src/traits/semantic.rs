//! ISemanticClassifier: the external, possibly slow, conflict scorer.
//!
//! The core only needs `(formatted conversation) -> {score, confidence}`.
//! Timeouts and fail-open handling live in the detector adapter, not here.

use serde::{Deserialize, Serialize};

use crate::errors::DetectionError;

/// Raw answer from an external classifier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SemanticScore {
    pub score: f64,
    pub confidence: f64,
}

/// Semantic conflict classifier backed by an external service.
#[allow(async_fn_in_trait)]
pub trait ISemanticClassifier: Send + Sync {
    /// Provider name for logs and signal evidence.
    fn name(&self) -> &str;

    /// Score a rendered conversation excerpt.
    async fn classify(&self, conversation: &str) -> Result<SemanticScore, DetectionError>;
}

/// Placeholder for engines built without a semantic provider.
/// The engine never calls it; it only fills the type parameter.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSemanticClassifier;

impl ISemanticClassifier for NoSemanticClassifier {
    fn name(&self) -> &str {
        "none"
    }

    async fn classify(&self, _conversation: &str) -> Result<SemanticScore, DetectionError> {
        Err(DetectionError::Failure {
            detector: "semantic".to_string(),
            reason: "no classifier configured".to_string(),
        })
    }
}
