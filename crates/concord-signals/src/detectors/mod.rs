//! Signal detectors.
//!
//! Every detector sees the incoming message and the room's window as it
//! stood *before* that message was recorded. Detectors are pure apart from
//! their own counters.

pub mod emotion;
pub mod keyword;
pub mod semantic;
pub mod turn_taking;

pub use emotion::EmotionDetector;
pub use keyword::KeywordDetector;
pub use semantic::SemanticDetector;
pub use turn_taking::TurnTakingDetector;

use std::time::Instant;

use concord_core::errors::DetectionError;
use concord_core::models::{Message, Signal, SignalKind};
use concord_session::ConversationWindow;

/// A synchronous conflict detector.
pub trait ISignalDetector: Send + Sync {
    fn kind(&self) -> SignalKind;

    /// Name used in logs and degradation records.
    fn name(&self) -> &str {
        self.kind().as_str()
    }

    fn detect(
        &self,
        message: &Message,
        window: &ConversationWindow,
    ) -> Result<Signal, DetectionError>;
}

/// Result of running one detector through the adapter boundary.
#[derive(Debug, Clone)]
pub struct DetectorOutcome {
    /// Always usable. A zero signal when the detector failed.
    pub signal: Signal,
    /// The absorbed error, kept for degradation tracking.
    pub error: Option<DetectionError>,
}

impl DetectorOutcome {
    pub fn from_result(
        kind: SignalKind,
        result: Result<Signal, DetectionError>,
        latency_ms: f64,
    ) -> Self {
        match result {
            Ok(signal) => Self {
                signal: signal.with_latency(latency_ms),
                error: None,
            },
            Err(error) => Self {
                signal: Signal::zero(kind, error.evidence()).with_latency(latency_ms),
                error: Some(error),
            },
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.error.is_some()
    }
}

/// Run a detector, timing it and converting any error into a zero signal.
pub fn run_detector(
    detector: &dyn ISignalDetector,
    message: &Message,
    window: &ConversationWindow,
) -> DetectorOutcome {
    let start = Instant::now();
    let result = detector.detect(message, window);
    let latency_ms = start.elapsed().as_secs_f64() * 1000.0;
    if let Err(ref e) = result {
        tracing::debug!(detector = %detector.name(), error = %e, "detector absorbed error");
    }
    DetectorOutcome::from_result(detector.kind(), result, latency_ms)
}
