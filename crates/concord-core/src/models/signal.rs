use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::clamp_unit;

/// Which detector produced a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalKind {
    Keyword,
    Emotion,
    TurnTaking,
    Semantic,
    /// Caller-supplied detectors.
    Other,
}

impl SignalKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Keyword => "keyword",
            Self::Emotion => "emotion",
            Self::TurnTaking => "turn_taking",
            Self::Semantic => "semantic",
            Self::Other => "other",
        }
    }

    /// Emotion and turn-taking share the behavioral weight budget.
    pub fn is_behavioral(&self) -> bool {
        matches!(self, Self::Emotion | Self::TurnTaking)
    }
}

impl fmt::Display for SignalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One detector's verdict on one message. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub kind: SignalKind,
    /// Conflict estimate in `[0, 1]`.
    pub value: f64,
    /// Detector's trust in `value`, in `[0, 1]`.
    pub confidence: f64,
    pub evidence: String,
    pub latency_ms: f64,
}

impl Signal {
    pub fn new(kind: SignalKind, value: f64, confidence: f64, evidence: impl Into<String>) -> Self {
        Self {
            kind,
            value: clamp_unit(value),
            confidence: clamp_unit(confidence),
            evidence: evidence.into(),
            latency_ms: 0.0,
        }
    }

    /// Zero-value, zero-confidence signal. Excluded from fusion by the confidence floor.
    pub fn zero(kind: SignalKind, evidence: impl Into<String>) -> Self {
        Self::new(kind, 0.0, 0.0, evidence)
    }

    pub fn with_latency(mut self, latency_ms: f64) -> Self {
        self.latency_ms = latency_ms.max(0.0);
        self
    }

    pub fn is_zero(&self) -> bool {
        self.value == 0.0 && self.confidence == 0.0
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}={:.2}@{:.2} ({:.1}ms, {})",
            self.kind, self.value, self.confidence, self.latency_ms, self.evidence
        )
    }
}
