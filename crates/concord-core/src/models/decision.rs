use std::fmt;

use serde::{Deserialize, Serialize};

use super::{ConflictPattern, Signal, ThrottleVerdict, TkiStrategy};
use crate::constants::{clamp_unit, clamp_urgency};

/// Qualitative reading of a conflict score. Only used in reasoning text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceBand {
    High,
    Medium,
    Low,
    Uncertain,
}

impl ConfidenceBand {
    pub fn from_score(score: f64) -> Self {
        if score > 0.8 {
            Self::High
        } else if score > 0.5 {
            Self::Medium
        } else if score > 0.3 {
            Self::Low
        } else {
            Self::Uncertain
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
            Self::Uncertain => "uncertain",
        }
    }
}

impl fmt::Display for ConfidenceBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The pipeline's answer for one processed message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FusedDecision {
    pub conflict_score: f64,
    pub urgency_level: u8,
    pub pattern: Option<ConflictPattern>,
    pub strategy: TkiStrategy,
    pub should_intervene: bool,
    pub reasoning: String,
    pub band: ConfidenceBand,
    /// Dynamic threshold the score was compared against.
    pub threshold: f64,
    /// Fusion short-circuited on a fast, confident detector.
    pub early_decision: bool,
    pub signals: Vec<Signal>,
    /// Set when the throttle turned a ready intervention into silence.
    pub suppressed: Option<ThrottleVerdict>,
}

impl FusedDecision {
    /// Build a decision, clamping score and urgency.
    pub fn new(conflict_score: f64, urgency_level: i64, threshold: f64) -> Self {
        let conflict_score = clamp_unit(conflict_score);
        Self {
            conflict_score,
            urgency_level: clamp_urgency(urgency_level),
            pattern: None,
            strategy: TkiStrategy::default(),
            should_intervene: false,
            reasoning: String::new(),
            band: ConfidenceBand::from_score(conflict_score),
            threshold: clamp_unit(threshold),
            early_decision: false,
            signals: Vec::new(),
            suppressed: None,
        }
    }

    /// Non-intervening, low-confidence decision.
    pub fn silent(reason: impl Into<String>) -> Self {
        let mut decision = Self::new(0.0, 1, 1.0);
        decision.reasoning = reason.into();
        decision
    }

    pub fn set_urgency(&mut self, level: i64) {
        self.urgency_level = clamp_urgency(level);
    }

    /// Apply a throttle verdict. Only ever turns an intervention off.
    pub fn apply_throttle(&mut self, verdict: ThrottleVerdict) {
        if self.should_intervene && !verdict.is_allowed() {
            self.should_intervene = false;
            self.suppressed = Some(verdict);
            self.reasoning.push_str(&format!("; suppressed: {verdict}"));
        }
    }
}
