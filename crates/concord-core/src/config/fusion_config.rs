use serde::{Deserialize, Serialize};

use super::defaults;
use crate::models::SignalKind;

/// Signal fusion weights and early-decision cutoffs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FusionConfig {
    /// Default: 0.3.
    pub keyword_weight: f64,
    /// Emotion and turn-taking together form the behavioral share. Default: 0.15.
    pub emotion_weight: f64,
    /// Default: 0.25.
    pub turn_taking_weight: f64,
    /// Default: 0.3.
    pub semantic_weight: f64,
    /// Weight for caller-supplied detectors. Default: 0.1.
    pub other_weight: f64,
    /// Signals at or below this confidence abstain. Default: 0.3.
    pub confidence_floor: f64,
    /// Confidence a single signal needs to short-circuit fusion. Default: 0.8.
    pub early_confidence: f64,
    /// Default: 0.5.
    pub early_behavioral_value: f64,
    /// Default: 0.7.
    pub early_keyword_value: f64,
}

impl FusionConfig {
    pub fn weight_for(&self, kind: SignalKind) -> f64 {
        match kind {
            SignalKind::Keyword => self.keyword_weight,
            SignalKind::Emotion => self.emotion_weight,
            SignalKind::TurnTaking => self.turn_taking_weight,
            SignalKind::Semantic => self.semantic_weight,
            SignalKind::Other => self.other_weight,
        }
    }

    /// Early-decision value cutoff for a kind, if that kind may short-circuit.
    pub fn early_value_for(&self, kind: SignalKind) -> Option<f64> {
        match kind {
            SignalKind::Keyword => Some(self.early_keyword_value),
            SignalKind::Emotion | SignalKind::TurnTaking => Some(self.early_behavioral_value),
            SignalKind::Semantic | SignalKind::Other => None,
        }
    }

    /// keyword + behavioral + semantic.
    pub fn core_weight_sum(&self) -> f64 {
        self.keyword_weight + self.emotion_weight + self.turn_taking_weight + self.semantic_weight
    }
}

impl Default for FusionConfig {
    fn default() -> Self {
        Self {
            keyword_weight: defaults::DEFAULT_KEYWORD_FUSION_WEIGHT,
            emotion_weight: defaults::DEFAULT_EMOTION_FUSION_WEIGHT,
            turn_taking_weight: defaults::DEFAULT_TURN_TAKING_FUSION_WEIGHT,
            semantic_weight: defaults::DEFAULT_SEMANTIC_FUSION_WEIGHT,
            other_weight: defaults::DEFAULT_OTHER_FUSION_WEIGHT,
            confidence_floor: defaults::DEFAULT_CONFIDENCE_FLOOR,
            early_confidence: defaults::DEFAULT_EARLY_CONFIDENCE,
            early_behavioral_value: defaults::DEFAULT_EARLY_BEHAVIORAL_VALUE,
            early_keyword_value: defaults::DEFAULT_EARLY_KEYWORD_VALUE,
        }
    }
}

/// Dynamic intervention threshold.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdConfig {
    /// Default: 0.35.
    pub base: f64,
    /// The threshold never drops below this. Default: 0.15.
    pub floor: f64,
    /// Trend above which the room counts as heating up. Default: 0.3.
    pub rising_trend: f64,
    pub trend_drop: f64,
    pub breakdown_drop: f64,
    /// Applied for high-severity patterns. Default: 0.1.
    pub severity_drop: f64,
    /// Applied for deadline pressure in a rising room. Default: 0.15.
    pub deadline_drop: f64,
    /// Breakdown score at which the room counts as broken down. Default: 0.4.
    pub breakdown_cutoff: f64,
    /// Added per intervention in the past hour. Default: 0.0 (off).
    pub recent_intervention_penalty: f64,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            base: defaults::DEFAULT_BASE_THRESHOLD,
            floor: defaults::DEFAULT_FLOOR_THRESHOLD,
            rising_trend: defaults::DEFAULT_RISING_TREND,
            trend_drop: defaults::DEFAULT_TREND_DROP,
            breakdown_drop: defaults::DEFAULT_BREAKDOWN_DROP,
            severity_drop: defaults::DEFAULT_SEVERITY_DROP,
            deadline_drop: defaults::DEFAULT_DEADLINE_DROP,
            breakdown_cutoff: defaults::DEFAULT_BREAKDOWN_CUTOFF,
            recent_intervention_penalty: defaults::DEFAULT_RECENT_INTERVENTION_PENALTY,
        }
    }
}
