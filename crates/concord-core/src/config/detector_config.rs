use serde::{Deserialize, Serialize};

use super::defaults;

/// Keyword detector weights. Each category is `hits * weight`, capped.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KeywordConfig {
    pub severe_weight: f64,
    pub moderate_weight: f64,
    pub mild_weight: f64,
    pub blame_weight: f64,
    pub emotion_weight: f64,
    pub intensity_weight: f64,
    /// Cap for every category except severe. Default: 0.4.
    pub category_cap: f64,
    /// Default: 0.5.
    pub severe_cap: f64,
    /// Scores above this get `high_confidence`. Default: 0.3.
    pub confidence_cutoff: f64,
    pub high_confidence: f64,
    pub low_confidence: f64,
}

impl Default for KeywordConfig {
    fn default() -> Self {
        Self {
            severe_weight: defaults::DEFAULT_SEVERE_WEIGHT,
            moderate_weight: defaults::DEFAULT_MODERATE_WEIGHT,
            mild_weight: defaults::DEFAULT_MILD_WEIGHT,
            blame_weight: defaults::DEFAULT_BLAME_WEIGHT,
            emotion_weight: defaults::DEFAULT_EMOTION_TERM_WEIGHT,
            intensity_weight: defaults::DEFAULT_INTENSITY_WEIGHT,
            category_cap: defaults::DEFAULT_CATEGORY_CAP,
            severe_cap: defaults::DEFAULT_SEVERE_CAP,
            confidence_cutoff: defaults::DEFAULT_KEYWORD_CONFIDENCE_CUTOFF,
            high_confidence: defaults::DEFAULT_KEYWORD_HIGH_CONFIDENCE,
            low_confidence: defaults::DEFAULT_KEYWORD_LOW_CONFIDENCE,
        }
    }
}

/// Emotion detector increments.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmotionConfig {
    pub anger_weight: f64,
    pub frustration_weight: f64,
    pub defensive_weight: f64,
    /// never / always / nobody. Default: 0.2.
    pub absolute_weight: f64,
    /// Any `!`. Default: 0.15.
    pub exclamation_weight: f64,
    /// `!!`, `??`, `?!`. Default: 0.1.
    pub repeated_punctuation_weight: f64,
    pub caps_weight: f64,
    /// Uppercase share of letters above which a message is shouting. Default: 0.5.
    pub caps_ratio: f64,
    pub confidence: f64,
    /// Distinct cues at which the reading counts as strongly cued. Default: 3.
    pub strong_cues: usize,
    /// Confidence for strongly cued readings. Default: 0.9.
    pub strong_confidence: f64,
}

impl Default for EmotionConfig {
    fn default() -> Self {
        Self {
            anger_weight: defaults::DEFAULT_ANGER_WEIGHT,
            frustration_weight: defaults::DEFAULT_FRUSTRATION_WEIGHT,
            defensive_weight: defaults::DEFAULT_DEFENSIVE_WEIGHT,
            absolute_weight: defaults::DEFAULT_ABSOLUTE_WEIGHT,
            exclamation_weight: defaults::DEFAULT_EXCLAMATION_WEIGHT,
            repeated_punctuation_weight: defaults::DEFAULT_REPEATED_PUNCTUATION_WEIGHT,
            caps_weight: defaults::DEFAULT_CAPS_WEIGHT,
            caps_ratio: defaults::DEFAULT_CAPS_RATIO,
            confidence: defaults::DEFAULT_EMOTION_CONFIDENCE,
            strong_cues: defaults::DEFAULT_EMOTION_STRONG_CUES,
            strong_confidence: defaults::DEFAULT_EMOTION_STRONG_CONFIDENCE,
        }
    }
}

/// Turn-taking / dominance detector.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TurnTakingConfig {
    /// Recent turns inspected. Default: 8.
    pub lookback: usize,
    /// Share of turns that marks one speaker as dominant. Default: 0.6.
    pub dominance_fraction: f64,
    /// Share of turns that marks one gender as dominant. Default: 0.7.
    pub gender_fraction: f64,
    /// Same-speaker run length that counts as a monologue. Default: 3.
    pub consecutive_run: usize,
    /// Confidence when any dominance feature fired. Default: 0.7.
    pub confidence: f64,
    /// Confidence when nothing fired. At the fusion floor, so the signal abstains. Default: 0.3.
    pub idle_confidence: f64,
}

impl Default for TurnTakingConfig {
    fn default() -> Self {
        Self {
            lookback: defaults::DEFAULT_TURN_LOOKBACK,
            dominance_fraction: defaults::DEFAULT_DOMINANCE_FRACTION,
            gender_fraction: defaults::DEFAULT_GENDER_FRACTION,
            consecutive_run: defaults::DEFAULT_CONSECUTIVE_RUN,
            confidence: defaults::DEFAULT_TURN_CONFIDENCE,
            idle_confidence: defaults::DEFAULT_TURN_IDLE_CONFIDENCE,
        }
    }
}

/// Optional external semantic detector.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SemanticConfig {
    /// Only takes effect when a classifier is installed. Default: true.
    pub enabled: bool,
    /// Hard per-call budget. Default: 400.
    pub timeout_ms: u64,
    /// Messages rendered into the classifier prompt. Default: 10.
    pub context_messages: usize,
}

impl Default for SemanticConfig {
    fn default() -> Self {
        Self {
            enabled: defaults::DEFAULT_SEMANTIC_ENABLED,
            timeout_ms: defaults::DEFAULT_SEMANTIC_TIMEOUT_MS,
            context_messages: defaults::DEFAULT_SEMANTIC_CONTEXT_MESSAGES,
        }
    }
}
