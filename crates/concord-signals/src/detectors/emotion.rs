//! Emotion detector: narrow anger / frustration / defensiveness vocabulary
//! plus punctuation and shouting heuristics.
//!
//! Enough distinct cues in one message lift the confidence above the
//! early-decision bar.

use std::sync::LazyLock;

use regex::Regex;

use concord_core::config::EmotionConfig;
use concord_core::errors::DetectionError;
use concord_core::lexicon::DEFENSIVE_RE;
use concord_core::models::{Message, Signal, SignalKind};
use concord_session::ConversationWindow;

use super::ISignalDetector;

static ANGER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\b(angry|furious|mad|hate|pissed|rage|livid)\b|生气|愤怒)").unwrap()
});

static FRUSTRATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\b(frustrat\w*|annoy\w*|tired of|sick of|fed up|ugh|seriously|again\?)|无语|烦死)")
        .unwrap()
});

static ABSOLUTE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(never|always|nothing|nobody|everyone|every time)\b").unwrap()
});

static REPEATED_PUNCT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[!?！？]{2,}").unwrap());

/// Minimum letters before the caps ratio means anything.
const MIN_LETTERS_FOR_CAPS: usize = 4;

pub struct EmotionDetector {
    config: EmotionConfig,
}

impl EmotionDetector {
    pub fn new(config: EmotionConfig) -> Self {
        Self { config }
    }

    /// Share of ASCII letters that are uppercase, if there are enough letters.
    fn caps_ratio(text: &str) -> Option<f64> {
        let letters: Vec<char> = text.chars().filter(|c| c.is_ascii_alphabetic()).collect();
        if letters.len() < MIN_LETTERS_FOR_CAPS {
            return None;
        }
        let upper = letters.iter().filter(|c| c.is_ascii_uppercase()).count();
        Some(upper as f64 / letters.len() as f64)
    }
}

impl Default for EmotionDetector {
    fn default() -> Self {
        Self::new(EmotionConfig::default())
    }
}

impl ISignalDetector for EmotionDetector {
    fn kind(&self) -> SignalKind {
        SignalKind::Emotion
    }

    fn detect(
        &self,
        message: &Message,
        _window: &ConversationWindow,
    ) -> Result<Signal, DetectionError> {
        let c = &self.config;
        let text = message.content.as_str();
        let mut score = 0.0;
        let mut cues: Vec<&str> = Vec::new();

        if ANGER_RE.is_match(text) {
            score += c.anger_weight;
            cues.push("anger");
        }
        if FRUSTRATION_RE.is_match(text) {
            score += c.frustration_weight;
            cues.push("frustration");
        }
        if DEFENSIVE_RE.is_match(text) {
            score += c.defensive_weight;
            cues.push("defensive");
        }
        if ABSOLUTE_RE.is_match(text) {
            score += c.absolute_weight;
            cues.push("absolute");
        }
        if text.contains(|c: char| c == '!' || c == '！') {
            score += c.exclamation_weight;
            cues.push("exclamation");
        }
        if REPEATED_PUNCT_RE.is_match(text) {
            score += c.repeated_punctuation_weight;
            cues.push("repeated punctuation");
        }
        if Self::caps_ratio(text).is_some_and(|r| r > c.caps_ratio) {
            score += c.caps_weight;
            cues.push("caps");
        }

        let confidence = if cues.len() >= c.strong_cues {
            c.strong_confidence
        } else {
            c.confidence
        };
        let evidence = if cues.is_empty() {
            "neutral".to_string()
        } else {
            cues.join(", ")
        };
        Ok(Signal::new(SignalKind::Emotion, score, confidence, evidence))
    }
}
