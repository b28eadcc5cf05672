//! Keyword detector: tiered term tables, blame framing, punctuation runs.
//!
//! Score is the sum of per-category `hits * weight`, each category capped,
//! clamped to 1.0. Fastest detector and the fallback when others fail.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::LazyLock;

use regex::Regex;

use concord_core::config::KeywordConfig;
use concord_core::errors::DetectionError;
use concord_core::lexicon::{count_matches, ACCUSATION_RE};
use concord_core::models::{Message, Signal, SignalKind};
use concord_session::ConversationWindow;

use super::ISignalDetector;

static SEVERE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(\b(hate|idiot\w*|stupid|shut up|ridiculous|pathetic|useless|disgusting|moron\w*)\b|滚|闭嘴|白痴)",
    )
    .unwrap()
});

static MODERATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(\b(dismiss\w*|ignor\w*|never listen\w*|don'?t listen\w*|wrong|unfair|annoying|nonsense|sick of|tired of|fed up|waste of time)\b|烦|受够)",
    )
    .unwrap()
});

static MILD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\b(issues?|problems?|disagree\w*|concern\w*|confus\w*|frustrat\w*|not sure about)\b|问题)")
        .unwrap()
});

static EMOTION_TERM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(angry|mad|upset|furious|annoyed|hurt|offended|insulted)\b").unwrap()
});

static INTENSITY_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[!?！？]{2,}").unwrap());

/// Per-category hit counts for one text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeywordHits {
    pub severe: usize,
    pub moderate: usize,
    pub mild: usize,
    pub blame: usize,
    pub emotion: usize,
    pub intensity: usize,
}

impl KeywordHits {
    pub fn scan(text: &str) -> Self {
        Self {
            severe: count_matches(&SEVERE_RE, text),
            moderate: count_matches(&MODERATE_RE, text),
            mild: count_matches(&MILD_RE, text),
            blame: count_matches(&ACCUSATION_RE, text),
            emotion: count_matches(&EMOTION_TERM_RE, text),
            intensity: count_matches(&INTENSITY_RE, text),
        }
    }

    pub fn total(&self) -> usize {
        self.severe + self.moderate + self.mild + self.blame + self.emotion + self.intensity
    }
}

pub struct KeywordDetector {
    config: KeywordConfig,
    invocations: AtomicU64,
}

impl KeywordDetector {
    pub fn new(config: KeywordConfig) -> Self {
        Self {
            config,
            invocations: AtomicU64::new(0),
        }
    }

    /// Score a piece of text.
    pub fn score(&self, hits: &KeywordHits) -> f64 {
        let c = &self.config;
        let capped = |n: usize, weight: f64, cap: f64| (n as f64 * weight).min(cap);
        let total = capped(hits.severe, c.severe_weight, c.severe_cap)
            + capped(hits.moderate, c.moderate_weight, c.category_cap)
            + capped(hits.mild, c.mild_weight, c.category_cap)
            + capped(hits.blame, c.blame_weight, c.category_cap)
            + capped(hits.emotion, c.emotion_weight, c.category_cap)
            + capped(hits.intensity, c.intensity_weight, c.category_cap);
        total.min(1.0)
    }

    pub fn confidence_for(&self, score: f64) -> f64 {
        if score > self.config.confidence_cutoff {
            self.config.high_confidence
        } else {
            self.config.low_confidence
        }
    }

    pub fn invocations(&self) -> u64 {
        self.invocations.load(Ordering::Relaxed)
    }
}

impl Default for KeywordDetector {
    fn default() -> Self {
        Self::new(KeywordConfig::default())
    }
}

impl ISignalDetector for KeywordDetector {
    fn kind(&self) -> SignalKind {
        SignalKind::Keyword
    }

    fn detect(
        &self,
        message: &Message,
        _window: &ConversationWindow,
    ) -> Result<Signal, DetectionError> {
        self.invocations.fetch_add(1, Ordering::Relaxed);
        let hits = KeywordHits::scan(&message.content);
        let score = self.score(&hits);
        let evidence = if hits.total() == 0 {
            "no conflict terms".to_string()
        } else {
            format!(
                "severe:{} moderate:{} mild:{} blame:{} emotion:{} intensity:{}",
                hits.severe, hits.moderate, hits.mild, hits.blame, hits.emotion, hits.intensity
            )
        };
        Ok(Signal::new(
            SignalKind::Keyword,
            score,
            self.confidence_for(score),
            evidence,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiers_and_blame_add_up() {
        let d = KeywordDetector::default();
        let hits = KeywordHits::scan("you never listen");
        assert_eq!(hits.moderate, 1);
        assert_eq!(hits.blame, 1);
        assert!((d.score(&hits) - 0.55).abs() < 1e-9);
    }

    #[test]
    fn categories_are_capped() {
        let d = KeywordDetector::default();
        let hits = KeywordHits::scan("issue problem concern confusing issue");
        assert_eq!(hits.mild, 5);
        assert!((d.score(&hits) - 0.4).abs() < 1e-9);
    }

    #[test]
    fn total_clamps_to_one() {
        let d = KeywordDetector::default();
        let hits = KeywordHits::scan(
            "you idiot, this is stupid and wrong and unfair, you always blame me, I'm furious and hurt!!! ??",
        );
        assert_eq!(d.score(&hits), 1.0);
    }

    #[test]
    fn confidence_switches_at_cutoff() {
        let d = KeywordDetector::default();
        assert_eq!(d.confidence_for(0.31), 0.85);
        assert_eq!(d.confidence_for(0.3), 0.5);
    }
}
