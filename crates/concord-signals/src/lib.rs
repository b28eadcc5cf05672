//! # concord-signals
//!
//! Independent conflict detectors and the fusion step that combines them.
//!
//! ## Detectors
//!
//! | Detector | Reads | Cost |
//! |----------|-------|------|
//! | Keyword | tiered conflict, blame, emotion terms, punctuation runs | regex, always available |
//! | Emotion | anger / frustration / defensiveness, `!`, ALL-CAPS | regex |
//! | TurnTaking | speaker and gender shares, monologue runs | window scan |
//! | Semantic | external classifier over rendered context | async, timed out, fail-open |
//!
//! ## Fusion
//!
//! Confidence-weighted mean over signals above the confidence floor, an
//! early-decision shortcut for fast confident detectors, and a dynamic
//! threshold that drops for heating, broken-down, or high-severity rooms.

pub mod detectors;
pub mod fusion;

pub use detectors::{
    run_detector, DetectorOutcome, EmotionDetector, ISignalDetector, KeywordDetector,
    SemanticDetector, TurnTakingDetector,
};
pub use fusion::{SignalFusion, ThresholdContext};
