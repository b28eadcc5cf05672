use chrono::Utc;
use concord_core::models::{Gender, Message, Signal, SignalKind};
use concord_session::ConversationWindow;
use concord_signals::{ISignalDetector, KeywordDetector, SignalFusion};
use proptest::prelude::*;

const CONFLICT_TERMS: &[&str] = &[
    "stupid", "hate", "wrong", "unfair", "dismissive", "issue", "problem",
    "you always", "you never", "blame", "angry", "upset", "!!", "??",
];

fn detect(detector: &KeywordDetector, text: &str) -> f64 {
    let window = ConversationWindow::new("room", 10);
    let message = Message::new("room", "a", Gender::Unknown, text, Utc::now());
    detector.detect(&message, &window).unwrap().value
}

proptest! {
    #[test]
    fn adding_conflict_terms_never_lowers_the_score(
        base in "[a-z ,.]{0,40}",
        extra in prop::collection::vec(prop::sample::select(CONFLICT_TERMS), 1..5),
    ) {
        let detector = KeywordDetector::default();
        let before = detect(&detector, &base);
        let stronger = format!("{base} {}", extra.join(" "));
        let after = detect(&detector, &stronger);
        prop_assert!(after >= before, "{before} -> {after} for {stronger:?}");
    }

    #[test]
    fn keyword_score_in_unit_range(text in ".{0,200}") {
        let detector = KeywordDetector::default();
        let v = detect(&detector, &text);
        prop_assert!((0.0..=1.0).contains(&v));
    }

    #[test]
    fn fused_score_in_unit_range(
        values in prop::collection::vec((0.0f64..=1.0, 0.0f64..=1.0), 0..6),
    ) {
        let kinds = [
            SignalKind::Keyword,
            SignalKind::Emotion,
            SignalKind::TurnTaking,
            SignalKind::Semantic,
            SignalKind::Other,
        ];
        let signals: Vec<Signal> = values
            .iter()
            .enumerate()
            .map(|(i, (v, c))| Signal::new(kinds[i % kinds.len()], *v, *c, "p"))
            .collect();
        let decision = SignalFusion::default().fuse(signals);
        prop_assert!((0.0..=1.0).contains(&decision.conflict_score));
        prop_assert!((1..=5).contains(&decision.urgency_level));
    }
}
