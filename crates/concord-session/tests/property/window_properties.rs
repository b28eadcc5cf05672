use chrono::{DateTime, Duration, Utc};
use concord_core::models::{Gender, Message};
use concord_session::ConversationWindow;
use proptest::prelude::*;

fn message(i: usize) -> Message {
    let t0 = DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap();
    Message::new(
        "room",
        format!("user-{}", i % 3),
        Gender::Unknown,
        format!("message {i}"),
        t0 + Duration::seconds(i as i64),
    )
}

proptest! {
    #[test]
    fn capacity_holds_exactly_the_newest(capacity in 1usize..40, extra in 0usize..40) {
        let mut w = ConversationWindow::new("room", capacity);
        let total = capacity + extra;
        for i in 0..total {
            w.add_message(message(i), 0.1);
        }
        prop_assert_eq!(w.len(), capacity);
        let kept: Vec<String> = w.recent(capacity).iter().map(|m| m.content.clone()).collect();
        let expected: Vec<String> = (extra..total).map(|i| format!("message {i}")).collect();
        prop_assert_eq!(kept, expected);
    }

    #[test]
    fn trend_is_always_in_unit_range(scores in prop::collection::vec(-1.0f64..2.0, 0..30)) {
        let mut w = ConversationWindow::new("room", 50);
        for (i, s) in scores.iter().enumerate() {
            w.add_message(message(i), *s);
        }
        let t = w.trend(5);
        prop_assert!((0.0..=1.0).contains(&t));
    }

    #[test]
    fn breakdown_is_always_in_unit_range(texts in prop::collection::vec(".{0,12}", 0..8)) {
        let mut w = ConversationWindow::new("room", 20);
        for (i, text) in texts.iter().enumerate() {
            let mut m = message(i * 90);
            m.content = text.clone();
            w.add_message(m, 0.0);
        }
        let b = w.breakdown_score();
        prop_assert!((0.0..=1.0).contains(&b));
    }

    #[test]
    fn running_mean_stays_within_observed_scores(scores in prop::collection::vec(0.0f64..=1.0, 1..30)) {
        let mut w = ConversationWindow::new("room", 50);
        for (i, s) in scores.iter().enumerate() {
            let mut m = message(i);
            m.author = "solo".to_string();
            w.add_message(m, *s);
        }
        let state = w.participant_state("solo").unwrap();
        let min = scores.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = scores.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        prop_assert!(state.running_average_score >= min - 1e-9);
        prop_assert!(state.running_average_score <= max + 1e-9);
    }
}
