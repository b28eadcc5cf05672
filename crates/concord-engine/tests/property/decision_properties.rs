//! Property tests for the moderation pipeline: bounds that hold for any input.

use chrono::{DateTime, Duration, Utc};
use proptest::prelude::*;

use concord_core::config::ConcordConfig;
use concord_core::models::{FusedDecision, Gender, Message};
use concord_engine::ModerationEngine;

const LINES: &[&str] = &[
    "sounds good to me",
    "you never listen",
    "you always dismiss me",
    "this is stupid!!",
    "I'm not defensive, I'm just saying",
    "WHY DOES THIS KEEP HAPPENING",
    "ok",
    "we need this by Friday, the deadline is tomorrow",
    "whatever",
    "I think we could move the launch and",
    "you idiot",
    "thanks, that helps a lot",
];

fn conversation() -> impl Strategy<Value = Vec<(usize, usize, i64)>> {
    prop::collection::vec((0..LINES.len(), 0..4usize, 1..120i64), 1..20)
}

fn run(turns: &[(usize, usize, i64)]) -> Vec<FusedDecision> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .unwrap();
    let engine = ModerationEngine::new(ConcordConfig::default()).unwrap();
    let authors = [
        ("ana", Gender::Female),
        ("bo", Gender::Male),
        ("cy", Gender::Female),
        ("dee", Gender::Unknown),
    ];
    let mut at = DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap();

    runtime.block_on(async {
        let mut decisions = Vec::with_capacity(turns.len());
        for &(line, who, gap) in turns {
            at += Duration::seconds(gap);
            let (author, gender) = authors[who];
            let msg = Message::new("prop", author, gender, LINES[line], at);
            decisions.push(engine.process(msg).await);
        }
        decisions
    })
}

proptest! {
    #[test]
    fn score_and_threshold_stay_in_unit_range(turns in conversation()) {
        for d in run(&turns) {
            prop_assert!((0.0..=1.0).contains(&d.conflict_score));
            prop_assert!((0.0..=1.0).contains(&d.threshold));
        }
    }

    #[test]
    fn urgency_stays_in_range(turns in conversation()) {
        for d in run(&turns) {
            prop_assert!((1..=5).contains(&d.urgency_level));
        }
    }

    #[test]
    fn interventions_exceed_their_threshold(turns in conversation()) {
        for d in run(&turns) {
            if d.should_intervene {
                prop_assert!(d.conflict_score > d.threshold);
                prop_assert!(d.suppressed.is_none());
            }
        }
    }

    #[test]
    fn suppressed_decisions_never_intervene(turns in conversation()) {
        for d in run(&turns) {
            if d.suppressed.is_some() {
                prop_assert!(!d.should_intervene);
            }
        }
    }
}
