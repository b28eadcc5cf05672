use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use chrono::{DateTime, Duration as ChronoDuration, Utc};
use concord_core::config::ConcordConfig;
use concord_core::errors::{ConcordError, DetectionError};
use concord_core::models::{
    ConflictPattern, Gender, Message, Signal, SignalKind, ThrottleVerdict, TkiStrategy,
};
use concord_core::traits::{ISemanticClassifier, SemanticScore};
use concord_engine::ModerationEngine;
use concord_session::ConversationWindow;
use concord_signals::ISignalDetector;
use test_fixtures::ConversationFixture;

fn t0() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap()
}

fn msg(room: &str, author: &str, content: &str, secs: i64) -> Message {
    Message::new(room, author, Gender::Unknown, content, t0() + ChronoDuration::seconds(secs))
}

/// The four-line blame exchange, in `room`.
fn blame_exchange(room: &str) -> Vec<Message> {
    vec![
        msg(room, "ana", "I think there's an issue", 0),
        msg(room, "bo", "no there isn't", 15),
        msg(room, "ana", "you always dismiss me", 30),
        msg(room, "bo", "you never listen", 45),
    ]
}

fn engine() -> ModerationEngine {
    ModerationEngine::new(ConcordConfig::default()).unwrap()
}

fn semantic_config(timeout_ms: u64) -> ConcordConfig {
    let mut config = ConcordConfig::default();
    config.semantic.timeout_ms = timeout_ms;
    config
}

/// Observe every message but the last, then process the last one.
async fn decide_last<S: ISemanticClassifier>(
    engine: &ModerationEngine<S>,
    mut messages: Vec<Message>,
) -> concord_core::FusedDecision {
    let last = messages.pop().unwrap();
    for m in messages {
        engine.observe(m).await;
    }
    engine.process(last).await
}

// ── Test classifiers ──────────────────────────────────────────────────────

struct SlowClassifier;

impl ISemanticClassifier for SlowClassifier {
    fn name(&self) -> &str {
        "slow"
    }

    async fn classify(&self, _conversation: &str) -> Result<SemanticScore, DetectionError> {
        tokio::time::sleep(Duration::from_secs(5)).await;
        Ok(SemanticScore {
            score: 1.0,
            confidence: 1.0,
        })
    }
}

struct FailingClassifier;

impl ISemanticClassifier for FailingClassifier {
    fn name(&self) -> &str {
        "failing"
    }

    async fn classify(&self, _conversation: &str) -> Result<SemanticScore, DetectionError> {
        Err(DetectionError::Failure {
            detector: "semantic".to_string(),
            reason: "connection refused".to_string(),
        })
    }
}

struct CountingClassifier {
    calls: AtomicUsize,
    score: SemanticScore,
}

impl CountingClassifier {
    fn new(score: f64, confidence: f64) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            score: SemanticScore { score, confidence },
        }
    }
}

impl ISemanticClassifier for CountingClassifier {
    fn name(&self) -> &str {
        "counting"
    }

    async fn classify(&self, conversation: &str) -> Result<SemanticScore, DetectionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        assert!(conversation.ends_with("[current]"));
        Ok(self.score)
    }
}

struct ConstantDetector;

impl ISignalDetector for ConstantDetector {
    fn kind(&self) -> SignalKind {
        SignalKind::Other
    }

    fn detect(&self, _m: &Message, _w: &ConversationWindow) -> Result<Signal, DetectionError> {
        Ok(Signal::new(SignalKind::Other, 1.0, 1.0, "always hot"))
    }
}

// ── Scenarios ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn fixtures_match_expectations() {
    for name in ["conflict_blame", "calm", "interrupted"] {
        let fixture = ConversationFixture::load(name);
        let decision = decide_last(&engine(), fixture.to_messages()).await;
        let expect = &fixture.expect;

        if let Some(min) = expect.min_score {
            assert!(decision.conflict_score > min, "{name}: {}", decision.reasoning);
        }
        if let Some(max) = expect.max_score {
            assert!(decision.conflict_score < max, "{name}: {}", decision.reasoning);
        }
        match decision.pattern {
            Some(p) => assert!(expect.patterns.contains(&p), "{name}: unexpected {p}"),
            None => assert!(expect.patterns.is_empty(), "{name}: expected a pattern"),
        }
        if !expect.strategies.is_empty() {
            assert!(expect.strategies.contains(&decision.strategy), "{name}");
        }
        assert_eq!(decision.should_intervene, expect.should_intervene, "{name}");
    }
}

#[tokio::test]
async fn blame_exchange_scores_and_selects_compromise() {
    let decision = decide_last(&engine(), blame_exchange("r")).await;

    // keyword 0.55@0.85 and emotion 0.2@0.8; turn-taking abstains
    assert!((decision.conflict_score - 0.438).abs() < 1e-3);
    assert!((decision.threshold - 0.25).abs() < 1e-9);
    assert!(decision.should_intervene);
    assert_eq!(decision.pattern, Some(ConflictPattern::BlameCycle));
    assert_eq!(decision.urgency_level, 4);
    assert_eq!(decision.strategy, TkiStrategy::Compromising);
    assert!(!decision.early_decision);
    assert!(decision.reasoning.contains("pattern blame_cycle"));
    assert!(decision.reasoning.contains("keyword=0.55@0.85"));
}

#[tokio::test]
async fn calm_room_stays_silent() {
    let room = "calm";
    let decision = decide_last(
        &engine(),
        vec![
            msg(room, "ana", "sounds good", 0),
            msg(room, "bo", "let's do that", 10),
            msg(room, "ana", "great, thanks", 20),
        ],
    )
    .await;
    assert_eq!(decision.conflict_score, 0.0);
    assert_eq!(decision.pattern, None);
    assert_eq!(decision.strategy, TkiStrategy::Collaborating);
    assert!(!decision.should_intervene);
}

#[tokio::test]
async fn first_messages_are_insufficient_context() {
    let engine = engine();
    let d1 = engine.process(msg("r", "ana", "you never listen!!", 0)).await;
    let d2 = engine.process(msg("r", "bo", "you always blame me!!", 5)).await;
    for d in [&d1, &d2] {
        assert!(!d.should_intervene);
        assert!(d.reasoning.starts_with("insufficient data"));
        assert_eq!(d.urgency_level, 1);
    }
    let room = engine.rooms().get("r").unwrap();
    assert_eq!(room.lock().await.window.len(), 2);
}

// ── Throttle ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn second_trigger_inside_cooldown_is_suppressed() {
    let engine = engine();
    let mut decisions = Vec::new();
    for m in blame_exchange("r") {
        decisions.push(engine.process(m).await);
    }

    let d3 = &decisions[2];
    assert!(d3.should_intervene);
    assert_eq!(d3.pattern, Some(ConflictPattern::Escalating));

    let d4 = &decisions[3];
    assert!(d4.conflict_score > d4.threshold);
    assert!(!d4.should_intervene);
    assert_eq!(
        d4.suppressed,
        Some(ThrottleVerdict::Cooldown { remaining_secs: 15 })
    );
    assert!(d4.reasoning.contains("suppressed: cooldown"));

    let metrics = engine.metrics();
    assert_eq!(metrics.messages_processed, 4);
    assert_eq!(metrics.interventions_fired, 1);
    assert_eq!(metrics.interventions_suppressed, 1);

    let room = engine.rooms().get("r").unwrap();
    let session = room.lock().await;
    assert_eq!(session.interventions, 1);
    assert_eq!(session.messages_processed, 4);
    assert_eq!(
        session.throttle.last_intervention(),
        Some(t0() + ChronoDuration::seconds(30))
    );
}

#[tokio::test]
async fn rooms_are_throttled_independently() {
    let engine = engine();
    let feed = |room: &'static str| {
        let engine = &engine;
        async move {
            let mut fired = 0;
            for m in blame_exchange(room) {
                if engine.process(m).await.should_intervene {
                    fired += 1;
                }
            }
            fired
        }
    };
    let (a, b) = tokio::join!(feed("room-a"), feed("room-b"));
    assert_eq!((a, b), (1, 1));
    assert_eq!(engine.rooms().room_count(), 2);
}

#[tokio::test]
async fn closing_a_room_drops_its_history() {
    let engine = engine();
    for m in blame_exchange("r") {
        engine.process(m).await;
    }
    assert!(engine.close_room("r"));
    assert!(!engine.close_room("r"));
    assert_eq!(engine.rooms().room_count(), 0);

    let d = engine.process(msg("r", "ana", "you never listen", 100)).await;
    assert!(d.reasoning.starts_with("insufficient data"));
}

// ── Semantic detector ─────────────────────────────────────────────────────

#[tokio::test]
async fn semantic_timeout_fails_open_to_the_fast_detectors() {
    let plain = decide_last(&engine(), blame_exchange("r")).await;

    let engine = ModerationEngine::with_semantic(semantic_config(20), SlowClassifier).unwrap();
    let decision = decide_last(&engine, blame_exchange("r")).await;

    assert_eq!(decision.conflict_score, plain.conflict_score);
    assert_eq!(decision.should_intervene, plain.should_intervene);
    assert_eq!(decision.pattern, plain.pattern);

    let semantic = decision
        .signals
        .iter()
        .find(|s| s.kind == SignalKind::Semantic)
        .unwrap();
    assert_eq!(semantic.value, 0.0);
    assert_eq!(semantic.confidence, 0.0);
    assert_eq!(semantic.evidence, "timeout");
    assert_eq!(semantic.latency_ms, 20.0);

    assert_eq!(engine.metrics().detector_timeouts, 1);
    let degraded = engine.active_degradations();
    assert_eq!(degraded.len(), 1);
    assert_eq!(degraded[0].event.component, "semantic");
}

#[tokio::test]
async fn semantic_failure_fails_open() {
    let plain = decide_last(&engine(), blame_exchange("r")).await;
    let engine =
        ModerationEngine::with_semantic(ConcordConfig::default(), FailingClassifier).unwrap();
    let decision = decide_last(&engine, blame_exchange("r")).await;

    assert_eq!(decision.conflict_score, plain.conflict_score);
    assert_eq!(engine.metrics().detector_failures, 1);
    assert!(decision
        .signals
        .iter()
        .any(|s| s.evidence == "error: connection refused"));
}

#[tokio::test]
async fn confident_semantic_signal_raises_the_score() {
    let classifier = CountingClassifier::new(0.9, 0.9);
    let engine = ModerationEngine::with_semantic(ConcordConfig::default(), classifier).unwrap();
    let decision = decide_last(&engine, blame_exchange("r")).await;

    // (0.16425 + 0.9 * 0.3 * 0.9) / (0.375 + 0.3 * 0.9)
    assert!((decision.conflict_score - 0.6314).abs() < 1e-3);
    assert_eq!(engine.active_degradations().len(), 0);
}

#[tokio::test]
async fn early_decision_skips_the_semantic_call() {
    let engine = ModerationEngine::with_semantic(
        ConcordConfig::default(),
        CountingClassifier::new(0.0, 1.0),
    )
    .unwrap();
    let decision = decide_last(
        &engine,
        vec![
            msg("r", "ana", "morning", 0),
            msg("r", "bo", "hi there", 5),
            msg("r", "ana", "you idiot, you never listen, this is stupid!!", 10),
        ],
    )
    .await;

    assert!(decision.early_decision);
    assert!(decision.should_intervene);
    assert!(decision
        .signals
        .iter()
        .all(|s| s.kind != SignalKind::Semantic));
    assert_eq!(engine.metrics().early_decisions, 1);
}

#[tokio::test]
async fn strongly_cued_emotion_decides_early() {
    let classifier = CountingClassifier::new(0.0, 1.0);
    let engine = ModerationEngine::with_semantic(ConcordConfig::default(), classifier).unwrap();
    let decision = decide_last(
        &engine,
        vec![
            msg("r", "ana", "morning", 0),
            msg("r", "bo", "hi there", 5),
            msg("r", "ana", "I AM SO ANGRY!!", 10),
        ],
    )
    .await;

    let emotion = decision
        .signals
        .iter()
        .find(|s| s.kind == SignalKind::Emotion)
        .unwrap();
    assert!((emotion.value - 0.7).abs() < 1e-9);
    assert_eq!(emotion.confidence, 0.9);
    assert!(decision.early_decision);
    assert!(decision.reasoning.contains("early decision on emotion"));
    assert!(decision
        .signals
        .iter()
        .all(|s| s.kind != SignalKind::Semantic));
    assert_eq!(engine.metrics().early_decisions, 1);
}

#[tokio::test]
async fn disabled_semantic_is_never_called() {
    let mut config = ConcordConfig::default();
    config.semantic.enabled = false;
    let engine = ModerationEngine::with_semantic(config, CountingClassifier::new(1.0, 1.0)).unwrap();
    let decision = decide_last(&engine, blame_exchange("r")).await;
    assert!(decision
        .signals
        .iter()
        .all(|s| s.kind != SignalKind::Semantic));
}

// ── Cache ─────────────────────────────────────────────────────────────────

fn history_window() -> ConversationWindow {
    let mut w = ConversationWindow::new("r", 20);
    for m in blame_exchange("r").into_iter().take(3) {
        w.add_message(m, 0.2);
    }
    w
}

#[tokio::test]
async fn identical_context_hits_the_cache() {
    let engine = engine();
    let mut first = history_window();
    let mut second = history_window();

    let a = engine
        .process_with_window(msg("r", "bo", "you never listen", 45), &mut first)
        .await;
    let b = engine
        .process_with_window(msg("r", "bo", "you never listen", 45), &mut second)
        .await;

    assert_eq!(a, b);
    assert_eq!(second.len(), 4);
    assert_eq!(second.current_score(), 0.55);
    assert_eq!(engine.cache_hit_rate(), Some(0.5));
    let metrics = engine.metrics();
    assert_eq!((metrics.cache_hits, metrics.cache_misses), (1, 1));
}

#[tokio::test]
async fn cache_can_be_disabled() {
    let mut config = ConcordConfig::default();
    config.cache.enabled = false;
    let engine = ModerationEngine::new(config).unwrap();
    let mut w = history_window();
    engine
        .process_with_window(msg("r", "bo", "you never listen", 45), &mut w)
        .await;
    assert_eq!(engine.cache_hit_rate(), None);
    assert_eq!(engine.metrics().cache_misses, 0);
}

// ── Construction ──────────────────────────────────────────────────────────

#[test]
fn invalid_config_is_rejected_at_startup() {
    let mut config = ConcordConfig::default();
    config.window.capacity = 1;
    let err = ModerationEngine::new(config).err().unwrap();
    assert!(matches!(err, ConcordError::Config(_)));
}

#[test]
fn unrepresentable_durations_are_rejected_at_startup() {
    let mut config = ConcordConfig::default();
    config.window.history_horizon_secs = 10_000_000_000_000;
    assert!(matches!(
        ModerationEngine::new(config).err(),
        Some(ConcordError::Config(_))
    ));

    let mut config = ConcordConfig::default();
    config.throttle.cooldown_secs = i64::MAX;
    assert!(matches!(
        ModerationEngine::new(config).err(),
        Some(ConcordError::Config(_))
    ));
}

#[tokio::test]
async fn extra_detectors_are_fused() {
    let engine = engine().with_detector(Box::new(ConstantDetector));
    let decision = decide_last(&engine, blame_exchange("r")).await;
    assert!(decision.signals.iter().any(|s| s.kind == SignalKind::Other));
    // (0.16425 + 1.0 * 0.1 * 1.0) / (0.375 + 0.1)
    assert!((decision.conflict_score - 0.5563).abs() < 1e-3);
}

#[tokio::test]
async fn observe_does_not_count_as_processing() {
    let engine = engine();
    engine.observe(msg("r", "ana", "hello", 0)).await;
    assert_eq!(engine.metrics().messages_processed, 0);
    let room = engine.rooms().get("r").unwrap();
    assert_eq!(room.lock().await.window.len(), 1);
}
