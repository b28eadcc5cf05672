//! [`ModerationEngine`] owns the detectors, fusion, classifier, selector,
//! room registry, decision cache, metrics, and degradation tracker.

use std::sync::Mutex;

use chrono::{DateTime, Utc};
use tracing::Instrument;

use concord_core::config::ConcordConfig;
use concord_core::constants::MIN_URGENCY;
use concord_core::errors::{ConcordResult, DetectionError};
use concord_core::models::{DegradationEvent, FusedDecision, Message, Signal, SignalKind};
use concord_core::traits::{ISemanticClassifier, NoSemanticClassifier};
use concord_observability::tracing_setup::events;
use concord_observability::{
    classify_span, detector_span, fusion_span, process_span, DegradationTracker,
    MetricsSnapshot, PipelineMetrics, TrackedDegradation,
};
use concord_session::{analyze, ConversationWindow, RoomRegistry, RoomSession};
use concord_signals::{
    run_detector, DetectorOutcome, EmotionDetector, ISignalDetector, KeywordDetector,
    SemanticDetector, SignalFusion, ThresholdContext, TurnTakingDetector,
};
use concord_strategy::{PatternClassifier, StrategySelector};

use crate::cache::{CachedDecision, DecisionCache};

/// Fallback recorded for every absorbed detector error.
const ZERO_SIGNAL_FALLBACK: &str = "zero signal";

/// The moderation pipeline.
///
/// `S` is the optional semantic classifier. Engines built with
/// [`ModerationEngine::new`] have none and fuse the fast detectors only.
pub struct ModerationEngine<S: ISemanticClassifier = NoSemanticClassifier> {
    config: ConcordConfig,
    keyword: KeywordDetector,
    emotion: EmotionDetector,
    turn_taking: TurnTakingDetector,
    extra: Vec<Box<dyn ISignalDetector>>,
    semantic: Option<SemanticDetector<S>>,
    fusion: SignalFusion,
    classifier: PatternClassifier,
    selector: StrategySelector,
    rooms: RoomRegistry,
    cache: Option<DecisionCache>,
    metrics: PipelineMetrics,
    degradation: Mutex<DegradationTracker>,
}

impl ModerationEngine {
    /// Engine without a semantic classifier. Fails on invalid config.
    pub fn new(config: ConcordConfig) -> ConcordResult<Self> {
        Self::build(config, None)
    }
}

impl<S: ISemanticClassifier> ModerationEngine<S> {
    /// Engine with a semantic classifier, used unless `semantic.enabled` is off.
    pub fn with_semantic(config: ConcordConfig, classifier: S) -> ConcordResult<Self> {
        Self::build(config, Some(classifier))
    }

    fn build(config: ConcordConfig, classifier: Option<S>) -> ConcordResult<Self> {
        ConcordConfig::validate(&config)?;
        let semantic = classifier
            .filter(|_| config.semantic.enabled)
            .map(|c| SemanticDetector::new(c, &config.semantic));
        let cache = config
            .cache
            .enabled
            .then(|| DecisionCache::new(&config.cache));
        tracing::info!(
            semantic = semantic.is_some(),
            cache = cache.is_some(),
            "moderation engine ready"
        );
        Ok(Self {
            keyword: KeywordDetector::new(config.keyword.clone()),
            emotion: EmotionDetector::new(config.emotion.clone()),
            turn_taking: TurnTakingDetector::new(config.turn_taking.clone()),
            extra: Vec::new(),
            semantic,
            fusion: SignalFusion::new(config.fusion.clone(), config.threshold.clone()),
            classifier: PatternClassifier::new(),
            selector: StrategySelector::new(&config.strategy),
            rooms: RoomRegistry::new(config.window.clone(), config.throttle.clone()),
            cache,
            metrics: PipelineMetrics::new(),
            degradation: Mutex::new(DegradationTracker::new()),
            config,
        })
    }

    /// Add a caller-supplied detector. It runs with the built-in fast
    /// detectors on every message and is fused under its kind's weight.
    pub fn with_detector(mut self, detector: Box<dyn ISignalDetector>) -> Self {
        self.extra.push(detector);
        self
    }

    pub fn config(&self) -> &ConcordConfig {
        &self.config
    }

    pub fn rooms(&self) -> &RoomRegistry {
        &self.rooms
    }

    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    /// `None` when the cache is disabled.
    pub fn cache_hit_rate(&self) -> Option<f64> {
        self.cache.as_ref().map(DecisionCache::hit_rate)
    }

    /// Detectors currently running on the zero-signal fallback.
    pub fn active_degradations(&self) -> Vec<TrackedDegradation> {
        self.degradation
            .lock()
            .map(|t| t.active_degradations().into_iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Destroy a room's window, throttle, and lock.
    pub fn close_room(&self, room_id: &str) -> bool {
        self.rooms.close_room(room_id)
    }

    // ── Entry points ────────────────────────────────────────────────────────

    /// Score one message in its room and gate the result through the room's
    /// throttle. Messages for the same room are serialized; different rooms
    /// run concurrently.
    pub async fn process(&self, message: Message) -> FusedDecision {
        let room = self.rooms.room(&message.room_id);
        let mut session = room.lock().await;
        self.process_session(message, &mut session).await
    }

    /// [`process`](Self::process) against caller-owned room state.
    pub async fn process_session(
        &self,
        message: Message,
        session: &mut RoomSession,
    ) -> FusedDecision {
        let span = process_span!(message.room_id, message.author);
        async move {
            let now = message.timestamp;
            let room_id = message.room_id.clone();
            self.metrics.record_message();
            session.messages_processed += 1;

            let recent = session.throttle.recent_count(now);
            let mut decision = self.evaluate(message, &mut session.window, recent).await;
            self.gate(&room_id, now, &mut decision, session);
            decision
        }
        .instrument(span)
        .await
    }

    /// Pre-throttle decision for a caller-owned window. The message is
    /// recorded in `window` whatever the outcome.
    pub async fn process_with_window(
        &self,
        message: Message,
        window: &mut ConversationWindow,
    ) -> FusedDecision {
        self.metrics.record_message();
        self.evaluate(message, window, 0).await
    }

    /// Record a message in its room without deciding anything.
    pub async fn observe(&self, message: Message) {
        let room = self.rooms.room(&message.room_id);
        let mut session = room.lock().await;
        let outcomes = [
            self.run_tracked(&self.keyword, &message, &session.window),
            self.run_tracked(&self.emotion, &message, &session.window),
        ];
        session.window.add_message(message, trajectory_of(&outcomes));
    }

    // ── Pipeline ────────────────────────────────────────────────────────────

    async fn evaluate(
        &self,
        message: Message,
        window: &mut ConversationWindow,
        recent_interventions: usize,
    ) -> FusedDecision {
        let key = self
            .cache
            .as_ref()
            .map(|c| c.key_for(window, &message, recent_interventions));
        if let (Some(cache), Some(key)) = (&self.cache, key.as_deref()) {
            let hit = cache.get(key);
            self.metrics.record_cache(hit.is_some());
            if let Some(hit) = hit {
                events::cache_hit(&message.room_id);
                window.add_message(message, hit.trajectory);
                return hit.decision;
            }
        }

        let at = message.timestamp;
        let mut outcomes = self.run_fast_detectors(&message, window);
        let trajectory = trajectory_of(&outcomes);

        let required = self.config.window.min_messages;
        let available = window.len() + 1;
        if available < required {
            events::insufficient_context(&message.room_id, required, available);
            window.add_message(message, trajectory);
            return insufficient(required, available, outcomes);
        }

        let fast: Vec<Signal> = outcomes.iter().map(|o| o.signal.clone()).collect();
        let early = self
            .fusion
            .early_decision(&fast)
            .map(|s| (s.kind, s.value, s.confidence));
        match (early, &self.semantic) {
            (Some((kind, value, confidence)), _) => {
                self.metrics.record_early_decision();
                events::early_decision(&message.room_id, kind.as_str(), value, confidence);
            }
            (None, Some(semantic)) => {
                let outcome = semantic
                    .detect_or_fallback(&message, window)
                    .instrument(detector_span!(SignalKind::Semantic))
                    .await;
                self.track(&outcome, at);
                outcomes.push(outcome);
            }
            (None, None) => {}
        }

        window.add_message(message, trajectory);
        let decision = self.decide(window, outcomes, recent_interventions);
        if let (Some(cache), Some(key)) = (&self.cache, key) {
            cache.insert(
                key,
                CachedDecision {
                    decision: decision.clone(),
                    trajectory,
                },
            );
        }
        decision
    }

    fn run_fast_detectors(
        &self,
        message: &Message,
        window: &ConversationWindow,
    ) -> Vec<DetectorOutcome> {
        let builtin: [&dyn ISignalDetector; 3] = [&self.keyword, &self.emotion, &self.turn_taking];
        let mut outcomes = Vec::with_capacity(builtin.len() + self.extra.len());
        for detector in builtin {
            outcomes.push(self.run_tracked(detector, message, window));
        }
        for detector in &self.extra {
            outcomes.push(self.run_tracked(detector.as_ref(), message, window));
        }
        outcomes
    }

    fn run_tracked(
        &self,
        detector: &dyn ISignalDetector,
        message: &Message,
        window: &ConversationWindow,
    ) -> DetectorOutcome {
        let outcome = {
            let _span = detector_span!(detector.kind()).entered();
            run_detector(detector, message, window)
        };
        self.track(&outcome, message.timestamp);
        outcome
    }

    /// Classify, analyze, and fuse over the window that now holds the message.
    fn decide(
        &self,
        window: &ConversationWindow,
        outcomes: Vec<DetectorOutcome>,
        recent_interventions: usize,
    ) -> FusedDecision {
        let matched = {
            let _span = classify_span!(window.len()).entered();
            self.classifier.detect(window)
        };
        let pattern = matched.as_ref().map(|m| m.pattern);
        let analysis = analyze(window, self.config.window.trend_window);
        let ctx = ThresholdContext {
            trend: analysis.trend,
            breakdown: window.breakdown_score(),
            pattern,
            deadline_pressure: analysis.deadline_pressure,
            recent_interventions,
        };

        let signals: Vec<Signal> = outcomes.into_iter().map(|o| o.signal).collect();
        let mut decision = {
            let _span = fusion_span!(signals.len()).entered();
            self.fusion.fuse_with_context(signals, &ctx)
        };

        decision.pattern = pattern;
        let urgency = [
            decision.urgency_level,
            analysis.escalation_level,
            pattern.map_or(MIN_URGENCY, |p| p.default_urgency()),
        ]
        .into_iter()
        .max()
        .unwrap_or(MIN_URGENCY);
        decision.set_urgency(i64::from(urgency));
        decision.strategy =
            self.selector
                .select(pattern, decision.urgency_level, decision.conflict_score);

        if let Some(m) = &matched {
            decision
                .reasoning
                .push_str(&format!("; pattern {} ({})", m.pattern, m.evidence));
        }
        decision.reasoning.push_str(&format!(
            "; {} at urgency {} ({})",
            decision.strategy, decision.urgency_level, analysis.recommendation
        ));
        decision
    }

    fn gate(
        &self,
        room_id: &str,
        now: DateTime<Utc>,
        decision: &mut FusedDecision,
        session: &mut RoomSession,
    ) {
        if !decision.should_intervene {
            return;
        }
        let verdict = session.throttle.try_acquire(now);
        decision.apply_throttle(verdict);
        if decision.should_intervene {
            session.interventions += 1;
            self.metrics.record_intervention();
            events::intervention_fired(room_id, decision);
        } else {
            self.metrics.record_suppressed();
            events::intervention_suppressed(room_id, decision.conflict_score, &verdict.to_string());
        }
    }

    /// Latency, failure counters, and degradation state for one outcome.
    fn track(&self, outcome: &DetectorOutcome, at: DateTime<Utc>) {
        let kind = outcome.signal.kind;
        self.metrics.record_latency(kind, outcome.signal.latency_ms);
        match &outcome.error {
            Some(DetectionError::Timeout { .. }) => self.metrics.record_timeout(),
            Some(DetectionError::Failure { .. }) => self.metrics.record_failure(),
            Some(DetectionError::InsufficientContext { .. }) | None => {}
        }
        let Ok(mut tracker) = self.degradation.lock() else {
            return;
        };
        match &outcome.error {
            Some(error @ (DetectionError::Timeout { .. } | DetectionError::Failure { .. })) => {
                tracker.record(DegradationEvent {
                    component: kind.as_str().to_string(),
                    failure: error.to_string(),
                    fallback_used: ZERO_SIGNAL_FALLBACK.to_string(),
                    timestamp: at,
                });
            }
            Some(DetectionError::InsufficientContext { .. }) => {}
            None => {
                tracker.mark_recovered(kind.as_str(), at);
            }
        }
    }
}

/// Score recorded in the room's trajectory: the stronger of the keyword
/// and emotion readings.
fn trajectory_of(outcomes: &[DetectorOutcome]) -> f64 {
    outcomes
        .iter()
        .filter(|o| matches!(o.signal.kind, SignalKind::Keyword | SignalKind::Emotion))
        .map(|o| o.signal.value)
        .fold(0.0, f64::max)
}

fn insufficient(
    required: usize,
    available: usize,
    outcomes: Vec<DetectorOutcome>,
) -> FusedDecision {
    let error = DetectionError::InsufficientContext {
        required,
        available,
    };
    let mut decision = FusedDecision::silent(format!("{} ({error})", error.evidence()));
    decision.signals = outcomes.into_iter().map(|o| o.signal).collect();
    decision
}
