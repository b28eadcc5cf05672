//! Structured log events for pipeline outcomes.
//!
//! Each function emits a `tracing` event with structured fields.

use concord_core::models::FusedDecision;

/// An intervention passed the throttle.
pub fn intervention_fired(room_id: &str, decision: &FusedDecision) {
    tracing::info!(
        event = "intervention_fired",
        room_id = %room_id,
        score = decision.conflict_score,
        threshold = decision.threshold,
        urgency = decision.urgency_level,
        strategy = %decision.strategy,
        pattern = ?decision.pattern,
        "intervention fired"
    );
}

/// An intervention was warranted but the throttle held it back.
pub fn intervention_suppressed(room_id: &str, score: f64, reason: &str) {
    tracing::info!(
        event = "intervention_suppressed",
        room_id = %room_id,
        score = score,
        reason = %reason,
        "intervention suppressed"
    );
}

/// A detector failed or timed out and contributed a zero signal.
pub fn detector_degraded(detector: &str, failure: &str) {
    tracing::warn!(
        event = "detector_degraded",
        detector = %detector,
        failure = %failure,
        "detector degraded, using zero signal"
    );
}

/// A high-confidence signal settled the decision without fusion.
pub fn early_decision(room_id: &str, detector: &str, value: f64, confidence: f64) {
    tracing::debug!(
        event = "early_decision",
        room_id = %room_id,
        detector = %detector,
        value = value,
        confidence = confidence,
        "early decision"
    );
}

pub fn cache_hit(room_id: &str) {
    tracing::debug!(event = "cache_hit", room_id = %room_id, "decision cache hit");
}

/// The room has too little history to judge.
pub fn insufficient_context(room_id: &str, required: usize, available: usize) {
    tracing::debug!(
        event = "insufficient_context",
        room_id = %room_id,
        required = required,
        available = available,
        "insufficient context"
    );
}
