//! Lock-free counters updated on every processed message.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

use concord_core::models::SignalKind;
use serde::{Deserialize, Serialize};

const KINDS: [SignalKind; 5] = [
    SignalKind::Keyword,
    SignalKind::Emotion,
    SignalKind::TurnTaking,
    SignalKind::Semantic,
    SignalKind::Other,
];

fn slot(kind: SignalKind) -> usize {
    match kind {
        SignalKind::Keyword => 0,
        SignalKind::Emotion => 1,
        SignalKind::TurnTaking => 2,
        SignalKind::Semantic => 3,
        SignalKind::Other => 4,
    }
}

#[derive(Debug, Default)]
struct LatencySlot {
    total_us: AtomicU64,
    samples: AtomicU64,
}

/// Shared counters for one engine. All updates are relaxed increments.
#[derive(Debug, Default)]
pub struct PipelineMetrics {
    messages_processed: AtomicU64,
    interventions_fired: AtomicU64,
    interventions_suppressed: AtomicU64,
    early_decisions: AtomicU64,
    detector_timeouts: AtomicU64,
    detector_failures: AtomicU64,
    cache_hits: AtomicU64,
    cache_misses: AtomicU64,
    latency: [LatencySlot; 5],
}

/// Point-in-time copy of [`PipelineMetrics`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub messages_processed: u64,
    pub interventions_fired: u64,
    pub interventions_suppressed: u64,
    pub early_decisions: u64,
    pub detector_timeouts: u64,
    pub detector_failures: u64,
    pub cache_hits: u64,
    pub cache_misses: u64,
    /// Mean latency per detector kind, only for kinds that ran.
    pub avg_latency_ms: BTreeMap<String, f64>,
}

impl MetricsSnapshot {
    pub fn cache_hit_rate(&self) -> f64 {
        let total = self.cache_hits + self.cache_misses;
        if total == 0 {
            return 0.0;
        }
        self.cache_hits as f64 / total as f64
    }
}

impl PipelineMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_message(&self) {
        self.messages_processed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_intervention(&self) {
        self.interventions_fired.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_suppressed(&self) {
        self.interventions_suppressed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_early_decision(&self) {
        self.early_decisions.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_timeout(&self) {
        self.detector_timeouts.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_failure(&self) {
        self.detector_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_cache(&self, hit: bool) {
        let counter = if hit { &self.cache_hits } else { &self.cache_misses };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_latency(&self, kind: SignalKind, latency_ms: f64) {
        let slot = &self.latency[slot(kind)];
        let us = (latency_ms.max(0.0) * 1_000.0).round() as u64;
        slot.total_us.fetch_add(us, Ordering::Relaxed);
        slot.samples.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        let avg_latency_ms = KINDS
            .iter()
            .filter_map(|&kind| {
                let slot = &self.latency[slot(kind)];
                let samples = slot.samples.load(Ordering::Relaxed);
                (samples > 0).then(|| {
                    let avg = slot.total_us.load(Ordering::Relaxed) as f64 / samples as f64 / 1_000.0;
                    (kind.as_str().to_string(), avg)
                })
            })
            .collect();
        MetricsSnapshot {
            messages_processed: self.messages_processed.load(Ordering::Relaxed),
            interventions_fired: self.interventions_fired.load(Ordering::Relaxed),
            interventions_suppressed: self.interventions_suppressed.load(Ordering::Relaxed),
            early_decisions: self.early_decisions.load(Ordering::Relaxed),
            detector_timeouts: self.detector_timeouts.load(Ordering::Relaxed),
            detector_failures: self.detector_failures.load(Ordering::Relaxed),
            cache_hits: self.cache_hits.load(Ordering::Relaxed),
            cache_misses: self.cache_misses.load(Ordering::Relaxed),
            avg_latency_ms,
        }
    }

    /// Zero every counter.
    pub fn reset(&self) {
        for counter in [
            &self.messages_processed,
            &self.interventions_fired,
            &self.interventions_suppressed,
            &self.early_decisions,
            &self.detector_timeouts,
            &self.detector_failures,
            &self.cache_hits,
            &self.cache_misses,
        ] {
            counter.store(0, Ordering::Relaxed);
        }
        for slot in &self.latency {
            slot.total_us.store(0, Ordering::Relaxed);
            slot.samples.store(0, Ordering::Relaxed);
        }
    }
}
