//! Record every degradation event: component, failure mode, fallback used, timestamp, recovery status.

use std::collections::VecDeque;

use chrono::{DateTime, Duration, Utc};
use concord_core::models::DegradationEvent;
use serde::{Deserialize, Serialize};

/// Oldest events are dropped past this many.
const MAX_EVENTS: usize = 1_000;

/// Recovery status of a degradation event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecoveryStatus {
    /// Still in degraded mode.
    Active,
    /// Recovered to normal operation.
    Recovered,
}

/// A tracked degradation event with recovery status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackedDegradation {
    pub event: DegradationEvent,
    pub recovery_status: RecoveryStatus,
    pub recovered_at: Option<DateTime<Utc>>,
}

/// Tracks detector degradations so callers can tell a quiet room from a
/// room whose semantic detector keeps timing out.
#[derive(Debug, Clone, Default)]
pub struct DegradationTracker {
    events: VecDeque<TrackedDegradation>,
}

impl DegradationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new degradation event.
    pub fn record(&mut self, event: DegradationEvent) {
        crate::tracing_setup::events::detector_degraded(&event.component, &event.failure);
        if self.events.len() >= MAX_EVENTS {
            self.events.pop_front();
        }
        self.events.push_back(TrackedDegradation {
            event,
            recovery_status: RecoveryStatus::Active,
            recovered_at: None,
        });
    }

    /// Mark every active degradation of `component` as recovered.
    /// Returns whether anything changed.
    pub fn mark_recovered(&mut self, component: &str, at: DateTime<Utc>) -> bool {
        let mut changed = false;
        for tracked in self.events.iter_mut().filter(|t| {
            t.event.component == component && t.recovery_status == RecoveryStatus::Active
        }) {
            tracked.recovery_status = RecoveryStatus::Recovered;
            tracked.recovered_at = Some(at);
            changed = true;
        }
        if changed {
            tracing::info!(event = "detector_recovered", component = %component, "detector recovered");
        }
        changed
    }

    /// Retained events, oldest first.
    pub fn events(&self) -> impl Iterator<Item = &TrackedDegradation> {
        self.events.iter()
    }

    pub fn is_degraded(&self, component: &str) -> bool {
        self.events.iter().any(|t| {
            t.event.component == component && t.recovery_status == RecoveryStatus::Active
        })
    }

    /// Get active (unrecovered) degradations.
    pub fn active_degradations(&self) -> Vec<&TrackedDegradation> {
        self.events
            .iter()
            .filter(|t| t.recovery_status == RecoveryStatus::Active)
            .collect()
    }

    /// Events for `component` newer than `window` before `now`.
    pub fn count_recent(&self, component: &str, window: Duration, now: DateTime<Utc>) -> usize {
        let cutoff = now.checked_sub_signed(window).unwrap_or(DateTime::<Utc>::MIN_UTC);
        self.events
            .iter()
            .filter(|t| t.event.component == component && t.event.timestamp > cutoff)
            .count()
    }

    /// Duration a component has been continuously degraded, or None if not degraded.
    pub fn degraded_duration(&self, component: &str, now: DateTime<Utc>) -> Option<Duration> {
        let earliest = self
            .events
            .iter()
            .filter(|t| {
                t.event.component == component && t.recovery_status == RecoveryStatus::Active
            })
            .map(|t| t.event.timestamp)
            .min()?;
        Some(now - earliest)
    }
}
