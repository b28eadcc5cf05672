//! InterventionThrottle: cooldown plus a rolling-hour cap per room.
//!
//! READY -> (intervene) -> COOLDOWN -> READY. While cooling down, every
//! ready intervention is suppressed regardless of score. All times come
//! from message timestamps, so replays are deterministic.

use std::collections::VecDeque;

use chrono::{DateTime, Duration, Utc};

use concord_core::config::defaults::MAX_COOLDOWN_SECS;
use concord_core::config::ThrottleConfig;
use concord_core::models::ThrottleVerdict;

/// Coarse throttle state for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThrottleState {
    Ready,
    Cooldown,
}

#[derive(Debug, Clone)]
pub struct InterventionThrottle {
    cooldown: Duration,
    max_per_hour: u32,
    last_intervention: Option<DateTime<Utc>>,
    recent: VecDeque<DateTime<Utc>>,
}

impl InterventionThrottle {
    pub fn new(config: &ThrottleConfig) -> Self {
        Self {
            cooldown: Duration::seconds(config.cooldown_secs.clamp(0, MAX_COOLDOWN_SECS)),
            max_per_hour: config.max_per_hour,
            last_intervention: None,
            recent: VecDeque::new(),
        }
    }

    /// Would an intervention at `now` be allowed? Prunes the hourly log.
    pub fn check(&mut self, now: DateTime<Utc>) -> ThrottleVerdict {
        if let Some(ready_at) = self.ready_at() {
            if now < ready_at {
                let remaining = (ready_at - now).num_seconds().max(1);
                return ThrottleVerdict::Cooldown {
                    remaining_secs: remaining,
                };
            }
        }
        self.prune(now);
        if self.recent.len() as u32 >= self.max_per_hour {
            return ThrottleVerdict::HourlyCapReached {
                count: self.recent.len() as u32,
            };
        }
        ThrottleVerdict::Allowed
    }

    /// Check and, if allowed, record the intervention in one step.
    pub fn try_acquire(&mut self, now: DateTime<Utc>) -> ThrottleVerdict {
        let verdict = self.check(now);
        if verdict.is_allowed() {
            self.record(now);
        }
        verdict
    }

    /// Record an intervention. The last-intervention time never moves backwards.
    pub fn record(&mut self, at: DateTime<Utc>) {
        self.last_intervention = Some(match self.last_intervention {
            Some(last) if last > at => last,
            _ => at,
        });
        self.recent.push_back(at);
    }

    pub fn state(&self, now: DateTime<Utc>) -> ThrottleState {
        match self.ready_at() {
            Some(ready_at) if now < ready_at => ThrottleState::Cooldown,
            _ => ThrottleState::Ready,
        }
    }

    /// Interventions within the hour before `now`.
    pub fn recent_count(&self, now: DateTime<Utc>) -> usize {
        let cutoff = hour_before(now);
        self.recent.iter().filter(|t| **t > cutoff).count()
    }

    pub fn last_intervention(&self) -> Option<DateTime<Utc>> {
        self.last_intervention
    }

    /// End of the current cooldown. Saturates at the latest representable time.
    fn ready_at(&self) -> Option<DateTime<Utc>> {
        self.last_intervention.map(|last| {
            last.checked_add_signed(self.cooldown)
                .unwrap_or(DateTime::<Utc>::MAX_UTC)
        })
    }

    fn prune(&mut self, now: DateTime<Utc>) {
        let cutoff = hour_before(now);
        while self.recent.front().is_some_and(|t| *t <= cutoff) {
            self.recent.pop_front();
        }
    }
}

impl Default for InterventionThrottle {
    fn default() -> Self {
        Self::new(&ThrottleConfig::default())
    }
}

fn hour_before(now: DateTime<Utc>) -> DateTime<Utc> {
    now.checked_sub_signed(Duration::hours(1))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}
