//! Trend-aware context analysis over a room's trajectory.
//!
//! Escalation level starts at 1 and climbs with the current score
//! (>0.3, >0.5, >0.7), a rising trend, and an escalating or deadline
//! pattern. Urgency blends the current score, trend, and level.

use concord_core::constants::{clamp_unit, clamp_urgency, CLASSIFIER_LOOKBACK};
use concord_core::lexicon::{count_matches, DEADLINE_RE};
use concord_core::models::{ContextAnalysis, Recommendation};

use crate::window::ConversationWindow;

/// Trend above which the level gets an extra step.
const RISING_TREND: f64 = 0.3;

/// Deadline keyword hits (across recent turns) that count as pressure.
const DEADLINE_HITS: usize = 2;

/// Analyze the room. Needs at least two messages.
pub fn analyze(window: &ConversationWindow, trend_window: usize) -> ContextAnalysis {
    if window.len() < 2 {
        return ContextAnalysis::insufficient();
    }

    let current = window.current_score();
    let trend = window.trend(trend_window);
    let escalating = window.is_escalating();
    let deadline_pressure = has_deadline_pressure(window);

    let mut level: i64 = 1;
    if current > 0.7 {
        level = 4;
    } else if current > 0.5 {
        level = 3;
    } else if current > 0.3 {
        level = 2;
    }
    if trend > RISING_TREND {
        level += 1;
    }
    if escalating || deadline_pressure {
        level += 1;
    }
    let escalation_level = clamp_urgency(level);

    let mut urgency =
        current * 0.4 + trend * 0.4 + (escalation_level as f64 - 1.0) * 0.1;
    if escalating {
        urgency += 0.2;
    } else if deadline_pressure {
        urgency += 0.15;
    }
    let urgency = clamp_unit(urgency);

    ContextAnalysis {
        escalation_level,
        urgency,
        trend,
        current_score: current,
        escalating,
        deadline_pressure,
        recommendation: Recommendation::from_urgency(urgency),
    }
}

/// Two or more deadline markers across the classifier lookback.
pub fn has_deadline_pressure(window: &ConversationWindow) -> bool {
    window
        .recent(CLASSIFIER_LOOKBACK)
        .iter()
        .map(|m| count_matches(&DEADLINE_RE, &m.content))
        .sum::<usize>()
        >= DEADLINE_HITS
}
