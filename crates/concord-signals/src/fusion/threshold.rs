//! Dynamic intervention threshold.

use concord_core::config::ThresholdConfig;
use concord_core::models::ConflictPattern;

/// Room conditions that move the threshold.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ThresholdContext {
    pub trend: f64,
    pub breakdown: f64,
    pub pattern: Option<ConflictPattern>,
    pub deadline_pressure: bool,
    pub recent_interventions: usize,
}

/// Base threshold lowered for rising, broken-down, high-severity, or
/// deadline-pressured rooms, optionally raised by recent interventions,
/// and never below the floor.
pub fn dynamic_threshold(config: &ThresholdConfig, ctx: &ThresholdContext) -> f64 {
    let mut threshold = config.base;
    let rising = ctx.trend > config.rising_trend;
    if rising {
        threshold -= config.trend_drop;
    }
    if ctx.breakdown >= config.breakdown_cutoff {
        threshold -= config.breakdown_drop;
    }
    if ctx.pattern.is_some_and(|p| p.is_high_severity()) {
        threshold -= config.severity_drop;
    }
    let deadline = ctx.deadline_pressure || ctx.pattern == Some(ConflictPattern::DeadlinePressure);
    if deadline && rising {
        threshold -= config.deadline_drop;
    }
    threshold += ctx.recent_interventions as f64 * config.recent_intervention_penalty;
    threshold.clamp(config.floor, 1.0)
}
