/// Lowest urgency level a decision can carry.
pub const MIN_URGENCY: u8 = 1;

/// Highest urgency level a decision can carry.
pub const MAX_URGENCY: u8 = 5;

/// Gain applied to the least-squares slope of the emotion trajectory.
pub const TREND_GAIN: f64 = 5.0;

/// Minimum trajectory points before a trend is computed.
pub const MIN_TREND_POINTS: usize = 3;

/// Number of trailing messages the pattern classifier inspects.
pub const CLASSIFIER_LOOKBACK: usize = 5;

/// Evidence string carried by a semantic signal that ran out of time.
pub const TIMEOUT_EVIDENCE: &str = "timeout";

/// Clamp any score-like value into `[0, 1]`. NaN collapses to 0.
pub fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Clamp an integer urgency into `[MIN_URGENCY, MAX_URGENCY]`.
pub fn clamp_urgency(level: i64) -> u8 {
    level.clamp(MIN_URGENCY as i64, MAX_URGENCY as i64) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_unit_handles_nan_and_bounds() {
        assert_eq!(clamp_unit(f64::NAN), 0.0);
        assert_eq!(clamp_unit(-0.4), 0.0);
        assert_eq!(clamp_unit(1.7), 1.0);
        assert_eq!(clamp_unit(0.42), 0.42);
    }

    #[test]
    fn clamp_urgency_bounds() {
        assert_eq!(clamp_urgency(-3), 1);
        assert_eq!(clamp_urgency(0), 1);
        assert_eq!(clamp_urgency(3), 3);
        assert_eq!(clamp_urgency(9), 5);
    }
}
