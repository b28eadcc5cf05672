use concord_core::config::ConcordConfig;
use concord_core::constants::{clamp_unit, clamp_urgency};
use concord_core::{FusedDecision, Signal, SignalKind};
use proptest::prelude::*;

proptest! {
    #[test]
    fn base_threshold_in_unit_range_validates(base in 0.15f64..=1.0) {
        let mut config = ConcordConfig::default();
        config.threshold.base = base;
        prop_assert!(ConcordConfig::validate(&config).is_ok());
    }

    #[test]
    fn base_threshold_outside_unit_range_fails(base in 1.0001f64..100.0) {
        let mut config = ConcordConfig::default();
        config.threshold.base = base;
        prop_assert!(ConcordConfig::validate(&config).is_err());
    }

    #[test]
    fn signal_fields_always_clamped(value in -10.0f64..10.0, confidence in -10.0f64..10.0) {
        let s = Signal::new(SignalKind::Keyword, value, confidence, "x");
        prop_assert!((0.0..=1.0).contains(&s.value));
        prop_assert!((0.0..=1.0).contains(&s.confidence));
    }

    #[test]
    fn decision_fields_always_clamped(score in -5.0f64..5.0, urgency in -100i64..100) {
        let d = FusedDecision::new(score, urgency, 0.35);
        prop_assert!((0.0..=1.0).contains(&d.conflict_score));
        prop_assert!((1..=5).contains(&d.urgency_level));
    }

    #[test]
    fn clamp_helpers_are_idempotent(x in -5.0f64..5.0, n in -50i64..50) {
        prop_assert_eq!(clamp_unit(clamp_unit(x)), clamp_unit(x));
        prop_assert_eq!(clamp_urgency(clamp_urgency(n) as i64), clamp_urgency(n));
    }
}
