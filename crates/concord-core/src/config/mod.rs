//! Configuration for the moderation pipeline.
//!
//! One struct per subsystem, all `#[serde(default)]`, so a partial TOML file
//! only needs the values it changes:
//!
//! ```
//! use concord_core::config::ConcordConfig;
//!
//! let config = ConcordConfig::from_toml(
//!     r#"
//!     [throttle]
//!     cooldown_secs = 45
//!
//!     [threshold]
//!     base = 0.4
//!     "#,
//! )
//! .unwrap();
//! assert_eq!(config.throttle.cooldown_secs, 45);
//! assert_eq!(config.throttle.max_per_hour, 6);
//! assert!(ConcordConfig::validate(&config).is_ok());
//! ```

pub mod defaults;
pub mod detector_config;
pub mod fusion_config;
pub mod strategy_config;
pub mod throttle_config;
pub mod window_config;

pub use detector_config::{EmotionConfig, KeywordConfig, SemanticConfig, TurnTakingConfig};
pub use fusion_config::{FusionConfig, ThresholdConfig};
pub use strategy_config::{StrategyConfig, StrategyOverride};
pub use throttle_config::{CacheConfig, ThrottleConfig};
pub use window_config::WindowConfig;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Top-level configuration aggregating all subsystem configs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConcordConfig {
    pub window: WindowConfig,
    pub keyword: KeywordConfig,
    pub emotion: EmotionConfig,
    pub turn_taking: TurnTakingConfig,
    pub semantic: SemanticConfig,
    pub fusion: FusionConfig,
    pub threshold: ThresholdConfig,
    pub strategy: StrategyConfig,
    pub throttle: ThrottleConfig,
    pub cache: CacheConfig,
}

impl ConcordConfig {
    /// Load from a TOML file, apply `CONCORD_*` environment overrides, validate.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;
        let mut config: ConcordConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
        config.apply_env_overrides();
        Self::validate(&config)?;
        Ok(config)
    }

    /// Parse a TOML string without env overrides or validation.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Environment overrides. Unparsable values are ignored.
    pub fn apply_env_overrides(&mut self) {
        if let Some(v) = env_parse::<f64>("CONCORD_BASE_THRESHOLD") {
            self.threshold.base = v;
        }
        if let Some(v) = env_parse::<i64>("CONCORD_COOLDOWN_SECS") {
            self.throttle.cooldown_secs = v;
        }
        if let Some(v) = env_parse::<u32>("CONCORD_MAX_PER_HOUR") {
            self.throttle.max_per_hour = v;
        }
        if let Some(v) = env_parse::<u64>("CONCORD_SEMANTIC_TIMEOUT_MS") {
            self.semantic.timeout_ms = v;
        }
    }

    /// Validate every tunable. Any failure is fatal at startup.
    pub fn validate(config: &ConcordConfig) -> Result<(), ConfigError> {
        let window = &config.window;
        if !(3..=500).contains(&window.capacity) {
            return Err(ConfigError::invalid(
                "window.capacity",
                "must be between 3 and 500",
            ));
        }
        if window.trend_window < 2 {
            return Err(ConfigError::invalid("window.trend_window", "must be at least 2"));
        }
        if window.min_messages == 0 || window.min_messages > window.capacity {
            return Err(ConfigError::invalid(
                "window.min_messages",
                "must be between 1 and window.capacity",
            ));
        }
        if !(1..=defaults::MAX_HISTORY_HORIZON_SECS).contains(&window.history_horizon_secs) {
            return Err(ConfigError::invalid(
                "window.history_horizon_secs",
                format!(
                    "must be between 1 and {} (one week)",
                    defaults::MAX_HISTORY_HORIZON_SECS
                ),
            ));
        }

        let k = &config.keyword;
        check_unit_fields(&[
            ("keyword.severe_weight", k.severe_weight),
            ("keyword.moderate_weight", k.moderate_weight),
            ("keyword.mild_weight", k.mild_weight),
            ("keyword.blame_weight", k.blame_weight),
            ("keyword.emotion_weight", k.emotion_weight),
            ("keyword.intensity_weight", k.intensity_weight),
            ("keyword.category_cap", k.category_cap),
            ("keyword.severe_cap", k.severe_cap),
            ("keyword.confidence_cutoff", k.confidence_cutoff),
            ("keyword.high_confidence", k.high_confidence),
            ("keyword.low_confidence", k.low_confidence),
        ])?;

        let e = &config.emotion;
        check_unit_fields(&[
            ("emotion.anger_weight", e.anger_weight),
            ("emotion.frustration_weight", e.frustration_weight),
            ("emotion.defensive_weight", e.defensive_weight),
            ("emotion.absolute_weight", e.absolute_weight),
            ("emotion.exclamation_weight", e.exclamation_weight),
            (
                "emotion.repeated_punctuation_weight",
                e.repeated_punctuation_weight,
            ),
            ("emotion.caps_weight", e.caps_weight),
            ("emotion.caps_ratio", e.caps_ratio),
            ("emotion.confidence", e.confidence),
            ("emotion.strong_confidence", e.strong_confidence),
        ])?;
        if e.strong_cues == 0 {
            return Err(ConfigError::invalid("emotion.strong_cues", "must be at least 1"));
        }

        let t = &config.turn_taking;
        check_unit_fields(&[
            ("turn_taking.dominance_fraction", t.dominance_fraction),
            ("turn_taking.gender_fraction", t.gender_fraction),
            ("turn_taking.confidence", t.confidence),
            ("turn_taking.idle_confidence", t.idle_confidence),
        ])?;
        if t.lookback < 2 {
            return Err(ConfigError::invalid("turn_taking.lookback", "must be at least 2"));
        }
        if t.consecutive_run < 2 {
            return Err(ConfigError::invalid(
                "turn_taking.consecutive_run",
                "must be at least 2",
            ));
        }

        if config.semantic.timeout_ms == 0 {
            return Err(ConfigError::invalid(
                "semantic.timeout_ms",
                "must be greater than 0",
            ));
        }

        let f = &config.fusion;
        check_unit_fields(&[
            ("fusion.keyword_weight", f.keyword_weight),
            ("fusion.emotion_weight", f.emotion_weight),
            ("fusion.turn_taking_weight", f.turn_taking_weight),
            ("fusion.semantic_weight", f.semantic_weight),
            ("fusion.other_weight", f.other_weight),
            ("fusion.confidence_floor", f.confidence_floor),
            ("fusion.early_confidence", f.early_confidence),
            ("fusion.early_behavioral_value", f.early_behavioral_value),
            ("fusion.early_keyword_value", f.early_keyword_value),
        ])?;
        let sum = f.core_weight_sum();
        if !(0.9..=1.1).contains(&sum) {
            return Err(ConfigError::invalid(
                "fusion",
                format!("keyword + behavioral + semantic weights must sum to ~1.0, got {sum:.2}"),
            ));
        }

        let th = &config.threshold;
        check_unit_fields(&[
            ("threshold.base", th.base),
            ("threshold.floor", th.floor),
            ("threshold.rising_trend", th.rising_trend),
            ("threshold.trend_drop", th.trend_drop),
            ("threshold.breakdown_drop", th.breakdown_drop),
            ("threshold.severity_drop", th.severity_drop),
            ("threshold.deadline_drop", th.deadline_drop),
            ("threshold.breakdown_cutoff", th.breakdown_cutoff),
            (
                "threshold.recent_intervention_penalty",
                th.recent_intervention_penalty,
            ),
        ])?;
        if th.floor > th.base {
            return Err(ConfigError::invalid(
                "threshold.floor",
                "must not exceed threshold.base",
            ));
        }

        let s = &config.strategy;
        check_unit_fields(&[
            ("strategy.high_intensity", s.high_intensity),
            ("strategy.low_intensity", s.low_intensity),
        ])?;
        if s.low_intensity >= s.high_intensity {
            return Err(ConfigError::invalid(
                "strategy.low_intensity",
                "must be below strategy.high_intensity",
            ));
        }
        if let Some(bad) = s.overrides.iter().find(|o| !(1..=5).contains(&o.urgency)) {
            return Err(ConfigError::invalid(
                "strategy.overrides",
                format!("urgency {} for {} is outside 1-5", bad.urgency, bad.pattern),
            ));
        }

        if !(0..=defaults::MAX_COOLDOWN_SECS).contains(&config.throttle.cooldown_secs) {
            return Err(ConfigError::invalid(
                "throttle.cooldown_secs",
                format!(
                    "must be between 0 and {} (one day)",
                    defaults::MAX_COOLDOWN_SECS
                ),
            ));
        }
        if config.throttle.max_per_hour == 0 {
            return Err(ConfigError::invalid(
                "throttle.max_per_hour",
                "must be greater than 0",
            ));
        }

        if config.cache.enabled && config.cache.ttl_secs == 0 {
            return Err(ConfigError::invalid(
                "cache.ttl_secs",
                "must be greater than 0 when the cache is enabled",
            ));
        }

        Ok(())
    }
}

fn check_unit_fields(fields: &[(&str, f64)]) -> Result<(), ConfigError> {
    for (field, value) in fields {
        if !(0.0..=1.0).contains(value) {
            return Err(ConfigError::invalid(field, "must be between 0.0 and 1.0"));
        }
    }
    Ok(())
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}
