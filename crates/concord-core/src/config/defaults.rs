//! Single source of truth for all default values.

// Window
pub const DEFAULT_WINDOW_CAPACITY: usize = 20;
pub const DEFAULT_TREND_WINDOW: usize = 5;
pub const DEFAULT_MIN_MESSAGES: usize = 3;
pub const DEFAULT_HISTORY_HORIZON_SECS: i64 = 300;
pub const MAX_HISTORY_HORIZON_SECS: i64 = 7 * 24 * 3_600;

// Keyword detector
pub const DEFAULT_SEVERE_WEIGHT: f64 = 0.5;
pub const DEFAULT_MODERATE_WEIGHT: f64 = 0.35;
pub const DEFAULT_MILD_WEIGHT: f64 = 0.15;
pub const DEFAULT_BLAME_WEIGHT: f64 = 0.2;
pub const DEFAULT_EMOTION_TERM_WEIGHT: f64 = 0.2;
pub const DEFAULT_INTENSITY_WEIGHT: f64 = 0.1;
pub const DEFAULT_CATEGORY_CAP: f64 = 0.4;
pub const DEFAULT_SEVERE_CAP: f64 = 0.5;
pub const DEFAULT_KEYWORD_CONFIDENCE_CUTOFF: f64 = 0.3;
pub const DEFAULT_KEYWORD_HIGH_CONFIDENCE: f64 = 0.85;
pub const DEFAULT_KEYWORD_LOW_CONFIDENCE: f64 = 0.5;

// Emotion detector
pub const DEFAULT_ANGER_WEIGHT: f64 = 0.25;
pub const DEFAULT_FRUSTRATION_WEIGHT: f64 = 0.2;
pub const DEFAULT_DEFENSIVE_WEIGHT: f64 = 0.2;
pub const DEFAULT_ABSOLUTE_WEIGHT: f64 = 0.2;
pub const DEFAULT_EXCLAMATION_WEIGHT: f64 = 0.15;
pub const DEFAULT_REPEATED_PUNCTUATION_WEIGHT: f64 = 0.1;
pub const DEFAULT_CAPS_WEIGHT: f64 = 0.2;
pub const DEFAULT_CAPS_RATIO: f64 = 0.5;
pub const DEFAULT_EMOTION_CONFIDENCE: f64 = 0.8;
pub const DEFAULT_EMOTION_STRONG_CUES: usize = 3;
pub const DEFAULT_EMOTION_STRONG_CONFIDENCE: f64 = 0.9;

// Turn-taking detector
pub const DEFAULT_TURN_LOOKBACK: usize = 8;
pub const DEFAULT_DOMINANCE_FRACTION: f64 = 0.6;
pub const DEFAULT_GENDER_FRACTION: f64 = 0.7;
pub const DEFAULT_CONSECUTIVE_RUN: usize = 3;
pub const DEFAULT_TURN_CONFIDENCE: f64 = 0.7;
pub const DEFAULT_TURN_IDLE_CONFIDENCE: f64 = 0.3;

// Semantic detector
pub const DEFAULT_SEMANTIC_ENABLED: bool = true;
pub const DEFAULT_SEMANTIC_TIMEOUT_MS: u64 = 400;
pub const DEFAULT_SEMANTIC_CONTEXT_MESSAGES: usize = 10;

// Fusion
pub const DEFAULT_KEYWORD_FUSION_WEIGHT: f64 = 0.3;
pub const DEFAULT_EMOTION_FUSION_WEIGHT: f64 = 0.15;
pub const DEFAULT_TURN_TAKING_FUSION_WEIGHT: f64 = 0.25;
pub const DEFAULT_SEMANTIC_FUSION_WEIGHT: f64 = 0.3;
pub const DEFAULT_OTHER_FUSION_WEIGHT: f64 = 0.1;
pub const DEFAULT_CONFIDENCE_FLOOR: f64 = 0.3;
pub const DEFAULT_EARLY_CONFIDENCE: f64 = 0.8;
pub const DEFAULT_EARLY_BEHAVIORAL_VALUE: f64 = 0.5;
pub const DEFAULT_EARLY_KEYWORD_VALUE: f64 = 0.7;

// Dynamic threshold
pub const DEFAULT_BASE_THRESHOLD: f64 = 0.35;
pub const DEFAULT_FLOOR_THRESHOLD: f64 = 0.15;
pub const DEFAULT_RISING_TREND: f64 = 0.3;
pub const DEFAULT_TREND_DROP: f64 = 0.1;
pub const DEFAULT_BREAKDOWN_DROP: f64 = 0.1;
pub const DEFAULT_SEVERITY_DROP: f64 = 0.1;
pub const DEFAULT_DEADLINE_DROP: f64 = 0.15;
pub const DEFAULT_BREAKDOWN_CUTOFF: f64 = 0.4;
pub const DEFAULT_RECENT_INTERVENTION_PENALTY: f64 = 0.0;

// Strategy
pub const DEFAULT_HIGH_INTENSITY: f64 = 0.8;
pub const DEFAULT_LOW_INTENSITY: f64 = 0.3;

// Throttle
pub const DEFAULT_COOLDOWN_SECS: i64 = 30;
pub const MAX_COOLDOWN_SECS: i64 = 24 * 3_600;
pub const DEFAULT_MAX_INTERVENTIONS_PER_HOUR: u32 = 6;

// Decision cache
pub const DEFAULT_CACHE_ENABLED: bool = true;
pub const DEFAULT_CACHE_TTL_SECS: u64 = 10;
pub const DEFAULT_CACHE_MAX_ENTRIES: u64 = 1_000;
pub const DEFAULT_CACHE_CONTEXT_MESSAGES: usize = 3;
