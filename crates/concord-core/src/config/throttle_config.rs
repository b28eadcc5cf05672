use serde::{Deserialize, Serialize};

use super::defaults;

/// Per-room intervention rate limiting.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThrottleConfig {
    /// Default: 30.
    pub cooldown_secs: i64,
    /// Rolling-hour cap. Default: 6.
    pub max_per_hour: u32,
}

impl Default for ThrottleConfig {
    fn default() -> Self {
        Self {
            cooldown_secs: defaults::DEFAULT_COOLDOWN_SECS,
            max_per_hour: defaults::DEFAULT_MAX_INTERVENTIONS_PER_HOUR,
        }
    }
}

/// Short-lived cache of pre-throttle decisions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Default: true.
    pub enabled: bool,
    /// Default: 10.
    pub ttl_secs: u64,
    /// Default: 1000.
    pub max_entries: u64,
    /// Preceding messages folded into the cache key. Default: 3.
    pub context_messages: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: defaults::DEFAULT_CACHE_ENABLED,
            ttl_secs: defaults::DEFAULT_CACHE_TTL_SECS,
            max_entries: defaults::DEFAULT_CACHE_MAX_ENTRIES,
            context_messages: defaults::DEFAULT_CACHE_CONTEXT_MESSAGES,
        }
    }
}
