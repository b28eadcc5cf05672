use serde::{Deserialize, Serialize};

use super::defaults;

/// Per-room conversation window configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Messages retained per room. Default: 20.
    pub capacity: usize,
    /// Trajectory points used for the trend slope. Default: 5.
    pub trend_window: usize,
    /// Messages (including the current one) required before analysis. Default: 3.
    pub min_messages: usize,
    /// Messages older than this, relative to the newest, are pruned. Default: 300.
    pub history_horizon_secs: i64,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            capacity: defaults::DEFAULT_WINDOW_CAPACITY,
            trend_window: defaults::DEFAULT_TREND_WINDOW,
            min_messages: defaults::DEFAULT_MIN_MESSAGES,
            history_horizon_secs: defaults::DEFAULT_HISTORY_HORIZON_SECS,
        }
    }
}
