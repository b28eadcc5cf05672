use serde::{Deserialize, Serialize};

use super::defaults;
use crate::models::{ConflictPattern, TkiStrategy};

/// Replaces one cell of the built-in pattern/urgency table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyOverride {
    pub pattern: ConflictPattern,
    pub urgency: u8,
    pub strategy: TkiStrategy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategyConfig {
    /// Intensity above which the selector de-escalates first. Default: 0.8.
    pub high_intensity: f64,
    /// Intensity below which the selector prefers collaborating. Default: 0.3.
    pub low_intensity: f64,
    pub overrides: Vec<StrategyOverride>,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            high_intensity: defaults::DEFAULT_HIGH_INTENSITY,
            low_intensity: defaults::DEFAULT_LOW_INTENSITY,
            overrides: Vec::new(),
        }
    }
}
