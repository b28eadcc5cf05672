//! StrategySelector: pattern, urgency and intensity to a TKI strategy.

pub mod table;

use std::collections::HashMap;

use concord_core::config::StrategyConfig;
use concord_core::models::{ConflictPattern, TkiStrategy};

/// Selects a Thomas-Kilmann strategy from the built-in table, with
/// configured cell overrides and an intensity override on top.
#[derive(Debug, Clone)]
pub struct StrategySelector {
    high_intensity: f64,
    low_intensity: f64,
    overrides: HashMap<(ConflictPattern, usize), TkiStrategy>,
}

impl StrategySelector {
    pub fn new(config: &StrategyConfig) -> Self {
        let overrides = config
            .overrides
            .iter()
            .map(|o| ((o.pattern, table::urgency_index(o.urgency)), o.strategy))
            .collect();
        Self {
            high_intensity: config.high_intensity,
            low_intensity: config.low_intensity,
            overrides,
        }
    }

    /// Very hot exchanges de-escalate first: avoid when things are already
    /// spiralling, accommodate otherwise. Cool ones collaborate. Everything
    /// in between goes to the table.
    pub fn select(
        &self,
        pattern: Option<ConflictPattern>,
        urgency: u8,
        intensity: f64,
    ) -> TkiStrategy {
        if intensity > self.high_intensity {
            return match pattern {
                Some(ConflictPattern::Escalating | ConflictPattern::AggressiveContext) => {
                    TkiStrategy::Avoiding
                }
                _ => TkiStrategy::Accommodating,
            };
        }
        if intensity < self.low_intensity {
            return TkiStrategy::Collaborating;
        }
        match pattern {
            Some(p) => self.table_lookup(p, urgency),
            None => TkiStrategy::Collaborating,
        }
    }

    /// Table cell for `(pattern, urgency)`, honoring configured overrides.
    pub fn table_lookup(&self, pattern: ConflictPattern, urgency: u8) -> TkiStrategy {
        let idx = table::urgency_index(urgency);
        self.overrides
            .get(&(pattern, idx))
            .copied()
            .unwrap_or_else(|| table::lookup(pattern, urgency))
    }
}

impl Default for StrategySelector {
    fn default() -> Self {
        Self::new(&StrategyConfig::default())
    }
}
