//! PatternClassifier: deterministic, first-match-wins rule evaluation.

pub mod conflict_rules;
pub mod gender_rules;
pub mod similarity;

use serde::{Deserialize, Serialize};

use concord_core::constants::CLASSIFIER_LOOKBACK;
use concord_core::models::ConflictPattern;
use concord_session::ConversationWindow;

/// A matched pattern and the evidence that matched it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternMatch {
    pub pattern: ConflictPattern,
    pub evidence: String,
}

/// Stateless classifier over a room's recent turns. The newest message in
/// the window is treated as the current one.
#[derive(Debug, Clone, Copy, Default)]
pub struct PatternClassifier;

impl PatternClassifier {
    pub fn new() -> Self {
        Self
    }

    pub fn classify(&self, window: &ConversationWindow) -> Option<ConflictPattern> {
        self.detect(window).map(|m| m.pattern)
    }

    /// Evaluate rules in [`ConflictPattern::PRIORITY`] order.
    pub fn detect(&self, window: &ConversationWindow) -> Option<PatternMatch> {
        ConflictPattern::PRIORITY.iter().find_map(|&pattern| {
            Self::evaluate(pattern, window).map(|evidence| {
                tracing::trace!(pattern = %pattern, evidence = %evidence, "pattern matched");
                PatternMatch { pattern, evidence }
            })
        })
    }

    /// Evaluate a single rule, regardless of priority.
    pub fn evaluate(pattern: ConflictPattern, window: &ConversationWindow) -> Option<String> {
        match pattern {
            ConflictPattern::BlameCycle => conflict_rules::blame_cycle(window),
            ConflictPattern::IssueRepetition => {
                conflict_rules::issue_repetition(window, CLASSIFIER_LOOKBACK)
            }
            ConflictPattern::DefensiveSpiral => conflict_rules::defensive_spiral(window),
            ConflictPattern::DeadlinePressure => conflict_rules::deadline_pressure(window),
            ConflictPattern::FemaleInterrupted => gender_rules::female_interrupted(window),
            ConflictPattern::FemaleCreditStolen => gender_rules::female_credit_stolen(window),
            ConflictPattern::FemaleIgnored => gender_rules::female_ignored(window),
            ConflictPattern::MaleDominance => gender_rules::male_dominance(window),
            ConflictPattern::MaleConsecutive => gender_rules::male_consecutive(window),
            ConflictPattern::GenderImbalance => gender_rules::gender_imbalance(window),
            ConflictPattern::AggressiveContext => conflict_rules::aggressive_context(window),
            ConflictPattern::Escalating => conflict_rules::escalating(window),
            ConflictPattern::ExpressionDifficulty => gender_rules::expression_difficulty(window),
        }
    }
}
