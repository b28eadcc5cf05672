use std::fmt;

use serde::{Deserialize, Serialize};

/// Named conflict or interruption pattern, listed in classifier priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictPattern {
    BlameCycle,
    IssueRepetition,
    DefensiveSpiral,
    DeadlinePressure,
    FemaleInterrupted,
    FemaleCreditStolen,
    FemaleIgnored,
    MaleDominance,
    MaleConsecutive,
    GenderImbalance,
    AggressiveContext,
    Escalating,
    ExpressionDifficulty,
}

impl ConflictPattern {
    /// Classifier evaluation order. First match wins.
    pub const PRIORITY: [ConflictPattern; 13] = [
        Self::BlameCycle,
        Self::IssueRepetition,
        Self::DefensiveSpiral,
        Self::DeadlinePressure,
        Self::FemaleInterrupted,
        Self::FemaleCreditStolen,
        Self::FemaleIgnored,
        Self::MaleDominance,
        Self::MaleConsecutive,
        Self::GenderImbalance,
        Self::AggressiveContext,
        Self::Escalating,
        Self::ExpressionDifficulty,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BlameCycle => "blame_cycle",
            Self::IssueRepetition => "issue_repetition",
            Self::DefensiveSpiral => "defensive_spiral",
            Self::DeadlinePressure => "deadline_pressure",
            Self::FemaleInterrupted => "female_interrupted",
            Self::FemaleCreditStolen => "female_credit_stolen",
            Self::FemaleIgnored => "female_ignored",
            Self::MaleDominance => "male_dominance",
            Self::MaleConsecutive => "male_consecutive",
            Self::GenderImbalance => "gender_imbalance",
            Self::AggressiveContext => "aggressive_context",
            Self::Escalating => "escalating",
            Self::ExpressionDifficulty => "expression_difficulty",
        }
    }

    /// Urgency a pattern carries on its own, before window analysis.
    pub fn default_urgency(&self) -> u8 {
        match self {
            Self::FemaleInterrupted | Self::AggressiveContext => 5,
            Self::MaleDominance | Self::FemaleCreditStolen | Self::Escalating => 4,
            Self::BlameCycle
            | Self::DefensiveSpiral
            | Self::FemaleIgnored
            | Self::MaleConsecutive
            | Self::GenderImbalance
            | Self::ExpressionDifficulty => 3,
            Self::IssueRepetition | Self::DeadlinePressure => 2,
        }
    }

    /// High-severity patterns lower the intervention threshold.
    pub fn is_high_severity(&self) -> bool {
        matches!(
            self,
            Self::AggressiveContext | Self::Escalating | Self::FemaleInterrupted
        )
    }
}

impl fmt::Display for ConflictPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
