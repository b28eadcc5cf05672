//! Built-in pattern x urgency strategy table.

use concord_core::constants::{MAX_URGENCY, MIN_URGENCY};
use concord_core::models::{ConflictPattern, TkiStrategy};

use concord_core::models::TkiStrategy::{
    Accommodating as Acc, Avoiding as Avo, Collaborating as Col, Competing as Cmp,
    Compromising as Cpr,
};

/// Strategies for urgency 1 through 5.
pub type UrgencyRow = [TkiStrategy; 5];

pub fn row(pattern: ConflictPattern) -> UrgencyRow {
    match pattern {
        ConflictPattern::FemaleInterrupted | ConflictPattern::AggressiveContext => {
            [Acc, Col, Cpr, Cmp, Cmp]
        }
        ConflictPattern::MaleDominance => [Acc, Col, Cpr, Col, Cmp],
        ConflictPattern::MaleConsecutive => [Acc, Col, Cpr, Col, Col],
        ConflictPattern::FemaleIgnored | ConflictPattern::GenderImbalance => {
            [Acc, Col, Col, Cpr, Cpr]
        }
        ConflictPattern::ExpressionDifficulty => [Acc, Col, Col, Acc, Acc],
        ConflictPattern::FemaleCreditStolen => [Acc, Col, Col, Cpr, Cmp],
        ConflictPattern::BlameCycle => [Col, Col, Cpr, Cpr, Cmp],
        ConflictPattern::IssueRepetition => [Col, Col, Col, Cpr, Cpr],
        ConflictPattern::DefensiveSpiral => [Acc, Col, Cpr, Cpr, Avo],
        ConflictPattern::DeadlinePressure => [Col, Col, Cpr, Cpr, Cmp],
        ConflictPattern::Escalating => [Col, Cpr, Cpr, Avo, Avo],
    }
}

/// Row index for an urgency level, clamping out-of-range input.
pub fn urgency_index(urgency: u8) -> usize {
    (urgency.clamp(MIN_URGENCY, MAX_URGENCY) - MIN_URGENCY) as usize
}

pub fn lookup(pattern: ConflictPattern, urgency: u8) -> TkiStrategy {
    row(pattern)[urgency_index(urgency)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urgency_is_clamped() {
        assert_eq!(urgency_index(0), 0);
        assert_eq!(urgency_index(3), 2);
        assert_eq!(urgency_index(9), 4);
    }

    #[test]
    fn spot_checks() {
        assert_eq!(lookup(ConflictPattern::BlameCycle, 4), Cpr);
        assert_eq!(lookup(ConflictPattern::Escalating, 5), Avo);
        assert_eq!(lookup(ConflictPattern::FemaleInterrupted, 5), Cmp);
        assert_eq!(lookup(ConflictPattern::ExpressionDifficulty, 1), Acc);
        assert_eq!(lookup(ConflictPattern::MaleConsecutive, 5), Col);
        assert_eq!(lookup(ConflictPattern::MaleDominance, 5), Cmp);
        assert_eq!(lookup(ConflictPattern::GenderImbalance, 4), Cpr);
    }
}
