use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Gender;

/// Running aggregate for one author in one room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticipantState {
    pub message_count: u64,
    pub running_average_score: f64,
    pub last_score: f64,
    pub last_active_time: DateTime<Utc>,
    /// Messages that scored above 0.5 and above the author's previous score.
    pub escalation_count: u32,
    pub gender: Gender,
}

impl ParticipantState {
    pub fn new(gender: Gender, first_seen: DateTime<Utc>) -> Self {
        Self {
            message_count: 0,
            running_average_score: 0.0,
            last_score: 0.0,
            last_active_time: first_seen,
            escalation_count: 0,
            gender,
        }
    }

    /// Fold one scored message into the aggregate.
    pub fn record(&mut self, score: f64, at: DateTime<Utc>) {
        self.message_count += 1;
        let n = self.message_count as f64;
        self.running_average_score = (self.running_average_score * (n - 1.0) + score) / n;
        if score > 0.5 && self.message_count > 1 && self.last_score < score {
            self.escalation_count += 1;
        }
        self.last_score = score;
        if at > self.last_active_time {
            self.last_active_time = at;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn running_mean_matches_arithmetic_mean() {
        let mut p = ParticipantState::new(Gender::Unknown, Utc::now());
        for s in [0.2, 0.4, 0.9] {
            p.record(s, Utc::now());
        }
        assert_eq!(p.message_count, 3);
        assert!((p.running_average_score - 0.5).abs() < 1e-9);
    }

    #[test]
    fn escalation_counts_rising_hot_messages() {
        let mut p = ParticipantState::new(Gender::Unknown, Utc::now());
        p.record(0.3, Utc::now());
        p.record(0.6, Utc::now());
        p.record(0.55, Utc::now());
        p.record(0.8, Utc::now());
        assert_eq!(p.escalation_count, 2);
    }
}
