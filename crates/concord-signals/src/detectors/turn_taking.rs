//! Turn-taking detector: who holds the floor.
//!
//! Flags a single speaker holding at least the dominance fraction of recent
//! turns, one gender holding the gender fraction, or one speaker running
//! three or more consecutive turns. Abstains (idle confidence) when nothing
//! fires, since balanced turn-taking says nothing about conflict.

use concord_core::config::TurnTakingConfig;
use concord_core::errors::DetectionError;
use concord_core::models::{Gender, Message, Signal, SignalKind};
use concord_session::ConversationWindow;

use super::ISignalDetector;

/// Base value when one speaker dominates.
const DOMINANCE_BASE: f64 = 0.4;
/// Added when one gender dominates.
const GENDER_IMBALANCE: f64 = 0.2;
/// Added for a monologue run.
const MONOLOGUE: f64 = 0.3;
/// Floor when the last three turns come from one person.
const SINGLE_VOICE_FLOOR: f64 = 0.4;
/// Turns needed before shares mean anything.
const MIN_TURNS: usize = 3;
/// Turns needed before speaker share counts as dominance.
const MIN_TURNS_FOR_SHARE: usize = 4;

pub struct TurnTakingDetector {
    config: TurnTakingConfig,
}

impl TurnTakingDetector {
    pub fn new(config: TurnTakingConfig) -> Self {
        Self { config }
    }
}

impl Default for TurnTakingDetector {
    fn default() -> Self {
        Self::new(TurnTakingConfig::default())
    }
}

impl ISignalDetector for TurnTakingDetector {
    fn kind(&self) -> SignalKind {
        SignalKind::TurnTaking
    }

    fn detect(
        &self,
        message: &Message,
        window: &ConversationWindow,
    ) -> Result<Signal, DetectionError> {
        let c = &self.config;
        let mut turns: Vec<(&str, Gender)> = window
            .recent(c.lookback.saturating_sub(1))
            .into_iter()
            .map(|m| (m.author.as_str(), m.gender))
            .collect();
        turns.push((message.author.as_str(), message.gender));

        if turns.len() < MIN_TURNS {
            return Ok(Signal::new(
                SignalKind::TurnTaking,
                0.0,
                c.idle_confidence,
                "insufficient turns",
            ));
        }

        let total = turns.len() as f64;
        let mut value: f64 = 0.0;
        let mut cues: Vec<String> = Vec::new();

        // Most frequent speaker; ties go to the most recent.
        let mut top: (&str, usize) = ("", 0);
        for (author, _) in &turns {
            let n = turns.iter().filter(|(a, _)| a == author).count();
            if n >= top.1 {
                top = (*author, n);
            }
        }
        let share = top.1 as f64 / total;
        if turns.len() >= MIN_TURNS_FOR_SHARE && share >= c.dominance_fraction {
            value += DOMINANCE_BASE + (share - c.dominance_fraction);
            cues.push(format!("{} holds {:.0}% of turns", top.0, share * 100.0));
        }

        for (gender, other) in [(Gender::Male, Gender::Female), (Gender::Female, Gender::Male)] {
            let g = turns.iter().filter(|(_, x)| *x == gender).count() as f64 / total;
            let o = turns.iter().filter(|(_, x)| *x == other).count() as f64 / total;
            if g >= c.gender_fraction && o < 1.0 - c.gender_fraction {
                value += GENDER_IMBALANCE;
                cues.push(format!("{gender} voices hold {:.0}% of turns", g * 100.0));
            }
        }

        let run = turns
            .iter()
            .rev()
            .take_while(|(a, _)| *a == message.author.as_str())
            .count();
        if run >= c.consecutive_run {
            value += MONOLOGUE;
            cues.push(format!("{} spoke {run} times in a row", message.author));
        }

        let last_three = &turns[turns.len() - MIN_TURNS..];
        if last_three.iter().all(|(a, _)| *a == last_three[0].0) {
            value = value.max(SINGLE_VOICE_FLOOR);
        }

        if cues.is_empty() && value == 0.0 {
            return Ok(Signal::new(
                SignalKind::TurnTaking,
                0.0,
                c.idle_confidence,
                "balanced turns",
            ));
        }
        Ok(Signal::new(
            SignalKind::TurnTaking,
            value,
            c.confidence,
            cues.join("; "),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn window(turns: &[(&str, Gender)]) -> ConversationWindow {
        let mut w = ConversationWindow::new("r", 20);
        let t0 = Utc::now();
        for (i, (a, g)) in turns.iter().enumerate() {
            w.add_message(
                Message::new("r", *a, *g, "text", t0 + Duration::seconds(i as i64)),
                0.0,
            );
        }
        w
    }

    #[test]
    fn alternating_speakers_abstain() {
        let w = window(&[("a", Gender::Unknown), ("b", Gender::Unknown), ("a", Gender::Unknown)]);
        let m = Message::new("r", "b", Gender::Unknown, "text", Utc::now());
        let s = TurnTakingDetector::default().detect(&m, &w).unwrap();
        assert_eq!(s.value, 0.0);
        assert_eq!(s.confidence, 0.3);
    }

    #[test]
    fn monologue_is_flagged() {
        let w = window(&[("a", Gender::Unknown), ("b", Gender::Unknown), ("b", Gender::Unknown)]);
        let m = Message::new("r", "b", Gender::Unknown, "text", Utc::now());
        let s = TurnTakingDetector::default().detect(&m, &w).unwrap();
        // 75% share: 0.4 + 0.15, plus run of 3: 0.3
        assert!((s.value - 0.85).abs() < 1e-9);
        assert_eq!(s.confidence, 0.7);
    }

    #[test]
    fn gender_imbalance_is_flagged() {
        let w = window(&[
            ("a", Gender::Male),
            ("b", Gender::Male),
            ("c", Gender::Female),
            ("d", Gender::Male),
        ]);
        let m = Message::new("r", "e", Gender::Male, "text", Utc::now());
        let s = TurnTakingDetector::default().detect(&m, &w).unwrap();
        // 80% male, 20% female
        assert!((s.value - 0.2).abs() < 1e-9);
    }
}
