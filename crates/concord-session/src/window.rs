//! ConversationWindow: bounded per-room history with derived statistics.

use std::collections::{HashMap, VecDeque};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use concord_core::config::defaults::MAX_HISTORY_HORIZON_SECS;
use concord_core::config::WindowConfig;
use concord_core::constants::{clamp_unit, MIN_TREND_POINTS, TREND_GAIN};
use concord_core::lexicon::{DEFENSIVE_RE, DISMISSIVE_RE};
use concord_core::models::{Gender, Message, ParticipantState};

/// A message paired with the score it contributed to the trajectory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowEntry {
    pub message: Message,
    pub score: f64,
}

/// Bounded, insertion-ordered message history for one room.
///
/// Oldest entries are evicted silently once `capacity` is reached.
/// Participant aggregates cover the room's whole lifetime, not just the
/// retained entries.
#[derive(Debug, Clone)]
pub struct ConversationWindow {
    room_id: String,
    capacity: usize,
    horizon: Option<Duration>,
    entries: VecDeque<WindowEntry>,
    participants: HashMap<String, ParticipantState>,
}

impl ConversationWindow {
    pub fn new(room_id: impl Into<String>, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            room_id: room_id.into(),
            capacity,
            horizon: None,
            entries: VecDeque::with_capacity(capacity),
            participants: HashMap::new(),
        }
    }

    /// Window with capacity and age horizon taken from config.
    pub fn from_config(room_id: impl Into<String>, config: &WindowConfig) -> Self {
        let mut window = Self::new(room_id, config.capacity);
        let secs = config.history_horizon_secs.clamp(1, MAX_HISTORY_HORIZON_SECS);
        window.horizon = Some(Duration::seconds(secs));
        window
    }

    /// Record a message and its trajectory score. Updates the author's aggregate.
    pub fn add_message(&mut self, message: Message, score: f64) {
        let score = clamp_unit(score);
        self.participants
            .entry(message.author.clone())
            .or_insert_with(|| ParticipantState::new(message.gender, message.timestamp))
            .record(score, message.timestamp);

        let newest = message.timestamp;
        self.entries.push_back(WindowEntry { message, score });
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
        if let Some(cutoff) = self.horizon.and_then(|h| newest.checked_sub_signed(h)) {
            self.prune_older_than(cutoff);
        }
    }

    /// Drop entries stamped before `cutoff`. The newest entry always stays.
    /// Returns how many were dropped.
    pub fn prune_older_than(&mut self, cutoff: DateTime<Utc>) -> usize {
        let before = self.entries.len();
        while self.entries.len() > 1
            && self
                .entries
                .front()
                .is_some_and(|e| e.message.timestamp < cutoff)
        {
            self.entries.pop_front();
        }
        before - self.entries.len()
    }

    /// Last `n` messages, oldest first.
    pub fn recent(&self, n: usize) -> Vec<&Message> {
        let skip = self.entries.len().saturating_sub(n);
        self.entries.iter().skip(skip).map(|e| &e.message).collect()
    }

    /// Last `n` trajectory scores, oldest first.
    pub fn recent_scores(&self, n: usize) -> Vec<f64> {
        let skip = self.entries.len().saturating_sub(n);
        self.entries.iter().skip(skip).map(|e| e.score).collect()
    }

    pub fn entries(&self) -> impl Iterator<Item = &WindowEntry> {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&Message> {
        self.entries.back().map(|e| &e.message)
    }

    pub fn current_score(&self) -> f64 {
        self.entries.back().map(|e| e.score).unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn room_id(&self) -> &str {
        &self.room_id
    }

    pub fn participant_state(&self, author: &str) -> Option<&ParticipantState> {
        self.participants.get(author)
    }

    pub fn participant_count(&self) -> usize {
        self.participants.len()
    }

    /// Least-squares slope of the last `window` scores, times the trend gain,
    /// clamped to `[0, 1]`. Falling or flat rooms read as 0.
    pub fn trend(&self, window: usize) -> f64 {
        let scores = self.recent_scores(window);
        if scores.len() < MIN_TREND_POINTS {
            return 0.0;
        }
        let n = scores.len() as f64;
        let x_mean = (n - 1.0) / 2.0;
        let y_mean = scores.iter().sum::<f64>() / n;
        let mut numerator = 0.0;
        let mut denominator = 0.0;
        for (i, y) in scores.iter().enumerate() {
            let dx = i as f64 - x_mean;
            numerator += dx * (y - y_mean);
            denominator += dx * dx;
        }
        if denominator == 0.0 {
            return 0.0;
        }
        clamp_unit(numerator / denominator * TREND_GAIN)
    }

    /// Last three scores strictly rising.
    pub fn is_escalating(&self) -> bool {
        let s = self.recent_scores(3);
        s.len() == 3 && s[0] < s[1] && s[1] < s[2]
    }

    /// Share of the last `k` turns taken by the most active speaker.
    /// Ties resolve to the speaker who spoke most recently.
    pub fn dominant_speaker(&self, k: usize) -> Option<(String, f64)> {
        let recent = self.recent(k);
        if recent.is_empty() {
            return None;
        }
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for m in &recent {
            *counts.entry(m.author.as_str()).or_insert(0) += 1;
        }
        let top = recent
            .iter()
            .map(|m| m.author.as_str())
            .max_by_key(|a| counts.get(a).copied().unwrap_or(0))?;
        let share = counts.get(top).copied().unwrap_or(0) as f64 / recent.len() as f64;
        Some((top.to_string(), share))
    }

    /// Share of the last `k` turns taken by `gender`.
    pub fn gender_share(&self, k: usize, gender: Gender) -> f64 {
        let recent = self.recent(k);
        if recent.is_empty() {
            return 0.0;
        }
        let hits = recent.iter().filter(|m| m.gender == gender).count();
        hits as f64 / recent.len() as f64
    }

    /// Length of the newest same-author run.
    pub fn consecutive_run(&self) -> usize {
        let Some(last) = self.latest() else {
            return 0;
        };
        self.entries
            .iter()
            .rev()
            .take_while(|e| e.message.author == last.author)
            .count()
    }

    /// Distinct authors among the last `k` turns.
    pub fn unique_speakers(&self, k: usize) -> usize {
        let mut seen: Vec<&str> = Vec::new();
        for m in self.recent(k) {
            if !seen.contains(&m.author.as_str()) {
                seen.push(m.author.as_str());
            }
        }
        seen.len()
    }

    /// Conversation-breakdown reading over the last three turns:
    /// long silences, clipped replies, and uniformly dismissive tone.
    pub fn breakdown_score(&self) -> f64 {
        let recent = self.recent(3);
        if recent.len() < 3 {
            return 0.0;
        }
        let mut score = 0.0;
        for pair in recent.windows(2) {
            if pair[1].timestamp - pair[0].timestamp > Duration::seconds(60) {
                score += 0.3;
            }
        }
        let clipped = recent.iter().filter(|m| m.char_count() <= 5).count();
        if clipped >= 2 {
            score += 0.4;
        }
        if recent
            .iter()
            .all(|m| DISMISSIVE_RE.is_match(&m.content) || DEFENSIVE_RE.is_match(&m.content))
        {
            score += 0.3;
        }
        clamp_unit(score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn msg(author: &str, content: &str, secs: i64) -> Message {
        let t0 = DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap();
        Message::new("room", author, Gender::Unknown, content, t0 + Duration::seconds(secs))
    }

    #[test]
    fn trend_needs_three_points() {
        let mut w = ConversationWindow::new("room", 10);
        w.add_message(msg("a", "x", 0), 0.1);
        w.add_message(msg("b", "y", 1), 0.9);
        assert_eq!(w.trend(5), 0.0);
    }

    #[test]
    fn trend_of_rising_scores() {
        let mut w = ConversationWindow::new("room", 10);
        for (i, s) in [0.15, 0.2, 0.55, 0.55].iter().enumerate() {
            w.add_message(msg("a", "x", i as i64), *s);
        }
        // slope 0.155, gain 5
        assert!((w.trend(5) - 0.775).abs() < 1e-9);
    }

    #[test]
    fn falling_trend_clamps_to_zero() {
        let mut w = ConversationWindow::new("room", 10);
        for (i, s) in [0.9, 0.6, 0.3].iter().enumerate() {
            w.add_message(msg("a", "x", i as i64), *s);
        }
        assert_eq!(w.trend(5), 0.0);
    }

    #[test]
    fn horizon_prunes_stale_messages() {
        let config = WindowConfig {
            history_horizon_secs: 60,
            ..WindowConfig::default()
        };
        let mut w = ConversationWindow::from_config("room", &config);
        w.add_message(msg("a", "old", 0), 0.0);
        w.add_message(msg("b", "newer", 50), 0.0);
        w.add_message(msg("a", "newest", 100), 0.0);
        let kept: Vec<_> = w.recent(10).iter().map(|m| m.content.clone()).collect();
        assert_eq!(kept, vec!["newer", "newest"]);
        assert_eq!(w.participant_count(), 2);
    }

    #[test]
    fn breakdown_from_silence_and_clipped_replies() {
        let mut w = ConversationWindow::new("room", 10);
        w.add_message(msg("a", "fine", 0), 0.0);
        w.add_message(msg("b", "ok", 90), 0.0);
        w.add_message(msg("a", "sure", 200), 0.0);
        // two gaps + clipped + all dismissive
        assert_eq!(w.breakdown_score(), 1.0);
    }

    #[test]
    fn consecutive_run_counts_newest_streak() {
        let mut w = ConversationWindow::new("room", 10);
        w.add_message(msg("a", "1", 0), 0.0);
        w.add_message(msg("b", "2", 1), 0.0);
        w.add_message(msg("b", "3", 2), 0.0);
        w.add_message(msg("b", "4", 3), 0.0);
        assert_eq!(w.consecutive_run(), 3);
        assert_eq!(w.unique_speakers(3), 1);
        let (top, share) = w.dominant_speaker(4).unwrap();
        assert_eq!(top, "b");
        assert!((share - 0.75).abs() < 1e-9);
    }
}
