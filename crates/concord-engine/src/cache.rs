//! Decision cache with a short fixed TTL.
//!
//! Uses `moka::sync::Cache`. Keys hash with blake3 the room, the window
//! length, the last few messages (`author|content`, trajectory score and
//! the gap to the next message), and the incoming message's author, gender
//! and content. Entries hold the pre-throttle decision, so throttle gating
//! is always re-applied.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use moka::sync::Cache;

use concord_core::config::CacheConfig;
use concord_core::models::{FusedDecision, Message};
use concord_session::ConversationWindow;

/// A cached pipeline result and the trajectory score it recorded.
#[derive(Debug, Clone, PartialEq)]
pub struct CachedDecision {
    pub decision: FusedDecision,
    pub trajectory: f64,
}

pub struct DecisionCache {
    cache: Cache<String, CachedDecision>,
    context_messages: usize,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl DecisionCache {
    pub fn new(config: &CacheConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(config.max_entries)
            .time_to_live(Duration::from_secs(config.ttl_secs))
            .build();
        Self {
            cache,
            context_messages: config.context_messages,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Cache key for `message` arriving on top of `window`.
    pub fn key_for(
        &self,
        window: &ConversationWindow,
        message: &Message,
        recent_interventions: usize,
    ) -> String {
        let mut hasher = blake3::Hasher::new();
        hasher.update(message.room_id.as_bytes());
        hasher.update(b"\x1f");
        hasher.update(&(window.len() as u64).to_le_bytes());
        let recent = window.recent(self.context_messages);
        let scores = window.recent_scores(self.context_messages);
        for (i, (m, score)) in recent.iter().zip(&scores).enumerate() {
            let next = recent.get(i + 1).map_or(message.timestamp, |n| n.timestamp);
            hasher.update(m.author.as_bytes());
            hasher.update(b"|");
            hasher.update(m.content.as_bytes());
            hasher.update(&score.to_bits().to_le_bytes());
            hasher.update(&(next - m.timestamp).num_seconds().to_le_bytes());
            hasher.update(b"\x1e");
        }
        hasher.update(message.author.as_bytes());
        hasher.update(message.gender.as_str().as_bytes());
        hasher.update(b"|");
        hasher.update(message.content.as_bytes());
        hasher.update(&(recent_interventions as u64).to_le_bytes());
        hasher.finalize().to_hex().to_string()
    }

    pub fn get(&self, key: &str) -> Option<CachedDecision> {
        match self.cache.get(key) {
            Some(v) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                Some(v)
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    pub fn insert(&self, key: String, value: CachedDecision) {
        self.cache.insert(key, value);
    }

    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    /// Hit rate over all lookups, 0 before the first one.
    pub fn hit_rate(&self) -> f64 {
        let hits = self.hits();
        let total = hits + self.misses();
        if total == 0 {
            return 0.0;
        }
        hits as f64 / total as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, Utc};
    use concord_core::models::Gender;

    fn at(room: &str, author: &str, content: &str, secs: i64) -> Message {
        let t0 = DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap();
        Message::new(room, author, Gender::Unknown, content, t0 + Duration::seconds(secs))
    }

    fn msg(room: &str, author: &str, content: &str) -> Message {
        at(room, author, content, 100)
    }

    #[test]
    fn key_depends_on_room_context_author_and_content() {
        let cache = DecisionCache::new(&CacheConfig::default());
        let mut w = ConversationWindow::new("r1", 10);
        let base = cache.key_for(&w, &msg("r1", "a", "hello"), 0);
        assert_eq!(base, cache.key_for(&w, &msg("r1", "a", "hello"), 0));
        assert_ne!(base, cache.key_for(&w, &msg("r1", "b", "hello"), 0));
        assert_ne!(base, cache.key_for(&w, &msg("r2", "a", "hello"), 0));
        assert_ne!(base, cache.key_for(&w, &msg("r1", "a", "hello!"), 0));
        assert_ne!(base, cache.key_for(&w, &msg("r1", "a", "hello"), 1));
        w.add_message(msg("r1", "a", "earlier"), 0.0);
        assert_ne!(base, cache.key_for(&w, &msg("r1", "a", "hello"), 0));
    }

    #[test]
    fn key_depends_on_timing_scores_and_window_length() {
        let cache = DecisionCache::new(&CacheConfig {
            context_messages: 2,
            ..CacheConfig::default()
        });
        let build = |gaps: [i64; 3], scores: [f64; 3]| {
            let mut w = ConversationWindow::new("r1", 10);
            let mut secs = 0;
            let lines = ["one", "two", "three"].iter().zip(gaps).zip(scores);
            for ((content, gap), score) in lines {
                secs += gap;
                w.add_message(at("r1", "a", content, secs), score);
            }
            w
        };
        let next = at("r1", "b", "four", 100);
        let base = cache.key_for(&build([0, 5, 5], [0.1, 0.2, 0.3]), &next, 0);
        assert_eq!(base, cache.key_for(&build([0, 5, 5], [0.1, 0.2, 0.3]), &next, 0));
        // Same text, different pacing.
        assert_ne!(base, cache.key_for(&build([0, 5, 60], [0.1, 0.2, 0.3]), &next, 0));
        let early = at("r1", "b", "four", 20);
        assert_ne!(base, cache.key_for(&build([0, 5, 5], [0.1, 0.2, 0.3]), &early, 0));
        // Same text, different trajectory.
        assert_ne!(base, cache.key_for(&build([0, 5, 5], [0.1, 0.2, 0.9]), &next, 0));
        // Older history outside the hashed messages still counts through the length.
        let longer = build([0, 5, 5], [0.1, 0.2, 0.3]);
        let mut shorter = ConversationWindow::new("r1", 10);
        for e in longer.entries().skip(1) {
            shorter.add_message(e.message.clone(), e.score);
        }
        assert_ne!(cache.key_for(&longer, &next, 0), cache.key_for(&shorter, &next, 0));
    }

    #[test]
    fn tracks_hits_and_misses() {
        let cache = DecisionCache::new(&CacheConfig::default());
        assert_eq!(cache.hit_rate(), 0.0);
        assert!(cache.get("k").is_none());
        cache.insert(
            "k".to_string(),
            CachedDecision {
                decision: FusedDecision::silent("calm"),
                trajectory: 0.1,
            },
        );
        assert_eq!(cache.get("k").map(|c| c.trajectory), Some(0.1));
        assert_eq!(cache.hits(), 1);
        assert_eq!(cache.misses(), 1);
        assert_eq!(cache.hit_rate(), 0.5);
    }
}
