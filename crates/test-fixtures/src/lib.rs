//! Test fixture loader for Concord conversation scenarios.
//!
//! Provides typed deserialization of the fixture JSON files and helper
//! functions for loading them in tests across crates.

use std::path::PathBuf;

use chrono::{DateTime, Duration, Utc};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use concord_core::models::{ConflictPattern, Gender, Message, TkiStrategy};

/// Timestamp of the first message in every scenario.
pub const SCENARIO_EPOCH_SECS: i64 = 1_700_000_000;

/// Root directory of the test-fixtures folder.
fn fixtures_root() -> PathBuf {
    // Works from any crate in the workspace: walk up to find test-fixtures.
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let mut path = PathBuf::from(&manifest_dir);

    if path.join("conversations").exists() {
        return path;
    }
    while !path.join("test-fixtures").join("conversations").exists() {
        if !path.pop() {
            panic!(
                "Could not find test-fixtures directory from CARGO_MANIFEST_DIR={}",
                manifest_dir
            );
        }
    }
    path.join("test-fixtures")
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixtures_root().join(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

/// Check that a fixture file exists.
pub fn fixture_exists(relative_path: &str) -> bool {
    fixtures_root().join(relative_path).exists()
}

/// One scripted chat line.
#[derive(Debug, Clone, Deserialize)]
pub struct FixtureMessage {
    pub author: String,
    #[serde(default)]
    pub gender: Gender,
    pub content: String,
    /// Seconds after the scenario start.
    pub offset_secs: i64,
}

/// What the decision for the last message should look like.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Expectation {
    pub min_score: Option<f64>,
    pub max_score: Option<f64>,
    /// Acceptable patterns. Empty means no pattern.
    pub patterns: Vec<ConflictPattern>,
    /// Acceptable strategies. Empty means any.
    pub strategies: Vec<TkiStrategy>,
    pub should_intervene: bool,
}

/// A conversation whose earlier lines are history and whose last line is
/// the message under test.
#[derive(Debug, Clone, Deserialize)]
pub struct ConversationFixture {
    pub name: String,
    pub room_id: String,
    pub messages: Vec<FixtureMessage>,
    pub expect: Expectation,
}

impl ConversationFixture {
    pub fn load(name: &str) -> Self {
        load_fixture(&format!("conversations/{name}.json"))
    }

    pub fn start() -> DateTime<Utc> {
        DateTime::<Utc>::from_timestamp(SCENARIO_EPOCH_SECS, 0).unwrap_or_default()
    }

    /// All lines as timestamped messages in the fixture's room.
    pub fn to_messages(&self) -> Vec<Message> {
        let start = Self::start();
        self.messages
            .iter()
            .map(|m| {
                Message::new(
                    self.room_id.as_str(),
                    m.author.as_str(),
                    m.gender,
                    m.content.as_str(),
                    start + Duration::seconds(m.offset_secs),
                )
            })
            .collect()
    }

    /// History lines and the message under test.
    pub fn split(&self) -> (Vec<Message>, Message) {
        let mut messages = self.to_messages();
        let last = messages.pop().unwrap_or_else(|| panic!("fixture {} is empty", self.name));
        (messages, last)
    }
}
