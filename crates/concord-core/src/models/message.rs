use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Self-declared gender of a message author. Drives the structural
/// interruption and dominance patterns only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    #[default]
    Unknown,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single chat message as handed in by the caller. Immutable once recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub content: String,
    pub author: String,
    #[serde(default)]
    pub gender: Gender,
    pub timestamp: DateTime<Utc>,
    pub room_id: String,
}

impl Message {
    pub fn new(
        room_id: impl Into<String>,
        author: impl Into<String>,
        gender: Gender,
        content: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            content: content.into(),
            author: author.into(),
            gender,
            timestamp,
            room_id: room_id.into(),
        }
    }

    /// Length in characters, not bytes.
    pub fn char_count(&self) -> usize {
        self.content.trim().chars().count()
    }

    /// Whether the message reads as a finished thought.
    pub fn is_complete_sentence(&self) -> bool {
        self.content
            .trim_end()
            .ends_with(|c: char| matches!(c, '.' | '!' | '?' | '。' | '！' | '？'))
    }

    /// Lowercased whitespace tokens with surrounding punctuation stripped.
    pub fn tokens(&self) -> Vec<String> {
        self.content
            .split_whitespace()
            .map(|w| {
                w.trim_matches(|c: char| !c.is_alphanumeric() && c != '\'')
                    .to_lowercase()
            })
            .filter(|w| !w.is_empty())
            .collect()
    }
}
