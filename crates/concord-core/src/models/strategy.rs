use std::fmt;

use serde::{Deserialize, Serialize};

/// Thomas-Kilmann conflict-handling modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TkiStrategy {
    #[default]
    Collaborating,
    Accommodating,
    Competing,
    Avoiding,
    Compromising,
}

impl TkiStrategy {
    pub const ALL: [TkiStrategy; 5] = [
        Self::Collaborating,
        Self::Accommodating,
        Self::Competing,
        Self::Avoiding,
        Self::Compromising,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Collaborating => "collaborating",
            Self::Accommodating => "accommodating",
            Self::Competing => "competing",
            Self::Avoiding => "avoiding",
            Self::Compromising => "compromising",
        }
    }

    /// One-line stance handed to the message generator.
    pub fn stance(&self) -> &'static str {
        match self {
            Self::Collaborating => "invite everyone to build a shared solution",
            Self::Accommodating => "acknowledge feelings and give space",
            Self::Competing => "step in firmly and restore the floor",
            Self::Avoiding => "pause the exchange and let tempers cool",
            Self::Compromising => "propose a middle ground both sides can accept",
        }
    }
}

impl fmt::Display for TkiStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
