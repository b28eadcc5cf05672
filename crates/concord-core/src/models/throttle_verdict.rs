use std::fmt;

use serde::{Deserialize, Serialize};

/// Outcome of the intervention throttle for one ready decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum ThrottleVerdict {
    Allowed,
    Cooldown { remaining_secs: i64 },
    HourlyCapReached { count: u32 },
}

impl ThrottleVerdict {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed)
    }
}

impl fmt::Display for ThrottleVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Allowed => f.write_str("allowed"),
            Self::Cooldown { remaining_secs } => write!(f, "cooldown ({remaining_secs}s left)"),
            Self::HourlyCapReached { count } => write!(f, "hourly cap reached ({count})"),
        }
    }
}
