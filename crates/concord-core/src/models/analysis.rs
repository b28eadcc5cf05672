use std::fmt;

use serde::{Deserialize, Serialize};

/// What the window analysis suggests the moderator should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    Insufficient,
    NoAction,
    Monitor,
    GentleGuidance,
    ImmediateIntervention,
}

impl Recommendation {
    pub fn from_urgency(urgency: f64) -> Self {
        if urgency > 0.7 {
            Self::ImmediateIntervention
        } else if urgency > 0.5 {
            Self::GentleGuidance
        } else if urgency > 0.3 {
            Self::Monitor
        } else {
            Self::NoAction
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Insufficient => "insufficient",
            Self::NoAction => "no_action",
            Self::Monitor => "monitor",
            Self::GentleGuidance => "gentle_guidance",
            Self::ImmediateIntervention => "immediate_intervention",
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Trend-aware reading of a room's recent trajectory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextAnalysis {
    pub escalation_level: u8,
    pub urgency: f64,
    pub trend: f64,
    pub current_score: f64,
    pub escalating: bool,
    pub deadline_pressure: bool,
    pub recommendation: Recommendation,
}

impl ContextAnalysis {
    pub fn insufficient() -> Self {
        Self {
            escalation_level: 1,
            urgency: 0.0,
            trend: 0.0,
            current_score: 0.0,
            escalating: false,
            deadline_pressure: false,
            recommendation: Recommendation::Insufficient,
        }
    }
}
