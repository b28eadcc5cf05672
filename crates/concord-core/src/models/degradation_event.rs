use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A detector fell back to a zero signal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DegradationEvent {
    pub component: String,
    pub failure: String,
    pub fallback_used: String,
    pub timestamp: DateTime<Utc>,
}
