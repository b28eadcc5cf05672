//! RoomSession: the explicit per-room context passed through the pipeline.

use chrono::{DateTime, Utc};

use concord_core::config::{ThrottleConfig, WindowConfig};

use crate::throttle::InterventionThrottle;
use crate::window::ConversationWindow;

/// Owned state for one room. Created on the room's first message,
/// dropped on room teardown.
#[derive(Debug, Clone)]
pub struct RoomSession {
    pub window: ConversationWindow,
    pub throttle: InterventionThrottle,
    pub created_at: DateTime<Utc>,
    pub messages_processed: u64,
    pub interventions: u64,
}

impl RoomSession {
    pub fn new(room_id: &str, window: &WindowConfig, throttle: &ThrottleConfig) -> Self {
        Self {
            window: ConversationWindow::from_config(room_id, window),
            throttle: InterventionThrottle::new(throttle),
            created_at: Utc::now(),
            messages_processed: 0,
            interventions: 0,
        }
    }

    pub fn room_id(&self) -> &str {
        self.window.room_id()
    }
}
