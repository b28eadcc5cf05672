//! RoomRegistry: concurrent per-room access via DashMap.
//!
//! Each room sits behind its own async mutex so that messages for one room
//! are processed strictly in order while different rooms run concurrently.
//! Callers clone the `Arc` out of the map before awaiting the lock; no
//! DashMap guard is ever held across an await point.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;

use concord_core::config::{ThrottleConfig, WindowConfig};

use crate::room::RoomSession;

pub struct RoomRegistry {
    rooms: Arc<DashMap<String, Arc<Mutex<RoomSession>>>>,
    window: WindowConfig,
    throttle: ThrottleConfig,
}

impl RoomRegistry {
    pub fn new(window: WindowConfig, throttle: ThrottleConfig) -> Self {
        Self {
            rooms: Arc::new(DashMap::new()),
            window,
            throttle,
        }
    }

    /// Handle to a room, creating it on first use.
    pub fn room(&self, room_id: &str) -> Arc<Mutex<RoomSession>> {
        if let Some(existing) = self.rooms.get(room_id) {
            return Arc::clone(existing.value());
        }
        let entry = self.rooms.entry(room_id.to_string()).or_insert_with(|| {
            tracing::debug!(room_id = %room_id, "room opened");
            Arc::new(Mutex::new(RoomSession::new(
                room_id,
                &self.window,
                &self.throttle,
            )))
        });
        Arc::clone(entry.value())
    }

    /// Existing room handle, without creating one.
    pub fn get(&self, room_id: &str) -> Option<Arc<Mutex<RoomSession>>> {
        self.rooms.get(room_id).map(|r| Arc::clone(r.value()))
    }

    /// Tear a room down. In-flight holders of the handle finish on the old state.
    pub fn close_room(&self, room_id: &str) -> bool {
        let removed = self.rooms.remove(room_id).is_some();
        if removed {
            tracing::debug!(room_id = %room_id, "room closed");
        }
        removed
    }

    pub fn contains(&self, room_id: &str) -> bool {
        self.rooms.contains_key(room_id)
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }
}

impl Default for RoomRegistry {
    fn default() -> Self {
        Self::new(WindowConfig::default(), ThrottleConfig::default())
    }
}
