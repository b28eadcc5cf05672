//! # concord-session
//!
//! Everything that belongs to one chat room and outlives a single message:
//!
//! - [`ConversationWindow`]: bounded history plus the per-message score trajectory
//! - [`analysis::analyze`]: trend-aware escalation level and urgency
//! - [`InterventionThrottle`]: cooldown and rolling-hour cap
//! - [`RoomRegistry`]: concurrent map of rooms, one async lock per room
//!
//! A room's state is created on its first message and dropped on
//! [`RoomRegistry::close_room`].

pub mod analysis;
pub mod registry;
pub mod room;
pub mod throttle;
pub mod window;

pub use analysis::analyze;
pub use registry::RoomRegistry;
pub use room::RoomSession;
pub use throttle::{InterventionThrottle, ThrottleState};
pub use window::{ConversationWindow, WindowEntry};
