//! # concord-engine
//!
//! The moderation pipeline behind one entry point:
//!
//! ```text
//! message -> detectors (prior window) -> early decision? -> semantic (timed)
//!         -> window.add -> classify + analyze -> fuse against dynamic threshold
//!         -> urgency + TKI strategy -> throttle gate -> FusedDecision
//! ```
//!
//! [`ModerationEngine::process`] never fails. Detector errors and timeouts
//! become zero signals; a room without enough history gets a silent decision.

pub mod cache;
pub mod engine;

pub use cache::{CachedDecision, DecisionCache};
pub use engine::ModerationEngine;
