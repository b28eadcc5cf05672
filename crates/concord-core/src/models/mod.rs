pub mod analysis;
pub mod decision;
pub mod degradation_event;
pub mod message;
pub mod participant;
pub mod pattern;
pub mod signal;
pub mod strategy;
pub mod throttle_verdict;

pub use analysis::{ContextAnalysis, Recommendation};
pub use decision::{ConfidenceBand, FusedDecision};
pub use degradation_event::DegradationEvent;
pub use message::{Gender, Message};
pub use participant::ParticipantState;
pub use pattern::ConflictPattern;
pub use signal::{Signal, SignalKind};
pub use strategy::TkiStrategy;
pub use throttle_verdict::ThrottleVerdict;
