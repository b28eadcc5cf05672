//! # concord-core
//!
//! Foundation crate for the Concord conversation-moderation pipeline.
//! Defines the data model, config, errors, shared lexicon, and the
//! semantic-classifier trait. Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod lexicon;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::ConcordConfig;
pub use errors::{ConcordError, ConcordResult};
pub use models::{
    ConfidenceBand, ConflictPattern, FusedDecision, Gender, Message, Signal, SignalKind,
    ThrottleVerdict, TkiStrategy,
};
