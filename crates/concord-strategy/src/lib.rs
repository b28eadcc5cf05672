//! # concord-strategy
//!
//! Turns a room's recent turns into a named conflict pattern, and a pattern
//! plus urgency and intensity into one of the five Thomas-Kilmann strategies.
//!
//! ## Pattern priority
//!
//! Rules run in a fixed order and the first match wins:
//!
//! 1. blame cycle
//! 2. issue repetition
//! 3. defensive spiral
//! 4. deadline pressure
//! 5. female interrupted
//! 6. female credit stolen
//! 7. female ignored
//! 8. male dominance
//! 9. aggressive context
//! 10. escalating
//! 11. expression difficulty

pub mod classifier;
pub mod selector;

pub use classifier::{PatternClassifier, PatternMatch};
pub use selector::StrategySelector;
