pub mod semantic;

pub use semantic::{ISemanticClassifier, NoSemanticClassifier, SemanticScore};
