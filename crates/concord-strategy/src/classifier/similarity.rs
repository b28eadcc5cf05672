//! Lexical overlap between two messages.

use std::collections::HashSet;

/// Jaccard similarity over lowercased whitespace tokens.
pub fn jaccard(a: &[String], b: &[String]) -> f64 {
    let a: HashSet<&str> = a.iter().map(String::as_str).collect();
    let b: HashSet<&str> = b.iter().map(String::as_str).collect();
    if a.is_empty() && b.is_empty() {
        return 0.0;
    }
    let intersection = a.intersection(&b).count() as f64;
    let union = a.union(&b).count() as f64;
    intersection / union
}

/// Content words (four or more characters) shared by both token lists.
pub fn shares_content_word(a: &[String], b: &[String]) -> bool {
    a.iter()
        .filter(|w| w.chars().count() >= 4)
        .any(|w| b.contains(w))
}
