//! Rules over what is being said: blame, repetition, defensiveness,
//! deadlines, aggression, escalation.

use concord_core::lexicon::{ACCUSATION_RE, AGGRESSIVE_RE, DEFENSIVE_RE, STEREOTYPE_RE};
use concord_core::models::Message;
use concord_session::analysis::has_deadline_pressure;
use concord_session::ConversationWindow;

use super::similarity::jaccard;

/// Turns inspected for a blame cycle.
const BLAME_LOOKBACK: usize = 4;
/// Author-switching exchanges needed for a cycle.
const BLAME_EXCHANGES: usize = 2;
/// Overlap above which two messages restate the same concern.
const REPETITION_SIMILARITY: f64 = 0.6;
/// Messages shorter than this never count as a restated concern.
const REPETITION_MIN_TOKENS: usize = 3;
/// Score the newest message must exceed for an escalation to matter.
const ESCALATION_FLOOR: f64 = 0.3;

fn is_accusation(m: &Message) -> bool {
    ACCUSATION_RE.is_match(&m.content)
}

fn is_marked(m: &Message) -> bool {
    is_accusation(m) || DEFENSIVE_RE.is_match(&m.content)
}

/// Accusation and defense trading places across consecutive turns by
/// different speakers.
pub fn blame_cycle(window: &ConversationWindow) -> Option<String> {
    let recent = window.recent(BLAME_LOOKBACK);
    let exchanges = recent
        .windows(2)
        .filter(|pair| pair[0].author != pair[1].author && is_marked(pair[0]) && is_marked(pair[1]))
        .count();
    let accusations = recent.iter().filter(|m| is_accusation(m)).count();
    (exchanges >= BLAME_EXCHANGES && accusations > 0).then(|| {
        format!("{exchanges} accusation/defense exchanges across {} turns", recent.len())
    })
}

/// Two recent messages restating the same thing.
pub fn issue_repetition(window: &ConversationWindow, lookback: usize) -> Option<String> {
    let tokens: Vec<Vec<String>> = window
        .recent(lookback)
        .iter()
        .map(|m| m.tokens())
        .filter(|t| t.len() >= REPETITION_MIN_TOKENS)
        .collect();
    for (i, a) in tokens.iter().enumerate() {
        for b in &tokens[i + 1..] {
            let sim = jaccard(a, b);
            if sim > REPETITION_SIMILARITY {
                return Some(format!("repeated concern (overlap {sim:.2})"));
            }
        }
    }
    None
}

/// At least two of the last three turns push back.
pub fn defensive_spiral(window: &ConversationWindow) -> Option<String> {
    let defensive = window
        .recent(3)
        .iter()
        .filter(|m| DEFENSIVE_RE.is_match(&m.content))
        .count();
    (defensive >= 2).then(|| format!("{defensive} of the last 3 turns are defensive"))
}

pub fn deadline_pressure(window: &ConversationWindow) -> Option<String> {
    has_deadline_pressure(window).then(|| "repeated deadline references".to_string())
}

/// Openly aggressive or stereotyping language in the newest message.
pub fn aggressive_context(window: &ConversationWindow) -> Option<String> {
    let latest = window.latest()?;
    if STEREOTYPE_RE.is_match(&latest.content) {
        return Some(format!("{} used a gender stereotype", latest.author));
    }
    AGGRESSIVE_RE
        .find(&latest.content)
        .map(|m| format!("{} said \"{}\"", latest.author, m.as_str()))
}

/// Three strictly rising trajectory scores ending hot enough to matter.
pub fn escalating(window: &ConversationWindow) -> Option<String> {
    (window.is_escalating() && window.current_score() > ESCALATION_FLOOR).then(|| {
        let s = window.recent_scores(3);
        format!("scores rising {:.2} -> {:.2} -> {:.2}", s[0], s[1], s[2])
    })
}
