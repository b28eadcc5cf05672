//! Structural rules keyed off author gender: who gets cut off, ignored,
//! talked over, or has their point restated by someone else.

use concord_core::lexicon::{
    count_matches, ACKNOWLEDGMENT_RE, CREDIT_CLAIM_RE, HEDGE_RE, INTERRUPTION_RE,
};
use concord_core::models::Gender;
use concord_session::ConversationWindow;

use super::similarity::{jaccard, shares_content_word};

/// Turns before the newest one searched for a cut-off female message.
const INTERRUPT_LOOKBACK: usize = 3;
/// Characters a message needs before it reads as a point in progress.
const INTERRUPTED_MIN_CHARS: usize = 20;
/// Turns searched for an earlier female point that was restated.
const CREDIT_LOOKBACK: usize = 5;
/// Overlap above which a restatement counts as taking credit.
const CREDIT_SIMILARITY: f64 = 0.5;
/// Tokens a message needs before overlap with it means anything.
const CREDIT_MIN_TOKENS: usize = 4;
/// Tokens a female message needs before going unanswered counts.
const IGNORED_MIN_TOKENS: usize = 4;
/// Turns inspected for one male speaker holding the floor.
const DOMINANCE_LOOKBACK: usize = 8;
const DOMINANCE_MIN_TURNS: usize = 4;
const DOMINANCE_SHARE: f64 = 0.6;
/// Male share of recent turns at which a mixed room reads as lopsided.
const IMBALANCE_SHARE: f64 = 0.75;
/// Hedges in one message that suggest struggling to get a point out.
const HEDGE_HITS: usize = 2;

/// A male speaker cut off a female speaker mid-thought, or opened with
/// an interruption right after her.
pub fn female_interrupted(window: &ConversationWindow) -> Option<String> {
    let recent = window.recent(INTERRUPT_LOOKBACK + 1);
    let (current, before) = recent.split_last()?;
    if current.gender != Gender::Male {
        return None;
    }
    if let Some(prev) = before.last() {
        if prev.gender == Gender::Female
            && prev.author != current.author
            && INTERRUPTION_RE.is_match(&current.content)
        {
            return Some(format!("{} cut in on {}", current.author, prev.author));
        }
    }
    before
        .iter()
        .rev()
        .find(|m| {
            m.gender == Gender::Female
                && m.author != current.author
                && m.char_count() > INTERRUPTED_MIN_CHARS
                && !m.is_complete_sentence()
        })
        .map(|m| format!("{} left unfinished before {} spoke", m.author, current.author))
}

/// A male speaker restated or claimed an earlier female point.
pub fn female_credit_stolen(window: &ConversationWindow) -> Option<String> {
    let recent = window.recent(CREDIT_LOOKBACK + 1);
    let (current, before) = recent.split_last()?;
    if current.gender != Gender::Male {
        return None;
    }
    let mut earlier_female = before
        .iter()
        .filter(|m| m.gender == Gender::Female && m.author != current.author)
        .peekable();
    earlier_female.peek()?;

    if CREDIT_CLAIM_RE.is_match(&current.content) {
        return Some(format!("{} claimed a point already raised", current.author));
    }
    let current_tokens = current.tokens();
    if current_tokens.len() < CREDIT_MIN_TOKENS {
        return None;
    }
    earlier_female
        .find(|m| {
            let tokens = m.tokens();
            tokens.len() >= CREDIT_MIN_TOKENS && jaccard(&tokens, &current_tokens) > CREDIT_SIMILARITY
        })
        .map(|m| format!("{} restated {}'s point", current.author, m.author))
}

/// A female point went unanswered: the next male speaker neither
/// acknowledged it nor picked up any of its content.
pub fn female_ignored(window: &ConversationWindow) -> Option<String> {
    let recent = window.recent(2);
    let [prev, current] = recent.as_slice() else {
        return None;
    };
    if prev.gender != Gender::Female
        || current.gender != Gender::Male
        || prev.author == current.author
    {
        return None;
    }
    let prev_tokens = prev.tokens();
    if prev_tokens.len() < IGNORED_MIN_TOKENS {
        return None;
    }
    if ACKNOWLEDGMENT_RE.is_match(&current.content)
        || shares_content_word(&prev_tokens, &current.tokens())
    {
        return None;
    }
    Some(format!("{} moved on from {}'s point", current.author, prev.author))
}

/// One male speaker holds more than 60% of recent turns.
pub fn male_dominance(window: &ConversationWindow) -> Option<String> {
    if window.recent(DOMINANCE_LOOKBACK).len() < DOMINANCE_MIN_TURNS {
        return None;
    }
    let (speaker, share) = window.dominant_speaker(DOMINANCE_LOOKBACK)?;
    let is_male = window
        .participant_state(&speaker)
        .is_some_and(|p| p.gender == Gender::Male);
    (is_male && share > DOMINANCE_SHARE)
        .then(|| format!("{speaker} holds {:.0}% of recent turns", share * 100.0))
}

/// Three male turns in a row, whoever spoke them.
pub fn male_consecutive(window: &ConversationWindow) -> Option<String> {
    let last_three = window.recent(3);
    (last_three.len() == 3 && last_three.iter().all(|m| m.gender == Gender::Male))
        .then(|| "last three turns were all male".to_string())
}

/// Male voices fill most recent turns while a female participant is present.
pub fn gender_imbalance(window: &ConversationWindow) -> Option<String> {
    let recent = window.recent(DOMINANCE_LOOKBACK);
    let has_female = recent.iter().any(|m| m.gender == Gender::Female);
    if recent.len() < DOMINANCE_MIN_TURNS || !has_female {
        return None;
    }
    let share = window.gender_share(DOMINANCE_LOOKBACK, Gender::Male);
    (share >= IMBALANCE_SHARE)
        .then(|| format!("male speakers hold {:.0}% of recent turns", share * 100.0))
}

/// A female speaker hedging heavily.
pub fn expression_difficulty(window: &ConversationWindow) -> Option<String> {
    let latest = window.latest()?;
    if latest.gender != Gender::Female {
        return None;
    }
    let hedges = count_matches(&HEDGE_RE, &latest.content);
    (hedges >= HEDGE_HITS).then(|| format!("{} hedged {hedges} times", latest.author))
}
