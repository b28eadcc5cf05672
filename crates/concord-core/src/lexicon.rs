//! Shared marker vocabularies.
//!
//! Markers used by more than one crate live here: the window's breakdown
//! score, the context analysis, and the pattern classifier all read the same
//! defensive / deadline / accusation sets. Detector-only term tables stay
//! with their detector.

use std::sync::LazyLock;

use regex::Regex;

/// Accusatory framing aimed at another participant.
pub static ACCUSATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(you always|you never|your fault|you keep|you're the one|because of you|blame|you don'?t listen|you dismiss)\b",
    )
    .unwrap()
});

/// Denial and pushback. CJK markers have no word boundaries.
pub static DEFENSIVE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(\b(no|not|isn'?t|wasn'?t|didn'?t|don'?t|but|not my fault|that'?s not true|i didn'?t)\b|不是|没有|不对|但是)",
    )
    .unwrap()
});

/// Conversation-closing replies that signal disengagement.
pub static DISMISSIVE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(\b(whatever|fine|ok|okay|sure|k|if you say so|who cares|doesn'?t matter|forget it)\b|随便|算了)",
    )
    .unwrap()
});

/// Time pressure.
pub static DEADLINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(\b(deadline|due|asap|urgent|tomorrow|tonight|end of day|eod|running out of time|out of time|late)\b|截止|来不及|赶紧)",
    )
    .unwrap()
});

/// Explicit acknowledgment of the previous speaker.
pub static ACKNOWLEDGMENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(yes|yeah|right|agree|agreed|correct|indeed|good point|exactly|true|thanks)\b")
        .unwrap()
});

/// Openers that cut the previous speaker off.
pub static INTERRUPTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(wait|stop|hold on|hang on|you don'?t understand)\b").unwrap()
});

/// Phrasing that claims someone else's point.
pub static CREDIT_CLAIM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(i was just about to say|like i said|as i said|i already said|my idea)\b")
        .unwrap()
});

/// Openly aggressive phrases.
pub static AGGRESSIVE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(you are wrong|you're wrong|impossible|what do you know|stop talking|shut up)\b",
    )
    .unwrap()
});

/// Gender stereotypes aimed at participants.
pub static STEREOTYPE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(\bwomen\b.*\b(don'?t|shouldn'?t|can'?t)\b.*\b(understand|interfere|get)\b|\bfeminists?\b.*\boverreact\w*|\boverreact\w*\b.*\bfeminists?\b|\b(typical|such a) (woman|girl)\b|\blike a girl\b)",
    )
    .unwrap()
});

/// Hedging that suggests a speaker is struggling to get a point out.
pub static HEDGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(i think|maybe|perhaps|not sure|kind of|sort of|um+|uh+)\b").unwrap()
});

/// Count non-overlapping matches of `re` in `text`.
pub fn count_matches(re: &Regex, text: &str) -> usize {
    re.find_iter(text).count()
}
