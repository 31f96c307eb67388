//! Extraction of the structured `Feedback:` / `Score:` pair from a raw
//! completion.

use once_cell::sync::Lazy;
use regex::Regex;

static FEEDBACK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?s)Feedback: "(.*?)""#).expect("feedback regex is valid"));
static SCORE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Score: (\d+)").expect("score regex is valid"));

/// A successfully extracted feedback message and raw score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedFeedback {
    pub message: String,
    /// Raw provider score, clamped to 0..=100.
    pub score: u8,
}

/// Extracts the feedback/score pair. Both fields must parse; a response
/// missing either is unusable and the caller treats it as a failed call.
pub fn parse_feedback(content: &str) -> Option<ParsedFeedback> {
    let message = FEEDBACK_RE
        .captures(content)?
        .get(1)?
        .as_str()
        .trim()
        .to_string();
    if message.is_empty() {
        return None;
    }

    let score: u16 = SCORE_RE.captures(content)?.get(1)?.as_str().parse().ok()?;

    Some(ParsedFeedback {
        message,
        score: score.min(100) as u8,
    })
}
