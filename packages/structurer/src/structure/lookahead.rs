//! Bounded title lookahead for Part and Head markers.

use super::classifier::classify;
use crate::config::TITLE_LOOKAHEAD_LINES;

/// Title decided by the lookahead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleLookahead {
    /// Space-joined title; empty when no line qualified.
    pub title: String,

    /// Number of following lines consumed as title.
    pub consumed: usize,
}

/// Decide which of the lines following a Part/Head marker form its title.
///
/// At most [`TITLE_LOOKAHEAD_LINES`] lines are examined. Candidates are
/// absorbed in order until one classifies as a Part, Head or Paragraph
/// marker. Text after the marker on the marker line itself leads the title.
///
/// # Arguments
/// * `inline` - Trimmed text after the marker on the marker line
/// * `following` - Lines after the marker line
pub fn lookahead_title<S: AsRef<str>>(inline: &str, following: &[S]) -> TitleLookahead {
    let mut parts: Vec<&str> = Vec::new();
    if !inline.is_empty() {
        parts.push(inline);
    }

    let mut consumed = 0;
    for candidate in following.iter().take(TITLE_LOOKAHEAD_LINES) {
        let candidate = candidate.as_ref().trim();
        if classify(candidate).kind.is_division() {
            break;
        }
        if !candidate.is_empty() {
            parts.push(candidate);
        }
        consumed += 1;
    }

    TitleLookahead {
        title: parts.join(" "),
        consumed,
    }
}
