//! Line classification for Czech statute markers.
//!
//! A line is checked against the structural patterns in a fixed order
//! (Part, Head, Paragraph, numbered subsection, lettered subsection) and the
//! first match wins. Everything else is plain text.

use regex::Regex;
use std::sync::LazyLock;

/// `ČÁST PRVNÍ`, `část II` - the identifier keeps its Unicode letters.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static PART_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*ČÁST\s+(\p{L}+)").expect("valid regex"));

/// `HLAVA IV` - roman numeral only, so `HLAVA DRUHÁ` is not a Head.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static HEAD_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*HLAVA\s+([IVXLCDM]+)\b").expect("valid regex"));

/// `§ 1`, `§12a`.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static PARAGRAPH_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*§\s*(\d+[a-z]?)").expect("valid regex"));

/// `(1)`.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static SUBSECTION_L1_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\((\d+)\)").expect("valid regex"));

/// `a)`.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static SUBSECTION_L2_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*([a-z])\)").expect("valid regex"));

/// Kind of a classified line with its captured identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    /// Part marker; carries the identifier token (e.g. `PRVNÍ`).
    Part(String),
    /// Head marker; carries the roman numeral.
    Head(String),
    /// Paragraph marker; carries the number with optional letter (e.g. `12a`).
    Paragraph(String),
    /// Numbered subsection; carries the digit group.
    SubsectionL1(String),
    /// Lettered subsection; carries the letter.
    SubsectionL2(String),
    /// No structural marker.
    PlainText,
}

impl LineKind {
    /// Whether the line opens a new node at any level.
    #[must_use]
    pub fn is_marker(&self) -> bool {
        !matches!(self, Self::PlainText)
    }

    /// Whether the line opens a Part, Head or Paragraph.
    ///
    /// These end a title lookahead and the metadata title scan.
    #[must_use]
    pub fn is_division(&self) -> bool {
        matches!(self, Self::Part(_) | Self::Head(_) | Self::Paragraph(_))
    }
}

/// Result of classifying one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classified<'a> {
    /// The marker kind.
    pub kind: LineKind,

    /// Trimmed text after the marker; the whole trimmed line for plain text.
    pub trailing: &'a str,
}

/// Classify one line.
///
/// # Examples
/// ```
/// use sbirka_structurer::structure::{classify, LineKind};
///
/// let classified = classify("§ 12a Zmocnění");
/// assert_eq!(classified.kind, LineKind::Paragraph("12a".to_string()));
/// assert_eq!(classified.trailing, "Zmocnění");
/// ```
#[must_use]
pub fn classify(line: &str) -> Classified<'_> {
    let patterns: [(&Regex, fn(String) -> LineKind); 5] = [
        (&*PART_PATTERN, LineKind::Part),
        (&*HEAD_PATTERN, LineKind::Head),
        (&*PARAGRAPH_PATTERN, LineKind::Paragraph),
        (&*SUBSECTION_L1_PATTERN, LineKind::SubsectionL1),
        (&*SUBSECTION_L2_PATTERN, LineKind::SubsectionL2),
    ];

    for (pattern, make_kind) in patterns {
        if let Some(caps) = pattern.captures(line) {
            let (Some(whole), Some(id)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            return Classified {
                kind: make_kind(id.as_str().to_string()),
                trailing: line[whole.end()..].trim(),
            };
        }
    }

    Classified {
        kind: LineKind::PlainText,
        trailing: line.trim(),
    }
}
