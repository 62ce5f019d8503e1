//! Document-level metadata extraction.
//!
//! Runs over the same cleaned lines as the structuring engine but never
//! mutates them. Extracts:
//! - collection identifier (`101/2000 Sb.`)
//! - title following the identifier line
//! - promulgation date (`ze dne 4. dubna 2000`)
//! - effective date (`nabývá účinnosti dnem ...`)
//! - references to other statutes
//!
//! Every field is best-effort; a miss leaves the `UNKNOWN` sentinel.

use regex::Regex;
use std::sync::LazyLock;

use crate::config::{METADATA_TITLE_WINDOW, PUBLICATION_DATE_WINDOW};
use crate::structure::classify;
use crate::types::DocumentMetadata;

/// `101/2000 Sb.` anywhere on a line.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static LAW_ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+/\d{4})\s+Sb\.").expect("valid regex"));

/// Promulgation date phrase.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static PUBLICATION_DATE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)ze dne (\d{1,2}\. \w+ \d{4})").expect("valid regex"));

/// Effective date phrase; the rest of the line is the date.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static EFFECTIVE_DATE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)nabývá účinnosti dnem\s+(.*)").expect("valid regex"));

/// Leading `ze dne <d>. <month> <yyyy>` of an assembled title.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static TITLE_DATE_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*ze dne\s+\d+\.\s+\w+\s+\d{4}\s*").expect("valid regex"));

/// Leading document-kind word of an assembled title.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static TITLE_KIND_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(ZÁKON|VYHLÁŠKA|NAŘÍZENÍ VLÁDY)\s*").expect("valid regex"));

/// `zákona č. 89/2012 Sb.` and its inflections.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static SIMPLE_REFERENCE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(zákon(?:a|u|ě)? č\.\s*\d+/\d{4}\s*Sb\.)").expect("valid regex")
});

/// `§ 5 odst. 2 písm. a) zákona č. 89/2012 Sb.`
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static COMPOUND_REFERENCE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(§\s*\d+[a-z]?\s*(?:odst\.\s*\d+)?\s*(?:písm\.\s*[a-z]\))?\s*zákona č\.\s*\d+/\d{4}\s*Sb\.)",
    )
    .expect("valid regex")
});

/// Lexical cues that mark a line as part of the document title.
const TITLE_CUES: [&str; 3] = ["o ", "kterým se mění", "ze dne"];

/// Extract metadata from cleaned document lines.
///
/// `source_file` is left as `UNKNOWN`; the caller knows the file name.
///
/// # Examples
/// ```
/// use sbirka_structurer::metadata::extract_metadata;
///
/// let metadata = extract_metadata(&["101/2000 Sb.", "o ochraně osobních údajů", "§ 1"]);
/// assert_eq!(metadata.law_id, "101/2000 Sb.");
/// assert_eq!(metadata.title, "o ochraně osobních údajů");
/// ```
pub fn extract_metadata<S: AsRef<str>>(lines: &[S]) -> DocumentMetadata {
    let mut metadata = DocumentMetadata::default();

    if let Some((idx, law_id)) = find_law_id(lines) {
        tracing::debug!(line = idx, law_id = %law_id, "Found document identifier");
        metadata.law_id = law_id;
        if let Some(title) = find_title(lines, idx) {
            metadata.title = title;
        }
    }

    if let Some(date) = find_publication_date(lines) {
        metadata.publication_date = date;
    }

    if let Some(date) = find_effective_date(lines) {
        metadata.effective_date = date;
    }

    metadata.references = find_references(lines);
    metadata
}

/// Find the first line carrying a collection identifier.
fn find_law_id<S: AsRef<str>>(lines: &[S]) -> Option<(usize, String)> {
    lines.iter().enumerate().find_map(|(idx, line)| {
        LAW_ID_PATTERN
            .captures(line.as_ref())
            .and_then(|caps| caps.get(1))
            .map(|m| (idx, format!("{} Sb.", m.as_str())))
    })
}

/// Assemble the title from the lines following the identifier line.
///
/// Collection starts at the first line with a title cue and continues until
/// the window ends or a Part/Head/Paragraph marker appears.
fn find_title<S: AsRef<str>>(lines: &[S], id_idx: usize) -> Option<String> {
    let next = lines.get(id_idx + 1)?.as_ref().trim();
    if next.starts_with('§') {
        return None;
    }

    let mut collected: Vec<&str> = Vec::new();
    for line in lines.iter().skip(id_idx + 1).take(METADATA_TITLE_WINDOW) {
        let line = line.as_ref().trim();
        if line.starts_with('§') || classify(line).kind.is_division() {
            break;
        }
        let lower = line.to_lowercase();
        if !collected.is_empty() || TITLE_CUES.iter().any(|cue| lower.contains(cue)) {
            collected.push(line);
        }
    }

    if collected.is_empty() {
        return None;
    }

    let title = collected.join(" ");
    let title = TITLE_DATE_PREFIX.replace(title.trim(), "");
    let title = TITLE_KIND_PREFIX.replace(&title, "");
    let title = title.trim();
    (!title.is_empty()).then(|| title.to_string())
}

/// Search the leading lines for the promulgation date.
fn find_publication_date<S: AsRef<str>>(lines: &[S]) -> Option<String> {
    let head = lines
        .iter()
        .take(PUBLICATION_DATE_WINDOW)
        .map(AsRef::as_ref)
        .collect::<Vec<&str>>()
        .join(" ");
    PUBLICATION_DATE_PATTERN
        .captures(&head)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Search from the end of the document for the effective-date clause.
fn find_effective_date<S: AsRef<str>>(lines: &[S]) -> Option<String> {
    lines.iter().rev().find_map(|line| {
        EFFECTIVE_DATE_PATTERN
            .captures(line.as_ref())
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim().trim_end_matches('.').to_string())
    })
}

/// Collect references to other statutes, de-duplicated in first-seen order.
fn find_references<S: AsRef<str>>(lines: &[S]) -> Vec<String> {
    let mut references: Vec<String> = Vec::new();
    for line in lines {
        let line = line.as_ref();
        let simple = SIMPLE_REFERENCE_PATTERN.find_iter(line);
        let compound = COMPOUND_REFERENCE_PATTERN.find_iter(line);
        for found in simple.chain(compound) {
            let reference = found.as_str();
            if !references.iter().any(|r| r == reference) {
                references.push(reference.to_string());
            }
        }
    }
    references
}
