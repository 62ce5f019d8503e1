//! Line cleaning: strips page furniture from extracted text.
//!
//! The extractor emits page separators, page numbers, the running header of
//! the collection and a copyright footer on every page. None of these carry
//! statute content.

use regex::Regex;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

/// Page separator lines, e.g. `-- PAGE 3 --`.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static PAGE_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-+ PAGE \d+ -+$").expect("valid regex"));

/// Page number lines, e.g. `Strana 12`.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static PAGE_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^strana \d+$").expect("valid regex"));

const COPYRIGHT_FOOTER: &str = "© Ministerstvo vnitra";

/// Whether a trimmed line is page furniture.
fn is_boilerplate(line: &str) -> bool {
    if PAGE_SEPARATOR.is_match(line) || PAGE_NUMBER.is_match(line) {
        return true;
    }
    if line.contains(COPYRIGHT_FOOTER) {
        return true;
    }
    let lower = line.to_lowercase();
    lower.contains("sbírka zákonů") && lower.contains("ročník")
}

/// Clean raw text lines.
///
/// Lines are NFC-normalized and trimmed; empty lines and page furniture are
/// removed. The order of the surviving lines is unchanged.
///
/// # Examples
/// ```
/// use sbirka_structurer::cleaning::clean_lines;
///
/// let cleaned = clean_lines(["  § 1  ", "", "Strana 2", "Text."]);
/// assert_eq!(cleaned, vec!["§ 1", "Text."]);
/// ```
pub fn clean_lines<I, S>(lines: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut removed = 0usize;
    let cleaned: Vec<String> = lines
        .into_iter()
        .filter_map(|line| {
            let normalized: String = line.as_ref().nfc().collect();
            let trimmed = normalized.trim();
            if trimmed.is_empty() {
                return None;
            }
            if is_boilerplate(trimmed) {
                removed += 1;
                return None;
            }
            Some(trimmed.to_string())
        })
        .collect();

    tracing::debug!(kept = cleaned.len(), removed, "Cleaned document lines");
    cleaned
}
