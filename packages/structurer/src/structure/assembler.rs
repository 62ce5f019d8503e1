//! Text buffers for the Paragraph and subsection levels.
//!
//! Each active level owns one buffer. Buffers only ever append, so text stays
//! in document order; finishing a buffer produces the immutable node.

use super::classifier::classify;
use crate::config::CONTINUATION_MAX_WORDS;
use crate::types::{ContentItem, Paragraph, Subsection, SubsectionContent, SubsectionL1, SubsectionL2};

/// Join text pieces with single spaces and trim the result.
fn join_text<'a>(pieces: impl IntoIterator<Item = &'a str>) -> String {
    pieces
        .into_iter()
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}

/// One buffered element of a Paragraph.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ParagraphSegment {
    Text(String),
    Subsection(Subsection),
}

/// Buffer of the active Paragraph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParagraphBuffer {
    identifier: String,
    segments: Vec<ParagraphSegment>,
}

impl ParagraphBuffer {
    /// Start a Paragraph, seeding it with the marker line's trailing text.
    #[must_use]
    pub fn new(identifier: impl Into<String>, trailing: &str) -> Self {
        let mut buffer = Self {
            identifier: identifier.into(),
            segments: Vec::new(),
        };
        if !trailing.is_empty() {
            buffer.push_text(trailing);
        }
        buffer
    }

    /// Identifier of the Paragraph being assembled.
    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Append a plain-text line as a new segment.
    pub fn push_text(&mut self, line: &str) {
        self.segments.push(ParagraphSegment::Text(line.to_string()));
    }

    /// Merge a lead-in line into the last text segment.
    ///
    /// Starts a new segment when the buffer is empty or ends with a subsection.
    pub fn merge_lead_in(&mut self, line: &str) {
        match self.segments.last_mut() {
            Some(ParagraphSegment::Text(last)) => {
                last.push(' ');
                last.push_str(line);
            }
            _ => self.push_text(line),
        }
    }

    /// Append a finished subsection.
    pub fn push_subsection(&mut self, subsection: Subsection) {
        self.segments.push(ParagraphSegment::Subsection(subsection));
    }

    /// Finish the Paragraph: direct text is joined, subsections keep their order.
    #[must_use]
    pub fn finish(self) -> Paragraph {
        let mut texts: Vec<String> = Vec::new();
        let mut subsections = Vec::new();
        for segment in self.segments {
            match segment {
                ParagraphSegment::Text(text) => texts.push(text),
                ParagraphSegment::Subsection(subsection) => subsections.push(subsection),
            }
        }

        Paragraph {
            identifier: self.identifier,
            text: join_text(texts.iter().map(String::as_str)),
            subsections,
        }
    }
}

/// Whether a line directly after a Paragraph marker reads as its lead-in.
///
/// The line must not be a structural marker, must not start with `§`, `(` or
/// the `čl.` article abbreviation, and must be at most
/// [`CONTINUATION_MAX_WORDS`] words long.
#[must_use]
pub fn is_lead_in(line: &str) -> bool {
    let line = line.trim();
    if line.is_empty() || classify(line).kind.is_marker() {
        return false;
    }
    let lower = line.to_lowercase();
    if lower.starts_with('§') || lower.starts_with('(') || lower.starts_with("čl.") {
        return false;
    }
    line.split_whitespace().count() <= CONTINUATION_MAX_WORDS
}

/// Buffer of the active numbered subsection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Level1Buffer {
    identifier: String,
    items: Vec<ContentItem>,
}

impl Level1Buffer {
    /// Start a numbered subsection seeded with the marker's trailing text.
    #[must_use]
    pub fn new(identifier: impl Into<String>, trailing: &str) -> Self {
        let mut buffer = Self {
            identifier: identifier.into(),
            items: Vec::new(),
        };
        if !trailing.is_empty() {
            buffer.push_text(trailing);
        }
        buffer
    }

    /// Append a plain-text line.
    pub fn push_text(&mut self, line: &str) {
        self.items.push(ContentItem::Text(line.to_string()));
    }

    /// Append a finished lettered subsection.
    pub fn push_lettered(&mut self, subsection: SubsectionL2) {
        self.items.push(ContentItem::SubsectionL2(subsection));
    }

    /// Finish the subsection.
    ///
    /// Adjacent text lines are joined into one string; lettered subsections
    /// stay distinct. A single text run with no lettered items collapses to
    /// plain text.
    #[must_use]
    pub fn finish(self) -> SubsectionL1 {
        let mut content: Vec<ContentItem> = Vec::new();
        let mut run: Vec<String> = Vec::new();

        for item in self.items {
            match item {
                ContentItem::Text(text) => run.push(text),
                ContentItem::SubsectionL2(sub) => {
                    if !run.is_empty() {
                        content.push(ContentItem::Text(join_text(run.iter().map(String::as_str))));
                        run.clear();
                    }
                    content.push(ContentItem::SubsectionL2(sub));
                }
            }
        }
        if !run.is_empty() {
            content.push(ContentItem::Text(join_text(run.iter().map(String::as_str))));
        }

        let content = match content.as_slice() {
            [] => SubsectionContent::Text(String::new()),
            [ContentItem::Text(text)] => SubsectionContent::Text(text.clone()),
            _ => SubsectionContent::Items(content),
        };

        SubsectionL1 {
            identifier: self.identifier,
            content,
        }
    }
}

/// Buffer of the active lettered subsection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Level2Buffer {
    identifier: String,
    lines: Vec<String>,
}

impl Level2Buffer {
    /// Start a lettered subsection seeded with the marker's trailing text.
    #[must_use]
    pub fn new(identifier: impl Into<String>, trailing: &str) -> Self {
        let mut buffer = Self {
            identifier: identifier.into(),
            lines: Vec::new(),
        };
        if !trailing.is_empty() {
            buffer.push_text(trailing);
        }
        buffer
    }

    /// Append a plain-text line.
    pub fn push_text(&mut self, line: &str) {
        self.lines.push(line.to_string());
    }

    /// Finish the subsection.
    #[must_use]
    pub fn finish(self) -> SubsectionL2 {
        SubsectionL2 {
            identifier: self.identifier,
            text: join_text(self.lines.iter().map(String::as_str)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn lettered(id: &str, text: &str) -> SubsectionL2 {
        SubsectionL2 {
            identifier: id.to_string(),
            text: text.to_string(),
        }
    }

    #[test]
    fn test_paragraph_buffer_joins_text() {
        let mut buffer = ParagraphBuffer::new("§ 1", "Úvod");
        buffer.push_text("druhý řádek");
        buffer.push_text("třetí řádek.");
        let paragraph = buffer.finish();
        assert_eq!(paragraph.identifier, "§ 1");
        assert_eq!(paragraph.text, "Úvod druhý řádek třetí řádek.");
        assert!(paragraph.subsections.is_empty());
    }

    #[test]
    fn test_paragraph_buffer_empty() {
        let paragraph = ParagraphBuffer::new("§ 2", "").finish();
        assert_eq!(paragraph.text, "");
        assert!(paragraph.subsections.is_empty());
    }

    #[test]
    fn test_merge_lead_in_extends_last_text() {
        let mut buffer = ParagraphBuffer::new("§ 1", "Předmět");
        buffer.merge_lead_in("úpravy");
        assert_eq!(buffer.finish().text, "Předmět úpravy");
    }

    #[test]
    fn test_merge_lead_in_after_subsection_starts_segment() {
        let mut buffer = ParagraphBuffer::new("§ 1", "");
        buffer.push_subsection(Subsection::Level2(lettered("a", "x")));
        buffer.merge_lead_in("Nadpis");
        let paragraph = buffer.finish();
        assert_eq!(paragraph.text, "Nadpis");
        assert_eq!(paragraph.subsections.len(), 1);
    }

    #[test]
    fn test_paragraph_keeps_subsection_order() {
        let mut buffer = ParagraphBuffer::new("§ 3", "");
        buffer.push_subsection(Subsection::Level2(lettered("a", "první")));
        buffer.push_subsection(Subsection::Level1(Level1Buffer::new("1", "věta").finish()));
        let paragraph = buffer.finish();
        assert!(matches!(paragraph.subsections[0], Subsection::Level2(_)));
        assert!(matches!(paragraph.subsections[1], Subsection::Level1(_)));
    }

    #[test]
    fn test_is_lead_in() {
        assert!(is_lead_in("Základní ustanovení."));
        assert!(!is_lead_in("(1) Text"));
        assert!(!is_lead_in("a) položka"));
        assert!(!is_lead_in("§ 2"));
        assert!(!is_lead_in("Čl. 5"));
        assert!(!is_lead_in("čl. 5 odst. 2"));
        assert!(!is_lead_in("(poznámka)"));
        assert!(!is_lead_in(""));
    }

    #[test]
    fn test_is_lead_in_word_limit() {
        assert!(is_lead_in("jedna dvě tři čtyři pět šest sedm osm devět deset"));
        assert!(!is_lead_in(
            "jedna dvě tři čtyři pět šest sedm osm devět deset jedenáct"
        ));
    }

    #[test]
    fn test_level1_collapses_single_text_run() {
        let mut buffer = Level1Buffer::new("2", "Druhá");
        buffer.push_text("věta.");
        let sub = buffer.finish();
        assert_eq!(sub.content, SubsectionContent::Text("Druhá věta.".to_string()));
    }

    #[test]
    fn test_level1_empty_content() {
        let sub = Level1Buffer::new("4", "").finish();
        assert_eq!(sub.content, SubsectionContent::Text(String::new()));
    }

    #[test]
    fn test_level1_interleaves_runs_and_letters() {
        let mut buffer = Level1Buffer::new("1", "Úvod");
        buffer.push_text("pokračuje:");
        buffer.push_lettered(lettered("a", "první"));
        buffer.push_lettered(lettered("b", "druhá"));
        buffer.push_text("a závěr");
        buffer.push_text("věty.");
        let sub = buffer.finish();
        assert_eq!(
            sub.content,
            SubsectionContent::Items(vec![
                ContentItem::Text("Úvod pokračuje:".to_string()),
                ContentItem::SubsectionL2(lettered("a", "první")),
                ContentItem::SubsectionL2(lettered("b", "druhá")),
                ContentItem::Text("a závěr věty.".to_string()),
            ])
        );
    }

    #[test]
    fn test_level1_only_letters_stays_list() {
        let mut buffer = Level1Buffer::new("1", "");
        buffer.push_lettered(lettered("a", "jen"));
        let sub = buffer.finish();
        assert_eq!(
            sub.content,
            SubsectionContent::Items(vec![ContentItem::SubsectionL2(lettered("a", "jen"))])
        );
    }

    #[test]
    fn test_level2_buffer() {
        let mut buffer = Level2Buffer::new("c", "třetí");
        buffer.push_text("položka");
        assert_eq!(buffer.finish(), lettered("c", "třetí položka"));
    }
}
