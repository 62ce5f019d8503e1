//! Hierarchical context: the active node per level and the flush cascade.
//!
//! The context is a fixed-depth stack with one typed slot per level. Opening
//! a node at some level first flushes every active node at that level or
//! deeper, deepest first, so a shallower flush always sees its finished
//! children.

use super::assembler::{Level1Buffer, Level2Buffer, ParagraphBuffer};
use crate::types::{Head, Node, Part, Subsection};

/// Structural level, ordered from shallowest to deepest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Part,
    Head,
    Paragraph,
    SubsectionL1,
    SubsectionL2,
}

/// Deepest active level of the context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextState {
    Root,
    InPart,
    InHead,
    InParagraph,
    InSubsectionL1,
    InSubsectionL2,
}

/// Non-fatal observations made while structuring a document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StructureReport {
    /// Plain-text lines that arrived while no Paragraph was open.
    pub dropped_lines: usize,

    /// Human-readable warnings, e.g. subsections outside any Paragraph.
    pub warnings: Vec<String>,
}

/// Owner of all in-progress nodes of one document.
#[derive(Debug, Default)]
pub struct OutlineContext {
    forest: Vec<Node>,
    part: Option<Part>,
    head: Option<Head>,
    paragraph: Option<ParagraphBuffer>,
    sub1: Option<Level1Buffer>,
    sub2: Option<Level2Buffer>,
    report: StructureReport,
}

impl OutlineContext {
    /// Create an empty context in the root state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Deepest currently active level.
    #[must_use]
    pub fn state(&self) -> ContextState {
        if self.sub2.is_some() {
            ContextState::InSubsectionL2
        } else if self.sub1.is_some() {
            ContextState::InSubsectionL1
        } else if self.paragraph.is_some() {
            ContextState::InParagraph
        } else if self.head.is_some() {
            ContextState::InHead
        } else if self.part.is_some() {
            ContextState::InPart
        } else {
            ContextState::Root
        }
    }

    /// Flush every active node at `level` or deeper, deepest first.
    pub fn flush_from(&mut self, level: Level) {
        self.flush_subsection_l2();
        if level <= Level::SubsectionL1 {
            self.flush_subsection_l1();
        }
        if level <= Level::Paragraph {
            self.flush_paragraph();
        }
        if level <= Level::Head {
            self.flush_head();
        }
        if level <= Level::Part {
            self.flush_part();
        }
    }

    /// Open a new Part. Callers flush from [`Level::Part`] first.
    pub fn open_part(&mut self, part: Part) {
        debug_assert!(self.part.is_none() && self.head.is_none() && self.paragraph.is_none());
        self.part = Some(part);
    }

    /// Open a new Head. Callers flush from [`Level::Head`] first.
    pub fn open_head(&mut self, head: Head) {
        debug_assert!(self.head.is_none() && self.paragraph.is_none());
        self.head = Some(head);
    }

    /// Open a new Paragraph. Callers flush from [`Level::Paragraph`] first.
    pub fn open_paragraph(&mut self, paragraph: ParagraphBuffer) {
        debug_assert!(self.paragraph.is_none() && self.sub1.is_none());
        self.paragraph = Some(paragraph);
    }

    /// Open a numbered subsection inside the active Paragraph.
    ///
    /// Returns `false` and records a warning when no Paragraph is open.
    pub fn open_subsection_l1(&mut self, buffer: Level1Buffer, line_no: usize) -> bool {
        if self.paragraph.is_none() {
            self.warn_orphan("numbered", line_no);
            return false;
        }
        self.sub1 = Some(buffer);
        true
    }

    /// Open a lettered subsection inside the active numbered subsection or
    /// Paragraph.
    ///
    /// Returns `false` and records a warning when no Paragraph is open.
    pub fn open_subsection_l2(&mut self, buffer: Level2Buffer, line_no: usize) -> bool {
        if self.paragraph.is_none() {
            self.warn_orphan("lettered", line_no);
            return false;
        }
        self.sub2 = Some(buffer);
        true
    }

    /// Append a plain-text line to the deepest active text buffer.
    ///
    /// Returns `false` when no Paragraph-level container is open; the line is
    /// dropped and counted.
    pub fn append_text(&mut self, line: &str) -> bool {
        if let Some(sub2) = self.sub2.as_mut() {
            sub2.push_text(line);
        } else if let Some(sub1) = self.sub1.as_mut() {
            sub1.push_text(line);
        } else if let Some(paragraph) = self.paragraph.as_mut() {
            paragraph.push_text(line);
        } else {
            self.report.dropped_lines += 1;
            return false;
        }
        true
    }

    /// Flush everything still active and return the forest with the report.
    #[must_use]
    pub fn finish(mut self) -> (Vec<Node>, StructureReport) {
        self.flush_from(Level::Part);
        (self.forest, self.report)
    }

    fn warn_orphan(&mut self, kind: &str, line_no: usize) {
        tracing::warn!(line = line_no, kind, "Subsection marker outside any paragraph, dropped");
        self.report.warnings.push(format!(
            "line {line_no}: {kind} subsection outside any paragraph was dropped"
        ));
    }

    fn flush_subsection_l2(&mut self) {
        let Some(buffer) = self.sub2.take() else {
            return;
        };
        let finished = buffer.finish();
        if let Some(sub1) = self.sub1.as_mut() {
            sub1.push_lettered(finished);
        } else if let Some(paragraph) = self.paragraph.as_mut() {
            paragraph.push_subsection(Subsection::Level2(finished));
        }
    }

    fn flush_subsection_l1(&mut self) {
        let Some(buffer) = self.sub1.take() else {
            return;
        };
        let finished = buffer.finish();
        if let Some(paragraph) = self.paragraph.as_mut() {
            paragraph.push_subsection(Subsection::Level1(finished));
        }
    }

    fn flush_paragraph(&mut self) {
        let Some(buffer) = self.paragraph.take() else {
            return;
        };
        let finished = buffer.finish();
        tracing::trace!(identifier = %finished.identifier, "Flushed paragraph");
        if let Some(head) = self.head.as_mut() {
            head.paragraphs.push(finished);
        } else if let Some(part) = self.part.as_mut() {
            part.paragraphs.push(finished);
        } else {
            self.forest.push(Node::Paragraph(finished));
        }
    }

    fn flush_head(&mut self) {
        let Some(head) = self.head.take() else {
            return;
        };
        tracing::trace!(identifier = %head.identifier, "Flushed head");
        if let Some(part) = self.part.as_mut() {
            part.heads.push(head);
        } else {
            self.forest.push(Node::Head(head));
        }
    }

    fn flush_part(&mut self) {
        if let Some(part) = self.part.take() {
            tracing::trace!(identifier = %part.identifier, "Flushed part");
            self.forest.push(Node::Part(part));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_is_root() {
        assert_eq!(OutlineContext::new().state(), ContextState::Root);
    }

    #[test]
    fn test_state_tracks_deepest_level() {
        let mut ctx = OutlineContext::new();
        ctx.open_part(Part::new("PART I", ""));
        assert_eq!(ctx.state(), ContextState::InPart);
        ctx.open_head(Head::new("HEAD I", ""));
        assert_eq!(ctx.state(), ContextState::InHead);
        ctx.open_paragraph(ParagraphBuffer::new("§ 1", ""));
        assert_eq!(ctx.state(), ContextState::InParagraph);
        assert!(ctx.open_subsection_l1(Level1Buffer::new("1", ""), 4));
        assert_eq!(ctx.state(), ContextState::InSubsectionL1);
        assert!(ctx.open_subsection_l2(Level2Buffer::new("a", ""), 5));
        assert_eq!(ctx.state(), ContextState::InSubsectionL2);

        ctx.flush_from(Level::Paragraph);
        assert_eq!(ctx.state(), ContextState::InHead);
    }

    #[test]
    fn test_paragraph_attaches_to_head_before_part() {
        let mut ctx = OutlineContext::new();
        ctx.open_part(Part::new("PART I", ""));
        ctx.open_head(Head::new("HEAD I", ""));
        ctx.open_paragraph(ParagraphBuffer::new("§ 1", "text"));
        let (forest, _) = ctx.finish();

        assert_eq!(forest.len(), 1);
        let Node::Part(part) = &forest[0] else {
            panic!("expected part");
        };
        assert!(part.paragraphs.is_empty());
        assert_eq!(part.heads.len(), 1);
        assert_eq!(part.heads[0].paragraphs[0].identifier, "§ 1");
    }

    #[test]
    fn test_head_without_part_goes_to_root() {
        let mut ctx = OutlineContext::new();
        ctx.open_head(Head::new("HEAD II", "Název"));
        let (forest, _) = ctx.finish();
        assert!(matches!(&forest[0], Node::Head(h) if h.identifier == "HEAD II"));
    }

    #[test]
    fn test_flush_is_noop_when_nothing_active() {
        let mut ctx = OutlineContext::new();
        ctx.flush_from(Level::Part);
        ctx.flush_from(Level::SubsectionL2);
        let (forest, report) = ctx.finish();
        assert!(forest.is_empty());
        assert_eq!(report, StructureReport::default());
    }

    #[test]
    fn test_text_without_container_is_dropped() {
        let mut ctx = OutlineContext::new();
        assert!(!ctx.append_text("preambule"));
        ctx.open_part(Part::new("PART I", ""));
        assert!(!ctx.append_text("text v části"));
        let (_, report) = ctx.finish();
        assert_eq!(report.dropped_lines, 2);
    }

    #[test]
    fn test_orphan_subsection_records_warning() {
        let mut ctx = OutlineContext::new();
        assert!(!ctx.open_subsection_l1(Level1Buffer::new("1", "x"), 7));
        assert!(!ctx.open_subsection_l2(Level2Buffer::new("a", "y"), 8));
        let (forest, report) = ctx.finish();
        assert!(forest.is_empty());
        assert_eq!(report.warnings.len(), 2);
        assert!(report.warnings[0].starts_with("line 7"));
    }

    #[test]
    fn test_lettered_flushes_into_numbered() {
        let mut ctx = OutlineContext::new();
        ctx.open_paragraph(ParagraphBuffer::new("§ 1", ""));
        ctx.open_subsection_l1(Level1Buffer::new("1", "Úvod:"), 2);
        ctx.open_subsection_l2(Level2Buffer::new("a", "první"), 3);
        ctx.flush_from(Level::SubsectionL2);
        assert_eq!(ctx.state(), ContextState::InSubsectionL1);
        let (forest, _) = ctx.finish();

        let Node::Paragraph(paragraph) = &forest[0] else {
            panic!("expected paragraph");
        };
        assert_eq!(paragraph.subsections.len(), 1);
        assert!(matches!(paragraph.subsections[0], Subsection::Level1(_)));
    }
}
