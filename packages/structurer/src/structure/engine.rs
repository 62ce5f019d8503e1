//! Single-pass structuring of cleaned statute lines.

use super::assembler::{is_lead_in, Level1Buffer, Level2Buffer, ParagraphBuffer};
use super::classifier::{classify, LineKind};
use super::context::{Level, OutlineContext, StructureReport};
use super::lookahead::lookahead_title;
use crate::types::{Head, Node, Part};

/// Forest of nodes built from one document plus non-fatal observations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StructuredOutline {
    /// Part/Head/Paragraph nodes in first-marker-seen order.
    pub nodes: Vec<Node>,

    /// Dropped lines and warnings.
    pub report: StructureReport,
}

/// Build the outline of one document from its cleaned lines.
///
/// This is a pure fold over the input: no I/O, no shared state, and the same
/// input always yields the same outline.
///
/// # Examples
/// ```
/// use sbirka_structurer::structure::structure_lines;
/// use sbirka_structurer::types::Node;
///
/// let outline = structure_lines(&["§ 1", "Základní ustanovení."]);
/// let Node::Paragraph(paragraph) = &outline.nodes[0] else { unreachable!() };
/// assert_eq!(paragraph.identifier, "§ 1");
/// assert_eq!(paragraph.text, "Základní ustanovení.");
/// ```
pub fn structure_lines<S: AsRef<str>>(lines: &[S]) -> StructuredOutline {
    let mut ctx = OutlineContext::new();
    let mut idx = 0;

    while idx < lines.len() {
        let line = lines[idx].as_ref().trim();
        if line.is_empty() {
            idx += 1;
            continue;
        }

        let classified = classify(line);
        match classified.kind {
            LineKind::Part(id) => {
                ctx.flush_from(Level::Part);
                let lookahead = lookahead_title(classified.trailing, &lines[idx + 1..]);
                tracing::debug!(line = idx, part = %id, title = %lookahead.title, "Part");
                ctx.open_part(Part::new(format!("PART {id}"), lookahead.title));
                idx += 1 + lookahead.consumed;
            }
            LineKind::Head(id) => {
                ctx.flush_from(Level::Head);
                let lookahead = lookahead_title(classified.trailing, &lines[idx + 1..]);
                tracing::debug!(line = idx, head = %id, title = %lookahead.title, "Head");
                ctx.open_head(Head::new(format!("HEAD {id}"), lookahead.title));
                idx += 1 + lookahead.consumed;
            }
            LineKind::Paragraph(number) => {
                ctx.flush_from(Level::Paragraph);
                let mut buffer = ParagraphBuffer::new(format!("§ {number}"), classified.trailing);
                idx += 1;
                if let Some(next) = lines.get(idx).map(|l| l.as_ref().trim()) {
                    if is_lead_in(next) {
                        buffer.merge_lead_in(next);
                        idx += 1;
                    }
                }
                tracing::debug!(paragraph = %buffer.identifier(), "Paragraph");
                ctx.open_paragraph(buffer);
            }
            LineKind::SubsectionL1(number) => {
                ctx.flush_from(Level::SubsectionL1);
                ctx.open_subsection_l1(Level1Buffer::new(number, classified.trailing), idx + 1);
                idx += 1;
            }
            LineKind::SubsectionL2(letter) => {
                ctx.flush_from(Level::SubsectionL2);
                ctx.open_subsection_l2(Level2Buffer::new(letter, classified.trailing), idx + 1);
                idx += 1;
            }
            LineKind::PlainText => {
                if !ctx.append_text(line) {
                    tracing::trace!(line = idx, "No open paragraph, text dropped");
                }
                idx += 1;
            }
        }
    }

    let (nodes, report) = ctx.finish();
    StructuredOutline { nodes, report }
}
