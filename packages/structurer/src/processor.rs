//! Per-document pipeline: read, clean, structure, extract metadata.

use std::path::Path;

use crate::cleaning::clean_lines;
use crate::error::Result;
use crate::metadata::extract_metadata;
use crate::source::TextSource;
use crate::structure::{structure_lines, StructureReport};
use crate::types::DocumentRecord;

/// Record of one processed document plus the structuring observations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedDocument {
    /// The output record.
    pub record: DocumentRecord,

    /// Dropped lines and warnings collected while structuring.
    pub report: StructureReport,
}

/// Build the record for a document whose raw lines are already in memory.
///
/// # Arguments
/// * `raw_lines` - Uncleaned lines in document order
/// * `source_file` - Base name stored in the metadata
///
/// # Examples
/// ```
/// use sbirka_structurer::processor::process_lines;
///
/// let doc = process_lines(&["101/2000 Sb.", "§ 1", "Text."], "zakon.txt");
/// assert_eq!(doc.record.metadata.law_id, "101/2000 Sb.");
/// assert_eq!(doc.record.structured_text.len(), 1);
/// ```
pub fn process_lines<S: AsRef<str>>(raw_lines: &[S], source_file: &str) -> ProcessedDocument {
    let lines = clean_lines(raw_lines);

    let mut metadata = extract_metadata(&lines);
    metadata.source_file = source_file.to_string();

    let outline = structure_lines(&lines);
    for warning in &outline.report.warnings {
        tracing::debug!(source = source_file, "{warning}");
    }
    if outline.report.dropped_lines > 0 {
        tracing::debug!(
            source = source_file,
            dropped = outline.report.dropped_lines,
            "Lines outside any paragraph were dropped"
        );
    }

    ProcessedDocument {
        record: DocumentRecord {
            metadata,
            text_content: lines,
            structured_text: outline.nodes,
        },
        report: outline.report,
    }
}

/// Read a document through `source` and build its record.
pub fn process_document(source: &dyn TextSource, path: &Path) -> Result<ProcessedDocument> {
    let raw_lines = source.read_lines(path)?;
    let source_file = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    Ok(process_lines(&raw_lines, &source_file))
}
