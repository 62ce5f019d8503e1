//! Text sources: where a document's raw lines come from.
//!
//! Structuring operates on lines only. Decoding a binary document format is
//! the job of a [`TextSource`] implementation. [`PlainTextSource`] reads text
//! that was already extracted to a UTF-8 file, [`PdfTextSource`] pulls the
//! text out of PDF content streams page by page, and [`DocumentSource`]
//! picks between them by file extension.

use std::fs;
use std::io;
use std::path::Path;

use lopdf::content::Content;
use lopdf::{Document, Object, ObjectId};

use crate::config::is_pdf_file;
use crate::error::{Result, StructurerError};

/// Page separator emitted by common PDF-to-text extractors.
const PAGE_BREAK: char = '\x0c';

/// `TJ` adjustment (thousandths of a text unit) wide enough to read as a space.
const WORD_GAP_ADJUSTMENT: f32 = 200.0;

/// Provider of raw, uncleaned document lines.
pub trait TextSource {
    /// Read every line of the document at `path`, in document order.
    fn read_lines(&self, path: &Path) -> Result<Vec<String>>;
}

/// Reads UTF-8 text files, treating form feeds as page breaks.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextSource;

impl TextSource for PlainTextSource {
    fn read_lines(&self, path: &Path) -> Result<Vec<String>> {
        let text = fs::read_to_string(path).map_err(|source| StructurerError::SourceAccess {
            path: path.to_path_buf(),
            source,
        })?;

        let lines: Vec<String> = text
            .split(PAGE_BREAK)
            .flat_map(str::lines)
            .map(str::to_string)
            .collect();

        tracing::debug!(path = %path.display(), lines = lines.len(), "Read source document");
        Ok(lines)
    }
}

/// Extracts the text of a PDF, one page at a time.
///
/// Each text-showing operator appends to the current line; a line ends at
/// `ET`, at a vertical move (`Td`, `TD`, `T*`, `Tm` with a new baseline) and
/// before the `'` and `"` operators. Strings with a UTF-16BE byte order mark
/// are decoded as UTF-16, everything else byte by byte as Latin-1.
///
/// A page whose content stream cannot be decoded is logged and skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfTextSource;

impl PdfTextSource {
    fn load(path: &Path) -> Result<Document> {
        let doc = Document::load(path).map_err(|e| pdf_error(path, &e))?;
        if doc.is_encrypted() {
            return Err(StructurerError::SourceAccess {
                path: path.to_path_buf(),
                source: io::Error::new(
                    io::ErrorKind::PermissionDenied,
                    "PDF is encrypted and could not be decrypted",
                ),
            });
        }
        Ok(doc)
    }
}

impl TextSource for PdfTextSource {
    fn read_lines(&self, path: &Path) -> Result<Vec<String>> {
        let doc = Self::load(path)?;
        let pages = doc.get_pages();

        let mut lines = Vec::new();
        for (&page_number, &page_id) in &pages {
            match page_lines(&doc, page_id) {
                Ok(page) => lines.extend(page),
                Err(e) => tracing::warn!(
                    path = %path.display(),
                    page = page_number,
                    error = %e,
                    "Skipping undecodable PDF page"
                ),
            }
        }

        tracing::debug!(
            path = %path.display(),
            pages = pages.len(),
            lines = lines.len(),
            "Read PDF document"
        );
        Ok(lines)
    }
}

/// Reads PDFs through [`PdfTextSource`] and everything else through
/// [`PlainTextSource`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentSource;

impl TextSource for DocumentSource {
    fn read_lines(&self, path: &Path) -> Result<Vec<String>> {
        if is_pdf_file(path) {
            PdfTextSource.read_lines(path)
        } else {
            PlainTextSource.read_lines(path)
        }
    }
}

fn pdf_error(path: &Path, error: &lopdf::Error) -> StructurerError {
    StructurerError::SourceAccess {
        path: path.to_path_buf(),
        source: io::Error::new(io::ErrorKind::InvalidData, error.to_string()),
    }
}

/// Text lines of one page, in content stream order.
fn page_lines(doc: &Document, page_id: ObjectId) -> lopdf::Result<Vec<String>> {
    let content = Content::decode(&doc.get_page_content(page_id)?)?;

    let mut lines = Vec::new();
    let mut current = String::new();
    let mut baseline: Option<f32> = None;

    for operation in &content.operations {
        let operands = &operation.operands;
        match operation.operator.as_str() {
            "Tj" | "TJ" => push_shown_text(&mut current, operands),
            "'" | "\"" => {
                end_line(&mut current, &mut lines);
                push_shown_text(&mut current, operands);
            }
            "Td" | "TD" => {
                let dy = operands.get(1).and_then(|o| o.as_float().ok());
                if dy.is_none_or(|dy| dy != 0.0) {
                    end_line(&mut current, &mut lines);
                } else if !current.is_empty() && !current.ends_with(' ') {
                    current.push(' ');
                }
            }
            "Tm" => {
                let y = operands.get(5).and_then(|o| o.as_float().ok());
                if y != baseline {
                    end_line(&mut current, &mut lines);
                }
                baseline = y;
            }
            "T*" | "ET" => end_line(&mut current, &mut lines),
            _ => {}
        }
    }
    end_line(&mut current, &mut lines);

    Ok(lines)
}

fn end_line(current: &mut String, lines: &mut Vec<String>) {
    if !current.is_empty() {
        lines.push(std::mem::take(current));
    }
}

/// Append the strings of a text-showing operator. Large negative `TJ`
/// adjustments become a single space.
fn push_shown_text(current: &mut String, operands: &[Object]) {
    for operand in operands {
        match operand {
            Object::String(bytes, _) => current.push_str(&decode_pdf_string(bytes)),
            Object::Array(items) => {
                for item in items {
                    if let Object::String(bytes, _) = item {
                        current.push_str(&decode_pdf_string(bytes));
                    } else if item
                        .as_float()
                        .is_ok_and(|adjustment| adjustment <= -WORD_GAP_ADJUSTMENT)
                        && !current.is_empty()
                        && !current.ends_with(' ')
                    {
                        current.push(' ');
                    }
                }
            }
            _ => {}
        }
    }
}

fn decode_pdf_string(bytes: &[u8]) -> String {
    match bytes {
        [0xFE, 0xFF, rest @ ..] => {
            let units: Vec<u16> = rest
                .chunks_exact(2)
                .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
                .collect();
            String::from_utf16_lossy(&units)
        }
        _ => bytes.iter().map(|&b| char::from(b)).collect(),
    }
}
