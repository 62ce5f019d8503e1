//! Configuration constants and validation functions for the structurer.

use std::fs;
use std::path::Path;

use crate::error::{Result, StructurerError};

/// Default directory scanned for source documents.
pub const DEFAULT_INPUT_DIR: &str = "e-sbirka_data";

/// Default directory receiving one output record per document.
pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// Extension (case-insensitive) of already-extracted UTF-8 text documents.
pub const TEXT_EXTENSION: &str = "txt";

/// Extension (case-insensitive) of PDF documents.
pub const PDF_EXTENSION: &str = "pdf";

/// Extensions of documents picked up by the batch driver.
pub const SOURCE_EXTENSIONS: &[&str] = &[TEXT_EXTENSION, PDF_EXTENSION];

/// Sentinel for metadata fields that could not be resolved.
pub const UNKNOWN: &str = "UNKNOWN";

/// Number of lines after a Part/Head marker that may belong to its title.
pub const TITLE_LOOKAHEAD_LINES: usize = 2;

/// Maximum word count of a line merged into a Paragraph as its lead-in.
pub const CONTINUATION_MAX_WORDS: usize = 10;

/// Number of lines after the identifier line scanned for the document title.
pub const METADATA_TITLE_WINDOW: usize = 4;

/// Number of leading lines searched for the publication date.
pub const PUBLICATION_DATE_WINDOW: usize = 10;

/// Indentation used for pretty-printed JSON records.
pub const JSON_INDENT: &[u8] = b"    ";

/// Validate that the batch input path exists and is a directory.
///
/// # Examples
/// ```
/// use sbirka_structurer::config::validate_input_dir;
///
/// assert!(validate_input_dir(std::path::Path::new("/definitely/not/here")).is_err());
/// ```
pub fn validate_input_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(StructurerError::InvalidInput(format!(
            "Input directory '{}' not found",
            path.display()
        )));
    }
    if !path.is_dir() {
        return Err(StructurerError::InvalidInput(format!(
            "Input path '{}' is not a directory",
            path.display()
        )));
    }
    Ok(())
}

/// Make sure the output directory exists, creating it if needed.
///
/// Returns `true` when the directory was created by this call.
pub fn ensure_output_dir(path: &Path) -> Result<bool> {
    if path.exists() {
        if !path.is_dir() {
            return Err(StructurerError::InvalidInput(format!(
                "Output path '{}' is not a directory",
                path.display()
            )));
        }
        return Ok(false);
    }
    fs::create_dir_all(path)?;
    tracing::info!(path = %path.display(), "Created output directory");
    Ok(true)
}

/// Check whether a file name carries one of the source document extensions.
#[must_use]
pub fn is_source_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            SOURCE_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

/// Check whether a file name carries the PDF extension.
#[must_use]
pub fn is_pdf_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(PDF_EXTENSION))
}
