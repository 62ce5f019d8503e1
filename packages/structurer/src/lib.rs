//! Sbírka Structurer - Rebuild the outline of Czech statutes.
//!
//! Takes a statute of the Czech collection of laws (Sbírka zákonů), as a PDF
//! or as already-extracted text, and reconstructs its hierarchy of Parts, Heads,
//! Paragraphs and subsections, together with document-level metadata.
//!
//! # Example
//!
//! ```
//! use sbirka_structurer::process_lines;
//!
//! let doc = process_lines(
//!     &["101/2000 Sb.", "ČÁST PRVNÍ", "OBECNÁ USTANOVENÍ", "§ 1", "(1) Text."],
//!     "zakon.txt",
//! );
//! assert_eq!(doc.record.metadata.law_id, "101/2000 Sb.");
//! assert_eq!(doc.record.structured_text[0].identifier(), "PART PRVNÍ");
//! ```
//!
//! # Architecture
//!
//! - [`source`]: Reading raw document lines from text files and PDFs
//! - [`cleaning`]: Removing page furniture
//! - [`structure`]: Line classification and outline assembly
//! - [`metadata`]: Identifier, title, dates and references
//! - [`types`]: Outline nodes and the output record
//! - [`output`]: JSON/YAML rendering and atomic saving
//! - [`processor`]: Per-document pipeline
//! - [`batch`]: Directory driver
//! - [`config`]: Constants and validation
//! - [`error`]: Error types and Result alias
//! - [`cli`]: Command-line interface

pub mod batch;
pub mod cleaning;
pub mod cli;
pub mod config;
pub mod error;
pub mod metadata;
pub mod output;
pub mod processor;
pub mod source;
pub mod structure;
pub mod types;

pub use processor::{process_document, process_lines, ProcessedDocument};

pub use error::{Result, StructurerError};
pub use structure::{structure_lines, StructureReport, StructuredOutline};
pub use types::{DocumentMetadata, DocumentRecord, Node};
