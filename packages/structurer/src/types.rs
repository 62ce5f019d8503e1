//! Core data types for the structurer.
//!
//! These types represent the outline of a Czech statute (Part, Head,
//! Paragraph and two subsection levels) and the per-document output record.
//! Every node serializes with an explicit `type` tag and an `identifier`.

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

use crate::config::UNKNOWN;

/// Top-level division of a statute (`ČÁST`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename = "part")]
pub struct Part {
    /// Identifier, e.g. `"PART PRVNÍ"`.
    pub identifier: String,

    /// Title assembled by the title lookahead; may be empty.
    pub title: String,

    /// Heads in document order.
    pub heads: Vec<Head>,

    /// Paragraphs that appear directly under the Part, outside any Head.
    pub paragraphs: Vec<Paragraph>,
}

impl Part {
    /// Create an empty Part.
    #[must_use]
    pub fn new(identifier: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            title: title.into(),
            heads: Vec::new(),
            paragraphs: Vec::new(),
        }
    }
}

/// Second-level division within a Part (`HLAVA`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename = "head")]
pub struct Head {
    /// Identifier, e.g. `"HEAD II"`.
    pub identifier: String,

    /// Title; may be empty.
    pub title: String,

    /// Paragraphs in document order.
    pub paragraphs: Vec<Paragraph>,
}

impl Head {
    /// Create an empty Head.
    #[must_use]
    pub fn new(identifier: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            title: title.into(),
            paragraphs: Vec::new(),
        }
    }
}

/// The numbered section of a statute (`§`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename = "paragraph")]
pub struct Paragraph {
    /// Identifier, e.g. `"§ 12a"`.
    pub identifier: String,

    /// Direct text of the Paragraph, outside any subsection.
    pub text: String,

    /// Subsections in document order; level-2 items may appear here directly.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub subsections: Vec<Subsection>,
}

/// A subsection directly under a Paragraph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Subsection {
    /// Numbered subsection, e.g. `(1)`.
    Level1(SubsectionL1),
    /// Lettered subsection with no enclosing level-1, e.g. `a)`.
    Level2(SubsectionL2),
}

/// Numbered subsection (`(1)`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename = "subsection_level1")]
pub struct SubsectionL1 {
    /// Digit group without parentheses.
    pub identifier: String,

    /// Either plain text or text interleaved with lettered subsections.
    pub content: SubsectionContent,
}

/// Content of a numbered subsection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SubsectionContent {
    /// A single text run and no nested items.
    Text(String),
    /// Text runs alternating with lettered subsections.
    Items(Vec<ContentItem>),
}

/// One element of an interleaved subsection content list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ContentItem {
    Text(String),
    SubsectionL2(SubsectionL2),
}

/// Lettered subsection (`a)`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename = "subsection_level2")]
pub struct SubsectionL2 {
    /// Single lowercase letter.
    pub identifier: String,

    /// Assembled text.
    pub text: String,
}

/// An element of the document forest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Node {
    Part(Part),
    Head(Head),
    Paragraph(Paragraph),
}

impl Node {
    /// Identifier of the node.
    #[must_use]
    pub fn identifier(&self) -> &str {
        match self {
            Self::Part(part) => &part.identifier,
            Self::Head(head) => &head.identifier,
            Self::Paragraph(paragraph) => &paragraph.identifier,
        }
    }
}

/// Document-level metadata. Unresolved fields hold [`UNKNOWN`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentMetadata {
    /// Collection identifier, e.g. `"101/2000 Sb."`.
    pub law_id: String,

    /// Title without the document-kind word and promulgation date.
    pub title: String,

    /// Promulgation date as written, e.g. `"4. dubna 2000"`.
    pub publication_date: String,

    /// Effective date phrase as written.
    pub effective_date: String,

    /// Cross-references to other statutes, de-duplicated, in first-seen order.
    pub references: Vec<String>,

    /// Base name of the source document.
    pub source_file: String,
}

impl Default for DocumentMetadata {
    fn default() -> Self {
        Self {
            law_id: UNKNOWN.to_string(),
            title: UNKNOWN.to_string(),
            publication_date: UNKNOWN.to_string(),
            effective_date: UNKNOWN.to_string(),
            references: Vec::new(),
            source_file: UNKNOWN.to_string(),
        }
    }
}

/// Regex for slug generation - matches non-word characters.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static SLUG_NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s-]").expect("valid regex"));

/// Regex for slug generation - matches whitespace, dashes and slashes.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static SLUG_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[-\s/]+").expect("valid regex"));

impl DocumentMetadata {
    /// Generate a file-name friendly slug from the identifier.
    ///
    /// Returns `None` while the identifier is unresolved.
    ///
    /// # Examples
    /// ```
    /// use sbirka_structurer::types::DocumentMetadata;
    ///
    /// let metadata = DocumentMetadata {
    ///     law_id: "101/2000 Sb.".to_string(),
    ///     ..DocumentMetadata::default()
    /// };
    /// assert_eq!(metadata.identifier_slug().as_deref(), Some("101_2000_sb"));
    /// ```
    #[must_use]
    pub fn identifier_slug(&self) -> Option<String> {
        if self.law_id == UNKNOWN {
            return None;
        }
        let text = self.law_id.to_lowercase();
        let text = SLUG_SEPARATOR.replace_all(&text, "_");
        let text = SLUG_NON_WORD.replace_all(&text, "");
        let slug = text.trim_matches('_').to_string();
        (!slug.is_empty()).then_some(slug)
    }
}

/// Complete output record for one source document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentRecord {
    /// Document-level metadata.
    pub metadata: DocumentMetadata,

    /// The cleaned line sequence, unmodified.
    pub text_content: Vec<String>,

    /// Ordered forest of Part/Head/Paragraph nodes.
    pub structured_text: Vec<Node>,
}
