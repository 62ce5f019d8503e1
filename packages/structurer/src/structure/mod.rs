//! Outline reconstruction for Czech statutes.
//!
//! Turns a flat sequence of cleaned lines into a forest of Part, Head and
//! Paragraph nodes with two subsection levels, in one streaming pass:
//!
//! ```text
//! ČÁST PRVNÍ            -> Part "PART PRVNÍ"
//! ├── HLAVA I           -> Head "HEAD I"
//! │   └── § 1           -> Paragraph "§ 1"
//! │       ├── (1)       -> numbered subsection
//! │       │   └── a)    -> lettered subsection
//! │       └── (2)
//! └── § 2               -> Paragraph outside any Head
//! ```

mod assembler;
mod classifier;
mod context;
mod engine;
mod lookahead;

pub use assembler::{is_lead_in, Level1Buffer, Level2Buffer, ParagraphBuffer};
pub use classifier::{classify, Classified, LineKind};
pub use context::{ContextState, Level, OutlineContext, StructureReport};
pub use engine::{structure_lines, StructuredOutline};
pub use lookahead::{lookahead_title, TitleLookahead};
