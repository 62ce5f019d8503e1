//! Serialization and persistence of document records.

mod writer;

pub use writer::{generate_json, generate_yaml, output_file_name, render, save_record};

use clap::ValueEnum;

/// Serialization format of the output records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON with 4-space indentation.
    #[default]
    Json,
    /// YAML document with indented sequences.
    Yaml,
}

impl OutputFormat {
    /// File extension without the leading dot.
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Yaml => "yaml",
        }
    }
}

/// How output files are named.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum NamingScheme {
    /// Use the base name of the source document.
    #[default]
    BaseName,
    /// Use the slug of the extracted collection identifier, falling back to
    /// the base name when it is unresolved.
    Identifier,
}
