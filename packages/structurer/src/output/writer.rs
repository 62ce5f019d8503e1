//! JSON/YAML writers for document records.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use super::{NamingScheme, OutputFormat};
use crate::config::JSON_INDENT;
use crate::error::Result;
use crate::types::DocumentRecord;

/// Serialize a record as pretty-printed JSON.
///
/// Non-ASCII text is written verbatim, never as `\u` escapes.
pub fn generate_json(record: &DocumentRecord) -> Result<String> {
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(JSON_INDENT);
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    record.serialize(&mut serializer)?;
    buffer.push(b'\n');
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

/// Indent block sequences under their parent key.
///
/// serde_yaml_ng writes `- ` items at the indent of the owning key; nested
/// outlines are much easier to read with each sequence pushed two columns
/// right of its key.
fn indent_yaml_sequences(yaml: &str) -> String {
    let mut out: Vec<String> = Vec::new();
    let mut open_sequences: Vec<usize> = Vec::new();

    for line in yaml.lines() {
        let body = line.trim_start();
        if body.is_empty() {
            out.push(line.to_string());
            continue;
        }

        let indent = line.len() - body.len();
        let is_item = body.starts_with("- ") || body == "-";

        while let Some(&seq) = open_sequences.last() {
            if indent < seq || (indent == seq && !is_item) {
                open_sequences.pop();
            } else {
                break;
            }
        }

        if is_item && open_sequences.last() != Some(&indent) {
            open_sequences.push(indent);
        }

        let shift = open_sequences.len() * 2;
        out.push(format!("{}{body}", " ".repeat(indent + shift)));
    }

    out.join("\n")
}

/// Serialize a record as a YAML document starting with `---`.
pub fn generate_yaml(record: &DocumentRecord) -> Result<String> {
    let yaml = serde_yaml_ng::to_string(record)?;
    let yaml = indent_yaml_sequences(&yaml);
    let lines: Vec<&str> = yaml.lines().map(str::trim_end).collect();
    Ok(format!("---\n{}\n", lines.join("\n")))
}

/// Serialize a record in the requested format.
pub fn render(record: &DocumentRecord, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => generate_json(record),
        OutputFormat::Yaml => generate_yaml(record),
    }
}

/// File name of the output record for a source document.
///
/// # Examples
/// ```
/// use std::path::Path;
/// use sbirka_structurer::output::{output_file_name, NamingScheme, OutputFormat};
/// use sbirka_structurer::types::DocumentRecord;
///
/// let record = DocumentRecord {
///     metadata: Default::default(),
///     text_content: Vec::new(),
///     structured_text: Vec::new(),
/// };
/// let name = output_file_name(
///     &record,
///     Path::new("data/zakon_101.txt"),
///     OutputFormat::Json,
///     NamingScheme::Identifier,
/// );
/// assert_eq!(name, "zakon_101.json");
/// ```
#[must_use]
pub fn output_file_name(
    record: &DocumentRecord,
    source: &Path,
    format: OutputFormat,
    naming: NamingScheme,
) -> String {
    let base = source
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string());

    let stem = match naming {
        NamingScheme::BaseName => base,
        NamingScheme::Identifier => record.metadata.identifier_slug().unwrap_or(base),
    };
    format!("{stem}.{}", format.extension())
}

/// Write rendered record content into `output_dir/file_name`.
///
/// Writes to a hidden temp file, syncs it to disk, then renames it over the
/// destination so a crash never leaves a half-written record behind.
///
/// # Returns
/// Path to the saved file
pub fn save_record(content: &str, output_dir: &Path, file_name: &str) -> Result<PathBuf> {
    fs::create_dir_all(output_dir)?;

    let output_file = output_dir.join(file_name);
    let temp_file = output_dir.join(format!(".{file_name}.tmp"));

    {
        let mut file = File::create(&temp_file)?;
        file.write_all(content.as_bytes())?;
        file.sync_all()?;
    }

    // Windows refuses to rename over an existing file
    #[cfg(target_os = "windows")]
    if output_file.exists() {
        fs::remove_file(&output_file)?;
    }

    fs::rename(&temp_file, &output_file)?;
    tracing::debug!(path = %output_file.display(), "Saved record");

    Ok(output_file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DocumentMetadata, Node, Paragraph, Part};
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    fn sample_record() -> DocumentRecord {
        let mut part = Part::new("PART PRVNÍ", "OBECNÁ USTANOVENÍ");
        part.paragraphs.push(Paragraph {
            identifier: "§ 1".to_string(),
            text: "Předmět úpravy".to_string(),
            subsections: Vec::new(),
        });
        DocumentRecord {
            metadata: DocumentMetadata {
                law_id: "101/2000 Sb.".to_string(),
                source_file: "zakon.txt".to_string(),
                ..DocumentMetadata::default()
            },
            text_content: vec!["ČÁST PRVNÍ".to_string(), "§ 1".to_string()],
            structured_text: vec![Node::Part(part)],
        }
    }

    #[test]
    fn test_generate_json_shape() {
        let json = generate_json(&sample_record()).unwrap();
        assert!(json.starts_with("{\n    \"metadata\": {\n        \"law_id\": \"101/2000 Sb.\""));
        assert!(json.contains("\"identifier\": \"PART PRVNÍ\""));
        assert!(!json.contains("\\u"));

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["structured_text"][0]["type"], "part");
        assert_eq!(value["structured_text"][0]["paragraphs"][0]["identifier"], "§ 1");
        assert_eq!(value["metadata"]["title"], "UNKNOWN");
    }

    #[test]
    fn test_generate_yaml_shape() {
        let yaml = generate_yaml(&sample_record()).unwrap();
        assert!(yaml.starts_with("---\nmetadata:\n"));
        assert!(yaml.contains("law_id:"));
        assert!(yaml.contains("101/2000 Sb."));
        assert!(yaml.contains("structured_text:\n  - type: part"));
        assert!(yaml.ends_with('\n'));
    }

    #[test]
    fn test_indent_yaml_sequences() {
        let input = "top: 1\nitems:\n- name: a\n  list:\n  - x\n  - y\n- name: b\nafter: 2";
        assert_eq!(
            indent_yaml_sequences(input),
            "top: 1\nitems:\n  - name: a\n    list:\n      - x\n      - y\n  - name: b\nafter: 2"
        );
    }

    #[test]
    fn test_render_dispatch() {
        let record = sample_record();
        assert!(render(&record, OutputFormat::Json).unwrap().starts_with('{'));
        assert!(render(&record, OutputFormat::Yaml).unwrap().starts_with("---"));
    }

    #[test]
    fn test_output_file_name() {
        let record = sample_record();
        let source = Path::new("in/zakon.txt");
        assert_eq!(
            output_file_name(&record, source, OutputFormat::Json, NamingScheme::BaseName),
            "zakon.json"
        );
        assert_eq!(
            output_file_name(&record, source, OutputFormat::Yaml, NamingScheme::Identifier),
            "101_2000_sb.yaml"
        );
    }

    #[test]
    fn test_save_record_atomic() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("output");
        let path = save_record("{}\n", &out, "zakon.json").unwrap();

        assert_eq!(path, out.join("zakon.json"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "{}\n");
        assert!(!out.join(".zakon.json.tmp").exists());
    }

    #[test]
    fn test_save_record_overwrites() {
        let dir = tempdir().unwrap();
        save_record("old", dir.path(), "a.json").unwrap();
        let path = save_record("new", dir.path(), "a.json").unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), "new");
    }
}
