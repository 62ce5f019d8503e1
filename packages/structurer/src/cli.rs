//! Command-line interface for the structurer.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::batch::{process_directory, BatchOptions};
use crate::config::{DEFAULT_INPUT_DIR, DEFAULT_OUTPUT_DIR};
use crate::error::{Result, StructurerError};
use crate::output::{output_file_name, render, save_record, NamingScheme, OutputFormat};
use crate::processor::process_document;
use crate::source::DocumentSource;
use crate::types::Node;

/// Sbírka Structurer - Rebuild the outline of Czech statutes from extracted text.
#[derive(Parser)]
#[command(name = "sbirka-structurer")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Structure every document in a directory.
    Process {
        /// Directory with statute PDFs or extracted text (default: e-sbirka_data)
        #[arg(short, long, default_value = DEFAULT_INPUT_DIR)]
        input: PathBuf,

        /// Directory receiving one record per document (default: output)
        #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
        output: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,

        /// How output files are named
        #[arg(long, value_enum, default_value_t = NamingScheme::BaseName)]
        name_by: NamingScheme,

        /// Exit with an error if any document fails
        #[arg(long)]
        strict: bool,
    },

    /// Structure a single document.
    File {
        /// Path to a statute PDF or extracted text
        path: PathBuf,

        /// Output directory (default: output)
        #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
        output: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,

        /// How the output file is named
        #[arg(long, value_enum, default_value_t = NamingScheme::BaseName)]
        name_by: NamingScheme,
    },
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Process {
            input,
            output,
            format,
            name_by,
            strict,
        } => process_command(&input, &output, format, name_by, strict),
        Commands::File {
            path,
            output,
            format,
            name_by,
        } => file_command(&path, &output, format, name_by),
    }
}

/// Execute the batch command.
fn process_command(
    input: &Path,
    output: &Path,
    format: OutputFormat,
    naming: NamingScheme,
    strict: bool,
) -> Result<()> {
    println!(
        "{} {} into {}",
        style("Processing").bold(),
        style(input.display()).cyan(),
        style(output.display()).green()
    );
    println!();

    let options = BatchOptions {
        format,
        naming,
        show_progress: true,
    };
    let summary = process_directory(&DocumentSource, input, output, &options)?;

    println!("  Processed: {}", style(summary.processed()).green());
    if summary.warnings > 0 {
        println!("  Warnings: {}", style(summary.warnings).yellow().bold());
    }
    if !summary.failures.is_empty() {
        println!("  Failed: {}", style(summary.failures.len()).red().bold());
        for failure in &summary.failures {
            println!("    {} {}", style(failure.path.display()).red(), failure.message);
        }
    }

    if strict && !summary.failures.is_empty() {
        return Err(StructurerError::InvalidInput(format!(
            "{} of {} documents failed",
            summary.failures.len(),
            summary.failures.len() + summary.processed()
        )));
    }

    Ok(())
}

/// Execute the single-document command.
fn file_command(
    path: &Path,
    output: &Path,
    format: OutputFormat,
    naming: NamingScheme,
) -> Result<()> {
    if !path.is_file() {
        return Err(StructurerError::InvalidInput(format!(
            "Source document '{}' not found",
            path.display()
        )));
    }

    println!(
        "{} {}",
        style("Structuring").bold(),
        style(path.display()).cyan()
    );
    println!();

    let pb = ProgressBar::new_spinner();
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("valid template"),
    );
    pb.set_message("Reading document...");
    pb.enable_steady_tick(std::time::Duration::from_millis(100));

    let processed = match process_document(&DocumentSource, path) {
        Ok(processed) => processed,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e);
        }
    };

    pb.set_message("Saving record...");
    let file_name = output_file_name(&processed.record, path, format, naming);
    let saved = render(&processed.record, format)
        .and_then(|content| save_record(&content, output, &file_name));
    pb.finish_and_clear();
    let output_path = saved?;

    let metadata = &processed.record.metadata;
    let (parts, heads, paragraphs) = count_nodes(&processed.record.structured_text);
    println!("  Identifier: {}", style(&metadata.law_id).green());
    println!("  Title: {}", metadata.title);
    println!("  Parts: {parts}, heads: {heads}, paragraphs: {paragraphs}");
    if !processed.report.warnings.is_empty() {
        println!(
            "  Warnings: {}",
            style(processed.report.warnings.len()).yellow().bold()
        );
    }

    println!();
    println!(
        "{} {}",
        style("Saved to:").green().bold(),
        output_path.display()
    );

    Ok(())
}

/// Count Parts, Heads and Paragraphs anywhere in the forest.
fn count_nodes(nodes: &[Node]) -> (usize, usize, usize) {
    let mut counts = (0, 0, 0);
    for node in nodes {
        match node {
            Node::Part(part) => {
                counts.0 += 1;
                counts.1 += part.heads.len();
                counts.2 += part.paragraphs.len()
                    + part.heads.iter().map(|h| h.paragraphs.len()).sum::<usize>();
            }
            Node::Head(head) => {
                counts.1 += 1;
                counts.2 += head.paragraphs.len();
            }
            Node::Paragraph(_) => counts.2 += 1,
        }
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structure::structure_lines;

    #[test]
    fn test_cli_parse_process_defaults() {
        let cli = Cli::parse_from(["sbirka-structurer", "process"]);

        let Commands::Process {
            input,
            output,
            format,
            name_by,
            strict,
        } = cli.command
        else {
            panic!("expected process command");
        };
        assert_eq!(input, PathBuf::from(DEFAULT_INPUT_DIR));
        assert_eq!(output, PathBuf::from(DEFAULT_OUTPUT_DIR));
        assert_eq!(format, OutputFormat::Json);
        assert_eq!(name_by, NamingScheme::BaseName);
        assert!(!strict);
    }

    #[test]
    fn test_cli_parse_process_with_options() {
        let cli = Cli::parse_from([
            "sbirka-structurer",
            "process",
            "--input",
            "data",
            "--format",
            "yaml",
            "--name-by",
            "identifier",
            "--strict",
        ]);

        let Commands::Process {
            input,
            format,
            name_by,
            strict,
            ..
        } = cli.command
        else {
            panic!("expected process command");
        };
        assert_eq!(input, PathBuf::from("data"));
        assert_eq!(format, OutputFormat::Yaml);
        assert_eq!(name_by, NamingScheme::Identifier);
        assert!(strict);
    }

    #[test]
    fn test_cli_parse_file() {
        let cli = Cli::parse_from(["sbirka-structurer", "file", "zakon.txt", "-o", "out"]);

        let Commands::File { path, output, .. } = cli.command else {
            panic!("expected file command");
        };
        assert_eq!(path, PathBuf::from("zakon.txt"));
        assert_eq!(output, PathBuf::from("out"));
    }

    #[test]
    fn test_count_nodes() {
        let outline = structure_lines(&[
            "§ 1", "x", "ČÁST PRVNÍ", "§ 2", "y", "HLAVA I", "§ 3", "z", "§ 4", "w",
        ]);
        assert_eq!(count_nodes(&outline.nodes), (1, 1, 4));
    }
}
