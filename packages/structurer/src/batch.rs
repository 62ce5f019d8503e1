//! Directory driver: structure every document in a folder.
//!
//! Documents are processed one after another. A failing document is logged
//! and recorded in the summary; it never stops the batch. Output names are
//! unique within a run: a name already taken gets a `-2`, `-3`, ... suffix.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use indicatif::{ProgressBar, ProgressStyle};

use crate::config::{ensure_output_dir, is_source_file, validate_input_dir};
use crate::error::Result;
use crate::output::{output_file_name, render, save_record, NamingScheme, OutputFormat};
use crate::processor::process_document;
use crate::source::TextSource;

/// Options controlling a batch run.
#[derive(Debug, Clone, Copy, Default)]
pub struct BatchOptions {
    /// Output serialization format.
    pub format: OutputFormat,

    /// Output file naming.
    pub naming: NamingScheme,

    /// Draw a progress bar on stderr.
    pub show_progress: bool,
}

/// A document that could not be processed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchFailure {
    pub path: PathBuf,
    pub message: String,
}

/// Outcome of a batch run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Paths of the written output records, in processing order.
    pub written: Vec<PathBuf>,

    /// Documents that failed, with the error message.
    pub failures: Vec<BatchFailure>,

    /// Total number of structuring warnings over all documents.
    pub warnings: usize,
}

impl BatchSummary {
    /// Number of documents written successfully.
    #[must_use]
    pub fn processed(&self) -> usize {
        self.written.len()
    }
}

/// List source documents of a directory in file-name order.
///
/// Entries that cannot be read are logged and skipped.
pub fn list_source_files(input_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = fs::read_dir(input_dir)?
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry.path()),
            Err(e) => {
                tracing::warn!(
                    input = %input_dir.display(),
                    error = %e,
                    "Skipping unreadable directory entry"
                );
                None
            }
        })
        .filter(|path| path.is_file() && is_source_file(path))
        .collect();
    files.sort();
    Ok(files)
}

/// Reserve `file_name` in `used`, suffixing the stem when it is taken.
///
/// Names are compared case-insensitively so that `a.txt` and `a.TXT` cannot
/// overwrite each other on a case-insensitive filesystem.
fn unique_file_name(file_name: &str, used: &mut HashSet<String>) -> String {
    if used.insert(file_name.to_lowercase()) {
        return file_name.to_string();
    }

    let (stem, extension) = match file_name.rsplit_once('.') {
        Some((stem, extension)) if !stem.is_empty() => (stem, Some(extension)),
        _ => (file_name, None),
    };
    let mut counter = 2usize;
    loop {
        let candidate = match extension {
            Some(extension) => format!("{stem}-{counter}.{extension}"),
            None => format!("{stem}-{counter}"),
        };
        if used.insert(candidate.to_lowercase()) {
            return candidate;
        }
        counter += 1;
    }
}

/// Process one document and write its record under a name not yet used in this run.
fn process_one(
    source: &dyn TextSource,
    path: &Path,
    output_dir: &Path,
    options: &BatchOptions,
    used_names: &mut HashSet<String>,
) -> Result<(PathBuf, usize)> {
    let processed = process_document(source, path)?;
    let content = render(&processed.record, options.format)?;
    let preferred = output_file_name(&processed.record, path, options.format, options.naming);
    let file_name = unique_file_name(&preferred, used_names);
    if file_name != preferred {
        tracing::warn!(
            source = %path.display(),
            preferred = %preferred,
            output = %file_name,
            "Output name already used in this batch"
        );
    }
    let written = save_record(&content, output_dir, &file_name)?;
    Ok((written, processed.report.warnings.len()))
}

/// Structure every source document in `input_dir` into `output_dir`.
///
/// Fails only when the batch itself cannot run: the input directory is
/// missing or unreadable, or the output directory cannot be created.
pub fn process_directory(
    source: &dyn TextSource,
    input_dir: &Path,
    output_dir: &Path,
    options: &BatchOptions,
) -> Result<BatchSummary> {
    validate_input_dir(input_dir)?;
    ensure_output_dir(output_dir)?;

    let files = list_source_files(input_dir)?;
    tracing::info!(count = files.len(), input = %input_dir.display(), "Starting batch");

    let pb = if options.show_progress {
        ProgressBar::new(files.len() as u64)
    } else {
        ProgressBar::hidden()
    };
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
            .expect("valid template"),
    );

    let mut summary = BatchSummary::default();
    let mut used_names = HashSet::new();
    for path in &files {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        pb.set_message(name);

        match process_one(source, path, output_dir, options, &mut used_names) {
            Ok((written, warnings)) => {
                tracing::info!(source = %path.display(), output = %written.display(), "Processed");
                summary.warnings += warnings;
                summary.written.push(written);
            }
            Err(e) => {
                tracing::error!(source = %path.display(), error = %e, "Failed to process document");
                summary.failures.push(BatchFailure {
                    path: path.clone(),
                    message: e.to_string(),
                });
            }
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    Ok(summary)
}
