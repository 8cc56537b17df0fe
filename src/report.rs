//! # Report Module
//!
//! This module holds the structured result of a crawl and writes it out as
//! JSON or CSV.
//!
//! The crawl never prints its way out of trouble: every visited file gets a
//! [`FileReport`], every directory that could not be listed gets a
//! [`ListingFailure`], and the caller decides what to show.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Local;
use serde::{Deserialize, Serialize};

/// What happened to one visited file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", tag = "status")]
pub enum FileOutcome {
  /// The file was rewritten
  Updated,
  /// The file would be rewritten (dry run)
  WouldUpdate,
  /// The transforms produced identical content; nothing was written
  Unchanged,
  /// The file could not be read as UTF-8 text
  Unreadable { reason: String },
  /// The file is empty; nothing was done
  Empty,
}

impl FileOutcome {
  pub const fn is_change(&self) -> bool {
    matches!(self, FileOutcome::Updated | FileOutcome::WouldUpdate)
  }
}

impl fmt::Display for FileOutcome {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      FileOutcome::Updated => write!(f, "updated"),
      FileOutcome::WouldUpdate => write!(f, "would-update"),
      FileOutcome::Unchanged => write!(f, "unchanged"),
      FileOutcome::Unreadable { .. } => write!(f, "unreadable"),
      FileOutcome::Empty => write!(f, "empty"),
    }
  }
}

/// Information about a visited file for reporting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileReport {
  /// Path to the file, as reached by the walk
  #[serde(with = "path_serialization")]
  pub path: PathBuf,
  /// Outcome for the file
  #[serde(flatten)]
  pub outcome: FileOutcome,
}

/// A directory whose children could not be listed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingFailure {
  #[serde(with = "path_serialization")]
  pub path: PathBuf,
  pub reason: String,
}

/// Result of one crawl.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawlReport {
  /// Number of files that matched the extension set and were not excluded
  pub visited: usize,
  /// One entry per visited file, in walk order
  pub files: Vec<FileReport>,
  /// Directories that could not be listed
  pub listing_failures: Vec<ListingFailure>,
}

impl CrawlReport {
  pub fn record(&mut self, path: &Path, outcome: FileOutcome) {
    self.files.push(FileReport {
      path: path.to_path_buf(),
      outcome,
    });
  }

  pub fn record_listing_failure(&mut self, path: &Path, reason: impl Into<String>) {
    self.listing_failures.push(ListingFailure {
      path: path.to_path_buf(),
      reason: reason.into(),
    });
  }

  /// Files rewritten (or that would be rewritten in a dry run).
  pub fn changed(&self) -> impl Iterator<Item = &FileReport> {
    self.files.iter().filter(|file| file.outcome.is_change())
  }

  pub fn unchanged_count(&self) -> usize {
    self.count(|outcome| matches!(outcome, FileOutcome::Unchanged))
  }

  pub fn unreadable_count(&self) -> usize {
    self.count(|outcome| matches!(outcome, FileOutcome::Unreadable { .. }))
  }

  pub fn empty_count(&self) -> usize {
    self.count(|outcome| matches!(outcome, FileOutcome::Empty))
  }

  pub fn outcome_of(&self, path: &Path) -> Option<&FileOutcome> {
    self.files.iter().find(|file| file.path == path).map(|file| &file.outcome)
  }

  fn count(&self, predicate: impl Fn(&FileOutcome) -> bool) -> usize {
    self.files.iter().filter(|file| predicate(&file.outcome)).count()
  }
}

/// Helper module for serializing/deserializing PathBuf
mod path_serialization {
  use std::path::PathBuf;

  use serde::{Deserialize, Deserializer, Serializer};

  pub fn serialize<S>(path: &std::path::Path, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: Serializer,
  {
    serializer.serialize_str(&path.to_string_lossy())
  }

  pub fn deserialize<'de, D>(deserializer: D) -> Result<PathBuf, D::Error>
  where
    D: Deserializer<'de>,
  {
    let s = String::deserialize(deserializer)?;
    Ok(PathBuf::from(s))
  }
}

/// Supported report formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
  /// JSON format for machine readability
  Json,
  /// CSV format for spreadsheet compatibility
  Csv,
}

impl fmt::Display for ReportFormat {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ReportFormat::Json => write!(f, "JSON"),
      ReportFormat::Csv => write!(f, "CSV"),
    }
  }
}

/// Report Generator for writing a crawl report to disk
pub struct ReportGenerator<'a> {
  /// Format of the report to generate
  format: ReportFormat,
  /// Path where the report will be saved
  output_path: &'a Path,
}

impl<'a> ReportGenerator<'a> {
  /// Create a new report generator
  ///
  /// # Parameters
  ///
  /// * `format` - The format to use for the report
  /// * `output_path` - The path where the report will be saved
  pub const fn new(format: ReportFormat, output_path: &'a Path) -> Self {
    Self { format, output_path }
  }

  /// Writes the report.
  ///
  /// # Parameters
  ///
  /// * `report` - The crawl result
  /// * `elapsed` - Wall time of the crawl
  /// * `dry_run` - Whether files were left untouched
  pub fn generate(&self, report: &CrawlReport, elapsed: Duration, dry_run: bool) -> Result<()> {
    let content = match self.format {
      ReportFormat::Json => Self::generate_json(report, elapsed, dry_run)?,
      ReportFormat::Csv => Self::generate_csv(report),
    };

    fs::write(self.output_path, content)
      .with_context(|| format!("Failed to write report to {}", self.output_path.display()))
  }

  fn generate_json(report: &CrawlReport, elapsed: Duration, dry_run: bool) -> Result<String> {
    let document = serde_json::json!({
      "generated_at": Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
      "dry_run": dry_run,
      "processing_time_secs": elapsed.as_secs_f64(),
      "report": report,
    });

    serde_json::to_string_pretty(&document).context("Failed to serialize JSON report")
  }

  fn generate_csv(report: &CrawlReport) -> String {
    let mut csv = String::from("path,outcome,reason\n");

    for file in &report.files {
      let reason = match &file.outcome {
        FileOutcome::Unreadable { reason } => reason.as_str(),
        _ => "",
      };
      csv.push_str(&format!(
        "{},{},{}\n",
        escape_csv(&file.path.to_string_lossy()),
        file.outcome,
        escape_csv(reason)
      ));
    }

    csv
  }
}

/// Quotes a CSV field when it contains a separator, quote or line break.
fn escape_csv(field: &str) -> String {
  if field.contains([',', '"', '\n', '\r']) {
    format!("\"{}\"", field.replace('"', "\"\""))
  } else {
    field.to_string()
  }
}
