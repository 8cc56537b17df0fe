//! # Output Module
//!
//! This module centralizes the end-of-run output of the relicense tool.
//! Per-file lines are printed while walking; this module prints the start
//! banner and the summary.
//!
//! - **Scannable**: one line per category, with a symbol and a count
//! - **Progressive**: more detail with `-v`, silence with `-q`

use std::path::Path;
use std::time::Duration;

use owo_colors::{OwoColorize, Stream};

use crate::logging::{is_quiet, is_verbose};
use crate::report::{CrawlReport, FileOutcome};

/// Symbols used in output
pub mod symbols {
  /// Success
  pub const SUCCESS: &str = "\u{2713}"; // ✓
  /// Failure
  pub const FAILURE: &str = "\u{2717}"; // ✗
  /// Rewritten
  pub const UPDATED: &str = "\u{21bb}"; // ↻
}

/// Maximum number of files listed per category before truncating
const DEFAULT_FILE_LIST_LIMIT: usize = 20;

fn plural(count: usize) -> &'static str {
  if count == 1 { "file" } else { "files" }
}

/// Print the initial "Rewriting headers under ..." message.
pub fn print_start_message(base_path: &Path, license: &str, dry_run: bool) {
  if is_quiet() {
    return;
  }

  let verb = if dry_run { "Checking" } else { "Rewriting" };
  println!("{} {} headers under {}...", verb, license, base_path.display());
}

/// Print the summary of a finished crawl.
pub fn print_summary(report: &CrawlReport, dry_run: bool, elapsed: Duration) {
  if is_quiet() {
    return;
  }

  println!();

  let changed: Vec<_> = report.changed().collect();
  if changed.is_empty() {
    println!(
      "{} {} {} visited, nothing to rewrite",
      symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green()),
      report.visited,
      plural(report.visited)
    );
  } else {
    let verb = if dry_run { "would be rewritten" } else { "rewritten" };
    println!(
      "{} {} {} {}:",
      symbols::UPDATED.if_supports_color(Stream::Stdout, |s| s.yellow()),
      changed.len(),
      plural(changed.len()),
      verb
    );

    let limit = if is_verbose() { changed.len() } else { DEFAULT_FILE_LIST_LIMIT };
    for file in changed.iter().take(limit) {
      println!("  {}", file.path.display());
    }
    if changed.len() > limit {
      println!("  ... and {} more (use -v to see all)", changed.len() - limit);
    }
  }

  let unreadable = report.unreadable_count();
  if unreadable > 0 {
    println!(
      "{} {} {} could not be read:",
      symbols::FAILURE.if_supports_color(Stream::Stdout, |s| s.red()),
      unreadable,
      plural(unreadable)
    );
    for file in &report.files {
      if let FileOutcome::Unreadable { reason } = &file.outcome {
        println!("  {} ({})", file.path.display(), reason);
      }
    }
  }

  for failure in &report.listing_failures {
    println!(
      "{} could not list {}: {}",
      symbols::FAILURE.if_supports_color(Stream::Stdout, |s| s.red()),
      failure.path.display(),
      failure.reason
    );
  }

  println!(
    "{}",
    format!(
      "{} visited, {} unchanged, {} empty in {:.2}s",
      report.visited,
      report.unchanged_count(),
      report.empty_count(),
      elapsed.as_secs_f64()
    )
    .if_supports_color(Stream::Stdout, |s| s.dimmed())
  );

  if dry_run && !changed.is_empty() {
    println!(
      "{}",
      "Run without --dry-run to apply these changes.".if_supports_color(Stream::Stdout, |s| s.dimmed())
    );
  }
}
