//! # Diff Module
//!
//! Renders what a rewrite would change, for `--dry-run --show-diff` and
//! `--save-diff`.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use owo_colors::{OwoColorize, Stream};
use similar::{ChangeTag, TextDiff};

/// Number of unchanged lines kept around each hunk.
const CONTEXT_LINES: usize = 3;

/// Manages diff creation and rendering for rewritten files.
///
/// This struct handles:
/// - Rendering a unified diff between the original and the rewritten content
/// - Displaying it on stderr with colorization
/// - Appending it to a diff file
#[derive(Debug, Default)]
pub struct DiffManager {
  /// Whether to print diffs to stderr
  pub show_diff: bool,

  /// File every diff is appended to
  pub save_diff_path: Option<PathBuf>,
}

impl DiffManager {
  /// Creates a new DiffManager.
  ///
  /// # Parameters
  ///
  /// * `show_diff` - Whether to print diffs to stderr
  /// * `save_diff_path` - File every diff is appended to
  pub const fn new(show_diff: bool, save_diff_path: Option<PathBuf>) -> Self {
    Self {
      show_diff,
      save_diff_path,
    }
  }

  pub const fn is_enabled(&self) -> bool {
    self.show_diff || self.save_diff_path.is_some()
  }

  /// Displays and/or saves the diff between `original` and `new`.
  ///
  /// Diffs of several files are appended to the same diff file, producing one
  /// consolidated patch.
  pub fn display_diff(&self, path: &Path, original: &str, new: &str) -> Result<()> {
    if !self.is_enabled() {
      return Ok(());
    }

    let rendered = render_diff(path, original, new);

    if self.show_diff {
      for line in rendered.lines() {
        let colored = match line.chars().next() {
          Some('+') if !line.starts_with("+++") => line.if_supports_color(Stream::Stderr, |l| l.green()).to_string(),
          Some('-') if !line.starts_with("---") => line.if_supports_color(Stream::Stderr, |l| l.red()).to_string(),
          Some('@') => line.if_supports_color(Stream::Stderr, |l| l.cyan()).to_string(),
          _ => line.to_string(),
        };
        eprintln!("{}", colored);
      }
    }

    if let Some(ref diff_path) = self.save_diff_path {
      let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(diff_path)
        .with_context(|| format!("Failed to open diff file: {}", diff_path.display()))?;
      file
        .write_all(rendered.as_bytes())
        .with_context(|| format!("Failed to write diff file: {}", diff_path.display()))?;
    }

    Ok(())
  }
}

/// Renders a unified diff of one file.
pub fn render_diff(path: &Path, original: &str, new: &str) -> String {
  let name = path.to_string_lossy();
  let diff = TextDiff::from_lines(original, new);

  let mut output = diff
    .unified_diff()
    .context_radius(CONTEXT_LINES)
    .header(&format!("a/{}", name), &format!("b/{}", name))
    .to_string();

  if !output.is_empty() && !output.ends_with('\n') {
    output.push('\n');
  }
  output
}

/// Counts inserted and deleted lines between two texts.
pub fn change_stats(original: &str, new: &str) -> (usize, usize) {
  let diff = TextDiff::from_lines(original, new);
  diff
    .iter_all_changes()
    .fold((0, 0), |(inserted, deleted), change| match change.tag() {
      ChangeTag::Insert => (inserted + 1, deleted),
      ChangeTag::Delete => (inserted, deleted + 1),
      ChangeTag::Equal => (inserted, deleted),
    })
}

#[cfg(test)]
mod tests {
  use tempfile::tempdir;

  use super::*;

  #[test]
  fn test_render_diff_shows_changes() {
    let rendered = render_diff(Path::new("src/a.cpp"), "    int x;\n", "\tint x;\n");

    assert!(rendered.starts_with("--- a/src/a.cpp\n+++ b/src/a.cpp\n"));
    assert!(rendered.contains("-    int x;\n"));
    assert!(rendered.contains("+\tint x;\n"));
  }

  #[test]
  fn test_render_diff_identical_is_empty() {
    assert_eq!(render_diff(Path::new("a.cpp"), "x\n", "x\n"), "");
  }

  #[test]
  fn test_change_stats() {
    assert_eq!(change_stats("a\nb\n", "x\na\nc\n"), (2, 1));
  }

  #[test]
  fn test_save_diff_appends() -> Result<()> {
    let dir = tempdir()?;
    let diff_path = dir.path().join("changes.diff");
    let manager = DiffManager::new(false, Some(diff_path.clone()));

    manager.display_diff(Path::new("a.cpp"), "a\n", "b\n")?;
    manager.display_diff(Path::new("b.cpp"), "c\n", "d\n")?;

    let saved = std::fs::read_to_string(&diff_path)?;
    assert!(saved.contains("--- a/a.cpp"));
    assert!(saved.contains("--- a/b.cpp"));
    Ok(())
  }
}
