//! # File Collector Module
//!
//! This module walks a directory tree depth-first and yields the files the
//! processor should rewrite, in a stable (name-sorted) order.
//!
//! Exclusion terms and hidden entries are checked before a directory is
//! descended into, so an excluded subtree is never listed.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, trace};
use walkdir::{DirEntry, WalkDir};

use crate::file_filter::{CompositeFilter, ExtensionFilter, FileFilter, create_entry_filter};

/// One step of the walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalkItem {
  /// A directory about to be listed
  Directory(PathBuf),
  /// A regular file with a selected extension
  File(PathBuf),
  /// A directory (or entry) that could not be read
  ListingFailure { path: PathBuf, reason: String },
}

/// File collector for directory traversal.
///
/// The `FileCollector` handles:
/// - Depth-first traversal sorted by file name
/// - Exclusion terms and hidden entries, applied before descending
/// - Extension matching for regular files
pub struct FileCollector {
  /// Filter applied to every entry, directories included
  entry_filter: CompositeFilter,
  /// Filter applied to regular files only
  extension_filter: ExtensionFilter,
  /// Whether symlinked directories are descended into
  follow_symlinks: bool,
}

impl FileCollector {
  /// Creates a new FileCollector.
  ///
  /// # Parameters
  ///
  /// * `extensions` - Extensions to select, without the leading dot
  /// * `exclusions` - Path substrings that exclude an entry and its subtree
  /// * `include_hidden` - Whether entries starting with a dot are visited
  /// * `follow_symlinks` - Whether symlinked directories are descended into
  pub fn new(extensions: Vec<String>, exclusions: Vec<String>, include_hidden: bool, follow_symlinks: bool) -> Self {
    Self {
      entry_filter: create_entry_filter(exclusions, include_hidden),
      extension_filter: ExtensionFilter::new(extensions),
      follow_symlinks,
    }
  }

  /// Walks `base_path` and yields directories, selected files and listing
  /// failures in depth-first, name-sorted order.
  ///
  /// The base path itself is neither yielded nor filtered. Listing failures
  /// do not end the walk; the unreadable subtree simply contributes nothing.
  pub fn walk<'a>(&'a self, base_path: &Path) -> impl Iterator<Item = WalkItem> + 'a {
    debug!("Scanning directory: {}", base_path.display());

    WalkDir::new(base_path)
      .min_depth(1)
      .follow_links(self.follow_symlinks)
      .sort_by_file_name()
      .into_iter()
      .filter_entry(move |entry| self.entry_filter.should_process(entry.path()).should_process)
      .filter_map(move |entry| match entry {
        Ok(entry) => self.classify(&entry),
        Err(e) => {
          let path = e.path().map(Path::to_path_buf).unwrap_or_default();
          let reason = e
            .io_error()
            .map_or_else(|| e.to_string(), std::string::ToString::to_string);
          Some(WalkItem::ListingFailure { path, reason })
        }
      })
  }

  /// Turns a surviving entry into a walk item.
  fn classify(&self, entry: &DirEntry) -> Option<WalkItem> {
    let path = entry.path();
    let file_type = entry.file_type();

    if file_type.is_dir() {
      debug!("Scanning directory: {}", path.display());
      return Some(WalkItem::Directory(path.to_path_buf()));
    }

    // A symlink that was not followed still counts when it points at a
    // regular file.
    let is_regular = file_type.is_file() || (file_type.is_symlink() && path.is_file());
    if !is_regular {
      trace!("Skipping: {} (not a regular file)", path.display());
      return None;
    }

    let result = self.extension_filter.should_process(path);
    if !result.should_process {
      trace!(
        "Skipping: {} ({})",
        path.display(),
        result.reason.as_deref().unwrap_or("filtered")
      );
      return None;
    }

    Some(WalkItem::File(path.to_path_buf()))
  }

  /// Collects every selected file under `base_path`.
  ///
  /// Listing failures are skipped; use [`walk`](Self::walk) to see them.
  pub fn collect_files(&self, base_path: &Path) -> Vec<PathBuf> {
    self
      .walk(base_path)
      .filter_map(|item| match item {
        WalkItem::File(path) => Some(path),
        _ => None,
      })
      .collect()
  }
}

/// Converts a potentially relative path to an absolute path.
///
/// # Parameters
///
/// * `path` - The path to absolutize
///
/// # Returns
///
/// The absolute path.
pub fn absolutize_path(path: &Path) -> Result<PathBuf> {
  if path.is_absolute() {
    Ok(path.to_path_buf())
  } else {
    let current_dir = std::env::current_dir().with_context(|| "Failed to get current directory")?;
    Ok(current_dir.join(path))
  }
}

/// Returns `path` relative to `root` when it lies under it.
///
/// Both paths are absolutized first. Paths outside the root, or that cannot
/// be related to it, yield `None`.
pub fn relative_to_root(path: &Path, root: &Path) -> Option<PathBuf> {
  let abs_path = absolutize_path(path).ok()?;
  let abs_root = absolutize_path(root).ok()?;
  let relative = pathdiff::diff_paths(clean_path(&abs_path), clean_path(&abs_root))?;

  if relative.components().any(|c| matches!(c, std::path::Component::ParentDir)) {
    None
  } else {
    Some(relative)
  }
}

/// Drops `.` components so `/a/./b` and `/a/b` compare equal.
fn clean_path(path: &Path) -> PathBuf {
  path
    .components()
    .filter(|c| !matches!(c, std::path::Component::CurDir))
    .collect()
}

#[cfg(test)]
mod tests {
  use std::fs;

  use tempfile::tempdir;

  use super::*;

  fn touch(root: &Path, rel: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
      fs::create_dir_all(parent).expect("create parent");
    }
    fs::write(path, "int x;\n").expect("write file");
  }

  fn collector(exclusions: &[&str]) -> FileCollector {
    FileCollector::new(
      vec!["cpp".to_string(), "hpp".to_string()],
      exclusions.iter().map(|s| s.to_string()).collect(),
      false,
      false,
    )
  }

  #[test]
  fn test_walk_selects_by_extension_in_sorted_order() {
    let dir = tempdir().expect("create temp dir");
    touch(dir.path(), "b.cpp");
    touch(dir.path(), "a.hpp");
    touch(dir.path(), "notes.txt");
    touch(dir.path(), "Makefile");
    touch(dir.path(), "sub/c.cpp");

    let files = collector(&[]).collect_files(dir.path());
    let names: Vec<_> = files
      .iter()
      .map(|p| p.strip_prefix(dir.path()).expect("under root").to_path_buf())
      .collect();

    assert_eq!(
      names,
      vec![PathBuf::from("a.hpp"), PathBuf::from("b.cpp"), PathBuf::from("sub/c.cpp")]
    );
  }

  #[test]
  fn test_walk_never_enters_excluded_directory() {
    let dir = tempdir().expect("create temp dir");
    touch(dir.path(), "src/main.cpp");
    touch(dir.path(), "vendor/lib.hpp");
    touch(dir.path(), "vendor/deep/more.cpp");
    touch(dir.path(), "build/gen.cpp");

    let items: Vec<_> = collector(&["vendor", "build"]).walk(dir.path()).collect();

    assert!(items.iter().all(|item| match item {
      WalkItem::File(p) | WalkItem::Directory(p) => {
        let s = p.to_string_lossy();
        !s.contains("vendor") && !s.contains("build")
      }
      WalkItem::ListingFailure { .. } => false,
    }));
    assert_eq!(
      items.iter().filter(|item| matches!(item, WalkItem::File(_))).count(),
      1
    );
  }

  #[test]
  fn test_walk_skips_hidden_entries() {
    let dir = tempdir().expect("create temp dir");
    touch(dir.path(), ".git/hooks/x.cpp");
    touch(dir.path(), ".hidden.cpp");
    touch(dir.path(), "visible.cpp");

    assert_eq!(collector(&[]).collect_files(dir.path()).len(), 1);

    let with_hidden = FileCollector::new(vec!["cpp".to_string()], vec![], true, false);
    assert_eq!(with_hidden.collect_files(dir.path()).len(), 3);
  }

  #[test]
  fn test_walk_of_missing_directory_reports_failure() {
    let dir = tempdir().expect("create temp dir");
    let missing = dir.path().join("missing");

    let items: Vec<_> = collector(&[]).walk(&missing).collect();
    assert_eq!(items.len(), 1);
    assert!(matches!(items[0], WalkItem::ListingFailure { .. }));
  }

  #[test]
  fn test_walk_of_file_yields_nothing() {
    let dir = tempdir().expect("create temp dir");
    touch(dir.path(), "a.cpp");

    assert!(collector(&[]).collect_files(&dir.path().join("a.cpp")).is_empty());
  }

  #[test]
  fn test_relative_to_root() {
    let root = Path::new("/work/engine");
    assert_eq!(
      relative_to_root(Path::new("/work/engine/./src/Window.cpp"), root),
      Some(PathBuf::from("src/Window.cpp"))
    );
    assert_eq!(relative_to_root(Path::new("/elsewhere/a.cpp"), root), None);
  }
}
