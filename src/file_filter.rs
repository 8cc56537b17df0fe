//! # File Filter Module
//!
//! This module contains components for deciding which directory entries the
//! walk visits: exclusion terms, hidden entries and the extension set.

use std::collections::BTreeSet;
use std::path::Path;

use crate::verbose_log;

/// Result of a file filtering operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterResult {
  /// Whether the entry should be processed
  pub should_process: bool,
  /// Reason why the entry should not be processed (if any)
  pub reason: Option<String>,
}

impl FilterResult {
  /// Creates a new FilterResult indicating the entry should be processed.
  pub const fn process() -> Self {
    Self {
      should_process: true,
      reason: None,
    }
  }

  /// Creates a new FilterResult indicating the entry should be skipped.
  pub fn skip(reason: impl Into<String>) -> Self {
    Self {
      should_process: false,
      reason: Some(reason.into()),
    }
  }
}

/// Trait for components that filter entries based on certain criteria.
pub trait FileFilter: Send + Sync {
  /// Determines whether an entry should be processed.
  ///
  /// # Parameters
  ///
  /// * `path` - The path of the entry, as reached by the walk
  ///
  /// # Returns
  ///
  /// A `FilterResult` indicating whether the entry should be processed and why
  /// not if applicable.
  fn should_process(&self, path: &Path) -> FilterResult;
}

/// Skips every path containing one of the exclusion terms.
///
/// The terms are plain substrings matched against the whole path as walked,
/// base path included. When a directory is skipped its subtree is never
/// listed.
#[derive(Debug, Clone, Default)]
pub struct ExclusionFilter {
  terms: Vec<String>,
}

impl ExclusionFilter {
  /// Creates a filter from an ordered list of terms. Empty terms are ignored,
  /// since they would match every path.
  pub fn new(terms: Vec<String>) -> Self {
    let terms = terms.into_iter().filter(|term| !term.is_empty()).collect();
    Self { terms }
  }

  /// Returns the first term found in `path`.
  pub fn matching_term(&self, path: &Path) -> Option<&str> {
    let path_str = path.to_string_lossy();
    self
      .terms
      .iter()
      .find(|term| path_str.contains(term.as_str()))
      .map(String::as_str)
  }
}

impl FileFilter for ExclusionFilter {
  fn should_process(&self, path: &Path) -> FilterResult {
    match self.matching_term(path) {
      Some(term) => {
        verbose_log!("Skipping: {} (excluded by \"{}\")", path.display(), term);
        FilterResult::skip(format!("Excluded by \"{}\"", term))
      }
      None => FilterResult::process(),
    }
  }
}

/// Skips entries whose name starts with a dot.
#[derive(Debug, Clone, Copy, Default)]
pub struct HiddenFilter;

impl FileFilter for HiddenFilter {
  fn should_process(&self, path: &Path) -> FilterResult {
    let hidden = path
      .file_name()
      .and_then(|name| name.to_str())
      .is_some_and(|name| name.starts_with('.') && name != "." && name != "..");

    if hidden {
      FilterResult::skip("Hidden entry")
    } else {
      FilterResult::process()
    }
  }
}

/// Keeps only files whose extension is in the configured set.
///
/// The extension is the text after the last `.` of the file name, compared
/// case-sensitively. Names without a dot never match.
#[derive(Debug, Clone, Default)]
pub struct ExtensionFilter {
  extensions: BTreeSet<String>,
}

impl ExtensionFilter {
  /// Creates a filter from a set of extensions given without the leading dot.
  pub fn new<I, S>(extensions: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    Self {
      extensions: extensions.into_iter().map(Into::into).collect(),
    }
  }

  /// Returns the extension of `path` as used for matching.
  pub fn extension_of(path: &Path) -> Option<&str> {
    let name = path.file_name()?.to_str()?;
    name.rsplit_once('.').map(|(_, ext)| ext)
  }
}

impl FileFilter for ExtensionFilter {
  fn should_process(&self, path: &Path) -> FilterResult {
    match Self::extension_of(path) {
      Some(ext) if self.extensions.contains(ext) => FilterResult::process(),
      Some(ext) => FilterResult::skip(format!("Extension \"{}\" not selected", ext)),
      None => FilterResult::skip("No extension"),
    }
  }
}

/// Filter that combines multiple filters.
pub struct CompositeFilter {
  filters: Vec<Box<dyn FileFilter>>,
}

impl CompositeFilter {
  /// Creates a new CompositeFilter with the given filters.
  pub fn new(filters: Vec<Box<dyn FileFilter>>) -> Self {
    Self { filters }
  }

  /// Adds a filter to this CompositeFilter.
  pub fn add_filter(&mut self, filter: Box<dyn FileFilter>) {
    self.filters.push(filter);
  }
}

impl FileFilter for CompositeFilter {
  fn should_process(&self, path: &Path) -> FilterResult {
    for filter in &self.filters {
      let result = filter.should_process(path);
      if !result.should_process {
        return result;
      }
    }
    FilterResult::process()
  }
}

/// Builds the filter applied to every entry before it is descended into or
/// read: exclusions first, then hidden entries unless `include_hidden`.
pub fn create_entry_filter(exclusions: Vec<String>, include_hidden: bool) -> CompositeFilter {
  let mut filter = CompositeFilter::new(vec![Box::new(ExclusionFilter::new(exclusions))]);
  if !include_hidden {
    filter.add_filter(Box::new(HiddenFilter));
  }
  filter
}
