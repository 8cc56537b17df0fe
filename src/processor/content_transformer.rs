//! # Content Transformer Module
//!
//! This module provides the pure text transformations applied to every
//! matching file: stripping an existing leading license block, converting
//! space indentation to tabs, and quoting local `.hpp` includes.
//!
//! None of these functions understand the grammar of the files they touch.
//! They work on raw text with fixed markers and regular expressions.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

use crate::templates::{LicenseVariant, ProjectInfo, insert_license};

/// Number of consecutive spaces replaced by one tab.
const SPACES_PER_TAB: &str = "    ";

/// Thresholds used to recognize a leading license block.
///
/// A block qualifies when `start_mask` first appears before `min_start` and
/// the first `end_mask` after it lies more than `max_length` bytes from the
/// block start. Short comments near the top (a file description, a pragma)
/// and comments further down the file are left alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StripOptions {
  /// Exclusive upper bound for the byte offset of the start marker
  pub min_start: usize,
  /// The block must span more than this many bytes to be stripped
  pub max_length: usize,
  /// Opening comment marker
  pub start_mask: String,
  /// Closing comment marker
  pub end_mask: String,
}

impl Default for StripOptions {
  fn default() -> Self {
    Self {
      min_start: 64,
      max_length: 512,
      start_mask: "/*".to_string(),
      end_mask: "*/".to_string(),
    }
  }
}

/// Replaces every run of four spaces with a tab.
///
/// Runs are matched left to right without overlap, so eight spaces become two
/// tabs and five spaces become a tab followed by a space. String literals are
/// not special-cased.
pub fn convert_to_tabs(content: &str) -> String {
  content.replace(SPACES_PER_TAB, "\t")
}

/// Rewrites `#include <name.hpp>` as `#include "name.hpp"`.
///
/// Only names without a dot are rewritten; `<sub.dir.hpp>`, `<vector.h>` and
/// quoted includes are left as they are.
pub fn remove_include_brackets(content: &str) -> Cow<'_, str> {
  static INCLUDE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#include <([^.>]+)\.hpp>").expect("include regex must compile"));

  INCLUDE_REGEX.replace_all(content, "#include \"${1}.hpp\"")
}

/// Removes the leading license block from `content`.
///
/// See [`StripOptions`] for when a block qualifies. When it does, everything up
/// to and including the end marker is dropped, the rest is trimmed and exactly
/// one trailing newline is appended. Otherwise the content is returned as is.
///
/// A start marker that is absent never qualifies, while one found at offset
/// zero always passes the position check.
pub fn strip_license_block<'a>(content: &'a str, options: &StripOptions) -> Cow<'a, str> {
  if options.start_mask.is_empty() || options.end_mask.is_empty() {
    return Cow::Borrowed(content);
  }

  let Some(start) = content.find(&options.start_mask) else {
    return Cow::Borrowed(content);
  };

  if start >= options.min_start {
    return Cow::Borrowed(content);
  }

  let search_from = start + options.start_mask.len();
  let Some(stop) = content[search_from..]
    .find(&options.end_mask)
    .map(|offset| search_from + offset)
  else {
    return Cow::Borrowed(content);
  };

  if stop - start <= options.max_length {
    return Cow::Borrowed(content);
  }

  let remainder = &content[stop + options.end_mask.len()..];
  let mut stripped = trim_blank(remainder).to_string();
  stripped.push('\n');
  Cow::Owned(stripped)
}

/// Trims ASCII whitespace plus NUL and vertical tab from both ends.
fn trim_blank(text: &str) -> &str {
  text.trim_matches(|c| matches!(c, ' ' | '\t' | '\n' | '\r' | '\0' | '\x0B'))
}

/// Runs the full rewrite pipeline over one file's content.
///
/// The `ContentTransformer` applies, in this order:
/// 1. [`strip_license_block`]
/// 2. [`insert_license`] for the configured variant
/// 3. [`convert_to_tabs`]
/// 4. [`remove_include_brackets`]
pub struct ContentTransformer {
  project: ProjectInfo,
  variant: LicenseVariant,
  strip_options: StripOptions,
}

impl ContentTransformer {
  /// Creates a transformer for one run.
  pub const fn new(project: ProjectInfo, variant: LicenseVariant, strip_options: StripOptions) -> Self {
    Self {
      project,
      variant,
      strip_options,
    }
  }

  /// Transforms `content`; `header_path` is the path printed in the license.
  pub fn transform(&self, content: &str, header_path: &str) -> String {
    let stripped = strip_license_block(content, &self.strip_options);
    let licensed = insert_license(&stripped, header_path, &self.project, self.variant);
    let tabbed = convert_to_tabs(&licensed);
    remove_include_brackets(&tabbed).into_owned()
  }
}
