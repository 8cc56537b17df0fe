//! # Templates Module
//!
//! This module holds the generated license notices and the project metadata
//! substituted into them.
//!
//! The module includes:
//! - [`LicenseVariant`] for choosing between the GPL-2.0 and LGPL-3.0 notices
//! - [`ProjectInfo`] for the author, project name, location and year range
//! - [`insert_license`] for prepending a rendered notice to file content
//!
//! ## Example
//!
//! ```rust
//! use relicense::templates::{LicenseVariant, ProjectInfo, insert_license};
//!
//! let project = ProjectInfo {
//!   author: "Jane Doe".to_string(),
//!   project_name: "Engine".to_string(),
//!   project_place: "https://example.org/engine".to_string(),
//!   start_year: 2010,
//!   year: 2026,
//! };
//!
//! let content = insert_license("int x;\n", "src/x.cpp", &project, LicenseVariant::Gpl2);
//! assert!(content.starts_with("/*\n * src/x.cpp\n"));
//! ```

use std::borrow::Cow;
use std::fmt;
use std::path::{Component, Path};

use serde::{Deserialize, Serialize};

/// Sentinel line closing every generated notice.
///
/// Tooling that finds this line can assume the block is regenerated on every
/// run and must not be edited by hand.
pub const GENERATED_MARKER: &str = "--- THIS IS AUTOMATICALLY GENERATED, DO NOT CHANGE ---";

/// Default first year of the copyright range.
pub const DEFAULT_START_YEAR: i32 = 2010;

const GPL2_TEMPLATE: &str = "{{path}}
This file is part of {{project}}

Copyright (C) {{start_year}}-{{year}} - {{author}}

{{project}} is free software; you can redistribute it and/or modify
it under the terms of the GNU General Public License as published by
the Free Software Foundation; either version 2 of the License, or
(at your option) any later version.

{{project}} is distributed in the hope that it will be useful,
but WITHOUT ANY WARRANTY; without even the implied warranty of
MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
GNU General Public License for more details.

You should have received a copy of the GNU General Public License
along with {{project}}; if not, write to the Free Software
Foundation, Inc., 51 Franklin St, Fifth Floor,
Boston, MA  02110-1301  USA

Complete project and additional information can be found at :
{{place}}

{{marker}}
";

const LGPL3_TEMPLATE: &str = "{{path}}
This file is part of {{project}}

Copyright (C) {{start_year}}-{{year}} - {{author}}

{{project}} is free software; you can redistribute it and/or
modify it under the terms of the GNU Lesser General Public
License as published by the Free Software Foundation; either
version 3 of the License, or (at your option) any later version.

{{project}} is distributed in the hope that it will be useful,
but WITHOUT ANY WARRANTY; without even the implied warranty of
MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU
Lesser General Public License for more details.

You should have received a copy of the GNU Lesser General Public License
along with {{project}}; if not, write to the Free Software Foundation,
Inc., 51 Franklin Street, Fifth Floor, Boston, MA  02110-1301, USA.

Complete project and additional information can be found at :
{{place}}

{{marker}}
";

/// Which notice to write at the top of each file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LicenseVariant {
  /// GNU General Public License, version 2 or later
  #[default]
  Gpl2,
  /// GNU Lesser General Public License, version 3 or later
  Lgpl3,
  /// Leave files without a generated notice
  None,
}

impl LicenseVariant {
  /// Maps a variant tag to a variant.
  ///
  /// `gpl2` and `lgpl3` select a notice. Any other tag, including `none` and
  /// the empty string, disables insertion.
  pub fn from_tag(tag: &str) -> Self {
    match tag {
      "gpl2" => LicenseVariant::Gpl2,
      "lgpl3" => LicenseVariant::Lgpl3,
      _ => LicenseVariant::None,
    }
  }

  /// Whether `tag` names a known variant (including `none`).
  pub fn is_known_tag(tag: &str) -> bool {
    matches!(tag, "gpl2" | "lgpl3" | "none")
  }

  pub const fn tag(self) -> &'static str {
    match self {
      LicenseVariant::Gpl2 => "gpl2",
      LicenseVariant::Lgpl3 => "lgpl3",
      LicenseVariant::None => "none",
    }
  }

  const fn template(self) -> Option<&'static str> {
    match self {
      LicenseVariant::Gpl2 => Some(GPL2_TEMPLATE),
      LicenseVariant::Lgpl3 => Some(LGPL3_TEMPLATE),
      LicenseVariant::None => None,
    }
  }
}

impl fmt::Display for LicenseVariant {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.tag())
  }
}

/// Project metadata written into every notice.
///
/// Built once per run and passed by reference, so independent runs (tests in
/// particular) never share state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectInfo {
  /// Copyright holder, usually `Name <email>`
  pub author: String,
  /// Project name used in the legal text
  pub project_name: String,
  /// Where the project lives, usually a repository URL
  pub project_place: String,
  /// First year of the copyright range
  pub start_year: i32,
  /// Last year of the copyright range
  pub year: i32,
}

/// Defines the comment style a notice is wrapped in.
///
/// # Fields
///
/// * `top` - The string to use at the top of a comment block (e.g., "/*")
/// * `middle` - The string to use at the beginning of each line in the comment
///   block (e.g., " * ")
/// * `bottom` - The string to use at the bottom of a comment block (e.g., "
///   */")
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentStyle {
  /// The string to use at the top of a comment block
  pub top: String,

  /// The string to use at the beginning of each line in the comment block
  pub middle: String,

  /// The string to use at the bottom of a comment block
  pub bottom: String,
}

impl CommentStyle {
  /// Create a block-comment style.
  ///
  /// # Arguments
  ///
  /// * `top` - The string to start the comment block (e.g., "/*")
  /// * `middle` - The prefix for each line (e.g., " * ")
  /// * `bottom` - The string to end the comment block (e.g., " */")
  pub fn block(top: &str, middle: &str, bottom: &str) -> Self {
    Self {
      top: top.to_string(),
      middle: middle.to_string(),
      bottom: bottom.to_string(),
    }
  }

  /// The C-style block every notice is written in.
  pub fn c_block() -> Self {
    Self::block("/*", " * ", " */")
  }
}

/// Renders the notice text (without comment markers) for one file.
///
/// # Parameters
///
/// * `variant` - Which notice to render
/// * `header_path` - Path printed on the first line of the notice
/// * `project` - Metadata substituted into the notice
///
/// # Returns
///
/// The rendered text, or `None` for [`LicenseVariant::None`].
pub fn render_license(variant: LicenseVariant, header_path: &str, project: &ProjectInfo) -> Option<String> {
  let template = variant.template()?;

  let rendered = template
    .replace("{{path}}", header_path)
    .replace("{{project}}", &project.project_name)
    .replace("{{start_year}}", &project.start_year.to_string())
    .replace("{{year}}", &project.year.to_string())
    .replace("{{author}}", &project.author)
    .replace("{{place}}", &project.project_place)
    .replace("{{marker}}", GENERATED_MARKER);

  Some(rendered)
}

/// Wraps the license text in the given comment style.
///
/// Empty lines get the middle marker without its trailing whitespace, and
/// one blank line follows the closing marker.
pub fn format_with_comment_style(license_text: &str, style: &CommentStyle) -> String {
  let mut result = String::new();

  if !style.top.is_empty() {
    result.push_str(&style.top);
    result.push('\n');
  }

  for line in license_text.lines() {
    if line.is_empty() {
      result.push_str(style.middle.trim_end());
    } else {
      result.push_str(&style.middle);
      result.push_str(line);
    }
    result.push('\n');
  }

  if !style.bottom.is_empty() {
    result.push_str(&style.bottom);
    result.push('\n');
  }

  // Separates the notice from the file body
  result.push('\n');

  result
}

/// Prepends the generated notice to `content`.
///
/// The content itself is not touched. With [`LicenseVariant::None`] the
/// content is returned unchanged.
pub fn insert_license<'a>(
  content: &'a str,
  header_path: &str,
  project: &ProjectInfo,
  variant: LicenseVariant,
) -> Cow<'a, str> {
  let Some(license_text) = render_license(variant, header_path, project) else {
    return Cow::Borrowed(content);
  };

  let mut result = format_with_comment_style(&license_text, &CommentStyle::c_block());
  result.push_str(content);
  Cow::Owned(result)
}

/// Formats a path for the first line of a notice.
///
/// `.` components are dropped and separators are written as `/`, so
/// `./src/Window.cpp` and `src\Window.cpp` both become `src/Window.cpp`.
pub fn header_path_display(path: &Path) -> String {
  path
    .components()
    .filter(|component| !matches!(component, Component::CurDir))
    .map(|component| component.as_os_str().to_string_lossy())
    .collect::<Vec<_>>()
    .join("/")
    .replace("//", "/")
}
