#![allow(dead_code)]

use std::fs;
use std::path::Path;

use anyhow::Result;
use relicense::templates::ProjectInfo;

pub const AUTHOR: &str = "Jane Doe <jane@example.org>";
pub const PROJECT_NAME: &str = "Emeraude-Engine";
pub const PROJECT_PLACE: &str = "https://example.org/emeraude";

/// Project metadata with fixed years so the rendered notice is stable.
pub fn project() -> ProjectInfo {
  ProjectInfo {
    author: AUTHOR.to_string(),
    project_name: PROJECT_NAME.to_string(),
    project_place: PROJECT_PLACE.to_string(),
    start_year: 2010,
    year: 2024,
  }
}

/// Writes `content` at `root/rel`, creating parent directories.
pub fn write_file(root: &Path, rel: &str, content: &str) -> Result<()> {
  let path = root.join(rel);
  if let Some(parent) = path.parent() {
    fs::create_dir_all(parent)?;
  }
  fs::write(path, content)?;
  Ok(())
}

/// An old-style notice long enough to be recognized as a license block.
pub fn old_notice() -> String {
  let mut notice = String::from("/*\n * Old license header\n");
  for i in 0..30 {
    notice.push_str(&format!(" * Line {} of a long and outdated license text.\n", i));
  }
  notice.push_str(" */\n");
  notice
}

/// A small C++ tree with sources, a vendored directory and unrelated files.
///
/// ```text
/// src/Window.cpp     old notice, space indentation, angle include
/// src/Window.hpp     no notice
/// src/notes.txt      not a C++ file
/// src/empty.cpp      empty
/// third-party/lib.hpp
/// .cache/gen.cpp
/// ```
pub fn create_source_tree(root: &Path) -> Result<()> {
  write_file(
    root,
    "src/Window.cpp",
    &format!(
      "{}\n#include <Window.hpp>\n#include <vector>\n\nint Window::width() const\n{{\n    return m_width;\n}}\n",
      old_notice()
    ),
  )?;
  write_file(
    root,
    "src/Window.hpp",
    "#pragma once\n\nclass Window\n{\n    public:\n        int width() const;\n};\n",
  )?;
  write_file(root, "src/notes.txt", "    indented notes\n")?;
  write_file(root, "src/empty.cpp", "")?;
  write_file(root, "third-party/lib.hpp", "    int vendored;\n")?;
  write_file(root, ".cache/gen.cpp", "    int generated;\n")?;
  Ok(())
}
