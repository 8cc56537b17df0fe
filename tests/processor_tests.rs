mod common;

use std::fs;

use anyhow::Result;
use relicense::diff::DiffManager;
use relicense::processor::{ProcessError, Processor, ProcessorConfig};
use relicense::report::FileOutcome;
use relicense::templates::{GENERATED_MARKER, LicenseVariant};
use tempfile::tempdir;

use common::{PROJECT_NAME, create_source_tree, project, write_file};

fn create_test_processor(root: &std::path::Path, variant: LicenseVariant) -> Result<Processor> {
  Processor::new(ProcessorConfig {
    exclusions: vec!["third-party".to_string()],
    project_root: Some(root.to_path_buf()),
    ..ProcessorConfig::new(project(), variant)
  })
}

#[test]
fn test_crawl_rewrites_matching_files() -> Result<()> {
  let temp_dir = tempdir()?;
  create_source_tree(temp_dir.path())?;

  let processor = create_test_processor(temp_dir.path(), LicenseVariant::Gpl2)?;
  let report = processor.crawl_directory(temp_dir.path())?;

  // Window.cpp, Window.hpp and empty.cpp; vendored, hidden and .txt files are
  // never visited
  assert_eq!(report.visited, 3);
  assert_eq!(report.changed().count(), 2);
  assert_eq!(report.empty_count(), 1);
  assert!(report.listing_failures.is_empty());

  let window = fs::read_to_string(temp_dir.path().join("src/Window.cpp"))?;
  assert!(window.starts_with("/*\n * src/Window.cpp\n * This file is part of Emeraude-Engine\n"));
  assert!(window.contains(" * Copyright (C) 2010-2024 - Jane Doe <jane@example.org>\n"));
  assert!(window.contains(&format!(" * {}\n */\n\n#include \"Window.hpp\"\n", GENERATED_MARKER)));
  assert!(window.contains("#include <vector>\n"));
  assert!(window.contains("\treturn m_width;"));
  assert!(!window.contains("Old license header"));
  assert!(window.ends_with("}\n"));

  let header = fs::read_to_string(temp_dir.path().join("src/Window.hpp"))?;
  assert!(header.contains("#pragma once\n\nclass Window\n{\n\tpublic:\n\t\tint width() const;\n};\n"));

  // Untouched
  assert_eq!(fs::read_to_string(temp_dir.path().join("src/notes.txt"))?, "    indented notes\n");
  assert_eq!(fs::read_to_string(temp_dir.path().join("src/empty.cpp"))?, "");
  assert_eq!(
    fs::read_to_string(temp_dir.path().join("third-party/lib.hpp"))?,
    "    int vendored;\n"
  );
  assert_eq!(
    fs::read_to_string(temp_dir.path().join(".cache/gen.cpp"))?,
    "    int generated;\n"
  );

  Ok(())
}

#[test]
fn test_second_run_changes_nothing() -> Result<()> {
  let temp_dir = tempdir()?;
  create_source_tree(temp_dir.path())?;

  let processor = create_test_processor(temp_dir.path(), LicenseVariant::Lgpl3)?;
  processor.crawl_directory(temp_dir.path())?;
  let first = fs::read_to_string(temp_dir.path().join("src/Window.cpp"))?;

  let report = processor.crawl_directory(temp_dir.path())?;
  assert_eq!(report.visited, 3);
  assert_eq!(report.changed().count(), 0);
  assert_eq!(report.unchanged_count(), 2);
  assert_eq!(fs::read_to_string(temp_dir.path().join("src/Window.cpp"))?, first);

  Ok(())
}

#[test]
fn test_switching_variant_replaces_notice() -> Result<()> {
  let temp_dir = tempdir()?;
  create_source_tree(temp_dir.path())?;

  create_test_processor(temp_dir.path(), LicenseVariant::Gpl2)?.crawl_directory(temp_dir.path())?;
  create_test_processor(temp_dir.path(), LicenseVariant::Lgpl3)?.crawl_directory(temp_dir.path())?;

  let window = fs::read_to_string(temp_dir.path().join("src/Window.cpp"))?;
  assert!(window.contains("GNU Lesser General Public"));
  assert!(!window.contains("either version 2 of the License"));
  assert_eq!(window.matches(GENERATED_MARKER).count(), 1);
  assert_eq!(window.matches(PROJECT_NAME).count(), 4);

  Ok(())
}

#[test]
fn test_none_variant_strips_and_normalizes() -> Result<()> {
  let temp_dir = tempdir()?;
  create_source_tree(temp_dir.path())?;

  let processor = create_test_processor(temp_dir.path(), LicenseVariant::None)?;
  processor.crawl_directory(temp_dir.path())?;

  let window = fs::read_to_string(temp_dir.path().join("src/Window.cpp"))?;
  assert!(window.starts_with("#include \"Window.hpp\"\n#include <vector>\n"));
  assert!(!window.contains("/*"));

  Ok(())
}

#[test]
fn test_short_leading_comment_is_kept() -> Result<()> {
  let temp_dir = tempdir()?;
  write_file(
    temp_dir.path(),
    "a.cpp",
    "/* Window helpers */\n#include <Window.hpp>\n",
  )?;

  let processor = create_test_processor(temp_dir.path(), LicenseVariant::Gpl2)?;
  processor.crawl_directory(temp_dir.path())?;

  let content = fs::read_to_string(temp_dir.path().join("a.cpp"))?;
  assert!(content.ends_with(" */\n\n/* Window helpers */\n#include \"Window.hpp\"\n"));

  Ok(())
}

#[test]
fn test_unreadable_file_does_not_stop_the_crawl() -> Result<()> {
  let temp_dir = tempdir()?;
  fs::create_dir_all(temp_dir.path().join("src"))?;
  fs::write(temp_dir.path().join("src/a_binary.cpp"), [0xff, 0xfe, 0xfd])?;
  write_file(temp_dir.path(), "src/b.cpp", "int b;\n")?;

  let processor = create_test_processor(temp_dir.path(), LicenseVariant::Gpl2)?;
  let report = processor.crawl_directory(temp_dir.path())?;

  assert_eq!(report.visited, 2);
  assert_eq!(report.unreadable_count(), 1);
  assert_eq!(
    report.outcome_of(&temp_dir.path().join("src/b.cpp")),
    Some(&FileOutcome::Updated)
  );
  assert_eq!(fs::read(temp_dir.path().join("src/a_binary.cpp"))?, vec![0xff, 0xfe, 0xfd]);

  Ok(())
}

#[test]
fn test_dry_run_writes_nothing_and_saves_diff() -> Result<()> {
  let temp_dir = tempdir()?;
  let work_dir = temp_dir.path().join("work");
  create_source_tree(&work_dir)?;
  let before = fs::read_to_string(work_dir.join("src/Window.cpp"))?;
  let diff_path = temp_dir.path().join("changes.diff");

  let processor = Processor::new(ProcessorConfig {
    dry_run: true,
    diff_manager: Some(DiffManager::new(false, Some(diff_path.clone()))),
    exclusions: vec!["third-party".to_string()],
    ..ProcessorConfig::new(project(), LicenseVariant::Gpl2)
  })?;
  let report = processor.crawl_directory(&work_dir)?;

  assert_eq!(report.changed().count(), 2);
  assert!(
    report
      .changed()
      .all(|file| file.outcome == FileOutcome::WouldUpdate)
  );
  assert_eq!(fs::read_to_string(work_dir.join("src/Window.cpp"))?, before);

  let diff = fs::read_to_string(&diff_path)?;
  assert!(diff.contains("-    return m_width;"));
  assert!(diff.contains("+\treturn m_width;"));
  assert!(diff.contains("+#include \"Window.hpp\""));

  Ok(())
}

#[test]
fn test_hidden_entries_included_on_request() -> Result<()> {
  let temp_dir = tempdir()?;
  create_source_tree(temp_dir.path())?;

  let processor = Processor::new(ProcessorConfig {
    include_hidden: true,
    exclusions: vec!["third-party".to_string()],
    ..ProcessorConfig::new(project(), LicenseVariant::None)
  })?;
  let report = processor.crawl_directory(temp_dir.path())?;

  assert_eq!(report.visited, 4);
  assert_eq!(
    fs::read_to_string(temp_dir.path().join(".cache/gen.cpp"))?,
    "\tint generated;\n"
  );

  Ok(())
}

#[test]
fn test_custom_extensions() -> Result<()> {
  let temp_dir = tempdir()?;
  write_file(temp_dir.path(), "a.h", "    int a;\n")?;
  write_file(temp_dir.path(), "b.cpp", "    int b;\n")?;

  let processor = Processor::new(ProcessorConfig {
    extensions: vec!["h".to_string()],
    ..ProcessorConfig::new(project(), LicenseVariant::None)
  })?;
  let report = processor.crawl_directory(temp_dir.path())?;

  assert_eq!(report.visited, 1);
  assert_eq!(fs::read_to_string(temp_dir.path().join("a.h"))?, "\tint a;\n");
  assert_eq!(fs::read_to_string(temp_dir.path().join("b.cpp"))?, "    int b;\n");

  Ok(())
}

#[test]
fn test_missing_base_directory_yields_empty_report() -> Result<()> {
  let temp_dir = tempdir()?;

  let processor = create_test_processor(temp_dir.path(), LicenseVariant::Gpl2)?;
  let report = processor.crawl_directory(&temp_dir.path().join("missing"))?;

  assert_eq!(report.visited, 0);
  assert_eq!(report.listing_failures.len(), 1);

  Ok(())
}

#[cfg(unix)]
#[test]
fn test_write_failure_aborts_crawl() -> Result<()> {
  use std::os::unix::fs::PermissionsExt;

  let temp_dir = tempdir()?;
  write_file(temp_dir.path(), "a.cpp", "    int a;\n")?;
  write_file(temp_dir.path(), "b.cpp", "    int b;\n")?;
  write_file(temp_dir.path(), "c.cpp", "    int c;\n")?;

  let locked = temp_dir.path().join("b.cpp");
  fs::set_permissions(&locked, fs::Permissions::from_mode(0o444))?;

  // Permissions do not apply to a privileged user
  if fs::OpenOptions::new().write(true).open(&locked).is_ok() {
    return Ok(());
  }

  let processor = Processor::new(ProcessorConfig::new(project(), LicenseVariant::None))?;
  let result = processor.crawl_directory(temp_dir.path());

  match result {
    Err(ProcessError::Write { path, .. }) => assert_eq!(path, locked),
    other => panic!("expected a write failure, got {:?}", other),
  }

  // Files before the failure stay rewritten, files after it are not reached
  assert_eq!(fs::read_to_string(temp_dir.path().join("a.cpp"))?, "\tint a;\n");
  assert_eq!(fs::read_to_string(temp_dir.path().join("c.cpp"))?, "    int c;\n");

  Ok(())
}
