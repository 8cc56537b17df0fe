//! # File I/O Module
//!
//! This module provides file reading and writing utilities for the processor.
//! It encapsulates synchronous file operations.

use std::path::Path;

use anyhow::{Context, Result};

/// File I/O operations for the processor.
///
/// This struct provides static methods for reading and writing files.
pub struct FileIO;

impl FileIO {
  /// Read full file content.
  ///
  /// Fails on I/O errors and on content that is not valid UTF-8; the
  /// transforms only operate on text.
  ///
  /// # Parameters
  ///
  /// * `path` - Path to the file to read
  ///
  /// # Returns
  ///
  /// The complete file content as a String.
  pub fn read_full_content(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path.display()))
  }

  /// Write file content in place.
  ///
  /// The raw [`std::io::Error`] is returned so the caller can classify the
  /// failure.
  ///
  /// # Parameters
  ///
  /// * `path` - Path to the file to write
  /// * `content` - Content to write to the file
  pub fn write_file(path: &Path, content: &str) -> std::io::Result<()> {
    std::fs::write(path, content)
  }
}

#[cfg(test)]
mod tests {
  use tempfile::tempdir;

  use super::*;

  #[test]
  fn test_read_write_round_trip() {
    let dir = tempdir().expect("create temp dir");
    let path = dir.path().join("a.cpp");

    FileIO::write_file(&path, "int x;\n").expect("write file");
    assert_eq!(FileIO::read_full_content(&path).expect("read file"), "int x;\n");
  }

  #[test]
  fn test_read_invalid_utf8_fails() {
    let dir = tempdir().expect("create temp dir");
    let path = dir.path().join("blob.cpp");
    std::fs::write(&path, [0xff, 0xfe, 0x00, 0x41]).expect("write bytes");

    let err = FileIO::read_full_content(&path).expect_err("invalid UTF-8 must fail");
    assert!(err.to_string().contains("Failed to read file"));
  }

  #[test]
  fn test_read_missing_file_fails() {
    let dir = tempdir().expect("create temp dir");
    assert!(FileIO::read_full_content(&dir.path().join("missing.cpp")).is_err());
  }
}
