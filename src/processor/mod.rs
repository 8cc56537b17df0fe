//! # Processor Module
//!
//! This module contains the core functionality for walking a source tree and
//! rewriting the license header of every matching file.
//!
//! The module is organized into several submodules:
//! - [`file_io`] - File reading and writing operations
//! - [`content_transformer`] - The text transforms (block stripping, notice insertion, tabs, includes)
//! - [`file_collector`] - Directory traversal, exclusions and extension matching
//!
//! The [`Processor`] struct is the main entry point, orchestrating the
//! submodules one file at a time.

mod content_transformer;
mod file_collector;
mod file_io;

use std::path::{Path, PathBuf};

pub use content_transformer::{
  ContentTransformer, StripOptions, convert_to_tabs, remove_include_brackets, strip_license_block,
};
pub use file_collector::{FileCollector, WalkItem, absolutize_path, relative_to_root};
pub use file_io::FileIO;
use thiserror::Error;
use tracing::{debug, error, warn};

use crate::config::{DEFAULT_EXTENSIONS, Settings};
use crate::diff::{DiffManager, change_stats};
use crate::report::{CrawlReport, FileOutcome};
use crate::templates::{LicenseVariant, ProjectInfo, header_path_display};
use crate::{info_log, verbose_log};

/// Errors that end a crawl.
///
/// Unreadable files and unlistable directories are not errors; they are
/// recorded in the [`CrawlReport`]. A failed write is, and leaves every file
/// already rewritten as it is.
#[derive(Debug, Error)]
pub enum ProcessError {
  #[error("Unable to write \"{}\": {source}", .path.display())]
  Write { path: PathBuf, source: std::io::Error },
}

/// Configuration for creating a Processor instance.
pub struct ProcessorConfig {
  pub project: ProjectInfo,
  pub variant: LicenseVariant,
  pub strip_options: StripOptions,

  // Selection
  pub extensions: Vec<String>,
  pub exclusions: Vec<String>,
  pub include_hidden: bool,
  pub follow_symlinks: bool,

  /// Directory the printed header paths are made relative to
  pub project_root: Option<PathBuf>,

  // Behavior flags
  pub dry_run: bool,

  // Optional components
  pub diff_manager: Option<DiffManager>,
}

impl ProcessorConfig {
  /// Creates a new ProcessorConfig with required fields and sensible defaults.
  ///
  /// Use struct update syntax to override specific fields:
  /// ```ignore
  /// ProcessorConfig {
  ///     dry_run: true,
  ///     ..ProcessorConfig::new(project, LicenseVariant::Gpl2)
  /// }
  /// ```
  pub fn new(project: ProjectInfo, variant: LicenseVariant) -> Self {
    Self {
      project,
      variant,
      strip_options: StripOptions::default(),
      extensions: DEFAULT_EXTENSIONS.iter().map(|ext| (*ext).to_string()).collect(),
      exclusions: vec![],
      include_hidden: false,
      follow_symlinks: false,
      project_root: None,
      dry_run: false,
      diff_manager: None,
    }
  }

  /// Builds a configuration from resolved settings.
  pub fn from_settings(settings: Settings) -> Self {
    Self {
      project: settings.project,
      variant: settings.variant,
      strip_options: settings.strip_options,
      extensions: settings.extensions,
      exclusions: settings.exclusions,
      include_hidden: settings.include_hidden,
      follow_symlinks: settings.follow_symlinks,
      project_root: settings.project_root,
      dry_run: false,
      diff_manager: None,
    }
  }
}

/// Processor for rewriting license headers under a directory.
///
/// The `Processor` is responsible for:
/// - Walking the tree through a [`FileCollector`]
/// - Running each selected file through the [`ContentTransformer`]
/// - Writing back only the files whose content changed
/// - Showing diffs in dry run mode
/// - Recording one outcome per visited file
pub struct Processor {
  /// Transforms applied to every file
  content_transformer: ContentTransformer,

  /// Directory traversal and selection
  file_collector: FileCollector,

  /// Absolute project root, when header paths are relative to it
  project_root: Option<PathBuf>,

  /// Whether to leave files untouched
  dry_run: bool,

  /// Manager for handling diff creation and rendering
  diff_manager: DiffManager,
}

impl Processor {
  /// Creates a new processor with the specified configuration.
  ///
  /// A relative project root is resolved against the current directory once,
  /// here, so the header paths do not depend on when a file is reached.
  pub fn new(config: ProcessorConfig) -> anyhow::Result<Self> {
    let project_root = config.project_root.as_deref().map(absolutize_path).transpose()?;

    Ok(Self {
      content_transformer: ContentTransformer::new(config.project, config.variant, config.strip_options),
      file_collector: FileCollector::new(
        config.extensions,
        config.exclusions,
        config.include_hidden,
        config.follow_symlinks,
      ),
      project_root,
      dry_run: config.dry_run,
      diff_manager: config.diff_manager.unwrap_or_default(),
    })
  }

  /// Walks `base_path` and rewrites every selected file.
  ///
  /// Files are handled one at a time in walk order. The returned report's
  /// `visited` count is the number of files that matched the extension set
  /// and were not excluded, whether or not they changed.
  ///
  /// # Errors
  ///
  /// Returns [`ProcessError::Write`] on the first file that cannot be written.
  /// Files rewritten before it stay rewritten.
  pub fn crawl_directory(&self, base_path: &Path) -> Result<CrawlReport, ProcessError> {
    let mut report = CrawlReport::default();
    verbose_log!("Scanning directory: {}", base_path.display());

    for item in self.file_collector.walk(base_path) {
      match item {
        WalkItem::Directory(path) => {
          verbose_log!("Scanning directory: {}", path.display());
        }
        WalkItem::ListingFailure { path, reason } => {
          warn!("Unable to list {}: {}", path.display(), reason);
          report.record_listing_failure(&path, reason);
        }
        WalkItem::File(path) => {
          report.visited += 1;
          let outcome = self.process_file(&path)?;
          report.record(&path, outcome);
        }
      }
    }

    debug!(
      "Visited {} files, {} changed",
      report.visited,
      report.changed().count()
    );
    Ok(report)
  }

  /// Rewrites one file.
  ///
  /// The file is written only when the transforms change its content, so a
  /// second run over the same tree touches nothing.
  ///
  /// # Errors
  ///
  /// Returns [`ProcessError::Write`] when the rewritten content cannot be
  /// stored.
  pub fn process_file(&self, path: &Path) -> Result<FileOutcome, ProcessError> {
    let content = match FileIO::read_full_content(path) {
      Ok(content) => content,
      Err(e) => {
        let reason = e.root_cause().to_string();
        info_log!("Unable to read \"{}\": {}", path.display(), reason);
        return Ok(FileOutcome::Unreadable { reason });
      }
    };

    if content.is_empty() {
      info_log!("Nothing to rewrite in empty file \"{}\"", path.display());
      return Ok(FileOutcome::Empty);
    }

    let updated = self.content_transformer.transform(&content, &self.header_path(path));

    if updated == content {
      info_log!("No change in file \"{}\". Skipping ...", path.display());
      return Ok(FileOutcome::Unchanged);
    }

    let (inserted, deleted) = change_stats(&content, &updated);
    debug!("{}: +{} -{} lines", path.display(), inserted, deleted);

    if self.dry_run {
      if let Err(e) = self.diff_manager.display_diff(path, &content, &updated) {
        warn!("Failed to display diff for {}: {:#}", path.display(), e);
      }
      info_log!("Would update: {}", path.display());
      return Ok(FileOutcome::WouldUpdate);
    }

    if let Err(source) = FileIO::write_file(path, &updated) {
      error!("Unable to write \"{}\": {}", path.display(), source);
      return Err(ProcessError::Write {
        path: path.to_path_buf(),
        source,
      });
    }

    info_log!("Updated: {}", path.display());
    Ok(FileOutcome::Updated)
  }

  /// Returns the path printed on the first line of the notice.
  ///
  /// Without a project root this is the path as walked. With one, it is the
  /// path relative to the root, falling back to the walked path for files
  /// outside it.
  pub fn header_path(&self, path: &Path) -> String {
    let relative = self
      .project_root
      .as_deref()
      .and_then(|root| relative_to_root(path, root));

    header_path_display(relative.as_deref().unwrap_or(path))
  }
}
