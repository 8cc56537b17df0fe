//! # Run Command
//!
//! This module implements the rewrite run: resolve settings, walk the tree,
//! rewrite headers and print the summary.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use chrono::Datelike;
use clap::Args;
use tracing::{debug, warn};

use relicense::config::{CliOverrides, Settings, load_config};
use relicense::diff::DiffManager;
use relicense::logging::{ColorMode, init_tracing, set_quiet, set_verbose};
use relicense::output::{print_start_message, print_summary};
use relicense::processor::{Processor, ProcessorConfig};
use relicense::report::{ReportFormat, ReportGenerator};
use relicense::templates::LicenseVariant;

/// Arguments for a run
#[derive(Args, Debug)]
pub struct RunArgs {
  /// Directory to walk recursively
  #[arg(default_value = ".")]
  pub path: PathBuf,

  /// Extension to process, without the leading dot (repeatable)
  /// [default: cpp, hpp]
  #[arg(long = "ext", short = 'e', value_name = "EXT")]
  pub extensions: Vec<String>,

  /// Skip every path containing this text, and never enter matching
  /// directories (repeatable)
  #[arg(long = "exclude", short = 'x', value_name = "TERM")]
  pub exclusions: Vec<String>,

  /// License notice to write: gpl2, lgpl3, or none to only normalize files
  /// [default: gpl2]
  #[arg(long, short = 'l', value_name = "TAG")]
  pub license: Option<String>,

  /// Copyright holder written into the notice
  #[arg(long, value_name = "NAME")]
  pub author: Option<String>,

  /// Project name written into the notice
  #[arg(long, value_name = "NAME")]
  pub project_name: Option<String>,

  /// Project location (usually a repository URL) written into the notice
  #[arg(long, value_name = "URL")]
  pub project_place: Option<String>,

  /// First year of the copyright range [default: 2010]
  #[arg(long, value_name = "YEAR")]
  pub start_year: Option<i32>,

  /// Last year of the copyright range [default: current year]
  #[arg(long, value_name = "YEAR")]
  pub year: Option<i32>,

  /// Print header paths relative to this directory
  #[arg(long, value_name = "DIR")]
  pub project_root: Option<PathBuf>,

  /// Also visit files and directories whose name starts with a dot
  #[arg(long)]
  pub hidden: bool,

  /// Descend into symlinked directories
  #[arg(long)]
  pub follow_symlinks: bool,

  /// Path to config file (default: .relicense.toml in PATH)
  #[arg(long, value_name = "FILE")]
  pub config: Option<PathBuf>,

  /// Ignore config file even if present
  #[arg(long)]
  pub no_config: bool,

  /// Report what would change without writing any file
  #[arg(long, short = 'n')]
  pub dry_run: bool,

  /// Show diff of changes in dry run mode
  #[arg(long, requires = "dry_run")]
  pub show_diff: bool,

  /// Save diff of changes to a file in dry run mode
  #[arg(long, short = 'o', value_name = "FILE", requires = "dry_run")]
  pub save_diff: Option<PathBuf>,

  /// Generate a JSON report of the run and save to the specified path
  #[arg(long, value_name = "OUTPUT")]
  pub report_json: Option<PathBuf>,

  /// Generate a CSV report of the run and save to the specified path
  #[arg(long, value_name = "OUTPUT")]
  pub report_csv: Option<PathBuf>,

  /// Increase verbosity (-v info, -vv debug, -vvv trace)
  #[arg(short, long, action = clap::ArgAction::Count)]
  pub verbose: u8,

  /// Suppress all output except errors
  #[arg(short, long, conflicts_with = "verbose")]
  pub quiet: bool,

  /// Control when to use colored output (auto, never, always)
  #[arg(
    long,
    value_name = "WHEN",
    num_args = 0..=1,
    default_value_t = ColorMode::Auto,
    default_missing_value = "always",
    value_enum
  )]
  pub colors: ColorMode,
}

impl RunArgs {
  fn overrides(&self) -> CliOverrides {
    CliOverrides {
      author: self.author.clone(),
      project_name: self.project_name.clone(),
      project_place: self.project_place.clone(),
      start_year: self.start_year,
      license: self.license.clone(),
      extensions: self.extensions.clone(),
      exclusions: self.exclusions.clone(),
      project_root: self.project_root.clone(),
      include_hidden: self.hidden,
      follow_symlinks: self.follow_symlinks,
    }
  }
}

/// Run the rewrite with the given arguments
pub fn run(args: RunArgs) -> Result<()> {
  // Initialize tracing subscriber for structured logging
  init_tracing(args.quiet, args.verbose);

  // Set verbose mode for output formatting and info_log! macro
  if args.verbose > 0 {
    set_verbose();
  } else if args.quiet {
    set_quiet();
  }
  args.colors.apply();

  let config = load_config(args.config.as_deref(), &args.path, args.no_config)?;
  if config.is_some() {
    debug!("Using configuration file");
  }

  let year = args.year.unwrap_or_else(|| chrono::Local::now().year());
  let settings = Settings::resolve(config, args.overrides(), year)?;

  if !LicenseVariant::is_known_tag(&settings.license_tag) {
    warn!(
      "Unknown license \"{}\", files will only be normalized",
      settings.license_tag
    );
  }

  let license_tag = settings.license_tag.clone();
  let processor = Processor::new(ProcessorConfig {
    dry_run: args.dry_run,
    diff_manager: Some(DiffManager::new(args.show_diff, args.save_diff.clone())),
    ..ProcessorConfig::from_settings(settings)
  })?;

  if let Some(ref diff_path) = args.save_diff {
    // Diffs are appended per file, so start from an empty file
    std::fs::write(diff_path, "")
      .with_context(|| format!("Failed to create diff file: {}", diff_path.display()))?;
  }

  print_start_message(&args.path, &license_tag, args.dry_run);

  let start_time = Instant::now();
  let report = processor.crawl_directory(&args.path)?;
  let elapsed = start_time.elapsed();

  if let Some(ref output) = args.report_json {
    ReportGenerator::new(ReportFormat::Json, output).generate(&report, elapsed, args.dry_run)?;
    debug!("JSON report written to {}", output.display());
  }
  if let Some(ref output) = args.report_csv {
    ReportGenerator::new(ReportFormat::Csv, output).generate(&report, elapsed, args.dry_run)?;
    debug!("CSV report written to {}", output.display());
  }

  print_summary(&report, args.dry_run, elapsed);

  Ok(())
}
