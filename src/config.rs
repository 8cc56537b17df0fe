//! # Configuration Module
//!
//! This module resolves the settings of a run: the project metadata written
//! into every notice, the license variant, which files to visit and the
//! thresholds used to recognize an existing license block.
//!
//! Settings come from a `.relicense.toml` file (or the file named by the
//! `RELICENSE_CONFIG` environment variable) and from command-line flags,
//! with flags taking precedence.
//!
//! ```toml
//! author = "Jane Doe <jane@example.org>"
//! project-name = "Emeraude-Engine"
//! project-place = "https://github.com/example/emeraude-engine"
//! start-year = 2010
//! license = "lgpl3"
//! extensions = ["cpp", "hpp"]
//! exclusions = ["third-party", "cmake-build"]
//!
//! [strip]
//! max-length = 512
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::processor::StripOptions;
use crate::templates::{DEFAULT_START_YEAR, LicenseVariant, ProjectInfo};
use crate::verbose_log;

/// The default config file name.
pub const DEFAULT_CONFIG_FILENAME: &str = ".relicense.toml";

/// Environment variable for specifying config file path.
pub const CONFIG_ENV_VAR: &str = "RELICENSE_CONFIG";

/// Extensions visited when neither the file nor the flags name any.
pub const DEFAULT_EXTENSIONS: &[&str] = &["cpp", "hpp"];

/// Overrides for the license block recognition thresholds.
#[derive(Debug, Default, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct StripConfig {
  #[serde(default)]
  pub min_start: Option<usize>,
  #[serde(default)]
  pub max_length: Option<usize>,
  #[serde(default)]
  pub start_mask: Option<String>,
  #[serde(default)]
  pub end_mask: Option<String>,
}

/// Main configuration struct for relicense.
///
/// Every field is optional; missing values fall back to the command line and
/// then to built-in defaults.
#[derive(Debug, Default, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
  /// Copyright holder
  #[serde(default)]
  pub author: Option<String>,

  #[serde(default)]
  pub project_name: Option<String>,

  /// Where the project lives (repository URL, homepage)
  #[serde(default)]
  pub project_place: Option<String>,

  #[serde(default)]
  pub start_year: Option<i32>,

  /// License variant tag: `gpl2`, `lgpl3` or `none`
  #[serde(default)]
  pub license: Option<String>,

  /// Extensions to visit, without the leading dot
  #[serde(default)]
  pub extensions: Option<Vec<String>>,

  /// Path substrings that exclude an entry and its subtree
  #[serde(default)]
  pub exclusions: Option<Vec<String>>,

  /// Directory the paths printed in notices are made relative to
  #[serde(default)]
  pub project_root: Option<PathBuf>,

  #[serde(default)]
  pub include_hidden: Option<bool>,

  #[serde(default)]
  pub follow_symlinks: Option<bool>,

  #[serde(default)]
  pub strip: StripConfig,
}

/// Error type for configuration operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  /// The config file could not be read.
  #[error("Failed to read config file '{}': {source}", .path.display())]
  ReadError { path: PathBuf, source: std::io::Error },

  /// The config file contains invalid TOML.
  #[error("Failed to parse config file '{}': {source}", .path.display())]
  ParseError { path: PathBuf, source: toml::de::Error },

  /// A setting has an invalid value.
  #[error("Invalid value for '{field}': {message}")]
  Invalid { field: &'static str, message: String },

  /// A setting required by the chosen license variant is missing.
  #[error("Missing '{field}': required when writing {variant} notices (set it in .relicense.toml or pass --{field})")]
  Missing {
    field: &'static str,
    variant: LicenseVariant,
  },
}

impl Config {
  /// Load configuration from a file.
  ///
  /// # Arguments
  ///
  /// * `path` - Path to the configuration file
  ///
  /// # Returns
  ///
  /// The loaded configuration, or an error if the file cannot be read or
  /// parsed.
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    verbose_log!("Loading config from: {}", path.display());

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
      path: path.to_path_buf(),
      source: e,
    })?;

    toml::from_str(&content).map_err(|e| ConfigError::ParseError {
      path: path.to_path_buf(),
      source: e,
    })
  }
}

/// Values given on the command line. `None` and empty lists defer to the
/// config file.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
  pub author: Option<String>,
  pub project_name: Option<String>,
  pub project_place: Option<String>,
  pub start_year: Option<i32>,
  pub license: Option<String>,
  pub extensions: Vec<String>,
  pub exclusions: Vec<String>,
  pub project_root: Option<PathBuf>,
  pub include_hidden: bool,
  pub follow_symlinks: bool,
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone)]
pub struct Settings {
  pub project: ProjectInfo,
  pub variant: LicenseVariant,
  /// The tag as given, kept for diagnostics about unknown tags
  pub license_tag: String,
  pub extensions: Vec<String>,
  pub exclusions: Vec<String>,
  pub strip_options: StripOptions,
  pub project_root: Option<PathBuf>,
  pub include_hidden: bool,
  pub follow_symlinks: bool,
}

impl Settings {
  /// Merges the config file and the command line, then validates the result.
  ///
  /// # Arguments
  ///
  /// * `config` - The loaded config file, if any
  /// * `overrides` - Values from the command line
  /// * `year` - Last year of the copyright range
  pub fn resolve(config: Option<Config>, overrides: CliOverrides, year: i32) -> Result<Self, ConfigError> {
    let config = config.unwrap_or_default();

    let license_tag = overrides
      .license
      .or(config.license)
      .unwrap_or_else(|| LicenseVariant::default().tag().to_string());
    let variant = LicenseVariant::from_tag(&license_tag);

    let project = ProjectInfo {
      author: overrides.author.or(config.author).unwrap_or_default(),
      project_name: overrides.project_name.or(config.project_name).unwrap_or_default(),
      project_place: overrides.project_place.or(config.project_place).unwrap_or_default(),
      start_year: overrides.start_year.or(config.start_year).unwrap_or(DEFAULT_START_YEAR),
      year,
    };

    let extensions = if overrides.extensions.is_empty() {
      config
        .extensions
        .unwrap_or_else(|| DEFAULT_EXTENSIONS.iter().map(|ext| ext.to_string()).collect())
    } else {
      overrides.extensions
    };

    let exclusions = if overrides.exclusions.is_empty() {
      config.exclusions.unwrap_or_default()
    } else {
      overrides.exclusions
    };

    let defaults = StripOptions::default();
    let strip_options = StripOptions {
      min_start: config.strip.min_start.unwrap_or(defaults.min_start),
      max_length: config.strip.max_length.unwrap_or(defaults.max_length),
      start_mask: config.strip.start_mask.unwrap_or(defaults.start_mask),
      end_mask: config.strip.end_mask.unwrap_or(defaults.end_mask),
    };

    let settings = Self {
      project,
      variant,
      license_tag,
      extensions,
      exclusions,
      strip_options,
      project_root: overrides.project_root.or(config.project_root),
      include_hidden: overrides.include_hidden || config.include_hidden.unwrap_or(false),
      follow_symlinks: overrides.follow_symlinks || config.follow_symlinks.unwrap_or(false),
    };

    settings.validate()?;
    Ok(settings)
  }

  /// Validate the settings.
  ///
  /// Checks that:
  /// - At least one extension is selected, none with a leading dot
  /// - Both comment markers are non-empty
  /// - The start year does not come after the current year
  /// - Author, project name and project place are set when a notice is written
  fn validate(&self) -> Result<(), ConfigError> {
    if self.extensions.is_empty() {
      return Err(ConfigError::Invalid {
        field: "extensions",
        message: "at least one extension is required".to_string(),
      });
    }

    if let Some(ext) = self.extensions.iter().find(|ext| ext.starts_with('.') || ext.is_empty()) {
      return Err(ConfigError::Invalid {
        field: "extensions",
        message: format!("'{}' should be a non-empty extension without the leading dot", ext),
      });
    }

    if self.strip_options.start_mask.is_empty() || self.strip_options.end_mask.is_empty() {
      return Err(ConfigError::Invalid {
        field: "strip",
        message: "comment markers cannot be empty".to_string(),
      });
    }

    if self.project.start_year > self.project.year {
      return Err(ConfigError::Invalid {
        field: "start-year",
        message: format!(
          "{} comes after the current year {}",
          self.project.start_year, self.project.year
        ),
      });
    }

    if self.variant != LicenseVariant::None {
      let required = [
        ("author", &self.project.author),
        ("project-name", &self.project.project_name),
        ("project-place", &self.project.project_place),
      ];
      if let Some((field, _)) = required.into_iter().find(|(_, value)| value.trim().is_empty()) {
        return Err(ConfigError::Missing {
          field,
          variant: self.variant,
        });
      }
    }

    Ok(())
  }
}

/// Discover the configuration file path.
///
/// The configuration file is discovered in the following order:
/// 1. Path specified via `--config` flag (passed as `explicit_path`)
/// 2. Path specified via `RELICENSE_CONFIG` environment variable
/// 3. `.relicense.toml` in the base directory of the walk
///
/// # Arguments
///
/// * `explicit_path` - Optional explicit path from CLI flag
/// * `base_path` - The directory the walk starts from
///
/// # Returns
///
/// The path to the configuration file, or `None` if no config file is found.
pub fn discover_config_path(explicit_path: Option<&Path>, base_path: &Path) -> Option<PathBuf> {
  if let Some(path) = explicit_path {
    // An explicit path that does not exist is reported by `load_config`
    return Some(path.to_path_buf());
  }

  if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
    let path = PathBuf::from(&env_path);
    if path.exists() {
      verbose_log!("Using config from {}: {}", CONFIG_ENV_VAR, path.display());
      return Some(path);
    }
    verbose_log!("{} path does not exist: {}", CONFIG_ENV_VAR, env_path);
  }

  let base_config = base_path.join(DEFAULT_CONFIG_FILENAME);
  if base_config.exists() {
    verbose_log!("Using config: {}", base_config.display());
    return Some(base_config);
  }

  verbose_log!("No config file found");
  None
}

/// Load configuration from the discovered path.
///
/// # Arguments
///
/// * `explicit_path` - Optional explicit path from CLI flag
/// * `base_path` - The directory the walk starts from
/// * `no_config` - If true, skip config file discovery
///
/// # Returns
///
/// The loaded configuration, or `None` if there is no config file to use.
pub fn load_config(explicit_path: Option<&Path>, base_path: &Path, no_config: bool) -> Result<Option<Config>> {
  if no_config {
    verbose_log!("Config file discovery disabled (--no-config)");
    return Ok(None);
  }

  match discover_config_path(explicit_path, base_path) {
    Some(path) => {
      let config = Config::load(&path).with_context(|| format!("Failed to load config from {}", path.display()))?;
      Ok(Some(config))
    }
    None => Ok(None),
  }
}
