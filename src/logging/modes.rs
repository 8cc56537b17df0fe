use std::sync::atomic::{AtomicU8, Ordering};

use clap::ValueEnum;
use tracing_subscriber::EnvFilter;

/// Global output mode shared by the logging macros.
///
/// Starts out as [`OutputMode::Normal`] until the CLI switches it.
static OUTPUT_MODE: AtomicU8 = AtomicU8::new(0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputMode {
  Normal = 0,
  Quiet = 1,
  Verbose = 2,
}

impl OutputMode {
  /// Convert from u8 to OutputMode
  const fn from_u8(value: u8) -> Self {
    match value {
      1 => OutputMode::Quiet,
      2 => OutputMode::Verbose,
      _ => OutputMode::Normal,
    }
  }
}

/// Enum representing the color mode options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
  /// Automatically determine whether to use colors based on TTY detection
  Auto,
  /// Never use colors
  Never,
  /// Always use colors
  Always,
}

impl ColorMode {
  /// Applies this color mode to all `owo-colors` output of the process.
  pub fn apply(self) {
    match self {
      ColorMode::Auto => owo_colors::unset_override(),
      ColorMode::Never => owo_colors::set_override(false),
      ColorMode::Always => owo_colors::set_override(true),
    }
  }
}

/// Sets the global verbose logging flag.
///
/// When verbose logging is enabled, the [`verbose_log!`] macro will output
/// messages to stderr. When disabled, verbose log messages are suppressed.
pub fn set_verbose() {
  OUTPUT_MODE.store(OutputMode::Verbose as u8, Ordering::SeqCst);
}

/// Silences the [`info_log!`] macro.
pub fn set_quiet() {
  OUTPUT_MODE.store(OutputMode::Quiet as u8, Ordering::SeqCst);
}

/// Checks if verbose logging is currently enabled.
///
/// # Returns
///
/// `true` if verbose logging is enabled, `false` otherwise.
pub fn is_verbose() -> bool {
  let mode_u8 = OUTPUT_MODE.load(Ordering::SeqCst);
  matches!(OutputMode::from_u8(mode_u8), OutputMode::Verbose)
}

/// Checks if quiet mode is currently enabled.
///
/// # Returns
///
/// `true` if quiet mode is enabled, `false` otherwise.
pub fn is_quiet() -> bool {
  let mode_u8 = OUTPUT_MODE.load(Ordering::SeqCst);
  matches!(OutputMode::from_u8(mode_u8), OutputMode::Quiet)
}

/// Installs the global `tracing` subscriber.
///
/// `RUST_LOG` takes precedence when set. Otherwise the level follows the
/// command line: `-q` keeps only errors, no flag shows warnings, and each `-v`
/// raises the level one step (info, debug, trace). Output goes to stderr.
///
/// Calling this more than once is harmless; later calls are ignored.
pub fn init_tracing(quiet: bool, verbose: u8) {
  let default_level = if quiet {
    "error"
  } else {
    match verbose {
      0 => "warn",
      1 => "info",
      2 => "debug",
      _ => "trace",
    }
  };

  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

  let _ = tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_target(false)
    .try_init();
}
