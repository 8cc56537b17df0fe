//! # CLI Module
//!
//! This module contains the command-line interface implementation.
//! It uses clap for argument parsing.

mod run;

use clap::Parser;
use clap::builder::styling::{AnsiColor, Color, Style, Styles};
pub use run::{RunArgs, run};

const CUSTOM_STYLES: Styles = Styles::styled()
  .header(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))).bold())
  .usage(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))).bold())
  .literal(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Blue))).bold())
  .placeholder(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Cyan))))
  .error(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Red))).bold())
  .valid(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))))
  .invalid(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Yellow))));

/// Top-level CLI arguments
#[derive(Parser, Debug)]
#[command(
  author,
  version,
  about,
  styles = CUSTOM_STYLES,
  after_help = "Examples:
  # Write GPLv2 headers under the current directory, skipping vendored code
  relicense --author \"Jane Doe <jane@example.org>\" --project-name Engine \\
    --project-place https://example.org/engine --exclude third-party .

  # Preview the changes as a diff without touching any file
  relicense --dry-run --show-diff src/

  # Switch a tree to LGPLv3 headers, paths relative to the repository root
  relicense --license lgpl3 --project-root . engine/src

  # Only convert indentation and quote local includes
  relicense --license none --ext cpp --ext hpp --ext h src/

  # Write a JSON report of the run
  relicense --report-json report.json src/
",
  help_template = "{before-help}{name} v{version}
{about-section}
{usage-heading} {usage}

{all-args}{after-help}
"
)]
pub struct Cli {
  #[command(flatten)]
  pub run_args: RunArgs,
}

impl Cli {
  /// Parse CLI arguments and return the Cli struct
  pub fn parse_args() -> Self {
    Self::parse()
  }
}
