//! # relicense
//!
//! Rewrites the license header of every C++ source file under a directory.

mod cli;

use anyhow::Result;

use crate::cli::{Cli, run};

fn main() -> Result<()> {
  let cli = Cli::parse_args();
  run(cli.run_args)
}
