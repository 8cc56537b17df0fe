//! # relicense
//!
//! A tool that walks a C++ source tree and rewrites the leading license
//! comment of every matching file to a generated GPLv2 or LGPLv3 notice.
//!
//! `relicense` modifies source files in place. Along the way it converts
//! runs of four spaces to tabs and rewrites `#include <name.hpp>` as
//! `#include "name.hpp"`. Running it twice over the same tree changes
//! nothing the second time.
//!
//! ## Features
//!
//! * Recursively walk a directory, skipping excluded and hidden paths
//! * Strip an existing leading license block and insert a fresh notice
//! * Normalize indentation and local include brackets
//! * Dry-run mode with unified diffs
//! * JSON and CSV reports of what happened to every file
//!
//! ## Usage as a Library
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! use relicense::processor::{Processor, ProcessorConfig};
//! use relicense::templates::{LicenseVariant, ProjectInfo};
//!
//! fn main() -> anyhow::Result<()> {
//!     let project = ProjectInfo {
//!         author: "Jane Doe <jane@example.org>".to_string(),
//!         project_name: "Emeraude-Engine".to_string(),
//!         project_place: "https://example.org/emeraude".to_string(),
//!         start_year: 2010,
//!         year: 2024,
//!     };
//!
//!     let processor = Processor::new(ProcessorConfig {
//!         exclusions: vec!["third-party".to_string()],
//!         ..ProcessorConfig::new(project, LicenseVariant::Lgpl3)
//!     })?;
//!
//!     let report = processor.crawl_directory(Path::new("src"))?;
//!     println!("{} files visited", report.visited);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! * [`processor`] - Directory walking and per-file rewriting
//! * [`templates`] - License variants and notice rendering
//! * [`config`] - Config file loading and settings resolution
//! * [`logging`] - Logging utilities for verbose output
//!
//! [`processor`]: crate::processor
//! [`templates`]: crate::templates
//! [`config`]: crate::config
//! [`logging`]: crate::logging

pub mod config;
pub mod diff;
pub mod file_filter;
pub mod logging;
pub mod output;
pub mod processor;
pub mod report;
pub mod templates;
