//! Command-line interface definitions for dupmatch.
//!
//! This module defines all CLI arguments using the clap derive API. The tool
//! takes two or more directories as positional arguments; with exactly two it
//! lists every duplicate pair, with more it lists files present in all of them.
//!
//! # Example
//!
//! ```bash
//! # Files in ~/backup that also exist in ~/photos
//! dupmatch ~/backup ~/photos
//!
//! # Recurse into subdirectories and emit JSON
//! dupmatch -r --output json ~/backup ~/photos
//!
//! # Files present in all three trees
//! dupmatch -r /mnt/a /mnt/b /mnt/c
//! ```

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Find byte-identical files shared between directories.
///
/// Files are compared by size first and by BLAKE3 content hash only when
/// sizes match. Each duplicate is printed as `source = match`.
#[derive(Debug, Parser)]
#[command(name = "dupmatch")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity level (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all log output except errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Report fatal errors as JSON on stderr
    #[arg(long)]
    pub json_errors: bool,

    /// Output format (text for `a = b` lines, json for scripting)
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Descend into subdirectories
    #[arg(short, long)]
    pub recursive: bool,

    /// Follow symbolic links to directories while recursing
    ///
    /// Warning: May revisit files if symlinks form cycles.
    #[arg(long)]
    pub follow_symlinks: bool,

    /// Skip hidden files and directories (starting with .)
    #[arg(long)]
    pub skip_hidden: bool,

    /// Honour a .gitignore file at the root of each directory
    #[arg(long)]
    pub gitignore: bool,

    /// Treat empty files as duplicates of each other
    #[arg(long)]
    pub include_empty: bool,

    /// Glob patterns to ignore (can be specified multiple times)
    #[arg(short, long = "ignore", value_name = "PATTERN")]
    pub ignore_patterns: Vec<String>,

    /// Path to a TOML configuration file
    ///
    /// If not specified, a default platform-specific path is used.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Named profile from the configuration file
    #[arg(long, value_name = "NAME")]
    pub profile: Option<String>,

    /// Write the effective settings to the configuration file before matching
    ///
    /// The file is `--config PATH` if given, otherwise the default path.
    #[arg(long)]
    pub save_config: bool,

    /// Directories to compare (at least two)
    #[arg(value_name = "DIR", required = true, num_args = 2..)]
    pub directories: Vec<PathBuf>,
}

/// Output format for match results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One `source = match` line per pair
    #[default]
    Text,
    /// JSON document for scripting
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}
