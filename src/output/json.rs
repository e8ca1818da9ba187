//! JSON output formatter for match results.
//!
//! Provides machine-readable JSON output for scripting and automation.
//!
//! # Output Schema
//!
//! ```json
//! {
//!   "mode": "pair",
//!   "directories": ["/backup", "/photos"],
//!   "pairs": [
//!     { "source": "/backup/a.jpg", "duplicate": "/photos/a.jpg" }
//!   ],
//!   "survivors": [],
//!   "summary": {
//!     "success": true,
//!     "failure": null,
//!     "same_directory": false,
//!     "pair_count": 1,
//!     "comparisons": 3,
//!     "files_hashed": 2,
//!     "exit_code": 0,
//!     "exit_code_name": "DM000"
//!   }
//! }
//! ```
//!
//! # Example
//!
//! ```no_run
//! use dupmatch::duplicates::DuplicateMatcher;
//! use dupmatch::output::json::JsonOutput;
//! use std::path::PathBuf;
//!
//! let dirs = vec![PathBuf::from("/backup"), PathBuf::from("/photos")];
//! let report = DuplicateMatcher::with_defaults().match_pair(&dirs[0], &dirs[1]);
//!
//! let output = JsonOutput::from_pair_report(&dirs, &report);
//! println!("{}", output.to_json_pretty().unwrap());
//! ```

use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::duplicates::{DuplicatePair, MatchReport, MatchStats, MultiMatchReport};
use crate::error::ExitCode;

/// Which matching mode produced the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum JsonMode {
    /// Two directories, every duplicate pair
    Pair,
    /// Three or more directories, files present in all of them
    Multi,
}

/// A duplicate pair in JSON format.
#[derive(Debug, Clone, Serialize)]
pub struct JsonPair {
    /// File from the listed (source) directory
    pub source: String,
    /// Matching file from the other directory
    pub duplicate: String,
}

impl From<&DuplicatePair> for JsonPair {
    fn from(pair: &DuplicatePair) -> Self {
        Self {
            source: path_string(&pair.source),
            duplicate: path_string(&pair.duplicate),
        }
    }
}

/// Summary of a matching pass in JSON format.
#[derive(Debug, Clone, Serialize)]
pub struct JsonSummary {
    /// Whether matching was performed
    pub success: bool,
    /// Why matching failed, if it did
    pub failure: Option<String>,
    /// Both arguments named the same directory
    pub same_directory: bool,
    /// Number of reported pairs
    pub pair_count: usize,
    /// Candidate comparisons run through the equality funnel
    pub comparisons: usize,
    /// Comparisons that confirmed equal content
    pub matches: usize,
    /// Matches settled by filesystem equivalence
    pub equivalent_hits: usize,
    /// Rejections by size
    pub size_rejections: usize,
    /// Rejections by content hash
    pub hash_rejections: usize,
    /// Rejections because a file became unreadable or changed
    pub validity_rejections: usize,
    /// Files whose content was read
    pub files_hashed: usize,
    /// The exit code number
    pub exit_code: i32,
    /// The machine-readable exit code name (e.g., "DM000")
    pub exit_code_name: String,
}

impl JsonSummary {
    fn new(
        failure: Option<String>,
        same_directory: bool,
        pair_count: usize,
        stats: &MatchStats,
    ) -> Self {
        let exit_code = ExitCode::from_success(failure.is_none());
        Self {
            success: failure.is_none(),
            failure,
            same_directory,
            pair_count,
            comparisons: stats.comparisons,
            matches: stats.matches,
            equivalent_hits: stats.equivalent_hits,
            size_rejections: stats.size_rejections,
            hash_rejections: stats.hash_rejections,
            validity_rejections: stats.validity_rejections,
            files_hashed: stats.files_hashed,
            exit_code: exit_code.as_i32(),
            exit_code_name: exit_code.code_prefix().to_string(),
        }
    }
}

/// Complete JSON output structure.
#[derive(Debug, Clone, Serialize)]
pub struct JsonOutput {
    /// Matching mode
    pub mode: JsonMode,
    /// Directories as given on the command line
    pub directories: Vec<String>,
    /// Duplicate pairs in report order
    pub pairs: Vec<JsonPair>,
    /// Base files present in every directory (multi mode only)
    pub survivors: Vec<String>,
    /// Summary statistics
    pub summary: JsonSummary,
}

impl JsonOutput {
    /// Build output for a two-directory match.
    #[must_use]
    pub fn from_pair_report(directories: &[PathBuf], report: &MatchReport) -> Self {
        let pairs: Vec<JsonPair> = report.pairs.iter().map(JsonPair::from).collect();
        Self {
            mode: JsonMode::Pair,
            directories: directories.iter().map(|d| path_string(d)).collect(),
            summary: JsonSummary::new(
                report.failure.as_ref().map(ToString::to_string),
                report.same_directory,
                pairs.len(),
                &report.stats,
            ),
            pairs,
            survivors: Vec::new(),
        }
    }

    /// Build output for an N-directory match.
    #[must_use]
    pub fn from_multi_report(directories: &[PathBuf], report: &MultiMatchReport) -> Self {
        let pairs: Vec<JsonPair> = report.pairs().iter().map(JsonPair::from).collect();
        Self {
            mode: JsonMode::Multi,
            directories: directories.iter().map(|d| path_string(d)).collect(),
            summary: JsonSummary::new(
                report.failure.as_ref().map(ToString::to_string),
                false,
                pairs.len(),
                &report.stats,
            ),
            pairs,
            survivors: report
                .survivors
                .iter()
                .map(|f| path_string(f.path()))
                .collect(),
        }
    }

    /// Serialize to a compact JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serialize to a pretty-printed JSON string.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Write JSON to a writer, followed by a newline.
    pub fn write_to<W: Write>(&self, writer: &mut W, pretty: bool) -> Result<(), JsonOutputError> {
        let json = if pretty {
            self.to_json_pretty()?
        } else {
            self.to_json()?
        };
        writer.write_all(json.as_bytes())?;
        writer.write_all(b"\n")?;
        Ok(())
    }
}

fn path_string(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

/// Errors that can occur during JSON output.
#[derive(thiserror::Error, Debug)]
pub enum JsonOutputError {
    /// JSON serialization failed
    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error while writing
    #[error("I/O error during JSON generation: {0}")]
    Io(#[from] std::io::Error),
}
