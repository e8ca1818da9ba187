//! Output formatters for match results.
//!
//! - Text: `source = duplicate` lines, one per pair
//! - JSON: pairs plus a summary, for automation and scripting
//!
//! # Example
//!
//! ```no_run
//! use dupmatch::duplicates::DuplicateMatcher;
//! use dupmatch::output::TextOutput;
//! use std::path::Path;
//!
//! let report = DuplicateMatcher::with_defaults().match_pair(Path::new("a"), Path::new("b"));
//! TextOutput::new(&report.pairs).write_to(&mut std::io::stdout()).unwrap();
//! ```

pub mod json;
pub mod text;

pub use json::{JsonOutput, JsonOutputError};
pub use text::TextOutput;
