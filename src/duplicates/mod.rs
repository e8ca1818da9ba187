//! Duplicate detection module.
//!
//! This module provides functionality for:
//! - Size-based file grouping ([`SizeIndex`])
//! - Funnel-style content equality ([`oracle`])
//! - Two- and N-directory matching ([`DuplicateMatcher`])

pub mod groups;
pub mod matcher;
pub mod oracle;

pub use groups::{EmptyFilePolicy, GroupingStats, SizeIndex};
pub use matcher::{
    find_duplicate_pairs, get_duplicates, select_smallest, DirectoryIndex, DuplicateMatcher,
    DuplicatePair, MatchFailure, MatchReport, MatchStats, MatcherConfig, MultiMatchReport,
};
pub use oracle::{evaluate, same_content, Stage, Verdict};
