//! Duplicate matching between directories.
//!
//! # Overview
//!
//! Matching always pairs a flat list of identities (one directory's content)
//! with the [`SizeIndex`] of another directory. For every identity, only the
//! candidates of the same size are compared through the equality funnel in
//! [`super::oracle`], so most non-duplicates are rejected without I/O.
//!
//! Two modes are built on that primitive:
//!
//! - **Two directories** ([`DuplicateMatcher::match_pair`]): emits every
//!   `(source, duplicate)` pair. When both arguments are the same directory
//!   the listings are paired positionally instead.
//! - **N directories** ([`DuplicateMatcher::match_many`]): starts from the
//!   smallest listing and keeps only files that have a duplicate in every
//!   other directory.
//!
//! Failures such as a non-directory argument are reported in the returned
//! report, never as errors.
//!
//! # Example
//!
//! ```no_run
//! use dupmatch::duplicates::DuplicateMatcher;
//! use std::path::Path;
//!
//! let matcher = DuplicateMatcher::with_defaults();
//! let report = matcher.match_pair(Path::new("/backup"), Path::new("/photos"));
//!
//! if report.is_success() {
//!     for pair in &report.pairs {
//!         println!("{} = {}", pair.source.display(), pair.duplicate.display());
//!     }
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::Serialize;

use super::groups::{EmptyFilePolicy, SizeIndex};
use super::oracle::{evaluate, Stage, Verdict};
use crate::scanner::{is_same_file, FileIdentity, Walker, WalkerConfig};

/// Two paths with byte-identical content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicatePair {
    /// File from the listed (source) directory
    pub source: PathBuf,
    /// Matching file from the indexed directory
    pub duplicate: PathBuf,
}

impl DuplicatePair {
    /// Create a pair from two paths.
    #[must_use]
    pub fn new(source: impl Into<PathBuf>, duplicate: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            duplicate: duplicate.into(),
        }
    }
}

/// Why a matching pass could not be performed.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MatchFailure {
    /// An argument does not resolve to an existing directory.
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    /// Two listings of the same directory have different lengths.
    #[error("Same directory listed twice with different contents ({left} vs {right} files)")]
    SnapshotMismatch {
        /// Files in the first listing
        left: usize,
        /// Files in the second listing
        right: usize,
    },

    /// Fewer than two directories were given.
    #[error("At least two directories are required, got {0}")]
    TooFewDirectories(usize),
}

/// Counters collected while matching.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MatchStats {
    /// Number of candidate comparisons run through the funnel
    pub comparisons: usize,
    /// Comparisons that found the same content
    pub matches: usize,
    /// Matches settled by filesystem equivalence alone
    pub equivalent_hits: usize,
    /// Comparisons rejected by size
    pub size_rejections: usize,
    /// Comparisons rejected by content hash
    pub hash_rejections: usize,
    /// Comparisons rejected because a file became invalid
    pub validity_rejections: usize,
    /// Distinct identities whose content was read
    pub files_hashed: usize,
}

impl MatchStats {
    /// Record the outcome of one comparison.
    pub fn record(&mut self, verdict: Verdict) {
        self.comparisons += 1;
        match verdict {
            Verdict::Equal { via_equivalence } => {
                self.matches += 1;
                if via_equivalence {
                    self.equivalent_hits += 1;
                }
            }
            Verdict::Rejected(Stage::Size) => self.size_rejections += 1,
            Verdict::Rejected(Stage::Hash) => self.hash_rejections += 1,
            Verdict::Rejected(_) => self.validity_rejections += 1,
        }
    }

    fn count_hashed<'a>(&mut self, files: impl IntoIterator<Item = &'a FileIdentity>) {
        self.files_hashed += files.into_iter().filter(|f| f.hash_reads() > 0).count();
    }
}

/// Result of matching two directories.
#[derive(Debug, Clone, Default)]
pub struct MatchReport {
    /// Confirmed duplicate pairs, in source enumeration order
    pub pairs: Vec<DuplicatePair>,
    /// Set when matching could not be performed
    pub failure: Option<MatchFailure>,
    /// Whether both arguments named the same directory
    pub same_directory: bool,
    /// Comparison counters
    pub stats: MatchStats,
}

impl MatchReport {
    fn failed(failure: MatchFailure) -> Self {
        log::warn!("{}", failure);
        Self {
            failure: Some(failure),
            ..Default::default()
        }
    }

    /// Whether matching was performed (even if no pairs were found).
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failure.is_none()
    }
}

/// One directory's size index, kept for re-deriving matches.
#[derive(Debug, Clone)]
pub struct DirectoryIndex {
    /// Directory the index was built from
    pub path: PathBuf,
    /// Its files grouped by size
    pub index: SizeIndex,
}

/// Result of matching three or more directories.
#[derive(Debug, Clone, Default)]
pub struct MultiMatchReport {
    /// Directory whose listing seeded the surviving set
    pub base: PathBuf,
    /// Base files with a duplicate in every other directory
    pub survivors: Vec<FileIdentity>,
    /// Indices of the other directories that were matched against
    pub indices: Vec<DirectoryIndex>,
    /// Set when matching could not be performed
    pub failure: Option<MatchFailure>,
    /// Comparison counters
    pub stats: MatchStats,
}

impl MultiMatchReport {
    fn failed(failure: MatchFailure) -> Self {
        log::warn!("{}", failure);
        Self {
            failure: Some(failure),
            ..Default::default()
        }
    }

    /// Whether matching was performed (even if nothing survived).
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failure.is_none()
    }

    /// Re-derive every `(survivor, duplicate)` pair across all other directories.
    ///
    /// Pairs are ordered by survivor, then directory, then group order.
    #[must_use]
    pub fn pairs(&self) -> Vec<DuplicatePair> {
        let mut pairs = Vec::new();
        for survivor in &self.survivors {
            for dir in &self.indices {
                for candidate in dir.index.lookup(survivor.size()) {
                    if evaluate(survivor, candidate).is_equal() {
                        pairs.push(DuplicatePair::new(survivor.path(), candidate.path()));
                    }
                }
            }
        }
        pairs
    }
}

/// Emit a pair for every identity in `content` and every equal file of the
/// same size in `grouped`.
#[must_use]
pub fn find_duplicate_pairs(content: &[FileIdentity], grouped: &SizeIndex) -> Vec<DuplicatePair> {
    collect_pairs(content, grouped, &mut MatchStats::default())
}

/// Keep the identities of `content` that have at least one equal file in
/// `grouped`. Each identity appears at most once, in input order.
#[must_use]
pub fn get_duplicates(content: &[FileIdentity], grouped: &SizeIndex) -> Vec<FileIdentity> {
    collect_duplicates(content, grouped, &mut MatchStats::default())
}

/// Index of the shortest listing; the first one wins ties.
#[must_use]
pub fn select_smallest(listings: &[Vec<FileIdentity>]) -> Option<usize> {
    let mut best: Option<(usize, usize)> = None;
    for (i, listing) in listings.iter().enumerate() {
        if best.is_none_or(|(_, len)| listing.len() < len) {
            best = Some((i, listing.len()));
        }
    }
    best.map(|(i, _)| i)
}

fn collect_pairs(
    content: &[FileIdentity],
    grouped: &SizeIndex,
    stats: &mut MatchStats,
) -> Vec<DuplicatePair> {
    let mut pairs = Vec::new();
    for file in content {
        for candidate in grouped.lookup(file.size()) {
            let verdict = evaluate(file, candidate);
            stats.record(verdict);
            if verdict.is_equal() {
                pairs.push(DuplicatePair::new(file.path(), candidate.path()));
            } else {
                log::trace!(
                    "{} != {} ({:?})",
                    file.path().display(),
                    candidate.path().display(),
                    verdict
                );
            }
        }
    }
    pairs
}

fn collect_duplicates(
    content: &[FileIdentity],
    grouped: &SizeIndex,
    stats: &mut MatchStats,
) -> Vec<FileIdentity> {
    content
        .iter()
        .filter(|file| has_duplicate(file, grouped, stats))
        .cloned()
        .collect()
}

/// Whether `file` equals some member of its size group. Stops at the first match.
fn has_duplicate(file: &FileIdentity, grouped: &SizeIndex, stats: &mut MatchStats) -> bool {
    grouped.lookup(file.size()).iter().any(|candidate| {
        let verdict = evaluate(file, candidate);
        stats.record(verdict);
        verdict.is_equal()
    })
}

/// Pair two listings of the same directory entry by entry.
///
/// Listings of different lengths mean the directory changed between them.
fn pair_positionally(
    left: &[FileIdentity],
    right: &[FileIdentity],
) -> Result<Vec<DuplicatePair>, MatchFailure> {
    if left.len() != right.len() {
        return Err(MatchFailure::SnapshotMismatch {
            left: left.len(),
            right: right.len(),
        });
    }
    Ok(left
        .iter()
        .zip(right)
        .map(|(a, b)| DuplicatePair::new(a.path(), b.path()))
        .collect())
}

/// Configuration for the duplicate matcher.
#[derive(Debug, Clone, Default)]
pub struct MatcherConfig {
    /// How directories are listed.
    pub walker_config: WalkerConfig,
    /// Whether empty files can be duplicates.
    pub empty_files: EmptyFilePolicy,
}

impl MatcherConfig {
    /// Set the walker configuration.
    #[must_use]
    pub fn with_walker_config(mut self, config: WalkerConfig) -> Self {
        self.walker_config = config;
        self
    }

    /// Set the empty file policy.
    #[must_use]
    pub fn with_empty_files(mut self, policy: EmptyFilePolicy) -> Self {
        self.empty_files = policy;
        self
    }
}

/// Finds files with identical content across directories.
#[derive(Debug, Clone, Default)]
pub struct DuplicateMatcher {
    config: MatcherConfig,
}

impl DuplicateMatcher {
    /// Create a matcher with the given configuration.
    #[must_use]
    pub fn new(config: MatcherConfig) -> Self {
        Self { config }
    }

    /// Create a matcher with default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(MatcherConfig::default())
    }

    /// The matcher's configuration.
    #[must_use]
    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    /// List a directory as valid identities.
    #[must_use]
    pub fn directory_content(&self, dir: &Path) -> Vec<FileIdentity> {
        Walker::new(dir, self.config.walker_config.clone()).directory_content()
    }

    /// Group identities by size under the configured empty file policy.
    #[must_use]
    pub fn group_by_size(&self, content: Vec<FileIdentity>) -> SizeIndex {
        SizeIndex::build(content, self.config.empty_files)
    }

    /// Match the files of `source` against the files of `target`.
    ///
    /// Pairs follow `source` enumeration order, then size-group order in
    /// `target`. If both paths name the same directory the two listings are
    /// paired positionally, and differing lengths fail the match.
    #[must_use]
    pub fn match_pair(&self, source: &Path, target: &Path) -> MatchReport {
        for dir in [source, target] {
            if !dir.is_dir() {
                return MatchReport::failed(MatchFailure::NotADirectory(dir.to_path_buf()));
            }
        }

        let left = self.directory_content(source);
        let right = self.directory_content(target);

        if is_same_file(source, target) {
            log::info!("{} and {} are the same directory", source.display(), target.display());
            let pairs = match pair_positionally(&left, &right) {
                Ok(pairs) => pairs,
                Err(failure) => return MatchReport::failed(failure),
            };
            return MatchReport {
                pairs,
                failure: None,
                same_directory: true,
                stats: MatchStats::default(),
            };
        }

        let index = self.group_by_size(right);
        let mut stats = MatchStats::default();
        let pairs = collect_pairs(&left, &index, &mut stats);
        stats.count_hashed(left.iter().chain(index.files()));

        log::info!(
            "Matched {} against {}: {} pair(s) from {} comparison(s), {} file(s) hashed",
            source.display(),
            target.display(),
            pairs.len(),
            stats.comparisons,
            stats.files_hashed
        );

        MatchReport {
            pairs,
            failure: None,
            same_directory: false,
            stats,
        }
    }

    /// Find the files present in every one of `dirs`.
    ///
    /// The smallest directory becomes the base; its listing is narrowed
    /// against each other directory in turn, stopping once nothing survives.
    #[must_use]
    pub fn match_many(&self, dirs: &[PathBuf]) -> MultiMatchReport {
        if dirs.len() < 2 {
            return MultiMatchReport::failed(MatchFailure::TooFewDirectories(dirs.len()));
        }
        if let Some(dir) = dirs.iter().find(|d| !d.is_dir()) {
            return MultiMatchReport::failed(MatchFailure::NotADirectory(dir.clone()));
        }

        let mut listings: Vec<Vec<FileIdentity>> =
            dirs.iter().map(|d| self.directory_content(d)).collect();
        let Some(base) = select_smallest(&listings) else {
            return MultiMatchReport::failed(MatchFailure::TooFewDirectories(0));
        };
        let mut survivors = std::mem::take(&mut listings[base]);
        log::debug!(
            "Base directory {} with {} file(s)",
            dirs[base].display(),
            survivors.len()
        );

        let mut stats = MatchStats::default();
        let mut indices = Vec::with_capacity(dirs.len() - 1);
        // Base files rejected along the way, still counted in `files_hashed`.
        let mut dropped = Vec::new();

        for (i, listing) in listings.into_iter().enumerate() {
            if i == base {
                continue;
            }
            if survivors.is_empty() {
                log::debug!("No candidates left, skipping {}", dirs[i].display());
                break;
            }
            let index = self.group_by_size(listing);
            let (kept, rejected): (Vec<_>, Vec<_>) = survivors
                .into_iter()
                .partition(|file| has_duplicate(file, &index, &mut stats));
            survivors = kept;
            dropped.extend(rejected);
            log::debug!(
                "{} candidate(s) survive after {}",
                survivors.len(),
                dirs[i].display()
            );
            indices.push(DirectoryIndex {
                path: dirs[i].clone(),
                index,
            });
        }

        stats.count_hashed(
            survivors
                .iter()
                .chain(&dropped)
                .chain(indices.iter().flat_map(|d| d.index.files())),
        );

        log::info!(
            "{} file(s) of {} have duplicates in all {} directories",
            survivors.len(),
            dirs[base].display(),
            dirs.len()
        );

        MultiMatchReport {
            base: dirs[base].clone(),
            survivors,
            indices,
            failure: None,
            stats,
        }
    }
}
