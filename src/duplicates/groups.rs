//! Size-based grouping of file identities.
//!
//! # Overview
//!
//! Files with different sizes cannot be duplicates, so every directory that
//! is matched against is first turned into a [`SizeIndex`]: a map from file
//! size to the identities of that size, in enumeration order. Looking up a
//! candidate's size then yields the only files worth comparing it with.
//!
//! Building the index performs no file I/O beyond what the identities already
//! did; hashing stays deferred until matching.
//!
//! # Example
//!
//! ```no_run
//! use dupmatch::duplicates::{EmptyFilePolicy, SizeIndex};
//! use dupmatch::scanner::{Walker, WalkerConfig};
//! use std::path::Path;
//!
//! let content = Walker::new(Path::new("/photos"), WalkerConfig::default()).directory_content();
//! let index = SizeIndex::build(content, EmptyFilePolicy::Exclude);
//!
//! println!("{} files in {} size groups", index.len(), index.unique_sizes());
//! for candidate in index.lookup(1024) {
//!     println!("{}", candidate.path().display());
//! }
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::scanner::FileIdentity;

/// How zero-byte files are treated when building a [`SizeIndex`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmptyFilePolicy {
    /// Leave empty files out of the index; they never match anything.
    #[default]
    Exclude,
    /// Index empty files under size 0; any two of them are duplicates.
    Include,
}

impl EmptyFilePolicy {
    /// Pick the policy from an "include empty files" flag.
    #[must_use]
    pub fn from_include(include_empty: bool) -> Self {
        if include_empty {
            Self::Include
        } else {
            Self::Exclude
        }
    }
}

/// Statistics from building a size index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GroupingStats {
    /// Total number of identities offered to the index
    pub total_files: usize,
    /// Number of identities stored in the index
    pub indexed_files: usize,
    /// Number of distinct sizes in the index
    pub unique_sizes: usize,
    /// Number of empty files left out by [`EmptyFilePolicy::Exclude`]
    pub empty_files: usize,
    /// Number of invalid identities left out
    pub invalid_files: usize,
}

/// Map from file size to the identities of that size.
///
/// Immutable once built. Group order is the order identities were supplied.
#[derive(Debug, Clone, Default)]
pub struct SizeIndex {
    groups: HashMap<u64, Vec<FileIdentity>>,
    stats: GroupingStats,
}

impl SizeIndex {
    /// Group identities by size.
    ///
    /// Invalid identities are skipped. Empty files are skipped unless the
    /// policy is [`EmptyFilePolicy::Include`].
    #[must_use]
    pub fn build(content: impl IntoIterator<Item = FileIdentity>, policy: EmptyFilePolicy) -> Self {
        let mut groups: HashMap<u64, Vec<FileIdentity>> = HashMap::new();
        let mut stats = GroupingStats::default();

        for file in content {
            stats.total_files += 1;

            if !file.is_ok() {
                stats.invalid_files += 1;
                log::trace!("Not indexing invalid file: {}", file.path().display());
                continue;
            }

            if file.size() == 0 && policy == EmptyFilePolicy::Exclude {
                stats.empty_files += 1;
                log::trace!("Not indexing empty file: {}", file.path().display());
                continue;
            }

            stats.indexed_files += 1;
            groups.entry(file.size()).or_default().push(file);
        }

        stats.unique_sizes = groups.len();

        if stats.empty_files > 0 {
            log::debug!("Skipped {} empty file(s)", stats.empty_files);
        }
        log::debug!(
            "Size index: {} of {} file(s) in {} size group(s)",
            stats.indexed_files,
            stats.total_files,
            stats.unique_sizes
        );

        Self { groups, stats }
    }

    /// Identities with exactly this size; empty when there are none.
    #[must_use]
    pub fn lookup(&self, size: u64) -> &[FileIdentity] {
        self.groups.get(&size).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of indexed identities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stats.indexed_files
    }

    /// Check whether the index holds no identities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Number of distinct sizes.
    #[must_use]
    pub fn unique_sizes(&self) -> usize {
        self.groups.len()
    }

    /// Statistics recorded while building.
    #[must_use]
    pub fn stats(&self) -> &GroupingStats {
        &self.stats
    }

    /// Iterate over all indexed identities, group by group.
    pub fn files(&self) -> impl Iterator<Item = &FileIdentity> {
        self.groups.values().flatten()
    }
}
