//! Directory walker that lists the regular files of one directory.
//!
//! # Overview
//!
//! This module provides the [`Walker`] struct for enumerating candidate files
//! and turning them into [`FileIdentity`] values for matching. It uses
//! [`walkdir`] for single-threaded traversal with entries sorted by file name,
//! so two listings of the same unchanged tree come out in the same order.
//!
//! # Features
//!
//! - Shallow (default) or recursive traversal
//! - Symlinks to regular files are listed; symlinked directories are only
//!   descended into when `follow_symlinks` is set
//! - Gitignore-style pattern matching via the `ignore` crate
//! - Hidden file filtering
//!
//! # Example
//!
//! ```no_run
//! use dupmatch::scanner::{Walker, WalkerConfig};
//! use std::path::Path;
//!
//! let config = WalkerConfig {
//!     recursive: true,
//!     skip_hidden: true,
//!     ..Default::default()
//! };
//!
//! let walker = Walker::new(Path::new("/home/user/Downloads"), config);
//! for entry in walker.walk() {
//!     match entry {
//!         Ok(path) => println!("{}", path.display()),
//!         Err(e) => eprintln!("Warning: {}", e),
//!     }
//! }
//! ```

use std::path::{Path, PathBuf};

use ignore::gitignore::{Gitignore, GitignoreBuilder};
use walkdir::{DirEntry, WalkDir};

use super::{FileIdentity, ScanError, WalkerConfig};

/// Directory walker for file discovery.
#[derive(Debug)]
pub struct Walker {
    /// Root path to walk
    root: PathBuf,
    /// Walker configuration
    config: WalkerConfig,
}

impl Walker {
    /// Create a new walker for the given path.
    #[must_use]
    pub fn new(path: &Path, config: WalkerConfig) -> Self {
        Self {
            root: path.to_path_buf(),
            config,
        }
    }

    /// Root directory of this walker.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Build gitignore matcher from config patterns and .gitignore file.
    fn build_gitignore(&self) -> Option<Gitignore> {
        let mut builder = GitignoreBuilder::new(&self.root);

        let gitignore_path = self.root.join(".gitignore");
        if self.config.use_gitignore && gitignore_path.exists() {
            if let Some(e) = builder.add(&gitignore_path) {
                log::warn!(
                    "Failed to load .gitignore from {}: {}",
                    gitignore_path.display(),
                    e
                );
            } else {
                log::debug!("Loaded .gitignore from {}", gitignore_path.display());
            }
        }

        for pattern in &self.config.ignore_patterns {
            if let Err(e) = builder.add_line(None, pattern) {
                log::warn!("Invalid ignore pattern '{}': {}", pattern, e);
            }
        }

        match builder.build() {
            Ok(gitignore) if gitignore.is_empty() => None,
            Ok(gitignore) => Some(gitignore),
            Err(e) => {
                log::warn!("Failed to build ignore patterns: {}", e);
                None
            }
        }
    }

    /// Check if a path should be ignored based on configured patterns.
    fn should_ignore(&self, path: &Path, is_dir: bool, gitignore: Option<&Gitignore>) -> bool {
        let Some(gi) = gitignore else {
            return false;
        };
        let relative_path = path.strip_prefix(&self.root).unwrap_or(path);
        let path_str = relative_path.to_string_lossy();
        let normalized_path = if cfg!(windows) {
            path_str.replace('\\', "/")
        } else {
            path_str.into_owned()
        };
        gi.matched(normalized_path, is_dir).is_ignore()
    }

    /// Whether a walk entry passes the hidden and ignore filters.
    fn keep_entry(&self, entry: &DirEntry, gitignore: Option<&Gitignore>) -> bool {
        if entry.depth() == 0 {
            return true;
        }
        if self.config.skip_hidden && is_hidden(entry) {
            log::trace!("Skipping hidden entry: {}", entry.path().display());
            return false;
        }
        if self.should_ignore(entry.path(), entry.file_type().is_dir(), gitignore) {
            log::trace!("Ignoring entry: {}", entry.path().display());
            return false;
        }
        true
    }

    /// Walk the directory, yielding paths of regular files.
    ///
    /// Entries are sorted by file name within each directory. Errors are
    /// yielded as [`ScanError`] values rather than stopping iteration.
    pub fn walk(&self) -> impl Iterator<Item = Result<PathBuf, ScanError>> + '_ {
        let gitignore = self.build_gitignore();
        let max_depth = if self.config.recursive { usize::MAX } else { 1 };

        WalkDir::new(&self.root)
            .min_depth(1)
            .max_depth(max_depth)
            .follow_links(self.config.follow_symlinks)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(move |entry| self.keep_entry(entry, gitignore.as_ref()))
            .filter_map(move |entry_result| match entry_result {
                Ok(entry) => {
                    let file_type = entry.file_type();
                    if file_type.is_dir() {
                        return None;
                    }
                    let path = entry.into_path();
                    if file_type.is_file() || (file_type.is_symlink() && path.is_file()) {
                        Some(Ok(path))
                    } else {
                        log::trace!("Skipping non-regular entry: {}", path.display());
                        None
                    }
                }
                Err(e) => Some(Err(self.convert_error(e))),
            })
    }

    /// List the directory as valid file identities, in walk order.
    ///
    /// Enumeration errors are logged and skipped; paths that no longer name a
    /// regular file by the time their identity is built are dropped.
    #[must_use]
    pub fn directory_content(&self) -> Vec<FileIdentity> {
        let mut content = Vec::new();
        let mut skipped = 0usize;

        for result in self.walk() {
            match result {
                Ok(path) => {
                    let identity = FileIdentity::new(path);
                    if identity.is_ok() {
                        content.push(identity);
                    } else {
                        skipped += 1;
                    }
                }
                Err(e) => {
                    log::warn!("{}", e);
                    skipped += 1;
                }
            }
        }

        log::debug!(
            "Listed {} file(s) in {} ({} skipped)",
            content.len(),
            self.root.display(),
            skipped
        );
        content
    }

    /// Convert a walkdir error into a [`ScanError`].
    fn convert_error(&self, error: walkdir::Error) -> ScanError {
        use std::io::ErrorKind;

        let path = error
            .path()
            .map_or_else(|| self.root.clone(), Path::to_path_buf);

        if error.loop_ancestor().is_some() {
            return ScanError::SymlinkLoop(path);
        }

        match error.io_error().map(std::io::Error::kind) {
            Some(ErrorKind::PermissionDenied) => ScanError::PermissionDenied(path),
            Some(ErrorKind::NotFound) => ScanError::NotFound(path),
            _ => ScanError::Io {
                source: error
                    .into_io_error()
                    .unwrap_or_else(|| std::io::Error::other("directory walk failed")),
                path,
            },
        }
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(|name| name.starts_with('.'))
}
