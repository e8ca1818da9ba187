//! Scanner module for directory listing, file identities and hashing.
//!
//! This module provides functionality for:
//! - Directory listing using walkdir
//! - Lazily hashed file identities
//! - Content hashing with BLAKE3
//! - Filesystem equivalence (same path, hardlink, symlink)
//!
//! # Architecture
//!
//! The scanner is divided into submodules:
//! - [`walker`]: Directory traversal and file discovery
//! - [`identity`]: [`FileIdentity`], the per-file value used by matching
//! - [`hasher`]: BLAKE3 file hashing (streaming)
//! - [`equivalence`]: Same-underlying-file detection
//!
//! # Example
//!
//! ```no_run
//! use dupmatch::scanner::{Walker, WalkerConfig};
//! use std::path::Path;
//!
//! let walker = Walker::new(Path::new("."), WalkerConfig::default());
//! for file in walker.directory_content() {
//!     println!("{}: {} bytes", file.path().display(), file.size());
//! }
//! ```

pub mod equivalence;
pub mod hasher;
pub mod identity;
pub mod walker;

use std::path::PathBuf;

// Re-export main types
pub use equivalence::{is_same_file, FileKey};
pub use hasher::{hash_to_hex, Hash, Hasher};
pub use identity::FileIdentity;
pub use walker::Walker;

/// Configuration for directory walking.
///
/// Controls depth, filtering and symlink handling.
#[derive(Debug, Clone, Default)]
pub struct WalkerConfig {
    /// Descend into subdirectories. When false only the top level is listed.
    pub recursive: bool,

    /// Follow symbolic links to directories during recursive traversal.
    /// Symlinks to regular files are always listed.
    pub follow_symlinks: bool,

    /// Skip hidden files and directories (names starting with `.`).
    pub skip_hidden: bool,

    /// Honour a `.gitignore` file at the root of the walked directory.
    pub use_gitignore: bool,

    /// Glob patterns to ignore (gitignore-style).
    pub ignore_patterns: Vec<String>,
}

/// Errors that can occur during directory scanning.
#[derive(thiserror::Error, Debug)]
pub enum ScanError {
    /// Permission was denied when accessing a file or directory.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// The specified path was not found.
    #[error("Path not found: {0}")]
    NotFound(PathBuf),

    /// A symlink points back at one of its ancestors.
    #[error("Symlink loop detected: {0}")]
    SymlinkLoop(PathBuf),

    /// An I/O error occurred while accessing a file.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// Errors that can occur during file hashing.
#[derive(thiserror::Error, Debug)]
pub enum HashError {
    /// The specified file was not found.
    #[error("File not found: {0}")]
    NotFound(PathBuf),

    /// Permission was denied when reading the file.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// An I/O error occurred while reading the file.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}
