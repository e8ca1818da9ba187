//! Filesystem equivalence: do two paths name the same underlying file?
//!
//! # Overview
//!
//! Two paths are equivalent when they resolve to the same file on disk. That
//! covers the identical path, hardlinks (multiple directory entries for one
//! inode) and symbolic links to the same target.
//!
//! # Platform Support
//!
//! - **Unix**: Uses (device_id, inode) pairs from the followed metadata
//! - **Other**: Falls back to comparing canonicalized paths, which handles
//!   symlinks and identical paths but not hardlinks
//!
//! # Example
//!
//! ```no_run
//! use dupmatch::scanner::equivalence::is_same_file;
//! use std::path::Path;
//!
//! if is_same_file(Path::new("a.txt"), Path::new("link_to_a.txt")) {
//!     println!("Same file");
//! }
//! ```

use std::path::Path;
#[cfg(not(unix))]
use std::path::PathBuf;

/// Platform-specific identity of an on-disk file.
///
/// On Unix, this is (device_id, inode).
/// Elsewhere, this is the canonical path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileKey {
    #[cfg(unix)]
    dev: u64,
    #[cfg(unix)]
    ino: u64,
    #[cfg(not(unix))]
    canonical: PathBuf,
}

impl FileKey {
    /// Resolve the key for a path, following symlinks.
    ///
    /// Returns `None` if the path cannot be resolved.
    #[cfg(unix)]
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        use std::os::unix::fs::MetadataExt;
        let metadata = std::fs::metadata(path).ok()?;
        Some(Self {
            dev: metadata.dev(),
            ino: metadata.ino(),
        })
    }

    #[cfg(not(unix))]
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        path.canonicalize()
            .ok()
            .map(|canonical| Self { canonical })
    }

    /// Check whether hardlinks are detected on this platform.
    ///
    /// Symlinks and identical paths are detected everywhere.
    #[must_use]
    pub const fn detects_hardlinks() -> bool {
        cfg!(unix)
    }
}

/// Check whether two paths resolve to the same underlying file or directory.
///
/// Returns `false` if either path cannot be resolved.
#[must_use]
pub fn is_same_file(a: &Path, b: &Path) -> bool {
    match (FileKey::from_path(a), FileKey::from_path(b)) {
        (Some(ka), Some(kb)) => ka == kb,
        _ => false,
    }
}
