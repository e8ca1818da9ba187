//! Lazily hashed file identity.
//!
//! # Overview
//!
//! A [`FileIdentity`] wraps one filesystem path together with the file size
//! recorded when the identity was created and a content hash that is computed
//! on first demand. Hashing state is an explicit state machine:
//!
//! ```text
//! Unhashed ──hash ok, bytes == size──▶ Hashed(digest)   (terminal)
//!     │
//!     └──open/read failed, or bytes != size──▶ Invalid  (terminal)
//! ```
//!
//! An identity that was not a regular file at construction starts out
//! `Invalid`. Validity never comes back once lost, and a digest is only ever
//! stored after a complete read whose byte count matched the recorded size.
//!
//! # Example
//!
//! ```no_run
//! use dupmatch::scanner::FileIdentity;
//!
//! let file = FileIdentity::new("photo.jpg");
//! if file.is_ok() {
//!     println!("{} bytes, hash {:?}", file.size(), file.hash_hex());
//! }
//! ```

use std::cell::Cell;
use std::path::{Path, PathBuf};

use super::equivalence::FileKey;
use super::hasher::{hash_to_hex, Hash, Hasher};

/// Hashing state of a [`FileIdentity`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum HashState {
    /// Regular file, content not read yet.
    Unhashed,
    /// Content read completely; digest cached.
    Hashed(Hash),
    /// Not a regular file, unreadable, or changed while being hashed.
    #[default]
    Invalid,
}

/// One file's path, size and lazily computed content hash.
///
/// Identities are plain values: cloning copies the cached state and the clone
/// evolves independently. `FileIdentity::default()` is the empty, invalid
/// identity, which is also what [`std::mem::take`] leaves behind.
#[derive(Debug, Clone, Default)]
pub struct FileIdentity {
    path: PathBuf,
    size: u64,
    key: Option<FileKey>,
    state: Cell<HashState>,
    hash_reads: Cell<u32>,
}

impl FileIdentity {
    /// Create an identity for a path.
    ///
    /// Never fails: if the path does not name an existing regular file
    /// (after following symlinks) the identity is invalid with size 0.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let (size, state) = match std::fs::metadata(&path) {
            Ok(meta) if meta.is_file() => (meta.len(), HashState::Unhashed),
            Ok(_) => {
                log::trace!("Not a regular file: {}", path.display());
                (0, HashState::Invalid)
            }
            Err(e) => {
                log::trace!("Cannot stat {}: {}", path.display(), e);
                (0, HashState::Invalid)
            }
        };
        let key = match state {
            HashState::Invalid => None,
            _ => FileKey::from_path(&path),
        };

        Self {
            path,
            size,
            key,
            state: Cell::new(state),
            hash_reads: Cell::new(0),
        }
    }

    /// Path this identity was created from.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File size in bytes recorded at construction; 0 when invalid.
    #[must_use]
    pub fn size(&self) -> u64 {
        if self.is_ok() {
            self.size
        } else {
            0
        }
    }

    /// Current validity.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.state.get() != HashState::Invalid
    }

    /// Whether a digest has already been computed and cached.
    #[must_use]
    pub fn is_hashed(&self) -> bool {
        matches!(self.state.get(), HashState::Hashed(_))
    }

    /// Filesystem key captured at construction, if the file resolved.
    #[must_use]
    pub fn file_key(&self) -> Option<&FileKey> {
        self.key.as_ref()
    }

    /// Number of times this identity has read file content.
    ///
    /// Stays at 0 or 1 for the lifetime of an instance.
    #[must_use]
    pub fn hash_reads(&self) -> u32 {
        self.hash_reads.get()
    }

    /// Content hash, computed on first call and cached.
    ///
    /// Returns `None` for invalid identities. If the file cannot be read, or
    /// the number of bytes read differs from the recorded size, the identity
    /// becomes invalid and `None` is returned.
    pub fn hash(&self) -> Option<Hash> {
        match self.state.get() {
            HashState::Hashed(hash) => return Some(hash),
            HashState::Invalid => return None,
            HashState::Unhashed => {}
        }

        self.hash_reads.set(self.hash_reads.get() + 1);
        let next = match Hasher::new().full_hash_counted(&self.path) {
            Ok((hash, bytes_read)) if bytes_read == self.size => HashState::Hashed(hash),
            Ok((_, bytes_read)) => {
                log::debug!(
                    "{} changed while hashing: expected {} bytes, read {}",
                    self.path.display(),
                    self.size,
                    bytes_read
                );
                HashState::Invalid
            }
            Err(e) => {
                log::debug!("Failed to hash {}: {}", self.path.display(), e);
                HashState::Invalid
            }
        };
        self.state.set(next);

        match next {
            HashState::Hashed(hash) => Some(hash),
            _ => None,
        }
    }

    /// Content hash as a hexadecimal string.
    pub fn hash_hex(&self) -> Option<String> {
        self.hash().map(|h| hash_to_hex(&h))
    }
}
