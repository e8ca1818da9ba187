//! BLAKE3 file hasher with streaming support.
//!
//! # Overview
//!
//! This module provides the [`Hasher`] struct for computing BLAKE3 hashes
//! of file contents. Files are read in fixed-size chunks so memory use is
//! constant regardless of file size. Alongside the digest, the hasher reports
//! how many bytes it actually consumed; callers compare that count against the
//! size recorded at scan time to detect files that changed mid-read.
//!
//! # Example
//!
//! ```no_run
//! use dupmatch::scanner::{hash_to_hex, Hasher};
//! use std::path::Path;
//!
//! let hasher = Hasher::new();
//! let (hash, bytes_read) = hasher.full_hash_counted(Path::new("file.txt")).unwrap();
//! println!("{} ({} bytes)", hash_to_hex(&hash), bytes_read);
//! ```

use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

use super::HashError;

/// A BLAKE3 content digest.
pub type Hash = [u8; 32];

/// Size of the read buffer used when streaming file content.
pub const CHUNK_SIZE: usize = 64 * 1024;

/// Streaming BLAKE3 file hasher.
#[derive(Debug, Clone, Copy, Default)]
pub struct Hasher;

impl Hasher {
    /// Create a hasher that reads in [`CHUNK_SIZE`] chunks.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Hash the entire content of a file.
    ///
    /// # Errors
    ///
    /// Returns [`HashError`] if the file cannot be opened or read.
    pub fn full_hash(&self, path: &Path) -> Result<Hash, HashError> {
        self.full_hash_counted(path).map(|(hash, _)| hash)
    }

    /// Hash the entire content of a file and report the number of bytes read.
    ///
    /// # Errors
    ///
    /// Returns [`HashError`] if the file cannot be opened or a read fails.
    pub fn full_hash_counted(&self, path: &Path) -> Result<(Hash, u64), HashError> {
        let mut file = File::open(path).map_err(|e| map_io_error(path, e))?;
        let mut hasher = blake3::Hasher::new();
        let mut buffer = vec![0u8; CHUNK_SIZE];
        let mut total: u64 = 0;

        loop {
            let n = match file.read(&mut buffer) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(map_io_error(path, e)),
            };
            hasher.update(&buffer[..n]);
            total += n as u64;
        }

        log::trace!("Hashed {} ({} bytes)", path.display(), total);
        Ok((*hasher.finalize().as_bytes(), total))
    }
}

fn map_io_error(path: &Path, error: std::io::Error) -> HashError {
    match error.kind() {
        ErrorKind::NotFound => HashError::NotFound(path.to_path_buf()),
        ErrorKind::PermissionDenied => HashError::PermissionDenied(path.to_path_buf()),
        _ => HashError::Io {
            path: path.to_path_buf(),
            source: error,
        },
    }
}

/// Convert a hash to a lowercase hexadecimal string.
#[must_use]
pub fn hash_to_hex(hash: &Hash) -> String {
    hash.iter().map(|b| format!("{b:02x}")).collect()
}
