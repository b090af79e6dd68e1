//! Content hashing utilities
//!
//! Two digests are used across the workspace:
//!
//! - the *blob hash*, a SHA-1 over `"blob <len>\0" + content`. This is the
//!   object id a git host reports for a file, so local and remote hashes can be
//!   compared directly.
//! - a plain SHA-256 of the file contents, published next to build artifacts.

use sha1::Sha1;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Compute the blob hash of in-memory content.
///
/// Returns the lowercase hex digest of `"blob " + len + "\0" + content`.
pub fn compute_blob_hash(content: &[u8]) -> String {
    let mut hasher = Sha1::new();
    hasher.update(format!("blob {}\0", content.len()).as_bytes());
    hasher.update(content);
    format!("{:x}", hasher.finalize())
}

/// Compute the blob hash of a file's contents.
///
/// The file is read in full on every call; hashes are never cached.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn compute_file_blob_hash(path: &Path) -> std::io::Result<String> {
    let content = std::fs::read(path)?;
    Ok(compute_blob_hash(&content))
}

/// Compute the SHA-256 checksum of a file's contents as lowercase hex.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn compute_file_checksum(path: &Path) -> std::io::Result<String> {
    let content = std::fs::read(path)?;
    let mut hasher = Sha256::new();
    hasher.update(&content);
    Ok(format!("{:x}", hasher.finalize()))
}
