//! Shared output-writing helpers
//!
//! All emitters write complete artifacts through `write_output`: parent
//! directories are created on demand and byte-identical artifacts are left
//! untouched, detected by content hash, so downstream watchers of the output
//! tree see only real changes.

use std::fs;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

use crate::error::VellumResult;

/// Write one complete artifact under the output directory.
///
/// Returns the absolute path written (or confirmed unchanged).
pub fn write_output(output_dir: &Path, rel_path: &str, bytes: &[u8]) -> VellumResult<PathBuf> {
    let full_path = output_dir.join(rel_path);

    if let Some(parent) = full_path.parent() {
        fs::create_dir_all(parent)?;
    }

    if let Ok(existing) = fs::read(&full_path) {
        if content_hash(&existing) == content_hash(bytes) {
            return Ok(full_path);
        }
    }

    fs::write(&full_path, bytes)?;
    Ok(full_path)
}

/// Remove a previously emitted artifact; missing files are not an error.
pub fn remove_output(output_dir: &Path, rel_path: &str) -> VellumResult<()> {
    let full_path = output_dir.join(rel_path);
    match fs::remove_file(&full_path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

fn content_hash(bytes: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hasher.finalize().into()
}
