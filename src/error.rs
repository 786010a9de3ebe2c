//! Error types for Vellum
//!
//! Uses `thiserror` for library errors. Commands at the binary layer wrap
//! these in `anyhow::Result`.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Vellum operations
pub type VellumResult<T> = Result<T, VellumError>;

/// Main error type for Vellum operations
#[derive(Error, Debug)]
pub enum VellumError {
    /// No frontmatter found (missing `---` delimiters)
    #[error("no frontmatter found in {file} - file must start with '---'")]
    NoFrontmatter { file: PathBuf },

    /// Frontmatter not properly closed
    #[error("unclosed frontmatter in {file} - missing closing '---'")]
    UnclosedFrontmatter { file: PathBuf },

    /// Invalid frontmatter YAML
    #[error("invalid frontmatter in {file}: {message}")]
    InvalidFrontmatter { file: PathBuf, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Content directory not found
    #[error("content directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Configuration file could not be parsed
    #[error("invalid config {file}: {message}")]
    Config { file: PathBuf, message: String },

    /// Filesystem watcher error
    #[error("watch error: {0}")]
    Watch(String),

    /// An emitter failed while producing output
    #[error("emitter '{emitter}' failed: {message}")]
    Emit { emitter: String, message: String },
}
