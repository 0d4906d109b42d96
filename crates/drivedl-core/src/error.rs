//! Error types for drivedl-core.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Error type of the index implementation, erased so callers of the core
/// do not carry the adapter's type parameter in their signatures.
pub type IndexError = Box<dyn std::error::Error + Send + Sync>;

/// The file never appeared in the index within the allowed attempts.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("file {name:?} not found after {attempts} attempt(s)")]
pub struct NotFoundError {
    pub name: String,
    pub attempts: u32,
}

/// The file was located but could not be retrieved.
#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("failed to open download stream: {0}")]
    Open(#[source] IndexError),

    #[error("download stream failed: {0}")]
    Stream(#[source] IndexError),

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
