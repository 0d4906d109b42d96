//! Chunked retrieval of a resolved file.

use std::io::{self, Write as _};
use std::path::Path;

use futures_util::StreamExt;
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::data::FileHandle;
use crate::data::progress::{DownloadProgress, ProgressFn};
use crate::error::DownloadError;
use crate::index::FileIndex;

/// Streams a resolved file to a local path.
///
/// Chunks are accumulated in memory and written out in a single pass once
/// the stream completes; a failed stream therefore never touches the
/// destination. The final write goes through a temporary file in the
/// destination directory followed by a rename.
pub struct Fetcher<'a, I> {
    index: &'a I,
}

impl<'a, I: FileIndex> Fetcher<'a, I> {
    pub fn new(index: &'a I) -> Self {
        Self { index }
    }

    /// Download the handle's content to `destination`.
    ///
    /// `on_progress` is invoked after each chunk and once on completion;
    /// its fractions are non-decreasing and end at `1.0` on success.
    pub async fn fetch(
        &self,
        handle: &FileHandle,
        destination: &Path,
        on_progress: Option<&ProgressFn>,
    ) -> Result<(), DownloadError> {
        info!(name = %handle.name, id = %handle.id, size = ?handle.size, "downloading");

        let mut stream = self
            .index
            .open_stream(handle)
            .await
            .map_err(|e| DownloadError::Open(Box::new(e)))?;

        let mut buf: Vec<u8> = Vec::with_capacity(handle.size.unwrap_or(0) as usize);
        let mut fraction = 0.0_f64;

        while let Some(next) = stream.next().await {
            let chunk = next.map_err(|e| DownloadError::Stream(Box::new(e)))?;
            buf.extend_from_slice(&chunk);
            fraction = emit(handle, buf.len() as u64, fraction, on_progress);
        }

        if fraction < 1.0 {
            // completion event; also the only event when the size is unknown
            if let Some(cb) = on_progress {
                cb(&DownloadProgress {
                    bytes_downloaded: buf.len() as u64,
                    total_bytes: handle.size,
                    fraction: 1.0,
                });
            }
        }

        write_file(destination, &buf)?;
        info!(path = %destination.display(), bytes = buf.len(), "download complete");
        Ok(())
    }
}

fn emit(
    handle: &FileHandle,
    bytes_downloaded: u64,
    last_fraction: f64,
    on_progress: Option<&ProgressFn>,
) -> f64 {
    let fraction = match handle.size {
        Some(total) if total > 0 => (bytes_downloaded as f64 / total as f64)
            .min(1.0)
            .max(last_fraction),
        // unknown total: hold position until the completion event
        _ => last_fraction,
    };
    debug!(bytes_downloaded, fraction, "chunk received");
    if let Some(cb) = on_progress {
        cb(&DownloadProgress {
            bytes_downloaded,
            total_bytes: handle.size,
            fraction,
        });
    }
    fraction
}

fn write_file(path: &Path, content: &[u8]) -> Result<(), DownloadError> {
    fn write_err(path: &Path, source: io::Error) -> DownloadError {
        DownloadError::Write {
            path: path.to_path_buf(),
            source,
        }
    }

    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| write_err(path, e))?;
    tmp.write_all(content).map_err(|e| write_err(path, e))?;
    tmp.persist(path).map_err(|e| write_err(path, e.error))?;
    Ok(())
}
