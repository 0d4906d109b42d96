use std::sync::Arc;

/// Snapshot of a download in flight.
///
/// Emitted after every chunk and once more on completion. For a single
/// download the `fraction` values are monotonically non-decreasing and end
/// at `1.0` on success.
#[derive(Debug, Clone, PartialEq)]
pub struct DownloadProgress {
    /// Bytes accumulated so far.
    pub bytes_downloaded: u64,

    /// Total expected bytes, if the handle carried a size.
    pub total_bytes: Option<u64>,

    /// Fraction complete in `[0, 1]`.
    ///
    /// Stays at `0.0` while the total is unknown; the completion event
    /// still reports `1.0`.
    pub fraction: f64,
}

impl DownloadProgress {
    #[must_use]
    pub fn percentage(&self) -> f64 {
        self.fraction * 100.0
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.fraction >= 1.0
    }
}

/// Callback invoked with each [`DownloadProgress`] event.
pub type ProgressFn = Arc<dyn Fn(&DownloadProgress) + Send + Sync>;
