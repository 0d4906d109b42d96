//! Immutable configuration and value types.

pub mod progress;

use std::time::Duration;

use chrono::{DateTime, Utc};

/// A resolved reference to a remote file, sufficient to open a download
/// stream for it.
///
/// Produced once by [`Resolver::resolve`](crate::Resolver::resolve) and
/// consumed by [`Fetcher::fetch`](crate::Fetcher::fetch); never mutated or
/// cached across runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHandle {
    /// Opaque identifier, unique within the index.
    pub id: String,

    /// Display name as stored remotely.
    pub name: String,

    /// Size in bytes, if the index reports one.
    pub size: Option<u64>,

    /// Creation timestamp, if the index reports one.
    pub created: Option<DateTime<Utc>>,
}

/// An exact-name lookup scoped to a single folder.
///
/// Trashed items are excluded by the index implementation.
#[derive(Debug, Clone)]
pub struct SearchQuery {
    pub name: String,
    pub folder_id: String,
}

impl SearchQuery {
    pub fn new(name: impl Into<String>, folder_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            folder_id: folder_id.into(),
        }
    }
}

/// Bounded attempts with a fixed inter-attempt delay.
///
/// No jitter and no exponential growth: every attempt except the last is
/// followed by the same delay, so the total wait is bounded by
/// `(max_attempts - 1) * delay` plus per-call latencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    delay: Duration,
}

impl RetryPolicy {
    /// `max_attempts` is clamped to at least one; a zero-attempt policy
    /// could never return a handle.
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, Duration::from_secs(5))
    }
}
