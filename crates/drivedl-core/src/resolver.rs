//! Bounded-attempt search against an eventually-consistent index.

use tracing::{debug, info, warn};

use crate::data::{FileHandle, RetryPolicy, SearchQuery};
use crate::error::NotFoundError;
use crate::index::FileIndex;

/// Locates a named file in a folder, retrying until the index catches up.
///
/// A failed query gets the same treatment as an empty result: the file may
/// simply not be visible yet, so the attempt is burned and the loop waits
/// out the fixed delay. Nothing escalates mid-loop; the only failure mode
/// is running out of attempts.
pub struct Resolver<'a, I> {
    index: &'a I,
    list_on_miss: bool,
}

impl<'a, I: FileIndex> Resolver<'a, I> {
    pub fn new(index: &'a I) -> Self {
        Self {
            index,
            list_on_miss: false,
        }
    }

    /// Log the folder contents whenever a lookup comes back empty.
    ///
    /// Diagnostics only; never affects the outcome.
    #[must_use]
    pub fn list_on_miss(mut self, enabled: bool) -> Self {
        self.list_on_miss = enabled;
        self
    }

    /// Search until the file appears or attempts run out.
    ///
    /// Returns the first result the index reports, in remote order,
    /// short-circuiting any remaining attempts.
    pub async fn resolve(
        &self,
        query: &SearchQuery,
        policy: &RetryPolicy,
    ) -> Result<FileHandle, NotFoundError> {
        let max = policy.max_attempts();
        for attempt in 1..=max {
            debug!(attempt, max, name = %query.name, folder = %query.folder_id, "searching index");

            match self.index.search(&query.name, &query.folder_id).await {
                Ok(files) => {
                    if let Some(found) = files.into_iter().next() {
                        info!(name = %found.name, id = %found.id, attempt, "file located");
                        return Ok(found);
                    }
                    debug!(name = %query.name, "not indexed yet");
                    if self.list_on_miss {
                        self.dump_folder(&query.folder_id).await;
                    }
                }
                Err(e) => warn!(attempt, error = %e, "search attempt failed"),
            }

            if attempt < max {
                debug!(delay = ?policy.delay(), "waiting before retry");
                tokio::time::sleep(policy.delay()).await;
            }
        }

        Err(NotFoundError {
            name: query.name.clone(),
            attempts: max,
        })
    }

    async fn dump_folder(&self, folder_id: &str) {
        match self.index.list_folder(folder_id).await {
            Ok(files) if files.is_empty() => debug!(folder = %folder_id, "folder is empty"),
            Ok(files) => {
                debug!(folder = %folder_id, count = files.len(), "folder contents");
                for f in &files {
                    debug!(name = %f.name, id = %f.id, size = ?f.size, "folder entry");
                }
            }
            Err(e) => debug!(error = %e, "folder listing failed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::time::Duration;

    use bytes::Bytes;
    use thiserror::Error;
    use tokio::time::Instant;

    use super::*;
    use crate::index::BoxStream;

    #[derive(Debug, Error)]
    #[error("index unavailable")]
    struct IndexDown;

    enum Step {
        Empty,
        Fail,
        Found(Vec<FileHandle>),
    }

    struct ScriptedIndex {
        script: Vec<Step>,
        cursor: Mutex<usize>,
        list_calls: Mutex<u32>,
        list_fails: bool,
    }

    impl ScriptedIndex {
        fn new(script: Vec<Step>) -> Self {
            Self {
                script,
                cursor: Mutex::new(0),
                list_calls: Mutex::new(0),
                list_fails: false,
            }
        }

        fn searches(&self) -> usize {
            *self.cursor.lock().unwrap()
        }

        fn listings(&self) -> u32 {
            *self.list_calls.lock().unwrap()
        }
    }

    impl FileIndex for ScriptedIndex {
        type Error = IndexDown;

        async fn search(&self, _name: &str, _folder_id: &str) -> Result<Vec<FileHandle>, IndexDown> {
            let mut cursor = self.cursor.lock().unwrap();
            let step = &self.script[*cursor];
            *cursor += 1;
            match step {
                Step::Empty => Ok(Vec::new()),
                Step::Fail => Err(IndexDown),
                Step::Found(files) => Ok(files.clone()),
            }
        }

        async fn list_folder(&self, _folder_id: &str) -> Result<Vec<FileHandle>, IndexDown> {
            *self.list_calls.lock().unwrap() += 1;
            if self.list_fails {
                Err(IndexDown)
            } else {
                Ok(vec![handle("other", "unrelated.txt")])
            }
        }

        async fn open_stream(
            &self,
            _handle: &FileHandle,
        ) -> Result<BoxStream<'static, Result<Bytes, IndexDown>>, IndexDown> {
            Ok(Box::pin(futures_util::stream::empty()))
        }
    }

    fn handle(id: &str, name: &str) -> FileHandle {
        FileHandle {
            id: id.to_string(),
            name: name.to_string(),
            size: Some(1024),
            created: None,
        }
    }

    fn query() -> SearchQuery {
        SearchQuery::new("artifact.zip", "FLD1")
    }

    #[tokio::test(start_paused = true)]
    async fn exhausts_attempts_when_never_indexed() {
        let index = ScriptedIndex::new(vec![Step::Empty, Step::Empty, Step::Empty]);
        let policy = RetryPolicy::new(3, Duration::from_secs(1));
        let start = Instant::now();

        let err = Resolver::new(&index)
            .resolve(&query(), &policy)
            .await
            .unwrap_err();

        assert_eq!(err.name, "artifact.zip");
        assert_eq!(err.attempts, 3);
        assert_eq!(index.searches(), 3);
        // two sleeps of the fixed delay, none after the final attempt
        assert_eq!(start.elapsed(), Duration::from_secs(2));
    }

    #[tokio::test(start_paused = true)]
    async fn match_short_circuits_remaining_attempts() {
        let index = ScriptedIndex::new(vec![
            Step::Empty,
            Step::Empty,
            Step::Found(vec![handle("f1", "artifact.zip")]),
        ]);
        let policy = RetryPolicy::new(3, Duration::from_secs(1));
        let start = Instant::now();

        let found = Resolver::new(&index)
            .resolve(&query(), &policy)
            .await
            .unwrap();

        assert_eq!(found.id, "f1");
        assert_eq!(index.searches(), 3);
        assert_eq!(start.elapsed(), Duration::from_secs(2));
    }

    #[tokio::test(start_paused = true)]
    async fn immediate_match_never_sleeps() {
        let index = ScriptedIndex::new(vec![Step::Found(vec![handle("f1", "artifact.zip")])]);
        let policy = RetryPolicy::new(5, Duration::from_secs(30));
        let start = Instant::now();

        let found = Resolver::new(&index)
            .resolve(&query(), &policy)
            .await
            .unwrap();

        assert_eq!(found.id, "f1");
        assert_eq!(index.searches(), 1);
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn query_failure_retries_like_a_miss() {
        let index = ScriptedIndex::new(vec![
            Step::Fail,
            Step::Fail,
            Step::Found(vec![handle("f1", "artifact.zip")]),
        ]);
        let policy = RetryPolicy::new(3, Duration::from_secs(5));
        let start = Instant::now();

        let found = Resolver::new(&index)
            .resolve(&query(), &policy)
            .await
            .unwrap();

        assert_eq!(found.id, "f1");
        assert_eq!(index.searches(), 3);
        assert_eq!(start.elapsed(), Duration::from_secs(10));
    }

    #[tokio::test(start_paused = true)]
    async fn single_attempt_fails_without_sleeping() {
        let index = ScriptedIndex::new(vec![Step::Empty]);
        let policy = RetryPolicy::new(1, Duration::from_secs(60));
        let start = Instant::now();

        let err = Resolver::new(&index)
            .resolve(&query(), &policy)
            .await
            .unwrap_err();

        assert_eq!(err.attempts, 1);
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn first_result_wins_on_duplicate_names() {
        let index = ScriptedIndex::new(vec![Step::Found(vec![
            handle("first", "artifact.zip"),
            handle("second", "artifact.zip"),
        ])]);
        let policy = RetryPolicy::new(1, Duration::ZERO);

        let found = Resolver::new(&index)
            .resolve(&query(), &policy)
            .await
            .unwrap();

        assert_eq!(found.id, "first");
    }

    #[tokio::test(start_paused = true)]
    async fn miss_listing_is_observability_only() {
        let mut index = ScriptedIndex::new(vec![Step::Empty, Step::Empty]);
        index.list_fails = true;
        let policy = RetryPolicy::new(2, Duration::from_secs(1));

        let err = Resolver::new(&index)
            .list_on_miss(true)
            .resolve(&query(), &policy)
            .await
            .unwrap_err();

        assert_eq!(err.attempts, 2);
        assert_eq!(index.searches(), 2);
        assert_eq!(index.listings(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn listing_disabled_by_default() {
        let index = ScriptedIndex::new(vec![Step::Empty]);
        let policy = RetryPolicy::new(1, Duration::ZERO);

        let _ = Resolver::new(&index).resolve(&query(), &policy).await;

        assert_eq!(index.listings(), 0);
    }
}
