use std::future::Future;
use std::pin::Pin;

use bytes::Bytes;
use futures_util::Stream;

use crate::data::FileHandle;

/// A boxed stream of download chunks.
pub type BoxStream<'a, T> = Pin<Box<dyn Stream<Item = T> + Send + 'a>>;

/// Remote object index abstraction.
///
/// This trait is the minimal capability the resolver and fetcher consume.
/// Implementations own their transport, authentication and error mapping.
///
/// There is an indexing delay between an object's creation and its
/// visibility to [`search`](FileIndex::search); callers must be prepared
/// for a freshly uploaded file to be absent from results.
pub trait FileIndex: Send + Sync {
    /// Error type for index operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Exact-name lookup scoped to a folder, excluding trashed items.
    ///
    /// Result ordering is whatever the remote store returns; the caller
    /// imposes no ordering of its own.
    fn search(
        &self,
        name: &str,
        folder_id: &str,
    ) -> impl Future<Output = Result<Vec<FileHandle>, Self::Error>> + Send;

    /// Everything in the folder, excluding trashed items.
    ///
    /// Used only for miss diagnostics.
    fn list_folder(
        &self,
        folder_id: &str,
    ) -> impl Future<Output = Result<Vec<FileHandle>, Self::Error>> + Send;

    /// Open a chunked byte stream over the handle's content.
    fn open_stream(
        &self,
        handle: &FileHandle,
    ) -> impl Future<Output = Result<BoxStream<'static, Result<Bytes, Self::Error>>, Self::Error>> + Send;
}
