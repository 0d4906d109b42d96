use bytes::Bytes;
use chrono::{DateTime, Utc};
use drivedl_core::{BoxStream, FileHandle, FileIndex};
use futures_util::StreamExt;
use serde::Deserialize;
use tracing::debug;

use crate::auth;
use crate::credentials::ServiceAccountKey;
use crate::error::DriveError;

const API_BASE: &str = "https://www.googleapis.com/drive/v3";
const LIST_FIELDS: &str = "files(id, name, createdTime, size)";

/// Drive v3 client scoped to read-only file access.
pub struct DriveClient {
    http: reqwest::Client,
    token: String,
}

impl DriveClient {
    /// Authenticate with the given service-account key.
    pub async fn connect(key: &ServiceAccountKey) -> Result<Self, DriveError> {
        let http = reqwest::Client::new();
        let token = auth::access_token(&http, key).await?;
        Ok(Self { http, token })
    }

    async fn list(&self, q: String) -> Result<Vec<FileHandle>, DriveError> {
        debug!(%q, "files.list");
        let response = self
            .http
            .get(format!("{API_BASE}/files"))
            .bearer_auth(&self.token)
            .query(&[
                ("q", q.as_str()),
                ("fields", LIST_FIELDS),
                ("supportsAllDrives", "true"),
                ("includeItemsFromAllDrives", "true"),
            ])
            .send()
            .await?;
        let response = check(response)?;
        let body: FileList = response.json().await?;
        Ok(body.files.into_iter().map(DriveFile::into_handle).collect())
    }
}

impl FileIndex for DriveClient {
    type Error = DriveError;

    async fn search(&self, name: &str, folder_id: &str) -> Result<Vec<FileHandle>, DriveError> {
        self.list(format!(
            "name='{}' and '{}' in parents and trashed=false",
            escape_term(name),
            escape_term(folder_id),
        ))
        .await
    }

    async fn list_folder(&self, folder_id: &str) -> Result<Vec<FileHandle>, DriveError> {
        self.list(format!(
            "'{}' in parents and trashed=false",
            escape_term(folder_id),
        ))
        .await
    }

    async fn open_stream(
        &self,
        handle: &FileHandle,
    ) -> Result<BoxStream<'static, Result<Bytes, DriveError>>, DriveError> {
        debug!(id = %handle.id, "files.get alt=media");
        let response = self
            .http
            .get(format!("{API_BASE}/files/{}", handle.id))
            .bearer_auth(&self.token)
            .query(&[("alt", "media"), ("supportsAllDrives", "true")])
            .send()
            .await?;
        let response = check(response)?;
        Ok(Box::pin(
            response.bytes_stream().map(|r| r.map_err(DriveError::from)),
        ))
    }
}

fn check(response: reqwest::Response) -> Result<reqwest::Response, DriveError> {
    if response.status().is_success() {
        Ok(response)
    } else {
        Err(DriveError::Status {
            status: response.status(),
        })
    }
}

/// Escape a value for embedding in a `q` expression.
///
/// Drive query strings delimit literals with single quotes; a quote inside
/// a filename would otherwise terminate the literal early.
fn escape_term(term: &str) -> String {
    term.replace('\\', "\\\\").replace('\'', "\\'")
}

#[derive(Deserialize)]
struct FileList {
    #[serde(default)]
    files: Vec<DriveFile>,
}

/// One entry of a `files.list` response.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DriveFile {
    id: String,
    name: String,
    // Drive reports sizes as decimal strings
    #[serde(default)]
    size: Option<String>,
    #[serde(default)]
    created_time: Option<DateTime<Utc>>,
}

impl DriveFile {
    fn into_handle(self) -> FileHandle {
        FileHandle {
            id: self.id,
            name: self.name,
            size: self.size.and_then(|s| s.parse().ok()),
            created: self.created_time,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_quotes_and_backslashes() {
        assert_eq!(escape_term("plain.zip"), "plain.zip");
        assert_eq!(escape_term("it's.zip"), "it\\'s.zip");
        assert_eq!(escape_term(r"back\slash"), r"back\\slash");
    }

    #[test]
    fn parses_listing_with_string_sizes() {
        let body = r#"{
            "files": [
                {
                    "id": "1abc",
                    "name": "artifact.zip",
                    "size": "52428800",
                    "createdTime": "2026-08-01T12:30:00.000Z"
                },
                {"id": "2def", "name": "folderless"}
            ]
        }"#;
        let list: FileList = serde_json::from_str(body).unwrap();
        let handles: Vec<FileHandle> = list.files.into_iter().map(DriveFile::into_handle).collect();

        assert_eq!(handles.len(), 2);
        assert_eq!(handles[0].id, "1abc");
        assert_eq!(handles[0].size, Some(52_428_800));
        assert!(handles[0].created.is_some());
        assert_eq!(handles[1].size, None);
        assert_eq!(handles[1].created, None);
    }

    #[test]
    fn empty_response_yields_no_files() {
        let list: FileList = serde_json::from_str("{}").unwrap();
        assert!(list.files.is_empty());
    }

    #[test]
    fn unparsable_size_becomes_unknown() {
        let body = r#"{"files": [{"id": "1", "name": "f", "size": "not-a-number"}]}"#;
        let list: FileList = serde_json::from_str(body).unwrap();
        let handle = list.files.into_iter().map(DriveFile::into_handle).next().unwrap();
        assert_eq!(handle.size, None);
    }
}
