//! Error types for the Drive adapter.

use thiserror::Error;

/// The credentials blob could not be turned into a service-account key.
///
/// Always fatal; credentials never participate in the retry loop.
#[derive(Debug, Error)]
pub enum CredentialsError {
    #[error("credentials are not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("credentials are not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("credentials JSON is malformed: {0}")]
    Json(#[from] serde_json::Error),
}

/// A Drive API call failed.
#[derive(Debug, Error)]
pub enum DriveError {
    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Drive API returned {status}")]
    Status { status: reqwest::StatusCode },

    #[error("failed to sign token assertion: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
}
