//! Google Drive v3 adapter.
//!
//! Implements the [`drivedl_core::FileIndex`] capability on top of the
//! Drive REST API: service-account credential decoding, a one-shot
//! JWT-bearer token grant, `files.list` queries and `alt=media` streaming.

mod auth;
mod client;
mod credentials;
mod error;

pub use client::DriveClient;
pub use credentials::ServiceAccountKey;
pub use error::{CredentialsError, DriveError};
