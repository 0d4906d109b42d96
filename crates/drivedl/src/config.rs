use std::env;

use thiserror::Error;

use crate::app::App;

pub const CREDENTIALS_ENV: &str = "DRIVE_CREDENTIALS";
pub const FOLDER_ENV: &str = "DRIVE_FOLDER_ID";

/// Required configuration is missing from both flags and environment.
///
/// Fatal: nothing here participates in the retry loop.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("credentials not provided; use --credentials-base64 or set {CREDENTIALS_ENV}")]
    MissingCredentials,

    #[error("folder ID not provided; use --folder-id or set {FOLDER_ENV}")]
    MissingFolderId,
}

/// Fully-resolved run configuration: flags first, environment as fallback.
#[derive(Clone, Debug)]
pub struct Config {
    pub credentials_base64: String,
    pub folder_id: String,
}

impl Config {
    pub fn resolve(args: &App) -> Result<Self, ConfigError> {
        Self::resolve_with(args, |name| env::var(name).ok())
    }

    fn resolve_with(
        args: &App,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let credentials_base64 = args
            .credentials_base64
            .clone()
            .or_else(|| env(CREDENTIALS_ENV))
            .ok_or(ConfigError::MissingCredentials)?;
        let folder_id = args
            .folder_id
            .clone()
            .or_else(|| env(FOLDER_ENV))
            .ok_or(ConfigError::MissingFolderId)?;
        Ok(Self {
            credentials_base64,
            folder_id,
        })
    }
}
