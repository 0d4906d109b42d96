use std::path::PathBuf;

use clap::Parser;

/// Download a file from a Google Drive folder using service-account
/// credentials.
///
/// Freshly uploaded files can take a while to show up in Drive search
/// results; the lookup is retried a bounded number of times before giving
/// up.
#[derive(Clone, Debug, Parser)]
#[command(name = "drivedl", version = env!("CARGO_PKG_VERSION"), about)]
pub struct App {
    /// Name of the file to download
    #[arg(long)]
    pub filename: String,

    /// Base64-encoded service account credentials JSON
    /// (default: from the DRIVE_CREDENTIALS environment variable)
    #[arg(long)]
    pub credentials_base64: Option<String>,

    /// Drive folder ID to search in
    /// (default: from the DRIVE_FOLDER_ID environment variable)
    #[arg(long)]
    pub folder_id: Option<String>,

    /// Output path for the downloaded file
    /// (default: the filename, in the current directory)
    #[arg(long)]
    pub output_path: Option<PathBuf>,

    /// Maximum number of search attempts
    #[arg(long, default_value_t = 3)]
    pub max_attempts: u32,

    /// Delay in seconds between attempts
    #[arg(long, default_value_t = 5)]
    pub retry_delay: u64,

    /// Enable verbose output
    #[arg(long, short)]
    pub verbose: bool,
}
