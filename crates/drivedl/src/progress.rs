use std::path::Path;
use std::sync::Arc;

use drivedl_core::{DownloadProgress, FileHandle, ProgressFn};
use indicatif::{ProgressBar, ProgressStyle};

const PB_STYLE: &str =
    "{spinner:.blue} {prefix:>10.cyan.bold} [{wide_bar:.cyan/blue}] {bytes}/{total_bytes} ({bytes_per_sec}, {eta}) {wide_msg}";

const PB_CHARS: &str = "█▓▒░  ";

/// Console progress bar fed by the core download callback.
pub struct DownloadBar {
    pb: ProgressBar,
}

impl DownloadBar {
    pub fn new(handle: &FileHandle) -> Self {
        let pb = match handle.size {
            Some(len) => {
                let pb = ProgressBar::new(len);
                if let Ok(style) = ProgressStyle::with_template(PB_STYLE) {
                    pb.set_style(style.progress_chars(PB_CHARS));
                }
                pb
            }
            // no Content-Length equivalent from the index; spin instead
            None => ProgressBar::new_spinner(),
        };
        pb.set_prefix("download");
        Self { pb }
    }

    pub fn callback(&self) -> ProgressFn {
        let pb = self.pb.clone();
        Arc::new(move |p: &DownloadProgress| pb.set_position(p.bytes_downloaded))
    }

    pub fn finish(self, destination: &Path) {
        self.pb
            .finish_with_message(format!("saved to {}", destination.display()));
    }
}
