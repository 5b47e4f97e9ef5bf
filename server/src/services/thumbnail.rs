//! Poster frame extraction with `ffmpeg`.
//!
//! A thumbnail is a convenience: if `ffmpeg` is missing or fails, the upload
//! still succeeds and the album page falls back to an empty image.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use tracing::{info, warn};

/// Seek offset for the poster frame, in seconds.
const POSTER_OFFSET_SECS: &str = "1";
/// JPEG quality scale for `-q:v` (2 is near-best).
const POSTER_QUALITY: &str = "2";

#[derive(Debug, Clone)]
pub struct ThumbnailGenerator {
    ffmpeg_bin: PathBuf,
}

impl ThumbnailGenerator {
    #[must_use]
    pub fn new(ffmpeg_bin: impl Into<PathBuf>) -> Self {
        Self { ffmpeg_bin: ffmpeg_bin.into() }
    }

    /// Arguments passed to `ffmpeg` for one extraction.
    #[must_use]
    pub fn args(video: &Path, thumbnail: &Path) -> Vec<std::ffi::OsString> {
        vec![
            "-y".into(),
            "-ss".into(),
            POSTER_OFFSET_SECS.into(),
            "-i".into(),
            video.as_os_str().to_owned(),
            "-frames:v".into(),
            "1".into(),
            "-q:v".into(),
            POSTER_QUALITY.into(),
            thumbnail.as_os_str().to_owned(),
        ]
    }

    /// Write a poster frame of `video` to `thumbnail`.
    ///
    /// Returns whether a thumbnail was produced.
    pub async fn generate(&self, video: &Path, thumbnail: &Path) -> bool {
        if let Some(parent) = thumbnail.parent() {
            if let Err(e) = tokio::fs::create_dir_all(parent).await {
                warn!(path = %parent.display(), error = %e, "thumbnail directory not created");
                return false;
            }
        }

        let status = tokio::process::Command::new(&self.ffmpeg_bin)
            .args(Self::args(video, thumbnail))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await;

        match status {
            Ok(status) if status.success() => {
                info!(video = %video.display(), "thumbnail generated");
                true
            }
            Ok(status) => {
                warn!(video = %video.display(), %status, "ffmpeg exited unsuccessfully");
                false
            }
            Err(e) => {
                warn!(bin = %self.ffmpeg_bin.display(), error = %e, "ffmpeg could not be started");
                false
            }
        }
    }
}

#[cfg(test)]
#[path = "thumbnail_test.rs"]
mod tests;
