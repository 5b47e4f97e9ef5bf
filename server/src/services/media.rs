//! Media service: upload directory layout, path safety, and file checks.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every album owns one directory under the uploads root:
//!
//! ```text
//! <uploads>/<album_id>/cover/cover.<ext>
//! <uploads>/<album_id>/videos/<video_id>_<version>.mp4
//! <uploads>/<album_id>/thumbnails/<video_id>.jpg
//! ```
//!
//! Album and video ids arrive from URL segments, so every path built from
//! them goes through [`safe_join`] first.

use std::path::{Component, Path, PathBuf};

use crate::config::{COVER_ASPECT_RATIO, COVER_ASPECT_TOLERANCE};
use crate::services::catalog::VideoVersion;

/// Extensions tried, in order, when locating an album cover.
pub const COVER_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    #[error("path escapes uploads root")]
    Forbidden,
    #[error("media i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("unreadable image: {0}")]
    Image(#[from] image::ImageError),
}

/// Directories owned by one album.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlbumDirs {
    pub root: PathBuf,
    pub cover: PathBuf,
    pub videos: PathBuf,
    pub thumbnails: PathBuf,
}

impl AlbumDirs {
    /// Layout for `album_id` under `uploads`.
    ///
    /// # Errors
    ///
    /// Returns `Forbidden` if `album_id` would resolve outside `uploads`.
    pub fn for_album(uploads: &Path, album_id: &str) -> Result<Self, MediaError> {
        let root = safe_join(uploads, &[album_id])?;
        Ok(Self {
            cover: root.join("cover"),
            videos: root.join("videos"),
            thumbnails: root.join("thumbnails"),
            root,
        })
    }

    /// Create every directory of the layout.
    ///
    /// # Errors
    ///
    /// Returns an error if a directory cannot be created.
    pub async fn create(&self) -> Result<(), MediaError> {
        for dir in [&self.cover, &self.videos, &self.thumbnails] {
            tokio::fs::create_dir_all(dir).await?;
        }
        Ok(())
    }

    #[must_use]
    pub fn cover_file(&self, ext: &str) -> PathBuf {
        self.cover.join(format!("cover.{ext}"))
    }

    #[must_use]
    pub fn video_file(&self, video_id: &str, version: VideoVersion) -> PathBuf {
        self.videos.join(format!("{video_id}_{}.mp4", version.as_str()))
    }

    #[must_use]
    pub fn thumbnail_file(&self, video_id: &str) -> PathBuf {
        self.thumbnails.join(format!("{video_id}.jpg"))
    }
}

// =============================================================================
// PATH SAFETY
// =============================================================================

/// Join `parts` onto `base`, refusing any result outside `base`.
///
/// Resolution is lexical: `..` segments are folded without touching the
/// filesystem, and absolute or drive-prefixed parts are rejected outright.
///
/// # Errors
///
/// Returns `Forbidden` when the joined path would leave `base`.
pub fn safe_join(base: &Path, parts: &[&str]) -> Result<PathBuf, MediaError> {
    let mut relative: Vec<&std::ffi::OsStr> = Vec::new();
    for part in parts {
        for component in Path::new(part).components() {
            match component {
                Component::Normal(segment) => relative.push(segment),
                Component::CurDir => {}
                Component::ParentDir => {
                    if relative.pop().is_none() {
                        return Err(MediaError::Forbidden);
                    }
                }
                Component::RootDir | Component::Prefix(_) => return Err(MediaError::Forbidden),
            }
        }
    }
    let mut joined = base.to_path_buf();
    joined.extend(relative);
    Ok(joined)
}

/// First existing cover file for `album_id`, trying [`COVER_EXTENSIONS`].
///
/// # Errors
///
/// Returns `Forbidden` for an unsafe album id.
pub async fn find_cover(uploads: &Path, album_id: &str) -> Result<Option<PathBuf>, MediaError> {
    let dirs = AlbumDirs::for_album(uploads, album_id)?;
    for ext in COVER_EXTENSIONS {
        let candidate = dirs.cover_file(ext);
        if tokio::fs::try_exists(&candidate).await.unwrap_or(false) {
            return Ok(Some(candidate));
        }
    }
    Ok(None)
}

// =============================================================================
// FILE CHECKS
// =============================================================================

/// Lower-cased extension after the last `.`, if any.
#[must_use]
pub fn file_extension(file_name: &str) -> Option<String> {
    let (_, ext) = file_name.rsplit_once('.')?;
    Some(ext.to_ascii_lowercase())
}

/// Whether `file_name` carries one of `allowed` extensions.
#[must_use]
pub fn allowed_file(file_name: &str, allowed: &[&str]) -> bool {
    file_extension(file_name).is_some_and(|ext| allowed.contains(&ext.as_str()))
}

/// Whether `width x height` is within tolerance of 4:3.
#[must_use]
pub fn is_cover_aspect(width: u32, height: u32) -> bool {
    if height == 0 {
        return false;
    }
    let ratio = f64::from(width) / f64::from(height);
    (ratio - COVER_ASPECT_RATIO).abs() <= COVER_ASPECT_TOLERANCE
}

/// Read the image at `path` and check its aspect ratio.
///
/// The format is sniffed from the file content; the extension only serves
/// as a fallback when the content is not recognized.
///
/// # Errors
///
/// Returns an error if the file is not a decodable image.
pub async fn check_cover_aspect_ratio(path: &Path) -> Result<bool, MediaError> {
    let path = path.to_path_buf();
    let (width, height) = tokio::task::spawn_blocking(move || -> Result<(u32, u32), MediaError> {
        Ok(image::ImageReader::open(&path)?
            .with_guessed_format()?
            .into_dimensions()?)
    })
    .await
    .map_err(std::io::Error::other)??;
    Ok(is_cover_aspect(width, height))
}

// =============================================================================
// FILE MOVES
// =============================================================================

/// Move `from` to `to`, copying when the two sit on different filesystems.
///
/// # Errors
///
/// Returns an error if the file can be neither renamed nor copied.
pub async fn move_file(from: &Path, to: &Path) -> Result<(), std::io::Error> {
    if tokio::fs::rename(from, to).await.is_ok() {
        return Ok(());
    }
    tokio::fs::copy(from, to).await?;
    tokio::fs::remove_file(from).await
}

#[cfg(test)]
#[path = "media_test.rs"]
mod tests;
