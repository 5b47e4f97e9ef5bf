//! Album catalog: the `albums.json` document and its id allocation.
//!
//! DESIGN
//! ======
//! The whole catalog is one JSON document (`{"albums": [...]}`) loaded at
//! startup and held in memory behind the app state's lock. Mutations are
//! written straight back to disk while the write lock is held, so the file
//! always reflects the last acknowledged upload.
//!
//! ERROR HANDLING
//! ==============
//! A missing or malformed file loads as an empty catalog: a fresh install and
//! a corrupted document both come up serving an empty index instead of
//! refusing to start. Save failures are surfaced to the caller.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("album not found: {0}")]
    AlbumNotFound(String),
    #[error("video not found: {0}")]
    VideoNotFound(String),
    #[error("catalog i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("catalog encode error: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub albums: Vec<Album>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Album {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub cover_path: Option<PathBuf>,
    /// Unix seconds.
    #[serde(default)]
    pub created_at: f64,
    #[serde(default)]
    pub videos: Vec<Video>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Video {
    pub id: String,
    pub title: String,
    pub main_path: PathBuf,
    pub uncensored_path: PathBuf,
    pub pixelated_path: PathBuf,
    pub thumbnail_path: PathBuf,
    /// Unix seconds.
    #[serde(default)]
    pub uploaded_at: f64,
}

/// The three encodes stored for every video.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoVersion {
    Main,
    Uncensored,
    Pixelated,
}

impl VideoVersion {
    pub const ALL: [Self; 3] = [Self::Main, Self::Uncensored, Self::Pixelated];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Main => "main",
            Self::Uncensored => "uncensored",
            Self::Pixelated => "pixelated",
        }
    }

    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.as_str() == raw)
    }
}

// =============================================================================
// LOOKUPS
// =============================================================================

impl Catalog {
    #[must_use]
    pub fn album(&self, album_id: &str) -> Option<&Album> {
        self.albums.iter().find(|a| a.id == album_id)
    }

    pub fn album_mut(&mut self, album_id: &str) -> Option<&mut Album> {
        self.albums.iter_mut().find(|a| a.id == album_id)
    }

    /// Look up a video, distinguishing a missing album from a missing video.
    ///
    /// # Errors
    ///
    /// Returns `AlbumNotFound` or `VideoNotFound`.
    pub fn video(&self, album_id: &str, video_id: &str) -> Result<&Video, CatalogError> {
        let album = self
            .album(album_id)
            .ok_or_else(|| CatalogError::AlbumNotFound(album_id.to_owned()))?;
        album
            .video(video_id)
            .ok_or_else(|| CatalogError::VideoNotFound(video_id.to_owned()))
    }

    /// Next free `album_NNN` identifier.
    #[must_use]
    pub fn next_album_id(&self) -> String {
        next_sequential_id("album_", self.albums.iter().map(|a| a.id.as_str()))
    }
}

impl Album {
    #[must_use]
    pub fn video(&self, video_id: &str) -> Option<&Video> {
        self.videos.iter().find(|v| v.id == video_id)
    }

    /// Next free `video_NNN` identifier within this album.
    #[must_use]
    pub fn next_video_id(&self) -> String {
        next_sequential_id("video_", self.videos.iter().map(|v| v.id.as_str()))
    }
}

impl Video {
    #[must_use]
    pub fn path(&self, version: VideoVersion) -> &Path {
        match version {
            VideoVersion::Main => &self.main_path,
            VideoVersion::Uncensored => &self.uncensored_path,
            VideoVersion::Pixelated => &self.pixelated_path,
        }
    }
}

/// `<prefix><n>` with `n` one past the largest numeric suffix among `ids`,
/// zero-padded to three digits. Ids with a non-numeric suffix are skipped.
pub(crate) fn next_sequential_id<'a>(prefix: &str, ids: impl Iterator<Item = &'a str>) -> String {
    let max = ids
        .filter_map(|id| id.strip_prefix(prefix))
        .filter_map(|rest| rest.split('_').next())
        .filter_map(|n| n.parse::<u64>().ok())
        .max()
        .unwrap_or(0);
    format!("{prefix}{:03}", max + 1)
}

// =============================================================================
// PERSISTENCE
// =============================================================================

/// Load the catalog document at `path`.
pub async fn load(path: &Path) -> Catalog {
    let raw = match tokio::fs::read(path).await {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Catalog::default(),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "catalog unreadable; starting empty");
            return Catalog::default();
        }
    };
    match serde_json::from_slice(&raw) {
        Ok(catalog) => catalog,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "catalog malformed; starting empty");
            Catalog::default()
        }
    }
}

/// Write the catalog document to `path`, creating its directory.
///
/// # Errors
///
/// Returns an error if the directory or file cannot be written.
pub async fn save(path: &Path, catalog: &Catalog) -> Result<(), CatalogError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    let raw = serde_json::to_vec_pretty(catalog)?;
    tokio::fs::write(path, raw).await?;
    Ok(())
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
