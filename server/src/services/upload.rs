//! Upload service: album creation, cover replacement, and video uploads.
//!
//! DESIGN
//! ======
//! Route handlers spool every file field to the staging directory
//! (`<uploads>/.staging`) and hand the services [`UploadedFile`] handles
//! inside [`NewAlbum`] / [`NewVideo`]. Validation runs in the order the forms
//! present their fields, so the first problem a visitor would see is the one
//! reported. Accepted files are moved into the album layout; rejected covers
//! are deleted from staging and never touch an album directory.
//!
//! The catalog lock is only held to allocate ids and to commit. Catalog
//! changes are applied to a copy that replaces the live catalog once it is on
//! disk, so a failed save leaves memory and `albums.json` in agreement.
//! Video uploads are serialized among themselves so two uploads to one album
//! cannot allocate the same video id while their files are being moved.
//!
//! ERROR HANDLING
//! ==============
//! Validation failures carry the message shown to the visitor. Filesystem
//! and catalog failures are internal and map to 500 in the route layer.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::config::{ALLOWED_IMAGE_EXTENSIONS, ALLOWED_VIDEO_EXTENSIONS};
use crate::services::catalog::{self, Album, Catalog, CatalogError, Video, VideoVersion};
use crate::services::media::{self, AlbumDirs, COVER_EXTENSIONS, MediaError};
use crate::state::AppState;

const STAGING_DIR: &str = ".staging";

/// Directory that receives multipart file fields before validation.
#[must_use]
pub fn staging_dir(uploads: &Path) -> PathBuf {
    uploads.join(STAGING_DIR)
}

// =============================================================================
// TYPES
// =============================================================================

/// One file field from a multipart form, already spooled to `path`.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub path: PathBuf,
}

#[derive(Debug, Clone, Default)]
pub struct NewAlbum {
    pub name: String,
    pub cover: Option<UploadedFile>,
}

#[derive(Debug, Clone, Default)]
pub struct NewVideo {
    pub album_id: Option<String>,
    pub title: String,
    pub main: Option<UploadedFile>,
    pub uncensored: Option<UploadedFile>,
    pub pixelated: Option<UploadedFile>,
}

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("Album name is required.")]
    NameRequired,
    #[error("Cover image is required.")]
    CoverRequired,
    #[error("Invalid cover image format.")]
    InvalidCoverFormat,
    #[error("Cover image could not be read.")]
    UnreadableCover,
    #[error("Cover image must be 4:3 aspect ratio.")]
    CoverAspect,
    #[error("Album is required.")]
    AlbumRequired,
    #[error("Album not found.")]
    AlbumNotFound,
    #[error("Main video is required.")]
    MainVideoRequired,
    #[error("Uncensored video is required.")]
    UncensoredVideoRequired,
    #[error("Pixelated video is required.")]
    PixelatedVideoRequired,
    #[error("All videos must be mp4.")]
    VideoFormat,
    #[error("media error: {0}")]
    Media(#[from] MediaError),
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),
    #[error("upload i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl UploadError {
    /// Whether the error describes a problem with the submitted form.
    #[must_use]
    pub fn is_user_error(&self) -> bool {
        !matches!(self, Self::Media(_) | Self::Catalog(_) | Self::Io(_))
    }
}

/// Drop file fields the browser submitted without choosing a file.
fn present(file: Option<UploadedFile>) -> Option<UploadedFile> {
    file.filter(|f| !f.file_name.is_empty())
}

// =============================================================================
// ALBUMS
// =============================================================================

/// Create an album with its cover and return the new album id.
///
/// # Errors
///
/// Returns a user error for a missing name or an invalid cover, or an
/// internal error if files or the catalog cannot be written.
pub async fn create_album(state: &AppState, form: NewAlbum, now: f64) -> Result<String, UploadError> {
    let name = form.name.trim().to_owned();
    if name.is_empty() {
        return Err(UploadError::NameRequired);
    }
    let cover = present(form.cover).ok_or(UploadError::CoverRequired)?;
    let ext = cover_extension(&cover)?;
    check_cover(&cover).await?;

    let mut catalog = state.catalog.write().await;
    let album_id = catalog.next_album_id();
    let dirs = AlbumDirs::for_album(&state.config.uploads_dir, &album_id)?;
    dirs.create().await?;
    let cover_path = dirs.cover_file(&ext);
    media::move_file(&cover.path, &cover_path).await?;

    let mut next = catalog.clone();
    next.albums.push(Album {
        id: album_id.clone(),
        name,
        cover_path: Some(cover_path),
        created_at: now,
        videos: Vec::new(),
    });
    if let Err(e) = commit(state, &mut catalog, next).await {
        if let Err(cleanup) = tokio::fs::remove_dir_all(&dirs.root).await {
            warn!(%album_id, error = %cleanup, "orphaned album directory left behind");
        }
        return Err(e);
    }

    info!(%album_id, "album created");
    Ok(album_id)
}

/// Replace an album's cover image.
///
/// # Errors
///
/// Returns a user error for a missing or invalid cover or an unknown album,
/// or an internal error if files or the catalog cannot be written.
pub async fn change_cover(state: &AppState, album_id: &str, cover: Option<UploadedFile>) -> Result<(), UploadError> {
    let cover = present(cover).ok_or(UploadError::CoverRequired)?;
    let ext = cover_extension(&cover)?;
    if state.catalog.read().await.album(album_id).is_none() {
        return Err(UploadError::AlbumNotFound);
    }
    check_cover(&cover).await?;

    let mut catalog = state.catalog.write().await;
    let mut next = catalog.clone();
    let album = next.album_mut(album_id).ok_or(UploadError::AlbumNotFound)?;

    let dirs = AlbumDirs::for_album(&state.config.uploads_dir, album_id)?;
    tokio::fs::create_dir_all(&dirs.cover).await?;
    for other in COVER_EXTENSIONS.iter().filter(|e| **e != ext) {
        remove_if_exists(&dirs.cover_file(other)).await?;
    }
    let cover_path = dirs.cover_file(&ext);
    media::move_file(&cover.path, &cover_path).await?;
    album.cover_path = Some(cover_path);
    commit(state, &mut catalog, next).await?;

    info!(%album_id, "album cover replaced");
    Ok(())
}

fn cover_extension(cover: &UploadedFile) -> Result<String, UploadError> {
    if !media::allowed_file(&cover.file_name, ALLOWED_IMAGE_EXTENSIONS) {
        return Err(UploadError::InvalidCoverFormat);
    }
    media::file_extension(&cover.file_name).ok_or(UploadError::InvalidCoverFormat)
}

/// Verify a staged cover's aspect ratio, deleting it when rejected.
async fn check_cover(cover: &UploadedFile) -> Result<(), UploadError> {
    let verdict = match media::check_cover_aspect_ratio(&cover.path).await {
        Ok(true) => Ok(()),
        Ok(false) => Err(UploadError::CoverAspect),
        Err(e) => {
            warn!(file = %cover.file_name, error = %e, "cover rejected");
            Err(UploadError::UnreadableCover)
        }
    };
    if verdict.is_err() {
        remove_if_exists(&cover.path).await?;
    }
    verdict
}

async fn remove_if_exists(path: &Path) -> Result<(), std::io::Error> {
    match tokio::fs::remove_file(path).await {
        Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(e),
        _ => Ok(()),
    }
}

/// Persist `next` and install it as the live catalog once it is on disk.
async fn commit(state: &AppState, catalog: &mut Catalog, next: Catalog) -> Result<(), UploadError> {
    catalog::save(&state.config.albums_json(), &next).await?;
    *catalog = next;
    Ok(())
}

// =============================================================================
// VIDEOS
// =============================================================================

/// Store the three encodes of a new video, extract its thumbnail, and
/// register it. Returns `(album_id, video_id)`.
///
/// # Errors
///
/// Returns a user error for a missing album or file or a non-mp4 file, or an
/// internal error if files or the catalog cannot be written.
pub async fn upload_video(state: &AppState, form: NewVideo, now: f64) -> Result<(String, String), UploadError> {
    let album_id = form
        .album_id
        .map(|id| id.trim().to_owned())
        .filter(|id| !id.is_empty())
        .ok_or(UploadError::AlbumRequired)?;
    if state.catalog.read().await.album(&album_id).is_none() {
        return Err(UploadError::AlbumNotFound);
    }

    let main = present(form.main).ok_or(UploadError::MainVideoRequired)?;
    let uncensored = present(form.uncensored).ok_or(UploadError::UncensoredVideoRequired)?;
    let pixelated = present(form.pixelated).ok_or(UploadError::PixelatedVideoRequired)?;
    let files = [(VideoVersion::Main, main), (VideoVersion::Uncensored, uncensored), (VideoVersion::Pixelated, pixelated)];
    if files
        .iter()
        .any(|(_, f)| !media::allowed_file(&f.file_name, ALLOWED_VIDEO_EXTENSIONS))
    {
        return Err(UploadError::VideoFormat);
    }

    let _serial = state.video_uploads.lock().await;
    let video_id = state
        .catalog
        .read()
        .await
        .album(&album_id)
        .ok_or(UploadError::AlbumNotFound)?
        .next_video_id();

    let dirs = AlbumDirs::for_album(&state.config.uploads_dir, &album_id)?;
    tokio::fs::create_dir_all(&dirs.videos).await?;
    tokio::fs::create_dir_all(&dirs.thumbnails).await?;
    for (version, file) in &files {
        media::move_file(&file.path, &dirs.video_file(&video_id, *version)).await?;
    }

    let main_path = dirs.video_file(&video_id, VideoVersion::Main);
    let thumbnail_path = dirs.thumbnail_file(&video_id);
    state.thumbnails.generate(&main_path, &thumbnail_path).await;

    let title = form.title.trim();
    let video = Video {
        id: video_id.clone(),
        title: if title.is_empty() { video_id.clone() } else { title.to_owned() },
        main_path,
        uncensored_path: dirs.video_file(&video_id, VideoVersion::Uncensored),
        pixelated_path: dirs.video_file(&video_id, VideoVersion::Pixelated),
        thumbnail_path,
        uploaded_at: now,
    };

    let mut catalog = state.catalog.write().await;
    let mut next = catalog.clone();
    next.album_mut(&album_id)
        .ok_or(UploadError::AlbumNotFound)?
        .videos
        .push(video.clone());
    if let Err(e) = commit(state, &mut catalog, next).await {
        let mut written: Vec<&Path> = VideoVersion::ALL.iter().map(|v| video.path(*v)).collect();
        written.push(&video.thumbnail_path);
        for path in written {
            if let Err(cleanup) = remove_if_exists(path).await {
                warn!(path = %path.display(), error = %cleanup, "orphaned video file left behind");
            }
        }
        return Err(e);
    }

    info!(%album_id, %video_id, "video uploaded");
    Ok((album_id, video_id))
}

#[cfg(test)]
#[path = "upload_test.rs"]
mod tests;
