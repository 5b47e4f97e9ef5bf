//! Upload routes: album creation, cover replacement, and video uploads.
//!
//! DESIGN
//! ======
//! File fields are streamed chunk by chunk into the staging directory, so a
//! request never holds a whole video in memory. Whatever the services do not
//! move into an album is deleted once the request is answered.
//!
//! ERROR HANDLING
//! ==============
//! Validation failures re-render the submitting form with the error message
//! and a 400 status. Internal failures map to 500 and are logged. Malformed
//! or oversized multipart bodies are rejected with the status the multipart
//! extractor reports.

use std::collections::HashMap;
use std::path::{Path as FsPath, PathBuf};

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use tokio::io::AsyncWriteExt;
use tracing::{error, warn};
use uuid::Uuid;

use crate::pages;
use crate::services::now_epoch_secs;
use crate::services::upload::{self, NewAlbum, NewVideo, UploadError, UploadedFile};
use crate::state::AppState;

// =============================================================================
// MULTIPART
// =============================================================================

/// Text fields and spooled file fields of one multipart body.
#[derive(Debug, Default)]
pub(crate) struct MultipartForm {
    pub fields: HashMap<String, String>,
    pub files: HashMap<String, UploadedFile>,
    /// Every file written to staging for this body, consumed or not.
    pub spooled: Vec<PathBuf>,
}

impl MultipartForm {
    fn text(&mut self, name: &str) -> Option<String> {
        self.fields.remove(name)
    }

    fn file(&mut self, name: &str) -> Option<UploadedFile> {
        self.files.remove(name)
    }

    /// Delete spooled files that were not moved into an album.
    pub(crate) async fn discard(self) {
        for path in self.spooled {
            match tokio::fs::remove_file(&path).await {
                Err(e) if e.kind() != std::io::ErrorKind::NotFound => {
                    warn!(path = %path.display(), error = %e, "staged upload not removed");
                }
                _ => {}
            }
        }
    }
}

/// Drain a multipart body into `staging`. Fields carrying a file name are
/// files; the rest are text. On failure nothing is left in staging.
pub(crate) async fn read_multipart(mut multipart: Multipart, staging: &FsPath) -> Result<MultipartForm, StatusCode> {
    let mut form = MultipartForm::default();
    if let Err(status) = drain(&mut multipart, staging, &mut form).await {
        form.discard().await;
        return Err(status);
    }
    Ok(form)
}

async fn drain(multipart: &mut Multipart, staging: &FsPath, form: &mut MultipartForm) -> Result<(), StatusCode> {
    tokio::fs::create_dir_all(staging).await.map_err(spool_error_to_status)?;

    while let Some(mut field) = multipart.next_field().await.map_err(|e| {
        warn!(error = %e, "multipart rejected");
        e.status()
    })? {
        let Some(name) = field.name().map(str::to_owned) else {
            continue;
        };
        if let Some(file_name) = field.file_name().map(str::to_owned) {
            let path = staging.join(Uuid::new_v4().to_string());
            form.spooled.push(path.clone());
            let mut out = tokio::fs::File::create(&path).await.map_err(spool_error_to_status)?;
            while let Some(chunk) = field.chunk().await.map_err(|e| {
                warn!(field = %name, error = %e, "multipart file rejected");
                e.status()
            })? {
                out.write_all(&chunk).await.map_err(spool_error_to_status)?;
            }
            out.flush().await.map_err(spool_error_to_status)?;
            form.files.insert(name, UploadedFile { file_name, path });
        } else {
            let text = field.text().await.map_err(|e| {
                warn!(field = %name, error = %e, "multipart field rejected");
                e.status()
            })?;
            form.fields.insert(name, text);
        }
    }
    Ok(())
}

fn spool_error_to_status(err: std::io::Error) -> StatusCode {
    error!(error = %err, "upload spooling failed");
    StatusCode::INTERNAL_SERVER_ERROR
}

// =============================================================================
// ALBUMS
// =============================================================================

/// `GET /albums/new`
pub async fn new_album_form() -> Html<String> {
    Html(pages::create_album_page(None))
}

/// `POST /albums/new`: create an album, then show it.
pub async fn create_album(State(state): State<AppState>, multipart: Multipart) -> Result<Response, StatusCode> {
    let mut form = read_multipart(multipart, &upload::staging_dir(&state.config.uploads_dir)).await?;
    let new_album = NewAlbum {
        name: form.text("name").unwrap_or_default(),
        cover: form.file("cover"),
    };
    let result = upload::create_album(&state, new_album, now_epoch_secs()).await;
    form.discard().await;

    match result {
        Ok(album_id) => Ok(Redirect::to(&pages::album_url(&album_id)).into_response()),
        Err(err) if err.is_user_error() => {
            Ok((StatusCode::BAD_REQUEST, Html(pages::create_album_page(Some(err.to_string())))).into_response())
        }
        Err(err) => Err(upload_error_to_status(err)),
    }
}

/// `POST /albums/:album_id/cover`: replace the cover, then show the album.
pub async fn change_cover(
    State(state): State<AppState>,
    Path(album_id): Path<String>,
    multipart: Multipart,
) -> Result<Response, StatusCode> {
    let mut form = read_multipart(multipart, &upload::staging_dir(&state.config.uploads_dir)).await?;
    let result = upload::change_cover(&state, &album_id, form.file("cover")).await;
    form.discard().await;

    match result {
        Ok(()) => Ok(Redirect::to(&pages::album_url(&album_id)).into_response()),
        Err(err) if err.is_user_error() => {
            let status = state
                .spins
                .status(&album_id, now_epoch_secs(), state.config.spin_cooldown_secs)
                .await;
            let catalog = state.catalog.read().await;
            let album = catalog.album(&album_id).ok_or(StatusCode::NOT_FOUND)?;
            let html = pages::album_page(album, status.remaining_secs, Some(err.to_string()));
            Ok((StatusCode::BAD_REQUEST, Html(html)).into_response())
        }
        Err(err) => Err(upload_error_to_status(err)),
    }
}

// =============================================================================
// VIDEOS
// =============================================================================

/// `GET /upload`
pub async fn upload_form(State(state): State<AppState>) -> Html<String> {
    let catalog = state.catalog.read().await;
    Html(pages::upload_video_page(&catalog.albums, None))
}

/// `POST /upload`: store the three encodes, then show the album.
pub async fn upload_video(State(state): State<AppState>, multipart: Multipart) -> Result<Response, StatusCode> {
    let mut form = read_multipart(multipart, &upload::staging_dir(&state.config.uploads_dir)).await?;
    let new_video = NewVideo {
        album_id: form.text("album_id"),
        title: form.text("title").unwrap_or_default(),
        main: form.file("main_video"),
        uncensored: form.file("uncensored_video"),
        pixelated: form.file("pixelated_video"),
    };
    let result = upload::upload_video(&state, new_video, now_epoch_secs()).await;
    form.discard().await;

    match result {
        Ok((album_id, _video_id)) => Ok(Redirect::to(&pages::album_url(&album_id)).into_response()),
        Err(err) if err.is_user_error() => {
            let catalog = state.catalog.read().await;
            let html = pages::upload_video_page(&catalog.albums, Some(err.to_string()));
            Ok((StatusCode::BAD_REQUEST, Html(html)).into_response())
        }
        Err(err) => Err(upload_error_to_status(err)),
    }
}

pub(crate) fn upload_error_to_status(err: UploadError) -> StatusCode {
    match err {
        UploadError::AlbumNotFound => StatusCode::NOT_FOUND,
        UploadError::Media(crate::services::media::MediaError::Forbidden) => StatusCode::FORBIDDEN,
        err if err.is_user_error() => StatusCode::BAD_REQUEST,
        err => {
            error!(error = %err, "upload failure");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

#[cfg(test)]
#[path = "upload_test.rs"]
mod tests;
