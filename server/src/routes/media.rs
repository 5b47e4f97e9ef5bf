//! Media routes: video streams, covers, and thumbnails.
//!
//! DESIGN
//! ======
//! Files are served through `tower_http::services::ServeFile`, which handles
//! content types, conditional requests, and byte ranges so the browser's
//! video element can seek. Every path is resolved under the uploads root and
//! checked for existence before being handed off; anything missing is a 404.

use std::path::PathBuf;

use axum::body::Body;
use axum::extract::{Path, Request, State};
use axum::http::StatusCode;
use axum::response::Response;
use tower::ServiceExt;
use tower_http::services::ServeFile;
use tracing::error;

use crate::routes::albums::catalog_error_to_status;
use crate::services::catalog::VideoVersion;
use crate::services::media::{self, MediaError};
use crate::state::AppState;

/// `GET /albums/:album_id/video/:video_id/:version`: stream one encode.
pub async fn play_video(
    State(state): State<AppState>,
    Path((album_id, video_id, version)): Path<(String, String, String)>,
    request: Request,
) -> Result<Response, StatusCode> {
    let version = VideoVersion::from_str(&version).ok_or(StatusCode::NOT_FOUND)?;
    let path = {
        let catalog = state.catalog.read().await;
        let video = catalog
            .video(&album_id, &video_id)
            .map_err(catalog_error_to_status)?;
        video.path(version).to_path_buf()
    };
    serve_file(path, request).await
}

/// `GET /media/:album_id/cover`: the album's cover image.
pub async fn serve_cover(
    State(state): State<AppState>,
    Path(album_id): Path<String>,
    request: Request,
) -> Result<Response, StatusCode> {
    let path = media::find_cover(&state.config.uploads_dir, &album_id)
        .await
        .map_err(media_error_to_status)?
        .ok_or(StatusCode::NOT_FOUND)?;
    serve_file(path, request).await
}

/// `GET /media/:album_id/thumb/:video_id.jpg`: a video's poster frame.
pub async fn serve_thumbnail(
    State(state): State<AppState>,
    Path((album_id, file)): Path<(String, String)>,
    request: Request,
) -> Result<Response, StatusCode> {
    if file.strip_suffix(".jpg").is_none_or(str::is_empty) {
        return Err(StatusCode::NOT_FOUND);
    }
    let path = media::safe_join(&state.config.uploads_dir, &[&album_id, "thumbnails", &file])
        .map_err(media_error_to_status)?;
    serve_file(path, request).await
}

/// Serve `path` as-is, honoring range and conditional headers.
pub(crate) async fn serve_file(path: PathBuf, request: Request) -> Result<Response, StatusCode> {
    if !tokio::fs::try_exists(&path).await.unwrap_or(false) {
        return Err(StatusCode::NOT_FOUND);
    }
    match ServeFile::new(&path).oneshot(request).await {
        Ok(response) => Ok(response.map(Body::new)),
        Err(never) => match never {},
    }
}

pub(crate) fn media_error_to_status(err: MediaError) -> StatusCode {
    match err {
        MediaError::Forbidden => StatusCode::FORBIDDEN,
        MediaError::Io(_) | MediaError::Image(_) => {
            error!(error = %err, "media failure");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

#[cfg(test)]
#[path = "media_test.rs"]
mod tests;
