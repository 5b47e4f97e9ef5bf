//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! This module binds every HTTP endpoint of the gallery under a single Axum
//! router: server-rendered pages, media streaming, the spin wheel, uploads,
//! and the `/pkg` bundle that carries the browser-side page controller.
//!
//! DESIGN
//! ======
//! Page routes are gzip-compressed. Media routes are not: video responses
//! answer range requests and must keep their byte offsets intact.

pub mod albums;
pub mod media;
pub mod spin;
pub mod upload;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use axum::routing::{get, post};
use tower_http::compression::CompressionLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// HTML pages, forms, and the spin flow.
fn page_routes(state: AppState) -> Router {
    let upload_limit = DefaultBodyLimit::max(state.config.max_upload_bytes);

    Router::new()
        .route("/", get(albums::index))
        .route("/albums/new", get(upload::new_album_form).post(upload::create_album))
        .route("/albums/{album_id}", get(albums::view_album))
        .route("/albums/{album_id}/cover", post(upload::change_cover))
        .route("/upload", get(upload::upload_form).post(upload::upload_video))
        .route("/spin/{album_id}/{video_id}", get(spin::spin_page))
        .route("/spin/{album_id}/{video_id}/start", post(spin::start_spin))
        .route("/spin/{album_id}/{video_id}/mark_spun", post(spin::mark_spun))
        .route("/spin/{album_id}/{video_id}/force_win", get(spin::force_win))
        .route("/spin/{album_id}/{video_id}/force_lose", get(spin::force_lose))
        .layer(upload_limit)
        .layer(CompressionLayer::new())
        .with_state(state)
}

/// Uploaded files and the static wasm bundle.
fn media_routes(state: AppState) -> Router {
    let pkg_dir = state.config.site_root.join("pkg");

    Router::new()
        .route("/albums/{album_id}/video/{video_id}/{version}", get(media::play_video))
        .route("/media/{album_id}/cover", get(media::serve_cover))
        .route("/media/{album_id}/thumb/{file}", get(media::serve_thumbnail))
        .route("/healthz", get(healthz))
        .nest_service("/pkg", ServeDir::new(pkg_dir))
        .with_state(state)
}

/// The full application router.
pub fn app(state: AppState) -> Router {
    page_routes(state.clone())
        .merge(media_routes(state))
        .layer(TraceLayer::new_for_http())
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
