//! Album index and album page routes.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Html;
use tracing::error;

use crate::pages;
use crate::services::catalog::CatalogError;
use crate::services::now_epoch_secs;
use crate::state::AppState;

/// `GET /`: every album with its cover.
pub async fn index(State(state): State<AppState>) -> Html<String> {
    let catalog = state.catalog.read().await;
    Html(pages::index_page(&catalog.albums))
}

/// `GET /albums/:album_id`: the thumbnail grid the page controller attaches to.
pub async fn view_album(
    State(state): State<AppState>,
    Path(album_id): Path<String>,
) -> Result<Html<String>, StatusCode> {
    let status = state
        .spins
        .status(&album_id, now_epoch_secs(), state.config.spin_cooldown_secs)
        .await;

    let catalog = state.catalog.read().await;
    let album = catalog.album(&album_id).ok_or(StatusCode::NOT_FOUND)?;
    Ok(Html(pages::album_page(album, status.remaining_secs, None)))
}

pub(crate) fn catalog_error_to_status(err: CatalogError) -> StatusCode {
    match err {
        CatalogError::AlbumNotFound(_) | CatalogError::VideoNotFound(_) => StatusCode::NOT_FOUND,
        CatalogError::Io(_) | CatalogError::Encode(_) => {
            error!(error = %err, "catalog failure");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

#[cfg(test)]
#[path = "albums_test.rs"]
mod tests;
