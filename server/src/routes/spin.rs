//! Spin wheel routes.
//!
//! DESIGN
//! ======
//! Rolling and recording are separate requests. `start` rolls and renders
//! the outcome; the rendered page posts `mark_spun` once the visitor has
//! seen it, which starts the album's cooldown. Every spin response carries
//! `no-store` headers so a cached result is never replayed.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::http::header::{CACHE_CONTROL, EXPIRES, PRAGMA};
use axum::response::{Html, IntoResponse, Redirect, Response};
use serde::Deserialize;
use tracing::{error, info};

use crate::pages::{self, SpinView};
use crate::routes::albums::catalog_error_to_status;
use crate::services::now_epoch_secs;
use crate::services::spin::{self, SpinError, SpinOutcome};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct SpinQuery {
    pub result: Option<String>,
}

/// `GET /spin/:album_id/:video_id`: cooldown notice or spin form.
pub async fn spin_page(
    State(state): State<AppState>,
    Path((album_id, video_id)): Path<(String, String)>,
    Query(query): Query<SpinQuery>,
) -> Result<Response, StatusCode> {
    ensure_video(&state, &album_id, &video_id).await?;
    let result = query.result.as_deref().and_then(SpinOutcome::from_str);
    Ok(render(&state, album_id, video_id, result).await)
}

/// `POST /spin/:album_id/:video_id/start`: roll once without recording.
pub async fn start_spin(
    State(state): State<AppState>,
    Path((album_id, video_id)): Path<(String, String)>,
) -> Result<Response, StatusCode> {
    ensure_video(&state, &album_id, &video_id).await?;
    let status = state
        .spins
        .status(&album_id, now_epoch_secs(), state.config.spin_cooldown_secs)
        .await;
    if !status.allowed {
        return Ok(Redirect::to(&pages::spin_url(&album_id, &video_id)).into_response());
    }

    let outcome = spin::roll(&mut rand::rng(), state.config.spin_win_probability);
    info!(%album_id, %video_id, outcome = outcome.as_str(), "spin rolled");
    Ok(render(&state, album_id, video_id, Some(outcome)).await)
}

/// `POST /spin/:album_id/:video_id/mark_spun`: start the album's cooldown.
pub async fn mark_spun(
    State(state): State<AppState>,
    Path((album_id, video_id)): Path<(String, String)>,
) -> Result<StatusCode, StatusCode> {
    ensure_video(&state, &album_id, &video_id).await?;
    state
        .spins
        .mark_spun(&album_id, now_epoch_secs())
        .await
        .map_err(spin_error_to_status)?;
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /spin/:album_id/:video_id/force_win`: debug shortcut to the prize.
pub async fn force_win(
    State(state): State<AppState>,
    Path((album_id, video_id)): Path<(String, String)>,
) -> Result<Redirect, StatusCode> {
    forced(&state, &album_id, &video_id, SpinOutcome::Win)
}

/// `GET /spin/:album_id/:video_id/force_lose`: debug shortcut to the consolation.
pub async fn force_lose(
    State(state): State<AppState>,
    Path((album_id, video_id)): Path<(String, String)>,
) -> Result<Redirect, StatusCode> {
    forced(&state, &album_id, &video_id, SpinOutcome::Lose)
}

fn forced(state: &AppState, album_id: &str, video_id: &str, outcome: SpinOutcome) -> Result<Redirect, StatusCode> {
    if !state.config.debug {
        return Err(StatusCode::NOT_FOUND);
    }
    Ok(Redirect::to(&pages::video_url(album_id, video_id, outcome.reward())))
}

async fn ensure_video(state: &AppState, album_id: &str, video_id: &str) -> Result<(), StatusCode> {
    let catalog = state.catalog.read().await;
    catalog
        .video(album_id, video_id)
        .map(|_| ())
        .map_err(catalog_error_to_status)
}

async fn render(state: &AppState, album_id: String, video_id: String, result: Option<SpinOutcome>) -> Response {
    let status = state
        .spins
        .status(&album_id, now_epoch_secs(), state.config.spin_cooldown_secs)
        .await;
    let view = SpinView {
        album_id,
        video_id,
        allowed: status.allowed,
        remaining_secs: status.remaining_secs,
        win_probability: state.config.spin_win_probability,
        result,
    };
    no_store(Html(pages::spin_page(&view)))
}

/// Attach headers that forbid any cache from keeping the response.
pub(crate) fn no_store(body: impl IntoResponse) -> Response {
    (
        [
            (CACHE_CONTROL, "no-store, no-cache, must-revalidate, max-age=0"),
            (PRAGMA, "no-cache"),
            (EXPIRES, "0"),
        ],
        body,
    )
        .into_response()
}

pub(crate) fn spin_error_to_status(err: SpinError) -> StatusCode {
    error!(error = %err, "spin ledger failure");
    StatusCode::INTERNAL_SERVER_ERROR
}

#[cfg(test)]
#[path = "spin_test.rs"]
mod tests;
