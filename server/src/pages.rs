//! Server-rendered HTML pages.
//!
//! SYSTEM CONTEXT
//! ==============
//! Pages are static Leptos views rendered to strings; there is no hydration.
//! The album page is the one place markup is load-bearing: its grid,
//! wrapper, and thumbnail classes and `data-*` attributes are what the
//! `gallery` wasm controller binds to, so they must match `gallery::consts`.

use leptos::prelude::*;

use crate::services::catalog::{Album, VideoVersion};
use crate::services::spin::SpinOutcome;

/// Loads the gallery controller; its start hook attaches on its own.
const GALLERY_BOOT_SCRIPT: &str = "import init from '/pkg/gallery.js'; init();";

// =============================================================================
// URLS
// =============================================================================

#[must_use]
pub fn album_url(album_id: &str) -> String {
    format!("/albums/{album_id}")
}

#[must_use]
pub fn video_url(album_id: &str, video_id: &str, version: VideoVersion) -> String {
    format!("/albums/{album_id}/video/{video_id}/{}", version.as_str())
}

#[must_use]
pub fn cover_url(album_id: &str) -> String {
    format!("/media/{album_id}/cover")
}

#[must_use]
pub fn thumbnail_url(album_id: &str, video_id: &str) -> String {
    format!("/media/{album_id}/thumb/{video_id}.jpg")
}

#[must_use]
pub fn spin_url(album_id: &str, video_id: &str) -> String {
    format!("/spin/{album_id}/{video_id}")
}

/// `3725` → `1h 2m`; `65` → `1m 5s`; `9` → `9s`.
#[must_use]
pub fn format_remaining(secs: u64) -> String {
    let (hours, minutes, seconds) = (secs / 3600, (secs % 3600) / 60, secs % 60);
    if hours > 0 {
        format!("{hours}h {minutes}m")
    } else if minutes > 0 {
        format!("{minutes}m {seconds}s")
    } else {
        format!("{seconds}s")
    }
}

// =============================================================================
// LAYOUT
// =============================================================================

fn document(title: String, body: impl IntoView + 'static) -> String {
    let page = view! {
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <title>{title}</title>
            </head>
            <body>
                <nav class="site-nav">
                    <a href="/">"Albums"</a>
                    <a href="/albums/new">"New album"</a>
                    <a href="/upload">"Upload video"</a>
                </nav>
                {body}
            </body>
        </html>
    };
    format!("<!DOCTYPE html>{}", page.to_html())
}

fn flash(error: Option<String>) -> impl IntoView {
    error.map(|message| view! { <p class="flash error">{message}</p> })
}

// =============================================================================
// PAGES
// =============================================================================

/// Album index.
pub fn index_page(albums: &[Album]) -> String {
    let cards = albums
        .iter()
        .map(|album| {
            let href = album_url(&album.id);
            let cover = cover_url(&album.id);
            let name = album.name.clone();
            let count = format!("{} videos", album.videos.len());
            view! {
                <a class="album-card" href=href>
                    <img class="album-cover" src=cover alt=name.clone() loading="lazy"/>
                    <span class="album-name">{name}</span>
                    <span class="album-count">{count}</span>
                </a>
            }
        })
        .collect_view();
    let empty = albums.is_empty().then(|| view! { <p class="empty">"No albums yet."</p> });

    document(
        "Albums".to_owned(),
        view! {
            <main>
                <h1>"Albums"</h1>
                {empty}
                <div class="album-grid">{cards}</div>
            </main>
        },
    )
}

/// One album's thumbnail grid.
///
/// Each item is a `.video-thumb-wrapper` holding a single
/// `img.js-video-thumb[data-video-url]`; the grid carries `data-album-id`.
pub fn album_page(album: &Album, remaining_secs: u64, error: Option<String>) -> String {
    let items = album
        .videos
        .iter()
        .map(|video| {
            let thumb = thumbnail_url(&album.id, &video.id);
            let play = video_url(&album.id, &video.id, VideoVersion::Main);
            let spin = spin_url(&album.id, &video.id);
            let title = video.title.clone();
            view! {
                <div class="video-card">
                    <div class="video-thumb-wrapper">
                        <img
                            class="video-thumb js-video-thumb"
                            src=thumb
                            data-video-url=play
                            alt=title.clone()
                            loading="lazy"
                        />
                    </div>
                    <div class="video-meta">
                        <span class="video-title">{title}</span>
                        <a class="spin-link" href=spin>"Spin the wheel"</a>
                    </div>
                </div>
            }
        })
        .collect_view();

    let cooldown = (remaining_secs > 0).then(|| {
        let wait = format!("Next spin available in {}.", format_remaining(remaining_secs));
        view! { <p class="spin-cooldown">{wait}</p> }
    });
    let cover_action = format!("{}/cover", album_url(&album.id));

    document(
        album.name.clone(),
        view! {
            <main>
                <h1>{album.name.clone()}</h1>
                {flash(error)}
                {cooldown}
                <div class="video-grid" data-album-id=album.id.clone()>{items}</div>
                <form class="cover-form" method="post" action=cover_action enctype="multipart/form-data">
                    <label>"Change cover " <input type="file" name="cover" accept=".jpg,.jpeg,.png"/></label>
                    <button type="submit">"Upload cover"</button>
                </form>
                <script type="module" inner_html=GALLERY_BOOT_SCRIPT></script>
            </main>
        },
    )
}

/// Inputs for [`spin_page`].
#[derive(Debug, Clone)]
pub struct SpinView {
    pub album_id: String,
    pub video_id: String,
    pub allowed: bool,
    pub remaining_secs: u64,
    pub win_probability: f64,
    pub result: Option<SpinOutcome>,
}

/// The wheel page: cooldown notice, spin form, or a rolled result.
///
/// A rolled result is only recorded once the page posts `mark_spun`.
pub fn spin_page(spin: &SpinView) -> String {
    let base = spin_url(&spin.album_id, &spin.video_id);
    let odds = format!("Chance to win: {:.0}%", spin.win_probability * 100.0);
    let back = album_url(&spin.album_id);

    let body = match (spin.allowed, spin.result) {
        (false, _) => {
            let wait = format!("This album was spun recently. Try again in {}.", format_remaining(spin.remaining_secs));
            view! { <p class="spin-cooldown">{wait}</p> }.into_any()
        }
        (true, None) => {
            let action = format!("{base}/start");
            view! {
                <form class="spin-form" method="post" action=action>
                    <button type="submit">"Spin"</button>
                </form>
            }
            .into_any()
        }
        (true, Some(outcome)) => {
            let message = match outcome {
                SpinOutcome::Win => "You won! The uncensored version is unlocked.",
                SpinOutcome::Lose => "Not this time. Enjoy the pixelated version.",
            };
            let reward = video_url(&spin.album_id, &spin.video_id, outcome.reward());
            let mark_url = serde_json::to_string(&format!("{base}/mark_spun")).unwrap_or_default();
            let record = format!("fetch({mark_url}, {{ method: 'POST' }});");
            view! {
                <div class="spin-result" data-result=outcome.as_str()>
                    <p>{message}</p>
                    <a class="spin-reward" href=reward>"Watch"</a>
                </div>
                <script inner_html=record></script>
            }
            .into_any()
        }
    };

    document(
        "Spin the wheel".to_owned(),
        view! {
            <main>
                <h1>"Spin the wheel"</h1>
                <p class="spin-odds">{odds}</p>
                {body}
                <a class="back" href=back>"Back to album"</a>
            </main>
        },
    )
}

/// New album form.
pub fn create_album_page(error: Option<String>) -> String {
    document(
        "New album".to_owned(),
        view! {
            <main>
                <h1>"New album"</h1>
                {flash(error)}
                <form method="post" action="/albums/new" enctype="multipart/form-data">
                    <label>"Name " <input type="text" name="name"/></label>
                    <label>"Cover (4:3) " <input type="file" name="cover" accept=".jpg,.jpeg,.png"/></label>
                    <button type="submit">"Create"</button>
                </form>
            </main>
        },
    )
}

/// Video upload form.
pub fn upload_video_page(albums: &[Album], error: Option<String>) -> String {
    let options = albums
        .iter()
        .map(|album| {
            let id = album.id.clone();
            let name = album.name.clone();
            view! { <option value=id>{name}</option> }
        })
        .collect_view();

    document(
        "Upload video".to_owned(),
        view! {
            <main>
                <h1>"Upload video"</h1>
                {flash(error)}
                <form method="post" action="/upload" enctype="multipart/form-data">
                    <label>"Album " <select name="album_id">{options}</select></label>
                    <label>"Title " <input type="text" name="title"/></label>
                    <label>"Main (mp4) " <input type="file" name="main_video" accept=".mp4"/></label>
                    <label>"Uncensored (mp4) " <input type="file" name="uncensored_video" accept=".mp4"/></label>
                    <label>"Pixelated (mp4) " <input type="file" name="pixelated_video" accept=".mp4"/></label>
                    <button type="submit">"Upload"</button>
                </form>
            </main>
        },
    )
}

#[cfg(test)]
#[path = "pages_test.rs"]
mod tests;
