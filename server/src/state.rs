//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is handed to every route through the `State` extractor. It
//! holds the parsed config, the album catalog behind a read/write lock, the
//! spin ledger, the thumbnail generator, and the lock that serializes video
//! uploads. Everything is loaded once at startup; the catalog and ledger
//! write through to disk on mutation.

use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};

use crate::config::Config;
use crate::services::catalog::{self, Catalog};
use crate::services::spin::SpinLedger;
use crate::services::thumbnail::ThumbnailGenerator;

/// Album catalog, spin ledger, and media tooling shared by every request.
/// Cloning is cheap: the catalog and upload lock are behind `Arc`s and the
/// ledger shares its map.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub catalog: Arc<RwLock<Catalog>>,
    pub spins: SpinLedger,
    pub thumbnails: ThumbnailGenerator,
    /// Held for the whole of a video upload, from id allocation to commit.
    pub video_uploads: Arc<Mutex<()>>,
}

impl AppState {
    /// Load the catalog and spin ledger named by `config`.
    pub async fn load(config: Config) -> Self {
        let catalog = catalog::load(&config.albums_json()).await;
        let spins = SpinLedger::load(config.spin_state_json()).await;
        let thumbnails = ThumbnailGenerator::new(&config.ffmpeg_bin);
        Self {
            config: Arc::new(config),
            catalog: Arc::new(RwLock::new(catalog)),
            spins,
            thumbnails,
            video_uploads: Arc::new(Mutex::new(())),
        }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================

#[cfg(test)]
pub mod test_helpers {
    use std::path::{Path, PathBuf};

    use super::*;
    use crate::services::catalog::{Album, Video, VideoVersion};
    use crate::services::media::AlbumDirs;

    /// Config rooted in `dir`, with a binary name that never resolves so
    /// thumbnail extraction fails fast.
    #[must_use]
    pub fn test_config(dir: &Path) -> Config {
        let mut config = Config::from_lookup(|_| None);
        config.data_dir = dir.join("data");
        config.uploads_dir = dir.join("uploads");
        config.site_root = dir.join("site");
        config.ffmpeg_bin = dir.join("no-ffmpeg").display().to_string();
        config
    }

    /// Create a test `AppState` over an empty data directory.
    pub async fn test_app_state(dir: &Path) -> AppState {
        AppState::load(test_config(dir)).await
    }

    /// Seed an album whose video files exist on disk, and return it.
    pub async fn seed_album(state: &AppState, album_id: &str, video_ids: &[&str]) -> Album {
        let dirs = AlbumDirs::for_album(&state.config.uploads_dir, album_id).expect("safe album id");
        dirs.create().await.expect("album dirs");

        let mut videos = Vec::new();
        for video_id in video_ids {
            for version in VideoVersion::ALL {
                let path = dirs.video_file(video_id, version);
                tokio::fs::write(&path, format!("{video_id}:{}", version.as_str()))
                    .await
                    .expect("video file");
            }
            let thumbnail_path = dirs.thumbnail_file(video_id);
            tokio::fs::write(&thumbnail_path, b"jpeg").await.expect("thumbnail file");
            videos.push(Video {
                id: (*video_id).to_owned(),
                title: format!("Clip {video_id}"),
                main_path: dirs.video_file(video_id, VideoVersion::Main),
                uncensored_path: dirs.video_file(video_id, VideoVersion::Uncensored),
                pixelated_path: dirs.video_file(video_id, VideoVersion::Pixelated),
                thumbnail_path,
                uploaded_at: 0.0,
            });
        }

        let album = Album {
            id: album_id.to_owned(),
            name: format!("Album {album_id}"),
            cover_path: None,
            created_at: 0.0,
            videos,
        };
        state.catalog.write().await.albums.push(album.clone());
        album
    }

    /// Path of a seeded video file.
    #[must_use]
    pub fn video_path(state: &AppState, album_id: &str, video_id: &str, version: VideoVersion) -> PathBuf {
        AlbumDirs::for_album(&state.config.uploads_dir, album_id)
            .expect("safe album id")
            .video_file(video_id, version)
    }
}
