//! Server configuration parsed from environment variables.
//!
//! Every setting has a default so a bare `cargo run` serves from `./data`
//! and `./uploads` on `127.0.0.1:5000`. Malformed numeric values fall back to
//! their default rather than failing startup.

use std::path::PathBuf;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_UPLOADS_DIR: &str = "uploads";
pub const DEFAULT_SITE_ROOT: &str = "target/site";
pub const DEFAULT_SPIN_WIN_PROBABILITY: f64 = 0.10;
pub const DEFAULT_SPIN_COOLDOWN_SECS: u64 = 24 * 60 * 60;
pub const DEFAULT_FFMPEG_BIN: &str = "ffmpeg";
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 1024 * 1024 * 1024;

pub const ALBUMS_FILE: &str = "albums.json";
pub const SPIN_STATE_FILE: &str = "spin_state.json";

pub const ALLOWED_VIDEO_EXTENSIONS: &[&str] = &["mp4"];
pub const ALLOWED_IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// Required cover width / height.
pub const COVER_ASPECT_RATIO: f64 = 4.0 / 3.0;
pub const COVER_ASPECT_TOLERANCE: f64 = 0.02;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Enables the `force_win` / `force_lose` spin shortcuts.
    pub debug: bool,
    pub data_dir: PathBuf,
    pub uploads_dir: PathBuf,
    /// Directory whose `pkg/` holds the compiled gallery bundle.
    pub site_root: PathBuf,
    pub spin_win_probability: f64,
    pub spin_cooldown_secs: u64,
    pub ffmpeg_bin: String,
    pub max_upload_bytes: usize,
}

impl Config {
    /// Build config from the process environment.
    ///
    /// Optional:
    /// - `HOST`, `PORT`
    /// - `GALLERY_DEBUG`: `1`/`true` to enable debug-only routes
    /// - `DATA_DIR`, `UPLOADS_DIR`, `SITE_ROOT`
    /// - `SPIN_WIN_PROBABILITY`: clamped to `[0, 1]`
    /// - `SPIN_COOLDOWN_SECS`
    /// - `FFMPEG_BIN`
    /// - `MAX_UPLOAD_BYTES`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let parse = |key: &str| lookup(key).map(|v| v.trim().to_owned()).filter(|v| !v.is_empty());

        let spin_win_probability = parse("SPIN_WIN_PROBABILITY")
            .and_then(|v| v.parse::<f64>().ok())
            .filter(|p| p.is_finite())
            .map_or(DEFAULT_SPIN_WIN_PROBABILITY, |p| p.clamp(0.0, 1.0));

        Self {
            host: parse("HOST").unwrap_or_else(|| DEFAULT_HOST.to_owned()),
            port: parse("PORT").and_then(|v| v.parse().ok()).unwrap_or(DEFAULT_PORT),
            debug: parse("GALLERY_DEBUG").is_some_and(|v| parse_bool(&v)),
            data_dir: parse("DATA_DIR").map_or_else(|| PathBuf::from(DEFAULT_DATA_DIR), PathBuf::from),
            uploads_dir: parse("UPLOADS_DIR").map_or_else(|| PathBuf::from(DEFAULT_UPLOADS_DIR), PathBuf::from),
            site_root: parse("SITE_ROOT").map_or_else(|| PathBuf::from(DEFAULT_SITE_ROOT), PathBuf::from),
            spin_win_probability,
            spin_cooldown_secs: parse("SPIN_COOLDOWN_SECS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_SPIN_COOLDOWN_SECS),
            ffmpeg_bin: parse("FFMPEG_BIN").unwrap_or_else(|| DEFAULT_FFMPEG_BIN.to_owned()),
            max_upload_bytes: parse("MAX_UPLOAD_BYTES")
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES),
        }
    }

    #[must_use]
    pub fn albums_json(&self) -> PathBuf {
        self.data_dir.join(ALBUMS_FILE)
    }

    #[must_use]
    pub fn spin_state_json(&self) -> PathBuf {
        self.data_dir.join(SPIN_STATE_FILE)
    }

    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_bool(raw: &str) -> bool {
    matches!(raw.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
