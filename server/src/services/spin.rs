//! Spin service: the per-album cooldown wheel that unlocks a video version.
//!
//! DESIGN
//! ======
//! Each album may be spun once per cooldown window. The ledger maps album id
//! to the Unix time of its last recorded spin and is persisted to
//! `spin_state.json`. Rolling and recording are separate steps: the page
//! rolls first, plays its wheel animation, and only then posts `mark_spun`.
//!
//! TRADE-OFFS
//! ==========
//! Because recording trails rolling, a visitor who leaves mid-animation keeps
//! the spin. That mirrors the page flow and is accepted.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use rand::Rng;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::services::catalog::VideoVersion;

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum SpinError {
    #[error("spin state i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("spin state encode error: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Whether an album can be spun now, and if not, for how long it is locked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpinStatus {
    pub allowed: bool,
    pub remaining_secs: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinOutcome {
    Win,
    Lose,
}

impl SpinOutcome {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Win => "win",
            Self::Lose => "lose",
        }
    }

    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(raw: &str) -> Option<Self> {
        match raw {
            "win" => Some(Self::Win),
            "lose" => Some(Self::Lose),
            _ => None,
        }
    }

    /// Version the visitor is sent to after this outcome.
    #[must_use]
    pub fn reward(self) -> VideoVersion {
        match self {
            Self::Win => VideoVersion::Uncensored,
            Self::Lose => VideoVersion::Pixelated,
        }
    }
}

// =============================================================================
// PURE RULES
// =============================================================================

/// Cooldown check for an album last spun at `last_spin` (Unix seconds).
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn spin_status(last_spin: Option<f64>, now: f64, cooldown_secs: u64) -> SpinStatus {
    let Some(last) = last_spin else {
        return SpinStatus { allowed: true, remaining_secs: 0 };
    };
    let cooldown = cooldown_secs as f64;
    let elapsed = now - last;
    if elapsed >= cooldown {
        return SpinStatus { allowed: true, remaining_secs: 0 };
    }
    SpinStatus { allowed: false, remaining_secs: (cooldown - elapsed) as u64 }
}

/// Roll once: a win with probability `win_probability`.
pub fn roll<R: Rng + ?Sized>(rng: &mut R, win_probability: f64) -> SpinOutcome {
    if rng.random::<f64>() < win_probability { SpinOutcome::Win } else { SpinOutcome::Lose }
}

// =============================================================================
// LEDGER
// =============================================================================

/// Last-spin times, cached in memory and written through to disk.
#[derive(Clone)]
pub struct SpinLedger {
    path: PathBuf,
    last_spins: Arc<Mutex<HashMap<String, f64>>>,
}

impl SpinLedger {
    /// Load the ledger at `path`. Missing or malformed files start empty.
    pub async fn load(path: PathBuf) -> Self {
        let last_spins = read_state(&path).await;
        Self { path, last_spins: Arc::new(Mutex::new(last_spins)) }
    }

    pub async fn last_spin(&self, album_id: &str) -> Option<f64> {
        self.last_spins.lock().await.get(album_id).copied()
    }

    pub async fn status(&self, album_id: &str, now: f64, cooldown_secs: u64) -> SpinStatus {
        spin_status(self.last_spin(album_id).await, now, cooldown_secs)
    }

    /// Record a spin for `album_id` at `now` and persist the ledger.
    ///
    /// # Errors
    ///
    /// Returns an error if the ledger file cannot be written. The in-memory
    /// record is kept either way.
    pub async fn mark_spun(&self, album_id: &str, now: f64) -> Result<(), SpinError> {
        let mut last_spins = self.last_spins.lock().await;
        last_spins.insert(album_id.to_owned(), now);
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let raw = serde_json::to_vec_pretty(&*last_spins)?;
        tokio::fs::write(&self.path, raw).await?;
        info!(%album_id, "spin recorded");
        Ok(())
    }
}

async fn read_state(path: &Path) -> HashMap<String, f64> {
    let raw = match tokio::fs::read(path).await {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return HashMap::new(),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "spin state unreadable; starting empty");
            return HashMap::new();
        }
    };
    serde_json::from_slice(&raw).unwrap_or_else(|e| {
        warn!(path = %path.display(), error = %e, "spin state malformed; starting empty");
        HashMap::new()
    })
}

#[cfg(test)]
#[path = "spin_test.rs"]
mod tests;
