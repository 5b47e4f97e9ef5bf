//! Markup and storage names shared with the server-rendered album page.
//!
//! The server's album template emits exactly these class and attribute names;
//! changing one side without the other silently disables the behavior.

// ── Markup ──────────────────────────────────────────────────────

/// Class carried by the gallery container.
pub const GRID_CLASS: &str = "video-grid";

/// Container attribute holding the album identifier.
pub const ALBUM_ID_ATTR: &str = "data-album-id";

/// Class marking a clickable video thumbnail.
pub const THUMB_CLASS: &str = "js-video-thumb";

/// Thumbnail attribute holding the playable video URL.
pub const VIDEO_URL_ATTR: &str = "data-video-url";

/// Class of the element owning one gallery item's visible child.
pub const WRAPPER_CLASS: &str = "video-thumb-wrapper";

// ── Session storage ─────────────────────────────────────────────

/// Prefix of the per-album scroll record key.
pub const SCROLL_KEY_PREFIX: &str = "album_scroll_";

/// Album identifier used when the container carries none.
///
/// Every page without an identifier shares one scroll record.
pub const UNKNOWN_ALBUM_ID: &str = "unknown";
