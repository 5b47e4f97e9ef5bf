//! Gallery page controller.
//!
//! SYSTEM CONTEXT
//! ==============
//! One controller is attached per album page once the document structure is
//! parsed. It owns two independent behaviors against the `.video-grid`
//! container:
//!
//! - scroll memory: restore the vertical offset saved in session storage on
//!   attach, save it again right before the page unloads;
//! - thumbnail swap: a click anywhere inside a `.js-video-thumb` replaces the
//!   enclosing `.video-thumb-wrapper`'s contents with an autoplaying video.
//!
//! ERROR HANDLING
//! ==============
//! There is no error path. Missing markup, an absent or unparsable record, or
//! a tree that refuses a mutation all leave the page as it was. Each silent
//! branch is logged at `debug` so it can be traced from the browser console.

use log::debug;

use crate::consts::{ALBUM_ID_ATTR, GRID_CLASS, THUMB_CLASS, UNKNOWN_ALBUM_ID, VIDEO_URL_ATTR, WRAPPER_CLASS};
use crate::dom::{PageDom, VideoPlayer};
use crate::scroll::{format_scroll_offset, parse_scroll_offset};
use crate::storage::{SessionStore, scroll_key};
use crate::viewport::Viewport;

#[cfg(test)]
#[path = "controller_test.rs"]
mod controller_test;

// =============================================================================
// TYPES
// =============================================================================

/// Why a click inside the container left the page untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// The target is not inside a thumbnail.
    NotAThumbnail,
    /// The thumbnail has no, or an empty, video URL.
    MissingVideoUrl,
    /// The thumbnail has no enclosing wrapper.
    NoWrapper,
    /// The tree did not accept the replacement.
    Rejected,
}

/// Result of dispatching one click.
#[derive(Debug, Clone, PartialEq)]
pub enum ClickOutcome<N> {
    Swapped { wrapper: N, video: N },
    Ignored(IgnoreReason),
}

impl<N> ClickOutcome<N> {
    #[must_use]
    pub fn is_swapped(&self) -> bool {
        matches!(self, Self::Swapped { .. })
    }
}

// =============================================================================
// CONTROLLER
// =============================================================================

pub struct GalleryPageController<D: PageDom, S, V> {
    dom: D,
    store: S,
    viewport: V,
    container: D::Node,
    album_id: String,
    storage_key: String,
}

impl<D, S, V> GalleryPageController<D, S, V>
where
    D: PageDom,
    S: SessionStore,
    V: Viewport,
{
    /// Bind to the page's gallery container.
    ///
    /// Returns `None` when the page has no container; nothing else happens
    /// in that case.
    pub fn attach(dom: D, store: S, viewport: V) -> Option<Self> {
        let Some(container) = dom.query_class(GRID_CLASS) else {
            debug!("no .{GRID_CLASS} on page; gallery controller inactive");
            return None;
        };

        let album_id = dom
            .attribute(&container, ALBUM_ID_ATTR)
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| UNKNOWN_ALBUM_ID.to_owned());
        let storage_key = scroll_key(&album_id);

        Some(Self { dom, store, viewport, container, album_id, storage_key })
    }

    /// [`attach`](Self::attach), then restore the saved scroll position.
    pub fn start(dom: D, store: S, viewport: V) -> Option<Self> {
        let controller = Self::attach(dom, store, viewport)?;
        controller.restore();
        Some(controller)
    }

    #[must_use]
    pub fn album_id(&self) -> &str {
        &self.album_id
    }

    #[must_use]
    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    #[must_use]
    pub fn container(&self) -> &D::Node {
        &self.container
    }

    #[must_use]
    pub fn dom(&self) -> &D {
        &self.dom
    }

    // --- Scroll memory ---

    /// Scroll to the saved offset for this album, if one parses.
    ///
    /// Returns the offset scrolled to. The horizontal offset is always reset
    /// to `0`.
    pub fn restore(&self) -> Option<f64> {
        let Some(saved) = self.store.get(&self.storage_key) else {
            debug!("no scroll record under {}", self.storage_key);
            return None;
        };
        let Some(y) = parse_scroll_offset(&saved) else {
            debug!("unparsable scroll record {saved:?} under {}", self.storage_key);
            return None;
        };
        self.viewport.scroll_to(0.0, y);
        Some(y)
    }

    /// Save the current vertical offset, overwriting any previous record.
    ///
    /// Runs from the unload handler, so it must stay synchronous.
    pub fn persist(&self) {
        let value = format_scroll_offset(self.viewport.scroll_y());
        self.store.set(&self.storage_key, &value);
    }

    // --- Thumbnail swap ---

    /// Handle a click whose target is `target`.
    pub fn handle_click(&self, target: &D::Node) -> ClickOutcome<D::Node> {
        let Some(thumb) = self.dom.closest_with_class(target, Some(&self.container), THUMB_CLASS) else {
            return ClickOutcome::Ignored(IgnoreReason::NotAThumbnail);
        };

        let Some(video_url) = self
            .dom
            .attribute(&thumb, VIDEO_URL_ATTR)
            .filter(|url| !url.is_empty())
        else {
            debug!("thumbnail without {VIDEO_URL_ATTR}; ignoring click");
            return ClickOutcome::Ignored(IgnoreReason::MissingVideoUrl);
        };

        let Some(wrapper) = self.dom.closest_with_class(&thumb, None, WRAPPER_CLASS) else {
            debug!("thumbnail outside .{WRAPPER_CLASS}; ignoring click");
            return ClickOutcome::Ignored(IgnoreReason::NoWrapper);
        };

        let player = VideoPlayer::inline(video_url);
        match self.dom.replace_children(&wrapper, &player) {
            Some(video) => ClickOutcome::Swapped { wrapper, video },
            None => {
                debug!("wrapper rejected video for {}", player.src);
                ClickOutcome::Ignored(IgnoreReason::Rejected)
            }
        }
    }
}
