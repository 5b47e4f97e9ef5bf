//! Browser bindings for the gallery controller.
//!
//! SYSTEM CONTEXT
//! ==============
//! Compiled only with the `hydrate` feature. Wires the controller's trait
//! seams to `document`, `window.sessionStorage` and `window`, and registers
//! the three page callbacks: structure-ready, `beforeunload`, and a single
//! delegated `click` listener on the grid container.
//!
//! TRADE-OFFS
//! ==========
//! Listener closures are leaked with `forget`: they live exactly as long as
//! the page, and the page never detaches the controller.

use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Event, Storage, Window};

use crate::controller::GalleryPageController;
use crate::dom::{PageDom, VideoPlayer};
use crate::storage::SessionStore;
use crate::viewport::Viewport;

// =============================================================================
// DOM
// =============================================================================

pub struct WebDom {
    document: Document,
}

impl WebDom {
    #[must_use]
    pub fn new(document: Document) -> Self {
        Self { document }
    }
}

impl PageDom for WebDom {
    type Node = Element;

    fn query_class(&self, class: &str) -> Option<Element> {
        self.document.query_selector(&format!(".{class}")).ok().flatten()
    }

    fn parent(&self, node: &Element) -> Option<Element> {
        node.parent_element()
    }

    fn has_class(&self, node: &Element, class: &str) -> bool {
        node.class_list().contains(class)
    }

    fn attribute(&self, node: &Element, name: &str) -> Option<String> {
        node.get_attribute(name)
    }

    fn replace_children(&self, wrapper: &Element, player: &VideoPlayer) -> Option<Element> {
        let video = self.document.create_element("video").ok()?;
        for (name, value) in player.attributes() {
            video.set_attribute(name, value).ok()?;
        }
        wrapper.set_inner_html("");
        wrapper.append_child(&video).ok()?;
        Some(video)
    }
}

// =============================================================================
// SESSION STORAGE
// =============================================================================

/// `window.sessionStorage`. Storage may be unavailable (privacy modes, sandboxed
/// frames), in which case reads miss and writes are dropped.
pub struct WebSessionStore {
    storage: Option<Storage>,
}

impl WebSessionStore {
    #[must_use]
    pub fn from_window(window: &Window) -> Self {
        Self { storage: window.session_storage().ok().flatten() }
    }
}

impl SessionStore for WebSessionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.as_ref()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        if let Some(storage) = &self.storage {
            let _ = storage.set_item(key, value);
        }
    }
}

// =============================================================================
// VIEWPORT
// =============================================================================

pub struct WebViewport {
    window: Window,
}

impl WebViewport {
    #[must_use]
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

impl Viewport for WebViewport {
    fn scroll_y(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }

    fn scroll_to(&self, x: f64, y: f64) {
        self.window.scroll_to_with_x_and_y(x, y);
    }
}

// =============================================================================
// ENTRY POINT
// =============================================================================

/// Module start hook: attach once the document structure is available.
#[wasm_bindgen(start)]
pub fn install() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);

    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };

    if document.ready_state() == "loading" {
        let on_ready = Closure::once_into_js(move || mount(&window));
        let _ = document.add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref());
    } else {
        mount(&window);
    }
}

fn mount(window: &Window) {
    let Some(document) = window.document() else {
        return;
    };
    let store = WebSessionStore::from_window(window);
    let viewport = WebViewport::new(window.clone());
    let Some(controller) = GalleryPageController::start(WebDom::new(document), store, viewport) else {
        return;
    };
    let controller = Rc::new(controller);
    log::debug!("gallery controller attached for album {}", controller.album_id());

    let on_unload = {
        let controller = Rc::clone(&controller);
        Closure::<dyn FnMut()>::new(move || controller.persist())
    };
    let _ = window.add_event_listener_with_callback("beforeunload", on_unload.as_ref().unchecked_ref());
    on_unload.forget();

    let on_click = {
        let controller = Rc::clone(&controller);
        Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            let Some(target) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
                return;
            };
            let _ = controller.handle_click(&target);
        })
    };
    let _ = controller
        .container()
        .add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref());
    on_click.forget();
}
