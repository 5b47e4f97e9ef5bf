//! Album page controller for the video gallery.
//!
//! This crate is compiled to WebAssembly and runs on every album page served
//! by the gallery server. It remembers the page's scroll position per album
//! across navigations within a tab, and turns a clicked thumbnail into an
//! inline, autoplaying video.
//!
//! All behavior is written against small trait seams ([`dom::PageDom`],
//! [`storage::SessionStore`], [`viewport::Viewport`]) so it runs and is tested
//! on the host; the `hydrate` feature adds the browser implementations in
//! `web`.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`controller`] | [`controller::GalleryPageController`]: attach guard, scroll memory, thumbnail swap |
//! | [`dom`] | Page tree trait, ancestor matching, in-memory tree |
//! | [`storage`] | Session key-value store trait and scroll record key |
//! | [`viewport`] | Scroll position trait |
//! | [`scroll`] | Stored offset parsing and formatting |
//! | [`consts`] | Markup class/attribute names and storage key prefix |
//! | `web` | Browser bindings and the wasm start hook (`hydrate` only) |

pub mod consts;
pub mod controller;
pub mod dom;
pub mod scroll;
pub mod storage;
pub mod viewport;
#[cfg(feature = "hydrate")]
pub mod web;

pub use controller::{ClickOutcome, GalleryPageController, IgnoreReason};
