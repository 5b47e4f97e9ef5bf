//! Window scroll position seam.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Vertical scroll access for the page viewport.
pub trait Viewport {
    /// Current vertical scroll offset in CSS pixels.
    fn scroll_y(&self) -> f64;
    /// Move the viewport to `(x, y)`.
    fn scroll_to(&self, x: f64, y: f64);
}

impl<V: Viewport + ?Sized> Viewport for Rc<V> {
    fn scroll_y(&self) -> f64 {
        (**self).scroll_y()
    }

    fn scroll_to(&self, x: f64, y: f64) {
        (**self).scroll_to(x, y);
    }
}

/// Recording viewport for host tests. Cloning shares state.
#[derive(Debug, Clone, Default)]
pub struct MemoryViewport {
    scroll_y: Rc<Cell<f64>>,
    calls: Rc<RefCell<Vec<(f64, f64)>>>,
}

impl MemoryViewport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Viewport already scrolled to `y`, as if the user had scrolled there.
    #[must_use]
    pub fn at(y: f64) -> Self {
        let viewport = Self::default();
        viewport.scroll_y.set(y);
        viewport
    }

    /// Simulate the user scrolling without recording a `scroll_to` call.
    pub fn user_scroll(&self, y: f64) {
        self.scroll_y.set(y);
    }

    /// Every `scroll_to` call received, in order.
    #[must_use]
    pub fn scroll_calls(&self) -> Vec<(f64, f64)> {
        self.calls.borrow().clone()
    }
}

impl Viewport for MemoryViewport {
    fn scroll_y(&self) -> f64 {
        self.scroll_y.get()
    }

    fn scroll_to(&self, x: f64, y: f64) {
        self.calls.borrow_mut().push((x, y));
        self.scroll_y.set(y);
    }
}
