//! Page tree abstraction.
//!
//! DESIGN
//! ======
//! The controller only needs five primitives from a rendering tree: find the
//! container by class, step to a parent, test a class, read an attribute, and
//! swap a wrapper's children for a video player. Ancestor matching is built
//! on top of those as a provided method, so the delegation logic that maps a
//! click target to its thumbnail is identical for the browser tree and for
//! [`MemoryDom`] in host tests.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;

#[cfg(test)]
#[path = "dom_test.rs"]
mod dom_test;

// =============================================================================
// VIDEO PLAYER
// =============================================================================

/// Video element to inject into a wrapper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoPlayer {
    pub src: String,
    pub controls: bool,
    pub autoplay: bool,
}

impl VideoPlayer {
    /// Inline player with native controls that starts playing immediately.
    #[must_use]
    pub fn inline(src: impl Into<String>) -> Self {
        Self { src: src.into(), controls: true, autoplay: true }
    }

    /// Attribute list for a `<video>` element, boolean attributes in their
    /// self-named form.
    #[must_use]
    pub fn attributes(&self) -> Vec<(&'static str, &str)> {
        let mut attrs = Vec::with_capacity(3);
        if self.controls {
            attrs.push(("controls", "controls"));
        }
        if self.autoplay {
            attrs.push(("autoplay", "autoplay"));
        }
        attrs.push(("src", self.src.as_str()));
        attrs
    }
}

// =============================================================================
// TRAIT
// =============================================================================

/// The slice of a document tree the gallery controller works against.
pub trait PageDom {
    /// Handle to one element. Equality means "same element".
    type Node: Clone + PartialEq;

    /// First element in document order carrying `class`.
    fn query_class(&self, class: &str) -> Option<Self::Node>;

    /// Parent element, or `None` at the top of the tree.
    fn parent(&self, node: &Self::Node) -> Option<Self::Node>;

    fn has_class(&self, node: &Self::Node, class: &str) -> bool;

    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;

    /// Remove every child of `wrapper` and append a single `<video>` built
    /// from `player`. Returns the new element, or `None` if the tree refused
    /// the mutation.
    fn replace_children(&self, wrapper: &Self::Node, player: &VideoPlayer) -> Option<Self::Node>;

    /// Nearest inclusive ancestor of `origin` satisfying `matches`.
    ///
    /// When `boundary` is given the walk stops after testing it, so matches
    /// above the boundary are never returned.
    fn closest<P>(&self, origin: &Self::Node, boundary: Option<&Self::Node>, mut matches: P) -> Option<Self::Node>
    where
        P: FnMut(&Self, &Self::Node) -> bool,
    {
        let mut current = Some(origin.clone());
        while let Some(node) = current {
            if matches(self, &node) {
                return Some(node);
            }
            if boundary.is_some_and(|b| *b == node) {
                return None;
            }
            current = self.parent(&node);
        }
        None
    }

    /// Nearest inclusive ancestor of `origin` carrying `class`.
    fn closest_with_class(&self, origin: &Self::Node, boundary: Option<&Self::Node>, class: &str) -> Option<Self::Node> {
        self.closest(origin, boundary, |dom, node| dom.has_class(node, class))
    }
}

// =============================================================================
// IN-MEMORY TREE
// =============================================================================

/// Element handle in a [`MemoryDom`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug)]
struct ElementData {
    tag: String,
    classes: Vec<String>,
    attributes: BTreeMap<String, String>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Arena-backed element tree for exercising the controller off-browser.
///
/// Detached elements stay in the arena so tests can still inspect them.
#[derive(Debug)]
pub struct MemoryDom {
    nodes: RefCell<Vec<ElementData>>,
    mutations: Cell<usize>,
}

impl Default for MemoryDom {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDom {
    /// Empty document holding only a `<body>` root.
    #[must_use]
    pub fn new() -> Self {
        let body = ElementData {
            tag: "body".into(),
            classes: Vec::new(),
            attributes: BTreeMap::new(),
            parent: None,
            children: Vec::new(),
        };
        Self { nodes: RefCell::new(vec![body]), mutations: Cell::new(0) }
    }

    #[must_use]
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Append a new element under `parent`.
    ///
    /// `class` is a space-separated class list, as in markup.
    pub fn append(&self, parent: NodeId, tag: &str, class: &str, attributes: &[(&str, &str)]) -> NodeId {
        let mut nodes = self.nodes.borrow_mut();
        let id = NodeId(nodes.len());
        nodes.push(ElementData {
            tag: tag.to_owned(),
            classes: class.split_whitespace().map(str::to_owned).collect(),
            attributes: attributes.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect(),
            parent: Some(parent),
            children: Vec::new(),
        });
        nodes[parent.0].children.push(id);
        id
    }

    #[must_use]
    pub fn tag(&self, node: NodeId) -> String {
        self.nodes.borrow()[node.0].tag.clone()
    }

    #[must_use]
    pub fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.nodes.borrow()[node.0].children.clone()
    }

    /// Whether `node` is still reachable from the root.
    #[must_use]
    pub fn is_attached(&self, node: NodeId) -> bool {
        let nodes = self.nodes.borrow();
        let mut current = node;
        loop {
            if current == self.root() {
                return true;
            }
            match nodes[current.0].parent {
                Some(parent) => current = parent,
                None => return false,
            }
        }
    }

    /// Number of structural mutations applied so far.
    #[must_use]
    pub fn mutation_count(&self) -> usize {
        self.mutations.get()
    }

    fn first_with_class(&self, from: NodeId, class: &str) -> Option<NodeId> {
        let nodes = self.nodes.borrow();
        let mut stack = vec![from];
        while let Some(id) = stack.pop() {
            let data = &nodes[id.0];
            if data.classes.iter().any(|c| c == class) {
                return Some(id);
            }
            stack.extend(data.children.iter().rev().copied());
        }
        None
    }
}

impl PageDom for MemoryDom {
    type Node = NodeId;

    fn query_class(&self, class: &str) -> Option<NodeId> {
        self.first_with_class(self.root(), class)
    }

    fn parent(&self, node: &NodeId) -> Option<NodeId> {
        self.nodes.borrow()[node.0].parent
    }

    fn has_class(&self, node: &NodeId, class: &str) -> bool {
        self.nodes.borrow()[node.0].classes.iter().any(|c| c == class)
    }

    fn attribute(&self, node: &NodeId, name: &str) -> Option<String> {
        self.nodes.borrow()[node.0].attributes.get(name).cloned()
    }

    fn replace_children(&self, wrapper: &NodeId, player: &VideoPlayer) -> Option<NodeId> {
        let previous = std::mem::take(&mut self.nodes.borrow_mut()[wrapper.0].children);
        {
            let mut nodes = self.nodes.borrow_mut();
            for child in previous {
                nodes[child.0].parent = None;
            }
        }
        let video = self.append(*wrapper, "video", "", &player.attributes());
        self.mutations.set(self.mutations.get() + 1);
        Some(video)
    }
}
