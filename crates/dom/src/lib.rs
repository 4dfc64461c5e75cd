//! Host-document abstraction consumed by the inspector.
//!
//! The inspector never talks to a real browser DOM. It talks to this model:
//! an arena-backed element tree whose nodes carry resolved (post-cascade)
//! style values, inline overrides, and post-layout rectangles in device
//! pixels. The embedder owns the document, keeps geometry current across
//! reflows, and forwards pointer events; everything in the inspector is a
//! consumer of this API.
//!
//! Nodes created by the inspector itself (overlay surfaces, the panel host)
//! are flagged as tool surfaces. Hit-testing, ancestor paths, and the
//! inspection session all exclude them.

use indextree::Arena;
pub use indextree::NodeId;
use smallvec::SmallVec;
use std::collections::HashMap;

pub mod label;

/// A post-layout rectangle in device pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    #[inline]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Whether the point lies inside the rectangle. Half-open on the right
    /// and bottom edges, so zero-sized boxes contain nothing.
    #[inline]
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }
}

/// What a node in the document tree is.
#[derive(Debug, Clone, Default)]
pub enum NodeKind {
    /// The document root. Exactly one per tree, never hit-tested.
    #[default]
    Document,
    /// An element with a lowercase tag name.
    Element { tag: String },
    /// A text run under an element.
    Text { text: String },
}

/// One node of the host document.
#[derive(Debug, Clone, Default)]
pub struct DomNode {
    kind: NodeKind,
    attrs: SmallVec<(String, String), 4>,
    /// Resolved style values as the host's layout engine produced them.
    computed: HashMap<String, String>,
    /// Inline overrides applied by the inspector; win over `computed`.
    inline: HashMap<String, String>,
    rect: Rect,
    tool_surface: bool,
}

impl DomNode {
    fn element(tag: &str) -> Self {
        Self {
            kind: NodeKind::Element {
                tag: tag.to_ascii_lowercase(),
            },
            ..Self::default()
        }
    }

    fn text(text: &str) -> Self {
        Self {
            kind: NodeKind::Text {
                text: text.to_owned(),
            },
            ..Self::default()
        }
    }
}

/// The live document the inspector overlays.
#[derive(Debug)]
pub struct Document {
    arena: Arena<DomNode>,
    root: NodeId,
}

impl Default for Document {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        let mut arena = Arena::new();
        let root = arena.new_node(DomNode::default());
        Self { arena, root }
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// The first element child of the root (the `<html>` equivalent).
    pub fn document_element(&self) -> Option<NodeId> {
        self.root
            .children(&self.arena)
            .find(|child| self.is_element(*child))
    }

    /// The first element tagged `body`, falling back to the document element.
    pub fn body(&self) -> Option<NodeId> {
        self.root
            .descendants(&self.arena)
            .find(|node| self.tag(*node) == Some("body"))
            .or_else(|| self.document_element())
    }

    /// Append a new element under `parent`.
    pub fn create_element(&mut self, parent: NodeId, tag: &str) -> NodeId {
        let node = self.arena.new_node(DomNode::element(tag));
        parent.append(node, &mut self.arena);
        node
    }

    /// Append a new text run under `parent`.
    pub fn create_text(&mut self, parent: NodeId, text: &str) -> NodeId {
        let node = self.arena.new_node(DomNode::text(text));
        parent.append(node, &mut self.arena);
        node
    }

    /// Replace the text of a text node. Ignored for elements.
    pub fn set_text(&mut self, node: NodeId, text: &str) {
        if let Some(data) = self.node_mut(node)
            && let NodeKind::Text { text: existing } = &mut data.kind
        {
            existing.clear();
            existing.push_str(text);
        }
    }

    /// Remove `node` and its whole subtree from the document.
    ///
    /// The `NodeId` stays valid as a key but [`Self::is_attached`] turns
    /// false, which is what store pruning keys off.
    pub fn remove(&mut self, node: NodeId) {
        if self.node(node).is_some() {
            node.remove_subtree(&mut self.arena);
        }
    }

    /// Whether the node is still part of the document tree.
    pub fn is_attached(&self, node: NodeId) -> bool {
        self.node(node).is_some() && node.ancestors(&self.arena).any(|parent| parent == self.root)
    }

    pub fn is_element(&self, node: NodeId) -> bool {
        matches!(
            self.node(node).map(|data| &data.kind),
            Some(NodeKind::Element { .. })
        )
    }

    pub fn tag(&self, node: NodeId) -> Option<&str> {
        match self.node(node).map(|data| &data.kind) {
            Some(NodeKind::Element { tag }) => Some(tag.as_str()),
            _ => None,
        }
    }

    /// The text of a text node; `None` for elements and the root.
    pub fn text(&self, node: NodeId) -> Option<&str> {
        match self.node(node).map(|data| &data.kind) {
            Some(NodeKind::Text { text }) => Some(text.as_str()),
            _ => None,
        }
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.arena.get(node).and_then(indextree::Node::parent)
    }

    /// The nearest ancestor that is an element (skips the document root).
    pub fn parent_element(&self, node: NodeId) -> Option<NodeId> {
        self.parent(node).filter(|parent| self.is_element(*parent))
    }

    /// All direct children, elements and text runs alike.
    pub fn children(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        node.children(&self.arena)
    }

    /// Direct element children only.
    pub fn child_elements(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        node.children(&self.arena)
            .filter(|child| self.is_element(*child))
    }

    /// Count of nodes currently attached, the root included. Used by tests
    /// to prove overlay teardown leaks nothing.
    pub fn node_count(&self) -> usize {
        self.root.descendants(&self.arena).count()
    }

    pub fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.node(node).and_then(|data| {
            data.attrs
                .iter()
                .find(|(attr_name, _)| attr_name == name)
                .map(|(_, value)| value.as_str())
        })
    }

    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        if let Some(data) = self.node_mut(node) {
            if let Some(existing) = data
                .attrs
                .iter_mut()
                .find(|(attr_name, _)| attr_name == name)
            {
                existing.1 = value.to_owned();
            } else {
                data.attrs.push((name.to_owned(), value.to_owned()));
            }
        }
    }

    pub fn id(&self, node: NodeId) -> Option<&str> {
        self.attribute(node, "id").filter(|value| !value.is_empty())
    }

    /// Whitespace-split tokens of the `class` attribute, in order.
    pub fn class_tokens(&self, node: NodeId) -> impl Iterator<Item = &str> {
        self.attribute(node, "class")
            .unwrap_or_default()
            .split_ascii_whitespace()
    }

    /// Store a resolved style value for the node, as the host's layout
    /// engine computed it.
    pub fn set_computed(&mut self, node: NodeId, property: &str, value: &str) {
        if let Some(data) = self.node_mut(node) {
            data.computed.insert(property.to_owned(), value.to_owned());
        }
    }

    /// Apply an inline override. Wins over the computed value immediately.
    pub fn set_inline(&mut self, node: NodeId, property: &str, value: &str) {
        if let Some(data) = self.node_mut(node) {
            data.inline.insert(property.to_owned(), value.to_owned());
        }
    }

    /// Clear an inline override, falling back to the computed value.
    pub fn clear_inline(&mut self, node: NodeId, property: &str) {
        if let Some(data) = self.node_mut(node) {
            data.inline.remove(property);
        }
    }

    /// The resolved value the page currently renders with: inline override
    /// if present, else the computed value.
    pub fn resolved(&self, node: NodeId, property: &str) -> Option<&str> {
        self.node(node).and_then(|data| {
            data.inline
                .get(property)
                .or_else(|| data.computed.get(property))
                .map(String::as_str)
        })
    }

    #[inline]
    pub fn rect(&self, node: NodeId) -> Rect {
        self.node(node).map(|data| data.rect).unwrap_or_default()
    }

    pub fn set_rect(&mut self, node: NodeId, rect: Rect) {
        if let Some(data) = self.node_mut(node) {
            data.rect = rect;
        }
    }

    /// Flag a node as created by the inspector itself.
    pub fn mark_tool_surface(&mut self, node: NodeId) {
        if let Some(data) = self.node_mut(node) {
            data.tool_surface = true;
        }
    }

    /// Whether the node or any ancestor is an inspector-created surface.
    pub fn in_tool_surface(&self, node: NodeId) -> bool {
        if self.node(node).is_none() {
            return false;
        }
        node.ancestors(&self.arena).any(|ancestor| {
            self.node(ancestor)
                .is_some_and(|data| data.tool_surface)
        })
    }

    /// Topmost element under the point: children beat parents, later
    /// siblings beat earlier ones. Subtrees with resolved `display: none`
    /// or `pointer-events: none` are transparent to the query, which is how
    /// overlay surfaces stay unhittable.
    pub fn hit_test(&self, x: f32, y: f32) -> Option<NodeId> {
        self.hit_test_subtree(self.root, x, y)
    }

    fn hit_test_subtree(&self, node: NodeId, x: f32, y: f32) -> Option<NodeId> {
        if self.is_element(node)
            && (self.resolved(node, "display") == Some("none")
                || self.resolved(node, "pointer-events") == Some("none"))
        {
            return None;
        }
        let mut best = None;
        for child in node.children(&self.arena) {
            if let Some(hit) = self.hit_test_subtree(child, x, y) {
                best = Some(hit);
            }
        }
        if best.is_none() && self.is_element(node) && self.rect(node).contains(x, y) {
            best = Some(node);
        }
        best
    }

    fn node(&self, node: NodeId) -> Option<&DomNode> {
        self.arena
            .get(node)
            .filter(|slot| !slot.is_removed())
            .map(indextree::Node::get)
    }

    fn node_mut(&mut self, node: NodeId) -> Option<&mut DomNode> {
        self.arena
            .get_mut(node)
            .filter(|slot| !slot.is_removed())
            .map(indextree::Node::get_mut)
    }
}
