//! `loupe`: a visual style inspector core.
//!
//! The facade ties the subsystems together: the pointer-driven
//! [`loupe_session::InspectionSession`], the per-element
//! [`loupe_store::OverrideStore`], the breadcrumb highlight, and the
//! change hand-off prompt. An embedder owns the [`loupe_dom::Document`],
//! forwards events, and renders whatever the inspector put into the tree.
//!
//! ```
//! use loupe::Inspector;
//! use loupe_dom::{Document, Rect};
//! use loupe_store::TrackedProperty;
//!
//! let mut doc = Document::new();
//! let root = doc.root();
//! let html = doc.create_element(root, "html");
//! let body = doc.create_element(html, "body");
//! doc.set_rect(body, Rect::new(0.0, 0.0, 800.0, 600.0));
//! let hero = doc.create_element(body, "div");
//! doc.set_rect(hero, Rect::new(100.0, 100.0, 200.0, 80.0));
//! doc.set_computed(hero, "color", "rgb(0, 0, 0)");
//!
//! let mut inspector = Inspector::new();
//! inspector.attach(&mut doc);
//! inspector.start_picking(&mut doc);
//! inspector.pointer_move(&mut doc, 150.0, 120.0);
//! inspector.click(&mut doc, 150.0, 120.0);
//! inspector.set_value(&mut doc, TrackedProperty::Color, "rgb(255, 0, 0)");
//! assert!(inspector.prompt(&doc).contains("color: #000000 → #ff0000"));
//! ```

use log::info;
use loupe_dom::{Document, NodeId};
use loupe_overlay::Highlight;
use loupe_session::{ClickOutcome, InspectionSession};
use loupe_store::{OverrideStore, TrackedProperty};

pub mod fonts;
pub mod panel;
pub mod value;

pub use loupe_geometry::{BoxMetrics, Edges, compute_box_metrics, compute_gap_rectangles};
pub use loupe_session::{ScrubSession, SessionState};
pub use loupe_store::{ElementChanges, PropertyChange, PropertyGroup, Revision};

/// The inspector: one per embedded tool instance.
#[derive(Default)]
pub struct Inspector {
    host: Option<NodeId>,
    session: InspectionSession,
    store: OverrideStore,
    highlight: Highlight,
}

impl Inspector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the tool's host container under the document body. The host
    /// is a tool surface: hit-testing, ancestor paths, and picking all
    /// ignore it and everything the panel UI later puts inside it.
    /// Idempotent while the host is attached.
    pub fn attach(&mut self, doc: &mut Document) {
        if self
            .host
            .is_some_and(|host| doc.is_attached(host))
        {
            return;
        }
        let parent = doc.body().unwrap_or_else(|| doc.root());
        let host = doc.create_element(parent, "div");
        doc.set_attribute(host, "id", "loupe-host");
        doc.mark_tool_surface(host);
        doc.set_inline(host, "position", "fixed");
        doc.set_inline(host, "z-index", "2147483647");
        self.host = Some(host);
        info!("inspector attached");
    }

    /// Tear the tool out of the document: cancel any active pick, drop the
    /// highlight, remove the host container. The store survives so a
    /// re-attach keeps accumulated changes.
    pub fn detach(&mut self, doc: &mut Document) {
        self.session.cancel(doc);
        self.highlight.clear(doc);
        if let Some(host) = self.host.take() {
            doc.remove(host);
        }
    }

    /// The panel host container, while attached.
    #[inline]
    pub fn host(&self) -> Option<NodeId> {
        self.host
    }

    #[inline]
    pub fn session_state(&self) -> SessionState {
        self.session.state()
    }

    #[inline]
    pub fn is_picking(&self) -> bool {
        self.session.is_picking()
    }

    /// Enter pick mode.
    pub fn start_picking(&mut self, doc: &mut Document) {
        self.session.start(doc);
    }

    /// Leave pick mode without changing the selection.
    pub fn stop_picking(&mut self, doc: &mut Document) {
        self.session.cancel(doc);
    }

    /// Escape key: identical to [`Self::stop_picking`].
    pub fn escape(&mut self, doc: &mut Document) {
        self.session.escape(doc);
    }

    /// Forward a pointer move. Only meaningful while picking.
    pub fn pointer_move(&mut self, doc: &mut Document, x: f32, y: f32) {
        self.session.pointer_move(doc, x, y);
    }

    /// Forward a click. On commit the clicked element becomes the editing
    /// selection. Its store entry is created (snapshot first) before this
    /// returns, so a `set_value` issued by the same user action lands on a
    /// fully initialized entry.
    pub fn click(&mut self, doc: &mut Document, x: f32, y: f32) -> ClickOutcome {
        let outcome = self.session.click(doc, x, y);
        if let ClickOutcome::Commit(node) = outcome {
            self.store.select(doc, Some(node));
        }
        outcome
    }

    /// Navigate the selection directly (breadcrumb click, programmatic).
    pub fn select(&mut self, doc: &mut Document, node: Option<NodeId>) {
        self.session.select(node);
        self.store.select(doc, node);
    }

    #[inline]
    pub fn selected(&self) -> Option<NodeId> {
        self.store.selected()
    }

    /// Read access to the override store for panels and summaries.
    #[inline]
    pub fn store(&self) -> &OverrideStore {
        &self.store
    }

    /// The value an editor widget should display for the selection.
    pub fn get_value(&self, property: TrackedProperty) -> &str {
        self.store.get_value(property)
    }

    /// Apply an edited value to the selected element.
    pub fn set_value(&mut self, doc: &mut Document, property: TrackedProperty, value: &str) {
        self.store.set_value(doc, property, value);
    }

    /// Reset the selected element to its baseline.
    pub fn reset_current(&mut self, doc: &mut Document) {
        self.store.reset_current(doc);
    }

    /// Reset every edited element and clear the store.
    pub fn reset_all(&mut self, doc: &mut Document) {
        self.store.reset_all(doc);
    }

    /// Outline an element while its breadcrumb segment is hovered.
    pub fn highlight(&mut self, doc: &mut Document, node: NodeId) {
        self.highlight.show(doc, node);
    }

    pub fn clear_highlight(&mut self, doc: &mut Document) {
        self.highlight.clear(doc);
    }

    /// The ancestor chain for the breadcrumb, tool surfaces excluded.
    pub fn breadcrumb(&self, doc: &Document, max_depth: usize) -> Vec<String> {
        match self.selected() {
            Some(node) => loupe_dom::label::ancestor_path(doc, node, max_depth),
            None => Vec::new(),
        }
    }

    /// Build the change hand-off text from the current store state.
    pub fn prompt(&self, doc: &Document) -> String {
        loupe_prompt::build_prompt(doc, &self.store.list_changes())
    }

    /// Notify the inspector that the page mutated: store entries for
    /// detached elements are dropped.
    pub fn document_mutated(&mut self, doc: &Document) {
        self.store.prune_detached(doc);
    }
}
