//! The inspection session: an explicit `Idle ⇄ Picking` state machine.
//!
//! The embedder owns the real event listeners (installed in capture phase so
//! the tool sees events before the page does) and forwards pointer moves,
//! clicks, and Escape into this machine. [`ClickOutcome`] tells the embedder
//! whether to swallow the committing click so the page underneath does not
//! navigate. Listener lifecycle mirrors the machine's: install on `start`,
//! remove on the transition back to `Idle`. The machine itself holds no
//! listener state, so repeated cycles cannot leak.
//!
//! Hovering and the editing selection are independent: picking a new hover
//! target never disturbs the previously committed selection.

use log::debug;
use loupe_dom::{Document, NodeId};
use loupe_overlay::OverlayRenderer;

mod scrub;

pub use scrub::ScrubSession;

/// The two states of the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Picking,
}

/// What the embedder should do with a forwarded click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// The click committed a selection; consume it (preventDefault +
    /// stopPropagation) so the page does not react.
    Commit(NodeId),
    /// Not ours; let the page handle it.
    Ignored,
}

type NodeCallback = Box<dyn FnMut(NodeId)>;

/// Pointer-driven element picking over a live document.
#[derive(Default)]
pub struct InspectionSession {
    state: SessionState,
    overlay: Option<OverlayRenderer>,
    hovered: Option<NodeId>,
    selected: Option<NodeId>,
    on_hover: Option<NodeCallback>,
    on_commit: Option<NodeCallback>,
}

impl InspectionSession {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn state(&self) -> SessionState {
        self.state
    }

    #[inline]
    pub fn is_picking(&self) -> bool {
        self.state == SessionState::Picking
    }

    /// The element currently under the pointer while picking.
    #[inline]
    pub fn hovered(&self) -> Option<NodeId> {
        self.hovered
    }

    /// The last committed selection.
    #[inline]
    pub fn selected(&self) -> Option<NodeId> {
        self.selected
    }

    /// Change the selection directly (breadcrumb navigation, programmatic
    /// re-selection). Does not touch the picking state.
    pub fn select(&mut self, node: Option<NodeId>) {
        self.selected = node;
    }

    /// Called with every new hover target while picking.
    pub fn on_hover(&mut self, callback: impl FnMut(NodeId) + 'static) {
        self.on_hover = Some(Box::new(callback));
    }

    /// Called once per committed selection.
    pub fn on_commit(&mut self, callback: impl FnMut(NodeId) + 'static) {
        self.on_commit = Some(Box::new(callback));
    }

    /// `Idle → Picking`: mount the overlay pool and set the crosshair
    /// cursor. Starting an already-picking session is a no-op.
    pub fn start(&mut self, doc: &mut Document) {
        if self.is_picking() {
            return;
        }
        debug!("inspection session: start picking");
        self.overlay = Some(OverlayRenderer::mount(doc));
        if let Some(body) = doc.body() {
            doc.set_inline(body, "cursor", "crosshair");
        }
        self.state = SessionState::Picking;
    }

    /// `Picking → Idle` without touching the selection: full teardown of
    /// overlay surfaces and cursor. Safe to call in any state.
    pub fn cancel(&mut self, doc: &mut Document) {
        if !self.is_picking() {
            return;
        }
        debug!("inspection session: stop picking");
        if let Some(overlay) = self.overlay.take() {
            overlay.teardown(doc);
        }
        if let Some(body) = doc.body() {
            doc.clear_inline(body, "cursor");
        }
        self.hovered = None;
        self.state = SessionState::Idle;
    }

    /// Drive the overlay from a pointer position. Misses and the tool's
    /// own surfaces hide the overlay instead of inspecting it.
    pub fn pointer_move(&mut self, doc: &mut Document, x: f32, y: f32) {
        if !self.is_picking() {
            return;
        }
        let target = doc.hit_test(x, y).filter(|node| !doc.in_tool_surface(*node));
        let Some(node) = target else {
            if let Some(overlay) = &self.overlay {
                overlay.hide_all(doc);
            }
            self.hovered = None;
            return;
        };
        self.hovered = Some(node);
        if let Some(overlay) = &self.overlay {
            overlay.show(doc, node);
        }
        if let Some(callback) = self.on_hover.as_mut() {
            callback(node);
        }
    }

    /// Commit the element under the pointer as the new selection and leave
    /// picking mode. Clicks on tool surfaces or empty space are ignored
    /// and flow through to the page.
    pub fn click(&mut self, doc: &mut Document, x: f32, y: f32) -> ClickOutcome {
        if !self.is_picking() {
            return ClickOutcome::Ignored;
        }
        let target = doc.hit_test(x, y).filter(|node| !doc.in_tool_surface(*node));
        let Some(node) = target else {
            return ClickOutcome::Ignored;
        };
        self.selected = Some(node);
        self.cancel(doc);
        if let Some(callback) = self.on_commit.as_mut() {
            callback(node);
        }
        ClickOutcome::Commit(node)
    }

    /// The Escape key cancels picking without changing the selection.
    pub fn escape(&mut self, doc: &mut Document) {
        self.cancel(doc);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use loupe_dom::Rect;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn page() -> (Document, NodeId, NodeId) {
        let mut doc = Document::new();
        let root = doc.root();
        let html = doc.create_element(root, "html");
        let body = doc.create_element(html, "body");
        doc.set_rect(body, Rect::new(0.0, 0.0, 800.0, 600.0));
        let target = doc.create_element(body, "div");
        doc.set_rect(target, Rect::new(100.0, 100.0, 200.0, 100.0));
        (doc, body, target)
    }

    #[test]
    fn start_cancel_cycles_leak_nothing() {
        let (mut doc, body, _) = page();
        let baseline = doc.node_count();
        let mut session = InspectionSession::new();
        for _ in 0..3 {
            session.start(&mut doc);
            assert!(session.is_picking());
            assert_eq!(doc.resolved(body, "cursor"), Some("crosshair"));
            session.cancel(&mut doc);
            assert_eq!(doc.node_count(), baseline);
            assert_eq!(doc.resolved(body, "cursor"), None);
        }
    }

    #[test]
    fn click_commits_and_returns_to_idle() {
        let (mut doc, _, target) = page();
        let baseline = doc.node_count();
        let mut session = InspectionSession::new();
        session.start(&mut doc);
        session.pointer_move(&mut doc, 150.0, 150.0);
        assert_eq!(session.hovered(), Some(target));

        let outcome = session.click(&mut doc, 150.0, 150.0);
        assert_eq!(outcome, ClickOutcome::Commit(target));
        assert_eq!(session.selected(), Some(target));
        assert!(!session.is_picking());
        assert_eq!(doc.node_count(), baseline);
    }

    #[test]
    fn escape_keeps_previous_selection() {
        let (mut doc, _, target) = page();
        let mut session = InspectionSession::new();
        session.start(&mut doc);
        let _ = session.click(&mut doc, 150.0, 150.0);
        assert_eq!(session.selected(), Some(target));

        // A second round, cancelled: the old selection survives.
        session.start(&mut doc);
        session.pointer_move(&mut doc, 10.0, 10.0);
        session.escape(&mut doc);
        assert_eq!(session.selected(), Some(target));
        assert!(!session.is_picking());
    }

    #[test]
    fn hovering_tool_surfaces_hides_instead_of_inspecting() {
        let (mut doc, body, _) = page();
        let panel = doc.create_element(body, "div");
        doc.set_rect(panel, Rect::new(600.0, 0.0, 200.0, 600.0));
        doc.mark_tool_surface(panel);

        let mut session = InspectionSession::new();
        session.start(&mut doc);
        session.pointer_move(&mut doc, 700.0, 50.0);
        assert_eq!(session.hovered(), None);
        let outcome = session.click(&mut doc, 700.0, 50.0);
        assert_eq!(outcome, ClickOutcome::Ignored);
        assert!(session.is_picking(), "tool-surface clicks do not commit");
        session.cancel(&mut doc);
    }

    #[test]
    fn callbacks_fire_on_hover_and_commit() {
        let (mut doc, _, target) = page();
        let hovered = Rc::new(RefCell::new(Vec::new()));
        let committed = Rc::new(RefCell::new(Vec::new()));
        let mut session = InspectionSession::new();
        {
            let hovered = Rc::clone(&hovered);
            session.on_hover(move |node| hovered.borrow_mut().push(node));
        }
        {
            let committed = Rc::clone(&committed);
            session.on_commit(move |node| committed.borrow_mut().push(node));
        }

        session.start(&mut doc);
        session.pointer_move(&mut doc, 150.0, 150.0);
        let _ = session.click(&mut doc, 150.0, 150.0);
        assert_eq!(hovered.borrow().as_slice(), &[target]);
        assert_eq!(committed.borrow().as_slice(), &[target]);
    }

    #[test]
    fn events_while_idle_are_ignored() {
        let (mut doc, _, _) = page();
        let mut session = InspectionSession::new();
        session.pointer_move(&mut doc, 150.0, 150.0);
        assert_eq!(session.hovered(), None);
        assert_eq!(session.click(&mut doc, 150.0, 150.0), ClickOutcome::Ignored);
        session.cancel(&mut doc);
        assert_eq!(session.selected(), None);
    }
}
