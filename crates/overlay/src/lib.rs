//! Overlay renderer: the fixed pool of visual surfaces drawn over the page.
//!
//! Every surface is a real node in the host document (position `fixed`,
//! `pointer-events: none`, flagged as a tool surface), created once when the
//! inspection session starts and repositioned on every hover. Surfaces are
//! never created per-hover; unused pool slots hide instead. Teardown removes
//! every node, including the label text children, so repeated start/stop
//! cycles leave the document exactly as found.

use log::trace;
use loupe_dom::{Document, NodeId, Rect, label};
use loupe_geometry::{BoxMetrics, compute_box_metrics, compute_gap_rectangles};

/// Fixed capacity of the gap strip/label pool. Containers with more gaps
/// than this show the first sixteen; the rest are silently dropped.
pub const GAP_POOL: usize = 16;

/// Minimum pixels of headroom above the margin box before the tooltip
/// flips below the element.
const TOOLTIP_HEADROOM: f32 = 28.0;

/// Position transition shared by the box layers. Cosmetic smoothing only.
const BOX_TRANSITION: &str = "top 0.06s, left 0.06s, width 0.06s, height 0.06s";

const MARGIN_FILL: &str = "rgba(255, 122, 0, 0.08)";
const PADDING_FILL: &str = "rgba(110, 200, 120, 0.12)";
const PADDING_BORDER: &str = "1.5px solid rgba(255, 122, 0, 0.55)";
const CONTENT_FILL: &str = "rgba(100, 160, 255, 0.12)";
const MARGIN_LABEL_FILL: &str = "rgba(255, 122, 0, 0.8)";
const PADDING_LABEL_FILL: &str = "rgba(110, 200, 120, 0.8)";
const GAP_LABEL_FILL: &str = "rgba(180, 120, 255, 0.85)";
const GAP_STRIPE: &str = "repeating-linear-gradient(-45deg, rgba(180,120,255,0.14), \
     rgba(180,120,255,0.14) 2px, rgba(180,120,255,0.05) 2px, rgba(180,120,255,0.05) 5px)";
const HIGHLIGHT_FILL: &str = "rgba(100, 160, 255, 0.08)";
const HIGHLIGHT_BORDER: &str = "1.5px solid rgba(100, 160, 255, 0.55)";

/// A pooled label: the element plus its text child.
#[derive(Debug, Clone, Copy)]
struct Label {
    surface: NodeId,
    text: NodeId,
}

/// The full surface pool for one inspection session.
#[derive(Debug)]
pub struct OverlayRenderer {
    margin_layer: NodeId,
    box_layer: NodeId,
    content_layer: NodeId,
    margin_labels: [Label; 4],
    padding_labels: [Label; 4],
    gap_strips: Vec<NodeId>,
    gap_labels: Vec<Label>,
    tooltip: Label,
}

fn create_surface(doc: &mut Document, parent: NodeId, background: &str) -> NodeId {
    let surface = doc.create_element(parent, "div");
    doc.mark_tool_surface(surface);
    doc.set_inline(surface, "position", "fixed");
    doc.set_inline(surface, "pointer-events", "none");
    doc.set_inline(surface, "z-index", "2147483646");
    doc.set_inline(surface, "display", "none");
    doc.set_inline(surface, "background", background);
    surface
}

fn create_label(doc: &mut Document, parent: NodeId, background: &str) -> Label {
    let surface = create_surface(doc, parent, background);
    let text = doc.create_text(surface, "");
    Label { surface, text }
}

fn show_at(doc: &mut Document, surface: NodeId, rect: Rect) {
    doc.set_rect(surface, rect);
    doc.set_inline(surface, "display", "block");
}

fn hide(doc: &mut Document, surface: NodeId) {
    doc.set_inline(surface, "display", "none");
}

/// Show a pixel-value label centered on a point, or hide it for zero
/// values. Zero edges get no label at all, not a "0".
fn position_label(doc: &mut Document, label: Label, value: f32, x: f32, y: f32) {
    if value.abs() > 0.0 {
        doc.set_text(label.text, &format!("{}", value.round() as i64));
        show_at(doc, label.surface, Rect::new(x, y, 0.0, 0.0));
    } else {
        hide(doc, label.surface);
    }
}

impl OverlayRenderer {
    /// Create the whole pool, hidden, under the document body.
    pub fn mount(doc: &mut Document) -> Self {
        let parent = doc.body().unwrap_or_else(|| doc.root());

        let margin_layer = create_surface(doc, parent, MARGIN_FILL);
        doc.set_inline(margin_layer, "transition", BOX_TRANSITION);
        let box_layer = create_surface(doc, parent, PADDING_FILL);
        doc.set_inline(box_layer, "border", PADDING_BORDER);
        doc.set_inline(box_layer, "border-radius", "2px");
        doc.set_inline(box_layer, "transition", BOX_TRANSITION);
        let content_layer = create_surface(doc, parent, CONTENT_FILL);
        doc.set_inline(content_layer, "transition", BOX_TRANSITION);

        let margin_labels = [(); 4].map(|()| create_label(doc, parent, MARGIN_LABEL_FILL));
        let padding_labels = [(); 4].map(|()| create_label(doc, parent, PADDING_LABEL_FILL));

        let gap_strips = (0..GAP_POOL)
            .map(|_| create_surface(doc, parent, GAP_STRIPE))
            .collect();
        let gap_labels = (0..GAP_POOL)
            .map(|_| create_label(doc, parent, GAP_LABEL_FILL))
            .collect();

        let tooltip = create_label(doc, parent, "#1a1a1a");
        doc.set_inline(tooltip.surface, "color", "#e5e5e5");
        doc.set_inline(tooltip.surface, "border-radius", "4px");

        Self {
            margin_layer,
            box_layer,
            content_layer,
            margin_labels,
            padding_labels,
            gap_strips,
            gap_labels,
            tooltip,
        }
    }

    /// Reposition everything over `node` from its current box metrics.
    /// Called on every hover move; reads the live document each time.
    pub fn show(&self, doc: &mut Document, node: NodeId) {
        let metrics = compute_box_metrics(doc, node);
        let BoxMetrics {
            rect,
            margin,
            padding,
            border,
        } = metrics;

        show_at(doc, self.margin_layer, metrics.margin_box());
        show_at(doc, self.box_layer, rect);
        let content_box = metrics.content_box();
        show_at(doc, self.content_layer, content_box);

        // Edge value labels at the midpoint of each non-zero edge,
        // [top, right, bottom, left].
        let center_x = rect.x + rect.width / 2.0;
        let center_y = rect.y + rect.height / 2.0;
        let margin_anchors = [
            (center_x, rect.y - margin.top / 2.0),
            (rect.right() + margin.right / 2.0, center_y),
            (center_x, rect.bottom() + margin.bottom / 2.0),
            (rect.x - margin.left / 2.0, center_y),
        ];
        for (label, (value, (x, y))) in self
            .margin_labels
            .iter()
            .zip(margin.as_trbl().into_iter().zip(margin_anchors))
        {
            position_label(doc, *label, value, x, y);
        }
        let padding_anchors = [
            (center_x, rect.y + border.top + padding.top / 2.0),
            (rect.right() - border.right - padding.right / 2.0, center_y),
            (center_x, rect.bottom() - border.bottom - padding.bottom / 2.0),
            (rect.x + border.left + padding.left / 2.0, center_y),
        ];
        for (label, (value, (x, y))) in self
            .padding_labels
            .iter()
            .zip(padding.as_trbl().into_iter().zip(padding_anchors))
        {
            position_label(doc, *label, value, x, y);
        }

        // Gap strips, pool-bounded; overflow is silently dropped.
        let gap_rects = compute_gap_rectangles(doc, node, content_box);
        if gap_rects.len() > GAP_POOL {
            trace!("gap overlay truncated: {} of {}", GAP_POOL, gap_rects.len());
        }
        for index in 0..GAP_POOL {
            if let Some(gap) = gap_rects.get(index) {
                show_at(doc, self.gap_strips[index], *gap);
                let value = gap.width.min(gap.height);
                position_label(
                    doc,
                    self.gap_labels[index],
                    value,
                    gap.x + gap.width / 2.0,
                    gap.y + gap.height / 2.0,
                );
            } else {
                hide(doc, self.gap_strips[index]);
                hide(doc, self.gap_labels[index].surface);
            }
        }

        // Tooltip above the margin box when there is room, else below.
        let tooltip_text = label::element_label(doc, node);
        doc.set_text(self.tooltip.text, &tooltip_text);
        let margin_top_edge = rect.y - margin.top;
        let tooltip_y = if margin_top_edge > TOOLTIP_HEADROOM {
            margin_top_edge - 24.0
        } else {
            rect.bottom() + margin.bottom + 6.0
        };
        show_at(doc, self.tooltip.surface, Rect::new(rect.x, tooltip_y, 0.0, 0.0));
    }

    /// Hide every surface without destroying the pool.
    pub fn hide_all(&self, doc: &mut Document) {
        for surface in self.surfaces() {
            hide(doc, surface);
        }
    }

    /// Remove every surface from the document. Consumes the pool: a new
    /// session mounts a fresh one.
    pub fn teardown(self, doc: &mut Document) {
        for surface in self.surfaces() {
            doc.remove(surface);
        }
    }

    /// All pooled surface elements (text children excluded; they belong
    /// to their surfaces and are removed with them).
    pub fn surfaces(&self) -> Vec<NodeId> {
        let mut surfaces = vec![self.margin_layer, self.box_layer, self.content_layer];
        surfaces.extend(self.margin_labels.iter().map(|label| label.surface));
        surfaces.extend(self.padding_labels.iter().map(|label| label.surface));
        surfaces.extend(self.gap_strips.iter().copied());
        surfaces.extend(self.gap_labels.iter().map(|label| label.surface));
        surfaces.push(self.tooltip.surface);
        surfaces
    }

    #[inline]
    pub fn margin_layer(&self) -> NodeId {
        self.margin_layer
    }

    #[inline]
    pub fn content_layer(&self) -> NodeId {
        self.content_layer
    }

    #[inline]
    pub fn tooltip_surface(&self) -> NodeId {
        self.tooltip.surface
    }

    /// The nth gap strip of the pool.
    pub fn gap_strip(&self, index: usize) -> Option<NodeId> {
        self.gap_strips.get(index).copied()
    }

    /// The [top, right, bottom, left] margin label surfaces.
    pub fn margin_label_surfaces(&self) -> [NodeId; 4] {
        self.margin_labels.map(|label| label.surface)
    }
}

/// The single-rect highlight used while hovering breadcrumb segments.
/// Created lazily on first show, removed on clear.
#[derive(Debug, Default)]
pub struct Highlight {
    surface: Option<NodeId>,
}

impl Highlight {
    pub fn new() -> Self {
        Self::default()
    }

    /// Outline the element's border box.
    pub fn show(&mut self, doc: &mut Document, node: NodeId) {
        let surface = match self.surface {
            Some(existing) if doc.is_attached(existing) => existing,
            _ => {
                let parent = doc.body().unwrap_or_else(|| doc.root());
                let created = create_surface(doc, parent, HIGHLIGHT_FILL);
                doc.set_inline(created, "border", HIGHLIGHT_BORDER);
                doc.set_inline(created, "border-radius", "2px");
                doc.set_inline(created, "transition", BOX_TRANSITION);
                self.surface = Some(created);
                created
            }
        };
        let rect = doc.rect(node);
        show_at(doc, surface, rect);
    }

    /// Remove the highlight surface, if it exists.
    pub fn clear(&mut self, doc: &mut Document) {
        if let Some(surface) = self.surface.take() {
            doc.remove(surface);
        }
    }
}
