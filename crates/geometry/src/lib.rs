//! Geometry engine: margin/border/padding/content boxes and flex/grid gap
//! rectangles, read fresh from the live document on every call.
//!
//! Nothing here caches. The page reflows between pointer moves, so a stale
//! metric is worse than a recomputed one; every function is a pure read of
//! the document's current state.

use loupe_dom::{Document, NodeId, Rect};

mod gaps;

pub use gaps::compute_gap_rectangles;

/// Per-side pixel sizes for one box edge (margin, padding, or border).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Edges {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Edges {
    /// The four values in overlay label order: top, right, bottom, left.
    #[inline]
    pub const fn as_trbl(&self) -> [f32; 4] {
        [self.top, self.right, self.bottom, self.left]
    }
}

/// A snapshot of one element's box model in device pixels. Derived, never
/// stored: recompute whenever the element is shown.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BoxMetrics {
    /// The border box as laid out.
    pub rect: Rect,
    pub margin: Edges,
    pub padding: Edges,
    pub border: Edges,
}

impl BoxMetrics {
    /// The border box expanded by margins.
    pub fn margin_box(&self) -> Rect {
        Rect::new(
            self.rect.x - self.margin.left,
            self.rect.y - self.margin.top,
            self.rect.width + self.margin.left + self.margin.right,
            self.rect.height + self.margin.top + self.margin.bottom,
        )
    }

    /// The border box shrunk by border and padding, clamped non-negative.
    pub fn content_box(&self) -> Rect {
        let width = self.rect.width
            - self.border.left
            - self.border.right
            - self.padding.left
            - self.padding.right;
        let height = self.rect.height
            - self.border.top
            - self.border.bottom
            - self.padding.top
            - self.padding.bottom;
        Rect::new(
            self.rect.x + self.border.left + self.padding.left,
            self.rect.y + self.border.top + self.padding.top,
            width.max(0.0),
            height.max(0.0),
        )
    }
}

/// Parse a resolved length into pixels. `auto`, `none`, and anything
/// unparseable yield `None`; unitless numbers are taken as pixels.
pub fn parse_px(input: &str) -> Option<f32> {
    let trimmed = input.trim();
    if trimmed.eq_ignore_ascii_case("auto") || trimmed.eq_ignore_ascii_case("none") {
        return None;
    }
    if let Some(px_suffix_str) = trimmed.strip_suffix("px") {
        return px_suffix_str.trim().parse::<f32>().ok();
    }
    trimmed.parse::<f32>().ok()
}

/// A resolved length in pixels, defaulting to 0 when the property is absent
/// or unparseable. Box-edge reads want the lenient default.
fn resolved_px(doc: &Document, node: NodeId, property: &str) -> f32 {
    doc.resolved(node, property)
        .and_then(parse_px)
        .unwrap_or(0.0)
}

/// Read one edge set from its four longhand properties.
fn resolved_edges(doc: &Document, node: NodeId, format: impl Fn(&str) -> String) -> Edges {
    Edges {
        top: resolved_px(doc, node, &format("top")),
        right: resolved_px(doc, node, &format("right")),
        bottom: resolved_px(doc, node, &format("bottom")),
        left: resolved_px(doc, node, &format("left")),
    }
}

/// Compute the element's current box metrics from its layout rect and the
/// resolved margin/padding/border longhands.
pub fn compute_box_metrics(doc: &Document, node: NodeId) -> BoxMetrics {
    BoxMetrics {
        rect: doc.rect(node),
        margin: resolved_edges(doc, node, |side| format!("margin-{side}")),
        padding: resolved_edges(doc, node, |side| format!("padding-{side}")),
        border: resolved_edges(doc, node, |side| format!("border-{side}-width")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_px_handles_suffix_unitless_and_keywords() {
        assert_eq!(parse_px("12px"), Some(12.0));
        assert_eq!(parse_px(" 7.5px "), Some(7.5));
        assert_eq!(parse_px("3"), Some(3.0));
        assert_eq!(parse_px("auto"), None);
        assert_eq!(parse_px("none"), None);
        assert_eq!(parse_px("calc(1px + 2px)"), None);
    }

    #[test]
    fn metrics_default_missing_edges_to_zero() {
        let mut doc = Document::new();
        let root = doc.root();
        let node = doc.create_element(root, "div");
        doc.set_rect(node, Rect::new(100.0, 50.0, 200.0, 80.0));
        doc.set_computed(node, "margin-top", "10px");
        doc.set_computed(node, "padding-left", "4px");
        doc.set_computed(node, "border-top-width", "oops");

        let metrics = compute_box_metrics(&doc, node);
        assert_eq!(metrics.margin.top, 10.0);
        assert_eq!(metrics.margin.bottom, 0.0);
        assert_eq!(metrics.padding.left, 4.0);
        assert_eq!(metrics.border.top, 0.0);
    }

    #[test]
    fn margin_and_content_boxes_derive_from_edges() {
        let metrics = BoxMetrics {
            rect: Rect::new(100.0, 100.0, 200.0, 100.0),
            margin: Edges {
                top: 10.0,
                right: 20.0,
                bottom: 10.0,
                left: 20.0,
            },
            padding: Edges {
                top: 5.0,
                right: 5.0,
                bottom: 5.0,
                left: 5.0,
            },
            border: Edges {
                top: 1.0,
                right: 1.0,
                bottom: 1.0,
                left: 1.0,
            },
        };
        let margin_box = metrics.margin_box();
        assert_eq!(margin_box, Rect::new(80.0, 90.0, 240.0, 120.0));
        let content = metrics.content_box();
        assert_eq!(content, Rect::new(106.0, 106.0, 188.0, 88.0));
    }

    #[test]
    fn content_box_clamps_to_zero() {
        let metrics = BoxMetrics {
            rect: Rect::new(0.0, 0.0, 10.0, 10.0),
            padding: Edges {
                top: 8.0,
                right: 8.0,
                bottom: 8.0,
                left: 8.0,
            },
            ..BoxMetrics::default()
        };
        let content = metrics.content_box();
        assert_eq!(content.width, 0.0);
        assert_eq!(content.height, 0.0);
    }
}
