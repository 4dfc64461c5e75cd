//! Gap rectangles between flex/grid children.
//!
//! Children are clustered into visual rows by top-edge proximity, then the
//! unoccupied strips between facing edges are emitted: horizontal strips
//! inside a row for the column gap, one full-content-width strip between
//! consecutive rows for the row gap.

use crate::parse_px;
use loupe_dom::{Document, NodeId, Rect};
use smallvec::SmallVec;

/// Emission threshold in pixels. Anti-aliased overlap can leave sub-half-
/// pixel slivers between adjacent rects that are not real gaps.
const MIN_GAP: f32 = 0.5;

fn is_gap_container(display: &str) -> bool {
    matches!(display, "flex" | "grid" | "inline-flex" | "inline-grid")
}

/// Row-clustering tolerance: two children share a row when their top edges
/// differ by less than `max(2, 0.3 × height of the row's first child)`.
/// A heuristic, not a layout-correct partition: it absorbs sub-pixel
/// rounding while still separating genuinely different rows.
fn row_tolerance(first_in_row: &Rect) -> f32 {
    (first_in_row.height * 0.3).max(2.0)
}

/// Direct children that participate in the container's layout.
fn laid_out_children(doc: &Document, node: NodeId) -> Vec<Rect> {
    doc.child_elements(node)
        .filter(|child| {
            let display = doc.resolved(*child, "display").unwrap_or("block");
            let position = doc.resolved(*child, "position").unwrap_or("static");
            display != "none" && position != "absolute" && position != "fixed"
        })
        .map(|child| doc.rect(child))
        .collect()
}

/// Compute the transient gap rectangles for a flex/grid container.
///
/// Returns an empty list for non-flex/grid displays, when both resolved
/// axis gaps are zero, or when fewer than two children are laid out.
/// Column-gap strips are emitted only when the resolved column gap is
/// non-zero; row-gap strips only when the resolved row gap is non-zero.
pub fn compute_gap_rectangles(doc: &Document, node: NodeId, content_box: Rect) -> Vec<Rect> {
    let display = doc.resolved(node, "display").unwrap_or_default();
    if !is_gap_container(display) {
        return Vec::new();
    }

    let row_gap = doc
        .resolved(node, "row-gap")
        .and_then(parse_px)
        .unwrap_or(0.0);
    let column_gap = doc
        .resolved(node, "column-gap")
        .and_then(parse_px)
        .unwrap_or(0.0);
    if row_gap <= 0.0 && column_gap <= 0.0 {
        return Vec::new();
    }

    let mut child_rects = laid_out_children(doc, node);
    if child_rects.len() < 2 {
        return Vec::new();
    }

    // Cluster into visual rows by top-edge proximity.
    child_rects.sort_by(|first, second| {
        first
            .y
            .total_cmp(&second.y)
            .then(first.x.total_cmp(&second.x))
    });
    let mut rows: Vec<SmallVec<Rect, 8>> = Vec::new();
    for rect in child_rects {
        match rows.last_mut() {
            Some(row) if (rect.y - row[0].y).abs() < row_tolerance(&row[0]) => row.push(rect),
            _ => rows.push(SmallVec::from_iter([rect])),
        }
    }

    let mut result = Vec::new();

    // Horizontal strips between facing edges inside each row.
    if column_gap > 0.0 {
        for row in &mut rows {
            row.sort_by(|first, second| first.x.total_cmp(&second.x));
            let row_top = row.iter().map(|rect| rect.y).fold(f32::MAX, f32::min);
            let row_bottom = row
                .iter()
                .map(Rect::bottom)
                .fold(f32::MIN, f32::max);
            for pair in row.windows(2) {
                let gap_width = pair[1].x - pair[0].right();
                if gap_width > MIN_GAP {
                    result.push(Rect::new(
                        pair[0].right(),
                        row_top,
                        gap_width,
                        row_bottom - row_top,
                    ));
                }
            }
        }
    }

    // One full-width strip between consecutive rows.
    if row_gap > 0.0 && rows.len() > 1 {
        for pair in rows.windows(2) {
            let row_bottom = pair[0]
                .iter()
                .map(Rect::bottom)
                .fold(f32::MIN, f32::max);
            let next_top = pair[1].iter().map(|rect| rect.y).fold(f32::MAX, f32::min);
            let gap_height = next_top - row_bottom;
            if gap_height > MIN_GAP {
                result.push(Rect::new(
                    content_box.x,
                    row_bottom,
                    content_box.width,
                    gap_height,
                ));
            }
        }
    }

    result
}
