//! Human-readable element labels and ancestor paths.
//!
//! Labels feed the hover tooltip, the breadcrumb, and the change report.
//! Tool surfaces never appear in a path: the inspector must not describe
//! its own chrome.

use crate::{Document, NodeId};

/// Longest class token still considered a human-chosen name. Utility-class
/// soup (Tailwind arbitrary values, responsive prefixes) runs longer or
/// carries `[`, `/`, `:` and is skipped.
const MEANINGFUL_CLASS_MAX: usize = 24;

/// Ancestors collected into a path unless the caller asks otherwise.
pub const DEFAULT_MAX_DEPTH: usize = 4;

/// Tooltip label: `<tag>#id.class1.class2` with at most two classes.
pub fn element_label(doc: &Document, node: NodeId) -> String {
    let tag = doc.tag(node).unwrap_or_default();
    let mut label = format!("<{tag}>");
    if let Some(id) = doc.id(node) {
        label.push('#');
        label.push_str(id);
    }
    for class in doc.class_tokens(node).take(2) {
        label.push('.');
        label.push_str(class);
    }
    label
}

/// Short label for one path segment: prefer `tag#id`, else
/// `tag.firstMeaningfulClass`, else the bare tag.
pub fn short_label(doc: &Document, node: NodeId) -> String {
    let tag = doc.tag(node).unwrap_or_default();
    if let Some(id) = doc.id(node) {
        return format!("{tag}#{id}");
    }
    let meaningful = doc.class_tokens(node).find(|class| {
        !class.contains('[')
            && !class.contains('/')
            && !class.contains(':')
            && class.len() < MEANINGFUL_CLASS_MAX
    });
    match meaningful {
        Some(class) => format!("{tag}.{class}"),
        None => tag.to_owned(),
    }
}

/// Walk parent links from `node` upward, collecting short labels for up to
/// `max_depth` qualifying ancestors. Tool surfaces are skipped, the document
/// element is excluded, and the result is ordered root-most first with the
/// node itself last.
pub fn ancestor_path(doc: &Document, node: NodeId, max_depth: usize) -> Vec<String> {
    let document_element = doc.document_element();
    let mut parts = Vec::new();
    let mut current = Some(node);
    while let Some(step) = current {
        if Some(step) == document_element || !doc.is_element(step) || parts.len() >= max_depth {
            break;
        }
        if !doc.in_tool_surface(step) {
            parts.push(short_label(doc, step));
        }
        current = doc.parent_element(step);
    }
    parts.reverse();
    parts
}

/// The subtree's text runs in document order, newline-joined.
pub fn visible_text(doc: &Document, node: NodeId) -> String {
    let mut lines = Vec::new();
    collect_text(doc, node, &mut lines);
    lines.join("\n")
}

fn collect_text(doc: &Document, node: NodeId, lines: &mut Vec<String>) {
    if let Some(text) = doc.text(node) {
        let trimmed = text.trim();
        if !trimmed.is_empty() {
            lines.push(trimmed.to_owned());
        }
    }
    for child in doc.children(node).collect::<Vec<_>>() {
        collect_text(doc, child, lines);
    }
}

/// First line of the subtree's visible text, truncated to `max_len` chars
/// with an ellipsis. Empty when the element has no text at all.
pub fn text_snippet(doc: &Document, node: NodeId, max_len: usize) -> String {
    let text = visible_text(doc, node);
    let first_line = text.lines().next().unwrap_or_default().trim();
    if first_line.chars().count() > max_len {
        let truncated: String = first_line.chars().take(max_len).collect();
        format!("{truncated}…")
    } else {
        first_line.to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Document;

    #[test]
    fn short_label_prefers_id_then_meaningful_class() {
        let mut doc = Document::new();
        let root = doc.root();
        let html = doc.create_element(root, "html");
        let with_id = doc.create_element(html, "section");
        doc.set_attribute(with_id, "id", "hero");
        doc.set_attribute(with_id, "class", "container");
        assert_eq!(short_label(&doc, with_id), "section#hero");

        let with_class = doc.create_element(html, "div");
        doc.set_attribute(with_class, "class", "md:flex w-[320px] card");
        assert_eq!(short_label(&doc, with_class), "div.card");

        let bare = doc.create_element(html, "p");
        doc.set_attribute(bare, "class", "hover:underline");
        assert_eq!(short_label(&doc, bare), "p");
    }

    #[test]
    fn ancestor_path_ends_at_node_and_respects_depth() {
        let mut doc = Document::new();
        let root = doc.root();
        let html = doc.create_element(root, "html");
        let body = doc.create_element(html, "body");
        let outer = doc.create_element(body, "div");
        let hero = doc.create_element(outer, "div");
        doc.set_attribute(hero, "id", "hero");

        let path = ancestor_path(&doc, hero, 4);
        assert!(path.len() <= 4);
        assert_eq!(path.last().map(String::as_str), Some("div#hero"));
        assert_eq!(path.first().map(String::as_str), Some("body"));
    }

    #[test]
    fn ancestor_path_skips_tool_surfaces() {
        let mut doc = Document::new();
        let root = doc.root();
        let html = doc.create_element(root, "html");
        let body = doc.create_element(html, "body");
        let host = doc.create_element(body, "div");
        doc.mark_tool_surface(host);
        let inside = doc.create_element(host, "button");

        let path = ancestor_path(&doc, inside, 4);
        assert_eq!(path, vec!["body".to_owned()]);
    }

    #[test]
    fn text_snippet_takes_first_line_and_truncates() {
        let mut doc = Document::new();
        let root = doc.root();
        let html = doc.create_element(root, "html");
        let node = doc.create_element(html, "p");
        doc.create_text(node, "  Ship faster with confidence  ");
        doc.create_text(node, "second paragraph");
        assert_eq!(text_snippet(&doc, node, 60), "Ship faster with confidence");
        assert_eq!(text_snippet(&doc, node, 4), "Ship…");
    }

    #[test]
    fn element_label_caps_classes_at_two() {
        let mut doc = Document::new();
        let root = doc.root();
        let html = doc.create_element(root, "html");
        let node = doc.create_element(html, "nav");
        doc.set_attribute(node, "id", "menu");
        doc.set_attribute(node, "class", "top sticky wide");
        assert_eq!(element_label(&doc, node), "<nav>#menu.top.sticky");
    }
}
