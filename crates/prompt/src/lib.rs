//! Serializes the override store's accumulated diffs into a text block a
//! human (or an LLM applying the edits to source) can read.
//!
//! One paragraph per changed element: an identifier (the element's first
//! line of visible text when it has one, else its ancestor path) followed
//! by indented `property: before → after` lines. Elements whose overrides
//! all match their originals produce nothing; a session with no real
//! changes produces the empty string.

use loupe_dom::{Document, label};
use loupe_store::ElementChanges;

mod color;

pub use color::{humanize_value, parse_css_color, to_hex};

/// Fixed instructional preamble for the hand-off text.
const PREAMBLE: &str = "I tweaked styles in the browser, please apply them to the source. \
     DOM classes may not match source directly (could be Tailwind, CSS modules, components, etc).";

/// Longest text snippet used as an element identifier.
const SNIPPET_LEN: usize = 40;

fn element_block(doc: &Document, entry: &ElementChanges) -> Option<String> {
    if entry.changes.is_empty() {
        return None;
    }
    let path = label::ancestor_path(doc, entry.node, label::DEFAULT_MAX_DEPTH).join(" > ");
    let snippet = label::text_snippet(doc, entry.node, SNIPPET_LEN);
    let mut block = if snippet.is_empty() {
        path
    } else {
        format!("\"{snippet}\" ({path})")
    };
    for change in &entry.changes {
        let before = if change.before.is_empty() {
            "unset".to_owned()
        } else {
            humanize_value(&change.before)
        };
        let after = humanize_value(&change.after);
        block.push_str(&format!(
            "\n  {}: {} → {}",
            change.property.name(),
            before,
            after
        ));
    }
    Some(block)
}

/// Build the hand-off prompt from the store's change list. Empty string
/// when no element has a real change.
pub fn build_prompt(doc: &Document, entries: &[ElementChanges]) -> String {
    let blocks: Vec<String> = entries
        .iter()
        .filter_map(|entry| element_block(doc, entry))
        .collect();
    if blocks.is_empty() {
        return String::new();
    }
    format!("{PREAMBLE}\n\n{}", blocks.join("\n\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use loupe_dom::NodeId;
    use loupe_store::{OverrideStore, TrackedProperty};

    fn page_with_hero() -> (Document, NodeId) {
        let mut doc = Document::new();
        let root = doc.root();
        let html = doc.create_element(root, "html");
        let body = doc.create_element(html, "body");
        let hero = doc.create_element(body, "div");
        doc.set_attribute(hero, "id", "hero");
        doc.set_computed(hero, "color", "rgb(0, 0, 0)");
        (doc, hero)
    }

    #[test]
    fn no_real_changes_yield_the_empty_string() {
        let (mut doc, hero) = page_with_hero();
        let mut store = OverrideStore::new();
        store.select(&doc, Some(hero));
        store.set_value(&mut doc, TrackedProperty::Color, "rgb(0, 0, 0)");
        assert_eq!(build_prompt(&doc, &store.list_changes()), "");
    }

    #[test]
    fn color_changes_are_reported_in_hex() {
        let (mut doc, hero) = page_with_hero();
        let mut store = OverrideStore::new();
        store.select(&doc, Some(hero));
        store.set_value(&mut doc, TrackedProperty::Color, "rgb(255, 0, 0)");

        let prompt = build_prompt(&doc, &store.list_changes());
        assert!(prompt.contains("color: #000000 → #ff0000"));
        assert!(prompt.starts_with(PREAMBLE));
    }

    #[test]
    fn identifier_prefers_text_snippet_with_path() {
        let (mut doc, hero) = page_with_hero();
        doc.create_text(hero, "Welcome aboard");
        let mut store = OverrideStore::new();
        store.select(&doc, Some(hero));
        store.set_value(&mut doc, TrackedProperty::Opacity, "0.5");

        let prompt = build_prompt(&doc, &store.list_changes());
        assert!(prompt.contains("\"Welcome aboard\" (body > div#hero)"));
    }

    #[test]
    fn identifier_falls_back_to_the_path() {
        let (mut doc, hero) = page_with_hero();
        let mut store = OverrideStore::new();
        store.select(&doc, Some(hero));
        store.set_value(&mut doc, TrackedProperty::Opacity, "0.5");

        let prompt = build_prompt(&doc, &store.list_changes());
        assert!(prompt.contains("body > div#hero\n  opacity:"));
    }

    #[test]
    fn unset_originals_read_as_unset() {
        let (mut doc, hero) = page_with_hero();
        let mut store = OverrideStore::new();
        store.select(&doc, Some(hero));
        store.set_value(&mut doc, TrackedProperty::BoxShadow, "rgba(0, 0, 0, 0.25) 0px 2px 8px");

        let prompt = build_prompt(&doc, &store.list_changes());
        assert!(
            prompt.contains("box-shadow: unset → #000000 (opacity 25%) 0px 2px 8px"),
            "got: {prompt}"
        );
    }
}
