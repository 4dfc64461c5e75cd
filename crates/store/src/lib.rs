//! The cross-element style-override store.
//!
//! One entry per edited element: the property values observed when the
//! element was first selected ("original", snapshotted once) and the
//! overrides applied since. "Changed" always means the override string
//! differs from the original string; a property written back to its
//! original value stays in the map but counts for nothing.
//!
//! Lifecycle: an entry is created on first selection, survives navigation
//! away while it has real changes, and is garbage-collected when the user
//! leaves it untouched. Entries never keep an element alive: they are keyed
//! by arena ids and pruned once the element is detached.

use log::debug;
use loupe_dom::{Document, NodeId};
use std::collections::HashMap;

mod property;
mod revision;

pub use property::{PropertyGroup, TrackedProperty};
pub use revision::{Revision, RevisionCounter};

/// One property's real difference between first-observed and current value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyChange {
    pub property: TrackedProperty,
    pub before: String,
    pub after: String,
}

/// Every real change on one element, in property declaration order.
#[derive(Debug, Clone)]
pub struct ElementChanges {
    pub node: NodeId,
    pub changes: Vec<PropertyChange>,
}

/// Original snapshot plus current overrides for one element.
#[derive(Debug, Clone, Default)]
pub struct StyleEntry {
    original: HashMap<TrackedProperty, String>,
    overrides: HashMap<TrackedProperty, String>,
}

impl StyleEntry {
    /// Snapshot the element's currently-resolved value for every tracked
    /// property. Absent properties snapshot as the empty string.
    fn snapshot(doc: &Document, node: NodeId) -> Self {
        let mut original = HashMap::with_capacity(TrackedProperty::ALL.len());
        for property in TrackedProperty::ALL {
            let value = doc.resolved(node, property.name()).unwrap_or_default();
            original.insert(property, value.to_owned());
        }
        Self {
            original,
            overrides: HashMap::new(),
        }
    }

    pub fn original(&self, property: TrackedProperty) -> Option<&str> {
        self.original.get(&property).map(String::as_str)
    }

    pub fn override_value(&self, property: TrackedProperty) -> Option<&str> {
        self.overrides.get(&property).map(String::as_str)
    }

    /// Whether the property's current override differs from its original.
    fn is_changed(&self, property: TrackedProperty, value: &str) -> bool {
        self.original(property) != Some(value)
    }

    /// Count of overrides whose value differs from the original.
    pub fn change_count(&self) -> usize {
        self.overrides
            .iter()
            .filter(|(property, value)| self.is_changed(**property, value))
            .count()
    }

    /// The real changes, ordered by property declaration order.
    pub fn changes(&self) -> Vec<PropertyChange> {
        let mut changes: Vec<PropertyChange> = self
            .overrides
            .iter()
            .filter(|(property, value)| self.is_changed(**property, value))
            .map(|(property, value)| PropertyChange {
                property: *property,
                before: self.original(*property).unwrap_or_default().to_owned(),
                after: value.clone(),
            })
            .collect();
        changes.sort_by_key(|change| change.property);
        changes
    }
}

/// The store proper: entries for every element edited this session, plus
/// the current editing selection.
#[derive(Debug, Default)]
pub struct OverrideStore {
    /// Insertion-ordered so change reports are deterministic. The store
    /// holds a handful of entries at most; linear lookup is fine.
    entries: Vec<(NodeId, StyleEntry)>,
    selected: Option<NodeId>,
    revision: RevisionCounter,
}

impl OverrideStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The element currently selected for editing, if any.
    #[inline]
    pub fn selected(&self) -> Option<NodeId> {
        self.selected
    }

    /// Stamp of the last mutation; consumers recompute when it moves.
    #[inline]
    pub fn revision(&self) -> Revision {
        self.revision.current()
    }

    pub fn entry(&self, node: NodeId) -> Option<&StyleEntry> {
        self.entries
            .iter()
            .find(|(entry_node, _)| *entry_node == node)
            .map(|(_, entry)| entry)
    }

    fn entry_mut(&mut self, node: NodeId) -> Option<&mut StyleEntry> {
        self.entries
            .iter_mut()
            .find(|(entry_node, _)| *entry_node == node)
            .map(|(_, entry)| entry)
    }

    fn remove_entry(&mut self, node: NodeId) {
        self.entries.retain(|(entry_node, _)| *entry_node != node);
    }

    /// Number of entries currently held (elements visited with an editor).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Switch the editing selection.
    ///
    /// Leaving an element whose entry has zero real changes deletes that
    /// entry, so casual browsing does not grow the store. Selecting an
    /// element that already has an entry leaves the entry untouched, so
    /// the original snapshot survives re-selection. Selecting the current
    /// selection again is a no-op.
    pub fn select(&mut self, doc: &Document, node: Option<NodeId>) {
        if self.selected == node {
            return;
        }
        if let Some(previous) = self.selected {
            let untouched = self
                .entry(previous)
                .is_some_and(|entry| entry.change_count() == 0);
            if untouched {
                debug!("dropping no-op entry for departed element");
                self.remove_entry(previous);
            }
        }
        self.selected = node;
        if let Some(new_node) = node
            && self.entry(new_node).is_none()
        {
            self.entries
                .push((new_node, StyleEntry::snapshot(doc, new_node)));
        }
    }

    /// The value the editor should display: the current override if
    /// present, else the original snapshot, else the empty string.
    pub fn get_value(&self, property: TrackedProperty) -> &str {
        let Some(entry) = self.selected.and_then(|node| self.entry(node)) else {
            return "";
        };
        entry
            .override_value(property)
            .or_else(|| entry.original(property))
            .unwrap_or_default()
    }

    /// Apply `value` as an inline override on the selected element and
    /// record it. No-op without a selection. The value is applied
    /// verbatim; validation is explicitly not this layer's job.
    pub fn set_value(&mut self, doc: &mut Document, property: TrackedProperty, value: &str) {
        let Some(node) = self.selected else {
            return;
        };
        doc.set_inline(node, property.name(), value);
        if let Some(entry) = self.entry_mut(node) {
            entry.overrides.insert(property, value.to_owned());
            self.revision.increment();
        }
    }

    /// Clear every override on the selected element and re-baseline: the
    /// element's post-reset resolved style becomes the new original.
    pub fn reset_current(&mut self, doc: &mut Document) {
        let Some(node) = self.selected else {
            return;
        };
        let overridden: Vec<TrackedProperty> = match self.entry(node) {
            Some(entry) => entry.overrides.keys().copied().collect(),
            None => return,
        };
        for property in overridden {
            doc.clear_inline(node, property.name());
        }
        let fresh = StyleEntry::snapshot(doc, node);
        if let Some(entry) = self.entry_mut(node) {
            *entry = fresh;
        }
        self.revision.increment();
    }

    /// Reset every entry in the store, then clear it. The selected
    /// element, if any, gets a fresh baseline entry so editing can
    /// continue seamlessly.
    pub fn reset_all(&mut self, doc: &mut Document) {
        for (node, entry) in std::mem::take(&mut self.entries) {
            for property in entry.overrides.keys() {
                doc.clear_inline(node, property.name());
            }
        }
        if let Some(node) = self.selected {
            self.entries.push((node, StyleEntry::snapshot(doc, node)));
        }
        self.revision.increment();
    }

    /// Every entry with at least one real change, in entry insertion
    /// order. Zero-change entries are excluded but not deleted: this is a
    /// read-only view.
    pub fn list_changes(&self) -> Vec<ElementChanges> {
        self.entries
            .iter()
            .filter_map(|(node, entry)| {
                let changes = entry.changes();
                (!changes.is_empty()).then_some(ElementChanges {
                    node: *node,
                    changes,
                })
            })
            .collect()
    }

    /// Sum of real changes across every entry. Zero means the change
    /// summary UI stays hidden.
    pub fn total_change_count(&self) -> usize {
        self.entries
            .iter()
            .map(|(_, entry)| entry.change_count())
            .sum()
    }

    /// Drop entries whose element is no longer attached to the document.
    /// The embedder calls this after DOM mutations (or periodically) so
    /// the store never outlives the page's own retention.
    pub fn prune_detached(&mut self, doc: &Document) {
        let before = self.entries.len();
        self.entries.retain(|(node, _)| doc.is_attached(*node));
        if let Some(node) = self.selected
            && !doc.is_attached(node)
        {
            self.selected = None;
        }
        if self.entries.len() != before {
            debug!(
                "pruned {} entries for detached elements",
                before - self.entries.len()
            );
            self.revision.increment();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use loupe_dom::Rect;

    fn doc_with_styled_div() -> (Document, NodeId) {
        let mut doc = Document::new();
        let root = doc.root();
        let html = doc.create_element(root, "html");
        let body = doc.create_element(html, "body");
        let node = doc.create_element(body, "div");
        doc.set_rect(node, Rect::new(0.0, 0.0, 100.0, 100.0));
        doc.set_computed(node, "color", "rgb(0, 0, 0)");
        doc.set_computed(node, "display", "block");
        (doc, node)
    }

    #[test]
    fn first_selection_snapshots_originals_once() {
        let (mut doc, node) = doc_with_styled_div();
        let mut store = OverrideStore::new();
        store.select(&doc, Some(node));
        assert_eq!(store.get_value(TrackedProperty::Color), "rgb(0, 0, 0)");

        // Mutating the document after the snapshot must not move the
        // original: it was captured once.
        doc.set_computed(node, "color", "rgb(9, 9, 9)");
        store.select(&doc, Some(node));
        let entry = store.entry(node);
        assert_eq!(
            entry.and_then(|found| found.original(TrackedProperty::Color)),
            Some("rgb(0, 0, 0)")
        );
    }

    #[test]
    fn override_equal_to_original_is_not_a_change() {
        let (mut doc, node) = doc_with_styled_div();
        let mut store = OverrideStore::new();
        store.select(&doc, Some(node));
        store.set_value(&mut doc, TrackedProperty::Color, "rgb(0, 0, 0)");
        assert_eq!(store.total_change_count(), 0);
        // The override stays present in the entry regardless.
        assert_eq!(
            store
                .entry(node)
                .and_then(|entry| entry.override_value(TrackedProperty::Color)),
            Some("rgb(0, 0, 0)")
        );
        store.set_value(&mut doc, TrackedProperty::Color, "rgb(255, 0, 0)");
        assert_eq!(store.total_change_count(), 1);
    }

    #[test]
    fn set_value_applies_inline_to_the_live_element() {
        let (mut doc, node) = doc_with_styled_div();
        let mut store = OverrideStore::new();
        store.select(&doc, Some(node));
        store.set_value(&mut doc, TrackedProperty::Display, "flex");
        assert_eq!(doc.resolved(node, "display"), Some("flex"));
    }

    #[test]
    fn leaving_a_clean_element_drops_its_entry() {
        let (mut doc, node) = doc_with_styled_div();
        let root = doc.root();
        let other = doc.create_element(root, "span");
        let mut store = OverrideStore::new();

        store.select(&doc, Some(node));
        assert_eq!(store.len(), 1);
        store.select(&doc, Some(other));
        assert_eq!(store.len(), 1, "clean entry should have been dropped");
        assert!(store.entry(node).is_none());
    }

    #[test]
    fn leaving_a_dirty_element_keeps_its_entry() {
        let (mut doc, node) = doc_with_styled_div();
        let root = doc.root();
        let other = doc.create_element(root, "span");
        let mut store = OverrideStore::new();

        store.select(&doc, Some(node));
        store.set_value(&mut doc, TrackedProperty::Color, "rgb(255, 0, 0)");
        store.select(&doc, Some(other));
        assert_eq!(store.len(), 2);
        assert!(store.entry(node).is_some());
    }

    #[test]
    fn reset_current_rebaselines_to_post_reset_style() {
        let (mut doc, node) = doc_with_styled_div();
        let mut store = OverrideStore::new();
        store.select(&doc, Some(node));
        store.set_value(&mut doc, TrackedProperty::Color, "rgb(255, 0, 0)");

        store.reset_current(&mut doc);
        // Inline override cleared from the element.
        assert_eq!(doc.resolved(node, "color"), Some("rgb(0, 0, 0)"));
        // Fresh baseline, zero changes.
        assert_eq!(store.total_change_count(), 0);
        assert!(store.list_changes().is_empty());
        assert_eq!(store.get_value(TrackedProperty::Color), "rgb(0, 0, 0)");
    }

    #[test]
    fn reset_all_clears_every_element_and_the_store() {
        let (mut doc, node) = doc_with_styled_div();
        let root = doc.root();
        let other = doc.create_element(root, "span");
        doc.set_computed(other, "opacity", "1");
        let mut store = OverrideStore::new();

        store.select(&doc, Some(node));
        store.set_value(&mut doc, TrackedProperty::Color, "rgb(255, 0, 0)");
        store.select(&doc, Some(other));
        store.set_value(&mut doc, TrackedProperty::Opacity, "0.5");

        store.reset_all(&mut doc);
        assert_eq!(doc.resolved(node, "color"), Some("rgb(0, 0, 0)"));
        assert_eq!(doc.resolved(other, "opacity"), Some("1"));
        assert_eq!(store.total_change_count(), 0);
        // The selected element keeps a fresh entry for continued editing.
        assert_eq!(store.len(), 1);
        assert!(store.entry(other).is_some());
    }

    #[test]
    fn total_change_count_sums_across_entries() {
        let (mut doc, node) = doc_with_styled_div();
        let root = doc.root();
        let other = doc.create_element(root, "span");
        let mut store = OverrideStore::new();

        store.select(&doc, Some(node));
        store.set_value(&mut doc, TrackedProperty::Color, "rgb(255, 0, 0)");
        store.set_value(&mut doc, TrackedProperty::Opacity, "0.5");
        store.select(&doc, Some(other));
        store.set_value(&mut doc, TrackedProperty::Display, "flex");

        assert_eq!(store.total_change_count(), 3);
        let report = store.list_changes();
        let per_element: Vec<usize> = report.iter().map(|entry| entry.changes.len()).collect();
        assert_eq!(per_element, vec![2, 1]);
    }

    #[test]
    fn operations_without_selection_are_no_ops() {
        let (mut doc, _) = doc_with_styled_div();
        let mut store = OverrideStore::new();
        store.set_value(&mut doc, TrackedProperty::Color, "red");
        store.reset_current(&mut doc);
        assert_eq!(store.get_value(TrackedProperty::Color), "");
        assert_eq!(store.total_change_count(), 0);
        assert!(store.is_empty());
    }

    #[test]
    fn revision_moves_on_mutation_only() {
        let (mut doc, node) = doc_with_styled_div();
        let mut store = OverrideStore::new();
        let at_start = store.revision();
        store.select(&doc, Some(node));
        assert_eq!(store.revision(), at_start);
        store.set_value(&mut doc, TrackedProperty::Color, "red");
        assert!(store.revision().is_newer_than(at_start));
        let after_set = store.revision();
        let _ = store.list_changes();
        let _ = store.total_change_count();
        assert_eq!(store.revision(), after_set);
    }

    #[test]
    fn prune_detached_drops_only_detached_entries() {
        let (mut doc, node) = doc_with_styled_div();
        let root = doc.root();
        let other = doc.create_element(root, "span");
        let mut store = OverrideStore::new();

        store.select(&doc, Some(node));
        store.set_value(&mut doc, TrackedProperty::Color, "red");
        store.select(&doc, Some(other));
        store.set_value(&mut doc, TrackedProperty::Opacity, "0.5");

        doc.remove(node);
        store.prune_detached(&doc);
        assert_eq!(store.len(), 1);
        assert!(store.entry(node).is_none());
        assert!(store.entry(other).is_some());
        assert_eq!(store.selected(), Some(other));

        doc.remove(other);
        store.prune_detached(&doc);
        assert!(store.is_empty());
        assert_eq!(store.selected(), None);
    }
}
