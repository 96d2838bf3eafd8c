//! Retained, keyed rendering of one dare/truth list.
//!
//! Each on-screen entry owns a [`NodeId`] allocated when it is created. The UI
//! keys every widget of an entry by that id, so an entry that survives a
//! reconciliation keeps its hover, focus and animation state.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::protocol::{Item, ItemKind};
use crate::reconcile::{self, ReconcilePlan};

static NEXT_NODE: AtomicU64 = AtomicU64::new(1);

/// Identity of a rendered entry. Never reused within a process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

impl NodeId {
    fn next() -> Self {
        NodeId(NEXT_NODE.fetch_add(1, Ordering::Relaxed))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedEntry {
    pub node: NodeId,
    pub id: String,
    pub text: String,
}

/// What the per-entry controls ask for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryAction {
    Edit {
        kind: ItemKind,
        id: String,
        old_text: String,
    },
    Delete {
        kind: ItemKind,
        id: String,
    },
}

impl RenderedEntry {
    fn new(item: Item) -> Self {
        Self {
            node: NodeId::next(),
            id: item.id,
            text: item.text,
        }
    }

    pub fn edit_action(&self, kind: ItemKind) -> EntryAction {
        EntryAction::Edit {
            kind,
            id: self.id.clone(),
            old_text: self.text.clone(),
        }
    }

    pub fn delete_action(&self, kind: ItemKind) -> EntryAction {
        EntryAction::Delete {
            kind,
            id: self.id.clone(),
        }
    }
}

/// Summary of one reconciliation pass, mostly for logging.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileStats {
    pub added: usize,
    pub updated: usize,
    pub removed: usize,
    pub duplicates: usize,
}

#[derive(Debug, Clone)]
pub struct EntryList {
    kind: ItemKind,
    entries: Vec<RenderedEntry>,
}

impl EntryList {
    pub fn new(kind: ItemKind) -> Self {
        Self {
            kind,
            entries: Vec::new(),
        }
    }

    pub fn kind(&self) -> ItemKind {
        self.kind
    }

    pub fn entries(&self) -> &[RenderedEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&RenderedEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn node_of(&self, id: &str) -> Option<NodeId> {
        self.get(id).map(|e| e.node)
    }

    /// Bring the list in line with `items` without recreating retained entries.
    ///
    /// Retained entries keep their position; new ones are appended in the
    /// order of `items`.
    pub fn reconcile(&mut self, items: &[Item]) -> ReconcileStats {
        let plan = reconcile::plan(
            self.entries.iter().map(|e| (e.id.as_str(), e.text.as_str())),
            items,
        );
        if plan.duplicates > 0 {
            tracing::warn!(
                kind = %self.kind,
                duplicates = plan.duplicates,
                "authoritative list repeats ids; keeping one entry per id"
            );
        }
        self.apply(plan)
    }

    /// Tear everything down and rebuild from `items`. Every entry gets a new node.
    pub fn replace_all(&mut self, items: &[Item]) -> ReconcileStats {
        let removed = self.entries.len();
        self.entries.clear();
        let plan = reconcile::plan(std::iter::empty::<(&str, &str)>(), items);
        let mut stats = self.apply(plan);
        stats.removed = removed;
        stats
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Perform a plan computed against the current entries.
    pub fn apply(&mut self, plan: ReconcilePlan) -> ReconcileStats {
        let stats = ReconcileStats {
            added: plan.appends.len(),
            updated: plan.updates.len(),
            removed: plan.removals.len(),
            duplicates: plan.duplicates,
        };

        if !plan.updates.is_empty() {
            let positions: HashMap<&str, usize> = self
                .entries
                .iter()
                .enumerate()
                .map(|(i, e)| (e.id.as_str(), i))
                .collect();
            let mut changes: Vec<(usize, String)> = Vec::with_capacity(plan.updates.len());
            for update in plan.updates {
                if let Some(&pos) = positions.get(update.id.as_str()) {
                    changes.push((pos, update.text));
                }
            }
            for (pos, text) in changes {
                self.entries[pos].text = text;
            }
        }

        if !plan.removals.is_empty() {
            let gone: HashSet<String> = plan.removals.into_iter().collect();
            self.entries.retain(|e| !gone.contains(&e.id));
        }

        self.entries
            .extend(plan.appends.into_iter().map(RenderedEntry::new));

        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, text: &str) -> Item {
        Item::new(id, text)
    }

    fn ids(list: &EntryList) -> Vec<&str> {
        list.entries().iter().map(|e| e.id.as_str()).collect()
    }

    #[test]
    fn test_empty_array_removes_all_entries() {
        let mut list = EntryList::new(ItemKind::Dare);
        list.replace_all(&[item("a", "1"), item("b", "2"), item("c", "3")]);
        assert_eq!(list.len(), 3);

        let stats = list.reconcile(&[]);
        assert!(list.is_empty());
        assert_eq!(stats.removed, 3);
    }

    #[test]
    fn test_identical_input_keeps_node_identity() {
        let mut list = EntryList::new(ItemKind::Dare);
        list.reconcile(&[item("a", "x")]);
        let first = list.node_of("a").unwrap();

        let stats = list.reconcile(&[item("a", "x")]);
        assert_eq!(list.node_of("a"), Some(first));
        assert_eq!(stats, ReconcileStats::default());
    }

    #[test]
    fn test_text_change_updates_in_place() {
        let mut list = EntryList::new(ItemKind::Truth);
        list.reconcile(&[item("a", "x")]);
        let node = list.node_of("a").unwrap();

        let stats = list.reconcile(&[item("a", "y")]);
        let entry = list.get("a").unwrap();
        assert_eq!(entry.node, node);
        assert_eq!(entry.text, "y");
        assert_eq!(stats.updated, 1);
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_new_id_appended_once() {
        let mut list = EntryList::new(ItemKind::Dare);
        list.reconcile(&[item("a", "x")]);
        let a = list.node_of("a").unwrap();

        list.reconcile(&[item("a", "x"), item("b", "y")]);
        assert_eq!(ids(&list), vec!["a", "b"]);
        assert_eq!(list.node_of("a"), Some(a));
    }

    #[test]
    fn test_removes_exactly_the_missing_entry() {
        let mut list = EntryList::new(ItemKind::Dare);
        list.reconcile(&[item("a", "x"), item("b", "y")]);
        let b = list.node_of("b").unwrap();

        let stats = list.reconcile(&[item("b", "y")]);
        assert_eq!(ids(&list), vec!["b"]);
        assert_eq!(list.node_of("b"), Some(b));
        assert_eq!(stats.removed, 1);
    }

    #[test]
    fn test_retained_entries_keep_position() {
        let mut list = EntryList::new(ItemKind::Dare);
        list.reconcile(&[item("a", "1"), item("b", "2")]);

        list.reconcile(&[item("c", "3"), item("b", "2"), item("a", "1")]);
        assert_eq!(ids(&list), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_replace_all_recreates_every_entry() {
        let mut list = EntryList::new(ItemKind::Truth);
        list.replace_all(&[item("a", "x"), item("b", "y")]);
        let before: Vec<NodeId> = list.entries().iter().map(|e| e.node).collect();

        list.replace_all(&[item("a", "x"), item("b", "y")]);
        let after: Vec<NodeId> = list.entries().iter().map(|e| e.node).collect();

        assert_eq!(ids(&list), vec!["a", "b"]);
        for node in &after {
            assert!(!before.contains(node));
        }
    }

    #[test]
    fn test_duplicate_ids_render_once() {
        let mut list = EntryList::new(ItemKind::Dare);
        let stats = list.reconcile(&[item("a", "x"), item("a", "y")]);
        assert_eq!(ids(&list), vec!["a"]);
        assert_eq!(list.get("a").unwrap().text, "y");
        assert_eq!(stats.duplicates, 1);

        list.replace_all(&[item("b", "1"), item("b", "2")]);
        assert_eq!(ids(&list), vec!["b"]);
    }

    #[test]
    fn test_entry_actions_carry_kind_and_id() {
        let mut list = EntryList::new(ItemKind::Truth);
        list.reconcile(&[item("t1", "secret")]);
        let entry = &list.entries()[0];
        assert_eq!(
            entry.edit_action(list.kind()),
            EntryAction::Edit {
                kind: ItemKind::Truth,
                id: "t1".into(),
                old_text: "secret".into()
            }
        );
        assert_eq!(
            entry.delete_action(list.kind()),
            EntryAction::Delete {
                kind: ItemKind::Truth,
                id: "t1".into()
            }
        );
    }
}
