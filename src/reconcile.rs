//! Keyed list reconciliation.
//!
//! [`plan`] diffs the entries currently on screen against the latest
//! authoritative array and returns what has to change. It never touches the
//! UI; [`crate::entry_list::EntryList::apply`] performs the plan.

use std::collections::{HashMap, HashSet};

use crate::protocol::Item;

/// Text change for an entry that stays on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextUpdate {
    pub id: String,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcilePlan {
    /// New entries, in the order they appear in the authoritative array.
    pub appends: Vec<Item>,
    /// Retained entries whose text changed.
    pub updates: Vec<TextUpdate>,
    /// Ids of entries that are no longer wanted, in on-screen order.
    pub removals: Vec<String>,
    /// Items skipped because their id already appeared earlier in the array.
    pub duplicates: usize,
}

impl ReconcilePlan {
    pub fn is_noop(&self) -> bool {
        self.appends.is_empty() && self.updates.is_empty() && self.removals.is_empty()
    }
}

/// Compute the add/update/remove set turning `existing` into `incoming`.
///
/// `existing` yields `(id, text)` for every entry currently rendered, in
/// on-screen order. Runs in O(existing + incoming).
///
/// A repeated id in `incoming` keeps the position of its first occurrence and
/// the text of its last one, so a list never renders the same id twice.
pub fn plan<'a, I>(existing: I, incoming: &[Item]) -> ReconcilePlan
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let existing: Vec<(&str, &str)> = existing.into_iter().collect();
    let mut before: HashSet<&str> = existing.iter().map(|(id, _)| *id).collect();

    // id -> final text for entries that stay
    let mut retained: HashMap<&str, &str> = HashMap::new();
    // id -> slot in `appends`
    let mut appended: HashMap<&str, usize> = HashMap::new();

    let mut result = ReconcilePlan::default();

    for item in incoming {
        let id = item.id.as_str();

        if let Some(&slot) = appended.get(id) {
            result.appends[slot].text = item.text.clone();
            result.duplicates += 1;
            continue;
        }
        if let Some(text) = retained.get_mut(id) {
            *text = item.text.as_str();
            result.duplicates += 1;
            continue;
        }

        if before.remove(id) {
            retained.insert(id, item.text.as_str());
        } else {
            appended.insert(id, result.appends.len());
            result.appends.push(item.clone());
        }
    }

    for (id, old_text) in existing {
        match retained.get(id) {
            Some(&new_text) if new_text != old_text => result.updates.push(TextUpdate {
                id: id.to_string(),
                text: new_text.to_string(),
            }),
            Some(_) => {}
            None => result.removals.push(id.to_string()),
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOTHING: [(&str, &str); 0] = [];

    fn items(pairs: &[(&str, &str)]) -> Vec<Item> {
        pairs.iter().map(|(id, text)| Item::new(*id, *text)).collect()
    }

    #[test]
    fn test_empty_incoming_removes_everything() {
        let result = plan([("a", "x"), ("b", "y")], &[]);
        assert!(result.appends.is_empty());
        assert!(result.updates.is_empty());
        assert_eq!(result.removals, vec!["a", "b"]);
    }

    #[test]
    fn test_empty_existing_appends_all_in_order() {
        let result = plan(NOTHING, &items(&[("b", "2"), ("a", "1")]));
        assert_eq!(result.appends, items(&[("b", "2"), ("a", "1")]));
        assert!(result.removals.is_empty());
    }

    #[test]
    fn test_identical_input_is_noop() {
        let result = plan([("a", "x")], &items(&[("a", "x")]));
        assert!(result.is_noop());
    }

    #[test]
    fn test_changed_text_becomes_update() {
        let result = plan([("a", "x")], &items(&[("a", "y")]));
        assert_eq!(
            result.updates,
            vec![TextUpdate {
                id: "a".into(),
                text: "y".into()
            }]
        );
        assert!(result.appends.is_empty());
        assert!(result.removals.is_empty());
    }

    #[test]
    fn test_mixed_add_update_remove() {
        let result = plan(
            [("a", "1"), ("b", "2"), ("c", "3")],
            &items(&[("c", "3!"), ("d", "4"), ("a", "1")]),
        );
        assert_eq!(result.appends, items(&[("d", "4")]));
        assert_eq!(
            result.updates,
            vec![TextUpdate {
                id: "c".into(),
                text: "3!".into()
            }]
        );
        assert_eq!(result.removals, vec!["b"]);
    }

    #[test]
    fn test_duplicate_new_id_appends_once_with_last_text() {
        let result = plan(NOTHING, &items(&[("a", "first"), ("b", "b"), ("a", "last")]));
        assert_eq!(result.appends, items(&[("a", "last"), ("b", "b")]));
        assert_eq!(result.duplicates, 1);
    }

    #[test]
    fn test_duplicate_retained_id_last_write_wins() {
        let result = plan([("a", "x")], &items(&[("a", "y"), ("a", "z")]));
        assert!(result.appends.is_empty());
        assert_eq!(
            result.updates,
            vec![TextUpdate {
                id: "a".into(),
                text: "z".into()
            }]
        );
        assert_eq!(result.duplicates, 1);
    }

    #[test]
    fn test_duplicate_that_reverts_text_is_noop() {
        let result = plan([("a", "x")], &items(&[("a", "y"), ("a", "x")]));
        assert!(result.is_noop());
        assert_eq!(result.duplicates, 1);
    }
}
