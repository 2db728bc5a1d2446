//! Transient selection of history entries.

use std::collections::HashSet;

/// The set of history entry ids currently selected for deletion.
///
/// Purely transient UI state: it is never persisted and is cleared after
/// every delete operation. Kept fully decoupled from the history list
/// itself; an id staying in the set after its entry is gone is harmless,
/// since deletion treats absent ids as no-ops.
#[derive(Debug, Default)]
pub struct SelectionSet {
    ids: HashSet<i64>,
}

impl SelectionSet {
    /// Creates an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips whether `id` is selected.
    pub fn toggle(&mut self, id: i64) {
        if !self.ids.remove(&id) {
            self.ids.insert(id);
        }
    }

    /// Whether `id` is currently selected.
    pub fn contains(&self, id: i64) -> bool {
        self.ids.contains(&id)
    }

    /// The selected ids.
    pub fn ids(&self) -> &HashSet<i64> {
        &self.ids
    }

    /// Number of selected ids.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Deselects everything.
    pub fn clear(&mut self) {
        self.ids.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_selects_and_deselects() {
        let mut selection = SelectionSet::new();

        selection.toggle(1);
        assert!(selection.contains(1));
        assert_eq!(selection.len(), 1);

        selection.toggle(1);
        assert!(!selection.contains(1));
        assert!(selection.is_empty());
    }

    #[test]
    fn test_clear_empties_selection() {
        let mut selection = SelectionSet::new();
        selection.toggle(1);
        selection.toggle(2);
        selection.toggle(3);

        selection.clear();
        assert!(selection.is_empty());
        assert!(!selection.contains(2));
    }

    #[test]
    fn test_ids_exposes_current_members() {
        let mut selection = SelectionSet::new();
        selection.toggle(7);
        selection.toggle(9);

        assert_eq!(selection.ids(), &HashSet::from([7, 9]));
    }
}
