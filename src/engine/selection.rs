//! Multi-row selection

use indexmap::IndexSet;
use std::hash::Hash;

/// Set of selected record identifiers for one view
///
/// Selection is independent of pagination: ids stay selected while the
/// operator pages around, and select-all covers every filtered record, not
/// only the visible page. Insertion order is kept so batch requests list
/// ids in the order they were picked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection<Id: Eq + Hash> {
    ids: IndexSet<Id>,
}

impl<Id: Eq + Hash> Default for Selection<Id> {
    fn default() -> Self {
        Self {
            ids: IndexSet::new(),
        }
    }
}

impl<Id: Clone + Eq + Hash> Selection<Id> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip membership of one id; returns whether it is now selected
    pub fn toggle(&mut self, id: Id) -> bool {
        if self.ids.shift_remove(&id) {
            false
        } else {
            self.ids.insert(id);
            true
        }
    }

    /// Select every filtered id when `checked`, otherwise clear
    pub fn select_all<I>(&mut self, checked: bool, filtered_ids: I)
    where
        I: IntoIterator<Item = Id>,
    {
        self.ids.clear();
        if checked {
            self.ids.extend(filtered_ids);
        }
    }

    /// Drop selected ids that are not in `visible`; never adds ids
    pub fn retain_matching<'a, I>(&mut self, visible: I)
    where
        I: IntoIterator<Item = &'a Id>,
        Id: 'a,
    {
        let visible: IndexSet<&Id> = visible.into_iter().collect();
        self.ids.retain(|id| visible.contains(id));
    }

    /// Drop the given ids, keeping the order of the rest
    pub fn deselect<'a, I>(&mut self, ids: I)
    where
        I: IntoIterator<Item = &'a Id>,
        Id: 'a,
    {
        for id in ids {
            self.ids.shift_remove(id);
        }
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn is_selected(&self, id: &Id) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Whether every id in `ids` is selected (header checkbox state)
    pub fn covers<'a, I>(&self, ids: I) -> bool
    where
        I: IntoIterator<Item = &'a Id>,
        Id: 'a,
    {
        let mut any = false;
        for id in ids {
            if !self.ids.contains(id) {
                return false;
            }
            any = true;
        }
        any
    }

    /// Selected ids in selection order
    pub fn ids(&self) -> Vec<Id> {
        self.ids.iter().cloned().collect()
    }
}
