use std::{collections::BTreeSet, fmt::Debug};

use serde::{Deserialize, Serialize};

/// Panels and modals a page can show on top of its list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Overlay {
    Compose,
    ContactInfo,
    Details,
    FilterPanel,
    NewRecord,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionAction<Id> {
    /// Focus a single record (the open conversation, the previewed email).
    Select(Id),
    Unfocus,
    /// Flip membership of one record in the bulk selection.
    Toggle(Id),
    SelectAll(Vec<Id>),
    /// Header checkbox: select all of `ids`, or clear if they already are.
    ToggleAll(Vec<Id>),
    /// Drop focus and the bulk selection. Overlays are left alone.
    Clear,
    Open(Overlay),
    Close(Overlay),
    ToggleOverlay(Overlay),
}

/// Which records are focused or selected and which overlays are visible.
///
/// Transitions never mutate in place: [`SelectionState::reduce`] returns the
/// next state value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionState<Id: Ord> {
    focused: Option<Id>,
    selected: BTreeSet<Id>,
    overlays: BTreeSet<Overlay>,
}

impl<Id: Ord> Default for SelectionState<Id> {
    fn default() -> Self {
        Self {
            focused: None,
            selected: BTreeSet::new(),
            overlays: BTreeSet::new(),
        }
    }
}

impl<Id: Ord + Clone + Debug> SelectionState<Id> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reduce(&self, action: SelectionAction<Id>) -> Self {
        let mut next = self.clone();
        match action {
            SelectionAction::Select(id) => next.focused = Some(id),
            SelectionAction::Unfocus => next.focused = None,
            SelectionAction::Toggle(id) => {
                if !next.selected.remove(&id) {
                    next.selected.insert(id);
                }
            }
            SelectionAction::SelectAll(ids) => next.selected.extend(ids),
            SelectionAction::ToggleAll(ids) => {
                if !ids.is_empty() && ids.iter().all(|id| next.selected.contains(id)) {
                    for id in &ids {
                        next.selected.remove(id);
                    }
                } else {
                    next.selected.extend(ids);
                }
            }
            SelectionAction::Clear => {
                next.focused = None;
                next.selected.clear();
            }
            SelectionAction::Open(overlay) => {
                next.overlays.insert(overlay);
            }
            SelectionAction::Close(overlay) => {
                next.overlays.remove(&overlay);
            }
            SelectionAction::ToggleOverlay(overlay) => {
                if !next.overlays.remove(&overlay) {
                    next.overlays.insert(overlay);
                }
            }
        }
        next
    }

    pub fn select(&self, id: Id) -> Self {
        self.reduce(SelectionAction::Select(id))
    }

    pub fn toggle(&self, id: Id) -> Self {
        self.reduce(SelectionAction::Toggle(id))
    }

    pub fn select_all(&self, ids: impl IntoIterator<Item = Id>) -> Self {
        self.reduce(SelectionAction::SelectAll(ids.into_iter().collect()))
    }

    pub fn clear(&self) -> Self {
        self.reduce(SelectionAction::Clear)
    }

    pub fn open(&self, overlay: Overlay) -> Self {
        self.reduce(SelectionAction::Open(overlay))
    }

    pub fn close(&self, overlay: Overlay) -> Self {
        self.reduce(SelectionAction::Close(overlay))
    }

    pub fn focused(&self) -> Option<&Id> {
        self.focused.as_ref()
    }

    pub fn is_selected(&self, id: &Id) -> bool {
        self.selected.contains(id)
    }

    pub fn selected(&self) -> impl Iterator<Item = &Id> {
        self.selected.iter()
    }

    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    pub fn is_open(&self, overlay: Overlay) -> bool {
        self.overlays.contains(&overlay)
    }

    /// Drop selected ids that no longer exist, e.g. after the records were
    /// replaced.
    pub fn retain_known(&self, known: &BTreeSet<Id>) -> Self {
        let mut next = self.clone();
        next.selected.retain(|id| known.contains(id));
        if next.focused.as_ref().is_some_and(|id| !known.contains(id)) {
            next.focused = None;
        }
        next
    }
}
