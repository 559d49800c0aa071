//! Integration tests for the selection/overlay reducer.

mod common;

use common::*;
use dashkit::core::Overlay;
use proptest::prelude::*;

#[test]
fn test_select_focuses_single_record() -> anyhow::Result<()> {
    let state = SelectionState::<u32>::new();
    assert_eq!(state.focused(), None);

    let state = state.select(3);
    assert_eq!(state.focused(), Some(&3));

    let state = state.select(5);
    assert_eq!(state.focused(), Some(&5));

    let state = state.reduce(SelectionAction::Unfocus);
    assert_eq!(state.focused(), None);
    Ok(())
}

#[test]
fn test_reduce_leaves_previous_state_untouched() -> anyhow::Result<()> {
    let before = SelectionState::<u32>::new().toggle(1);
    let after = before.toggle(2);

    assert_eq!(before.selected_count(), 1);
    assert_eq!(after.selected_count(), 2);
    Ok(())
}

#[test]
fn test_toggle_all_selects_then_clears_visible_rows() -> anyhow::Result<()> {
    let visible = vec![1, 2, 3];

    // Partially selected: the header checkbox selects everything
    let state = SelectionState::new()
        .toggle(2)
        .reduce(SelectionAction::ToggleAll(visible.clone()));
    assert_eq!(state.selected().copied().collect::<Vec<_>>(), vec![1, 2, 3]);

    // Fully selected: it clears them, leaving rows from other pages alone
    let state = state
        .toggle(9)
        .reduce(SelectionAction::ToggleAll(visible));
    assert_eq!(state.selected().copied().collect::<Vec<_>>(), vec![9]);

    // Nothing visible is a no-op
    let state = state.reduce(SelectionAction::ToggleAll(Vec::new()));
    assert_eq!(state.selected_count(), 1);
    Ok(())
}

#[test]
fn test_clear_keeps_overlays_open() -> anyhow::Result<()> {
    let state = SelectionState::new()
        .select(4)
        .select_all([1, 2])
        .open(Overlay::Compose);

    let cleared = state.clear();
    assert_eq!(cleared.focused(), None);
    assert_eq!(cleared.selected_count(), 0);
    assert!(cleared.is_open(Overlay::Compose));
    Ok(())
}

#[test]
fn test_overlays_open_close_and_toggle() -> anyhow::Result<()> {
    let state = SelectionState::<u32>::new().open(Overlay::Details);
    assert!(state.is_open(Overlay::Details));
    assert!(!state.is_open(Overlay::FilterPanel));

    let state = state.reduce(SelectionAction::ToggleOverlay(Overlay::FilterPanel));
    assert!(state.is_open(Overlay::FilterPanel));

    let state = state
        .reduce(SelectionAction::ToggleOverlay(Overlay::FilterPanel))
        .close(Overlay::Details);
    assert!(!state.is_open(Overlay::FilterPanel));
    assert!(!state.is_open(Overlay::Details));
    Ok(())
}

#[test]
fn test_retain_known_drops_missing_ids() -> anyhow::Result<()> {
    let state = SelectionState::new().select(7).select_all([1, 7, 8]);
    let known = [1, 2].into_iter().collect();

    let state = state.retain_known(&known);
    assert_eq!(state.focused(), None);
    assert_eq!(state.selected().copied().collect::<Vec<_>>(), vec![1]);
    Ok(())
}

proptest! {
    #[test]
    fn prop_toggle_twice_is_identity(
        selected in prop::collection::btree_set(0u32..20, 0..10),
        focused in prop::option::of(0u32..20),
        id in 0u32..20,
    ) {
        let mut state = SelectionState::new().select_all(selected);
        if let Some(focused) = focused {
            state = state.select(focused);
        }
        prop_assert_eq!(state.toggle(id).toggle(id), state);
    }
}
