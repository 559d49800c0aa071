//! Integration tests for the page state reducer and derived view.
//!
//! Tests cover:
//! - Loading, unpopulated and no-results states
//! - Filter actions resetting pagination
//! - Page navigation and clamping
//! - Sorting, edits and selection pruning on reload

mod common;

use common::*;
use dashkit::core::{SortDirection, ViewMode};

fn toggle_pinned(item: &Item) -> Item {
    Item {
        pinned: !item.pinned,
        ..item.clone()
    }
}

#[test]
fn test_empty_states_are_distinct() -> anyhow::Result<()> {
    let loading = PageState::<Item>::loading();
    assert_eq!(loading.derive().state, ViewState::Loading);

    let unpopulated = PageState::<Item>::new(Vec::new());
    assert_eq!(unpopulated.derive().state, ViewState::Unpopulated);

    let no_results = PageState::new(sample_items())
        .reduce(PageAction::SetSearch("zzz".to_string()));
    let view = no_results.derive();
    assert_eq!(view.state, ViewState::NoResults { total: 5 });
    assert!(view.state.rows().is_empty());
    assert_eq!(view.matched, 0);

    // Loading the records moves a loading page to rows
    let loaded = loading.reduce(PageAction::Load(sample_items()));
    assert_eq!(loaded.derive().state.rows().len(), 5);
    Ok(())
}

#[test]
fn test_derive_pages_filtered_rows() -> anyhow::Result<()> {
    let state = PageState::new(make_items(23))
        .with_per_page(10)
        .reduce(PageAction::GoToPage(3));
    let view = state.derive();
    assert_eq!(view.window.total_pages, 3);
    assert_eq!(ids(view.state.rows().iter().copied()), vec![20, 21, 22]);

    // Past the end clamps to the last page
    let state = state.reduce(PageAction::GoToPage(5));
    assert_eq!(state.derive().window.current_page, 3);

    // Next stops at the last page, previous at the first
    let state = state.reduce(PageAction::NextPage);
    assert_eq!(state.derive().window.current_page, 3);
    let state = state
        .reduce(PageAction::PreviousPage)
        .reduce(PageAction::PreviousPage)
        .reduce(PageAction::PreviousPage);
    assert_eq!(state.derive().window.current_page, 1);
    Ok(())
}

#[test]
fn test_filter_changes_reset_to_first_page() -> anyhow::Result<()> {
    let state = PageState::new(make_items(23))
        .with_per_page(5)
        .reduce(PageAction::GoToPage(4));
    assert_eq!(state.derive().window.current_page, 4);

    let state = state.reduce(PageAction::SetFacet(
        "status".to_string(),
        CategoryFilter::parse("open"),
    ));
    let view = state.derive();
    assert_eq!(view.window.current_page, 1);
    // Even ids 0..=22 are open
    assert_eq!(view.matched, 12);

    let state = state
        .reduce(PageAction::GoToPage(2))
        .reduce(PageAction::ToggleFlag("pinned".to_string()));
    let view = state.derive();
    assert_eq!(view.window.current_page, 1);
    assert_eq!(ids(view.state.rows().iter().copied()), vec![0, 6, 12, 18]);

    let state = state.reduce(PageAction::ClearFilters);
    assert!(state.filter().is_empty());
    assert_eq!(state.derive().matched, 23);
    Ok(())
}

#[test]
fn test_per_page_zero_disables_pagination() -> anyhow::Result<()> {
    let state = PageState::new(make_items(23))
        .with_per_page(10)
        .reduce(PageAction::SetPerPage(0));
    assert_eq!(state.per_page(), None);
    assert_eq!(state.derive().state.rows().len(), 23);
    Ok(())
}

#[test]
fn test_sort_applies_after_filter() -> anyhow::Result<()> {
    let state = PageState::new(sample_items())
        .reduce(PageAction::SetFacet("status".to_string(), CategoryFilter::parse("open")))
        .reduce(PageAction::SortBy(Some(SortSpec::descending("score"))));
    assert_eq!(ids(state.derive().state.rows().iter().copied()), vec![5, 3, 1]);
    assert_eq!(
        state.sort().map(|spec| spec.direction),
        Some(SortDirection::Descending)
    );

    // Unsupported keys are ignored, keeping the previous sort
    let state = state.reduce(PageAction::SortBy(Some(SortSpec::ascending("colour"))));
    assert_eq!(state.sort().map(|spec| spec.key.as_str()), Some("score"));

    let state = state.reduce(PageAction::SortBy(None));
    assert_eq!(ids(state.derive().state.rows().iter().copied()), vec![1, 3, 5]);
    Ok(())
}

#[test]
fn test_edit_replaces_one_record() -> anyhow::Result<()> {
    let before = PageState::new(sample_items());
    let after = before.reduce(PageAction::Edit(2, toggle_pinned));

    assert!(!before.records()[1].pinned);
    assert!(after.records()[1].pinned);
    assert_eq!(&after.records()[0], &before.records()[0]);

    // Unknown ids leave the records as they were
    let unchanged = after.reduce(PageAction::Edit(99, toggle_pinned));
    assert_eq!(unchanged.records(), after.records());
    Ok(())
}

#[test]
fn test_selection_through_page_actions() -> anyhow::Result<()> {
    let state = PageState::new(make_items(23)).with_per_page(10);

    let state = state.reduce(PageAction::Selection(SelectionAction::ToggleAll(
        state.visible_ids(),
    )));
    assert_eq!(state.selected_records().len(), 10);

    let state = state.reduce(PageAction::Selection(SelectionAction::Select(4)));
    assert_eq!(state.focused_record().map(|item| item.id), Some(4));

    // Reloading without id 4 drops it from focus and selection
    let remaining: Vec<Item> = make_items(23).into_iter().filter(|item| item.id != 4).collect();
    let state = state.reduce(PageAction::Load(remaining));
    assert!(state.focused_record().is_none());
    assert_eq!(state.selected_records().len(), 9);
    Ok(())
}

#[test]
fn test_view_mode_toggle() -> anyhow::Result<()> {
    let state = PageState::new(sample_items());
    assert_eq!(state.view_mode(), ViewMode::List);
    let state = state.reduce(PageAction::SetViewMode(state.view_mode().toggled()));
    assert_eq!(state.view_mode(), ViewMode::Grid);
    Ok(())
}
