mod fixtures;
pub use fixtures::*;

// Re-export commonly used types from dashkit for tests
pub use dashkit::core::{
    CategoryFilter, FilterState, PageAction, PageState, Predicate, Record, SelectionAction,
    SelectionState, SortSpec, ViewState, filter_records,
};
