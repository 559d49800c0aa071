pub mod calendar;
pub mod filter;
pub mod pagination;
pub mod record;
pub mod selection;
pub mod view;

pub use calendar::{CalendarCell, CalendarGrid, Dated, MonthCursor, events_on};
pub use filter::{
    CategoryFilter, FilterState, Predicate, SortDirection, SortSpec, filter_records, sort_records,
};
pub use pagination::{PageLink, PageWindow};
pub use record::{FacetSpec, Record, SortKey, facet_spec, replace_record};
pub use selection::{Overlay, SelectionAction, SelectionState};
pub use view::{DerivedView, PageAction, PageState, ViewMode, ViewState};
