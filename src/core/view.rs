use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::core::{
    filter::{CategoryFilter, FilterState, SortSpec, sort_records},
    pagination::PageWindow,
    record::{Record, replace_record},
    selection::{SelectionAction, SelectionState},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    #[default]
    List,
    Grid,
}

impl ViewMode {
    pub fn toggled(self) -> Self {
        match self {
            ViewMode::List => ViewMode::Grid,
            ViewMode::Grid => ViewMode::List,
        }
    }
}

/// What a page has to show for its current inputs.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState<'a, R> {
    /// Records haven't been handed to the page yet.
    Loading,
    /// The data set itself is empty.
    Unpopulated,
    /// The data set has records but none survive the filters.
    NoResults { total: usize },
    Rows(Vec<&'a R>),
}

impl<'a, R> ViewState<'a, R> {
    pub fn rows(&self) -> &[&'a R] {
        match self {
            ViewState::Rows(rows) => rows,
            _ => &[],
        }
    }

    pub fn is_empty(&self) -> bool {
        !matches!(self, ViewState::Rows(_))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DerivedView<'a, R> {
    pub state: ViewState<'a, R>,
    /// Records matching the filters, across all pages.
    pub matched: usize,
    pub window: PageWindow,
}

#[derive(Debug, Clone)]
pub enum PageAction<R: Record> {
    Load(Vec<R>),
    SetSearch(String),
    SetFacet(String, CategoryFilter),
    ToggleFlag(String),
    ClearFilters,
    SortBy(Option<SortSpec>),
    GoToPage(usize),
    NextPage,
    PreviousPage,
    /// Zero turns pagination off.
    SetPerPage(usize),
    SetViewMode(ViewMode),
    Selection(SelectionAction<R::Id>),
    /// Replace one record with `edit(record)`, e.g. toggling "starred".
    Edit(R::Id, fn(&R) -> R),
}

impl<R: Record> PageAction<R> {
    pub fn name(&self) -> &'static str {
        match self {
            PageAction::Load(_) => "load",
            PageAction::SetSearch(_) => "set_search",
            PageAction::SetFacet(..) => "set_facet",
            PageAction::ToggleFlag(_) => "toggle_flag",
            PageAction::ClearFilters => "clear_filters",
            PageAction::SortBy(_) => "sort_by",
            PageAction::GoToPage(_) => "go_to_page",
            PageAction::NextPage => "next_page",
            PageAction::PreviousPage => "previous_page",
            PageAction::SetPerPage(_) => "set_per_page",
            PageAction::SetViewMode(_) => "set_view_mode",
            PageAction::Selection(_) => "selection",
            PageAction::Edit(..) => "edit",
        }
    }
}

/// Everything one dashboard page keeps between interactions.
#[derive(Debug, Clone)]
pub struct PageState<R: Record> {
    records: Vec<R>,
    loaded: bool,
    filter: FilterState,
    sort: Option<SortSpec>,
    current_page: usize,
    per_page: Option<usize>,
    selection: SelectionState<R::Id>,
    view_mode: ViewMode,
}

impl<R: Record> Default for PageState<R> {
    fn default() -> Self {
        Self::loading()
    }
}

impl<R: Record> PageState<R> {
    pub fn new(records: Vec<R>) -> Self {
        Self {
            records,
            loaded: true,
            ..Self::loading()
        }
    }

    /// A page whose records are still on their way.
    pub fn loading() -> Self {
        Self {
            records: Vec::new(),
            loaded: false,
            filter: FilterState::default(),
            sort: None,
            current_page: 1,
            per_page: None,
            selection: SelectionState::default(),
            view_mode: ViewMode::default(),
        }
    }

    pub fn with_per_page(mut self, per_page: usize) -> Self {
        self.per_page = (per_page > 0).then_some(per_page);
        self
    }

    pub fn with_filter(mut self, filter: FilterState) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_sort(mut self, sort: Option<SortSpec>) -> Self {
        self.sort = sort;
        self
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn sort(&self) -> Option<&SortSpec> {
        self.sort.as_ref()
    }

    pub fn selection(&self) -> &SelectionState<R::Id> {
        &self.selection
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn per_page(&self) -> Option<usize> {
        self.per_page
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn reduce(&self, action: PageAction<R>) -> Self {
        tracing::debug!(action = action.name(), "page action");
        let mut next = self.clone();
        match action {
            PageAction::Load(records) => {
                let known: BTreeSet<R::Id> = records.iter().map(R::id).collect();
                next.selection = next.selection.retain_known(&known);
                next.records = records;
                next.loaded = true;
            }
            PageAction::SetSearch(term) => {
                next.filter.set_search(term);
                next.current_page = 1;
            }
            PageAction::SetFacet(name, filter) => {
                next.filter.set_facet(name, filter);
                next.current_page = 1;
            }
            PageAction::ToggleFlag(name) => {
                next.filter.toggle_flag(name);
                next.current_page = 1;
            }
            PageAction::ClearFilters => {
                next.filter.clear();
                next.current_page = 1;
            }
            PageAction::SortBy(spec) => match spec {
                Some(spec) if !spec.is_supported_by::<R>() => {
                    tracing::warn!(key = %spec.key, "ignoring unsupported sort key");
                }
                spec => next.sort = spec,
            },
            PageAction::GoToPage(page) => {
                next.current_page = match self.per_page {
                    Some(per_page) => {
                        PageWindow::compute(self.matched_count(), per_page, page).current_page
                    }
                    None => 1,
                };
            }
            PageAction::NextPage => {
                let window = self.window();
                if window.has_next() {
                    next.current_page = window.current_page + 1;
                }
            }
            PageAction::PreviousPage => {
                let window = self.window();
                next.current_page = window.current_page.saturating_sub(1).max(1);
            }
            PageAction::SetPerPage(per_page) => {
                next.per_page = (per_page > 0).then_some(per_page);
                next.current_page = 1;
            }
            PageAction::SetViewMode(mode) => next.view_mode = mode,
            PageAction::Selection(action) => next.selection = self.selection.reduce(action),
            PageAction::Edit(id, edit) => {
                if !self.records.iter().any(|record| record.id() == id) {
                    tracing::debug!(id = ?id, "edit for unknown record ignored");
                }
                next.records = replace_record(&self.records, &id, edit);
            }
        }
        next
    }

    fn matched_count(&self) -> usize {
        self.filter.apply(&self.records).len()
    }

    fn window(&self) -> PageWindow {
        let matched = self.matched_count();
        match self.per_page {
            Some(per_page) => PageWindow::compute(matched, per_page, self.current_page),
            None => PageWindow::unpaginated(matched),
        }
    }

    /// Recompute the visible rows from the records and the current inputs.
    pub fn derive(&self) -> DerivedView<'_, R> {
        if !self.loaded {
            return DerivedView {
                state: ViewState::Loading,
                matched: 0,
                window: PageWindow::unpaginated(0),
            };
        }

        let mut rows = self.filter.apply(&self.records);
        if let Some(spec) = &self.sort {
            sort_records(&mut rows, spec);
        }
        let matched = rows.len();
        let window = match self.per_page {
            Some(per_page) => PageWindow::compute(matched, per_page, self.current_page),
            None => PageWindow::unpaginated(matched),
        };

        let state = if self.records.is_empty() {
            ViewState::Unpopulated
        } else if matched == 0 {
            ViewState::NoResults {
                total: self.records.len(),
            }
        } else {
            ViewState::Rows(window.slice(&rows).to_vec())
        };

        DerivedView {
            state,
            matched,
            window,
        }
    }

    /// Ids of the rows currently on screen, for "select all".
    pub fn visible_ids(&self) -> Vec<R::Id> {
        self.derive()
            .state
            .rows()
            .iter()
            .map(|record| record.id())
            .collect()
    }

    pub fn focused_record(&self) -> Option<&R> {
        let focused = self.selection.focused()?;
        self.records.iter().find(|record| &record.id() == focused)
    }

    pub fn selected_records(&self) -> Vec<&R> {
        self.records
            .iter()
            .filter(|record| self.selection.is_selected(&record.id()))
            .collect()
    }
}
