use iced::{
    Element, Length, Task,
    widget::{Column, Row, button, column, container, row, scrollable, text, text_input},
};

use crate::{
    core::{
        CategoryFilter, PageAction, PageLink, PageState, Record, SelectionAction, SortDirection,
        SortSpec, ViewMode,
    },
    data::{Page, PageKind},
    gui::{
        AppState,
        screens::{Screen, ScreenMessage},
    },
    render::{self, Column as TableColumn},
};

const GRID_COLUMNS: usize = 3;

type RecordId<P> = <<P as Page>::Record as Record>::Id;

/// Any record page: search, facets, flags, sorting, paging, bulk selection
/// and a details pane for the focused row.
#[derive(Debug)]
pub struct ListPageScreen<P: Page> {
    kind: PageKind,
    state: PageState<P::Record>,
}

impl<P: Page> Clone for ListPageScreen<P> {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            state: self.state.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub enum ListPageMessage<Id> {
    Search(String),
    Facet(&'static str, CategoryFilter),
    ToggleFlag(&'static str),
    /// Cycles ascending, descending, unsorted.
    Sort(&'static str),
    ClearFilters,
    GoToPage(usize),
    NextPage,
    PreviousPage,
    ToggleViewMode,
    Focus(Id),
    Unfocus,
    Toggle(Id),
    ToggleAll,
    /// Run `P::actions()[index]` on the record.
    Apply(Id, usize),
}

#[derive(Debug, Clone)]
pub enum ListPageParentMessage {
    Reload,
}

impl<P: Page> ListPageScreen<P> {
    pub fn new(kind: PageKind, state: PageState<P::Record>) -> Self {
        Self { kind, state }
    }

    pub fn kind(&self) -> PageKind {
        self.kind
    }

    fn next_sort(&self, key: &str) -> Option<SortSpec> {
        match self.state.sort() {
            Some(spec) if spec.key == key => match spec.direction {
                SortDirection::Ascending => Some(SortSpec::descending(key)),
                SortDirection::Descending => None,
            },
            _ => Some(SortSpec::ascending(key)),
        }
    }
}

fn msg<P: Page>(message: ListPageMessage<RecordId<P>>) -> ScreenMessage<ListPageScreen<P>>
where
    P: Send + 'static,
{
    ScreenMessage::ScreenMessage(message)
}

impl<P: Page + Send + 'static> Screen for ListPageScreen<P> {
    type Message = ListPageMessage<RecordId<P>>;
    type ParentMessage = ListPageParentMessage;

    fn view(&self) -> Element<'_, ScreenMessage<Self>> {
        let columns = P::columns();
        let view = self.state.derive();
        let filter = self.state.filter();

        let mut content = Column::new().spacing(12).padding(20);
        content = content.push(text(P::TITLE).size(28));

        let summary = P::summary(self.state.records());
        if !summary.is_empty() {
            let figures: Vec<Element<'_, ScreenMessage<Self>>> = summary
                .into_iter()
                .map(|(label, value)| {
                    container(column![text(label).size(12), text(value).size(20)])
                        .padding(8)
                        .into()
                })
                .collect();
            content = content.push(Row::with_children(figures));
        }

        let mode_label = match self.state.view_mode() {
            ViewMode::List => "Grid view",
            ViewMode::Grid => "List view",
        };
        content = content.push(
            row![
                text_input("Search...", filter.search_term())
                    .on_input(|term| msg::<P>(ListPageMessage::Search(term)))
                    .width(Length::Fill),
                button(mode_label).on_press(msg::<P>(ListPageMessage::ToggleViewMode)),
                button("Clear filters").on_press_maybe(
                    (!filter.is_empty()).then(|| msg::<P>(ListPageMessage::ClearFilters))
                ),
                button("Reload")
                    .on_press(ScreenMessage::ParentMessage(ListPageParentMessage::Reload)),
            ]
            .spacing(10),
        );

        for spec in <P::Record as Record>::FACETS {
            let current = filter.facet(spec.name);
            let mut facet_row = Row::new().spacing(6).push(text(format!("{}:", spec.name)));
            facet_row = facet_row.push(
                button(text(if current.is_all() { "[all]" } else { "all" }))
                    .on_press(msg::<P>(ListPageMessage::Facet(spec.name, CategoryFilter::All))),
            );
            for value in spec.values {
                let label = if current.value() == Some(*value) {
                    render::badge(value)
                } else {
                    value.to_string()
                };
                facet_row = facet_row.push(button(text(label)).on_press(msg::<P>(
                    ListPageMessage::Facet(spec.name, CategoryFilter::parse(value)),
                )));
            }
            content = content.push(facet_row);
        }

        let flags = <P::Record as Record>::FLAGS;
        let sort_keys = <P::Record as Record>::SORT_KEYS;
        if !flags.is_empty() || !sort_keys.is_empty() {
            let mut toggles = Row::new().spacing(6);
            for flag in flags {
                let label = if filter.is_flag_active(flag) {
                    render::badge(flag)
                } else {
                    flag.to_string()
                };
                toggles = toggles.push(
                    button(text(label)).on_press(msg::<P>(ListPageMessage::ToggleFlag(*flag))),
                );
            }
            if !sort_keys.is_empty() {
                toggles = toggles.push(text("Sort:"));
            }
            for key in sort_keys {
                let arrow = match self.state.sort() {
                    Some(spec) if spec.key == *key => match spec.direction {
                        SortDirection::Ascending => " ^",
                        SortDirection::Descending => " v",
                    },
                    _ => "",
                };
                toggles = toggles.push(
                    button(text(format!("{key}{arrow}")))
                        .on_press(msg::<P>(ListPageMessage::Sort(*key))),
                );
            }
            content = content.push(toggles);
        }

        match render::empty_state(P::TITLE, &view.state) {
            Some(message) => {
                content = content.push(
                    container(text(message))
                        .padding(40)
                        .center_x(Length::Fill),
                );
            }
            None => {
                let rows = view.state.rows();
                let selection = self.state.selection();
                content = content.push(
                    row![
                        button(text(format!("Select page ({})", rows.len())))
                            .on_press(msg::<P>(ListPageMessage::ToggleAll)),
                        text(format!("{} selected", selection.selected_count())),
                    ]
                    .spacing(10),
                );
                let is_selected = |id: &RecordId<P>| selection.is_selected(id);
                let body = match self.state.view_mode() {
                    ViewMode::List => list_rows::<P>(&columns, rows, is_selected),
                    ViewMode::Grid => grid_cards::<P>(&columns, rows, is_selected),
                };
                content = content.push(body);
                content = content.push(pager::<P>(&view.window));
            }
        }

        if let Some(record) = self.state.focused_record() {
            content = content.push(details::<P>(&columns, record));
        }

        scrollable(content).into()
    }

    fn update(
        &mut self,
        message: Self::Message,
        _state: &mut AppState,
    ) -> Task<ScreenMessage<Self>> {
        let action = match message {
            ListPageMessage::Search(term) => PageAction::SetSearch(term),
            ListPageMessage::Facet(name, filter) => PageAction::SetFacet(name.to_string(), filter),
            ListPageMessage::ToggleFlag(name) => PageAction::ToggleFlag(name.to_string()),
            ListPageMessage::Sort(key) => PageAction::SortBy(self.next_sort(key)),
            ListPageMessage::ClearFilters => PageAction::ClearFilters,
            ListPageMessage::GoToPage(page) => PageAction::GoToPage(page),
            ListPageMessage::NextPage => PageAction::NextPage,
            ListPageMessage::PreviousPage => PageAction::PreviousPage,
            ListPageMessage::ToggleViewMode => {
                PageAction::SetViewMode(self.state.view_mode().toggled())
            }
            ListPageMessage::Focus(id) => PageAction::Selection(SelectionAction::Select(id)),
            ListPageMessage::Unfocus => PageAction::Selection(SelectionAction::Unfocus),
            ListPageMessage::Toggle(id) => PageAction::Selection(SelectionAction::Toggle(id)),
            ListPageMessage::ToggleAll => {
                PageAction::Selection(SelectionAction::ToggleAll(self.state.visible_ids()))
            }
            ListPageMessage::Apply(id, index) => match P::actions().get(index) {
                Some(action) => {
                    tracing::debug!(page = P::NAME, action = action.name, ?id, "applying action");
                    PageAction::Edit(id, action.edit)
                }
                None => return Task::none(),
            },
        };
        self.state = self.state.reduce(action);
        Task::none()
    }
}

fn check_label(selected: bool) -> &'static str {
    if selected { "[x]" } else { "[ ]" }
}

fn list_rows<'a, P>(
    columns: &[TableColumn<P::Record>],
    rows: &[&P::Record],
    is_selected: impl Fn(&RecordId<P>) -> bool,
) -> Element<'a, ScreenMessage<ListPageScreen<P>>>
where
    P: Page + Send + 'static,
{
    let spacer: Element<'a, ScreenMessage<ListPageScreen<P>>> =
        text("").width(Length::Fixed(40.0)).into();
    let header = Row::with_children(std::iter::once(spacer).chain(columns.iter().map(
        |column| -> Element<'a, ScreenMessage<ListPageScreen<P>>> {
            text(column.title).width(Length::FillPortion(1)).into()
        },
    )))
    .spacing(8);

    let mut list = Column::new().spacing(4).push(header);
    for record in rows {
        let id = record.id();
        let mut line = Row::new().spacing(8).push(
            button(check_label(is_selected(&id)))
                .on_press(msg::<P>(ListPageMessage::Toggle(id.clone())))
                .width(Length::Fixed(40.0)),
        );
        for column in columns {
            line = line.push(text((column.cell)(record)).width(Length::FillPortion(1)));
        }
        line = line.push(button("Open").on_press(msg::<P>(ListPageMessage::Focus(id))));
        list = list.push(line);
    }
    list.into()
}

fn grid_cards<'a, P>(
    columns: &[TableColumn<P::Record>],
    rows: &[&P::Record],
    is_selected: impl Fn(&RecordId<P>) -> bool,
) -> Element<'a, ScreenMessage<ListPageScreen<P>>>
where
    P: Page + Send + 'static,
{
    let mut grid = Column::new().spacing(10);
    for chunk in rows.chunks(GRID_COLUMNS) {
        let mut cards = Row::new().spacing(10);
        for record in chunk {
            let id = record.id();
            let mut card = Column::new().spacing(4);
            for column in columns {
                card = card.push(text(format!("{}: {}", column.title, (column.cell)(record))));
            }
            card = card.push(
                row![
                    button(check_label(is_selected(&id)))
                        .on_press(msg::<P>(ListPageMessage::Toggle(id.clone()))),
                    button("Open").on_press(msg::<P>(ListPageMessage::Focus(id))),
                ]
                .spacing(6),
            );
            cards = cards.push(container(card).padding(10).width(Length::FillPortion(1)));
        }
        grid = grid.push(cards);
    }
    grid.into()
}

fn pager<'a, P>(window: &crate::core::PageWindow) -> Element<'a, ScreenMessage<ListPageScreen<P>>>
where
    P: Page + Send + 'static,
{
    let mut controls = Row::new().spacing(6).push(
        button("<").on_press_maybe(
            window
                .has_previous()
                .then(|| msg::<P>(ListPageMessage::PreviousPage)),
        ),
    );
    for link in window.page_links(1) {
        controls = match link {
            PageLink::Page(page) if page == window.current_page => {
                controls.push(text(render::badge(page)))
            }
            PageLink::Page(page) => controls.push(
                button(text(page.to_string()))
                    .on_press(msg::<P>(ListPageMessage::GoToPage(page))),
            ),
            PageLink::Gap => controls.push(text("…")),
        };
    }
    controls = controls.push(
        button(">").on_press_maybe(window.has_next().then(|| msg::<P>(ListPageMessage::NextPage))),
    );
    column![text(render::pagination_footer(window)).size(12), controls]
        .spacing(6)
        .into()
}

fn details<'a, P>(
    columns: &[TableColumn<P::Record>],
    record: &P::Record,
) -> Element<'a, ScreenMessage<ListPageScreen<P>>>
where
    P: Page + Send + 'static,
{
    let mut pane = Column::new().spacing(4).push(text("Details").size(20));
    for column in columns {
        pane = pane.push(text(format!("{}: {}", column.title, (column.cell)(record))));
    }
    let mut buttons = Row::new().spacing(6);
    for (index, action) in P::actions().iter().enumerate() {
        buttons = buttons.push(
            button(action.label)
                .on_press(msg::<P>(ListPageMessage::Apply(record.id(), index))),
        );
    }
    buttons = buttons.push(button("Close").on_press(msg::<P>(ListPageMessage::Unfocus)));
    pane = pane.push(buttons);
    container(pane).padding(12).into()
}
