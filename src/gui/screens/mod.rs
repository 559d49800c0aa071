pub mod calendar_page;
pub mod chat_page;
pub mod list_page;
pub mod loading_page;

use std::convert::Infallible;

use iced::{Element, Task};

use crate::{
    core::PageState,
    data::{
        InMemoryRepository, Page, PageKind, chat::ChatPage, email::EmailPage, event::CalendarPage,
        file::FilePage, invoice::InvoicePage, load_page, order::OrderPage, product::ProductPage,
        ticket::TicketPage,
    },
    gui::{AppState, Message, widgets::layout},
};

use calendar_page::CalendarPageScreen;
use chat_page::ChatPageScreen;
use list_page::{ListPageParentMessage, ListPageScreen};
use loading_page::LoadingPageScreen;

#[derive(Debug, Clone)]
pub enum ScreenMessage<S: Screen> {
    ScreenMessage(S::Message),
    ParentMessage(S::ParentMessage),
}

pub trait Screen: Sized {
    type Message: std::fmt::Debug + Clone + Send;
    type ParentMessage: std::fmt::Debug + Clone + Send;
    fn view(&self) -> Element<'_, ScreenMessage<Self>>;
    fn update(&mut self, message: Self::Message, state: &mut AppState)
    -> Task<ScreenMessage<Self>>;
}

#[derive(Debug, Clone)]
pub enum ScreenData {
    LoadingPage(LoadingPageScreen),
    ChatPage(ChatPageScreen),
    EmailPage(ListPageScreen<EmailPage>),
    InvoicesPage(ListPageScreen<InvoicePage>),
    OrdersPage(ListPageScreen<OrderPage>),
    ProductsPage(ListPageScreen<ProductPage>),
    TicketsPage(ListPageScreen<TicketPage>),
    FilesPage(ListPageScreen<FilePage>),
    CalendarPage(CalendarPageScreen),
}

impl ScreenData {
    pub fn kind(&self) -> PageKind {
        match self {
            ScreenData::LoadingPage(screen) => screen.kind(),
            ScreenData::ChatPage(_) => PageKind::Chat,
            ScreenData::EmailPage(_) => PageKind::Email,
            ScreenData::InvoicesPage(_) => PageKind::Invoices,
            ScreenData::OrdersPage(_) => PageKind::Orders,
            ScreenData::ProductsPage(_) => PageKind::Products,
            ScreenData::TicketsPage(_) => PageKind::Tickets,
            ScreenData::FilesPage(_) => PageKind::Files,
            ScreenData::CalendarPage(_) => PageKind::Calendar,
        }
    }
}

impl Screen for ScreenData {
    type Message = Message;
    type ParentMessage = Infallible;

    fn view(&self) -> Element<'_, ScreenMessage<Self>> {
        let content = match self {
            ScreenData::LoadingPage(screen) => screen.view().map(Message::LoadingPage),
            ScreenData::ChatPage(screen) => screen.view().map(Message::ChatPage),
            ScreenData::EmailPage(screen) => screen.view().map(Message::EmailPage),
            ScreenData::InvoicesPage(screen) => screen.view().map(Message::InvoicesPage),
            ScreenData::OrdersPage(screen) => screen.view().map(Message::OrdersPage),
            ScreenData::ProductsPage(screen) => screen.view().map(Message::ProductsPage),
            ScreenData::TicketsPage(screen) => screen.view().map(Message::TicketsPage),
            ScreenData::FilesPage(screen) => screen.view().map(Message::FilesPage),
            ScreenData::CalendarPage(screen) => screen.view().map(Message::CalendarPage),
        };
        layout(self.kind(), Message::Navigate, content).map(ScreenMessage::ScreenMessage)
    }

    fn update(
        &mut self,
        message: Self::Message,
        state: &mut AppState,
    ) -> Task<ScreenMessage<Self>> {
        match (self, message) {
            (x, Message::Navigate(kind)) => {
                state.current_page = Some(kind);
                *x = ScreenData::LoadingPage(LoadingPageScreen::new(kind));
                load(kind, state).map(ScreenMessage::ScreenMessage)
            }
            (x, Message::Loaded(kind, result)) => {
                if state.current_page != Some(kind) {
                    tracing::debug!(page = kind.name(), "dropping stale page load");
                    return Task::none();
                }
                *x = match result {
                    Ok(screen) => screen,
                    Err(error) => {
                        tracing::error!(page = kind.name(), %error, "failed to load page");
                        ScreenData::LoadingPage(LoadingPageScreen::failed(kind, error))
                    }
                };
                Task::none()
            }
            (ScreenData::ChatPage(page), Message::ChatPage(msg)) => match msg {
                ScreenMessage::ScreenMessage(msg) => page
                    .update(msg, state)
                    .map(Message::ChatPage)
                    .map(ScreenMessage::ScreenMessage),
                ScreenMessage::ParentMessage(never) => match never {},
            },
            (ScreenData::CalendarPage(page), Message::CalendarPage(msg)) => match msg {
                ScreenMessage::ScreenMessage(msg) => page
                    .update(msg, state)
                    .map(Message::CalendarPage)
                    .map(ScreenMessage::ScreenMessage),
                ScreenMessage::ParentMessage(never) => match never {},
            },
            (ScreenData::EmailPage(page), Message::EmailPage(msg)) => {
                forward(page, msg, state, Message::EmailPage)
            }
            (ScreenData::InvoicesPage(page), Message::InvoicesPage(msg)) => {
                forward(page, msg, state, Message::InvoicesPage)
            }
            (ScreenData::OrdersPage(page), Message::OrdersPage(msg)) => {
                forward(page, msg, state, Message::OrdersPage)
            }
            (ScreenData::ProductsPage(page), Message::ProductsPage(msg)) => {
                forward(page, msg, state, Message::ProductsPage)
            }
            (ScreenData::TicketsPage(page), Message::TicketsPage(msg)) => {
                forward(page, msg, state, Message::TicketsPage)
            }
            (ScreenData::FilesPage(page), Message::FilesPage(msg)) => {
                forward(page, msg, state, Message::FilesPage)
            }
            _ => Task::none(),
        }
    }
}

fn forward<P: Page + Send + 'static>(
    page: &mut ListPageScreen<P>,
    message: ScreenMessage<ListPageScreen<P>>,
    state: &mut AppState,
    wrap: fn(ScreenMessage<ListPageScreen<P>>) -> Message,
) -> Task<ScreenMessage<ScreenData>> {
    match message {
        ScreenMessage::ScreenMessage(msg) => page
            .update(msg, state)
            .map(wrap)
            .map(ScreenMessage::ScreenMessage),
        ScreenMessage::ParentMessage(ListPageParentMessage::Reload) => {
            let kind = page.kind();
            load(kind, state).map(ScreenMessage::ScreenMessage)
        }
    }
}

async fn load_state<P: Page>() -> Result<PageState<P::Record>, String> {
    let repo = InMemoryRepository::seeded::<P>();
    load_page(&repo).await.map_err(|e| format!("{:#}", e))
}

fn load_list<P>(
    kind: PageKind,
    per_page: usize,
    wrap: fn(ListPageScreen<P>) -> ScreenData,
) -> Task<Message>
where
    P: Page + Send + 'static,
{
    Task::perform(load_state::<P>(), move |result| {
        Message::Loaded(
            kind,
            result.map(|state| wrap(ListPageScreen::new(kind, state.with_per_page(per_page)))),
        )
    })
}

/// Fetch the records behind `kind` and build its screen.
pub fn load(kind: PageKind, state: &AppState) -> Task<Message> {
    tracing::debug!(page = kind.name(), "loading page");
    let per_page = state.config.items_per_page;
    match kind {
        PageKind::Chat => Task::perform(load_state::<ChatPage>(), move |result| {
            Message::Loaded(
                kind,
                result.map(|state| {
                    ScreenData::ChatPage(ChatPageScreen::new(state.records().to_vec()))
                }),
            )
        }),
        PageKind::Calendar => {
            let today = state.today;
            Task::perform(load_state::<CalendarPage>(), move |result| {
                Message::Loaded(
                    kind,
                    result.map(|state| {
                        ScreenData::CalendarPage(CalendarPageScreen::new(
                            state.records().to_vec(),
                            today,
                        ))
                    }),
                )
            })
        }
        PageKind::Email => load_list::<EmailPage>(kind, per_page, ScreenData::EmailPage),
        PageKind::Invoices => load_list::<InvoicePage>(kind, per_page, ScreenData::InvoicesPage),
        PageKind::Orders => load_list::<OrderPage>(kind, per_page, ScreenData::OrdersPage),
        PageKind::Products => load_list::<ProductPage>(kind, per_page, ScreenData::ProductsPage),
        PageKind::Tickets => load_list::<TicketPage>(kind, per_page, ScreenData::TicketsPage),
        PageKind::Files => load_list::<FilePage>(kind, per_page, ScreenData::FilesPage),
    }
}
