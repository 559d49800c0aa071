use crate::{
    data::{
        PageKind, email::EmailPage, file::FilePage, invoice::InvoicePage, order::OrderPage,
        product::ProductPage, ticket::TicketPage,
    },
    gui::screens::{
        ScreenData, ScreenMessage, calendar_page::CalendarPageScreen, chat_page::ChatPageScreen,
        list_page::ListPageScreen, loading_page::LoadingPageScreen,
    },
};

#[derive(Debug, Clone)]
pub enum Message {
    Navigate(PageKind),
    /// A page finished loading; stale results for another page are dropped.
    Loaded(PageKind, Result<ScreenData, String>),
    LoadingPage(ScreenMessage<LoadingPageScreen>),
    ChatPage(ScreenMessage<ChatPageScreen>),
    EmailPage(ScreenMessage<ListPageScreen<EmailPage>>),
    InvoicesPage(ScreenMessage<ListPageScreen<InvoicePage>>),
    OrdersPage(ScreenMessage<ListPageScreen<OrderPage>>),
    ProductsPage(ScreenMessage<ListPageScreen<ProductPage>>),
    TicketsPage(ScreenMessage<ListPageScreen<TicketPage>>),
    FilesPage(ScreenMessage<ListPageScreen<FilePage>>),
    CalendarPage(ScreenMessage<CalendarPageScreen>),
}
