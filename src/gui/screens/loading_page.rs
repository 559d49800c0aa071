use std::convert::Infallible;

use iced::{
    Element, Task,
    widget::{column, container, text},
};

use crate::{
    data::PageKind,
    gui::{
        AppState,
        screens::{Screen, ScreenMessage},
    },
};

#[derive(Debug, Clone)]
pub struct LoadingPageScreen {
    kind: PageKind,
    error: Option<String>,
}

impl LoadingPageScreen {
    pub fn new(kind: PageKind) -> Self {
        Self { kind, error: None }
    }

    pub fn failed(kind: PageKind, error: String) -> Self {
        Self {
            kind,
            error: Some(error),
        }
    }

    pub fn kind(&self) -> PageKind {
        self.kind
    }
}

impl Screen for LoadingPageScreen {
    type Message = Infallible;
    type ParentMessage = Infallible;

    fn view(&self) -> Element<'_, ScreenMessage<Self>> {
        let content: Element<'_, ScreenMessage<Self>> = match &self.error {
            None => text(format!("Loading {}...", self.kind.title().to_lowercase())).into(),
            Some(error) => column![
                text(format!("Could not load {}", self.kind.title())).size(24),
                text(error.as_str()),
            ]
            .spacing(10)
            .into(),
        };
        container(content)
            .center_x(iced::Length::Fill)
            .center_y(iced::Length::Fill)
            .into()
    }

    fn update(
        &mut self,
        message: Self::Message,
        _state: &mut AppState,
    ) -> Task<ScreenMessage<Self>> {
        match message {}
    }
}
