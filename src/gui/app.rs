use iced::{Element, Task};

use crate::{
    config::DashboardConfig,
    data::PageKind,
    gui::{
        AppState, Message,
        screens::{self, Screen, ScreenData, ScreenMessage, loading_page::LoadingPageScreen},
    },
};

const START_PAGE: PageKind = PageKind::Email;

pub struct Dashboard {
    state: AppState,
    screen: ScreenData,
}

impl Dashboard {
    pub fn new(config: DashboardConfig) -> (Self, Task<Message>) {
        let mut state = AppState::new(config);
        state.current_page = Some(START_PAGE);
        let task = screens::load(START_PAGE, &state);
        (
            Self {
                state,
                screen: ScreenData::LoadingPage(LoadingPageScreen::new(START_PAGE)),
            },
            task,
        )
    }

    pub fn title(&self) -> String {
        match self.state.current_page {
            Some(kind) => format!("{} - dashkit", kind.title()),
            None => "dashkit".to_string(),
        }
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        self.screen
            .update(message, &mut self.state)
            .map(unwrap_screen_message)
    }

    pub fn view(&self) -> Element<'_, Message> {
        self.screen.view().map(unwrap_screen_message)
    }
}

fn unwrap_screen_message(message: ScreenMessage<ScreenData>) -> Message {
    match message {
        ScreenMessage::ScreenMessage(message) => message,
        ScreenMessage::ParentMessage(never) => match never {},
    }
}

/// Open the desktop dashboard and block until its window closes.
pub fn run(config: DashboardConfig) -> anyhow::Result<()> {
    tracing::info!(base_path = %config.base_path, "starting dashboard");
    iced::application(
        move || Dashboard::new(config.clone()),
        Dashboard::update,
        Dashboard::view,
    )
    .title(Dashboard::title)
    .run()
    .map_err(|e| anyhow::anyhow!("Dashboard exited with an error: {}", e))
}
