use iced::{
    Element, Length, Task,
    widget::{Column, button, column, container, row, scrollable, text, text_input},
};
use time::OffsetDateTime;

use crate::{
    core::{PageAction, Record},
    data::chat::{ChatAction, ChatState, Contact, Sender, total_unread},
    gui::{
        AppState,
        screens::{Screen, ScreenMessage},
    },
    render::badge,
};

#[derive(Debug, Clone)]
pub struct ChatPageScreen {
    chat: ChatState,
}

#[derive(Debug, Clone)]
pub enum ChatPageMessage {
    Search(String),
    Open(u32),
    EditDraft(String),
    Send,
}

impl ChatPageScreen {
    pub fn new(contacts: Vec<Contact>) -> Self {
        Self {
            chat: ChatState::new(contacts),
        }
    }
}

impl Screen for ChatPageScreen {
    type Message = ChatPageMessage;
    type ParentMessage = std::convert::Infallible;

    fn view(&self) -> Element<'_, ScreenMessage<Self>> {
        let page = self.chat.page();
        let view = page.derive();
        let focused = page.selection().focused().copied();

        let mut contacts = Column::new().spacing(6).push(
            text(format!("Messages ({} unread)", total_unread(page.records()))).size(20),
        );
        contacts = contacts.push(
            text_input("Search contacts...", page.filter().search_term())
                .on_input(|term| ScreenMessage::ScreenMessage(ChatPageMessage::Search(term))),
        );
        for contact in view.state.rows() {
            let mut label = format!("{} {}", contact.name, badge(contact.status));
            if contact.unread_count > 0 {
                label.push_str(&format!(" ({})", contact.unread_count));
            }
            if focused == Some(contact.id()) {
                label = format!("> {label}");
            }
            contacts = contacts.push(
                button(column![text(label), text(contact.last_message.clone()).size(12)])
                    .width(Length::Fill)
                    .on_press(ScreenMessage::ScreenMessage(ChatPageMessage::Open(contact.id))),
            );
        }

        let conversation: Element<'_, ScreenMessage<Self>> = match self.chat.conversation() {
            None => container(text("Select a conversation"))
                .center_x(Length::Fill)
                .center_y(Length::Fill)
                .into(),
            Some(contact) => {
                let mut transcript = Column::new().spacing(6).push(
                    text(format!("{} - {}", contact.name, contact.role)).size(20),
                );
                if contact.messages.is_empty() {
                    transcript = transcript.push(text("No messages yet."));
                }
                for message in &contact.messages {
                    let who = match message.sender {
                        Sender::Me => "You",
                        Sender::Contact => contact.name.as_str(),
                    };
                    transcript = transcript.push(text(format!(
                        "[{:02}:{:02}] {}: {}",
                        message.sent_at.hour(),
                        message.sent_at.minute(),
                        who,
                        message.body
                    )));
                }
                let composer = row![
                    text_input("Type a message...", self.chat.draft())
                        .on_input(|draft| ScreenMessage::ScreenMessage(
                            ChatPageMessage::EditDraft(draft)
                        ))
                        .on_submit(ScreenMessage::ScreenMessage(ChatPageMessage::Send))
                        .width(Length::Fill),
                    button("Send").on_press_maybe(
                        (!self.chat.draft().trim().is_empty())
                            .then_some(ScreenMessage::ScreenMessage(ChatPageMessage::Send))
                    ),
                ]
                .spacing(10);
                column![scrollable(transcript).height(Length::Fill), composer]
                    .spacing(10)
                    .into()
            }
        };

        row![
            container(scrollable(contacts)).width(Length::FillPortion(2)).padding(10),
            container(conversation).width(Length::FillPortion(5)).padding(10),
        ]
        .into()
    }

    fn update(
        &mut self,
        message: Self::Message,
        _state: &mut AppState,
    ) -> Task<ScreenMessage<Self>> {
        let action = match message {
            ChatPageMessage::Search(term) => ChatAction::Page(PageAction::SetSearch(term)),
            ChatPageMessage::Open(id) => ChatAction::Open(id),
            ChatPageMessage::EditDraft(draft) => ChatAction::EditDraft(draft),
            ChatPageMessage::Send => ChatAction::Send {
                at: OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc()),
            },
        };
        self.chat = self.chat.reduce(action);
        Task::none()
    }
}
