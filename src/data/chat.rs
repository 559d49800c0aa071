use serde::{Deserialize, Serialize};
use time::{OffsetDateTime, macros::datetime};
use uuid::Uuid;

use crate::{
    core::{
        FacetSpec, PageAction, PageState, Record, SelectionAction, SortKey, record::facet_enum,
    },
    data::Page,
    render::{Column, badge},
};

facet_enum! {
    pub enum PresenceStatus {
        Online => "online",
        Away => "away",
        Offline => "offline",
    }
}

facet_enum! {
    pub enum Sender {
        Me => "me",
        Contact => "contact",
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub sender: Sender,
    pub body: String,
    #[serde(with = "time::serde::rfc3339")]
    pub sent_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: u32,
    pub name: String,
    pub role: String,
    pub status: PresenceStatus,
    pub last_message: String,
    #[serde(with = "time::serde::rfc3339")]
    pub last_active: OffsetDateTime,
    pub unread_count: u32,
    pub messages: Vec<ChatMessage>,
}

impl Record for Contact {
    type Id = u32;

    const FACETS: &'static [FacetSpec] = &[FacetSpec::new("status", PresenceStatus::VALUES)];
    const FLAGS: &'static [&'static str] = &["unread"];
    const SORT_KEYS: &'static [&'static str] = &["name", "unread", "last_active"];

    fn id(&self) -> u32 {
        self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![&self.name, &self.role, &self.last_message]
    }

    fn facet(&self, name: &str) -> Option<&'static str> {
        match name {
            "status" => Some(self.status.as_str()),
            _ => None,
        }
    }

    fn flag(&self, name: &str) -> Option<bool> {
        match name {
            "unread" => Some(self.unread_count > 0),
            _ => None,
        }
    }

    fn sort_key(&self, key: &str) -> Option<SortKey> {
        match key {
            "name" => Some(SortKey::text(&self.name)),
            "unread" => Some(SortKey::Int(i64::from(self.unread_count))),
            "last_active" => Some(SortKey::Int(self.last_active.unix_timestamp())),
            _ => None,
        }
    }
}

pub fn mark_conversation_read(contact: &Contact) -> Contact {
    Contact {
        unread_count: 0,
        ..contact.clone()
    }
}

/// Append `draft` to the conversation with `contact_id`.
///
/// Returns `None` when there is nothing to send: a blank draft or an
/// unknown contact.
pub fn send_message(
    contacts: &[Contact],
    contact_id: u32,
    draft: &str,
    sent_at: OffsetDateTime,
) -> Option<Vec<Contact>> {
    let body = draft.trim();
    if body.is_empty() || !contacts.iter().any(|contact| contact.id == contact_id) {
        return None;
    }
    let message = ChatMessage {
        id: Uuid::new_v4(),
        sender: Sender::Me,
        body: body.to_string(),
        sent_at,
    };
    tracing::debug!(contact_id, message_id = %message.id, "sending chat message");
    Some(crate::core::replace_record(contacts, &contact_id, |contact| {
        let mut messages = contact.messages.clone();
        messages.push(message.clone());
        Contact {
            last_message: message.body.clone(),
            last_active: sent_at,
            messages,
            ..contact.clone()
        }
    }))
}

pub fn total_unread(contacts: &[Contact]) -> u32 {
    contacts.iter().map(|contact| contact.unread_count).sum()
}

#[derive(Debug, Clone)]
pub enum ChatAction {
    Page(PageAction<Contact>),
    /// Focus a conversation and clear its unread badge.
    Open(u32),
    EditDraft(String),
    /// The Enter key in the message box.
    Send { at: OffsetDateTime },
}

/// Contact list plus the message being typed.
#[derive(Debug, Clone)]
pub struct ChatState {
    page: PageState<Contact>,
    draft: String,
}

impl ChatState {
    pub fn new(contacts: Vec<Contact>) -> Self {
        Self {
            page: PageState::new(contacts),
            draft: String::new(),
        }
    }

    pub fn page(&self) -> &PageState<Contact> {
        &self.page
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn conversation(&self) -> Option<&Contact> {
        self.page.focused_record()
    }

    pub fn reduce(&self, action: ChatAction) -> Self {
        let mut next = self.clone();
        match action {
            ChatAction::Page(action) => next.page = self.page.reduce(action),
            ChatAction::Open(id) => {
                next.page = self
                    .page
                    .reduce(PageAction::Selection(SelectionAction::Select(id)))
                    .reduce(PageAction::Edit(id, mark_conversation_read));
            }
            ChatAction::EditDraft(draft) => next.draft = draft,
            ChatAction::Send { at } => {
                let Some(&contact_id) = self.page.selection().focused() else {
                    return next;
                };
                let sent = send_message(self.page.records(), contact_id, &self.draft, at);
                if let Some(contacts) = sent {
                    next.page = self.page.reduce(PageAction::Load(contacts));
                    next.draft.clear();
                }
            }
        }
        next
    }
}

pub fn transcript(contact: &Contact) -> String {
    let mut lines = Vec::with_capacity(contact.messages.len() + 1);
    lines.push(format!("{} ({}) {}", contact.name, contact.role, badge(contact.status)));
    for message in &contact.messages {
        let who = match message.sender {
            Sender::Me => "You",
            Sender::Contact => contact.name.as_str(),
        };
        lines.push(format!(
            "[{:02}:{:02}] {}: {}",
            message.sent_at.hour(),
            message.sent_at.minute(),
            who,
            message.body
        ));
    }
    lines.join("\n")
}

#[derive(Debug, Clone, Copy)]
pub struct ChatPage;

impl Page for ChatPage {
    const NAME: &'static str = "chat";
    const TITLE: &'static str = "Chat";

    type Record = Contact;

    fn seed() -> Vec<Contact> {
        seed()
    }

    fn columns() -> Vec<Column<Contact>> {
        vec![
            Column::new("#", |c: &Contact| c.id.to_string()),
            Column::new("Contact", |c: &Contact| c.name.clone()),
            Column::new("Status", |c: &Contact| badge(c.status)),
            Column::new("Last message", |c: &Contact| c.last_message.clone()),
            Column::new("Unread", |c: &Contact| {
                if c.unread_count > 0 {
                    c.unread_count.to_string()
                } else {
                    String::new()
                }
            }),
        ]
    }

    fn summary(records: &[Contact]) -> Vec<(&'static str, String)> {
        let online = records
            .iter()
            .filter(|contact| contact.status == PresenceStatus::Online)
            .count();
        vec![
            ("Online", online.to_string()),
            ("Unread", total_unread(records).to_string()),
        ]
    }
}

fn message(id: u128, sender: Sender, body: &str, sent_at: OffsetDateTime) -> ChatMessage {
    ChatMessage {
        id: Uuid::from_u128(id),
        sender,
        body: body.to_string(),
        sent_at,
    }
}

fn contact(
    id: u32,
    name: &str,
    role: &str,
    status: PresenceStatus,
    unread_count: u32,
    messages: Vec<ChatMessage>,
) -> Contact {
    let last_message = messages
        .last()
        .map(|message| message.body.clone())
        .unwrap_or_default();
    let last_active = messages
        .last()
        .map(|message| message.sent_at)
        .unwrap_or(datetime!(2024-03-01 00:00 UTC));
    Contact {
        id,
        name: name.to_string(),
        role: role.to_string(),
        status,
        last_message,
        last_active,
        unread_count,
        messages,
    }
}

pub fn seed() -> Vec<Contact> {
    use PresenceStatus::*;
    use Sender::{Contact as Them, Me};
    vec![
        contact(1, "Sarah Johnson", "Product Manager", Online, 2, vec![
            message(
                101,
                Them,
                "Morning! Did you see the new mockups?",
                datetime!(2024-03-15 09:02 UTC),
            ),
            message(102, Me, "Just opened them, they look great.", datetime!(2024-03-15 09:05 UTC)),
            message(
                103,
                Them,
                "Can we review them before the 11:00 sync?",
                datetime!(2024-03-15 09:12 UTC),
            ),
            message(104, Them, "I'll book a room.", datetime!(2024-03-15 09:13 UTC)),
        ]),
        contact(2, "Michael Chen", "Senior Developer", Away, 0, vec![
            message(201, Me, "Is the pagination fix deployed?", datetime!(2024-03-14 16:40 UTC)),
            message(
                202,
                Them,
                "Yes, went out with the 16:30 release.",
                datetime!(2024-03-14 16:52 UTC),
            ),
        ]),
        contact(3, "Emily Davis", "UX Designer", Online, 1, vec![
            message(301, Them, "Sending over the icon set now", datetime!(2024-03-15 08:30 UTC)),
        ]),
        contact(4, "David Wilson", "Marketing Lead", Offline, 0, vec![
            message(
                401,
                Them,
                "Campaign numbers are in the shared folder.",
                datetime!(2024-03-13 18:20 UTC),
            ),
            message(402, Me, "Thanks, I'll take a look tomorrow.", datetime!(2024-03-13 18:31 UTC)),
        ]),
        contact(5, "Jessica Brown", "Account Executive", Away, 3, vec![
            message(501, Them, "Globex wants to renew.", datetime!(2024-03-15 07:45 UTC)),
            message(
                502,
                Them,
                "They're asking about volume discounts.",
                datetime!(2024-03-15 07:46 UTC),
            ),
            message(503, Them, "Can you join a call at 2?", datetime!(2024-03-15 07:50 UTC)),
        ]),
        contact(6, "Robert Taylor", "Support Engineer", Offline, 0, Vec::new()),
    ]
}
