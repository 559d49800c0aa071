use serde::{Deserialize, Serialize};
use time::{OffsetDateTime, macros::datetime};

use crate::{
    core::{FacetSpec, Record, SortKey, record::facet_enum},
    data::{Page, RecordAction},
    render::{Column, badge, mark},
};

facet_enum! {
    pub enum EmailCategory {
        Primary => "primary",
        Social => "social",
        Promotions => "promotions",
        Updates => "updates",
    }
}

facet_enum! {
    pub enum Folder {
        Inbox => "inbox",
        Sent => "sent",
        Drafts => "drafts",
        Trash => "trash",
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Email {
    pub id: u32,
    pub from: String,
    pub from_address: String,
    pub subject: String,
    pub body: String,
    #[serde(with = "time::serde::rfc3339")]
    pub received_at: OffsetDateTime,
    pub is_read: bool,
    pub is_starred: bool,
    pub category: EmailCategory,
    pub folder: Folder,
}

impl Record for Email {
    type Id = u32;

    const FACETS: &'static [FacetSpec] = &[
        FacetSpec::new("category", EmailCategory::VALUES),
        FacetSpec::new("folder", Folder::VALUES),
    ];
    const FLAGS: &'static [&'static str] = &["unread", "starred"];
    const SORT_KEYS: &'static [&'static str] = &["received", "from", "subject"];

    fn id(&self) -> u32 {
        self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![&self.from, &self.subject, &self.body]
    }

    fn facet(&self, name: &str) -> Option<&'static str> {
        match name {
            "category" => Some(self.category.as_str()),
            "folder" => Some(self.folder.as_str()),
            _ => None,
        }
    }

    fn flag(&self, name: &str) -> Option<bool> {
        match name {
            "unread" => Some(!self.is_read),
            "starred" => Some(self.is_starred),
            _ => None,
        }
    }

    fn sort_key(&self, key: &str) -> Option<SortKey> {
        match key {
            "received" => Some(SortKey::Int(self.received_at.unix_timestamp())),
            "from" => Some(SortKey::text(&self.from)),
            "subject" => Some(SortKey::text(&self.subject)),
            _ => None,
        }
    }
}

pub fn toggle_starred(email: &Email) -> Email {
    Email {
        is_starred: !email.is_starred,
        ..email.clone()
    }
}

pub fn mark_read(email: &Email) -> Email {
    Email {
        is_read: true,
        ..email.clone()
    }
}

pub fn move_to_trash(email: &Email) -> Email {
    Email {
        folder: Folder::Trash,
        ..email.clone()
    }
}

pub fn unread_count(emails: &[Email]) -> usize {
    emails
        .iter()
        .filter(|email| email.folder == Folder::Inbox && !email.is_read)
        .count()
}

/// Contents of the compose modal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComposeDraft {
    pub to: String,
    pub subject: String,
    pub body: String,
}

impl ComposeDraft {
    /// Turn the draft into a sent message, giving it the next free id.
    pub fn send(&self, existing: &[Email], sent_at: OffsetDateTime) -> anyhow::Result<Email> {
        let to = self.to.trim();
        if to.is_empty() || !to.contains('@') {
            anyhow::bail!("Invalid recipient address: {:?}", self.to);
        }
        if self.subject.trim().is_empty() && self.body.trim().is_empty() {
            anyhow::bail!("Refusing to send an empty message");
        }
        let last = existing.iter().map(|email| email.id).max().unwrap_or(0);
        let Some(id) = last.checked_add(1) else {
            anyhow::bail!("No free email id after {}", last);
        };
        Ok(Email {
            id,
            from: "Me".to_string(),
            from_address: to.to_string(),
            subject: self.subject.trim().to_string(),
            body: self.body.clone(),
            received_at: sent_at,
            is_read: true,
            is_starred: false,
            category: EmailCategory::Primary,
            folder: Folder::Sent,
        })
    }
}

#[derive(Debug, Clone, Copy)]
pub struct EmailPage;

impl Page for EmailPage {
    const NAME: &'static str = "email";
    const TITLE: &'static str = "Email";

    type Record = Email;

    fn seed() -> Vec<Email> {
        seed()
    }

    fn columns() -> Vec<Column<Email>> {
        vec![
            Column::new("", |e: &Email| {
                format!("{}{}", mark(e.is_starred, "*"), mark(!e.is_read, "●"))
            }),
            Column::new("From", |e: &Email| e.from.clone()),
            Column::new("Subject", |e: &Email| e.subject.clone()),
            Column::new("Category", |e: &Email| badge(e.category)),
            Column::new("Folder", |e: &Email| e.folder.to_string()),
            Column::new("Received", |e: &Email| {
                let at = e.received_at;
                format!("{} {:02}:{:02}", at.date(), at.hour(), at.minute())
            }),
        ]
    }

    fn actions() -> Vec<RecordAction<Email>> {
        vec![
            RecordAction::new("star", "Star", toggle_starred),
            RecordAction::new("mark-read", "Mark read", mark_read),
            RecordAction::new("trash", "Move to trash", move_to_trash),
        ]
    }

    fn summary(records: &[Email]) -> Vec<(&'static str, String)> {
        vec![
            ("Unread", unread_count(records).to_string()),
            (
                "Starred",
                records.iter().filter(|email| email.is_starred).count().to_string(),
            ),
        ]
    }
}

fn email(
    id: u32,
    from: &str,
    from_address: &str,
    subject: &str,
    body: &str,
    received_at: OffsetDateTime,
    category: EmailCategory,
) -> Email {
    Email {
        id,
        from: from.to_string(),
        from_address: from_address.to_string(),
        subject: subject.to_string(),
        body: body.to_string(),
        received_at,
        is_read: false,
        is_starred: false,
        category,
        folder: Folder::Inbox,
    }
}

pub fn seed() -> Vec<Email> {
    use EmailCategory::*;
    vec![
        Email {
            is_starred: true,
            ..email(
                1,
                "Sarah Johnson",
                "sarah.johnson@acme.io",
                "Q1 roadmap review",
                "Can we move the roadmap review to Thursday? I'd like marketing in the room.",
                datetime!(2024-03-15 09:24 UTC),
                Primary,
            )
        },
        email(
            2,
            "GitHub",
            "noreply@github.com",
            "[dashboard] Pull request #482 merged",
            "Your pull request 'Fix table pagination' was merged into main.",
            datetime!(2024-03-15 08:02 UTC),
            Updates,
        ),
        Email {
            is_read: true,
            ..email(
                3,
                "Michael Chen",
                "m.chen@northwind.com",
                "Invoice INV-2024-003 question",
                "The invoice total doesn't match the purchase order. Could you take a look?",
                datetime!(2024-03-14 17:45 UTC),
                Primary,
            )
        },
        email(
            4,
            "LinkedIn",
            "messages@linkedin.com",
            "You appeared in 14 searches this week",
            "See who's looking at your profile and grow your network.",
            datetime!(2024-03-14 12:10 UTC),
            Social,
        ),
        Email {
            is_read: true,
            is_starred: true,
            ..email(
                5,
                "Emily Davis",
                "emily@designhub.co",
                "New dashboard mockups",
                "Attached are the updated mockups for the analytics and invoice pages.",
                datetime!(2024-03-13 15:30 UTC),
                Primary,
            )
        },
        email(
            6,
            "Spring Sale",
            "deals@gearshop.com",
            "40% off everything this weekend",
            "Our biggest sale of the season starts now. Use code SPRING40 at checkout.",
            datetime!(2024-03-13 07:00 UTC),
            Promotions,
        ),
        Email {
            is_read: true,
            ..email(
                7,
                "Stripe",
                "receipts@stripe.com",
                "Your March payout is on the way",
                "A payout of $12,480.00 will arrive in your bank account on March 18.",
                datetime!(2024-03-12 10:15 UTC),
                Updates,
            )
        },
        email(
            8,
            "Twitter",
            "notify@twitter.com",
            "David Wilson mentioned you",
            "@you the new release looks great, congrats to the whole team!",
            datetime!(2024-03-11 19:42 UTC),
            Social,
        ),
        Email {
            is_read: true,
            folder: Folder::Sent,
            ..email(
                9,
                "Me",
                "sarah.johnson@acme.io",
                "Re: Q1 roadmap review",
                "Thursday works. I'll send an updated invite.",
                datetime!(2024-03-11 11:05 UTC),
                Primary,
            )
        },
        Email {
            is_read: true,
            folder: Folder::Drafts,
            ..email(
                10,
                "Me",
                "team@acme.io",
                "Weekly update",
                "Highlights: shipped the file manager, started on support desk...",
                datetime!(2024-03-10 16:20 UTC),
                Primary,
            )
        },
        Email {
            is_read: true,
            folder: Folder::Trash,
            ..email(
                11,
                "Cloud Storage",
                "billing@cloudstore.net",
                "Your storage is almost full",
                "You've used 95% of your storage. Upgrade to keep syncing files.",
                datetime!(2024-03-09 06:55 UTC),
                Promotions,
            )
        },
        email(
            12,
            "Jessica Brown",
            "jbrown@globex.com",
            "Contract renewal",
            "Following up on the renewal terms we discussed last week.",
            datetime!(2024-03-08 14:00 UTC),
            Primary,
        ),
    ]
}
