use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use time::{Date, macros::date};

use crate::{
    core::{FacetSpec, Record, SortKey, record::facet_enum},
    data::{Page, RecordAction},
    render::{Column, badge},
};

facet_enum! {
    pub enum Priority {
        Low => "low",
        Medium => "medium",
        High => "high",
        Urgent => "urgent",
    }
}

facet_enum! {
    pub enum TicketStatus {
        Open => "open",
        InProgress => "in_progress",
        Resolved => "resolved",
        Closed => "closed",
    }
}

impl TicketStatus {
    pub fn is_active(self) -> bool {
        matches!(self, TicketStatus::Open | TicketStatus::InProgress)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: u32,
    pub subject: String,
    pub requester: String,
    pub priority: Priority,
    pub status: TicketStatus,
    pub assignee: Option<String>,
    pub tags: Vec<String>,
    pub created_on: Date,
}

impl Record for Ticket {
    type Id = u32;

    const FACETS: &'static [FacetSpec] = &[
        FacetSpec::new("priority", Priority::VALUES),
        FacetSpec::new("status", TicketStatus::VALUES),
    ];
    const FLAGS: &'static [&'static str] = &["unassigned"];
    const SORT_KEYS: &'static [&'static str] = &["priority", "created", "subject"];

    fn id(&self) -> u32 {
        self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.subject.as_str(), self.requester.as_str()];
        fields.extend(self.assignee.as_deref());
        fields.extend(self.tags.iter().map(String::as_str));
        fields
    }

    fn facet(&self, name: &str) -> Option<&'static str> {
        match name {
            "priority" => Some(self.priority.as_str()),
            "status" => Some(self.status.as_str()),
            _ => None,
        }
    }

    fn flag(&self, name: &str) -> Option<bool> {
        match name {
            "unassigned" => Some(self.assignee.is_none()),
            _ => None,
        }
    }

    fn sort_key(&self, key: &str) -> Option<SortKey> {
        match key {
            "priority" => Some(SortKey::Int(self.priority as i64)),
            "created" => Some(SortKey::Date(self.created_on)),
            "subject" => Some(SortKey::text(&self.subject)),
            _ => None,
        }
    }
}

/// Open and in-progress tickets per priority. Every priority is present.
pub fn active_by_priority(tickets: &[Ticket]) -> BTreeMap<Priority, usize> {
    let mut counts: BTreeMap<Priority, usize> =
        Priority::ALL.iter().map(|priority| (*priority, 0)).collect();
    for ticket in tickets.iter().filter(|ticket| ticket.status.is_active()) {
        *counts.entry(ticket.priority).or_default() += 1;
    }
    counts
}

pub fn resolve(ticket: &Ticket) -> Ticket {
    Ticket {
        status: TicketStatus::Resolved,
        ..ticket.clone()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TicketPage;

impl Page for TicketPage {
    const NAME: &'static str = "tickets";
    const TITLE: &'static str = "Support Tickets";

    type Record = Ticket;

    fn seed() -> Vec<Ticket> {
        seed()
    }

    fn columns() -> Vec<Column<Ticket>> {
        vec![
            Column::new("#", |t: &Ticket| format!("TKT-{:04}", t.id)),
            Column::new("Subject", |t: &Ticket| t.subject.clone()),
            Column::new("Requester", |t: &Ticket| t.requester.clone()),
            Column::new("Priority", |t: &Ticket| badge(t.priority)),
            Column::new("Status", |t: &Ticket| badge(t.status)),
            Column::new("Assignee", |t: &Ticket| {
                t.assignee.clone().unwrap_or_else(|| "Unassigned".to_string())
            }),
            Column::new("Tags", |t: &Ticket| t.tags.join(", ")),
        ]
    }

    fn actions() -> Vec<RecordAction<Ticket>> {
        vec![RecordAction::new("resolve", "Resolve", resolve)]
    }

    fn summary(records: &[Ticket]) -> Vec<(&'static str, String)> {
        let active = active_by_priority(records);
        let count = |priority: Priority| active.get(&priority).copied().unwrap_or(0).to_string();
        vec![
            ("Urgent", count(Priority::Urgent)),
            ("High", count(Priority::High)),
            ("Medium", count(Priority::Medium)),
            ("Low", count(Priority::Low)),
        ]
    }
}

fn ticket(
    id: u32,
    subject: &str,
    requester: &str,
    priority: Priority,
    status: TicketStatus,
    assignee: Option<&str>,
    tags: &[&str],
    created_on: Date,
) -> Ticket {
    Ticket {
        id,
        subject: subject.to_string(),
        requester: requester.to_string(),
        priority,
        status,
        assignee: assignee.map(str::to_string),
        tags: tags.iter().map(|tag| tag.to_string()).collect(),
        created_on,
    }
}

pub fn seed() -> Vec<Ticket> {
    use Priority as P;
    use TicketStatus as S;
    vec![
        ticket(
            1,
            "Cannot log in after password reset",
            "Alice Cooper",
            P::Urgent,
            S::Open,
            None,
            &["login", "auth"],
            date!(2024-03-14),
        ),
        ticket(
            2,
            "Invoice PDF shows wrong currency",
            "Bob Martin",
            P::High,
            S::InProgress,
            Some("Sarah Johnson"),
            &["billing"],
            date!(2024-03-13),
        ),
        ticket(
            3,
            "Feature request: dark mode for reports",
            "Carol White",
            P::Low,
            S::Open,
            None,
            &["feature-request", "ui"],
            date!(2024-03-12),
        ),
        ticket(
            4,
            "Export to CSV times out",
            "Dan Brown",
            P::Medium,
            S::InProgress,
            Some("Michael Chen"),
            &["export", "performance"],
            date!(2024-03-11),
        ),
        ticket(
            5,
            "Refund not received",
            "Eve Adams",
            P::High,
            S::Resolved,
            Some("Emily Davis"),
            &["billing", "refund"],
            date!(2024-03-08),
        ),
        ticket(
            6,
            "Dashboard charts not loading on Safari",
            "Frank Ocean",
            P::Medium,
            S::Open,
            Some("Michael Chen"),
            &["ui", "browser"],
            date!(2024-03-10),
        ),
        ticket(
            7,
            "API rate limit too low",
            "Grace Hopper",
            P::Low,
            S::Closed,
            Some("Sarah Johnson"),
            &["api"],
            date!(2024-03-02),
        ),
        ticket(
            8,
            "Data breach notification question",
            "Henry Ford",
            P::Urgent,
            S::InProgress,
            Some("Emily Davis"),
            &["security"],
            date!(2024-03-15),
        ),
        ticket(
            9,
            "Cannot upload files larger than 10MB",
            "Ivy Chen",
            P::Medium,
            S::Open,
            None,
            &["files", "upload"],
            date!(2024-03-09),
        ),
        ticket(
            10,
            "Typo on pricing page",
            "Jack Black",
            P::Low,
            S::Resolved,
            Some("David Wilson"),
            &["website"],
            date!(2024-03-05),
        ),
    ]
}
