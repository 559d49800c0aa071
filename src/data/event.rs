use serde::{Deserialize, Serialize};
use time::{
    Date, Time,
    macros::{date, time},
};

use crate::{
    core::{CalendarGrid, Dated, FacetSpec, MonthCursor, Record, SortKey, record::facet_enum},
    data::Page,
    render::{Column, badge},
};

facet_enum! {
    pub enum EventCategory {
        Meeting => "meeting",
        Deadline => "deadline",
        Personal => "personal",
        Holiday => "holiday",
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: u32,
    pub title: String,
    pub date: Date,
    /// `None` for all-day events.
    pub start: Option<Time>,
    pub end: Option<Time>,
    pub category: EventCategory,
    pub location: Option<String>,
}

impl CalendarEvent {
    pub fn is_all_day(&self) -> bool {
        self.start.is_none()
    }

    pub fn time_range(&self) -> String {
        match (self.start, self.end) {
            (Some(start), Some(end)) => format!(
                "{:02}:{:02}-{:02}:{:02}",
                start.hour(),
                start.minute(),
                end.hour(),
                end.minute()
            ),
            (Some(start), None) => format!("{:02}:{:02}", start.hour(), start.minute()),
            _ => "All day".to_string(),
        }
    }
}

impl Dated for CalendarEvent {
    fn date(&self) -> Date {
        self.date
    }
}

impl Record for CalendarEvent {
    type Id = u32;

    const FACETS: &'static [FacetSpec] = &[FacetSpec::new("category", EventCategory::VALUES)];
    const SORT_KEYS: &'static [&'static str] = &["date", "title"];

    fn id(&self) -> u32 {
        self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.title.as_str()];
        fields.extend(self.location.as_deref());
        fields
    }

    fn facet(&self, name: &str) -> Option<&'static str> {
        match name {
            "category" => Some(self.category.as_str()),
            _ => None,
        }
    }

    fn sort_key(&self, key: &str) -> Option<SortKey> {
        match key {
            "date" => Some(SortKey::Date(self.date)),
            "title" => Some(SortKey::text(&self.title)),
            _ => None,
        }
    }
}

/// Events on or after `from`, soonest first; all-day events lead their day.
pub fn upcoming(events: &[CalendarEvent], from: Date, limit: usize) -> Vec<&CalendarEvent> {
    let mut upcoming: Vec<&CalendarEvent> =
        events.iter().filter(|event| event.date >= from).collect();
    upcoming.sort_by_key(|event| (event.date, event.start));
    upcoming.truncate(limit);
    upcoming
}

/// The month grid with these events counted per day.
pub fn month_grid(cursor: MonthCursor, today: Date, events: &[CalendarEvent]) -> CalendarGrid {
    CalendarGrid::build(cursor, today, events)
}

#[derive(Debug, Clone, Copy)]
pub struct CalendarPage;

impl Page for CalendarPage {
    const NAME: &'static str = "calendar";
    const TITLE: &'static str = "Calendar";

    type Record = CalendarEvent;

    fn seed() -> Vec<CalendarEvent> {
        seed()
    }

    fn columns() -> Vec<Column<CalendarEvent>> {
        vec![
            Column::new("Date", |e: &CalendarEvent| e.date.to_string()),
            Column::new("Time", CalendarEvent::time_range),
            Column::new("Event", |e: &CalendarEvent| e.title.clone()),
            Column::new("Category", |e: &CalendarEvent| badge(e.category)),
            Column::new("Location", |e: &CalendarEvent| e.location.clone().unwrap_or_default()),
        ]
    }
}

fn event(
    id: u32,
    title: &str,
    date: Date,
    hours: Option<(Time, Time)>,
    category: EventCategory,
    location: Option<&str>,
) -> CalendarEvent {
    CalendarEvent {
        id,
        title: title.to_string(),
        date,
        start: hours.map(|(start, _)| start),
        end: hours.map(|(_, end)| end),
        category,
        location: location.map(str::to_string),
    }
}

pub fn seed() -> Vec<CalendarEvent> {
    use EventCategory::*;
    vec![
        event(
            1,
            "Team standup",
            date!(2024-03-04),
            Some((time!(9:00), time!(9:15))),
            Meeting,
            Some("Zoom"),
        ),
        event(
            2,
            "Quarterly planning",
            date!(2024-03-07),
            Some((time!(13:00), time!(16:00))),
            Meeting,
            Some("Board room"),
        ),
        event(3, "Invoice run", date!(2024-03-15), None, Deadline, None),
        event(
            4,
            "Dentist",
            date!(2024-03-15),
            Some((time!(17:30), time!(18:15))),
            Personal,
            Some("Downtown clinic"),
        ),
        event(
            5,
            "Client demo: Acme",
            date!(2024-03-19),
            Some((time!(11:00), time!(12:00))),
            Meeting,
            Some("Acme HQ"),
        ),
        event(
            6,
            "Design review",
            date!(2024-03-21),
            Some((time!(14:00), time!(15:00))),
            Meeting,
            Some("Studio"),
        ),
        event(7, "Tax filing deadline", date!(2024-04-15), None, Deadline, None),
        event(8, "Good Friday", date!(2024-03-29), None, Holiday, None),
        event(
            9,
            "Product launch",
            date!(2024-03-27),
            Some((time!(10:00), time!(11:30))),
            Meeting,
            Some("Main stage"),
        ),
        event(
            10,
            "Birthday dinner",
            date!(2024-02-29),
            Some((time!(19:00), time!(22:00))),
            Personal,
            Some("Luigi's"),
        ),
    ]
}
