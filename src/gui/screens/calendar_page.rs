use iced::{
    Element, Length, Task,
    widget::{Column, Row, button, column, container, row, scrollable, text},
};
use time::Date;

use crate::{
    core::{MonthCursor, calendar::WEEKDAY_LABELS, events_on},
    data::event::{CalendarEvent, month_grid, upcoming},
    gui::{
        AppState,
        screens::{Screen, ScreenMessage},
    },
};

const UPCOMING_LIMIT: usize = 5;

#[derive(Debug, Clone)]
pub struct CalendarPageScreen {
    events: Vec<CalendarEvent>,
    cursor: MonthCursor,
    today: Date,
    selected: Option<Date>,
}

#[derive(Debug, Clone)]
pub enum CalendarPageMessage {
    PreviousMonth,
    NextMonth,
    Today,
    SelectDay(Date),
}

impl CalendarPageScreen {
    pub fn new(events: Vec<CalendarEvent>, today: Date) -> Self {
        Self {
            events,
            cursor: MonthCursor::containing(today),
            today,
            selected: None,
        }
    }
}

impl Screen for CalendarPageScreen {
    type Message = CalendarPageMessage;
    type ParentMessage = std::convert::Infallible;

    fn view(&self) -> Element<'_, ScreenMessage<Self>> {
        let grid = month_grid(self.cursor, self.today, &self.events);

        let header = row![
            button("<").on_press(ScreenMessage::ScreenMessage(CalendarPageMessage::PreviousMonth)),
            text(self.cursor.label()).size(24).width(Length::Fill),
            button("Today").on_press(ScreenMessage::ScreenMessage(CalendarPageMessage::Today)),
            button(">").on_press(ScreenMessage::ScreenMessage(CalendarPageMessage::NextMonth)),
        ]
        .spacing(10);

        let labels: Vec<Element<'_, ScreenMessage<Self>>> = WEEKDAY_LABELS
            .iter()
            .map(|label| text(*label).width(Length::FillPortion(1)).into())
            .collect();
        let weekdays = Row::with_children(labels);

        let mut weeks = Column::new().spacing(4);
        for week in grid.weeks() {
            let mut cells = Row::new().spacing(4);
            for cell in week {
                let mut label = cell.date.day().to_string();
                if cell.is_today {
                    label = format!("[{label}]");
                }
                if cell.has_events() {
                    label.push_str(&format!(" ({})", cell.event_count));
                }
                let mut day = button(text(label)).width(Length::FillPortion(1));
                if cell.in_month {
                    day = day.on_press(ScreenMessage::ScreenMessage(CalendarPageMessage::SelectDay(
                        cell.date,
                    )));
                }
                cells = cells.push(day);
            }
            weeks = weeks.push(cells);
        }

        let agenda: Vec<&CalendarEvent> = match self.selected {
            Some(date) => events_on(&self.events, date),
            None => upcoming(&self.events, self.today, UPCOMING_LIMIT),
        };
        let agenda_title = match self.selected {
            Some(date) => format!("Events on {date}"),
            None => "Upcoming".to_string(),
        };
        let mut agenda_list = Column::new().spacing(4).push(text(agenda_title).size(20));
        if agenda.is_empty() {
            agenda_list = agenda_list.push(text("Nothing scheduled."));
        }
        for event in agenda {
            let mut line = format!("{}  {}  {}", event.date, event.time_range(), event.title);
            if let Some(location) = &event.location {
                line.push_str(&format!(" @ {location}"));
            }
            agenda_list = agenda_list.push(text(line));
        }

        scrollable(
            container(column![header, weekdays, weeks, agenda_list].spacing(16)).padding(20),
        )
        .into()
    }

    fn update(
        &mut self,
        message: Self::Message,
        state: &mut AppState,
    ) -> Task<ScreenMessage<Self>> {
        match message {
            CalendarPageMessage::PreviousMonth => {
                self.cursor = self.cursor.previous();
                self.selected = None;
            }
            CalendarPageMessage::NextMonth => {
                self.cursor = self.cursor.next();
                self.selected = None;
            }
            CalendarPageMessage::Today => {
                self.today = state.today;
                self.cursor = MonthCursor::containing(state.today);
                self.selected = Some(state.today);
            }
            CalendarPageMessage::SelectDay(date) => self.selected = Some(date),
        }
        Task::none()
    }
}
