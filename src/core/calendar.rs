use serde::Serialize;
use time::{Date, Duration, Month};

/// Six Sunday-aligned weeks.
pub const GRID_CELLS: usize = 42;
pub const WEEKDAY_LABELS: [&str; 7] = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"];

const MIN_YEAR: i32 = -9998;
const MAX_YEAR: i32 = 9998;

/// Anything that lands on a calendar day.
pub trait Dated {
    fn date(&self) -> Date;
}

/// A displayable month. Years are kept one short of the representable
/// range on either side so the surrounding grid weeks always exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct MonthCursor {
    first: Date,
}

impl MonthCursor {
    pub fn new(year: i32, month: Month) -> anyhow::Result<Self> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            anyhow::bail!("Year {} is outside the supported calendar range", year);
        }
        Ok(Self {
            first: Date::from_calendar_date(year, month, 1)?,
        })
    }

    /// The month containing `date`, clamped to the supported range.
    pub fn containing(date: Date) -> Self {
        let year = date.year().clamp(MIN_YEAR, MAX_YEAR);
        let month = if year == date.year() {
            date.month()
        } else if year == MIN_YEAR {
            Month::January
        } else {
            Month::December
        };
        Self::new(year, month).unwrap_or(Self {
            first: date.replace_day(1).unwrap_or(date),
        })
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    pub fn month(&self) -> Month {
        self.first.month()
    }

    pub fn first_day(&self) -> Date {
        self.first
    }

    pub fn days_in_month(&self) -> u8 {
        time::util::days_in_year_month(self.year(), self.month())
    }

    pub fn contains(&self, date: Date) -> bool {
        date.year() == self.year() && date.month() == self.month()
    }

    /// Saturates at the end of the supported range.
    pub fn next(self) -> Self {
        let (year, month) = match self.month() {
            Month::December => (self.year() + 1, Month::January),
            month => (self.year(), month.next()),
        };
        Self::new(year, month).unwrap_or(self)
    }

    /// Saturates at the start of the supported range.
    pub fn previous(self) -> Self {
        let (year, month) = match self.month() {
            Month::January => (self.year() - 1, Month::December),
            month => (self.year(), month.previous()),
        };
        Self::new(year, month).unwrap_or(self)
    }

    /// e.g. "February 2024"
    pub fn label(&self) -> String {
        format!("{} {}", self.month(), self.year())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CalendarCell {
    pub date: Date,
    pub in_month: bool,
    pub is_today: bool,
    pub event_count: usize,
}

impl CalendarCell {
    pub fn has_events(&self) -> bool {
        self.event_count > 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarGrid {
    cursor: MonthCursor,
    cells: Vec<CalendarCell>,
}

impl CalendarGrid {
    /// Lay out the month as 42 consecutive days starting on the Sunday on or
    /// before the 1st.
    pub fn build<E: Dated>(cursor: MonthCursor, today: Date, events: &[E]) -> Self {
        let first = cursor.first_day();
        let lead = i64::from(first.weekday().number_days_from_sunday());
        let start = first - Duration::days(lead);

        let cells = (0..GRID_CELLS as i64)
            .map(|offset| {
                let date = start + Duration::days(offset);
                CalendarCell {
                    date,
                    in_month: cursor.contains(date),
                    is_today: date == today,
                    event_count: events.iter().filter(|event| event.date() == date).count(),
                }
            })
            .collect();

        Self { cursor, cells }
    }

    pub fn cursor(&self) -> MonthCursor {
        self.cursor
    }

    pub fn cells(&self) -> &[CalendarCell] {
        &self.cells
    }

    pub fn weeks(&self) -> impl Iterator<Item = &[CalendarCell]> {
        self.cells.chunks(7)
    }

    pub fn today(&self) -> Option<&CalendarCell> {
        self.cells.iter().find(|cell| cell.is_today)
    }

    pub fn cell(&self, date: Date) -> Option<&CalendarCell> {
        self.cells.iter().find(|cell| cell.date == date)
    }
}

/// Events on `date`, in their original order.
pub fn events_on<E: Dated>(events: &[E], date: Date) -> Vec<&E> {
    events.iter().filter(|event| event.date() == date).collect()
}
