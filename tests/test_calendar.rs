//! Integration tests for the month grid.

use dashkit::{
    core::{CalendarGrid, Dated, MonthCursor, calendar::GRID_CELLS, events_on},
    data::event::{self, CalendarEvent},
};
use proptest::prelude::*;
use time::{Date, Duration, Month, Weekday, macros::date};

struct Marker(Date);

impl Dated for Marker {
    fn date(&self) -> Date {
        self.0
    }
}

#[test]
fn test_february_2024_grid() -> anyhow::Result<()> {
    let cursor = MonthCursor::new(2024, Month::February)?;
    let grid = CalendarGrid::build::<Marker>(cursor, date!(2024-02-15), &[]);
    let cells = grid.cells();

    assert_eq!(cells.len(), GRID_CELLS);
    assert_eq!(cells[0].date, date!(2024-01-28));
    assert_eq!(cells[0].date.weekday(), Weekday::Sunday);
    assert_eq!(cells[41].date, date!(2024-03-09));
    assert_eq!(cells[41].date.weekday(), Weekday::Saturday);

    // Jan 28..31 lead in, Feb has 29 days, Mar 1..9 trail
    assert_eq!(cells.iter().filter(|cell| cell.in_month).count(), 29);
    assert!(!cells[3].in_month);
    assert!(cells[4].in_month);
    assert_eq!(cursor.days_in_month(), 29);
    assert_eq!(cursor.label(), "February 2024");

    let today = grid.today().ok_or_else(|| anyhow::anyhow!("today missing"))?;
    assert_eq!(today.date, date!(2024-02-15));
    assert_eq!(grid.weeks().count(), 6);
    Ok(())
}

#[test]
fn test_event_counts_use_exact_dates() -> anyhow::Result<()> {
    let events = event::seed();
    let cursor = MonthCursor::new(2024, Month::March)?;
    let grid = event::month_grid(cursor, date!(2024-03-15), &events);

    let cell = grid
        .cell(date!(2024-03-15))
        .ok_or_else(|| anyhow::anyhow!("Mar 15 missing"))?;
    assert_eq!(cell.event_count, 2);
    assert!(cell.is_today);

    // Feb 29 shows up in the leading week of March's grid
    let leap_day = grid
        .cell(date!(2024-02-29))
        .ok_or_else(|| anyhow::anyhow!("Feb 29 missing"))?;
    assert!(!leap_day.in_month);
    assert!(leap_day.has_events());

    assert!(grid.cell(date!(2024-04-15)).is_none());

    let on_day: Vec<&CalendarEvent> = events_on(&events, date!(2024-03-15));
    assert_eq!(on_day.iter().map(|e| e.id).collect::<Vec<_>>(), vec![3, 4]);
    Ok(())
}

#[test]
fn test_today_outside_month_is_not_marked() -> anyhow::Result<()> {
    let cursor = MonthCursor::new(2024, Month::June)?;
    let grid = CalendarGrid::build::<Marker>(cursor, date!(2024-12-25), &[]);
    assert!(grid.today().is_none());
    Ok(())
}

#[test]
fn test_cursor_navigation_wraps_years() -> anyhow::Result<()> {
    let december = MonthCursor::new(2023, Month::December)?;
    let january = december.next();
    assert_eq!((january.year(), january.month()), (2024, Month::January));
    assert_eq!(january.previous(), december);

    assert_eq!(MonthCursor::containing(date!(2024-02-29)).first_day(), date!(2024-02-01));
    assert!(MonthCursor::new(10_000, Month::January).is_err());
    Ok(())
}

#[test]
fn test_upcoming_events_are_ordered() -> anyhow::Result<()> {
    let events = event::seed();
    let upcoming = event::upcoming(&events, date!(2024-03-15), 3);
    // The all-day invoice run leads the dentist appointment on the same day
    assert_eq!(upcoming.iter().map(|e| e.id).collect::<Vec<_>>(), vec![3, 4, 5]);
    Ok(())
}

proptest! {
    #[test]
    fn prop_grid_invariants(year in 1900i32..2200, month in 1u8..=12, day in 1u8..=28) {
        let month = Month::try_from(month).unwrap();
        let cursor = MonthCursor::new(year, month).unwrap();
        let today = Date::from_calendar_date(year, month, day).unwrap();
        let grid = CalendarGrid::build(cursor, today, &[Marker(today)]);
        let cells = grid.cells();

        prop_assert_eq!(cells.len(), GRID_CELLS);
        prop_assert_eq!(cells[0].date.weekday(), Weekday::Sunday);
        prop_assert!(cells[0].date <= cursor.first_day());
        prop_assert_eq!(cells.iter().filter(|cell| cell.is_today).count(), 1);
        prop_assert_eq!(cells.iter().filter(|cell| cell.has_events()).count(), 1);
        for pair in cells.windows(2) {
            prop_assert_eq!(pair[1].date - pair[0].date, Duration::days(1));
        }
    }
}
