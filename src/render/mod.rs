//! Plain-text render surface: tables, cards, badges, empty states and the
//! month grid, as printed by the CLI.

use std::fmt::{Display, Write};

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::{
    core::{
        CalendarGrid, DerivedView, PageLink, PageState, PageWindow, ViewMode, ViewState,
        calendar::WEEKDAY_LABELS,
    },
    data::Page,
};

const MAX_CELL_WIDTH: usize = 40;

/// One table column: a header and how to turn a record into a cell.
pub struct Column<R> {
    pub title: &'static str,
    pub cell: fn(&R) -> String,
}

impl<R> Column<R> {
    pub const fn new(title: &'static str, cell: fn(&R) -> String) -> Self {
        Self { title, cell }
    }
}

impl<R> Clone for Column<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for Column<R> {}

pub fn badge(label: impl Display) -> String {
    format!("[{label}]")
}

pub fn mark(on: bool, symbol: &str) -> String {
    if on { symbol.to_string() } else { String::new() }
}

/// Cut `value` to at most `MAX_CELL_WIDTH` display columns, ending in `…`.
fn clip(value: String) -> String {
    if value.width() <= MAX_CELL_WIDTH {
        return value;
    }
    let budget = MAX_CELL_WIDTH - 1;
    let mut used = 0;
    let mut clipped = String::new();
    for ch in value.chars() {
        let width = ch.width().unwrap_or(0);
        if used + width > budget {
            break;
        }
        used += width;
        clipped.push(ch);
    }
    clipped.push('…');
    clipped
}

pub fn table<R>(columns: &[Column<R>], rows: &[&R]) -> String {
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| columns.iter().map(|column| clip((column.cell)(row))).collect())
        .collect();

    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, column)| {
            cells
                .iter()
                .map(|row| row[i].width())
                .chain(std::iter::once(column.title.width()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    let header: Vec<String> = columns
        .iter()
        .zip(&widths)
        .map(|(column, width)| pad(column.title, *width))
        .collect();
    push_line(&mut out, &header.join("  "));
    let rule: Vec<String> = widths.iter().map(|width| "-".repeat(*width)).collect();
    push_line(&mut out, &rule.join("  "));
    for row in &cells {
        let line: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(cell, width)| pad(cell, *width))
            .collect();
        push_line(&mut out, &line.join("  "));
    }
    out
}

/// Grid mode: one block per record, `Title: value` per column.
pub fn cards<R>(columns: &[Column<R>], rows: &[&R]) -> String {
    let label_width = columns
        .iter()
        .map(|column| column.title.width())
        .max()
        .unwrap_or(0);
    let mut out = String::new();
    for (i, row) in rows.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        for column in columns {
            let line = format!(
                "{}: {}",
                pad(column.title, label_width),
                clip((column.cell)(row))
            );
            push_line(&mut out, &line);
        }
    }
    out
}

/// The message shown instead of rows, if there are no rows.
pub fn empty_state<R>(title: &str, state: &ViewState<'_, R>) -> Option<String> {
    let noun = title.to_lowercase();
    match state {
        ViewState::Loading => Some(format!("Loading {noun}...")),
        ViewState::Unpopulated => Some(format!("No {noun} yet.")),
        ViewState::NoResults { total } => Some(format!(
            "No {noun} match the current filters ({total} hidden)."
        )),
        ViewState::Rows(_) => None,
    }
}

pub fn pagination_footer(window: &PageWindow) -> String {
    if window.total_pages <= 1 {
        return format!("Showing {} of {}", window.len(), window.total_items);
    }
    let links: Vec<String> = window
        .page_links(1)
        .into_iter()
        .map(|link| match link {
            PageLink::Page(page) if page == window.current_page => format!("[{page}]"),
            PageLink::Page(page) => page.to_string(),
            PageLink::Gap => "…".to_string(),
        })
        .collect();
    format!(
        "Showing {}-{} of {} | Page {} of {} | {} {} {}",
        window.start + 1,
        window.end,
        window.total_items,
        window.current_page,
        window.total_pages,
        if window.has_previous() { "<" } else { " " },
        links.join(" "),
        if window.has_next() { ">" } else { " " },
    )
}

pub fn derived_view<R>(
    title: &str,
    columns: &[Column<R>],
    view: &DerivedView<'_, R>,
    mode: ViewMode,
) -> String {
    if let Some(message) = empty_state(title, &view.state) {
        return format!("{message}\n");
    }
    let rows = view.state.rows();
    let mut out = match mode {
        ViewMode::List => table(columns, rows),
        ViewMode::Grid => cards(columns, rows),
    };
    out.push('\n');
    push_line(&mut out, &pagination_footer(&view.window));
    out
}

/// Title, summary figures and the current derived view of a page.
pub fn page<P: Page>(state: &PageState<P::Record>) -> String {
    let mut out = String::new();
    push_line(&mut out, P::TITLE);
    push_line(&mut out, &"=".repeat(P::TITLE.width()));

    let summary = P::summary(state.records());
    if !summary.is_empty() {
        let figures: Vec<String> = summary
            .iter()
            .map(|(label, value)| format!("{label}: {value}"))
            .collect();
        push_line(&mut out, &figures.join(" | "));
    }
    out.push('\n');
    out.push_str(&derived_view(
        P::TITLE,
        &P::columns(),
        &state.derive(),
        state.view_mode(),
    ));
    out
}

/// `[ 5]` is today, `( 1)` belongs to a neighbouring month, `*` marks days
/// with events.
pub fn calendar_month(grid: &CalendarGrid) -> String {
    let mut out = String::new();
    push_line(&mut out, &grid.cursor().label());
    let header: Vec<String> = WEEKDAY_LABELS.iter().map(|day| format!(" {day} ")).collect();
    push_line(&mut out, &header.join(" "));
    for week in grid.weeks() {
        let line: Vec<String> = week
            .iter()
            .map(|cell| {
                let (open, close) = if cell.is_today {
                    ('[', ']')
                } else if !cell.in_month {
                    ('(', ')')
                } else if cell.has_events() {
                    (' ', '*')
                } else {
                    (' ', ' ')
                };
                format!("{open}{:>2}{close}", cell.date.day())
            })
            .collect();
        push_line(&mut out, &line.join(" "));
    }
    out
}

fn pad(value: &str, width: usize) -> String {
    let len = value.width();
    let mut padded = String::with_capacity(width.max(len));
    padded.push_str(value);
    padded.extend(std::iter::repeat_n(' ', width.saturating_sub(len)));
    padded
}

fn push_line(out: &mut String, line: &str) {
    let _ = writeln!(out, "{}", line.trim_end());
}
