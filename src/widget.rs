use crate::theme::{
    AGENDA_DAY_STYLE, BASE_STYLE, CURSOR_MODIFIER, EVENT_MARK_STYLE, MOVING_EVENT_STYLE,
    PADDING_DAY_STYLE, SELECTED_EVENT_STYLE, TITLE_STYLE, WEEKDAY_STYLE,
};
use ratatui::{prelude::*, widgets::*};
use std::iter::zip;
use time::{Date, Weekday};
use weekgrid::{filter_events_for_day, CalendarRange, Event, Grid, WeekConfig};

/// Width of the calendar grid in columns
const MAIN_WIDTH: u16 = 46;

/// Number of columns per day of week
const DAY_WIDTH: u16 = 7;

/// Number of lines taken up by the title, the weekday header, and its rule
const HEADER_LINES: u16 = 3;

/// Number of lines taken up by each week: the day numbers, then the event
/// markers beneath them
const WEEK_LINES: u16 = 2;

/// Most event markers drawn under a single day
const MAX_MARKS: usize = 3;

const ACS_HLINE: char = '─';
const EVENT_MARK: char = '•';
const MORE_MARK: char = '+';

/// A month or week grid followed by the events of the selected day (or, for a
/// week, of every day that has any)
#[derive(Clone, Copy, Debug)]
pub(crate) struct CalendarView<'a> {
    pub(crate) grid: &'a Grid,
    pub(crate) range: CalendarRange,
    pub(crate) week: WeekConfig,
    pub(crate) today: Date,
    pub(crate) cursor: Date,
    pub(crate) events: &'a [Event],
    /// Index into the cursor day's events
    pub(crate) selected: Option<usize>,
    pub(crate) moving: Option<&'a Event>,
}

impl CalendarView<'_> {
    fn title(&self) -> String {
        match self.grid {
            Grid::Month(_) => {
                let start = self.range.start();
                format!("{} {}", start.month(), start.year())
            }
            Grid::Week(row) => format!("{} to {}", row.first(), row.last()),
        }
    }

    fn day_style(&self, date: Date) -> Style {
        let style = if self.range.contains(date) {
            BASE_STYLE
        } else {
            PADDING_DAY_STYLE
        };
        if date == self.cursor {
            style.add_modifier(CURSOR_MODIFIER)
        } else {
            style
        }
    }

    fn agenda(&self) -> Vec<(String, Style)> {
        let mut lines = Vec::new();
        for &day in self.grid.rows().iter().flatten() {
            let events = filter_events_for_day(day, self.events);
            if day != self.cursor && (events.is_empty() || matches!(self.grid, Grid::Month(_))) {
                continue;
            }
            lines.push((format!("{} {day}", day.weekday()), AGENDA_DAY_STYLE));
            if events.is_empty() {
                lines.push((String::from("  No events"), BASE_STYLE));
            }
            for (i, ev) in events.into_iter().enumerate() {
                let style = if day == self.cursor && self.selected == Some(i) {
                    SELECTED_EVENT_STYLE
                } else if self.moving.is_some_and(|m| m.id == ev.id) {
                    MOVING_EVENT_STYLE
                } else {
                    BASE_STYLE
                };
                lines.push((format!("  {EVENT_MARK} {}", ev.title), style));
            }
        }
        if let Some(ev) = self.moving {
            lines.push((String::new(), BASE_STYLE));
            lines.push((
                format!("Moving {}: press d to drop, ESC to cancel", ev.title),
                MOVING_EVENT_STYLE,
            ));
        }
        lines
    }
}

impl Widget for CalendarView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let left = area.width.saturating_sub(MAIN_WIDTH) / 2;
        let area = Rect {
            x: area.x + left,
            width: MAIN_WIDTH.min(area.width),
            ..area
        };
        let mut canvas = BufferCanvas::new(area, buf);
        canvas.draw_title(&self.title());
        canvas.draw_header(self.week);
        let rows = self.grid.rows();
        for (i, row) in zip(0u16.., rows) {
            for (col, &date) in zip(0u16.., row) {
                canvas.draw_day(i, col, &show_day(date, date == self.today), self.day_style(date));
                let qty = filter_events_for_day(date, self.events).len();
                if qty > 0 {
                    canvas.draw_marks(i, col, qty);
                }
            }
        }
        let weeks = u16::try_from(rows.len()).unwrap_or(u16::MAX);
        let top = weeks
            .saturating_mul(WEEK_LINES)
            .saturating_add(HEADER_LINES + 1);
        for (y, (text, style)) in zip(top.., self.agenda()) {
            canvas.mvprint(y, 0, text, style);
        }
    }
}

fn show_day(date: Date, is_today: bool) -> String {
    if is_today {
        format!("[{:2}]", date.day())
    } else {
        format!(" {:2} ", date.day())
    }
}

fn weekday_abbrev(wd: Weekday) -> &'static str {
    match wd {
        Weekday::Sunday => "Su",
        Weekday::Monday => "Mo",
        Weekday::Tuesday => "Tu",
        Weekday::Wednesday => "We",
        Weekday::Thursday => "Th",
        Weekday::Friday => "Fr",
        Weekday::Saturday => "Sa",
    }
}

fn marks(qty: usize) -> String {
    if qty <= MAX_MARKS {
        String::from(EVENT_MARK).repeat(qty)
    } else {
        let mut s = String::from(EVENT_MARK).repeat(MAX_MARKS - 1);
        s.push(MORE_MARK);
        s
    }
}

#[derive(Debug, Eq, PartialEq)]
struct BufferCanvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl<'a> BufferCanvas<'a> {
    fn new(area: Rect, buf: &'a mut Buffer) -> Self {
        Self { area, buf }
    }

    fn draw_title(&mut self, title: &str) {
        let width = u16::try_from(title.chars().count()).unwrap_or(u16::MAX);
        self.mvprint(0, MAIN_WIDTH.saturating_sub(width) / 2, title, TITLE_STYLE);
    }

    fn draw_header(&mut self, week: WeekConfig) {
        let header = week
            .weekdays()
            .map(|wd| format!(" {} ", weekday_abbrev(wd)))
            .join("   ");
        self.mvprint(1, 0, header, WEEKDAY_STYLE);
        self.hline(2, 0, ACS_HLINE, MAIN_WIDTH);
    }

    fn draw_day(&mut self, week_no: u16, col: u16, s: &str, style: Style) {
        self.mvprint(week_no * WEEK_LINES + HEADER_LINES, DAY_WIDTH * col, s, style);
    }

    fn draw_marks(&mut self, week_no: u16, col: u16, qty: usize) {
        self.mvprint(
            week_no * WEEK_LINES + HEADER_LINES + 1,
            DAY_WIDTH * col + 1,
            marks(qty),
            EVENT_MARK_STYLE,
        );
    }

    fn mvprint<S: AsRef<str>>(&mut self, y: u16, x: u16, s: S, style: Style) {
        if y < self.area.height && x < self.area.width {
            let text = Text::styled(s.as_ref(), style);
            let width = u16::try_from(text.width()).unwrap_or(u16::MAX);
            // The Rect given to the Paragraph must lie entirely within the
            // buffer, so clip it to the calendar's area.
            Paragraph::new(text).render(
                Rect {
                    x: x + self.area.x,
                    y: y + self.area.y,
                    width: (self.area.width - x).min(width),
                    height: 1,
                },
                self.buf,
            );
        }
    }

    fn hline(&mut self, y: u16, x: u16, ch: char, length: u16) {
        self.mvprint(y, x, String::from(ch).repeat(length.into()), Style::new());
    }
}
