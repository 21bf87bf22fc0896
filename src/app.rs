use crate::goto::{GoTo, GoToInput, GoToOutput, GoToState};
use crate::help::Help;
use crate::theme::{BASE_STYLE, ERROR_STYLE};
use crate::widget::CalendarView;
use crossterm::event::{poll, read, KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    backend::Backend,
    buffer::Buffer,
    layout::Rect,
    widgets::{Paragraph, StatefulWidget, Widget},
    Terminal,
};
use std::io::{self, Write};
use time::{Date, Duration};
use weekgrid::{
    CalendarGridEngine, CalendarHandler, Clock, Direction, Event, EventSource, Interactions,
    PollConfig,
};

/// Reports day and event activations to the log
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct LogHandler;

impl CalendarHandler for LogHandler {
    fn on_day_click(&mut self, year: i32, month: u8, day: u8) {
        tracing::info!(year, month, day, "Day selected");
    }

    fn on_event_click(&mut self, event_id: &str) {
        tracing::info!(event_id, "Event opened");
    }

    fn on_event_dropped(&mut self, event_id: &str, year: i32, month: u8, day: u8) {
        tracing::info!(event_id, year, month, day, "Event dropped");
    }
}

/// Everything the calendar front end needs besides the engine itself
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct AppSettings {
    pub(crate) interactions: Interactions,
    pub(crate) poll: PollConfig,
}

#[derive(Debug)]
pub(crate) struct App<C, S, H> {
    engine: CalendarGridEngine<C>,
    source: S,
    handler: H,
    settings: AppSettings,
    /// The source's events that have readable dates
    events: Vec<Event>,
    today: Date,
    cursor: Date,
    /// ID of the selected event on the cursor's day
    selected: Option<String>,
    /// An event that has been picked up and not yet dropped
    moving: Option<Event>,
    state: AppState,
}

impl<C: Clock, S: EventSource, H: CalendarHandler> App<C, S, H> {
    pub(crate) fn new(
        engine: CalendarGridEngine<C>,
        source: S,
        handler: H,
        settings: AppSettings,
        today: Date,
    ) -> App<C, S, H> {
        let mut app = App {
            engine,
            source,
            handler,
            settings,
            events: Vec::new(),
            today,
            cursor: today,
            selected: None,
            moving: None,
            state: AppState::Calendar,
        };
        app.load_events();
        app.reset_cursor();
        app
    }

    pub(crate) fn run<B: Backend>(mut self, mut terminal: Terminal<B>) -> io::Result<()>
    where
        io::Error: From<B::Error>,
    {
        while !self.quitting() {
            self.draw(&mut terminal)?;
            match self.settings.poll.interval() {
                Some(interval) if !poll(interval)? => self.refresh(),
                _ => self.handle_input()?,
            }
        }
        Ok(())
    }

    fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()>
    where
        io::Error: From<B::Error>,
    {
        terminal.draw(|frame| frame.render_widget(self, frame.area()))?;
        Ok(())
    }

    fn handle_input(&mut self) -> io::Result<()> {
        let normal_modifiers = KeyModifiers::NONE | KeyModifiers::SHIFT;
        if let Some(KeyEvent {
            code, modifiers, ..
        }) = read()?.as_key_press_event()
        {
            if modifiers == KeyModifiers::CONTROL && code == KeyCode::Char('c') {
                self.state = AppState::Quitting;
            } else if !normal_modifiers.contains(modifiers) || !self.handle_key(code) {
                self.beep()?;
            }
        }
        // else: Redraw on resize, and we might as well redraw on other stuff
        // too
        Ok(())
    }

    // Returns `false` if the user pressed an invalid key or asked for
    // something that could not be done
    fn handle_key(&mut self, key: KeyCode) -> bool {
        match &mut self.state {
            AppState::Calendar => match key {
                KeyCode::Char('n') | KeyCode::PageDown => self.navigate(Direction::Next),
                KeyCode::Char('p') | KeyCode::PageUp => self.navigate(Direction::Previous),
                KeyCode::Char('0') | KeyCode::Home => self.navigate(Direction::Current),
                KeyCode::Char('t') => self.toggle_mode(),
                KeyCode::Char('h') | KeyCode::Left => self.move_cursor(-1),
                KeyCode::Char('l') | KeyCode::Right => self.move_cursor(1),
                KeyCode::Char('k') | KeyCode::Up => self.move_cursor(-7),
                KeyCode::Char('j') | KeyCode::Down => self.move_cursor(7),
                KeyCode::Enter => self
                    .settings
                    .interactions
                    .click_day(&mut self.handler, self.cursor),
                KeyCode::Tab => self.cycle_events(true),
                KeyCode::BackTab => self.cycle_events(false),
                KeyCode::Char('o') => self.open_event(),
                KeyCode::Char('d') => self.pick_up_or_drop(),
                KeyCode::Char('g') => {
                    self.state = AppState::GoingTo(GoToState::new(self.engine.mode().unit()));
                    true
                }
                KeyCode::Esc if self.moving.is_some() => {
                    self.moving = None;
                    true
                }
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.state = AppState::Quitting;
                    true
                }
                KeyCode::Char('?') => {
                    self.state = AppState::Helping;
                    true
                }
                _ => false,
            },
            AppState::Helping => {
                self.state = AppState::Calendar;
                true
            }
            AppState::GoingTo(state) => {
                if matches!(key, KeyCode::Char('q' | 'g') | KeyCode::Esc) {
                    self.state = AppState::Calendar;
                    return true;
                }
                let output = match key {
                    KeyCode::Char(c) => match c.to_digit(10).and_then(|d| u8::try_from(d).ok()) {
                        Some(d) => state.handle_input(GoToInput::Digit(d)),
                        None => GoToOutput::Invalid,
                    },
                    KeyCode::Backspace | KeyCode::Delete => {
                        state.handle_input(GoToInput::Backspace)
                    }
                    KeyCode::Enter => state.handle_input(GoToInput::Enter),
                    _ => GoToOutput::Invalid,
                };
                let r = match output {
                    GoToOutput::Ok => return true,
                    GoToOutput::Invalid => return false,
                    GoToOutput::Month { year, month } => self.engine.go_to_month(year, month),
                    GoToOutput::Week { year, week } => self.engine.go_to_week(year, week),
                };
                match r {
                    Ok(()) => {
                        self.state = AppState::Calendar;
                        self.reset_cursor();
                        true
                    }
                    Err(e) => {
                        tracing::debug!("Rejected go-to input: {e}");
                        false
                    }
                }
            }
            AppState::Quitting => false,
        }
    }

    fn beep(&self) -> io::Result<()> {
        io::stdout().write_all(b"\x07")
    }

    fn quitting(&self) -> bool {
        self.state == AppState::Quitting
    }

    fn navigate(&mut self, direction: Direction) -> bool {
        if direction == Direction::Current {
            match self.engine.clock().today() {
                Ok(today) => self.today = today,
                Err(e) => tracing::warn!("Keeping previous date for today: {e}"),
            }
        }
        match self.engine.navigate(direction, self.engine.mode().unit()) {
            Ok(()) => {
                self.reset_cursor();
                true
            }
            Err(e) => {
                tracing::warn!(?direction, "Failed to navigate calendar: {e}");
                false
            }
        }
    }

    fn toggle_mode(&mut self) -> bool {
        let mode = self.engine.mode();
        self.engine.set_mode(mode.toggled());
        match self.engine.jump_to(self.cursor) {
            Ok(()) => {
                self.selected = None;
                true
            }
            Err(e) => {
                tracing::warn!("Failed to switch calendar mode: {e}");
                self.engine.set_mode(mode);
                false
            }
        }
    }

    /// Put the cursor on today if it's in view, otherwise on the first day of
    /// the period being viewed
    fn reset_cursor(&mut self) {
        self.cursor = if self.engine.contains(self.today) {
            self.today
        } else {
            self.engine.range().start()
        };
        self.selected = None;
    }

    /// Move the cursor by `days`, paging the calendar if the cursor leaves
    /// the grid
    fn move_cursor(&mut self, days: i64) -> bool {
        let Some(target) = self.cursor.checked_add(Duration::days(days)) else {
            return false;
        };
        if !self.engine.grid_range().contains(target) {
            let direction = if days < 0 {
                Direction::Previous
            } else {
                Direction::Next
            };
            if let Err(e) = self.engine.navigate(direction, self.engine.mode().unit()) {
                tracing::warn!(?direction, "Failed to navigate calendar: {e}");
                return false;
            }
        }
        self.cursor = if self.engine.grid_range().contains(target) {
            target
        } else {
            self.engine.range().start()
        };
        self.selected = None;
        true
    }

    fn cursor_events(&self) -> Vec<&Event> {
        self.engine.filter_events_for_day(self.cursor, &self.events)
    }

    /// Position of the selected event among the events on the cursor's day
    fn selected_index(&self) -> Option<usize> {
        let id = self.selected.as_deref()?;
        self.cursor_events().iter().position(|ev| ev.id == id)
    }

    fn selected_event(&self) -> Option<&Event> {
        self.selected_index()
            .and_then(|i| self.cursor_events().get(i).copied())
    }

    fn cycle_events(&mut self, forwards: bool) -> bool {
        let events = self.cursor_events();
        let qty = events.len();
        if qty == 0 {
            return false;
        }
        let i = match (self.selected_index(), forwards) {
            (None, true) => 0,
            (None, false) => qty - 1,
            (Some(i), true) => (i + 1) % qty,
            (Some(i), false) => (i + qty - 1) % qty,
        };
        self.selected = events.get(i).map(|ev| ev.id.clone());
        true
    }

    fn open_event(&mut self) -> bool {
        let Some(id) = self.selected_event().map(|ev| ev.id.clone()) else {
            return false;
        };
        self.settings
            .interactions
            .click_event(&mut self.handler, &id)
    }

    fn pick_up_or_drop(&mut self) -> bool {
        if let Some(ev) = self.moving.take() {
            return self
                .settings
                .interactions
                .drop_event(&mut self.handler, &ev.id, self.cursor);
        }
        if !self.settings.interactions.drag_and_drop {
            return false;
        }
        let Some(ev) = self.selected_event().cloned() else {
            return false;
        };
        self.moving = Some(ev);
        true
    }

    fn refresh(&mut self) {
        match self.source.refresh(self.settings.poll.action()) {
            Ok(()) => self.load_events(),
            Err(e) => tracing::warn!("Failed to refresh events: {:#}", anyhow::Error::new(e)),
        }
    }

    fn load_events(&mut self) {
        self.events = self
            .source
            .events()
            .iter()
            .filter(|ev| match ev.day() {
                Ok(_) => true,
                Err(e) => {
                    tracing::warn!(id = ev.id.as_str(), "Ignoring event: {e}");
                    false
                }
            })
            .cloned()
            .collect();
        if self.selected_index().is_none() {
            self.selected = None;
        }
    }
}

impl<C: Clock, S: EventSource, H: CalendarHandler> Widget for &mut App<C, S, H> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, BASE_STYLE);
        match self.engine.grid() {
            Ok(grid) => CalendarView {
                grid: &grid,
                range: self.engine.range(),
                week: self.engine.week_config(),
                today: self.today,
                cursor: self.cursor,
                events: &self.events,
                selected: self.selected_index(),
                moving: self.moving.as_ref(),
            }
            .render(area, buf),
            Err(e) => Paragraph::new(e.to_string())
                .style(ERROR_STYLE)
                .render(area, buf),
        }
        match self.state {
            AppState::Helping => Help(BASE_STYLE).render(area, buf),
            AppState::GoingTo(ref mut state) => GoTo.render(area, buf, state),
            AppState::Calendar | AppState::Quitting => (),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum AppState {
    Calendar,
    Helping,
    GoingTo(GoToState),
    Quitting,
}
