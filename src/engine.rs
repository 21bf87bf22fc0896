use crate::clock::{Clock, SystemClock};
use crate::error::{ConfigError, GridError, NavigateError, OutOfTimeError, ParseModeError};
use crate::events::{filter_events_for_day, EventRecord};
use crate::locale::Locale;
use crate::range::{compute_grid_range, inclusive_days, CalendarRange, GridRange};
use crate::week::{WeekConfig, WeekRow, DAYS_IN_WEEK};
use std::fmt;
use std::str::FromStr;
use time::{Date, Duration, Month};

/// Whether a calendar shows a whole month or a single week
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum CalendarMode {
    #[default]
    Month,
    Week,
}

impl CalendarMode {
    /// The unit by which this mode pages backwards and forwards
    pub fn unit(self) -> Unit {
        match self {
            CalendarMode::Month => Unit::Month,
            CalendarMode::Week => Unit::Week,
        }
    }

    pub fn toggled(self) -> CalendarMode {
        match self {
            CalendarMode::Month => CalendarMode::Week,
            CalendarMode::Week => CalendarMode::Month,
        }
    }
}

impl fmt::Display for CalendarMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalendarMode::Month => write!(f, "month"),
            CalendarMode::Week => write!(f, "week"),
        }
    }
}

impl FromStr for CalendarMode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<CalendarMode, ParseModeError> {
        match s.trim().to_ascii_lowercase().as_str() {
            "month" => Ok(CalendarMode::Month),
            "week" => Ok(CalendarMode::Week),
            _ => Err(ParseModeError),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Direction {
    Previous,
    Next,
    /// The period containing today
    Current,
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Unit {
    Month,
    Week,
}

/// Initial parameters for a [`CalendarGridEngine`].  Anything left unset
/// defaults to the current date.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CalendarOptions {
    year: Option<i32>,
    month: Option<u8>,
    week: Option<u8>,
    week_starts_at: u8,
    mode: CalendarMode,
    locale: Locale,
}

impl CalendarOptions {
    pub fn new() -> CalendarOptions {
        CalendarOptions::default()
    }

    pub fn year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    /// Month number, 1 through 12
    pub fn month(mut self, month: u8) -> Self {
        self.month = Some(month);
        self
    }

    /// Week number in the locale's numbering
    pub fn week(mut self, week: u8) -> Self {
        self.week = Some(week);
        self
    }

    /// First day of the week, 0 (Sunday) through 6 (Saturday)
    pub fn week_starts_at(mut self, weekday: u8) -> Self {
        self.week_starts_at = weekday;
        self
    }

    pub fn mode(mut self, mode: CalendarMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn locale<L: Into<Locale>>(mut self, locale: L) -> Self {
        self.locale = locale.into();
        self
    }
}

/// The period being shown together with its padded grid.  The two are
/// always replaced together.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct NavigationState {
    range: CalendarRange,
    grid: GridRange,
}

impl NavigationState {
    fn new(range: CalendarRange, cfg: WeekConfig) -> Result<NavigationState, OutOfTimeError> {
        let grid = compute_grid_range(range, cfg)?;
        Ok(NavigationState { range, grid })
    }

    pub fn range(&self) -> CalendarRange {
        self.range
    }

    pub fn grid(&self) -> GridRange {
        self.grid
    }
}

/// The dates to lay out for the active calendar mode
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Grid {
    Month(Vec<WeekRow>),
    Week(WeekRow),
}

impl Grid {
    pub fn rows(&self) -> &[WeekRow] {
        match self {
            Grid::Month(rows) => rows,
            Grid::Week(row) => std::slice::from_ref(row),
        }
    }
}

/// Computes month and week grids and keeps track of which period is being
/// viewed
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CalendarGridEngine<C = SystemClock> {
    clock: C,
    week: WeekConfig,
    mode: CalendarMode,
    locale: Locale,
    state: NavigationState,
}

impl<C: Clock> CalendarGridEngine<C> {
    pub fn new(options: CalendarOptions, clock: C) -> Result<Self, ConfigError> {
        let week = WeekConfig::from_index0(options.week_starts_at)?;
        let month = options.month.map(month_from_number).transpose()?;
        let range = match options.mode {
            CalendarMode::Month => {
                let (year, month) = match (options.year, month) {
                    (Some(y), Some(m)) => (y, m),
                    (year, month) => {
                        let today = clock.today()?;
                        (
                            year.unwrap_or_else(|| today.year()),
                            month.unwrap_or_else(|| today.month()),
                        )
                    }
                };
                month_range(year, month)?
            }
            CalendarMode::Week => {
                let anchor = week_anchor(&options.locale, options.year, options.week, &clock)?;
                CalendarRange::week_of(anchor, week)?
            }
        };
        let grid = compute_grid_range(range, week)?;
        tracing::debug!(
            start = %range.start(),
            end = %range.end(),
            grid_start = %grid.grid_start(),
            grid_end = %grid.grid_end(),
            mode = ?options.mode,
            "Initialized calendar"
        );
        Ok(CalendarGridEngine {
            clock,
            week,
            mode: options.mode,
            locale: options.locale,
            state: NavigationState { range, grid },
        })
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn week_config(&self) -> WeekConfig {
        self.week
    }

    pub fn mode(&self) -> CalendarMode {
        self.mode
    }

    /// Switch modes without changing the range being viewed
    pub fn set_mode(&mut self, mode: CalendarMode) {
        self.mode = mode;
    }

    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    pub fn set_locale<L: Into<Locale>>(&mut self, locale: L) {
        self.locale = locale.into();
    }

    pub fn state(&self) -> NavigationState {
        self.state
    }

    pub fn range(&self) -> CalendarRange {
        self.state.range
    }

    pub fn grid_range(&self) -> GridRange {
        self.state.grid
    }

    /// Whether `date` falls within the period being viewed, as opposed to
    /// the padding around it
    pub fn contains(&self, date: Date) -> bool {
        self.state.range.contains(date)
    }

    /// Move the calendar by one `unit` in the given direction, or to the
    /// `unit` containing today.
    ///
    /// Moving by months shifts both ends of the range, clamping each to the
    /// end of its new month rather than spilling into the month after.  On
    /// error, the calendar is left unchanged.
    pub fn navigate(&mut self, direction: Direction, unit: Unit) -> Result<(), NavigateError> {
        let current = self.state.range;
        let range = match (direction, unit) {
            (Direction::Previous, Unit::Month) => current.shift_months(-1)?,
            (Direction::Next, Unit::Month) => current.shift_months(1)?,
            (Direction::Previous, Unit::Week) => current.shift_weeks(-1)?,
            (Direction::Next, Unit::Week) => current.shift_weeks(1)?,
            (Direction::Current, unit) => self.range_containing(self.clock.today()?, unit)?,
        };
        self.state = NavigationState::new(range, self.week)?;
        tracing::debug!(
            ?direction,
            ?unit,
            start = %range.start(),
            end = %range.end(),
            "Navigated calendar"
        );
        Ok(())
    }

    /// Show the month or week (per the current mode) containing `date`
    pub fn jump_to(&mut self, date: Date) -> Result<(), OutOfTimeError> {
        let range = self.range_containing(date, self.mode.unit())?;
        self.state = NavigationState::new(range, self.week)?;
        tracing::debug!(%date, start = %range.start(), end = %range.end(), "Jumped to date");
        Ok(())
    }

    /// Show the given month.  The mode is left unchanged.
    pub fn go_to_month(&mut self, year: i32, month: u8) -> Result<(), ConfigError> {
        let range = month_range(year, month_from_number(month)?)?;
        self.state = NavigationState::new(range, self.week)?;
        Ok(())
    }

    /// Show week number `week` of `year` in the locale's numbering.  The
    /// mode is left unchanged.
    pub fn go_to_week(&mut self, year: i32, week: u8) -> Result<(), ConfigError> {
        let anchor = numbered_week_anchor(&self.locale, year, week)?;
        let range = CalendarRange::week_of(anchor, self.week)?;
        self.state = NavigationState::new(range, self.week)?;
        Ok(())
    }

    fn range_containing(&self, date: Date, unit: Unit) -> Result<CalendarRange, OutOfTimeError> {
        match unit {
            Unit::Month => CalendarRange::month_of(date),
            Unit::Week => CalendarRange::week_of(date, self.week),
        }
    }

    /// Navigate by the current mode's unit
    pub fn previous(&mut self) -> Result<(), NavigateError> {
        self.navigate(Direction::Previous, self.mode.unit())
    }

    pub fn next(&mut self) -> Result<(), NavigateError> {
        self.navigate(Direction::Next, self.mode.unit())
    }

    pub fn current(&mut self) -> Result<(), NavigateError> {
        self.navigate(Direction::Current, self.mode.unit())
    }

    /// Every date of the grid, split into rows of one week each
    pub fn month_grid(&self) -> Result<Vec<WeekRow>, GridError> {
        month_rows(self.state.grid)
    }

    /// The seven days of the week being viewed
    pub fn week_grid(&self) -> Result<WeekRow, GridError> {
        week_row(self.state.grid, self.week)
    }

    /// The grid for the active mode
    pub fn grid(&self) -> Result<Grid, GridError> {
        match self.mode {
            CalendarMode::Month => self.month_grid().map(Grid::Month),
            CalendarMode::Week => self.week_grid().map(Grid::Week),
        }
    }

    /// Returns the events in `events` that take place on `day`
    pub fn filter_events_for_day<'a, E: EventRecord>(
        &self,
        day: Date,
        events: &'a [E],
    ) -> Vec<&'a E> {
        filter_events_for_day(day, events)
    }
}

/// Returns the date whose week (per the engine's own week layout) is shown
/// when starting in week mode
fn week_anchor<C: Clock>(
    locale: &Locale,
    year: Option<i32>,
    week: Option<u8>,
    clock: &C,
) -> Result<Date, ConfigError> {
    match (year, week) {
        (None, None) => Ok(clock.today()?),
        (Some(y), Some(w)) => numbered_week_anchor(locale, y, w),
        (year, week) => {
            let numbering = locale.week_numbering();
            let (this_year, this_week) = numbering.week_of(clock.today()?)?;
            let year = year.unwrap_or(this_year);
            // This week's number may not exist in a shorter year
            let week = match week {
                Some(w) => w,
                None => this_week.min(numbering.weeks_in_year(year)?),
            };
            numbered_week_anchor(locale, year, week)
        }
    }
}

// Use the middle of the locale's week so that, when the engine's weeks start
// on a different day, the week that overlaps it most is chosen.
fn numbered_week_anchor(locale: &Locale, year: i32, week: u8) -> Result<Date, ConfigError> {
    let start = locale.week_numbering().start_of_week_number(year, week)?;
    Ok(start.checked_add(Duration::days(3)).unwrap_or(start))
}

fn month_from_number(month: u8) -> Result<Month, ConfigError> {
    Month::try_from(month).map_err(|_| ConfigError::InvalidMonth { month })
}

fn month_range(year: i32, month: Month) -> Result<CalendarRange, ConfigError> {
    CalendarRange::month(year, month).map_err(|_| ConfigError::InvalidYear { year })
}

fn month_rows(grid: GridRange) -> Result<Vec<WeekRow>, GridError> {
    let days = grid.day_count();
    if days % 7 != 0 {
        return Err(GridError::NotWeekAligned { days });
    }
    let dates = grid.days().collect::<Vec<_>>();
    Ok(dates
        .chunks_exact(DAYS_IN_WEEK)
        .filter_map(|chunk| <[Date; DAYS_IN_WEEK]>::try_from(chunk).ok())
        .map(WeekRow::from)
        .collect())
}

// The grid is re-snapped to whole weeks before being checked.  For any grid
// built by `compute_grid_range()` this changes nothing.
fn week_row(grid: GridRange, cfg: WeekConfig) -> Result<WeekRow, GridError> {
    let start = cfg
        .start_of_week(grid.grid_start())
        .unwrap_or_else(|_| grid.grid_start());
    let end = cfg
        .end_of_week(grid.grid_end())
        .unwrap_or_else(|_| grid.grid_end());
    let days = inclusive_days(start, end);
    if days != 7 {
        return Err(GridError::NotOneWeek { days });
    }
    WeekRow::starting(start).map_err(|_| GridError::NotOneWeek { days })
}
