use crate::error::{ConfigError, OutOfTimeError};
use std::ops::Index;
use time::{Date, Duration, Weekday, Weekday::*};

pub const DAYS_IN_WEEK: usize = 7;

pub(crate) const DAYS_IN_WEEK_U8: u8 = 7;

pub trait WeekdayExt {
    /// Position of the weekday counting from Sunday = 0
    fn index0(&self) -> u8;

    /// Number of days from `start` forwards to `self`, in `0..7`
    fn days_since(&self, start: Weekday) -> u8;
}

impl WeekdayExt for Weekday {
    fn index0(&self) -> u8 {
        self.number_days_from_sunday()
    }

    fn days_since(&self, start: Weekday) -> u8 {
        (self.index0() + 7 - start.index0()) % 7
    }
}

/// Returns the weekday for a Sunday-based index in `0..7`
pub fn weekday_from_index0(i: u8) -> Option<Weekday> {
    match i {
        0 => Some(Sunday),
        1 => Some(Monday),
        2 => Some(Tuesday),
        3 => Some(Wednesday),
        4 => Some(Thursday),
        5 => Some(Friday),
        6 => Some(Saturday),
        _ => None,
    }
}

/// The first and last days of a calendar week.
///
/// The last day is always the sixth day after the first, so a mismatched
/// pair cannot be constructed.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct WeekConfig {
    starts_at: Weekday,
    ends_at: Weekday,
}

impl WeekConfig {
    pub fn new(starts_at: Weekday) -> WeekConfig {
        WeekConfig {
            starts_at,
            ends_at: starts_at.previous(),
        }
    }

    /// Construct from a Sunday-based day-of-week number (0 = Sunday, 6 =
    /// Saturday)
    pub fn from_index0(i: u8) -> Result<WeekConfig, ConfigError> {
        weekday_from_index0(i)
            .map(WeekConfig::new)
            .ok_or(ConfigError::InvalidWeekday { weekday: i })
    }

    pub fn starts_at(&self) -> Weekday {
        self.starts_at
    }

    pub fn ends_at(&self) -> Weekday {
        self.ends_at
    }

    /// The days of the week in display order, starting with `starts_at`
    pub fn weekdays(&self) -> [Weekday; DAYS_IN_WEEK] {
        let mut days = [self.starts_at; DAYS_IN_WEEK];
        let mut wd = self.starts_at;
        for slot in days.iter_mut().skip(1) {
            wd = wd.next();
            *slot = wd;
        }
        days
    }

    /// Column of `wd` when weeks are laid out starting at `starts_at`
    pub fn column(&self, wd: Weekday) -> usize {
        usize::from(wd.days_since(self.starts_at))
    }

    /// Returns the first day of the week containing `date`
    pub fn start_of_week(&self, date: Date) -> Result<Date, OutOfTimeError> {
        let back = date.weekday().days_since(self.starts_at);
        date.checked_sub(Duration::days(back.into()))
            .ok_or(OutOfTimeError)
    }

    /// Returns the last day of the week containing `date`
    pub fn end_of_week(&self, date: Date) -> Result<Date, OutOfTimeError> {
        let forward = self.ends_at.days_since(date.weekday());
        date.checked_add(Duration::days(forward.into()))
            .ok_or(OutOfTimeError)
    }
}

impl Default for WeekConfig {
    fn default() -> WeekConfig {
        WeekConfig::new(Sunday)
    }
}

/// Seven consecutive dates forming one row of a calendar grid
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct WeekRow([Date; DAYS_IN_WEEK]);

impl WeekRow {
    /// Returns the row of seven days beginning at `start`
    pub fn starting(start: Date) -> Result<WeekRow, OutOfTimeError> {
        let mut days = [start; DAYS_IN_WEEK];
        let mut current = start;
        for slot in days.iter_mut().skip(1) {
            current = current.next_day().ok_or(OutOfTimeError)?;
            *slot = current;
        }
        Ok(WeekRow(days))
    }

    pub fn first(&self) -> Date {
        self.0[0]
    }

    pub fn last(&self) -> Date {
        self.0[DAYS_IN_WEEK - 1]
    }

    pub fn days(&self) -> &[Date; DAYS_IN_WEEK] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Date> {
        self.0.iter()
    }

    pub fn contains(&self, date: Date) -> bool {
        (self.first()..=self.last()).contains(&date)
    }
}

impl From<[Date; DAYS_IN_WEEK]> for WeekRow {
    fn from(days: [Date; DAYS_IN_WEEK]) -> WeekRow {
        WeekRow(days)
    }
}

impl Index<usize> for WeekRow {
    type Output = Date;

    fn index(&self, i: usize) -> &Date {
        &self.0[i]
    }
}

impl<'a> IntoIterator for &'a WeekRow {
    type Item = &'a Date;
    type IntoIter = std::slice::Iter<'a, Date>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn test_ends_at_is_six_days_later() {
        for i in 0..7 {
            let cfg = WeekConfig::from_index0(i).unwrap();
            assert_eq!(cfg.ends_at().days_since(cfg.starts_at()), 6);
        }
    }

    #[test]
    fn test_from_index0_out_of_range() {
        assert_eq!(
            WeekConfig::from_index0(7),
            Err(ConfigError::InvalidWeekday { weekday: 7 })
        );
    }

    #[test]
    fn test_weekdays_monday() {
        let cfg = WeekConfig::new(Monday);
        assert_eq!(
            cfg.weekdays(),
            [Monday, Tuesday, Wednesday, Thursday, Friday, Saturday, Sunday]
        );
        assert_eq!(cfg.column(Sunday), 6);
        assert_eq!(cfg.column(Monday), 0);
    }

    #[test]
    fn test_start_and_end_of_week() {
        // Thursday
        let d = date!(2024 - 02 - 01);
        let sunday = WeekConfig::new(Sunday);
        assert_eq!(sunday.start_of_week(d), Ok(date!(2024 - 01 - 28)));
        assert_eq!(sunday.end_of_week(d), Ok(date!(2024 - 02 - 03)));
        let monday = WeekConfig::new(Monday);
        assert_eq!(monday.start_of_week(d), Ok(date!(2024 - 01 - 29)));
        assert_eq!(monday.end_of_week(d), Ok(date!(2024 - 02 - 04)));
        let thursday = WeekConfig::new(Thursday);
        assert_eq!(thursday.start_of_week(d), Ok(d));
        assert_eq!(thursday.end_of_week(d), Ok(date!(2024 - 02 - 07)));
    }

    #[test]
    fn test_start_of_week_at_beginning_of_time() {
        let cfg = WeekConfig::new(Date::MIN.weekday());
        assert_eq!(cfg.start_of_week(Date::MIN), Ok(Date::MIN));
        let cfg = WeekConfig::new(Date::MIN.weekday().next());
        assert_eq!(cfg.start_of_week(Date::MIN), Err(OutOfTimeError));
    }

    #[test]
    fn test_row_starting() {
        let row = WeekRow::starting(date!(2023 - 12 - 29)).unwrap();
        assert_eq!(row.first(), date!(2023 - 12 - 29));
        assert_eq!(row.last(), date!(2024 - 01 - 04));
        assert_eq!(row[2], date!(2023 - 12 - 31));
        assert!(row.contains(date!(2024 - 01 - 01)));
        assert!(!row.contains(date!(2024 - 01 - 05)));
    }

    #[test]
    fn test_row_at_end_of_time() {
        assert_eq!(WeekRow::starting(Date::MAX), Err(OutOfTimeError));
    }
}
