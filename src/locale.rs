use crate::error::{ConfigError, OutOfTimeError};
use crate::range::inclusive_days;
use crate::week::WeekConfig;
use std::fmt;
use time::{Date, Duration, Month, Weekday};

/// Languages that, absent a region, number weeks the way the United States
/// does
static SUNDAY_LANGUAGES: &[&str] = &["en", "he", "ja", "ko", "zh"];

/// Regions that number weeks the way the United States does
static SUNDAY_REGIONS: &[&str] = &["br", "ca", "il", "jp", "kr", "mx", "ph", "tw", "us"];

/// A locale tag such as `en`, `en_US`, or `fr-FR`.
///
/// Only the week-numbering convention is derived from it.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Locale(String);

impl Locale {
    pub fn new<S: Into<String>>(tag: S) -> Locale {
        Locale(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn language_and_region(&self) -> (String, Option<String>) {
        let mut parts = self.0.split(['_', '-']);
        let language = parts.next().unwrap_or_default().to_ascii_lowercase();
        let region = parts
            .find(|p| p.len() == 2 && p.chars().all(|c| c.is_ascii_alphabetic()))
            .map(str::to_ascii_lowercase);
        (language, region)
    }

    pub fn week_numbering(&self) -> WeekNumbering {
        let (language, region) = self.language_and_region();
        let sunday_based = match region {
            Some(r) => SUNDAY_REGIONS.contains(&r.as_str()),
            None => SUNDAY_LANGUAGES.contains(&language.as_str()),
        };
        if sunday_based {
            WeekNumbering::US
        } else {
            WeekNumbering::ISO
        }
    }
}

impl Default for Locale {
    fn default() -> Locale {
        Locale::new("en")
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Locale {
    fn from(s: &str) -> Locale {
        Locale::new(s)
    }
}

/// How the weeks of a year are numbered: weeks begin on `first_day`, and
/// week 1 is the first week with at least `min_days_in_first_week` days in
/// the new year.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct WeekNumbering {
    first_day: Weekday,
    min_days_in_first_week: u8,
}

impl WeekNumbering {
    /// ISO 8601: Monday-based weeks; week 1 contains January 4
    pub const ISO: WeekNumbering = WeekNumbering {
        first_day: Weekday::Monday,
        min_days_in_first_week: 4,
    };

    /// Sunday-based weeks; week 1 contains January 1
    pub const US: WeekNumbering = WeekNumbering {
        first_day: Weekday::Sunday,
        min_days_in_first_week: 1,
    };

    pub fn first_day(&self) -> Weekday {
        self.first_day
    }

    fn week_config(&self) -> WeekConfig {
        WeekConfig::new(self.first_day)
    }

    /// Returns the first day of week 1 of `year`
    pub fn week_one_start(&self, year: i32) -> Result<Date, OutOfTimeError> {
        let anchor = Date::from_calendar_date(year, Month::January, self.min_days_in_first_week)
            .map_err(|_| OutOfTimeError)?;
        self.week_config().start_of_week(anchor)
    }

    pub fn weeks_in_year(&self, year: i32) -> Result<u8, OutOfTimeError> {
        let this = self.week_one_start(year)?;
        let next = self.week_one_start(year.checked_add(1).ok_or(OutOfTimeError)?)?;
        u8::try_from((next - this).whole_weeks()).map_err(|_| OutOfTimeError)
    }

    /// Returns the first day (per this numbering) of week `week` of `year`
    pub fn start_of_week_number(&self, year: i32, week: u8) -> Result<Date, ConfigError> {
        let weeks_in_year = self.weeks_in_year(year)?;
        if !(1..=weeks_in_year).contains(&week) {
            return Err(ConfigError::InvalidWeek {
                year,
                week,
                weeks_in_year,
            });
        }
        self.week_one_start(year)?
            .checked_add(Duration::weeks(i64::from(week - 1)))
            .ok_or(ConfigError::OutOfTime(OutOfTimeError))
    }

    /// Returns the week-numbering year and week number of `date`
    pub fn week_of(&self, date: Date) -> Result<(i32, u8), OutOfTimeError> {
        let start = self.week_config().start_of_week(date)?;
        // The week belongs to whichever year holds its
        // `min_days_in_first_week`-th last day.
        let decider = start
            .checked_add(Duration::days(i64::from(7 - self.min_days_in_first_week)))
            .ok_or(OutOfTimeError)?;
        let year = decider.year();
        let first = self.week_one_start(year)?;
        let week = (inclusive_days(first, start) - 1) / 7 + 1;
        Ok((year, u8::try_from(week).map_err(|_| OutOfTimeError)?))
    }
}
