use std::path::PathBuf;
use thiserror::Error;

/// Raised when a calendar computation would step outside the range of dates
/// that can be represented
#[derive(Copy, Clone, Debug, Eq, Error, PartialEq)]
#[error("reached the end of time")]
pub struct OutOfTimeError;

/// The current local date could not be determined.
///
/// This is fatal to whatever operation needed "today"; no fallback date is
/// ever synthesized.
#[derive(Copy, Clone, Debug, Eq, Error, PartialEq)]
#[error("failed to determine local date")]
pub struct ClockError;

impl From<time::error::IndeterminateOffset> for ClockError {
    fn from(_: time::error::IndeterminateOffset) -> ClockError {
        ClockError
    }
}

/// Invalid parameters passed when constructing a calendar engine
#[derive(Copy, Clone, Debug, Eq, Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid month {month}; expected a value from 1 through 12")]
    InvalidMonth { month: u8 },

    #[error("invalid week {week} for {year}; year has {weeks_in_year} weeks")]
    InvalidWeek {
        year: i32,
        week: u8,
        weeks_in_year: u8,
    },

    #[error("invalid day of week {weekday}; expected a value from 0 (Sunday) through 6 (Saturday)")]
    InvalidWeekday { weekday: u8 },

    #[error("year {year} is outside the supported range")]
    InvalidYear { year: i32 },

    #[error(transparent)]
    Clock(#[from] ClockError),

    #[error("calendar range does not fit in the supported dates")]
    OutOfTime(#[from] OutOfTimeError),
}

/// The grid computed for the current range is not made of whole weeks.
///
/// This indicates a week-boundary defect rather than bad input and is never
/// worth retrying.
#[derive(Copy, Clone, Debug, Eq, Error, PartialEq)]
pub enum GridError {
    #[error("calendar not correctly configured: grid spans {days} days, which is not a whole number of weeks")]
    NotWeekAligned { days: i64 },

    #[error("calendar not correctly configured: week grid spans {days} days instead of 7")]
    NotOneWeek { days: i64 },
}

/// Failure to move the calendar to a different period
#[derive(Copy, Clone, Debug, Eq, Error, PartialEq)]
pub enum NavigateError {
    #[error(transparent)]
    Clock(#[from] ClockError),

    #[error(transparent)]
    OutOfTime(#[from] OutOfTimeError),
}

/// A calendar mode name was neither "month" nor "week"
#[derive(Copy, Clone, Debug, Eq, Error, PartialEq)]
#[error("invalid calendar mode; expected \"month\" or \"week\"")]
pub struct ParseModeError;

/// An event record's `date` field could not be read as a calendar date
#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("unrecognized event date {value:?}")]
pub struct EventDateError {
    pub value: String,
}

/// Failure to load events from an event source
#[derive(Debug, Error)]
pub enum EventSourceError {
    #[error("failed to read events from {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse events from {}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_messages() {
        assert_eq!(
            ConfigError::InvalidMonth { month: 13 }.to_string(),
            "invalid month 13; expected a value from 1 through 12"
        );
        assert_eq!(
            ConfigError::InvalidWeek {
                year: 2021,
                week: 53,
                weeks_in_year: 52
            }
            .to_string(),
            "invalid week 53 for 2021; year has 52 weeks"
        );
        assert_eq!(
            ConfigError::from(ClockError).to_string(),
            "failed to determine local date"
        );
    }

    #[test]
    fn test_grid_error_messages() {
        assert_eq!(
            GridError::NotWeekAligned { days: 30 }.to_string(),
            "calendar not correctly configured: grid spans 30 days, which is not a whole number of weeks"
        );
        assert_eq!(
            GridError::NotOneWeek { days: 35 }.to_string(),
            "calendar not correctly configured: week grid spans 35 days instead of 7"
        );
    }

    #[test]
    fn test_navigate_error_from() {
        assert_eq!(NavigateError::from(OutOfTimeError).to_string(), "reached the end of time");
    }
}
