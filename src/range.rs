use crate::error::OutOfTimeError;
use crate::week::{WeekConfig, DAYS_IN_WEEK_U8};
use std::iter::successors;
use time::{Date, Duration, Month};

/// The period a calendar is showing (a month or a week) before it is padded
/// out to whole weeks
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct CalendarRange {
    start: Date,
    end: Date,
}

impl CalendarRange {
    /// Returns `None` if `start` is after `end`
    pub fn new(start: Date, end: Date) -> Option<CalendarRange> {
        (start <= end).then_some(CalendarRange { start, end })
    }

    /// The first through last day of the given month
    pub fn month(year: i32, month: Month) -> Result<CalendarRange, OutOfTimeError> {
        let start = Date::from_calendar_date(year, month, 1).map_err(|_| OutOfTimeError)?;
        let end = last_day_of_month(year, month)?;
        Ok(CalendarRange { start, end })
    }

    /// The month containing `date`
    pub fn month_of(date: Date) -> Result<CalendarRange, OutOfTimeError> {
        CalendarRange::month(date.year(), date.month())
    }

    /// The week containing `date`, with weeks laid out per `cfg`
    pub fn week_of(date: Date, cfg: WeekConfig) -> Result<CalendarRange, OutOfTimeError> {
        let start = cfg.start_of_week(date)?;
        let end = cfg.end_of_week(date)?;
        Ok(CalendarRange { start, end })
    }

    pub fn start(&self) -> Date {
        self.start
    }

    pub fn end(&self) -> Date {
        self.end
    }

    pub fn contains(&self, date: Date) -> bool {
        (self.start..=self.end).contains(&date)
    }

    /// Shift both ends by `months` calendar months.  A day of month that
    /// does not exist in the target month is clamped to that month's last
    /// day.
    pub fn shift_months(&self, months: i32) -> Result<CalendarRange, OutOfTimeError> {
        let start = add_months_no_overflow(self.start, months)?;
        let end = add_months_no_overflow(self.end, months)?;
        Ok(CalendarRange { start, end })
    }

    /// Shift both ends by `weeks` weeks
    pub fn shift_weeks(&self, weeks: i64) -> Result<CalendarRange, OutOfTimeError> {
        let delta = Duration::weeks(weeks);
        let start = self.start.checked_add(delta).ok_or(OutOfTimeError)?;
        let end = self.end.checked_add(delta).ok_or(OutOfTimeError)?;
        Ok(CalendarRange { start, end })
    }
}

/// A [`CalendarRange`] expanded outwards to whole weeks
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct GridRange {
    grid_start: Date,
    grid_end: Date,
}

impl GridRange {
    pub fn grid_start(&self) -> Date {
        self.grid_start
    }

    pub fn grid_end(&self) -> Date {
        self.grid_end
    }

    /// Number of days in the grid, counting both ends
    pub fn day_count(&self) -> i64 {
        inclusive_days(self.grid_start, self.grid_end)
    }

    /// Number of week rows in the grid, rounding up any partial week
    pub fn week_count(&self) -> i64 {
        let per_week = i64::from(DAYS_IN_WEEK_U8);
        (self.day_count() + per_week - 1) / per_week
    }

    pub fn days(&self) -> impl Iterator<Item = Date> {
        let end = self.grid_end;
        iter_days_from(self.grid_start).take_while(move |&d| d <= end)
    }

    pub fn contains(&self, date: Date) -> bool {
        (self.grid_start..=self.grid_end).contains(&date)
    }

    #[cfg(test)]
    pub(crate) fn from_bounds(grid_start: Date, grid_end: Date) -> GridRange {
        GridRange {
            grid_start,
            grid_end,
        }
    }
}

/// Pad `range` out to the first day of the week containing its start and
/// the last day of the week containing its end
pub fn compute_grid_range(
    range: CalendarRange,
    cfg: WeekConfig,
) -> Result<GridRange, OutOfTimeError> {
    Ok(GridRange {
        grid_start: cfg.start_of_week(range.start)?,
        grid_end: cfg.end_of_week(range.end)?,
    })
}

/// Add `months` (which may be negative) to `date` without rolling over into
/// the following month: January 31 plus one month is the last day of
/// February.
pub fn add_months_no_overflow(date: Date, months: i32) -> Result<Date, OutOfTimeError> {
    let index0 = i64::from(date.year()) * 12 + i64::from(u8::from(date.month())) - 1;
    let target = index0 + i64::from(months);
    let year = i32::try_from(target.div_euclid(12)).map_err(|_| OutOfTimeError)?;
    let month = u8::try_from(target.rem_euclid(12) + 1)
        .ok()
        .and_then(|m| Month::try_from(m).ok())
        .ok_or(OutOfTimeError)?;
    let last = last_day_of_month(year, month)?;
    if date.day() >= last.day() {
        Ok(last)
    } else {
        Date::from_calendar_date(year, month, date.day()).map_err(|_| OutOfTimeError)
    }
}

/// Returns the last day of the given month
pub fn last_day_of_month(year: i32, month: Month) -> Result<Date, OutOfTimeError> {
    (28..=31)
        .rev()
        .find_map(|day| Date::from_calendar_date(year, month, day).ok())
        .ok_or(OutOfTimeError)
}

/// Number of days from `start` through `end`, counting both
pub fn inclusive_days(start: Date, end: Date) -> i64 {
    (end - start).whole_days() + 1
}

/// Iterate over `date` and every following day until the end of time
pub fn iter_days_from(date: Date) -> impl Iterator<Item = Date> {
    successors(Some(date), |&d| d.next_day())
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;
    use time::Weekday::{Monday, Sunday};

    #[test]
    fn test_month_range() {
        let r = CalendarRange::month(2024, Month::February).unwrap();
        assert_eq!(r.start(), date!(2024 - 02 - 01));
        assert_eq!(r.end(), date!(2024 - 02 - 29));
        let r = CalendarRange::month(2023, Month::February).unwrap();
        assert_eq!(r.end(), date!(2023 - 02 - 28));
        let r = CalendarRange::month(2023, Month::December).unwrap();
        assert_eq!(r.end(), date!(2023 - 12 - 31));
    }

    #[test]
    fn test_new_rejects_reversed() {
        assert!(CalendarRange::new(date!(2024 - 02 - 02), date!(2024 - 02 - 01)).is_none());
        assert!(CalendarRange::new(date!(2024 - 02 - 01), date!(2024 - 02 - 01)).is_some());
    }

    #[test]
    fn test_add_months_plain() {
        assert_eq!(
            add_months_no_overflow(date!(2024 - 01 - 15), 1),
            Ok(date!(2024 - 02 - 15))
        );
        assert_eq!(
            add_months_no_overflow(date!(2024 - 01 - 15), -1),
            Ok(date!(2023 - 12 - 15))
        );
        assert_eq!(
            add_months_no_overflow(date!(2024 - 11 - 30), 14),
            Ok(date!(2026 - 01 - 30))
        );
    }

    #[test]
    fn test_add_months_clamps() {
        assert_eq!(
            add_months_no_overflow(date!(2024 - 01 - 31), 1),
            Ok(date!(2024 - 02 - 29))
        );
        assert_eq!(
            add_months_no_overflow(date!(2023 - 01 - 31), 1),
            Ok(date!(2023 - 02 - 28))
        );
        assert_eq!(
            add_months_no_overflow(date!(2024 - 03 - 31), 1),
            Ok(date!(2024 - 04 - 30))
        );
        assert_eq!(
            add_months_no_overflow(date!(2024 - 03 - 31), -1),
            Ok(date!(2024 - 02 - 29))
        );
    }

    #[test]
    fn test_add_months_out_of_time() {
        assert_eq!(add_months_no_overflow(Date::MAX, 1), Err(OutOfTimeError));
        assert_eq!(add_months_no_overflow(Date::MIN, -1), Err(OutOfTimeError));
    }

    #[test]
    fn test_shift_months_end_clamps_without_rolling_over() {
        let march = CalendarRange::month(2024, Month::March).unwrap();
        let april = march.shift_months(1).unwrap();
        assert_eq!(april.start(), date!(2024 - 04 - 01));
        assert_eq!(april.end(), date!(2024 - 04 - 30));
    }

    #[test]
    fn test_grid_range_february_2024_monday() {
        let r = CalendarRange::month(2024, Month::February).unwrap();
        let g = compute_grid_range(r, WeekConfig::new(Monday)).unwrap();
        assert_eq!(g.grid_start(), date!(2024 - 01 - 29));
        assert_eq!(g.grid_end(), date!(2024 - 03 - 03));
        assert_eq!(g.day_count(), 35);
        assert_eq!(g.week_count(), 5);
    }

    #[test]
    fn test_grid_range_already_aligned() {
        // February 2015 starts on a Sunday and ends on a Saturday
        let r = CalendarRange::month(2015, Month::February).unwrap();
        let g = compute_grid_range(r, WeekConfig::new(Sunday)).unwrap();
        assert_eq!(g.grid_start(), r.start());
        assert_eq!(g.grid_end(), r.end());
        assert_eq!(g.week_count(), 4);
    }

    #[test]
    fn test_grid_days() {
        let g = GridRange::from_bounds(date!(2024 - 02 - 27), date!(2024 - 03 - 02));
        assert_eq!(
            g.days().collect::<Vec<_>>(),
            [
                date!(2024 - 02 - 27),
                date!(2024 - 02 - 28),
                date!(2024 - 02 - 29),
                date!(2024 - 03 - 01),
                date!(2024 - 03 - 02),
            ]
        );
        assert_eq!(g.week_count(), 1);
    }
}
