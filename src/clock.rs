use crate::error::ClockError;
use time::{Date, OffsetDateTime};

/// Source of the current date
pub trait Clock {
    fn today(&self) -> Result<Date, ClockError>;
}

impl<T: Clock + ?Sized> Clock for &T {
    fn today(&self) -> Result<Date, ClockError> {
        (**self).today()
    }
}

/// Reads the current date in the system's local time zone
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> Result<Date, ClockError> {
        Ok(OffsetDateTime::now_local()?.date())
    }
}

/// A clock that is always on the same date
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FixedClock(pub Date);

impl Clock for FixedClock {
    fn today(&self) -> Result<Date, ClockError> {
        Ok(self.0)
    }
}
