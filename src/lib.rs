//! Month and week calendar grids.
//!
//! A [`CalendarGridEngine`] tracks which month or week is being viewed,
//! pages backwards and forwards through time, and lays the viewed period out
//! as rows of whole weeks starting on a configurable day.  Days before and
//! after the period are included as padding so that every row is complete.
//!
//! ```
//! use time::macros::date;
//! use weekgrid::{CalendarGridEngine, CalendarOptions, FixedClock};
//!
//! let options = CalendarOptions::new().year(2024).month(2).week_starts_at(1);
//! let mut engine = CalendarGridEngine::new(options, FixedClock(date!(2024 - 02 - 14)))?;
//! let rows = engine.month_grid()?;
//! assert_eq!(rows.len(), 5);
//! assert_eq!(rows[0].first(), date!(2024 - 01 - 29));
//! assert_eq!(rows[4].last(), date!(2024 - 03 - 03));
//!
//! engine.next()?;
//! assert_eq!(engine.range().start(), date!(2024 - 03 - 01));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
mod clock;
mod engine;
mod error;
mod events;
mod handler;
mod locale;
mod range;
mod week;
pub use crate::clock::*;
pub use crate::engine::*;
pub use crate::error::*;
pub use crate::events::*;
pub use crate::handler::*;
pub use crate::locale::*;
pub use crate::range::*;
pub use crate::week::*;
