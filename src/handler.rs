use std::time::Duration;
use time::Date;

/// Receives activations from a calendar front end.  Every method does
/// nothing by default.
pub trait CalendarHandler {
    fn on_day_click(&mut self, _year: i32, _month: u8, _day: u8) {}

    fn on_event_click(&mut self, _event_id: &str) {}

    fn on_event_dropped(&mut self, _event_id: &str, _year: i32, _month: u8, _day: u8) {}
}

impl<T: CalendarHandler + ?Sized> CalendarHandler for &mut T {
    fn on_day_click(&mut self, year: i32, month: u8, day: u8) {
        (**self).on_day_click(year, month, day);
    }

    fn on_event_click(&mut self, event_id: &str) {
        (**self).on_event_click(event_id);
    }

    fn on_event_dropped(&mut self, event_id: &str, year: i32, month: u8, day: u8) {
        (**self).on_event_dropped(event_id, year, month, day);
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct NoopHandler;

impl CalendarHandler for NoopHandler {}

/// Which kinds of interaction are passed on to a [`CalendarHandler`]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Interactions {
    pub drag_and_drop: bool,
    pub day_click: bool,
    pub event_click: bool,
}

impl Interactions {
    /// Report a click on `date` if day clicks are enabled.  Returns whether
    /// the handler was called.
    pub fn click_day<H: CalendarHandler>(&self, handler: &mut H, date: Date) -> bool {
        if self.day_click {
            handler.on_day_click(date.year(), date.month().into(), date.day());
        }
        self.day_click
    }

    pub fn click_event<H: CalendarHandler>(&self, handler: &mut H, event_id: &str) -> bool {
        if self.event_click {
            handler.on_event_click(event_id);
        }
        self.event_click
    }

    pub fn drop_event<H: CalendarHandler>(
        &self,
        handler: &mut H,
        event_id: &str,
        date: Date,
    ) -> bool {
        if self.drag_and_drop {
            handler.on_event_dropped(event_id, date.year(), date.month().into(), date.day());
        }
        self.drag_and_drop
    }
}

impl Default for Interactions {
    fn default() -> Interactions {
        Interactions {
            drag_and_drop: true,
            day_click: true,
            event_click: true,
        }
    }
}

/// How often to reload events, and the identifier handed to the event
/// source on each reload.  Neither value is interpreted here.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct PollConfig {
    pub interval_millis: Option<u64>,
    pub action: Option<String>,
}

impl PollConfig {
    /// Returns `None` if polling is disabled
    pub fn interval(&self) -> Option<Duration> {
        self.interval_millis
            .filter(|&ms| ms > 0)
            .map(Duration::from_millis)
    }

    pub fn action(&self) -> Option<&str> {
        self.action.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[derive(Debug, Default)]
    struct Recorder(Vec<String>);

    impl CalendarHandler for Recorder {
        fn on_day_click(&mut self, year: i32, month: u8, day: u8) {
            self.0.push(format!("day {year}-{month}-{day}"));
        }

        fn on_event_click(&mut self, event_id: &str) {
            self.0.push(format!("event {event_id}"));
        }

        fn on_event_dropped(&mut self, event_id: &str, year: i32, month: u8, day: u8) {
            self.0.push(format!("drop {event_id} {year}-{month}-{day}"));
        }
    }

    #[test]
    fn test_all_enabled() {
        let mut rec = Recorder::default();
        let ia = Interactions::default();
        assert!(ia.click_day(&mut rec, date!(2024 - 02 - 14)));
        assert!(ia.click_event(&mut rec, "42"));
        assert!(ia.drop_event(&mut rec, "42", date!(2024 - 03 - 01)));
        assert_eq!(
            rec.0,
            ["day 2024-2-14", "event 42", "drop 42 2024-3-1"]
        );
    }

    #[test]
    fn test_disabled_interactions_are_not_forwarded() {
        let mut rec = Recorder::default();
        let ia = Interactions {
            drag_and_drop: false,
            day_click: false,
            event_click: true,
        };
        assert!(!ia.click_day(&mut rec, date!(2024 - 02 - 14)));
        assert!(ia.click_event(&mut rec, "7"));
        assert!(!ia.drop_event(&mut rec, "7", date!(2024 - 02 - 15)));
        assert_eq!(rec.0, ["event 7"]);
    }

    #[test]
    fn test_noop_handler() {
        let mut h = NoopHandler;
        assert!(Interactions::default().click_day(&mut h, date!(2024 - 02 - 14)));
    }

    #[test]
    fn test_poll_interval() {
        assert_eq!(PollConfig::default().interval(), None);
        let poll = PollConfig {
            interval_millis: Some(0),
            action: None,
        };
        assert_eq!(poll.interval(), None);
        let poll = PollConfig {
            interval_millis: Some(1500),
            action: Some("refreshEvents".into()),
        };
        assert_eq!(poll.interval(), Some(Duration::from_millis(1500)));
        assert_eq!(poll.action(), Some("refreshEvents"));
    }
}
