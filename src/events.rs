use crate::error::{EventDateError, EventSourceError};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use time::{
    format_description::{well_known::Rfc3339, BorrowedFormatItem},
    macros::format_description,
    Date, OffsetDateTime, PrimitiveDateTime,
};

static DATE_FMT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

static DATETIME_FMTS: &[&[BorrowedFormatItem<'_>]] = &[
    format_description!("[year]-[month]-[day]T[hour]:[minute]"),
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"),
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond]"),
    format_description!("[year]-[month]-[day] [hour]:[minute]"),
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"),
];

/// Anything that can be shown on a calendar day
pub trait EventRecord {
    fn id(&self) -> &str;

    /// The event's date or date-time as written in its source
    fn date(&self) -> &str;
}

impl<T: EventRecord + ?Sized> EventRecord for &T {
    fn id(&self) -> &str {
        (**self).id()
    }

    fn date(&self) -> &str {
        (**self).date()
    }
}

/// A calendar event as read from an event source.  Fields other than those
/// named here are kept in `extra`.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Event {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub date: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Event {
    pub fn new<I, T, D>(id: I, title: T, date: D) -> Event
    where
        I: Into<String>,
        T: Into<String>,
        D: Into<String>,
    {
        Event {
            id: id.into(),
            title: title.into(),
            description: None,
            date: date.into(),
            extra: Map::new(),
        }
    }

    /// Parse the event's `date` field
    pub fn day(&self) -> Result<Date, EventDateError> {
        parse_event_date(&self.date)
    }
}

impl EventRecord for Event {
    fn id(&self) -> &str {
        &self.id
    }

    fn date(&self) -> &str {
        &self.date
    }
}

// Event sources commonly use numeric IDs; keep them as strings.
fn deserialize_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected a string or number for event ID, got {other}"
        ))),
    }
}

/// Returns the calendar day on which an event takes place.
///
/// Accepts `YYYY-MM-DD`, a local date-time such as `YYYY-MM-DDTHH:MM` or
/// `YYYY-MM-DD HH:MM:SS`, or an RFC 3339 timestamp.  The day is the date as
/// written; timestamps with offsets are not converted to another zone.
pub fn parse_event_date(value: &str) -> Result<Date, EventDateError> {
    let value = value.trim();
    if let Ok(d) = Date::parse(value, &DATE_FMT) {
        return Ok(d);
    }
    if let Some(dt) = DATETIME_FMTS
        .iter()
        .find_map(|fmt| PrimitiveDateTime::parse(value, fmt).ok())
    {
        return Ok(dt.date());
    }
    OffsetDateTime::parse(value, &Rfc3339)
        .map(OffsetDateTime::date)
        .map_err(|_| EventDateError {
            value: value.to_owned(),
        })
}

/// Returns the events in `events` that take place on `day`, in their
/// original order.  Events with unreadable dates are skipped.
pub fn filter_events_for_day<E: EventRecord>(day: Date, events: &[E]) -> Vec<&E> {
    events
        .iter()
        .filter(|ev| match parse_event_date(ev.date()) {
            Ok(d) => d == day,
            Err(e) => {
                tracing::warn!(id = ev.id(), "Skipping event: {e}");
                false
            }
        })
        .collect()
}

/// A supplier of events to display
pub trait EventSource {
    fn events(&self) -> &[Event];

    /// Reload the events.  `action` is an opaque identifier configured
    /// alongside the polling interval and passed through unchanged.
    fn refresh(&mut self, action: Option<&str>) -> Result<(), EventSourceError>;
}

impl EventSource for Vec<Event> {
    fn events(&self) -> &[Event] {
        self
    }

    fn refresh(&mut self, _action: Option<&str>) -> Result<(), EventSourceError> {
        Ok(())
    }
}

/// Events read from a JSON file containing an array of event objects
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct JsonFileSource {
    path: PathBuf,
    events: Vec<Event>,
}

impl JsonFileSource {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<JsonFileSource, EventSourceError> {
        let path = path.as_ref().to_owned();
        let events = load_events(&path)?;
        tracing::info!(path = %path.display(), count = events.len(), "Loaded events");
        Ok(JsonFileSource { path, events })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl EventSource for JsonFileSource {
    fn events(&self) -> &[Event] {
        &self.events
    }

    fn refresh(&mut self, action: Option<&str>) -> Result<(), EventSourceError> {
        self.events = load_events(&self.path)?;
        tracing::debug!(
            path = %self.path.display(),
            action,
            count = self.events.len(),
            "Reloaded events"
        );
        Ok(())
    }
}

fn load_events(path: &Path) -> Result<Vec<Event>, EventSourceError> {
    let src = std::fs::read_to_string(path).map_err(|source| EventSourceError::Read {
        path: path.to_owned(),
        source,
    })?;
    serde_json::from_str(&src).map_err(|source| EventSourceError::Parse {
        path: path.to_owned(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use time::macros::date;

    #[test]
    fn test_parse_event_date() {
        for (s, d) in [
            ("2024-02-14", date!(2024 - 02 - 14)),
            ("2024-02-14T18:00", date!(2024 - 02 - 14)),
            ("2024-02-14T18:00:59", date!(2024 - 02 - 14)),
            ("2024-02-14T18:00:59.250", date!(2024 - 02 - 14)),
            ("2024-02-14 00:30", date!(2024 - 02 - 14)),
            ("2024-02-14 23:59:59", date!(2024 - 02 - 14)),
            ("2024-02-14T23:30:00-05:00", date!(2024 - 02 - 14)),
            ("2024-02-15T00:30:00Z", date!(2024 - 02 - 15)),
            (" 2024-02-14 ", date!(2024 - 02 - 14)),
        ] {
            assert_eq!(parse_event_date(s), Ok(d), "parsing {s:?}");
        }
    }

    #[test]
    fn test_parse_bad_event_date() {
        for s in ["", "tomorrow", "2024-02-30", "2024-13-01", "14/02/2024"] {
            assert!(parse_event_date(s).is_err(), "parsing {s:?}");
        }
    }

    #[test]
    fn test_filter_events_for_day() {
        let events = vec![
            Event::new("1", "Dinner", "2024-02-14T18:00"),
            Event::new("2", "Night owl", "2024-02-15T00:30"),
        ];
        let found = filter_events_for_day(date!(2024 - 02 - 14), &events);
        assert_eq!(found, [&events[0]]);
    }

    #[test]
    fn test_filter_keeps_order_and_skips_garbage() {
        let events = vec![
            Event::new("a", "Second", "2024-02-14 09:00"),
            Event::new("b", "Broken", "not a date"),
            Event::new("c", "Other day", "2024-02-13"),
            Event::new("d", "First", "2024-02-14"),
        ];
        let ids = filter_events_for_day(date!(2024 - 02 - 14), &events)
            .into_iter()
            .map(|ev| ev.id.as_str())
            .collect::<Vec<_>>();
        assert_eq!(ids, ["a", "d"]);
    }

    #[test]
    fn test_deserialize_events() {
        let events: Vec<Event> = serde_json::from_str(
            r#"[
                {"id": 7, "title": "Standup", "date": "2024-02-14T09:30", "room": "B"},
                {"id": "x", "title": "Review", "description": "Q1", "date": "2024-02-15"}
            ]"#,
        )
        .unwrap();
        assert_eq!(events[0].id, "7");
        assert_eq!(events[0].description, None);
        assert_eq!(events[0].extra.get("room"), Some(&Value::from("B")));
        assert_eq!(events[1].id, "x");
        assert_eq!(events[1].description.as_deref(), Some("Q1"));
        assert_eq!(events[1].day(), Ok(date!(2024 - 02 - 15)));
    }

    #[test]
    fn test_deserialize_bad_id() {
        let r = serde_json::from_str::<Vec<Event>>(r#"[{"id": null, "title": "", "date": ""}]"#);
        assert!(r.is_err());
    }

    #[test]
    fn test_json_file_source() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.json");
        std::fs::write(&path, r#"[{"id": 1, "title": "One", "date": "2024-02-14"}]"#).unwrap();
        let mut source = JsonFileSource::open(&path).unwrap();
        assert_eq!(source.path(), path.as_path());
        assert_eq!(source.events().len(), 1);
        let mut fp = std::fs::File::create(&path).unwrap();
        fp.write_all(
            br#"[
                {"id": 1, "title": "One", "date": "2024-02-14"},
                {"id": 2, "title": "Two", "date": "2024-02-15"}
            ]"#,
        )
        .unwrap();
        drop(fp);
        source.refresh(Some("reload")).unwrap();
        assert_eq!(source.events().len(), 2);
        assert_eq!(source.events()[1].title, "Two");
    }

    #[test]
    fn test_json_file_source_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.json");
        assert!(matches!(
            JsonFileSource::open(&path),
            Err(EventSourceError::Read { .. })
        ));
        std::fs::write(&path, "{not json").unwrap();
        let e = JsonFileSource::open(&path).unwrap_err();
        assert!(matches!(e, EventSourceError::Parse { .. }));
        assert_eq!(
            e.to_string(),
            format!("failed to parse events from {}", path.display())
        );
    }
}
