//! JSON output formatting.

use chrono_tz::Tz;
use crmagenda_core::records::EventRecord;
use crmagenda_core::time::{to_server_date_string, to_server_time_string, LocalInstant};
use serde::Serialize;

/// Compact JSON for `value`.
pub fn format_json<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    serde_json::to_string(value)
}

/// An event with its resolved start and end, in local time and in the
/// server's UTC strings.
#[derive(Debug, Serialize)]
pub struct EventJson<'a> {
    #[serde(flatten)]
    pub record: &'a EventRecord,
    pub start: Option<InstantJson>,
    pub end: Option<InstantJson>,
}

#[derive(Debug, Serialize)]
pub struct InstantJson {
    pub local: String,
    pub server_date: String,
    pub server_time: String,
}

impl From<&LocalInstant> for InstantJson {
    fn from(instant: &LocalInstant) -> Self {
        Self {
            local: instant.as_datetime().to_rfc3339(),
            server_date: to_server_date_string(instant),
            server_time: to_server_time_string(instant),
        }
    }
}

impl<'a> EventJson<'a> {
    pub fn new(record: &'a EventRecord, zone: Tz) -> Self {
        Self {
            record,
            start: record.start_in(zone).as_ref().map(InstantJson::from),
            end: record.end_in(zone).as_ref().map(InstantJson::from),
        }
    }
}

/// Events with start and end resolved in `zone`.
pub fn event_views(events: &[EventRecord], zone: Tz) -> Vec<EventJson<'_>> {
    events.iter().map(|e| EventJson::new(e, zone)).collect()
}
