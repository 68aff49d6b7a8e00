//! Conversion between the server's UTC-labelled date/time strings and
//! zone-aware instants used for display and editing.
//!
//! The backend stores naive `YYYY-MM-DD` / `HH:MM[:SS]` pairs and treats them
//! as UTC. Everything here is pure: the zone is always passed in, never read
//! from the process.

use chrono::{
    DateTime, Duration, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Timelike, Utc,
};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

const SERVER_DATE_FORMAT: &str = "%Y-%m-%d";
const SERVER_TIME_FORMAT: &str = "%H:%M";
const DISPLAY_DATE_FORMAT: &str = "%d/%m/%Y";
const DISPLAY_TIME_FORMAT: &str = "%H:%M";

/// A point in time bound to the zone it is displayed and edited in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LocalInstant(DateTime<Tz>);

impl LocalInstant {
    /// Wraps an existing zoned date-time.
    pub fn new(inner: DateTime<Tz>) -> Self {
        Self(inner)
    }

    /// Builds an instant from a UTC date-time, viewed in `zone`.
    pub fn from_utc(utc: NaiveDateTime, zone: Tz) -> Self {
        Self(Utc.from_utc_datetime(&utc).with_timezone(&zone))
    }

    /// Builds an instant from a wall-clock date-time in `zone`.
    pub fn from_local(local: NaiveDateTime, zone: Tz) -> Self {
        Self(resolve_local(zone, local))
    }

    /// The zoned date-time.
    pub fn as_datetime(&self) -> &DateTime<Tz> {
        &self.0
    }

    /// The zone this instant is displayed in.
    pub fn zone(&self) -> Tz {
        self.0.timezone()
    }

    /// The same instant expressed in UTC.
    pub fn to_utc(&self) -> DateTime<Utc> {
        self.0.with_timezone(&Utc)
    }

    /// Wall-clock date in the instant's zone.
    pub fn local_date(&self) -> NaiveDate {
        self.0.date_naive()
    }

    /// Wall-clock time in the instant's zone.
    pub fn local_time(&self) -> NaiveTime {
        self.0.time()
    }

    /// Replaces the wall-clock date, keeping the wall-clock time.
    pub fn with_local_date(&self, date: NaiveDate) -> Self {
        Self::from_local(date.and_time(self.local_time()), self.zone())
    }

    /// Replaces the wall-clock time (seconds dropped), keeping the wall-clock date.
    pub fn with_local_time(&self, time: NaiveTime) -> Self {
        let time = NaiveTime::from_hms_opt(time.hour(), time.minute(), 0).unwrap_or(time);
        Self::from_local(self.local_date().and_time(time), self.zone())
    }

    /// Shifts the instant by a fixed duration.
    pub fn plus(&self, duration: Duration) -> Self {
        Self(self.0 + duration)
    }
}

/// A naive date/time pair as stored server-side, implicitly UTC.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerCalendarPoint {
    pub date: String,
    pub time: String,
}

impl ServerCalendarPoint {
    /// Creates a point from separate date and time strings.
    pub fn new(date: impl Into<String>, time: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            time: time.into(),
        }
    }

    /// Splits a combined `"YYYY-MM-DD HH:MM:SS"` value.
    /// A value without a time part is taken as midnight.
    pub fn from_combined(value: &str) -> Self {
        let mut parts = value.trim().splitn(2, ' ');
        let date = parts.next().unwrap_or_default();
        let time = parts
            .next()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or("00:00:00");
        Self::new(date, time)
    }

    /// Converts to an instant in `zone`, or `None` when the pair is unusable.
    pub fn to_local(&self, zone: Tz) -> Option<LocalInstant> {
        to_local_instant(Some(&self.date), Some(&self.time), zone)
    }
}

/// Interprets a server date/time pair as UTC and views it in `zone`.
///
/// Returns `None` when either string is missing or blank, when year, month or
/// day is missing or zero, or when the components do not form a real
/// calendar point. Missing or unparseable time components count as zero.
pub fn to_local_instant(date: Option<&str>, time: Option<&str>, zone: Tz) -> Option<LocalInstant> {
    let date = date.map(str::trim).filter(|d| !d.is_empty())?;
    let time = time.map(str::trim).filter(|t| !t.is_empty())?;

    let mut date_parts = date.split('-').map(parse_component);
    let year = date_parts.next().flatten().filter(|y| *y != 0)?;
    let month = date_parts.next().flatten().filter(|m| *m != 0)?;
    let day = date_parts.next().flatten().filter(|d| *d != 0)?;

    let mut time_parts = time.split(':').map(|p| parse_component(p).unwrap_or(0));
    let hour = time_parts.next().unwrap_or(0);
    let minute = time_parts.next().unwrap_or(0);
    let second = time_parts.next().unwrap_or(0);

    let date = NaiveDate::from_ymd_opt(i32::try_from(year).ok()?, month, day)?;
    let time = NaiveTime::from_hms_opt(hour, minute, second)?;

    Some(LocalInstant::from_utc(date.and_time(time), zone))
}

/// `YYYY-MM-DD` of the instant's UTC calendar date.
pub fn to_server_date_string(instant: &LocalInstant) -> String {
    instant.to_utc().format(SERVER_DATE_FORMAT).to_string()
}

/// `HH:MM` of the instant's UTC time of day.
pub fn to_server_time_string(instant: &LocalInstant) -> String {
    instant.to_utc().format(SERVER_TIME_FORMAT).to_string()
}

/// `DD/MM/YYYY` in the instant's zone. Display only.
pub fn format_for_display(instant: &LocalInstant) -> String {
    instant.as_datetime().format(DISPLAY_DATE_FORMAT).to_string()
}

/// `HH:MM` in the instant's zone. Display only.
pub fn format_time_for_display(instant: &LocalInstant) -> String {
    instant.as_datetime().format(DISPLAY_TIME_FORMAT).to_string()
}

/// Rounds up to the next quarter hour at minute granularity. Seconds are
/// dropped before rounding, so a time already on a mark stays there.
pub fn round_up_to_quarter(value: NaiveDateTime) -> NaiveDateTime {
    let truncated = value
        .date()
        .and_hms_opt(value.hour(), value.minute(), 0)
        .unwrap_or(value);
    match truncated.minute() % 15 {
        0 => truncated,
        remainder => truncated + Duration::minutes(i64::from(15 - remainder)),
    }
}

/// Resolves a wall-clock value in `zone`. Folds pick the earlier instant,
/// gaps move one hour later.
fn resolve_local(zone: Tz, local: NaiveDateTime) -> DateTime<Tz> {
    match zone.from_local_datetime(&local) {
        LocalResult::Single(dt) => dt,
        LocalResult::Ambiguous(earliest, _) => earliest,
        LocalResult::None => zone
            .from_local_datetime(&(local + Duration::hours(1)))
            .earliest()
            .unwrap_or_else(|| Utc.from_utc_datetime(&local).with_timezone(&zone)),
    }
}

fn parse_component(part: &str) -> Option<u32> {
    part.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::Europe::Rome;
    use chrono_tz::UTC;

    fn naive(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    #[test]
    fn test_round_trip_in_utc() {
        let instant = to_local_instant(Some("2025-11-24"), Some("09:30"), UTC).unwrap();
        assert_eq!(to_server_date_string(&instant), "2025-11-24");
        assert_eq!(to_server_time_string(&instant), "09:30");
    }

    #[test]
    fn test_round_trip_survives_zone_shift_across_midnight() {
        // 23:45 UTC is already the next day in Rome.
        let instant = to_local_instant(Some("2025-11-24"), Some("23:45:00"), Rome).unwrap();
        assert_eq!(instant.local_date(), NaiveDate::from_ymd_opt(2025, 11, 25).unwrap());
        assert_eq!(format_time_for_display(&instant), "00:45");
        assert_eq!(to_server_date_string(&instant), "2025-11-24");
        assert_eq!(to_server_time_string(&instant), "23:45");
    }

    #[test]
    fn test_round_trip_for_every_quarter_of_a_summer_day() {
        for minutes in (0..24 * 60).step_by(15) {
            let time = format!("{:02}:{:02}", minutes / 60, minutes % 60);
            let instant = to_local_instant(Some("2025-07-01"), Some(&time), Rome).unwrap();
            assert_eq!(to_server_date_string(&instant), "2025-07-01");
            assert_eq!(to_server_time_string(&instant), time);
        }
    }

    #[test]
    fn test_missing_inputs_return_none() {
        assert_eq!(to_local_instant(None, Some("10:00"), UTC), None);
        assert_eq!(to_local_instant(Some("2025-01-01"), None, UTC), None);
        assert_eq!(to_local_instant(Some(""), Some(""), UTC), None);
        assert_eq!(to_local_instant(Some("   "), Some("10:00"), UTC), None);
    }

    #[test]
    fn test_zero_or_garbage_date_components_return_none() {
        assert_eq!(to_local_instant(Some("0000-01-01"), Some("10:00"), UTC), None);
        assert_eq!(to_local_instant(Some("2025-00-01"), Some("10:00"), UTC), None);
        assert_eq!(to_local_instant(Some("2025-01"), Some("10:00"), UTC), None);
        assert_eq!(to_local_instant(Some("not-a-date"), Some("10:00"), UTC), None);
        assert_eq!(to_local_instant(Some("2025-13-01"), Some("10:00"), UTC), None);
    }

    #[test]
    fn test_missing_time_components_default_to_zero() {
        let instant = to_local_instant(Some("2025-01-01"), Some("7"), UTC).unwrap();
        assert_eq!(instant.local_time(), NaiveTime::from_hms_opt(7, 0, 0).unwrap());

        let instant = to_local_instant(Some("2025-01-01"), Some("07:xx:10"), UTC).unwrap();
        assert_eq!(instant.local_time(), NaiveTime::from_hms_opt(7, 0, 10).unwrap());
    }

    #[test]
    fn test_from_combined_defaults_to_midnight() {
        let point = ServerCalendarPoint::from_combined("2025-11-24");
        assert_eq!(point, ServerCalendarPoint::new("2025-11-24", "00:00:00"));

        let point = ServerCalendarPoint::from_combined("2025-11-24 09:30:00");
        assert_eq!(point, ServerCalendarPoint::new("2025-11-24", "09:30:00"));
    }

    #[test]
    fn test_display_formats_use_local_zone() {
        let instant = to_local_instant(Some("2025-11-24"), Some("09:30"), Rome).unwrap();
        assert_eq!(format_for_display(&instant), "24/11/2025");
        assert_eq!(format_time_for_display(&instant), "10:30");
    }

    #[test]
    fn test_with_local_time_keeps_date_and_drops_seconds() {
        let instant = to_local_instant(Some("2025-11-24"), Some("09:30"), Rome).unwrap();
        let edited = instant.with_local_time(NaiveTime::from_hms_opt(14, 5, 42).unwrap());
        assert_eq!(format_time_for_display(&edited), "14:05");
        assert_eq!(to_server_time_string(&edited), "13:05");
        assert_eq!(edited.local_date(), instant.local_date());
    }

    #[test]
    fn test_with_local_date_keeps_wall_clock_across_dst_change() {
        // 10:30 in Rome in November (CET) moved to a July date (CEST).
        let instant = to_local_instant(Some("2025-11-24"), Some("09:30"), Rome).unwrap();
        let moved = instant.with_local_date(NaiveDate::from_ymd_opt(2025, 7, 1).unwrap());
        assert_eq!(format_time_for_display(&moved), "10:30");
        assert_eq!(to_server_time_string(&moved), "08:30");
    }

    #[test]
    fn test_local_gap_moves_forward() {
        // 02:30 does not exist in Rome on 2025-03-30.
        let instant = LocalInstant::from_local(naive("2025-03-30 02:30:00"), Rome);
        assert_eq!(format_time_for_display(&instant), "03:30");
    }

    #[test]
    fn test_round_up_to_quarter() {
        assert_eq!(
            round_up_to_quarter(naive("2025-11-24 09:05:00")),
            naive("2025-11-24 09:15:00")
        );
        assert_eq!(
            round_up_to_quarter(naive("2025-11-24 09:15:00")),
            naive("2025-11-24 09:15:00")
        );
        assert_eq!(
            round_up_to_quarter(naive("2025-11-24 09:15:30")),
            naive("2025-11-24 09:15:00")
        );
        assert_eq!(
            round_up_to_quarter(naive("2025-11-24 09:14:59")),
            naive("2025-11-24 09:15:00")
        );
        assert_eq!(
            round_up_to_quarter(naive("2025-11-24 23:50:00")),
            naive("2025-11-25 00:00:00")
        );
    }
}
