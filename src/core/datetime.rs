//! Resolved dates and the calendar arithmetic shared by every resolver.
//!
//! A resolved due date is either a plain date (`YYYY-MM-DD`) or a local
//! wall-clock date-time (`YYYY-MM-DDTHH:MM`). No seconds, no offsets.

use std::fmt;

use chrono::{Datelike, Days, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Weekday};
use serde::{Serialize, Serializer};

/// Long weekday form used in menu titles, e.g. `Monday, January 02, 2006`.
const LONG_DATE: &str = "%A, %B %d, %Y";
/// Long form with a time suffix.
const LONG_DATE_TIME: &str = "%A, %B %d, %Y, %H:%M";

/// A date that has been fully resolved from user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResolvedDate {
    /// Date only.
    Date(NaiveDate),
    /// Date with a wall-clock time (minute precision).
    DateTime(NaiveDateTime),
}

impl ResolvedDate {
    /// Build from an instant: midnight collapses to a plain date.
    #[must_use]
    pub fn from_instant(instant: NaiveDateTime) -> Self {
        if instant.hour() == 0 && instant.minute() == 0 {
            Self::Date(instant.date())
        } else {
            Self::DateTime(truncate_to_minute(instant))
        }
    }

    /// Build an explicit date-time, keeping the time even when it is midnight.
    #[must_use]
    pub fn at(date: NaiveDate, time: NaiveTime) -> Self {
        Self::DateTime(NaiveDateTime::new(date, time))
    }

    /// Parse the canonical `YYYY-MM-DD` or `YYYY-MM-DDTHH:MM` forms.
    #[must_use]
    pub fn parse_iso(input: &str) -> Option<Self> {
        if let Ok(dt) = NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M") {
            return Some(Self::DateTime(dt));
        }
        NaiveDate::parse_from_str(input, "%Y-%m-%d").ok().map(Self::Date)
    }

    /// The calendar date part.
    #[must_use]
    pub fn date(&self) -> NaiveDate {
        match self {
            Self::Date(d) => *d,
            Self::DateTime(dt) => dt.date(),
        }
    }

    /// The time part, if any.
    #[must_use]
    pub fn time(&self) -> Option<NaiveTime> {
        match self {
            Self::Date(_) => None,
            Self::DateTime(dt) => Some(dt.time()),
        }
    }

    /// Human-readable form for menu titles.
    #[must_use]
    pub fn long_form(&self) -> String {
        match self {
            Self::Date(d) => d.format(LONG_DATE).to_string(),
            Self::DateTime(dt) => dt.format(LONG_DATE_TIME).to_string(),
        }
    }
}

impl fmt::Display for ResolvedDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Self::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%dT%H:%M")),
        }
    }
}

impl Serialize for ResolvedDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

fn truncate_to_minute(instant: NaiveDateTime) -> NaiveDateTime {
    instant
        .with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(instant)
}

/// Move `from` by a signed number of calendar days.
///
/// Returns `None` when the result leaves chrono's representable range.
#[must_use]
pub fn offset_date(from: NaiveDate, days: i64) -> Option<NaiveDate> {
    let magnitude = Days::new(days.unsigned_abs());
    if days >= 0 {
        from.checked_add_days(magnitude)
    } else {
        from.checked_sub_days(magnitude)
    }
}

/// Calendar-day difference between two dates (negative when `to` is in the past).
#[must_use]
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    to.signed_duration_since(from).num_days()
}

/// Next future occurrence of `target`. Never `from` itself: same weekday means a week later.
#[must_use]
pub fn next_weekday(from: NaiveDate, target: Weekday) -> Option<NaiveDate> {
    let current = from.weekday().num_days_from_monday();
    let wanted = target.num_days_from_monday();
    let ahead = (wanted + 7 - current - 1) % 7 + 1;
    from.checked_add_days(Days::new(u64::from(ahead)))
}

/// Parse a strict 24h `HH:MM` clock time (0 <= H < 24, 0 <= M < 60).
#[must_use]
pub fn parse_clock_time(input: &str) -> Option<NaiveTime> {
    let (hours, minutes) = input.split_once(':')?;
    let hours: u32 = hours.parse().ok()?;
    let minutes: u32 = minutes.parse().ok()?;
    if hours < 24 && minutes < 60 {
        NaiveTime::from_hms_opt(hours, minutes, 0)
    } else {
        None
    }
}

/// Long weekday form of a date N days away from `today`.
#[must_use]
pub fn long_date_from(today: NaiveDate, days: i64) -> String {
    offset_date(today, days).map_or_else(String::new, |d| d.format(LONG_DATE).to_string())
}

/// Singular "day" only for a magnitude of exactly one.
#[must_use]
pub const fn day_word(days: i64) -> &'static str {
    if days == 1 || days == -1 {
        "day"
    } else {
        "days"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_from_instant_midnight_is_date_only() {
        let instant = date(2025, 6, 1).and_hms_opt(0, 0, 0).unwrap();
        let resolved = ResolvedDate::from_instant(instant);
        assert_eq!(resolved, ResolvedDate::Date(date(2025, 6, 1)));
        assert_eq!(resolved.to_string(), "2025-06-01");
        assert!(!resolved.to_string().contains('T'));
    }

    #[test]
    fn test_from_instant_drops_seconds() {
        let instant = date(2025, 6, 1).and_hms_opt(15, 30, 42).unwrap();
        let formatted = ResolvedDate::from_instant(instant).to_string();
        assert_eq!(formatted, "2025-06-01T15:30");
        assert_eq!(formatted.matches('T').count(), 1);
    }

    #[test]
    fn test_explicit_midnight_keeps_time() {
        let resolved = ResolvedDate::at(date(2025, 6, 8), NaiveTime::from_hms_opt(0, 0, 0).unwrap());
        assert_eq!(resolved.to_string(), "2025-06-08T00:00");
    }

    #[test]
    fn test_parse_iso() {
        assert_eq!(
            ResolvedDate::parse_iso("2025-03-15"),
            Some(ResolvedDate::Date(date(2025, 3, 15)))
        );
        assert_eq!(
            ResolvedDate::parse_iso("2025-03-15T14:00").map(|d| d.to_string()),
            Some("2025-03-15T14:00".to_string())
        );
        assert_eq!(ResolvedDate::parse_iso("2025-02-30"), None);
    }

    #[test]
    fn test_long_form() {
        assert_eq!(
            ResolvedDate::Date(date(2025, 6, 2)).long_form(),
            "Monday, June 02, 2025"
        );
        assert_eq!(
            ResolvedDate::at(date(2025, 6, 2), NaiveTime::from_hms_opt(9, 5, 0).unwrap())
                .long_form(),
            "Monday, June 02, 2025, 09:05"
        );
    }

    #[test]
    fn test_offset_date_signed() {
        assert_eq!(offset_date(date(2025, 6, 1), 7), Some(date(2025, 6, 8)));
        assert_eq!(offset_date(date(2025, 6, 1), -1), Some(date(2025, 5, 31)));
        assert_eq!(offset_date(date(2025, 6, 1), i64::MAX), None);
    }

    #[test]
    fn test_days_between() {
        assert_eq!(days_between(date(2025, 6, 1), date(2025, 6, 1)), 0);
        assert_eq!(days_between(date(2025, 6, 1), date(2025, 7, 1)), 30);
        assert_eq!(days_between(date(2025, 6, 1), date(2025, 5, 29)), -3);
    }

    #[test]
    fn test_next_weekday_never_today() {
        // 2025-06-06 is a Friday
        let friday = date(2025, 6, 6);
        assert_eq!(next_weekday(friday, Weekday::Fri), Some(date(2025, 6, 13)));
        assert_eq!(next_weekday(friday, Weekday::Sat), Some(date(2025, 6, 7)));
        assert_eq!(next_weekday(friday, Weekday::Thu), Some(date(2025, 6, 12)));
    }

    #[test]
    fn test_parse_clock_time() {
        assert_eq!(parse_clock_time("13:30"), NaiveTime::from_hms_opt(13, 30, 0));
        assert_eq!(parse_clock_time("00:00"), Some(NaiveTime::from_hms_opt(0, 0, 0).unwrap()));
        assert_eq!(parse_clock_time("23:59"), NaiveTime::from_hms_opt(23, 59, 0));
        assert_eq!(parse_clock_time("24:00"), None);
        assert_eq!(parse_clock_time("12:60"), None);
        assert_eq!(parse_clock_time("abc"), None);
    }

    #[test]
    fn test_day_word() {
        assert_eq!(day_word(1), "day");
        assert_eq!(day_word(-1), "day");
        assert_eq!(day_word(0), "days");
        assert_eq!(day_word(7), "days");
    }
}
