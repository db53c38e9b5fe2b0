//! English free-form date phrases.
//!
//! Supports patterns like:
//! - `today`, `tomorrow`, `yesterday`, `day after tomorrow`
//! - `friday`, `next friday`, `this fri`, `on monday`
//! - `next week`, `next month`, `in 3 days`, `in a week`
//! - `dec 15`, `15th december`, `december 15 2026`
//! - `2024-12-15`, `15/12`, `15/12/2024` (day first)
//!
//! each optionally followed (or preceded) by a time: `3pm`, `3:30 pm`,
//! `at 15:00`, `noon`, `evening`. A bare numeric time means today.
//!
//! Times only survive when the phrase carries an explicit indicator
//! (am/pm or `HH:MM`); otherwise the result is midnight, i.e. date-only.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use once_cell::sync::Lazy;
use regex::Regex;

use super::datetime::{next_weekday, offset_date};

/// Longest phrase, in words, the in-text search will try.
const MAX_PHRASE_WORDS: usize = 6;

/// Words that read as dates on their own but are far more often plain English.
const AMBIGUOUS_WORDS: &[&str] = &["sat", "sun", "wed", "mar", "may"];

static TIME_INDICATOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(at\s+)?\d{1,2}(:\d{2})?\s*(am|pm)\b|\b\d{1,2}:\d{2}\b")
        .unwrap_or_else(|e| panic!("Invalid time indicator regex: {e}"))
});

/// A phrase found inside a longer text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhraseMatch {
    /// Resolved instant (midnight when no time was given).
    pub instant: NaiveDateTime,
    /// Byte offset where the phrase starts.
    pub start: usize,
    /// Byte offset one past the end of the phrase.
    pub end: usize,
}

/// Whether the text names an explicit clock time.
#[must_use]
pub fn has_time_indicator(input: &str) -> bool {
    TIME_INDICATOR.is_match(input)
}

/// Parse a whole string as one English date phrase.
///
/// Returns `None` unless the entire (trimmed) input is a date phrase.
#[must_use]
pub fn parse_phrase(input: &str, now: NaiveDateTime) -> Option<NaiveDateTime> {
    let lowered = input.trim().to_lowercase();
    if lowered.is_empty() {
        return None;
    }

    let (date, time) = parse_date_time(&lowered, now.date())?;
    let midnight = NaiveTime::from_hms_opt(0, 0, 0)?;
    let time = match time {
        Some(t) if has_time_indicator(&lowered) => t,
        _ => midnight,
    };
    Some(date.and_time(time))
}

/// Find the leftmost, longest English date phrase inside `text`.
#[must_use]
pub fn find_phrase(text: &str, now: NaiveDateTime) -> Option<PhraseMatch> {
    find_words(text, |candidate| {
        if AMBIGUOUS_WORDS.contains(&candidate.to_lowercase().as_str()) {
            return None;
        }
        parse_phrase(candidate, now)
    })
    .map(PhraseMatch::from)
}

/// Scan word windows of `text` (leftmost first, longest first) with `resolve`.
pub(crate) fn find_words<T>(
    text: &str,
    resolve: impl Fn(&str) -> Option<T>,
) -> Option<PhraseSpan<T>> {
    let spans = word_spans(text);
    for first in 0..spans.len() {
        let longest = MAX_PHRASE_WORDS.min(spans.len() - first);
        for len in (1..=longest).rev() {
            let start = spans[first].0;
            let end = spans[first + len - 1].1;
            if let Some(value) = resolve(&text[start..end]) {
                return Some(PhraseSpan { value, start, end });
            }
        }
    }
    None
}

/// A resolved value and the byte range it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhraseSpan<T> {
    /// What the words resolved to.
    pub value: T,
    /// Byte offset of the first word.
    pub start: usize,
    /// Byte offset one past the last word.
    pub end: usize,
}

impl From<PhraseSpan<NaiveDateTime>> for PhraseMatch {
    fn from(span: PhraseSpan<NaiveDateTime>) -> Self {
        Self {
            instant: span.value,
            start: span.start,
            end: span.end,
        }
    }
}

/// Byte ranges of whitespace-separated words.
fn word_spans(text: &str) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut start = None;
    for (idx, ch) in text.char_indices() {
        match (ch.is_whitespace(), start) {
            (true, Some(s)) => {
                spans.push((s, idx));
                start = None;
            },
            (false, None) => start = Some(idx),
            _ => {},
        }
    }
    if let Some(s) = start {
        spans.push((s, text.len()));
    }
    spans
}

/// Split a lowercase phrase into a date and an optional time.
fn parse_date_time(input: &str, today: NaiveDate) -> Option<(NaiveDate, Option<NaiveTime>)> {
    let mut words: Vec<&str> = input.split_whitespace().collect();

    let time = take_trailing_time(&mut words).or_else(|| take_leading_time(&mut words));
    let date_part = words.join(" ");

    if date_part.is_empty() {
        // A bare time is only a date when it is a real clock time, not "evening".
        return match time {
            Some(t) if has_time_indicator(input) => Some((today, Some(t))),
            _ => None,
        };
    }

    parse_date_internal(&date_part, today).map(|date| (date, time))
}

fn take_trailing_time(words: &mut Vec<&str>) -> Option<NaiveTime> {
    let len = words.len();
    let time = if len >= 2 && matches!(words[len - 1], "am" | "pm") {
        let joined = format!("{}{}", words[len - 2], words[len - 1]);
        let time = parse_time(&joined)?;
        words.truncate(len - 2);
        time
    } else {
        let time = parse_time(words.last()?)?;
        words.pop();
        time
    };
    if matches!(words.last(), Some(&"at" | &"@")) {
        words.pop();
    }
    Some(time)
}

fn take_leading_time(words: &mut Vec<&str>) -> Option<NaiveTime> {
    let skip = usize::from(matches!(words.first(), Some(&"at" | &"@")));
    let (time, used) = match (words.get(skip), words.get(skip + 1)) {
        (Some(num), Some(&meridiem)) if matches!(meridiem, "am" | "pm") => {
            (parse_time(&format!("{num}{meridiem}"))?, 2)
        },
        (Some(word), _) => (parse_time(word)?, 1),
        _ => return None,
    };
    // The time must be followed by a date, otherwise the trailing pass would have caught it.
    if words.len() <= skip + used {
        return None;
    }
    words.drain(..skip + used);
    Some(time)
}

/// Internal date parsing logic.
fn parse_date_internal(input: &str, today: NaiveDate) -> Option<NaiveDate> {
    let input = input.trim().trim_start_matches("on ").trim();

    // Relative dates
    match input {
        "today" | "tonight" => return Some(today),
        "tomorrow" | "tmrw" => return offset_date(today, 1),
        "yesterday" => return offset_date(today, -1),
        "day after tomorrow" | "the day after tomorrow" => return offset_date(today, 2),
        // "next week" means the coming Monday
        "next week" => return next_weekday(today, Weekday::Mon),
        "next month" => return offset_date(today, 30),
        _ => {},
    }

    parse_relative_offset(input, today)
        .or_else(|| parse_weekday(input, today))
        .or_else(|| parse_month_day(input, today))
        .or_else(|| NaiveDate::parse_from_str(input, "%Y-%m-%d").ok())
        .or_else(|| parse_slash_date(input, today))
}

/// Parse "in X days/weeks/months" patterns.
fn parse_relative_offset(input: &str, today: NaiveDate) -> Option<NaiveDate> {
    let parts: Vec<&str> = input.split_whitespace().collect();

    if parts.len() != 3 || parts[0] != "in" {
        return None;
    }

    let amount: i64 = match parts[1] {
        "a" | "an" | "one" => 1,
        n => n.parse().ok()?,
    };
    let unit = parts[2].strip_suffix('s').unwrap_or(parts[2]);

    let days = match unit {
        "day" => amount,
        "week" => amount.checked_mul(7)?,
        // Fixed 30-day month, same as the coded `Nm` form
        "month" => amount.checked_mul(30)?,
        _ => return None,
    };

    offset_date(today, days)
}

/// Parse weekday names, optionally prefixed with "next" or "this".
fn parse_weekday(input: &str, today: NaiveDate) -> Option<NaiveDate> {
    let day_str = input
        .strip_prefix("next ")
        .or_else(|| input.strip_prefix("this "))
        .unwrap_or(input);

    next_weekday(today, weekday_from_name(day_str)?)
}

fn weekday_from_name(name: &str) -> Option<Weekday> {
    Some(match name {
        "monday" | "mon" => Weekday::Mon,
        "tuesday" | "tue" | "tues" => Weekday::Tue,
        "wednesday" | "wed" => Weekday::Wed,
        "thursday" | "thu" | "thur" | "thurs" => Weekday::Thu,
        "friday" | "fri" => Weekday::Fri,
        "saturday" | "sat" => Weekday::Sat,
        "sunday" | "sun" => Weekday::Sun,
        _ => return None,
    })
}

/// Parse month and day patterns, in either order, with an optional year.
fn parse_month_day(input: &str, today: NaiveDate) -> Option<NaiveDate> {
    let cleaned = input.replace(',', " ");
    let parts: Vec<&str> = cleaned.split_whitespace().collect();

    let (month, day, year) = match parts.as_slice() {
        [a, b] => {
            let (month, day) = month_and_day(a, b)?;
            (month, day, None)
        },
        [a, b, y] => {
            let (month, day) = month_and_day(a, b)?;
            (month, day, Some(y.parse::<i32>().ok()?))
        },
        _ => return None,
    };

    if let Some(year) = year {
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    // Use current year, or next year if the date has passed
    let date = NaiveDate::from_ymd_opt(today.year(), month, day)?;
    if date < today {
        NaiveDate::from_ymd_opt(today.year() + 1, month, day)
    } else {
        Some(date)
    }
}

/// Month name and day number in either order.
fn month_and_day(a: &str, b: &str) -> Option<(u32, u32)> {
    if let (Some(month), Some(day)) = (parse_month_name(a), parse_day_number(b)) {
        return Some((month, day));
    }
    match (parse_day_number(a), parse_month_name(b)) {
        (Some(day), Some(month)) => Some((month, day)),
        _ => None,
    }
}

fn parse_day_number(input: &str) -> Option<u32> {
    let digits = ["st", "nd", "rd", "th"]
        .iter()
        .find_map(|suffix| input.strip_suffix(*suffix))
        .unwrap_or(input);
    digits.parse().ok().filter(|d| (1..=31).contains(d))
}

/// Parse month name to number.
fn parse_month_name(input: &str) -> Option<u32> {
    match input {
        "jan" | "january" => Some(1),
        "feb" | "february" => Some(2),
        "mar" | "march" => Some(3),
        "apr" | "april" => Some(4),
        "may" => Some(5),
        "jun" | "june" => Some(6),
        "jul" | "july" => Some(7),
        "aug" | "august" => Some(8),
        "sep" | "sept" | "september" => Some(9),
        "oct" | "october" => Some(10),
        "nov" | "november" => Some(11),
        "dec" | "december" => Some(12),
        _ => None,
    }
}

/// Parse slash dates, day first (DD/MM or DD/MM/YYYY).
fn parse_slash_date(input: &str, today: NaiveDate) -> Option<NaiveDate> {
    let parts: Vec<&str> = input.split('/').collect();

    match parts.as_slice() {
        [day, month] => {
            let day: u32 = day.parse().ok()?;
            let month: u32 = month.parse().ok()?;

            let date = NaiveDate::from_ymd_opt(today.year(), month, day)?;
            if date < today {
                NaiveDate::from_ymd_opt(today.year() + 1, month, day)
            } else {
                Some(date)
            }
        },
        [day, month, year] => {
            let day: u32 = day.parse().ok()?;
            let month: u32 = month.parse().ok()?;
            let year: i32 = year.parse().ok()?;

            // Handle 2-digit years
            let year = if year < 100 { 2000 + year } else { year };

            NaiveDate::from_ymd_opt(year, month, day)
        },
        _ => None,
    }
}

/// Parse a time string.
fn parse_time(input: &str) -> Option<NaiveTime> {
    // Special times
    match input {
        "morning" => return NaiveTime::from_hms_opt(9, 0, 0),
        "noon" | "midday" => return NaiveTime::from_hms_opt(12, 0, 0),
        "afternoon" => return NaiveTime::from_hms_opt(14, 0, 0),
        "evening" => return NaiveTime::from_hms_opt(18, 0, 0),
        "night" => return NaiveTime::from_hms_opt(21, 0, 0),
        "midnight" => return NaiveTime::from_hms_opt(0, 0, 0),
        _ => {},
    }

    // 24-hour format (15:00, 9:30)
    if input.contains(':') && !input.ends_with('m') {
        return super::datetime::parse_clock_time(input);
    }

    // 12-hour format (3pm, 3:30pm)
    let (time_str, is_pm) = if let Some(rest) = input.strip_suffix("pm") {
        (rest, true)
    } else if let Some(rest) = input.strip_suffix("am") {
        (rest, false)
    } else {
        return None;
    };

    let (hour, minute) = match time_str.split_once(':') {
        Some((h, m)) => (h.parse::<u32>().ok()?, m.parse::<u32>().ok()?),
        None => (time_str.parse::<u32>().ok()?, 0),
    };
    if !(1..=12).contains(&hour) {
        return None;
    }

    let hour = match (is_pm, hour) {
        (true, h) if h < 12 => h + 12,
        (false, 12) => 0,
        (_, h) => h,
    };

    NaiveTime::from_hms_opt(hour, minute, 0)
}
