//! Date fragment resolution.
//!
//! A fragment (the text after `due:`, inside `{...}`, or typed into the
//! reschedule picker) is run through an ordered chain of strategies. The
//! first strategy that understands it wins:
//!
//! 1. `Nd`          today + N days
//! 2. `NdHH:MM`     today + N days at a valid 24h time
//! 3. `Nw`          today + 7N days
//! 4. `Nm`          today + 30N days
//! 5. `YYYY-MM-DD`
//! 6. `YYYY-MM-DDTHH:MM`
//! 7. English phrase (`next friday at 3pm`)
//! 8. Locale keyword (`domani`, `nächsten Freitag`)
//!
//! Nothing here fails: an unresolved fragment becomes a picker menu.

use chrono::{NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use tracing::{debug, trace};

use super::locale::resolve_keyword;
use super::menu::due_menu;
use super::tokenizer::Token;
use super::types::{nfc, Resolution};
use crate::core::{offset_date, parse_clock_time, parse_phrase, ResolvedDate};

static DAYS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]+)d$").unwrap_or_else(|e| panic!("Invalid days regex: {e}"))
});

static DAYS_AT_TIME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]+)d([0-9]{2}:[0-9]{2})$")
        .unwrap_or_else(|e| panic!("Invalid days-at-time regex: {e}"))
});

static WEEKS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]+)w$").unwrap_or_else(|e| panic!("Invalid weeks regex: {e}"))
});

static MONTHS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]+)m$").unwrap_or_else(|e| panic!("Invalid months regex: {e}"))
});

static ABSOLUTE_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$")
        .unwrap_or_else(|e| panic!("Invalid absolute date regex: {e}"))
});

static ABSOLUTE_DATE_TIME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}T[0-9]{2}:[0-9]{2}$")
        .unwrap_or_else(|e| panic!("Invalid absolute date-time regex: {e}"))
});

static BARE_DAYS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]+$").unwrap_or_else(|e| panic!("Invalid bare days regex: {e}"))
});

/// Words joining a date to a time that do not resolve on their own.
const CONNECTIVES: [&str; 3] = ["at", "@", "on"];

/// The clock and language a fragment is resolved against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateContext {
    /// Sampled once per top-level call.
    pub now: NaiveDateTime,
    /// Two-letter language code for keyword tables.
    pub lang: String,
}

impl DateContext {
    /// Create a context.
    #[must_use]
    pub fn new(now: NaiveDateTime, lang: impl Into<String>) -> Self {
        Self {
            now,
            lang: lang.into(),
        }
    }

    /// Today's date.
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.now.date()
    }
}

/// Which family of strategies produced a date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DateSource {
    /// Compact or absolute syntax (`7d`, `2025-06-01`).
    Coded,
    /// English phrase or locale keyword.
    Natural,
}

/// A fragment that resolved to a date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResolvedFragment {
    /// The resolved date.
    pub date: ResolvedDate,
    /// Where it came from.
    pub source: DateSource,
}

/// A natural-language phrase assembled across several tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuePhrase {
    /// The joined phrase, e.g. `next friday`.
    pub phrase: String,
    /// What it resolved to.
    pub date: ResolvedDate,
}

type Strategy = fn(&str, &DateContext) -> Option<ResolvedDate>;

/// The resolution chain, in priority order.
const STRATEGIES: [(&str, DateSource, Strategy); 8] = [
    ("days", DateSource::Coded, coded_days),
    ("days-at-time", DateSource::Coded, coded_days_at_time),
    ("weeks", DateSource::Coded, coded_weeks),
    ("months", DateSource::Coded, coded_months),
    ("absolute-date", DateSource::Coded, absolute_date),
    ("absolute-date-time", DateSource::Coded, absolute_date_time),
    ("english", DateSource::Natural, english_phrase),
    ("locale", DateSource::Natural, locale_keyword),
];

fn count(re: &Regex, fragment: &str) -> Option<i64> {
    re.captures(fragment)?.get(1)?.as_str().parse().ok()
}

fn days_from_today(ctx: &DateContext, days: i64) -> Option<ResolvedDate> {
    offset_date(ctx.today(), days).map(ResolvedDate::Date)
}

fn coded_days(fragment: &str, ctx: &DateContext) -> Option<ResolvedDate> {
    days_from_today(ctx, count(&DAYS, fragment)?)
}

fn coded_days_at_time(fragment: &str, ctx: &DateContext) -> Option<ResolvedDate> {
    let caps = DAYS_AT_TIME.captures(fragment)?;
    let days: i64 = caps.get(1)?.as_str().parse().ok()?;
    let time = parse_clock_time(caps.get(2)?.as_str())?;
    let date = offset_date(ctx.today(), days)?;
    Some(ResolvedDate::at(date, time))
}

fn coded_weeks(fragment: &str, ctx: &DateContext) -> Option<ResolvedDate> {
    days_from_today(ctx, count(&WEEKS, fragment)?.checked_mul(7)?)
}

fn coded_months(fragment: &str, ctx: &DateContext) -> Option<ResolvedDate> {
    days_from_today(ctx, count(&MONTHS, fragment)?.checked_mul(30)?)
}

fn absolute(re: &Regex, fragment: &str) -> Option<ResolvedDate> {
    if re.is_match(fragment) {
        ResolvedDate::parse_iso(fragment)
    } else {
        None
    }
}

fn absolute_date(fragment: &str, _ctx: &DateContext) -> Option<ResolvedDate> {
    absolute(&ABSOLUTE_DATE, fragment)
}

fn absolute_date_time(fragment: &str, _ctx: &DateContext) -> Option<ResolvedDate> {
    absolute(&ABSOLUTE_DATE_TIME, fragment)
}

fn english_phrase(fragment: &str, ctx: &DateContext) -> Option<ResolvedDate> {
    parse_phrase(fragment, ctx.now).map(ResolvedDate::from_instant)
}

fn locale_keyword(fragment: &str, ctx: &DateContext) -> Option<ResolvedDate> {
    resolve_keyword(fragment, &ctx.lang, ctx.today()).map(ResolvedDate::Date)
}

/// Parse an exact `YYYY-MM-DD` or `YYYY-MM-DDTHH:MM` fragment.
#[must_use]
pub fn parse_absolute(fragment: &str) -> Option<ResolvedDate> {
    absolute(&ABSOLUTE_DATE, fragment).or_else(|| absolute(&ABSOLUTE_DATE_TIME, fragment))
}

/// Run a fragment through the whole chain.
#[must_use]
pub fn resolve_fragment(fragment: &str, ctx: &DateContext) -> Option<ResolvedFragment> {
    let fragment = fragment.trim();
    if fragment.is_empty() {
        return None;
    }

    STRATEGIES.iter().find_map(|(name, source, strategy)| {
        let date = strategy(fragment, ctx)?;
        trace!(fragment, strategy = *name, %date, "date strategy matched");
        Some(ResolvedFragment {
            date,
            source: *source,
        })
    })
}

/// English phrase first, then the locale table. No coded forms.
#[must_use]
pub fn resolve_natural(fragment: &str, ctx: &DateContext) -> Option<ResolvedDate> {
    let fragment = fragment.trim();
    if fragment.is_empty() {
        return None;
    }
    english_phrase(fragment, ctx).or_else(|| locale_keyword(fragment, ctx))
}

/// Resolve a `due:` fragment, or offer the due-date picker.
///
/// `through` is the line to carry around the due field in each menu arg.
#[must_use]
pub fn resolve_due(fragment: &str, through: &str, ctx: &DateContext) -> Resolution<ResolvedFragment> {
    match resolve_fragment(fragment, ctx) {
        Some(resolved) => Resolution::Resolved(resolved),
        None => {
            debug!(fragment, "due fragment unresolved, offering picker");
            Resolution::NeedsSelection(due_menu(fragment, through, ctx.now))
        },
    }
}

/// Grow an unresolved `due:` head across the following tokens.
///
/// Tokens are appended one at a time while the joined phrase keeps
/// resolving as natural language. A connective (`at`, `@`, `on`) that does
/// not resolve yet may be bridged by the next token, so `next friday at 3pm`
/// grows past `at`. Returns how many tokens were consumed and the longest
/// phrase that resolved; `(0, None)` when the first extension already fails.
#[must_use]
pub fn extend_due_phrase(
    head: &str,
    following: &[Token],
    ctx: &DateContext,
) -> (usize, Option<DuePhrase>) {
    let mut phrase = head.to_string();
    let mut best: Option<DuePhrase> = None;
    let mut consumed = 0;
    let mut pending = 0;

    for token in following {
        let word = nfc(&token.text);
        let connective = CONNECTIVES.contains(&word.to_lowercase().as_str());
        let candidate = if phrase.is_empty() {
            word
        } else {
            format!("{phrase} {word}")
        };
        pending += 1;
        match resolve_natural(&candidate, ctx) {
            Some(date) => {
                consumed += pending;
                pending = 0;
                best = Some(DuePhrase {
                    phrase: candidate.clone(),
                    date,
                });
                phrase = candidate;
            },
            None if connective && pending == 1 => phrase = candidate,
            None => break,
        }
    }

    if let Some(best) = &best {
        debug!(head, consumed, phrase = %best.phrase, "due phrase extended");
    }
    (consumed, best)
}

/// Resolve a `{deadline}` fragment to a date, or `None` to ignore it.
#[must_use]
pub fn resolve_deadline(raw: &str, ctx: &DateContext) -> Option<NaiveDate> {
    let resolved = resolve_fragment(raw, ctx).map(|r| r.date.date());
    if resolved.is_none() {
        debug!(raw, "deadline unresolved, ignoring");
    }
    resolved
}

/// Convert a reschedule-picker arg into an API date string.
///
/// ISO forms pass through, `Nd[HH:MM]` and bare day counts become dates,
/// anything else is returned unchanged.
#[must_use]
pub fn resolve_reschedule_date(arg: &str, now: NaiveDateTime) -> String {
    let arg = arg.trim();
    let ctx = DateContext::new(now, "");

    if let Some(date) = parse_absolute(arg) {
        return date.to_string();
    }
    if let Some(date) = coded_days(arg, &ctx).or_else(|| coded_days_at_time(arg, &ctx)) {
        return date.to_string();
    }
    if BARE_DAYS.is_match(arg) {
        if let Some(date) = arg
            .parse::<i64>()
            .ok()
            .and_then(|days| days_from_today(&ctx, days))
        {
            return date.to_string();
        }
    }
    arg.to_string()
}

/// Whether a fragment is natural language rather than a coded form.
#[must_use]
pub fn is_natural_language_date(fragment: &str, ctx: &DateContext) -> bool {
    resolve_fragment(fragment, ctx).is_some_and(|r| r.source == DateSource::Natural)
}
