//! Due-date and reschedule pickers.
//!
//! Both pickers accept a custom entry of the form `<count>[w|m][HH:MM]`:
//! `3` is three days, `2w` two weeks, `1m` thirty days and `109:30` is
//! tomorrow at 09:30. The reschedule picker also understands ISO dates and
//! natural-language phrases.

use chrono::NaiveDateTime;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use super::resolve::{parse_absolute, resolve_natural, DateContext};
use super::tokenizer::collapse_spaces;
use super::types::{AutocompleteItem, Icon};
use crate::core::{day_word, days_between, long_date_from, parse_clock_time, ResolvedDate};

static QUANTITY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]+)([wm]?)(?:([0-9]{2}:[0-9]{2}))?$")
        .unwrap_or_else(|e| panic!("Invalid quantity regex: {e}"))
});

static DUE_FIELD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"due:\S*").unwrap_or_else(|e| panic!("Invalid due field regex: {e}"))
});

const INVALID_TITLE: &str = "Invalid format!";
const INVALID_SUBTITLE: &str =
    "enter an integer (days) or add 'w' (weeks) or 'm' (months). Optional: time in 24h format";

/// Canned choices: offset in days, due wording, reschedule wording, emoji.
const CANNED: [(i64, &str, &str, &str); 4] = [
    (0, "today", "to today", "🔥"),
    (1, "tomorrow", "to tomorrow", "🧨"),
    (7, "in a week", "in a week", "🍹"),
    (30, "in a month", "in a month", "🏖️"),
];

/// How a custom entry reads.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Custom {
    /// A well-formed `<count>[w|m][HH:MM]`.
    Quantity(Quantity),
    /// Quantity-shaped but the count overflows or the time is invalid.
    Malformed,
    /// Anything else.
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Quantity {
    days: i64,
    time: Option<String>,
}

impl Custom {
    fn classify(input: &str) -> Self {
        QUANTITY
            .captures(input)
            .map_or(Self::Other, |caps| quantity(&caps).map_or(Self::Malformed, Self::Quantity))
    }
}

fn quantity(caps: &regex::Captures<'_>) -> Option<Quantity> {
    let count: i64 = caps.get(1)?.as_str().parse().ok()?;
    let days = match caps.get(2).map_or("", |m| m.as_str()) {
        "w" => count.checked_mul(7)?,
        "m" => count.checked_mul(30)?,
        _ => count,
    };
    let time = match caps.get(3) {
        Some(m) => {
            parse_clock_time(m.as_str())?;
            Some(m.as_str().to_string())
        },
        None => None,
    };
    Some(Quantity { days, time })
}

impl Quantity {
    /// `Monday, June 02, 2025` plus `, HH:MM` when a time was given.
    fn long_form(&self, now: NaiveDateTime) -> String {
        let date = long_date_from(now.date(), self.days);
        match &self.time {
            Some(time) => format!("{date}, {time}"),
            None => date,
        }
    }

    /// Coded form, e.g. `14d` or `3d09:30`.
    fn coded(&self) -> String {
        format!("{}d{}", self.days, self.time.as_deref().unwrap_or(""))
    }
}

fn invalid_item() -> AutocompleteItem {
    AutocompleteItem::notice(INVALID_TITLE, INVALID_SUBTITLE, Icon::Warning)
}

/// Strip the `due:` field from a line and leave it ready for a new one.
fn passthrough(through: &str) -> String {
    let stripped = DUE_FIELD.replace_all(through, "");
    let stripped = collapse_spaces(&stripped);
    if stripped.is_empty() {
        stripped
    } else {
        format!("{stripped} ")
    }
}

/// Build the due-date picker.
///
/// `custom` is what the user typed after `due:`; `through` is the input line,
/// carried into each arg with its `due:` field replaced.
#[must_use]
pub fn due_menu(custom: &str, through: &str, now: NaiveDateTime) -> Vec<AutocompleteItem> {
    let custom = custom.trim();
    let prefix = passthrough(through);

    if custom.is_empty() {
        return CANNED
            .iter()
            .map(|(days, label, _, emoji)| {
                AutocompleteItem::new(
                    format!("Due {label} 🗓️ {} {emoji}", long_date_from(now.date(), *days)),
                    format!("{prefix}due:{days}d "),
                    Icon::Today,
                )
            })
            .collect();
    }

    match Custom::classify(custom) {
        Custom::Quantity(quantity) => vec![AutocompleteItem::new(
            format!(
                "Due in {} {} 🗓️ {}",
                quantity.days,
                day_word(quantity.days),
                quantity.long_form(now)
            ),
            format!("{prefix}due:{} ", quantity.coded()),
            Icon::Today,
        )],
        _ => {
            debug!(custom, "due picker entry not understood");
            vec![invalid_item()]
        },
    }
}

/// Build the reschedule picker for a task.
#[must_use]
pub fn reschedule_menu(
    custom: &str,
    task_content: &str,
    ctx: &DateContext,
) -> Vec<AutocompleteItem> {
    let custom = custom.trim();

    if custom.is_empty() {
        return CANNED
            .iter()
            .map(|(days, _, label, emoji)| {
                AutocompleteItem::new(
                    format!("Reschedule {label} 🗓️ {} {emoji}", long_date_from(ctx.today(), *days)),
                    format!("{days}d"),
                    Icon::Today,
                )
                .with_subtitle(task_content)
            })
            .collect();
    }

    match Custom::classify(custom) {
        Custom::Quantity(quantity) => {
            return vec![AutocompleteItem::new(
                format!(
                    "Reschedule in {} {} 🗓️ {}",
                    quantity.days,
                    day_word(quantity.days),
                    quantity.long_form(ctx.now)
                ),
                quantity.coded(),
                Icon::Today,
            )
            .with_subtitle(task_content)];
        },
        Custom::Malformed => return vec![invalid_item()],
        Custom::Other => {},
    }

    if let Some(date) = parse_absolute(custom) {
        return vec![dated_item(date, custom, task_content, ctx)];
    }

    if let Some(date) = resolve_natural(custom, ctx) {
        return vec![dated_item(date, &date.to_string(), task_content, ctx)];
    }

    debug!(custom, "reschedule picker entry not understood");
    vec![invalid_item()]
}

fn dated_item(
    date: ResolvedDate,
    arg: &str,
    task_content: &str,
    ctx: &DateContext,
) -> AutocompleteItem {
    let delta = days_between(ctx.today(), date.date());
    AutocompleteItem::new(
        format!(
            "Reschedule in {delta} {} 🗓️ {}",
            day_word(delta),
            date.long_form()
        ),
        arg,
        Icon::Today,
    )
    .with_subtitle(task_content)
}
