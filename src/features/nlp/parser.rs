//! Task input parser.
//!
//! Parses lines like `"buy milk @groceries #Shopping due:7d p1 {friday}"`
//! into a structured task, or into a menu when something needs picking.

use chrono::{Local, NaiveDateTime};
use tracing::debug;

use super::entity::{suggest, unwrap_parens, Sigil, TokenSite};
use super::locale::find_keyword;
use super::resolve::{
    extend_due_phrase, resolve_deadline, resolve_due, DateContext, DateSource,
};
use super::tokenizer::{collapse_spaces, extract_deadline, tokenize, Token};
use super::types::{nfc, InputContext, ParsedTask, Priority, Resolution};
use crate::core::{find_phrase, ResolvedDate};

/// Parse a task input line against the current local time.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use tasklex::features::nlp::{parse_task_input, InputContext};
///
/// let labels = BTreeMap::from([("groceries".to_string(), 3)]);
/// let projects = BTreeMap::from([("Shopping".to_string(), 1)]);
/// let ctx = InputContext::from_counts(labels, projects);
///
/// let task = parse_task_input("buy milk @groceries #Shopping p1", &ctx)
///     .resolved()
///     .unwrap();
/// assert_eq!(task.content, "buy milk");
/// assert_eq!(task.labels, vec!["groceries"]);
/// assert_eq!(task.project_name.as_deref(), Some("#Shopping"));
/// assert_eq!(task.api_priority(), 4);
/// ```
#[must_use]
pub fn parse_task_input(input: &str, ctx: &InputContext) -> Resolution<ParsedTask> {
    parse_task_input_at(input, ctx, Local::now().naive_local())
}

/// Parse a task input line with an explicit clock.
#[must_use]
pub fn parse_task_input_at(
    input: &str,
    ctx: &InputContext,
    now: NaiveDateTime,
) -> Resolution<ParsedTask> {
    let dates = DateContext::new(now, ctx.lang.clone());
    let extracted = extract_deadline(input);
    let tokens = tokenize(&extracted.line);
    debug!(tokens = ?token_texts(&tokens), "input tokens");

    let mut task = ParsedTask {
        raw_input: input.to_string(),
        ..ParsedTask::default()
    };

    if let Some(raw) = &extracted.deadline {
        task.deadline_raw = Some(raw.clone());
        task.deadline = resolve_deadline(raw, &dates);
    }

    let mut content: Vec<String> = Vec::new();
    let mut index = 0;

    while index < tokens.len() {
        let token = &tokens[index];
        let item = nfc(&token.text);
        index += 1;

        if let Some(sigil) = Sigil::of(&item) {
            let entity = unwrap_parens(&item);
            let site = TokenSite {
                raw_input: input,
                start: token.start,
                end: token.end,
            };
            let accepted = match sigil {
                Sigil::Label => accept_label(&mut task, &entity, ctx),
                Sigil::Project => accept_project(&mut task, &entity, ctx),
            };
            if !accepted {
                return Resolution::NeedsSelection(suggest(&entity, sigil, &site, ctx));
            }
            continue;
        }

        if let Some(priority) = Priority::from_token(&item) {
            task.priority = Some(priority);
            continue;
        }

        if let Some(fragment) = item.strip_prefix("due:") {
            match resolve_due(fragment, input, &dates) {
                Resolution::Resolved(resolved) => {
                    task.due_date = Some(resolved.date);
                    if resolved.source == DateSource::Natural {
                        set_due_string(&mut task, fragment, &dates);
                    }
                },
                Resolution::NeedsSelection(menu) => {
                    let (consumed, phrase) =
                        extend_due_phrase(fragment, &tokens[index..], &dates);
                    let Some(phrase) = phrase else {
                        return Resolution::NeedsSelection(menu);
                    };
                    index += consumed;
                    task.due_date = Some(phrase.date);
                    set_due_string(&mut task, &phrase.phrase, &dates);
                },
            }
            continue;
        }

        content.push(item);
    }

    task.content = content.join(" ");
    if task.due_date.is_none() && !task.content.is_empty() {
        detect_inline_date(&mut task, &dates);
    }

    Resolution::Resolved(task)
}

/// Record a known label. Returns `false` when the label is unknown.
fn accept_label(task: &mut ParsedTask, entity: &str, ctx: &InputContext) -> bool {
    if !ctx.knows_label(entity) {
        return false;
    }
    let name: String = entity.chars().skip(1).collect();
    if !task.labels.contains(&name) {
        task.labels.push(name);
    }
    true
}

/// Record a known project, splitting off a `/Section` suffix.
fn accept_project(task: &mut ParsedTask, entity: &str, ctx: &InputContext) -> bool {
    let bare: String = entity.chars().skip(1).collect();
    let section = bare.split_once('/');

    let known = ctx.knows_project(entity)
        || section.is_some_and(|(project, _)| {
            ctx.knows_project(&format!("#{project}")) && ctx.section_ids.contains_key(&bare)
        });
    if !known {
        return false;
    }

    match section {
        Some((project, section)) => {
            task.project_name = Some(format!("#{project}"));
            task.project_id = ctx.project_ids.get(project).cloned();
            task.section_name = Some(section.to_string());
            task.section_id = ctx.section_ids.get(&bare).cloned();
        },
        None => {
            task.project_name = Some(entity.to_string());
            task.project_id = ctx.project_ids.get(&bare).cloned();
            task.section_name = None;
            task.section_id = None;
        },
    }
    true
}

fn set_due_string(task: &mut ParsedTask, phrase: &str, dates: &DateContext) {
    task.due_string = Some(phrase.to_string());
    task.due_lang = Some(if dates.lang.is_empty() {
        "en".to_string()
    } else {
        dates.lang.clone()
    });
}

/// Look for a date phrase in the content, English first, then the locale table.
fn detect_inline_date(task: &mut ParsedTask, dates: &DateContext) {
    let content = task.content.clone();

    let found = find_phrase(&content, dates.now)
        .map(|m| (m.start, m.end, ResolvedDate::from_instant(m.instant)))
        .or_else(|| {
            find_keyword(&content, &dates.lang, dates.today())
                .map(|m| (m.start, m.end, ResolvedDate::Date(m.value)))
        });

    let Some((start, end, date)) = found else {
        return;
    };

    debug!(phrase = &content[start..end], %date, "inline date found");
    task.due_date = Some(date);
    set_due_string(task, &content[start..end], dates);
    task.content = collapse_spaces(&format!("{}{}", &content[..start], &content[end..]));
}

/// Token texts, mainly for display.
#[must_use]
pub fn token_texts(tokens: &[Token]) -> Vec<&str> {
    tokens.iter().map(|t| t.text.as_str()).collect()
}
