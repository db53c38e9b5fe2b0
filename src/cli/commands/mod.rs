//! Command implementations for tasklex.
//!
//! Every command takes the clock as `now`, sampled once by the caller.

use chrono::NaiveDateTime;
use tracing::debug;

use crate::cli::args::OutputFormat;
use crate::error::TasklexError;
use crate::features::nlp::{
    self, parse_task_input_at, resolve_fragment, resolve_reschedule_date, DateContext,
    InputContext, Resolution,
};
use crate::output::{format_items, format_parse_result, format_reschedule_date, format_resolved};

/// Execute parse command
///
/// A task without a project is previewed as going to the Inbox, with the
/// Inbox id when the catalog knows it.
///
/// # Errors
///
/// Returns an error if the input is blank or output formatting fails.
pub fn parse(
    input: &str,
    ctx: &InputContext,
    now: NaiveDateTime,
    format: OutputFormat,
) -> Result<String, TasklexError> {
    if input.trim().is_empty() {
        return Err(TasklexError::InvalidInput("Nothing to parse".to_string()));
    }

    let mut result = parse_task_input_at(input, ctx, now);
    if let Resolution::Resolved(task) = &mut result {
        if task.project_name.is_none() {
            task.project_id = ctx.project_ids.get("Inbox").cloned();
        }
        debug!(content = %task.content, labels = ?task.labels, "parsed task");
    }
    format_parse_result(&result, format)
}

/// Execute due-menu command
///
/// # Errors
///
/// Returns an error if output formatting fails.
pub fn due_menu(
    fragment: &str,
    through: &str,
    now: NaiveDateTime,
    format: OutputFormat,
) -> Result<String, TasklexError> {
    format_items(&nlp::due_menu(fragment, through, now), format)
}

/// Execute reschedule-menu command
///
/// # Errors
///
/// Returns an error if output formatting fails.
pub fn reschedule_menu(
    fragment: &str,
    task_content: &str,
    ctx: &DateContext,
    format: OutputFormat,
) -> Result<String, TasklexError> {
    format_items(&nlp::reschedule_menu(fragment, task_content, ctx), format)
}

/// Execute resolve command
///
/// # Errors
///
/// Returns `TasklexError::InvalidInput` if no strategy understands the
/// fragment, or an error if output formatting fails.
pub fn resolve(
    fragment: &str,
    ctx: &DateContext,
    format: OutputFormat,
) -> Result<String, TasklexError> {
    let resolved = resolve_fragment(fragment, ctx).ok_or_else(|| {
        TasklexError::InvalidInput(format!("Could not resolve date: '{}'", fragment.trim()))
    })?;
    format_resolved(fragment.trim(), &resolved, format)
}

/// Execute reschedule-date command
///
/// # Errors
///
/// Returns an error if output formatting fails.
pub fn reschedule_date(
    arg: &str,
    now: NaiveDateTime,
    format: OutputFormat,
) -> Result<String, TasklexError> {
    let date = resolve_reschedule_date(arg, now);
    format_reschedule_date(arg, &date, format)
}
