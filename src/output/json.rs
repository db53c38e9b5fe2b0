//! JSON output formatting for tasklex.
//!
//! Menus use the launcher item-list shape:
//! `{"items": [{"title", "subtitle", "arg", "icon": {"path"}, "variables"?}]}`.

use serde_json::{json, Value};

use crate::error::TasklexError;
use crate::features::nlp::{AutocompleteItem, ResolvedFragment};

/// One menu item as a JSON value.
///
/// A missing `arg` is written as an empty string; `variables` is omitted
/// when there are none.
///
/// # Errors
///
/// Returns `TasklexError::Json` if the variables cannot be serialized.
pub fn item_json(item: &AutocompleteItem) -> Result<Value, TasklexError> {
    let mut value = json!({
        "title": item.title,
        "subtitle": item.subtitle,
        "arg": item.arg.as_deref().unwrap_or_default(),
        "icon": { "path": item.icon.path() },
    });
    if let Some(variables) = &item.variables {
        value["variables"] = serde_json::to_value(variables)?;
    }
    Ok(value)
}

/// Format menu items as JSON
///
/// # Errors
///
/// Returns `TasklexError::Json` if JSON serialization fails.
pub fn format_items_json(items: &[AutocompleteItem]) -> Result<String, TasklexError> {
    let items = items.iter().map(item_json).collect::<Result<Vec<_>, _>>()?;
    Ok(serde_json::to_string_pretty(&json!({ "items": items }))?)
}

/// Format a resolved date fragment as JSON
///
/// # Errors
///
/// Returns `TasklexError::Json` if JSON serialization fails.
pub fn format_resolved_json(
    fragment: &str,
    resolved: &ResolvedFragment,
) -> Result<String, TasklexError> {
    let output = json!({
        "fragment": fragment,
        "date": resolved.date,
        "long": resolved.date.long_form(),
        "source": resolved.source,
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format a converted reschedule argument as JSON
///
/// # Errors
///
/// Returns `TasklexError::Json` if JSON serialization fails.
pub fn format_reschedule_json(arg: &str, date: &str) -> Result<String, TasklexError> {
    let output = json!({
        "arg": arg,
        "date": date,
    });
    Ok(serde_json::to_string_pretty(&output)?)
}
