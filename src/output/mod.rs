//! Output formatting for tasklex.
//!
//! Menus and parsed tasks render either as launcher JSON or as colored text.

mod json;
mod pretty;

use crate::cli::args::OutputFormat;
use crate::error::TasklexError;
use crate::features::nlp::{
    AutocompleteItem, Icon, ItemVariables, ParsedTask, Priority, Resolution, ResolvedFragment,
    TAG_SEPARATOR,
};

pub use json::*;
pub use pretty::*;

/// Format menu items based on output format
///
/// # Errors
///
/// Returns `TasklexError::Json` if JSON serialization fails.
pub fn format_items(items: &[AutocompleteItem], format: OutputFormat) -> Result<String, TasklexError> {
    match format {
        OutputFormat::Pretty => Ok(format_items_pretty(items)),
        OutputFormat::Json => format_items_json(items),
    }
}

/// Format a parsed task based on output format
///
/// JSON renders the task as a single preview item.
///
/// # Errors
///
/// Returns `TasklexError::Json` if JSON serialization fails.
pub fn format_task(task: &ParsedTask, format: OutputFormat) -> Result<String, TasklexError> {
    match format {
        OutputFormat::Pretty => Ok(format_task_pretty(task)),
        OutputFormat::Json => format_items_json(&[preview_item(task)]),
    }
}

/// Format the outcome of parsing a line: the task, or the menu to pick from
///
/// # Errors
///
/// Returns `TasklexError::Json` if JSON serialization fails.
pub fn format_parse_result(
    result: &Resolution<ParsedTask>,
    format: OutputFormat,
) -> Result<String, TasklexError> {
    match result {
        Resolution::Resolved(task) => format_task(task, format),
        Resolution::NeedsSelection(items) => format_items(items, format),
    }
}

/// Format a resolved date fragment based on output format
///
/// # Errors
///
/// Returns `TasklexError::Json` if JSON serialization fails.
pub fn format_resolved(
    fragment: &str,
    resolved: &ResolvedFragment,
    format: OutputFormat,
) -> Result<String, TasklexError> {
    match format {
        OutputFormat::Pretty => Ok(format_resolved_pretty(fragment, resolved)),
        OutputFormat::Json => format_resolved_json(fragment, resolved),
    }
}

/// Format a converted reschedule argument based on output format
///
/// # Errors
///
/// Returns `TasklexError::Json` if JSON serialization fails.
pub fn format_reschedule_date(
    arg: &str,
    date: &str,
    format: OutputFormat,
) -> Result<String, TasklexError> {
    match format {
        OutputFormat::Pretty => Ok(date.to_string()),
        OutputFormat::Json => format_reschedule_json(arg, date),
    }
}

/// The menu item that previews a parsed task before it is created.
///
/// The subtitle summarizes project, section, labels, priority and dates;
/// `variables` carry every field for the step that creates the task.
#[must_use]
pub fn preview_item(task: &ParsedTask) -> AutocompleteItem {
    let mut parts = vec![format!(
        "📋{}",
        task.project_name.as_deref().unwrap_or("#Inbox")
    )];
    if let Some(section) = &task.section_name {
        parts.push(format!("🧩 section:{section}"));
    }
    if !task.labels.is_empty() {
        parts.push(format!("🏷️{}", task.labels.join(",")));
    }
    if let Some(priority) = task.priority.filter(|p| *p != Priority::P4) {
        parts.push(format!("{priority}️⃣"));
    }
    if let Some(due) = &task.due_date {
        parts.push(format!("🗓️ due:{due}"));
    } else if let Some(phrase) = &task.due_string {
        parts.push(format!("🗓️ due:{phrase}"));
    }
    if let Some(deadline) = task.deadline {
        parts.push(format!("⏳ deadline:{}", deadline.format("%Y-%m-%d")));
    }
    parts.push("⇧↩️ to create".to_string());

    let variables = ItemVariables::NewTask {
        text: task.content.clone(),
        tag_string: task.labels.join(TAG_SEPARATOR),
        project_id: task.project_id.clone().unwrap_or_default(),
        section_id: task.section_id.clone().unwrap_or_default(),
        due_date: task.due_date.map(|d| d.to_string()).unwrap_or_default(),
        due_string: task.due_string.clone().unwrap_or_default(),
        due_lang: task.due_lang.clone().unwrap_or_default(),
        deadline: task
            .deadline
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default(),
        priority: task.api_priority(),
    };

    AutocompleteItem::new(task.content.clone(), task.raw_input.clone(), Icon::NewTask)
        .with_subtitle(parts.join(" "))
        .with_variables(variables)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ResolvedDate;
    use chrono::NaiveDate;

    fn sample_task() -> ParsedTask {
        ParsedTask {
            content: "buy milk".to_string(),
            labels: vec!["groceries".to_string(), "errands".to_string()],
            project_name: Some("#Home".to_string()),
            project_id: Some("p-1".to_string()),
            section_name: Some("Kitchen".to_string()),
            section_id: Some("s-9".to_string()),
            due_date: NaiveDate::from_ymd_opt(2025, 6, 8).map(ResolvedDate::Date),
            deadline: NaiveDate::from_ymd_opt(2025, 6, 10),
            deadline_raw: Some("2025-06-10".to_string()),
            priority: Some(Priority::P1),
            raw_input: "buy milk @groceries @errands #Home/Kitchen due:7d p1 {2025-06-10}"
                .to_string(),
            ..ParsedTask::default()
        }
    }

    #[test]
    fn test_preview_item_fields() {
        let item = preview_item(&sample_task());

        assert_eq!(item.title, "buy milk");
        assert_eq!(item.icon, Icon::NewTask);
        assert_eq!(
            item.arg.as_deref(),
            Some("buy milk @groceries @errands #Home/Kitchen due:7d p1 {2025-06-10}")
        );
        assert_eq!(
            item.subtitle,
            "📋#Home 🧩 section:Kitchen 🏷️groceries,errands p1️⃣ 🗓️ due:2025-06-08 ⏳ deadline:2025-06-10 ⇧↩️ to create"
        );
        assert_eq!(
            item.variables,
            Some(ItemVariables::NewTask {
                text: "buy milk".to_string(),
                tag_string: "groceries,,..,,errands".to_string(),
                project_id: "p-1".to_string(),
                section_id: "s-9".to_string(),
                due_date: "2025-06-08".to_string(),
                due_string: String::new(),
                due_lang: String::new(),
                deadline: "2025-06-10".to_string(),
                priority: 4,
            })
        );
    }

    #[test]
    fn test_preview_item_defaults_to_inbox() {
        let task = ParsedTask {
            content: "water plants".to_string(),
            raw_input: "water plants".to_string(),
            ..ParsedTask::default()
        };
        let item = preview_item(&task);

        assert_eq!(item.subtitle, "📋#Inbox ⇧↩️ to create");
        let Some(ItemVariables::NewTask { priority, .. }) = item.variables else {
            panic!("Expected task variables");
        };
        assert_eq!(priority, 1);
    }

    #[test]
    fn test_preview_item_hides_lowest_priority() {
        let task = ParsedTask {
            content: "later".to_string(),
            priority: Some(Priority::P4),
            ..ParsedTask::default()
        };
        assert!(!preview_item(&task).subtitle.contains("p4"));
    }

    #[test]
    fn test_format_parse_result_menu() {
        let menu = Resolution::NeedsSelection(vec![AutocompleteItem::notice(
            "no projects matching",
            "try another query?",
            Icon::Warning,
        )]);
        let output = format_parse_result(&menu, OutputFormat::Json).unwrap();

        assert!(output.contains("\"title\": \"no projects matching\""));
        assert!(output.contains("icons/warning.png"));
    }

    #[test]
    fn test_format_task_json_is_single_item() {
        let output = format_task(&sample_task(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["items"].as_array().map(Vec::len), Some(1));
        assert_eq!(value["items"][0]["variables"]["mySource"], "newTask");
        assert_eq!(value["items"][0]["variables"]["myPriority"], 4);
    }
}
