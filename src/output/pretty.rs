use std::fmt::Write;

use colored::{ColoredString, Colorize};

use crate::features::nlp::{AutocompleteItem, Icon, ParsedTask, ResolvedFragment};

fn icon_mark(icon: Icon) -> ColoredString {
    match icon {
        Icon::Today => "◷".yellow(),
        Icon::Label => "@".cyan(),
        Icon::NewLabel => "+".green(),
        Icon::Project => "#".magenta(),
        Icon::Warning => "!".red().bold(),
        Icon::NewTask => "✓".green(),
    }
}

/// Format menu items as a pretty list
pub fn format_items_pretty(items: &[AutocompleteItem]) -> String {
    if items.is_empty() {
        return "Menu (0 items)\n  No items".to_string();
    }

    let mut output = format!("Menu ({} items)\n", items.len());
    output.push_str(&"─".repeat(60));
    output.push('\n');

    for item in items {
        writeln!(output, "{} {}", icon_mark(item.icon), item.title.bold()).ok();
        if !item.subtitle.is_empty() && item.arg.as_deref() != Some(item.subtitle.as_str()) {
            writeln!(output, "    {}", item.subtitle.dimmed()).ok();
        }
        if let Some(arg) = &item.arg {
            writeln!(output, "    {} {}", "→".dimmed(), arg.cyan()).ok();
        }
    }

    output
}

/// Format a parsed task as pretty output
pub fn format_task_pretty(task: &ParsedTask) -> String {
    let mut output = format!("{}\n", "Parsed Task".yellow().bold());
    writeln!(output, "  {} {}", "Content:".cyan().bold(), task.content).ok();

    if let Some(project) = &task.project_name {
        writeln!(output, "  {} {project}", "Project:".magenta()).ok();
    }
    if let Some(section) = &task.section_name {
        writeln!(output, "  {} {section}", "Section:".magenta()).ok();
    }
    if !task.labels.is_empty() {
        let labels: Vec<String> = task.labels.iter().map(|l| format!("@{l}")).collect();
        writeln!(output, "  {} {}", "Labels:".yellow(), labels.join(" ")).ok();
    }
    if let Some(priority) = task.priority {
        writeln!(output, "  {} {priority}", "Priority:".red().bold()).ok();
    }
    if let Some(due) = &task.due_date {
        writeln!(output, "  {} {}", "Due:".cyan(), due.date()).ok();
        if let Some(time) = due.time() {
            writeln!(output, "  {} {}", "Time:".cyan(), time.format("%H:%M")).ok();
        }
    }
    if let Some(phrase) = &task.due_string {
        let lang = task.due_lang.as_deref().unwrap_or("en");
        writeln!(output, "  {} {phrase} ({lang})", "Due phrase:".cyan()).ok();
    }
    if let Some(deadline) = task.deadline {
        writeln!(output, "  {} {}", "Deadline:".red(), deadline.format("%Y-%m-%d")).ok();
    } else if let Some(raw) = &task.deadline_raw {
        writeln!(output, "  {} {raw} (unresolved)", "Deadline:".red()).ok();
    }
    if !task.has_schedule() {
        writeln!(output, "  {}", "No dates".dimmed()).ok();
    }

    output
}

/// Format a resolved date fragment as pretty output
pub fn format_resolved_pretty(fragment: &str, resolved: &ResolvedFragment) -> String {
    format!(
        "{} {} {}  {}",
        fragment.bold(),
        "→".dimmed(),
        resolved.date.to_string().green(),
        resolved.date.long_form().dimmed()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ResolvedDate;
    use crate::features::nlp::{DateSource, Priority};
    use chrono::NaiveDate;

    #[test]
    fn test_format_items_pretty_empty_list() {
        let output = format_items_pretty(&[]);

        assert!(output.contains("Menu (0 items)"));
        assert!(output.contains("No items"));
    }

    #[test]
    fn test_format_items_pretty_shows_title_and_arg() {
        let items = vec![
            AutocompleteItem::new("Due today", "x due:0d ", Icon::Today).with_subtitle("Sunday"),
            AutocompleteItem::notice("Invalid format!", "try again", Icon::Warning),
        ];
        let output = format_items_pretty(&items);

        assert!(output.contains("Menu (2 items)"));
        assert!(output.contains("Due today"));
        assert!(output.contains("x due:0d "));
        assert!(output.contains("Sunday"));
        assert!(output.contains("try again"));
        assert!(output.contains("─"));
    }

    #[test]
    fn test_format_task_pretty() {
        let task = ParsedTask {
            content: "buy milk".to_string(),
            labels: vec!["groceries".to_string()],
            project_name: Some("#Shopping".to_string()),
            priority: Some(Priority::P2),
            due_string: Some("domani".to_string()),
            due_lang: Some("it".to_string()),
            ..ParsedTask::default()
        };
        let output = format_task_pretty(&task);

        assert!(output.contains("buy milk"));
        assert!(output.contains("#Shopping"));
        assert!(output.contains("@groceries"));
        assert!(output.contains("p2"));
        assert!(output.contains("domani (it)"));
        assert!(!output.contains("Section:"));
        assert!(output.contains("No dates"));
    }

    #[test]
    fn test_format_task_pretty_due_time() {
        let due = NaiveDate::from_ymd_opt(2025, 6, 6)
            .unwrap()
            .and_hms_opt(15, 0, 0)
            .unwrap();
        let task = ParsedTask {
            content: "dentist".to_string(),
            due_date: Some(ResolvedDate::DateTime(due)),
            ..ParsedTask::default()
        };
        let output = format_task_pretty(&task);

        assert!(output.contains("2025-06-06"));
        assert!(output.contains("Time:"));
        assert!(output.contains("15:00"));
        assert!(!output.contains("No dates"));

        let task = ParsedTask {
            due_date: Some(ResolvedDate::Date(due.date())),
            ..task
        };
        assert!(!format_task_pretty(&task).contains("Time:"));
    }

    #[test]
    fn test_format_task_pretty_unresolved_deadline() {
        let task = ParsedTask {
            content: "report".to_string(),
            deadline_raw: Some("someday".to_string()),
            ..ParsedTask::default()
        };
        let output = format_task_pretty(&task);

        assert!(output.contains("someday (unresolved)"));
    }

    #[test]
    fn test_format_resolved_pretty() {
        let resolved = ResolvedFragment {
            date: ResolvedDate::Date(NaiveDate::from_ymd_opt(2025, 6, 2).unwrap()),
            source: DateSource::Natural,
        };
        let output = format_resolved_pretty("tomorrow", &resolved);

        assert!(output.contains("tomorrow"));
        assert!(output.contains("2025-06-02"));
    }
}
