//! Shared data types for task input parsing.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::Serialize;
use unicode_normalization::UnicodeNormalization;

use crate::core::ResolvedDate;

/// Outcome of anything that may need the user to pick from a menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution<T> {
    /// Input was understood.
    Resolved(T),
    /// Input was ambiguous or unknown; show these items instead.
    NeedsSelection(Vec<AutocompleteItem>),
}

impl<T> Resolution<T> {
    /// The resolved value, discarding any menu.
    #[must_use]
    pub fn resolved(self) -> Option<T> {
        match self {
            Self::Resolved(value) => Some(value),
            Self::NeedsSelection(_) => None,
        }
    }

    /// The menu items, if a selection is needed.
    #[must_use]
    pub fn items(&self) -> Option<&[AutocompleteItem]> {
        match self {
            Self::Resolved(_) => None,
            Self::NeedsSelection(items) => Some(items),
        }
    }

    /// Check if the input was fully resolved.
    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }
}

/// Task priority as typed by the user (`p1` is the most urgent).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Priority {
    /// `p1`, highest.
    P1,
    /// `p2`
    P2,
    /// `p3`
    P3,
    /// `p4`, lowest.
    P4,
}

impl Priority {
    /// Parse `p1`..`p4`, case-insensitive.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        match token.to_ascii_lowercase().as_str() {
            "p1" => Some(Self::P1),
            "p2" => Some(Self::P2),
            "p3" => Some(Self::P3),
            "p4" => Some(Self::P4),
            _ => None,
        }
    }

    /// Internal API value: 4 is highest, 1 is lowest.
    #[must_use]
    pub const fn api_value(self) -> u8 {
        match self {
            Self::P1 => 4,
            Self::P2 => 3,
            Self::P3 => 2,
            Self::P4 => 1,
        }
    }

    /// The user-facing token.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::P1 => "p1",
            Self::P2 => "p2",
            Self::P3 => "p3",
            Self::P4 => "p4",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of parsing a task input line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedTask {
    /// Remaining free text once every field is extracted.
    pub content: String,
    /// Label names, without the `@` sigil, in input order.
    pub labels: Vec<String>,
    /// Project name including the `#` sigil.
    pub project_name: Option<String>,
    /// Project id, when the context knows it.
    pub project_id: Option<String>,
    /// Section name, from `#Project/Section`.
    pub section_name: Option<String>,
    /// Section id, when the context knows it.
    pub section_id: Option<String>,
    /// Resolved due date.
    pub due_date: Option<ResolvedDate>,
    /// Raw natural-language due phrase, kept for deferred resolution.
    pub due_string: Option<String>,
    /// Language of `due_string`.
    pub due_lang: Option<String>,
    /// Resolved deadline.
    pub deadline: Option<NaiveDate>,
    /// Raw text between `{` and `}`.
    pub deadline_raw: Option<String>,
    /// Explicit priority marker, if any.
    pub priority: Option<Priority>,
    /// The untouched input line.
    pub raw_input: String,
}

impl ParsedTask {
    /// Internal priority value (1 when no marker was given).
    #[must_use]
    pub fn api_priority(&self) -> u8 {
        self.priority.map_or(1, Priority::api_value)
    }

    /// `p1`..`p4`, or empty when no marker was given.
    #[must_use]
    pub fn prio_string(&self) -> &'static str {
        self.priority.map_or("", Priority::as_str)
    }

    /// Check if this task has any date set.
    #[must_use]
    pub const fn has_schedule(&self) -> bool {
        self.due_date.is_some() || self.deadline.is_some()
    }
}

/// Icon hint for a menu item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Icon {
    /// Date choices.
    Today,
    /// Existing label.
    Label,
    /// Offer to create a label.
    NewLabel,
    /// Existing project.
    Project,
    /// Invalid input or nothing found.
    Warning,
    /// Task preview.
    NewTask,
}

impl Icon {
    /// Icon file path relative to the host workflow.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Today => "icons/today.png",
            Self::Label => "icons/label.png",
            Self::NewLabel => "icons/newLabel.png",
            Self::Project => "icons/project.png",
            Self::Warning => "icons/warning.png",
            Self::NewTask => "icons/newTask.png",
        }
    }
}

/// Structured flags attached to a menu item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mySource", rename_all = "camelCase")]
pub enum ItemVariables {
    /// Selecting the item creates a new label before re-parsing.
    CreateLabel {
        /// Name of the label to create.
        #[serde(rename = "myNewLabel")]
        name: String,
    },
    /// Selecting the item creates the previewed task.
    NewTask {
        /// Task content.
        #[serde(rename = "myTaskText")]
        text: String,
        /// Label names joined with `,,..,,`.
        #[serde(rename = "myTagString")]
        tag_string: String,
        /// Project id, empty when unknown.
        #[serde(rename = "myProjectID")]
        project_id: String,
        /// Section id, empty when unknown.
        #[serde(rename = "mySectionID")]
        section_id: String,
        /// Coded due date (`2025-06-01` or `2025-06-01T15:00`).
        #[serde(rename = "myDueDate")]
        due_date: String,
        /// Natural-language due phrase, preferred over `due_date`.
        #[serde(rename = "myDueString")]
        due_string: String,
        /// Language of `due_string`.
        #[serde(rename = "myDueLang")]
        due_lang: String,
        /// Deadline date.
        #[serde(rename = "myDeadline")]
        deadline: String,
        /// Internal priority, 4 highest.
        #[serde(rename = "myPriority")]
        priority: u8,
    },
}

/// Separator between label names in [`ItemVariables::NewTask`].
pub const TAG_SEPARATOR: &str = ",,..,,";

/// One entry of a menu shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutocompleteItem {
    /// Main line.
    pub title: String,
    /// Secondary line.
    pub subtitle: String,
    /// Text fed back verbatim as the next input; `None` when not actionable.
    pub arg: Option<String>,
    /// Icon hint.
    pub icon: Icon,
    /// Optional structured flags.
    pub variables: Option<ItemVariables>,
}

impl AutocompleteItem {
    /// Create an actionable item.
    #[must_use]
    pub fn new(title: impl Into<String>, arg: impl Into<String>, icon: Icon) -> Self {
        Self {
            title: title.into(),
            subtitle: String::new(),
            arg: Some(arg.into()),
            icon,
            variables: None,
        }
    }

    /// Create an item that only informs and carries no argument.
    #[must_use]
    pub fn notice(title: impl Into<String>, subtitle: impl Into<String>, icon: Icon) -> Self {
        Self {
            title: title.into(),
            subtitle: subtitle.into(),
            arg: None,
            icon,
            variables: None,
        }
    }

    /// Set the subtitle.
    #[must_use]
    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = subtitle.into();
        self
    }

    /// Attach structured flags.
    #[must_use]
    pub fn with_variables(mut self, variables: ItemVariables) -> Self {
        self.variables = Some(variables);
        self
    }
}

/// Everything the parser knows about the user's labels and projects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputContext {
    /// Known labels, `@`-prefixed and NFC-normalized.
    pub all_labels: BTreeSet<String>,
    /// Known projects (and `Project/Section` pairs), `#`-prefixed and NFC-normalized.
    pub all_projects: BTreeSet<String>,
    /// Label name (no sigil) to usage count.
    pub label_counts: BTreeMap<String, u32>,
    /// Project name (no sigil) to usage count.
    pub project_counts: BTreeMap<String, u32>,
    /// Project name (no sigil) to id.
    pub project_ids: BTreeMap<String, String>,
    /// `Project/Section` to section id.
    pub section_ids: BTreeMap<String, String>,
    /// Match fragments anywhere in a name, ignoring the sigil.
    pub partial_match: bool,
    /// Two-letter language code; empty means English.
    pub lang: String,
}

impl Default for InputContext {
    fn default() -> Self {
        Self {
            all_labels: BTreeSet::new(),
            all_projects: BTreeSet::new(),
            label_counts: BTreeMap::new(),
            project_counts: BTreeMap::new(),
            project_ids: BTreeMap::new(),
            section_ids: BTreeMap::new(),
            partial_match: true,
            lang: "en".to_string(),
        }
    }
}

impl InputContext {
    /// Build a context from usage counts keyed by bare names.
    #[must_use]
    pub fn from_counts(
        label_counts: BTreeMap<String, u32>,
        project_counts: BTreeMap<String, u32>,
    ) -> Self {
        let all_labels = label_counts.keys().map(|n| format!("@{}", nfc(n))).collect();
        let all_projects = project_counts
            .keys()
            .map(|n| format!("#{}", nfc(n)))
            .collect();
        Self {
            all_labels,
            all_projects,
            label_counts,
            project_counts,
            ..Self::default()
        }
    }

    /// Set the language code.
    #[must_use]
    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = lang.into();
        self
    }

    /// Set the partial-match toggle.
    #[must_use]
    pub fn with_partial_match(mut self, partial_match: bool) -> Self {
        self.partial_match = partial_match;
        self
    }

    /// Exact, normalization-insensitive label lookup (`@name`).
    #[must_use]
    pub fn knows_label(&self, label: &str) -> bool {
        self.all_labels.contains(&nfc(label))
    }

    /// Exact, normalization-insensitive project lookup (`#name`).
    #[must_use]
    pub fn knows_project(&self, project: &str) -> bool {
        self.all_projects.contains(&nfc(project))
    }

    /// Usage count for a sigil-prefixed label.
    #[must_use]
    pub fn label_count(&self, label: &str) -> u32 {
        count_for(&self.label_counts, label)
    }

    /// Usage count for a sigil-prefixed project.
    #[must_use]
    pub fn project_count(&self, project: &str) -> u32 {
        count_for(&self.project_counts, project)
    }
}

fn count_for(counts: &BTreeMap<String, u32>, prefixed: &str) -> u32 {
    let name: String = prefixed.chars().skip(1).collect();
    counts
        .get(&name)
        .or_else(|| counts.iter().find(|(k, _)| nfc(k) == name).map(|(_, v)| v))
        .copied()
        .unwrap_or(0)
}

/// Trim and apply Unicode NFC normalization.
#[must_use]
pub fn nfc(text: &str) -> String {
    text.trim().nfc().collect()
}
