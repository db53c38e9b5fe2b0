use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "tasklex")]
#[command(about = "Turn free-text to-do input into structured tasks and date pickers")]
#[command(long_about = "tasklex - free-text task entry

Parses lines like \"buy milk @groceries #Shopping due:7d p1 {friday}\" into
content, labels, project, section, due date, deadline and priority. When a
date or a label/project cannot be matched exactly, prints a menu of choices
whose args can be fed straight back in.

QUICK START:
  tasklex parse \"call mom tomorrow at 3pm #Family\"
  tasklex due-menu 3d --through \"call mom due:\"
  tasklex resolve \"next friday\"
  tasklex reschedule-date 7d

SYNTAX:
  @label  @(two words)         Labels
  #Project  #Project/Section   Project and section
  due:7d  due:1d15:00          Due in N days (w = weeks, m = months)
  due:2025-06-01T09:30         Absolute due date
  {next friday}                Deadline
  p1..p4                       Priority (p1 is highest)

OUTPUT FORMATS:
  --output json      Launcher item list (default)
  --output pretty    Human-readable colored output

Settings and the label/project catalog live in ~/.tasklex/config.yaml.")]
#[command(version, propagate_version = true)]
pub struct Cli {
    /// Output format for command results
    ///
    /// Defaults to `general.default_output` from the config file.
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Language for date keywords (da, de, en, es, fi, fr, it, ja, ko, nl, pl, pt, ru, sv, tr, zh)
    ///
    /// Overrides `general.lang` and the system locale.
    #[arg(short, long, global = true, env = "TASKLEX_LANG")]
    pub lang: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for command results.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Launcher item-list JSON.
    #[default]
    Json,
    /// Human-readable colored output.
    Pretty,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse a task input line
    ///
    /// Prints a preview of the task, or a menu when a label, project or
    /// due date needs to be picked.
    ///
    /// # Examples
    ///
    ///   tasklex parse "buy milk @groceries #Shopping due:7d p1"
    ///   tasklex parse "report #(Home Stuff)/Calls {next friday}"
    ///   tasklex --lang it parse "chiamare Marco domani"
    #[command(alias = "p")]
    Parse {
        /// The input line (words are joined with spaces)
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        input: Vec<String>,
    },

    /// Show the due-date picker
    ///
    /// Without a fragment, offers today, tomorrow, in a week and in a month.
    /// With `Nd`, `Nw`, `Nm` or `NdHH:MM`, offers that single date.
    #[command(name = "due-menu")]
    DueMenu {
        /// Typed quantity, e.g. `3d`, `2w`, `1d15:00`
        fragment: Option<String>,

        /// The rest of the input line, kept in each item's arg
        #[arg(long, default_value = "")]
        through: String,
    },

    /// Show the reschedule picker
    ///
    /// Also accepts absolute dates and natural-language phrases.
    #[command(name = "reschedule-menu")]
    RescheduleMenu {
        /// Typed date, e.g. `3d`, `2025-06-12`, `next friday`
        fragment: Option<String>,

        /// Content of the task being rescheduled, shown as subtitle
        #[arg(long, default_value = "")]
        task: String,
    },

    /// Resolve one date fragment through every strategy
    ///
    /// # Examples
    ///
    ///   tasklex resolve 1d15:00
    ///   tasklex resolve "in 2 weeks"
    ///   tasklex --lang de resolve morgen
    Resolve {
        /// The fragment to resolve
        fragment: String,
    },

    /// Convert a reschedule-picker arg into an API date
    #[command(name = "reschedule-date")]
    RescheduleDate {
        /// `Nd`, `NdHH:MM`, a bare number of days, or an ISO date
        arg: String,
    },
}
