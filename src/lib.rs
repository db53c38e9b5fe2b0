//! tasklex - free-text to-do input parsing
//!
//! This crate turns a single line of task input into structured fields
//! (content, labels, project, section, due date, deadline, priority) and
//! builds the date and reference pickers shown when input is incomplete.

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod features;
pub mod output;

pub use cli::args::{Cli, Commands, OutputFormat};
pub use error::TasklexError;
pub use features::nlp::{parse_task_input, InputContext, ParsedTask, Resolution};
