//! Free-text task entry.
//!
//! This module turns input like:
//! - "buy milk @groceries #Shopping due:7d p1"
//! - "report {next friday}"
//! - "call the bank tomorrow at 3pm"
//! - "chiamare Marco domani" (with `lang = "it"`)
//!
//! into a [`ParsedTask`], or into menu items when a date or reference needs
//! to be picked.

pub mod entity;
pub mod locale;
pub mod menu;
mod parser;
pub mod resolve;
pub mod tokenizer;
mod types;

pub use entity::{filter_candidates, unwrap_parens, wrap_name, Sigil};
pub use locale::{resolve_keyword, Locale, LocaleKeyword};
pub use menu::{due_menu, reschedule_menu};
pub use parser::{parse_task_input, parse_task_input_at, token_texts};
pub use resolve::{
    extend_due_phrase, is_natural_language_date, resolve_deadline, resolve_due, resolve_fragment,
    resolve_natural, resolve_reschedule_date, DateContext, DateSource, DuePhrase,
    ResolvedFragment,
};
pub use tokenizer::{extract_deadline, tokenize, ExtractedLine, Token};
pub use types::{
    nfc, AutocompleteItem, Icon, InputContext, ItemVariables, ParsedTask, Priority, Resolution,
    TAG_SEPARATOR,
};
