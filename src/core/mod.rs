//! Core date handling for tasklex.
//!
//! This module provides the resolved-date type, calendar arithmetic and the
//! English phrase grammar used by the input parser.

mod datetime;
pub mod english;

pub use datetime::{
    day_word, days_between, long_date_from, next_weekday, offset_date, parse_clock_time,
    ResolvedDate,
};
pub use english::{find_phrase, has_time_indicator, parse_phrase, PhraseMatch};
