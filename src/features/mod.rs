//! Feature implementations for tasklex.
//!
//! - Natural language task input parsing

pub mod nlp;
