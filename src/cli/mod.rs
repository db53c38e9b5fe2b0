//! Command-line interface: argument definitions and command bodies.

pub mod args;
pub mod commands;
