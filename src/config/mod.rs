//! Configuration management for tasklex.
//!
//! This module handles loading and saving configuration from `~/.tasklex/`.

mod paths;
mod settings;

pub use paths::Paths;
pub use settings::{detect_system_lang, CatalogConfig, Config, GeneralConfig};
