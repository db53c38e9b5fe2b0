//! Configuration settings for tasklex.
//!
//! Settings are loaded from `~/.tasklex/config.yaml`.

use std::collections::BTreeMap;

use serde::Deserialize;
use tracing::debug;

use crate::cli::args::OutputFormat;
use crate::config::Paths;
use crate::error::TasklexError;
use crate::features::nlp::{InputContext, Locale};

/// Locale variables consulted for the system language, in order.
const LANG_VARS: [&str; 3] = ["LANG", "LC_ALL", "LANGUAGE"];

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// General settings.
    pub general: GeneralConfig,
    /// Known labels and projects.
    pub catalog: CatalogConfig,
}

/// General application settings.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GeneralConfig {
    /// Language for date keywords; detected from the environment when unset.
    #[serde(default)]
    pub lang: Option<String>,
    /// Match label/project fragments anywhere in a name.
    #[serde(default = "default_true")]
    pub partial_match: bool,
    /// Default output format.
    #[serde(default = "default_output_format")]
    pub default_output: OutputFormat,
}

/// Labels and projects the parser can match against.
///
/// ```yaml
/// catalog:
///   labels:
///     groceries: 12
///   projects:
///     Home: 4
///     Home/Calls: 1
///   project_ids:
///     Home: "2203306141"
///   section_ids:
///     Home/Calls: "7025"
/// ```
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct CatalogConfig {
    /// Label name to usage count.
    pub labels: BTreeMap<String, u32>,
    /// Project name (or `Project/Section`) to usage count.
    pub projects: BTreeMap<String, u32>,
    /// Project name to id.
    pub project_ids: BTreeMap<String, String>,
    /// `Project/Section` to section id.
    pub section_ids: BTreeMap<String, String>,
}

// Default value functions for serde
const fn default_output_format() -> OutputFormat {
    OutputFormat::Json
}

const fn default_true() -> bool {
    true
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            lang: None,
            partial_match: default_true(),
            default_output: default_output_format(),
        }
    }
}

impl Config {
    /// Load configuration from the default path.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load() -> Result<Self, TasklexError> {
        let paths = Paths::new()?;
        Self::load_from_path(&paths.config_file)
    }

    /// Load configuration from a specific path.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load_from_path(path: &std::path::Path) -> Result<Self, TasklexError> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            TasklexError::Config(format!(
                "Failed to read config file {}: {e}",
                path.display()
            ))
        })?;

        // An empty file deserializes to YAML null.
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(&contents).map_err(|e| {
            TasklexError::Config(format!(
                "Failed to parse config file {}: {e}",
                path.display()
            ))
        })
    }

    /// The configured language, or the system one when unset.
    #[must_use]
    pub fn resolved_lang(&self) -> String {
        match self.general.lang.as_deref().map(str::trim) {
            Some(lang) if !lang.is_empty() => lang.to_ascii_lowercase(),
            _ => detect_system_lang(|key| std::env::var(key).ok()),
        }
    }

    /// Build the parser context from the catalog.
    #[must_use]
    pub fn input_context(&self) -> InputContext {
        let mut ctx = InputContext::from_counts(
            self.catalog.labels.clone(),
            self.catalog.projects.clone(),
        )
        .with_partial_match(self.general.partial_match)
        .with_lang(self.resolved_lang());
        ctx.project_ids.clone_from(&self.catalog.project_ids);
        ctx.section_ids.clone_from(&self.catalog.section_ids);
        ctx
    }
}

/// Detect a supported language code from locale variables.
///
/// `env` looks a variable up by name. `LANG`, `LC_ALL` and `LANGUAGE` are tried
/// in order; empty, `C` and `POSIX` values are skipped and `de_DE.UTF-8`
/// yields `de`. Falls back to `en`.
pub fn detect_system_lang<F>(env: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    for key in LANG_VARS {
        let Some(value) = env(key) else {
            continue;
        };
        let value = value.trim();
        if value.is_empty() || value == "C" || value == "POSIX" {
            continue;
        }
        let code = value
            .split(['_', '.', '-'])
            .next()
            .unwrap_or_default();
        if let Some(locale) = Locale::from_code(code) {
            debug!(var = key, lang = locale.code(), "detected system language");
            return locale.code().to_string();
        }
    }
    "en".to_string()
}
