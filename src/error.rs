//! Error types for tasklex.
//!
//! The parsing engine itself never fails: unresolved input becomes a menu.
//! These errors only come from the shell around it (config, output, CLI).

use thiserror::Error;

/// Errors raised outside the parsing engine.
#[derive(Debug, Error)]
pub enum TasklexError {
    /// Configuration could not be located, read or parsed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Command-line input that cannot be acted upon.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = TasklexError::Config("missing HOME".to_string());
        assert_eq!(err.to_string(), "Configuration error: missing HOME");
    }

    #[test]
    fn test_json_error_converts() {
        let json = serde_json::from_str::<serde_json::Value>("{oops").unwrap_err();
        let err: TasklexError = json.into();
        assert!(matches!(err, TasklexError::Json(_)));
        assert!(err.to_string().starts_with("JSON error:"));
    }
}
