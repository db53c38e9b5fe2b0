//! Path resolution for tasklex configuration.
//!
//! All tasklex data is stored in `~/.tasklex/`:
//! - `config.yaml` - Settings and the label/project catalog

use std::path::PathBuf;

use crate::error::TasklexError;

/// Paths to the tasklex configuration directory.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Root directory: `~/.tasklex/`
    pub root: PathBuf,
    /// Config file: `~/.tasklex/config.yaml`
    pub config_file: PathBuf,
}

impl Paths {
    /// Create paths based on the user's home directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, TasklexError> {
        let home = std::env::var("HOME").map_err(|_| {
            TasklexError::Config("Could not determine home directory".to_string())
        })?;

        Ok(Self::with_root(PathBuf::from(home).join(".tasklex")))
    }

    /// Create paths with a custom root directory (useful for testing).
    #[must_use]
    pub fn with_root(root: PathBuf) -> Self {
        Self {
            config_file: root.join("config.yaml"),
            root,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_with_root() {
        let root = PathBuf::from("/tmp/test-tasklex");
        let paths = Paths::with_root(root.clone());

        assert_eq!(paths.root, root);
        assert_eq!(paths.config_file, root.join("config.yaml"));
    }
}
