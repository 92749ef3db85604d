//! Path management for FacultyHub files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/facultyhub/        # Config directory (platform config dir)
//! ├── config.toml              # Client configuration
//! └── user.json                # Persisted identity (name = identity key)
//! ```

use std::path::{Path, PathBuf};

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// No platform configuration directory could be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find configuration directory"),
        }
    }
}

impl std::error::Error for PathError {}

impl From<PathError> for facultyhub_core::ClientError {
    fn from(e: PathError) -> Self {
        facultyhub_core::ClientError::config(e.to_string())
    }
}

/// Resolves every file location from a single root directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacultyHubPaths {
    root: PathBuf,
}

impl FacultyHubPaths {
    const APP_DIR: &'static str = "facultyhub";

    /// Uses `<platform config dir>/facultyhub`.
    pub fn platform() -> Result<Self, PathError> {
        let base = dirs::config_dir().ok_or(PathError::ConfigDirNotFound)?;
        Ok(Self::at(base.join(Self::APP_DIR)))
    }

    /// Uses an explicit root, e.g. a temporary directory in tests.
    pub fn at(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_file(&self) -> PathBuf {
        self.root.join("config.toml")
    }

    /// File holding the serialized identity stored under `identity_key`.
    pub fn identity_file(&self, identity_key: &str) -> PathBuf {
        self.root.join(format!("{identity_key}.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout() {
        let paths = FacultyHubPaths::at("/tmp/fh");
        assert_eq!(paths.config_file(), PathBuf::from("/tmp/fh/config.toml"));
        assert_eq!(paths.identity_file("user"), PathBuf::from("/tmp/fh/user.json"));
    }
}
