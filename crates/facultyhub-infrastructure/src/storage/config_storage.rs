//! `config.toml` loading.

use facultyhub_core::config::ClientConfig;
use facultyhub_core::{ClientError, Result};
use std::fs;
use std::path::PathBuf;

/// Reads [`ClientConfig`] from a TOML file.
///
/// A missing or empty file yields the defaults. The `FACULTYHUB_BASE_URL`
/// environment variable is applied on top of whatever the file says.
pub struct ConfigStorage {
    path: PathBuf,
}

impl ConfigStorage {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Loads the file without environment overrides.
    pub fn load_file(&self) -> Result<ClientConfig> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "No config file, using defaults");
            return Ok(ClientConfig::default());
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(ClientConfig::default());
        }

        let config: ClientConfig = toml::from_str(&content)?;
        let base_url = config.base_url.clone();
        Ok(config.with_base_url(base_url))
    }

    /// Loads the file and applies environment overrides.
    pub fn load(&self) -> Result<ClientConfig> {
        Ok(self.load_file()?.apply_env_overrides())
    }

    /// Writes `config` as pretty TOML, creating the parent directory.
    pub fn save(&self, config: &ClientConfig) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(config)
            .map_err(|e| ClientError::config(format!("TOML - {}", e)))?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}
