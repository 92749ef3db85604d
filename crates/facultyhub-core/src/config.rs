//! Client configuration model.

use serde::{Deserialize, Serialize};

/// Default backend base address.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api/v1";

/// Fixed key under which the serialized identity is persisted.
pub const DEFAULT_IDENTITY_KEY: &str = "user";

/// Environment variable that overrides [`ClientConfig::base_url`].
pub const BASE_URL_ENV: &str = "FACULTYHUB_BASE_URL";

/// Settings shared by every FacultyHub component.
///
/// Every field has a default, so an empty or partial `config.toml`
/// deserializes cleanly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Backend base address, without a trailing slash.
    pub base_url: String,
    /// Storage key of the persisted identity.
    pub identity_key: String,
    /// Required institutional email suffix for signup. `None` disables the check.
    pub institution_email_domain: Option<String>,
    /// Location unauthenticated visitors are redirected to.
    pub login_path: String,
    pub min_password_length: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            identity_key: DEFAULT_IDENTITY_KEY.to_string(),
            institution_email_domain: Some("@iiitnr.edu.in".to_string()),
            login_path: "/login".to_string(),
            min_password_length: 6,
        }
    }
}

impl ClientConfig {
    /// Returns a copy with `base_url` replaced, trailing slashes stripped.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Applies the `FACULTYHUB_BASE_URL` override when set and non-empty.
    pub fn apply_env_overrides(self) -> Self {
        match std::env::var(BASE_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => self.with_base_url(url.trim()),
            _ => self,
        }
    }

    /// Joins an endpoint path onto the base address.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:8000/api/v1");
        assert_eq!(config.identity_key, "user");
        assert_eq!(config.min_password_length, 6);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: ClientConfig = toml::from_str("base_url = \"https://portal.example/api\"").unwrap();
        assert_eq!(config.base_url, "https://portal.example/api");
        assert_eq!(config.login_path, "/login");
        assert_eq!(
            config.institution_email_domain.as_deref(),
            Some("@iiitnr.edu.in")
        );
    }

    #[test]
    fn test_endpoint_join() {
        let config = ClientConfig::default().with_base_url("http://host/api/v1/");
        assert_eq!(config.endpoint("/users/getUser"), "http://host/api/v1/users/getUser");
        assert_eq!(config.endpoint("group/groups"), "http://host/api/v1/group/groups");
    }
}
