//! User identity model.
//!
//! Only the fields the client reasons about are typed. Everything else the
//! backend sends (department, designation, cover image, ...) is carried in
//! `profile` and written back to storage unchanged.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Identity projection of a portal user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Avatar image URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default)]
    pub is_admin: bool,
    /// Opaque profile fields passed through untouched.
    #[serde(flatten)]
    pub profile: Map<String, Value>,
}

impl User {
    pub fn new(full_name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: None,
            full_name: full_name.into(),
            email: email.into(),
            username: None,
            avatar: None,
            is_admin: false,
            profile: Map::new(),
        }
    }

    pub fn with_admin(mut self, is_admin: bool) -> Self {
        self.is_admin = is_admin;
        self
    }

    /// Name to greet the user with: full name, else username, else email.
    pub fn display_name(&self) -> &str {
        if !self.full_name.trim().is_empty() {
            &self.full_name
        } else if let Some(username) = self.username.as_deref().filter(|u| !u.is_empty()) {
            username
        } else {
            &self.email
        }
    }

    /// Reads a pass-through profile field as a string.
    pub fn profile_str(&self, key: &str) -> Option<&str> {
        self.profile.get(key).and_then(Value::as_str)
    }
}
