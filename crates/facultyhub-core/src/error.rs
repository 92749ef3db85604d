//! Error types for the FacultyHub client.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for every FacultyHub crate.
///
/// The variants follow the three user-facing categories of failure
/// (local validation, transport, backend-reported) plus the internal
/// plumbing failures of storage, decoding and state transitions.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ClientError {
    /// Local validation failure; never reaches the network.
    #[error("{0}")]
    Validation(String),

    /// The request never produced an HTTP response.
    #[error("Transport error: {message}")]
    Transport { message: String },

    /// Non-2xx response from the backend.
    #[error("{}", api_display(.status, .message))]
    Api {
        status: u16,
        message: Option<String>,
    },

    /// A response body did not match the shape expected for its endpoint.
    #[error("Unexpected response from {endpoint}: {message}")]
    Decode { endpoint: String, message: String },

    /// Durable client-side storage error
    #[error("Storage error: {message}")]
    Storage { message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// A workflow operation that the current status does not permit.
    #[error("Cannot {action} while workflow is {from}")]
    InvalidTransition { from: String, action: String },

    /// A workflow operation was issued with no run started.
    #[error("No active workflow run")]
    NoActiveRun,

    /// The run this result belonged to was cancelled or replaced.
    #[error("Operation cancelled")]
    Cancelled,

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

fn api_display(status: &u16, message: &Option<String>) -> String {
    match message {
        Some(message) => format!("Request failed with status {status}: {message}"),
        None => format!("Request failed with status {status}"),
    }
}

impl ClientError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a Transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Creates an Api error
    pub fn api(status: u16, message: Option<String>) -> Self {
        Self::Api { status, message }
    }

    /// Creates a Decode error for the given endpoint
    pub fn decode(endpoint: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            endpoint: endpoint.into(),
            message: message.into(),
        }
    }

    /// Creates a Storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an InvalidTransition error
    pub fn invalid_transition(from: impl Into<String>, action: impl Into<String>) -> Self {
        Self::InvalidTransition {
            from: from.into(),
            action: action.into(),
        }
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }

    pub fn is_api(&self) -> bool {
        matches!(self, Self::Api { .. })
    }

    /// Check if the backend rejected the session (401/403).
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Api { status: 401 | 403, .. })
    }

    /// Returns the message a user should see for this error.
    ///
    /// Backend messages and validation texts are shown verbatim; everything
    /// else collapses to `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Validation(message) => message.clone(),
            Self::Api {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => message.clone(),
            _ => fallback.to_string(),
        }
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        Self::Storage {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        Self::Storage {
            message: format!("JSON - {}", err),
        }
    }
}

impl From<toml::de::Error> for ClientError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(format!("TOML - {}", err))
    }
}

/// A type alias for `Result<T, ClientError>`.
pub type Result<T> = std::result::Result<T, ClientError>;
