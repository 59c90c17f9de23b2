//! Error types for the Jira mirror CLI.
//!
//! Provides structured error handling with:
//! - Machine-readable error codes (`ErrorCode`)
//! - Category-based exit codes (2=config, 3=auth, 4=api, etc.)
//! - Context-aware recovery hints
//! - Structured JSON output for piped / non-TTY consumers

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Jira mirror operations.
pub type Result<T> = std::result::Result<T, Error>;

// ── Error Code ────────────────────────────────────────────────

/// Machine-readable error codes grouped by category.
///
/// Each code maps to a SCREAMING_SNAKE string and a category-based
/// exit code. Scripts match on the string or the exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // Config (exit 2)
    ConfigIncomplete,
    ConfigError,

    // Auth (exit 3)
    AuthRejected,

    // Tracker API (exit 4)
    ApiError,
    PaginationStalled,

    // Transport (exit 5)
    TransportError,

    // Sync / workspace (exit 6)
    SyncInProgress,
    WorkspaceError,

    // I/O (exit 8)
    IoError,
    JsonError,

    // Internal (exit 1)
    InternalError,
}

impl ErrorCode {
    /// Machine-readable SCREAMING_SNAKE code string.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        match self {
            Self::ConfigIncomplete => "CONFIG_INCOMPLETE",
            Self::ConfigError => "CONFIG_ERROR",
            Self::AuthRejected => "AUTH_REJECTED",
            Self::ApiError => "API_ERROR",
            Self::PaginationStalled => "PAGINATION_STALLED",
            Self::TransportError => "TRANSPORT_ERROR",
            Self::SyncInProgress => "SYNC_IN_PROGRESS",
            Self::WorkspaceError => "WORKSPACE_ERROR",
            Self::IoError => "IO_ERROR",
            Self::JsonError => "JSON_ERROR",
            Self::InternalError => "INTERNAL_ERROR",
        }
    }

    /// Category-based exit code (1-8).
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::InternalError => 1,
            Self::ConfigIncomplete | Self::ConfigError => 2,
            Self::AuthRejected => 3,
            Self::ApiError | Self::PaginationStalled => 4,
            Self::TransportError => 5,
            Self::SyncInProgress | Self::WorkspaceError => 6,
            Self::IoError | Self::JsonError => 8,
        }
    }
}

// ── Error Enum ────────────────────────────────────────────────

/// Errors that can occur in Jira mirror operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration incomplete: missing {}", missing.join(", "))]
    ConfigIncomplete { missing: Vec<String> },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Jira authentication failed")]
    Auth,

    #[error("Jira error: {}", messages.join("; "))]
    Api { messages: Vec<String> },

    #[error("Search made no progress at offset {start_at} of {total} results")]
    PaginationStalled { start_at: usize, total: usize },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Another sync is already running (lock held at {lock})")]
    SyncInProgress { lock: PathBuf },

    #[error("Workspace error: {0}")]
    Workspace(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Map this error to its structured `ErrorCode`.
    #[must_use]
    pub const fn error_code(&self) -> ErrorCode {
        match self {
            Self::ConfigIncomplete { .. } => ErrorCode::ConfigIncomplete,
            Self::Config(_) => ErrorCode::ConfigError,
            Self::Auth => ErrorCode::AuthRejected,
            Self::Api { .. } => ErrorCode::ApiError,
            Self::PaginationStalled { .. } => ErrorCode::PaginationStalled,
            Self::Http(_) => ErrorCode::TransportError,
            Self::SyncInProgress { .. } => ErrorCode::SyncInProgress,
            Self::Workspace(_) => ErrorCode::WorkspaceError,
            Self::Io(_) => ErrorCode::IoError,
            Self::Json(_) => ErrorCode::JsonError,
            Self::Other(_) => ErrorCode::InternalError,
        }
    }

    /// Category-based exit code, delegating to the `ErrorCode`.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        self.error_code().exit_code()
    }

    /// Context-aware recovery hint for humans and scripts.
    ///
    /// Returns `None` if no actionable suggestion exists.
    #[must_use]
    pub fn hint(&self) -> Option<String> {
        match self {
            Self::ConfigIncomplete { missing } => Some(format!(
                "Run `jm config set` to fill in: {}",
                missing.join(", ")
            )),

            Self::Auth => Some(
                "Check jira_email and jira_token with `jm config show`.\n  \
                 Tokens are created at https://id.atlassian.com/manage-profile/security/api-tokens"
                    .to_string(),
            ),

            Self::SyncInProgress { lock } => Some(format!(
                "Wait for the other run to finish. If it crashed, remove {} manually.",
                lock.display()
            )),

            Self::PaginationStalled { .. } => Some(
                "The Jira server reported more results than it returned. Retry the sync."
                    .to_string(),
            ),

            Self::Config(_)
            | Self::Api { .. }
            | Self::Http(_)
            | Self::Workspace(_)
            | Self::Io(_)
            | Self::Json(_)
            | Self::Other(_) => None,
        }
    }

    /// Structured JSON representation for machine consumption.
    ///
    /// Includes error code, message, exit code, and optional recovery hint.
    #[must_use]
    pub fn to_structured_json(&self) -> serde_json::Value {
        let code = self.error_code();
        let mut obj = serde_json::json!({
            "error": {
                "code": code.as_str(),
                "message": self.to_string(),
                "exit_code": code.exit_code(),
            }
        });

        if let Some(hint) = self.hint() {
            obj["error"]["hint"] = serde_json::Value::String(hint);
        }

        obj
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_message_joins_server_text() {
        let err = Error::Api {
            messages: vec!["x".to_string(), "y".to_string()],
        };
        let text = err.to_string();
        assert!(text.contains('x'));
        assert!(text.contains('y'));
    }

    #[test]
    fn test_exit_codes_by_category() {
        assert_eq!(Error::ConfigIncomplete { missing: vec![] }.exit_code(), 2);
        assert_eq!(Error::Auth.exit_code(), 3);
        assert_eq!(Error::Api { messages: vec![] }.exit_code(), 4);
        assert_eq!(
            Error::SyncInProgress {
                lock: PathBuf::from("/tmp/.jm.lock")
            }
            .exit_code(),
            6
        );
    }

    #[test]
    fn test_structured_json_has_code_and_hint() {
        let err = Error::ConfigIncomplete {
            missing: vec!["jira_url".to_string()],
        };
        let json = err.to_structured_json();
        assert_eq!(json["error"]["code"], "CONFIG_INCOMPLETE");
        assert!(json["error"]["hint"].as_str().unwrap().contains("jira_url"));
    }
}
