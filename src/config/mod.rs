//! Settings persistence and validation.
//!
//! Loads and saves the Jira connection settings from `~/.jm/config.json`.
//! A sync run is allowed to start only when every field is non-empty;
//! `jm config set` fills fields in incrementally, merging with the file.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Jira connection and output settings.
///
/// All five fields are required before a sync run can start. Empty
/// strings mean "not configured yet" so a partially filled config file
/// round-trips cleanly.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct JiraSettings {
    /// Root folder under which project folders are created.
    #[serde(default)]
    pub local_folder: String,

    /// Atlassian account email (basic auth username).
    #[serde(default)]
    pub jira_email: String,

    /// Atlassian API token (basic auth password).
    #[serde(default)]
    pub jira_token: String,

    /// Jira site URL, e.g. `https://my-domain.atlassian.net`.
    #[serde(default)]
    pub jira_url: String,

    /// Project key, the prefix placed in front of each issue key.
    #[serde(default)]
    pub jira_project_key: String,
}

impl JiraSettings {
    /// Names of the fields that are still empty.
    #[must_use]
    pub fn missing_fields(&self) -> Vec<String> {
        let mut missing = Vec::new();
        if self.local_folder.is_empty() {
            missing.push("local_folder".to_string());
        }
        if self.jira_email.is_empty() {
            missing.push("jira_email".to_string());
        }
        if self.jira_token.is_empty() {
            missing.push("jira_token".to_string());
        }
        if self.jira_url.is_empty() {
            missing.push("jira_url".to_string());
        }
        if self.jira_project_key.is_empty() {
            missing.push("jira_project_key".to_string());
        }
        missing
    }

    /// Validation gate: a run may only start when this returns `Ok`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigIncomplete` naming exactly the empty fields.
    pub fn validate(&self) -> Result<()> {
        let missing = self.missing_fields();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(Error::ConfigIncomplete { missing })
        }
    }

    /// Identity of the local workspace the mirror writes into.
    ///
    /// Derived from the project key so each mirrored Jira project
    /// keeps its registrations and membership apart from other
    /// mirrors on the same machine.
    #[must_use]
    pub fn workspace_id(&self) -> String {
        format!("jira-{}", self.jira_project_key)
    }

    /// Merge non-empty fields from `update` into `self`.
    ///
    /// Used by `jm config set` so partial invocations keep existing values.
    pub fn merge(&mut self, update: JiraSettings) {
        if !update.local_folder.is_empty() {
            self.local_folder = update.local_folder;
        }
        if !update.jira_email.is_empty() {
            self.jira_email = update.jira_email;
        }
        if !update.jira_token.is_empty() {
            self.jira_token = update.jira_token;
        }
        if !update.jira_url.is_empty() {
            self.jira_url = update.jira_url;
        }
        if !update.jira_project_key.is_empty() {
            self.jira_project_key = update.jira_project_key;
        }
    }
}

/// Resolve the config file path.
///
/// Priority:
/// 1. Explicit `--config` flag
/// 2. `JM_CONFIG` environment variable
/// 3. `~/.jm/config.json`
///
/// # Errors
///
/// Returns an error if no home directory can be determined.
pub fn config_path(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }

    if let Ok(path) = std::env::var("JM_CONFIG") {
        if !path.trim().is_empty() {
            return Ok(PathBuf::from(path));
        }
    }

    directories::BaseDirs::new()
        .map(|b| b.home_dir().join(".jm").join("config.json"))
        .ok_or_else(|| Error::Config("Could not determine home directory".into()))
}

/// Load settings from the config file.
///
/// A missing file yields default (all-empty) settings so first-run
/// `jm config set` works without an init step.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_settings(path: &Path) -> Result<JiraSettings> {
    if !path.exists() {
        return Ok(JiraSettings::default());
    }

    let content = fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Failed to read config file: {e}")))?;

    serde_json::from_str(&content)
        .map_err(|e| Error::Config(format!("Failed to parse config file: {e}")))
}

/// Save settings to the config file, creating parent directories.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or the file
/// cannot be written.
pub fn save_settings(path: &Path, settings: &JiraSettings) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| Error::Config(format!("Failed to create config directory: {e}")))?;
    }

    let content = serde_json::to_string_pretty(settings)
        .map_err(|e| Error::Config(format!("Failed to serialize config: {e}")))?;

    fs::write(path, content)
        .map_err(|e| Error::Config(format!("Failed to write config file: {e}")))?;

    Ok(())
}
