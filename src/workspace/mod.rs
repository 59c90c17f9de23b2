//! Local project/folder state API.
//!
//! The sync engine treats local state through the [`Workspace`] trait:
//! folder checks, recursive creation, project registration, membership,
//! and tag values on folders. [`FsWorkspace`] is the real
//! implementation, persisting registration in `<project>/.jm/project.json`
//! and folder attributes in `<folder>/.jm/attributes.json`.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::TagColor;

/// Subdirectory holding per-folder metadata files.
const META_DIR: &str = ".jm";
const PROJECT_FILE: &str = "project.json";
const ATTRIBUTES_FILE: &str = "attributes.json";

/// Access level of a project member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessLevel {
    Owner,
    Admin,
    Member,
}

/// A registered local project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectHandle {
    pub id: String,
    pub name: String,
    pub workspace_id: String,
    pub path: PathBuf,
}

/// One project member record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub email: String,
    pub access: AccessLevel,
    /// Where the invitation came from, e.g. "Jira".
    pub source: String,
}

/// On-disk project registration document.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ProjectMeta {
    id: String,
    name: String,
    workspace_id: String,
    created_at: i64,
    #[serde(default)]
    members: Vec<Member>,
}

/// One selectable value of a folder attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct TagValue {
    name: String,
    color: TagColor,
}

/// State of one attribute on a folder: its value vocabulary and the
/// currently set value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct AttributeState {
    #[serde(default)]
    values: Vec<TagValue>,
    #[serde(default)]
    current: Option<String>,
}

type AttributeDoc = BTreeMap<String, AttributeState>;

/// Local project and folder operations the sync engine depends on.
///
/// Each operation is atomic and synchronous from the engine's point of
/// view; failures propagate and abort the run.
pub trait Workspace: Send + Sync {
    /// Whether `path` exists and is a directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Create `path` and all missing parents.
    fn create_dir_all(&self, path: &Path) -> Result<()>;

    /// Whether the folder at `path` is a registered project.
    fn is_project(&self, path: &Path) -> bool;

    /// Register the folder at `path` as a project in this workspace.
    fn create_project(&self, path: &Path, name: &str) -> Result<ProjectHandle>;

    /// Look up the registered project at `path`.
    fn get_project(&self, path: &Path) -> Result<ProjectHandle>;

    /// Emails of the project's current members.
    fn project_members(&self, project: &ProjectHandle) -> Result<Vec<String>>;

    /// Add a member to the project.
    fn add_member(
        &self,
        project: &ProjectHandle,
        email: &str,
        access: AccessLevel,
        source: &str,
    ) -> Result<()>;

    /// Ensure `value` exists in the attribute's vocabulary on `folder`,
    /// creating it with `color` if absent. Existing values keep their
    /// color.
    fn ensure_tag_value(
        &self,
        folder: &Path,
        attribute: &str,
        value: &str,
        color: TagColor,
    ) -> Result<()>;

    /// Set the attribute's current value on `folder`. A value not yet
    /// in the vocabulary is added with the default color.
    fn set_tag(&self, folder: &Path, attribute: &str, value: &str) -> Result<()>;
}

/// Filesystem-backed workspace.
pub struct FsWorkspace {
    workspace_id: String,
}

impl FsWorkspace {
    /// Create a workspace rooted in the given workspace identity.
    #[must_use]
    pub fn new(workspace_id: impl Into<String>) -> Self {
        Self {
            workspace_id: workspace_id.into(),
        }
    }

    fn project_file(path: &Path) -> PathBuf {
        path.join(META_DIR).join(PROJECT_FILE)
    }

    fn attributes_file(folder: &Path) -> PathBuf {
        folder.join(META_DIR).join(ATTRIBUTES_FILE)
    }

    fn read_meta(path: &Path) -> Result<ProjectMeta> {
        let file = Self::project_file(path);
        let content = fs::read_to_string(&file).map_err(|e| {
            Error::Workspace(format!("No project registered at {}: {e}", path.display()))
        })?;
        serde_json::from_str(&content)
            .map_err(|e| Error::Workspace(format!("Corrupt project file {}: {e}", file.display())))
    }

    fn write_meta(path: &Path, meta: &ProjectMeta) -> Result<()> {
        let file = Self::project_file(path);
        if let Some(parent) = file.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&file, serde_json::to_string_pretty(meta)?)?;
        Ok(())
    }

    fn read_attributes(folder: &Path) -> Result<AttributeDoc> {
        let file = Self::attributes_file(folder);
        if !file.exists() {
            return Ok(AttributeDoc::new());
        }
        let content = fs::read_to_string(&file)?;
        serde_json::from_str(&content).map_err(|e| {
            Error::Workspace(format!("Corrupt attributes file {}: {e}", file.display()))
        })
    }

    fn write_attributes(folder: &Path, doc: &AttributeDoc) -> Result<()> {
        let file = Self::attributes_file(folder);
        if let Some(parent) = file.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&file, serde_json::to_string_pretty(doc)?)?;
        Ok(())
    }

    fn handle(path: &Path, meta: &ProjectMeta) -> ProjectHandle {
        ProjectHandle {
            id: meta.id.clone(),
            name: meta.name.clone(),
            workspace_id: meta.workspace_id.clone(),
            path: path.to_path_buf(),
        }
    }
}

impl Workspace for FsWorkspace {
    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        fs::create_dir_all(path)?;
        Ok(())
    }

    fn is_project(&self, path: &Path) -> bool {
        Self::project_file(path).is_file()
    }

    fn create_project(&self, path: &Path, name: &str) -> Result<ProjectHandle> {
        if self.is_project(path) {
            return Err(Error::Workspace(format!(
                "Folder is already a project: {}",
                path.display()
            )));
        }

        let meta = ProjectMeta {
            id: format!("proj_{}", &uuid::Uuid::new_v4().to_string()[..12]),
            name: name.to_string(),
            workspace_id: self.workspace_id.clone(),
            created_at: chrono::Utc::now().timestamp_millis(),
            members: Vec::new(),
        };

        Self::write_meta(path, &meta)?;
        Ok(Self::handle(path, &meta))
    }

    fn get_project(&self, path: &Path) -> Result<ProjectHandle> {
        let meta = Self::read_meta(path)?;
        Ok(Self::handle(path, &meta))
    }

    fn project_members(&self, project: &ProjectHandle) -> Result<Vec<String>> {
        let meta = Self::read_meta(&project.path)?;
        Ok(meta.members.into_iter().map(|m| m.email).collect())
    }

    fn add_member(
        &self,
        project: &ProjectHandle,
        email: &str,
        access: AccessLevel,
        source: &str,
    ) -> Result<()> {
        let mut meta = Self::read_meta(&project.path)?;

        if meta.members.iter().any(|m| m.email == email) {
            return Ok(());
        }

        meta.members.push(Member {
            email: email.to_string(),
            access,
            source: source.to_string(),
        });

        Self::write_meta(&project.path, &meta)
    }

    fn ensure_tag_value(
        &self,
        folder: &Path,
        attribute: &str,
        value: &str,
        color: TagColor,
    ) -> Result<()> {
        let mut doc = Self::read_attributes(folder)?;
        let state = doc.entry(attribute.to_string()).or_default();

        if !state.values.iter().any(|v| v.name == value) {
            state.values.push(TagValue {
                name: value.to_string(),
                color,
            });
            return Self::write_attributes(folder, &doc);
        }

        Ok(())
    }

    fn set_tag(&self, folder: &Path, attribute: &str, value: &str) -> Result<()> {
        let mut doc = Self::read_attributes(folder)?;
        let state = doc.entry(attribute.to_string()).or_default();

        if !state.values.iter().any(|v| v.name == value) {
            state.values.push(TagValue {
                name: value.to_string(),
                color: TagColor::Default,
            });
        }

        state.current = Some(value.to_string());
        Self::write_attributes(folder, &doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_plain_folder_is_not_a_project() {
        let temp = TempDir::new().unwrap();
        let ws = FsWorkspace::new("ws-1");
        assert!(ws.is_dir(temp.path()));
        assert!(!ws.is_project(temp.path()));
    }

    #[test]
    fn test_create_then_get_project() {
        let temp = TempDir::new().unwrap();
        let ws = FsWorkspace::new("ws-1");

        let created = ws.create_project(temp.path(), "PROJ-1-Foo").unwrap();
        assert!(created.id.starts_with("proj_"));
        assert_eq!(created.workspace_id, "ws-1");
        assert!(ws.is_project(temp.path()));

        let fetched = ws.get_project(temp.path()).unwrap();
        assert_eq!(fetched, created);
    }

    #[test]
    fn test_create_project_twice_fails() {
        let temp = TempDir::new().unwrap();
        let ws = FsWorkspace::new("ws-1");
        ws.create_project(temp.path(), "p").unwrap();
        assert!(ws.create_project(temp.path(), "p").is_err());
    }

    #[test]
    fn test_members_add_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let ws = FsWorkspace::new("ws-1");
        let project = ws.create_project(temp.path(), "p").unwrap();

        assert!(ws.project_members(&project).unwrap().is_empty());

        ws.add_member(&project, "dev@example.com", AccessLevel::Member, "Jira")
            .unwrap();
        ws.add_member(&project, "dev@example.com", AccessLevel::Member, "Jira")
            .unwrap();

        assert_eq!(
            ws.project_members(&project).unwrap(),
            vec!["dev@example.com".to_string()]
        );
    }

    #[test]
    fn test_ensure_tag_value_keeps_existing_color() {
        let temp = TempDir::new().unwrap();
        let ws = FsWorkspace::new("ws-1");

        ws.ensure_tag_value(temp.path(), "Status", "Done", TagColor::Green)
            .unwrap();
        ws.ensure_tag_value(temp.path(), "Status", "Done", TagColor::Red)
            .unwrap();

        let doc = FsWorkspace::read_attributes(temp.path()).unwrap();
        let state = &doc["Status"];
        assert_eq!(state.values.len(), 1);
        assert_eq!(state.values[0].color, TagColor::Green);
    }

    #[test]
    fn test_set_tag_updates_current_value() {
        let temp = TempDir::new().unwrap();
        let ws = FsWorkspace::new("ws-1");

        ws.ensure_tag_value(temp.path(), "Status", "To Do", TagColor::Grey)
            .unwrap();
        ws.ensure_tag_value(temp.path(), "Status", "Done", TagColor::Green)
            .unwrap();
        ws.set_tag(temp.path(), "Status", "Done").unwrap();

        let doc = FsWorkspace::read_attributes(temp.path()).unwrap();
        assert_eq!(doc["Status"].current.as_deref(), Some("Done"));
        assert_eq!(doc["Status"].values.len(), 2);
    }

    #[test]
    fn test_set_tag_on_unknown_value_adds_default_color() {
        let temp = TempDir::new().unwrap();
        let ws = FsWorkspace::new("ws-1");

        ws.set_tag(temp.path(), "Status", "Surprise").unwrap();

        let doc = FsWorkspace::read_attributes(temp.path()).unwrap();
        assert_eq!(doc["Status"].current.as_deref(), Some("Surprise"));
        assert_eq!(doc["Status"].values[0].color, TagColor::Default);
    }
}
