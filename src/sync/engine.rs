//! Reconciliation engine.
//!
//! Walks tracker projects and tasks, compares against local folder and
//! project state, and creates whatever is missing. Every step is
//! independently idempotent: folder creation, project registration,
//! membership, and tag state each check before they write, so running
//! twice over identical tracker data changes nothing the second time.
//!
//! Failure semantics: the first tracker or workspace error aborts the
//! run. Local side effects already made are retained; nothing retries.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::Result;
use crate::jira::Tracker;
use crate::mapping::{epics_to_projects, issues_to_tasks, project_statuses, sanitize_file_name};
use crate::model::{Project, Status, SyncReport, Task};
use crate::workspace::{AccessLevel, ProjectHandle, Workspace};

/// Attribute under which status tags are kept on task folders.
pub const STATUS_ATTRIBUTE: &str = "Status";

/// Invitation-source label recorded on members added by the sync.
const MEMBER_SOURCE: &str = "Jira";

/// One-way reconciliation of tracker state into local folders.
///
/// The engine owns nothing between runs; all state it needs lives in
/// the tracker and the workspace.
pub struct SyncEngine<'a, T: Tracker, W: Workspace> {
    tracker: &'a T,
    workspace: &'a W,
    project_key: &'a str,
    local_folder: PathBuf,
}

impl<'a, T: Tracker, W: Workspace> SyncEngine<'a, T, W> {
    pub fn new(
        tracker: &'a T,
        workspace: &'a W,
        project_key: &'a str,
        local_folder: impl Into<PathBuf>,
    ) -> Self {
        Self {
            tracker,
            workspace,
            project_key,
            local_folder: local_folder.into(),
        }
    }

    /// Execute one full sync run and return its report.
    ///
    /// Projects are resolved strictly before their tasks, in the order
    /// the search returned them.
    ///
    /// # Errors
    ///
    /// Any tracker or workspace failure aborts the run.
    pub async fn run(&self) -> Result<SyncReport> {
        let mut report = SyncReport::default();

        let statuses = self.fetch_project_statuses().await?;
        debug!(count = statuses.len(), "fetched project-scoped statuses");

        let epics = self
            .tracker
            .search_issues(
                &format!("project = {} AND issuetype = Epic", self.project_key),
                &["issuelinks", "summary"],
            )
            .await?;

        let (projects, skipped) = epics_to_projects(&epics);
        for skip in &skipped {
            warn!(epic = %skip.key, reason = ?skip.reason, "skipping epic");
        }
        report.skipped_epics = skipped;

        for project in &projects {
            self.sync_project(project, &statuses, &mut report).await?;
        }

        Ok(report)
    }

    /// Fetch the status catalog and filter it to the configured project.
    async fn fetch_project_statuses(&self) -> Result<Vec<Status>> {
        let root = self.tracker.get_project(self.project_key).await?;
        let catalog = self.tracker.get_statuses().await?;
        Ok(project_statuses(&root.id, &catalog))
    }

    /// Ensure one project's folder, registration, and tasks.
    async fn sync_project(
        &self,
        project: &Project,
        statuses: &[Status],
        report: &mut SyncReport,
    ) -> Result<()> {
        let project_root = self.local_folder.join(&project.name);

        if !self.workspace.is_dir(&project_root) {
            self.workspace.create_dir_all(&project_root)?;
        }

        // A pre-existing plain folder gets registered without
        // re-creating the directory.
        let handle = if self.workspace.is_project(&project_root) {
            self.workspace.get_project(&project_root)?
        } else {
            info!(project = %project.name, "registering new local project");
            report.new_projects += 1;
            self.workspace.create_project(&project_root, &project.name)?
        };

        let issues = self
            .tracker
            .search_issues(
                &format!(
                    "project = {} AND issuetype = Task AND parent = {}",
                    self.project_key, project.key
                ),
                &["assignee", "status", "summary"],
            )
            .await?;

        for task in issues_to_tasks(&issues) {
            self.sync_task(&handle, &project_root, &task, statuses, report)?;
        }

        Ok(())
    }

    /// Ensure one task's folder, membership, and status tags.
    fn sync_task(
        &self,
        handle: &ProjectHandle,
        project_root: &Path,
        task: &Task,
        statuses: &[Status],
        report: &mut SyncReport,
    ) -> Result<()> {
        let task_root = project_root.join(sanitize_file_name(&task.name));

        if !self.workspace.is_dir(&task_root) {
            debug!(task = %task.key, "creating task folder");
            self.workspace.create_dir_all(&task_root)?;
            report.new_tasks += 1;
        }

        if let Some(email) = &task.assignee {
            let members = self.workspace.project_members(handle)?;
            if !members.contains(email) {
                self.workspace
                    .add_member(handle, email, AccessLevel::Member, MEMBER_SOURCE)?;
            }
        }

        // Keep the tag vocabulary complete before pointing at the
        // task's current status.
        for status in statuses {
            self.workspace
                .ensure_tag_value(&task_root, STATUS_ATTRIBUTE, &status.name, status.color)?;
        }
        self.workspace
            .set_tag(&task_root, STATUS_ATTRIBUTE, &task.status)?;

        Ok(())
    }
}
