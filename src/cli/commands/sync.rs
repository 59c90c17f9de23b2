//! Sync command implementation.
//!
//! Validates the settings gate, takes the run lock, and drives one
//! reconciliation pass. The handler itself is synchronous; the async
//! engine runs on a dedicated tokio runtime.

use std::path::Path;

use colored::Colorize;

use crate::config::{config_path, load_settings};
use crate::error::{Error, Result};
use crate::jira::JiraClient;
use crate::model::SyncReport;
use crate::sync::{RunLock, SyncEngine};
use crate::workspace::FsWorkspace;

/// Execute the sync command.
///
/// # Errors
///
/// Refuses to start on incomplete settings; any tracker or workspace
/// failure aborts the run and propagates.
pub fn execute(config: Option<&Path>, json: bool) -> Result<()> {
    let path = config_path(config)?;
    let settings = load_settings(&path)?;
    settings.validate()?;

    let client = JiraClient::new(
        &settings.jira_url,
        &settings.jira_email,
        &settings.jira_token,
    )?;
    let workspace = FsWorkspace::new(settings.workspace_id());

    // Held until the report is in hand; overlapping invocations fail fast.
    let _lock = RunLock::acquire(Path::new(&settings.local_folder))?;

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| Error::Other(format!("Failed to create async runtime: {e}")))?;

    let report = rt.block_on(async {
        SyncEngine::new(
            &client,
            &workspace,
            &settings.jira_project_key,
            settings.local_folder.as_str(),
        )
        .run()
        .await
    })?;

    print_report(&report, json)
}

fn print_report(report: &SyncReport, json: bool) -> Result<()> {
    if json {
        let output = serde_json::json!({
            "success": true,
            "report": report,
        });
        println!("{}", serde_json::to_string(&output)?);
        return Ok(());
    }

    println!("{}", "Jira sync successful".green().bold());
    for line in report.summary_lines() {
        println!("  {line}");
    }
    for skip in &report.skipped_epics {
        println!(
            "  {}",
            format!("skipped {} ({:?})", skip.key, skip.reason).dimmed()
        );
    }

    Ok(())
}
