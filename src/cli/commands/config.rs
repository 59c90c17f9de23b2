//! Config command implementations.

use std::path::Path;

use colored::Colorize;

use crate::cli::{ConfigCommands, ConfigSetArgs};
use crate::config::{config_path, load_settings, save_settings, JiraSettings};
use crate::error::Result;

/// Execute config subcommands.
///
/// # Errors
///
/// Returns an error if the config file cannot be read or written.
pub fn execute(command: &ConfigCommands, config: Option<&Path>, json: bool) -> Result<()> {
    match command {
        ConfigCommands::Set(args) => set(args, config, json),
        ConfigCommands::Show => show(config, json),
        ConfigCommands::Path => path(config, json),
    }
}

fn set(args: &ConfigSetArgs, config: Option<&Path>, json: bool) -> Result<()> {
    let path = config_path(config)?;
    let mut settings = load_settings(&path)?;

    settings.merge(JiraSettings {
        local_folder: args.folder.clone().unwrap_or_default(),
        jira_email: args.email.clone().unwrap_or_default(),
        jira_token: args.token.clone().unwrap_or_default(),
        jira_url: args.url.clone().unwrap_or_default(),
        jira_project_key: args.project_key.clone().unwrap_or_default(),
    });

    save_settings(&path, &settings)?;

    let missing = settings.missing_fields();
    if json {
        let output = serde_json::json!({
            "success": true,
            "complete": missing.is_empty(),
            "missing": missing,
        });
        println!("{}", serde_json::to_string(&output)?);
    } else if missing.is_empty() {
        println!("{}", "Configuration complete.".green());
    } else {
        println!("Saved. Still missing: {}", missing.join(", "));
    }

    Ok(())
}

fn show(config: Option<&Path>, json: bool) -> Result<()> {
    let path = config_path(config)?;
    let settings = load_settings(&path)?;

    let token_display = if settings.jira_token.is_empty() {
        String::new()
    } else {
        "********".to_string()
    };

    if json {
        let output = serde_json::json!({
            "local_folder": settings.local_folder,
            "jira_email": settings.jira_email,
            "jira_token": token_display,
            "jira_url": settings.jira_url,
            "jira_project_key": settings.jira_project_key,
        });
        println!("{}", serde_json::to_string(&output)?);
        return Ok(());
    }

    let field = |name: &str, value: &str| {
        if value.is_empty() {
            println!("  {name:<18} {}", "(not set)".dimmed());
        } else {
            println!("  {name:<18} {value}");
        }
    };

    println!("{}", "Jira settings".bold());
    field("local_folder", &settings.local_folder);
    field("jira_email", &settings.jira_email);
    field("jira_token", &token_display);
    field("jira_url", &settings.jira_url);
    field("jira_project_key", &settings.jira_project_key);

    Ok(())
}

fn path(config: Option<&Path>, json: bool) -> Result<()> {
    let path = config_path(config)?;

    if json {
        let output = serde_json::json!({ "path": path.display().to_string() });
        println!("{}", serde_json::to_string(&output)?);
    } else {
        println!("{}", path.display());
    }

    Ok(())
}
