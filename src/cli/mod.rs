//! CLI definitions using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

pub mod commands;

/// Mirror Jira epics and tasks into local project folders
#[derive(Parser, Debug)]
#[command(name = "jm", author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file path (default: ~/.jm/config.json)
    #[arg(long, global = true, env = "JM_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output as JSON (for scripting)
    #[arg(long, global = true)]
    pub json: bool,

    /// Increase logging verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (no output except errors)
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run one synchronization pass against Jira
    Sync,

    /// Manage Jira connection settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Print version information
    Version,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Set one or more settings (unset flags keep their current value)
    Set(ConfigSetArgs),

    /// Show current settings (token masked)
    Show,

    /// Print the config file path
    Path,
}

#[derive(Args, Debug, Default)]
pub struct ConfigSetArgs {
    /// Root folder for mirrored project folders
    #[arg(long)]
    pub folder: Option<String>,

    /// Atlassian account email
    #[arg(long)]
    pub email: Option<String>,

    /// Atlassian API token
    #[arg(long)]
    pub token: Option<String>,

    /// Jira site URL, e.g. https://my-domain.atlassian.net
    #[arg(long)]
    pub url: Option<String>,

    /// Jira project key, e.g. ACME
    #[arg(long)]
    pub project_key: Option<String>,
}

/// Supported shells for completions.
#[derive(clap::ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}
