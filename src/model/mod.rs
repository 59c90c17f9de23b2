//! Domain types for one sync run.
//!
//! Everything here lives only for the duration of a run; idempotence
//! comes from inspecting local folder state, never from persisting any
//! of these types.

use serde::{Deserialize, Serialize};

/// Local tag colors a tracker status color can map to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TagColor {
    Red,
    Green,
    Blue,
    Grey,
    Yellow,
    /// Neutral fallback for tracker colors without a mapping.
    Default,
}

impl TagColor {
    #[must_use]
    pub const fn as_str(&self) -> &str {
        match self {
            Self::Red => "red",
            Self::Green => "green",
            Self::Blue => "blue",
            Self::Grey => "grey",
            Self::Yellow => "yellow",
            Self::Default => "default",
        }
    }
}

/// A tracker status scoped to the configured project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub id: String,
    pub name: String,
    pub color: TagColor,
}

/// A local project mirrored from an Epic.
///
/// `name` is `{linkedIssueKey}-{summary}`, sanitized for use as a
/// folder name. Epics without exactly one resolvable link never become
/// projects (see [`SkipReason`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub id: String,
    pub key: String,
    pub name: String,
}

/// A task mirrored from a Task issue, child of exactly one project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: String,
    pub key: String,
    pub name: String,
    /// Assignee email; `None` when unassigned or hidden.
    pub assignee: Option<String>,
    /// Current status name, mirrored into the "Status" tag.
    pub status: String,
}

/// Why an Epic was excluded from the project set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The Epic has no issue links.
    NoLinks,
    /// The Epic has more than one issue link.
    AmbiguousLinks,
    /// The single link carries neither an inward nor an outward issue.
    UnresolvedLink,
}

/// An Epic that was skipped during mapping, with its reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedEpic {
    pub key: String,
    pub reason: SkipReason,
}

/// Accumulated outcome of one sync run.
///
/// Created at run start, threaded through reconciliation, read once at
/// the end for reporting.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SyncReport {
    /// Local projects registered during this run.
    pub new_projects: usize,
    /// Task folders created during this run.
    pub new_tasks: usize,
    /// Epics excluded from mapping, with reasons.
    pub skipped_epics: Vec<SkippedEpic>,
}

impl SyncReport {
    /// True when the run created nothing new.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.new_projects == 0 && self.new_tasks == 0
    }

    /// Human-readable summary lines ("New projects: N" / "No updates").
    #[must_use]
    pub fn summary_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if self.is_empty() {
            lines.push("No updates".to_string());
        } else {
            if self.new_projects > 0 {
                lines.push(format!("New projects: {}", self.new_projects));
            }
            if self.new_tasks > 0 {
                lines.push(format!("New tasks: {}", self.new_tasks));
            }
        }
        if !self.skipped_epics.is_empty() {
            lines.push(format!("Skipped epics: {}", self.skipped_epics.len()));
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_report_says_no_updates() {
        let report = SyncReport::default();
        assert!(report.is_empty());
        assert_eq!(report.summary_lines(), vec!["No updates".to_string()]);
    }

    #[test]
    fn test_report_lists_counts() {
        let report = SyncReport {
            new_projects: 2,
            new_tasks: 5,
            skipped_epics: vec![],
        };
        assert_eq!(
            report.summary_lines(),
            vec!["New projects: 2".to_string(), "New tasks: 5".to_string()]
        );
    }

    #[test]
    fn test_report_mentions_skips() {
        let report = SyncReport {
            new_projects: 0,
            new_tasks: 0,
            skipped_epics: vec![SkippedEpic {
                key: "ACME-9".to_string(),
                reason: SkipReason::NoLinks,
            }],
        };
        let lines = report.summary_lines();
        assert_eq!(lines[0], "No updates");
        assert_eq!(lines[1], "Skipped epics: 1");
    }
}
