//! Wire types for the Jira REST API (v3).
//!
//! These structs mirror only the fields the sync reads. Search results
//! carry a shared [`IssueFields`] where every field is optional because
//! each search requests a different field set.

use serde::{Deserialize, Serialize};

/// `GET /project/{key}` response (subset).
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectRecord {
    pub id: String,
    pub key: String,
    pub name: String,
}

/// One entry of the unscoped `GET /status` catalog.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusRecord {
    pub id: String,
    pub name: String,
    /// Present only for project- or team-scoped statuses.
    #[serde(default)]
    pub scope: Option<StatusScope>,
    pub status_category: StatusCategory,
}

/// Scope of a status entry (`{"type": "PROJECT", "project": {"id": ...}}`).
#[derive(Debug, Clone, Deserialize)]
pub struct StatusScope {
    #[serde(rename = "type")]
    pub scope_type: String,
    #[serde(default)]
    pub project: Option<ScopeProject>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScopeProject {
    pub id: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCategory {
    pub color_name: String,
}

/// `POST /search` request body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest<'a> {
    pub jql: &'a str,
    pub max_results: usize,
    pub fields_by_keys: bool,
    pub fields: &'a [&'a str],
    pub start_at: usize,
}

/// `POST /search` response page.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub issues: Vec<IssueRecord>,
    pub total: usize,
}

/// One issue from a search result.
#[derive(Debug, Clone, Deserialize)]
pub struct IssueRecord {
    pub id: String,
    pub key: String,
    #[serde(default)]
    pub fields: IssueFields,
}

/// Requested issue fields. Searches ask for different field sets
/// (epics: issuelinks + summary; tasks: assignee + status + summary),
/// so everything is optional/defaulted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IssueFields {
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub issuelinks: Vec<IssueLink>,
    #[serde(default)]
    pub assignee: Option<Assignee>,
    #[serde(default)]
    pub status: Option<IssueStatus>,
}

/// An issue link; carries either an inward or an outward issue.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueLink {
    #[serde(default)]
    pub inward_issue: Option<LinkedIssue>,
    #[serde(default)]
    pub outward_issue: Option<LinkedIssue>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LinkedIssue {
    pub key: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignee {
    /// Hidden by Atlassian privacy settings for some accounts.
    #[serde(default)]
    pub email_address: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IssueStatus {
    pub name: String,
}

/// Structured error body Jira returns on 4xx/5xx.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    #[serde(rename = "errorMessages", default)]
    pub error_messages: Vec<String>,
}
