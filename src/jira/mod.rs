//! Jira REST API integration.
//!
//! - [`types`] - wire structs for the three endpoints the sync consumes
//! - [`client`] - authenticated, transparently paginating HTTP client
//!
//! The reconciliation engine consumes the client through the [`Tracker`]
//! trait so it can be driven by canned data in tests.

pub mod client;
pub mod types;

pub use client::JiraClient;
pub use types::{IssueRecord, ProjectRecord, SearchResponse, StatusRecord};

use std::future::Future;

use crate::error::Result;

/// The tracker operations the sync engine needs.
///
/// Implemented by [`JiraClient`]; test doubles implement it over
/// in-memory fixtures.
pub trait Tracker: Send + Sync {
    /// Fetch one project's metadata by key.
    fn get_project(&self, key: &str) -> impl Future<Output = Result<ProjectRecord>> + Send;

    /// Fetch the full, unscoped status catalog.
    fn get_statuses(&self) -> impl Future<Output = Result<Vec<StatusRecord>>> + Send;

    /// Execute a JQL search for the given field set, fully paginated.
    fn search_issues(
        &self,
        jql: &str,
        fields: &[&str],
    ) -> impl Future<Output = Result<Vec<IssueRecord>>> + Send;
}
