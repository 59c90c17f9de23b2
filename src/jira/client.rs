//! Authenticated Jira REST client.
//!
//! All requests use basic auth (email + API token) and a bounded
//! per-request timeout. List endpoints paginate transparently: callers
//! always see one flattened, order-preserving sequence.

use std::future::Future;
use std::time::Duration;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use crate::error::{Error, Result};
use crate::jira::types::{
    ErrorBody, IssueRecord, ProjectRecord, SearchRequest, SearchResponse, StatusRecord,
};
use crate::jira::Tracker;

/// Issues requested per search page. Internal tuning constant,
/// invisible to callers.
pub(crate) const DEFAULT_PAGE_SIZE: usize = 50;

/// Bound on any single request so a hung server cannot hang the run.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the Jira REST API (v3).
pub struct JiraClient {
    client: reqwest::Client,
    api_base: String,
    email: String,
    token: String,
}

impl JiraClient {
    /// Create a client for a Jira site.
    ///
    /// The site URL may or may not carry a trailing slash; the API base
    /// becomes `{url}/rest/api/3` either way.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(url: &str, email: &str, token: &str) -> Result<Self> {
        let mut base = url.to_string();
        if !base.ends_with('/') {
            base.push('/');
        }

        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            api_base: format!("{base}rest/api/3"),
            email: email.to_string(),
            token: token.to_string(),
        })
    }

    /// API base URL this client talks to.
    #[must_use]
    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// GET request with auth and the headers Jira requires on every
    /// call.
    fn get(&self, url: String) -> reqwest::RequestBuilder {
        self.client
            .get(url)
            .basic_auth(&self.email, Some(&self.token))
            .header(reqwest::header::ACCEPT, "application/json")
            .header(reqwest::header::CONTENT_TYPE, "application/json")
    }

    /// Fetch one project's metadata by key.
    ///
    /// # Errors
    ///
    /// `Auth` on credential rejection, `Api` on a structured Jira error
    /// body, `Http` on any other transport failure.
    pub async fn get_project(&self, key: &str) -> Result<ProjectRecord> {
        let response = self
            .get(format!("{}/project/{key}", self.api_base))
            .send()
            .await?;

        check_result(response).await
    }

    /// Fetch the full, unscoped status catalog. Callers filter to
    /// project scope.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`get_project`](Self::get_project).
    pub async fn get_statuses(&self) -> Result<Vec<StatusRecord>> {
        let response = self
            .get(format!("{}/status", self.api_base))
            .send()
            .await?;

        check_result(response).await
    }

    /// Execute a JQL search, requesting only `fields`, and paginate
    /// until the server-reported total is reached.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`get_project`](Self::get_project), plus
    /// `PaginationStalled` if the server returns an empty page before
    /// the total is reached.
    pub async fn search_issues(&self, jql: &str, fields: &[&str]) -> Result<Vec<IssueRecord>> {
        for_each_page(|start_at| {
            let request = SearchRequest {
                jql,
                max_results: DEFAULT_PAGE_SIZE,
                fields_by_keys: false,
                fields,
                start_at,
            };

            async move {
                let response = self
                    .client
                    .post(format!("{}/search", self.api_base))
                    .basic_auth(&self.email, Some(&self.token))
                    .header(reqwest::header::ACCEPT, "application/json")
                    .json(&request)
                    .send()
                    .await?;

                check_result(response).await
            }
        })
        .await
    }
}

impl Tracker for JiraClient {
    fn get_project(&self, key: &str) -> impl Future<Output = Result<ProjectRecord>> + Send {
        JiraClient::get_project(self, key)
    }

    fn get_statuses(&self) -> impl Future<Output = Result<Vec<StatusRecord>>> + Send {
        JiraClient::get_statuses(self)
    }

    fn search_issues(
        &self,
        jql: &str,
        fields: &[&str],
    ) -> impl Future<Output = Result<Vec<IssueRecord>>> + Send {
        JiraClient::search_issues(self, jql, fields)
    }
}

/// Normalize a response into the error taxonomy, or deserialize it.
async fn check_result<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();

    if status.is_success() {
        return Ok(response.json().await?);
    }

    if status == StatusCode::UNAUTHORIZED || status == StatusCode::PAYMENT_REQUIRED {
        return Err(Error::Auth);
    }

    // Keep the transport error around in case the body is not Jira's
    // structured error shape.
    let transport = response.error_for_status_ref().err();
    let body = response.text().await.unwrap_or_default();

    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(&body) {
        if !parsed.error_messages.is_empty() {
            return Err(Error::Api {
                messages: parsed.error_messages,
            });
        }
    }

    match transport {
        Some(e) => Err(Error::Http(e)),
        None => Err(Error::Other(format!("Unexpected HTTP status {status}"))),
    }
}

/// Drive a paged search to completion.
///
/// The offset advances by the number of issues each page returned and
/// the loop stops once it reaches the server-reported total, so a total
/// of T with page size P costs exactly ceil(T/P) requests. An empty
/// page before the total is reached is an error, never an infinite loop.
async fn for_each_page<F, Fut>(mut fetch: F) -> Result<Vec<IssueRecord>>
where
    F: FnMut(usize) -> Fut,
    Fut: Future<Output = Result<SearchResponse>>,
{
    let mut issues = Vec::new();
    let mut start_at = 0usize;

    loop {
        let page = fetch(start_at).await?;
        let count = page.issues.len();
        let total = page.total;

        issues.extend(page.issues);
        start_at += count;

        if start_at >= total {
            break;
        }
        if count == 0 {
            return Err(Error::PaginationStalled { start_at, total });
        }
    }

    Ok(issues)
}
