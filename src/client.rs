use base64::Engine;

use crate::config::Config;
use crate::error::ExportError;
use crate::work_item::{WorkItem, WorkItemId, parse_work_item};

/// API version requested from the work items endpoint.
pub const API_VERSION: &str = "7.0";

/// Anything that can look up a work item by ID.
///
/// Implemented by [`AzureDevOpsClient`]; tests substitute in-memory sources.
pub trait WorkItemSource {
    fn fetch(&self, id: &WorkItemId) -> Result<WorkItem, ExportError>;
}

/// Blocking client for the Azure DevOps work items REST API.
///
/// # Example
///
/// ```no_run
/// use ac_export::{AzureDevOpsClient, Config, WorkItemId, WorkItemSource};
///
/// let config = Config::from_env().unwrap();
/// let client = AzureDevOpsClient::new(&config);
/// let item = client.fetch(&WorkItemId::from(118556)).unwrap();
/// println!("{}", item.criteria());
/// ```
pub struct AzureDevOpsClient {
    agent: ureq::Agent,
    base_url: String,
    organization: String,
    project: String,
    pat: String,
}

impl std::fmt::Debug for AzureDevOpsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AzureDevOpsClient")
            .field("base_url", &self.base_url)
            .field("organization", &self.organization)
            .field("project", &self.project)
            .field("pat", &"[REDACTED]")
            .finish()
    }
}

impl AzureDevOpsClient {
    pub fn new(config: &Config) -> Self {
        let agent = ureq::Agent::new_with_config(
            ureq::Agent::config_builder()
                .http_status_as_error(false)
                .build(),
        );
        Self {
            agent,
            base_url: config.base_url.clone(),
            organization: config.organization.clone(),
            project: config.project.clone(),
            pat: config.pat.clone(),
        }
    }

    /// URL of a single work item.
    pub fn work_item_url(&self, id: &WorkItemId) -> String {
        format!(
            "{}/{}/{}/_apis/wit/workitems/{id}?api-version={API_VERSION}",
            self.base_url,
            encode_segment(&self.organization),
            encode_segment(&self.project),
        )
    }

    /// `Authorization` header value: Basic auth with an empty user name.
    fn authorization(&self) -> String {
        let encoded = base64::engine::general_purpose::STANDARD.encode(format!(":{}", self.pat));
        format!("Basic {encoded}")
    }
}

impl WorkItemSource for AzureDevOpsClient {
    fn fetch(&self, id: &WorkItemId) -> Result<WorkItem, ExportError> {
        let url = self.work_item_url(id);
        tracing::debug!(%url, "requesting work item");

        let response = self
            .agent
            .get(&url)
            .header("Authorization", &self.authorization())
            .header("Accept", "application/json")
            .call()
            .map_err(|e| ExportError::Http {
                reason: format!("work item request failed: {e}"),
            })?;

        let status = response.status().as_u16();
        tracing::debug!(status, "received work item response");

        let body = response
            .into_body()
            .read_to_string()
            .map_err(|e| ExportError::Http {
                reason: format!("failed to read response body: {e}"),
            })?;

        check_status(id, status, body).and_then(|body| parse_work_item(id.clone(), &body))
    }
}

/// Map a response status to the body on success or the matching error.
fn check_status(id: &WorkItemId, status: u16, body: String) -> Result<String, ExportError> {
    match status {
        200 => Ok(body),
        401 => Err(ExportError::AuthenticationFailed),
        404 => Err(ExportError::NotFound { id: id.clone() }),
        _ => Err(ExportError::UnexpectedStatus {
            status,
            body: body.trim().to_string(),
        }),
    }
}

/// Percent-encode the characters of a path segment that commonly appear in
/// organization and project names.
fn encode_segment(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    for c in segment.chars() {
        match c {
            '%' => out.push_str("%25"),
            ' ' => out.push_str("%20"),
            '#' => out.push_str("%23"),
            '?' => out.push_str("%3F"),
            '/' => out.push_str("%2F"),
            _ => out.push(c),
        }
    }
    out
}
