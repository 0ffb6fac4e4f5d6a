use std::path::PathBuf;

use crate::work_item::WorkItemId;

/// Errors that can occur while exporting a work item's acceptance criteria.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("missing required environment variables: {}", .missing.join(", "))]
    MissingConfig { missing: Vec<String> },

    #[error("invalid work item ID: {input:?} (expected a number)")]
    InvalidId { input: String },

    #[error("authentication failed, check your PAT")]
    AuthenticationFailed,

    #[error("work item {id} not found")]
    NotFound { id: WorkItemId },

    #[error("unexpected HTTP status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    #[error("request failed: {reason}")]
    Http { reason: String },

    #[error("malformed work item response: {reason}")]
    MalformedResponse { reason: String },

    #[error("failed to write {}: {source}", .path.display())]
    WriteFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ExportError {
    /// Whether the error stems from how the tool was invoked rather than
    /// from the remote service or the filesystem.
    pub fn is_usage(&self) -> bool {
        matches!(
            self,
            ExportError::MissingConfig { .. } | ExportError::InvalidId { .. }
        )
    }
}
