use serde_json::Value;

use crate::error::ExportError;
use crate::normalize::normalize_criteria;

pub const TITLE_FIELD: &str = "System.Title";
pub const TYPE_FIELD: &str = "System.WorkItemType";
pub const ACCEPTANCE_CRITERIA_FIELD: &str = "Microsoft.VSTS.Common.AcceptanceCriteria";

/// A work item ID as the user typed it.
///
/// Holds the trimmed digits verbatim, so `007` is requested, named and
/// labelled as `007` rather than `7`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WorkItemId(String);

impl WorkItemId {
    /// Parse a user-supplied ID.
    ///
    /// Surrounding whitespace is ignored; anything other than ASCII digits
    /// whose value fits in a `u64` is rejected.
    pub fn parse(input: &str) -> Result<Self, ExportError> {
        let trimmed = input.trim();
        let invalid = || ExportError::InvalidId {
            input: trimmed.to_string(),
        };
        if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        trimmed.parse::<u64>().map_err(|_| invalid())?;
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<u64> for WorkItemId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl std::fmt::Display for WorkItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The subset of a work item's fields needed for an export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItem {
    pub id: WorkItemId,
    pub title: String,
    pub work_item_type: String,
    /// Raw field value, usually HTML.
    pub acceptance_criteria: String,
}

impl WorkItem {
    /// The acceptance criteria as normalized plain text.
    pub fn criteria(&self) -> String {
        normalize_criteria(&self.acceptance_criteria)
    }
}

/// Parse a work item from the JSON body returned by the work items API.
///
/// Missing fields fall back to `"untitled"`, `"Unknown"` and an empty
/// criteria field. Bodies that are not a JSON object are rejected.
pub fn parse_work_item(id: WorkItemId, body: &str) -> Result<WorkItem, ExportError> {
    let value: Value = serde_json::from_str(body).map_err(|e| ExportError::MalformedResponse {
        reason: format!("failed to parse JSON: {e}"),
    })?;

    if !value.is_object() {
        return Err(ExportError::MalformedResponse {
            reason: "expected a JSON object".to_string(),
        });
    }

    Ok(WorkItem {
        id,
        title: str_field(&value, TITLE_FIELD).unwrap_or("untitled").to_string(),
        work_item_type: str_field(&value, TYPE_FIELD).unwrap_or("Unknown").to_string(),
        acceptance_criteria: str_field(&value, ACCEPTANCE_CRITERIA_FIELD)
            .unwrap_or_default()
            .to_string(),
    })
}

/// String value of `fields.{name}`, if present.
fn str_field<'a>(value: &'a Value, name: &str) -> Option<&'a str> {
    value.get("fields")?.get(name)?.as_str()
}
