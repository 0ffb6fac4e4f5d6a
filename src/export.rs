use std::path::{Path, PathBuf};

use crate::error::ExportError;
use crate::work_item::{WorkItem, WorkItemId};

pub const DEFAULT_OUTPUT_DIR: &str = "userstories";

/// Placeholder written when the criteria field is empty.
pub const EMPTY_CRITERIA_TEXT: &str = "(No acceptance criteria found)";

const RULE_WIDTH: usize = 50;

/// Options for the non-interactive export pipeline.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Directory the file is written to, created if missing.
    pub output_dir: PathBuf,
    pub product_prefix: String,
    /// Custom filename. The `.us.txt` extension is enforced either way.
    pub filename: Option<String>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            product_prefix: crate::config::DEFAULT_PRODUCT_PREFIX.to_string(),
            filename: None,
        }
    }
}

/// Outcome of a completed export.
#[derive(Debug, Clone)]
pub struct ExportResult {
    pub path: PathBuf,
    pub bytes_written: u64,
    /// True when the work item had no acceptance criteria.
    pub criteria_empty: bool,
}

/// Render the export file: a metadata header followed by the criteria.
pub fn render_export(item: &WorkItem, criteria: &str) -> String {
    let body = if criteria.is_empty() {
        EMPTY_CRITERIA_TEXT
    } else {
        criteria
    };
    format!(
        "User Story ID: {}\nTitle: {}\nType: {}\n{}\n\nACCEPTANCE CRITERIA:\n\n{body}",
        item.id,
        item.title,
        item.work_item_type,
        "=".repeat(RULE_WIDTH),
    )
}

/// Write `contents` to `dir/filename`, creating `dir` first.
///
/// Returns the written path and its size in bytes. Failures carry the path
/// that could not be created or written.
pub fn write_export(
    dir: &Path,
    filename: &str,
    contents: &str,
) -> Result<(PathBuf, u64), ExportError> {
    let failed = |path: &Path| {
        let path = path.to_path_buf();
        move |source| ExportError::WriteFailed { path, source }
    };

    if !dir.exists() {
        std::fs::create_dir_all(dir).map_err(failed(dir))?;
        tracing::info!(dir = %dir.display(), "created output directory");
    }
    let path = dir.join(filename);
    std::fs::write(&path, contents).map_err(failed(&path))?;
    let bytes = std::fs::metadata(&path).map_err(failed(&path))?.len();
    tracing::info!(path = %path.display(), bytes, "wrote export");
    Ok((path, bytes))
}
