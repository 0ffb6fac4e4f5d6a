pub mod client;
pub mod config;
pub mod error;
pub mod export;
pub mod naming;
pub mod normalize;
pub mod work_item;

pub use client::{AzureDevOpsClient, WorkItemSource};
pub use config::Config;
pub use error::ExportError;
pub use export::{ExportOptions, ExportResult, render_export, write_export};
pub use naming::{ensure_extension, generate_filename};
pub use normalize::normalize_criteria;
pub use work_item::{WorkItem, WorkItemId, parse_work_item};

/// Fetch a work item and write its normalized acceptance criteria to disk.
///
/// An empty criteria field still produces a file with a placeholder body.
pub fn export_work_item<S: WorkItemSource + ?Sized>(
    source: &S,
    id: &WorkItemId,
    options: &ExportOptions,
) -> Result<ExportResult, ExportError> {
    let item = source.fetch(id)?;
    let result = write_work_item(&item, options)?;
    if result.criteria_empty {
        tracing::warn!(%id, "work item has no acceptance criteria");
    }
    Ok(result)
}

/// Write an already fetched work item to `options.output_dir`.
///
/// The file is named `options.filename` or the generated default, with the
/// `.us.txt` extension enforced.
pub fn write_work_item(
    item: &WorkItem,
    options: &ExportOptions,
) -> Result<ExportResult, ExportError> {
    let criteria = item.criteria();

    let filename = match options.filename.as_deref().map(str::trim) {
        Some(name) if !name.is_empty() => ensure_extension(name),
        _ => generate_filename(&item.id, &item.title, &options.product_prefix),
    };

    let contents = render_export(item, &criteria);
    let (path, bytes_written) = write_export(&options.output_dir, &filename, &contents)?;

    Ok(ExportResult {
        path,
        bytes_written,
        criteria_empty: criteria.is_empty(),
    })
}
