pub mod layout;
pub mod pdf;

use std::ops::Range;

use tracing::info;

use crate::config::{Configuration, DisplayOptions};
use crate::crop::CropStore;
use crate::error::{JuxtaError, Result};
use crate::view::render_grid;

pub use layout::{build_elements, paginate, Columns, Page, PageElement, Placed};

/// Stage of a PDF export.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportStage {
    Rendering,
    Paginating,
    Writing,
}

impl std::fmt::Display for ExportStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Rendering => write!(f, "Rendering samples"),
            Self::Paginating => write!(f, "Laying out pages"),
            Self::Writing => write!(f, "Writing PDF"),
        }
    }
}

/// Receives progress updates during export. All methods default to no-ops.
pub trait ProgressReporter {
    /// A new stage has started. `total_items` is its work-item count, if known.
    fn begin_stage(&self, _stage: ExportStage, _total_items: Option<usize>) {}

    /// One work item within the current stage has completed.
    fn advance(&self, _items_done: usize) {}

    fn finish_stage(&self) {}
}

pub struct NoOpReporter;
impl ProgressReporter for NoOpReporter {}

/// Export the samples in `range` as a landscape PDF.
///
/// Main images and close views come from the same rendering path as the
/// interactive grid, so both show identical pixels.
pub fn export_pdf(
    config: &Configuration,
    range: Range<usize>,
    crops: &CropStore,
    options: &DisplayOptions,
    reporter: &dyn ProgressReporter,
) -> Result<Vec<u8>> {
    let range = range.start.min(config.samples.len())..range.end.min(config.samples.len());
    if range.is_empty() {
        return Err(JuxtaError::Pdf("no samples to export".into()));
    }

    reporter.begin_stage(ExportStage::Rendering, Some(range.len()));
    let mut methods = Vec::new();
    let mut rows = Vec::with_capacity(range.len());
    for (done, index) in range.clone().enumerate() {
        let grid = render_grid(config, index..index + 1, crops, options);
        methods = grid.methods;
        rows.extend(grid.rows);
        reporter.advance(done + 1);
    }
    reporter.finish_stage();

    reporter.begin_stage(ExportStage::Paginating, None);
    let columns = Columns::new(methods.len());
    let elements = build_elements(&methods, &rows, options);
    let pages = paginate(elements, &columns);
    reporter.finish_stage();

    reporter.begin_stage(ExportStage::Writing, Some(pages.len()));
    let bytes = pdf::write_pdf(&pages, &columns, reporter)?;
    reporter.finish_stage();

    info!(
        samples = range.len(),
        pages = pages.len(),
        bytes = bytes.len(),
        "PDF exported"
    );
    Ok(bytes)
}
