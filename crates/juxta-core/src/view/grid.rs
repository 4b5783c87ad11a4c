use std::ops::Range;

use image::DynamicImage;
use tracing::{debug, warn};

use crate::config::{Configuration, DisplayOptions, Method};
use crate::consts::MAX_CROPS_PER_SAMPLE;
use crate::crop::{CropColor, CropStore};

use super::aspect::{check_aspect_ratios, AspectWarning};
use super::cell::{render_cell, GridCell};

/// One close view of a sample: a thumbnail per visible method, `None`
/// where that method had no image when the crop was saved.
#[derive(Clone, Debug)]
pub struct CloseViewRow {
    pub id: String,
    /// 1-based position, as in "Close View #n".
    pub number: usize,
    pub color: CropColor,
    pub thumbnails: Vec<Option<DynamicImage>>,
}

#[derive(Clone, Debug)]
pub struct SampleRow {
    pub index: usize,
    pub name: String,
    pub text: Option<String>,
    /// One cell per visible method. Empty when the sample failed to load.
    pub cells: Vec<GridCell>,
    pub close_views: Vec<CloseViewRow>,
    /// No visible method of this sample produced an image.
    pub failed: bool,
    /// Another close view may still be added.
    pub can_add_crop: bool,
}

/// A rendered page of the comparison grid.
#[derive(Clone, Debug)]
pub struct GridView {
    /// Visible methods, in column order.
    pub methods: Vec<Method>,
    pub rows: Vec<SampleRow>,
    pub aspect_warnings: Vec<AspectWarning>,
}

/// Render the samples in `range` for the visible methods.
///
/// Out-of-range indices are dropped. A sample with no loadable image is
/// reported as failed and rendering continues with the next one.
pub fn render_grid(
    config: &Configuration,
    range: Range<usize>,
    crops: &CropStore,
    options: &DisplayOptions,
) -> GridView {
    let methods: Vec<Method> = config
        .visible_methods(options.visible_filter())
        .into_iter()
        .cloned()
        .collect();

    let mut rows = Vec::with_capacity(range.len());
    for index in range {
        let Some(sample) = config.samples.get(index) else {
            break;
        };
        let regions = crops.get(index);

        let mut cells: Vec<GridCell> = methods
            .iter()
            .map(|m| render_cell(config, sample, &m.name, regions, options))
            .collect();
        let failed = !cells.is_empty() && cells.iter().all(|c| c.missing);
        if failed {
            warn!(sample = index, name = %sample.name, "Sample failed to load");
            cells.clear();
        }

        let close_views = if options.close_view_enabled {
            regions
                .iter()
                .enumerate()
                .map(|(i, region)| CloseViewRow {
                    id: region.id.clone(),
                    number: i + 1,
                    color: region.color,
                    thumbnails: methods
                        .iter()
                        .map(|m| region.cropped_images.get(&m.name).cloned())
                        .collect(),
                })
                .collect()
        } else {
            Vec::new()
        };

        rows.push(SampleRow {
            index,
            name: sample.name.clone(),
            text: sample.text.clone(),
            cells,
            close_views,
            failed,
            can_add_crop: regions.len() < MAX_CROPS_PER_SAMPLE,
        });
    }

    let aspect_warnings = check_aspect_ratios(&rows);
    debug!(
        rows = rows.len(),
        methods = methods.len(),
        warnings = aspect_warnings.len(),
        "Grid rendered"
    );
    GridView {
        methods,
        rows,
        aspect_warnings,
    }
}
