use std::collections::BTreeMap;
use std::ops::Range;

use image::DynamicImage;
use tracing::info;

use crate::config::{Configuration, DisplayOptions, Sample};
use crate::crop::{
    CropBox, CropEditor, CropStore, DisplayMapping, DisplayRect, EditSession, MethodThumbnail,
    StoredCrops,
};
use crate::error::{JuxtaError, Result};
use crate::export::{self, ProgressReporter};
use crate::imaging::normalize::open_image;
use crate::imaging::overlay::crop_and_resize;
use crate::view::{self, GridView};

/// Everything one viewer session owns: the active configuration, display
/// options, saved close views and the crop editor.
#[derive(Clone, Debug)]
pub struct SessionState {
    config: Configuration,
    config_hash: u64,
    pub options: DisplayOptions,
    crops: CropStore,
    editor: CropEditor,
}

impl SessionState {
    pub fn new(config: Configuration, options: DisplayOptions) -> Self {
        Self {
            config_hash: config.content_hash(),
            config,
            options,
            crops: CropStore::new(),
            editor: CropEditor::new(),
        }
    }

    /// Start a session from close views saved by an earlier one. Entries in
    /// the single-crop format are upgraded before anything else touches them.
    pub fn with_stored_crops(
        config: Configuration,
        options: DisplayOptions,
        stored: BTreeMap<usize, StoredCrops>,
    ) -> Self {
        let mut session = Self::new(config, options);
        session.crops = CropStore::import(stored);
        session.editor.reserve_ids(session.crops.ids());
        info!(
            samples = session.crops.samples().count(),
            next_id = session.editor.next_id(),
            "Imported close views"
        );
        session
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    pub fn crops(&self) -> &CropStore {
        &self.crops
    }

    pub fn editor(&self) -> &CropEditor {
        &self.editor
    }

    /// Install a new configuration. Close views are discarded when its
    /// content differs from the current one; returns whether that happened.
    pub fn replace_configuration(&mut self, config: Configuration) -> bool {
        let hash = config.content_hash();
        self.config = config;
        if hash == self.config_hash {
            return false;
        }
        self.config_hash = hash;
        self.crops.clear();
        self.editor.cancel();
        self.options.start_index = 0;
        info!("Configuration changed, close views cleared");
        true
    }

    /// Sample indices of the current page.
    pub fn page(&self) -> Range<usize> {
        self.options.sample_range(self.config.samples.len())
    }

    pub fn enter_crop_editor(&mut self, sample: usize, crop_id: Option<&str>) -> Result<&EditSession> {
        self.editor.enter(&self.config, &self.crops, sample, crop_id)
    }

    pub fn select_reference(&mut self, method: &str) -> Result<()> {
        self.editor.select_reference(&self.config, method)
    }

    pub fn reference_display(&self) -> Result<(DynamicImage, DisplayMapping)> {
        self.editor.reference_display(&self.config, &self.options)
    }

    pub fn preview(&self, crop_box: CropBox) -> Result<DynamicImage> {
        self.editor
            .preview(&self.config, crop_box, self.options.image_width)
    }

    /// Save a box given in the reference image's pixel space.
    pub fn save_crop(&mut self, crop_box: CropBox) -> Result<String> {
        let sample_index = self.editor.session().ok_or(JuxtaError::EditorIdle)?.sample;
        let config = &self.config;
        let sample = config.sample(sample_index)?;
        let width = self.options.image_width;
        let methods = config
            .visible_methods(self.options.visible_filter())
            .into_iter()
            .map(|m| m.name.as_str());

        self.editor.save(&mut self.crops, crop_box, methods, |method| {
            method_thumbnail(config, sample, method, crop_box, width)
        })
    }

    /// Save a selection drawn on the editor's reference display.
    pub fn save_crop_display(&mut self, rect: DisplayRect) -> Result<String> {
        let mapping = self.editor.reference_mapping(&self.config)?;
        let crop_box = mapping
            .to_original(rect)
            .ok_or_else(|| JuxtaError::InvalidCrop("empty selection".into()))?;
        self.save_crop(crop_box)
    }

    pub fn cancel_crop(&mut self) {
        self.editor.cancel();
    }

    pub fn delete_crop(&mut self, sample: usize, crop_id: &str) {
        self.crops.delete(sample, crop_id);
    }

    /// Render the current page.
    pub fn render_grid(&self) -> GridView {
        view::render_grid(&self.config, self.page(), &self.crops, &self.options)
    }

    /// Export the current page as a PDF document.
    pub fn export_pdf(&self, reporter: &dyn ProgressReporter) -> Result<Vec<u8>> {
        export::export_pdf(&self.config, self.page(), &self.crops, &self.options, reporter)
    }
}

/// Crop one method's full-resolution image for a close view. A method
/// without an image file is skipped; any other failure aborts the save.
fn method_thumbnail(
    config: &Configuration,
    sample: &Sample,
    method: &str,
    crop_box: CropBox,
    width: u32,
) -> Result<Option<MethodThumbnail>> {
    let Some(path) = config.existing_image(sample, method) else {
        return Ok(None);
    };
    let fail = |e: JuxtaError| JuxtaError::CropSave {
        method: method.to_string(),
        reason: e.to_string(),
    };
    let source = open_image(&path).map_err(fail)?;
    let original_size = (source.width(), source.height());
    let image = crop_and_resize(&source, crop_box, width).map_err(fail)?;
    Ok(Some(MethodThumbnail {
        image,
        original_size,
    }))
}
