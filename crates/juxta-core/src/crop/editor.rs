use std::path::PathBuf;

use image::imageops::FilterType;
use image::DynamicImage;
use tracing::{debug, info, warn};

use crate::config::{Configuration, DisplayOptions};
use crate::consts::{EDITOR_DISPLAY_SIZE, MAX_CROPS_PER_SAMPLE};
use crate::error::{JuxtaError, Result};
use crate::imaging::mask::{apply_mask, load_mask};
use crate::imaging::normalize::open_image;
use crate::imaging::overlay::crop_and_resize;

use super::geometry::{CropBox, DisplayMapping};
use super::palette::CropColor;
use super::store::{CropStore, MethodThumbnail};

const ID_PREFIX: &str = "crop_";

/// One open crop-editing session.
#[derive(Clone, Debug, PartialEq)]
pub struct EditSession {
    pub sample: usize,
    /// Id the region will be saved under. For a new crop this is reserved
    /// but not yet consumed from the counter.
    pub crop_id: String,
    pub color: CropColor,
    pub is_new: bool,
    /// Method whose image the box is drawn on.
    pub reference_method: String,
    /// Box of the region being edited, `None` when adding.
    pub initial_box: Option<CropBox>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum EditorState {
    #[default]
    Idle,
    Editing(EditSession),
}

/// Close-view editor: `Idle -> Editing -> Idle` on save or cancel.
#[derive(Clone, Debug)]
pub struct CropEditor {
    state: EditorState,
    next_id: u64,
    /// Last reference chosen by the user; revalidated on every entry.
    preferred_reference: Option<String>,
}

impl Default for CropEditor {
    fn default() -> Self {
        Self {
            state: EditorState::Idle,
            next_id: 1,
            preferred_reference: None,
        }
    }
}

impl CropEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn session(&self) -> Option<&EditSession> {
        match &self.state {
            EditorState::Editing(session) => Some(session),
            EditorState::Idle => None,
        }
    }

    pub fn is_editing(&self) -> bool {
        self.session().is_some()
    }

    /// Numeric suffix the next new crop will receive.
    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    /// Move the id counter past every `crop_<n>` id in `ids`.
    pub(crate) fn reserve_ids<'a>(&mut self, ids: impl IntoIterator<Item = &'a str>) {
        let highest = ids
            .into_iter()
            .filter_map(|id| id.strip_prefix(ID_PREFIX)?.parse::<u64>().ok())
            .max();
        if let Some(highest) = highest {
            self.next_id = self.next_id.max(highest + 1);
        }
    }

    /// Open the editor on `sample`, editing `crop_id` if it still exists and
    /// adding a new region otherwise.
    ///
    /// Fails, leaving the editor idle, when the sample has no image to draw
    /// on or already holds the maximum number of regions.
    pub fn enter(
        &mut self,
        config: &Configuration,
        store: &CropStore,
        sample: usize,
        crop_id: Option<&str>,
    ) -> Result<&EditSession> {
        self.state = EditorState::Idle;
        let entry = config.sample(sample)?;

        let candidates = config.methods_with_images(entry);
        let Some(first) = candidates.first() else {
            warn!(sample, name = %entry.name, "No reference image, crop editor not opened");
            return Err(JuxtaError::NoReferenceImage {
                sample: entry.name.clone(),
            });
        };
        let reference = match &self.preferred_reference {
            Some(pref) if candidates.iter().any(|m| &m.name == pref) => pref.clone(),
            _ => first.name.clone(),
        };
        self.preferred_reference = Some(reference.clone());

        let existing = crop_id.and_then(|id| store.get_by_id(sample, id));
        if crop_id.is_some() && existing.is_none() {
            debug!(sample, crop_id, "Close view vanished, adding a new one instead");
        }

        let session = match existing {
            Some(region) => EditSession {
                sample,
                crop_id: region.id.clone(),
                color: region.color,
                is_new: false,
                reference_method: reference,
                initial_box: Some(region.crop_box),
            },
            None => {
                if store.count(sample) >= MAX_CROPS_PER_SAMPLE {
                    return Err(JuxtaError::CropCapacity {
                        sample,
                        max: MAX_CROPS_PER_SAMPLE,
                    });
                }
                EditSession {
                    sample,
                    crop_id: format!("{ID_PREFIX}{}", self.next_id),
                    color: store.next_color(sample),
                    is_new: true,
                    reference_method: reference,
                    initial_box: None,
                }
            }
        };

        debug!(
            sample,
            crop_id = %session.crop_id,
            reference = %session.reference_method,
            is_new = session.is_new,
            "Crop editor opened"
        );
        self.state = EditorState::Editing(session);
        self.session().ok_or(JuxtaError::EditorIdle)
    }

    /// Switch the reference image while editing.
    pub fn select_reference(&mut self, config: &Configuration, method: &str) -> Result<()> {
        let EditorState::Editing(session) = &mut self.state else {
            return Err(JuxtaError::EditorIdle);
        };
        let sample = config.sample(session.sample)?;
        if config.existing_image(sample, method).is_none() {
            return Err(JuxtaError::InvalidCrop(format!(
                "method '{method}' has no image for sample '{}'",
                sample.name
            )));
        }
        session.reference_method = method.to_string();
        self.preferred_reference = Some(method.to_string());
        Ok(())
    }

    fn reference_path(&self, config: &Configuration) -> Result<PathBuf> {
        let session = self.session().ok_or(JuxtaError::EditorIdle)?;
        let sample = config.sample(session.sample)?;
        config
            .existing_image(sample, &session.reference_method)
            .ok_or_else(|| JuxtaError::NoReferenceImage {
                sample: sample.name.clone(),
            })
    }

    /// Mapping between the editor's fitted reference display and the
    /// reference image's own pixels.
    pub fn reference_mapping(&self, config: &Configuration) -> Result<DisplayMapping> {
        let (w, h) = image::image_dimensions(self.reference_path(config)?)?;
        Ok(DisplayMapping::fit(w, h, EDITOR_DISPLAY_SIZE))
    }

    /// The reference image scaled into the editor's display square,
    /// darkened through the sample's mask when masking is on.
    pub fn reference_display(
        &self,
        config: &Configuration,
        options: &DisplayOptions,
    ) -> Result<(DynamicImage, DisplayMapping)> {
        let img = open_image(&self.reference_path(config)?)?;
        let mapping = DisplayMapping::fit(img.width(), img.height(), EDITOR_DISPLAY_SIZE);
        let (w, h) = mapping.display_size();
        let mut display = img.resize_exact(w, h, FilterType::Lanczos3);

        if options.mask.enabled {
            let mask = self
                .session()
                .and_then(|s| config.samples.get(s.sample))
                .and_then(|sample| config.existing_mask(sample))
                .and_then(|path| load_mask(&path, (w, h)));
            if let Some(mask) = mask {
                display = apply_mask(&display, &mask, options.darken_factor());
            }
        }
        Ok((display, mapping))
    }

    /// Close view of the current selection on the reference image.
    pub fn preview(&self, config: &Configuration, crop_box: CropBox, target_width: u32) -> Result<DynamicImage> {
        if crop_box.is_degenerate() {
            return Err(JuxtaError::InvalidCrop("empty selection".into()));
        }
        let img = open_image(&self.reference_path(config)?)?;
        crop_and_resize(&img, crop_box, target_width)
    }

    /// Commit `crop_box` to `store` and return to idle.
    ///
    /// On failure the store is untouched and the editor stays open so the
    /// user can retry or cancel. Returns the saved region's id.
    pub fn save<'a, F>(
        &mut self,
        store: &mut CropStore,
        crop_box: CropBox,
        methods: impl IntoIterator<Item = &'a str>,
        crop_fn: F,
    ) -> Result<String>
    where
        F: FnMut(&str) -> Result<Option<MethodThumbnail>>,
    {
        let session = self.session().ok_or(JuxtaError::EditorIdle)?;
        if crop_box.is_degenerate() {
            return Err(JuxtaError::InvalidCrop(format!("box {crop_box} has no area")));
        }
        store.create_or_update(
            session.sample,
            &session.crop_id,
            session.color,
            crop_box,
            methods,
            crop_fn,
        )?;

        let id = session.crop_id.clone();
        if session.is_new {
            self.next_id += 1;
        }
        self.state = EditorState::Idle;
        info!(crop_id = %id, "Close view saved");
        Ok(id)
    }

    /// Discard the session. Always succeeds.
    pub fn cancel(&mut self) {
        if let EditorState::Editing(session) = &self.state {
            debug!(sample = session.sample, crop_id = %session.crop_id, "Crop editing cancelled");
        }
        self.state = EditorState::Idle;
    }
}
