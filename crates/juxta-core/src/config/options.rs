use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_IMAGE_WIDTH, DEFAULT_METHOD_TEXT_SIZE, DEFAULT_PLACEHOLDER_CAPTION,
    DEFAULT_ROWS_PER_PAGE, DEFAULT_TEXT_SIZE,
};

/// Mask overlay settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MaskOptions {
    pub enabled: bool,
    /// 0.0 leaves unmasked pixels alone, 1.0 turns them black.
    pub darken_factor: f32,
}

impl Default for MaskOptions {
    fn default() -> Self {
        Self {
            enabled: false,
            darken_factor: 1.0,
        }
    }
}

/// Global display toggles read by the grid and PDF paths.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayOptions {
    /// Width of normalized grid images and close-view thumbnails.
    pub image_width: u32,
    /// Keep the source aspect ratio instead of center-cropping to a square.
    pub preserve_aspect_ratio: bool,
    pub show_method_names: bool,
    pub show_sample_names: bool,
    pub show_text: bool,
    pub show_descriptions: bool,
    pub text_size: u32,
    pub method_text_size: u32,
    pub close_view_enabled: bool,
    pub show_edit_buttons: bool,
    pub mask: MaskOptions,
    /// Methods to render, by name. `None` renders every method.
    pub visible_methods: Option<Vec<String>>,
    pub placeholder_caption: String,
    pub start_index: usize,
    pub rows_per_page: usize,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            image_width: DEFAULT_IMAGE_WIDTH,
            preserve_aspect_ratio: true,
            show_method_names: true,
            show_sample_names: true,
            show_text: true,
            show_descriptions: false,
            text_size: DEFAULT_TEXT_SIZE,
            method_text_size: DEFAULT_METHOD_TEXT_SIZE,
            close_view_enabled: false,
            show_edit_buttons: true,
            mask: MaskOptions::default(),
            visible_methods: None,
            placeholder_caption: DEFAULT_PLACEHOLDER_CAPTION.to_string(),
            start_index: 0,
            rows_per_page: DEFAULT_ROWS_PER_PAGE,
        }
    }
}

impl DisplayOptions {
    /// Sample indices covered by the current page, clamped to `total`.
    pub fn sample_range(&self, total: usize) -> Range<usize> {
        let start = self.start_index.min(total);
        let end = start.saturating_add(self.rows_per_page).min(total);
        start..end
    }

    /// Darken factor clamped to [0, 1].
    pub fn darken_factor(&self) -> f32 {
        self.mask.darken_factor.clamp(0.0, 1.0)
    }

    pub fn visible_filter(&self) -> Option<&[String]> {
        self.visible_methods.as_deref()
    }
}
