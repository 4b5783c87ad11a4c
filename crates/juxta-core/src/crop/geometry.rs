use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{JuxtaError, Result};

/// A crop region in original-image pixel space, `(left, top, right, bottom)`
/// with exclusive right/bottom edges.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CropBox {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl CropBox {
    pub fn new(left: u32, top: u32, right: u32, bottom: u32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn width(&self) -> u32 {
        self.right.saturating_sub(self.left)
    }

    pub fn height(&self) -> u32 {
        self.bottom.saturating_sub(self.top)
    }

    /// A box with no area is "no selection" and must never be persisted.
    pub fn is_degenerate(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Intersect with an image of `width`x`height`. `None` if nothing is left.
    pub fn clamped(&self, width: u32, height: u32) -> Option<CropBox> {
        let clamped = CropBox {
            left: self.left.min(width),
            top: self.top.min(height),
            right: self.right.min(width),
            bottom: self.bottom.min(height),
        };
        (!clamped.is_degenerate()).then_some(clamped)
    }
}

impl fmt::Display for CropBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{},{}", self.left, self.top, self.right, self.bottom)
    }
}

impl FromStr for CropBox {
    type Err = JuxtaError;

    /// Parse `left,top,right,bottom`.
    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<u32> = s
            .split(',')
            .map(|p| p.trim().parse::<u32>())
            .collect::<std::result::Result<_, _>>()
            .map_err(|e| JuxtaError::InvalidCrop(format!("'{s}': {e}")))?;
        match parts.as_slice() {
            [l, t, r, b] => Ok(CropBox::new(*l, *t, *r, *b)),
            _ => Err(JuxtaError::InvalidCrop(format!(
                "'{s}': expected left,top,right,bottom"
            ))),
        }
    }
}

/// A selection drawn on the displayed reference image.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DisplayRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl DisplayRect {
    pub fn is_degenerate(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// Uniform mapping between the crop editor's reference display and the
/// original image. The reference is fitted into a `max_display` square.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DisplayMapping {
    pub original_width: u32,
    pub original_height: u32,
    pub scale: f64,
}

impl DisplayMapping {
    pub fn fit(original_width: u32, original_height: u32, max_display: u32) -> Self {
        let d = max_display as f64;
        let scale = (d / original_width.max(1) as f64).min(d / original_height.max(1) as f64);
        Self {
            original_width,
            original_height,
            scale,
        }
    }

    /// Pixel size of the displayed reference image.
    pub fn display_size(&self) -> (u32, u32) {
        (
            ((self.original_width as f64 * self.scale).round() as u32).max(1),
            ((self.original_height as f64 * self.scale).round() as u32).max(1),
        )
    }

    /// Map a display-space selection into original-image space.
    /// Degenerate selections map to `None`.
    pub fn to_original(&self, rect: DisplayRect) -> Option<CropBox> {
        if rect.is_degenerate() || self.scale <= 0.0 {
            return None;
        }
        let left = (rect.left / self.scale).round().max(0.0);
        let top = (rect.top / self.scale).round().max(0.0);
        let right = ((rect.left + rect.width) / self.scale).round().max(0.0);
        let bottom = ((rect.top + rect.height) / self.scale).round().max(0.0);
        let crop = CropBox::new(left as u32, top as u32, right as u32, bottom as u32);
        (!crop.is_degenerate()).then_some(crop)
    }

    /// Map a persisted box back onto the reference display.
    pub fn to_display(&self, crop: CropBox) -> DisplayRect {
        DisplayRect {
            left: crop.left as f64 * self.scale,
            top: crop.top as f64 * self.scale,
            width: crop.width() as f64 * self.scale,
            height: crop.height() as f64 * self.scale,
        }
    }
}

/// Per-axis mapping used to draw saved boxes onto a display image of any
/// size. Always built from the true source dimensions, never from an
/// intermediate square-cropped image.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OverlayTransform {
    pub scale_x: f64,
    pub scale_y: f64,
}

impl OverlayTransform {
    pub fn new(original: (u32, u32), display: (u32, u32)) -> Self {
        Self {
            scale_x: display.0 as f64 / original.0.max(1) as f64,
            scale_y: display.1 as f64 / original.1.max(1) as f64,
        }
    }

    /// `(left, top, right, bottom)` in display pixels.
    pub fn map(&self, crop: CropBox) -> (i32, i32, i32, i32) {
        (
            (crop.left as f64 * self.scale_x) as i32,
            (crop.top as f64 * self.scale_y) as i32,
            (crop.right as f64 * self.scale_x) as i32,
            (crop.bottom as f64 * self.scale_y) as i32,
        )
    }
}
