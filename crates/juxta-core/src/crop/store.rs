use std::collections::{BTreeMap, HashMap};

use image::DynamicImage;
use tracing::{debug, info};

use crate::error::Result;

use super::geometry::CropBox;
use super::palette::CropColor;

/// A named, coloured close view of one sample.
#[derive(Clone, Debug, PartialEq)]
pub struct CropRegion {
    pub id: String,
    pub color: CropColor,
    /// Box in the reference image's original pixel space.
    pub crop_box: CropBox,
    /// Cropped-and-resized thumbnail per method name.
    pub cropped_images: HashMap<String, DynamicImage>,
    /// Native `(width, height)` of each method's source image.
    pub original_sizes: HashMap<String, (u32, u32)>,
}

/// Per-method thumbnail produced while committing a crop.
pub struct MethodThumbnail {
    pub image: DynamicImage,
    pub original_size: (u32, u32),
}

/// Ordered close views per sample index. List order is display order
/// ("Close View #1, #2, ...").
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CropStore {
    regions: BTreeMap<usize, Vec<CropRegion>>,
}

impl CropStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_regions(regions: BTreeMap<usize, Vec<CropRegion>>) -> Self {
        let regions = regions.into_iter().filter(|(_, v)| !v.is_empty()).collect();
        Self { regions }
    }

    /// Build the thumbnails for `methods` through `crop_fn`, then insert or
    /// replace the region with `id` in one step.
    ///
    /// `crop_fn` returns `Ok(None)` for a method whose image is legitimately
    /// missing (skipped) and `Err` for a real failure, which aborts the
    /// whole operation and leaves the store untouched.
    pub fn create_or_update<'a, F>(
        &mut self,
        sample: usize,
        id: &str,
        color: CropColor,
        crop_box: CropBox,
        methods: impl IntoIterator<Item = &'a str>,
        mut crop_fn: F,
    ) -> Result<()>
    where
        F: FnMut(&str) -> Result<Option<MethodThumbnail>>,
    {
        let mut cropped_images = HashMap::new();
        let mut original_sizes = HashMap::new();
        for method in methods {
            match crop_fn(method)? {
                Some(thumb) => {
                    original_sizes.insert(method.to_string(), thumb.original_size);
                    cropped_images.insert(method.to_string(), thumb.image);
                }
                None => debug!(sample, method, "No source image, close view skipped"),
            }
        }

        let region = CropRegion {
            id: id.to_string(),
            color,
            crop_box,
            cropped_images,
            original_sizes,
        };

        let list = self.regions.entry(sample).or_default();
        match list.iter_mut().find(|r| r.id == id) {
            Some(existing) => {
                *existing = region;
                info!(sample, id, %crop_box, "Close view updated");
            }
            None => {
                list.push(region);
                info!(sample, id, %crop_box, "Close view added");
            }
        }
        Ok(())
    }

    /// Close views of `sample`, oldest first.
    pub fn get(&self, sample: usize) -> &[CropRegion] {
        self.regions.get(&sample).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn get_by_id(&self, sample: usize, id: &str) -> Option<&CropRegion> {
        self.get(sample).iter().find(|r| r.id == id)
    }

    /// 1-based close-view number of `id` within its sample.
    pub fn number_of(&self, sample: usize, id: &str) -> Option<usize> {
        self.get(sample).iter().position(|r| r.id == id).map(|i| i + 1)
    }

    /// Remove a close view. A sample left without close views loses its entry.
    pub fn delete(&mut self, sample: usize, id: &str) {
        let Some(list) = self.regions.get_mut(&sample) else {
            return;
        };
        list.retain(|r| r.id != id);
        if list.is_empty() {
            self.regions.remove(&sample);
        }
        info!(sample, id, "Close view deleted");
    }

    /// First palette colour not held by a live close view of `sample`.
    pub fn next_color(&self, sample: usize) -> CropColor {
        CropColor::first_unused(self.get(sample).iter().map(|r| &r.color))
    }

    pub fn count(&self, sample: usize) -> usize {
        self.get(sample).len()
    }

    /// Sample indices that hold at least one close view.
    pub fn samples(&self) -> impl Iterator<Item = usize> + '_ {
        self.regions.keys().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn clear(&mut self) {
        self.regions.clear();
    }

    /// All region ids across every sample.
    pub(crate) fn ids(&self) -> impl Iterator<Item = &str> {
        self.regions.values().flatten().map(|r| r.id.as_str())
    }
}
