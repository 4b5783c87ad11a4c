use std::collections::{BTreeMap, HashMap};

use image::DynamicImage;

use super::geometry::CropBox;
use super::palette::CropColor;
use super::store::{CropRegion, CropStore};

/// Id given to the close view recovered from a single-crop entry.
pub const LEGACY_CROP_ID: &str = "crop_0";

/// The single close view per sample of the older format.
#[derive(Clone, Debug, PartialEq)]
pub struct LegacyCrop {
    pub crop_box: CropBox,
    pub cropped_images: HashMap<String, DynamicImage>,
    pub original_sizes: HashMap<String, (u32, u32)>,
}

/// A sample's crop entry as it arrives from an earlier session.
#[derive(Clone, Debug, PartialEq)]
pub enum StoredCrops {
    Legacy(LegacyCrop),
    Multi(Vec<CropRegion>),
}

impl StoredCrops {
    /// Upgrade to the multi-crop form. Already migrated entries pass through.
    pub fn migrate(self) -> StoredCrops {
        match self {
            StoredCrops::Legacy(old) => StoredCrops::Multi(vec![CropRegion {
                id: LEGACY_CROP_ID.to_string(),
                color: CropColor::ALL[0],
                crop_box: old.crop_box,
                cropped_images: old.cropped_images,
                original_sizes: old.original_sizes,
            }]),
            multi @ StoredCrops::Multi(_) => multi,
        }
    }

    fn into_regions(self) -> Vec<CropRegion> {
        match self.migrate() {
            StoredCrops::Multi(regions) => regions,
            StoredCrops::Legacy(_) => Vec::new(),
        }
    }
}

/// Migrate every entry of an imported crop map.
pub fn migrate_all(entries: BTreeMap<usize, StoredCrops>) -> BTreeMap<usize, StoredCrops> {
    entries
        .into_iter()
        .map(|(sample, entry)| (sample, entry.migrate()))
        .collect()
}

impl CropStore {
    /// Build a store from imported entries, upgrading legacy ones.
    pub fn import(entries: BTreeMap<usize, StoredCrops>) -> CropStore {
        let regions = entries
            .into_iter()
            .map(|(sample, entry)| (sample, entry.into_regions()))
            .collect();
        CropStore::from_regions(regions)
    }
}
