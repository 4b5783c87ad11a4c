mod common;

use std::collections::{BTreeMap, HashMap};

use juxta_core::config::DisplayOptions;
use juxta_core::crop::legacy::{migrate_all, LEGACY_CROP_ID};
use juxta_core::crop::{CropBox, CropColor, CropRegion, CropStore, LegacyCrop, StoredCrops};
use juxta_core::session::SessionState;

use common::{fixture, solid};

fn legacy_entry() -> StoredCrops {
    StoredCrops::Legacy(LegacyCrop {
        crop_box: CropBox::new(10, 20, 30, 40),
        cropped_images: HashMap::from([("A".to_string(), solid(4, 4, [9, 9, 9]))]),
        original_sizes: HashMap::from([("A".to_string(), (64, 64))]),
    })
}

fn multi_entry(id: &str) -> StoredCrops {
    StoredCrops::Multi(vec![CropRegion {
        id: id.to_string(),
        color: CropColor::Blue,
        crop_box: CropBox::new(1, 1, 5, 5),
        cropped_images: HashMap::new(),
        original_sizes: HashMap::new(),
    }])
}

#[test]
fn test_legacy_entry_becomes_first_close_view() {
    let StoredCrops::Multi(regions) = legacy_entry().migrate() else {
        panic!("legacy entry was not migrated");
    };
    assert_eq!(regions.len(), 1);
    let region = &regions[0];
    assert_eq!(region.id, LEGACY_CROP_ID);
    assert_eq!(region.color, CropColor::Green);
    assert_eq!(region.crop_box, CropBox::new(10, 20, 30, 40));
    assert_eq!(region.original_sizes.get("A"), Some(&(64, 64)));
    assert!(region.cropped_images.contains_key("A"));
}

#[test]
fn test_migration_is_idempotent() {
    let entries = BTreeMap::from([(0, legacy_entry()), (3, multi_entry("crop_4"))]);
    let once = migrate_all(entries);
    let twice = migrate_all(once.clone());
    assert_eq!(once, twice);
    assert_eq!(once.get(&3), Some(&multi_entry("crop_4")));
}

#[test]
fn test_import_builds_store() {
    let entries = BTreeMap::from([(0, legacy_entry()), (1, multi_entry("crop_2"))]);
    let store = CropStore::import(entries.clone());
    assert_eq!(store.get(0)[0].id, LEGACY_CROP_ID);
    assert_eq!(store.get(1)[0].id, "crop_2");
    assert_eq!(CropStore::import(migrate_all(entries)), store);
}

#[test]
fn test_import_drops_empty_lists() {
    let store = CropStore::import(BTreeMap::from([(2, StoredCrops::Multi(Vec::new()))]));
    assert!(store.is_empty());
}

#[test]
fn test_session_ids_continue_after_imported() {
    let fx = fixture(&["A", "B"], 2, (32, 32));
    let stored = BTreeMap::from([(0, legacy_entry()), (1, multi_entry("crop_6"))]);
    let mut session = SessionState::with_stored_crops(fx.config.clone(), DisplayOptions::default(), stored);

    assert_eq!(session.editor().next_id(), 7);
    let entered = session.enter_crop_editor(0, None).unwrap();
    assert_eq!(entered.crop_id, "crop_7");
    assert_eq!(entered.color, CropColor::Red);
}
