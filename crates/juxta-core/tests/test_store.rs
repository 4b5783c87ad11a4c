mod common;

use std::collections::HashSet;

use juxta_core::crop::{CropBox, CropColor, CropStore, MethodThumbnail};
use juxta_core::error::JuxtaError;

use common::solid;

const METHODS: [&str; 2] = ["base", "tuned"];

fn thumb(_method: &str) -> juxta_core::error::Result<Option<MethodThumbnail>> {
    Ok(Some(MethodThumbnail {
        image: solid(8, 8, [1, 2, 3]),
        original_size: (100, 100),
    }))
}

fn add(store: &mut CropStore, sample: usize, id: &str) -> CropColor {
    let color = store.next_color(sample);
    store
        .create_or_update(sample, id, color, CropBox::new(0, 0, 10, 10), METHODS, thumb)
        .unwrap();
    color
}

fn ids(store: &CropStore, sample: usize) -> Vec<String> {
    store.get(sample).iter().map(|r| r.id.clone()).collect()
}

#[test]
fn test_multi_crop_edit_reuses_freed_colour() {
    let mut store = CropStore::new();
    assert_eq!(add(&mut store, 0, "crop_1"), CropColor::Green);
    assert_eq!(add(&mut store, 0, "crop_2"), CropColor::Red);
    store.delete(0, "crop_1");
    assert_eq!(add(&mut store, 0, "crop_3"), CropColor::Green);

    assert_eq!(ids(&store, 0), ["crop_2", "crop_3"]);
    assert_eq!(store.number_of(0, "crop_2"), Some(1));
    assert_eq!(store.number_of(0, "crop_3"), Some(2));
}

#[test]
fn test_next_color_never_returns_live_colour() {
    let mut store = CropStore::new();
    let script: &[(bool, &str)] = &[
        (true, "a"),
        (true, "b"),
        (true, "c"),
        (false, "b"),
        (true, "d"),
        (false, "a"),
        (false, "c"),
        (true, "e"),
        (true, "f"),
        (true, "g"),
    ];
    for (is_add, id) in script {
        if *is_add {
            let live: Vec<CropColor> = store.get(0).iter().map(|r| r.color).collect();
            assert!(!live.contains(&store.next_color(0)));
            add(&mut store, 0, id);
        } else {
            store.delete(0, id);
        }
    }
    let colours: Vec<CropColor> = store.get(0).iter().map(|r| r.color).collect();
    let unique: HashSet<CropColor> = colours.iter().copied().collect();
    assert_eq!(colours.len(), unique.len());
}

#[test]
fn test_update_replaces_in_place() {
    let mut store = CropStore::new();
    add(&mut store, 2, "crop_1");
    add(&mut store, 2, "crop_2");
    store
        .create_or_update(2, "crop_1", CropColor::Green, CropBox::new(5, 5, 20, 20), METHODS, thumb)
        .unwrap();

    assert_eq!(ids(&store, 2), ["crop_1", "crop_2"]);
    assert_eq!(store.get_by_id(2, "crop_1").unwrap().crop_box, CropBox::new(5, 5, 20, 20));
}

#[test]
fn test_missing_methods_are_skipped() {
    let mut store = CropStore::new();
    store
        .create_or_update(0, "crop_1", CropColor::Green, CropBox::new(0, 0, 4, 4), METHODS, |m| {
            if m == "tuned" {
                Ok(None)
            } else {
                thumb(m)
            }
        })
        .unwrap();
    let region = store.get_by_id(0, "crop_1").unwrap();
    assert!(region.cropped_images.contains_key("base"));
    assert!(!region.cropped_images.contains_key("tuned"));
    assert_eq!(region.original_sizes.get("base"), Some(&(100, 100)));
}

#[test]
fn test_failed_build_leaves_store_untouched() {
    let mut store = CropStore::new();
    add(&mut store, 0, "crop_1");
    let before = store.clone();

    let result = store.create_or_update(0, "crop_1", CropColor::Green, CropBox::new(1, 1, 9, 9), METHODS, |m| {
        if m == "tuned" {
            Err(JuxtaError::CropSave {
                method: m.to_string(),
                reason: "decode failed".into(),
            })
        } else {
            thumb(m)
        }
    });

    assert!(matches!(result, Err(JuxtaError::CropSave { .. })));
    assert_eq!(store, before);
}

#[test]
fn test_delete_last_region_removes_sample_entry() {
    let mut store = CropStore::new();
    add(&mut store, 4, "crop_1");
    assert_eq!(store.samples().collect::<Vec<_>>(), [4]);
    store.delete(4, "crop_1");
    assert!(store.is_empty());
    assert!(store.get(4).is_empty());
    store.delete(4, "crop_1");
}

#[test]
fn test_palette_exhausted_falls_back_to_first() {
    let mut store = CropStore::new();
    for i in 0..5 {
        add(&mut store, 0, &format!("crop_{i}"));
    }
    assert_eq!(store.count(0), 5);
    assert_eq!(store.next_color(0), CropColor::Green);
}
