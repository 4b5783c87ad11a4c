mod common;

use std::path::Path;

use approx::assert_relative_eq;
use image::GenericImageView;
use juxta_core::consts::PLACEHOLDER_FILL;
use juxta_core::imaging::normalize::{center_square_box, needs_square_crop, resize_to_width};
use juxta_core::imaging::{normalize, normalize_path};

use common::{solid, write_png};

#[test]
fn test_square_crop_wide_source() {
    let src = solid(1000, 500, [10, 20, 30]);
    let n = normalize(&src, 400, false);
    assert_eq!(n.image.dimensions(), (400, 400));
    assert!(n.was_cropped);
    assert_relative_eq!(n.aspect_ratio, 2.0);
}

#[test]
fn test_preserve_aspect_ratio_skips_crop() {
    let src = solid(1000, 500, [10, 20, 30]);
    let n = normalize(&src, 400, true);
    assert_eq!(n.image.dimensions(), (400, 200));
    assert!(!n.was_cropped);
    assert_relative_eq!(n.aspect_ratio, 2.0);
}

#[test]
fn test_near_square_within_tolerance_is_not_cropped() {
    let src = solid(1040, 1000, [0, 0, 0]);
    let n = normalize(&src, 520, false);
    assert!(!n.was_cropped);
    assert_eq!(n.image.dimensions(), (520, 500));
    assert!(!needs_square_crop(1.04));
    assert!(needs_square_crop(1.06));
}

#[test]
fn test_center_square_box_uses_short_side() {
    let b = center_square_box(1000, 500);
    assert_eq!((b.left, b.top, b.right, b.bottom), (250, 0, 750, 500));
    let b = center_square_box(300, 701);
    assert_eq!((b.left, b.top, b.right, b.bottom), (0, 200, 300, 500));
}

#[test]
fn test_resize_rounds_height() {
    let src = solid(300, 200, [0, 0, 0]);
    assert_eq!(resize_to_width(&src, 100).dimensions(), (100, 67));
}

#[test]
fn test_placeholder_for_nonexistent_path() {
    let n = normalize_path(Some(Path::new("/definitely/not/here.png")), 240, true, "Image Missing");
    assert_eq!(n.image.dimensions(), (240, 240));
    assert_relative_eq!(n.aspect_ratio, 1.0);
    assert!(!n.was_cropped);
    assert!(n.is_placeholder());
    assert_eq!(n.image.to_rgb8().get_pixel(0, 0).0, PLACEHOLDER_FILL);
}

#[test]
fn test_placeholder_for_null_entry() {
    let n = normalize_path(None, 120, false, "Image Missing");
    assert_eq!(n.image.dimensions(), (120, 120));
    assert!(n.is_placeholder());
}

#[test]
fn test_placeholder_for_undecodable_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.png");
    std::fs::write(&path, b"not a png").unwrap();
    let n = normalize_path(Some(&path), 64, true, "Image Missing");
    assert!(n.is_placeholder());
    assert_eq!(n.image.dimensions(), (64, 64));
}

#[test]
fn test_normalize_path_reports_source_size() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_png(&dir.path().join("a.png"), 90, 60, [1, 2, 3]);
    let n = normalize_path(Some(&path), 45, true, "Image Missing");
    assert_eq!(n.source_size, Some((90, 60)));
    assert_eq!(n.image.dimensions(), (45, 30));
}
