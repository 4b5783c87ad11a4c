use approx::assert_relative_eq;
use juxta_core::consts::EDITOR_DISPLAY_SIZE;
use juxta_core::crop::{CropBox, DisplayMapping, DisplayRect, OverlayTransform};

fn within_one(a: u32, b: u32) -> bool {
    a.abs_diff(b) <= 1
}

// ---------------------------------------------------------------------------
// DisplayMapping
// ---------------------------------------------------------------------------

#[test]
fn test_fit_uses_limiting_axis() {
    let m = DisplayMapping::fit(1000, 500, 420);
    assert_relative_eq!(m.scale, 0.42);
    assert_eq!(m.display_size(), (420, 210));

    let m = DisplayMapping::fit(210, 840, 420);
    assert_relative_eq!(m.scale, 0.5);
    assert_eq!(m.display_size(), (105, 420));
}

#[test]
fn test_display_round_trip_within_one_pixel() {
    let sizes = [(1000, 500), (333, 777), (4096, 4096), (64, 48), (1920, 1080)];
    for (w, h) in sizes {
        let mapping = DisplayMapping::fit(w, h, EDITOR_DISPLAY_SIZE);
        let boxes = [
            CropBox::new(0, 0, w, h),
            CropBox::new(w / 4, h / 3, w / 2, h / 2 + 1),
            CropBox::new(w / 10, h / 10, w / 10 + 7, h / 10 + 5),
            CropBox::new(w - 3, h - 3, w, h),
        ];
        for b in boxes {
            let back = mapping.to_original(mapping.to_display(b)).unwrap();
            assert!(within_one(back.left, b.left), "{w}x{h} {b} -> {back}");
            assert!(within_one(back.top, b.top), "{w}x{h} {b} -> {back}");
            assert!(within_one(back.right, b.right), "{w}x{h} {b} -> {back}");
            assert!(within_one(back.bottom, b.bottom), "{w}x{h} {b} -> {back}");
        }
    }
}

#[test]
fn test_to_original_divides_by_scale() {
    let m = DisplayMapping::fit(1000, 500, 420);
    let rect = DisplayRect {
        left: 42.0,
        top: 21.0,
        width: 84.0,
        height: 42.0,
    };
    assert_eq!(m.to_original(rect), Some(CropBox::new(100, 50, 300, 150)));
}

#[test]
fn test_degenerate_selection_is_not_a_box() {
    let m = DisplayMapping::fit(800, 600, 420);
    let zero_width = DisplayRect {
        left: 10.0,
        top: 10.0,
        width: 0.0,
        height: 50.0,
    };
    let negative = DisplayRect {
        left: 10.0,
        top: 10.0,
        width: 20.0,
        height: -5.0,
    };
    assert_eq!(m.to_original(zero_width), None);
    assert_eq!(m.to_original(negative), None);
    assert!(CropBox::new(5, 5, 5, 9).is_degenerate());
}

// ---------------------------------------------------------------------------
// OverlayTransform
// ---------------------------------------------------------------------------

#[test]
fn test_overlay_scales_axes_independently() {
    // 1000x500 source shown as a 400x400 square crop.
    let t = OverlayTransform::new((1000, 500), (400, 400));
    assert_relative_eq!(t.scale_x, 0.4);
    assert_relative_eq!(t.scale_y, 0.8);
    assert_eq!(t.map(CropBox::new(100, 100, 600, 400)), (40, 80, 240, 320));
}

#[test]
fn test_overlay_identity() {
    let t = OverlayTransform::new((200, 100), (200, 100));
    assert_eq!(t.map(CropBox::new(3, 4, 50, 60)), (3, 4, 50, 60));
}
