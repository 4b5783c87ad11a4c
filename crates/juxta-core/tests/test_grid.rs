mod common;

use image::GenericImageView;
use juxta_core::config::{DisplayOptions, MaskOptions};
use juxta_core::consts::PLACEHOLDER_FILL;
use juxta_core::crop::{CropBox, CropColor};
use juxta_core::session::SessionState;
use juxta_core::view::render_grid;

use common::{fixture, remove_image, write_half_mask, write_png};

fn options() -> DisplayOptions {
    DisplayOptions {
        image_width: 64,
        close_view_enabled: true,
        ..Default::default()
    }
}

#[test]
fn test_grid_has_one_cell_per_visible_method() {
    let fx = fixture(&["A", "B", "C"], 3, (64, 64));
    let opts = DisplayOptions {
        visible_methods: Some(vec!["C".into(), "A".into()]),
        ..options()
    };
    let grid = render_grid(&fx.config, 0..3, &Default::default(), &opts);
    let names: Vec<&str> = grid.methods.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, ["A", "C"]);
    assert_eq!(grid.rows.len(), 3);
    for row in &grid.rows {
        let cells: Vec<&str> = row.cells.iter().map(|c| c.method.as_str()).collect();
        assert_eq!(cells, ["A", "C"]);
    }
}

#[test]
fn test_missing_image_is_placeholder_cell() {
    let fx = fixture(&["A", "B"], 1, (64, 64));
    remove_image(&fx, 0, "B");
    let grid = render_grid(&fx.config, 0..1, &Default::default(), &options());
    let row = &grid.rows[0];
    assert!(!row.failed);
    assert!(!row.cells[0].missing);
    assert!(row.cells[1].missing);
    assert_eq!(row.cells[1].image.dimensions(), (64, 64));
    assert_eq!(row.cells[1].image.to_rgb8().get_pixel(0, 0).0, PLACEHOLDER_FILL);
}

#[test]
fn test_sample_without_images_fails_and_rendering_continues() {
    let fx = fixture(&["A", "B"], 3, (32, 32));
    remove_image(&fx, 1, "A");
    remove_image(&fx, 1, "B");
    let grid = render_grid(&fx.config, 0..3, &Default::default(), &options());
    assert!(!grid.rows[0].failed);
    assert!(grid.rows[1].failed);
    assert!(grid.rows[1].cells.is_empty());
    assert!(!grid.rows[2].failed);
    assert_eq!(grid.rows[2].cells.len(), 2);
}

#[test]
fn test_range_past_end_is_truncated() {
    let fx = fixture(&["A"], 2, (16, 16));
    let grid = render_grid(&fx.config, 1..10, &Default::default(), &options());
    assert_eq!(grid.rows.len(), 1);
    assert_eq!(grid.rows[0].index, 1);
}

#[test]
fn test_close_views_follow_store_order() {
    let fx = fixture(&["A", "B"], 1, (64, 64));
    remove_image(&fx, 0, "B");
    let mut s = SessionState::new(fx.config.clone(), options());
    for _ in 0..2 {
        s.enter_crop_editor(0, None).unwrap();
        s.save_crop(CropBox::new(0, 0, 32, 32)).unwrap();
    }
    s.delete_crop(0, "crop_1");
    s.enter_crop_editor(0, None).unwrap();
    s.save_crop(CropBox::new(32, 32, 64, 64)).unwrap();

    let grid = s.render_grid();
    let views = &grid.rows[0].close_views;
    let summary: Vec<(&str, usize, CropColor)> = views.iter().map(|v| (v.id.as_str(), v.number, v.color)).collect();
    assert_eq!(summary, [("crop_2", 1, CropColor::Red), ("crop_3", 2, CropColor::Green)]);
    // B had no file when the crops were saved: "N/A".
    assert!(views[0].thumbnails[0].is_some());
    assert!(views[0].thumbnails[1].is_none());
}

#[test]
fn test_outlines_drawn_only_with_close_views_enabled() {
    let fx = fixture(&["A"], 1, (64, 64));
    let mut s = SessionState::new(fx.config.clone(), options());
    s.enter_crop_editor(0, None).unwrap();
    s.save_crop(CropBox::new(10, 10, 40, 40)).unwrap();

    let on = s.render_grid();
    assert_eq!(on.rows[0].cells[0].image.to_rgb8().get_pixel(10, 20).0, CropColor::Green.rgb());

    s.options.close_view_enabled = false;
    let off = s.render_grid();
    assert_ne!(off.rows[0].cells[0].image.to_rgb8().get_pixel(10, 20).0, CropColor::Green.rgb());
    assert!(off.rows[0].close_views.is_empty());
}

#[test]
fn test_mask_darkens_grid_but_not_close_views() {
    let fx = fixture(&["A"], 1, (64, 64));
    let mut config = fx.config.clone();
    let mask = write_half_mask(&fx.dir.path().join("mask.png"), 64, 64);
    config.samples[0].mask = Some(mask);
    let opts = DisplayOptions {
        mask: MaskOptions {
            enabled: true,
            darken_factor: 1.0,
        },
        ..options()
    };
    let mut s = SessionState::new(config, opts);
    s.enter_crop_editor(0, None).unwrap();
    s.save_crop(CropBox::new(0, 0, 16, 16)).unwrap();

    let grid = s.render_grid();
    let cell = grid.rows[0].cells[0].image.to_rgb8();
    assert_eq!(cell.get_pixel(8, 60).0, [0, 0, 0]);
    assert_eq!(cell.get_pixel(60, 60).0, [40, 40, 40]);

    let thumb = grid.rows[0].close_views[0].thumbnails[0].as_ref().unwrap().to_rgb8();
    assert_eq!(thumb.get_pixel(32, 32).0, [40, 40, 40]);
}

#[test]
fn test_aspect_ratio_advisory() {
    let fx = fixture(&["A", "B"], 2, (64, 64));
    let odd = fx.config.image_path(&fx.config.samples[1], "B").unwrap();
    write_png(&odd, 72, 60, [0, 0, 0]);

    let grid = render_grid(&fx.config, 0..2, &Default::default(), &options());
    assert_eq!(grid.aspect_warnings.len(), 1);
    let w = &grid.aspect_warnings[0];
    assert_eq!((w.sample_index, w.method.as_str()), (1, "B"));
    assert!((w.ratio - 1.2).abs() < 1e-9);
    assert!((w.average - 1.05).abs() < 1e-9);
}

#[test]
fn test_placeholders_do_not_trigger_advisory() {
    let fx = fixture(&["A", "B"], 2, (64, 32));
    remove_image(&fx, 0, "B");
    let grid = render_grid(&fx.config, 0..2, &Default::default(), &options());
    assert!(grid.aspect_warnings.is_empty());
}
