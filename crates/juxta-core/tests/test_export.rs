mod common;

use std::cell::RefCell;

use juxta_core::config::DisplayOptions;
use juxta_core::crop::CropBox;
use juxta_core::error::JuxtaError;
use juxta_core::export::{
    build_elements, export_pdf, paginate, Columns, ExportStage, NoOpReporter, PageElement,
    ProgressReporter,
};
use juxta_core::session::SessionState;
use juxta_core::view::render_grid;

use common::{fixture, remove_image};

#[derive(Default)]
struct Recorder {
    stages: RefCell<Vec<ExportStage>>,
    advanced: RefCell<usize>,
}

impl ProgressReporter for Recorder {
    fn begin_stage(&self, stage: ExportStage, _total_items: Option<usize>) {
        self.stages.borrow_mut().push(stage);
    }

    fn advance(&self, _items_done: usize) {
        *self.advanced.borrow_mut() += 1;
    }
}

fn count_pages(pdf: &[u8]) -> usize {
    let needle = b"/Type /Page\n";
    let alt = b"/Type /Page ";
    pdf.windows(needle.len())
        .filter(|w| *w == needle || *w == alt)
        .count()
}

fn options() -> DisplayOptions {
    DisplayOptions {
        image_width: 48,
        close_view_enabled: true,
        show_descriptions: true,
        ..Default::default()
    }
}

#[test]
fn test_export_produces_pdf_with_stages() {
    let fx = fixture(&["A", "B"], 3, (48, 48));
    let mut s = SessionState::new(fx.config.clone(), options());
    s.enter_crop_editor(0, None).unwrap();
    s.save_crop(CropBox::new(0, 0, 24, 24)).unwrap();

    let recorder = Recorder::default();
    let bytes = s.export_pdf(&recorder).unwrap();
    assert!(bytes.starts_with(b"%PDF-"));
    assert!(bytes.windows(b"Close View #1".len()).any(|w| w == b"Close View #1"));
    assert_eq!(
        *recorder.stages.borrow(),
        [ExportStage::Rendering, ExportStage::Paginating, ExportStage::Writing]
    );
    assert!(*recorder.advanced.borrow() >= 3);
}

#[test]
fn test_empty_range_is_error() {
    let fx = fixture(&["A"], 2, (16, 16));
    let result = export_pdf(&fx.config, 5..9, &Default::default(), &options(), &NoOpReporter);
    assert!(matches!(result, Err(JuxtaError::Pdf(_))));
}

#[test]
fn test_many_samples_span_several_pages() {
    let fx = fixture(&["A", "B"], 8, (48, 48));
    let bytes = export_pdf(&fx.config, 0..8, &Default::default(), &options(), &NoOpReporter).unwrap();
    assert!(count_pages(&bytes) > 1);
}

#[test]
fn test_method_header_only_before_first_sample() {
    let fx = fixture(&["A", "B"], 3, (32, 32));
    let opts = options();
    let grid = render_grid(&fx.config, 0..3, &Default::default(), &opts);
    let elements = build_elements(&grid.methods, &grid.rows, &opts);
    let headers = elements
        .iter()
        .filter(|e| matches!(e, PageElement::MethodHeader { .. }))
        .count();
    assert_eq!(headers, 1);
    assert!(matches!(elements[0], PageElement::MethodHeader { .. }));
}

#[test]
fn test_failed_sample_and_missing_thumbnails() {
    let fx = fixture(&["A", "B"], 2, (32, 32));
    remove_image(&fx, 0, "B");
    remove_image(&fx, 1, "A");
    remove_image(&fx, 1, "B");
    let mut s = SessionState::new(fx.config.clone(), options());
    s.enter_crop_editor(0, None).unwrap();
    s.save_crop(CropBox::new(0, 0, 16, 16)).unwrap();

    let grid = s.render_grid();
    let elements = build_elements(&grid.methods, &grid.rows, &s.options);
    assert!(elements
        .iter()
        .any(|e| matches!(e, PageElement::Notice(msg) if msg.contains("Sample 1"))));
    let thumbs = elements
        .iter()
        .find_map(|e| match e {
            PageElement::Images(images) if images.iter().any(Option::is_none) => Some(images),
            _ => None,
        })
        .unwrap();
    assert!(thumbs[0].is_some());

    let bytes = s.export_pdf(&NoOpReporter).unwrap();
    assert!(bytes.windows(3).any(|w| w == b"N/A"));
}

#[test]
fn test_visible_methods_filter_description_table() {
    let mut fx = fixture(&["A", "B", "C"], 1, (32, 32));
    fx.config.methods[1].description = Some("second method".into());
    let opts = DisplayOptions {
        visible_methods: Some(vec!["A".into(), "C".into()]),
        ..options()
    };
    let grid = render_grid(&fx.config, 0..1, &Default::default(), &opts);
    let elements = build_elements(&grid.methods, &grid.rows, &opts);
    let described: Vec<&str> = elements
        .iter()
        .filter_map(|e| match e {
            PageElement::DescriptionRow { name, .. } => Some(name.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(described, ["A", "C"]);
    let widest = elements
        .iter()
        .filter_map(|e| match e {
            PageElement::Images(images) => Some(images.len()),
            _ => None,
        })
        .max();
    assert_eq!(widest, Some(2));
}

#[test]
fn test_paginate_keeps_elements_inside_page() {
    let fx = fixture(&["A"], 6, (40, 40));
    let opts = options();
    let grid = render_grid(&fx.config, 0..6, &Default::default(), &opts);
    let columns = Columns::new(grid.methods.len());
    let pages = paginate(build_elements(&grid.methods, &grid.rows, &opts), &columns);
    assert!(pages.len() > 1);
    for page in &pages {
        assert!(!page.items.is_empty());
        assert!(!matches!(page.items[0].element, PageElement::Spacer(_)));
        for placed in &page.items {
            let bottom = placed.top + placed.element.height(&columns);
            assert!(bottom <= juxta_core::export::layout::PAGE_HEIGHT);
        }
    }
}
