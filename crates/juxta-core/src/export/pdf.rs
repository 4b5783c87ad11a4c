use miniz_oxide::deflate::compress_to_vec_zlib;
use pdf_writer::{Content, Filter, Finish, Name, Pdf, Rect, Ref, Str};

use crate::error::{JuxtaError, Result};

use super::layout::{
    fit_image, Columns, Page, PageElement, HEADING_SIZE, LABEL_SIZE, LINE_FACTOR, MARGIN, NAME_COLUMN_WIDTH,
    PAGE_HEIGHT, PAGE_WIDTH, SWATCH_SIZE,
};
use super::ProgressReporter;

const REGULAR: Name<'static> = Name(b"F1");
const BOLD: Name<'static> = Name(b"F2");
const TEXT_GREY: f32 = 0.35;

/// Serialize laid-out pages to PDF bytes.
pub fn write_pdf(pages: &[Page], columns: &Columns, reporter: &dyn ProgressReporter) -> Result<Vec<u8>> {
    if pages.is_empty() {
        return Err(JuxtaError::Pdf("document has no pages".into()));
    }

    let mut alloc = Ref::new(1);
    let catalog_id = alloc.bump();
    let tree_id = alloc.bump();
    let regular_id = alloc.bump();
    let bold_id = alloc.bump();
    let page_ids: Vec<Ref> = pages.iter().map(|_| alloc.bump()).collect();

    let mut pdf = Pdf::new();
    pdf.catalog(catalog_id).pages(tree_id);
    pdf.pages(tree_id)
        .kids(page_ids.iter().copied())
        .count(page_ids.len() as i32);
    pdf.type1_font(regular_id)
        .base_font(Name(b"Helvetica"))
        .encoding_predefined(Name(b"WinAnsiEncoding"));
    pdf.type1_font(bold_id)
        .base_font(Name(b"Helvetica-Bold"))
        .encoding_predefined(Name(b"WinAnsiEncoding"));

    for (done, (page, &page_id)) in pages.iter().zip(&page_ids).enumerate() {
        let mut painter = PagePainter::new(columns);
        for placed in &page.items {
            painter.draw(placed.top, &placed.element);
        }

        let content_id = alloc.bump();
        let image_ids: Vec<Ref> = painter.images.iter().map(|_| alloc.bump()).collect();

        let mut page_writer = pdf.page(page_id);
        page_writer
            .media_box(Rect::new(0.0, 0.0, PAGE_WIDTH, PAGE_HEIGHT))
            .parent(tree_id)
            .contents(content_id);
        let mut resources = page_writer.resources();
        resources.fonts().pair(REGULAR, regular_id).pair(BOLD, bold_id);
        let mut x_objects = resources.x_objects();
        for (image, &id) in painter.images.iter().zip(&image_ids) {
            x_objects.pair(Name(image.name.as_bytes()), id);
        }
        x_objects.finish();
        resources.finish();
        page_writer.finish();

        for (image, &id) in painter.images.iter().zip(&image_ids) {
            let mut xobject = pdf.image_xobject(id, &image.data);
            xobject.filter(Filter::FlateDecode);
            xobject.width(image.width as i32);
            xobject.height(image.height as i32);
            xobject.color_space().device_rgb();
            xobject.bits_per_component(8);
        }
        pdf.stream(content_id, &painter.content.finish());
        reporter.advance(done + 1);
    }

    Ok(pdf.finish())
}

struct EmbeddedImage {
    name: String,
    width: u32,
    height: u32,
    /// zlib-compressed RGB8 samples.
    data: Vec<u8>,
}

struct PagePainter<'a> {
    columns: &'a Columns,
    content: Content,
    images: Vec<EmbeddedImage>,
}

impl<'a> PagePainter<'a> {
    fn new(columns: &'a Columns) -> Self {
        Self {
            columns,
            content: Content::new(),
            images: Vec::new(),
        }
    }

    fn draw(&mut self, top: f32, element: &PageElement) {
        match element {
            PageElement::MethodHeader { names, font_size } => {
                for (i, name) in names.iter().enumerate() {
                    let x = self.columns.x(i);
                    self.text(x, top + font_size, BOLD, *font_size, name, 0.0);
                }
            }
            PageElement::Images(images) => {
                for (i, image) in images.iter().enumerate() {
                    let x = self.columns.x(i);
                    match image {
                        Some(image) => self.image(x, top, image),
                        None => {
                            let cx = x + self.columns.width / 2.0 - LABEL_SIZE;
                            self.text(cx, top + LABEL_SIZE, REGULAR, LABEL_SIZE, "N/A", TEXT_GREY);
                        }
                    }
                }
            }
            PageElement::CloseViewLabel { number, color } => {
                let [r, g, b] = color.rgb();
                let y = PAGE_HEIGHT - top - SWATCH_SIZE - 1.0;
                self.content
                    .set_fill_rgb(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
                    .rect(MARGIN, y, SWATCH_SIZE, SWATCH_SIZE)
                    .fill_nonzero();
                let label = format!("Close View #{number}");
                self.text(MARGIN + SWATCH_SIZE + 4.0, top + LABEL_SIZE, BOLD, LABEL_SIZE, &label, 0.0);
            }
            PageElement::Caption {
                name,
                lines,
                font_size,
            } => {
                for (i, line) in lines.iter().enumerate() {
                    let baseline = top + font_size * (1.0 + LINE_FACTOR * i as f32);
                    let mut runs: Vec<(Name<'static>, String)> = Vec::new();
                    match name.as_deref().and_then(|n| line.strip_prefix(n)) {
                        Some(rest) if i == 0 => {
                            runs.push((BOLD, name.clone().unwrap_or_default()));
                            runs.push((REGULAR, rest.to_string()));
                        }
                        _ => runs.push((REGULAR, line.clone())),
                    }
                    self.runs(MARGIN, baseline, *font_size, &runs);
                }
            }
            PageElement::Notice(message) => {
                self.text(MARGIN, top + LABEL_SIZE, REGULAR, LABEL_SIZE, message, TEXT_GREY);
            }
            PageElement::Spacer(_) => {}
            PageElement::DescriptionHeading => {
                self.text(MARGIN, top + HEADING_SIZE, BOLD, HEADING_SIZE, "Method Descriptions", 0.0);
            }
            PageElement::DescriptionRow { name, lines } => {
                self.text(MARGIN, top + LABEL_SIZE, BOLD, LABEL_SIZE, name, 0.0);
                let x = MARGIN + NAME_COLUMN_WIDTH;
                for (i, line) in lines.iter().enumerate() {
                    let baseline = top + LABEL_SIZE * (1.0 + LINE_FACTOR * i as f32);
                    self.text(x, baseline, REGULAR, LABEL_SIZE, line, 0.0);
                }
                let bottom = PAGE_HEIGHT - top - element.height(self.columns);
                self.content
                    .set_stroke_gray(0.8)
                    .set_line_width(0.5)
                    .move_to(MARGIN, bottom)
                    .line_to(PAGE_WIDTH - MARGIN, bottom)
                    .stroke();
            }
        }
    }

    /// Place `image` top-aligned and centered in the column at `x`.
    fn image(&mut self, x: f32, top: f32, image: &image::DynamicImage) {
        let rgb = image.to_rgb8();
        let (w, h) = rgb.dimensions();
        let (dw, dh) = fit_image(w, h, self.columns.width);
        let name = format!("Im{}", self.images.len());

        let left = x + (self.columns.width - dw) / 2.0;
        let bottom = PAGE_HEIGHT - top - dh;
        self.content
            .save_state()
            .transform([dw, 0.0, 0.0, dh, left, bottom])
            .x_object(Name(name.as_bytes()))
            .restore_state();

        self.images.push(EmbeddedImage {
            name,
            width: w,
            height: h,
            data: compress_to_vec_zlib(rgb.as_raw(), 6),
        });
    }

    /// Single-font text with its baseline `baseline` below the page top.
    fn text(&mut self, x: f32, baseline: f32, font: Name<'static>, size: f32, text: &str, grey: f32) {
        self.content.set_fill_gray(grey);
        self.runs_with(x, baseline, size, &[(font, text)]);
        self.content.set_fill_gray(0.0);
    }

    fn runs(&mut self, x: f32, baseline: f32, size: f32, runs: &[(Name<'static>, String)]) {
        let borrowed: Vec<(Name<'static>, &str)> = runs.iter().map(|(f, t)| (*f, t.as_str())).collect();
        self.content.set_fill_gray(0.0);
        self.runs_with(x, baseline, size, &borrowed);
    }

    /// Consecutive runs in one text object; each continues where the last ended.
    fn runs_with(&mut self, x: f32, baseline: f32, size: f32, runs: &[(Name<'static>, &str)]) {
        self.content.begin_text();
        self.content.next_line(x, PAGE_HEIGHT - baseline);
        for (font, text) in runs {
            let encoded = win_ansi(text);
            self.content.set_font(*font, size);
            self.content.show(Str(&encoded));
        }
        self.content.end_text();
    }
}

/// Encode for the standard fonts' WinAnsi encoding. Characters outside
/// Latin-1 (and the C1 range WinAnsi repurposes) become '?'.
fn win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c as u32 {
            0x20..=0x7e | 0xa0..=0xff => c as u32 as u8,
            _ => b'?',
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_win_ansi_replaces_unmappable() {
        assert_eq!(win_ansi("Caf\u{e9} \u{4e2d}"), b"Caf\xe9 ?".to_vec());
    }
}
