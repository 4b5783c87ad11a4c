use image::DynamicImage;

use crate::config::{DisplayOptions, Method};
use crate::crop::CropColor;
use crate::view::SampleRow;

/// Landscape A4, in points.
pub const PAGE_WIDTH: f32 = 842.0;
pub const PAGE_HEIGHT: f32 = 595.0;

const MM: f32 = 72.0 / 25.4;
pub const MARGIN: f32 = MM;
pub const COLUMN_SPACING: f32 = 3.5 * MM;
pub const MAX_IMAGE_HEIGHT: f32 = 60.0 * MM;
pub const NAME_COLUMN_WIDTH: f32 = 50.0 * MM;

pub const LABEL_SIZE: f32 = 10.0;
pub const HEADING_SIZE: f32 = 14.0;
pub const SWATCH_SIZE: f32 = 8.0;
pub const LINE_FACTOR: f32 = 1.3;
/// Average Helvetica glyph advance, in em.
const AVG_CHAR_WIDTH: f32 = 0.5;

/// One block of the exported document, laid out top to bottom.
#[derive(Clone, Debug)]
pub enum PageElement {
    MethodHeader { names: Vec<String>, font_size: f32 },
    /// One image per column; `None` renders as "N/A".
    Images(Vec<Option<DynamicImage>>),
    CloseViewLabel { number: usize, color: CropColor },
    /// Sample caption wrapped to the printable width. The first line opens
    /// with the sample name when `name` is set.
    Caption {
        name: Option<String>,
        lines: Vec<String>,
        font_size: f32,
    },
    Notice(String),
    Spacer(f32),
    DescriptionHeading,
    DescriptionRow { name: String, lines: Vec<String> },
}

/// Equal-width image columns spanning the printable width.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Columns {
    pub count: usize,
    pub width: f32,
}

impl Columns {
    pub fn new(count: usize) -> Self {
        let count = count.max(1);
        let usable = PAGE_WIDTH - 2.0 * MARGIN - (count - 1) as f32 * COLUMN_SPACING;
        Self {
            count,
            width: usable / count as f32,
        }
    }

    /// Left edge of column `i`.
    pub fn x(&self, i: usize) -> f32 {
        MARGIN + i as f32 * (self.width + COLUMN_SPACING)
    }
}

/// Size an image of `(w, h)` pixels into a column, capped in height.
pub fn fit_image(w: u32, h: u32, max_width: f32) -> (f32, f32) {
    let (w, h) = (w.max(1) as f32, h.max(1) as f32);
    let scale = (max_width / w).min(MAX_IMAGE_HEIGHT / h);
    (w * scale, h * scale)
}

impl PageElement {
    pub fn height(&self, columns: &Columns) -> f32 {
        match self {
            Self::MethodHeader { font_size, .. } => font_size * LINE_FACTOR,
            Self::Images(images) => images
                .iter()
                .map(|img| match img {
                    Some(img) => fit_image(img.width(), img.height(), columns.width).1,
                    None => LABEL_SIZE * LINE_FACTOR,
                })
                .fold(0.0, f32::max),
            Self::CloseViewLabel { .. } | Self::Notice(_) => LABEL_SIZE * LINE_FACTOR + 2.0,
            Self::Caption { lines, font_size, .. } => lines.len().max(1) as f32 * font_size * LINE_FACTOR,
            Self::Spacer(h) => *h,
            Self::DescriptionHeading => HEADING_SIZE * LINE_FACTOR + 4.0,
            Self::DescriptionRow { lines, .. } => lines.len().max(1) as f32 * LABEL_SIZE * LINE_FACTOR + 4.0,
        }
    }
}

/// Greedy word wrap using an average glyph width.
pub fn wrap_text(text: &str, width: f32, font_size: f32) -> Vec<String> {
    let max_chars = ((width / (font_size * AVG_CHAR_WIDTH)) as usize).max(1);
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        if !line.is_empty() && line.chars().count() + 1 + word.chars().count() > max_chars {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

/// "name | Text: text", wrapped across the printable width.
fn caption(row: &SampleRow, options: &DisplayOptions) -> Option<PageElement> {
    let name = options
        .show_sample_names
        .then(|| row.name.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|n| !n.is_empty());
    let text = row.text.as_deref().filter(|_| options.show_text);

    let full = match (&name, text) {
        (Some(name), Some(text)) => format!("{name} | Text: {text}"),
        (Some(name), None) => name.clone(),
        (None, Some(text)) => format!("Text: {text}"),
        (None, None) => return None,
    };
    let font_size = options.text_size as f32;
    Some(PageElement::Caption {
        name,
        lines: wrap_text(&full, PAGE_WIDTH - 2.0 * MARGIN, font_size),
        font_size,
    })
}

/// Turn rendered sample rows into document blocks: method names before the
/// first sample, each sample's main images, its close views, its caption,
/// then the method description table.
pub fn build_elements(methods: &[Method], rows: &[SampleRow], options: &DisplayOptions) -> Vec<PageElement> {
    let mut elements = Vec::new();

    for (i, row) in rows.iter().enumerate() {
        if i == 0 && options.show_method_names {
            elements.push(PageElement::MethodHeader {
                names: methods.iter().map(|m| m.name.clone()).collect(),
                font_size: options.method_text_size as f32,
            });
        }

        if row.failed {
            elements.push(PageElement::Notice(format!("Sample '{}' failed to load", row.name)));
        } else {
            elements.push(PageElement::Images(
                row.cells.iter().map(|c| Some(c.image.clone())).collect(),
            ));
        }

        for view in &row.close_views {
            elements.push(PageElement::CloseViewLabel {
                number: view.number,
                color: view.color,
            });
            elements.push(PageElement::Images(view.thumbnails.clone()));
        }

        if let Some(caption) = caption(row, options) {
            elements.push(caption);
        }
        elements.push(PageElement::Spacer(COLUMN_SPACING));
    }

    if options.show_descriptions {
        elements.push(PageElement::DescriptionHeading);
        let text_width = PAGE_WIDTH - 2.0 * MARGIN - NAME_COLUMN_WIDTH;
        for method in methods {
            let description = method.description.as_deref().unwrap_or("");
            elements.push(PageElement::DescriptionRow {
                name: method.name.clone(),
                lines: wrap_text(description, text_width, LABEL_SIZE),
            });
        }
    }

    elements
}

/// An element positioned on a page; `top` is its distance from the top edge.
#[derive(Clone, Debug)]
pub struct Placed {
    pub top: f32,
    pub element: PageElement,
}

#[derive(Clone, Debug, Default)]
pub struct Page {
    pub items: Vec<Placed>,
}

/// Flow elements onto pages, starting a new page when the next element
/// would cross the bottom margin. Spacers are dropped at page tops.
pub fn paginate(elements: Vec<PageElement>, columns: &Columns) -> Vec<Page> {
    let mut pages = Vec::new();
    let mut page = Page::default();
    let mut cursor = MARGIN;

    for element in elements {
        let height = element.height(columns);
        if !page.items.is_empty() && cursor + height > PAGE_HEIGHT - MARGIN {
            pages.push(std::mem::take(&mut page));
            cursor = MARGIN;
        }
        if page.items.is_empty() && matches!(element, PageElement::Spacer(_)) {
            continue;
        }
        page.items.push(Placed { top: cursor, element });
        cursor += height;
    }
    if !page.items.is_empty() || pages.is_empty() {
        pages.push(page);
    }
    pages
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_text_respects_width() {
        let lines = wrap_text("alpha beta gamma delta", 50.0, 10.0);
        assert_eq!(lines, vec!["alpha beta", "gamma", "delta"]);
        assert!(wrap_text("", 50.0, 10.0).is_empty());
    }

    #[test]
    fn test_long_caption_wraps_to_page_width() {
        let row = SampleRow {
            index: 0,
            name: "sample one".into(),
            text: Some("lorem ipsum dolor ".repeat(110)),
            cells: Vec::new(),
            close_views: Vec::new(),
            failed: false,
            can_add_crop: true,
        };
        let options = DisplayOptions::default();
        let elements = build_elements(&[], &[row], &options);
        let caption = elements
            .iter()
            .find(|e| matches!(e, PageElement::Caption { .. }))
            .unwrap();
        let PageElement::Caption { name, lines, font_size } = caption else {
            unreachable!()
        };

        assert_eq!(name.as_deref(), Some("sample one"));
        assert!(lines.len() > 10);
        assert!(lines[0].starts_with("sample one | Text: lorem"));
        let max_chars = ((PAGE_WIDTH - 2.0 * MARGIN) / (font_size * AVG_CHAR_WIDTH)) as usize;
        assert!(lines.iter().all(|l| l.chars().count() <= max_chars));

        let height = caption.height(&Columns::new(1));
        assert!((height - lines.len() as f32 * font_size * LINE_FACTOR).abs() < 1e-3);
    }

    #[test]
    fn test_caption_omitted_when_hidden() {
        let row = SampleRow {
            index: 0,
            name: "s".into(),
            text: Some("t".into()),
            cells: Vec::new(),
            close_views: Vec::new(),
            failed: false,
            can_add_crop: true,
        };
        let options = DisplayOptions {
            show_sample_names: false,
            show_text: false,
            ..Default::default()
        };
        let elements = build_elements(&[], &[row], &options);
        assert!(!elements.iter().any(|e| matches!(e, PageElement::Caption { .. })));
    }

    #[test]
    fn test_columns_span_printable_width() {
        let cols = Columns::new(3);
        let right = cols.x(2) + cols.width;
        assert!((right - (PAGE_WIDTH - MARGIN)).abs() < 1e-3);
    }
}
