/// Relative deviation from 1:1 above which an image counts as non-square.
pub const SQUARE_TOLERANCE: f64 = 0.05;

/// Relative deviation from the mean aspect ratio that triggers an advisory.
pub const ASPECT_CONSISTENCY_TOLERANCE: f64 = 0.05;

/// Default width (px) of normalized grid images and close-view thumbnails.
pub const DEFAULT_IMAGE_WIDTH: u32 = 800;

/// Side of the square the crop editor fits its reference image into.
pub const EDITOR_DISPLAY_SIZE: u32 = 420;

/// Maximum number of close views per sample (one per palette colour).
pub const MAX_CROPS_PER_SAMPLE: usize = 5;

/// Thickness of crop outlines drawn on grid images, in display pixels.
pub const OUTLINE_THICKNESS: u32 = 3;

/// Fill colour of the missing-image placeholder.
pub const PLACEHOLDER_FILL: [u8; 3] = [200, 200, 200];

/// Caption colour of the missing-image placeholder.
pub const PLACEHOLDER_TEXT: [u8; 3] = [100, 100, 100];

/// Default caption drawn on placeholders.
pub const DEFAULT_PLACEHOLDER_CAPTION: &str = "Image Missing";

/// Default font size (px) for sample captions.
pub const DEFAULT_TEXT_SIZE: u32 = 16;

/// Default font size (px) for method names.
pub const DEFAULT_METHOD_TEXT_SIZE: u32 = 18;

/// Default number of sample rows shown per page.
pub const DEFAULT_ROWS_PER_PAGE: usize = 5;

/// File extensions picked up by folder scanning.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp", "webp", "tif", "tiff"];
