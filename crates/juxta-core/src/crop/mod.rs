pub mod editor;
pub mod geometry;
pub mod legacy;
pub mod palette;
pub mod store;

pub use editor::{CropEditor, EditSession, EditorState};
pub use geometry::{CropBox, DisplayMapping, DisplayRect, OverlayTransform};
pub use legacy::{LegacyCrop, StoredCrops};
pub use palette::CropColor;
pub use store::{CropRegion, CropStore, MethodThumbnail};
