pub mod mask;
pub mod normalize;
pub mod overlay;
pub mod placeholder;

pub use mask::{apply_mask, load_mask};
pub use normalize::{normalize, normalize_path, Normalized};
pub use overlay::{crop_and_resize, draw_all};
pub use placeholder::placeholder;
