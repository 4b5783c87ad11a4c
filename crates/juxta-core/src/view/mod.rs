pub mod aspect;
pub mod cell;
pub mod grid;

pub use aspect::{check_aspect_ratios, AspectWarning};
pub use cell::{render_cell, GridCell};
pub use grid::{render_grid, CloseViewRow, GridView, SampleRow};
