pub mod controls;
pub mod crop_editor;
pub mod crop_interaction;
pub mod grid;
mod helpers;
pub mod menu_bar;
pub mod status;
