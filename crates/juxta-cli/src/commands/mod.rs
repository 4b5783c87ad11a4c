pub mod export;
pub mod info;
pub mod options;
pub mod render;
pub mod scan;
pub mod view;
