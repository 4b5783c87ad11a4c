pub mod config;
pub mod consts;
pub mod crop;
pub mod error;
pub mod export;
pub mod imaging;
pub mod session;
pub mod view;
