use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use juxta_core::config::{Configuration, DisplayOptions};
use juxta_core::crop::CropStore;
use juxta_core::view::render_grid;

use crate::summary::print_config_summary;

/// Thumbnail width used only to collect aspect ratios.
const PROBE_WIDTH: u32 = 16;

#[derive(Args)]
pub struct InfoArgs {
    /// Comparison configuration (JSON)
    pub config: PathBuf,
}

pub fn run(args: &InfoArgs) -> Result<()> {
    let config = Configuration::load_json(&args.config)
        .with_context(|| format!("Failed to load {}", args.config.display()))?;

    let probe = DisplayOptions {
        image_width: PROBE_WIDTH,
        ..Default::default()
    };
    let grid = render_grid(&config, 0..config.samples.len(), &CropStore::new(), &probe);

    print_config_summary(&args.config, &config, &grid.aspect_warnings);
    Ok(())
}
