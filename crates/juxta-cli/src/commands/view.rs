use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::Args;
use juxta_core::config::{Configuration, DisplayOptions};
use juxta_core::crop::CropBox;
use juxta_core::session::SessionState;
use tracing::info;

/// Arguments shared by every command that renders the grid.
#[derive(Args)]
pub struct ViewArgs {
    /// Comparison configuration (JSON)
    pub config: PathBuf,

    /// Display options file (TOML, see `juxta options`)
    #[arg(long)]
    pub options: Option<PathBuf>,

    /// Index of the first sample to include
    #[arg(long)]
    pub start: Option<usize>,

    /// Number of samples to include
    #[arg(long)]
    pub rows: Option<usize>,

    /// Comma-separated method names to show (default: all)
    #[arg(long, value_delimiter = ',')]
    pub methods: Option<Vec<String>>,

    /// Add a close view, in the reference image's pixels (repeatable)
    #[arg(long = "crop", value_name = "SAMPLE:L,T,R,B")]
    pub crops: Vec<CropSpec>,

    /// Method whose image the --crop boxes refer to (default: first available)
    #[arg(long)]
    pub reference: Option<String>,

    /// Enable masks, darkening unmasked pixels by this factor (0.0-1.0)
    #[arg(long)]
    pub mask: Option<f32>,

    /// Center-crop non-square images to squares
    #[arg(long)]
    pub square: bool,
}

/// A `--crop` value: sample index and box.
#[derive(Clone, Debug)]
pub struct CropSpec {
    pub sample: usize,
    pub crop_box: CropBox,
}

impl FromStr for CropSpec {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (sample, crop_box) = s
            .split_once(':')
            .ok_or_else(|| format!("'{s}': expected SAMPLE:LEFT,TOP,RIGHT,BOTTOM"))?;
        let sample = sample
            .trim()
            .parse::<usize>()
            .map_err(|e| format!("'{s}': bad sample index: {e}"))?;
        let crop_box = crop_box.parse::<CropBox>().map_err(|e| e.to_string())?;
        Ok(Self { sample, crop_box })
    }
}

impl ViewArgs {
    fn display_options(&self) -> Result<DisplayOptions> {
        let mut options: DisplayOptions = match &self.options {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read options from {}", path.display()))?;
                toml::from_str(&text)
                    .with_context(|| format!("Invalid options file {}", path.display()))?
            }
            None => DisplayOptions::default(),
        };

        if let Some(start) = self.start {
            options.start_index = start;
        }
        if let Some(rows) = self.rows {
            options.rows_per_page = rows;
        }
        if let Some(ref methods) = self.methods {
            options.visible_methods = Some(methods.clone());
        }
        if let Some(factor) = self.mask {
            options.mask.enabled = true;
            options.mask.darken_factor = factor;
        }
        if self.square {
            options.preserve_aspect_ratio = false;
        }
        if !self.crops.is_empty() {
            options.close_view_enabled = true;
        }
        Ok(options)
    }

    /// Load the configuration and commit every `--crop` through the editor.
    pub fn build_session(&self) -> Result<SessionState> {
        let config = Configuration::load_json(&self.config)
            .with_context(|| format!("Failed to load {}", self.config.display()))?;
        let mut session = SessionState::new(config, self.display_options()?);

        for spec in &self.crops {
            session
                .enter_crop_editor(spec.sample, None)
                .with_context(|| format!("Cannot add close view to sample {}", spec.sample))?;
            if let Some(ref reference) = self.reference {
                if let Err(e) = session.select_reference(reference) {
                    session.cancel_crop();
                    return Err(e).context("Invalid --reference");
                }
            }
            match session.save_crop(spec.crop_box) {
                Ok(id) => info!(sample = spec.sample, id = %id, "Close view added"),
                Err(e) => {
                    session.cancel_crop();
                    return Err(e).with_context(|| {
                        format!("Failed to save close view {} on sample {}", spec.crop_box, spec.sample)
                    });
                }
            }
        }
        Ok(session)
    }
}
