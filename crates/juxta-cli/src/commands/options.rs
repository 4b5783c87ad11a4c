use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use juxta_core::config::DisplayOptions;

#[derive(Args)]
pub struct OptionsArgs {
    /// Write options to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Print or save the default DisplayOptions as TOML.
pub fn run(args: &OptionsArgs) -> Result<()> {
    let toml_str = toml::to_string_pretty(&DisplayOptions::default())?;

    if let Some(ref path) = args.output {
        std::fs::write(path, &toml_str)
            .with_context(|| format!("Failed to write options to {}", path.display()))?;
        println!("Default options saved to {}", path.display());
    } else {
        print!("{}", toml_str);
    }

    Ok(())
}
