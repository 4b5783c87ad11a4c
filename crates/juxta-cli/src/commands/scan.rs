use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use juxta_core::config::Configuration;

#[derive(Args)]
pub struct ScanArgs {
    /// One folder per method; samples are the images of the first folder
    #[arg(required = true)]
    pub folders: Vec<PathBuf>,

    /// Write the configuration to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn run(args: &ScanArgs) -> Result<()> {
    let folders = args
        .folders
        .iter()
        .map(|f| std::path::absolute(f).with_context(|| format!("Bad folder {}", f.display())))
        .collect::<Result<Vec<_>>>()?;
    let config = Configuration::from_folders(&folders)?;
    let json = serde_json::to_string_pretty(&config)?;

    if let Some(ref path) = args.output {
        std::fs::write(path, &json)
            .with_context(|| format!("Failed to write configuration to {}", path.display()))?;
        println!(
            "{} methods, {} samples saved to {}",
            config.methods.len(),
            config.samples.len(),
            path.display()
        );
    } else {
        println!("{json}");
    }
    Ok(())
}
