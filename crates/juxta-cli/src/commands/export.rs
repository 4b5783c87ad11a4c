use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use juxta_core::export::{ExportStage, ProgressReporter};

use super::view::ViewArgs;

#[derive(Args)]
pub struct ExportArgs {
    #[command(flatten)]
    pub view: ViewArgs,

    /// Output PDF file
    #[arg(short, long, default_value = "comparison.pdf")]
    pub output: PathBuf,
}

/// Drives an indicatif bar from export progress.
struct BarReporter {
    bar: ProgressBar,
}

impl ProgressReporter for BarReporter {
    fn begin_stage(&self, stage: ExportStage, total_items: Option<usize>) {
        self.bar.set_message(stage.to_string());
        self.bar.set_length(total_items.unwrap_or(1) as u64);
        self.bar.set_position(0);
    }

    fn advance(&self, items_done: usize) {
        self.bar.set_position(items_done as u64);
    }

    fn finish_stage(&self) {
        if let Some(len) = self.bar.length() {
            self.bar.set_position(len);
        }
    }
}

pub fn run(args: &ExportArgs) -> Result<()> {
    let session = args.view.build_session()?;

    let bar = ProgressBar::new(1);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{msg:20} [{bar:40}] {pos}/{len}")?
            .progress_chars("=> "),
    );
    let reporter = BarReporter { bar };

    let bytes = session.export_pdf(&reporter)?;
    reporter.bar.finish_with_message("Done");

    std::fs::write(&args.output, &bytes)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;
    println!("\nPDF saved to {}", args.output.display());
    Ok(())
}
