mod commands;
mod summary;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "juxta", about = "Side-by-side image comparison with shared close views")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarize a comparison configuration
    Info(commands::info::InfoArgs),
    /// Write annotated grid images and close views as PNG files
    Render(commands::render::RenderArgs),
    /// Export the comparison grid to a PDF document
    Export(commands::export::ExportArgs),
    /// Print or save default display options as TOML
    Options(commands::options::OptionsArgs),
    /// Build a configuration from one folder per method
    Scan(commands::scan::ScanArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match &cli.command {
        Commands::Info(args) => commands::info::run(args),
        Commands::Render(args) => commands::render::run(args),
        Commands::Export(args) => commands::export::run(args),
        Commands::Options(args) => commands::options::run(args),
        Commands::Scan(args) => commands::scan::run(args),
    }
}
