use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use image::DynamicImage;

use super::view::ViewArgs;
use crate::summary::print_render_summary;

#[derive(Args)]
pub struct RenderArgs {
    #[command(flatten)]
    pub view: ViewArgs,

    /// Output directory
    #[arg(short, long)]
    pub output: PathBuf,
}

pub fn run(args: &RenderArgs) -> Result<()> {
    let session = args.view.build_session()?;
    let grid = session.render_grid();

    std::fs::create_dir_all(&args.output)
        .with_context(|| format!("Failed to create {}", args.output.display()))?;

    let mut files = 0;
    for row in &grid.rows {
        let stem = format!("{:03}_{}", row.index, file_safe(&row.name));
        for cell in &row.cells {
            let path = args.output.join(format!("{stem}_{}.png", file_safe(&cell.method)));
            save(&cell.image, &path)?;
            files += 1;
        }
        for view in &row.close_views {
            for (method, thumb) in grid.methods.iter().zip(&view.thumbnails) {
                let Some(thumb) = thumb else { continue };
                let name = format!("{stem}_close{}_{}.png", view.number, file_safe(&method.name));
                save(thumb, &args.output.join(name))?;
                files += 1;
            }
        }
    }

    print_render_summary(&grid, &args.output, files);
    Ok(())
}

fn save(image: &DynamicImage, path: &Path) -> Result<()> {
    image
        .save(path)
        .with_context(|| format!("Failed to write {}", path.display()))
}

fn file_safe(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_alphanumeric() || c == '-' { c } else { '_' })
        .collect()
}
