use std::path::Path;

use console::Style;
use juxta_core::config::Configuration;
use juxta_core::view::{AspectWarning, GridView};

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    method: Style,
    missing: Style,
    warning: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            method: Style::new().green(),
            missing: Style::new().dim().yellow(),
            warning: Style::new().yellow(),
            path: Style::new().underlined(),
        }
    }
}

pub fn print_config_summary(path: &Path, config: &Configuration, warnings: &[AspectWarning]) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to("Juxta Comparison Set"));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(20)));
    println!();

    println!("  {:<14}{}", s.label.apply_to("Config"), s.path.apply_to(path.display()));
    if !config.base_dir.as_os_str().is_empty() {
        println!(
            "  {:<14}{}",
            s.label.apply_to("Base dir"),
            s.path.apply_to(config.base_dir.display())
        );
    }
    println!("  {:<14}{}", s.label.apply_to("Samples"), s.value.apply_to(config.samples.len()));
    println!(
        "  {:<14}{}",
        s.label.apply_to("Masks"),
        if config.masks_available() {
            s.method.apply_to("available")
        } else {
            s.missing.apply_to("none")
        }
    );
    println!();

    println!("  {}", s.header.apply_to("Methods"));
    let total = config.samples.len();
    for method in &config.methods {
        let found = config
            .samples
            .iter()
            .filter(|sample| config.existing_image(sample, &method.name).is_some())
            .count();
        let count = format!("{found}/{total} images");
        let count = if found == total {
            s.value.apply_to(count)
        } else {
            s.missing.apply_to(count)
        };
        println!("    {:<20}{}", s.method.apply_to(&method.name), count);
        if let Some(ref description) = method.description {
            println!("    {:<20}{}", "", s.label.apply_to(description));
        }
    }
    println!();

    print_aspect_warnings(warnings);
}

pub fn print_aspect_warnings(warnings: &[AspectWarning]) {
    if warnings.is_empty() {
        return;
    }
    let s = Styles::new();
    println!(
        "  {}",
        s.warning.apply_to(format!(
            "Aspect ratio inconsistencies ({}, average {:.3})",
            warnings.len(),
            warnings[0].average
        ))
    );
    for w in warnings {
        println!(
            "    {:<24}{:<16}{}",
            s.label.apply_to(format!("#{} {}", w.sample_index, w.sample)),
            s.method.apply_to(&w.method),
            s.value.apply_to(format!("{:.3}", w.ratio))
        );
    }
    println!();
}

pub fn print_render_summary(grid: &GridView, output: &Path, files: usize) {
    let s = Styles::new();
    let failed: Vec<&str> = grid
        .rows
        .iter()
        .filter(|r| r.failed)
        .map(|r| r.name.as_str())
        .collect();
    let close_views: usize = grid.rows.iter().map(|r| r.close_views.len()).sum();

    println!();
    println!("  {:<14}{}", s.label.apply_to("Samples"), s.value.apply_to(grid.rows.len()));
    println!("  {:<14}{}", s.label.apply_to("Methods"), s.value.apply_to(grid.methods.len()));
    println!("  {:<14}{}", s.label.apply_to("Close views"), s.value.apply_to(close_views));
    println!("  {:<14}{}", s.label.apply_to("Files"), s.value.apply_to(files));
    println!("  {:<14}{}", s.label.apply_to("Output"), s.path.apply_to(output.display()));
    for name in failed {
        println!(
            "  {:<14}{}",
            s.label.apply_to("Failed"),
            s.missing.apply_to(format!("Sample '{name}' failed to load"))
        );
    }
    println!();

    print_aspect_warnings(&grid.aspect_warnings);
}
