#![allow(dead_code)]

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use image::{DynamicImage, GrayImage, Luma, Rgb, RgbImage};
use tempfile::TempDir;

use juxta_core::config::{Configuration, Method, Sample};

/// Write a solid-colour RGB PNG at `path`, creating parent directories.
pub fn write_png(path: &Path, width: u32, height: u32, rgb: [u8; 3]) -> PathBuf {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    RgbImage::from_pixel(width, height, Rgb(rgb)).save(path).unwrap();
    path.to_path_buf()
}

/// Write a grayscale mask PNG whose left half is 0 and right half 255.
pub fn write_half_mask(path: &Path, width: u32, height: u32) -> PathBuf {
    let mask = GrayImage::from_fn(width, height, |x, _| if x < width / 2 { Luma([0]) } else { Luma([255]) });
    mask.save(path).unwrap();
    path.to_path_buf()
}

pub fn solid(width: u32, height: u32, rgb: [u8; 3]) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb(rgb)))
}

/// A comparison set on disk: one folder per method, one PNG per sample.
pub struct Fixture {
    pub dir: TempDir,
    pub config: Configuration,
}

/// Build `samples` samples for `methods`, each image `size` pixels. Image
/// paths are relative to `base_dir`.
pub fn fixture(methods: &[&str], samples: usize, size: (u32, u32)) -> Fixture {
    let dir = TempDir::new().unwrap();
    let mut sample_list = Vec::new();
    for s in 0..samples {
        let mut images = BTreeMap::new();
        for (m, method) in methods.iter().enumerate() {
            let rel = PathBuf::from(method).join(format!("sample_{s}.png"));
            let shade = (40 * (m + 1)) as u8;
            write_png(&dir.path().join(&rel), size.0, size.1, [shade, shade, shade]);
            images.insert(method.to_string(), Some(rel));
        }
        sample_list.push(Sample {
            name: format!("Sample {s}"),
            text: Some(format!("prompt {s}")),
            mask: None,
            images,
        });
    }

    let config = Configuration {
        base_dir: dir.path().to_path_buf(),
        methods: methods.iter().map(|m| Method::new(*m)).collect(),
        samples: sample_list,
    };
    Fixture { dir, config }
}

/// Remove one method's image from disk, keeping the configuration entry.
pub fn remove_image(fx: &Fixture, sample: usize, method: &str) {
    let path = fx
        .config
        .image_path(&fx.config.samples[sample], method)
        .unwrap();
    std::fs::remove_file(path).unwrap();
}
