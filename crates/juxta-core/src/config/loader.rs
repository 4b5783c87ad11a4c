use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};
use walkdir::WalkDir;

use crate::consts::IMAGE_EXTENSIONS;
use crate::error::{JuxtaError, Result};

use super::{Configuration, Method, Sample};

impl Configuration {
    /// Parse a JSON configuration. A relative `base_dir` is resolved against `cwd`.
    pub fn from_json_str(text: &str, cwd: &Path) -> Result<Self> {
        let mut config: Configuration = serde_json::from_str(text)?;
        if !config.base_dir.as_os_str().is_empty() && config.base_dir.is_relative() {
            config.base_dir = cwd.join(&config.base_dir);
        }
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON configuration file, resolving `base_dir` against the
    /// process working directory.
    pub fn load_json(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let cwd = std::env::current_dir()?;
        let config = Self::from_json_str(&text, &cwd)?;
        info!(
            path = %path.display(),
            methods = config.methods.len(),
            samples = config.samples.len(),
            "Configuration loaded"
        );
        Ok(config)
    }

    /// Check the structural invariants the rest of the crate relies on.
    pub fn validate(&self) -> Result<()> {
        if self.methods.is_empty() {
            return Err(JuxtaError::InvalidConfig("methods must not be empty".into()));
        }
        if self.samples.is_empty() {
            return Err(JuxtaError::InvalidConfig("samples must not be empty".into()));
        }
        let mut seen = HashSet::new();
        for method in &self.methods {
            if method.name.is_empty() {
                return Err(JuxtaError::InvalidConfig("method name must not be empty".into()));
            }
            if !seen.insert(method.name.as_str()) {
                return Err(JuxtaError::InvalidConfig(format!(
                    "duplicate method name '{}'",
                    method.name
                )));
            }
        }
        Ok(())
    }

    /// Build a configuration from a list of directories, one method per
    /// directory. Samples are the images found in the first directory; the
    /// same relative path is looked up in every other directory.
    pub fn from_folders(folders: &[PathBuf]) -> Result<Self> {
        let first = folders
            .first()
            .ok_or_else(|| JuxtaError::InvalidConfig("folder list is empty".into()))?;
        for folder in folders {
            if !folder.is_dir() {
                return Err(JuxtaError::InvalidConfig(format!(
                    "not a directory: {}",
                    folder.display()
                )));
            }
        }

        let relative = scan_images(first)?;
        if relative.is_empty() {
            return Err(JuxtaError::InvalidConfig(format!(
                "no images found in {}",
                first.display()
            )));
        }

        let methods: Vec<Method> = folders
            .iter()
            .enumerate()
            .map(|(i, folder)| Method {
                name: format!("Method {}", i + 1),
                description: Some(folder.display().to_string()),
            })
            .collect();

        let samples = relative
            .iter()
            .map(|rel| {
                let images: BTreeMap<String, Option<PathBuf>> = methods
                    .iter()
                    .zip(folders)
                    .map(|(m, folder)| (m.name.clone(), Some(folder.join(rel))))
                    .collect();
                Sample {
                    name: rel
                        .file_stem()
                        .map(|s| s.to_string_lossy().into_owned())
                        .unwrap_or_else(|| rel.display().to_string()),
                    text: None,
                    mask: None,
                    images,
                }
            })
            .collect();

        let config = Configuration {
            base_dir: PathBuf::new(),
            methods,
            samples,
        };
        config.validate()?;
        Ok(config)
    }
}

fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| IMAGE_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
}

/// Recursively collect image files under `root`, as sorted relative paths.
/// Symlinked directories are not descended into.
fn scan_images(root: &Path) -> Result<Vec<PathBuf>> {
    let mut found = Vec::new();
    for entry in WalkDir::new(root).follow_links(false) {
        let entry = entry.map_err(std::io::Error::from)?;
        let path = entry.path();
        if path.is_file() && is_image_file(path) {
            if let Ok(rel) = path.strip_prefix(root) {
                found.push(rel.to_path_buf());
            }
        }
    }
    found.sort();
    debug!(root = %root.display(), count = found.len(), "Scanned folder for images");
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_image_file_case_insensitive() {
        assert!(is_image_file(Path::new("a/b/photo.PNG")));
        assert!(is_image_file(Path::new("x.tiff")));
        assert!(!is_image_file(Path::new("notes.txt")));
        assert!(!is_image_file(Path::new("noext")));
    }
}
