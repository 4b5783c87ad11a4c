mod loader;
mod options;

use std::collections::hash_map::DefaultHasher;
use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub use options::{DisplayOptions, MaskOptions};

/// One comparable image-generation variant, shown as one column.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Method {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Method {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
        }
    }
}

/// One test case, shown as one row with one image per method.
///
/// `images[method]` may be `null` or absent; both render as a placeholder.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Sample {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mask: Option<PathBuf>,
    #[serde(default)]
    pub images: BTreeMap<String, Option<PathBuf>>,
}

impl Sample {
    /// Raw (unresolved) path of this sample's image for `method`.
    pub fn image(&self, method: &str) -> Option<&Path> {
        self.images.get(method).and_then(|p| p.as_deref())
    }
}

/// A validated comparison set: methods (columns) and samples (rows).
///
/// Methods are assumed to be pixel-aligned within a sample: a crop box
/// drawn on one method's image is reapplied verbatim to the others, so
/// images of different native resolution produce misaligned close views.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Configuration {
    #[serde(default)]
    pub base_dir: PathBuf,
    pub methods: Vec<Method>,
    pub samples: Vec<Sample>,
}

impl Configuration {
    /// Resolve a sample-relative path against `base_dir`.
    /// Absolute paths and an empty `base_dir` leave the path untouched.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() || self.base_dir.as_os_str().is_empty() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }

    /// True when `path` (relative or absolute) names an existing file.
    pub fn exists(&self, path: &Path) -> bool {
        self.resolve(path).is_file()
    }

    pub fn sample(&self, index: usize) -> crate::error::Result<&Sample> {
        self.samples
            .get(index)
            .ok_or(crate::error::JuxtaError::SampleOutOfRange {
                index,
                total: self.samples.len(),
            })
    }

    /// Resolved path of a sample's image for `method`, if one is listed.
    pub fn image_path(&self, sample: &Sample, method: &str) -> Option<PathBuf> {
        sample.image(method).map(|p| self.resolve(p))
    }

    /// Resolved path of a sample's image for `method`, only if the file exists.
    pub fn existing_image(&self, sample: &Sample, method: &str) -> Option<PathBuf> {
        sample
            .image(method)
            .filter(|p| self.exists(p))
            .map(|p| self.resolve(p))
    }

    /// Resolved mask path of a sample, only if the file exists.
    pub fn existing_mask(&self, sample: &Sample) -> Option<PathBuf> {
        sample
            .mask
            .as_deref()
            .filter(|p| self.exists(p))
            .map(|p| self.resolve(p))
    }

    /// Methods passing the visibility filter, in configuration order.
    /// `None` selects every method.
    pub fn visible_methods(&self, filter: Option<&[String]>) -> Vec<&Method> {
        self.methods
            .iter()
            .filter(|m| filter.is_none_or(|names| names.iter().any(|n| n == &m.name)))
            .collect()
    }

    /// Methods of `sample` whose image file exists, in configuration order.
    pub fn methods_with_images(&self, sample: &Sample) -> Vec<&Method> {
        self.methods
            .iter()
            .filter(|m| self.existing_image(sample, &m.name).is_some())
            .collect()
    }

    /// Whether any sample references an existing mask file.
    pub fn masks_available(&self) -> bool {
        self.samples.iter().any(|s| self.existing_mask(s).is_some())
    }

    /// Content identity used to detect that the active configuration changed.
    pub fn content_hash(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.hash(&mut hasher);
        hasher.finish()
    }
}
