use thiserror::Error;

#[derive(Error, Debug)]
pub enum JuxtaError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image format error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid crop: {0}")]
    InvalidCrop(String),

    #[error("Sample index {index} out of range (total: {total})")]
    SampleOutOfRange { index: usize, total: usize },

    #[error("Sample '{sample}' has no image that can be used as a crop reference")]
    NoReferenceImage { sample: String },

    #[error("Sample {sample} already holds the maximum of {max} close views")]
    CropCapacity { sample: usize, max: usize },

    #[error("Crop editor is not active")]
    EditorIdle,

    #[error("Failed to build close view for method '{method}': {reason}")]
    CropSave { method: String, reason: String },

    #[error("PDF error: {0}")]
    Pdf(String),
}

pub type Result<T> = std::result::Result<T, JuxtaError>;
