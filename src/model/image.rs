//! Embedded image assets.

use serde::{Deserialize, Serialize};

/// An image extracted from the document's binary data storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    /// Asset id (storage name without extension, e.g. "BIN0001")
    pub id: String,

    /// Raw binary data
    #[serde(skip_serializing, default)]
    pub data: Vec<u8>,

    /// Format tag taken from the storage extension (e.g. "png", "jpg")
    pub format: String,

    /// Alternative text
    pub alt_text: String,

    /// Natural-language description supplied by an image describer
    pub description: Option<String>,
}

impl Image {
    /// Create a new image.
    pub fn new(id: impl Into<String>, data: Vec<u8>, format: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            data,
            format: format.into().to_lowercase(),
            alt_text: String::new(),
            description: None,
        }
    }

    /// Set alternative text.
    pub fn with_alt_text(mut self, alt_text: impl Into<String>) -> Self {
        self.alt_text = alt_text.into();
        self
    }

    /// Set description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Get the size of the image data in bytes.
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// MIME type for the format tag.
    ///
    /// Metafile formats (WMF/EMF) have no image MIME type and return `None`.
    pub fn mime_type(&self) -> Option<&'static str> {
        mime_for_format(&self.format)
    }

    /// Get a suggested filename based on id and format.
    pub fn suggested_filename(&self) -> String {
        format!("{}.{}", self.id, self.format)
    }
}

/// Storage extensions recognized as images.
pub const IMAGE_FORMATS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "bmp", "tif", "tiff", "wmf", "emf",
];

/// Check if a storage extension is a recognized image format.
pub fn is_image_format(format: &str) -> bool {
    let lower = format.to_lowercase();
    IMAGE_FORMATS.contains(&lower.as_str())
}

/// Map a format tag to its MIME type.
pub fn mime_for_format(format: &str) -> Option<&'static str> {
    match format.to_lowercase().as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "bmp" => Some("image/bmp"),
        "tif" | "tiff" => Some("image/tiff"),
        "webp" => Some("image/webp"),
        _ => None,
    }
}
