//! Image intake and validation

use crate::encoder::read_as_data_url;
use digit_types::{Error, Result};
use image::ImageFormat;
use std::fs;
use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, warn};

/// Informal upload size guidance. Not enforced; larger files only log a warning.
pub const RECOMMENDED_MAX_BYTES: usize = 10 * 1024 * 1024;

/// Non-image extensions we still want to report with a meaningful MIME type
const OTHER_MIME_TYPES: &[(&str, &str)] = &[
    ("txt", "text/plain"),
    ("csv", "text/csv"),
    ("html", "text/html"),
    ("htm", "text/html"),
    ("json", "application/json"),
    ("pdf", "application/pdf"),
];

/// Guess the declared MIME type of a file from its extension
pub fn mime_for_path(path: &Path) -> String {
    if let Ok(format) = ImageFormat::from_path(path) {
        return format.to_mime_type().to_string();
    }

    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
        .unwrap_or_default();

    OTHER_MIME_TYPES
        .iter()
        .find(|(e, _)| *e == ext)
        .map(|(_, mime)| mime.to_string())
        .unwrap_or_else(|| "application/octet-stream".to_string())
}

fn is_image_mime(mime_type: &str) -> bool {
    mime_type.trim().to_ascii_lowercase().starts_with("image/")
}

/// A user-selected image held in memory for the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedImage {
    file_name: String,
    mime_type: String,
    bytes: Arc<[u8]>,
}

impl UploadedImage {
    /// Accept a file with a declared MIME type.
    ///
    /// Anything outside the `image/*` family is rejected. Empty files are
    /// accepted and left for the remote service to judge.
    pub fn accept(
        file_name: impl Into<String>,
        mime_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Result<Self> {
        let file_name = file_name.into();
        let mime_type = mime_type.into();

        if !is_image_mime(&mime_type) {
            return Err(Error::InvalidType(mime_type));
        }

        if bytes.len() > RECOMMENDED_MAX_BYTES {
            warn!(
                file = %file_name,
                size = bytes.len(),
                "image is larger than the recommended 10MB"
            );
        }
        debug!(file = %file_name, mime = %mime_type, size = bytes.len(), "accepted image");

        Ok(Self {
            file_name,
            mime_type: mime_type.trim().to_string(),
            bytes: bytes.into(),
        })
    }

    /// Load an image from disk.
    ///
    /// The MIME type is `declared_mime` when given, otherwise derived from the
    /// extension. The type is checked before the file contents are read.
    pub fn open(path: &Path, declared_mime: Option<&str>) -> Result<Self> {
        if !path.is_file() {
            return Err(Error::FileNotFound(path.display().to_string()));
        }

        let mime_type = match declared_mime {
            Some(mime) => mime.to_string(),
            None => mime_for_path(path),
        };
        if !is_image_mime(&mime_type) {
            return Err(Error::InvalidType(mime_type));
        }

        let bytes = fs::read(path)?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        Self::accept(file_name, mime_type, bytes)
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Shared handle to the bytes, for handing to renderers and worker threads
    pub fn shared_bytes(&self) -> Arc<[u8]> {
        Arc::clone(&self.bytes)
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Pixel size, if the bytes decode as a known image format
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        image::ImageReader::new(Cursor::new(self.bytes()))
            .with_guessed_format()
            .ok()?
            .into_dimensions()
            .ok()
    }
}

/// Data-URL preview of the current image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preview {
    data_url: String,
}

impl Preview {
    pub fn from_image(image: &UploadedImage) -> Self {
        Self {
            data_url: read_as_data_url(image),
        }
    }

    pub fn data_url(&self) -> &str {
        &self.data_url
    }
}
