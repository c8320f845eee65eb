use std::io::Cursor;
use std::path::Path;

use image::{ImageFormat, ImageReader};

use crate::config::IntakeConfig;
use crate::error::{IntakeError, Result};

/// A file picked by the user, read but not yet validated.
#[derive(Clone, Debug)]
pub struct ImageFile {
    pub name: String,
    pub bytes: Vec<u8>,
    /// Type guessed from the content or the extension, if any.
    pub mime_type: Option<String>,
}

/// Read a file from disk and guess its image type.
pub fn read_image_file(path: &Path) -> Result<ImageFile> {
    let bytes = std::fs::read(path)?;
    let mime_type = detect_mime(&bytes, Some(path));
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    tracing::debug!(
        file = %name,
        size = bytes.len(),
        mime = mime_type.as_deref().unwrap_or("unknown"),
        "Read image file"
    );

    Ok(ImageFile {
        name,
        bytes,
        mime_type,
    })
}

/// Sniff the image type from magic bytes, falling back to the file extension.
pub fn detect_mime(bytes: &[u8], path: Option<&Path>) -> Option<String> {
    image::guess_format(bytes)
        .ok()
        .or_else(|| path.and_then(|p| ImageFormat::from_path(p).ok()))
        .map(|format| format.to_mime_type().to_string())
}

/// Preferred file extension for an image MIME type.
pub fn extension_for_mime(mime: &str) -> Option<&'static str> {
    ImageFormat::from_mime_type(normalize_mime(mime))
        .and_then(|format| format.extensions_str().first().copied())
}

/// Pixel dimensions of an encoded image, read from its header.
pub fn probe_dimensions(bytes: &[u8]) -> Result<(u32, u32)> {
    let reader = ImageReader::new(Cursor::new(bytes)).with_guessed_format()?;
    Ok(reader.into_dimensions()?)
}

fn normalize_mime(mime: &str) -> String {
    mime.split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

/// Accepted image types and size limit applied at the file intake boundary.
#[derive(Clone, Debug)]
pub struct IntakePolicy {
    accepted: Vec<String>,
    max_bytes: usize,
}

impl Default for IntakePolicy {
    fn default() -> Self {
        Self::from(&IntakeConfig::default())
    }
}

impl From<&IntakeConfig> for IntakePolicy {
    fn from(config: &IntakeConfig) -> Self {
        Self {
            accepted: config
                .accepted_mime_types
                .iter()
                .map(|mime| normalize_mime(mime))
                .collect(),
            max_bytes: config.max_image_bytes,
        }
    }
}

impl IntakePolicy {
    pub fn accepts(&self, mime: &str) -> bool {
        let mime = normalize_mime(mime);
        self.accepted.iter().any(|accepted| *accepted == mime)
    }

    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    /// File extensions for the accepted types, for file picker filters.
    pub fn accepted_extensions(&self) -> Vec<&'static str> {
        self.accepted
            .iter()
            .filter_map(|mime| ImageFormat::from_mime_type(mime))
            .flat_map(|format| format.extensions_str().iter().copied())
            .collect()
    }

    /// Validate image content and return the MIME type it will be stored under.
    ///
    /// The sniffed content type wins over `declared_mime`; the declared type is
    /// only used when the content is not recognized.
    pub fn check(
        &self,
        bytes: &[u8],
        declared_mime: Option<&str>,
    ) -> std::result::Result<String, IntakeError> {
        if bytes.is_empty() {
            return Err(IntakeError::Empty);
        }
        if bytes.len() > self.max_bytes {
            return Err(IntakeError::TooLarge {
                size: bytes.len(),
                limit: self.max_bytes,
            });
        }

        let mime = detect_mime(bytes, None)
            .or_else(|| declared_mime.map(normalize_mime))
            .filter(|mime| !mime.is_empty())
            .ok_or(IntakeError::Unrecognized)?;

        if !self.accepts(&mime) {
            return Err(IntakeError::UnsupportedType { mime });
        }
        Ok(mime)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_mime_strips_parameters_and_case() {
        assert_eq!(normalize_mime(" Image/PNG; charset=binary"), "image/png");
        assert_eq!(normalize_mime("image/webp"), "image/webp");
    }
}
