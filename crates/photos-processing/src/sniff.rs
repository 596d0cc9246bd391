//! Type sniffer
//!
//! Detects the container format from the leading bytes. The MIME type a
//! client declares is never consulted here.

use image::ImageFormat;

/// Container format detected from magic bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetectedKind {
    format: ImageFormat,
}

impl DetectedKind {
    pub fn format(&self) -> ImageFormat {
        self.format
    }

    /// Canonical file extension, e.g. "jpg"
    pub fn extension(&self) -> &'static str {
        self.format
            .extensions_str()
            .first()
            .copied()
            .unwrap_or("bin")
    }

    /// Canonical MIME type, e.g. "image/jpeg"
    pub fn mime_type(&self) -> &'static str {
        self.format.to_mime_type()
    }

    /// Only JPEG and PNG are accepted for ingestion.
    pub fn is_supported(&self) -> bool {
        matches!(self.format, ImageFormat::Jpeg | ImageFormat::Png)
    }
}

/// Inspect the leading bytes of `data`. Returns `None` for unknown content.
pub fn sniff(data: &[u8]) -> Option<DetectedKind> {
    image::guess_format(data)
        .ok()
        .map(|format| DetectedKind { format })
}
