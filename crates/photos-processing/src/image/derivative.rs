use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, ImageReader, Rgb, RgbImage, Rgba};

use super::resize::{target_dimensions, Breakpoint};
use crate::error::DerivativeError;

/// A rendered derivative, always baseline JPEG
#[derive(Debug, Clone)]
pub struct Derivative {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl Derivative {
    pub const CONTENT_TYPE: &'static str = "image/jpeg";
}

/// Produces downscaled, recompressed copies of an original.
#[derive(Debug, Clone)]
pub struct DerivativeGenerator {
    target_width: u32,
    quality: u8,
}

impl DerivativeGenerator {
    pub fn new(target_width: u32, quality: u8) -> Self {
        Self {
            target_width,
            quality: quality.clamp(1, 100),
        }
    }

    pub fn for_breakpoint(breakpoint: Breakpoint, quality: u8) -> Self {
        Self::new(breakpoint.width(), quality)
    }

    pub fn target_width(&self) -> u32 {
        self.target_width
    }

    pub fn quality(&self) -> u8 {
        self.quality
    }

    /// Decode, downscale with Lanczos3 and re-encode as JPEG.
    ///
    /// CPU bound: callers on an async runtime should run this on a blocking
    /// thread.
    pub fn render(&self, data: &[u8]) -> Result<Derivative, DerivativeError> {
        let img = ImageReader::new(Cursor::new(data))
            .with_guessed_format()
            .map_err(|e| DerivativeError::Decode(e.to_string()))?
            .decode()
            .map_err(|e| DerivativeError::Decode(e.to_string()))?;

        let (orig_width, orig_height) = img.dimensions();
        let (width, height) = target_dimensions(orig_width, orig_height, self.target_width);

        let resized = if (width, height) == (orig_width, orig_height) {
            img
        } else {
            img.resize_exact(width, height, FilterType::Lanczos3)
        };

        let rgb = flatten_alpha(resized);

        let mut buffer = Vec::with_capacity((width as usize) * (height as usize) / 4);
        let encoder = JpegEncoder::new_with_quality(&mut buffer, self.quality);
        DynamicImage::ImageRgb8(rgb)
            .write_with_encoder(encoder)
            .map_err(|e| DerivativeError::Encode(e.to_string()))?;

        tracing::debug!(
            original_width = orig_width,
            original_height = orig_height,
            width = width,
            height = height,
            quality = self.quality,
            size_bytes = buffer.len(),
            "Derivative rendered"
        );

        Ok(Derivative {
            data: buffer,
            width,
            height,
        })
    }
}

impl Default for DerivativeGenerator {
    fn default() -> Self {
        Self::for_breakpoint(Breakpoint::Display, 75)
    }
}

/// Composite transparent pixels onto white.
fn flatten_alpha(img: DynamicImage) -> RgbImage {
    if !img.color().has_alpha() {
        return img.into_rgb8();
    }

    let rgba = img.into_rgba8();
    RgbImage::from_fn(rgba.width(), rgba.height(), |x, y| {
        let Rgba([r, g, b, a]) = *rgba.get_pixel(x, y);
        let alpha = u32::from(a);
        let blend = |c: u8| ((u32::from(c) * alpha + 255 * (255 - alpha) + 127) / 255) as u8;
        Rgb([blend(r), blend(g), blend(b)])
    })
}
