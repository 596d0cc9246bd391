use image::ImageReader;
use std::io::Cursor;

pub struct ImageProcessor;

impl ImageProcessor {
    /// Pixel dimensions from the container header, without decoding pixels.
    pub fn get_dimensions(data: &[u8]) -> Option<(u32, u32)> {
        let reader = ImageReader::new(Cursor::new(data))
            .with_guessed_format()
            .ok()?;
        let (width, height) = reader.into_dimensions().ok()?;
        (width > 0 && height > 0).then_some((width, height))
    }
}
