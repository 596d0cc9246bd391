//! Test fixtures: synthetic JPEG/PNG bytes, optionally carrying an EXIF block.

use std::io::Cursor;

use bytes::Bytes;
use exif::experimental::Writer;
use exif::{Field, In, Rational, Tag, Value};
use image::{DynamicImage, ImageFormat, RgbImage, RgbaImage};
use img_parts::jpeg::Jpeg;
use img_parts::png::Png;
use img_parts::ImageEXIF;

/// Eiffel Tower, 48°51'29.64"N 2°17'40.08"E
pub const FIXTURE_LATITUDE: f64 = 48.858233;
pub const FIXTURE_LONGITUDE: f64 = 2.294467;

fn encode(img: DynamicImage, format: ImageFormat) -> Vec<u8> {
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, format)
        .expect("Failed to encode fixture image");
    buf.into_inner()
}

/// Gradient so the encoder has something to compress.
fn gradient(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
    })
}

pub fn create_test_jpeg(width: u32, height: u32) -> Vec<u8> {
    encode(DynamicImage::ImageRgb8(gradient(width, height)), ImageFormat::Jpeg)
}

pub fn create_test_png(width: u32, height: u32) -> Vec<u8> {
    encode(DynamicImage::ImageRgb8(gradient(width, height)), ImageFormat::Png)
}

pub fn create_transparent_png(width: u32, height: u32) -> Vec<u8> {
    encode(
        DynamicImage::ImageRgba8(RgbaImage::new(width, height)),
        ImageFormat::Png,
    )
}

/// JPEG magic followed by junk: sniffs as JPEG but cannot be decoded.
pub fn create_truncated_jpeg() -> Vec<u8> {
    let mut data = vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10];
    data.extend_from_slice(b"JFIF\0 truncated before any scan data");
    data
}

pub fn field(tag: Tag, value: Value) -> Field {
    Field {
        tag,
        ifd_num: In::PRIMARY,
        value,
    }
}

pub fn ascii(s: &str) -> Value {
    Value::Ascii(vec![s.as_bytes().to_vec()])
}

pub fn rationals(parts: &[(u32, u32)]) -> Value {
    Value::Rational(parts.iter().map(|&p| Rational::from(p)).collect())
}

/// Camera fields of a typical phone shot: 1024x768 declared, GPS fix,
/// f/2.8, 1/125s, 4.2mm, ISO 100.
pub fn camera_fields() -> Vec<Field> {
    vec![
        field(Tag::Make, ascii("Acme")),
        field(Tag::Model, ascii("Pocket 3 ")),
        field(Tag::Orientation, Value::Short(vec![1])),
        field(Tag::DateTimeOriginal, ascii("2021:06:15 14:30:05")),
        field(Tag::OffsetTimeOriginal, ascii("+02:00")),
        field(Tag::FNumber, rationals(&[(28, 10)])),
        field(Tag::ExposureTime, rationals(&[(1, 125)])),
        field(Tag::FocalLength, rationals(&[(42, 10)])),
        field(Tag::PhotographicSensitivity, Value::Short(vec![100])),
        field(Tag::PixelXDimension, Value::Long(vec![1024])),
        field(Tag::PixelYDimension, Value::Long(vec![768])),
        field(Tag::GPSLatitudeRef, ascii("N")),
        field(Tag::GPSLatitude, rationals(&[(48, 1), (51, 1), (2964, 100)])),
        field(Tag::GPSLongitudeRef, ascii("E")),
        field(Tag::GPSLongitude, rationals(&[(2, 1), (17, 1), (4008, 100)])),
    ]
}

/// Serialize `fields` as a TIFF-structured EXIF block.
pub fn exif_block(fields: &[Field]) -> Vec<u8> {
    let mut writer = Writer::new();
    for f in fields {
        writer.push_field(f);
    }
    let mut buf = Cursor::new(Vec::new());
    writer
        .write(&mut buf, false)
        .expect("Failed to write EXIF block");
    buf.into_inner()
}

/// A `width` x `height` JPEG carrying an EXIF block made of `fields`.
pub fn create_jpeg_with_exif(width: u32, height: u32, fields: &[Field]) -> Vec<u8> {
    let mut jpeg = Jpeg::from_bytes(Bytes::from(create_test_jpeg(width, height)))
        .expect("Fixture JPEG should parse");
    jpeg.set_exif(Some(Bytes::from(exif_block(fields))));
    jpeg.encoder().bytes().to_vec()
}

/// A `width` x `height` PNG with `fields` in an `eXIf` chunk.
pub fn create_png_with_exif(width: u32, height: u32, fields: &[Field]) -> Vec<u8> {
    let mut png = Png::from_bytes(Bytes::from(create_test_png(width, height)))
        .expect("Fixture PNG should parse");
    png.set_exif(Some(Bytes::from(exif_block(fields))));
    png.encoder().bytes().to_vec()
}
