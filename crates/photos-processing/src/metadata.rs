//! Metadata extractor
//!
//! Reads the EXIF block of a JPEG or PNG container into an [`AssetMetadata`].
//! Only a missing or undecodable block is an error; every individual tag
//! that is absent or malformed resolves to `None` on its own.

use std::io::Cursor;

use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone, Utc};
use exif::{Exif, In, Reader, Tag, Value};
use photos_core::{AssetMetadata, GeoPoint};

use crate::error::MetadataError;
use crate::rational::{exposure_display, normalize, parse_fraction};

/// Timestamp tags in order of preference, each with its offset companion.
const TIMESTAMP_TAGS: [(Tag, Tag); 3] = [
    (Tag::DateTimeOriginal, Tag::OffsetTimeOriginal),
    (Tag::DateTimeDigitized, Tag::OffsetTimeDigitized),
    (Tag::DateTime, Tag::OffsetTime),
];

/// Extract camera metadata from an image container.
pub fn extract(data: &[u8]) -> Result<AssetMetadata, MetadataError> {
    let exif = read_exif(data)?;
    Ok(from_exif(&exif))
}

fn read_exif(data: &[u8]) -> Result<Exif, MetadataError> {
    let mut reader = Reader::new();
    reader.continue_on_error(true);

    let mut cursor = Cursor::new(data);
    match reader.read_from_container(&mut cursor) {
        Ok(exif) => Ok(exif),
        Err(exif::Error::PartialResult(partial)) => {
            let (exif, errors) = partial.into_inner();
            tracing::debug!(
                error_count = errors.len(),
                "Metadata block partially decoded, keeping readable tags"
            );
            Ok(exif)
        }
        Err(e) => Err(e.into()),
    }
}

fn from_exif(exif: &Exif) -> AssetMetadata {
    let value = |tag: Tag| exif.get_field(tag, In::PRIMARY).map(|f| &f.value);
    let uint = |tag: Tag| value(tag).and_then(|v| v.get_uint(0));

    // Width and height come from the same source or not at all
    let (width, height) = match (uint(Tag::PixelXDimension), uint(Tag::PixelYDimension)) {
        (Some(w), Some(h)) if w > 0 && h > 0 => (Some(w), Some(h)),
        _ => (None, None),
    };

    let exposure_time = value(Tag::ExposureTime)
        .and_then(first_rational)
        .and_then(|(n, d)| exposure_display(n, d));

    let orientation = uint(Tag::Orientation)
        .filter(|o| (1..=8).contains(o))
        .and_then(|o| u16::try_from(o).ok());

    let captured_at = TIMESTAMP_TAGS.iter().find_map(|(tag, offset_tag)| {
        parse_timestamp(value(*tag)?, value(*offset_tag))
    });

    let location = gps_location(
        value(Tag::GPSLatitude),
        value(Tag::GPSLatitudeRef),
        value(Tag::GPSLongitude),
        value(Tag::GPSLongitudeRef),
    );

    AssetMetadata {
        captured_at,
        width,
        height,
        f_number: value(Tag::FNumber).and_then(decimal),
        exposure_time,
        focal_length: value(Tag::FocalLength).and_then(decimal),
        iso: uint(Tag::PhotographicSensitivity),
        camera_make: value(Tag::Make).and_then(text),
        camera_model: value(Tag::Model).and_then(text),
        orientation,
        location,
    }
}

fn first_ascii(value: &Value) -> Option<&[u8]> {
    match value {
        Value::Ascii(parts) => parts.first().map(Vec::as_slice),
        _ => None,
    }
}

/// First element of a rational tag. Some writers store rationals as text.
fn first_rational(value: &Value) -> Option<(i64, i64)> {
    match value {
        Value::Rational(parts) => parts
            .first()
            .map(|r| (i64::from(r.num), i64::from(r.denom))),
        Value::SRational(parts) => parts
            .first()
            .map(|r| (i64::from(r.num), i64::from(r.denom))),
        Value::Ascii(_) => first_ascii(value)
            .and_then(|raw| std::str::from_utf8(raw).ok())
            .and_then(parse_fraction),
        _ => None,
    }
}

fn decimal(value: &Value) -> Option<f64> {
    let (num, den) = first_rational(value)?;
    normalize(num, den)
}

fn text(value: &Value) -> Option<String> {
    let raw = first_ascii(value)?;
    let s = String::from_utf8_lossy(raw);
    let s = s.trim_matches(|c: char| c == '\0' || c.is_whitespace());
    (!s.is_empty()).then(|| s.to_string())
}

fn parse_timestamp(value: &Value, offset: Option<&Value>) -> Option<DateTime<Utc>> {
    let mut dt = exif::DateTime::from_ascii(first_ascii(value)?).ok()?;
    if let Some(raw) = offset.and_then(first_ascii) {
        // An unreadable offset leaves the wall clock to be taken as UTC
        if dt.parse_offset(raw).is_err() {
            dt.offset = None;
        }
    }

    let naive = NaiveDate::from_ymd_opt(i32::from(dt.year), u32::from(dt.month), u32::from(dt.day))?
        .and_hms_nano_opt(
            u32::from(dt.hour),
            u32::from(dt.minute),
            u32::from(dt.second),
            dt.nanosecond.unwrap_or(0),
        )?;

    match dt.offset {
        Some(minutes) => FixedOffset::east_opt(i32::from(minutes) * 60)?
            .from_local_datetime(&naive)
            .single()
            .map(|t| t.with_timezone(&Utc)),
        None => Some(Utc.from_utc_datetime(&naive)),
    }
}

/// Degrees, minutes and seconds to decimal degrees.
fn dms_to_decimal(value: &Value) -> Option<f64> {
    let parts = match value {
        Value::Rational(parts) if !parts.is_empty() => parts,
        _ => return None,
    };

    let mut total = 0.0;
    for (part, scale) in parts.iter().zip([1.0, 60.0, 3600.0]) {
        total += normalize(i64::from(part.num), i64::from(part.denom))? / scale;
    }
    Some(total)
}

/// -1 for the southern/western hemisphere, +1 otherwise (including a missing ref).
fn hemisphere_sign(reference: Option<&Value>, negative: u8) -> f64 {
    match reference.and_then(first_ascii).and_then(|r| r.first()) {
        Some(c) if c.eq_ignore_ascii_case(&negative) => -1.0,
        _ => 1.0,
    }
}

fn gps_location(
    latitude: Option<&Value>,
    latitude_ref: Option<&Value>,
    longitude: Option<&Value>,
    longitude_ref: Option<&Value>,
) -> Option<GeoPoint> {
    let latitude = dms_to_decimal(latitude?)? * hemisphere_sign(latitude_ref, b'S');
    let longitude = dms_to_decimal(longitude?)? * hemisphere_sign(longitude_ref, b'W');

    if latitude.abs() > 90.0 || longitude.abs() > 180.0 {
        return None;
    }

    Some(GeoPoint {
        latitude,
        longitude,
    })
}
