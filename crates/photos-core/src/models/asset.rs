use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A GPS fix. Latitude and longitude are only ever present together.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

/// Camera metadata extracted from a photograph.
///
/// Every field is independently optional: a present metadata block does not
/// guarantee any individual tag is present or well-formed. Width and height,
/// when set, are positive.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssetMetadata {
    pub captured_at: Option<DateTime<Utc>>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub f_number: Option<f64>,
    /// Display form, e.g. "1/125"
    pub exposure_time: Option<String>,
    /// Millimetres
    pub focal_length: Option<f64>,
    pub iso: Option<u32>,
    pub camera_make: Option<String>,
    pub camera_model: Option<String>,
    pub orientation: Option<u16>,
    #[serde(flatten)]
    pub location: Option<GeoPoint>,
}

impl AssetMetadata {
    pub fn latitude(&self) -> Option<f64> {
        self.location.map(|p| p.latitude)
    }

    pub fn longitude(&self) -> Option<f64> {
        self.location.map(|p| p.longitude)
    }

    /// True when no field carries a value.
    pub fn is_empty(&self) -> bool {
        *self == AssetMetadata::default()
    }
}

/// The unit handed to the catalog after a successful ingestion.
///
/// `id` is assigned by the catalog, never by the pipeline. `hash` is the
/// opaque storage identifier of the original; the derivative lives under the
/// same identifier with a fixed suffix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetRecord {
    pub id: Option<Uuid>,
    pub owner: Uuid,
    pub name: String,
    pub hash: String,
    pub size: u64,
    pub extension: String,
    pub mime_type: String,
    pub metadata: AssetMetadata,
}
