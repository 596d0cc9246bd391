//! Data models for the ingestion pipeline

mod asset;
mod upload;

pub use asset::*;
pub use upload::*;
