//! Shared pieces of the `photos-ingest` command: logging setup, declared MIME
//! inference and report rendering.

use std::path::Path;

use photos_core::AssetRecord;
use photos_processing::Ingested;
use serde::Serialize;

/// Logs go to stderr so stdout stays parseable.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .compact()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn,photos=info")),
        )
        .init();
}

/// The MIME type a browser would declare for this file name.
pub fn declared_mime(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match extension.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}

/// Outcome for one input file
#[derive(Debug, Serialize)]
pub struct IngestReport {
    pub file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record: Option<AssetRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub derivative_key: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl IngestReport {
    pub fn ingested(path: &Path, ingested: &Ingested) -> Self {
        let mut warnings = Vec::new();
        if let Some(e) = &ingested.metadata_error {
            warnings.push(format!("metadata: {}", e));
        }
        if let Some(e) = &ingested.derivative_error {
            warnings.push(format!("derivative: {}", e));
        }

        Self {
            file: path.display().to_string(),
            record: Some(ingested.record.clone()),
            derivative_key: ingested.derivative_key.clone(),
            warnings,
            error: None,
        }
    }

    pub fn failed(path: &Path, error: &anyhow::Error) -> Self {
        Self {
            file: path.display().to_string(),
            record: None,
            derivative_key: None,
            warnings: Vec::new(),
            error: Some(format!("{:#}", error)),
        }
    }

    pub fn is_failure(&self) -> bool {
        self.error.is_some()
    }
}

pub fn print_table(reports: &[IngestReport]) {
    println!(
        "{:<32} {:<10} {:>10} {:>11} {:<20} {}",
        "FILE", "TYPE", "SIZE", "DIMENSIONS", "CAMERA", "STATUS"
    );

    for report in reports {
        let file = truncate(&report.file, 32);
        match &report.record {
            Some(record) => {
                let metadata = &record.metadata;
                let dimensions = match (metadata.width, metadata.height) {
                    (Some(w), Some(h)) => format!("{}x{}", w, h),
                    _ => "-".to_string(),
                };
                let camera = match (&metadata.camera_make, &metadata.camera_model) {
                    (Some(make), Some(model)) => format!("{} {}", make, model),
                    (Some(name), None) | (None, Some(name)) => name.clone(),
                    (None, None) => "-".to_string(),
                };
                let status = if report.warnings.is_empty() {
                    "ok".to_string()
                } else {
                    format!("degraded ({})", report.warnings.join("; "))
                };
                println!(
                    "{:<32} {:<10} {:>10} {:>11} {:<20} {}",
                    file,
                    record.mime_type,
                    record.size,
                    dimensions,
                    truncate(&camera, 20),
                    status
                );
            }
            None => {
                println!(
                    "{:<32} {:<10} {:>10} {:>11} {:<20} failed: {}",
                    file,
                    "-",
                    "-",
                    "-",
                    "-",
                    report.error.as_deref().unwrap_or("unknown error")
                );
            }
        }
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let kept: String = s.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", kept)
}
