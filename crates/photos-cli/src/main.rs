//! photos-ingest: run image files through the ingestion pipeline.
//!
//! Storage is configured through the environment (`STORAGE_BACKEND`,
//! `LOCAL_STORAGE_PATH`, ...). Records are registered in an in-memory catalog
//! and printed.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use photos_cli::{declared_mime, init_tracing, print_table, IngestReport};
use photos_core::{InMemoryCatalog, IngestConfig, RawUpload};
use photos_processing::Ingestor;
use photos_storage::create_storage;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Table,
}

#[derive(Parser, Debug)]
#[command(name = "photos-ingest")]
#[command(about = "Ingest photographs: store originals, render derivatives, extract metadata")]
struct Args {
    /// Uploader identity (random when omitted)
    #[arg(long, value_name = "UUID")]
    uploader: Option<Uuid>,

    /// Output format
    #[arg(long, value_enum, default_value = "table")]
    format: OutputFormat,

    /// Image files to ingest
    #[arg(required = true)]
    files: Vec<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let args = Args::parse();

    let config = IngestConfig::from_env().context("Failed to load configuration")?;
    let storage = create_storage(&config)
        .await
        .context("Failed to initialize storage")?;
    tracing::info!(backend = %storage.backend_type(), "Storage ready");

    let ingestor = Ingestor::new(storage, &config);
    let catalog = InMemoryCatalog::new();
    let uploader = args.uploader.unwrap_or_else(Uuid::new_v4);

    let mut reports = Vec::with_capacity(args.files.len());
    for path in &args.files {
        let report = match ingest_file(&ingestor, &catalog, path, uploader).await {
            Ok(report) => report,
            Err(e) => IngestReport::failed(path, &e),
        };
        reports.push(report);
    }

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&reports)?),
        OutputFormat::Table => print_table(&reports),
    }

    let failures = reports.iter().filter(|r| r.is_failure()).count();
    if failures > 0 {
        anyhow::bail!("{} of {} files failed", failures, reports.len());
    }

    Ok(())
}

async fn ingest_file(
    ingestor: &Ingestor,
    catalog: &InMemoryCatalog,
    path: &Path,
    uploader: Uuid,
) -> Result<IngestReport> {
    let data = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let filename = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();
    let upload = RawUpload::new(data, declared_mime(path), filename, uploader);

    let ingested = ingestor.ingest(upload).await?;
    let registered = ingestor.register(ingested, catalog).await?;

    Ok(IngestReport::ingested(path, &registered))
}
