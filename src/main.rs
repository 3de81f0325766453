use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use etymology_chain::{
    ChainExtractor, CoordinateDataset, DatasetError, Document, EtymapConfig, Outcome,
    PendingLanguageSet, resolve_path, telemetry,
};
use tracing::{Level, info, warn};
use tracing_subscriber::{Layer, filter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

mod report;

use report::Report;

/// Trace a word's etymology and the coordinates of each ancestor language.
#[derive(Debug, Parser)]
#[command(name = "etymap", version)]
struct Cli {
    /// Structured page (JSON: headings, paragraphs, language mentions).
    #[arg(long)]
    document: PathBuf,

    /// Language section to read; the first etymology on the page when omitted.
    #[arg(long)]
    language: Option<String>,

    /// Word the page describes, used for the source URL and map title.
    #[arg(long)]
    word: Option<String>,

    /// Print the report as JSON instead of text.
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    // .env is optional; a present but broken one is an error.
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            return Err(e).context("failed to load .env");
        }
    }

    init_tracing();

    let cli = Cli::parse();
    let cfg = EtymapConfig::from_env().context("invalid configuration")?;

    let dataset = CoordinateDataset::load(&cfg.coords_csv, cfg.csv_headers)
        .with_context(|| format!("loading {}", cfg.coords_csv.display()))?;
    let pending = load_pending(&cfg)?;

    let document = Document::load(&cli.document)
        .with_context(|| format!("reading document {}", cli.document.display()))?;

    let extractor = ChainExtractor::new(&dataset, &pending, &cfg.extractor);
    let result = extractor.extract(&document, cli.language.as_deref());
    let outcome = Outcome::from_extraction(&result);

    let path = match &result {
        Ok(r) if outcome.is_mappable() => Some(resolve_path(&r.chain, &dataset)),
        _ => None,
    };

    let report = Report::build(
        cli.word.as_deref(),
        cli.language.as_deref(),
        &outcome,
        result.as_ref().ok(),
        path.as_ref(),
    );
    info!(mappable = outcome.is_mappable(), "request finished");

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        report.print();
    }

    Ok(())
}

fn init_tracing() {
    let app_layer = fmt::layer()
        .compact()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(filter::filter_fn(|meta| meta.target().starts_with("etymap")));

    tracing_subscriber::registry()
        .with(telemetry::env_filter_or("warn,etymap=info", Level::INFO))
        .with(telemetry::layer())
        .with(app_layer)
        .init();
}

/// The pending list only changes messaging, so a missing file is tolerated.
fn load_pending(cfg: &EtymapConfig) -> Result<PendingLanguageSet> {
    match PendingLanguageSet::load(&cfg.pending_csv, cfg.csv_headers) {
        Ok(set) => Ok(set),
        Err(DatasetError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
            warn!(path = %cfg.pending_csv.display(), "pending language file not found; continuing without it");
            Ok(PendingLanguageSet::default())
        }
        Err(e) => Err(e).with_context(|| format!("loading {}", cfg.pending_csv.display())),
    }
}
