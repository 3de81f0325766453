//! Etymology chain extraction.
//!
//! Turns the etymology prose of a structured dictionary page ("From Old French,
//! from Latin ...") into an ordered, deduplicated chain of origin languages
//! that all have coordinates, then resolves that chain to map legs.
//!
//! Pipeline:
//! 1. [`locate`]: language section and its etymology subsection
//! 2. [`walker`]: paragraphs → raw chain, using the [`classify`] rules
//! 3. [`filter`]: drop languages without coordinates, note pending ones
//! 4. [`path`]: chain → coordinate legs
//!
//! Datasets are loaded once and shared read-only; extraction itself is pure
//! and keeps no state between calls.

pub mod chain;
pub mod classify;
pub mod config;
pub mod dataset;
pub mod document;
mod errors;
pub mod extract;
pub mod filter;
pub mod locate;
pub mod messages;
pub mod path;
pub mod telemetry;
pub mod walker;

pub use chain::{ChainExtractionResult, EtymologyChain};
pub use config::{EtymapConfig, ExtractorConfig, StopRuleMode};
pub use dataset::{CoordinateDataset, Coordinates, PendingLanguageSet};
pub use document::{Document, DocumentBuilder, DocumentModel, HeadingRank, Mention, Paragraph};
pub use errors::{ConfigError, DatasetError, EtymapError, ExtractError, PathError, Result};
pub use extract::ChainExtractor;
pub use messages::Outcome;
pub use path::{EtymologyPath, resolve_path};

/// Runs extraction with the default classifier options.
///
/// # Errors
/// See [`ChainExtractor::extract`].
pub fn extract<D>(
    document: &D,
    target: Option<&str>,
    dataset: &CoordinateDataset,
    pending: &PendingLanguageSet,
) -> std::result::Result<ChainExtractionResult, ExtractError>
where
    D: DocumentModel + ?Sized,
{
    let cfg = ExtractorConfig::default();
    ChainExtractor::new(dataset, pending, &cfg).extract(document, target)
}
