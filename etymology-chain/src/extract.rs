//! Chain extractor: locate → walk → filter.

use tracing::{info, instrument};

use crate::chain::ChainExtractionResult;
use crate::config::ExtractorConfig;
use crate::dataset::{CoordinateDataset, PendingLanguageSet};
use crate::document::DocumentModel;
use crate::errors::ExtractError;
use crate::filter::filter_chain;
use crate::locate::locate;
use crate::walker::walk;

/// Stateless extractor bound to the process-wide datasets.
///
/// Holds only shared references; one instance can serve any number of
/// sequential requests.
#[derive(Debug, Clone, Copy)]
pub struct ChainExtractor<'a> {
    dataset: &'a CoordinateDataset,
    pending: &'a PendingLanguageSet,
    config: &'a ExtractorConfig,
}

impl<'a> ChainExtractor<'a> {
    pub fn new(
        dataset: &'a CoordinateDataset,
        pending: &'a PendingLanguageSet,
        config: &'a ExtractorConfig,
    ) -> Self {
        Self {
            dataset,
            pending,
            config,
        }
    }

    /// Extracts the etymology chain for `target` (or the first etymology on the
    /// page when `target` is `None` or blank).
    ///
    /// A chain of length 1 is a valid result: prose exists but nothing on it
    /// could be mapped.
    ///
    /// # Errors
    /// [`ExtractError::LanguagePageNotFound`] or [`ExtractError::EtymologyNotFound`]
    /// when the locator fails.
    #[instrument(level = "info", skip_all, fields(language = target.unwrap_or("<first>")))]
    pub fn extract<D>(
        &self,
        document: &D,
        target: Option<&str>,
    ) -> Result<ChainExtractionResult, ExtractError>
    where
        D: DocumentModel + ?Sized,
    {
        let target = target.map(str::trim).filter(|t| !t.is_empty());
        let located = locate(document, target, self.config)?;

        let paragraphs = document.paragraphs_of(located.etymology.id);
        let mut walked = walk(&paragraphs, &located.language, self.config.stop_rules);

        let notes = filter_chain(&mut walked.chain, self.dataset, self.pending);
        for note in &notes {
            walked.description.push('\n');
            walked.description.push_str(note);
        }

        info!(
            language = %located.language,
            heading = located.etymology.text,
            paragraphs = paragraphs.len(),
            chain = ?walked.chain.as_slice(),
            notes = notes.len(),
            "etymology extracted"
        );

        Ok(ChainExtractionResult {
            description: walked.description,
            chain: walked.chain,
        })
    }
}
