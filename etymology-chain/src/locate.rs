//! Section & subsection locator.
//!
//! Finds the language section to read and the etymology subsection under it.
//! Raw heading streams let an etymology heading "leak" past a language
//! boundary, so a subsection found by forward scan is always checked against
//! its nearest preceding language heading.

use tracing::{debug, warn};

use crate::config::ExtractorConfig;
use crate::document::{DocumentModel, HeadingRef};
use crate::errors::ExtractError;

/// Language section and etymology subsection picked for extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Located<'d> {
    /// Language heading text with editorial markers removed.
    pub language: String,
    pub language_heading: HeadingRef<'d>,
    pub etymology: HeadingRef<'d>,
}

/// Locates the etymology subsection for `target`, or for the first etymology
/// on the page when `target` is `None`.
pub fn locate<'d, D>(
    doc: &'d D,
    target: Option<&str>,
    cfg: &ExtractorConfig,
) -> Result<Located<'d>, ExtractError>
where
    D: DocumentModel + ?Sized,
{
    match target {
        Some(language) => locate_for_language(doc, language, cfg),
        None => locate_first(doc, cfg),
    }
}

fn locate_for_language<'d, D>(
    doc: &'d D,
    language: &str,
    cfg: &ExtractorConfig,
) -> Result<Located<'d>, ExtractError>
where
    D: DocumentModel + ?Sized,
{
    let heading = doc
        .language_headings()
        .into_iter()
        .find(|h| cfg.clean_heading(h.text) == language)
        .ok_or_else(|| ExtractError::LanguagePageNotFound(language.to_string()))?;

    let etymology = doc
        .subsection_headings_after(heading.id)
        .into_iter()
        .find(|h| is_etymology(h, cfg))
        .ok_or(ExtractError::EtymologyNotFound)?;

    // First match is terminal: no further scanning when it belongs elsewhere.
    match doc.owning_language(etymology.id) {
        Some(owner) if owner.id == heading.id => {}
        other => {
            debug!(
                language,
                owner = other.map(|h| h.text),
                "first etymology after the language heading belongs to another section"
            );
            return Err(ExtractError::EtymologyNotFound);
        }
    }

    Ok(Located {
        language: language.to_string(),
        language_heading: heading,
        etymology,
    })
}

fn locate_first<'d, D>(doc: &'d D, cfg: &ExtractorConfig) -> Result<Located<'d>, ExtractError>
where
    D: DocumentModel + ?Sized,
{
    let etymology = doc
        .subsection_headings()
        .into_iter()
        .find(|h| is_etymology(h, cfg))
        .ok_or(ExtractError::EtymologyNotFound)?;

    let Some(owner) = doc.owning_language(etymology.id) else {
        warn!(heading = etymology.text, "etymology heading has no language section above it");
        return Err(ExtractError::EtymologyNotFound);
    };

    Ok(Located {
        language: cfg.clean_heading(owner.text).into_owned(),
        language_heading: owner,
        etymology,
    })
}

fn is_etymology(h: &HeadingRef<'_>, cfg: &ExtractorConfig) -> bool {
    h.text.contains(cfg.etymology_marker.as_str())
}
