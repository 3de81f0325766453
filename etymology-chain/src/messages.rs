//! User-facing classification of a finished request and its messages.

use serde::Serialize;

use crate::chain::ChainExtractionResult;
use crate::errors::{ExtractError, PathError};

pub const PAGE_NOT_FOUND: &str = "Did not find a wiktionary page for this word.";
pub const ETYMOLOGY_NOT_FOUND: &str =
    "Did not find an etymology section for this word. Try an alternate form?";
pub const NOTHING_MAPPABLE: &str = "Did not parse a mappable etymology.";

/// How a request ended, from the user's point of view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    /// At least one ancestor can be drawn.
    Mappable { description: String },
    /// Prose was found but nothing on it maps.
    NothingMappable { description: String },
    /// The requested language section is absent.
    LanguagePageNotFound { language: String },
    /// No usable etymology subsection.
    EtymologyNotFound,
}

impl Outcome {
    /// Classifies an extraction result without confusing a length-1 chain
    /// with a failure.
    pub fn from_extraction(result: &Result<ChainExtractionResult, ExtractError>) -> Self {
        match result {
            Ok(r) if r.chain.is_trivial() => Outcome::NothingMappable {
                description: r.description.clone(),
            },
            Ok(r) => Outcome::Mappable {
                description: r.description.clone(),
            },
            Err(ExtractError::LanguagePageNotFound(language)) => Outcome::LanguagePageNotFound {
                language: language.clone(),
            },
            Err(ExtractError::EtymologyNotFound) => Outcome::EtymologyNotFound,
        }
    }

    pub fn is_mappable(&self) -> bool {
        matches!(self, Outcome::Mappable { .. })
    }

    /// Text shown to the user.
    pub fn message(&self) -> String {
        match self {
            Outcome::Mappable { description } => description.clone(),
            Outcome::NothingMappable { description } => {
                format!("{description}\n{NOTHING_MAPPABLE}")
            }
            Outcome::LanguagePageNotFound { language } => {
                format!("{PAGE_NOT_FOUND} No {language} section on this page.")
            }
            Outcome::EtymologyNotFound => ETYMOLOGY_NOT_FOUND.to_string(),
        }
    }
}

/// Message for a path that could not be drawn.
pub fn unresolved_message(description: &str, err: &PathError) -> String {
    match err {
        PathError::UnresolvedLanguage(name) => {
            format!("{description}\nSorry, we don't have coordinates for {name}.")
        }
    }
}

/// Wiktionary URL the document for `word` is fetched from.
pub fn source_url(word: &str, language: Option<&str>) -> String {
    let page = word.trim().replace(' ', "_");
    match language.map(str::trim).filter(|l| !l.is_empty()) {
        Some(lang) => format!("https://en.wiktionary.org/wiki/{page}#{}", lang.replace(' ', "_")),
        None => format!("https://en.wiktionary.org/wiki/{page}"),
    }
}
