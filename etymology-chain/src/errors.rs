//! Crate-wide error hierarchy for etymology-chain.
//!
//! The root [`EtymapError`] wraps one enum per domain. Extraction and path
//! failures are expected outcomes of a request and are surfaced to the user;
//! dataset and config failures happen at startup.

use thiserror::Error;

/// Convenient alias for crate-wide results.
pub type Result<T> = std::result::Result<T, EtymapError>;

/// Root error type for the etymology-chain crate.
#[derive(Debug, Error)]
pub enum EtymapError {
    /// Locating the language section or its etymology failed.
    #[error(transparent)]
    Extract(#[from] ExtractError),

    /// A chain entry could not be placed on the map.
    #[error(transparent)]
    Path(#[from] PathError),

    /// Coordinate / pending dataset loading failed.
    #[error(transparent)]
    Dataset(#[from] DatasetError),

    /// Environment configuration was invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Structured document could not be decoded.
    #[error("document decode error: {0}")]
    Document(#[from] serde_json::Error),

    /// I/O while reading a document file.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures of section/subsection location.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    /// The requested language heading does not exist in the document.
    #[error("language section not found: {0}")]
    LanguagePageNotFound(String),

    /// No qualifying etymology subsection, or it belongs to another language.
    #[error("etymology section not found")]
    EtymologyNotFound,
}

/// Failures of the path resolver.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    /// Language has no entry in the coordinate dataset.
    #[error("no coordinates for language: {0}")]
    UnresolvedLanguage(String),
}

/// Dataset file errors.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// I/O error while opening a dataset file.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed CSV record.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// A row is missing a required column.
    #[error("line {line}: missing column {column}")]
    MissingColumn {
        /// 1-based record line.
        line: u64,
        /// 0-based column index.
        column: usize,
    },

    /// Latitude or longitude did not parse as a float.
    #[error("line {line}: invalid coordinate {value:?} for {name}")]
    InvalidCoordinate {
        /// 1-based record line.
        line: u64,
        /// Language on that row.
        name: String,
        /// Raw cell content.
        value: String,
    },
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A variable had an unsupported value.
    #[error("invalid value in {var}: {reason}")]
    InvalidValue {
        /// Variable name (e.g., `ETYMAP_STOP_RULES`).
        var: &'static str,
        /// Human-readable reason.
        reason: String,
    },
}

// ===== Conversions for `?` ergonomics at the crate root =====

impl From<csv::Error> for EtymapError {
    fn from(e: csv::Error) -> Self {
        EtymapError::Dataset(DatasetError::Csv(e))
    }
}
