//! Runtime configuration loaded from environment variables.
//!
//! Groups:
//! - [`EtymapConfig`]    : dataset locations and the extractor options
//! - [`ExtractorConfig`] : heading markers and the stop-rule variant
//!
//! All structs are `serde`-friendly so they can also be loaded from JSON.

use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{ConfigError, Result};

/// Which variant of the comparison stop rules the classifier applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StopRuleMode {
    /// Lowercase `related` / `cognate` end the paragraph wherever they appear.
    #[default]
    Permissive,
    /// Lowercase `related` / `cognate` only end the paragraph after a sentence end.
    Strict,
}

impl FromStr for StopRuleMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "permissive" => Ok(Self::Permissive),
            "strict" => Ok(Self::Strict),
            other => Err(ConfigError::InvalidValue {
                var: "ETYMAP_STOP_RULES",
                reason: format!("expected `permissive` or `strict`, got `{other}`"),
            }),
        }
    }
}

/// Options for locating sections and classifying mentions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// Stop-rule variant.
    pub stop_rules: StopRuleMode,
    /// Editorial marker removed from heading text before comparison.
    pub edit_marker: String,
    /// Literal a subsection heading must contain to count as an etymology.
    pub etymology_marker: String,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            stop_rules: StopRuleMode::Permissive,
            edit_marker: "[edit]".into(),
            etymology_marker: "Etymology".into(),
        }
    }
}

impl ExtractorConfig {
    /// Heading text with the editorial marker removed and whitespace trimmed.
    pub fn clean_heading<'a>(&self, text: &'a str) -> std::borrow::Cow<'a, str> {
        if self.edit_marker.is_empty() || !text.contains(self.edit_marker.as_str()) {
            return std::borrow::Cow::Borrowed(text.trim());
        }
        std::borrow::Cow::Owned(text.replace(self.edit_marker.as_str(), "").trim().to_string())
    }
}

/// Process-level configuration. All fields have defaults via [`EtymapConfig::from_env`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EtymapConfig {
    /// Coordinate dataset CSV.
    pub coords_csv: PathBuf,
    /// Pending-language CSV (same format, only column 0 used).
    pub pending_csv: PathBuf,
    /// Whether both CSV files start with a header row.
    pub csv_headers: bool,
    /// Classifier options.
    pub extractor: ExtractorConfig,
}

impl Default for EtymapConfig {
    fn default() -> Self {
        Self {
            coords_csv: PathBuf::from("language_coords.csv"),
            pending_csv: PathBuf::from("diff.csv"),
            csv_headers: false,
            extractor: ExtractorConfig::default(),
        }
    }
}

impl EtymapConfig {
    /// Build from environment variables, falling back to defaults.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidValue`] when a variable is set but unusable.
    pub fn from_env() -> Result<Self> {
        let dflt = Self::default();

        let stop_rules = match env_opt("ETYMAP_STOP_RULES") {
            Some(v) => v.parse::<StopRuleMode>()?,
            None => dflt.extractor.stop_rules,
        };

        let csv_headers = match env_opt("ETYMAP_CSV_HEADERS") {
            Some(v) => parse_bool("ETYMAP_CSV_HEADERS", &v)?,
            None => dflt.csv_headers,
        };

        let cfg = Self {
            coords_csv: env_opt("ETYMAP_COORDS_CSV")
                .map(PathBuf::from)
                .unwrap_or(dflt.coords_csv),
            pending_csv: env_opt("ETYMAP_PENDING_CSV")
                .map(PathBuf::from)
                .unwrap_or(dflt.pending_csv),
            csv_headers,
            extractor: ExtractorConfig {
                stop_rules,
                ..dflt.extractor
            },
        };

        cfg.validate()?;
        Ok(cfg)
    }

    /// Validates config values.
    pub fn validate(&self) -> Result<()> {
        if self.coords_csv.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                var: "ETYMAP_COORDS_CSV",
                reason: "path is empty".into(),
            }
            .into());
        }
        if self.extractor.etymology_marker.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                var: "etymology_marker",
                reason: "marker is empty".into(),
            }
            .into());
        }
        Ok(())
    }
}

/// Optional, non-empty environment variable.
fn env_opt(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parse_bool(var: &'static str, value: &str) -> std::result::Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        other => Err(ConfigError::InvalidValue {
            var,
            reason: format!("expected boolean, got `{other}`"),
        }),
    }
}
