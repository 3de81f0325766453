//! Language coordinate dataset and the pending-language set.
//!
//! Both are loaded once at startup from row-oriented CSV files and are
//! read-only afterwards:
//! - column 0: language display name (unique key)
//! - columns 1, 2: latitude and longitude as decimal strings
//!
//! The pending set uses the same file format but only reads column 0.

use std::collections::{HashMap, HashSet};
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::errors::DatasetError;

/// Latitude / longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// Language name → coordinates.
#[derive(Debug, Clone, Default)]
pub struct CoordinateDataset {
    entries: HashMap<String, Coordinates>,
}

impl CoordinateDataset {
    /// Loads the dataset from a CSV file.
    #[instrument(level = "info", skip_all, fields(path = %path.display()))]
    pub fn load(path: &Path, has_headers: bool) -> Result<Self, DatasetError> {
        let file = std::fs::File::open(path)?;
        let ds = Self::from_reader(file, has_headers)?;
        info!(languages = ds.len(), "coordinate dataset loaded");
        Ok(ds)
    }

    /// Parses CSV records from any reader.
    ///
    /// A later row with an already-seen name replaces the earlier one.
    pub fn from_reader<R: Read>(reader: R, has_headers: bool) -> Result<Self, DatasetError> {
        let mut rdr = csv_reader(reader, has_headers);
        let mut entries = HashMap::new();

        for record in rdr.records() {
            let record = record?;
            let line = record.position().map(|p| p.line()).unwrap_or(0);

            let name = cell(&record, 0, line)?;
            if name.is_empty() {
                debug!(line, "skipping row without a language name");
                continue;
            }
            let lat = coordinate(&record, 1, line, name)?;
            let lon = coordinate(&record, 2, line, name)?;

            if entries
                .insert(name.to_string(), Coordinates::new(lat, lon))
                .is_some()
            {
                warn!(line, language = %name, "duplicate language row; keeping the later one");
            }
        }

        Ok(Self { entries })
    }

    pub fn get(&self, name: &str) -> Option<Coordinates> {
        self.entries.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, Coordinates)> for CoordinateDataset {
    fn from_iter<I: IntoIterator<Item = (String, Coordinates)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Languages known to be missing from the coordinate dataset on purpose.
///
/// Only changes messaging: pending languages get a note in the description
/// instead of being dropped silently.
#[derive(Debug, Clone, Default)]
pub struct PendingLanguageSet {
    names: HashSet<String>,
}

impl PendingLanguageSet {
    #[instrument(level = "info", skip_all, fields(path = %path.display()))]
    pub fn load(path: &Path, has_headers: bool) -> Result<Self, DatasetError> {
        let file = std::fs::File::open(path)?;
        let set = Self::from_reader(file, has_headers)?;
        info!(languages = set.len(), "pending language set loaded");
        Ok(set)
    }

    pub fn from_reader<R: Read>(reader: R, has_headers: bool) -> Result<Self, DatasetError> {
        let mut rdr = csv_reader(reader, has_headers);
        let mut names = HashSet::new();

        for record in rdr.records() {
            let record = record?;
            let line = record.position().map(|p| p.line()).unwrap_or(0);
            let name = cell(&record, 0, line)?;
            if !name.is_empty() {
                names.insert(name.to_string());
            }
        }

        Ok(Self { names })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for PendingLanguageSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}

fn csv_reader<R: Read>(reader: R, has_headers: bool) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(has_headers)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader)
}

fn cell<'r>(record: &'r csv::StringRecord, column: usize, line: u64) -> Result<&'r str, DatasetError> {
    record
        .get(column)
        .ok_or(DatasetError::MissingColumn { line, column })
}

fn coordinate(
    record: &csv::StringRecord,
    column: usize,
    line: u64,
    name: &str,
) -> Result<f64, DatasetError> {
    let raw = cell(record, column, line)?;
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| DatasetError::InvalidCoordinate {
            line,
            name: name.to_string(),
            value: raw.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_coordinates_from_csv_rows() {
        let csv = "Latin,41.9,12.5\nOld French,48.85,2.35\n";
        let ds = CoordinateDataset::from_reader(csv.as_bytes(), false).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.get("Latin"), Some(Coordinates::new(41.9, 12.5)));
        assert!(ds.contains("Old French"));
        assert!(!ds.contains("latin"));
    }

    #[test]
    fn extra_columns_are_ignored() {
        let csv = "Latin,41.9,12.5,ital1254,extra\n";
        let ds = CoordinateDataset::from_reader(csv.as_bytes(), false).unwrap();
        assert_eq!(ds.get("Latin"), Some(Coordinates::new(41.9, 12.5)));
    }

    #[test]
    fn header_row_is_skipped_when_configured() {
        let csv = "name,lat,lon\nGothic,45.0,30.0\n";
        let ds = CoordinateDataset::from_reader(csv.as_bytes(), true).unwrap();
        assert_eq!(ds.len(), 1);
        assert!(ds.contains("Gothic"));
    }

    #[test]
    fn unparsable_coordinate_is_an_error() {
        let csv = "Latin,north,12.5\n";
        let err = CoordinateDataset::from_reader(csv.as_bytes(), false).unwrap_err();
        match err {
            DatasetError::InvalidCoordinate { line, name, value } => {
                assert_eq!(line, 1);
                assert_eq!(name, "Latin");
                assert_eq!(value, "north");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn short_row_reports_missing_column() {
        let csv = "Latin,41.9\n";
        let err = CoordinateDataset::from_reader(csv.as_bytes(), false).unwrap_err();
        assert!(matches!(err, DatasetError::MissingColumn { column: 2, .. }));
    }

    #[test]
    fn duplicate_names_keep_the_later_row() {
        let csv = "Latin,1.0,1.0\nLatin,2.0,3.0\n";
        let ds = CoordinateDataset::from_reader(csv.as_bytes(), false).unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.get("Latin"), Some(Coordinates::new(2.0, 3.0)));
    }

    #[test]
    fn pending_set_reads_only_first_column() {
        let csv = "Proto-Indo-European,,\nFrankish\n\n";
        let set = PendingLanguageSet::from_reader(csv.as_bytes(), false).unwrap();
        assert_eq!(set.len(), 2);
        assert!(set.contains("Frankish"));
        assert!(set.contains("Proto-Indo-European"));
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("language_coords.csv");
        std::fs::write(&path, "Latin,41.9,12.5\n").unwrap();
        let ds = CoordinateDataset::load(&path, false).unwrap();
        assert!(ds.contains("Latin"));

        let missing = dir.path().join("nope.csv");
        assert!(matches!(
            CoordinateDataset::load(&missing, false),
            Err(DatasetError::Io(_))
        ));
    }
}
