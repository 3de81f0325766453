//! Path resolver: turns a validated chain into map legs.

use serde::Serialize;

use crate::chain::EtymologyChain;
use crate::dataset::{CoordinateDataset, Coordinates};
use crate::errors::PathError;

/// A language placed on the map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathPoint {
    pub language: String,
    pub at: Coordinates,
}

/// One step of the path, between `chain[i]` (descendant) and `chain[i + 1]`
/// (its ancestor). Arrows are drawn from the ancestor to the descendant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathLeg {
    pub descendant: PathPoint,
    pub ancestor: PathPoint,
}

/// Consecutive legs of a chain, in chain order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EtymologyPath {
    languages: Vec<String>,
    pub legs: Vec<PathLeg>,
}

impl EtymologyPath {
    /// Coordinates in chain order (one per language).
    pub fn points(&self) -> Vec<Coordinates> {
        let mut out: Vec<Coordinates> = self.legs.iter().map(|l| l.descendant.at).collect();
        if let Some(last) = self.legs.last() {
            out.push(last.ancestor.at);
        }
        out
    }

    /// Oldest ancestor first, one language per line, separated by arrows.
    pub fn legend(&self) -> String {
        self.languages
            .iter()
            .rev()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join("\n↓\n")
    }
}

/// Looks up every consecutive pair of `chain` in `dataset`.
///
/// # Errors
/// [`PathError::UnresolvedLanguage`] naming the first missing entry in index order.
pub fn resolve_path(
    chain: &EtymologyChain,
    dataset: &CoordinateDataset,
) -> Result<EtymologyPath, PathError> {
    let names = chain.as_slice();
    let lookup = |name: &String| -> Result<PathPoint, PathError> {
        dataset
            .get(name)
            .map(|at| PathPoint {
                language: name.clone(),
                at,
            })
            .ok_or_else(|| PathError::UnresolvedLanguage(name.clone()))
    };

    let legs = names
        .windows(2)
        .map(|pair| {
            Ok(PathLeg {
                descendant: lookup(&pair[0])?,
                ancestor: lookup(&pair[1])?,
            })
        })
        .collect::<Result<Vec<_>, PathError>>()?;

    Ok(EtymologyPath {
        languages: names.to_vec(),
        legs,
    })
}

/// Map title for a word.
pub fn map_title(word: &str) -> String {
    format!("Etymology of \"{word}\"")
}
