//! Dataset filter: keeps only chain entries that can be placed on a map.

use tracing::debug;

use crate::chain::EtymologyChain;
use crate::dataset::{CoordinateDataset, PendingLanguageSet};

/// User-facing note for a language that is known but not mapped yet.
pub fn pending_note(name: &str) -> String {
    format!("Sorry, {name} isn't in our dataset yet.")
}

/// Removes origins missing from `dataset`, in place.
///
/// Returns one note per removed language that is in `pending`, in chain order.
/// Other missing names (usually language families) are dropped without a note.
/// The target at index 0 is never filtered.
pub fn filter_chain(
    chain: &mut EtymologyChain,
    dataset: &CoordinateDataset,
    pending: &PendingLanguageSet,
) -> Vec<String> {
    let mut notes = Vec::new();

    chain.retain_origins(|name| {
        if dataset.contains(name) {
            return true;
        }
        if pending.contains(name) {
            notes.push(pending_note(name));
        } else {
            debug!(language = name, "not in dataset; dropped");
        }
        false
    });

    notes
}
