//! Etymology chain and extraction result types.

use serde::Serialize;

/// Ordered ancestry path of a word.
///
/// Invariants: the first entry is the target language, entries are unique
/// (case-sensitive), and the chain is never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct EtymologyChain(Vec<String>);

impl EtymologyChain {
    /// Chain holding only the target language.
    pub fn new(target: impl Into<String>) -> Self {
        Self(vec![target.into()])
    }

    /// Appends `name` unless already present. Returns whether it was added.
    pub fn push_unique(&mut self, name: &str) -> bool {
        if self.contains(name) {
            return false;
        }
        self.0.push(name.to_string());
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|n| n == name)
    }

    /// The language the chain starts from.
    pub fn target(&self) -> &str {
        &self.0[0]
    }

    /// Entries after the target, oldest last.
    pub fn origins(&self) -> &[String] {
        &self.0[1..]
    }

    /// Keeps origins for which `keep` returns true. The target is never removed.
    pub fn retain_origins<F>(&mut self, mut keep: F)
    where
        F: FnMut(&str) -> bool,
    {
        let mut idx = 0usize;
        self.0.retain(|name| {
            let first = idx == 0;
            idx += 1;
            first || keep(name)
        });
    }

    /// True when nothing beyond the target was found.
    pub fn is_trivial(&self) -> bool {
        self.0.len() == 1
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a EtymologyChain {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Successful extraction: the prose shown to the user plus the mappable chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChainExtractionResult {
    pub description: String,
    pub chain: EtymologyChain,
}
