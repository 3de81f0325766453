//! Structured dictionary document: headings, paragraphs, language mentions.
//!
//! The raw page is structured elsewhere; this module only defines the shape the
//! extractor consumes. [`DocumentModel`] is the traversal capability the
//! extractor is written against, and [`Document`] is the flat, serde-friendly
//! implementation used by the binary and the tests.
//!
//! Mention offsets are byte offsets into the paragraph text.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::errors::Result;

/// Position of a block inside a document (document order).
pub type NodeId = usize;

/// Heading rank. Only the relative order matters: language headings outrank
/// subsections, which outrank everything below them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeadingRank {
    /// Top-level language section (e.g. `French`).
    Language,
    /// Subsection such as `Etymology 2` or `Pronunciation`.
    Subsection,
    /// Anything nested below a subsection (`Noun`, `Declension`, ...).
    Minor,
}

impl HeadingRank {
    /// Numeric level; smaller is higher.
    pub fn level(self) -> u8 {
        match self {
            HeadingRank::Language => 2,
            HeadingRank::Subsection => 3,
            HeadingRank::Minor => 4,
        }
    }

    /// True when `self` ends a section opened by a heading of rank `other`.
    pub fn closes(self, other: HeadingRank) -> bool {
        self.level() <= other.level()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
    pub rank: HeadingRank,
    pub text: String,
}

/// Inline language span inside a paragraph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mention {
    /// Language display name as written in the text.
    pub name: String,
    /// Byte offset of the span in the paragraph text.
    pub offset: usize,
}

impl Mention {
    pub fn new(name: impl Into<String>, offset: usize) -> Self {
        Self {
            name: name.into(),
            offset,
        }
    }
}

/// Plain paragraph text with its ordered mentions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paragraph {
    text: String,
    #[serde(default)]
    mentions: Vec<Mention>,
}

impl Paragraph {
    pub fn new(text: impl Into<String>, mentions: Vec<Mention>) -> Self {
        Self {
            text: text.into(),
            mentions,
        }
    }

    /// Builds a paragraph by locating each name in order, each search starting
    /// where the previous mention ended.
    ///
    /// A name that cannot be found gets an offset at the end of the text, so
    /// the classifier skips it.
    pub fn with_mentions_found(text: impl Into<String>, names: &[&str]) -> Self {
        let text = text.into();
        let mut mentions = Vec::with_capacity(names.len());
        let mut from = 0usize;

        for name in names {
            match text[from..].find(name) {
                Some(rel) => {
                    let offset = from + rel;
                    mentions.push(Mention::new(*name, offset));
                    from = offset + name.len();
                }
                None => {
                    warn!(mention = %name, "mention not present in paragraph text");
                    mentions.push(Mention::new(*name, text.len()));
                }
            }
        }

        Self { text, mentions }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn mentions(&self) -> &[Mention] {
        &self.mentions
    }
}

/// One node of the flattened document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Block {
    Heading(Heading),
    Paragraph(Paragraph),
}

/// Borrowed view of a heading together with its position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeadingRef<'a> {
    pub id: NodeId,
    pub rank: HeadingRank,
    pub text: &'a str,
}

/// Traversal capability the extractor needs from any document representation.
pub trait DocumentModel {
    /// Language-rank headings in document order.
    fn language_headings(&self) -> Vec<HeadingRef<'_>>;

    /// Subsection-rank headings in document order.
    fn subsection_headings(&self) -> Vec<HeadingRef<'_>>;

    /// Subsection-rank headings strictly after `id`, to the end of the document.
    fn subsection_headings_after(&self, id: NodeId) -> Vec<HeadingRef<'_>>;

    /// Nearest language-rank heading preceding `id`.
    fn owning_language(&self, id: NodeId) -> Option<HeadingRef<'_>>;

    /// Paragraphs owned by the heading at `id`: those following it up to the
    /// next heading of equal or higher rank.
    fn paragraphs_of(&self, id: NodeId) -> Vec<&Paragraph>;
}

/// Flat block list in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub blocks: Vec<Block>,
}

impl Document {
    pub fn new(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    /// Decodes a document from its JSON form.
    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Reads and decodes a JSON document file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    fn heading(&self, id: NodeId) -> Option<HeadingRef<'_>> {
        match self.blocks.get(id)? {
            Block::Heading(h) => Some(HeadingRef {
                id,
                rank: h.rank,
                text: &h.text,
            }),
            Block::Paragraph(_) => None,
        }
    }

    fn headings_of_rank(&self, rank: HeadingRank, from: NodeId) -> Vec<HeadingRef<'_>> {
        (from..self.blocks.len())
            .filter_map(|id| self.heading(id))
            .filter(|h| h.rank == rank)
            .collect()
    }
}

impl DocumentModel for Document {
    fn language_headings(&self) -> Vec<HeadingRef<'_>> {
        self.headings_of_rank(HeadingRank::Language, 0)
    }

    fn subsection_headings(&self) -> Vec<HeadingRef<'_>> {
        self.headings_of_rank(HeadingRank::Subsection, 0)
    }

    fn subsection_headings_after(&self, id: NodeId) -> Vec<HeadingRef<'_>> {
        self.headings_of_rank(HeadingRank::Subsection, id.saturating_add(1))
    }

    fn owning_language(&self, id: NodeId) -> Option<HeadingRef<'_>> {
        (0..id.min(self.blocks.len()))
            .rev()
            .filter_map(|i| self.heading(i))
            .find(|h| h.rank == HeadingRank::Language)
    }

    fn paragraphs_of(&self, id: NodeId) -> Vec<&Paragraph> {
        let Some(owner) = self.heading(id) else {
            return Vec::new();
        };

        let mut out = Vec::new();
        for block in self.blocks.iter().skip(id + 1) {
            match block {
                Block::Heading(h) if h.rank.closes(owner.rank) => break,
                Block::Heading(_) => {}
                Block::Paragraph(p) => out.push(p),
            }
        }
        out
    }
}

/// Incremental builder for [`Document`].
#[derive(Debug, Default)]
pub struct DocumentBuilder {
    blocks: Vec<Block>,
}

impl DocumentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn heading(mut self, rank: HeadingRank, text: impl Into<String>) -> Self {
        self.blocks.push(Block::Heading(Heading {
            rank,
            text: text.into(),
        }));
        self
    }

    /// Language-rank heading.
    pub fn language(self, text: impl Into<String>) -> Self {
        self.heading(HeadingRank::Language, text)
    }

    /// Subsection-rank heading.
    pub fn subsection(self, text: impl Into<String>) -> Self {
        self.heading(HeadingRank::Subsection, text)
    }

    pub fn paragraph(mut self, paragraph: Paragraph) -> Self {
        self.blocks.push(Block::Paragraph(paragraph));
        self
    }

    /// Paragraph whose mention offsets are located in `text`.
    pub fn text(self, text: impl Into<String>, mentions: &[&str]) -> Self {
        self.paragraph(Paragraph::with_mentions_found(text, mentions))
    }

    pub fn build(self) -> Document {
        Document::new(self.blocks)
    }
}
