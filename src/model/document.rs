//! Document-level types.

use super::{Block, Image, Paragraph, Section};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A parsed HWP document.
///
/// All maps are ordered by key so iteration is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Body sections in stream order
    pub sections: Vec<Section>,

    /// Footnotes keyed by id ("fn1", "fn2", ...)
    pub footnotes: BTreeMap<String, Note>,

    /// Endnotes keyed by id ("en1", "en2", ...)
    pub endnotes: BTreeMap<String, Note>,

    /// Extracted images keyed by asset id
    pub images: BTreeMap<String, Image>,

    /// Free-form document metadata
    pub metadata: BTreeMap<String, String>,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of sections.
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Add a section to the document.
    pub fn add_section(&mut self, section: Section) {
        self.sections.push(section);
    }

    /// Add an image to the document.
    pub fn add_image(&mut self, image: Image) {
        self.images.insert(image.id.clone(), image);
    }

    /// Get an image by id.
    pub fn get_image(&self, id: &str) -> Option<&Image> {
        self.images.get(id)
    }

    /// Get a metadata value.
    pub fn meta(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).map(String::as_str)
    }

    /// Total number of paragraphs placed directly in sections.
    pub fn paragraph_count(&self) -> usize {
        self.sections.iter().map(|s| s.paragraphs().count()).sum()
    }

    /// Total number of tables.
    pub fn table_count(&self) -> usize {
        self.sections.iter().map(|s| s.tables().count()).sum()
    }

    /// Check if the document has no content blocks.
    pub fn is_empty(&self) -> bool {
        self.sections.iter().all(|s| s.is_empty())
    }

    /// Get plain text content of the entire document.
    pub fn plain_text(&self) -> String {
        self.sections
            .iter()
            .map(|s| s.plain_text())
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Iterate over every block in reading order.
    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.sections.iter().flat_map(|s| s.elements.iter())
    }
}

/// A footnote or endnote body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    /// Note id
    pub id: String,

    /// Sequential note number (1-based, per kind)
    pub number: u32,

    /// Note content
    pub paragraphs: Vec<Paragraph>,
}

impl Note {
    /// Create an empty note.
    pub fn new(id: impl Into<String>, number: u32) -> Self {
        Self {
            id: id.into(),
            number,
            paragraphs: Vec::new(),
        }
    }

    /// Get plain text content.
    pub fn plain_text(&self) -> String {
        self.paragraphs
            .iter()
            .map(|p| p.plain_text())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
