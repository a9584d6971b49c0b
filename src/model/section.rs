//! Section-level types.

use super::{Paragraph, Table};
use serde::{Deserialize, Serialize};

/// A section of the document body, in reading order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Content blocks in the section
    pub elements: Vec<Block>,
}

impl Section {
    /// Create a new empty section.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a block to the section.
    pub fn add_block(&mut self, block: Block) {
        self.elements.push(block);
    }

    /// Add a paragraph to the section.
    pub fn add_paragraph(&mut self, paragraph: Paragraph) {
        self.elements.push(Block::Paragraph(paragraph));
    }

    /// Add a table to the section.
    pub fn add_table(&mut self, table: Table) {
        self.elements.push(Block::Table(table));
    }

    /// Add an image reference to the section.
    pub fn add_image(&mut self, image_id: impl Into<String>) {
        self.elements.push(Block::image(image_id));
    }

    /// Iterate over the paragraphs placed directly in the section.
    pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        self.elements.iter().filter_map(|b| match b {
            Block::Paragraph(p) => Some(p),
            _ => None,
        })
    }

    /// Iterate over the tables in the section.
    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.elements.iter().filter_map(|b| match b {
            Block::Table(t) => Some(t),
            _ => None,
        })
    }

    /// Iterate over the referenced image ids in the section.
    pub fn image_ids(&self) -> impl Iterator<Item = &str> {
        self.elements.iter().filter_map(|b| match b {
            Block::Image { image_id } => Some(image_id.as_str()),
            _ => None,
        })
    }

    /// Get plain text content of the section.
    pub fn plain_text(&self) -> String {
        self.elements
            .iter()
            .filter_map(|block| match block {
                Block::Paragraph(p) => Some(p.plain_text()),
                Block::Table(t) => Some(t.plain_text()),
                Block::Image { .. } => None,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Check if the section is empty.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

/// A content block in a section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    /// A paragraph of text
    Paragraph(Paragraph),

    /// A table
    Table(Table),

    /// A reference into the document's image map
    Image {
        /// Image id
        image_id: String,
    },
}

impl Block {
    /// Create an image block.
    pub fn image(image_id: impl Into<String>) -> Self {
        Block::Image {
            image_id: image_id.into(),
        }
    }

    /// Check if this block is a paragraph.
    pub fn is_paragraph(&self) -> bool {
        matches!(self, Block::Paragraph(_))
    }

    /// Check if this block is a table.
    pub fn is_table(&self) -> bool {
        matches!(self, Block::Table(_))
    }

    /// Check if this block is an image.
    pub fn is_image(&self) -> bool {
        matches!(self, Block::Image { .. })
    }
}
