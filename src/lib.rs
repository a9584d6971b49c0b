//! # unhwp
//!
//! Structured content extraction from HWP 5.x binary documents.
//!
//! An HWP 5.x file is an OLE compound file holding named streams. This crate
//! decodes those streams into a [`Document`]: sections of styled paragraphs,
//! tables rebuilt as grids, and anchored images. Opening the compound file is
//! left to the caller, who hands the streams over through [`StreamSource`].
//!
//! ## Quick Start
//!
//! ```no_run
//! use unhwp::{parse_source, MemoryContainer};
//!
//! fn main() -> unhwp::Result<()> {
//!     let mut container = MemoryContainer::new();
//!     container.insert("FileHeader", std::fs::read("FileHeader.bin")?);
//!     container.insert("DocInfo", std::fs::read("DocInfo.bin")?);
//!     container.insert("BodyText/Section0", std::fs::read("Section0.bin")?);
//!
//!     let doc = parse_source(container)?;
//!     println!("{}", doc.plain_text());
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Styled runs**: bold, italic, underline, strike, size, face and color
//! - **Headings**: from outline levels or relative font size
//! - **Tables**: declared grids with spans, approximate grids when undeclared
//! - **Images**: BinData extraction with anchor resolution
//! - **Notes**: footnotes and endnotes kept apart from the body
//! - **Tolerant decoding**: truncated records and short fields fall back to defaults

pub mod describe;
pub mod detect;
pub mod error;
pub mod model;
pub mod parser;

// Re-export commonly used types
pub use describe::ImageDescriber;
pub use detect::{detect_format_from_bytes, detect_format_from_path, is_hwp, HwpFormat};
pub use error::{Error, Result};
pub use model::{
    Alignment, Block, CharStyle, Document, HeadingLevel, Image, Note, Paragraph, Rgb, Section, Table, TableCell,
    TableLayout, TableRow, TextRun,
};
pub use parser::{FileHeader, HwpParser, MemoryContainer, ParseOptions, StreamSource};

use std::sync::Arc;

/// Parse a document from its container streams.
///
/// # Example
///
/// ```no_run
/// use unhwp::{parse_source, MemoryContainer};
///
/// let doc = parse_source(MemoryContainer::new()).unwrap();
/// assert!(doc.sections.is_empty());
/// ```
pub fn parse_source<S: StreamSource>(source: S) -> Result<Document> {
    HwpParser::new(source).parse()
}

/// Parse a document with custom options.
///
/// # Example
///
/// ```no_run
/// use unhwp::{parse_source_with_options, MemoryContainer, ParseOptions};
///
/// let options = ParseOptions::new().text_only().strict_tables();
/// let doc = parse_source_with_options(MemoryContainer::new(), options).unwrap();
/// ```
pub fn parse_source_with_options<S: StreamSource>(source: S, options: ParseOptions) -> Result<Document> {
    HwpParser::with_options(source, options).parse()
}

/// Extract the preview text stored alongside the document.
///
/// This skips record decoding entirely; the preview is usually truncated.
pub fn quick_extract<S: StreamSource>(source: S) -> String {
    HwpParser::new(source).quick_extract()
}

/// Extract plain text from a document.
pub fn extract_text<S: StreamSource>(source: S) -> Result<String> {
    let doc = parse_source_with_options(source, ParseOptions::new().text_only())?;
    Ok(doc.plain_text())
}

/// Builder for parsing HWP documents.
///
/// # Example
///
/// ```no_run
/// use unhwp::{MemoryContainer, Unhwp};
///
/// let doc = Unhwp::new()
///     .with_images(true)
///     .strict_tables()
///     .sequential()
///     .parse(MemoryContainer::new())?;
/// # Ok::<(), unhwp::Error>(())
/// ```
pub struct Unhwp {
    parse_options: ParseOptions,
    describer: Option<Arc<dyn ImageDescriber>>,
}

impl Unhwp {
    /// Create a new Unhwp builder.
    pub fn new() -> Self {
        Self {
            parse_options: ParseOptions::default(),
            describer: None,
        }
    }

    /// Extract text only (no images).
    pub fn text_only(mut self) -> Self {
        self.parse_options = self.parse_options.text_only();
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parse_options = self.parse_options.sequential();
        self
    }

    /// Enable image extraction.
    pub fn with_images(mut self, extract: bool) -> Self {
        self.parse_options = self.parse_options.with_images(extract);
        self
    }

    /// Only keep tables whose grid is declared.
    pub fn strict_tables(mut self) -> Self {
        self.parse_options = self.parse_options.strict_tables();
        self
    }

    /// Keep unanchored images out of the section flow.
    pub fn without_unreferenced_images(mut self) -> Self {
        self.parse_options = self.parse_options.without_unreferenced_images();
        self
    }

    /// Describe extracted images with the given describer.
    pub fn with_describer(mut self, describer: impl ImageDescriber + 'static) -> Self {
        self.describer = Some(Arc::new(describer));
        self.parse_options = self.parse_options.with_descriptions(true);
        self
    }

    /// Parse a document from its container streams.
    pub fn parse<S: StreamSource>(self, source: S) -> Result<Document> {
        let mut parser = HwpParser::with_options(source, self.parse_options);
        if let Some(describer) = self.describer {
            parser = parser.with_describer(describer);
        }
        parser.parse()
    }
}

impl Default for Unhwp {
    fn default() -> Self {
        Self::new()
    }
}
