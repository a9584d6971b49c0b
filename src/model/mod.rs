//! Document model types for HWP content representation.
//!
//! This module defines the intermediate representation (IR) produced by the
//! record decoder. Every value is built once during a single parse pass and
//! not mutated afterwards.

mod document;
mod image;
mod paragraph;
mod section;
mod table;

pub use document::{Document, Note};
pub use image::{is_image_format, mime_for_format, Image, IMAGE_FORMATS};
pub use paragraph::{Alignment, CharStyle, HeadingLevel, Paragraph, Rgb, TextRun};
pub use section::{Block, Section};
pub use table::{Table, TableCell, TableLayout, TableRow};
