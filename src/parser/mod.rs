//! HWP 5.x record decoding.
//!
//! Streams are tokenized into a flat record list once; the reconstructors
//! walk that list with a shared cursor and report how many records they
//! consumed.

mod binary;
mod container;
mod context;
mod header;
mod hwp_parser;
mod note;
mod options;
mod paragraph;
mod picture;
mod record;
mod section;
mod style;
mod table;
mod text;

#[cfg(test)]
mod testutil;

pub use container::{
    inflate_raw, section_names, MemoryContainer, StreamSource, BIN_DATA_PREFIX, DOC_INFO, FILE_HEADER, PREVIEW_TEXT,
    SECTION_PREFIX,
};
pub use context::{asset_key, NoteKind, ParseContext};
pub use header::{FileHeader, HwpVersion};
pub use hwp_parser::HwpParser;
pub use options::ParseOptions;
pub use paragraph::{assemble_paragraph, collect_paragraph, CollectedParagraph, ParaHeader, StyleRun};
pub use picture::locate_picture;
pub use record::{body_tag, ctrl_id, doc_info_tag, normalize_tag, subtree_end, tokenize, Record, RecordHeader, RecordReader};
pub use section::{parse_records, parse_section};
pub use style::{ParaStyle, StyleTables, DEFAULT_BASE_FONT_SIZE};
pub use table::{approximate_columns, approximate_table, reconstruct_table};
pub use text::{is_graphic_marker_text, sanitize, scan_text, ControlClass, ControlMark, ScannedText};
