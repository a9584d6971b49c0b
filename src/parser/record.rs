//! Record tokenizer and tag normalization.
//!
//! HWP 5.x streams are a flat sequence of records, each introduced by a
//! 32-bit little-endian header:
//!
//! ```text
//! bits  0..10  tag id   (0-1023)
//! bits 10..20  level    (0-1023)
//! bits 20..32  size     (0-4095, 0xFFF = extended)
//! ```
//!
//! When the size field holds `0xFFF` the real payload size follows as a
//! separate u32. Hierarchy is carried only by the level: the children of a
//! record are the records right after it with a strictly greater level.

use super::binary::read_u32;

/// Size field value announcing a 4-byte size extension.
pub const EXTENDED_SIZE: u32 = 0xFFF;

/// Canonical body text tags (after [`normalize_tag`]).
pub mod body_tag {
    pub const PARA_HEADER: u16 = 16;
    pub const PARA_TEXT: u16 = 17;
    pub const PARA_CHAR_SHAPE: u16 = 18;
    pub const PARA_LINE_SEG: u16 = 19;
    pub const PARA_RANGE_TAG: u16 = 20;
    pub const CTRL_HEADER: u16 = 21;
    /// Paragraph list header; opens a table cell.
    pub const LIST_HEADER: u16 = 24;
    pub const TABLE: u16 = 27;
    pub const SHAPE_COMPONENT_PICTURE: u16 = 85;
}

/// DocInfo tags.
pub mod doc_info_tag {
    pub const DOCUMENT_PROPERTIES: u16 = 16;
    pub const ID_MAPPINGS: u16 = 17;
    pub const BIN_DATA: u16 = 18;
    pub const FACE_NAME: u16 = 19;
    pub const CHAR_SHAPE: u16 = 21;
    pub const PARA_SHAPE: u16 = 25;
}

/// Control ids found in the first four bytes of a CTRL_HEADER payload.
pub mod ctrl_id {
    /// Packs a four character control name, first character in the high byte.
    const fn id(name: &[u8; 4]) -> u32 {
        ((name[0] as u32) << 24) | ((name[1] as u32) << 16) | ((name[2] as u32) << 8) | name[3] as u32
    }

    pub const TABLE: u32 = id(b"tbl ");
    pub const PICTURE: u32 = id(b"$pic");
    pub const SHAPE_OBJECT: u32 = id(b"gso ");
    pub const FOOTNOTE: u32 = id(b"fn  ");
    pub const ENDNOTE: u32 = id(b"en  ");
    pub const EQUATION: u32 = id(b"eqed");
    pub const SECTION_DEF: u32 = id(b"secd");
    pub const COLUMN_DEF: u32 = id(b"cold");

    /// Render a control id as its four character name.
    pub fn name(id: u32) -> String {
        id.to_be_bytes()
            .iter()
            .map(|&b| if b.is_ascii_graphic() || b == b' ' { b as char } else { '?' })
            .collect()
    }
}

/// Map the shifted tag numbering back to canonical ids.
///
/// Raw ids 66..=77 are shifted by 50, except 72 which maps to the list
/// header (24). Every other id passes through unchanged.
pub fn normalize_tag(raw: u16) -> u16 {
    match raw {
        72 => body_tag::LIST_HEADER,
        66..=77 => raw - 50,
        _ => raw,
    }
}

/// Decoded record header fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordHeader {
    /// Raw tag id
    pub tag: u16,
    /// Nesting level
    pub level: u16,
    /// Inline size field (may be [`EXTENDED_SIZE`])
    pub size: u32,
}

impl RecordHeader {
    /// Split a header dword into its fields.
    pub fn from_dword(dword: u32) -> Self {
        Self {
            tag: (dword & 0x3FF) as u16,
            level: ((dword >> 10) & 0x3FF) as u16,
            size: (dword >> 20) & 0xFFF,
        }
    }

    /// Whether the real size follows in an extension dword.
    pub fn has_extended_size(&self) -> bool {
        self.size == EXTENDED_SIZE
    }
}

/// One record borrowed from a stream buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Record<'a> {
    /// Tag id (canonical when produced by [`tokenize`])
    pub tag: u16,
    /// Nesting level
    pub level: u16,
    /// Payload bytes
    pub payload: &'a [u8],
}

impl<'a> Record<'a> {
    /// Check the record tag.
    pub fn is(&self, tag: u16) -> bool {
        self.tag == tag
    }

    /// Control id of a CTRL_HEADER payload.
    pub fn ctrl_id(&self) -> Option<u32> {
        read_u32(self.payload, 0)
    }
}

/// Iterator over the raw records of a stream.
///
/// Iteration ends at the first header, size extension or payload that does
/// not fit in the remaining bytes; trailing padding is normal at the end of a
/// stream.
#[derive(Debug, Clone)]
pub struct RecordReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> RecordReader<'a> {
    /// Create a reader over a decompressed stream.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Byte offset of the next header.
    pub fn position(&self) -> usize {
        self.pos
    }

    fn stop(&mut self) -> Option<Record<'a>> {
        self.pos = self.data.len();
        None
    }
}

impl<'a> Iterator for RecordReader<'a> {
    type Item = Record<'a>;

    fn next(&mut self) -> Option<Record<'a>> {
        let Some(dword) = read_u32(self.data, self.pos) else {
            return self.stop();
        };
        let header = RecordHeader::from_dword(dword);
        let mut cursor = self.pos + 4;

        let size = if header.has_extended_size() {
            let Some(size) = read_u32(self.data, cursor) else {
                return self.stop();
            };
            cursor += 4;
            size as usize
        } else {
            header.size as usize
        };

        let Some(payload) = cursor
            .checked_add(size)
            .and_then(|end| self.data.get(cursor..end))
        else {
            log::debug!(
                "record at offset {} declares {} bytes, only {} remain",
                self.pos,
                size,
                self.data.len() - cursor
            );
            return self.stop();
        };

        self.pos = cursor + size;
        Some(Record {
            tag: header.tag,
            level: header.level,
            payload,
        })
    }
}

/// Tokenize a stream into records with canonical tags.
pub fn tokenize(data: &[u8]) -> Vec<Record<'_>> {
    RecordReader::new(data)
        .map(|record| Record {
            tag: normalize_tag(record.tag),
            ..record
        })
        .collect()
}

/// Index one past the last child of the record at `index`.
///
/// Children are the maximal run of following records whose level is
/// strictly greater than the record's own level.
pub fn subtree_end(records: &[Record<'_>], index: usize) -> usize {
    let Some(owner) = records.get(index) else {
        return records.len();
    };
    records[index + 1..]
        .iter()
        .position(|r| r.level <= owner.level)
        .map_or(records.len(), |offset| index + 1 + offset)
}
