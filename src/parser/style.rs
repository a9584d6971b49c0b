//! DocInfo style tables.
//!
//! Body records refer to fonts, character shapes and paragraph shapes by
//! index. The tables store no explicit ids: the Nth record of a kind in the
//! DocInfo stream is index N.

use crate::model::{Alignment, CharStyle, Rgb};

use super::binary::{decode_utf16, decode_utf16_cstr, read_i32, read_u16, read_u32, read_u8};
use super::record::{doc_info_tag, tokenize};

/// Default base font size in points when no character shape is loaded.
pub const DEFAULT_BASE_FONT_SIZE: f32 = 10.0;

/// Paragraph shape properties used by the assembler.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParaStyle {
    /// Paragraph alignment
    pub alignment: Alignment,
    /// Outline level (0 = body text, 1-6 = heading depth)
    pub outline_level: u8,
}

/// Positional lookup tables loaded from the DocInfo stream.
#[derive(Debug, Clone, Default)]
pub struct StyleTables {
    fonts: Vec<String>,
    char_styles: Vec<CharStyle>,
    para_styles: Vec<ParaStyle>,
}

impl StyleTables {
    /// Create empty tables.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load tables from a decompressed DocInfo stream.
    ///
    /// Records are consumed in stream order; a record too short to decode
    /// still takes its index with default fields, so later indices stay
    /// aligned.
    pub fn load(data: &[u8]) -> Self {
        let mut tables = Self::new();
        for record in tokenize(data) {
            match record.tag {
                doc_info_tag::FACE_NAME => {
                    tables.fonts.push(decode_face_name(record.payload).unwrap_or_default());
                }
                doc_info_tag::CHAR_SHAPE => {
                    let style = decode_char_shape(record.payload, &tables.fonts);
                    tables.char_styles.push(style);
                }
                doc_info_tag::PARA_SHAPE => {
                    tables.para_styles.push(decode_para_shape(record.payload));
                }
                _ => {}
            }
        }
        log::debug!(
            "loaded {} fonts, {} char shapes, {} para shapes",
            tables.fonts.len(),
            tables.char_styles.len(),
            tables.para_styles.len()
        );
        tables
    }

    /// Font name at `index`, if present and non-empty.
    pub fn font(&self, index: usize) -> Option<&str> {
        self.fonts
            .get(index)
            .map(String::as_str)
            .filter(|name| !name.is_empty())
    }

    /// Character style at `index`, or the default style when out of range.
    pub fn char_style(&self, index: usize) -> CharStyle {
        self.char_styles.get(index).cloned().unwrap_or_default()
    }

    /// Paragraph style at `index`, or the default style when out of range.
    pub fn para_style(&self, index: usize) -> ParaStyle {
        self.para_styles.get(index).copied().unwrap_or_default()
    }

    /// Size of the first character style, the document's body text size.
    pub fn base_font_size(&self) -> f32 {
        self.char_styles
            .first()
            .and_then(|s| s.font_size)
            .filter(|&size| size > 0.0)
            .unwrap_or(DEFAULT_BASE_FONT_SIZE)
    }

    pub fn font_count(&self) -> usize {
        self.fonts.len()
    }

    pub fn char_style_count(&self) -> usize {
        self.char_styles.len()
    }

    pub fn para_style_count(&self) -> usize {
        self.para_styles.len()
    }

    /// Check if all three tables are empty.
    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty() && self.char_styles.is_empty() && self.para_styles.is_empty()
    }
}

/// Decode a FACE_NAME payload: attribute byte, u16 length, UTF-16LE name.
///
/// When the declared length does not fit, the name is read up to the first
/// NUL instead.
fn decode_face_name(data: &[u8]) -> Option<String> {
    let declared = read_u16(data, 1)? as usize;
    let body = data.get(3..)?;
    let name = if declared > 0 && declared * 2 <= body.len() {
        decode_utf16(&body[..declared * 2])
    } else {
        decode_utf16_cstr(body)
    };
    let name = name.trim_end_matches('\0').trim().to_string();
    (!name.is_empty()).then_some(name)
}

// CHAR_SHAPE layout offsets.
const CHAR_FACE_ID: usize = 0;
const CHAR_BASE_SIZE: usize = 42;
const CHAR_ATTRIBUTES: usize = 46;
const CHAR_COLOR: usize = 52;

const ATTR_ITALIC: u32 = 1 << 0;
const ATTR_BOLD: u32 = 1 << 1;
const ATTR_UNDERLINE_SHIFT: u32 = 2;
const ATTR_UNDERLINE_MASK: u32 = 0b11;
const ATTR_STRIKE_SHIFT: u32 = 18;
const ATTR_STRIKE_MASK: u32 = 0b111;

/// Decode a CHAR_SHAPE payload; fields beyond the payload keep defaults.
fn decode_char_shape(data: &[u8], fonts: &[String]) -> CharStyle {
    let mut style = CharStyle::default();

    if let Some(size) = read_i32(data, CHAR_BASE_SIZE) {
        style.font_size = Some(size as f32 / 100.0);
    }

    if let Some(attrs) = read_u32(data, CHAR_ATTRIBUTES) {
        style.italic = attrs & ATTR_ITALIC != 0;
        style.bold = attrs & ATTR_BOLD != 0;
        style.underline = (attrs >> ATTR_UNDERLINE_SHIFT) & ATTR_UNDERLINE_MASK != 0;
        style.strike = (attrs >> ATTR_STRIKE_SHIFT) & ATTR_STRIKE_MASK != 0;
    }

    if let Some(face) = read_u16(data, CHAR_FACE_ID) {
        style.font_name = fonts
            .get(face as usize)
            .filter(|name| !name.is_empty())
            .cloned();
    }

    if let (Some(r), Some(g), Some(b)) = (
        read_u8(data, CHAR_COLOR),
        read_u8(data, CHAR_COLOR + 1),
        read_u8(data, CHAR_COLOR + 2),
    ) {
        style.color = Some(Rgb::new(r, g, b));
    }

    style
}

const PARA_ALIGN_MASK: u32 = 0b111;
const PARA_OUTLINE_LEVEL: usize = 7;
const MAX_OUTLINE_LEVEL: u8 = 10;

/// Decode a PARA_SHAPE payload; fields beyond the payload keep defaults.
fn decode_para_shape(data: &[u8]) -> ParaStyle {
    let mut style = ParaStyle::default();

    if let Some(attrs) = read_u32(data, 0) {
        style.alignment = match attrs & PARA_ALIGN_MASK {
            0 => Alignment::Justify,
            2 => Alignment::Right,
            3 => Alignment::Center,
            _ => Alignment::Left,
        };
    }

    if let Some(level) = read_u8(data, PARA_OUTLINE_LEVEL) {
        style.outline_level = if level < MAX_OUTLINE_LEVEL { level } else { 0 };
    }

    style
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::testutil::{char_shape, encode_record, face_name, para_shape};

    fn doc_info(records: &[(u16, Vec<u8>)]) -> Vec<u8> {
        records
            .iter()
            .flat_map(|(tag, payload)| encode_record(*tag, 0, payload))
            .collect()
    }

    #[test]
    fn test_empty_stream() {
        let tables = StyleTables::load(&[]);
        assert!(tables.is_empty());
        assert_eq!(tables.char_style(3), CharStyle::default());
        assert_eq!(tables.para_style(0), ParaStyle::default());
        assert_eq!(tables.base_font_size(), DEFAULT_BASE_FONT_SIZE);
    }

    #[test]
    fn test_char_shape_decode() {
        let attrs = ATTR_BOLD | (1 << ATTR_UNDERLINE_SHIFT) | (2 << ATTR_STRIKE_SHIFT);
        let data = doc_info(&[
            (doc_info_tag::FACE_NAME, face_name("함초롬바탕")),
            (doc_info_tag::FACE_NAME, face_name("Arial")),
            (doc_info_tag::CHAR_SHAPE, char_shape(1, 1200, attrs, [0x12, 0x34, 0x56])),
        ]);
        let tables = StyleTables::load(&data);

        assert_eq!(tables.font(0), Some("함초롬바탕"));
        let style = tables.char_style(0);
        assert!(style.bold);
        assert!(!style.italic);
        assert!(style.underline);
        assert!(style.strike);
        assert_eq!(style.font_size, Some(12.0));
        assert_eq!(style.font_name.as_deref(), Some("Arial"));
        assert_eq!(style.color, Some(Rgb::new(0x12, 0x34, 0x56)));
        assert_eq!(tables.base_font_size(), 12.0);
    }

    #[test]
    fn test_italic_only() {
        let data = doc_info(&[(doc_info_tag::CHAR_SHAPE, char_shape(9, 1000, ATTR_ITALIC, [0; 3]))]);
        let style = StyleTables::load(&data).char_style(0);
        assert!(style.italic);
        assert!(!style.bold && !style.underline && !style.strike);
        // Face 9 is not loaded.
        assert_eq!(style.font_name, None);
    }

    #[test]
    fn test_short_char_shape_keeps_its_index() {
        let data = doc_info(&[
            (doc_info_tag::CHAR_SHAPE, vec![0u8; 10]),
            (doc_info_tag::CHAR_SHAPE, char_shape(0, 2000, ATTR_BOLD, [0; 3])),
        ]);
        let tables = StyleTables::load(&data);

        assert_eq!(tables.char_style_count(), 2);
        assert_eq!(tables.char_style(0).font_size, None);
        assert!(tables.char_style(1).bold);
        // First style has no size, so the default base applies.
        assert_eq!(tables.base_font_size(), DEFAULT_BASE_FONT_SIZE);
    }

    #[test]
    fn test_para_shape_decode() {
        let data = doc_info(&[
            (doc_info_tag::PARA_SHAPE, para_shape(0, 0)),
            (doc_info_tag::PARA_SHAPE, para_shape(3, 2)),
            (doc_info_tag::PARA_SHAPE, para_shape(2, 12)),
            (doc_info_tag::PARA_SHAPE, para_shape(6, 1)),
        ]);
        let tables = StyleTables::load(&data);

        assert_eq!(tables.para_style(0).alignment, Alignment::Justify);
        assert_eq!(tables.para_style(1).alignment, Alignment::Center);
        assert_eq!(tables.para_style(1).outline_level, 2);
        assert_eq!(tables.para_style(2).alignment, Alignment::Right);
        assert_eq!(tables.para_style(2).outline_level, 0);
        assert_eq!(tables.para_style(3).alignment, Alignment::Left);
        assert_eq!(tables.para_style(99), ParaStyle::default());
    }

    #[test]
    fn test_face_name_without_length() {
        let mut payload = vec![0u8, 0, 0];
        payload.extend("Dotum".encode_utf16().flat_map(|u| u.to_le_bytes()));
        payload.extend_from_slice(&[0, 0, 0x41, 0]);
        assert_eq!(decode_face_name(&payload).as_deref(), Some("Dotum"));
        assert_eq!(decode_face_name(&[0x01]), None);
    }

    #[test]
    fn test_unrelated_tags_ignored() {
        let data = doc_info(&[
            (doc_info_tag::DOCUMENT_PROPERTIES, vec![0u8; 26]),
            (doc_info_tag::ID_MAPPINGS, vec![0u8; 60]),
            (doc_info_tag::BIN_DATA, vec![0u8; 10]),
        ]);
        assert!(StyleTables::load(&data).is_empty());
    }
}
