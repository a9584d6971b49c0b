//! Record encoders for unit tests.

use super::record::EXTENDED_SIZE;

/// Encode one record with a raw tag id.
pub fn encode_record(tag: u16, level: u16, payload: &[u8]) -> Vec<u8> {
    let size = payload.len() as u32;
    let inline = if size >= EXTENDED_SIZE { EXTENDED_SIZE } else { size };
    let dword = (tag as u32 & 0x3FF) | ((level as u32 & 0x3FF) << 10) | (inline << 20);

    let mut out = dword.to_le_bytes().to_vec();
    if inline == EXTENDED_SIZE {
        out.extend_from_slice(&size.to_le_bytes());
    }
    out.extend_from_slice(payload);
    out
}

/// UTF-16LE bytes of a string.
pub fn utf16(text: &str) -> Vec<u8> {
    text.encode_utf16().flat_map(|u| u.to_le_bytes()).collect()
}

/// An eight unit extended/inline control block carrying a control id.
pub fn ctrl_block(code: u16, id: u32) -> Vec<u8> {
    let mut out = code.to_le_bytes().to_vec();
    out.extend_from_slice(&id.to_le_bytes());
    out.extend_from_slice(&[0u8; 8]);
    out.extend_from_slice(&code.to_le_bytes());
    out
}

/// PARA_HEADER payload.
pub fn para_header(char_count: u32, para_shape: u16, shape_pairs: u16) -> Vec<u8> {
    let mut out = char_count.to_le_bytes().to_vec();
    out.extend_from_slice(&0u32.to_le_bytes());
    out.extend_from_slice(&para_shape.to_le_bytes());
    out.extend_from_slice(&[0u8, 0u8]);
    out.extend_from_slice(&shape_pairs.to_le_bytes());
    out.extend_from_slice(&[0u8; 10]);
    out
}

/// PARA_CHAR_SHAPE payload from (position, char shape index) pairs.
pub fn char_shape_runs(pairs: &[(u32, u32)]) -> Vec<u8> {
    pairs
        .iter()
        .flat_map(|(pos, id)| pos.to_le_bytes().into_iter().chain(id.to_le_bytes()))
        .collect()
}

/// CHAR_SHAPE payload with the given size (HWPUNIT), attribute bits and color.
pub fn char_shape(face_id: u16, base_size: i32, attrs: u32, rgb: [u8; 3]) -> Vec<u8> {
    let mut out = vec![0u8; 72];
    out[0..2].copy_from_slice(&face_id.to_le_bytes());
    out[42..46].copy_from_slice(&base_size.to_le_bytes());
    out[46..50].copy_from_slice(&attrs.to_le_bytes());
    out[52..55].copy_from_slice(&rgb);
    out
}

/// PARA_SHAPE payload with alignment code and outline level.
pub fn para_shape(align: u32, outline_level: u8) -> Vec<u8> {
    let mut out = vec![0u8; 54];
    out[0..4].copy_from_slice(&align.to_le_bytes());
    out[7] = outline_level;
    out
}

/// FACE_NAME payload.
pub fn face_name(name: &str) -> Vec<u8> {
    let units: Vec<u16> = name.encode_utf16().collect();
    let mut out = vec![0u8];
    out.extend_from_slice(&(units.len() as u16).to_le_bytes());
    out.extend(units.iter().flat_map(|u| u.to_le_bytes()));
    out
}

/// TABLE payload declaring a grid.
pub fn table_record(rows: u16, cols: u16) -> Vec<u8> {
    let mut out = 0u32.to_le_bytes().to_vec();
    out.extend_from_slice(&rows.to_le_bytes());
    out.extend_from_slice(&cols.to_le_bytes());
    out.extend_from_slice(&[0u8; 10]);
    out
}

/// SHAPE_COMPONENT_PICTURE payload referencing a binary asset.
pub fn picture_component(bin_id: u16) -> Vec<u8> {
    let mut out = vec![0u8; 80];
    out[74..76].copy_from_slice(&bin_id.to_le_bytes());
    out
}

/// Accumulates encoded records into one stream.
#[derive(Default)]
pub struct StreamBuilder {
    data: Vec<u8>,
}

impl StreamBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(mut self, tag: u16, level: u16, payload: &[u8]) -> Self {
        self.data.extend(encode_record(tag, level, payload));
        self
    }

    /// PARA_HEADER + PARA_TEXT for plain text (shifted tag numbering).
    pub fn paragraph(self, level: u16, text: &str) -> Self {
        let count = text.encode_utf16().count() as u32;
        self.record(66, level, &para_header(count, 0, 0))
            .record(67, level + 1, &utf16(text))
    }

    pub fn build(self) -> Vec<u8> {
        self.data
    }
}
