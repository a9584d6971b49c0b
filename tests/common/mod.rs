//! Shared builders for integration tests.
#![allow(dead_code)]

use std::io::Write;

use flate2::write::DeflateEncoder;
use flate2::Compression;
use unhwp::MemoryContainer;

pub const PARA_HEADER: u16 = 66;
pub const PARA_TEXT: u16 = 67;
pub const PARA_CHAR_SHAPE: u16 = 68;
pub const CTRL_HEADER: u16 = 71;
pub const LIST_HEADER: u16 = 72;
pub const TABLE: u16 = 77;
pub const PICTURE: u16 = 85;

pub const FACE_NAME: u16 = 19;
pub const CHAR_SHAPE: u16 = 21;
pub const PARA_SHAPE: u16 = 25;

/// Encode one record header and payload.
pub fn encode_record(tag: u16, level: u16, payload: &[u8]) -> Vec<u8> {
    let size = payload.len() as u32;
    let inline = size.min(0xFFF);
    let dword = (tag as u32 & 0x3FF) | ((level as u32 & 0x3FF) << 10) | (inline << 20);
    let mut out = dword.to_le_bytes().to_vec();
    if inline == 0xFFF {
        out.extend_from_slice(&size.to_le_bytes());
    }
    out.extend_from_slice(payload);
    out
}

pub fn utf16(text: &str) -> Vec<u8> {
    text.encode_utf16().flat_map(|u| u.to_le_bytes()).collect()
}

/// Little-endian control id of a four character name.
pub fn ctrl(name: &[u8; 4]) -> [u8; 4] {
    u32::from_be_bytes(*name).to_le_bytes()
}

/// An eight unit control block in PARA_TEXT.
pub fn ctrl_block(code: u16, name: &[u8; 4]) -> Vec<u8> {
    let mut out = code.to_le_bytes().to_vec();
    out.extend_from_slice(&ctrl(name));
    out.extend_from_slice(&[0u8; 8]);
    out.extend_from_slice(&code.to_le_bytes());
    out
}

pub fn para_header(char_count: u32, para_shape: u16, shape_pairs: u16) -> Vec<u8> {
    let mut out = vec![0u8; 22];
    out[0..4].copy_from_slice(&char_count.to_le_bytes());
    out[8..10].copy_from_slice(&para_shape.to_le_bytes());
    out[12..14].copy_from_slice(&shape_pairs.to_le_bytes());
    out
}

pub fn char_shape_runs(pairs: &[(u32, u32)]) -> Vec<u8> {
    pairs
        .iter()
        .flat_map(|(pos, id)| pos.to_le_bytes().into_iter().chain(id.to_le_bytes()))
        .collect()
}

pub fn char_shape(face_id: u16, base_size: i32, attrs: u32, rgb: [u8; 3]) -> Vec<u8> {
    let mut out = vec![0u8; 72];
    out[0..2].copy_from_slice(&face_id.to_le_bytes());
    out[42..46].copy_from_slice(&base_size.to_le_bytes());
    out[46..50].copy_from_slice(&attrs.to_le_bytes());
    out[52..55].copy_from_slice(&rgb);
    out
}

pub fn para_shape(align: u32, outline_level: u8) -> Vec<u8> {
    let mut out = vec![0u8; 54];
    out[0..4].copy_from_slice(&align.to_le_bytes());
    out[7] = outline_level;
    out
}

pub fn face_name(name: &str) -> Vec<u8> {
    let units: Vec<u16> = name.encode_utf16().collect();
    let mut out = vec![0u8];
    out.extend_from_slice(&(units.len() as u16).to_le_bytes());
    out.extend(units.iter().flat_map(|u| u.to_le_bytes()));
    out
}

pub fn table_record(rows: u16, cols: u16) -> Vec<u8> {
    let mut out = vec![0u8; 18];
    out[4..6].copy_from_slice(&rows.to_le_bytes());
    out[6..8].copy_from_slice(&cols.to_le_bytes());
    out
}

pub fn picture_component(bin_id: u16) -> Vec<u8> {
    let mut out = vec![0u8; 80];
    out[74..76].copy_from_slice(&bin_id.to_le_bytes());
    out
}

/// FileHeader stream with version 5.1.0.0 and the given flags.
pub fn file_header(flags: u32) -> Vec<u8> {
    let mut data = vec![0u8; 256];
    data[..17].copy_from_slice(b"HWP Document File");
    data[32..36].copy_from_slice(&0x0501_0000u32.to_le_bytes());
    data[36..40].copy_from_slice(&flags.to_le_bytes());
    data
}

pub fn deflate(data: &[u8]) -> Vec<u8> {
    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

/// Accumulates records into one stream.
#[derive(Default)]
pub struct Stream {
    data: Vec<u8>,
}

impl Stream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(mut self, tag: u16, level: u16, payload: &[u8]) -> Self {
        self.data.extend(encode_record(tag, level, payload));
        self
    }

    /// Plain paragraph: PARA_HEADER + PARA_TEXT.
    pub fn paragraph(self, level: u16, text: &str) -> Self {
        let count = text.encode_utf16().count() as u32;
        self.record(PARA_HEADER, level, &para_header(count, 0, 0))
            .record(PARA_TEXT, level + 1, &utf16(text))
    }

    /// Paragraph with one char shape applied from position 0.
    pub fn styled_paragraph(self, level: u16, text: &str, para_shape: u16, char_shape: u32) -> Self {
        let count = text.encode_utf16().count() as u32;
        self.record(PARA_HEADER, level, &para_header(count, para_shape, 1))
            .record(PARA_TEXT, level + 1, &utf16(text))
            .record(PARA_CHAR_SHAPE, level + 1, &char_shape_runs(&[(0, char_shape)]))
    }

    pub fn control(self, level: u16, name: &[u8; 4]) -> Self {
        self.record(CTRL_HEADER, level, &ctrl(name))
    }

    /// Cell boundary followed by a single paragraph.
    pub fn cell(self, level: u16, text: &str) -> Self {
        self.record(LIST_HEADER, level, &[0u8; 8]).paragraph(level, text)
    }

    pub fn build(self) -> Vec<u8> {
        self.data
    }
}

/// Uncompressed container with a FileHeader and the given sections.
pub fn plain_document(sections: Vec<Vec<u8>>) -> MemoryContainer {
    let mut container = MemoryContainer::new().with_stream("FileHeader", file_header(0));
    for (idx, section) in sections.into_iter().enumerate() {
        container.insert(format!("BodyText/Section{}", idx), section);
    }
    container
}
