//! Stream container abstraction.
//!
//! The decoder never opens the compound file itself. It asks a
//! [`StreamSource`] for named byte streams and inflates them when the
//! FileHeader says the document is compressed.

use std::collections::BTreeMap;
use std::io;

use flate2::{Decompress, FlushDecompress, Status};

use crate::error::Result;

/// Stream holding the file header.
pub const FILE_HEADER: &str = "FileHeader";
/// Stream holding the style tables.
pub const DOC_INFO: &str = "DocInfo";
/// Prefix of body section streams (`BodyText/Section0`, ...).
pub const SECTION_PREFIX: &str = "BodyText/Section";
/// Prefix of embedded binary assets.
pub const BIN_DATA_PREFIX: &str = "BinData/";
/// Plain text preview stream.
pub const PREVIEW_TEXT: &str = "PrvText";

/// Named byte streams of one document container.
pub trait StreamSource {
    /// List every stream name.
    ///
    /// An error here means the container cannot be read at all.
    fn stream_names(&self) -> Result<Vec<String>>;

    /// Read a stream's raw (possibly compressed) bytes.
    fn read_stream(&self, name: &str) -> Option<Vec<u8>>;

    /// Check whether a stream exists.
    fn has_stream(&self, name: &str) -> bool {
        self.read_stream(name).is_some()
    }
}

/// In-memory container keyed by stream name.
#[derive(Debug, Clone, Default)]
pub struct MemoryContainer {
    streams: BTreeMap<String, Vec<u8>>,
}

impl MemoryContainer {
    /// Create an empty container.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a stream.
    pub fn insert(&mut self, name: impl Into<String>, data: impl Into<Vec<u8>>) {
        self.streams.insert(name.into(), data.into());
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with_stream(mut self, name: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        self.insert(name, data);
        self
    }

    pub fn len(&self) -> usize {
        self.streams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.streams.is_empty()
    }
}

impl StreamSource for MemoryContainer {
    fn stream_names(&self) -> Result<Vec<String>> {
        Ok(self.streams.keys().cloned().collect())
    }

    fn read_stream(&self, name: &str) -> Option<Vec<u8>> {
        self.streams.get(name).cloned()
    }

    fn has_stream(&self, name: &str) -> bool {
        self.streams.contains_key(name)
    }
}

/// Inflate a raw-deflate stream.
///
/// The stream must reach its final block; running out of input first is
/// an error.
pub fn inflate_raw(data: &[u8]) -> io::Result<Vec<u8>> {
    let mut inflater = Decompress::new(false);
    let mut out = Vec::with_capacity(data.len().saturating_mul(4).max(64));

    loop {
        let consumed = inflater.total_in() as usize;
        let status = inflater
            .decompress_vec(&data[consumed.min(data.len())..], &mut out, FlushDecompress::None)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        match status {
            Status::StreamEnd => return Ok(out),
            _ if out.len() == out.capacity() => out.reserve(out.capacity()),
            _ => {
                return Err(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "deflate stream ended before its final block",
                ))
            }
        }
    }
}

/// Read a stream and inflate it when `compressed` is set.
///
/// A stream that fails to inflate is returned as stored.
pub fn read_decoded(source: &dyn StreamSource, name: &str, compressed: bool) -> Option<Vec<u8>> {
    let raw = source.read_stream(name)?;
    if !compressed {
        return Some(raw);
    }
    match inflate_raw(&raw) {
        Ok(data) => Some(data),
        Err(e) => {
            log::warn!("stream {} failed to inflate ({}), using stored bytes", name, e);
            Some(raw)
        }
    }
}

/// Section number of a `BodyText/SectionN` stream name.
pub fn section_index(name: &str) -> Option<u32> {
    name.strip_prefix(SECTION_PREFIX)?.parse().ok()
}

/// Section stream names sorted by their numeric suffix.
pub fn section_names(names: &[String]) -> Vec<String> {
    let mut sections: Vec<(u32, &String)> = names
        .iter()
        .filter_map(|name| section_index(name).map(|idx| (idx, name)))
        .collect();
    sections.sort_by_key(|(idx, _)| *idx);
    sections.into_iter().map(|(_, name)| name.clone()).collect()
}
