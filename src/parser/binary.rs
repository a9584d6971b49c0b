//! Little-endian field readers.
//!
//! Every reader returns `None` when the slice is too short, so a caller can
//! substitute the documented default for just that field.

use encoding_rs::UTF_16LE;
use zerocopy::{FromBytes, I32, LE, U16, U32};

/// Read a little-endian u16 at `offset`.
#[inline]
pub fn read_u16(data: &[u8], offset: usize) -> Option<u16> {
    let bytes = data.get(offset..offset.checked_add(2)?)?;
    U16::<LE>::read_from_bytes(bytes).ok().map(|v| v.get())
}

/// Read a little-endian u32 at `offset`.
#[inline]
pub fn read_u32(data: &[u8], offset: usize) -> Option<u32> {
    let bytes = data.get(offset..offset.checked_add(4)?)?;
    U32::<LE>::read_from_bytes(bytes).ok().map(|v| v.get())
}

/// Read a little-endian i32 at `offset`.
#[inline]
pub fn read_i32(data: &[u8], offset: usize) -> Option<i32> {
    let bytes = data.get(offset..offset.checked_add(4)?)?;
    I32::<LE>::read_from_bytes(bytes).ok().map(|v| v.get())
}

/// Read a single byte at `offset`.
#[inline]
pub fn read_u8(data: &[u8], offset: usize) -> Option<u8> {
    data.get(offset).copied()
}

/// Iterate over the complete UTF-16LE code units of a byte slice.
///
/// A trailing odd byte is ignored.
pub fn utf16_units(data: &[u8]) -> impl Iterator<Item = u16> + '_ {
    data.chunks_exact(2).filter_map(|pair| read_u16(pair, 0))
}

/// Byte length of UTF-16LE text up to (not including) the first NUL unit.
pub fn utf16_cstr_len(data: &[u8]) -> usize {
    data.chunks_exact(2)
        .position(|pair| pair == [0, 0])
        .map_or(data.len() & !1, |units| units * 2)
}

/// Decode UTF-16LE text without BOM sniffing.
///
/// Unpaired surrogates become U+FFFD.
pub fn decode_utf16(data: &[u8]) -> String {
    let (text, _) = UTF_16LE.decode_without_bom_handling(&data[..data.len() & !1]);
    text.into_owned()
}

/// Decode UTF-16LE text, stopping at the first NUL.
pub fn decode_utf16_cstr(data: &[u8]) -> String {
    decode_utf16(&data[..utf16_cstr_len(data)])
}
