//! HWP family format detection.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Document format identified from the leading bytes of a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwpFormat {
    /// HWP 5.x binary document stored in an OLE compound file.
    Hwp5,
    /// OWPML package (ZIP + XML), the sibling packaging variant.
    Hwpx,
    /// HWP 3.x legacy document with its own flat layout.
    Hwp3,
}

impl HwpFormat {
    /// Whether this crate decodes the format.
    pub fn is_supported(&self) -> bool {
        matches!(self, HwpFormat::Hwp5)
    }
}

impl std::fmt::Display for HwpFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HwpFormat::Hwp5 => write!(f, "HWP 5.x"),
            HwpFormat::Hwpx => write!(f, "HWPX"),
            HwpFormat::Hwp3 => write!(f, "HWP 3.x"),
        }
    }
}

/// OLE compound file signature.
const OLE_MAGIC: &[u8] = &[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];
/// ZIP local file header signature.
const ZIP_MAGIC: &[u8] = b"PK\x03\x04";
/// HWP 3.x files start with this signature instead of a container.
const HWP3_MAGIC: &[u8] = b"HWP Document File V3";

/// Number of leading bytes needed to tell the formats apart.
const SNIFF_LEN: usize = 32;

/// Detect the format of a file on disk.
///
/// # Example
/// ```no_run
/// use unhwp::detect::detect_format_from_path;
///
/// let format = detect_format_from_path("report.hwp").unwrap();
/// println!("format: {}", format);
/// ```
pub fn detect_format_from_path<P: AsRef<Path>>(path: P) -> Result<HwpFormat> {
    let file = File::open(path)?;
    let mut header = Vec::with_capacity(SNIFF_LEN);
    file.take(SNIFF_LEN as u64).read_to_end(&mut header)?;
    detect_format_from_bytes(&header)
}

/// Detect the format from the leading bytes of a file.
///
/// # Returns
/// * `Ok(HwpFormat)` when a known signature is present
/// * `Err(Error::UnknownFormat)` otherwise
pub fn detect_format_from_bytes(data: &[u8]) -> Result<HwpFormat> {
    if data.starts_with(OLE_MAGIC) {
        return Ok(HwpFormat::Hwp5);
    }
    if data.starts_with(ZIP_MAGIC) {
        return Ok(HwpFormat::Hwpx);
    }
    if data.starts_with(HWP3_MAGIC) {
        return Ok(HwpFormat::Hwp3);
    }
    Err(Error::UnknownFormat)
}

/// Check that bytes belong to a format this crate decodes.
///
/// Returns `Err(Error::UnsupportedFormat)` for the sibling variants so callers
/// can route them elsewhere.
pub fn ensure_supported(data: &[u8]) -> Result<HwpFormat> {
    let format = detect_format_from_bytes(data)?;
    if !format.is_supported() {
        return Err(Error::UnsupportedFormat(format.to_string()));
    }
    Ok(format)
}

/// Check if a file looks like an HWP 5.x document.
pub fn is_hwp<P: AsRef<Path>>(path: P) -> bool {
    matches!(detect_format_from_path(path), Ok(HwpFormat::Hwp5))
}

/// Check if bytes look like an HWP 5.x document.
pub fn is_hwp_bytes(data: &[u8]) -> bool {
    matches!(detect_format_from_bytes(data), Ok(HwpFormat::Hwp5))
}
