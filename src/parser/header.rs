//! `FileHeader` stream decoding.
//!
//! ```text
//! 0..32   signature "HWP Document File", NUL padded
//! 32..36  version (revision, build, minor, major as bytes)
//! 36..40  property flags
//! ```

use std::fmt;

use super::binary::read_u32;

/// Signature at the start of the FileHeader stream.
pub const SIGNATURE: &str = "HWP Document File";

const SIGNATURE_LEN: usize = 32;
const VERSION_OFFSET: usize = 32;
const FLAGS_OFFSET: usize = 36;

const FLAG_COMPRESSED: u32 = 1 << 0;
const FLAG_PASSWORD: u32 = 1 << 1;
const FLAG_DISTRIBUTION: u32 = 1 << 2;

/// Format version `major.minor.build.revision`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct HwpVersion {
    pub major: u8,
    pub minor: u8,
    pub build: u8,
    pub revision: u8,
}

impl HwpVersion {
    /// Unpack the version dword.
    pub fn from_dword(dword: u32) -> Self {
        let [revision, build, minor, major] = dword.to_le_bytes();
        Self {
            major,
            minor,
            build,
            revision,
        }
    }
}

impl fmt::Display for HwpVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}.{}", self.major, self.minor, self.build, self.revision)
    }
}

/// Decoded FileHeader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHeader {
    /// Signature text with padding removed
    pub signature: String,
    pub version: HwpVersion,
    /// Streams are raw-deflate compressed
    pub compressed: bool,
    /// Document is password protected
    pub password: bool,
    /// Distribution document (body streams are encrypted)
    pub distribution: bool,
}

impl Default for FileHeader {
    /// Header assumed when the stream is missing: compressed, no protection.
    fn default() -> Self {
        Self {
            signature: String::new(),
            version: HwpVersion::default(),
            compressed: true,
            password: false,
            distribution: false,
        }
    }
}

impl FileHeader {
    /// Decode a FileHeader stream; fields that do not fit keep defaults.
    pub fn parse(data: &[u8]) -> Self {
        let mut header = Self::default();

        let raw = &data[..data.len().min(SIGNATURE_LEN)];
        let end = raw.iter().position(|&b| b == 0).unwrap_or(raw.len());
        header.signature = String::from_utf8_lossy(&raw[..end]).trim().to_string();

        if let Some(version) = read_u32(data, VERSION_OFFSET) {
            header.version = HwpVersion::from_dword(version);
        }
        if let Some(flags) = read_u32(data, FLAGS_OFFSET) {
            header.compressed = flags & FLAG_COMPRESSED != 0;
            header.password = flags & FLAG_PASSWORD != 0;
            header.distribution = flags & FLAG_DISTRIBUTION != 0;
        }

        header
    }

    /// Whether the signature matches an HWP 5.x file.
    pub fn has_valid_signature(&self) -> bool {
        self.signature == SIGNATURE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header_bytes(version: u32, flags: u32) -> Vec<u8> {
        let mut data = vec![0u8; 256];
        data[..SIGNATURE.len()].copy_from_slice(SIGNATURE.as_bytes());
        data[32..36].copy_from_slice(&version.to_le_bytes());
        data[36..40].copy_from_slice(&flags.to_le_bytes());
        data
    }

    #[test]
    fn test_parse_header() {
        let header = FileHeader::parse(&header_bytes(0x0501_0007, FLAG_COMPRESSED | FLAG_DISTRIBUTION));

        assert!(header.has_valid_signature());
        assert_eq!(header.version.to_string(), "5.1.0.7");
        assert!(header.compressed);
        assert!(!header.password);
        assert!(header.distribution);
    }

    #[test]
    fn test_uncompressed_flag() {
        let header = FileHeader::parse(&header_bytes(0x0500_0000, 0));
        assert!(!header.compressed);
        assert_eq!(header.version.major, 5);
    }

    #[test]
    fn test_short_stream_defaults() {
        let header = FileHeader::parse(b"HWP Document File");
        assert!(header.has_valid_signature());
        assert!(header.compressed);
        assert_eq!(header.version, HwpVersion::default());

        let empty = FileHeader::parse(&[]);
        assert!(!empty.has_valid_signature());
        assert_eq!(empty, FileHeader::default());
    }

    #[test]
    fn test_version_ordering() {
        assert!(HwpVersion::from_dword(0x0501_0000) > HwpVersion::from_dword(0x0500_0607));
    }
}
