//! Error types for unhwp library.
//!
//! Only failures that make the whole document unreadable are reported as
//! errors. Missing streams, truncated records and short fields are absorbed
//! by the decoder and replaced with defaults.

use std::io;
use thiserror::Error;

/// Result type alias for unhwp operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during HWP processing.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The file format is not recognized as an HWP family document.
    #[error("Unknown file format: not a valid HWP document")]
    UnknownFormat,

    /// The file belongs to the HWP family but is not decoded by this crate.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// The container cannot be opened or enumerated.
    #[error("Container unreadable: {0}")]
    Container(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}
