//! Error types for PPM I/O.
//!
//! Provides unified error handling for header scanning, pixel loading,
//! and serialization.

use std::io;
use thiserror::Error;

/// I/O operation error.
#[derive(Debug, Error)]
pub enum IoError {
    /// File I/O error while opening or reading.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Stream ended before the header was complete.
    #[error("header truncated: stream ended inside the header")]
    HeaderTruncated,

    /// The dimension and depth lines overran the scratch window.
    #[error("header too long: dimension and depth lines exceed {limit} bytes")]
    HeaderTooLong {
        /// Scratch window size in bytes, terminators included.
        limit: usize,
    },

    /// Captured header fields could not be parsed.
    #[error("malformed header: {reason}")]
    HeaderMalformed {
        /// What failed to parse.
        reason: String,
    },

    /// Parsed dimensions or depth exceed the configured bounds.
    #[error(
        "dimensions out of range: {width}x{height} depth {depth} \
         (extents must be 1..={max_dim}, depth at most 255)"
    )]
    DimensionOutOfRange {
        /// Parsed width.
        width: u32,
        /// Parsed height.
        height: u32,
        /// Parsed depth.
        depth: u32,
        /// Configured maximum for either extent.
        max_dim: u32,
    },

    /// Stream ended before all pixel samples were read.
    #[error("pixel data truncated: expected {expected} bytes, got {got}")]
    PixelDataTruncated {
        /// Bytes required by the header dimensions.
        expected: usize,
        /// Bytes actually read.
        got: usize,
    },

    /// Write to the output stream failed.
    #[error("write failed: {0}")]
    Write(#[source] io::Error),

    /// Image buffer error.
    #[error("image error: {0}")]
    Image(#[from] psf_core::Error),
}

/// Result type for PPM I/O operations.
pub type IoResult<T> = Result<T, IoError>;
