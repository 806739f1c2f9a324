//! Error types for psf-core operations.
//!
//! This module provides the error handling used by the image buffer types.
//!
//! # Overview
//!
//! The [`Error`] enum covers the failure modes of buffer construction:
//! - Dimension validation (zero extents, size overflow, data length mismatch)
//! - Memory allocation
//!
//! # Usage
//!
//! ```rust
//! use psf_core::{Error, Result};
//!
//! fn check_extent(width: u32, height: u32) -> Result<()> {
//!     if width == 0 || height == 0 {
//!         return Err(Error::invalid_dimensions(
//!             width,
//!             height,
//!             "width and height must be non-zero",
//!         ));
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Dependencies
//!
//! - [`thiserror`] - For derive macro error implementation
//!
//! # Used By
//!
//! - [`crate::image::PlanarRgb`] - Buffer construction
//! - `psf-io` - Wrapped into its `IoError` for load/save paths

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
///
/// Convenience alias for `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building image buffers.
///
/// This enum uses [`thiserror`] for automatic [`std::error::Error`] and
/// [`std::fmt::Display`] implementations.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid image dimensions.
    ///
    /// Returned when width or height is zero, when the sample count would
    /// overflow `usize`, or when supplied pixel data does not match the
    /// declared dimensions.
    ///
    /// # Example
    ///
    /// ```rust
    /// use psf_core::Error;
    ///
    /// let err = Error::invalid_dimensions(0, 480, "width and height must be non-zero");
    /// assert!(err.to_string().contains("0x480"));
    /// ```
    #[error("invalid dimensions: {width}x{height} ({reason})")]
    InvalidDimensions {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
        /// Reason why dimensions are invalid
        reason: String,
    },

    /// Memory allocation failed.
    ///
    /// Returned when the system cannot reserve enough memory for a channel
    /// plane. This typically happens with very large images.
    ///
    /// # Fields
    ///
    /// - `requested` - Number of bytes requested
    /// - `reason` - Description of why allocation failed
    #[error("failed to allocate {requested} bytes: {reason}")]
    AllocationFailed {
        /// Bytes requested
        requested: usize,
        /// Failure reason
        reason: String,
    },
}

impl Error {
    /// Creates an [`Error::InvalidDimensions`] error.
    #[inline]
    pub fn invalid_dimensions(width: u32, height: u32, reason: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            width,
            height,
            reason: reason.into(),
        }
    }

    /// Creates an [`Error::AllocationFailed`] error.
    #[inline]
    pub fn allocation_failed(requested: usize, reason: impl Into<String>) -> Self {
        Self::AllocationFailed {
            requested,
            reason: reason.into(),
        }
    }

    /// Returns `true` if this is a dimension error.
    #[inline]
    pub fn is_dimension_error(&self) -> bool {
        matches!(self, Self::InvalidDimensions { .. })
    }

    /// Returns `true` if this is an allocation error.
    #[inline]
    pub fn is_allocation_error(&self) -> bool {
        matches!(self, Self::AllocationFailed { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_dimensions() {
        let err = Error::invalid_dimensions(0, 480, "width and height must be non-zero");
        let msg = err.to_string();
        assert!(msg.contains("0x480"));
        assert!(msg.contains("non-zero"));
        assert!(err.is_dimension_error());
        assert!(!err.is_allocation_error());
    }

    #[test]
    fn test_allocation_failed() {
        let err = Error::allocation_failed(9_000_000, "out of memory");
        assert!(err.to_string().contains("9000000"));
        assert!(err.to_string().contains("out of memory"));
        assert!(err.is_allocation_error());
    }
}
