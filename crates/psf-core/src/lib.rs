//! # psf-core
//!
//! Core types for the PSF-RS sharpening pipeline.
//!
//! This crate provides the foundational types used throughout PSF-RS:
//!
//! - [`PlanarRgb`] - Owned 8-bit image buffer with one plane per color channel
//! - [`Channel`] - Names for the red, green, and blue planes
//! - [`Error`] / [`Result`] - Unified error handling
//!
//! ## Design Philosophy
//!
//! Images are stored **planar**: three independent sample buffers, one per
//! channel, rather than one interleaved buffer. The convolution engine walks
//! a single contiguous plane at a time, and the I/O layer converts between
//! the planar layout and the interleaved byte stream found in PPM files.
//!
//! Buffer allocation is fallible. Constructors reserve memory through
//! [`Vec::try_reserve_exact`] and surface exhaustion as
//! [`Error::AllocationFailed`] instead of aborting the process.
//!
//! ## Crate Structure
//!
//! This crate is the foundation of PSF-RS and has no internal dependencies.
//! The library crates build directly on it:
//!
//! ```text
//! psf-core (this crate)
//!    ^
//!    |
//!    +-- psf-io  (PPM reading/writing)
//!    +-- psf-ops (sharpening convolution)
//! ```
//!
//! The `psf` binary in `psf-cli` drives both through their public APIs.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod image;

// Re-exports for convenience
pub use error::{Error, Result};
pub use image::{Channel, PlanarRgb};
