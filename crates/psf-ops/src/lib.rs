//! # psf-ops
//!
//! Sharpening operations for planar 8-bit images.
//!
//! This crate provides the convolution engine of the PSF-RS pipeline:
//! a fixed 3x3 point-spread-function kernel applied independently to each
//! color plane of a [`psf_core::PlanarRgb`].
//!
//! # Modules
//!
//! - [`filter`] - Kernel construction and convolution
//!
//! # Example
//!
//! ```rust
//! use psf_core::PlanarRgb;
//! use psf_ops::filter::{sharpen, Kernel};
//!
//! let img = PlanarRgb::new(16, 16).unwrap();
//! let kernel = Kernel::sharpen(4.0);
//! let out = sharpen(&img, &kernel);
//! assert_eq!(out.width(), 16);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod filter;

pub use error::{OpsError, OpsResult};
pub use filter::{sharpen, Kernel, DEFAULT_STRENGTH};
