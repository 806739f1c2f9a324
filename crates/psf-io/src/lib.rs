//! # psf-io
//!
//! Restricted PPM reading and writing for the PSF-RS sharpening pipeline.
//!
//! The only format handled is binary PPM (P6) with the narrow header
//! shape the pipeline itself produces:
//!
//! ```text
//! P6                      format tag (discarded on read)
//! # comment               one comment line (discarded on read)
//! <width> <height>        decimal extents
//! <maxval>                at most 255
//! <interleaved RGB bytes> width * height * 3 samples
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use psf_io::ppm;
//!
//! let image = ppm::read("input.ppm")?;
//! ppm::write("output.ppm", &image)?;
//! # Ok::<(), psf_io::IoError>(())
//! ```
//!
//! Width and height are bounded (3000 by default, configurable through
//! [`PpmReader::with_max_dim`]); pixel buffers are allocated fallibly, so
//! a hostile header cannot abort the process.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod guard;
pub mod ppm;

pub use error::{IoError, IoResult};
pub use guard::OutputGuard;
pub use ppm::{read, write, PpmHeader, PpmReader, PpmWriter, DEFAULT_MAX_DIM};
