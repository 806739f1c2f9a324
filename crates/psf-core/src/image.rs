//! Planar image buffer types.
//!
//! This module provides the image container used by the sharpening pipeline:
//! - [`PlanarRgb`] - Owned 8-bit RGB image with one buffer per channel
//! - [`Channel`] - Names for the three planes
//!
//! # Memory Layout
//!
//! Each channel is an independent contiguous buffer of `width * height`
//! samples in row-major order, top-to-bottom:
//!
//! ```text
//! red:   [R R R R ...]  ← row 0, then row 1, ...
//! green: [G G G G ...]
//! blue:  [B B B B ...]
//! ```
//!
//! PPM files interleave samples per pixel (`R G B R G B ...`);
//! [`PlanarRgb::from_interleaved`] and [`PlanarRgb::to_interleaved`] convert
//! between the two layouts.
//!
//! # Usage
//!
//! ```rust
//! use psf_core::{Channel, PlanarRgb};
//!
//! let mut img = PlanarRgb::new(4, 3).unwrap();
//! img.set_sample(Channel::Red, 1, 2, 200);
//! assert_eq!(img.sample(Channel::Red, 1, 2), 200);
//! assert_eq!(img.sample(Channel::Green, 1, 2), 0);
//! ```
//!
//! # Dependencies
//!
//! - [`crate::error::Error`] - Error types
//!
//! # Used By
//!
//! - `psf-io` - PPM loading/saving
//! - `psf-ops` - Sharpening convolution

use crate::{Error, Result};

/// One of the three color planes of a [`PlanarRgb`] image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    /// Red plane.
    Red,
    /// Green plane.
    Green,
    /// Blue plane.
    Blue,
}

impl Channel {
    /// All three channels, in the order samples appear within a pixel.
    pub const ALL: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];
}

/// Owned 8-bit RGB image stored as three channel planes.
///
/// Each plane holds exactly `width * height` samples in row-major order.
/// Cloning performs a deep copy of all three planes, which is how the
/// pipeline initializes an output image to its copy-through state before
/// convolving the interior.
///
/// # Example
///
/// ```rust
/// use psf_core::{Channel, PlanarRgb};
///
/// let img = PlanarRgb::from_interleaved(2, 1, &[10, 20, 30, 40, 50, 60]).unwrap();
/// assert_eq!(img.plane(Channel::Red), &[10, 40]);
/// assert_eq!(img.plane(Channel::Green), &[20, 50]);
/// assert_eq!(img.plane(Channel::Blue), &[30, 60]);
/// ```
#[derive(Debug, Clone)]
pub struct PlanarRgb {
    /// Red samples, row-major
    red: Vec<u8>,
    /// Green samples, row-major
    green: Vec<u8>,
    /// Blue samples, row-major
    blue: Vec<u8>,
    /// Image width in pixels
    width: u32,
    /// Image height in pixels
    height: u32,
}

impl PlanarRgb {
    /// Creates a new image with all samples set to zero.
    ///
    /// # Arguments
    ///
    /// * `width` - Image width in pixels (must be non-zero)
    /// * `height` - Image height in pixels (must be non-zero)
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if either extent is zero or the
    /// sample count overflows, and [`Error::AllocationFailed`] if a plane
    /// cannot be allocated.
    ///
    /// # Example
    ///
    /// ```rust
    /// use psf_core::PlanarRgb;
    ///
    /// let img = PlanarRgb::new(640, 480).unwrap();
    /// assert_eq!(img.pixel_count(), 640 * 480);
    /// ```
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let count = checked_pixel_count(width, height)?;
        let mut red = try_alloc(count)?;
        let mut green = try_alloc(count)?;
        let mut blue = try_alloc(count)?;
        red.resize(count, 0);
        green.resize(count, 0);
        blue.resize(count, 0);
        Ok(Self {
            red,
            green,
            blue,
            width,
            height,
        })
    }

    /// Creates an image by de-interleaving a packed RGB byte stream.
    ///
    /// The input must contain exactly `width * height` pixels of three bytes
    /// each, in red-green-blue order, row-major.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if the data length does not match
    /// the dimensions, and [`Error::AllocationFailed`] if a plane cannot be
    /// allocated.
    pub fn from_interleaved(width: u32, height: u32, data: &[u8]) -> Result<Self> {
        let count = checked_pixel_count(width, height)?;
        let expected = count.checked_mul(3).ok_or_else(|| {
            Error::invalid_dimensions(width, height, "sample count overflows usize")
        })?;
        if data.len() != expected {
            return Err(Error::invalid_dimensions(
                width,
                height,
                format!("expected {} bytes, got {}", expected, data.len()),
            ));
        }

        let mut red = try_alloc(count)?;
        let mut green = try_alloc(count)?;
        let mut blue = try_alloc(count)?;
        for pixel in data.chunks_exact(3) {
            red.push(pixel[0]);
            green.push(pixel[1]);
            blue.push(pixel[2]);
        }
        Ok(Self {
            red,
            green,
            blue,
            width,
            height,
        })
    }

    /// Packs the three planes back into an interleaved RGB byte stream.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if the interleaved byte count
    /// would overflow `usize`, and [`Error::AllocationFailed`] if the
    /// output buffer cannot be allocated.
    pub fn to_interleaved(&self) -> Result<Vec<u8>> {
        let count = self.pixel_count();
        let total = count.checked_mul(3).ok_or_else(|| {
            Error::invalid_dimensions(self.width, self.height, "sample count overflows usize")
        })?;
        let mut data = try_alloc(total)?;
        for i in 0..count {
            data.push(self.red[i]);
            data.push(self.green[i]);
            data.push(self.blue[i]);
        }
        Ok(data)
    }

    /// Image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of pixels (and samples per plane).
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Borrows one channel plane.
    #[inline]
    pub fn plane(&self, channel: Channel) -> &[u8] {
        match channel {
            Channel::Red => &self.red,
            Channel::Green => &self.green,
            Channel::Blue => &self.blue,
        }
    }

    /// Mutably borrows one channel plane.
    #[inline]
    pub fn plane_mut(&mut self, channel: Channel) -> &mut [u8] {
        match channel {
            Channel::Red => &mut self.red,
            Channel::Green => &mut self.green,
            Channel::Blue => &mut self.blue,
        }
    }

    /// Returns the sample at `(x, y)` in the given channel.
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    #[inline]
    pub fn sample(&self, channel: Channel, x: u32, y: u32) -> u8 {
        self.plane(channel)[self.sample_index(x, y)]
    }

    /// Sets the sample at `(x, y)` in the given channel.
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    #[inline]
    pub fn set_sample(&mut self, channel: Channel, x: u32, y: u32, value: u8) {
        let index = self.sample_index(x, y);
        self.plane_mut(channel)[index] = value;
    }

    #[inline]
    fn sample_index(&self, x: u32, y: u32) -> usize {
        assert!(x < self.width && y < self.height, "sample ({x}, {y}) out of bounds");
        y as usize * self.width as usize + x as usize
    }
}

/// Validates extents and returns the per-plane sample count.
fn checked_pixel_count(width: u32, height: u32) -> Result<usize> {
    if width == 0 || height == 0 {
        return Err(Error::invalid_dimensions(
            width,
            height,
            "width and height must be non-zero",
        ));
    }
    (width as usize)
        .checked_mul(height as usize)
        .ok_or_else(|| Error::invalid_dimensions(width, height, "sample count overflows usize"))
}

/// Reserves an empty buffer of the given capacity, failing instead of aborting.
fn try_alloc(len: usize) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len)
        .map_err(|e| Error::allocation_failed(len, e.to_string()))?;
    Ok(buf)
}
