//! Point-spread-function sharpening.
//!
//! The filter is a single fixed 3x3 kernel applied to the interior of each
//! channel plane. Border pixels have no full neighborhood and keep their
//! input value.
//!
//! # Kernel
//!
//! [`Kernel::sharpen`] builds the matrix from a strength `K`: the eight
//! off-center weights are `-K/8` and the center weight is `K+1`, so the
//! weights always sum to 1 and uniform regions pass through unchanged.
//!
//! # Example
//!
//! ```rust
//! use psf_ops::filter::{convolve_plane, Kernel};
//!
//! let src = vec![128u8; 8 * 8];
//! let mut dst = src.clone();
//! let kernel = Kernel::sharpen(4.0);
//! convolve_plane(&src, &mut dst, 8, 8, &kernel).unwrap();
//! assert_eq!(dst, src); // uniform plane is a fixed point
//! ```

use crate::{OpsError, OpsResult};
use psf_core::{Channel, PlanarRgb};
use tracing::trace;

/// Default sharpening strength `K`.
pub const DEFAULT_STRENGTH: f64 = 4.0;

/// Fixed 3x3 convolution kernel.
///
/// Weights are stored row-major (index 4 is the center) and applied in
/// `f64`, matching the double-precision arithmetic the filter is defined
/// in. The kernel is built once from the configured strength and never
/// derived from image content.
#[derive(Debug, Clone, Copy)]
pub struct Kernel {
    /// Kernel weights in row-major order.
    pub weights: [f64; 9],
}

impl Kernel {
    /// Creates a sharpening kernel from a strength `K`.
    ///
    /// Off-center weights are `-K/8`, the center weight is `K+1`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use psf_ops::filter::Kernel;
    ///
    /// let k = Kernel::sharpen(4.0);
    /// assert_eq!(k.weights[4], 5.0);
    /// assert_eq!(k.weights[0], -0.5);
    /// ```
    pub fn sharpen(strength: f64) -> Self {
        let off = -strength / 8.0;
        let mut weights = [off; 9];
        weights[4] = strength + 1.0;
        Self { weights }
    }

    /// Sum of all weights.
    ///
    /// Equals 1 for every strength; this is what keeps uniform regions
    /// unchanged.
    pub fn sum(&self) -> f64 {
        self.weights.iter().sum()
    }
}

impl Default for Kernel {
    fn default() -> Self {
        Self::sharpen(DEFAULT_STRENGTH)
    }
}

/// Convolves the interior of a single channel plane.
///
/// `src` and `dst` are row-major planes of `width * height` samples.
/// Interior samples of `dst` are overwritten with the clamped weighted sum
/// of their 3x3 neighborhood in `src`; border samples of `dst` are left
/// untouched. Callers wanting copy-through borders pass a `dst` that
/// already holds the input samples.
///
/// Planes narrower or shorter than 3 have no interior and are returned
/// unchanged.
///
/// # Errors
///
/// Returns [`OpsError::InvalidDimensions`] if either slice length does not
/// match `width * height`.
pub fn convolve_plane(
    src: &[u8],
    dst: &mut [u8],
    width: usize,
    height: usize,
    kernel: &Kernel,
) -> OpsResult<()> {
    trace!(width, height, "convolve_plane");

    let expected = width * height;
    if src.len() != expected || dst.len() != expected {
        return Err(OpsError::InvalidDimensions(format!(
            "expected {} samples, got src {} / dst {}",
            expected,
            src.len(),
            dst.len()
        )));
    }

    convolve_interior(src, dst, width, height, kernel);
    Ok(())
}

/// Applies the kernel to every channel of an image.
///
/// The output starts as an exact copy of the input, so border pixels and
/// degenerate images (width or height below 3) come back unchanged. The
/// input image is never modified.
///
/// # Example
///
/// ```rust
/// use psf_core::{Channel, PlanarRgb};
/// use psf_ops::filter::{sharpen, Kernel};
///
/// let img = PlanarRgb::from_interleaved(2, 2, &[9; 12]).unwrap();
/// let out = sharpen(&img, &Kernel::default());
/// assert_eq!(out.plane(Channel::Red), img.plane(Channel::Red));
/// ```
pub fn sharpen(image: &PlanarRgb, kernel: &Kernel) -> PlanarRgb {
    trace!(width = image.width(), height = image.height(), "sharpen");

    let width = image.width() as usize;
    let height = image.height() as usize;

    // Copy-through: every output sample starts as its input sample.
    let mut out = image.clone();
    for channel in Channel::ALL {
        convolve_interior(image.plane(channel), out.plane_mut(channel), width, height, kernel);
    }
    out
}

/// Interior 3x3 weighted sum, row-major, clamped to [0, 255].
fn convolve_interior(src: &[u8], dst: &mut [u8], width: usize, height: usize, kernel: &Kernel) {
    if width < 3 || height < 3 {
        return;
    }

    for y in 1..height - 1 {
        for x in 1..width - 1 {
            let mut sum = 0.0f64;
            for ky in 0..3 {
                for kx in 0..3 {
                    let sample = src[(y + ky - 1) * width + (x + kx - 1)];
                    sum += kernel.weights[ky * 3 + kx] * sample as f64;
                }
            }
            dst[y * width + x] = sum.clamp(0.0, 255.0) as u8;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_kernel_sharpen_weights() {
        let k = Kernel::sharpen(4.0);
        assert_eq!(k.weights[4], 5.0);
        for (i, w) in k.weights.iter().enumerate() {
            if i != 4 {
                assert_eq!(*w, -0.5);
            }
        }
    }

    #[test]
    fn test_kernel_sum_is_one() {
        for strength in [0.0, 0.5, 1.0, 4.0, 7.3] {
            let k = Kernel::sharpen(strength);
            assert_relative_eq!(k.sum(), 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_kernel_default_strength() {
        let k = Kernel::default();
        assert_eq!(k.weights, Kernel::sharpen(DEFAULT_STRENGTH).weights);
    }

    #[test]
    fn test_uniform_plane_unchanged() {
        let src = vec![128u8; 8 * 6];
        let mut dst = src.clone();
        convolve_plane(&src, &mut dst, 8, 6, &Kernel::sharpen(4.0)).unwrap();
        assert_eq!(dst, src);
    }

    #[test]
    fn test_interior_hand_computed() {
        // Eight neighbors sum to 96: -0.5 * 96 + 5 * 40 = 152.
        let src = vec![
            10, 10, 10, //
            10, 40, 10, //
            10, 10, 26,
        ];
        let mut dst = src.clone();
        convolve_plane(&src, &mut dst, 3, 3, &Kernel::sharpen(4.0)).unwrap();
        assert_eq!(dst[4], 152);
        // Borders untouched
        assert_eq!(dst[0], 10);
        assert_eq!(dst[8], 26);
    }

    #[test]
    fn test_fraction_is_truncated() {
        // -0.5 * 97 + 5 * 40 = 151.5, stored as 151 (truncation, not rounding).
        let src = vec![
            10, 10, 10, //
            10, 40, 10, //
            10, 10, 27,
        ];
        let mut dst = src.clone();
        convolve_plane(&src, &mut dst, 3, 3, &Kernel::sharpen(4.0)).unwrap();
        assert_eq!(dst[4], 151);
    }

    #[test]
    fn test_clamp_high() {
        // 5 * 100 = 500 clamps to 255.
        let mut src = vec![0u8; 9];
        src[4] = 100;
        let mut dst = src.clone();
        convolve_plane(&src, &mut dst, 3, 3, &Kernel::sharpen(4.0)).unwrap();
        assert_eq!(dst[4], 255);
    }

    #[test]
    fn test_clamp_low() {
        // -0.5 * 8 * 255 = -1020 clamps to 0.
        let mut src = vec![255u8; 9];
        src[4] = 0;
        let mut dst = src.clone();
        convolve_plane(&src, &mut dst, 3, 3, &Kernel::sharpen(4.0)).unwrap();
        assert_eq!(dst[4], 0);
    }

    #[test]
    fn test_border_preserved() {
        let width = 5usize;
        let height = 4usize;
        let src: Vec<u8> = (0..width * height).map(|i| (i * 13 % 251) as u8).collect();
        let mut dst = src.clone();
        convolve_plane(&src, &mut dst, width, height, &Kernel::sharpen(4.0)).unwrap();

        for y in 0..height {
            for x in 0..width {
                if x == 0 || y == 0 || x == width - 1 || y == height - 1 {
                    assert_eq!(dst[y * width + x], src[y * width + x], "border ({x}, {y})");
                }
            }
        }
    }

    #[test]
    fn test_degenerate_plane_noop() {
        for (width, height) in [(2usize, 5usize), (5, 2), (1, 1)] {
            let src: Vec<u8> = (0..width * height).map(|i| i as u8).collect();
            let mut dst = src.clone();
            convolve_plane(&src, &mut dst, width, height, &Kernel::sharpen(4.0)).unwrap();
            assert_eq!(dst, src);
        }
    }

    #[test]
    fn test_length_mismatch_rejected() {
        let src = vec![0u8; 8];
        let mut dst = vec![0u8; 9];
        let err = convolve_plane(&src, &mut dst, 3, 3, &Kernel::default()).unwrap_err();
        assert!(matches!(err, OpsError::InvalidDimensions(_)));
    }

    #[test]
    fn test_sharpen_impulse() {
        let mut img = PlanarRgb::new(5, 5).unwrap();
        img.set_sample(Channel::Red, 2, 2, 100);

        let out = sharpen(&img, &Kernel::sharpen(4.0));

        // Center amplifies and clamps, neighbors go negative and clamp to 0.
        assert_eq!(out.sample(Channel::Red, 2, 2), 255);
        for (x, y) in [(1, 1), (2, 1), (3, 1), (1, 2), (3, 2), (1, 3), (2, 3), (3, 3)] {
            assert_eq!(out.sample(Channel::Red, x, y), 0);
        }
        // Borders and untouched channels stay zero.
        assert_eq!(out.sample(Channel::Red, 0, 0), 0);
        assert_eq!(out.sample(Channel::Red, 4, 4), 0);
        assert!(out.plane(Channel::Green).iter().all(|&s| s == 0));
        assert!(out.plane(Channel::Blue).iter().all(|&s| s == 0));

        // Input is untouched.
        assert_eq!(img.sample(Channel::Red, 2, 2), 100);
    }

    #[test]
    fn test_sharpen_degenerate_copy_through() {
        let data: Vec<u8> = (0..2 * 5 * 3).map(|i| (i * 11 % 256) as u8).collect();
        let img = PlanarRgb::from_interleaved(2, 5, &data).unwrap();
        let out = sharpen(&img, &Kernel::default());
        assert_eq!(out.to_interleaved().unwrap(), data);
    }
}
