//! Restricted binary PPM (P6) support.
//!
//! The reader matches the narrow header shape this pipeline emits: exactly
//! two preamble lines (format tag and comment, both discarded unread),
//! then a `width height` line and a `maxval` line, followed immediately by
//! interleaved 8-bit RGB samples. It is not a general pixel-map reader:
//! comments elsewhere in the header, 16-bit depth, and the plain-text
//! variants are out of scope.
//!
//! Header scanning is an explicit state machine over a [`BufRead`] source
//! (skip preamble -> capture dimensions -> done), so the stream position
//! after the header lands exactly on the first pixel byte. The dimension
//! and depth lines are captured into a bounded scratch window; overrunning
//! it is a malformed file, not a resize.

use crate::{IoError, IoResult};
use psf_core::PlanarRgb;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;
use tracing::{debug, trace};

/// Format tag emitted on the first output line.
const PPM_MAGIC: &str = "P6";

/// Comment emitted on the second output line, without the leading `#`.
const DEFAULT_COMMENT: &str = "sharpened with a 3x3 point-spread function";

/// Largest depth accepted on read; also the depth every output declares.
const PPM_MAX_VAL: u32 = 255;

/// Largest width or height accepted by default.
pub const DEFAULT_MAX_DIM: u32 = 3000;

/// Scratch window for the dimension and depth lines, terminators included.
const HEADER_SCRATCH: usize = 22;

/// Preamble lines discarded before capture starts.
const PREAMBLE_LINES: usize = 2;

/// Captured line terminators that complete the header.
const CAPTURE_LINES: usize = 2;

/// Parsed dimension and depth fields of a PPM header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PpmHeader {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Declared maximum sample value.
    ///
    /// Bounded to 255 on read, reported for diagnostics, and otherwise
    /// unused: samples are always one byte and output always declares 255.
    pub max_val: u32,
}

/// Header scanner state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    /// Discarding the format tag and comment lines.
    SkipPreamble,
    /// Accumulating the dimension and depth lines into the scratch window.
    CaptureDimensions,
    /// Second captured terminator seen; the next byte is pixel data.
    Done,
}

/// Reader for the restricted PPM shape.
///
/// # Example
///
/// ```rust,no_run
/// use psf_io::ppm::PpmReader;
///
/// let reader = PpmReader::new().with_max_dim(1024);
/// let image = reader.read("input.ppm")?;
/// # Ok::<(), psf_io::IoError>(())
/// ```
#[derive(Debug, Clone)]
pub struct PpmReader {
    max_dim: u32,
}

impl PpmReader {
    /// Creates a reader with the default dimension bound.
    pub fn new() -> Self {
        Self {
            max_dim: DEFAULT_MAX_DIM,
        }
    }

    /// Sets the largest accepted width or height.
    pub fn with_max_dim(mut self, max_dim: u32) -> Self {
        self.max_dim = max_dim;
        self
    }

    /// Reads a PPM file from disk.
    pub fn read<P: AsRef<Path>>(&self, path: P) -> IoResult<PlanarRgb> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        self.read_from(&mut reader)
    }

    /// Reads a PPM image from an open stream.
    pub fn read_from<R: BufRead>(&self, reader: &mut R) -> IoResult<PlanarRgb> {
        let header = self.read_header(reader)?;
        read_pixels(reader, header.width, header.height)
    }

    /// Parses the header, leaving the stream positioned on the first pixel
    /// byte.
    ///
    /// # Errors
    ///
    /// - [`IoError::HeaderTruncated`] if the stream ends inside the header
    /// - [`IoError::HeaderTooLong`] if the dimension and depth lines
    ///   overrun the scratch window
    /// - [`IoError::HeaderMalformed`] if the captured fields do not parse
    /// - [`IoError::DimensionOutOfRange`] if an extent is zero or above
    ///   the configured bound, or the depth exceeds 255
    pub fn read_header<R: BufRead>(&self, reader: &mut R) -> IoResult<PpmHeader> {
        let scratch = scan_header(reader)?;
        let header = parse_scratch(&scratch)?;

        if header.width == 0
            || header.height == 0
            || header.width > self.max_dim
            || header.height > self.max_dim
            || header.max_val > PPM_MAX_VAL
        {
            return Err(IoError::DimensionOutOfRange {
                width: header.width,
                height: header.height,
                depth: header.max_val,
                max_dim: self.max_dim,
            });
        }

        debug!(
            width = header.width,
            height = header.height,
            max_val = header.max_val,
            "ppm header"
        );
        Ok(header)
    }
}

impl Default for PpmReader {
    fn default() -> Self {
        Self::new()
    }
}

/// Writer emitting the fixed four-line header and interleaved samples.
///
/// The depth line is always `255`, regardless of what the input declared.
#[derive(Debug, Clone)]
pub struct PpmWriter {
    comment: String,
}

impl PpmWriter {
    /// Creates a writer with the default comment line.
    pub fn new() -> Self {
        Self {
            comment: DEFAULT_COMMENT.to_string(),
        }
    }

    /// Replaces the comment line; the leading `# ` is added when writing.
    ///
    /// The comment must be a single line without terminators.
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    /// Writes a PPM file to disk.
    pub fn write<P: AsRef<Path>>(&self, path: P, image: &PlanarRgb) -> IoResult<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.write_to(&mut writer, image)?;
        writer.flush().map_err(IoError::Write)
    }

    /// Serializes an image to an open stream.
    ///
    /// Flushing a buffered `writer` is the caller's responsibility.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Write`] if any part of the stream cannot be
    /// written.
    pub fn write_to<W: Write>(&self, writer: &mut W, image: &PlanarRgb) -> IoResult<()> {
        trace!(width = image.width(), height = image.height(), "write ppm");
        let pixels = image.to_interleaved()?;
        self.emit(writer, image, &pixels).map_err(IoError::Write)
    }

    fn emit<W: Write>(&self, writer: &mut W, image: &PlanarRgb, pixels: &[u8]) -> io::Result<()> {
        writeln!(writer, "{}", PPM_MAGIC)?;
        writeln!(writer, "# {}", self.comment)?;
        writeln!(writer, "{} {}", image.width(), image.height())?;
        writeln!(writer, "{}", PPM_MAX_VAL)?;
        writer.write_all(pixels)
    }
}

impl Default for PpmWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Reads a PPM file with the default dimension bound.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<PlanarRgb> {
    PpmReader::new().read(path)
}

/// Writes a PPM file with the default comment.
pub fn write<P: AsRef<Path>>(path: P, image: &PlanarRgb) -> IoResult<()> {
    PpmWriter::new().write(path, image)
}

/// Runs the header state machine, returning the captured dimension and
/// depth lines (terminators included).
///
/// Consumes exactly the header bytes, no more: afterwards the reader is
/// positioned on the first pixel byte.
fn scan_header<R: BufRead>(reader: &mut R) -> IoResult<Vec<u8>> {
    let mut state = ScanState::SkipPreamble;
    let mut scratch = Vec::with_capacity(HEADER_SCRATCH);
    let mut newlines = 0usize;

    while state != ScanState::Done {
        let buf = reader.fill_buf()?;
        if buf.is_empty() {
            return Err(IoError::HeaderTruncated);
        }

        let mut used = 0usize;
        for &byte in buf {
            used += 1;
            match state {
                ScanState::SkipPreamble => {
                    if byte == b'\n' {
                        newlines += 1;
                        if newlines == PREAMBLE_LINES {
                            state = ScanState::CaptureDimensions;
                            newlines = 0;
                        }
                    }
                }
                ScanState::CaptureDimensions => {
                    if scratch.len() == HEADER_SCRATCH {
                        return Err(IoError::HeaderTooLong {
                            limit: HEADER_SCRATCH,
                        });
                    }
                    scratch.push(byte);
                    if byte == b'\n' {
                        newlines += 1;
                        if newlines == CAPTURE_LINES {
                            state = ScanState::Done;
                        }
                    }
                }
                ScanState::Done => {}
            }
            if state == ScanState::Done {
                break;
            }
        }
        reader.consume(used);
    }

    Ok(scratch)
}

/// Extracts width, height, and depth from the captured lines.
///
/// The first three whitespace-separated fields are parsed as unsigned
/// decimals; anything after them within the captured lines is ignored.
fn parse_scratch(scratch: &[u8]) -> IoResult<PpmHeader> {
    let text = std::str::from_utf8(scratch).map_err(|_| IoError::HeaderMalformed {
        reason: "dimension lines are not valid UTF-8".into(),
    })?;

    let mut fields = text.split_whitespace();
    let width = parse_field(fields.next(), "width")?;
    let height = parse_field(fields.next(), "height")?;
    let max_val = parse_field(fields.next(), "depth")?;

    Ok(PpmHeader {
        width,
        height,
        max_val,
    })
}

fn parse_field(field: Option<&str>, name: &str) -> IoResult<u32> {
    let field = field.ok_or_else(|| IoError::HeaderMalformed {
        reason: format!("missing {name} field"),
    })?;
    field.parse().map_err(|_| IoError::HeaderMalformed {
        reason: format!("{name} is not an unsigned decimal: {field:?}"),
    })
}

/// Loads the interleaved sample stream into planar form.
fn read_pixels<R: Read>(reader: &mut R, width: u32, height: u32) -> IoResult<PlanarRgb> {
    let expected = (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(3))
        .ok_or_else(|| {
            psf_core::Error::invalid_dimensions(width, height, "sample count overflows usize")
        })?;
    trace!(expected, "reading pixel data");

    let mut interleaved = Vec::new();
    interleaved
        .try_reserve_exact(expected)
        .map_err(|e| psf_core::Error::allocation_failed(expected, e.to_string()))?;
    interleaved.resize(expected, 0);

    // read_exact would not report how many bytes arrived, so track the
    // fill level by hand.
    let mut filled = 0usize;
    while filled < expected {
        match reader.read(&mut interleaved[filled..]) {
            Ok(0) => {
                return Err(IoError::PixelDataTruncated {
                    expected,
                    got: filled,
                });
            }
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e.into()),
        }
    }

    Ok(PlanarRgb::from_interleaved(width, height, &interleaved)?)
}
