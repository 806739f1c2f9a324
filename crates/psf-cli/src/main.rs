//! psf - PPM sharpening CLI
//!
//! Reads a binary PPM (P6) image, applies a 3x3 point-spread sharpening
//! kernel to every color channel, and writes the result as a fresh PPM.

use anyhow::{Context, Result};
use clap::Parser;
use psf_io::{OutputGuard, PpmReader, PpmWriter, DEFAULT_MAX_DIM};
use psf_ops::{filter, Kernel, DEFAULT_STRENGTH};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "psf")]
#[command(author, version, about = "Sharpen binary PPM images with a 3x3 point-spread function")]
#[command(long_about = "
Reads a binary PPM (P6) image, sharpens it with a 3x3 point-spread
function, and writes the result as a fresh PPM. Only the interior of
the image is convolved; border pixels pass through unchanged.

Examples:
  psf input.ppm output.ppm             # Default strength
  psf input.ppm output.ppm -a 2.5      # Gentler sharpening
  psf input.ppm output.ppm --max-dim 8000
")]
struct Cli {
    /// Input PPM image
    input: PathBuf,

    /// Output PPM image
    output: PathBuf,

    /// Sharpen amount (kernel strength)
    #[arg(short, long, default_value_t = DEFAULT_STRENGTH, value_parser = parse_amount)]
    amount: f64,

    /// Largest accepted width or height
    #[arg(long, default_value_t = DEFAULT_MAX_DIM)]
    max_dim: u32,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

/// Parses `--amount`, rejecting values the kernel cannot use.
fn parse_amount(s: &str) -> Result<f64, String> {
    let amount: f64 = s.parse().map_err(|_| format!("not a number: {s}"))?;
    if !amount.is_finite() {
        return Err(format!("amount must be finite, got {amount}"));
    }
    Ok(amount)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    run(cli)
}

fn run(args: Cli) -> Result<()> {
    let start = Instant::now();
    if args.verbose {
        println!(
            "Sharpening {} (amount={:.2})",
            args.input.display(),
            args.amount
        );
    }

    // Both files are opened up front so a bad path fails before any
    // parsing work happens. The guard removes the output again if the
    // pipeline errors out below.
    let input = File::open(&args.input)
        .with_context(|| format!("Failed to open input: {}", args.input.display()))?;
    let (output, guard) = OutputGuard::create(&args.output)
        .with_context(|| format!("Failed to create output: {}", args.output.display()))?;

    let image = PpmReader::new()
        .with_max_dim(args.max_dim)
        .read_from(&mut BufReader::new(input))
        .with_context(|| format!("Failed to load: {}", args.input.display()))?;
    info!(width = image.width(), height = image.height(), "loaded image");

    let kernel = Kernel::sharpen(args.amount);
    let sharpened = filter::sharpen(&image, &kernel);

    let mut writer = BufWriter::new(output);
    PpmWriter::new()
        .write_to(&mut writer, &sharpened)
        .with_context(|| format!("Failed to save: {}", args.output.display()))?;
    writer
        .flush()
        .with_context(|| format!("Failed to save: {}", args.output.display()))?;
    guard.keep();

    if args.verbose {
        println!("Wrote {} in {:.2?}", args.output.display(), start.elapsed());
    }

    Ok(())
}
