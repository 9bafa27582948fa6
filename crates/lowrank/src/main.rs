//! Command-line entry point: compress images to `.svz` containers and back.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use lowrank::image::{load_matrix, save_matrix, ImageMatrix};
use lowrank::{approx, container, svd, ColorMode, RankSelection};
use lowrank_bzip2::Bzip2Codec;
use lowrank_core::{Codec, CompressionLevel, CompressionRatio, Error, Result};

#[derive(Debug, Parser)]
#[command(name = "lowrank", version, about = "SVD-based image compression")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Compress an image into a container
    Encode(EncodeArgs),
    /// Reconstruct an image from a container
    Decode(DecodeArgs),
}

#[derive(Debug, Args)]
struct EncodeArgs {
    /// Input image (PNG or JPEG)
    input: PathBuf,

    /// Output container path
    output: PathBuf,

    /// Retain exactly this many singular values
    #[arg(long, conflicts_with = "rank_percentage")]
    rank: Option<usize>,

    /// Retain this fraction (0, 1] of the singular values
    #[arg(long)]
    rank_percentage: Option<f64>,

    /// Bit width per quantized sample
    #[arg(long, default_value_t = 8)]
    bits: u8,

    /// Treat the image as RGB (packs channels into matrix columns)
    #[arg(long)]
    color: bool,

    /// bzip2 level, 1-9
    #[arg(long, default_value_t = 6)]
    level: i32,
}

#[derive(Debug, Args)]
struct DecodeArgs {
    /// Input container path
    input: PathBuf,

    /// Output image (PNG or JPEG)
    output: PathBuf,

    /// Interpret matrix columns as packed RGB channels
    #[arg(long)]
    color: bool,
}

fn color_mode(color: bool) -> ColorMode {
    if color {
        ColorMode::Color
    } else {
        ColorMode::Grayscale
    }
}

fn selection(args: &EncodeArgs) -> Result<RankSelection> {
    match (args.rank, args.rank_percentage) {
        (Some(count), None) => Ok(RankSelection::Count(count)),
        (None, Some(fraction)) => Ok(RankSelection::Percentage(fraction)),
        (None, None) => Err(Error::validation(
            "one of --rank or --rank-percentage is required",
        )),
        (Some(_), Some(_)) => unreachable!("clap rejects conflicting rank arguments"),
    }
}

fn encode(args: &EncodeArgs) -> Result<()> {
    let mode = color_mode(args.color);
    let matrix = load_matrix(&args.input, mode)?;

    let total = svd::full_rank(matrix.rows, matrix.cols);
    let rank = selection(args)?.select(total)?;
    info!(rank, total, bits = args.bits, "retaining singular values");

    let triplet = svd::truncated_svd(&matrix.data, matrix.rows, matrix.cols, rank)?;
    approx::report_storage(&triplet);

    let codec = Bzip2Codec::with_level(CompressionLevel::from_level(args.level));
    let bytes = container::encode(&triplet, args.bits, &codec)?;

    let ratio = CompressionRatio::new(matrix.data.len(), bytes.len());
    info!(
        container_bytes = bytes.len(),
        raw_values = matrix.data.len(),
        savings_percent = format!("{:.1}", ratio.savings_percent()),
        "container encoded"
    );

    fs::write(&args.output, &bytes)?;
    info!(path = %args.output.display(), "wrote container");
    Ok(())
}

fn decode(args: &DecodeArgs) -> Result<()> {
    let bytes = fs::read(&args.input)?;

    let codec = <Bzip2Codec as Codec>::new();
    let triplet = container::decode(&bytes, &codec)?;
    info!(
        rank = triplet.rank,
        rows = triplet.rows,
        cols = triplet.cols,
        "decoded container"
    );

    let matrix = ImageMatrix {
        rows: triplet.rows,
        cols: triplet.cols,
        data: approx::reconstruct(&triplet),
    };
    save_matrix(&args.output, &matrix, color_mode(args.color))
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    match &cli.command {
        Command::Encode(args) => encode(args),
        Command::Decode(args) => decode(args),
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error ({}): {}", err.category(), err);
            ExitCode::FAILURE
        }
    }
}
