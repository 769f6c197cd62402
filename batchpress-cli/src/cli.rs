// batchpress-cli/src/cli.rs
//
// Defines the command-line argument structures using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{DEFAULT_FFMPEG, DEFAULT_JOBS};

// --- CLI Argument Definition ---

#[derive(Parser, Debug)]
#[command(
    author,
    version, // Reads from Cargo.toml via "cargo" feature in clap
    about = "Batchpress: parallel batch video compression",
    long_about = "Compresses every video under a directory tree with ffmpeg, \
                  running several encodes in parallel and mirroring the folder \
                  structure in the output directory."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compresses all video files under an input directory into an output directory
    Compress(CompressArgs),
}

#[derive(Parser, Debug)]
pub struct CompressArgs {
    /// Directory containing the videos to compress (searched recursively)
    #[arg(short = 'i', long = "input", required = true, value_name = "INPUT_DIR")]
    pub input_dir: PathBuf,

    /// Directory where compressed videos are written, mirroring the input tree
    #[arg(short = 'o', long = "output", required = true, value_name = "OUTPUT_DIR")]
    pub output_dir: PathBuf,

    /// Path to the ffmpeg executable.
    /// Can also be set via the BATCHPRESS_FFMPEG environment variable.
    #[arg(long = "ffmpeg", value_name = "PATH", env = "BATCHPRESS_FFMPEG", default_value = DEFAULT_FFMPEG)]
    pub ffmpeg_path: PathBuf,

    /// Maximum number of ffmpeg processes running at once
    #[arg(
        short = 'j',
        long = "jobs",
        value_name = "N",
        default_value_t = DEFAULT_JOBS,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub jobs: u32,

    /// Optional: Directory for a log file of this run
    #[arg(short, long, value_name = "LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    /// Print progress as JSON lines on stdout instead of human-readable output
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Disable the interactive progress bar
    #[arg(long, default_value_t = false)]
    pub no_progress: bool,
}
