use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(name = "clipcut")]
#[command(about = "Split long audio recordings into clips at natural sentence boundaries.")]
pub struct Args {
    /// Path to config TOML (defaults to ./config.toml if present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Override log level (trace, debug, info, warn, error)
    #[arg(long)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Split a recording into bounded clips using its timed transcript
    Split(SplitCmd),
    /// Concatenate audio tracks in order
    Concat(ConcatCmd),
    /// Print the effective default config as TOML and exit
    PrintDefaultConfig,
}

#[derive(Debug, Parser)]
pub struct SplitCmd {
    /// Transcript file path (.srt or .json), or '-' for stdin
    pub transcript: String,

    /// Source audio file to slice (omit to compute segments only)
    #[arg(short, long)]
    pub audio: Option<PathBuf>,

    /// Output directory (defaults to '<transcript stem>_segments')
    #[arg(short, long)]
    pub out_dir: Option<PathBuf>,

    /// Maximum segment duration in seconds (10-300)
    #[arg(long)]
    pub max_duration: Option<f64>,

    /// Force transcript format (otherwise inferred from extension)
    #[arg(long, value_enum)]
    pub from: Option<TranscriptFormat>,

    /// Package the output directory into a zip archive
    #[arg(long)]
    pub zip: bool,
}

#[derive(Debug, Parser)]
pub struct ConcatCmd {
    /// Input audio files, joined in filename order
    pub inputs: Vec<PathBuf>,

    /// Combined output file
    #[arg(short, long)]
    pub output: PathBuf,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum TranscriptFormat {
    Srt,
    Json,
}
