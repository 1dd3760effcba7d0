//! CLI parse: clap types for IGVer. No behavior; definitions only.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// IGVer CLI - Reproducible IGV screenshots
#[derive(Parser)]
#[command(name = "igver")]
#[command(version)]
#[command(about = "Render IGV screenshots for genomic regions through IGV batch mode")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (layered over the global config)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (debug level)
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Disable logging entirely
    #[arg(long, default_value = "false")]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stderr, stdout, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (when output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render screenshots for every region
    Shoot(ScreenshotArgs),
    /// Show the batch script and output paths a run would use, without running
    Plan(ScreenshotArgs),
    /// Check regions (literals or files) against a genome
    Validate {
        /// Regions or region files
        #[arg(required = true)]
        regions: Vec<String>,
        /// Genome used for chromosome bounds
        #[arg(short = 'g', long)]
        genome: Option<String>,
        /// Output format (text or json)
        #[arg(long, default_value = "text", value_parser = ["text", "json"])]
        output_format: String,
    },
    /// List known genomes and their aliases
    Genomes {
        /// Output format (text or json)
        #[arg(long, default_value = "text", value_parser = ["text", "json"])]
        output_format: String,
    },
    /// Show detected environment signals and the runtime that would be used
    Runtime {
        /// Runtime mode to evaluate (auto, native, singularity, docker)
        #[arg(long)]
        runtime: Option<String>,
        /// Output format (text or json)
        #[arg(long, default_value = "text", value_parser = ["text", "json"])]
        output_format: String,
    },
    /// Run every job in a TOML or JSON job file
    Jobs {
        /// Job file
        file: PathBuf,
        /// Each job writes into <output-base>/<name>
        #[arg(short = 'o', long, default_value = ".")]
        output_base: PathBuf,
        /// Keep existing snapshots instead of rendering them again
        #[arg(long)]
        no_overwrite: bool,
        /// Output format (text or json)
        #[arg(long, default_value = "text", value_parser = ["text", "json"])]
        output_format: String,
    },
}

/// Inputs shared by `shoot` and `plan`.
#[derive(Args, Debug, Clone)]
pub struct ScreenshotArgs {
    /// Track files, or a single .txt file listing one track per line
    #[arg(short = 'i', long = "input", required = true, num_args = 1..)]
    pub input: Vec<PathBuf>,

    /// Regions (chr:start-end) or region files (.txt, .bed)
    #[arg(short = 'r', long, required = true, num_args = 1..)]
    pub regions: Vec<String>,

    /// Output directory
    #[arg(short = 'o', long, default_value = ".")]
    pub output: PathBuf,

    /// Genome name or alias
    #[arg(short = 'g', long)]
    pub genome: Option<String>,

    /// Image format (png, svg, pdf)
    #[arg(short = 'f', long)]
    pub format: Option<String>,

    /// Resolution for PDF conversion
    #[arg(long)]
    pub dpi: Option<u32>,

    /// Suffix appended to every output name
    #[arg(short = 't', long)]
    pub tag: Option<String>,

    /// Maximum track panel height in pixels
    #[arg(short = 'p', long)]
    pub max_panel_height: Option<u32>,

    /// Read overlap display (expand, collapse, squish)
    #[arg(short = 'd', long)]
    pub overlap_display: Option<String>,

    /// File of extra viewer preference lines applied before each snapshot
    #[arg(short = 'c', long)]
    pub igv_config: Option<PathBuf>,

    /// IGV installation directory
    #[arg(long)]
    pub igv_dir: Option<PathBuf>,

    /// Runtime mode (auto, native, singularity, docker)
    #[arg(long)]
    pub runtime: Option<String>,

    /// Run the viewer directly, without a container
    #[arg(long)]
    pub no_singularity: bool,

    /// Container image
    #[arg(long)]
    pub image: Option<String>,

    /// Extra directory to mount into the container (repeatable)
    #[arg(short = 'B', long = "bind")]
    pub bind: Vec<PathBuf>,

    /// Viewer invocations before giving up
    #[arg(long)]
    pub max_iterations: Option<usize>,

    /// Keep existing snapshots instead of rendering them again
    #[arg(long)]
    pub no_overwrite: bool,

    /// Keep intermediate SVGs after PDF conversion
    #[arg(long)]
    pub keep_intermediate: bool,

    /// Output format (text or json)
    #[arg(long, default_value = "text", value_parser = ["text", "json"])]
    pub output_format: String,
}
