//! # Tilegraph CLI
//!
//! Builds and inspects packed directed-edge records.

use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod cli;

#[derive(Parser)]
#[command(name = "tilegraph")]
#[command(about = "Build and inspect packed directed-edge records of routing tiles")]
#[command(long_about = "Build and inspect packed directed-edge records of routing tiles:
  tilegraph build edges.json             # Print one hex record per edge
  tilegraph build edges.json -o out.bin  # Write 48-byte records to a file
  tilegraph inspect out.bin --index 0    # Show the export JSON of a record
  tilegraph slope 12.5                   # Show slope quantization

Logging follows RUST_LOG (default: warn).")]
#[command(version = env!("TILEGRAPH_VERSION"))]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build records from a JSON array of edge attributes
    Build {
        /// Attribute document
        input: PathBuf,
        /// Output record file (hex lines on stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the export JSON of a record file
    Inspect {
        /// Record file
        input: PathBuf,
        /// Only show the record at this position
        #[arg(long)]
        index: Option<usize>,
    },
    /// Show up/down slope codes for a grade in degrees
    Slope {
        #[arg(allow_negative_numbers = true)]
        degrees: f32,
    },
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Build { input, output } => cli::commands::build(&input, output.as_deref()),
        Commands::Inspect { input, index } => cli::commands::inspect(&input, index),
        Commands::Slope { degrees } => cli::commands::show_slope(degrees),
    }
}
