//! ydoc CLI - YAML configuration to Markdown documentation.
//!
//! Provides commands for:
//! - `generate`: Render all configured sources and the aggregated document
//! - `render`: Print the Markdown body of a single YAML file
//! - `lint`: Check source discovery and file names

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{GenerateArgs, LintArgs, RenderArgs};
use output::Output;

/// ydoc - YAML configuration to Markdown documentation.
#[derive(Parser)]
#[command(name = "ydoc", version, about)]
struct Cli {
    /// Enable info-level logging (otherwise RUST_LOG, default warn).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate per-file pages and the aggregated document.
    Generate(GenerateArgs),
    /// Render a single YAML file to stdout.
    Render(RenderArgs),
    /// Check configured sources without rendering.
    Lint(LintArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Generate(args) => args.execute(),
        Commands::Render(args) => args.execute(),
        Commands::Lint(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&err);
        std::process::exit(1);
    }
}
