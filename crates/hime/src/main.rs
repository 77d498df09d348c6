//! Hime CLI - personal wiki text engine.
//!
//! Provides commands for:
//! - `render`: Render a page to HTML, normalized text, plain text or JSON
//! - `detect`: Print the markup dialect a page would be rendered with
//! - `summary`: Print a one-line summary of a page
//! - `diff`: Diff two revisions, optionally as highlighted HTML
//! - `highlight`: Highlight an existing unified diff
//! - `batch`: Render many pages in parallel as JSON lines

mod commands;
mod error;
mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use hime_format::DialectKind;
use tracing_subscriber::EnvFilter;

use commands::{BatchArgs, DetectArgs, DiffArgs, HighlightArgs, RenderArgs, SummaryArgs};
use output::Output;

/// Hime - personal wiki text engine.
#[derive(Parser)]
#[command(name = "hime", version, about)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every subcommand.
#[derive(clap::Args)]
pub(crate) struct GlobalArgs {
    /// Path to configuration file (default: auto-discover himewiki.toml).
    #[arg(short, long, global = true, env = "HIME_CONFIG")]
    pub config: Option<PathBuf>,

    /// Dialect for pages that do not announce one (overrides config).
    #[arg(short, long, global = true)]
    pub format: Option<DialectKind>,

    /// Enable verbose output (info-level logs).
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a page.
    Render(RenderArgs),
    /// Print the detected markup dialect of a page.
    Detect(DetectArgs),
    /// Print a one-line summary of a page.
    Summary(SummaryArgs),
    /// Diff two revisions of a page.
    Diff(DiffArgs),
    /// Highlight a unified diff as HTML.
    Highlight(HighlightArgs),
    /// Render several pages in parallel, one JSON object per line.
    Batch(BatchArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.global.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Render(args) => args.execute(&cli.global, &output),
        Commands::Detect(args) => args.execute(&cli.global, &output),
        Commands::Summary(args) => args.execute(&cli.global, &output),
        Commands::Diff(args) => args.execute(&output),
        Commands::Highlight(args) => args.execute(&output),
        Commands::Batch(args) => args.execute(&cli.global, &output),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
