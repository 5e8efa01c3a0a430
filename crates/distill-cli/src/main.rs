//! Distill command-line interface.
//!
//! ```bash
//! # Full analysis of an exported design tree
//! distill design.json --pretty
//!
//! # Only the hierarchical summary, from stdin, four levels deep
//! cat design.json | distill - --view llm --summary-depth 4
//!
//! # Check detected components against a catalog
//! distill design.json --catalog components.json
//! ```

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use distill::{analyze, analyze_with_catalog, AnalyzeOptions, Analysis, ComponentCatalog};
use serde_json::Value;
use tracing::{debug, Level};

#[derive(Parser)]
#[command(name = "distill")]
#[command(version)]
#[command(about = "Condense a design-tool node tree into classified, size-bounded summaries")]
struct Cli {
    /// Input JSON file, or `-` for stdin
    input: PathBuf,

    /// Levels of children to keep below the root while filtering
    #[arg(long)]
    max_depth: Option<usize>,

    /// Levels shown in the hierarchical summary
    #[arg(long)]
    summary_depth: Option<usize>,

    /// Component catalog (JSON object keyed by component identifier)
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Pipeline options as JSON; flags override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Which part of the analysis to print
    #[arg(long, value_enum, default_value = "full")]
    view: View,

    /// Pretty-print the output
    #[arg(long)]
    pretty: bool,

    /// Log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum View {
    Full,
    Llm,
    Compact,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let options = options(&cli)?;
    let tree = read_json(&cli.input)?;
    debug!(input = %cli.input.display(), "Read design tree");

    let analysis = match &cli.catalog {
        Some(path) => {
            let catalog = ComponentCatalog::from_value(read_json(path)?)
                .with_context(|| format!("Invalid catalog in {}", path.display()))?;
            analyze_with_catalog(&tree, &options, &catalog)
        }
        None => analyze(&tree, &options),
    };

    if let Some(error) = &analysis.error {
        bail!("{error}");
    }

    let output = view(&analysis, cli.view)?;
    let rendered = if cli.pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };
    println!("{rendered}");
    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
}

/// Config file first, then flags on top.
fn options(cli: &Cli) -> Result<AnalyzeOptions> {
    let mut options = match &cli.config {
        Some(path) => serde_json::from_value(read_json(path)?)
            .with_context(|| format!("Invalid options in {}", path.display()))?,
        None => AnalyzeOptions::default(),
    };
    if cli.max_depth.is_some() {
        options = options.with_max_depth(cli.max_depth);
    }
    if let Some(depth) = cli.summary_depth {
        options = options.with_summary_depth(depth);
    }
    Ok(options)
}

fn read_json(path: &Path) -> Result<Value> {
    let text = if path == Path::new("-") {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf).context("Failed to read stdin")?;
        buf
    } else {
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?
    };
    serde_json::from_str(&text).with_context(|| format!("Invalid JSON in {}", path.display()))
}

fn view(analysis: &Analysis, view: View) -> Result<Value> {
    let value = match view {
        View::Full => serde_json::to_value(analysis)?,
        View::Llm => serde_json::to_value(&analysis.llm_summary)?,
        View::Compact => serde_json::to_value(&analysis.compact_summary)?,
    };
    Ok(value)
}
