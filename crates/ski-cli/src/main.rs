/// Longest ski run finder: reads an elevation map and reports the longest
/// strictly-descending run, ties broken by the steepest drop.
use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use ski_core::{load_grid, solve, GridErrorKind, Report, SearchOptions, Strategy};
use tracing::level_filters::LevelFilter;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "ski", about = "Find the longest, steepest descending run on an elevation map")]
struct Args {
    /// Elevation map: `height width` header then one row per line, or a
    /// serialised HeightField with a .json extension.
    #[arg(default_value = "map.txt")]
    input: PathBuf,

    /// Search options JSON file; command-line flags override it.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Search strategy: exhaustive, memoized or parallel.
    #[arg(short, long)]
    strategy: Option<Strategy>,

    /// Disable elevation-band pruning (same answer, more work).
    #[arg(long)]
    no_prune: bool,

    /// Print the report as JSON.
    #[arg(long)]
    json: bool,

    /// Also print the winning run, cell by cell.
    #[arg(long)]
    show_path: bool,
}

// ── Config layering ───────────────────────────────────────────────────────────

fn resolve_options(args: &Args) -> Result<SearchOptions> {
    let mut options = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Cannot read config {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("parsing {}", path.display()))?
        }
        None => SearchOptions::default(),
    };
    if let Some(strategy) = args.strategy {
        options.strategy = strategy;
    }
    if args.no_prune {
        options.pruning = false;
    }
    Ok(options)
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let options = resolve_options(&args)?;

    let started = Instant::now();
    let hf = load_grid(&args.input).map_err(|e| {
        match e.kind() {
            GridErrorKind::SourceNotFound => error!("Bailing - can't find input file"),
            GridErrorKind::MalformedNumericData => {
                error!("Bailing - expected number but got something else")
            }
        }
        e
    })?;

    info!(strategy = %options.strategy, pruning = options.pruning, "searching");
    let outcome = solve(&hf, &options);
    let report = Report::new(outcome, started.elapsed());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{report}");
        if args.show_path {
            println!("Path: {}", report.route_line(&hf));
        }
    }
    Ok(())
}
