//! specview - reduce stacked spectra for a viewport
//!
//! Loads (or synthesizes) a dataset, applies a viewport request, point budget
//! and display transform, and prints the render-ready frame.

mod config;
mod dataset;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use specview_lod::prelude::*;
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::config::{SpecviewConfig, CONFIG_FILE};
use crate::dataset::Dataset;

/// Viewport-driven downsampling for stacked spectra
#[derive(Parser, Debug)]
#[command(name = "specview")]
#[command(about = "Reduce stacked spectra for a viewport")]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (defaults to ./specview.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a default specview.toml
    Init {
        /// Target directory
        #[arg(default_value = ".")]
        dir: PathBuf,
    },

    /// Write a synthetic dataset as JSON
    Synth {
        #[arg(long, default_value = "24")]
        curves: usize,
        #[arg(long, default_value = "100000")]
        points: usize,
        #[arg(short, long)]
        out: PathBuf,
    },

    /// Reduce a dataset for one viewport
    Reduce(ReduceArgs),
}

#[derive(Args, Debug)]
struct ReduceArgs {
    /// JSON dataset (`{"x": [...], "y": [[...], ...]}`)
    #[arg(short, long, conflicts_with = "synth")]
    input: Option<PathBuf>,

    /// Use a synthetic dataset instead of a file
    #[arg(long)]
    synth: bool,

    /// Viewport lower bound (full domain when omitted)
    #[arg(long, requires = "max")]
    min: Option<f64>,

    /// Viewport upper bound
    #[arg(long, requires = "min")]
    max: Option<f64>,

    /// Point budget (clamped to the configured bounds)
    #[arg(short, long)]
    budget: Option<usize>,

    #[arg(long)]
    stack_base: Option<f64>,

    #[arg(long, allow_hyphen_values = true)]
    stack_exp: Option<i32>,

    #[arg(long, allow_hyphen_values = true)]
    height_exp: Option<f64>,

    /// Fill curves to their baseline (reverses draw order)
    #[arg(long)]
    fill: bool,

    /// Print the full frame as JSON instead of a summary
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Init { dir } => init(&dir),
        Command::Synth {
            curves,
            points,
            out,
        } => {
            Dataset::synthetic(curves, points).save(&out)?;
            tracing::info!("Wrote {} curves x {} points to {}", curves, points, out.display());
            Ok(())
        }
        Command::Reduce(args) => {
            let config = SpecviewConfig::resolve(cli.config.as_deref())?;
            reduce(args, config)
        }
    }
}

fn init(dir: &std::path::Path) -> Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;
    let path = dir.join(CONFIG_FILE);
    if path.exists() {
        anyhow::bail!("{} already exists", path.display());
    }
    fs::write(&path, SpecviewConfig::default().to_toml()?)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!("Created {}", path.display());
    Ok(())
}

fn reduce(args: ReduceArgs, config: SpecviewConfig) -> Result<()> {
    let dataset = match (&args.input, args.synth) {
        (Some(path), _) => Dataset::load(path)?,
        (None, true) => Dataset::synthetic(24, 100_000),
        (None, false) => anyhow::bail!("Pass --input FILE or --synth"),
    };
    let store = dataset.into_store()?;
    tracing::info!(
        curves = store.curve_count(),
        samples = store.len(),
        "Loaded dataset"
    );

    let reducer = ViewportReducer::new(store, config.reducer.clone())?;

    let mut transform = config.display;
    if let Some(v) = args.stack_base {
        transform.stack_offset_base = v;
    }
    if let Some(v) = args.stack_exp {
        transform.stack_scale_exponent = v;
    }
    if let Some(v) = args.height_exp {
        transform.height_scale_exponent = v;
    }
    if args.fill {
        transform.fill_enabled = true;
    }

    let mut session = ViewSession::new(reducer.config());
    session.set_transform(transform)?;
    if let Some(budget) = args.budget {
        session.set_budget(budget, reducer.config());
    }
    if let (Some(min), Some(max)) = (args.min, args.max) {
        session.handle(ViewportChangeRequest::RangeSelect { min, max }, &reducer);
    }

    let frame = session.render(&reducer)?;

    if args.json {
        println!("{}", serde_json::to_string(&frame)?);
    } else {
        println!(
            "view [{:.4}, {:.4}]  points {}  traces {}  strategy {:?}",
            frame.x_range.min,
            frame.x_range.max,
            frame.point_count(),
            frame.traces.len(),
            frame.strategy
        );
        if let Some((lo, hi)) = frame.y_bounds() {
            println!("y bounds [{:.4}, {:.4}]", lo, hi);
        }
    }
    Ok(())
}
