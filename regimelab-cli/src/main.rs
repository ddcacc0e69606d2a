//! regimelab CLI — run one backtest and print the report.
//!
//! Commands:
//! - `run` — execute a backtest over a CSV file or a seeded synthetic series

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use regimelab_core::EngineConfig;
use regimelab_runner::{load_config, load_csv, run_backtest, report, synthetic};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(
    name = "regimelab",
    about = "regimelab CLI — regime-routed backtesting engine"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Execute a backtest and print the performance report.
    Run {
        /// CSV file with timestamp,open,high,low,close,volume rows.
        #[arg(long, conflicts_with = "synthetic")]
        data: Option<PathBuf>,

        /// Use a seeded synthetic series instead of a data file.
        #[arg(long, default_value_t = false)]
        synthetic: bool,

        /// Synthetic: number of ranging bars before the trend leg.
        #[arg(long, default_value_t = 400)]
        range_bars: usize,

        /// Synthetic: number of trending bars.
        #[arg(long, default_value_t = 200)]
        trend_bars: usize,

        /// Synthetic: RNG seed.
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Optional TOML config; omitted fields use built-in defaults.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Write the full result (equity curve + trades) as JSON.
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            data,
            synthetic,
            range_bars,
            trend_bars,
            seed,
            config,
            output,
        } => run(data, synthetic, range_bars, trend_bars, seed, config, output),
    }
}

#[allow(clippy::too_many_arguments)]
fn run(
    data: Option<PathBuf>,
    synthetic_data: bool,
    range_bars: usize,
    trend_bars: usize,
    seed: u64,
    config_path: Option<PathBuf>,
    output: Option<PathBuf>,
) -> Result<()> {
    let config = match config_path {
        Some(path) => load_config(&path).with_context(|| format!("loading {}", path.display()))?,
        None => EngineConfig::default(),
    };

    let bars = match (&data, synthetic_data) {
        (Some(path), _) => {
            load_csv(path).with_context(|| format!("loading {}", path.display()))?
        }
        (None, true) => synthetic::range_then_trend(range_bars, trend_bars, seed),
        (None, false) => bail!("either --data <csv> or --synthetic is required"),
    };

    println!("Starting backtest ({} bars)...", bars.len());
    println!("Config fingerprint: {}", config.config_hash());

    let started = Instant::now();
    let outcome = run_backtest(&bars, config);
    let elapsed = started.elapsed();

    let bars_per_sec = bars.len() as f64 / elapsed.as_secs_f64();
    println!(
        "Processed {} bars in {:.1} ms ({:.0} bars/sec)",
        bars.len(),
        elapsed.as_secs_f64() * 1_000.0,
        bars_per_sec
    );

    println!();
    print!("{}", report::render(&outcome.summary));

    if let Some(path) = output {
        let json = serde_json::to_string_pretty(&outcome.result)?;
        std::fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;
        println!("Result written to {}", path.display());
    }

    Ok(())
}
