//! regimelab runner — everything around the core a backtest needs:
//! CSV ingestion, seeded synthetic data, performance metrics, and report
//! rendering.

pub mod config;
pub mod data_loader;
pub mod metrics;
pub mod report;
pub mod synthetic;

pub use config::{load_config, ConfigError};
pub use data_loader::{load_csv, LoadError};
pub use metrics::Summary;

use regimelab_core::domain::Bar;
use regimelab_core::{Engine, EngineConfig, RunResult};

/// A finished backtest: the raw run output plus the computed summary.
#[derive(Debug, Clone)]
pub struct BacktestOutcome {
    pub result: RunResult,
    pub summary: Summary,
}

/// Run one backtest over a prepared bar sequence.
pub fn run_backtest(bars: &[Bar], config: EngineConfig) -> BacktestOutcome {
    let mut engine = Engine::new(config);
    let result = engine.run(bars);
    let summary = Summary::compute(&result.equity_curve, &result.trades);
    BacktestOutcome { result, summary }
}
