//! The per-bar orchestrator.
//!
//! For each bar, a fixed seven-step sequence runs in this order:
//!
//! 1. Fill any order pending from the previous bar at this bar's open.
//! 2. If invested, run the risk manager's intrabar stop/trailing check; a
//!    hit closes the position as a non-winning exit.
//! 3. Feed the bar to all strategies (indicators, regime, signals).
//! 4. Select the acting signal by regime: trend → momentum, low-vol range →
//!    mean reversion, high-vol range or undefined → flat.
//! 5. If the selected signal wants a side, the account is flat, and the risk
//!    manager permits entry: size a fixed fraction of starting capital at
//!    this close, submit the order, seed the stop state.
//! 6. If the selected signal is flat while invested: close as a neutral exit.
//! 7. Decrement the cooldown, unconditionally.
//!
//! The ordering is the lookahead contract: decisions at bar t see only
//! bar-t-or-earlier data and act at bar t+1's open. Reordering (for example
//! updating strategies before the stop check) leaks future information.

use crate::config::EngineConfig;
use crate::domain::{Bar, ExitReason, Regime, Signal, Trade};
use crate::execution::ExecutionEngine;
use crate::risk::RiskManager;
use crate::strategy::{MeanReversionStrategy, MomentumStrategy, RegimeStrategy, Strategy};
use serde::{Deserialize, Serialize};

/// Output of a completed run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunResult {
    /// Fingerprint of the configuration that produced this result.
    pub config_hash: String,
    /// Mark-to-market equity: one initial point plus one per bar (at close).
    pub equity_curve: Vec<f64>,
    pub trades: Vec<Trade>,
    pub final_equity: f64,
}

/// Route the acting signal by regime.
fn route(regime: Regime, momentum: Signal, mean_reversion: Signal) -> Signal {
    match regime {
        Regime::LowVolTrend | Regime::HighVolTrend => momentum,
        Regime::LowVolRange => mean_reversion,
        // High-volatility chop and the warm-up period stay in cash.
        Regime::HighVolRange | Regime::Undefined => Signal::Flat,
    }
}

/// One backtest run: owns one risk manager, one execution engine, and one
/// instance of each strategy. A second simulation needs fresh instances.
pub struct Engine {
    config: EngineConfig,
    regime_strategy: RegimeStrategy,
    momentum_strategy: MomentumStrategy,
    mean_reversion_strategy: MeanReversionStrategy,
    risk: RiskManager,
    execution: ExecutionEngine,
    equity_curve: Vec<f64>,
    selected_signal: Signal,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            regime_strategy: RegimeStrategy::new(config.regime.clone()),
            momentum_strategy: MomentumStrategy::new(config.momentum.clone()),
            mean_reversion_strategy: MeanReversionStrategy::new(config.mean_reversion.clone()),
            risk: RiskManager::new(config.risk.clone()),
            execution: ExecutionEngine::new(config.initial_capital),
            equity_curve: vec![config.initial_capital],
            selected_signal: Signal::Flat,
            config,
        }
    }

    /// Process one bar through the seven-step sequence.
    pub fn process_bar(&mut self, bar: &Bar) {
        // 1. Orders decided on the previous bar fill at this open.
        self.execution.on_bar_open(bar);

        // 2. Intrabar stop/trailing check against this bar's extremes.
        if self.execution.is_invested() && self.risk.check_exit(bar) {
            self.execution.close_position(ExitReason::Stop);
            self.risk.on_exit(false);
        }

        // 3. End-of-bar strategy updates.
        self.regime_strategy.on_bar(bar);
        self.momentum_strategy.on_bar(bar);
        self.mean_reversion_strategy.on_bar(bar);

        // 4. Regime routing.
        let signal = route(
            self.regime_strategy.regime(),
            self.momentum_strategy.signal(),
            self.mean_reversion_strategy.signal(),
        );
        self.selected_signal = signal;

        // 5./6. Act on the selected signal.
        if let Some(side) = signal.side() {
            if !self.execution.is_invested() && self.risk.can_enter(bar.timestamp) {
                let quantity =
                    self.config.initial_capital * self.config.allocation_fraction / bar.close;
                self.execution.submit_order(side, quantity);
                self.risk
                    .on_entry(bar.close, bar.close * self.config.entry_vol_fraction, side);
            }
        } else if self.execution.is_invested() {
            self.execution.close_position(ExitReason::Signal);
            self.risk.on_exit(true);
        }

        // 7. Cooldown ticks once per bar.
        self.risk.update_cooldown();

        self.equity_curve.push(self.execution.equity(bar.close));
    }

    /// Drive a whole bar sequence and collect the result.
    pub fn run(&mut self, bars: &[Bar]) -> RunResult {
        for bar in bars {
            self.process_bar(bar);
        }
        RunResult {
            config_hash: self.config.config_hash(),
            equity_curve: self.equity_curve.clone(),
            trades: self.execution.trades().to_vec(),
            final_equity: *self
                .equity_curve
                .last()
                .expect("equity curve holds the initial point"),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn regime(&self) -> Regime {
        self.regime_strategy.regime()
    }

    /// The signal selected by routing on the most recent bar.
    pub fn selected_signal(&self) -> Signal {
        self.selected_signal
    }

    /// Signed position quantity.
    pub fn position(&self) -> f64 {
        self.execution.position()
    }

    /// Side of the open position, if any.
    pub fn position_side(&self) -> Option<crate::domain::Side> {
        self.execution.position_side()
    }

    pub fn equity_curve(&self) -> &[f64] {
        &self.equity_curve
    }

    pub fn trades(&self) -> &[Trade] {
        self.execution.trades()
    }

    /// Mark-to-market equity at an arbitrary price.
    pub fn equity(&self, price: f64) -> f64 {
        self.execution.equity(price)
    }
}
