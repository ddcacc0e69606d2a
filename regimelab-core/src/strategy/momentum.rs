//! Momentum strategy: z-scored rate of change with trend, volume, RSI, and
//! acceleration filters.
//!
//! The raw momentum (ROC over `momentum_period`) is normalized to a z-score
//! over `ranking_period`. Entries require the z-score to clear the entry
//! threshold in the trade direction, the fast EMA to be on the right side of
//! the slow EMA, above-average volume, RSI away from the blocking extreme,
//! and the z-score still moving in the trade direction versus the prior bar.
//! The position is flattened whenever momentum weakens (|z| under the exit
//! threshold), regardless of direction. Anything else holds.

use crate::config::MomentumParams;
use crate::domain::{Bar, Signal};
use crate::indicators::{Ema, Indicator, Roc, RollingStats, Rsi, Sma};
use crate::strategy::Strategy;

/// Everything the transition function looks at for one bar.
#[derive(Debug, Clone, Copy)]
struct Snapshot {
    zscore: f64,
    prev_zscore: f64,
    fast_ema: f64,
    slow_ema: f64,
    volume: f64,
    volume_avg: f64,
    rsi: f64,
}

/// Guarded transition: entry beats exit, no trigger holds.
fn transition(current: Signal, snap: Snapshot, params: &MomentumParams) -> Signal {
    let trend_up = snap.fast_ema > snap.slow_ema;
    let trend_down = snap.fast_ema < snap.slow_ema;
    let high_volume = snap.volume > snap.volume_avg;
    let accelerating = snap.zscore > snap.prev_zscore;
    let decelerating = snap.zscore < snap.prev_zscore;

    let long_entry = snap.zscore > params.entry_zscore
        && trend_up
        && high_volume
        && snap.rsi < params.rsi_ceiling
        && accelerating;
    let short_entry = snap.zscore < -params.entry_zscore
        && trend_down
        && high_volume
        && snap.rsi > params.rsi_floor
        && decelerating;

    if long_entry {
        Signal::Long
    } else if short_entry {
        Signal::Short
    } else if snap.zscore.abs() < params.exit_zscore {
        Signal::Flat
    } else {
        current
    }
}

#[derive(Debug, Clone)]
pub struct MomentumStrategy {
    params: MomentumParams,
    roc: Roc,
    roc_zscore: RollingStats,
    fast_ema: Ema,
    slow_ema: Ema,
    volume_avg: Sma,
    rsi: Rsi,
    last_zscore: f64,
    signal: Signal,
}

impl MomentumStrategy {
    pub fn new(params: MomentumParams) -> Self {
        Self {
            roc: Roc::new(params.momentum_period),
            roc_zscore: RollingStats::new(params.ranking_period),
            fast_ema: Ema::new(params.fast_ema),
            slow_ema: Ema::new(params.slow_ema),
            volume_avg: Sma::new(params.volume_sma),
            rsi: Rsi::new(params.rsi_period),
            last_zscore: 0.0,
            signal: Signal::Flat,
            params,
        }
    }
}

impl Strategy for MomentumStrategy {
    fn on_bar(&mut self, bar: &Bar) {
        let momentum = self.roc.update(bar.close);
        self.roc_zscore.update(momentum);

        self.fast_ema.update(bar.close);
        self.slow_ema.update(bar.close);
        self.volume_avg.update(bar.volume);
        self.rsi.update(bar.close);

        if !self.roc_zscore.is_ready()
            || !self.slow_ema.is_ready()
            || !self.volume_avg.is_ready()
            || !self.rsi.is_ready()
        {
            return;
        }

        let snap = Snapshot {
            zscore: self.roc_zscore.zscore(),
            prev_zscore: self.last_zscore,
            fast_ema: self.fast_ema.value(),
            slow_ema: self.slow_ema.value(),
            volume: bar.volume,
            volume_avg: self.volume_avg.value(),
            rsi: self.rsi.value(),
        };
        self.last_zscore = snap.zscore;

        self.signal = transition(self.signal, snap, &self.params);
    }

    fn signal(&self) -> Signal {
        self.signal
    }

    fn name(&self) -> &'static str {
        "momentum"
    }
}
