//! Mean-reversion strategy: Bollinger band position + RSI confirmation,
//! gated to calm markets.
//!
//! The band position is recomputed from the band half-width rather than read
//! off the indicator's %b: sigma = (upper - middle) / mult, then
//! pos = (close - middle) / (mult * sigma), which spans roughly [-1, 1]
//! between the bands. Entries fade band extremes when RSI confirms and the
//! short volatility window sits below the long one. Exits fire only from the
//! matching side, once price has reverted past the exit band.

use crate::config::MeanReversionParams;
use crate::domain::{Bar, Signal};
use crate::indicators::{Bollinger, Indicator, RollingStats, Rsi};
use crate::strategy::Strategy;

/// Everything the transition function looks at for one bar.
#[derive(Debug, Clone, Copy)]
struct Snapshot {
    band_pos: f64,
    rsi: f64,
    low_vol: bool,
}

/// Guarded transition: entries first, then side-matched exits, else hold.
fn transition(current: Signal, snap: Snapshot, params: &MeanReversionParams) -> Signal {
    let long_entry =
        snap.band_pos < -params.entry_band && snap.rsi < params.rsi_oversold && snap.low_vol;
    let short_entry =
        snap.band_pos > params.entry_band && snap.rsi > params.rsi_overbought && snap.low_vol;

    if long_entry {
        return Signal::Long;
    }
    if short_entry {
        return Signal::Short;
    }
    match current {
        Signal::Long if snap.band_pos > params.exit_band => Signal::Flat,
        Signal::Short if snap.band_pos < -params.exit_band => Signal::Flat,
        other => other,
    }
}

#[derive(Debug, Clone)]
pub struct MeanReversionStrategy {
    params: MeanReversionParams,
    bands: Bollinger,
    rsi: Rsi,
    vol_short: RollingStats,
    vol_long: RollingStats,
    last_close: Option<f64>,
    signal: Signal,
}

impl MeanReversionStrategy {
    pub fn new(params: MeanReversionParams) -> Self {
        Self {
            bands: Bollinger::new(params.bb_period, params.bb_mult),
            rsi: Rsi::new(params.rsi_period),
            vol_short: RollingStats::new(params.vol_short),
            vol_long: RollingStats::new(params.vol_long),
            last_close: None,
            signal: Signal::Flat,
            params,
        }
    }
}

impl Strategy for MeanReversionStrategy {
    fn on_bar(&mut self, bar: &Bar) {
        let bands = self.bands.update(bar.close);
        let rsi = self.rsi.update(bar.close);

        if let Some(prev) = self.last_close {
            if prev > 0.0 {
                let log_ret = (bar.close / prev).ln();
                self.vol_short.update(log_ret);
                self.vol_long.update(log_ret);
            }
        }
        self.last_close = Some(bar.close);

        if !self.bands.is_ready() || !self.rsi.is_ready() || !self.vol_long.is_ready() {
            return;
        }

        // Band position from the half-width: collapsed bands pin it to 0.
        let sigma = (bands.upper - bands.middle) / self.params.bb_mult;
        let band_pos = if sigma > 0.0 {
            (bar.close - bands.middle) / (self.params.bb_mult * sigma)
        } else {
            0.0
        };

        let snap = Snapshot {
            band_pos,
            rsi,
            low_vol: self.vol_short.std_dev() < self.vol_long.std_dev(),
        };

        self.signal = transition(self.signal, snap, &self.params);
    }

    fn signal(&self) -> Signal {
        self.signal
    }

    fn name(&self) -> &'static str {
        "mean_reversion"
    }
}
