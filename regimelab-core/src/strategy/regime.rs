//! Volatility × trend regime classifier.
//!
//! Feeds the log return of each close into short and long rolling-stats
//! windows and the close itself into a trend SMA. Once the long window and
//! the SMA are both warm, each bar is classified on two axes:
//! low volatility (short stdev < long stdev) and trending
//! (|close - sma| / sma > threshold). Emits no trade signal of its own; the
//! engine reads the regime label to route the other strategies.

use crate::config::RegimeParams;
use crate::domain::{Bar, Regime, Signal};
use crate::indicators::{Indicator, RollingStats, Sma};
use crate::strategy::Strategy;

#[derive(Debug, Clone)]
pub struct RegimeStrategy {
    params: RegimeParams,
    vol_short: RollingStats,
    vol_long: RollingStats,
    trend_sma: Sma,
    last_close: Option<f64>,
    current: Regime,
}

impl RegimeStrategy {
    pub fn new(params: RegimeParams) -> Self {
        Self {
            vol_short: RollingStats::new(params.vol_short),
            vol_long: RollingStats::new(params.vol_long),
            trend_sma: Sma::new(params.trend_sma),
            last_close: None,
            current: Regime::Undefined,
            params,
        }
    }

    pub fn regime(&self) -> Regime {
        self.current
    }
}

impl Strategy for RegimeStrategy {
    fn on_bar(&mut self, bar: &Bar) {
        // Volatility runs on log returns, so the very first bar only primes
        // the previous close.
        if let Some(prev) = self.last_close {
            if prev > 0.0 {
                let log_ret = (bar.close / prev).ln();
                self.vol_short.update(log_ret);
                self.vol_long.update(log_ret);
            }
        }
        self.last_close = Some(bar.close);

        self.trend_sma.update(bar.close);

        if !self.vol_long.is_ready() || !self.trend_sma.is_ready() {
            return;
        }

        let low_vol = self.vol_short.std_dev() < self.vol_long.std_dev();

        let sma_val = self.trend_sma.value();
        let trend_strength = (bar.close - sma_val).abs() / sma_val;
        let trending = trend_strength > self.params.trend_threshold;

        self.current = match (low_vol, trending) {
            (true, true) => Regime::LowVolTrend,
            (false, true) => Regime::HighVolTrend,
            (true, false) => Regime::LowVolRange,
            (false, false) => Regime::HighVolRange,
        };
    }

    fn signal(&self) -> Signal {
        // The classifier routes; it never trades.
        Signal::Flat
    }

    fn name(&self) -> &'static str {
        "regime"
    }
}
