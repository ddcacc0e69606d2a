//! Caller-supplied configuration for a single backtest run.
//!
//! Every threshold and period the components consume lives here, with
//! defaults matching the engine's reference tuning for 1-minute data.
//! `EngineConfig` serializes canonically (serde_json) and hashes with blake3
//! so identical configurations are identifiable across runs.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A configuration value the engine cannot run with.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("initial_capital must be positive (got {0})")]
    NonPositiveCapital(f64),

    #[error("allocation_fraction must be in (0, 1] (got {0})")]
    AllocationOutOfRange(f64),

    #[error("entry_vol_fraction must be positive (got {0})")]
    NonPositiveVolFraction(f64),

    #[error("{0} period must be >= 1")]
    ZeroPeriod(&'static str),

    #[error("utc_offset_secs must be strictly between -86400 and 86400 (got {0})")]
    UtcOffsetOutOfRange(i32),
}

/// Regime classifier parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegimeParams {
    /// Short volatility window over log returns (bars).
    pub vol_short: usize,
    /// Long volatility window over log returns (bars).
    pub vol_long: usize,
    /// Trend SMA period over closes (bars).
    pub trend_sma: usize,
    /// |close - sma| / sma above this counts as trending.
    pub trend_threshold: f64,
}

impl Default for RegimeParams {
    fn default() -> Self {
        Self {
            vol_short: 50,
            vol_long: 200,
            trend_sma: 300,
            trend_threshold: 0.005,
        }
    }
}

/// Momentum strategy parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MomentumParams {
    /// Rate-of-change lookback (bars).
    pub momentum_period: usize,
    /// Window over which the ROC is z-scored (bars).
    pub ranking_period: usize,
    /// Z-score magnitude required to enter.
    pub entry_zscore: f64,
    /// Z-score magnitude below which the position is flattened.
    pub exit_zscore: f64,
    pub fast_ema: usize,
    pub slow_ema: usize,
    /// Volume SMA period for the participation filter.
    pub volume_sma: usize,
    pub rsi_period: usize,
    /// Longs are blocked when RSI is at or above this.
    pub rsi_ceiling: f64,
    /// Shorts are blocked when RSI is at or below this.
    pub rsi_floor: f64,
}

impl Default for MomentumParams {
    fn default() -> Self {
        Self {
            momentum_period: 100,
            ranking_period: 100,
            entry_zscore: 1.5,
            exit_zscore: 0.3,
            fast_ema: 12,
            slow_ema: 26,
            volume_sma: 20,
            rsi_period: 14,
            rsi_ceiling: 75.0,
            rsi_floor: 25.0,
        }
    }
}

/// Mean-reversion strategy parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeanReversionParams {
    pub bb_period: usize,
    pub bb_mult: f64,
    pub rsi_period: usize,
    /// Band-position magnitude required to enter.
    pub entry_band: f64,
    /// Band-position level at which a position has reverted enough to exit.
    pub exit_band: f64,
    pub rsi_oversold: f64,
    pub rsi_overbought: f64,
    /// Short volatility window over log returns (bars).
    pub vol_short: usize,
    /// Long volatility window over log returns (bars).
    pub vol_long: usize,
}

impl Default for MeanReversionParams {
    fn default() -> Self {
        Self {
            bb_period: 100,
            bb_mult: 2.0,
            rsi_period: 20,
            entry_band: 0.8,
            exit_band: 0.1,
            rsi_oversold: 30.0,
            rsi_overbought: 70.0,
            vol_short: 20,
            vol_long: 60,
        }
    }
}

/// Risk manager parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskConfig {
    /// Stop distance as a multiple of the volatility estimate at entry.
    pub atr_stop_multiplier: f64,
    /// Reserved: accepted and carried but not consumed by current logic.
    pub max_drawdown_limit: f64,
    pub max_trades_per_day: u32,
    /// Bars without entries after a losing exit.
    pub cooldown_bars: u32,
    /// Offset from UTC, in seconds, defining the calendar day used by the
    /// daily trade throttle. Explicit so runs are reproducible regardless of
    /// the host's time zone.
    pub utc_offset_secs: i32,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            atr_stop_multiplier: 2.0,
            max_drawdown_limit: 0.10,
            max_trades_per_day: 20,
            cooldown_bars: 5,
            utc_offset_secs: 0,
        }
    }
}

/// Top-level engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub initial_capital: f64,
    /// Fraction of starting capital allocated to each entry.
    pub allocation_fraction: f64,
    /// Volatility proxy at entry, as a fraction of the entry close. The stop
    /// is seeded at close * entry_vol_fraction * atr_stop_multiplier away.
    pub entry_vol_fraction: f64,
    pub risk: RiskConfig,
    pub regime: RegimeParams,
    pub momentum: MomentumParams,
    pub mean_reversion: MeanReversionParams,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            initial_capital: 100_000.0,
            allocation_fraction: 0.20,
            entry_vol_fraction: 0.01,
            risk: RiskConfig::default(),
            regime: RegimeParams::default(),
            momentum: MomentumParams::default(),
            mean_reversion: MeanReversionParams::default(),
        }
    }
}

impl EngineConfig {
    /// Deterministic fingerprint of the full configuration.
    ///
    /// Two runs with equal hashes were configured identically and, given the
    /// same bars, produce the same trades.
    pub fn config_hash(&self) -> String {
        let json = serde_json::to_string(self).expect("EngineConfig must serialize");
        blake3::hash(json.as_bytes()).to_hex().to_string()
    }

    /// Reject values the engine cannot run with. Call before constructing an
    /// engine from externally supplied (file, CLI) configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.initial_capital <= 0.0 {
            return Err(ConfigError::NonPositiveCapital(self.initial_capital));
        }
        if self.allocation_fraction <= 0.0 || self.allocation_fraction > 1.0 {
            return Err(ConfigError::AllocationOutOfRange(self.allocation_fraction));
        }
        if self.entry_vol_fraction <= 0.0 {
            return Err(ConfigError::NonPositiveVolFraction(self.entry_vol_fraction));
        }

        let periods = [
            ("regime.vol_short", self.regime.vol_short),
            ("regime.vol_long", self.regime.vol_long),
            ("regime.trend_sma", self.regime.trend_sma),
            ("momentum.momentum_period", self.momentum.momentum_period),
            ("momentum.ranking_period", self.momentum.ranking_period),
            ("momentum.fast_ema", self.momentum.fast_ema),
            ("momentum.slow_ema", self.momentum.slow_ema),
            ("momentum.volume_sma", self.momentum.volume_sma),
            ("momentum.rsi_period", self.momentum.rsi_period),
            ("mean_reversion.bb_period", self.mean_reversion.bb_period),
            ("mean_reversion.rsi_period", self.mean_reversion.rsi_period),
            ("mean_reversion.vol_short", self.mean_reversion.vol_short),
            ("mean_reversion.vol_long", self.mean_reversion.vol_long),
        ];
        for (name, period) in periods {
            if period == 0 {
                return Err(ConfigError::ZeroPeriod(name));
            }
        }

        // chrono's FixedOffset rejects a full ±24h, so mirror its bound here.
        if self.risk.utc_offset_secs.abs() >= 86_400 {
            return Err(ConfigError::UtcOffsetOutOfRange(self.risk.utc_offset_secs));
        }

        Ok(())
    }
}
