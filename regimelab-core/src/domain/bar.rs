//! Bar — the fundamental market data unit.

use serde::{Deserialize, Serialize};

/// One OHLCV sample for a fixed time interval on a single instrument.
///
/// `timestamp` is unix seconds. Bars are immutable once produced by the
/// loader and must be fed to the engine in nondecreasing-timestamp order.
/// The engine itself never sorts, dedupes, or validates — that is the
/// ingestion layer's job.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub timestamp: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Bar {
    pub fn new(timestamp: i64, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Basic sanity check: positive timestamp, uncrossed high/low, positive open.
    ///
    /// Feeding a bar that fails this check silently corrupts downstream
    /// ratios; loaders are expected to reject such rows before the engine
    /// ever sees them.
    pub fn is_well_formed(&self) -> bool {
        self.timestamp > 0 && self.high >= self.low && self.open > 0.0
    }
}
