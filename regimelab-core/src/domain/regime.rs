//! Regime — volatility × trend market classification.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Market regime label used to route signal generation.
///
/// The classifier crosses a volatility state (low when the short rolling
/// stdev of log returns is below the long one) with a trend state (trending
/// when |close − trend SMA| / SMA exceeds a threshold). `Undefined` holds
/// until the classifier's slowest window has warmed up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Regime {
    LowVolTrend,
    HighVolTrend,
    LowVolRange,
    HighVolRange,
    Undefined,
}

impl Regime {
    pub fn is_trending(self) -> bool {
        matches!(self, Regime::LowVolTrend | Regime::HighVolTrend)
    }

    pub fn is_ranging(self) -> bool {
        matches!(self, Regime::LowVolRange | Regime::HighVolRange)
    }
}

impl fmt::Display for Regime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Regime::LowVolTrend => "LV_TREND",
            Regime::HighVolTrend => "HV_TREND",
            Regime::LowVolRange => "LV_RANGE",
            Regime::HighVolRange => "HV_RANGE",
            Regime::Undefined => "UNDEFINED",
        };
        f.write_str(s)
    }
}
