//! Streaming technical indicators.
//!
//! Every indicator is an incremental state machine: it consumes one scalar
//! per call (ATR consumes a high/low/close triple), keeps O(period) state,
//! and exposes a `is_ready` flag meaning "has seen enough data for its value
//! to be meaningful". Readiness is monotone: once ready, always ready.
//!
//! The scalar indicators implement the [`Indicator`] trait. ATR takes three
//! inputs per bar and Bollinger produces a band set, so each exposes its own
//! update signature instead of being force-fitted into the scalar shape.

pub mod atr;
pub mod bollinger;
pub mod ema;
pub mod roc;
pub mod rolling_stats;
pub mod rsi;
pub mod sma;

pub use atr::Atr;
pub use bollinger::{Bands, Bollinger};
pub use ema::Ema;
pub use roc::Roc;
pub use rolling_stats::RollingStats;
pub use rsi::Rsi;
pub use sma::Sma;

/// Common interface for single-input streaming indicators.
pub trait Indicator {
    /// Consume one value and return the updated indicator value.
    fn update(&mut self, value: f64) -> f64;

    /// The most recently computed value.
    fn value(&self) -> f64;

    /// Whether enough data has been seen for `value()` to be meaningful.
    fn is_ready(&self) -> bool;
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
