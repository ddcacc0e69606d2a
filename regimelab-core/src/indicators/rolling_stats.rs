//! Rolling mean / standard deviation / z-score over a fixed window.
//!
//! Maintains a running sum and sum of squares, removing the evicted value's
//! contribution on overflow. Variance = sum_sq/n - mean^2, clamped to >= 0
//! against floating-point cancellation. Z-score degrades to 0 when the
//! standard deviation is at or below 1e-9.

use crate::indicators::Indicator;
use crate::window::RollingWindow;

#[derive(Debug, Clone)]
pub struct RollingStats {
    period: usize,
    window: RollingWindow<f64>,
    sum: f64,
    sum_sq: f64,
    mean: f64,
    std_dev: f64,
    zscore: f64,
}

impl RollingStats {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "RollingStats period must be >= 1");
        Self {
            period,
            window: RollingWindow::new(period),
            sum: 0.0,
            sum_sq: 0.0,
            mean: 0.0,
            std_dev: 0.0,
            zscore: 0.0,
        }
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    pub fn std_dev(&self) -> f64 {
        self.std_dev
    }

    /// (newest - mean) / std_dev of the current window, 0 when degenerate.
    pub fn zscore(&self) -> f64 {
        self.zscore
    }
}

impl Indicator for RollingStats {
    fn update(&mut self, value: f64) -> f64 {
        if self.window.is_full() {
            let old = self.window.get(self.period - 1);
            self.sum -= old;
            self.sum_sq -= old * old;
        }

        self.window.push(value);
        self.sum += value;
        self.sum_sq += value * value;

        let n = self.window.len() as f64;
        self.mean = self.sum / n;

        let variance = (self.sum_sq / n - self.mean * self.mean).max(0.0);
        self.std_dev = variance.sqrt();

        self.zscore = if self.std_dev > 1e-9 {
            (value - self.mean) / self.std_dev
        } else {
            0.0
        };

        self.mean
    }

    fn value(&self) -> f64 {
        self.mean
    }

    fn is_ready(&self) -> bool {
        self.window.is_full()
    }
}
