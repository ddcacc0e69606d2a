//! Simple Moving Average (SMA).
//!
//! Rolling mean over a fixed window, maintained incrementally: the value
//! about to be evicted is subtracted before the new one is added. Before the
//! window fills, the value is the partial average of what has been seen, but
//! the indicator only reports ready once the window is full.

use crate::indicators::Indicator;
use crate::window::RollingWindow;

#[derive(Debug, Clone)]
pub struct Sma {
    period: usize,
    sum: f64,
    window: RollingWindow<f64>,
    current: f64,
}

impl Sma {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "SMA period must be >= 1");
        Self {
            period,
            sum: 0.0,
            window: RollingWindow::new(period),
            current: 0.0,
        }
    }

    pub fn period(&self) -> usize {
        self.period
    }
}

impl Indicator for Sma {
    fn update(&mut self, value: f64) -> f64 {
        if self.window.is_full() {
            self.sum -= self.window.get(self.period - 1);
        }
        self.window.push(value);
        self.sum += value;

        self.current = self.sum / self.window.len() as f64;
        self.current
    }

    fn value(&self) -> f64 {
        self.current
    }

    fn is_ready(&self) -> bool {
        self.window.is_full()
    }
}
