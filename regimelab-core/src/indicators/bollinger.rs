//! Bollinger Bands.
//!
//! Basis = SMA(period); half-width = mult * population stdev of the window
//! around the basis, computed by a full scan of squared deviations once the
//! window is full. Before that the deviation is 0 and the bands collapse
//! onto the basis. %b = (price - lower) / (upper - lower), 0.5 when the
//! bands are degenerate.

use crate::indicators::{Indicator, Sma};
use crate::window::RollingWindow;

/// One bar's band values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bands {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
    pub pct_b: f64,
}

#[derive(Debug, Clone)]
pub struct Bollinger {
    period: usize,
    mult: f64,
    sma: Sma,
    window: RollingWindow<f64>,
    current: Bands,
}

impl Bollinger {
    pub fn new(period: usize, mult: f64) -> Self {
        assert!(period >= 1, "Bollinger period must be >= 1");
        assert!(mult > 0.0, "Bollinger multiplier must be positive");
        Self {
            period,
            mult,
            sma: Sma::new(period),
            window: RollingWindow::new(period),
            current: Bands {
                upper: 0.0,
                middle: 0.0,
                lower: 0.0,
                pct_b: 0.5,
            },
        }
    }

    pub fn multiplier(&self) -> f64 {
        self.mult
    }

    /// Consume one price and return the updated band set.
    pub fn update(&mut self, value: f64) -> Bands {
        let basis = self.sma.update(value);
        self.window.push(value);

        let variance = if self.window.is_full() {
            let mut sum_sq_diff = 0.0;
            for i in 0..self.window.len() {
                let diff = self.window.get(i) - basis;
                sum_sq_diff += diff * diff;
            }
            sum_sq_diff / self.period as f64
        } else {
            0.0
        };
        let std_dev = variance.sqrt();

        let upper = basis + self.mult * std_dev;
        let lower = basis - self.mult * std_dev;
        let pct_b = if upper != lower {
            (value - lower) / (upper - lower)
        } else {
            0.5
        };

        self.current = Bands {
            upper,
            middle: basis,
            lower,
            pct_b,
        };
        self.current
    }

    pub fn value(&self) -> Bands {
        self.current
    }

    pub fn is_ready(&self) -> bool {
        self.sma.is_ready()
    }
}
