//! Rate of Change (ROC): (price_t - price_{t-n}) / price_{t-n}.
//!
//! Buffers period+1 values; the comparison price is the value `period` steps
//! back. Degrades to 0 when the older value is 0.

use crate::indicators::Indicator;
use crate::window::RollingWindow;

#[derive(Debug, Clone)]
pub struct Roc {
    period: usize,
    window: RollingWindow<f64>,
    current: f64,
}

impl Roc {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "ROC period must be >= 1");
        Self {
            period,
            // period+1 values span `period` intervals
            window: RollingWindow::new(period + 1),
            current: 0.0,
        }
    }
}

impl Indicator for Roc {
    fn update(&mut self, value: f64) -> f64 {
        self.window.push(value);

        if self.window.len() <= self.period {
            return 0.0;
        }

        let old = self.window.get(self.period);
        self.current = if old != 0.0 { (value - old) / old } else { 0.0 };
        self.current
    }

    fn value(&self) -> f64 {
        self.current
    }

    fn is_ready(&self) -> bool {
        self.window.len() > self.period
    }
}
