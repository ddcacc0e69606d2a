//! Average True Range (ATR).
//!
//! True range: max(high-low, |high-prev_close|, |low-prev_close|); on the
//! very first bar, with no previous close, just high-low. The first `period`
//! true ranges are summed and divided by the period to seed the average;
//! thereafter Wilder smoothing: ATR = (ATR*(period-1) + TR)/period.
//!
//! ATR consumes a high/low/close triple per bar, so it deliberately does not
//! implement the scalar `Indicator` trait.

#[derive(Debug, Clone)]
pub struct Atr {
    period: usize,
    prev_close: Option<f64>,
    initialized_count: usize,
    current: f64,
}

impl Atr {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "ATR period must be >= 1");
        Self {
            period,
            prev_close: None,
            initialized_count: 0,
            current: 0.0,
        }
    }

    /// Consume one bar's high/low/close and return the updated ATR.
    pub fn update(&mut self, high: f64, low: f64, close: f64) -> f64 {
        let tr = match self.prev_close {
            None => high - low,
            Some(pc) => (high - low).max((high - pc).abs()).max((low - pc).abs()),
        };
        self.prev_close = Some(close);

        if self.initialized_count < self.period {
            self.current += tr;
            self.initialized_count += 1;
            if self.initialized_count == self.period {
                self.current /= self.period as f64;
            }
        } else {
            let n = self.period as f64;
            self.current = (self.current * (n - 1.0) + tr) / n;
        }

        self.current
    }

    pub fn value(&self) -> f64 {
        self.current
    }

    pub fn is_ready(&self) -> bool {
        self.initialized_count >= self.period
    }
}
