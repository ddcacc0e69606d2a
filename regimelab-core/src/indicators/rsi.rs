//! Relative Strength Index (RSI).
//!
//! Wilder smoothing of average gains and losses:
//! RSI = 100 - 100 / (1 + avg_gain / avg_loss), 100 when avg_loss is zero.
//! The first call only stores the price (no change exists yet) and returns 0.
//! The first `period` changes accumulate raw sums which are divided by the
//! period to seed the averages; thereafter avg = (avg*(period-1) + new)/period.

use crate::indicators::Indicator;

#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
    avg_gain: f64,
    avg_loss: f64,
    prev_price: Option<f64>,
    initialized_count: usize,
    current: f64,
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "RSI period must be >= 1");
        Self {
            period,
            avg_gain: 0.0,
            avg_loss: 0.0,
            prev_price: None,
            initialized_count: 0,
            current: 0.0,
        }
    }
}

impl Indicator for Rsi {
    fn update(&mut self, value: f64) -> f64 {
        let prev = match self.prev_price {
            Some(p) => p,
            None => {
                self.prev_price = Some(value);
                return 0.0;
            }
        };

        let change = value - prev;
        self.prev_price = Some(value);

        let gain = if change > 0.0 { change } else { 0.0 };
        let loss = if change < 0.0 { -change } else { 0.0 };

        if self.initialized_count < self.period {
            self.avg_gain += gain;
            self.avg_loss += loss;
            self.initialized_count += 1;

            if self.initialized_count == self.period {
                self.avg_gain /= self.period as f64;
                self.avg_loss /= self.period as f64;
            }
        } else {
            let n = self.period as f64;
            self.avg_gain = (self.avg_gain * (n - 1.0) + gain) / n;
            self.avg_loss = (self.avg_loss * (n - 1.0) + loss) / n;
        }

        if self.initialized_count < self.period {
            return 0.0;
        }

        self.current = if self.avg_loss == 0.0 {
            100.0
        } else {
            let rs = self.avg_gain / self.avg_loss;
            100.0 - 100.0 / (1.0 + rs)
        };
        self.current
    }

    fn value(&self) -> f64 {
        self.current
    }

    fn is_ready(&self) -> bool {
        self.initialized_count >= self.period
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, DEFAULT_EPSILON};

    #[test]
    fn rsi_first_call_stores_price_only() {
        let mut rsi = Rsi::new(14);
        assert_eq!(rsi.update(100.0), 0.0);
        assert!(!rsi.is_ready());
    }

    #[test]
    fn rsi_strictly_increasing_is_100() {
        let mut rsi = Rsi::new(14);
        for i in 0..40 {
            rsi.update(100.0 + i as f64);
        }
        assert!(rsi.is_ready());
        assert_approx(rsi.value(), 100.0, DEFAULT_EPSILON);
    }

    #[test]
    fn rsi_strictly_decreasing_is_0() {
        let mut rsi = Rsi::new(14);
        for i in 0..40 {
            rsi.update(200.0 - i as f64);
        }
        assert!(rsi.is_ready());
        assert_approx(rsi.value(), 0.0, DEFAULT_EPSILON);
    }

    #[test]
    fn rsi_ready_after_period_changes() {
        let mut rsi = Rsi::new(3);
        rsi.update(10.0); // seed, no change
        rsi.update(11.0);
        rsi.update(10.5);
        assert!(!rsi.is_ready());
        rsi.update(11.5); // third change
        assert!(rsi.is_ready());
    }

    #[test]
    fn rsi_seed_then_wilder() {
        // period 2; prices 10, 11, 10.5, 11.5
        // changes: +1, -0.5, +1
        // seed: avg_gain = 1/2 = 0.5, avg_loss = 0.5/2 = 0.25
        // RSI = 100 - 100/(1 + 2) = 66.666...
        // next change +1: avg_gain = (0.5*1 + 1)/2 = 0.75, avg_loss = 0.125
        // RSI = 100 - 100/(1 + 6) = 85.714...
        let mut rsi = Rsi::new(2);
        rsi.update(10.0);
        rsi.update(11.0);
        let first = rsi.update(10.5);
        assert_approx(first, 100.0 - 100.0 / (1.0 + 2.0), 1e-9);
        let second = rsi.update(11.5);
        assert_approx(second, 100.0 - 100.0 / (1.0 + 6.0), 1e-9);
    }

    #[test]
    fn rsi_stays_in_bounds() {
        let mut rsi = Rsi::new(3);
        for (i, v) in [100.0, 105.0, 98.0, 110.0, 95.0, 115.0, 90.0, 120.0]
            .into_iter()
            .enumerate()
        {
            rsi.update(v);
            if rsi.is_ready() {
                let v = rsi.value();
                assert!((0.0..=100.0).contains(&v), "RSI out of bounds at {i}: {v}");
            }
        }
    }
}
