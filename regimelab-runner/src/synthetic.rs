//! Seeded synthetic bar generation.
//!
//! Deterministic given a seed: the same seed always yields the same series,
//! so tests and CLI runs are reproducible. Two building blocks — a tight
//! range and a steady trend — plus the composite used by smoke tests.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use regimelab_core::domain::Bar;

const BAR_SECS: i64 = 60;

/// One-minute bars oscillating tightly around `base` (about ±0.3%).
pub fn ranging_bars(n: usize, base: f64, start_time: i64, seed: u64) -> Vec<Bar> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut prev_close = base;
    (0..n)
        .map(|i| {
            let phase = (i as f64 * 0.7).sin();
            let noise = rng.gen_range(-0.05..0.05);
            let close = base * (1.0 + 0.003 * phase) + noise;
            let bar = ohlcv(start_time + BAR_SECS * i as i64, prev_close, close, &mut rng);
            prev_close = close;
            bar
        })
        .collect()
}

/// One-minute bars compounding `drift_per_bar` (e.g. 0.003 = +0.3%/bar).
pub fn trending_bars(
    n: usize,
    start_price: f64,
    drift_per_bar: f64,
    start_time: i64,
    seed: u64,
) -> Vec<Bar> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut prev_close = start_price;
    let mut level = start_price;
    (0..n)
        .map(|i| {
            level *= 1.0 + drift_per_bar;
            let noise = rng.gen_range(-0.02..0.02);
            let close = level + noise;
            let bar = ohlcv(start_time + BAR_SECS * i as i64, prev_close, close, &mut rng);
            prev_close = close;
            bar
        })
        .collect()
}

/// The canonical smoke series: a tight range followed by a strong uptrend.
pub fn range_then_trend(range_bars: usize, trend_bars: usize, seed: u64) -> Vec<Bar> {
    let start_time = BAR_SECS;
    let mut bars = ranging_bars(range_bars, 100.0, start_time, seed);
    let last_close = bars.last().map(|b| b.close).unwrap_or(100.0);
    let trend_start = start_time + BAR_SECS * range_bars as i64;
    bars.extend(trending_bars(
        trend_bars,
        last_close,
        0.003,
        trend_start,
        seed.wrapping_add(1),
    ));
    bars
}

fn ohlcv(timestamp: i64, open: f64, close: f64, rng: &mut StdRng) -> Bar {
    let wick = rng.gen_range(0.01..0.08);
    let high = open.max(close) + wick;
    let low = open.min(close) - wick;
    let volume = rng.gen_range(800.0..1_600.0);
    Bar::new(timestamp, open, high, low, close, volume)
}
