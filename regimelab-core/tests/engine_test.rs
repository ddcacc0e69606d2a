//! Engine orchestration tests.
//!
//! Deterministic scenarios exercising the full per-bar sequence: fills at
//! next-bar opens, intrabar stops, regime routing, the daily trade throttle,
//! and the post-loss cooldown.

use regimelab_core::config::{EngineConfig, MeanReversionParams, RegimeParams, RiskConfig};
use regimelab_core::domain::{Bar, ExitReason, Side};
use regimelab_core::{Engine, Regime};
use std::collections::HashMap;

const BAR_SECS: i64 = 60;

fn make_bar(i: i64, close: f64) -> Bar {
    Bar::new(
        BAR_SECS * (i + 1),
        close,
        close + 0.1,
        close - 0.1,
        close,
        1_000.0,
    )
}

/// Noise, a steady decline, then a recovery. Small windows make the
/// mean-reversion path deterministic:
/// - bars 0..9 alternate ±0.8 around 100 (seeds the long vol windows)
/// - bars 10..17 fall 0.3 per bar (calm decline: oversold, low short vol)
/// - bars 18..23 recover 0.4 per bar (reversion completes)
fn reversion_scenario() -> Vec<Bar> {
    let mut closes = Vec::new();
    for i in 0..10 {
        closes.push(if i % 2 == 0 { 100.8 } else { 99.2 });
    }
    for i in 0..8 {
        closes.push(99.9 - 0.3 * i as f64);
    }
    for i in 0..6 {
        closes.push(98.2 + 0.4 * i as f64);
    }
    closes
        .into_iter()
        .enumerate()
        .map(|(i, c)| make_bar(i as i64, c))
        .collect()
}

/// Config tuned so the scenario's windows warm up inside two dozen bars and
/// the mean-reversion entry fires during the decline.
fn reversion_config(risk: RiskConfig) -> EngineConfig {
    EngineConfig {
        risk,
        regime: RegimeParams {
            vol_short: 3,
            vol_long: 6,
            trend_sma: 12,
            trend_threshold: 0.05,
        },
        mean_reversion: MeanReversionParams {
            bb_period: 5,
            bb_mult: 2.0,
            rsi_period: 3,
            entry_band: 0.5,
            exit_band: 0.1,
            rsi_oversold: 60.0,
            rsi_overbought: 40.0,
            vol_short: 3,
            vol_long: 6,
        },
        ..EngineConfig::default()
    }
}

/// Every fill must land exactly on some bar's open, at that bar's timestamp —
/// the decide-at-close, act-at-next-open discipline leaves no other price.
fn assert_fills_at_opens(bars: &[Bar], engine: &Engine) {
    let opens: HashMap<i64, f64> = bars.iter().map(|b| (b.timestamp, b.open)).collect();
    for trade in engine.trades() {
        let entry_open = opens
            .get(&trade.entry_time)
            .unwrap_or_else(|| panic!("entry time {} is not a bar timestamp", trade.entry_time));
        assert!(
            (trade.entry_price - entry_open).abs() < 1e-12,
            "entry filled at {} but that bar opened at {}",
            trade.entry_price,
            entry_open
        );
        let exit_open = opens
            .get(&trade.exit_time)
            .unwrap_or_else(|| panic!("exit time {} is not a bar timestamp", trade.exit_time));
        assert!(
            (trade.exit_price - exit_open).abs() < 1e-12,
            "exit filled at {} but that bar opened at {}",
            trade.exit_price,
            exit_open
        );
        assert!(trade.exit_time > trade.entry_time);
    }
}

#[test]
fn mean_reversion_round_trip_fills_at_next_opens() {
    // A wide stop keeps the risk manager out of the way.
    let risk = RiskConfig {
        atr_stop_multiplier: 50.0,
        cooldown_bars: 2,
        ..RiskConfig::default()
    };
    let bars = reversion_scenario();
    let mut engine = Engine::new(reversion_config(risk));
    let result = engine.run(&bars);

    assert!(
        !result.trades.is_empty(),
        "the decline should have triggered a mean-reversion entry"
    );
    let first = result.trades[0];
    assert_eq!(first.side, Side::Long);
    // The stop is parked far away: only the signal can close this trade.
    assert_eq!(first.exit_reason, ExitReason::Signal);
    // Entered during the decline, below the noise band.
    assert!(first.entry_price < 99.2);

    assert_fills_at_opens(&bars, &engine);
}

#[test]
fn stop_breach_closes_as_losing_exit_and_arms_cooldown() {
    // A tight stop turns the same decline into a stop-out.
    let risk = RiskConfig {
        atr_stop_multiplier: 0.5,
        cooldown_bars: 2,
        ..RiskConfig::default()
    };
    let bars = reversion_scenario();
    let mut engine = Engine::new(reversion_config(risk));
    let result = engine.run(&bars);

    let stop_outs: Vec<_> = result
        .trades
        .iter()
        .filter(|t| t.exit_reason == ExitReason::Stop)
        .collect();
    assert!(
        !stop_outs.is_empty(),
        "the tight stop should have been breached during the decline"
    );
    assert!(stop_outs[0].pnl < 0.0);

    // No entry lands inside the cooldown window after a stop-out.
    for trade in &result.trades {
        if trade.exit_reason != ExitReason::Stop {
            continue;
        }
        for later in &result.trades {
            if later.entry_time > trade.exit_time {
                assert!(
                    later.entry_time - trade.exit_time >= 2 * BAR_SECS,
                    "entry at {} violates the cooldown after the stop exit at {}",
                    later.entry_time,
                    trade.exit_time
                );
            }
        }
    }

    assert_fills_at_opens(&bars, &engine);
}

#[test]
fn daily_throttle_caps_entries_per_calendar_day() {
    // One entry per day: the second setup in the same session is refused.
    let risk = RiskConfig {
        atr_stop_multiplier: 50.0,
        max_trades_per_day: 1,
        cooldown_bars: 0,
        ..RiskConfig::default()
    };
    let bars = reversion_scenario();
    let mut engine = Engine::new(reversion_config(risk));
    let result = engine.run(&bars);

    // All 24 bars sit inside one calendar day.
    assert!(
        result.trades.len() <= 1,
        "throttle allowed {} entries in one day",
        result.trades.len()
    );
}

// ─── End-to-end: range segment then trend segment ────────────────────

/// 400 tightly-ranging bars followed by 200 strongly-trending bars.
fn range_then_trend() -> Vec<Bar> {
    let mut bars = Vec::with_capacity(600);
    let mut prev_close = 100.0;
    for i in 0..600 {
        let close = if i < 400 {
            100.0 + 0.3 * (i as f64 * 0.7).sin()
        } else {
            100.0 * 1.003_f64.powi(i - 400 + 1)
        };
        let open: f64 = prev_close;
        let high = open.max(close) + 0.05;
        let low = open.min(close) - 0.05;
        let volume = 1_000.0 + (i * 37 % 100) as f64;
        bars.push(Bar::new(BAR_SECS * (i as i64 + 1), open, high, low, close, volume));
        prev_close = close;
    }
    bars
}

#[test]
fn end_to_end_classifies_range_then_trend() {
    let bars = range_then_trend();
    let mut engine = Engine::new(EngineConfig::default());

    let mut regimes = Vec::with_capacity(bars.len());
    for bar in &bars {
        engine.process_bar(bar);
        regimes.push(engine.regime());
    }

    // Warm-up: the 300-bar trend SMA leaves the regime undefined early on.
    assert_eq!(regimes[0], Regime::Undefined);
    assert_eq!(regimes[250], Regime::Undefined);

    // Once warm, the tight range classifies as a range regime on every bar.
    for (i, r) in regimes.iter().enumerate().take(400).skip(300) {
        assert!(r.is_ranging(), "bar {i} classified {r} inside the range segment");
    }

    // Deep into the ramp the regime is a trend on every bar.
    for (i, r) in regimes.iter().enumerate().take(600).skip(420) {
        assert!(r.is_trending(), "bar {i} classified {r} inside the trend segment");
    }

    assert_eq!(engine.equity_curve().len(), 601);
}

#[test]
fn end_to_end_respects_throttle_and_cooldown() {
    let bars = range_then_trend();
    let config = EngineConfig::default();
    let max_per_day = config.risk.max_trades_per_day as usize;
    let cooldown = config.risk.cooldown_bars as i64;

    let mut engine = Engine::new(config);
    let result = engine.run(&bars);

    // Entries per (UTC) calendar day never exceed the budget.
    let mut per_day: HashMap<i64, usize> = HashMap::new();
    for trade in &result.trades {
        *per_day.entry(trade.entry_time.div_euclid(86_400)).or_default() += 1;
    }
    for (day, count) in per_day {
        assert!(
            count <= max_per_day,
            "{count} entries on day {day}, budget is {max_per_day}"
        );
    }

    // No entry lands inside the cooldown window after a losing stop exit.
    for trade in &result.trades {
        if trade.exit_reason != ExitReason::Stop {
            continue;
        }
        for later in &result.trades {
            if later.entry_time > trade.exit_time {
                assert!(
                    later.entry_time - trade.exit_time >= cooldown * BAR_SECS,
                    "entry at {} inside cooldown after stop exit at {}",
                    later.entry_time,
                    trade.exit_time
                );
            }
        }
    }

    assert_fills_at_opens(&bars, &engine);
}
