//! Risk management: stop-loss placement, trailing ratchet, daily trade
//! throttle, and post-loss cooldown.
//!
//! One state machine per open position plus session-level counters. The
//! calendar day used by the throttle comes from an explicit UTC offset in
//! [`RiskConfig`], never from the host's time zone, so runs are reproducible
//! anywhere.

use crate::config::RiskConfig;
use crate::domain::{Bar, Side};
use chrono::{DateTime, FixedOffset, NaiveDate};

#[derive(Debug, Clone)]
pub struct RiskManager {
    config: RiskConfig,
    offset: FixedOffset,

    // Position state
    side: Option<Side>,
    stop_loss: f64,
    highest_price: f64,
    lowest_price: f64,
    atr_at_entry: f64,

    // Session counters
    trades_today: u32,
    current_day: Option<NaiveDate>,
    cooldown_counter: u32,
}

impl RiskManager {
    pub fn new(config: RiskConfig) -> Self {
        let offset = FixedOffset::east_opt(config.utc_offset_secs)
            .expect("utc_offset_secs out of range");
        Self {
            config,
            offset,
            side: None,
            stop_loss: 0.0,
            highest_price: 0.0,
            lowest_price: 0.0,
            atr_at_entry: 0.0,
            trades_today: 0,
            current_day: None,
            cooldown_counter: 0,
        }
    }

    fn calendar_day(&self, timestamp: i64) -> NaiveDate {
        DateTime::from_timestamp(timestamp, 0)
            .expect("bar timestamp out of range")
            .with_timezone(&self.offset)
            .date_naive()
    }

    /// Whether a new entry is permitted at `timestamp`.
    ///
    /// Rolls the daily counter over when the (offset-adjusted) calendar date
    /// changes, then rejects when the day's entry budget is spent or a
    /// cooldown is running.
    pub fn can_enter(&mut self, timestamp: i64) -> bool {
        let day = self.calendar_day(timestamp);
        if self.current_day != Some(day) {
            self.trades_today = 0;
            self.current_day = Some(day);
        }

        if self.trades_today >= self.config.max_trades_per_day {
            return false;
        }
        if self.cooldown_counter > 0 {
            return false;
        }
        true
    }

    /// Initialize stop state for a freshly entered position.
    pub fn on_entry(&mut self, price: f64, atr_value: f64, side: Side) {
        self.highest_price = price;
        self.lowest_price = price;
        self.atr_at_entry = atr_value;
        self.side = Some(side);

        let distance = atr_value * self.config.atr_stop_multiplier;
        self.stop_loss = match side {
            Side::Long => price - distance,
            Side::Short => price + distance,
        };

        self.trades_today += 1;
    }

    /// Intrabar stop check and trailing update. Returns true when the stop
    /// is hit; the caller closes the position and reports the exit.
    ///
    /// The breach check runs before the trail, so a bar that both breaches
    /// and extends the favorable extreme exits at the old stop. While flat
    /// this always returns false, so one breach fires exactly once.
    pub fn check_exit(&mut self, bar: &Bar) -> bool {
        let side = match self.side {
            Some(s) => s,
            None => return false,
        };

        match side {
            Side::Long => {
                if bar.low < self.stop_loss {
                    return true;
                }
                if bar.high > self.highest_price {
                    self.highest_price = bar.high;
                    let candidate =
                        self.highest_price - self.atr_at_entry * self.config.atr_stop_multiplier;
                    // Ratchet: stops tighten, never loosen.
                    self.stop_loss = self.stop_loss.max(candidate);
                }
            }
            Side::Short => {
                if bar.high > self.stop_loss {
                    return true;
                }
                if bar.low < self.lowest_price {
                    self.lowest_price = bar.low;
                    let candidate =
                        self.lowest_price + self.atr_at_entry * self.config.atr_stop_multiplier;
                    self.stop_loss = self.stop_loss.min(candidate);
                }
            }
        }

        false
    }

    /// Record an exit. Losing exits arm the cooldown.
    pub fn on_exit(&mut self, is_win: bool) {
        self.side = None;
        if !is_win {
            self.cooldown_counter = self.config.cooldown_bars;
        }
    }

    /// Decrement the cooldown by one bar, floored at zero. Called once per
    /// bar, unconditionally.
    pub fn update_cooldown(&mut self) {
        self.cooldown_counter = self.cooldown_counter.saturating_sub(1);
    }

    /// The active stop level, if a position is being managed.
    pub fn stop_level(&self) -> Option<f64> {
        self.side.map(|_| self.stop_loss)
    }

    pub fn cooldown_remaining(&self) -> u32 {
        self.cooldown_counter
    }

    pub fn trades_today(&self) -> u32 {
        self.trades_today
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DAY: i64 = 86_400;
    // 2023-11-14 22:13:20 UTC
    const T0: i64 = 1_700_000_000;

    fn config() -> RiskConfig {
        RiskConfig {
            atr_stop_multiplier: 2.0,
            max_trades_per_day: 2,
            cooldown_bars: 3,
            ..RiskConfig::default()
        }
    }

    fn bar(timestamp: i64, high: f64, low: f64) -> Bar {
        Bar::new(timestamp, (high + low) / 2.0, high, low, (high + low) / 2.0, 1_000.0)
    }

    #[test]
    fn entry_places_stop_at_atr_multiple() {
        let mut rm = RiskManager::new(config());
        rm.on_entry(100.0, 1.0, Side::Long);
        assert_eq!(rm.stop_level(), Some(98.0));

        let mut rm = RiskManager::new(config());
        rm.on_entry(100.0, 1.0, Side::Short);
        assert_eq!(rm.stop_level(), Some(102.0));
    }

    #[test]
    fn long_trail_ratchets_up_never_down() {
        let mut rm = RiskManager::new(config());
        rm.on_entry(100.0, 1.0, Side::Long);

        assert!(!rm.check_exit(&bar(T0, 110.0, 105.0)));
        assert_eq!(rm.stop_level(), Some(108.0));

        // Pullback makes no new high: stop stays put.
        assert!(!rm.check_exit(&bar(T0 + 60, 109.0, 108.5)));
        assert_eq!(rm.stop_level(), Some(108.0));

        assert!(!rm.check_exit(&bar(T0 + 120, 120.0, 112.0)));
        assert_eq!(rm.stop_level(), Some(118.0));
    }

    #[test]
    fn short_trail_mirrors_downward() {
        let mut rm = RiskManager::new(config());
        rm.on_entry(100.0, 1.0, Side::Short);
        assert_eq!(rm.stop_level(), Some(102.0));

        assert!(!rm.check_exit(&bar(T0, 95.0, 90.0)));
        assert_eq!(rm.stop_level(), Some(92.0));
    }

    #[test]
    fn stop_breach_fires_once() {
        let mut rm = RiskManager::new(config());
        rm.on_entry(100.0, 1.0, Side::Long);

        let breach = bar(T0, 99.0, 97.0); // low under 98
        assert!(rm.check_exit(&breach));
        rm.on_exit(false);

        // Flat now: the same bar no longer triggers.
        assert!(!rm.check_exit(&breach));
    }

    #[test]
    fn breach_beats_trailing_on_the_same_bar() {
        let mut rm = RiskManager::new(config());
        rm.on_entry(100.0, 1.0, Side::Long);
        // New high and a breach in one bar: exit wins, stop untouched.
        assert!(rm.check_exit(&bar(T0, 112.0, 97.0)));
        assert_eq!(rm.stop_level(), Some(98.0));
    }

    #[test]
    fn losing_exit_arms_cooldown() {
        let mut rm = RiskManager::new(config());
        rm.on_entry(100.0, 1.0, Side::Long);
        rm.on_exit(false);

        assert!(!rm.can_enter(T0));
        rm.update_cooldown();
        rm.update_cooldown();
        assert!(!rm.can_enter(T0));
        rm.update_cooldown();
        assert!(rm.can_enter(T0));
    }

    #[test]
    fn winning_exit_skips_cooldown() {
        let mut rm = RiskManager::new(config());
        rm.on_entry(100.0, 1.0, Side::Long);
        rm.on_exit(true);
        assert!(rm.can_enter(T0));
    }

    #[test]
    fn daily_throttle_resets_on_date_change() {
        let mut rm = RiskManager::new(config());

        assert!(rm.can_enter(T0));
        rm.on_entry(100.0, 1.0, Side::Long);
        rm.on_exit(true);
        assert!(rm.can_enter(T0 + 60));
        rm.on_entry(100.0, 1.0, Side::Long);
        rm.on_exit(true);

        // Two entries today: budget spent.
        assert_eq!(rm.trades_today(), 2);
        assert!(!rm.can_enter(T0 + 120));

        // Next calendar day: counter rolls over.
        assert!(rm.can_enter(T0 + DAY));
        assert_eq!(rm.trades_today(), 0);
    }

    #[test]
    fn throttle_day_follows_configured_offset() {
        // 23:30 UTC and 00:30 UTC the next day.
        let midnight = (T0 / DAY + 1) * DAY;
        let before = midnight - 1_800;
        let after = midnight + 1_800;

        // Offset 0: the date changes between the two, so the counter resets.
        let mut utc = RiskManager::new(RiskConfig {
            max_trades_per_day: 1,
            ..config()
        });
        assert!(utc.can_enter(before));
        utc.on_entry(100.0, 1.0, Side::Long);
        utc.on_exit(true);
        assert!(utc.can_enter(after));

        // Offset -1h: both stamps land on the same local date; still throttled.
        let mut shifted = RiskManager::new(RiskConfig {
            max_trades_per_day: 1,
            utc_offset_secs: -3_600,
            ..config()
        });
        assert!(shifted.can_enter(before));
        shifted.on_entry(100.0, 1.0, Side::Long);
        shifted.on_exit(true);
        assert!(!shifted.can_enter(after));
    }

    #[test]
    fn update_cooldown_floors_at_zero() {
        let mut rm = RiskManager::new(config());
        rm.update_cooldown();
        assert_eq!(rm.cooldown_remaining(), 0);
    }
}
