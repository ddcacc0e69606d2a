//! Trade — a completed round trip from entry to exit.

use super::signal::Side;
use serde::{Deserialize, Serialize};

/// Why a position was closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExitReason {
    /// The risk manager's stop (initial or trailed) was breached intrabar.
    Stop,
    /// The routed strategy signal went flat.
    Signal,
}

/// A closed round-trip trade.
///
/// Appended exactly once, when the position returns to flat; never mutated
/// afterwards. `pnl` is (exit − entry) × quantity for longs and the mirror
/// for shorts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub entry_time: i64,
    pub exit_time: i64,
    pub entry_price: f64,
    pub exit_price: f64,
    pub quantity: f64,
    pub side: Side,
    pub pnl: f64,
    pub exit_reason: ExitReason,
}

impl Trade {
    pub fn is_winner(&self) -> bool {
        self.pnl > 0.0
    }

    /// Return on the trade as a fraction of entry cost.
    pub fn return_pct(&self) -> f64 {
        if self.entry_price == 0.0 || self.quantity == 0.0 {
            return 0.0;
        }
        self.pnl / (self.entry_price * self.quantity)
    }
}
