//! Order fill simulation and trade bookkeeping.
//!
//! A single pending order fills unconditionally at the next bar's open — no
//! slippage, partial fills, or rejections are modeled. Cash and the signed
//! position are updated on each fill, and a [`Trade`] is recorded the moment
//! the position returns to flat.

use crate::domain::{Bar, ExitReason, Order, Side, Trade};

#[derive(Debug, Clone)]
pub struct ExecutionEngine {
    cash: f64,
    /// Signed quantity: positive long, negative short.
    position: f64,
    position_side: Option<Side>,

    // Entry memory for the trade record
    last_entry_time: i64,
    last_entry_price: f64,

    pending: Option<Order>,
    /// Reason attached to a pending closing order.
    pending_exit_reason: Option<ExitReason>,
    trades: Vec<Trade>,
}

impl ExecutionEngine {
    pub fn new(initial_capital: f64) -> Self {
        Self {
            cash: initial_capital,
            position: 0.0,
            position_side: None,
            last_entry_time: 0,
            last_entry_price: 0.0,
            pending: None,
            pending_exit_reason: None,
            trades: Vec::new(),
        }
    }

    /// Queue a market order for the next bar's open. A still-pending order
    /// is replaced: the last submission before the fill wins.
    pub fn submit_order(&mut self, side: Side, quantity: f64) {
        self.pending = Some(Order::new(side, quantity));
        self.pending_exit_reason = None;
    }

    /// Submit an order for the full outstanding quantity, opposite side.
    /// No-op while flat.
    pub fn close_position(&mut self, reason: ExitReason) {
        if let Some(side) = self.position_side {
            self.submit_order(side.opposite(), self.position.abs());
            self.pending_exit_reason = Some(reason);
        }
    }

    /// Fill any pending order at this bar's open.
    pub fn on_bar_open(&mut self, bar: &Bar) {
        if let Some(order) = self.pending.take() {
            self.fill(bar.timestamp, order, bar.open);
        }
    }

    fn fill(&mut self, timestamp: i64, order: Order, price: f64) {
        let cost = order.quantity * price;

        // Entering from flat: remember the entry for the eventual record.
        if self.position_side.is_none() {
            self.last_entry_time = timestamp;
            self.last_entry_price = price;
        }

        match order.side {
            Side::Long => {
                self.cash -= cost;
                self.position += order.quantity;
            }
            Side::Short => {
                self.cash += cost;
                self.position -= order.quantity;
            }
        }

        // Invested → flat closes a round trip. Reversal in one fill cannot
        // happen under the engine's call discipline, so the fill quantity is
        // the whole trade's quantity.
        if self.position.abs() < 1e-9 {
            if let Some(side) = self.position_side {
                let pnl = match side {
                    Side::Long => (price - self.last_entry_price) * order.quantity,
                    Side::Short => (self.last_entry_price - price) * order.quantity,
                };
                self.trades.push(Trade {
                    entry_time: self.last_entry_time,
                    exit_time: timestamp,
                    entry_price: self.last_entry_price,
                    exit_price: price,
                    quantity: order.quantity,
                    side,
                    pnl,
                    exit_reason: self.pending_exit_reason.take().unwrap_or(ExitReason::Signal),
                });
            }
        }

        self.position_side = Side::from_quantity(self.position);
    }

    /// Mark-to-market equity at the given price.
    pub fn equity(&self, price: f64) -> f64 {
        self.cash + self.position * price
    }

    pub fn cash(&self) -> f64 {
        self.cash
    }

    /// Signed position quantity.
    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn position_side(&self) -> Option<Side> {
        self.position_side
    }

    pub fn is_invested(&self) -> bool {
        self.position_side.is_some()
    }

    pub fn has_pending_order(&self) -> bool {
        self.pending.is_some()
    }

    pub fn trades(&self) -> &[Trade] {
        &self.trades
    }
}
