//! Order — a transient instruction to trade at the next bar's open.

use super::signal::Side;
use serde::{Deserialize, Serialize};

/// A market order awaiting fill.
///
/// At most one order is outstanding at a time; submitting another before the
/// fill replaces it. Orders are created by the engine at the close of bar t
/// and consumed at the open of bar t+1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub side: Side,
    pub quantity: f64,
}

impl Order {
    pub fn new(side: Side, quantity: f64) -> Self {
        Self { side, quantity }
    }

    /// Signed quantity: positive buys, negative sells.
    pub fn signed_quantity(&self) -> f64 {
        self.side.sign() * self.quantity
    }
}
