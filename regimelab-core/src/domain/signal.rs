//! Signal and side — explicit direction states.
//!
//! Strategies hold a `Signal` across bars and change it only on named
//! guarded transitions; a bar that triggers nothing leaves the previous
//! signal in place. Keeping the hold state explicit prevents the carry-over
//! bugs that plague raw `-1/0/1` integers.

use serde::{Deserialize, Serialize};

/// Directional signal emitted by a strategy: short, flat, or long.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Signal {
    Short,
    Flat,
    Long,
}

impl Signal {
    /// Sign multiplier: -1.0, 0.0, or 1.0.
    pub fn sign(self) -> f64 {
        match self {
            Signal::Short => -1.0,
            Signal::Flat => 0.0,
            Signal::Long => 1.0,
        }
    }

    pub fn is_flat(self) -> bool {
        self == Signal::Flat
    }

    /// The side this signal asks for, if any.
    pub fn side(self) -> Option<Side> {
        match self {
            Signal::Long => Some(Side::Long),
            Signal::Short => Some(Side::Short),
            Signal::Flat => None,
        }
    }
}

/// Side of an order, position, or trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Long,
    Short,
}

impl Side {
    /// Sign multiplier: +1.0 for long, -1.0 for short.
    pub fn sign(self) -> f64 {
        match self {
            Side::Long => 1.0,
            Side::Short => -1.0,
        }
    }

    pub fn opposite(self) -> Side {
        match self {
            Side::Long => Side::Short,
            Side::Short => Side::Long,
        }
    }

    /// Derive a side from a signed quantity; `None` when flat (within 1e-9).
    pub fn from_quantity(quantity: f64) -> Option<Side> {
        if quantity > 1e-9 {
            Some(Side::Long)
        } else if quantity < -1e-9 {
            Some(Side::Short)
        } else {
            None
        }
    }
}
