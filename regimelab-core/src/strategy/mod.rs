//! Signal-generating strategies.
//!
//! Each strategy consumes one bar per call, updates its own indicators, and
//! holds a persistent [`Signal`] across bars: when no entry or exit guard
//! fires, the previous signal is retained. The set is closed — the engine
//! routes between them by regime.

pub mod mean_reversion;
pub mod momentum;
pub mod regime;

pub use mean_reversion::MeanReversionStrategy;
pub use momentum::MomentumStrategy;
pub use regime::RegimeStrategy;

use crate::domain::{Bar, Signal};

/// One strategy state machine: bar in, persistent signal out.
pub trait Strategy {
    /// Consume the latest bar, updating indicators and (possibly) the signal.
    fn on_bar(&mut self, bar: &Bar);

    /// The current persistent signal.
    fn signal(&self) -> Signal;

    fn name(&self) -> &'static str;
}
