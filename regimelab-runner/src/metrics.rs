//! Performance metrics — pure functions over a finished run.
//!
//! Equity curve and/or trade list in, scalar out. No dependency on the
//! engine beyond its output types.

use regimelab_core::domain::Trade;
use serde::{Deserialize, Serialize};

/// Aggregate figures for a single backtest run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Summary {
    pub final_equity: f64,
    /// (final - initial) / initial.
    pub total_return: f64,
    /// Most negative peak-to-trough fraction (e.g. -0.15 = 15% drawdown).
    pub max_drawdown: f64,
    pub total_trades: usize,
    pub winning_trades: usize,
    pub win_rate: f64,
    pub profit_factor: f64,
    pub gross_profit: f64,
    pub gross_loss: f64,
}

impl Summary {
    pub fn compute(equity_curve: &[f64], trades: &[Trade]) -> Self {
        let final_equity = equity_curve.last().copied().unwrap_or(0.0);
        Self {
            final_equity,
            total_return: total_return(equity_curve),
            max_drawdown: max_drawdown(equity_curve),
            total_trades: trades.len(),
            winning_trades: trades.iter().filter(|t| t.is_winner()).count(),
            win_rate: win_rate(trades),
            profit_factor: profit_factor(trades),
            gross_profit: gross_profit(trades),
            gross_loss: gross_loss(trades),
        }
    }
}

/// Total return as a fraction of the initial equity point.
pub fn total_return(equity_curve: &[f64]) -> f64 {
    if equity_curve.len() < 2 {
        return 0.0;
    }
    let initial = equity_curve[0];
    if initial <= 0.0 {
        return 0.0;
    }
    (equity_curve[equity_curve.len() - 1] - initial) / initial
}

/// Maximum drawdown as a negative fraction; 0.0 for non-decreasing equity.
pub fn max_drawdown(equity_curve: &[f64]) -> f64 {
    let mut peak = f64::MIN;
    let mut max_dd = 0.0_f64;
    for &eq in equity_curve {
        if eq > peak {
            peak = eq;
        }
        if peak > 0.0 {
            let dd = (eq - peak) / peak;
            if dd < max_dd {
                max_dd = dd;
            }
        }
    }
    max_dd
}

/// Fraction of trades with positive pnl.
pub fn win_rate(trades: &[Trade]) -> f64 {
    if trades.is_empty() {
        return 0.0;
    }
    trades.iter().filter(|t| t.is_winner()).count() as f64 / trades.len() as f64
}

pub fn gross_profit(trades: &[Trade]) -> f64 {
    trades.iter().filter(|t| t.pnl > 0.0).map(|t| t.pnl).sum()
}

pub fn gross_loss(trades: &[Trade]) -> f64 {
    trades.iter().filter(|t| t.pnl < 0.0).map(|t| t.pnl.abs()).sum()
}

/// Gross profits over gross losses, capped at 100 when losses are ~zero.
pub fn profit_factor(trades: &[Trade]) -> f64 {
    let profit = gross_profit(trades);
    let loss = gross_loss(trades);
    if loss < 1e-10 {
        return if profit > 0.0 { 100.0 } else { 0.0 };
    }
    (profit / loss).min(100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use regimelab_core::domain::{ExitReason, Side};

    fn trade(pnl: f64) -> Trade {
        Trade {
            entry_time: 60,
            exit_time: 120,
            entry_price: 100.0,
            exit_price: 100.0 + pnl,
            quantity: 1.0,
            side: Side::Long,
            pnl,
            exit_reason: ExitReason::Signal,
        }
    }

    #[test]
    fn total_return_basic() {
        assert_eq!(total_return(&[100.0, 110.0]), 0.1);
        assert_eq!(total_return(&[100.0]), 0.0);
        assert_eq!(total_return(&[]), 0.0);
    }

    #[test]
    fn max_drawdown_finds_worst_trough() {
        let curve = [100.0, 120.0, 90.0, 110.0, 80.0];
        // Worst: 120 → 80 = -1/3
        assert!((max_drawdown(&curve) - (-1.0 / 3.0)).abs() < 1e-12);
    }

    #[test]
    fn max_drawdown_zero_for_monotone_equity() {
        assert_eq!(max_drawdown(&[100.0, 110.0, 120.0]), 0.0);
    }

    #[test]
    fn win_rate_and_profit_factor() {
        let trades = [trade(50.0), trade(-25.0), trade(30.0), trade(-15.0)];
        assert_eq!(win_rate(&trades), 0.5);
        assert!((profit_factor(&trades) - 2.0).abs() < 1e-12);
        assert_eq!(gross_profit(&trades), 80.0);
        assert_eq!(gross_loss(&trades), 40.0);
    }

    #[test]
    fn profit_factor_caps_with_no_losses() {
        assert_eq!(profit_factor(&[trade(10.0)]), 100.0);
        assert_eq!(profit_factor(&[]), 0.0);
    }

    #[test]
    fn summary_aggregates() {
        let curve = [100.0, 105.0, 102.0, 110.0];
        let trades = [trade(5.0), trade(-3.0)];
        let s = Summary::compute(&curve, &trades);
        assert_eq!(s.final_equity, 110.0);
        assert!((s.total_return - 0.1).abs() < 1e-12);
        assert_eq!(s.total_trades, 2);
        assert_eq!(s.winning_trades, 1);
    }
}
