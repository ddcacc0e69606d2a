//! Text rendering of a run summary.

use crate::metrics::Summary;
use std::fmt::Write;

/// Render the classic fixed-width performance report.
pub fn render(summary: &Summary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "==========================================");
    let _ = writeln!(out, "          PERFORMANCE REPORT              ");
    let _ = writeln!(out, "==========================================");
    let _ = writeln!(out, "Final Equity:   {:.2}", summary.final_equity);
    let _ = writeln!(out, "Total Return:   {:.2}%", summary.total_return * 100.0);
    let _ = writeln!(out, "Max Drawdown:   {:.2}%", summary.max_drawdown * 100.0);
    let _ = writeln!(out, "------------------------------------------");
    let _ = writeln!(out, "Total Trades:   {}", summary.total_trades);
    let _ = writeln!(out, "Win Rate:       {:.2}%", summary.win_rate * 100.0);
    let _ = writeln!(out, "Profit Factor:  {:.2}", summary.profit_factor);
    let _ = writeln!(out, "Gross Profit:   {:.2}", summary.gross_profit);
    let _ = writeln!(out, "Gross Loss:     {:.2}", -summary.gross_loss);
    let _ = writeln!(out, "==========================================");
    out
}
