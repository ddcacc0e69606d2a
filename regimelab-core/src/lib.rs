//! regimelab core — event-driven, regime-routed backtesting engine.
//!
//! Replays a time-ordered sequence of price bars for one instrument through:
//! - streaming technical indicators built on a rolling-window primitive
//! - three strategy state machines (regime classifier, momentum, mean
//!   reversion) with persistent signals
//! - a risk manager (ATR-style stops, trailing ratchet, daily throttle,
//!   post-loss cooldown)
//! - a next-bar-open fill engine with cash/position bookkeeping
//!
//! The [`engine::Engine`] binds them in a fixed per-bar sequence that keeps
//! decisions at bar t acting on bar t+1's open — no lookahead. Everything is
//! single-threaded and bounded by the configured window sizes, however many
//! bars are replayed.

pub mod config;
pub mod domain;
pub mod engine;
pub mod execution;
pub mod indicators;
pub mod risk;
pub mod strategy;
pub mod window;

pub use config::EngineConfig;
pub use domain::{Bar, ExitReason, Regime, Side, Signal, Trade};
pub use engine::{Engine, RunResult};
