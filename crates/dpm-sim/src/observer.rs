//! Simulation observer trait for progress reporting and data collection.

use dpm_core::Tick;

use crate::TickReport;

/// Callbacks invoked by [`Sim::tick`][crate::Sim::tick] and the batch
/// runners.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example — decision logger
///
/// ```rust,ignore
/// struct DecisionLog(Vec<(Tick, String)>);
///
/// impl SimObserver for DecisionLog {
///     fn on_decision(&mut self, tick: Tick, _previous: Option<&str>, next: &str) {
///         self.0.push((tick, next.to_owned()));
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called once the tree has been evaluated successfully, before the
    /// decision hook and steering.  A tick that fails to evaluate skips it.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called when the tree selects a different behavior than last tick
    /// (including the very first selection, with `previous = None`).
    fn on_decision(&mut self, _tick: Tick, _previous: Option<&str>, _next: &str) {}

    /// Called after integration and clamping.
    fn on_tick_end(&mut self, _report: &TickReport) {}

    /// Called once after [`Sim::run`][crate::Sim::run] completes.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
