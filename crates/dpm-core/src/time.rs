//! Simulation time model.
//!
//! # Design
//!
//! The outer frame loop is owned by the caller and reports a real elapsed
//! `dt` (seconds) every frame.  `SimClock` counts frames as `Tick`s and
//! accumulates the elapsed seconds so observers can report both.
//!
//! `dt` values are sanitised on entry: negative or NaN values count as zero.

use std::fmt;

use crate::{CoreError, CoreResult};

// ── Tick ─────────────────────────────────────────────────────────────────────

/// A monotonically increasing frame counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }

    /// Ticks elapsed from `earlier` to `self` (saturating at zero).
    #[inline]
    pub fn since(self, earlier: Tick) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

/// Clamp a frame delta to a usable value: negative and NaN become `0.0`.
#[inline]
pub fn sanitize_dt(dt: f32) -> f32 {
    if dt.is_finite() { dt.max(0.0) } else { 0.0 }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Frame counter plus accumulated simulated seconds.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// The current tick, advanced by [`SimClock::advance`] each frame.
    pub current_tick: Tick,
    /// Total seconds accumulated over all advanced frames.
    pub elapsed_secs: f64,
}

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by one frame of `dt` seconds.
    #[inline]
    pub fn advance(&mut self, dt: f32) {
        self.current_tick = self.current_tick.offset(1);
        self.elapsed_secs += sanitize_dt(dt) as f64;
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.3} s)", self.current_tick, self.elapsed_secs)
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level run configuration.
///
/// Typically built in code by the application crate or loaded from a config
/// file with the `serde` feature, and passed to the simulation builder.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Fixed frame delta used by batch runs (`run_ticks`), in seconds.
    pub tick_secs: f32,

    /// Total ticks to simulate in a batch run.
    pub total_ticks: u64,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick_secs:   1.0 / 60.0,
            total_ticks: 3_600,
            seed:        0,
        }
    }
}

impl SimConfig {
    /// The tick at which a batch run ends (exclusive upper bound).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.total_ticks)
    }

    /// Reject frame deltas that would stall or explode the integrator.
    pub fn validate(&self) -> CoreResult<()> {
        if !(self.tick_secs.is_finite() && self.tick_secs > 0.0) {
            return Err(CoreError::Config(format!(
                "tick_secs must be positive and finite, got {}",
                self.tick_secs
            )));
        }
        Ok(())
    }
}
