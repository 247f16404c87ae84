//! Seeded randomness for the environment side of a run.
//!
//! Deciding, planning and moving are deterministic on their own; only the
//! environment (which appliance pings, and when) draws random numbers.  A
//! `SimRng` seeded from [`SimConfig::seed`](crate::SimConfig) makes a whole
//! run repeatable.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// `true` with probability `p`.  Out-of-range `p` is clamped to [0, 1]
    /// and NaN counts as 0, rather than panicking.
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(probability(p))
    }

    /// `true` with probability `1 - (1 - p_per_sec)^secs`: the chance that
    /// an event with per-second probability `p_per_sec` fires at least once
    /// in a frame of `secs` seconds.  NaN inputs count as 0.
    pub fn gen_event(&mut self, p_per_sec: f64, secs: f64) -> bool {
        let secs = if secs.is_nan() { 0.0 } else { secs.max(0.0) };
        self.gen_bool(1.0 - (1.0 - probability(p_per_sec)).powf(secs))
    }
}

fn probability(p: f64) -> f64 {
    if p.is_nan() { 0.0 } else { p.clamp(0.0, 1.0) }
}
