//! The `Sim` struct and its tick loop.

use dpm_core::{SimClock, SimConfig, Tick};
use dpm_decision::{DecisionTree, ParameterSnapshot};
use dpm_steering::{Kinematic, MotionLimits, SteeringBehavior, SteeringOutput};
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::{SimError, SimObserver, SimResult};

/// What one tick did, handed to [`SimObserver::on_tick_end`] and returned by
/// [`Sim::tick`].
#[derive(Clone, Debug, PartialEq)]
pub struct TickReport {
    pub tick: Tick,
    /// Name of the behavior that steered this tick.
    pub behavior: String,
    /// `true` when `behavior` differs from the previous tick's.
    pub changed: bool,
    pub steering: SteeringOutput,
    /// State after integration and clamping.
    pub kinematic: Kinematic,
}

/// The single-agent simulation runner.
///
/// Holds the decision tree, the behavior table keyed by leaf name, and the
/// agent's kinematic state.  Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim {
    /// Fixed tick length and tick count used by [`run`](Self::run).
    pub config: SimConfig,

    /// Current tick and accumulated simulated seconds.
    pub clock: SimClock,

    /// The agent.  Mutated once per tick by integration and clamping.
    pub kinematic: Kinematic,

    pub limits: MotionLimits,

    pub(crate) tree:      DecisionTree<String>,
    pub(crate) behaviors: FxHashMap<String, SteeringBehavior>,
    /// Behavior selected on the previous tick.
    pub(crate) current:   Option<String>,
}

impl Sim {
    // ── Public API ────────────────────────────────────────────────────────

    /// Advance one frame of `dt` seconds.
    ///
    /// Evaluates the tree once, queries the selected behavior once,
    /// integrates, clamps to [`MotionLimits`] and advances the clock.  A
    /// snapshot missing a parameter the tree tests is an error; the agent
    /// and clock are left untouched in that case and no observer hook
    /// fires.
    pub fn tick<O: SimObserver>(
        &mut self,
        snapshot: &ParameterSnapshot,
        dt:       f32,
        observer: &mut O,
    ) -> SimResult<TickReport> {
        let now = self.clock.current_tick;

        // ── ① Decide ──────────────────────────────────────────────────────
        let name = self.tree.evaluate(snapshot)?;
        observer.on_tick_start(now);
        let changed = self.current.as_deref() != Some(name.as_str());
        if changed {
            debug!(tick = %now, from = ?self.current, to = %name, "behavior changed");
            observer.on_decision(now, self.current.as_deref(), name);
            self.current = Some(name.clone());
        }

        // ── ② Steer ───────────────────────────────────────────────────────
        let behavior = self
            .behaviors
            .get_mut(name)
            .ok_or_else(|| SimError::MissingBehavior(name.clone()))?;
        let steering = behavior.get_steering(&self.kinematic);

        // ── ③ Integrate, ④ clamp, ⑤ advance ──────────────────────────────
        self.kinematic.integrate(&steering, dt);
        self.limits.clamp(&mut self.kinematic);
        self.clock.advance(dt);

        let report = TickReport {
            tick: now,
            behavior: name.clone(),
            changed,
            steering,
            kinematic: self.kinematic,
        };
        observer.on_tick_end(&report);
        Ok(report)
    }

    /// Run exactly `n` ticks of `dt` seconds.
    ///
    /// `snapshot_fn` is called once per tick with the current tick and agent
    /// state, and returns the parameter values for that tick.
    pub fn run_ticks<F, O>(
        &mut self,
        n:               u64,
        dt:              f32,
        mut snapshot_fn: F,
        observer:        &mut O,
    ) -> SimResult<()>
    where
        F: FnMut(Tick, &Kinematic) -> ParameterSnapshot,
        O: SimObserver,
    {
        for _ in 0..n {
            let snapshot = snapshot_fn(self.clock.current_tick, &self.kinematic);
            self.tick(&snapshot, dt, observer)?;
        }
        Ok(())
    }

    /// Run from the current tick to `config.end_tick()` at `config.tick_secs`.
    pub fn run<F, O>(&mut self, snapshot_fn: F, observer: &mut O) -> SimResult<()>
    where
        F: FnMut(Tick, &Kinematic) -> ParameterSnapshot,
        O: SimObserver,
    {
        let remaining = self.config.end_tick().since(self.clock.current_tick);
        self.run_ticks(remaining, self.config.tick_secs, snapshot_fn, observer)?;
        observer.on_sim_end(self.clock.current_tick);
        Ok(())
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    /// Behavior selected on the most recent tick.
    pub fn current_behavior(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn behavior(&self, name: &str) -> Option<&SteeringBehavior> {
        self.behaviors.get(name)
    }

    pub fn tree(&self) -> &DecisionTree<String> {
        &self.tree
    }
}
