//! Fluent builder for constructing a [`Sim`].

use dpm_core::{SimClock, SimConfig};
use dpm_decision::DecisionTree;
use dpm_steering::{Kinematic, MotionLimits, SteeringBehavior};
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::{Sim, SimError, SimResult};

/// Fluent builder for [`Sim`].
///
/// # Required inputs
///
/// - [`SimConfig`] — fixed tick length for batch runs, tick count, seed
/// - `DecisionTree<String>` — leaves name the behavior to run
/// - [`Kinematic`] — the agent's starting state
/// - one [`SteeringBehavior`] per distinct leaf name, via [`behavior`](Self::behavior)
///
/// # Optional inputs (have defaults)
///
/// | Method        | Default                   |
/// |---------------|---------------------------|
/// | `.limits(l)`  | `MotionLimits::default()` |
///
/// No behavior is ever assumed: a leaf whose name was not registered makes
/// [`build`](Self::build) fail with [`SimError::MissingBehavior`].
pub struct SimBuilder {
    config:    SimConfig,
    tree:      DecisionTree<String>,
    kinematic: Kinematic,
    behaviors: FxHashMap<String, SteeringBehavior>,
    limits:    MotionLimits,
}

impl SimBuilder {
    pub fn new(config: SimConfig, tree: DecisionTree<String>, kinematic: Kinematic) -> Self {
        Self {
            config,
            tree,
            kinematic,
            behaviors: FxHashMap::default(),
            limits:    MotionLimits::default(),
        }
    }

    /// Register `behavior` under `name`, replacing any earlier registration.
    pub fn behavior(mut self, name: impl Into<String>, behavior: impl Into<SteeringBehavior>) -> Self {
        self.behaviors.insert(name.into(), behavior.into());
        self
    }

    pub fn limits(mut self, limits: MotionLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Validate inputs and return a ready-to-tick [`Sim`].
    pub fn build(self) -> SimResult<Sim> {
        self.config.validate()?;
        self.limits.validate()?;
        self.tree.validate()?;

        for name in self.tree.actions() {
            if !self.behaviors.contains_key(name) {
                return Err(SimError::MissingBehavior(name.clone()));
            }
        }
        for (name, behavior) in &self.behaviors {
            behavior.validate().inspect_err(|e| {
                debug!(behavior = %name, kind = behavior.kind(), error = %e, "invalid steering config");
            })?;
        }
        let unused = self
            .behaviors
            .keys()
            .filter(|name| !self.tree.actions().any(|a| a == *name))
            .count();
        if unused > 0 {
            debug!(unused, "behaviors registered but never selected by the tree");
        }

        Ok(Sim {
            clock:     SimClock::new(),
            config:    self.config,
            kinematic: self.kinematic,
            limits:    self.limits,
            tree:      self.tree,
            behaviors: self.behaviors,
            current:   None,
        })
    }
}
