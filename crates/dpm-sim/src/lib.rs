//! `dpm-sim` — single-agent frame loop for the `dpm` framework.
//!
//! # One tick
//!
//! ```text
//! Sim::tick(snapshot, dt):
//!   ① Decide    — DecisionTree::evaluate(snapshot) → behavior name
//!   ② Steer     — SteeringBehavior::get_steering(kinematic)
//!                 (a PathTo may replan here; at most once)
//!   ③ Integrate — Kinematic::integrate(output, dt)
//!   ④ Clamp     — MotionLimits::clamp(kinematic)
//!   ⑤ Advance   — SimClock::advance(dt)
//! ```
//!
//! The caller owns the outer frame loop and the environment the parameter
//! snapshot is computed from; `Sim` owns everything the tick mutates.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use dpm_sim::{NoopObserver, SimBuilder};
//!
//! let mut sim = SimBuilder::new(config, tree, Kinematic::at(start))
//!     .behavior("goToFridge", PathTo::new(graph.clone(), fridge, steering.clone())?)
//!     .behavior("goToSafezone", PathTo::new(graph.clone(), safezone, steering)?)
//!     .build()?;
//! sim.tick(&snapshot, dt, &mut NoopObserver)?;
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod sim;


pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use sim::{Sim, TickReport};
