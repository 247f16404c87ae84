//! `dpm-steering` — kinematic state and the steering behaviors that drive it.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                        |
//! |---------------|-----------------------------------------------------------------|
//! | [`kinematic`] | `Kinematic`, `SteeringOutput`, `MotionLimits`                   |
//! | [`config`]    | `SteeringConfig` — acceleration caps, radii, look-ahead         |
//! | [`seek`]      | `seek`/`arrive`/`align` primitives, `Seek`, `Arrive`            |
//! | [`follow`]    | `FollowPath` — look-ahead target on a polyline                  |
//! | [`path_to`]   | `PathTo` — `FollowPath` that plans its own route on a graph     |
//! | [`behavior`]  | `SteeringBehavior` — closed set of the variants above           |
//! | [`error`]     | `SteeringError`, `SteeringResult<T>`                            |
//!
//! # Motion model
//!
//! Behaviors never move the agent.  Each query reads a [`Kinematic`] and
//! returns a [`SteeringOutput`] (linear and angular acceleration); the caller
//! integrates it with [`Kinematic::integrate`] and then applies
//! [`MotionLimits::clamp`].  Keeping the two steps separate lets one
//! behavior table drive agents with different speed caps.

pub mod behavior;
pub mod config;
pub mod error;
pub mod follow;
pub mod kinematic;
pub mod path_to;
pub mod seek;

#[cfg(test)]
mod tests;

pub use behavior::SteeringBehavior;
pub use config::SteeringConfig;
pub use error::{SteeringError, SteeringResult};
pub use follow::FollowPath;
pub use kinematic::{Kinematic, MotionLimits, SteeringOutput};
pub use path_to::PathTo;
pub use seek::{Arrive, Seek};
