//! Point-target steering primitives and the two fixed-target behaviors.
//!
//! The free functions return one component of a [`SteeringOutput`] each so
//! path followers can mix them: linear from [`seek`] or [`arrive`], angular
//! from [`face_motion`].

use dpm_core::{Vec2, wrap_angle};

use crate::{Kinematic, SteeringConfig, SteeringOutput, SteeringResult};

/// Below this speed the agent counts as stationary when picking a facing.
const AT_REST: f32 = 1e-3;

/// Full acceleration straight at `target`.  Zero when already on it.
pub fn seek(agent: &Kinematic, target: Vec2, config: &SteeringConfig) -> Vec2 {
    (target - agent.position).normalize_or_zero() * config.max_acceleration
}

/// Accelerate toward the velocity that reaches `target` and stops there.
///
/// Desired speed is `max_speed` outside `slow_radius`, scales linearly with
/// distance inside it, and is zero inside `arrive_radius`; the returned
/// acceleration closes the gap to the desired velocity over
/// `time_to_target`, capped at `max_acceleration`.
pub fn arrive(agent: &Kinematic, target: Vec2, config: &SteeringConfig) -> Vec2 {
    let offset = target - agent.position;
    let distance = offset.length();
    let desired = if distance <= config.arrive_radius {
        Vec2::ZERO
    } else {
        let speed = if distance > config.slow_radius {
            config.max_speed
        } else {
            config.max_speed * distance / config.slow_radius
        };
        offset.normalize_or_zero() * speed
    };
    ((desired - agent.velocity) * (1.0 / config.time_to_target)).clamp_length(config.max_acceleration)
}

/// Angular acceleration that turns the agent to face `orientation`.
pub fn align(agent: &Kinematic, orientation: f32, config: &SteeringConfig) -> f32 {
    let error = wrap_angle(orientation - agent.orientation);
    let size = error.abs();
    let desired = if size <= config.align_radius {
        0.0
    } else if size > config.align_slow_radius {
        config.max_rotation * error.signum()
    } else {
        config.max_rotation * error / config.align_slow_radius
    };
    let limit = config.max_angular_acceleration;
    ((desired - agent.rotation) / config.time_to_target).clamp(-limit, limit)
}

/// Align with the direction of travel, or with the bearing to `target`
/// while at rest.  With neither available the agent just stops turning.
pub fn face_motion(agent: &Kinematic, target: Vec2, config: &SteeringConfig) -> f32 {
    let heading = if agent.velocity.length_squared() > AT_REST * AT_REST {
        agent.velocity.angle()
    } else if target.distance_squared(agent.position) > AT_REST * AT_REST {
        (target - agent.position).angle()
    } else {
        agent.orientation
    };
    align(agent, heading, config)
}

// ── Fixed-target behaviors ────────────────────────────────────────────────────

/// Head for a fixed point at full acceleration, overshooting freely.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Seek {
    pub target: Vec2,
    pub config: SteeringConfig,
}

impl Seek {
    pub fn new(target: Vec2, config: SteeringConfig) -> SteeringResult<Self> {
        config.validate()?;
        Ok(Self { target, config })
    }

    pub fn get_steering(&self, agent: &Kinematic) -> SteeringOutput {
        SteeringOutput::new(
            seek(agent, self.target, &self.config),
            face_motion(agent, self.target, &self.config),
        )
    }
}

/// Travel to a fixed point and come to rest on it.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Arrive {
    pub target: Vec2,
    pub config: SteeringConfig,
}

impl Arrive {
    pub fn new(target: Vec2, config: SteeringConfig) -> SteeringResult<Self> {
        config.validate()?;
        Ok(Self { target, config })
    }

    pub fn get_steering(&self, agent: &Kinematic) -> SteeringOutput {
        SteeringOutput::new(
            arrive(agent, self.target, &self.config),
            face_motion(agent, self.target, &self.config),
        )
    }
}
