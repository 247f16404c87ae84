//! Steering parameters shared by every behavior variant.

use crate::{SteeringError, SteeringResult};

/// Acceleration caps, arrival radii and the path look-ahead distance.
///
/// Distances are in world units (the living-room demo uses pixels, with
/// 20-unit tiles); times in seconds; angles in radians.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SteeringConfig {
    /// Magnitude of every linear acceleration a behavior emits.
    pub max_acceleration: f32,

    /// Desired travel speed used by arrival.  Hard speed caps are
    /// [`MotionLimits`][crate::MotionLimits], applied after integration.
    pub max_speed: f32,

    pub max_angular_acceleration: f32,

    /// Desired turning speed used by alignment.
    pub max_rotation: f32,

    /// How far ahead of the agent's projection onto a path the steering
    /// target is placed.
    pub look_ahead: f32,

    /// Inside this distance of the final target the agent brakes to a stop.
    pub arrive_radius: f32,

    /// Inside this distance of the final target desired speed falls off
    /// linearly with distance.
    pub slow_radius: f32,

    /// Time over which arrival and alignment try to reach their desired
    /// velocity.
    pub time_to_target: f32,

    /// Facing error below which alignment stops turning.
    pub align_radius: f32,

    /// Facing error below which desired turning speed falls off.
    pub align_slow_radius: f32,
}

impl Default for SteeringConfig {
    fn default() -> Self {
        Self {
            max_acceleration:         400.0,
            max_speed:                100.0,
            max_angular_acceleration: 40.0,
            max_rotation:             std::f32::consts::TAU,
            look_ahead:               20.0,
            arrive_radius:            3.0,
            slow_radius:              40.0,
            time_to_target:           0.1,
            align_radius:             0.02,
            align_slow_radius:        0.6,
        }
    }
}

impl SteeringConfig {
    pub fn validate(&self) -> SteeringResult<()> {
        let positive = [
            ("max_acceleration", self.max_acceleration),
            ("max_speed", self.max_speed),
            ("max_angular_acceleration", self.max_angular_acceleration),
            ("max_rotation", self.max_rotation),
            ("look_ahead", self.look_ahead),
            ("slow_radius", self.slow_radius),
            ("time_to_target", self.time_to_target),
            ("align_slow_radius", self.align_slow_radius),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(SteeringError::Config(format!(
                    "{name} must be positive and finite, got {value}"
                )));
            }
        }
        if !(self.arrive_radius >= 0.0 && self.arrive_radius < self.slow_radius) {
            return Err(SteeringError::Config(format!(
                "arrive_radius must lie in [0, slow_radius), got {} (slow_radius {})",
                self.arrive_radius, self.slow_radius
            )));
        }
        if !(self.align_radius >= 0.0 && self.align_radius < self.align_slow_radius) {
            return Err(SteeringError::Config(format!(
                "align_radius must lie in [0, align_slow_radius), got {} (align_slow_radius {})",
                self.align_radius, self.align_slow_radius
            )));
        }
        Ok(())
    }
}
