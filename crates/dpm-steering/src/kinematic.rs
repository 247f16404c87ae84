//! Per-agent motion state and the acceleration command that updates it.

use dpm_core::time::sanitize_dt;
use dpm_core::{Vec2, wrap_angle};

use crate::{SteeringError, SteeringResult};

// ── SteeringOutput ────────────────────────────────────────────────────────────

/// One steering query's result.  Produced fresh every tick, never stored.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SteeringOutput {
    /// Linear acceleration, world units per second squared.
    pub linear: Vec2,
    /// Angular acceleration, radians per second squared.
    pub angular: f32,
}

impl SteeringOutput {
    pub const ZERO: SteeringOutput = SteeringOutput { linear: Vec2::ZERO, angular: 0.0 };

    #[inline]
    pub fn new(linear: Vec2, angular: f32) -> Self {
        Self { linear, angular }
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.linear == Vec2::ZERO && self.angular == 0.0
    }
}

// ── Kinematic ─────────────────────────────────────────────────────────────────

/// An agent's pose and motion rates.
///
/// Only [`integrate`](Self::integrate) and [`MotionLimits::clamp`] mutate it
/// during a simulation.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Kinematic {
    pub position: Vec2,
    /// Facing, radians counter-clockwise from +x, kept in `(-π, π]`.
    pub orientation: f32,
    pub velocity: Vec2,
    /// Angular velocity, radians per second.
    pub rotation: f32,
}

impl Kinematic {
    /// At rest at `position`, facing +x.
    pub fn at(position: Vec2) -> Self {
        Self { position, ..Self::default() }
    }

    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    /// Advance by `dt` seconds under `steering`.
    ///
    /// Velocities are updated first and the new velocities move the pose
    /// (semi-implicit Euler).  Negative or NaN `dt` counts as zero, and a
    /// zero `dt` leaves the state untouched.
    pub fn integrate(&mut self, steering: &SteeringOutput, dt: f32) {
        let dt = sanitize_dt(dt);
        if dt == 0.0 {
            return;
        }
        self.velocity += steering.linear * dt;
        self.position += self.velocity * dt;
        self.rotation += steering.angular * dt;
        self.orientation = wrap_angle(self.orientation + self.rotation * dt);
    }

    /// By-value form of [`integrate`](Self::integrate).
    pub fn integrated(mut self, steering: &SteeringOutput, dt: f32) -> Self {
        self.integrate(steering, dt);
        self
    }
}

// ── MotionLimits ──────────────────────────────────────────────────────────────

/// Speed caps applied after integration.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MotionLimits {
    pub max_speed: f32,
    pub max_rotation: f32,
}

impl Default for MotionLimits {
    fn default() -> Self {
        Self {
            max_speed:    100.0,
            max_rotation: std::f32::consts::TAU,
        }
    }
}

impl MotionLimits {
    /// Limits that never bind.
    pub fn unbounded() -> Self {
        Self { max_speed: f32::INFINITY, max_rotation: f32::INFINITY }
    }

    pub fn clamp(&self, kinematic: &mut Kinematic) {
        kinematic.velocity = kinematic.velocity.clamp_length(self.max_speed);
        kinematic.rotation = kinematic.rotation.clamp(-self.max_rotation, self.max_rotation);
    }

    pub fn validate(&self) -> SteeringResult<()> {
        if !(self.max_speed > 0.0) {
            return Err(SteeringError::Config(format!(
                "max_speed must be positive, got {}",
                self.max_speed
            )));
        }
        if !(self.max_rotation > 0.0) {
            return Err(SteeringError::Config(format!(
                "max_rotation must be positive, got {}",
                self.max_rotation
            )));
        }
        Ok(())
    }
}
