//! Look-ahead path following along a polyline.

use dpm_core::Vec2;
use dpm_graph::Path;

use crate::seek::{arrive, face_motion, seek};
use crate::{Kinematic, SteeringConfig, SteeringOutput, SteeringResult};

/// Steers along a polyline by seeking a point `look_ahead` units past the
/// agent's projection onto it.
///
/// Once that point reaches the end of the polyline it is clamped to the
/// final point, and within `slow_radius` of it the follower switches from
/// seek to arrive so the agent settles on the goal instead of orbiting it.
/// An empty path produces [`SteeringOutput::ZERO`].
#[derive(Clone, Debug, PartialEq)]
pub struct FollowPath {
    config: SteeringConfig,
    points: Vec<Vec2>,
    /// `arc[i]` = path length from `points[0]` to `points[i]`.
    arc: Vec<f32>,
}

impl FollowPath {
    /// A follower with no path; it produces zero output until given one.
    ///
    /// Fails when `config` is invalid.
    pub fn new(config: SteeringConfig) -> SteeringResult<Self> {
        config.validate()?;
        Ok(Self { config, points: Vec::new(), arc: Vec::new() })
    }

    pub fn from_path(path: &Path, config: SteeringConfig) -> SteeringResult<Self> {
        let mut follow = Self::new(config)?;
        follow.set_path(path);
        Ok(follow)
    }

    pub fn from_points(points: Vec<Vec2>, config: SteeringConfig) -> SteeringResult<Self> {
        let mut follow = Self::new(config)?;
        follow.set_points(points);
        Ok(follow)
    }

    pub fn set_path(&mut self, path: &Path) {
        self.set_points(path.points.clone());
    }

    pub fn set_points(&mut self, points: Vec<Vec2>) {
        self.arc.clear();
        let mut total = 0.0;
        for (i, p) in points.iter().enumerate() {
            if i > 0 {
                total += points[i - 1].distance(*p);
            }
            self.arc.push(total);
        }
        self.points = points;
    }

    pub fn clear(&mut self) {
        self.points.clear();
        self.arc.clear();
    }

    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Total polyline length.
    pub fn length(&self) -> f32 {
        self.arc.last().copied().unwrap_or(0.0)
    }

    pub fn config(&self) -> &SteeringConfig {
        &self.config
    }

    /// Arc-length parameter of the polyline point nearest `position`.
    /// Equidistant candidates resolve to the earliest one along the path.
    pub fn project(&self, position: Vec2) -> f32 {
        let mut best_d2 = f32::INFINITY;
        let mut best = 0.0;
        for (i, seg) in self.points.windows(2).enumerate() {
            let (a, b) = (seg[0], seg[1]);
            let ab = b - a;
            let len_sq = ab.length_squared();
            let t = if len_sq > 0.0 {
                ((position - a).dot(ab) / len_sq).clamp(0.0, 1.0)
            } else {
                0.0
            };
            let d2 = position.distance_squared(a + ab * t);
            if d2 < best_d2 {
                best_d2 = d2;
                best = self.arc[i] + (self.arc[i + 1] - self.arc[i]) * t;
            }
        }
        best
    }

    /// The polyline point at arc length `s`, clamped to its ends.
    pub fn point_at(&self, s: f32) -> Option<Vec2> {
        let last = *self.points.last()?;
        if s >= self.length() {
            return Some(last);
        }
        if s <= 0.0 {
            return self.points.first().copied();
        }
        // First vertex strictly past `s`; the segment ends there.
        let end = self.arc.partition_point(|&a| a <= s);
        let (a0, a1) = (self.arc[end - 1], self.arc[end]);
        let t = if a1 > a0 { (s - a0) / (a1 - a0) } else { 0.0 };
        Some(self.points[end - 1].lerp(self.points[end], t))
    }

    /// Steering target for an agent at `position`, and whether it is the
    /// final path point.
    pub fn target(&self, position: Vec2) -> Option<(Vec2, bool)> {
        let s = self.project(position) + self.config.look_ahead;
        let is_final = s >= self.length();
        self.point_at(s).map(|p| (p, is_final))
    }

    pub fn get_steering(&self, agent: &Kinematic) -> SteeringOutput {
        let Some((target, is_final)) = self.target(agent.position) else {
            return SteeringOutput::ZERO;
        };
        let linear = if is_final && agent.position.distance(target) <= self.config.slow_radius {
            arrive(agent, target, &self.config)
        } else {
            seek(agent, target, &self.config)
        };
        SteeringOutput::new(linear, face_motion(agent, target, &self.config))
    }
}
