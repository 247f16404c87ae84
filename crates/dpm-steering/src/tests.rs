//! Unit tests for dpm-steering.

#[cfg(test)]
mod helpers {
    use std::sync::Arc;

    use dpm_core::{NodeId, Vec2};
    use dpm_graph::{TileGraph, TileGraphBuilder, WalkGrid};

    pub fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    pub fn approx_v(a: Vec2, b: Vec2) -> bool {
        approx(a.x, b.x) && approx(a.y, b.y)
    }

    /// Three nodes on the x axis, 10 apart: `0 ── 1 ── 2`.
    pub fn line() -> Arc<TileGraph> {
        let mut b = TileGraphBuilder::new();
        for i in 0..3u32 {
            b.add_node(NodeId(i), Vec2::new(i as f32 * 10.0, 0.0)).unwrap();
        }
        b.add_double_edge(NodeId(0), NodeId(1)).unwrap();
        b.add_double_edge(NodeId(1), NodeId(2)).unwrap();
        Arc::new(b.build())
    }

    /// Two nodes with no edge between them.
    pub fn islands() -> Arc<TileGraph> {
        let mut b = TileGraphBuilder::new();
        b.add_node(NodeId(0), Vec2::new(0.0, 0.0)).unwrap();
        b.add_node(NodeId(1), Vec2::new(100.0, 0.0)).unwrap();
        Arc::new(b.build())
    }

    /// A 5×3 room with a wall in the middle row, 20-unit tiles.
    ///
    /// Tile (0, 2) is centred at (10, 10); tile (4, 0) at (90, 50).
    pub fn room() -> Arc<TileGraph> {
        let grid = WalkGrid::from_ascii(
            "
.....
.###.
.....
",
        )
        .unwrap();
        Arc::new(grid.to_graph(20.0).unwrap())
    }
}

// ── Kinematic ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod kinematic {
    use std::f32::consts::{PI, TAU};

    use dpm_core::Vec2;

    use super::helpers::{approx, approx_v};
    use crate::{Kinematic, MotionLimits, SteeringError, SteeringOutput};

    fn moving() -> Kinematic {
        Kinematic {
            position:    Vec2::new(1.0, 2.0),
            orientation: 0.5,
            velocity:    Vec2::new(3.0, -1.0),
            rotation:    0.0,
        }
    }

    #[test]
    fn zero_acceleration_moves_by_velocity() {
        let k = moving().integrated(&SteeringOutput::ZERO, 0.5);
        assert_eq!(k.position, Vec2::new(2.5, 1.5));
        assert_eq!(k.velocity, Vec2::new(3.0, -1.0));
        assert_eq!(k.orientation, 0.5);
    }

    #[test]
    fn zero_negative_and_nan_dt_are_noops() {
        let push = SteeringOutput::new(Vec2::new(10.0, 10.0), 3.0);
        for dt in [0.0, -1.0, f32::NAN] {
            assert_eq!(moving().integrated(&push, dt), moving(), "dt={dt}");
        }
    }

    #[test]
    fn velocity_updates_before_position() {
        let mut k = Kinematic::at(Vec2::ZERO);
        k.integrate(&SteeringOutput::new(Vec2::new(2.0, 0.0), 0.0), 0.5);
        assert_eq!(k.velocity, Vec2::new(1.0, 0.0));
        assert_eq!(k.position, Vec2::new(0.5, 0.0));
    }

    #[test]
    fn orientation_stays_wrapped() {
        let mut k = Kinematic { orientation: 3.0, rotation: 1.0, ..Kinematic::default() };
        k.integrate(&SteeringOutput::ZERO, 1.0);
        assert!(approx(k.orientation, 4.0 - TAU));
        assert!(k.orientation > -PI && k.orientation <= PI);
    }

    #[test]
    fn limits_clamp_speed_and_rotation() {
        let mut k = Kinematic {
            velocity: Vec2::new(300.0, 400.0),
            rotation: -10.0,
            ..Kinematic::default()
        };
        MotionLimits::default().clamp(&mut k);
        assert!(approx_v(k.velocity, Vec2::new(60.0, 80.0)));
        assert!(approx(k.rotation, -TAU));

        let mut slow = moving();
        MotionLimits::default().clamp(&mut slow);
        assert_eq!(slow, moving());
        MotionLimits::unbounded().clamp(&mut k);
        assert!(approx(k.speed(), 100.0));
    }

    #[test]
    fn limits_validate() {
        MotionLimits::default().validate().unwrap();
        let bad = MotionLimits { max_speed: 0.0, ..MotionLimits::default() };
        assert!(matches!(bad.validate(), Err(SteeringError::Config(_))));
        let nan = MotionLimits { max_rotation: f32::NAN, ..MotionLimits::default() };
        assert!(matches!(nan.validate(), Err(SteeringError::Config(_))));
    }
}

// ── Configuration ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod config {
    use crate::{SteeringConfig, SteeringError};

    #[test]
    fn default_is_valid() {
        SteeringConfig::default().validate().unwrap();
    }

    #[test]
    fn non_positive_look_ahead_rejected() {
        for look_ahead in [0.0, -5.0, f32::NAN] {
            let cfg = SteeringConfig { look_ahead, ..SteeringConfig::default() };
            assert!(matches!(cfg.validate(), Err(SteeringError::Config(_))), "{look_ahead}");
        }
    }

    #[test]
    fn arrive_radius_must_be_inside_slow_radius() {
        let cfg = SteeringConfig { arrive_radius: 50.0, slow_radius: 40.0, ..SteeringConfig::default() };
        assert!(matches!(cfg.validate(), Err(SteeringError::Config(_))));
        let cfg = SteeringConfig { arrive_radius: 0.0, ..SteeringConfig::default() };
        cfg.validate().unwrap();
    }
}

// ── Seek / Arrive / Align ─────────────────────────────────────────────────────

#[cfg(test)]
mod seek {
    use std::f32::consts::FRAC_PI_2;

    use dpm_core::Vec2;

    use super::helpers::{approx, approx_v};
    use crate::seek::{align, arrive, seek};
    use crate::{Arrive, Kinematic, Seek, SteeringConfig, SteeringError};

    #[test]
    fn seek_is_full_acceleration_toward_target() {
        let cfg = SteeringConfig::default();
        let linear = seek(&Kinematic::at(Vec2::ZERO), Vec2::new(3.0, 4.0), &cfg);
        assert!(approx_v(linear, Vec2::new(240.0, 320.0)));
        assert_eq!(seek(&Kinematic::at(Vec2::new(3.0, 4.0)), Vec2::new(3.0, 4.0), &cfg), Vec2::ZERO);
    }

    #[test]
    fn arrive_from_far_is_capped() {
        let cfg = SteeringConfig::default();
        let linear = arrive(&Kinematic::at(Vec2::ZERO), Vec2::new(1000.0, 0.0), &cfg);
        assert!(approx_v(linear, Vec2::new(cfg.max_acceleration, 0.0)));
    }

    #[test]
    fn arrive_slows_inside_slow_radius() {
        let cfg = SteeringConfig::default();
        // Halfway into the slow radius and already at the desired speed.
        let agent = Kinematic {
            velocity: Vec2::new(cfg.max_speed * 0.5, 0.0),
            ..Kinematic::at(Vec2::ZERO)
        };
        let linear = arrive(&agent, Vec2::new(cfg.slow_radius * 0.5, 0.0), &cfg);
        assert!(linear.length() < 1e-2);
    }

    #[test]
    fn arrive_brakes_inside_arrive_radius() {
        let cfg = SteeringConfig::default();
        let agent = Kinematic { velocity: Vec2::new(5.0, 0.0), ..Kinematic::at(Vec2::ZERO) };
        let linear = arrive(&agent, Vec2::new(1.0, 0.0), &cfg);
        assert!(approx_v(linear, Vec2::new(-50.0, 0.0)));
    }

    #[test]
    fn align_turns_the_short_way() {
        let cfg = SteeringConfig::default();
        let facing_x = Kinematic::default();
        assert!(align(&facing_x, FRAC_PI_2, &cfg) > 0.0);
        assert!(align(&facing_x, -FRAC_PI_2, &cfg) < 0.0);
        // 3.0 → -3.0 is a small counter-clockwise turn across ±π.
        let near_pi = Kinematic { orientation: 3.0, ..Kinematic::default() };
        assert!(align(&near_pi, -3.0, &cfg) > 0.0);
    }

    #[test]
    fn align_damps_rotation_when_facing_target() {
        let cfg = SteeringConfig::default();
        let spinning = Kinematic { rotation: 1.0, ..Kinematic::default() };
        assert!(approx(align(&spinning, 0.0, &cfg), -10.0));
    }

    #[test]
    fn fixed_target_behaviors_face_the_target_from_rest() {
        let cfg = SteeringConfig::default();
        let agent = Kinematic::at(Vec2::ZERO);
        let out = Seek::new(Vec2::new(0.0, 10.0), cfg.clone()).unwrap().get_steering(&agent);
        assert!(out.linear.y > 0.0 && out.angular > 0.0);
        let out = Arrive::new(Vec2::ZERO, cfg).unwrap().get_steering(&agent);
        assert!(out.is_zero());
    }

    #[test]
    fn fixed_target_behaviors_reject_invalid_config() {
        let instant = SteeringConfig { time_to_target: 0.0, ..SteeringConfig::default() };
        let err = Arrive::new(Vec2::new(100.0, 0.0), instant).unwrap_err();
        assert!(matches!(err, SteeringError::Config(_)));
        let stalled = SteeringConfig { max_acceleration: -1.0, ..SteeringConfig::default() };
        assert!(matches!(Seek::new(Vec2::ZERO, stalled), Err(SteeringError::Config(_))));
    }
}

// ── FollowPath ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod follow {
    use dpm_core::{NodeId, Vec2};
    use dpm_graph::Path;

    use super::helpers::{approx, approx_v};
    use crate::{FollowPath, Kinematic, SteeringConfig, SteeringError, SteeringOutput};

    fn elbow(look_ahead: f32) -> FollowPath {
        let cfg = SteeringConfig { look_ahead, ..SteeringConfig::default() };
        FollowPath::from_points(
            vec![Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0), Vec2::new(10.0, 10.0)],
            cfg,
        )
        .unwrap()
    }

    #[test]
    fn empty_path_gives_zero_output() {
        let follow = FollowPath::new(SteeringConfig::default()).unwrap();
        let agent = Kinematic { velocity: Vec2::new(5.0, 5.0), ..Kinematic::at(Vec2::new(3.0, 3.0)) };
        assert_eq!(follow.get_steering(&agent), SteeringOutput::ZERO);
        assert!(follow.target(agent.position).is_none());
    }

    #[test]
    fn non_positive_look_ahead_rejected() {
        let points = vec![Vec2::ZERO, Vec2::new(100.0, 0.0)];
        for look_ahead in [0.0, -30.0] {
            let cfg = SteeringConfig { look_ahead, ..SteeringConfig::default() };
            let err = FollowPath::from_points(points.clone(), cfg.clone()).unwrap_err();
            assert!(matches!(err, SteeringError::Config(_)), "{look_ahead}");
            assert!(FollowPath::new(cfg).is_err());
        }
    }

    #[test]
    fn projection_picks_nearest_segment() {
        let f = elbow(5.0);
        assert!(approx(f.length(), 20.0));
        assert!(approx(f.project(Vec2::new(3.0, 1.0)), 3.0));
        assert!(approx(f.project(Vec2::new(9.0, 2.0)), 12.0));
        assert!(approx(f.project(Vec2::new(-5.0, -5.0)), 0.0));
    }

    #[test]
    fn target_is_look_ahead_past_projection() {
        let f = elbow(5.0);
        let (t, last) = f.target(Vec2::new(3.0, 1.0)).unwrap();
        assert!(approx_v(t, Vec2::new(8.0, 0.0)));
        assert!(!last);
        let (t, _) = f.target(Vec2::new(9.0, 2.0)).unwrap();
        assert!(approx_v(t, Vec2::new(10.0, 7.0)));
    }

    #[test]
    fn look_ahead_clamps_to_final_point() {
        let f = elbow(5.0);
        let (t, last) = f.target(Vec2::new(10.0, 8.0)).unwrap();
        assert_eq!(t, Vec2::new(10.0, 10.0));
        assert!(last);
    }

    #[test]
    fn single_point_path_targets_that_point() {
        let f = FollowPath::from_points(vec![Vec2::new(4.0, 4.0)], SteeringConfig::default()).unwrap();
        assert_eq!(f.target(Vec2::ZERO), Some((Vec2::new(4.0, 4.0), true)));
    }

    #[test]
    fn repeated_points_do_not_break_interpolation() {
        let f = FollowPath::from_points(
            vec![Vec2::ZERO, Vec2::ZERO, Vec2::new(10.0, 0.0)],
            SteeringConfig::default(),
        )
        .unwrap();
        assert_eq!(f.point_at(5.0), Some(Vec2::new(5.0, 0.0)));
        assert_eq!(f.point_at(-1.0), Some(Vec2::ZERO));
    }

    #[test]
    fn seeks_along_the_path() {
        let f = elbow(5.0);
        let out = f.get_steering(&Kinematic::at(Vec2::new(3.0, 1.0)));
        assert!(out.linear.x > 0.0 && out.linear.y < 0.0);
        assert!(approx(out.linear.length(), f.config().max_acceleration));
    }

    #[test]
    fn settled_on_final_point_gives_zero_output() {
        let f = elbow(5.0);
        assert!(f.get_steering(&Kinematic::at(Vec2::new(10.0, 10.0))).is_zero());
    }

    #[test]
    fn set_path_uses_node_positions() {
        let path = Path {
            nodes:  vec![NodeId(0), NodeId(1)],
            points: vec![Vec2::ZERO, Vec2::new(0.0, 30.0)],
            cost:   30.0,
        };
        let mut f = FollowPath::new(SteeringConfig::default()).unwrap();
        f.set_path(&path);
        assert_eq!(f.points(), path.points.as_slice());
        f.clear();
        assert!(f.is_empty());
        assert_eq!(f.length(), 0.0);
    }
}

// ── PathTo ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod path_to {
    use std::sync::Arc;

    use dpm_core::{NodeId, Vec2};
    use dpm_graph::{AStar, GraphError, Manhattan, TileGraph};

    use super::helpers::{islands, line, room};
    use crate::{Kinematic, MotionLimits, PathTo, SteeringConfig, SteeringError, SteeringOutput};

    #[test]
    fn goal_is_nearest_node_to_destination() {
        let p = PathTo::new(line(), Vec2::new(19.0, 1.0), SteeringConfig::default()).unwrap();
        assert_eq!(p.goal(), NodeId(2));
        assert_eq!(p.destination(), Vec2::new(19.0, 1.0));
        assert_eq!(p.route(), None);
    }

    #[test]
    fn empty_graph_rejected() {
        let err = PathTo::new(Arc::new(TileGraph::empty()), Vec2::ZERO, SteeringConfig::default())
            .unwrap_err();
        assert_eq!(err, SteeringError::Graph(GraphError::EmptyGraph));
    }

    #[test]
    fn invalid_config_rejected() {
        let cfg = SteeringConfig { look_ahead: 0.0, ..SteeringConfig::default() };
        assert!(matches!(PathTo::new(line(), Vec2::ZERO, cfg), Err(SteeringError::Config(_))));
    }

    #[test]
    fn replans_only_when_nearest_node_changes() {
        let mut p = PathTo::new(line(), Vec2::new(20.0, 0.0), SteeringConfig::default()).unwrap();

        p.get_steering(&Kinematic::at(Vec2::new(0.0, 0.0)));
        assert_eq!(p.replans(), 1);
        assert_eq!(p.route(), Some((NodeId(0), NodeId(2))));
        assert_eq!(p.waypoints().len(), 3);

        // Still nearest to node 0.
        p.get_steering(&Kinematic::at(Vec2::new(1.0, 0.5)));
        p.get_steering(&Kinematic::at(Vec2::new(4.0, -0.5)));
        assert_eq!(p.replans(), 1);

        p.get_steering(&Kinematic::at(Vec2::new(9.0, 0.0)));
        assert_eq!(p.replans(), 2);
        assert_eq!(p.route(), Some((NodeId(1), NodeId(2))));
        assert_eq!(p.waypoints(), &[Vec2::new(10.0, 0.0), Vec2::new(20.0, 0.0)]);

        p.invalidate();
        p.get_steering(&Kinematic::at(Vec2::new(9.0, 0.0)));
        assert_eq!(p.replans(), 3);
    }

    #[test]
    fn no_path_idles_and_is_not_retried_every_tick() {
        let mut p = PathTo::new(islands(), Vec2::new(100.0, 0.0), SteeringConfig::default()).unwrap();
        let agent = Kinematic::at(Vec2::ZERO);
        assert_eq!(p.get_steering(&agent), SteeringOutput::ZERO);
        assert_eq!(p.get_steering(&agent), SteeringOutput::ZERO);
        assert_eq!(p.replans(), 1);
        assert!(p.waypoints().is_empty());
    }

    #[test]
    fn no_path_leaves_a_moving_agent_coasting() {
        let mut p = PathTo::new(islands(), Vec2::new(100.0, 0.0), SteeringConfig::default()).unwrap();
        let mut agent = Kinematic { velocity: Vec2::new(6.0, 0.0), ..Kinematic::at(Vec2::ZERO) };
        let dt = 0.5;
        for _ in 0..4 {
            let out = p.get_steering(&agent);
            assert_eq!(out, SteeringOutput::ZERO);
            agent.integrate(&out, dt);
        }
        // Zero output never brakes: velocity is kept and the agent drifts.
        assert_eq!(agent.velocity, Vec2::new(6.0, 0.0));
        assert_eq!(agent.position, Vec2::new(12.0, 0.0));
        assert_eq!(p.replans(), 1);
    }

    #[test]
    fn expansion_limit_idles() {
        let mut p = PathTo::new(line(), Vec2::new(20.0, 0.0), SteeringConfig::default())
            .unwrap()
            .with_pathfinder(Arc::new(AStar::with_expansion_limit(1)));
        assert_eq!(p.get_steering(&Kinematic::at(Vec2::ZERO)), SteeringOutput::ZERO);
        assert_eq!(p.replans(), 1);
    }

    #[test]
    fn alternative_heuristic_plans_the_same_route() {
        let mut p = PathTo::new(room(), Vec2::new(90.0, 50.0), SteeringConfig::default())
            .unwrap()
            .with_heuristic(Arc::new(Manhattan));
        p.get_steering(&Kinematic::at(Vec2::new(10.0, 10.0)));
        assert_eq!(p.waypoints().first(), Some(&Vec2::new(10.0, 10.0)));
        assert_eq!(p.waypoints().last(), Some(&Vec2::new(90.0, 50.0)));
        assert_eq!(p.waypoints().len(), 7);
    }

    #[test]
    fn converges_on_destination() {
        let cfg = SteeringConfig::default();
        let limits = MotionLimits::default();
        let mut p = PathTo::new(room(), Vec2::new(90.0, 50.0), cfg.clone()).unwrap();
        let mut agent = Kinematic::at(Vec2::new(10.0, 10.0));
        let dt = 1.0 / 60.0;
        for _ in 0..600 {
            let out = p.get_steering(&agent);
            agent.integrate(&out, dt);
            limits.clamp(&mut agent);
        }
        assert!(agent.position.distance(Vec2::new(90.0, 50.0)) < cfg.arrive_radius);
        assert!(agent.speed() < 0.5);
        assert!(p.replans() > 1);
    }
}

// ── SteeringBehavior ──────────────────────────────────────────────────────────

#[cfg(test)]
mod behavior {
    use dpm_core::Vec2;

    use super::helpers::line;
    use crate::{Arrive, FollowPath, Kinematic, PathTo, Seek, SteeringBehavior, SteeringConfig, SteeringError};

    #[test]
    fn dispatches_to_each_variant() {
        let cfg = SteeringConfig::default();
        let agent = Kinematic::at(Vec2::ZERO);
        let mut all: Vec<SteeringBehavior> = vec![
            Seek::new(Vec2::new(10.0, 0.0), cfg.clone()).unwrap().into(),
            Arrive::new(Vec2::new(10.0, 0.0), cfg.clone()).unwrap().into(),
            FollowPath::from_points(vec![Vec2::ZERO, Vec2::new(10.0, 0.0)], cfg.clone()).unwrap().into(),
            PathTo::new(line(), Vec2::new(20.0, 0.0), cfg.clone()).unwrap().into(),
        ];
        let kinds: Vec<_> = all.iter().map(SteeringBehavior::kind).collect();
        assert_eq!(kinds, ["seek", "arrive", "follow_path", "path_to"]);
        for b in &mut all {
            let out = b.get_steering(&agent);
            assert!(out.linear.x > 0.0, "{}", b.kind());
        }
        assert!(SteeringBehavior::from(FollowPath::new(cfg).unwrap()).get_steering(&agent).is_zero());
    }

    #[test]
    fn validate_catches_config_edited_after_construction() {
        let cfg = SteeringConfig::default();
        let mut arrive = Arrive::new(Vec2::new(10.0, 0.0), cfg.clone()).unwrap();
        arrive.config.time_to_target = 0.0;
        let b = SteeringBehavior::from(arrive);
        assert!(matches!(b.validate(), Err(SteeringError::Config(_))));

        let p = PathTo::new(line(), Vec2::new(20.0, 0.0), cfg.clone()).unwrap();
        let b = SteeringBehavior::from(p);
        assert_eq!(b.config(), &cfg);
        b.validate().unwrap();
    }
}
