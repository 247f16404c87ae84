//! living_room — a single agent answering appliance pings.
//!
//! The fridge, the TV and the toilet ping at random.  One ping sends the
//! agent to that appliance; two or more trip the breaker and send it to the
//! breaker box; no pings send it back to the safe zone.  Reaching the
//! appliance it was sent to clears the ping(s) it was handling.
//!
//! Run with `RUST_LOG=debug` to also see every replan.

mod floor_plan;

use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use tracing::info;

use dpm_core::{SimConfig, SimRng, Tick, Vec2};
use dpm_decision::{Branch, DecisionTree, Parameters, TreeNode};
use dpm_graph::TileGraph;
use dpm_sim::{SimBuilder, SimObserver, TickReport};
use dpm_steering::{Kinematic, MotionLimits, PathTo, SteeringConfig};

use floor_plan::{BREAKER, FRIDGE, SAFEZONE, TOILET, TV, build_graph};

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED:        u64 = 7;
const FPS:         u64 = 60;
const SIM_SECS:    u64 = 120;
/// Chance per second that a quiet appliance starts pinging.
const PING_CHANCE: f64 = 0.04;
/// How close the agent must get for a ping to count as handled.
const REACH:       f32 = 12.0;

// ── Environment ───────────────────────────────────────────────────────────────

#[derive(Default)]
struct Room {
    fridge: bool,
    tv:     bool,
    toilet: bool,
}

impl Room {
    fn pings(&self) -> usize {
        [self.fridge, self.tv, self.toilet].into_iter().filter(|&p| p).count()
    }

    /// Randomly start new pings over a frame of `secs` seconds.
    fn roll(&mut self, rng: &mut SimRng, secs: f64) {
        for (name, ping) in [
            ("fridge", &mut self.fridge),
            ("tv", &mut self.tv),
            ("toilet", &mut self.toilet),
        ] {
            if !*ping && rng.gen_event(PING_CHANCE, secs) {
                *ping = true;
                info!(appliance = name, "ping");
            }
        }
    }

    /// Clear whatever the agent has just dealt with at `position`.
    fn service(&mut self, position: Vec2) -> bool {
        let near = |p: Vec2| position.distance(p) <= REACH;
        let handled = match self.pings() {
            0 => false,
            1 => {
                (self.fridge && near(FRIDGE)) || (self.tv && near(TV)) || (self.toilet && near(TOILET))
            }
            _ => near(BREAKER),
        };
        if handled {
            *self = Room::default();
        }
        handled
    }
}

fn parameters() -> Parameters<Room> {
    Parameters::new()
        .with("fridge", |r: &Room| r.fridge)
        .with("tv", |r: &Room| r.tv)
        .with("toilet", |r: &Room| r.toilet)
}

// ── Decision tree ─────────────────────────────────────────────────────────────

fn living_room_tree() -> Result<DecisionTree<String>> {
    let go = |label: &str, behavior: &str| TreeNode::action(label, behavior.to_owned());
    let mut t = DecisionTree::new(TreeNode::decision("a", "fridge"));
    t.insert(TreeNode::decision("a1", "tv"), "a", Branch::True)?;
    t.insert(go("a1b", "goToBreaker"), "a1", Branch::True)?;
    t.insert(TreeNode::decision("a2", "toilet"), "a1", Branch::False)?;
    t.insert(go("a2b", "goToBreaker"), "a2", Branch::True)?;
    t.insert(go("a3", "goToFridge"), "a2", Branch::False)?;
    t.insert(TreeNode::decision("b", "tv"), "a", Branch::False)?;
    t.insert(TreeNode::decision("b1", "toilet"), "b", Branch::True)?;
    t.insert(go("b1b", "goToBreaker"), "b1", Branch::True)?;
    t.insert(go("b2", "goToTv"), "b1", Branch::False)?;
    t.insert(TreeNode::decision("c", "toilet"), "b", Branch::False)?;
    t.insert(go("c1", "goToToilet"), "c", Branch::True)?;
    t.insert(go("d", "goToSafezone"), "c", Branch::False)?;
    Ok(t)
}

// ── Observer ──────────────────────────────────────────────────────────────────

#[derive(Default)]
struct Narrator {
    decisions: usize,
    last:      Option<TickReport>,
    fastest:   f32,
}

impl SimObserver for Narrator {
    fn on_decision(&mut self, tick: Tick, previous: Option<&str>, next: &str) {
        self.decisions += 1;
        info!(%tick, from = previous.unwrap_or("-"), to = next, "decision");
    }

    fn on_tick_end(&mut self, report: &TickReport) {
        self.fastest = self.fastest.max(report.kinematic.speed());
        if report.tick.0 % (10 * FPS) == 0 {
            info!(
                tick = %report.tick,
                behavior = report.behavior.as_str(),
                position = %report.kinematic.position,
                "progress"
            );
        }
        self.last = Some(report.clone());
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        info!(%final_tick, decisions = self.decisions, "simulation finished");
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn path_to(graph: &Arc<TileGraph>, destination: Vec2, steering: &SteeringConfig) -> Result<PathTo> {
    Ok(PathTo::new(graph.clone(), destination, steering.clone())?)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    println!("=== living_room — decide, plan, move ===");
    println!("Seed: {SEED}  |  {SIM_SECS} s at {FPS} fps");
    println!();

    // 1. Tile graph.
    let graph = Arc::new(build_graph()?);
    println!("Tile graph: {} nodes, {} edges", graph.node_count(), graph.edge_count());

    // 2. Behaviors, one per tree leaf.
    let steering = SteeringConfig::default();
    let limits = MotionLimits { max_speed: steering.max_speed, ..MotionLimits::default() };

    // 3. Sim.
    let config = SimConfig {
        tick_secs:   1.0 / FPS as f32,
        total_ticks: SIM_SECS * FPS,
        seed:        SEED,
    };
    let mut sim = SimBuilder::new(config.clone(), living_room_tree()?, Kinematic::at(SAFEZONE))
        .behavior("goToFridge", path_to(&graph, FRIDGE, &steering)?)
        .behavior("goToTv", path_to(&graph, TV, &steering)?)
        .behavior("goToToilet", path_to(&graph, TOILET, &steering)?)
        .behavior("goToBreaker", path_to(&graph, BREAKER, &steering)?)
        .behavior("goToSafezone", path_to(&graph, SAFEZONE, &steering)?)
        .limits(limits)
        .build()?;

    // 4. Environment.
    let params = parameters();
    let mut room = Room::default();
    let mut rng = SimRng::new(config.seed);
    let mut handled = 0usize;

    // 5. Run.
    let mut narrator = Narrator::default();
    let t0 = Instant::now();
    sim.run(
        |tick, agent: &Kinematic| {
            room.roll(&mut rng, f64::from(config.tick_secs));
            if room.service(agent.position) {
                handled += 1;
                info!(%tick, position = %agent.position, "pings handled");
            }
            params.snapshot(&room)
        },
        &mut narrator,
    )?;
    let elapsed = t0.elapsed();

    // 6. Summary.
    println!();
    println!("Simulation complete in {:.3} s", elapsed.as_secs_f64());
    println!("  ticks         : {}", sim.clock.current_tick.0);
    println!("  simulated     : {:.1} s", sim.clock.elapsed_secs);
    println!("  decisions     : {}", narrator.decisions);
    println!("  pings handled : {handled}");
    println!("  top speed     : {:.1}", narrator.fastest);
    if let Some(last) = &narrator.last {
        println!("  final state   : {} at {}", last.behavior, last.kinematic.position);
    }
    for name in ["goToFridge", "goToTv", "goToToilet", "goToBreaker", "goToSafezone"] {
        if let Some(dpm_steering::SteeringBehavior::PathTo(p)) = sim.behavior(name) {
            println!("  {name:<13} : {} replans", p.replans());
        }
    }

    Ok(())
}
