//! Table state
//!
//! [`Table`] owns everything the simulation mutates: the fixtures, the
//! balls in flight, the score, and the seeded RNG. Drivers observe it
//! through [`Table::score`] / [`Table::ball_state`] or by passing a
//! [`ScoreSink`] into [`Table::step`].

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::geometry::Aabb;
use super::object::GameObject;
use super::tick::{tick, TickInput};
use crate::consts::SIM_DT;
use crate::table::TableConfig;

/// A ball in flight. Velocity is polar: `angle` follows the
/// [`crate::heading`] convention, `speed` is units per tick.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub radius: f32,
    pub angle: f32,
    pub speed: f32,
}

impl Ball {
    pub fn new(pos: Vec2, radius: f32, angle: f32, speed: f32) -> Self {
        Self {
            pos,
            radius,
            angle,
            speed,
        }
    }

    pub fn bounding_box(&self) -> Aabb {
        Aabb::from_circle(self.pos, self.radius)
    }
}

/// Renderer-facing view of a ball
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BallSnapshot {
    pub pos: Vec2,
    pub angle: f32,
    pub speed: f32,
}

/// Observer for game events raised during a tick.
///
/// All methods default to no-ops so a driver only implements what it
/// cares about.
pub trait ScoreSink {
    fn add_points(&mut self, _points: u64) {}
    /// An object's visible state changed (lamp flip, paddle motion)
    fn on_state_change(&mut self, _object_id: u32) {}
    fn on_ball_lost(&mut self) {}
}

/// Sink that ignores every event
pub struct NullSink;

impl ScoreSink for NullSink {}

/// The full simulation state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Table {
    pub config: TableConfig,
    pub objects: Vec<GameObject>,
    pub balls: Vec<Ball>,
    score: u64,
    running: bool,
    pub time_ticks: u64,
    seed: u64,
    pub(crate) rng: Pcg32,
}

impl Table {
    pub fn new(config: TableConfig, objects: Vec<GameObject>, seed: u64) -> Self {
        let mut table = Self {
            score: config.start_points,
            running: true,
            time_ticks: 0,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            config,
            objects,
            balls: Vec::new(),
        };
        table.spawn_ball();
        log::info!(
            "table ready: {} objects, seed {}",
            table.objects.len(),
            seed
        );
        table
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Simulation time in seconds; the cooldown and revert clocks run
    /// on this, not wall time.
    pub fn now_secs(&self) -> f32 {
        self.time_ticks as f32 * SIM_DT
    }

    pub fn ball_state(&self) -> Option<BallSnapshot> {
        self.balls.first().map(|b| BallSnapshot {
            pos: b.pos,
            angle: b.angle,
            speed: b.speed,
        })
    }

    pub(crate) fn spawn_ball(&mut self) {
        self.balls.push(Ball::new(
            self.config.launch_pos,
            self.config.ball_radius,
            self.config.launch_angle,
            self.config.launch_speed,
        ));
    }

    /// Clear the balls, restore the starting score, and relaunch.
    pub fn reset(&mut self) {
        self.score = self.config.start_points;
        self.balls.clear();
        self.spawn_ball();
    }

    /// A ball drained: the round ends and the table relaunches
    /// immediately with a fresh score.
    pub(crate) fn end_round(&mut self) {
        log::info!("ball lost at tick {}, final score {}", self.time_ticks, self.score);
        self.running = false;
        self.reset();
        self.running = true;
    }

    pub(crate) fn add_score(&mut self, points: u64) {
        self.score += points;
    }

    /// Advance the simulation one fixed step.
    pub fn step<S: ScoreSink>(&mut self, input: TickInput, sink: &mut S) {
        tick(self, input, sink);
    }

    /// [`Table::step`] without an observer.
    pub fn step_quiet(&mut self, input: TickInput) {
        tick(self, input, &mut NullSink);
    }
}
