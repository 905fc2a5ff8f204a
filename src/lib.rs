//! Flipper Sim - a deterministic 2D pinball table physics core
//!
//! Core modules:
//! - `sim`: fixed-step simulation (geometry kernel, shapes, game-object
//!   behavior, collision resolution, scoring)
//! - `table`: table configuration and level construction
//!
//! Rendering, input dispatch, asset handling and the windowing loop are
//! external collaborators: a driver calls [`Table::step`] once per
//! scheduled interval and reads score and ball state back out through
//! [`Table::score`] / [`Table::ball_state`], or listens on a
//! [`ScoreSink`].

pub mod sim;
pub mod table;

pub use sim::{
    Ball, BallSnapshot, GameObject, NullSink, ObjectKind, ScoreSink, Shape, Table, TickInput,
};
pub use table::{classic_table, TableConfig, TableError};

use glam::Vec2;

/// Physical constants of the simulation
pub mod consts {
    /// Fixed simulation timestep in seconds (the table ticks at 200 Hz)
    pub const SIM_DT: f32 = 0.005;

    /// Downward pull added to the ball's velocity each tick (units/tick)
    pub const GRAVITY: f32 = 0.34;
    /// Multiplicative drag applied to ball speed each tick
    pub const BALL_DRAG: f32 = 0.999;
    /// Ball speed ceiling (units/tick)
    pub const MAX_SPEED: f32 = 20.0;
    /// Speed retained after bouncing off an arena wall
    pub const BOUNCE_ELASTICITY: f32 = 0.75;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 18.0;
    pub const LAUNCH_SPEED: f32 = 40.0;
    /// Launch direction: straight down into the floor, which kicks the
    /// ball back up through the plunger lane on the first bounce
    pub const LAUNCH_ANGLE: f32 = std::f32::consts::PI;

    /// Paddle swing: a 45 degree sweep animated over 15 ticks
    pub const PADDLE_MAX_ANGLE_DEG: f32 = 45.0;
    pub const PADDLE_SWING_TICKS: u32 = 15;

    /// Loss zone (the drain gap between the lower slopes) as fractions
    /// of table width
    pub const LOSS_ZONE_MIN_FRAC: f32 = 468.0 / 1080.0;
    pub const LOSS_ZONE_MAX_FRAC: f32 = 627.0 / 1080.0;
}

/// Direction vector for a travel angle.
///
/// Angle 0 points up the table and π points down: `x` advances by
/// `sin(angle) * speed` and `y` by `-cos(angle) * speed` per tick
/// (screen coordinates, y grows downward).
#[inline]
pub fn heading(angle: f32) -> Vec2 {
    Vec2::new(angle.sin(), -angle.cos())
}

/// Add two polar vectors `(angle, length)` and return the polar sum.
///
/// Shares the [`heading`] convention, so adding `(π, g)` bends a
/// velocity downward.
pub fn add_polar_vectors(angle1: f32, len1: f32, angle2: f32, len2: f32) -> (f32, f32) {
    let x = angle1.sin() * len1 + angle2.sin() * len2;
    let y = angle1.cos() * len1 + angle2.cos() * len2;

    let angle = 0.5 * std::f32::consts::PI - y.atan2(x);
    let length = x.hypot(y);

    (angle, length)
}
