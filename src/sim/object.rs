//! Table objects
//!
//! A [`GameObject`] pairs a [`Shape`] with an [`ObjectKind`] and the
//! shared trigger bookkeeping: score value, cooldown window, and the
//! lit/unlit visual state. Paddles additionally carry a swing state
//! machine that animates the shape between flips.

use glam::Vec2;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::shape::{Shape, SurfaceContact};
use crate::consts::{PADDLE_MAX_ANGLE_DEG, PADDLE_SWING_TICKS};
use crate::table::TableError;
use rand::Rng;

/// Which way a paddle is currently swinging
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SwingDirection {
    Up,
    Down,
}

impl SwingDirection {
    fn signum(self) -> f32 {
        match self {
            Self::Up => 1.0,
            Self::Down => -1.0,
        }
    }

    fn flipped(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
        }
    }
}

/// Paddle swing state.
///
/// `angle_deg` tracks how far up the paddle has swung, from 0 (rest)
/// to `max_angle_deg`. A flip reverses the direction and restarts the
/// animation; the sweep is applied to the shape over
/// [`PADDLE_SWING_TICKS`] ticks, pivoting on the paddle's first corner.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PaddleState {
    pub angle_deg: f32,
    pub max_angle_deg: f32,
    pub direction: SwingDirection,
    /// Left-mounted paddles sweep mirrored
    pub mounted_left: bool,
    /// Ticks elapsed in the current swing; `None` when at rest
    pub(crate) swing_ticks: Option<u32>,
}

impl PaddleState {
    pub fn new(mounted_left: bool) -> Self {
        Self {
            angle_deg: 0.0,
            max_angle_deg: PADDLE_MAX_ANGLE_DEG,
            direction: SwingDirection::Down,
            mounted_left,
            swing_ticks: None,
        }
    }

    pub fn goes_up(&self) -> bool {
        self.direction == SwingDirection::Up
    }

    pub fn is_swinging(&self) -> bool {
        self.swing_ticks.is_some()
    }

    /// A paddle only imparts its kick while actively swinging upward.
    pub fn is_accelerating(&self) -> bool {
        self.goes_up() && self.is_swinging()
    }

    /// While swinging up and short of the top, a touched ball is thrown
    /// at a fixed angle off the paddle face instead of reflecting. The
    /// mounting side does not enter; only the shape sweep is mirrored.
    pub(crate) fn override_angle(&self) -> Option<f32> {
        if self.goes_up() && self.angle_deg < self.max_angle_deg {
            Some(-self.direction.signum() * (self.angle_deg - 38.0).to_radians())
        } else {
            None
        }
    }

    pub(crate) fn toggle(&mut self) {
        self.direction = self.direction.flipped();
        self.swing_ticks = Some(0);
    }

    /// One animation step: advance `angle_deg` along the swing ramp and
    /// sweep the shape by the difference, keeping the pivot corner
    /// fixed. Returns whether the shape moved.
    fn advance(&mut self, shape: &mut Shape) -> bool {
        let Some(ticks) = self.swing_ticks else {
            return false;
        };

        let step =
            self.max_angle_deg * self.direction.signum() * ticks as f32 / PADDLE_SWING_TICKS as f32;
        let new_angle = (self.angle_deg + step).clamp(0.0, self.max_angle_deg);
        let delta_deg = new_angle - self.angle_deg;
        self.angle_deg = new_angle;

        let mirror = if self.mounted_left { -1.0 } else { 1.0 };
        let pivot_before = pivot(shape);
        shape.rotate((delta_deg * mirror).to_radians());
        let pivot_after = pivot(shape);
        shape.translate(pivot_before - pivot_after);

        self.swing_ticks = if ticks + 1 >= PADDLE_SWING_TICKS {
            None
        } else {
            Some(ticks + 1)
        };
        true
    }
}

fn pivot(shape: &Shape) -> Vec2 {
    match shape {
        Shape::Polygon { corners } => corners[0],
        other => other.centroid(),
    }
}

/// Behavioral class of a table object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ObjectKind {
    /// Lane lamp: lights up and scores, never deflects the ball
    Rollover,
    /// Round bumper that kicks the ball away hard
    Bouncer,
    /// Static wall or slope segment
    Boundary,
    /// Player-controlled flipper
    Paddle(PaddleState),
}

/// A fixture on the table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameObject {
    pub id: u32,
    pub shape: Shape,
    pub kind: ObjectKind,
    /// Points awarded per trigger
    pub points: u64,
    /// Passive objects score but never redirect the ball
    pub passive: bool,
    /// Minimum seconds between triggers; 0 disables the gate
    pub cooldown_secs: f32,
    /// Sim-time of the last trigger; `None` until first contact
    pub last_trigger_secs: Option<f32>,
    /// Visual lamp state
    pub lit: bool,
    /// When the lamp flips back, if a revert is pending
    pub revert_at_secs: Option<f32>,
}

impl GameObject {
    fn new(id: u32, shape: Shape, kind: ObjectKind, points: u64) -> Self {
        Self {
            id,
            shape,
            kind,
            points,
            passive: false,
            cooldown_secs: 0.0,
            last_trigger_secs: None,
            lit: false,
            revert_at_secs: None,
        }
    }

    pub fn rollover(id: u32, center: Vec2, radius: f32, points: u64) -> Result<Self, TableError> {
        let shape = Shape::circle(center, radius)?;
        let mut obj = Self::new(id, shape, ObjectKind::Rollover, points);
        obj.passive = true;
        obj.cooldown_secs = 0.5;
        Ok(obj)
    }

    pub fn bouncer(id: u32, center: Vec2, radius: f32) -> Result<Self, TableError> {
        let shape = Shape::circle(center, radius)?;
        let mut obj = Self::new(id, shape, ObjectKind::Bouncer, 1000);
        obj.cooldown_secs = 0.2;
        Ok(obj)
    }

    pub fn boundary(id: u32, corners: Vec<Vec2>) -> Result<Self, TableError> {
        let shape = Shape::polygon(corners)?;
        Ok(Self::new(id, shape, ObjectKind::Boundary, 0))
    }

    pub fn paddle(id: u32, corners: Vec<Vec2>, mounted_left: bool) -> Result<Self, TableError> {
        let shape = Shape::polygon(corners)?;
        Ok(Self::new(
            id,
            shape,
            ObjectKind::Paddle(PaddleState::new(mounted_left)),
            0,
        ))
    }

    /// Whether the cooldown window has elapsed since the last trigger.
    pub fn is_action_applicable(&self, now_secs: f32) -> bool {
        self.last_trigger_secs
            .is_none_or(|t| now_secs - t >= self.cooldown_secs)
    }

    /// Record a trigger at `now_secs`. Rollovers and bouncers light up
    /// and schedule a revert; a re-trigger while lit pushes the revert
    /// back. Returns whether a lamp event occurred.
    pub(crate) fn trigger(&mut self, now_secs: f32) -> bool {
        self.last_trigger_secs = Some(now_secs);
        let revert_delay = match self.kind {
            ObjectKind::Rollover => 0.5,
            ObjectKind::Bouncer => 0.3,
            _ => return false,
        };
        self.lit = true;
        self.revert_at_secs = Some(now_secs + revert_delay);
        true
    }

    /// Per-tick housekeeping: advance paddle swings and revert expired
    /// lamp flips. Returns whether anything visible changed.
    pub(crate) fn update(&mut self, now_secs: f32) -> bool {
        let mut changed = false;
        if let ObjectKind::Paddle(state) = &mut self.kind {
            changed |= state.advance(&mut self.shape);
        }
        if let Some(at) = self.revert_at_secs {
            if now_secs >= at {
                self.lit = false;
                self.revert_at_secs = None;
                changed = true;
            }
        }
        changed
    }

    pub fn is_accelerating(&self) -> bool {
        matches!(&self.kind, ObjectKind::Paddle(state) if state.is_accelerating())
    }

    /// Speed multiplier applied to a ball this object deflects.
    ///
    /// An upswinging paddle kicks proportionally to how far along its
    /// face the ball sits, plus a random jitter. Boundaries always
    /// absorb, bouncers always accelerate. Everything else slows the
    /// ball, more so when hit from below.
    pub(crate) fn speed_factor(
        &self,
        contact: &SurfaceContact,
        ball_pos: Vec2,
        rng: &mut Pcg32,
    ) -> f32 {
        if self.is_accelerating() {
            if let Some(edge) = contact.edge {
                return kick_factor(contact.point, edge, rng);
            }
        }
        match self.kind {
            ObjectKind::Boundary => 0.7,
            ObjectKind::Bouncer => 1.6,
            _ => {
                if contact.point.y > ball_pos.y {
                    0.95
                } else {
                    0.6
                }
            }
        }
    }
}

fn kick_factor(contact: Vec2, edge: [Vec2; 2], rng: &mut Pcg32) -> f32 {
    let len = edge[0].distance(edge[1]);
    if len <= f32::EPSILON {
        return 1.0;
    }
    let dist = edge[0].distance(contact);
    1.0 + dist * 0.9 / len + rng.random_range(0.0..0.5)
}
