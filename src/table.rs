//! Table configuration and level construction
//!
//! [`TableConfig`] is the tunable half of the simulation (dimensions,
//! gravity, launch parameters) and round-trips through JSON so tables
//! can be shipped as data. [`classic_table`] builds the standard
//! fixture layout at any table size.

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts;
use crate::sim::GameObject;

/// Errors raised while building table fixtures
#[derive(Debug, Clone, PartialEq)]
pub enum TableError {
    /// A polygon needs at least two corners
    TooFewCorners(usize),
    NonPositiveRadius(f32),
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooFewCorners(n) => {
                write!(f, "polygon needs at least 2 corners, got {n}")
            }
            Self::NonPositiveRadius(r) => write!(f, "circle radius must be positive, got {r}"),
        }
    }
}

impl std::error::Error for TableError {}

/// Tunable simulation parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableConfig {
    pub width: f32,
    pub height: f32,
    /// Score a fresh round starts from
    pub start_points: u64,
    pub ball_radius: f32,
    pub gravity: f32,
    pub ball_drag: f32,
    pub max_speed: f32,
    pub bounce_elasticity: f32,
    pub launch_pos: Vec2,
    pub launch_angle: f32,
    pub launch_speed: f32,
    /// Horizontal drain gap `[min_x, max_x]` along the bottom edge
    pub loss_zone: [f32; 2],
}

impl Default for TableConfig {
    fn default() -> Self {
        Self::sized(720.0, 1280.0)
    }
}

impl TableConfig {
    /// Standard parameters scaled to a `width` x `height` table. The
    /// launch point sits in the plunger lane at the bottom right.
    pub fn sized(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            start_points: 1000,
            ball_radius: consts::BALL_RADIUS,
            gravity: consts::GRAVITY,
            ball_drag: consts::BALL_DRAG,
            max_speed: consts::MAX_SPEED,
            bounce_elasticity: consts::BOUNCE_ELASTICITY,
            launch_pos: Vec2::new(width - 65.0, height - 40.0),
            launch_angle: consts::LAUNCH_ANGLE,
            launch_speed: consts::LAUNCH_SPEED,
            loss_zone: [
                width * consts::LOSS_ZONE_MIN_FRAC,
                width * consts::LOSS_ZONE_MAX_FRAC,
            ],
        }
    }

    /// Whether a bottom-edge contact at `x` drains the ball.
    pub fn in_loss_zone(&self, x: f32) -> bool {
        x >= self.loss_zone[0] && x <= self.loss_zone[1]
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let config: Self = serde_json::from_str(json)?;
        log::info!(
            "loaded table config: {}x{}, start score {}",
            config.width,
            config.height,
            config.start_points
        );
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

fn poly(width: f32, height: f32, fractions: &[[f32; 2]]) -> Vec<Vec2> {
    fractions
        .iter()
        .map(|[fx, fy]| Vec2::new(fx * width, fy * height))
        .collect()
}

// Fixture outlines as fractions of the table size. Paddle outlines
// have ten corners; the first corner is the pivot.

const PADDLE_LEFT_OUTER: [[f32; 2]; 10] = [
    [0.161111111111, 0.80859375],
    [0.173611111111, 0.80234375],
    [0.180555555556, 0.8015625],
    [0.2875, 0.85546875],
    [0.291666666667, 0.859375],
    [0.294444444444, 0.8640625],
    [0.286111111111, 0.86328125],
    [0.280555555556, 0.86171875],
    [0.154166666667, 0.8203125],
    [0.154166666667, 0.8171875],
];

const PADDLE_LEFT_INNER: [[f32; 2]; 10] = [
    [0.3125, 0.87890625],
    [0.326388888889, 0.87265625],
    [0.331944444444, 0.871875],
    [0.440277777778, 0.92578125],
    [0.444444444444, 0.9296875],
    [0.448611111111, 0.934375],
    [0.440277777778, 0.93359375],
    [0.431944444444, 0.93203125],
    [0.308333333333, 0.890625],
    [0.308333333333, 0.8875],
];

const PADDLE_RIGHT: [[f32; 2]; 10] = [
    [0.704166666667, 0.87890625],
    [0.691666666667, 0.87265625],
    [0.684722222222, 0.871875],
    [0.576388888889, 0.92578125],
    [0.573611111111, 0.9296875],
    [0.568055555556, 0.934375],
    [0.577777777778, 0.93359375],
    [0.586111111111, 0.93203125],
    [0.709722222222, 0.890625],
    [0.709722222222, 0.8875],
];

const OUTER_WALL: [[f32; 2]; 16] = [
    [0.0, 0.60546875],
    [0.0611111111111, 0.61015625],
    [0.0611111111111, 0.25234375],
    [0.0416666666667, 0.23203125],
    [0.0944444444444, 0.14609375],
    [0.205555555556, 0.08203125],
    [0.319444444444, 0.05390625],
    [0.491666666667, 0.03984375],
    [0.752777777778, 0.07265625],
    [0.902777777778, 0.13671875],
    [0.958333333333, 0.20859375],
    [0.972222222222, 0.56484375],
    [1.0, 0.57734375],
    [1.0, 0.5625],
    [1.0, 0.0],
    [0.0, 0.0],
];

const LOWER_LEFT_SLOPE: [[f32; 2]; 5] = [
    [0.0, 0.8640625],
    [0.0277777777778, 0.8640625],
    [0.436111111111, 0.99453125],
    [0.436111111111, 1.0],
    [0.0, 1.0],
];

const LOWER_RIGHT_SLOPE: [[f32; 2]; 5] = [
    [0.577777777778, 0.99453125],
    [0.972222222222, 0.8640625],
    [1.0, 0.8640625],
    [1.0, 1.0],
    [0.577777777778, 1.0],
];

const PLUNGER_LANE_WALL: [[f32; 2]; 12] = [
    [0.875, 0.89609375],
    [0.869444444444, 0.25546875],
    [0.841666666667, 0.19609375],
    [0.805555555556, 0.16640625],
    [0.747222222222, 0.13828125],
    [0.658333333333, 0.12109375],
    [0.661111111111, 0.10078125],
    [0.775, 0.12265625],
    [0.844444444444, 0.15859375],
    [0.883333333333, 0.20390625],
    [0.897222222222, 0.25390625],
    [0.9, 0.89453125],
];

const BOUNCER_CENTERS: [[f32; 2]; 3] = [
    [0.316666666667, 0.234375],
    [0.5, 0.34921875],
    [0.694444444444, 0.234375],
];

const WIRE_GUIDE_LEFT: [[f32; 2]; 4] = [
    [0.0388888888889, 0.8109375],
    [0.0611111111111, 0.803125],
    [0.144444444444, 0.88515625],
    [0.108333333333, 0.890625],
];

const WIRE_GUIDE_RIGHT: [[f32; 2]; 4] = [
    [0.831944444444, 0.821875],
    [0.848611111111, 0.83671875],
    [0.713888888889, 0.88359375],
    [0.695833333333, 0.86796875],
];

/// Build the standard fixture layout: three bouncers, three paddles
/// (two left-mounted, one right), a ten-lamp rollover pyramid, and the
/// wall segments that shape the playfield.
pub fn classic_table(width: f32, height: f32) -> Result<Vec<GameObject>, TableError> {
    let mut objects = Vec::with_capacity(22);
    let mut next_id = 0u32;
    let mut id = || {
        let id = next_id;
        next_id += 1;
        id
    };

    for [fx, fy] in BOUNCER_CENTERS {
        objects.push(GameObject::bouncer(
            id(),
            Vec2::new(fx * width, fy * height),
            50.0,
        )?);
    }

    objects.push(GameObject::paddle(
        id(),
        poly(width, height, &PADDLE_LEFT_OUTER),
        true,
    )?);
    objects.push(GameObject::paddle(
        id(),
        poly(width, height, &PADDLE_LEFT_INNER),
        true,
    )?);
    objects.push(GameObject::paddle(
        id(),
        poly(width, height, &PADDLE_RIGHT),
        false,
    )?);

    // Rollover pyramid: four rows widening downward from a single lamp,
    // centered on the table. Lamp n is worth n * 100 points.
    let lamp_spacing = 65.0;
    let row_spacing = 50.0;
    let radius = 25.0;
    let center_x = width / 2.0;
    let start_y = height * (1100.0 / 1280.0);
    let mut idx = 0u64;
    for row in 0..4u32 {
        let y = start_y - row_spacing * row as f32;
        for point in 0..=row {
            idx += 1;
            let x = center_x - (row as f32 / 2.0 - point as f32) * lamp_spacing;
            objects.push(GameObject::rollover(
                id(),
                Vec2::new(x, y),
                radius,
                idx * 100,
            )?);
        }
    }

    for outline in [
        &OUTER_WALL[..],
        &LOWER_LEFT_SLOPE[..],
        &LOWER_RIGHT_SLOPE[..],
        &PLUNGER_LANE_WALL[..],
        &WIRE_GUIDE_RIGHT[..],
        &WIRE_GUIDE_LEFT[..],
    ] {
        objects.push(GameObject::boundary(id(), poly(width, height, outline))?);
    }

    Ok(objects)
}
