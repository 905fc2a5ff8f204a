//! Deterministic pinball simulation
//!
//! All physics lives here and must stay pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Single-threaded; every mutation happens inside `tick`
//! - No rendering or platform dependencies

pub mod collision;
pub mod geometry;
pub mod object;
pub mod shape;
pub mod state;
pub mod tick;

pub use geometry::{
    circle_circle_intersection, point_in_polygon, segment_point_distance, Aabb, CircleContact,
    SegmentHit,
};
pub use object::{GameObject, ObjectKind, PaddleState, SwingDirection};
pub use shape::{Shape, SurfaceContact};
pub use state::{Ball, BallSnapshot, NullSink, ScoreSink, Table};
pub use tick::{tick, TickInput};
